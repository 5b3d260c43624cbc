//! One-shot notices carried across a redirect in a signed cookie.
//!
//! The cookie value is `<level>.<hex message>.<hex HMAC-SHA256>`, where the
//! MAC covers `<level>.<hex message>` and is keyed with the session secret.
//! Everything in the value is plain ASCII so it needs no further escaping
//! inside a `Set-Cookie` header.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Severity of a flash notice, used to style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(FlashLevel::Success),
            "error" => Some(FlashLevel::Error),
            _ => None,
        }
    }
}

/// A notice shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// Serialize and sign this notice into a cookie value.
    pub fn encode(&self, secret: &str) -> String {
        let payload = format!(
            "{}.{}",
            self.level.as_str(),
            hex::encode(self.message.as_bytes())
        );
        let mut mac = new_mac(secret);
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        format!("{payload}.{signature}")
    }

    /// Verify and parse a cookie value produced by [`Flash::encode`].
    ///
    /// Returns `None` if the value is malformed or was not signed with
    /// `secret`. The signature comparison is constant-time.
    pub fn decode(secret: &str, value: &str) -> Option<Self> {
        let (payload, signature) = value.rsplit_once('.')?;
        let signature = hex::decode(signature)?;

        let mut mac = new_mac(secret);
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let (level, message) = payload.split_once('.')?;
        let level = FlashLevel::parse(level)?;
        let message = String::from_utf8(hex::decode(message)?).ok()?;

        Some(Self { level, message })
    }
}

fn new_mac(secret: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length")
}

// ---------------------------------------------------------------------------
// hex helpers (no extra dep)
// ---------------------------------------------------------------------------

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode a hex string. Returns `None` on odd length or non-hex input.
    pub fn decode(value: &str) -> Option<Vec<u8>> {
        if value.len() % 2 != 0 || !value.is_ascii() {
            return None;
        }
        (0..value.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&value[i..i + 2], 16).ok())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
