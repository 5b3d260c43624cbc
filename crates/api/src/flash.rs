//! Cookie transport for flash notices.
//!
//! Form handlers answer with a `303 See Other` that sets a short-lived signed
//! `flash` cookie; the next page render reads it, shows it and clears it.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tasklist_core::flash::Flash;

use crate::state::AppState;

/// Name of the cookie carrying the signed notice.
pub const FLASH_COOKIE: &str = "flash";

/// Lifetime of a flash cookie in seconds. Long enough to survive a redirect.
pub const FLASH_MAX_AGE_SECS: u32 = 60;

/// `Set-Cookie` value that removes the flash cookie.
pub const CLEAR_FLASH_COOKIE: &str = "flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";

/// The verified flash notice sent with this request, if any.
///
/// Cookies with a missing or invalid signature are ignored.
pub struct IncomingFlash(pub Option<Flash>);

impl FromRequestParts<AppState> for IncomingFlash {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let flash = read_cookie(&parts.headers, FLASH_COOKIE)
            .and_then(|value| Flash::decode(&state.config.session_secret, value));
        Ok(IncomingFlash(flash))
    }
}

/// Find a cookie by name across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Build the `Set-Cookie` value for a signed notice.
pub fn flash_cookie(flash: &Flash, secret: &str) -> String {
    format!(
        "{FLASH_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={FLASH_MAX_AGE_SECS}",
        flash.encode(secret)
    )
}

/// Redirect to `location` carrying `flash` for the next page.
pub fn redirect_with_flash(location: &str, flash: &Flash, secret: &str) -> Response {
    (
        StatusCode::SEE_OTHER,
        [
            (LOCATION, location.to_string()),
            (SET_COOKIE, flash_cookie(flash, secret)),
        ],
    )
        .into_response()
}

/// Expire the flash cookie on a rendered page once its notice was shown.
pub fn clear_flash(mut response: Response, shown: bool) -> Response {
    if shown {
        response
            .headers_mut()
            .append(SET_COOKIE, HeaderValue::from_static(CLEAR_FLASH_COOKIE));
    }
    response
}
