pub mod error;
pub mod flash;
pub mod tasks;
pub mod types;
