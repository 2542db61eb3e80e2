//! Error codes for the pantry API.

pub mod error_code;

pub use error_code::ErrorCode;
