//! Error codes that appear in problem-details responses.
//!
//! Codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings clients see.
//! Add new codes here; never pass ad-hoc strings as error codes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Caller presented no usable session or token
    Unauthorized,
    /// Opaque server-side failure
    InternalError,
    /// Startup or runtime configuration is incomplete
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
