//! Database client factory: per-request handles bound to caller credentials.

pub mod client;
pub mod cookies;

pub use client::{create_client, AuthError, AuthUser, BackendHandle};
pub use cookies::{CookieStore, ResponseCookies};
