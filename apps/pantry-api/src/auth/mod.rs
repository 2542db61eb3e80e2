pub mod credentials;
pub mod jwt;
pub mod session_cookie;

pub use credentials::Credentials;
pub use jwt::{mint_access_token, verify_access_token, Claims, TokenError};
pub use session_cookie::SessionCookie;
