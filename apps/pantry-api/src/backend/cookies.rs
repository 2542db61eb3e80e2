//! Cookie access for backend handles.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::cookie::Cookie;
use actix_web::{HttpRequest, HttpResponse};
use parking_lot::Mutex;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CookieWriteError {
    #[error("response cookies already sent")]
    AlreadySent,
}

/// Cookie source and sink for one request.
pub trait CookieStore: Send + Sync {
    fn get_all(&self) -> Vec<Cookie<'static>>;

    /// Queue cookies for the response. Callers treat failure as non-fatal.
    fn set_all(&self, cookies: Vec<Cookie<'static>>) -> Result<(), CookieWriteError>;
}

/// Request cookies plus a queue of cookies to attach to the eventual response.
///
/// Once [`ResponseCookies::apply_to`] has run, further writes are refused.
#[derive(Debug, Default)]
pub struct ResponseCookies {
    incoming: Vec<Cookie<'static>>,
    outgoing: Mutex<Vec<Cookie<'static>>>,
    sent: AtomicBool,
}

impl ResponseCookies {
    pub fn new(incoming: Vec<Cookie<'static>>) -> Self {
        Self {
            incoming,
            ..Default::default()
        }
    }

    /// Snapshot the request's cookies. An unparsable Cookie header counts as
    /// no cookies at all.
    pub fn from_request(req: &HttpRequest) -> Self {
        let incoming: Vec<Cookie<'static>> = req
            .cookies()
            .map(|jar| jar.iter().cloned().collect())
            .unwrap_or_default();
        Self::new(incoming)
    }

    /// Move queued cookies onto `resp`.
    pub fn apply_to(&self, resp: &mut HttpResponse) {
        self.sent.store(true, Ordering::SeqCst);
        for cookie in self.outgoing.lock().drain(..) {
            if let Err(e) = resp.add_cookie(&cookie) {
                tracing::debug!(cookie = cookie.name(), error = %e, "cookies.apply_failed");
            }
        }
    }

    pub fn pending(&self) -> Vec<Cookie<'static>> {
        self.outgoing.lock().clone()
    }
}

impl CookieStore for ResponseCookies {
    fn get_all(&self) -> Vec<Cookie<'static>> {
        self.incoming.clone()
    }

    fn set_all(&self, cookies: Vec<Cookie<'static>>) -> Result<(), CookieWriteError> {
        if self.sent.load(Ordering::SeqCst) {
            return Err(CookieWriteError::AlreadySent);
        }
        self.outgoing.lock().extend(cookies);
        Ok(())
    }
}

/// Removal cookie for `name` at the root path.
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_string(), String::new());
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}
