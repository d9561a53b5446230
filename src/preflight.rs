//! Checks run before any native handle is created.
//!
//! Order matters: an aborted request is reported as aborted even if its URL
//! would also be blocked or invalid.

use crate::base::context::ExecutionContext;
use crate::base::error::XhrError;
use crate::http::request::Request;

/// Validate `request`, handing it back when it may be sent.
pub fn check(request: Request, context: &ExecutionContext) -> Result<Request, XhrError> {
    if request.signal().aborted() {
        return Err(XhrError::Abort { request });
    }

    // Secure pages refuse http: loads without a catchable error.
    if context.is_secure() && is_insecure_url(request.url()) {
        return Err(XhrError::Blocked { request });
    }

    if is_hang_prone(request.url()) {
        return Err(XhrError::Invalid { request });
    }

    Ok(request)
}

/// URL uses the plain `http:` scheme.
pub fn is_insecure_url(url: &str) -> bool {
    url.get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http:"))
}

/// Matches `^https?:/*(?:[~#\\?;:]|$)`.
///
/// Some permissive hosts accept these URLs but never complete nor fail the
/// request.
pub fn is_hang_prone(url: &str) -> bool {
    let Some(rest) = url.strip_prefix("http") else {
        return false;
    };
    let rest = rest.strip_prefix('s').unwrap_or(rest);
    let Some(rest) = rest.strip_prefix(':') else {
        return false;
    };
    match rest.trim_start_matches('/').chars().next() {
        None => true,
        Some(c) => matches!(c, '~' | '#' | '\\' | '?' | ';' | ':'),
    }
}
