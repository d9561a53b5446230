//! Transport-agnostic request description.

use crate::http::headers::{HeaderValues, Headers};
use crate::http::requestbody::RequestBody;
use crate::http::signal::Signal;

/// An outgoing HTTP call: method, absolute URL, headers, body and the signal
/// used for abort and lifecycle events.
///
/// The transport reads a request but never changes it. Clones share the
/// same [`Signal`].
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    url: String,
    headers: Headers,
    body: RequestBody,
    signal: Signal,
}

impl Request {
    /// Create a request. The method is kept as given; transports normalize it.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Headers::new(),
            body: RequestBody::Empty,
            signal: Signal::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new("PUT", url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new("DELETE", url)
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self::new("HEAD", url)
    }

    /// Set a header, replacing an existing one with the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<HeaderValues>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    /// Attach an existing signal, e.g. one shared by several requests.
    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signal = signal;
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn signal(&self) -> &Signal {
        &self.signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chaining() {
        let req = Request::post("https://example.com/upload")
            .with_header("Content-Type", "text/plain")
            .with_header("X-Tag", vec!["a", "b"])
            .with_body("payload");

        assert_eq!(req.method(), "POST");
        assert_eq!(req.url(), "https://example.com/upload");
        assert_eq!(req.headers().len(), 2);
        assert_eq!(req.body(), &RequestBody::Text("payload".to_owned()));
    }

    #[test]
    fn test_method_kept_verbatim() {
        let req = Request::new("patch", "https://example.com");
        assert_eq!(req.method(), "patch");
    }

    #[test]
    fn test_clones_share_signal() {
        let req = Request::get("https://example.com");
        let copy = req.clone();
        req.signal().abort();
        assert!(copy.signal().aborted());
    }
}
