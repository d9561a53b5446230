//! Response produced by the XHR transport.

use crate::http::headers::{self, HeaderTuple};
use crate::http::responsebody::ResponseBody;
use http::{HeaderMap, StatusCode};
use url::Url;

/// Fields needed to build an [`XhrResponse`] besides the body.
#[derive(Debug, Clone, Default)]
pub struct ResponseOptions {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<HeaderTuple>,
    /// Address the transport actually reached after redirects.
    pub url: String,
}

/// Response of a completed (or aborted after send) XHR call.
///
/// `status` stays a raw `u16` because aborted or failed transports report
/// `0`, which [`StatusCode`] cannot represent.
#[derive(Debug, Clone)]
pub struct XhrResponse {
    status: u16,
    status_text: String,
    headers: Vec<HeaderTuple>,
    body: ResponseBody,
    url: String,
}

impl XhrResponse {
    pub fn new(body: ResponseBody, options: ResponseOptions) -> Self {
        Self {
            status: options.status,
            status_text: options.status_text,
            headers: options.headers,
            body,
            url: options.url,
        }
    }

    /// Raw status as reported by the transport.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Status as a [`StatusCode`], if it is a valid one.
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status).ok()
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Headers in the order the transport reported them, duplicates included.
    pub fn headers(&self) -> &[HeaderTuple] {
        &self.headers
    }

    /// First value of header `name`, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Headers as an [`http::HeaderMap`].
    pub fn header_map(&self) -> HeaderMap {
        headers::to_header_map(&self.headers)
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    pub fn into_body(self) -> ResponseBody {
        self.body
    }

    /// Final URL of the response (`responseURL`). Empty when unknown.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolve `href` relative to the final URL.
    pub fn resolve(&self, href: &str) -> Result<Url, url::ParseError> {
        Url::parse(&self.url)?.join(href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> XhrResponse {
        XhrResponse::new(
            ResponseBody::Text("ok".into()),
            ResponseOptions {
                status: 200,
                status_text: "OK".into(),
                headers: vec![
                    ("Content-Type".into(), "text/plain".into()),
                    ("Set-Cookie".into(), "a=1".into()),
                    ("set-cookie".into(), "b=2".into()),
                ],
                url: "https://example.com/a/b/page.html".into(),
            },
        )
    }

    #[test]
    fn test_accessors() {
        let res = response();
        assert_eq!(res.status(), 200);
        assert_eq!(res.status_code(), Some(StatusCode::OK));
        assert_eq!(res.status_text(), "OK");
        assert_eq!(res.header("content-type"), Some("text/plain"));
        assert_eq!(res.header("set-cookie"), Some("a=1"));
        assert_eq!(res.body().as_text(), Some("ok"));
    }

    #[test]
    fn test_header_map_keeps_duplicates() {
        let map = response().header_map();
        assert_eq!(map.get_all("set-cookie").iter().count(), 2);
    }

    #[test]
    fn test_zero_status_has_no_status_code() {
        let res = XhrResponse::new(ResponseBody::default(), ResponseOptions::default());
        assert_eq!(res.status(), 0);
        assert!(res.status_code().is_none());
    }

    #[test]
    fn test_resolve_relative() {
        let res = response();
        assert_eq!(
            res.resolve("../img.png").unwrap().as_str(),
            "https://example.com/a/img.png"
        );
        assert_eq!(
            res.resolve("/root").unwrap().as_str(),
            "https://example.com/root"
        );
    }

    #[test]
    fn test_resolve_without_url_fails() {
        let res = XhrResponse::new(ResponseBody::default(), ResponseOptions::default());
        assert!(res.resolve("x").is_err());
    }
}
