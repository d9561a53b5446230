use crate::base::error::{ErrorKind, XhrError};
use crate::http::request::Request;
use crate::transport::native::NativeError;
use crate::transport::options::ResponseType;
use std::error::Error;

fn req() -> Request {
    Request::get("https://example.com/x")
}

#[test]
fn test_error_codes() {
    assert_eq!(ErrorKind::Blocked.code(), "EBLOCKED");
    assert_eq!(ErrorKind::Invalid.code(), "EINVALID");
    assert_eq!(ErrorKind::Connection.code(), "EUNAVAILABLE");
    assert_eq!(ErrorKind::Csp.code(), "ECSP");
    assert_eq!(ErrorKind::Type.code(), "ETYPE");
    assert_eq!(ErrorKind::Abort.code(), "EABORT");
    assert_eq!(ErrorKind::Abort.to_string(), "EABORT");
}

#[test]
fn test_messages() {
    let err = XhrError::Connection {
        request: req(),
        source: None,
    };
    assert_eq!(err.to_string(), "Unable to connect to \"https://example.com/x\"");
    assert_eq!(err.code(), "EUNAVAILABLE");

    let err = XhrError::Type {
        request: req(),
        response_type: ResponseType::Json,
    };
    assert_eq!(err.to_string(), "Unsupported type: json");

    let err = XhrError::Abort { request: req() };
    assert_eq!(err.to_string(), "Request has been aborted");
}

#[test]
fn test_csp_keeps_source() {
    let err = XhrError::Csp {
        request: req(),
        source: NativeError::new("connect-src 'self'"),
    };
    assert_eq!(err.kind(), ErrorKind::Csp);
    assert_eq!(err.source().unwrap().to_string(), "connect-src 'self'");
}

#[test]
fn test_into_request_returns_same_request() {
    let request = req().with_header("X-Id", "7");
    let err = XhrError::Blocked { request };
    assert_eq!(err.request().url(), "https://example.com/x");
    let back = err.into_request();
    assert!(back.headers().get("x-id").is_some());
}
