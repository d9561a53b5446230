use crate::http::request::Request;
use crate::transport::native::NativeError;
use crate::transport::options::ResponseType;
use std::fmt;
use thiserror::Error;

/// Failure kinds a transport call can settle with.
///
/// The set is closed: every rejection maps to exactly one of these and none of
/// them is retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Secure page asked for an insecure URL (mixed content).
    Blocked,
    /// URL shape is known to hang the transport forever.
    Invalid,
    /// The transport reported a network level failure.
    Connection,
    /// Opening the transport was refused, usually by a content security policy.
    Csp,
    /// The requested response type was not honoured by the transport.
    Type,
    /// The request was aborted before it was sent.
    Abort,
}

impl ErrorKind {
    /// Stable string code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Blocked => "EBLOCKED",
            ErrorKind::Invalid => "EINVALID",
            ErrorKind::Connection => "EUNAVAILABLE",
            ErrorKind::Csp => "ECSP",
            ErrorKind::Type => "ETYPE",
            ErrorKind::Abort => "EABORT",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error a transport call rejects with. Each variant owns the request that
/// failed so the caller can inspect or re-issue it.
#[derive(Debug, Error)]
pub enum XhrError {
    #[error("The connection to \"{}\" is blocked", .request.url())]
    Blocked { request: Request },

    #[error("Refusing to connect to \"{}\"", .request.url())]
    Invalid { request: Request },

    #[error("Unable to connect to \"{}\"", .request.url())]
    Connection {
        request: Request,
        #[source]
        source: Option<NativeError>,
    },

    #[error("Refused to connect to \"{}\"", .request.url())]
    Csp {
        request: Request,
        #[source]
        source: NativeError,
    },

    #[error("Unsupported type: {response_type}")]
    Type {
        request: Request,
        response_type: ResponseType,
    },

    #[error("Request has been aborted")]
    Abort { request: Request },
}

impl XhrError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            XhrError::Blocked { .. } => ErrorKind::Blocked,
            XhrError::Invalid { .. } => ErrorKind::Invalid,
            XhrError::Connection { .. } => ErrorKind::Connection,
            XhrError::Csp { .. } => ErrorKind::Csp,
            XhrError::Type { .. } => ErrorKind::Type,
            XhrError::Abort { .. } => ErrorKind::Abort,
        }
    }

    /// Stable string code, e.g. `"EUNAVAILABLE"`.
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// The request that failed.
    pub fn request(&self) -> &Request {
        match self {
            XhrError::Blocked { request }
            | XhrError::Invalid { request }
            | XhrError::Connection { request, .. }
            | XhrError::Csp { request, .. }
            | XhrError::Type { request, .. }
            | XhrError::Abort { request } => request,
        }
    }

    /// Give back ownership of the failed request.
    pub fn into_request(self) -> Request {
        match self {
            XhrError::Blocked { request }
            | XhrError::Invalid { request }
            | XhrError::Connection { request, .. }
            | XhrError::Csp { request, .. }
            | XhrError::Type { request, .. }
            | XhrError::Abort { request } => request,
        }
    }
}
