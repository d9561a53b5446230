//! # xhrnet
//!
//! Runs transport-agnostic HTTP requests over the browser's native
//! `XMLHttpRequest`.
//!
//! `xhrnet` is the point where an abstract request/response model meets a
//! quirky browser transport. One call takes one [`Request`], checks it before
//! touching the network, drives one native handle, emits lifecycle events on
//! the request's signal and settles exactly once with an [`XhrResponse`] or an
//! [`XhrError`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use xhrnet::transport::web::XhrConnector;
//! use xhrnet::{transport, ExecutionContext, Request, TransportOptions};
//!
//! let send = transport(TransportOptions::new(), XhrConnector, ExecutionContext::from_window());
//! let response = send(Request::get("https://example.com")).await?;
//! println!("{} from {}", response.status(), response.url());
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error taxonomy and execution context
//! - [`http`] - Request, response, headers and the request signal
//! - [`preflight`] - Checks run before any transport exists
//! - [`transport`] - Configuration, driver and native backends
//!
//! ## Errors
//!
//! | Code | Cause |
//! |---|---|
//! | `EBLOCKED` | secure page requesting an `http:` URL |
//! | `EINVALID` | URL shape known to hang the transport |
//! | `EUNAVAILABLE` | network level failure |
//! | `ECSP` | `open` refused by policy |
//! | `ETYPE` | response type not supported |
//! | `EABORT` | aborted before send |

pub mod base;
pub mod http;
pub mod preflight;
pub mod transport;

pub use crate::base::context::ExecutionContext;
pub use crate::base::error::{ErrorKind, XhrError};
pub use crate::http::request::Request;
pub use crate::http::response::XhrResponse;
pub use crate::http::signal::{RequestEvent, Signal};
pub use crate::transport::{transport, Transport, TransportOptions};
