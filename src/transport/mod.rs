//! The XHR transport: configuration, driver and native backends.
//!
//! [`transport`] turns a set of [`TransportOptions`] into a function from
//! [`Request`] to a single-settlement future. Each call runs the pre-flight
//! checks, creates one native handle through the [`Connector`] and drives it
//! to completion.

mod driver;
pub mod mock;
pub mod native;
pub mod options;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use native::{Connector, EventSink, NativeError, NativeTransport, TransportEvent};
pub use options::{ResponseType, TransportOptions};

use crate::base::context::ExecutionContext;
use crate::base::error::XhrError;
use crate::http::request::Request;
use crate::http::response::XhrResponse;
use crate::preflight;
use futures::future::{FutureExt, LocalBoxFuture};
use std::rc::Rc;

/// A configured transport. Every [`Transport::send`] is an independent call.
#[derive(Debug, Clone)]
pub struct Transport<C> {
    options: TransportOptions,
    connector: C,
    context: ExecutionContext,
}

impl<C: Connector> Transport<C> {
    pub fn new(options: TransportOptions, connector: C, context: ExecutionContext) -> Self {
        Self {
            options,
            connector,
            context,
        }
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Execute `request`, resolving with its response or exactly one error.
    ///
    /// Pre-flight failures settle immediately, before any handle exists.
    /// Aborting after send resolves with whatever the handle has; only an
    /// abort before send is an error.
    pub async fn send(&self, request: Request) -> Result<XhrResponse, XhrError> {
        let request = match preflight::check(request, &self.context) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(url = %e.request().url(), code = e.code(), "pre-flight rejected");
                return Err(e);
            }
        };

        let handle = match self.connector.connect() {
            Ok(handle) => handle,
            Err(source) => {
                tracing::warn!(url = %request.url(), error = %source, "cannot create transport");
                return Err(XhrError::Connection {
                    request,
                    source: Some(source),
                });
            }
        };

        driver::run(handle, request, &self.options).await
    }
}

/// Build a request-transforming function over `connector`.
///
/// ```rust,ignore
/// use xhrnet::transport::{transport, TransportOptions, ResponseType};
///
/// let send = transport(
///     TransportOptions::new().response_type(ResponseType::Json),
///     XhrConnector,
///     ExecutionContext::from_window(),
/// );
/// let res = send(Request::get("https://example.com/api")).await?;
/// ```
pub fn transport<C>(
    options: TransportOptions,
    connector: C,
    context: ExecutionContext,
) -> impl Fn(Request) -> LocalBoxFuture<'static, Result<XhrResponse, XhrError>>
where
    C: Connector + 'static,
    C::Transport: 'static,
{
    let transport = Rc::new(Transport::new(options, connector, context));
    move |request: Request| {
        let transport = transport.clone();
        async move { transport.send(request).await }.boxed_local()
    }
}
