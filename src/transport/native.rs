//! Seam between the driver and a concrete `XMLHttpRequest`-like handle.
//!
//! A [`Connector`] creates one [`NativeTransport`] per call. The handle is
//! configured synchronously and reports its callbacks (`load`, `abort`,
//! `error`, progress) through the [`EventSink`] it receives in
//! [`NativeTransport::listen`].

use crate::http::requestbody::RequestBody;
use crate::http::responsebody::ResponseBody;
use crate::transport::options::ResponseType;
use futures::channel::mpsc::UnboundedSender;
use thiserror::Error;

/// Error raised synchronously by a native handle (a thrown exception in JS terms).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct NativeError(pub String);

impl NativeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Callback fired by a native handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    /// Response fully received (`onload`).
    Load,
    /// Handle was aborted (`onabort`).
    Abort,
    /// Network level failure (`onerror`).
    Error,
    /// Download progress, cumulative bytes received.
    Progress(u64),
    /// Upload progress, cumulative bytes sent.
    UploadProgress(u64),
    /// Upload finished (`upload.onloadend`).
    UploadEnd,
}

/// What the driver's wait loop receives.
#[derive(Debug)]
pub(crate) enum Message {
    Native(TransportEvent),
    /// The request's signal aborted after send.
    Cancel,
}

/// Handle through which a native transport reports its callbacks.
///
/// Once the call has settled the receiving side is gone and every emit is a
/// no-op, so handles may fire late without any extra bookkeeping.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: UnboundedSender<Message>,
}

impl EventSink {
    pub(crate) fn new(tx: UnboundedSender<Message>) -> Self {
        Self { tx }
    }

    /// Report `event`. Returns false when the call has already settled.
    pub fn emit(&self, event: TransportEvent) -> bool {
        self.tx.unbounded_send(Message::Native(event)).is_ok()
    }

    /// Whether the call is still waiting for events.
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// One native request handle, used for exactly one call.
pub trait NativeTransport {
    /// `xhr.open(method, url)`. An error here is a policy refusal.
    fn open(&mut self, method: &str, url: &str) -> Result<(), NativeError>;

    fn set_with_credentials(&mut self, enabled: bool);

    fn override_mime_type(&mut self, mime: &str);

    /// Request a response type. Handles that do not support it leave the
    /// current type untouched.
    fn set_response_type(&mut self, response_type: ResponseType);

    /// Response type currently in effect.
    fn response_type(&self) -> ResponseType;

    fn set_request_header(&mut self, name: &str, value: &str);

    /// Whether the handle exposes an upload stream with progress events.
    fn has_upload(&self) -> bool;

    /// Wire the callbacks to `sink`. Upload callbacks are only wired when
    /// `track_upload` is set.
    fn listen(&mut self, sink: EventSink, track_upload: bool);

    /// Send `body` without re-encoding it.
    fn send(&mut self, body: RequestBody) -> Result<(), NativeError>;

    /// Abort the in-flight request. Handles report this through
    /// [`TransportEvent::Abort`].
    fn abort(&mut self);

    fn status(&self) -> u16;

    fn status_text(&self) -> String;

    /// Raw `getAllResponseHeaders()` text.
    fn all_response_headers(&self) -> String;

    /// `responseURL`, empty when unknown.
    fn response_url(&self) -> String;

    fn response_body(&self, response_type: ResponseType) -> ResponseBody;
}

/// Factory for native handles.
pub trait Connector {
    type Transport: NativeTransport;

    /// Create a fresh handle.
    fn connect(&self) -> Result<Self::Transport, NativeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;

    #[test]
    fn test_sink_after_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded();
        let sink = EventSink::new(tx);
        assert!(sink.is_open());
        assert!(sink.emit(TransportEvent::Progress(1)));

        drop(rx);
        assert!(!sink.is_open());
        assert!(!sink.emit(TransportEvent::Load));
    }
}
