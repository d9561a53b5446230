//! Drives one native handle through one call.
//!
//! Configuration and send happen synchronously; the call then waits on a
//! single channel fed by the handle's callbacks and the request's abort
//! subscription. The first terminal event settles the call and drops the
//! receiver, so anything the handle fires afterwards goes nowhere.

use crate::base::error::XhrError;
use crate::http::headers;
use crate::http::request::Request;
use crate::http::response::{ResponseOptions, XhrResponse};
use crate::http::signal::RequestEvent;
use crate::transport::native::{EventSink, Message, NativeTransport, TransportEvent};
use crate::transport::options::{ResponseType, TransportOptions};
use futures::channel::mpsc;
use futures::StreamExt;

/// Status some platforms report instead of 204 No Content.
const NO_CONTENT_QUIRK: u16 = 1223;

pub(crate) fn normalize_status(status: u16) -> u16 {
    if status == NO_CONTENT_QUIRK {
        204
    } else {
        status
    }
}

/// Run `request` over `transport`. `request` must have passed pre-flight.
pub(crate) async fn run<T: NativeTransport>(
    mut transport: T,
    request: Request,
    options: &TransportOptions,
) -> Result<XhrResponse, XhrError> {
    let response_type = options.response_type;
    let method = request.method().to_ascii_uppercase();

    if let Err(source) = transport.open(&method, request.url()) {
        tracing::debug!(url = %request.url(), error = %source, "open refused");
        return Err(XhrError::Csp { request, source });
    }

    if options.with_credentials {
        transport.set_with_credentials(true);
    }

    if let Some(mime) = &options.override_mime_type {
        transport.override_mime_type(mime);
    }

    if response_type != ResponseType::Text {
        transport.set_response_type(response_type);
        if transport.response_type() != response_type {
            tracing::debug!(url = %request.url(), response_type = %response_type, "response type not supported");
            return Err(XhrError::Type {
                request,
                response_type,
            });
        }
    }

    headers::serialize(request.headers(), |name, value| {
        transport.set_request_header(name, value)
    });

    // No upload happens for these, nor without a body.
    let track_upload = method != "GET"
        && method != "HEAD"
        && !request.body().is_empty()
        && transport.has_upload();

    let (tx, mut rx) = mpsc::unbounded();
    transport.listen(EventSink::new(tx.clone()), track_upload);

    let _abort = request.signal().on_abort(move || {
        let _ = tx.unbounded_send(Message::Cancel);
    });

    if let Err(source) = transport.send(request.body().clone()) {
        tracing::debug!(url = %request.url(), error = %source, "send failed");
        return Err(XhrError::Connection {
            request,
            source: Some(source),
        });
    }

    tracing::debug!(method = %method, url = %request.url(), track_upload, "request sent");

    let mut call = InFlight {
        transport,
        settled: false,
    };

    let signal = request.signal().clone();
    signal.emit(RequestEvent::RequestStarted);
    let mut request_ended = !track_upload;
    if request_ended {
        signal.emit(RequestEvent::RequestEnded);
    }

    while let Some(message) = rx.next().await {
        match message {
            Message::Cancel => {
                tracing::debug!(url = %request.url(), "aborting in-flight request");
                call.transport.abort();
            }
            Message::Native(TransportEvent::UploadProgress(loaded)) => {
                if !request_ended {
                    signal.emit(RequestEvent::RequestBytes(loaded));
                }
            }
            Message::Native(TransportEvent::UploadEnd) => {
                if !request_ended {
                    request_ended = true;
                    signal.emit(RequestEvent::RequestEnded);
                }
            }
            Message::Native(TransportEvent::Progress(loaded)) => {
                signal.emit(RequestEvent::ResponseBytes(loaded));
            }
            Message::Native(event @ (TransportEvent::Load | TransportEvent::Abort)) => {
                if !request_ended {
                    signal.emit(RequestEvent::RequestEnded);
                }
                call.settled = true;
                let response = build_response(&call.transport, response_type);
                let aborted = event == TransportEvent::Abort;
                tracing::debug!(url = %request.url(), status = response.status(), aborted, "request done");
                signal.emit(RequestEvent::ResponseStarted);
                signal.emit(RequestEvent::ResponseEnded);
                return Ok(response);
            }
            Message::Native(TransportEvent::Error) => {
                call.settled = true;
                tracing::debug!(url = %request.url(), "transport error");
                return Err(XhrError::Connection {
                    request,
                    source: None,
                });
            }
        }
    }

    // Every sender is gone without a terminal callback.
    call.settled = true;
    tracing::warn!(url = %request.url(), "transport dropped without completing");
    Err(XhrError::Connection {
        request,
        source: None,
    })
}

/// A sent handle. Dropping it before a terminal event aborts the request,
/// so a caller dropping the call future cancels the native request too.
struct InFlight<T: NativeTransport> {
    transport: T,
    settled: bool,
}

impl<T: NativeTransport> Drop for InFlight<T> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!("call dropped before settlement, aborting");
            self.transport.abort();
        }
    }
}

fn build_response<T: NativeTransport>(transport: &T, response_type: ResponseType) -> XhrResponse {
    XhrResponse::new(
        transport.response_body(response_type),
        ResponseOptions {
            status: normalize_status(transport.status()),
            status_text: transport.status_text(),
            headers: headers::parse_raw_headers(&transport.all_response_headers()),
            url: transport.response_url(),
        },
    )
}
