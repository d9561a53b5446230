//! Browser backend over `XMLHttpRequest`, for `wasm32` targets.

use crate::http::requestbody::RequestBody;
use crate::http::responsebody::ResponseBody;
use crate::transport::native::{Connector, EventSink, NativeError, NativeTransport, TransportEvent};
use crate::transport::options::ResponseType;
use bytes::Bytes;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{ProgressEvent, XmlHttpRequest, XmlHttpRequestResponseType, XmlHttpRequestUpload};

type Handler = Closure<dyn FnMut(ProgressEvent)>;

impl From<JsValue> for NativeError {
    fn from(err: JsValue) -> Self {
        let message = err
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&err, &"message".into())
                    .ok()
                    .and_then(|v| v.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", err));
        NativeError(message)
    }
}

/// Creates a fresh `XMLHttpRequest` per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct XhrConnector;

impl Connector for XhrConnector {
    type Transport = XhrTransport;

    fn connect(&self) -> Result<XhrTransport, NativeError> {
        let xhr = XmlHttpRequest::new()?;
        Ok(XhrTransport {
            xhr,
            upload: None,
            handlers: Vec::new(),
        })
    }
}

/// One `XMLHttpRequest` plus the closures wired to it.
///
/// The closures live as long as the handle. Dropping it aborts a request
/// still in flight and detaches them.
pub struct XhrTransport {
    xhr: XmlHttpRequest,
    upload: Option<XmlHttpRequestUpload>,
    handlers: Vec<Handler>,
}

impl XhrTransport {
    fn handler<F>(&mut self, sink: &EventSink, event: F) -> &js_sys::Function
    where
        F: Fn(&ProgressEvent) -> TransportEvent + 'static,
    {
        let sink = sink.clone();
        let closure = Closure::new(move |e: ProgressEvent| {
            sink.emit(event(&e));
        });
        self.handlers.push(closure);
        // Just pushed.
        self.handlers[self.handlers.len() - 1].as_ref().unchecked_ref()
    }
}

fn loaded(e: &ProgressEvent) -> u64 {
    e.loaded().max(0.0) as u64
}

fn to_js(response_type: ResponseType) -> XmlHttpRequestResponseType {
    match response_type {
        ResponseType::Text => XmlHttpRequestResponseType::Text,
        ResponseType::ArrayBuffer => XmlHttpRequestResponseType::Arraybuffer,
        ResponseType::Json => XmlHttpRequestResponseType::Json,
    }
}

impl NativeTransport for XhrTransport {
    fn open(&mut self, method: &str, url: &str) -> Result<(), NativeError> {
        self.xhr.open(method, url)?;
        Ok(())
    }

    fn set_with_credentials(&mut self, enabled: bool) {
        if let Err(e) = self.xhr.set_with_credentials(enabled) {
            tracing::warn!(error = %NativeError::from(e), "withCredentials rejected");
        }
    }

    fn override_mime_type(&mut self, mime: &str) {
        if let Err(e) = self.xhr.override_mime_type(mime) {
            tracing::warn!(mime = %mime, error = %NativeError::from(e), "overrideMimeType rejected");
        }
    }

    fn set_response_type(&mut self, response_type: ResponseType) {
        self.xhr.set_response_type(to_js(response_type));
    }

    fn response_type(&self) -> ResponseType {
        match self.xhr.response_type() {
            XmlHttpRequestResponseType::Arraybuffer => ResponseType::ArrayBuffer,
            XmlHttpRequestResponseType::Json => ResponseType::Json,
            _ => ResponseType::Text,
        }
    }

    fn set_request_header(&mut self, name: &str, value: &str) {
        if let Err(e) = self.xhr.set_request_header(name, value) {
            tracing::warn!(name = %name, error = %NativeError::from(e), "setRequestHeader rejected");
        }
    }

    fn has_upload(&self) -> bool {
        self.xhr.upload().is_ok()
    }

    fn listen(&mut self, sink: EventSink, track_upload: bool) {
        let f = self.handler(&sink, |_| TransportEvent::Load).clone();
        self.xhr.set_onload(Some(&f));
        let f = self.handler(&sink, |_| TransportEvent::Abort).clone();
        self.xhr.set_onabort(Some(&f));
        let f = self.handler(&sink, |_| TransportEvent::Error).clone();
        self.xhr.set_onerror(Some(&f));
        let f = self
            .handler(&sink, |e| TransportEvent::Progress(loaded(e)))
            .clone();
        self.xhr.set_onprogress(Some(&f));

        if !track_upload {
            return;
        }
        if let Ok(upload) = self.xhr.upload() {
            let f = self
                .handler(&sink, |e| TransportEvent::UploadProgress(loaded(e)))
                .clone();
            upload.set_onprogress(Some(&f));
            let f = self.handler(&sink, |_| TransportEvent::UploadEnd).clone();
            upload.set_onloadend(Some(&f));
            self.upload = Some(upload);
        }
    }

    fn send(&mut self, body: RequestBody) -> Result<(), NativeError> {
        match body {
            RequestBody::Empty => self.xhr.send()?,
            RequestBody::Text(s) => self.xhr.send_with_opt_str(Some(s.as_str()))?,
            RequestBody::Bytes(b) => {
                let array = js_sys::Uint8Array::from(b.as_ref());
                let source: &js_sys::Object = &array;
                self.xhr.send_with_opt_buffer_source(Some(source))?
            }
        }
        Ok(())
    }

    fn abort(&mut self) {
        if let Err(e) = self.xhr.abort() {
            tracing::warn!(error = %NativeError::from(e), "abort failed");
        }
    }

    fn status(&self) -> u16 {
        self.xhr.status().unwrap_or(0)
    }

    fn status_text(&self) -> String {
        self.xhr.status_text().unwrap_or_default()
    }

    fn all_response_headers(&self) -> String {
        self.xhr.get_all_response_headers().unwrap_or_default()
    }

    fn response_url(&self) -> String {
        self.xhr.response_url()
    }

    fn response_body(&self, response_type: ResponseType) -> ResponseBody {
        match response_type {
            ResponseType::Text => {
                ResponseBody::Text(self.xhr.response_text().ok().flatten().unwrap_or_default())
            }
            ResponseType::ArrayBuffer => {
                let bytes = self
                    .xhr
                    .response()
                    .ok()
                    .filter(|v| v.is_instance_of::<js_sys::ArrayBuffer>())
                    .map(|v| js_sys::Uint8Array::new(&v).to_vec())
                    .unwrap_or_default();
                ResponseBody::Bytes(Bytes::from(bytes))
            }
            ResponseType::Json => {
                let value = self
                    .xhr
                    .response()
                    .ok()
                    .and_then(|v| js_sys::JSON::stringify(&v).ok())
                    .and_then(|s| s.as_string())
                    .and_then(|s| serde_json::from_str(&s).ok())
                    .unwrap_or(serde_json::Value::Null);
                ResponseBody::Json(value)
            }
        }
    }
}

impl Drop for XhrTransport {
    fn drop(&mut self) {
        let state = self.xhr.ready_state();
        if state != XmlHttpRequest::UNSENT && state != XmlHttpRequest::DONE {
            if let Err(e) = self.xhr.abort() {
                tracing::warn!(error = %NativeError::from(e), "abort on drop failed");
            }
        }
        self.xhr.set_onload(None);
        self.xhr.set_onabort(None);
        self.xhr.set_onerror(None);
        self.xhr.set_onprogress(None);
        if let Some(upload) = &self.upload {
            upload.set_onprogress(None);
            upload.set_onloadend(None);
        }
    }
}
