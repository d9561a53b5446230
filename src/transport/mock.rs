//! Scriptable in-process transport.
//!
//! [`MockConnector`] stands in for the browser: it records every call the
//! driver makes on the handle and replays a scripted list of callbacks when
//! the request is sent. Clones share state, so a test can keep one clone to
//! inspect calls or fire late events through [`MockConnector::sink`].

use crate::http::requestbody::RequestBody;
use crate::http::responsebody::ResponseBody;
use crate::transport::native::{
    Connector, EventSink, NativeError, NativeTransport, TransportEvent,
};
use crate::transport::options::ResponseType;
use std::cell::RefCell;
use std::rc::Rc;

/// Call recorded on a mock handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open { method: String, url: String },
    WithCredentials(bool),
    OverrideMimeType(String),
    SetResponseType(ResponseType),
    SetRequestHeader(String, String),
    Listen { track_upload: bool },
    Send(RequestBody),
    Abort,
}

/// Response state the mock exposes once events fire.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub status_text: String,
    pub raw_headers: String,
    pub body: String,
    pub url: String,
}

impl Default for MockReply {
    fn default() -> Self {
        Self {
            status: 200,
            status_text: "OK".to_owned(),
            raw_headers: String::new(),
            body: String::new(),
            url: String::new(),
        }
    }
}

#[derive(Debug)]
struct Shared {
    reply: MockReply,
    script: Vec<TransportEvent>,
    refuse_open: bool,
    fail_send: bool,
    fail_connect: bool,
    upload: bool,
    unsupported: Vec<ResponseType>,
    calls: Vec<Call>,
    connections: usize,
    sink: Option<EventSink>,
}

impl Default for Shared {
    fn default() -> Self {
        Self {
            reply: MockReply::default(),
            script: vec![TransportEvent::Load],
            refuse_open: false,
            fail_send: false,
            fail_connect: false,
            upload: true,
            unsupported: Vec::new(),
            calls: Vec::new(),
            connections: 0,
            sink: None,
        }
    }
}

/// Connector producing [`MockTransport`] handles.
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    shared: Rc<RefCell<Shared>>,
}

impl MockConnector {
    /// Connector whose handles answer `200 OK` with an empty body on send.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, reply: MockReply) -> Self {
        self.shared.borrow_mut().reply = reply;
        self
    }

    /// Callbacks fired, in order, right after send. An empty script leaves
    /// the request pending until the test fires events or aborts.
    pub fn on_send(self, events: impl IntoIterator<Item = TransportEvent>) -> Self {
        self.shared.borrow_mut().script = events.into_iter().collect();
        self
    }

    /// Make `open` throw, as a content security policy would.
    pub fn refuse_open(self) -> Self {
        self.shared.borrow_mut().refuse_open = true;
        self
    }

    /// Make `send` throw.
    pub fn fail_send(self) -> Self {
        self.shared.borrow_mut().fail_send = true;
        self
    }

    /// Make handle creation fail.
    pub fn fail_connect(self) -> Self {
        self.shared.borrow_mut().fail_connect = true;
        self
    }

    /// Handles expose no upload stream.
    pub fn without_upload(self) -> Self {
        self.shared.borrow_mut().upload = false;
        self
    }

    /// Handles silently ignore `response_type`.
    pub fn unsupported(self, response_type: ResponseType) -> Self {
        self.shared.borrow_mut().unsupported.push(response_type);
        self
    }

    /// Every call made on handles so far.
    pub fn calls(&self) -> Vec<Call> {
        self.shared.borrow().calls.clone()
    }

    /// Number of handles created.
    pub fn connections(&self) -> usize {
        self.shared.borrow().connections
    }

    /// Sink of the most recent handle, once `listen` was called.
    pub fn sink(&self) -> Option<EventSink> {
        self.shared.borrow().sink.clone()
    }
}

impl Connector for MockConnector {
    type Transport = MockTransport;

    fn connect(&self) -> Result<MockTransport, NativeError> {
        let mut shared = self.shared.borrow_mut();
        if shared.fail_connect {
            return Err(NativeError::new("cannot create request handle"));
        }
        shared.connections += 1;
        Ok(MockTransport {
            shared: self.shared.clone(),
            response_type: ResponseType::Text,
            sink: None,
            done: false,
        })
    }
}

/// Handle created by [`MockConnector`].
#[derive(Debug)]
pub struct MockTransport {
    shared: Rc<RefCell<Shared>>,
    response_type: ResponseType,
    sink: Option<EventSink>,
    done: bool,
}

impl MockTransport {
    fn record(&self, call: Call) {
        self.shared.borrow_mut().calls.push(call);
    }

    fn fire(&mut self, event: TransportEvent) {
        if matches!(
            event,
            TransportEvent::Load | TransportEvent::Abort | TransportEvent::Error
        ) {
            self.done = true;
        }
        if let Some(sink) = &self.sink {
            sink.emit(event);
        }
    }
}

impl NativeTransport for MockTransport {
    fn open(&mut self, method: &str, url: &str) -> Result<(), NativeError> {
        self.record(Call::Open {
            method: method.to_owned(),
            url: url.to_owned(),
        });
        if self.shared.borrow().refuse_open {
            return Err(NativeError::new("Refused to connect: violates connect-src"));
        }
        Ok(())
    }

    fn set_with_credentials(&mut self, enabled: bool) {
        self.record(Call::WithCredentials(enabled));
    }

    fn override_mime_type(&mut self, mime: &str) {
        self.record(Call::OverrideMimeType(mime.to_owned()));
    }

    fn set_response_type(&mut self, response_type: ResponseType) {
        self.record(Call::SetResponseType(response_type));
        if !self.shared.borrow().unsupported.contains(&response_type) {
            self.response_type = response_type;
        }
    }

    fn response_type(&self) -> ResponseType {
        self.response_type
    }

    fn set_request_header(&mut self, name: &str, value: &str) {
        self.record(Call::SetRequestHeader(name.to_owned(), value.to_owned()));
    }

    fn has_upload(&self) -> bool {
        self.shared.borrow().upload
    }

    fn listen(&mut self, sink: EventSink, track_upload: bool) {
        self.record(Call::Listen { track_upload });
        self.shared.borrow_mut().sink = Some(sink.clone());
        self.sink = Some(sink);
    }

    fn send(&mut self, body: RequestBody) -> Result<(), NativeError> {
        self.record(Call::Send(body));
        if self.shared.borrow().fail_send {
            return Err(NativeError::new("InvalidStateError"));
        }
        let script = self.shared.borrow().script.clone();
        for event in script {
            self.fire(event);
        }
        Ok(())
    }

    fn abort(&mut self) {
        self.record(Call::Abort);
        if !self.done {
            self.fire(TransportEvent::Abort);
        }
    }

    fn status(&self) -> u16 {
        self.shared.borrow().reply.status
    }

    fn status_text(&self) -> String {
        self.shared.borrow().reply.status_text.clone()
    }

    fn all_response_headers(&self) -> String {
        self.shared.borrow().reply.raw_headers.clone()
    }

    fn response_url(&self) -> String {
        self.shared.borrow().reply.url.clone()
    }

    fn response_body(&self, response_type: ResponseType) -> ResponseBody {
        let body = self.shared.borrow().reply.body.clone();
        match response_type {
            ResponseType::Text => ResponseBody::Text(body),
            ResponseType::ArrayBuffer => ResponseBody::Bytes(body.into()),
            ResponseType::Json => {
                ResponseBody::Json(serde_json::from_str(&body).unwrap_or(serde_json::Value::Null))
            }
        }
    }
}
