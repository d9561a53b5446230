pub mod headers;
pub mod request;
pub mod requestbody;
pub mod response;
pub mod responsebody;
pub mod signal;

// Re-exports for convenience
pub use headers::{HeaderTuple, HeaderValues, Headers};
pub use request::Request;
pub use requestbody::RequestBody;
pub use response::{ResponseOptions, XhrResponse};
pub use responsebody::ResponseBody;
pub use signal::{AbortSubscription, ListenerId, RequestEvent, Signal};
