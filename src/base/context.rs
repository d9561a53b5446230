//! Execution context of the adapter.
//!
//! Pre-flight checks need to know how the hosting page was loaded. Instead of
//! reading `window.location` directly, the scheme is captured in an
//! [`ExecutionContext`] value handed to the transport, so the checks run the
//! same in a browser, a worker or a native test.

/// Scheme of the document (or worker) the adapter runs in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Lowercase protocol including the trailing colon, e.g. `"https:"`.
    protocol: Option<String>,
}

impl ExecutionContext {
    /// Context loaded over `protocol`. Accepts `"https"`, `"https:"` or any casing.
    pub fn new(protocol: &str) -> Self {
        let mut protocol = protocol.trim().to_ascii_lowercase();
        if !protocol.ends_with(':') {
            protocol.push(':');
        }
        Self {
            protocol: Some(protocol),
        }
    }

    /// Context of a page served over `https:`.
    pub fn secure() -> Self {
        Self::new("https:")
    }

    /// Context of a page served over `http:`.
    pub fn insecure() -> Self {
        Self::new("http:")
    }

    /// No known location (native hosts, detached workers).
    pub fn detached() -> Self {
        Self::default()
    }

    /// Read the protocol of the current browser window.
    ///
    /// Falls back to [`ExecutionContext::detached`] when there is no window or
    /// the location is not readable.
    #[cfg(target_arch = "wasm32")]
    pub fn from_window() -> Self {
        match web_sys::window().map(|w| w.location().protocol()) {
            Some(Ok(protocol)) => Self::new(&protocol),
            _ => {
                tracing::debug!("no readable window location, using detached context");
                Self::detached()
            }
        }
    }

    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    /// Whether the hosting page was loaded over `https:`.
    pub fn is_secure(&self) -> bool {
        self.protocol.as_deref() == Some("https:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_normalized() {
        assert_eq!(ExecutionContext::new("HTTPS").protocol(), Some("https:"));
        assert_eq!(ExecutionContext::new(" http: ").protocol(), Some("http:"));
    }

    #[test]
    fn test_secure() {
        assert!(ExecutionContext::secure().is_secure());
        assert!(!ExecutionContext::insecure().is_secure());
        assert!(!ExecutionContext::new("file:").is_secure());
    }

    #[test]
    fn test_detached_is_not_secure() {
        let ctx = ExecutionContext::detached();
        assert!(ctx.protocol().is_none());
        assert!(!ctx.is_secure());
    }
}
