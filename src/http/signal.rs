//! Abort signal and lifecycle event channel attached to a request.
//!
//! A [`Signal`] is shared between the caller and the transport. The caller
//! aborts through it and observes progress on it; the transport reads the
//! abort state, subscribes to abort and emits [`RequestEvent`]s. Events are
//! telemetry only and never drive control flow.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Lifecycle notification emitted while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEvent {
    RequestStarted,
    /// Cumulative bytes uploaded so far.
    RequestBytes(u64),
    RequestEnded,
    ResponseStarted,
    /// Cumulative bytes downloaded so far.
    ResponseBytes(u64),
    ResponseEnded,
}

impl RequestEvent {
    /// Event name as used by request/response libraries (`"requestStarted"`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            RequestEvent::RequestStarted => "requestStarted",
            RequestEvent::RequestBytes(_) => "requestBytes",
            RequestEvent::RequestEnded => "requestEnded",
            RequestEvent::ResponseStarted => "responseStarted",
            RequestEvent::ResponseBytes(_) => "responseBytes",
            RequestEvent::ResponseEnded => "responseEnded",
        }
    }
}

type Listener = Arc<dyn Fn(&RequestEvent) + Send + Sync>;
type AbortListener = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct Inner {
    aborted: AtomicBool,
    next_id: AtomicU64,
    listeners: Mutex<Vec<(u64, Listener)>>,
    abort_listeners: Mutex<Vec<(u64, AbortListener)>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared abort flag plus event emitter. Cloning yields a handle to the same signal.
#[derive(Clone, Default)]
pub struct Signal {
    inner: Arc<Inner>,
}

/// Identifies an event listener registered with [`Signal::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`Signal::abort`] has been called.
    pub fn aborted(&self) -> bool {
        self.inner.aborted.load(Ordering::SeqCst)
    }

    /// Abort the request. Only the first call runs the abort subscribers.
    pub fn abort(&self) {
        if self.inner.aborted.swap(true, Ordering::SeqCst) {
            return;
        }
        let pending = std::mem::take(&mut *lock(&self.inner.abort_listeners));
        for (_, listener) in pending {
            listener();
        }
    }

    /// Run `f` once when the signal aborts.
    ///
    /// If the signal is already aborted `f` runs immediately. Dropping the
    /// returned [`AbortSubscription`] unregisters `f`.
    pub fn on_abort<F>(&self, f: F) -> AbortSubscription
    where
        F: FnOnce() + Send + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        if self.aborted() {
            f();
        } else {
            lock(&self.inner.abort_listeners).push((id, Box::new(f)));
            // Lost a race with `abort`, which already drained the list.
            if self.aborted() {
                let late = {
                    let mut listeners = lock(&self.inner.abort_listeners);
                    listeners
                        .iter()
                        .position(|(lid, _)| *lid == id)
                        .map(|pos| listeners.remove(pos).1)
                };
                if let Some(listener) = late {
                    listener();
                }
            }
        }
        AbortSubscription {
            signal: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Register an event listener.
    pub fn on<F>(&self, f: F) -> ListenerId
    where
        F: Fn(&RequestEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.listeners).push((id, Arc::new(f)));
        ListenerId(id)
    }

    /// Remove an event listener. Unknown ids are ignored.
    pub fn off(&self, id: ListenerId) {
        lock(&self.inner.listeners).retain(|(lid, _)| *lid != id.0);
    }

    /// Deliver `event` to every listener, in registration order.
    pub fn emit(&self, event: RequestEvent) {
        // Snapshot so listeners may register or remove listeners themselves.
        let listeners: Vec<Listener> = lock(&self.inner.listeners)
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }

    fn abort_listener_count(&self) -> usize {
        lock(&self.inner.abort_listeners).len()
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("aborted", &self.aborted())
            .field("listeners", &lock(&self.inner.listeners).len())
            .field("abort_listeners", &self.abort_listener_count())
            .finish()
    }
}

/// Keeps an abort subscription alive; unregisters it on drop.
#[must_use = "dropping the subscription unregisters the abort callback"]
pub struct AbortSubscription {
    signal: Weak<Inner>,
    id: u64,
}

impl Drop for AbortSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.signal.upgrade() {
            lock(&inner.abort_listeners).retain(|(lid, _)| *lid != self.id);
        }
    }
}

impl fmt::Debug for AbortSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbortSubscription")
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_abort_runs_subscribers_once() {
        let signal = Signal::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let _sub = signal.on_abort(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });

        signal.abort();
        signal.abort();

        assert!(signal.aborted());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_on_abort_after_abort_runs_immediately() {
        let signal = Signal::new();
        signal.abort();

        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let _sub = signal.on_abort(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropped_subscription_is_not_called() {
        let signal = Signal::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let sub = signal.on_abort(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        drop(sub);
        assert_eq!(signal.abort_listener_count(), 0);

        signal.abort();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_emit_in_registration_order() {
        let signal = Signal::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = seen.clone();
        signal.on(move |e| s.lock().unwrap().push(("a", *e)));
        let s = seen.clone();
        signal.on(move |e| s.lock().unwrap().push(("b", *e)));

        signal.emit(RequestEvent::RequestStarted);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                ("a", RequestEvent::RequestStarted),
                ("b", RequestEvent::RequestStarted)
            ]
        );
    }

    #[test]
    fn test_off_removes_listener() {
        let signal = Signal::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let id = signal.on(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        signal.off(id);
        signal.emit(RequestEvent::ResponseEnded);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(RequestEvent::RequestBytes(3).name(), "requestBytes");
        assert_eq!(RequestEvent::ResponseEnded.name(), "responseEnded");
    }
}
