//! Push side of the bridge: the in-process event bus and the pump
//! that feeds it from the host channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use triage_events::{Dispatcher, PanelEvent};

type Handler = Box<dyn Fn(&PanelEvent) + Send + Sync>;

struct Listener {
    id: u64,
    handler: Handler,
}

#[derive(Default)]
struct BusInner {
    listeners: Mutex<Vec<Listener>>,
    next_id: AtomicU64,
}

/// Fan-out of pushed events to any number of in-process listeners.
///
/// Listeners run synchronously in subscription order for each emitted
/// event, so all of them observe the same event sequence the transport
/// delivered — no reordering, no batching.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    /// New, empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Dropping the returned [`Subscription`]
    /// unregisters it.
    pub fn subscribe(&self, handler: impl Fn(&PanelEvent) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push(Listener {
            id,
            handler: Box::new(handler),
        });
        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver one event to every listener, in subscription order.
    pub fn emit(&self, event: &PanelEvent) {
        let listeners = self.inner.listeners.lock();
        debug!(listeners = listeners.len(), "emit panel event");
        for listener in listeners.iter() {
            (listener.handler)(event);
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }
}

/// Handle to a registered listener. Unsubscribes on drop.
pub struct Subscription {
    id: u64,
    bus: Weak<BusInner>,
}

impl Subscription {
    /// Unregister explicitly (same as dropping).
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.listeners.lock().retain(|l| l.id != self.id);
        }
    }
}

/// Wire a [`Dispatcher`] to the bus so every pushed event is folded
/// into its store. Keep the returned subscription alive for the
/// panel's lifetime.
pub fn attach_dispatcher(bus: &EventBus, dispatcher: Dispatcher) -> Subscription {
    bus.subscribe(move |event| dispatcher.apply(event.clone()))
}

/// Drain raw wire payloads into the bus until the channel closes.
///
/// Each payload is one pushed message, `{"type": ..., "data": ...}`.
/// Payloads that do not parse as a known [`PanelEvent`] are logged and
/// dropped — an older panel build must survive a newer backend.
pub async fn pump_events(bus: EventBus, mut rx: mpsc::Receiver<serde_json::Value>) {
    while let Some(raw) = rx.recv().await {
        match serde_json::from_value::<PanelEvent>(raw) {
            Ok(event) => bus.emit(&event),
            Err(e) => warn!(error = %e, "dropping unrecognized push event"),
        }
    }
    debug!("push channel closed, event pump exiting");
}
