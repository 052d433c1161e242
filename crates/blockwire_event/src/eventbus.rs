use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::trace;

type Listener = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Handle returned by [`EventBus::on`] and [`EventBus::once`], used to
/// unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    once: bool,
    listener: Listener,
}

/// Map from event type to an ordered list of callbacks.
///
/// Delivery is synchronous on the emitting thread. Callbacks run outside the
/// internal lock, so they may subscribe, unsubscribe or emit themselves.
pub struct EventBus {
    next_id: AtomicU64,
    listeners: Mutex<HashMap<TypeId, Vec<Subscription>>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let map = self.listeners.lock();
        f.debug_struct("EventBus")
            .field("event_types", &map.len())
            .field("listeners", &map.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a listener for a specific event type.
    ///
    /// # Example
    /// ```rust
    /// use blockwire_event::{EventBus, LoginFinished};
    ///
    /// let bus = EventBus::new();
    /// bus.on::<LoginFinished, _>(|event| {
    ///     println!("logged in as {}", event.username);
    /// });
    /// ```
    pub fn on<E, F>(&self, listener: F) -> SubscriptionId
    where
        E: Any + Send + Sync + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe::<E, F>(listener, false)
    }

    /// Like [`EventBus::on`], but the listener is removed before its first
    /// delivery and never runs again.
    pub fn once<E, F>(&self, listener: F) -> SubscriptionId
    where
        E: Any + Send + Sync + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe::<E, F>(listener, true)
    }

    fn subscribe<E, F>(&self, listener: F, once: bool) -> SubscriptionId
    where
        E: Any + Send + Sync + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));

        let wrapper: Listener = Arc::new(move |ev| {
            if let Some(e) = ev.downcast_ref::<E>() {
                listener(e);
            }
        });

        self.listeners
            .lock()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(Subscription {
                id,
                once,
                listener: wrapper,
            });

        id
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut map = self.listeners.lock();
        for subscriptions in map.values_mut() {
            if let Some(pos) = subscriptions.iter().position(|s| s.id == id) {
                subscriptions.remove(pos);
                return true;
            }
        }
        false
    }

    /// Emits an event to every listener registered for its type, in
    /// subscription order. Returns how many listeners ran.
    pub fn emit<E>(&self, event: &E) -> usize
    where
        E: Any + Send + Sync + 'static,
    {
        let to_call: Vec<Listener> = {
            let mut map = self.listeners.lock();
            let Some(subscriptions) = map.get_mut(&TypeId::of::<E>()) else {
                return 0;
            };
            let listeners = subscriptions.iter().map(|s| s.listener.clone()).collect();
            subscriptions.retain(|s| !s.once);
            listeners
        };

        trace!(
            event = type_name::<E>(),
            listeners = to_call.len(),
            "Emitting event"
        );

        for listener in &to_call {
            listener(event);
        }
        to_call.len()
    }

    pub fn listener_count<E: Any + 'static>(&self) -> usize {
        self.listeners
            .lock()
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    pub fn clear(&self) {
        self.listeners.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug)]
    struct Ping(u32);

    #[derive(Debug)]
    struct Pong;

    #[test]
    fn test_listeners_receive_in_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = seen.clone();
        bus.on::<Ping, _>(move |p| s.lock().push(("first", p.0)));
        let s = seen.clone();
        bus.on::<Ping, _>(move |p| s.lock().push(("second", p.0)));

        assert_eq!(bus.emit(&Ping(7)), 2);
        assert_eq!(bus.emit(&Pong), 0);
        assert_eq!(*seen.lock(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_once_fires_once() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        bus.once::<Ping, _>(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(&Ping(1));
        bus.emit(&Ping(2));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_count::<Ping>(), 0);
    }

    #[test]
    fn test_off_removes_listener() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        let id = bus.on::<Ping, _>(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(&Ping(1));
        assert!(bus.off(id));
        assert!(!bus.off(id));
        bus.emit(&Ping(2));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_may_reenter_bus() {
        let bus = Arc::new(EventBus::new());
        let pongs = Arc::new(AtomicUsize::new(0));

        let inner = bus.clone();
        bus.on::<Ping, _>(move |_| {
            inner.emit(&Pong);
        });
        let p = pongs.clone();
        bus.on::<Pong, _>(move |_| {
            p.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(&Ping(0));
        assert_eq!(pongs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_emit_delivers_once_subscription_once() {
        let bus = Arc::new(EventBus::new());
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        bus.once::<Ping, _>(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let bus = bus.clone();
                std::thread::spawn(move || {
                    bus.emit(&Ping(i));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
