//! # Event Bus
//!
//! Central event distribution system for decoupled communication
//! between models, views and anything else that shares a bus instance.
//!
//! Events are addressed by name and carry positional JSON arguments.
//! Publishing is synchronous: when `publish` returns, every live listener
//! for that event has run, in the order it subscribed.

use serde_json::Value;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::types::ALL;

/// Nesting limit for listeners that publish from inside a publish
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Type alias for event listeners to reduce complexity
pub type EventHandler = Rc<dyn Fn(&[Value]) -> anyhow::Result<()>>;

/// Handle returned by every subscribe call, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// One listener that returned an error during a publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    pub subscription: SubscriptionId,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    /// Every listener ran, but at least one of them failed
    #[error("{} of {invoked} listener(s) failed while handling '{event}'", .failures.len())]
    ListenerFailed {
        event: String,
        invoked: usize,
        failures: Vec<ListenerFailure>,
    },

    #[error("publish depth limit of {limit} exceeded while publishing '{event}'")]
    DepthExceeded { event: String, limit: usize },
}

struct Subscription {
    id: SubscriptionId,
    handler: EventHandler,
    context: Option<Weak<dyn Any>>,
    once: bool,
}

impl Subscription {
    fn is_alive(&self) -> bool {
        self.context
            .as_ref()
            .map_or(true, |context| context.strong_count() > 0)
    }
}

/// Restores the publish depth even if a listener panics
struct DepthGuard<'a>(&'a Cell<usize>);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// Named-event mediator
///
/// Meant to be constructed once by the application root and handed to
/// every component by reference. Interior mutability lets listeners
/// subscribe, unsubscribe or publish while a publish is in progress.
pub struct EventBus {
    listeners: RefCell<HashMap<String, Vec<Subscription>>>,
    next_id: Cell<u64>,
    depth: Cell<usize>,
    max_depth: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create a bus that refuses to nest publishes deeper than `max_depth`
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
            depth: Cell::new(0),
            max_depth,
        }
    }

    /// Subscribe a listener to `event`
    ///
    /// No uniqueness check is made: subscribing the same logic twice means
    /// it runs twice per publish.
    pub fn subscribe<F>(&self, event: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&[Value]) -> anyhow::Result<()> + 'static,
    {
        self.insert(event, Rc::new(handler), None, false)
    }

    /// Subscribe a listener that is removed after its first invocation
    pub fn subscribe_once<F>(&self, event: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&[Value]) -> anyhow::Result<()> + 'static,
    {
        self.insert(event, Rc::new(handler), None, true)
    }

    /// Subscribe `method` to run against `context` whenever `event` fires
    ///
    /// Only a weak reference to the context is kept. Once the context is
    /// dropped the subscription goes quiet and is pruned on the next
    /// publish of that event.
    pub fn subscribe_bound<C: 'static>(
        &self,
        event: &str,
        context: &Rc<RefCell<C>>,
        method: fn(&mut C, &[Value]) -> anyhow::Result<()>,
    ) -> SubscriptionId {
        let target = Rc::downgrade(context);
        let handler: EventHandler = Rc::new(move |args: &[Value]| {
            let Some(target) = target.upgrade() else {
                return Ok(());
            };
            let mut target = target
                .try_borrow_mut()
                .map_err(|_| anyhow::anyhow!("listener context is already borrowed"))?;
            method(&mut *target, args)
        });
        let weak: Weak<RefCell<C>> = Rc::downgrade(context);
        let liveness: Weak<dyn Any> = weak;
        self.insert(event, handler, Some(liveness), false)
    }

    /// Remove one subscription. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let mut removed = false;
        listeners.retain(|_, subscriptions| {
            let before = subscriptions.len();
            subscriptions.retain(|s| s.id != id);
            removed |= subscriptions.len() != before;
            !subscriptions.is_empty()
        });
        removed
    }

    /// Remove every subscription for `event`, returning how many there were
    pub fn unsubscribe_all(&self, event: &str) -> usize {
        self.listeners
            .borrow_mut()
            .remove(event)
            .map_or(0, |subscriptions| subscriptions.len())
    }

    /// Drop every subscription on the bus
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }

    /// Number of live listeners for `event`
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .borrow()
            .get(event)
            .map_or(0, |subscriptions| {
                subscriptions.iter().filter(|s| s.is_alive()).count()
            })
    }

    /// Publish `event` with positional `args`
    ///
    /// Listeners for `event` run first, in registration order, then the
    /// listeners registered under [`ALL`], which receive the event name
    /// prepended to `args`. A failing listener does not stop the others;
    /// all failures are reported together once every listener has run.
    ///
    /// Returns the number of listeners invoked.
    pub fn publish(&self, event: &str, args: &[Value]) -> Result<usize, BusError> {
        let depth = self.depth.get();
        if depth >= self.max_depth {
            tracing::warn!("Refusing to publish '{}' at depth {}", event, depth);
            return Err(BusError::DepthExceeded {
                event: event.to_string(),
                limit: self.max_depth,
            });
        }

        let direct = self.snapshot(event);
        let catch_all = if event == ALL {
            Vec::new()
        } else {
            self.snapshot(ALL)
        };

        tracing::trace!(
            "Publishing '{}' to {} listener(s) (+{} catch-all)",
            event,
            direct.len(),
            catch_all.len()
        );

        self.depth.set(depth + 1);
        let _guard = DepthGuard(&self.depth);

        let mut failures = Vec::new();
        let mut invoked = 0;

        for (id, handler) in &direct {
            invoked += 1;
            if let Err(e) = handler(args) {
                tracing::warn!("Listener {:?} failed on '{}': {:#}", id, event, e);
                failures.push(ListenerFailure {
                    subscription: *id,
                    message: format!("{e:#}"),
                });
            }
        }

        if !catch_all.is_empty() {
            let mut tagged = Vec::with_capacity(args.len() + 1);
            tagged.push(Value::from(event));
            tagged.extend_from_slice(args);

            for (id, handler) in &catch_all {
                invoked += 1;
                if let Err(e) = handler(&tagged) {
                    tracing::warn!("Catch-all listener {:?} failed on '{}': {:#}", id, event, e);
                    failures.push(ListenerFailure {
                        subscription: *id,
                        message: format!("{e:#}"),
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(invoked)
        } else {
            Err(BusError::ListenerFailed {
                event: event.to_string(),
                invoked,
                failures,
            })
        }
    }

    fn insert(
        &self,
        event: &str,
        handler: EventHandler,
        context: Option<Weak<dyn Any>>,
        once: bool,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        self.listeners
            .borrow_mut()
            .entry(event.to_string())
            .or_default()
            .push(Subscription {
                id,
                handler,
                context,
                once,
            });

        tracing::trace!("Subscribed {:?} to '{}'", id, event);
        id
    }

    /// Collect the live handlers for `event` and drop dead and one-shot
    /// subscriptions, so nested publishes never see them again.
    fn snapshot(&self, event: &str) -> Vec<(SubscriptionId, EventHandler)> {
        let mut listeners = self.listeners.borrow_mut();
        let Some(subscriptions) = listeners.get_mut(event) else {
            return Vec::new();
        };

        subscriptions.retain(Subscription::is_alive);
        let handlers = subscriptions
            .iter()
            .map(|s| (s.id, Rc::clone(&s.handler)))
            .collect();
        subscriptions.retain(|s| !s.once);

        if subscriptions.is_empty() {
            listeners.remove(event);
        }
        handlers
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        let mut events: Vec<_> = listeners
            .iter()
            .map(|(name, subscriptions)| (name.clone(), subscriptions.len()))
            .collect();
        events.sort();
        f.debug_struct("EventBus")
            .field("events", &events)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recorder(log: &Log, tag: &'static str) -> impl Fn(&[Value]) -> anyhow::Result<()> {
        let log = Rc::clone(log);
        move |args| {
            log.borrow_mut().push(format!("{tag}:{}", Value::from(args.to_vec())));
            Ok(())
        }
    }

    #[test]
    fn event_bus_should_deliver_args_in_registration_order() {
        let bus = EventBus::new();
        let log: Log = Rc::default();

        bus.subscribe("my-custom-event", recorder(&log, "first"));
        bus.subscribe("my-custom-event", recorder(&log, "second"));

        let invoked = bus
            .publish("my-custom-event", &[json!(1), json!(2), json!(3)])
            .unwrap();

        assert_eq!(invoked, 2);
        assert_eq!(*log.borrow(), vec!["first:[1,2,3]", "second:[1,2,3]"]);
    }

    #[test]
    fn event_bus_should_invoke_duplicate_subscriptions_twice() {
        let bus = EventBus::new();
        let count = Rc::new(Cell::new(0));

        for _ in 0..2 {
            let count = Rc::clone(&count);
            bus.subscribe("tick", move |_| {
                count.set(count.get() + 1);
                Ok(())
            });
        }
        bus.publish("tick", &[]).unwrap();

        assert_eq!(count.get(), 2);
    }

    #[test]
    fn publish_without_listeners_should_invoke_nothing() {
        let bus = EventBus::new();
        assert_eq!(bus.publish("nobody-home", &[json!("x")]).unwrap(), 0);
    }

    #[test]
    fn unsubscribe_should_stop_delivery() {
        let bus = EventBus::new();
        let log: Log = Rc::default();

        let first = bus.subscribe("e", recorder(&log, "a"));
        bus.subscribe("e", recorder(&log, "b"));

        assert!(bus.unsubscribe(first));
        assert!(!bus.unsubscribe(first));
        bus.publish("e", &[]).unwrap();

        assert_eq!(*log.borrow(), vec!["b:[]"]);
        assert_eq!(bus.listener_count("e"), 1);
    }

    #[test]
    fn unsubscribe_all_should_remove_only_that_event() {
        let bus = EventBus::new();
        let log: Log = Rc::default();
        bus.subscribe("a", recorder(&log, "a1"));
        bus.subscribe("a", recorder(&log, "a2"));
        bus.subscribe("b", recorder(&log, "b1"));

        assert_eq!(bus.unsubscribe_all("a"), 2);
        assert_eq!(bus.listener_count("a"), 0);
        assert_eq!(bus.listener_count("b"), 1);

        bus.clear();
        assert_eq!(bus.listener_count("b"), 0);
    }

    #[test]
    fn subscribe_once_should_fire_a_single_time() {
        let bus = EventBus::new();
        let log: Log = Rc::default();
        bus.subscribe_once("boot", recorder(&log, "once"));

        bus.publish("boot", &[json!(1)]).unwrap();
        bus.publish("boot", &[json!(2)]).unwrap();

        assert_eq!(*log.borrow(), vec!["once:[1]"]);
    }

    #[test]
    fn catch_all_listener_should_receive_event_name_first() {
        let bus = EventBus::new();
        let log: Log = Rc::default();
        bus.subscribe("add", recorder(&log, "direct"));
        bus.subscribe(ALL, recorder(&log, "all"));

        assert_eq!(bus.publish("add", &[json!(7)]).unwrap(), 2);
        assert_eq!(*log.borrow(), vec!["direct:[7]", "all:[\"add\",7]"]);
    }

    #[test]
    fn failing_listener_should_not_stop_later_listeners() {
        let bus = EventBus::new();
        let log: Log = Rc::default();

        bus.subscribe("e", recorder(&log, "before"));
        let broken = bus.subscribe("e", |_| anyhow::bail!("engine fire"));
        bus.subscribe("e", recorder(&log, "after"));

        let err = bus.publish("e", &[]).unwrap_err();

        assert_eq!(*log.borrow(), vec!["before:[]", "after:[]"]);
        match err {
            BusError::ListenerFailed {
                event,
                invoked,
                failures,
            } => {
                assert_eq!(event, "e");
                assert_eq!(invoked, 3);
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].subscription, broken);
                assert_eq!(failures[0].message, "engine fire");
            }
            other => panic!("Expected ListenerFailed, got {other:?}"),
        }
    }

    #[test]
    fn recursive_publish_should_stop_at_depth_limit() {
        let bus = Rc::new(EventBus::with_max_depth(4));
        let calls = Rc::new(Cell::new(0));

        let weak_bus = Rc::downgrade(&bus);
        let counter = Rc::clone(&calls);
        bus.subscribe("echo", move |_| {
            counter.set(counter.get() + 1);
            if let Some(bus) = weak_bus.upgrade() {
                bus.publish("echo", &[])?;
            }
            Ok(())
        });

        let err = bus.publish("echo", &[]).unwrap_err();

        assert_eq!(calls.get(), 4);
        assert!(matches!(err, BusError::ListenerFailed { .. }));
        // Depth is restored once the outermost publish returns
        assert!(matches!(
            bus.publish("unrelated", &[]),
            Ok(0)
        ));
    }

    struct Counter {
        hits: usize,
    }

    impl Counter {
        fn hit(&mut self, args: &[Value]) -> anyhow::Result<()> {
            self.hits += args.len().max(1);
            Ok(())
        }
    }

    #[test]
    fn bound_listener_should_mutate_its_context() {
        let bus = EventBus::new();
        let counter = Rc::new(RefCell::new(Counter { hits: 0 }));

        bus.subscribe_bound("hit", &counter, Counter::hit);
        bus.publish("hit", &[json!("a"), json!("b")]).unwrap();
        bus.publish("hit", &[]).unwrap();

        assert_eq!(counter.borrow().hits, 3);
    }

    #[test]
    fn bound_listener_should_be_pruned_after_context_drops() {
        let bus = EventBus::new();
        let counter = Rc::new(RefCell::new(Counter { hits: 0 }));
        bus.subscribe_bound("hit", &counter, Counter::hit);
        assert_eq!(bus.listener_count("hit"), 1);

        drop(counter);

        assert_eq!(bus.listener_count("hit"), 0);
        assert_eq!(bus.publish("hit", &[]).unwrap(), 0);
        assert!(format!("{bus:?}").contains("events: []"));
    }

    #[test]
    fn bound_listener_should_fail_instead_of_panicking_when_context_is_borrowed() {
        let bus = EventBus::new();
        let counter = Rc::new(RefCell::new(Counter { hits: 0 }));
        bus.subscribe_bound("hit", &counter, Counter::hit);

        let _held = counter.borrow_mut();
        let err = bus.publish("hit", &[]).unwrap_err();

        assert!(err.to_string().contains("1 of 1 listener(s) failed"));
    }

    #[quickcheck_macros::quickcheck]
    fn publish_should_call_each_subscriber_once_in_order(subscribers: u8, args: Vec<i64>) {
        let bus = EventBus::new();
        let seen: Rc<RefCell<Vec<(u8, Vec<Value>)>>> = Rc::default();

        for index in 0..subscribers {
            let seen = Rc::clone(&seen);
            bus.subscribe("prop", move |received| {
                seen.borrow_mut().push((index, received.to_vec()));
                Ok(())
            });
        }

        let payload: Vec<Value> = args.iter().map(|n| json!(n)).collect();
        let invoked = bus.publish("prop", &payload).unwrap();

        let seen = seen.borrow();
        assert_eq!(invoked, subscribers as usize);
        assert_eq!(seen.len(), subscribers as usize);
        for (position, (index, received)) in seen.iter().enumerate() {
            assert_eq!(*index as usize, position);
            assert_eq!(received, &payload);
        }
    }
}
