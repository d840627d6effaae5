//! # Event Bus
//!
//! Synchronous publish/subscribe keyed by [`Topic`].
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  publish(event)                                                         │
//! │    1. snapshot subscribers of event.topic() (subscription order)        │
//! │    2. call each handler in turn, before publish returns                 │
//! │       └─ a handler may publish again: that dispatch nests depth-first   │
//! │    3. first handler error stops the loop and is returned                │
//! │                                                                         │
//! │  subscribe/unsubscribe during dispatch take effect on the next publish  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The bus is `!Send`: handlers are `Rc<dyn Fn>` and the subscriber table
//! lives in a `RefCell`.
//!
//! ## Usage
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use shade_engine::bus::EventBus;
//! use shade_engine::events::{Event, Topic};
//!
//! let bus = EventBus::new();
//! let seen = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&seen);
//! let id = bus.subscribe(Topic::NavigationToggled, move |_| {
//!     counter.set(counter.get() + 1);
//!     Ok(())
//! });
//!
//! bus.publish(&Event::NavigationToggled).unwrap();
//! assert!(bus.unsubscribe(id));
//! bus.publish(&Event::NavigationToggled).unwrap();
//! assert_eq!(seen.get(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::error::EngineResult;
use crate::events::{Event, Topic};

/// Shared event handler.
pub type Handler = Rc<dyn Fn(&Event) -> EngineResult<()>>;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    topic: Topic,
    handler: Handler,
}

/// Synchronous single-threaded event bus.
pub struct EventBus {
    subscriptions: RefCell<Vec<Subscription>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus {
            subscriptions: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Registers a handler for a topic. Subscribing the same closure twice
    /// yields two independent subscriptions.
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> SubscriptionId
    where
        F: Fn(&Event) -> EngineResult<()> + 'static,
    {
        self.subscribe_handler(topic, Rc::new(handler))
    }

    /// Registers an already shared handler.
    pub fn subscribe_handler(&self, topic: Topic, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscriptions.borrow_mut().push(Subscription { id, topic, handler });
        trace!(%topic, id = id.0, "Subscribed");
        id
    }

    /// Removes a subscription. Returns false when the id is unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscriptions.borrow_mut();
        let before = subs.len();
        subs.retain(|s| s.id != id);
        subs.len() != before
    }

    /// Delivers the event to every subscriber of its topic.
    pub fn publish(&self, event: &Event) -> EngineResult<()> {
        let topic = event.topic();
        let handlers: Vec<Handler> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|s| s.topic == topic)
            .map(|s| Rc::clone(&s.handler))
            .collect();

        trace!(%topic, subscribers = handlers.len(), "Dispatching");
        for handler in handlers {
            handler(event)?;
        }
        Ok(())
    }

    /// Number of live subscriptions for a topic.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.subscriptions
            .borrow()
            .iter()
            .filter(|s| s.topic == topic)
            .count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.borrow().len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
