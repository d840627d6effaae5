//! # Input Handlers
//!
//! Stateless translators from raw user interactions to domain events.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Interaction { kind, target, value, data, disabled }                    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  InputRouter ── asks each handler in order ──┐                          │
//! │        │                                     │                          │
//! │        │  NotMine     ──► try the next handler                          │
//! │        │  Absorbed    ──► stop, publish nothing (disabled, malformed)   │
//! │        │  Publish(ev) ──► stop, bus.publish(ev)                         │
//! │        ▼                                                                │
//! │  EventBus                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers never read the store. A disabled source is reported by the
//! interaction itself, exactly as the surface saw it when the user acted.

mod actions;
mod left_panel;
mod table;
mod tabs;

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bus::EventBus;
use crate::error::EngineResult;
use crate::events::Event;

pub use actions::ActionsInputHandler;
pub use left_panel::LeftPanelInputHandler;
pub use table::TableInputHandler;
pub use tabs::{K1TabInputHandler, K2TabInputHandler, K3TabInputHandler, K4TabInputHandler, K5TabInputHandler};

// =============================================================================
// Interaction
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionKind {
    Click,
    KeyEnter,
    Blur,
    Input,
}

/// A raw user interaction on one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub kind: InteractionKind,
    /// Element id of the source control.
    pub target: String,
    /// Current value of an input element.
    #[serde(default)]
    pub value: String,
    /// Data attributes of the source (`row`, `column`, `type`, ...).
    #[serde(default)]
    pub data: BTreeMap<String, String>,
    /// Whether the source control was disabled.
    #[serde(default)]
    pub disabled: bool,
}

impl Interaction {
    fn new(kind: InteractionKind, target: impl Into<String>, value: impl Into<String>) -> Self {
        Interaction {
            kind,
            target: target.into(),
            value: value.into(),
            data: BTreeMap::new(),
            disabled: false,
        }
    }

    pub fn click(target: impl Into<String>) -> Self {
        Self::new(InteractionKind::Click, target, "")
    }

    pub fn enter(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(InteractionKind::KeyEnter, target, value)
    }

    pub fn blur(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(InteractionKind::Blur, target, value)
    }

    pub fn input(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(InteractionKind::Input, target, value)
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Parses a data attribute. Missing or malformed values give `None`.
    pub fn data_parsed<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.data(key)?.trim().parse().ok()
    }
}

// =============================================================================
// Handler Contract
// =============================================================================

/// What a handler made of an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// The target belongs to another handler.
    NotMine,
    /// The target is ours but nothing should be published.
    Absorbed(&'static str),
    /// Publish this event.
    Publish(Event),
}

impl HandlerOutcome {
    /// Publishes `event` unless the source was disabled.
    pub(crate) fn unless_disabled(interaction: &Interaction, event: Event) -> Self {
        if interaction.disabled {
            HandlerOutcome::Absorbed("source disabled")
        } else {
            HandlerOutcome::Publish(event)
        }
    }

    pub(crate) fn from_option(interaction: &Interaction, event: Option<Event>) -> Self {
        match event {
            Some(event) => Self::unless_disabled(interaction, event),
            None => HandlerOutcome::Absorbed("malformed interaction"),
        }
    }
}

pub trait InputHandler {
    fn name(&self) -> &'static str;

    fn translate(&self, interaction: &Interaction) -> HandlerOutcome;
}

// =============================================================================
// Router
// =============================================================================

/// Fans an interaction through the handlers and publishes the result.
pub struct InputRouter {
    handlers: Vec<Box<dyn InputHandler>>,
    bus: Rc<EventBus>,
}

impl InputRouter {
    pub fn new(bus: Rc<EventBus>) -> Self {
        InputRouter {
            handlers: Vec::new(),
            bus,
        }
    }

    /// Router with every panel handler registered.
    pub fn with_default_handlers(bus: Rc<EventBus>) -> Self {
        let mut router = Self::new(bus);
        router.register(Box::new(LeftPanelInputHandler));
        router.register(Box::new(K1TabInputHandler));
        router.register(Box::new(K2TabInputHandler));
        router.register(Box::new(K3TabInputHandler));
        router.register(Box::new(K4TabInputHandler));
        router.register(Box::new(K5TabInputHandler));
        router.register(Box::new(TableInputHandler));
        router.register(Box::new(ActionsInputHandler));
        router
    }

    pub fn register(&mut self, handler: Box<dyn InputHandler>) {
        self.handlers.push(handler);
    }

    /// Translates without publishing.
    pub fn translate(&self, interaction: &Interaction) -> HandlerOutcome {
        for handler in &self.handlers {
            let outcome = handler.translate(interaction);
            if outcome != HandlerOutcome::NotMine {
                trace!(handler = handler.name(), element = %interaction.target, "Interaction claimed");
                return outcome;
            }
        }
        HandlerOutcome::NotMine
    }

    /// Routes an interaction. Returns whether an event was published.
    pub fn route(&self, interaction: &Interaction) -> EngineResult<bool> {
        match self.translate(interaction) {
            HandlerOutcome::Publish(event) => {
                debug!(element = %interaction.target, topic = %event.topic(), "Interaction published");
                self.bus.publish(&event)?;
                Ok(true)
            }
            HandlerOutcome::Absorbed(reason) => {
                debug!(element = %interaction.target, reason, "Interaction absorbed");
                Ok(false)
            }
            HandlerOutcome::NotMine => {
                debug!(element = %interaction.target, "No handler for interaction");
                Ok(false)
            }
        }
    }
}
