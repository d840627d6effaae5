//! # shade-engine: State/Event Synchronization for Shade Quote
//!
//! Keeps the quote editor's panels consistent with one canonical state.
//! User interactions become typed events, events become store mutations,
//! and every committed mutation triggers a full re-render of the panels.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shade Quote Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/console (composition root)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shade-engine (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  Interaction ─► InputRouter ─► EventBus                         │   │
//! │  │                                   │                             │   │
//! │  │                 ┌─────────────────┴──────────────┐              │   │
//! │  │                 ▼                                ▼              │   │
//! │  │        EditModeController               WorkflowController      │   │
//! │  │                 └───────────────┬────────────────┘              │   │
//! │  │                                 ▼                               │   │
//! │  │                            StateStore ─► StateChanged           │   │
//! │  │                                                │                │   │
//! │  │                 RenderAdapter ◄── RenderHost ◄─┘                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                         shade-core                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`bus`] - Synchronous publish/subscribe
//! - [`events`] - Topic vocabulary and event payloads
//! - [`store`] - The single writer of application state
//! - [`mode`] - Edit-mode state machine and table-click routing
//! - [`workflow`] - Navigation, inputs, rows, pricing and new quote
//! - [`input`] - Interaction translators and the router
//! - [`render`] - Render components, host and the adapter contract
//! - [`pricing`] - Pricing provider contract and a flat price list
//! - [`context`] - Composition root
//! - [`config`] - Engine configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use shade_engine::input::Interaction;
//! use shade_engine::pricing::PriceList;
//! use shade_engine::render::MemorySurface;
//! use shade_engine::{AppContext, EngineConfig};
//!
//! let config = EngineConfig::default();
//! let surface = Rc::new(RefCell::new(MemorySurface::new()));
//! let pricing = Box::new(PriceList::new(config.pricing.clone()));
//! let ctx = AppContext::initialize(config, None, surface.clone(), pricing).unwrap();
//!
//! ctx.dispatch(&Interaction::click("k3-tab")).unwrap();
//! assert!(surface.borrow().has_class("k3-content", "active"));
//! ```
//!
//! Everything here is single-threaded. Shared components are held in `Rc`
//! and the store's state in a `RefCell`, so none of these types are `Send`.

pub mod bus;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod ids;
pub mod input;
pub mod mode;
pub mod pricing;
pub mod render;
pub mod store;
pub mod workflow;

pub use bus::{EventBus, Handler, SubscriptionId};
pub use config::EngineConfig;
pub use context::AppContext;
pub use error::{EngineError, EngineResult};
pub use events::{BatchCommit, Event, StateRegion, Topic};
pub use mode::EditModeController;
pub use store::StateStore;
pub use workflow::WorkflowController;
