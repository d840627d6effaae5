//! # shade-core: Pure Quote Model for Shade Quote
//!
//! This crate holds the data the quote editor works on and the rules that
//! decide what the UI may do with it. Nothing here performs I/O, dispatches
//! events or touches a rendering surface.
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
//! │  │   shade-engine: EventBus ─► StateStore ─► RenderHost            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shade-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   quote   │  │    ui     │  │ enablement│  │ validation│  │   │
//! │  │   │ QuoteData │  │ ModeState │  │  Control  │  │   rules   │  │   │
//! │  │   │ QuoteItem │  │  UiState  │  │ disabled? │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO EVENTS • NO RENDERING • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Small shared identifiers (tabs, views, columns, cells)
//! - [`quote`] - Quote data: products, rows, summaries, row metadata
//! - [`ui`] - Transient UI state and the two-tier edit-mode model
//! - [`state`] - The full application state tree
//! - [`enablement`] - Derived active/disabled flags for every control
//! - [`money`] - Money type with integer arithmetic
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shade_core::enablement::{is_disabled, Control};
//! use shade_core::{AppState, ExclusiveMode};
//!
//! let mut state = AppState::initial("rollerBlind");
//! state.ui.modes.active_edit_mode = Some(ExclusiveMode::FocusColor);
//!
//! assert!(!is_disabled(&state, Control::FocusFabric));
//! assert!(is_disabled(&state, Control::LightFilter));
//! ```

pub mod enablement;
pub mod error;
pub mod money;
pub mod quote;
pub mod state;
pub mod types;
pub mod ui;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quote::{AccessoriesSummary, ProductData, ProductSummary, QuoteData, QuoteItem, UiMetadata};
pub use state::AppState;
pub use types::*;
pub use validation::EditLimits;
pub use ui::{
    AccessoryCounts, CompoundModes, DriveAccessoryMode, DualChainMode, ExclusiveMode, ModeScratch,
    ModeState, UiState,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Product key used when no starting data names one.
pub const DEFAULT_PRODUCT_KEY: &str = "rollerBlind";

/// Maximum number of rows in a single product table.
pub const MAX_QUOTE_ROWS: usize = 200;

/// Maximum count for a single K4 accessory (remotes, chargers, cords).
pub const MAX_ACCESSORY_COUNT: u32 = 99;

/// Fabric type code marking a light-filter row.
pub const LIGHT_FILTER_TYPE: &str = "LF";
