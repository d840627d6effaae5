//! Element ids shared by input handlers and render components.
//!
//! Tab buttons and tab panes use [`shade_core::TabId::button_id`] and
//! [`shade_core::TabId::content_id`].

use shade_core::{AccessoryKind, DriveAccessoryMode};

pub const LEFT_PANEL: &str = "left-panel";
pub const LEFT_PANEL_TOGGLE: &str = "left-panel-toggle";

// K1
pub const BTN_FOCUS_LOCATION: &str = "btn-focus-location";
pub const LOCATION_INPUT: &str = "location-input-box";

// K2
pub const BTN_FOCUS_FABRIC: &str = "btn-focus-fabric";
pub const BTN_FOCUS_COLOR: &str = "btn-focus-color";
pub const BTN_LIGHT_FILTER: &str = "btn-light-filter";
pub const BTN_LF_DEL: &str = "btn-lf-del";
pub const BTN_K2_SSET: &str = "btn-k2-sset";
pub const BATCH_INPUT: &str = "k2-batch-input";
pub const BTN_LF_CONFIRM: &str = "btn-lf-confirm";
pub const BTN_SSET_CONFIRM: &str = "btn-sset-confirm";

// K3
pub const BTN_K3_EDIT: &str = "btn-k3-edit-mode";

// K4
pub const K4_GRAND_TOTAL: &str = "k4-grand-total";

// K5
pub const BTN_K5_DUAL: &str = "btn-k5-dual";
pub const BTN_K5_CHAIN: &str = "btn-k5-chain";
pub const DUAL_CHAIN_INPUT: &str = "k5-input-dual-chain";
pub const K5_SUMMARY_TOTAL: &str = "k5-summary-total";
pub const K5_ACCESSORIES_TOTAL: &str = "k5-summary-accessories-total";

// Quote table
pub const QUOTE_TABLE: &str = "quote-table";
pub const QUOTE_TABLE_INPUT: &str = "quote-table-input";
pub const BTN_INSERT_ROW: &str = "btn-insert-row";
pub const BTN_DELETE_ROW: &str = "btn-delete-row";

// Actions
pub const BTN_CALCULATE: &str = "btn-calculate";
pub const BTN_NEW_QUOTE: &str = "btn-new-quote";

/// K4 mode button for a drive/accessory mode.
pub fn k4_mode_button(mode: DriveAccessoryMode) -> String {
    format!("btn-k4-{}", mode.key())
}

/// K4 price label for a drive/accessory mode.
pub fn k4_price_label(mode: DriveAccessoryMode) -> String {
    format!("k4-{}-price", mode.key())
}

/// K4 count display for an accessory.
pub fn k4_count(kind: AccessoryKind) -> String {
    format!("k4-{}-count", kind.key())
}

/// K4 stepper button; `step` is `add` or `subtract`.
pub fn k4_stepper(kind: AccessoryKind, step: &str) -> String {
    format!("btn-k4-{}-{}", kind.key(), step)
}

/// K5 summary label for a drive/accessory line.
pub fn k5_summary_label(mode: DriveAccessoryMode) -> String {
    format!("k5-summary-{}", mode.key())
}
