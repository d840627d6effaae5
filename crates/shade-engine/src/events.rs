//! # Event Vocabulary
//!
//! The closed set of topics the bus carries. Every topic has exactly one
//! payload shape, expressed as a variant of [`Event`].
//!
//! ## Topic Groups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Navigation      TabSwitched, NavigationToggled                         │
//! │  Mode requests   LocationModeRequested, FocusModeRequested,             │
//! │                  LightFilterModeRequested, LightFilterDeleteMode...,    │
//! │                  SSetModeRequested, OptionsModeRequested,               │
//! │                  DualChainModeRequested, DriveAccessoryModeRequested    │
//! │  Inputs          LocationInputChanged/Committed, BatchInputCommitted-   │
//! │                  ByEnter/ByBlur, TableCellClicked, CellValueCommitted,  │
//! │                  LightFilterCommitted, SSetCommitted,                   │
//! │                  DualChainInputChanged, DualChainValueCommitted,        │
//! │                  AccessoryCountChanged, RowInserted, RowDeleted         │
//! │  Actions         CalculationRequested, NewQuoteRequested                │
//! │  Store output    StateChanged                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use shade_core::{AccessoryKind, BatchField, DriveAccessoryMode, DualChainMode, ItemField, TabId};
use ts_rs::TS;

// =============================================================================
// Topics
// =============================================================================

/// Event topic. Subscriptions are keyed by topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Topic {
    TabSwitched,
    NavigationToggled,
    LocationModeRequested,
    FocusModeRequested,
    LightFilterModeRequested,
    LightFilterDeleteModeRequested,
    SSetModeRequested,
    OptionsModeRequested,
    DualChainModeRequested,
    DriveAccessoryModeRequested,
    LocationInputChanged,
    LocationInputCommitted,
    BatchInputCommittedByEnter,
    BatchInputCommittedByBlur,
    TableCellClicked,
    CellValueCommitted,
    LightFilterCommitted,
    SSetCommitted,
    DualChainInputChanged,
    DualChainValueCommitted,
    AccessoryCountChanged,
    RowInserted,
    RowDeleted,
    CalculationRequested,
    NewQuoteRequested,
    StateChanged,
}

impl Topic {
    /// Every topic, in declaration order.
    pub const ALL: [Topic; 26] = [
        Topic::TabSwitched,
        Topic::NavigationToggled,
        Topic::LocationModeRequested,
        Topic::FocusModeRequested,
        Topic::LightFilterModeRequested,
        Topic::LightFilterDeleteModeRequested,
        Topic::SSetModeRequested,
        Topic::OptionsModeRequested,
        Topic::DualChainModeRequested,
        Topic::DriveAccessoryModeRequested,
        Topic::LocationInputChanged,
        Topic::LocationInputCommitted,
        Topic::BatchInputCommittedByEnter,
        Topic::BatchInputCommittedByBlur,
        Topic::TableCellClicked,
        Topic::CellValueCommitted,
        Topic::LightFilterCommitted,
        Topic::SSetCommitted,
        Topic::DualChainInputChanged,
        Topic::DualChainValueCommitted,
        Topic::AccessoryCountChanged,
        Topic::RowInserted,
        Topic::RowDeleted,
        Topic::CalculationRequested,
        Topic::NewQuoteRequested,
        Topic::StateChanged,
    ];
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// Which region of the state a committed mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum StateRegion {
    Ui,
    Quote,
    All,
}

/// A committed cell of the K2 batch-input table.
///
/// `fabric_type` picks the batch row; the value is written to every quote
/// row of that type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BatchCommit {
    pub fabric_type: String,
    pub field: BatchField,
    pub value: String,
}

/// A published event: topic plus payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "topic", content = "payload")]
pub enum Event {
    TabSwitched { tab: TabId },
    NavigationToggled,
    LocationModeRequested,
    FocusModeRequested { column: BatchField },
    LightFilterModeRequested,
    LightFilterDeleteModeRequested,
    SSetModeRequested,
    OptionsModeRequested,
    DualChainModeRequested { mode: DualChainMode },
    DriveAccessoryModeRequested { mode: DriveAccessoryMode },
    LocationInputChanged { value: String },
    LocationInputCommitted { value: String },
    BatchInputCommittedByEnter(BatchCommit),
    BatchInputCommittedByBlur(BatchCommit),
    TableCellClicked { row: usize, column: ItemField },
    CellValueCommitted { row: usize, column: ItemField, value: String },
    LightFilterCommitted { fabric: String, color: String },
    SSetCommitted { fabric_type: String },
    DualChainInputChanged { value: String },
    DualChainValueCommitted { value: String },
    AccessoryCountChanged { kind: AccessoryKind, delta: i32 },
    RowInserted { at: usize },
    RowDeleted { row: usize },
    CalculationRequested,
    NewQuoteRequested,
    StateChanged { region: StateRegion },
}

impl Event {
    /// The topic this payload is published under.
    pub fn topic(&self) -> Topic {
        match self {
            Event::TabSwitched { .. } => Topic::TabSwitched,
            Event::NavigationToggled => Topic::NavigationToggled,
            Event::LocationModeRequested => Topic::LocationModeRequested,
            Event::FocusModeRequested { .. } => Topic::FocusModeRequested,
            Event::LightFilterModeRequested => Topic::LightFilterModeRequested,
            Event::LightFilterDeleteModeRequested => Topic::LightFilterDeleteModeRequested,
            Event::SSetModeRequested => Topic::SSetModeRequested,
            Event::OptionsModeRequested => Topic::OptionsModeRequested,
            Event::DualChainModeRequested { .. } => Topic::DualChainModeRequested,
            Event::DriveAccessoryModeRequested { .. } => Topic::DriveAccessoryModeRequested,
            Event::LocationInputChanged { .. } => Topic::LocationInputChanged,
            Event::LocationInputCommitted { .. } => Topic::LocationInputCommitted,
            Event::BatchInputCommittedByEnter(_) => Topic::BatchInputCommittedByEnter,
            Event::BatchInputCommittedByBlur(_) => Topic::BatchInputCommittedByBlur,
            Event::TableCellClicked { .. } => Topic::TableCellClicked,
            Event::CellValueCommitted { .. } => Topic::CellValueCommitted,
            Event::LightFilterCommitted { .. } => Topic::LightFilterCommitted,
            Event::SSetCommitted { .. } => Topic::SSetCommitted,
            Event::DualChainInputChanged { .. } => Topic::DualChainInputChanged,
            Event::DualChainValueCommitted { .. } => Topic::DualChainValueCommitted,
            Event::AccessoryCountChanged { .. } => Topic::AccessoryCountChanged,
            Event::RowInserted { .. } => Topic::RowInserted,
            Event::RowDeleted { .. } => Topic::RowDeleted,
            Event::CalculationRequested => Topic::CalculationRequested,
            Event::NewQuoteRequested => Topic::NewQuoteRequested,
            Event::StateChanged { .. } => Topic::StateChanged,
        }
    }
}
