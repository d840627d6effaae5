//! # UI State
//!
//! Transient interface state: which tab and view are showing, which edit
//! mode owns the input, and the scratch values those modes collect.
//!
//! ## Two-Tier Mode Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Tier 1: exclusive slot        active_edit_mode: Option<ExclusiveMode>  │
//! │          at most one of LocationInput, FocusColor, LightFilterSelect,   │
//! │          LightFilterDelete, SSetSelect, OptionsEdit                     │
//! │                                                                         │
//! │  Tier 2: compound slots        CompoundModes                            │
//! │          dual_chain:      Option<DualChainMode>        (K5)             │
//! │          drive_accessory: Option<DriveAccessoryMode>   (K4)             │
//! │                                                                         │
//! │  Toggle law (both tiers):  request(M) with M active ──► None            │
//! │                            request(M) otherwise     ──► Some(M)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Enabled/disabled flags are not stored here. See [`crate::enablement`].

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{AccessoryKind, BatchField, CellRef, ItemField, TabId, ViewId};

// =============================================================================
// Exclusive Modes
// =============================================================================

/// Modes that own the table input; only one may be active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ExclusiveMode {
    /// K1: typing a location and stamping it onto cells.
    LocationInput,
    /// K2: fabric/color focus on the batch table.
    FocusColor,
    /// K2: picking rows for a light filter.
    LightFilterSelect,
    /// K2: removing light filters row by row.
    LightFilterDelete,
    /// K2: picking rows for a fabric-type set.
    SSetSelect,
    /// K3: editing mounting options cell by cell.
    OptionsEdit,
}

impl ExclusiveMode {
    /// The tab whose panel hosts this mode.
    pub const fn tab(&self) -> TabId {
        match self {
            ExclusiveMode::LocationInput => TabId::K1,
            ExclusiveMode::FocusColor
            | ExclusiveMode::LightFilterSelect
            | ExclusiveMode::LightFilterDelete
            | ExclusiveMode::SSetSelect => TabId::K2,
            ExclusiveMode::OptionsEdit => TabId::K3,
        }
    }

    /// Row-selection modes toggle whole rows instead of targeting a cell.
    pub const fn selects_rows(&self) -> bool {
        matches!(self, ExclusiveMode::LightFilterSelect | ExclusiveMode::SSetSelect)
    }
}

impl fmt::Display for ExclusiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExclusiveMode::LocationInput => "LocationInput",
            ExclusiveMode::FocusColor => "FocusColor",
            ExclusiveMode::LightFilterSelect => "LightFilterSelect",
            ExclusiveMode::LightFilterDelete => "LightFilterDelete",
            ExclusiveMode::SSetSelect => "SSetSelect",
            ExclusiveMode::OptionsEdit => "OptionsEdit",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Compound Modes
// =============================================================================

/// K5 dual/chain editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum DualChainMode {
    Dual,
    Chain,
}

impl DualChainMode {
    /// The table column this mode edits.
    pub const fn field(&self) -> ItemField {
        match self {
            DualChainMode::Dual => ItemField::Dual,
            DualChainMode::Chain => ItemField::Chain,
        }
    }
}

/// K4 drive and accessory editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum DriveAccessoryMode {
    Winder,
    Motor,
    Remote,
    Charger,
    Cord,
}

impl DriveAccessoryMode {
    pub const ALL: [DriveAccessoryMode; 5] = [
        DriveAccessoryMode::Winder,
        DriveAccessoryMode::Motor,
        DriveAccessoryMode::Remote,
        DriveAccessoryMode::Charger,
        DriveAccessoryMode::Cord,
    ];

    /// Winder and motor are set per row; the rest are counted.
    pub const fn accessory(&self) -> Option<AccessoryKind> {
        match self {
            DriveAccessoryMode::Remote => Some(AccessoryKind::Remote),
            DriveAccessoryMode::Charger => Some(AccessoryKind::Charger),
            DriveAccessoryMode::Cord => Some(AccessoryKind::Cord),
            DriveAccessoryMode::Winder | DriveAccessoryMode::Motor => None,
        }
    }

    pub const fn key(&self) -> &'static str {
        match self {
            DriveAccessoryMode::Winder => "winder",
            DriveAccessoryMode::Motor => "motor",
            DriveAccessoryMode::Remote => "remote",
            DriveAccessoryMode::Charger => "charger",
            DriveAccessoryMode::Cord => "cord",
        }
    }
}

/// Second-tier modes, each toggled in its own slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CompoundModes {
    pub dual_chain: Option<DualChainMode>,
    pub drive_accessory: Option<DriveAccessoryMode>,
}

impl CompoundModes {
    pub fn any_active(&self) -> bool {
        self.dual_chain.is_some() || self.drive_accessory.is_some()
    }
}

// =============================================================================
// Mode State
// =============================================================================

/// Both mode tiers together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ModeState {
    pub active_edit_mode: Option<ExclusiveMode>,
    pub compound: CompoundModes,
}

impl ModeState {
    pub fn any_exclusive_active(&self) -> bool {
        self.active_edit_mode.is_some()
    }

    /// Whether `mode` is the active exclusive mode.
    pub fn is_active(&self, mode: ExclusiveMode) -> bool {
        self.active_edit_mode == Some(mode)
    }

    /// True while any mode of either tier is active. Tab buttons and the
    /// navigation toggle are locked in that case.
    pub fn blocks_tab_switch(&self) -> bool {
        self.any_exclusive_active() || self.compound.any_active()
    }

    /// Next exclusive slot value after a request for `mode`.
    ///
    /// ## Example
    /// ```rust
    /// use shade_core::{ExclusiveMode, ModeState};
    ///
    /// let mut modes = ModeState::default();
    /// modes.active_edit_mode = modes.toggled(ExclusiveMode::SSetSelect);
    /// assert_eq!(modes.active_edit_mode, Some(ExclusiveMode::SSetSelect));
    /// modes.active_edit_mode = modes.toggled(ExclusiveMode::SSetSelect);
    /// assert_eq!(modes.active_edit_mode, None);
    /// ```
    pub fn toggled(&self, mode: ExclusiveMode) -> Option<ExclusiveMode> {
        toggle_slot(self.active_edit_mode, mode)
    }

    pub fn toggled_dual_chain(&self, mode: DualChainMode) -> Option<DualChainMode> {
        toggle_slot(self.compound.dual_chain, mode)
    }

    pub fn toggled_drive_accessory(&self, mode: DriveAccessoryMode) -> Option<DriveAccessoryMode> {
        toggle_slot(self.compound.drive_accessory, mode)
    }
}

fn toggle_slot<M: PartialEq>(current: Option<M>, requested: M) -> Option<M> {
    match current {
        Some(active) if active == requested => None,
        _ => Some(requested),
    }
}

// =============================================================================
// Scratch
// =============================================================================

/// Values collected while a mode is active. Cleared when modes are left.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ModeScratch {
    /// K1 location text being typed.
    pub location_input: String,
    /// Cell targeted by a focus-style mode.
    pub target_cell: Option<CellRef>,
    /// Rows picked by a row-selection mode.
    pub selected_rows: BTreeSet<usize>,
    /// K5 dual/chain value being typed.
    pub dual_chain_input: String,
    /// K2 batch column focused by the fabric/color focus mode.
    pub focus_column: Option<BatchField>,
}

impl ModeScratch {
    pub fn clear(&mut self) {
        *self = ModeScratch::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == ModeScratch::default()
    }
}

// =============================================================================
// Accessory Counts
// =============================================================================

/// K4 counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryCounts {
    pub remote: u32,
    pub charger: u32,
    pub cord: u32,
}

impl AccessoryCounts {
    pub fn get(&self, kind: AccessoryKind) -> u32 {
        match kind {
            AccessoryKind::Remote => self.remote,
            AccessoryKind::Charger => self.charger,
            AccessoryKind::Cord => self.cord,
        }
    }

    pub fn set(&mut self, kind: AccessoryKind, count: u32) {
        match kind {
            AccessoryKind::Remote => self.remote = count,
            AccessoryKind::Charger => self.charger = count,
            AccessoryKind::Cord => self.cord = count,
        }
    }
}

// =============================================================================
// UI State
// =============================================================================

/// The UI region of the application state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub active_tab: TabId,
    pub current_view: ViewId,
    pub modes: ModeState,
    pub scratch: ModeScratch,
    pub accessory_counts: AccessoryCounts,
}

impl UiState {
    /// UI state with the given tab showing and every mode off.
    pub fn with_tab(tab: TabId) -> Self {
        UiState {
            active_tab: tab,
            ..UiState::default()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusive_toggle_law() {
        let mut modes = ModeState::default();
        for mode in [ExclusiveMode::FocusColor, ExclusiveMode::OptionsEdit] {
            modes.active_edit_mode = modes.toggled(mode);
            modes.active_edit_mode = modes.toggled(mode);
            assert_eq!(modes.active_edit_mode, None);
        }
    }

    #[test]
    fn test_last_request_wins() {
        let mut modes = ModeState::default();
        modes.active_edit_mode = modes.toggled(ExclusiveMode::FocusColor);
        modes.active_edit_mode = modes.toggled(ExclusiveMode::LightFilterSelect);
        assert_eq!(modes.active_edit_mode, Some(ExclusiveMode::LightFilterSelect));
    }

    #[test]
    fn test_compound_slots_are_independent() {
        let mut modes = ModeState::default();
        modes.compound.dual_chain = modes.toggled_dual_chain(DualChainMode::Chain);
        modes.compound.drive_accessory = modes.toggled_drive_accessory(DriveAccessoryMode::Motor);

        assert_eq!(modes.active_edit_mode, None);
        assert!(modes.blocks_tab_switch());

        modes.compound.dual_chain = modes.toggled_dual_chain(DualChainMode::Dual);
        assert_eq!(modes.compound.dual_chain, Some(DualChainMode::Dual));
    }

    #[test]
    fn test_idle_modes_do_not_block_tabs() {
        assert!(!ModeState::default().blocks_tab_switch());
    }

    #[test]
    fn test_scratch_clear() {
        let mut scratch = ModeScratch {
            location_input: "Lounge".to_string(),
            ..Default::default()
        };
        scratch.selected_rows.insert(2);
        assert!(!scratch.is_empty());
        scratch.clear();
        assert!(scratch.is_empty());
    }

    #[test]
    fn test_mode_tabs() {
        assert_eq!(ExclusiveMode::LocationInput.tab(), TabId::K1);
        assert_eq!(ExclusiveMode::SSetSelect.tab(), TabId::K2);
        assert_eq!(ExclusiveMode::OptionsEdit.tab(), TabId::K3);
    }
}
