//! # Derived Enablement
//!
//! Active and disabled flags for every control, computed from a state
//! snapshot. Nothing here is stored; render components call these functions
//! on each pass.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mode button       disabled = exclusive mode active && not its own mode │
//! │  LF-delete button  ... || no light-filtered rows                        │
//! │  Tab button        disabled = any mode active (either tier)             │
//! │                               && not the active tab                     │
//! │  Navigation toggle disabled = any mode active (either tier)             │
//! │  Compound button   disabled = exclusive mode active                     │
//! │                               || its slot holds a different mode        │
//! │  Accessory stepper enabled only while its accessory mode is active      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::state::AppState;
use crate::types::{AccessoryKind, TabId};
use crate::ui::{DriveAccessoryMode, DualChainMode, ExclusiveMode};

/// Every control whose state is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    TabButton(TabId),
    NavigationToggle,
    LocationButton,
    FocusFabric,
    LightFilter,
    LightFilterDelete,
    SSet,
    OptionsEdit,
    DualButton,
    ChainButton,
    DriveButton(DriveAccessoryMode),
    AccessoryStep(AccessoryKind),
}

impl Control {
    /// The exclusive mode this control toggles, if any.
    pub const fn exclusive_mode(&self) -> Option<ExclusiveMode> {
        match self {
            Control::LocationButton => Some(ExclusiveMode::LocationInput),
            Control::FocusFabric => Some(ExclusiveMode::FocusColor),
            Control::LightFilter => Some(ExclusiveMode::LightFilterSelect),
            Control::LightFilterDelete => Some(ExclusiveMode::LightFilterDelete),
            Control::SSet => Some(ExclusiveMode::SSetSelect),
            Control::OptionsEdit => Some(ExclusiveMode::OptionsEdit),
            _ => None,
        }
    }

    fn dual_chain_mode(&self) -> Option<DualChainMode> {
        match self {
            Control::DualButton => Some(DualChainMode::Dual),
            Control::ChainButton => Some(DualChainMode::Chain),
            _ => None,
        }
    }
}

/// Whether the control shows as active (pressed, or the selected tab).
pub fn is_active(state: &AppState, control: Control) -> bool {
    let modes = &state.ui.modes;
    if let Some(mode) = control.exclusive_mode() {
        return modes.is_active(mode);
    }
    if let Some(mode) = control.dual_chain_mode() {
        return modes.compound.dual_chain == Some(mode);
    }
    match control {
        Control::TabButton(tab) => state.ui.active_tab == tab,
        Control::DriveButton(mode) => modes.compound.drive_accessory == Some(mode),
        _ => false,
    }
}

/// Whether the control is disabled.
pub fn is_disabled(state: &AppState, control: Control) -> bool {
    let modes = &state.ui.modes;
    let exclusive_active = modes.any_exclusive_active();

    if let Some(mode) = control.exclusive_mode() {
        let locked = exclusive_active && !modes.is_active(mode);
        if control == Control::LightFilterDelete {
            return locked || !state.quote.ui_metadata.has_lf_modified();
        }
        return locked;
    }

    if let Some(mode) = control.dual_chain_mode() {
        let other_active = matches!(modes.compound.dual_chain, Some(active) if active != mode);
        return exclusive_active || other_active;
    }

    match control {
        Control::TabButton(tab) => modes.blocks_tab_switch() && state.ui.active_tab != tab,
        Control::NavigationToggle => modes.blocks_tab_switch(),
        Control::DriveButton(mode) => {
            let other_active = matches!(modes.compound.drive_accessory, Some(active) if active != mode);
            exclusive_active || other_active
        }
        Control::AccessoryStep(kind) => modes.compound.drive_accessory.and_then(|m| m.accessory()) != Some(kind),
        _ => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_PRODUCT_KEY;

    fn state() -> AppState {
        AppState::initial(DEFAULT_PRODUCT_KEY)
    }

    #[test]
    fn test_idle_state_enables_mode_buttons() {
        let state = state();
        for control in [
            Control::LocationButton,
            Control::FocusFabric,
            Control::LightFilter,
            Control::SSet,
            Control::OptionsEdit,
            Control::NavigationToggle,
        ] {
            assert!(!is_disabled(&state, control), "{:?}", control);
        }
    }

    #[test]
    fn test_lf_delete_needs_modified_rows() {
        let mut state = state();
        assert!(is_disabled(&state, Control::LightFilterDelete));

        state.quote.ui_metadata.lf_modified_rows.insert(0);
        assert!(!is_disabled(&state, Control::LightFilterDelete));
    }

    #[test]
    fn test_lf_delete_mode_with_no_rows_stays_disabled() {
        let mut state = state();
        state.ui.modes.active_edit_mode = Some(ExclusiveMode::LightFilterDelete);
        assert!(is_active(&state, Control::LightFilterDelete));
        assert!(is_disabled(&state, Control::LightFilterDelete));
    }

    #[test]
    fn test_exclusive_mode_locks_other_buttons() {
        let mut state = state();
        state.ui.modes.active_edit_mode = Some(ExclusiveMode::SSetSelect);

        assert!(!is_disabled(&state, Control::SSet));
        assert!(is_active(&state, Control::SSet));
        assert!(is_disabled(&state, Control::FocusFabric));
        assert!(is_disabled(&state, Control::LocationButton));
        assert!(is_disabled(&state, Control::DualButton));
        assert!(is_disabled(&state, Control::DriveButton(DriveAccessoryMode::Winder)));
    }

    #[test]
    fn test_compound_mode_locks_tabs_but_not_active_tab() {
        let mut state = state();
        state.ui.active_tab = TabId::K4;
        state.ui.modes.compound.drive_accessory = Some(DriveAccessoryMode::Remote);

        assert!(!is_disabled(&state, Control::TabButton(TabId::K4)));
        for tab in [TabId::K1, TabId::K2, TabId::K3, TabId::K5] {
            assert!(is_disabled(&state, Control::TabButton(tab)));
        }
        assert!(is_disabled(&state, Control::NavigationToggle));
    }

    #[test]
    fn test_compound_buttons_exclude_each_other() {
        let mut state = state();
        state.ui.modes.compound.dual_chain = Some(DualChainMode::Dual);
        assert!(!is_disabled(&state, Control::DualButton));
        assert!(is_disabled(&state, Control::ChainButton));
    }

    #[test]
    fn test_accessory_steppers_follow_mode() {
        let mut state = state();
        assert!(is_disabled(&state, Control::AccessoryStep(AccessoryKind::Cord)));

        state.ui.modes.compound.drive_accessory = Some(DriveAccessoryMode::Cord);
        assert!(!is_disabled(&state, Control::AccessoryStep(AccessoryKind::Cord)));
        assert!(is_disabled(&state, Control::AccessoryStep(AccessoryKind::Remote)));
    }
}
