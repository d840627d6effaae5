//! Components for the five tab panes.

use shade_core::enablement::{is_active, is_disabled, Control};
use shade_core::money::{format_price, Money};
use shade_core::{
    AccessoriesSummary, AccessoryKind, AppState, BatchField, DriveAccessoryMode, DualChainMode, ExclusiveMode,
};

use super::{AttributePatch, RenderComponent, RenderFrame};
use crate::ids;

/// Active and disabled flags of a control, straight from enablement.
fn control_patch(state: &AppState, control: Control) -> AttributePatch {
    AttributePatch::new()
        .active(is_active(state, control))
        .disabled(is_disabled(state, control))
}

fn accessory_price(accessories: &AccessoriesSummary, mode: DriveAccessoryMode) -> Option<Money> {
    let cents = match mode {
        DriveAccessoryMode::Winder => accessories.winder_cents,
        DriveAccessoryMode::Motor => accessories.motor_cents,
        DriveAccessoryMode::Remote => accessories.remote_cents,
        DriveAccessoryMode::Charger => accessories.charger_cents,
        DriveAccessoryMode::Cord => accessories.cord_cents,
    };
    cents.map(Money::from_cents)
}

fn accessories(state: &AppState) -> AccessoriesSummary {
    state
        .quote
        .summary()
        .map(|s| s.accessories.clone())
        .unwrap_or_default()
}

// =============================================================================
// K1
// =============================================================================

pub struct K1TabComponent;

impl RenderComponent for K1TabComponent {
    fn name(&self) -> &'static str {
        "k1-tab"
    }

    fn render(&self, state: &AppState) -> RenderFrame {
        let mut frame = RenderFrame::new();
        frame.set(ids::BTN_FOCUS_LOCATION, control_patch(state, Control::LocationButton));

        let editing = state.ui.modes.is_active(ExclusiveMode::LocationInput);
        frame.set(
            ids::LOCATION_INPUT,
            AttributePatch::new()
                .disabled(!editing)
                .text(state.ui.scratch.location_input.clone()),
        );
        frame
    }
}

// =============================================================================
// K2
// =============================================================================

pub struct K2TabComponent;

impl RenderComponent for K2TabComponent {
    fn name(&self) -> &'static str {
        "k2-tab"
    }

    fn render(&self, state: &AppState) -> RenderFrame {
        let mut frame = RenderFrame::new();
        let modes = &state.ui.modes;
        let scratch = &state.ui.scratch;

        // Fabric and color share the focus mode; the column picks the button.
        let focus_disabled = is_disabled(state, Control::FocusFabric);
        let focusing = modes.is_active(ExclusiveMode::FocusColor);
        for (id, column) in [
            (ids::BTN_FOCUS_FABRIC, BatchField::Fabric),
            (ids::BTN_FOCUS_COLOR, BatchField::Color),
        ] {
            frame.set(
                id,
                AttributePatch::new()
                    .active(focusing && scratch.focus_column == Some(column))
                    .disabled(focus_disabled),
            );
        }

        frame.set(ids::BTN_LIGHT_FILTER, control_patch(state, Control::LightFilter));
        frame.set(ids::BTN_LF_DEL, control_patch(state, Control::LightFilterDelete));
        frame.set(ids::BTN_K2_SSET, control_patch(state, Control::SSet));

        frame.set(
            ids::BATCH_INPUT,
            AttributePatch::new().disabled(modes.any_exclusive_active() && !focusing),
        );

        let has_selection = !scratch.selected_rows.is_empty();
        frame.set(
            ids::BTN_LF_CONFIRM,
            AttributePatch::new()
                .disabled(!(modes.is_active(ExclusiveMode::LightFilterSelect) && has_selection)),
        );
        frame.set(
            ids::BTN_SSET_CONFIRM,
            AttributePatch::new().disabled(!(modes.is_active(ExclusiveMode::SSetSelect) && has_selection)),
        );
        frame
    }
}

// =============================================================================
// K3
// =============================================================================

pub struct K3TabComponent;

impl RenderComponent for K3TabComponent {
    fn name(&self) -> &'static str {
        "k3-tab"
    }

    fn render(&self, state: &AppState) -> RenderFrame {
        let mut frame = RenderFrame::new();
        frame.set(ids::BTN_K3_EDIT, control_patch(state, Control::OptionsEdit));
        frame
    }
}

// =============================================================================
// K4
// =============================================================================

pub struct K4TabComponent;

impl RenderComponent for K4TabComponent {
    fn name(&self) -> &'static str {
        "k4-tab"
    }

    fn render(&self, state: &AppState) -> RenderFrame {
        let mut frame = RenderFrame::new();
        let accessories = accessories(state);

        for mode in DriveAccessoryMode::ALL {
            frame.set(ids::k4_mode_button(mode), control_patch(state, Control::DriveButton(mode)));
            frame.set(
                ids::k4_price_label(mode),
                AttributePatch::new().text(format_price(accessory_price(&accessories, mode))),
            );
        }

        for kind in AccessoryKind::ALL {
            let stepper_disabled = is_disabled(state, Control::AccessoryStep(kind));
            frame.set(
                ids::k4_count(kind),
                AttributePatch::new().text(state.ui.accessory_counts.get(kind).to_string()),
            );
            for step in ["add", "subtract"] {
                frame.set(ids::k4_stepper(kind, step), AttributePatch::new().disabled(stepper_disabled));
            }
        }

        frame.set(
            ids::K4_GRAND_TOTAL,
            AttributePatch::new().text(format_price(accessories.total())),
        );
        frame
    }
}

// =============================================================================
// K5
// =============================================================================

pub struct K5TabComponent;

impl RenderComponent for K5TabComponent {
    fn name(&self) -> &'static str {
        "k5-tab"
    }

    fn render(&self, state: &AppState) -> RenderFrame {
        let mut frame = RenderFrame::new();
        let scratch = &state.ui.scratch;

        frame.set(ids::BTN_K5_DUAL, control_patch(state, Control::DualButton));
        frame.set(ids::BTN_K5_CHAIN, control_patch(state, Control::ChainButton));

        let chain_target = state.ui.modes.compound.dual_chain == Some(DualChainMode::Chain)
            && scratch.target_cell.is_some();
        frame.set(
            ids::DUAL_CHAIN_INPUT,
            AttributePatch::new()
                .disabled(!chain_target)
                .text(scratch.dual_chain_input.clone()),
        );

        let summary = state.quote.summary();
        let accessories = accessories(state);
        for mode in DriveAccessoryMode::ALL {
            frame.set(
                ids::k5_summary_label(mode),
                AttributePatch::new().text(format_price(accessory_price(&accessories, mode))),
            );
        }
        frame.set(
            ids::K5_ACCESSORIES_TOTAL,
            AttributePatch::new().text(format_price(accessories.total())),
        );
        frame.set(
            ids::K5_SUMMARY_TOTAL,
            AttributePatch::new().text(format_price(
                summary.and_then(|s| s.total_cents).map(Money::from_cents),
            )),
        );
        frame
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shade_core::{CellRef, ItemField, ProductSummary, DEFAULT_PRODUCT_KEY};

    fn state() -> AppState {
        AppState::initial(DEFAULT_PRODUCT_KEY)
    }

    #[test]
    fn test_k1_input_follows_mode() {
        let mut state = state();
        let frame = K1TabComponent.render(&state);
        assert_eq!(frame.get(ids::LOCATION_INPUT).unwrap().disabled, Some(true));

        state.ui.modes.active_edit_mode = Some(ExclusiveMode::LocationInput);
        state.ui.scratch.location_input = "Bed".to_string();
        let frame = K1TabComponent.render(&state);
        let input = frame.get(ids::LOCATION_INPUT).unwrap();
        assert_eq!(input.disabled, Some(false));
        assert_eq!(input.text.as_deref(), Some("Bed"));
        assert_eq!(
            frame.get(ids::BTN_FOCUS_LOCATION).unwrap().classes.get("active"),
            Some(&true)
        );
    }

    #[test]
    fn test_k2_focus_mode_locks_siblings() {
        let mut state = state();
        state.ui.modes.active_edit_mode = Some(ExclusiveMode::FocusColor);
        state.ui.scratch.focus_column = Some(BatchField::Color);
        let frame = K2TabComponent.render(&state);

        let color = frame.get(ids::BTN_FOCUS_COLOR).unwrap();
        assert_eq!(color.classes.get("active"), Some(&true));
        assert_eq!(color.disabled, Some(false));
        assert_eq!(frame.get(ids::BTN_FOCUS_FABRIC).unwrap().classes.get("active"), Some(&false));
        for id in [ids::BTN_LIGHT_FILTER, ids::BTN_LF_DEL, ids::BTN_K2_SSET] {
            assert_eq!(frame.get(id).unwrap().disabled, Some(true), "{}", id);
        }
        assert_eq!(frame.get(ids::BATCH_INPUT).unwrap().disabled, Some(false));
    }

    #[test]
    fn test_k2_lf_delete_disabled_without_lf_rows() {
        let frame = K2TabComponent.render(&state());
        assert_eq!(frame.get(ids::BTN_LF_DEL).unwrap().disabled, Some(true));
        assert_eq!(frame.get(ids::BTN_LIGHT_FILTER).unwrap().disabled, Some(false));
    }

    #[test]
    fn test_k2_confirm_needs_selection() {
        let mut state = state();
        state.ui.modes.active_edit_mode = Some(ExclusiveMode::SSetSelect);
        let frame = K2TabComponent.render(&state);
        assert_eq!(frame.get(ids::BTN_SSET_CONFIRM).unwrap().disabled, Some(true));

        state.ui.scratch.selected_rows.insert(0);
        let frame = K2TabComponent.render(&state);
        assert_eq!(frame.get(ids::BTN_SSET_CONFIRM).unwrap().disabled, Some(false));
        assert_eq!(frame.get(ids::BTN_LF_CONFIRM).unwrap().disabled, Some(true));
    }

    #[test]
    fn test_k4_prices_and_steppers() {
        let mut state = state();
        state.ui.modes.compound.drive_accessory = Some(DriveAccessoryMode::Remote);
        state.ui.accessory_counts.set(AccessoryKind::Remote, 2);
        let mut summary = ProductSummary::default();
        summary.accessories.remote_cents = Some(14_000);
        summary.accessories.winder_cents = Some(3_000);
        state.quote.set_summary(summary).unwrap();

        let frame = K4TabComponent.render(&state);
        assert_eq!(frame.get("k4-remote-price").unwrap().text.as_deref(), Some("$140"));
        assert_eq!(frame.get("k4-motor-price").unwrap().text.as_deref(), Some(""));
        assert_eq!(frame.get("k4-remote-count").unwrap().text.as_deref(), Some("2"));
        assert_eq!(frame.get(ids::K4_GRAND_TOTAL).unwrap().text.as_deref(), Some("$170"));
        assert_eq!(frame.get("btn-k4-remote-add").unwrap().disabled, Some(false));
        assert_eq!(frame.get("btn-k4-cord-add").unwrap().disabled, Some(true));
        assert_eq!(frame.get("btn-k4-winder").unwrap().disabled, Some(true));
        assert_eq!(frame.get("btn-k4-remote").unwrap().classes.get("active"), Some(&true));
    }

    #[test]
    fn test_k5_chain_input_needs_target() {
        let mut state = state();
        state.ui.modes.compound.dual_chain = Some(DualChainMode::Chain);
        let frame = K5TabComponent.render(&state);
        assert_eq!(frame.get(ids::DUAL_CHAIN_INPUT).unwrap().disabled, Some(true));
        assert_eq!(frame.get(ids::BTN_K5_DUAL).unwrap().disabled, Some(true));

        state.ui.scratch.target_cell = Some(CellRef::new(0, ItemField::Chain));
        let frame = K5TabComponent.render(&state);
        assert_eq!(frame.get(ids::DUAL_CHAIN_INPUT).unwrap().disabled, Some(false));
    }

    #[test]
    fn test_k5_summary_labels() {
        let mut state = state();
        let frame = K5TabComponent.render(&state);
        assert_eq!(frame.get(ids::K5_SUMMARY_TOTAL).unwrap().text.as_deref(), Some(""));

        let mut summary = ProductSummary::default();
        summary.total_cents = Some(125_050);
        summary.accessories.motor_cents = Some(25_000);
        state.quote.set_summary(summary).unwrap();

        let frame = K5TabComponent.render(&state);
        assert_eq!(frame.get(ids::K5_SUMMARY_TOTAL).unwrap().text.as_deref(), Some("$1251"));
        assert_eq!(frame.get("k5-summary-motor").unwrap().text.as_deref(), Some("$250"));
        assert_eq!(frame.get(ids::K5_ACCESSORIES_TOTAL).unwrap().text.as_deref(), Some("$250"));
    }
}
