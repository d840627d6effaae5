//! Left panel: tab strip, tab panes, panel color and the view toggle.

use shade_core::enablement::{is_active, is_disabled, Control};
use shade_core::{AppState, TabId};

use super::{AttributePatch, RenderComponent, RenderFrame};
use crate::ids;

pub struct LeftPanelComponent;

impl RenderComponent for LeftPanelComponent {
    fn name(&self) -> &'static str {
        "left-panel"
    }

    fn render(&self, state: &AppState) -> RenderFrame {
        let mut frame = RenderFrame::new();
        let active_tab = state.ui.active_tab;

        frame.set(
            ids::LEFT_PANEL,
            AttributePatch::new().style("background-color", active_tab.background()),
        );

        for tab in TabId::ALL {
            let control = Control::TabButton(tab);
            frame.set(
                tab.button_id(),
                AttributePatch::new()
                    .active(is_active(state, control))
                    .disabled(is_disabled(state, control)),
            );
            frame.set(tab.content_id(), AttributePatch::new().active(tab == active_tab));
        }

        let locked = is_disabled(state, Control::NavigationToggle);
        frame.set(
            ids::LEFT_PANEL_TOGGLE,
            AttributePatch::new()
                .disabled(locked)
                .style("pointer-events", if locked { "none" } else { "auto" })
                .style("opacity", if locked { "0.5" } else { "1" }),
        );

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shade_core::{DriveAccessoryMode, ExclusiveMode, DEFAULT_PRODUCT_KEY};

    #[test]
    fn test_idle_panel() {
        let state = AppState::initial(DEFAULT_PRODUCT_KEY);
        let frame = LeftPanelComponent.render(&state);

        let k1 = frame.get("k1-tab").unwrap();
        assert_eq!(k1.classes.get("active"), Some(&true));
        assert_eq!(k1.disabled, Some(false));
        assert_eq!(frame.get("k2-tab").unwrap().disabled, Some(false));
        assert_eq!(frame.get("k1-content").unwrap().classes.get("active"), Some(&true));
        assert_eq!(frame.get("k3-content").unwrap().classes.get("active"), Some(&false));

        let toggle = frame.get(ids::LEFT_PANEL_TOGGLE).unwrap();
        assert_eq!(toggle.styles.get("opacity").map(String::as_str), Some("1"));
        assert_eq!(toggle.styles.get("pointer-events").map(String::as_str), Some("auto"));
    }

    #[test]
    fn test_mode_locks_other_tabs_and_toggle() {
        let mut state = AppState::initial(DEFAULT_PRODUCT_KEY);
        state.ui.active_tab = TabId::K2;
        state.ui.modes.active_edit_mode = Some(ExclusiveMode::FocusColor);
        let frame = LeftPanelComponent.render(&state);

        assert_eq!(frame.get("k2-tab").unwrap().disabled, Some(false));
        assert_eq!(frame.get("k1-tab").unwrap().disabled, Some(true));
        assert_eq!(
            frame.get(ids::LEFT_PANEL).unwrap().styles.get("background-color").map(String::as_str),
            Some("var(--k2-bg-color)")
        );
        let toggle = frame.get(ids::LEFT_PANEL_TOGGLE).unwrap();
        assert_eq!(toggle.disabled, Some(true));
        assert_eq!(toggle.styles.get("pointer-events").map(String::as_str), Some("none"));
        assert_eq!(toggle.styles.get("opacity").map(String::as_str), Some("0.5"));
    }

    #[test]
    fn test_compound_mode_also_locks_tabs() {
        let mut state = AppState::initial(DEFAULT_PRODUCT_KEY);
        state.ui.active_tab = TabId::K4;
        state.ui.modes.compound.drive_accessory = Some(DriveAccessoryMode::Winder);
        let frame = LeftPanelComponent.render(&state);

        assert_eq!(frame.get("k5-tab").unwrap().disabled, Some(true));
        assert_eq!(frame.get("k4-tab").unwrap().disabled, Some(false));
    }
}
