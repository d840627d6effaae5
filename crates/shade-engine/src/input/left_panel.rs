//! Navigation toggle and tab buttons.

use shade_core::TabId;

use super::{HandlerOutcome, InputHandler, Interaction, InteractionKind};
use crate::events::Event;
use crate::ids;

pub struct LeftPanelInputHandler;

impl InputHandler for LeftPanelInputHandler {
    fn name(&self) -> &'static str {
        "left-panel"
    }

    fn translate(&self, interaction: &Interaction) -> HandlerOutcome {
        let target = interaction.target.as_str();

        let event = if target == ids::LEFT_PANEL_TOGGLE {
            Event::NavigationToggled
        } else if let Some(tab) = TabId::ALL.into_iter().find(|t| t.button_id() == target) {
            Event::TabSwitched { tab }
        } else {
            return HandlerOutcome::NotMine;
        };

        if interaction.kind != InteractionKind::Click {
            return HandlerOutcome::Absorbed("not a click");
        }
        HandlerOutcome::unless_disabled(interaction, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_click_publishes_tab_switch() {
        assert_eq!(
            LeftPanelInputHandler.translate(&Interaction::click("k4-tab")),
            HandlerOutcome::Publish(Event::TabSwitched { tab: TabId::K4 })
        );
    }

    #[test]
    fn test_disabled_tab_is_suppressed() {
        let click = Interaction::click("k2-tab").with_disabled(true);
        assert!(matches!(
            LeftPanelInputHandler.translate(&click),
            HandlerOutcome::Absorbed(_)
        ));
    }

    #[test]
    fn test_toggle_publishes_navigation() {
        assert_eq!(
            LeftPanelInputHandler.translate(&Interaction::click(ids::LEFT_PANEL_TOGGLE)),
            HandlerOutcome::Publish(Event::NavigationToggled)
        );
    }

    #[test]
    fn test_content_pane_is_not_a_tab() {
        assert_eq!(
            LeftPanelInputHandler.translate(&Interaction::click("k2-content")),
            HandlerOutcome::NotMine
        );
    }
}
