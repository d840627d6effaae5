//! Quote-level action buttons.

use super::{HandlerOutcome, InputHandler, Interaction, InteractionKind};
use crate::events::Event;
use crate::ids;

pub struct ActionsInputHandler;

impl InputHandler for ActionsInputHandler {
    fn name(&self) -> &'static str {
        "actions"
    }

    fn translate(&self, interaction: &Interaction) -> HandlerOutcome {
        let event = match interaction.target.as_str() {
            ids::BTN_CALCULATE => Event::CalculationRequested,
            ids::BTN_NEW_QUOTE => Event::NewQuoteRequested,
            _ => return HandlerOutcome::NotMine,
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
    fn test_action_buttons() {
        assert_eq!(
            ActionsInputHandler.translate(&Interaction::click(ids::BTN_NEW_QUOTE)),
            HandlerOutcome::Publish(Event::NewQuoteRequested)
        );
        assert_eq!(
            ActionsInputHandler.translate(&Interaction::click("k1-tab")),
            HandlerOutcome::NotMine
        );
    }
}
