//! Handlers for the five tab panes.

use shade_core::{AccessoryKind, BatchField, DriveAccessoryMode, DualChainMode};

use super::{HandlerOutcome, InputHandler, Interaction, InteractionKind};
use crate::events::{BatchCommit, Event};
use crate::ids;

fn click_only(interaction: &Interaction, event: Event) -> HandlerOutcome {
    if interaction.kind == InteractionKind::Click {
        HandlerOutcome::unless_disabled(interaction, event)
    } else {
        HandlerOutcome::Absorbed("not a click")
    }
}

// =============================================================================
// K1: Location
// =============================================================================

pub struct K1TabInputHandler;

impl InputHandler for K1TabInputHandler {
    fn name(&self) -> &'static str {
        "k1-tab"
    }

    fn translate(&self, interaction: &Interaction) -> HandlerOutcome {
        match interaction.target.as_str() {
            ids::BTN_FOCUS_LOCATION => click_only(interaction, Event::LocationModeRequested),
            ids::LOCATION_INPUT => {
                let value = interaction.value.clone();
                match interaction.kind {
                    InteractionKind::Input => {
                        HandlerOutcome::unless_disabled(interaction, Event::LocationInputChanged { value })
                    }
                    InteractionKind::KeyEnter => {
                        HandlerOutcome::unless_disabled(interaction, Event::LocationInputCommitted { value })
                    }
                    _ => HandlerOutcome::Absorbed("location input only commits on enter"),
                }
            }
            _ => HandlerOutcome::NotMine,
        }
    }
}

// =============================================================================
// K2: Fabric, light filter, SSet
// =============================================================================

pub struct K2TabInputHandler;

impl K2TabInputHandler {
    fn batch_commit(interaction: &Interaction) -> HandlerOutcome {
        let commit = (|| {
            Some(BatchCommit {
                fabric_type: interaction.data("type")?.to_string(),
                field: interaction.data_parsed::<BatchField>("field")?,
                value: interaction.value.clone(),
            })
        })();

        let event = match interaction.kind {
            InteractionKind::KeyEnter => commit.map(Event::BatchInputCommittedByEnter),
            InteractionKind::Blur => commit.map(Event::BatchInputCommittedByBlur),
            _ => return HandlerOutcome::Absorbed("batch cells commit on enter or blur"),
        };
        HandlerOutcome::from_option(interaction, event)
    }

    fn light_filter_commit(interaction: &Interaction) -> HandlerOutcome {
        let event = match (interaction.data("fabric"), interaction.data("color")) {
            (Some(fabric), Some(color)) => Some(Event::LightFilterCommitted {
                fabric: fabric.to_string(),
                color: color.to_string(),
            }),
            _ => None,
        };
        HandlerOutcome::from_option(interaction, event)
    }
}

impl InputHandler for K2TabInputHandler {
    fn name(&self) -> &'static str {
        "k2-tab"
    }

    fn translate(&self, interaction: &Interaction) -> HandlerOutcome {
        match interaction.target.as_str() {
            ids::BTN_FOCUS_FABRIC => click_only(
                interaction,
                Event::FocusModeRequested {
                    column: BatchField::Fabric,
                },
            ),
            ids::BTN_FOCUS_COLOR => click_only(
                interaction,
                Event::FocusModeRequested {
                    column: BatchField::Color,
                },
            ),
            ids::BTN_LIGHT_FILTER => click_only(interaction, Event::LightFilterModeRequested),
            ids::BTN_LF_DEL => click_only(interaction, Event::LightFilterDeleteModeRequested),
            ids::BTN_K2_SSET => click_only(interaction, Event::SSetModeRequested),
            ids::BATCH_INPUT => Self::batch_commit(interaction),
            ids::BTN_LF_CONFIRM if interaction.kind == InteractionKind::Click => {
                Self::light_filter_commit(interaction)
            }
            ids::BTN_SSET_CONFIRM if interaction.kind == InteractionKind::Click => {
                let fabric_type = interaction.data("type").unwrap_or(&interaction.value);
                HandlerOutcome::unless_disabled(
                    interaction,
                    Event::SSetCommitted {
                        fabric_type: fabric_type.to_string(),
                    },
                )
            }
            ids::BTN_LF_CONFIRM | ids::BTN_SSET_CONFIRM => HandlerOutcome::Absorbed("not a click"),
            _ => HandlerOutcome::NotMine,
        }
    }
}

// =============================================================================
// K3: Options
// =============================================================================

pub struct K3TabInputHandler;

impl InputHandler for K3TabInputHandler {
    fn name(&self) -> &'static str {
        "k3-tab"
    }

    fn translate(&self, interaction: &Interaction) -> HandlerOutcome {
        match interaction.target.as_str() {
            ids::BTN_K3_EDIT => click_only(interaction, Event::OptionsModeRequested),
            _ => HandlerOutcome::NotMine,
        }
    }
}

// =============================================================================
// K4: Drive and accessories
// =============================================================================

pub struct K4TabInputHandler;

impl InputHandler for K4TabInputHandler {
    fn name(&self) -> &'static str {
        "k4-tab"
    }

    fn translate(&self, interaction: &Interaction) -> HandlerOutcome {
        let target = interaction.target.as_str();

        if let Some(mode) = DriveAccessoryMode::ALL
            .into_iter()
            .find(|m| ids::k4_mode_button(*m) == target)
        {
            return click_only(interaction, Event::DriveAccessoryModeRequested { mode });
        }

        for kind in AccessoryKind::ALL {
            for (step, delta) in [("add", 1), ("subtract", -1)] {
                if ids::k4_stepper(kind, step) == target {
                    return click_only(interaction, Event::AccessoryCountChanged { kind, delta });
                }
            }
        }

        HandlerOutcome::NotMine
    }
}

// =============================================================================
// K5: Dual/chain
// =============================================================================

pub struct K5TabInputHandler;

impl InputHandler for K5TabInputHandler {
    fn name(&self) -> &'static str {
        "k5-tab"
    }

    fn translate(&self, interaction: &Interaction) -> HandlerOutcome {
        match interaction.target.as_str() {
            ids::BTN_K5_DUAL => click_only(
                interaction,
                Event::DualChainModeRequested {
                    mode: DualChainMode::Dual,
                },
            ),
            ids::BTN_K5_CHAIN => click_only(
                interaction,
                Event::DualChainModeRequested {
                    mode: DualChainMode::Chain,
                },
            ),
            ids::DUAL_CHAIN_INPUT => {
                let value = interaction.value.clone();
                match interaction.kind {
                    InteractionKind::Input => {
                        HandlerOutcome::unless_disabled(interaction, Event::DualChainInputChanged { value })
                    }
                    InteractionKind::KeyEnter => {
                        HandlerOutcome::unless_disabled(interaction, Event::DualChainValueCommitted { value })
                    }
                    _ => HandlerOutcome::Absorbed("dual/chain input only commits on enter"),
                }
            }
            _ => HandlerOutcome::NotMine,
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
    fn test_k1_location_input() {
        let typed = Interaction::input(ids::LOCATION_INPUT, "Bed");
        assert_eq!(
            K1TabInputHandler.translate(&typed),
            HandlerOutcome::Publish(Event::LocationInputChanged {
                value: "Bed".to_string()
            })
        );
        let committed = Interaction::enter(ids::LOCATION_INPUT, "Bed 1");
        assert_eq!(
            K1TabInputHandler.translate(&committed),
            HandlerOutcome::Publish(Event::LocationInputCommitted {
                value: "Bed 1".to_string()
            })
        );
    }

    #[test]
    fn test_k2_batch_enter_and_blur_map_to_distinct_topics() {
        let enter = Interaction::enter(ids::BATCH_INPUT, "Red")
            .with_data("type", "fabric")
            .with_data("field", "color");
        let blur = Interaction::blur(ids::BATCH_INPUT, "Linen")
            .with_data("type", "B2")
            .with_data("field", "fabric");

        assert_eq!(
            K2TabInputHandler.translate(&enter),
            HandlerOutcome::Publish(Event::BatchInputCommittedByEnter(BatchCommit {
                fabric_type: "fabric".to_string(),
                field: BatchField::Color,
                value: "Red".to_string(),
            }))
        );
        assert_eq!(
            K2TabInputHandler.translate(&blur),
            HandlerOutcome::Publish(Event::BatchInputCommittedByBlur(BatchCommit {
                fabric_type: "B2".to_string(),
                field: BatchField::Fabric,
                value: "Linen".to_string(),
            }))
        );
    }

    #[test]
    fn test_k2_batch_without_field_is_absorbed() {
        let enter = Interaction::enter(ids::BATCH_INPUT, "Red").with_data("type", "B1");
        assert!(matches!(
            K2TabInputHandler.translate(&enter),
            HandlerOutcome::Absorbed(_)
        ));
    }

    #[test]
    fn test_k2_mode_buttons() {
        assert_eq!(
            K2TabInputHandler.translate(&Interaction::click(ids::BTN_FOCUS_FABRIC)),
            HandlerOutcome::Publish(Event::FocusModeRequested {
                column: BatchField::Fabric
            })
        );
        let disabled = Interaction::click(ids::BTN_LF_DEL).with_disabled(true);
        assert!(matches!(
            K2TabInputHandler.translate(&disabled),
            HandlerOutcome::Absorbed(_)
        ));
    }

    #[test]
    fn test_k2_light_filter_confirm_needs_both_names() {
        let partial = Interaction::click(ids::BTN_LF_CONFIRM).with_data("fabric", "Sheer");
        assert!(matches!(
            K2TabInputHandler.translate(&partial),
            HandlerOutcome::Absorbed(_)
        ));
    }

    #[test]
    fn test_k4_steppers() {
        let add = Interaction::click(ids::k4_stepper(AccessoryKind::Charger, "add"));
        assert_eq!(
            K4TabInputHandler.translate(&add),
            HandlerOutcome::Publish(Event::AccessoryCountChanged {
                kind: AccessoryKind::Charger,
                delta: 1
            })
        );
        let mode = Interaction::click("btn-k4-winder");
        assert_eq!(
            K4TabInputHandler.translate(&mode),
            HandlerOutcome::Publish(Event::DriveAccessoryModeRequested {
                mode: DriveAccessoryMode::Winder
            })
        );
    }

    #[test]
    fn test_k5_buttons_and_input() {
        assert_eq!(
            K5TabInputHandler.translate(&Interaction::click(ids::BTN_K5_CHAIN)),
            HandlerOutcome::Publish(Event::DualChainModeRequested {
                mode: DualChainMode::Chain
            })
        );
        assert!(matches!(
            K5TabInputHandler.translate(&Interaction::blur(ids::DUAL_CHAIN_INPUT, "900")),
            HandlerOutcome::Absorbed(_)
        ));
    }
}
