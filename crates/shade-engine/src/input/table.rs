//! Quote table cells and row buttons.

use shade_core::ItemField;

use super::{HandlerOutcome, InputHandler, Interaction, InteractionKind};
use crate::events::Event;
use crate::ids;

pub struct TableInputHandler;

impl InputHandler for TableInputHandler {
    fn name(&self) -> &'static str {
        "quote-table"
    }

    fn translate(&self, interaction: &Interaction) -> HandlerOutcome {
        let row = interaction.data_parsed::<usize>("row");
        let column = interaction.data_parsed::<ItemField>("column");

        let event = match (interaction.target.as_str(), interaction.kind) {
            (ids::QUOTE_TABLE, InteractionKind::Click) => {
                row.zip(column).map(|(row, column)| Event::TableCellClicked { row, column })
            }
            (ids::QUOTE_TABLE_INPUT, InteractionKind::KeyEnter | InteractionKind::Blur) => {
                row.zip(column).map(|(row, column)| Event::CellValueCommitted {
                    row,
                    column,
                    value: interaction.value.clone(),
                })
            }
            (ids::BTN_INSERT_ROW, InteractionKind::Click) => {
                interaction.data_parsed::<usize>("at").map(|at| Event::RowInserted { at })
            }
            (ids::BTN_DELETE_ROW, InteractionKind::Click) => row.map(|row| Event::RowDeleted { row }),
            (ids::QUOTE_TABLE | ids::QUOTE_TABLE_INPUT | ids::BTN_INSERT_ROW | ids::BTN_DELETE_ROW, _) => {
                return HandlerOutcome::Absorbed("unsupported interaction kind");
            }
            _ => return HandlerOutcome::NotMine,
        };
        HandlerOutcome::from_option(interaction, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_click() {
        let click = Interaction::click(ids::QUOTE_TABLE)
            .with_data("row", "2")
            .with_data("column", "color");
        assert_eq!(
            TableInputHandler.translate(&click),
            HandlerOutcome::Publish(Event::TableCellClicked {
                row: 2,
                column: ItemField::Color
            })
        );
    }

    #[test]
    fn test_malformed_row_is_absorbed() {
        let click = Interaction::click(ids::QUOTE_TABLE)
            .with_data("row", "two")
            .with_data("column", "color");
        assert!(matches!(
            TableInputHandler.translate(&click),
            HandlerOutcome::Absorbed(_)
        ));
    }

    #[test]
    fn test_cell_commit_on_blur() {
        let blur = Interaction::blur(ids::QUOTE_TABLE_INPUT, "1800")
            .with_data("row", "0")
            .with_data("column", "height");
        assert_eq!(
            TableInputHandler.translate(&blur),
            HandlerOutcome::Publish(Event::CellValueCommitted {
                row: 0,
                column: ItemField::Height,
                value: "1800".to_string()
            })
        );
    }

    #[test]
    fn test_row_buttons() {
        let insert = Interaction::click(ids::BTN_INSERT_ROW).with_data("at", "1");
        assert_eq!(
            TableInputHandler.translate(&insert),
            HandlerOutcome::Publish(Event::RowInserted { at: 1 })
        );
        let delete = Interaction::click(ids::BTN_DELETE_ROW).with_data("row", "0");
        assert_eq!(
            TableInputHandler.translate(&delete),
            HandlerOutcome::Publish(Event::RowDeleted { row: 0 })
        );
    }
}
