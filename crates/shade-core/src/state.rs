//! # Application State
//!
//! The single state tree the store owns: quote data plus UI state.
//!
//! ```text
//! AppState
//! ├── quote: QuoteData   ─► persisted business data
//! └── ui:    UiState     ─► tab, view, modes, scratch, counters
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::quote::QuoteData;
use crate::types::TabId;
use crate::ui::UiState;

/// The full application state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub quote: QuoteData,
    pub ui: UiState,
}

impl AppState {
    /// Fresh state for a product: one empty row, tab K1, no modes.
    pub fn initial(product_key: &str) -> Self {
        AppState {
            quote: QuoteData::new(product_key),
            ui: UiState::with_tab(TabId::default()),
        }
    }

    /// Deletes a row and keeps the scratch row references aligned.
    pub fn delete_row(&mut self, row: usize) -> CoreResult<()> {
        self.quote.delete_row(row)?;

        let scratch = &mut self.ui.scratch;
        scratch.selected_rows = scratch
            .selected_rows
            .iter()
            .filter(|&&r| r != row)
            .map(|&r| if r > row { r - 1 } else { r })
            .collect();
        scratch.target_cell = match scratch.target_cell {
            Some(cell) if cell.row == row => None,
            Some(mut cell) if cell.row > row => {
                cell.row -= 1;
                Some(cell)
            }
            other => other,
        };
        Ok(())
    }

    /// Inserts an empty row and keeps the scratch row references aligned.
    pub fn insert_row(&mut self, at: usize) -> CoreResult<()> {
        self.quote.insert_row(at)?;

        let scratch = &mut self.ui.scratch;
        scratch.selected_rows = scratch
            .selected_rows
            .iter()
            .map(|&r| if r >= at { r + 1 } else { r })
            .collect();
        if let Some(cell) = scratch.target_cell.as_mut() {
            if cell.row >= at {
                cell.row += 1;
            }
        }
        Ok(())
    }

    /// Checks every structural invariant of the tree.
    ///
    /// The store runs this on each candidate state before committing it.
    pub fn check_invariants(&self) -> CoreResult<()> {
        self.quote.check_invariants()?;

        let len = self.quote.items().len();
        if let Some(&row) = self.ui.scratch.selected_rows.iter().find(|&&r| r >= len) {
            return Err(CoreError::InvariantViolated(format!(
                "selected row {} is outside the table",
                row
            )));
        }
        if let Some(cell) = self.ui.scratch.target_cell {
            if cell.row >= len {
                return Err(CoreError::InvariantViolated(format!(
                    "target cell row {} is outside the table",
                    cell.row
                )));
            }
        }
        Ok(())
    }
}
