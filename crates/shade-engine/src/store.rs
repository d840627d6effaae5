//! # State Store
//!
//! The single owner and writer of [`AppState`].
//!
//! ## Mutation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.apply_light_filter("Sheer", "White")                             │
//! │    │                                                                    │
//! │    ├─► clone current snapshot ──► run the edit on the clone             │
//! │    │                                   │                                │
//! │    │                        Err ◄──────┤  (validation / range)          │
//! │    │                        warn!, return, state untouched              │
//! │    │                                   ▼                                │
//! │    ├─► check_invariants(clone) ── Err ─► same as above                  │
//! │    │                                   ▼                                │
//! │    ├─► clone == current? ── yes ─► return Ok, publish nothing           │
//! │    │                                   ▼                                │
//! │    └─► commit Rc::new(clone) ──► publish StateChanged { region }        │
//! │                                        │                                │
//! │                     subscriber Err ◄───┘  never reported as Rejected    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers hold `Rc<AppState>` snapshots; a commit swaps the pointer, so a
//! snapshot taken before a mutation is never observed half-written.

use std::cell::RefCell;
use std::rc::Rc;

use shade_core::validation::{self, EditLimits};
use shade_core::{
    AccessoryKind, AppState, BatchField, CellRef, CoreError, CoreResult, DriveAccessoryMode,
    DualChainMode, ExclusiveMode, ItemField, ProductSummary, QuoteData, TabId, ViewId,
};
use tracing::{debug, warn};

use crate::bus::EventBus;
use crate::error::{EngineError, EngineResult};
use crate::events::{Event, StateRegion, Topic};

/// Owns the application state and announces every committed change.
pub struct StateStore {
    state: RefCell<Rc<AppState>>,
    template: AppState,
    limits: EditLimits,
    bus: Rc<EventBus>,
}

impl StateStore {
    /// Creates the store from an initial-state template.
    ///
    /// The template must satisfy every invariant; it is also what
    /// [`StateStore::reset`] restores.
    pub fn new(template: AppState, limits: EditLimits, bus: Rc<EventBus>) -> CoreResult<Self> {
        template.check_invariants()?;
        Ok(StateStore {
            state: RefCell::new(Rc::new(template.clone())),
            template,
            limits,
            bus,
        })
    }

    /// Read-only snapshot of the current state.
    pub fn snapshot(&self) -> Rc<AppState> {
        Rc::clone(&self.state.borrow())
    }

    /// Runs a read against the current state.
    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.snapshot())
    }

    pub fn limits(&self) -> &EditLimits {
        &self.limits
    }

    fn mutate<F>(&self, name: &'static str, region: StateRegion, edit: F) -> EngineResult<()>
    where
        F: FnOnce(&mut AppState) -> CoreResult<()>,
    {
        let current = self.snapshot();
        let mut next = AppState::clone(&current);

        if let Err(e) = edit(&mut next).and_then(|_| next.check_invariants()) {
            warn!(mutation = name, error = %e, "Rejected state mutation");
            return Err(EngineError::Rejected {
                mutation: name,
                source: e,
            });
        }

        if next == *current {
            debug!(mutation = name, "State unchanged");
            return Ok(());
        }

        *self.state.borrow_mut() = Rc::new(next);
        debug!(mutation = name, ?region, "State committed");
        self.bus
            .publish(&Event::StateChanged { region })
            .map_err(|e| e.after_commit(Topic::StateChanged))
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Shows a tab. Scratch values are dropped unless an exclusive mode is
    /// still collecting them.
    pub fn set_active_tab(&self, tab: TabId) -> EngineResult<()> {
        self.mutate("set_active_tab", StateRegion::Ui, |s| {
            s.ui.active_tab = tab;
            if !s.ui.modes.any_exclusive_active() {
                s.ui.scratch.clear();
            }
            Ok(())
        })
    }

    pub fn set_current_view(&self, view: ViewId) -> EngineResult<()> {
        self.mutate("set_current_view", StateRegion::Ui, |s| {
            s.ui.current_view = view;
            Ok(())
        })
    }

    // =========================================================================
    // Modes
    // =========================================================================

    /// Sets the exclusive slot. Any change of mode clears the scratch.
    pub fn set_edit_mode(&self, mode: Option<ExclusiveMode>) -> EngineResult<()> {
        self.mutate("set_edit_mode", StateRegion::Ui, |s| {
            switch_exclusive(s, mode);
            Ok(())
        })
    }

    /// Enters the fabric/color focus mode on a batch column, or leaves it
    /// with `None`.
    pub fn set_focus_mode(&self, column: Option<BatchField>) -> EngineResult<()> {
        self.mutate("set_focus_mode", StateRegion::Ui, |s| {
            switch_exclusive(s, column.map(|_| ExclusiveMode::FocusColor));
            s.ui.scratch.focus_column = column;
            Ok(())
        })
    }

    pub fn set_dual_chain_mode(&self, mode: Option<DualChainMode>) -> EngineResult<()> {
        self.mutate("set_dual_chain_mode", StateRegion::Ui, |s| {
            if s.ui.modes.compound.dual_chain != mode {
                s.ui.scratch.target_cell = None;
                s.ui.scratch.dual_chain_input.clear();
            }
            s.ui.modes.compound.dual_chain = mode;
            Ok(())
        })
    }

    pub fn set_drive_accessory_mode(&self, mode: Option<DriveAccessoryMode>) -> EngineResult<()> {
        self.mutate("set_drive_accessory_mode", StateRegion::Ui, |s| {
            s.ui.modes.compound.drive_accessory = mode;
            Ok(())
        })
    }

    // =========================================================================
    // Scratch
    // =========================================================================

    pub fn set_location_input(&self, value: &str) -> EngineResult<()> {
        let max = self.limits.max_location_len;
        self.mutate("set_location_input", StateRegion::Ui, |s| {
            if value.chars().count() > max {
                return Err(shade_core::ValidationError::TooLong {
                    field: "location".to_string(),
                    max,
                }
                .into());
            }
            s.ui.scratch.location_input = value.to_string();
            Ok(())
        })
    }

    /// Writes a location into the target row and moves the target down one
    /// row. Past the last row the location mode ends.
    pub fn commit_location_input(&self, value: &str) -> EngineResult<()> {
        let limits = self.limits;
        self.mutate("commit_location_input", StateRegion::All, |s| {
            require_mode(s, ExclusiveMode::LocationInput)?;
            let cell = s.ui.scratch.target_cell.ok_or(CoreError::NoTargetCell)?;
            s.quote.update_item_field(cell.row, ItemField::Location, value, &limits)?;

            let next_row = cell.row + 1;
            s.ui.scratch.location_input.clear();
            if next_row < s.quote.items().len() {
                s.ui.scratch.target_cell = Some(CellRef::new(next_row, ItemField::Location));
            } else {
                switch_exclusive(s, None);
            }
            Ok(())
        })
    }

    pub fn set_target_cell(&self, cell: Option<CellRef>) -> EngineResult<()> {
        self.mutate("set_target_cell", StateRegion::Ui, |s| {
            s.ui.scratch.target_cell = cell;
            Ok(())
        })
    }

    pub fn toggle_selected_row(&self, row: usize) -> EngineResult<()> {
        self.mutate("toggle_selected_row", StateRegion::Ui, |s| {
            let len = s.quote.items().len();
            if row >= len {
                return Err(CoreError::RowOutOfRange { row, len });
            }
            let rows = &mut s.ui.scratch.selected_rows;
            if !rows.remove(&row) {
                rows.insert(row);
            }
            Ok(())
        })
    }

    pub fn set_dual_chain_input(&self, value: &str) -> EngineResult<()> {
        self.mutate("set_dual_chain_input", StateRegion::Ui, |s| {
            s.ui.scratch.dual_chain_input = value.to_string();
            Ok(())
        })
    }

    // =========================================================================
    // Quote Edits
    // =========================================================================

    pub fn update_item_field(&self, row: usize, field: ItemField, value: &str) -> EngineResult<()> {
        let limits = self.limits;
        self.mutate("update_item_field", StateRegion::Quote, |s| {
            s.quote.update_item_field(row, field, value, &limits)
        })
    }

    pub fn apply_batch_input(&self, fabric_type: &str, field: BatchField, value: &str) -> EngineResult<()> {
        self.mutate("apply_batch_input", StateRegion::Quote, |s| {
            let written = s.quote.apply_batch(fabric_type, field, value)?;
            debug!(fabric_type, %written, "Batch input applied");
            Ok(())
        })
    }

    /// Applies a light filter to the selected rows and leaves the selection
    /// mode.
    pub fn apply_light_filter(&self, fabric: &str, color: &str) -> EngineResult<()> {
        self.mutate("apply_light_filter", StateRegion::All, |s| {
            require_mode(s, ExclusiveMode::LightFilterSelect)?;
            let rows = s.ui.scratch.selected_rows.clone();
            s.quote.apply_light_filter(&rows, fabric, color)?;
            switch_exclusive(s, None);
            Ok(())
        })
    }

    /// Removes one row's light filter. Removing the last one also leaves
    /// the delete mode.
    pub fn remove_light_filter(&self, row: usize) -> EngineResult<()> {
        self.mutate("remove_light_filter", StateRegion::All, |s| {
            s.quote.remove_light_filter(row)?;
            let mode_active = s.ui.modes.is_active(ExclusiveMode::LightFilterDelete);
            if mode_active && !s.quote.ui_metadata.has_lf_modified() {
                switch_exclusive(s, None);
            }
            Ok(())
        })
    }

    /// Sets the fabric type of the selected rows and leaves the SSet mode.
    pub fn apply_fabric_type(&self, fabric_type: &str) -> EngineResult<()> {
        self.mutate("apply_fabric_type", StateRegion::All, |s| {
            require_mode(s, ExclusiveMode::SSetSelect)?;
            let rows = s.ui.scratch.selected_rows.clone();
            s.quote.apply_fabric_type(&rows, fabric_type)?;
            switch_exclusive(s, None);
            Ok(())
        })
    }

    pub fn insert_row(&self, at: usize) -> EngineResult<()> {
        self.mutate("insert_row", StateRegion::All, |s| s.insert_row(at))
    }

    pub fn delete_row(&self, row: usize) -> EngineResult<()> {
        self.mutate("delete_row", StateRegion::All, |s| s.delete_row(row))
    }

    // =========================================================================
    // K4 / K5
    // =========================================================================

    pub fn set_accessory_count(&self, kind: AccessoryKind, count: u32) -> EngineResult<()> {
        let max = self.limits.max_accessory_count;
        self.mutate("set_accessory_count", StateRegion::Ui, |s| {
            let count = validation::validate_accessory_count(count, max)?;
            s.ui.accessory_counts.set(kind, count);
            Ok(())
        })
    }

    /// Flips the winder/motor option of a row under the active drive mode.
    pub fn toggle_drive_option(&self, row: usize) -> EngineResult<()> {
        self.mutate("toggle_drive_option", StateRegion::Quote, |s| {
            let mode = s
                .ui
                .modes
                .compound
                .drive_accessory
                .ok_or_else(|| CoreError::ModeNotActive("drive accessory".to_string()))?;
            s.quote.toggle_drive_option(row, mode)
        })
    }

    /// Writes the typed dual/chain value into the target cell and clears
    /// the input.
    pub fn apply_dual_chain_value(&self, value: &str) -> EngineResult<()> {
        let limits = self.limits;
        self.mutate("apply_dual_chain_value", StateRegion::All, |s| {
            let mode = s
                .ui
                .modes
                .compound
                .dual_chain
                .ok_or_else(|| CoreError::ModeNotActive("dual/chain".to_string()))?;
            let cell = s.ui.scratch.target_cell.ok_or(CoreError::NoTargetCell)?;
            s.quote.apply_dual_chain(cell.row, mode, value, &limits)?;
            s.ui.scratch.target_cell = None;
            s.ui.scratch.dual_chain_input.clear();
            Ok(())
        })
    }

    // =========================================================================
    // Pricing and Lifecycle
    // =========================================================================

    /// Stores a summary and line prices computed by the pricing provider.
    pub fn apply_summary(&self, summary: ProductSummary, line_prices: &[Option<i64>]) -> EngineResult<()> {
        self.mutate("apply_summary", StateRegion::Quote, |s| {
            s.quote.set_line_prices(line_prices)?;
            s.quote.set_summary(summary)
        })
    }

    /// Replaces the quote with externally supplied data, keeping UI state
    /// but dropping every mode in progress along with its scratch.
    pub fn load_quote(&self, quote: QuoteData) -> EngineResult<()> {
        self.mutate("load_quote", StateRegion::All, |s| {
            s.quote = quote;
            s.ui.modes.active_edit_mode = None;
            s.ui.modes.compound = Default::default();
            s.ui.scratch.clear();
            Ok(())
        })
    }

    /// Restores the template with a fresh quote identity ("new quote").
    pub fn reset(&self) -> EngineResult<()> {
        let template = self.template.clone();
        self.mutate("reset", StateRegion::All, |s| {
            *s = template;
            s.quote.renew_identity();
            Ok(())
        })
    }
}

fn switch_exclusive(state: &mut AppState, mode: Option<ExclusiveMode>) {
    if state.ui.modes.active_edit_mode != mode {
        state.ui.scratch.clear();
    }
    state.ui.modes.active_edit_mode = mode;
}

fn require_mode(state: &AppState, mode: ExclusiveMode) -> CoreResult<()> {
    if state.ui.modes.is_active(mode) {
        Ok(())
    } else {
        Err(CoreError::ModeNotActive(mode.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
