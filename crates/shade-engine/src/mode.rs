//! # Edit-Mode Controller
//!
//! Turns mode requests into transitions of the two-tier mode model and
//! routes table clicks to whatever the active mode does with them.
//!
//! ## Exclusive Transitions
//! ```text
//!                 request(M), M != current
//!   ┌──────┐   ─────────────────────────────►   ┌───────┐
//!   │ None │                                    │   M   │
//!   └──────┘   ◄─────────────────────────────   └───────┘
//!                 request(M), M == current
//!
//!   From M, request(N) moves straight to N: last request wins. The render
//!   layer disables N's button while M is active, so this only happens when
//!   events are published directly.
//! ```
//!
//! ## Table Click Routing
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────────┐
//! │ Active mode                  │ Click on (row, column)                   │
//! ├──────────────────────────────┼──────────────────────────────────────────┤
//! │ LocationInput                │ target = (row, location)                 │
//! │ FocusColor, OptionsEdit      │ target = (row, column)                   │
//! │ LightFilterSelect, SSetSelect│ toggle row in selection                  │
//! │ LightFilterDelete            │ remove row's light filter                │
//! │ none, dual_chain = Dual      │ flip the row's dual flag                 │
//! │ none, dual_chain = Chain     │ target = (row, chain)                    │
//! │ none, drive = Winder/Motor   │ flip the row's drive option              │
//! │ otherwise                    │ ignored                                  │
//! └──────────────────────────────┴──────────────────────────────────────────┘
//! ```

use std::rc::Rc;

use shade_core::{BatchField, CellRef, DriveAccessoryMode, DualChainMode, ExclusiveMode, ItemField};
use tracing::debug;

use crate::bus::{EventBus, SubscriptionId};
use crate::error::EngineResult;
use crate::events::{Event, Topic};
use crate::store::StateStore;
use crate::workflow::absorb;

/// State machine over the exclusive and compound mode slots.
pub struct EditModeController {
    store: Rc<StateStore>,
}

impl EditModeController {
    pub fn new(store: Rc<StateStore>) -> Self {
        EditModeController { store }
    }

    /// Subscribes the controller to every topic it reacts to.
    pub fn attach(self: &Rc<Self>, bus: &EventBus) -> Vec<SubscriptionId> {
        const TOPICS: [Topic; 11] = [
            Topic::LocationModeRequested,
            Topic::FocusModeRequested,
            Topic::LightFilterModeRequested,
            Topic::LightFilterDeleteModeRequested,
            Topic::SSetModeRequested,
            Topic::OptionsModeRequested,
            Topic::DualChainModeRequested,
            Topic::DriveAccessoryModeRequested,
            Topic::TableCellClicked,
            Topic::LightFilterCommitted,
            Topic::SSetCommitted,
        ];

        TOPICS
            .into_iter()
            .map(|topic| {
                let controller = Rc::clone(self);
                bus.subscribe(topic, move |event| controller.handle(event))
            })
            .collect()
    }

    /// Handles one event. Rejected mutations are absorbed; anything else
    /// (such as a failing render) propagates.
    pub fn handle(&self, event: &Event) -> EngineResult<()> {
        let result = match event {
            Event::LocationModeRequested => self.request(ExclusiveMode::LocationInput),
            Event::FocusModeRequested { column } => self.request_focus(*column),
            Event::LightFilterModeRequested => self.request(ExclusiveMode::LightFilterSelect),
            Event::LightFilterDeleteModeRequested => self.request(ExclusiveMode::LightFilterDelete),
            Event::SSetModeRequested => self.request(ExclusiveMode::SSetSelect),
            Event::OptionsModeRequested => self.request(ExclusiveMode::OptionsEdit),
            Event::DualChainModeRequested { mode } => self.request_dual_chain(*mode),
            Event::DriveAccessoryModeRequested { mode } => self.request_drive_accessory(*mode),
            Event::TableCellClicked { row, column } => self.route_table_click(*row, *column),
            Event::LightFilterCommitted { fabric, color } => self.store.apply_light_filter(fabric, color),
            Event::SSetCommitted { fabric_type } => self.store.apply_fabric_type(fabric_type),
            _ => Ok(()),
        };
        absorb(event.topic(), result)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Toggles an exclusive mode.
    pub fn request(&self, mode: ExclusiveMode) -> EngineResult<()> {
        let next = self.store.with_state(|s| s.ui.modes.toggled(mode));
        debug!(%mode, ?next, "Exclusive mode requested");
        self.store.set_edit_mode(next)
    }

    /// Toggles the fabric/color focus mode for a batch column. A request
    /// from the other column while focusing moves the focus there.
    pub fn request_focus(&self, column: BatchField) -> EngineResult<()> {
        let next = self.store.with_state(|s| {
            let focusing = s.ui.modes.is_active(ExclusiveMode::FocusColor);
            if focusing && s.ui.scratch.focus_column == Some(column) {
                None
            } else {
                Some(column)
            }
        });
        debug!(?column, ?next, "Focus mode requested");
        self.store.set_focus_mode(next)
    }

    pub fn request_dual_chain(&self, mode: DualChainMode) -> EngineResult<()> {
        let next = self.store.with_state(|s| s.ui.modes.toggled_dual_chain(mode));
        debug!(?mode, ?next, "Dual/chain mode requested");
        self.store.set_dual_chain_mode(next)
    }

    pub fn request_drive_accessory(&self, mode: DriveAccessoryMode) -> EngineResult<()> {
        let next = self.store.with_state(|s| s.ui.modes.toggled_drive_accessory(mode));
        debug!(?mode, ?next, "Drive/accessory mode requested");
        self.store.set_drive_accessory_mode(next)
    }

    // =========================================================================
    // Table Clicks
    // =========================================================================

    fn route_table_click(&self, row: usize, column: ItemField) -> EngineResult<()> {
        let state = self.store.snapshot();
        let modes = state.ui.modes;

        if let Some(mode) = modes.active_edit_mode {
            return match mode {
                ExclusiveMode::LocationInput => self
                    .store
                    .set_target_cell(Some(CellRef::new(row, ItemField::Location))),
                ExclusiveMode::FocusColor | ExclusiveMode::OptionsEdit => {
                    self.store.set_target_cell(Some(CellRef::new(row, column)))
                }
                ExclusiveMode::LightFilterSelect | ExclusiveMode::SSetSelect => {
                    self.store.toggle_selected_row(row)
                }
                ExclusiveMode::LightFilterDelete => {
                    if state.quote.ui_metadata.lf_modified_rows.contains(&row) {
                        self.store.remove_light_filter(row)
                    } else {
                        debug!(row, "Row has no light filter; click ignored");
                        Ok(())
                    }
                }
            };
        }

        match (modes.compound.dual_chain, modes.compound.drive_accessory) {
            (Some(DualChainMode::Dual), _) => {
                let flagged = state.quote.items().get(row).is_some_and(|i| i.dual.is_some());
                let value = if flagged { "" } else { "D" };
                self.store.update_item_field(row, ItemField::Dual, value)
            }
            (Some(DualChainMode::Chain), _) => self
                .store
                .set_target_cell(Some(CellRef::new(row, ItemField::Chain))),
            (None, Some(DriveAccessoryMode::Winder | DriveAccessoryMode::Motor)) => {
                self.store.toggle_drive_option(row)
            }
            _ => {
                debug!(row, %column, "No mode consumes table clicks");
                Ok(())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
