//! # Application Context
//!
//! The composition root. Builds every engine component once, in dependency
//! order, and hands out the few entry points a front end needs.
//!
//! ## Wiring Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. config.validate()                                                   │
//! │  2. EventBus                                                            │
//! │  3. StateStore(template, limits, bus)                                   │
//! │       └─ starting quote loaded before anyone subscribes                 │
//! │  4. EditModeController ─┐                                               │
//! │     WorkflowController ─┼─ attach(bus)                                  │
//! │     RenderHost ─────────┘                                               │
//! │  5. every topic must now have a subscriber, else Wiring error           │
//! │  6. InputRouter(bus)                                                    │
//! │  7. initial render                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use shade_core::{AppState, QuoteData};
use tracing::{debug, info};

use crate::bus::EventBus;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::events::{Event, Topic};
use crate::input::{InputRouter, Interaction};
use crate::mode::EditModeController;
use crate::pricing::PricingProvider;
use crate::render::{RenderAdapter, RenderHost};
use crate::store::StateStore;
use crate::workflow::WorkflowController;

/// Fully wired engine.
pub struct AppContext {
    config: EngineConfig,
    bus: Rc<EventBus>,
    store: Rc<StateStore>,
    renderer: Rc<RenderHost>,
    router: InputRouter,
}

impl AppContext {
    /// Builds and wires the engine, then renders the initial state.
    ///
    /// `starting` replaces the template's empty quote; it must satisfy every
    /// quote invariant. "New quote" still returns to the empty template.
    pub fn initialize(
        config: EngineConfig,
        starting: Option<QuoteData>,
        adapter: Rc<RefCell<dyn RenderAdapter>>,
        pricing: Box<dyn PricingProvider>,
    ) -> EngineResult<Self> {
        config.validate()?;

        let bus = Rc::new(EventBus::new());

        let mut template = AppState::initial(&config.quote.default_product);
        template.ui.active_tab = config.ui.initial_tab;
        let store = Rc::new(
            StateStore::new(template, config.limits.edit_limits(), Rc::clone(&bus))
                .map_err(|e| EngineError::InvalidConfig(format!("initial state: {}", e)))?,
        );

        if let Some(quote) = starting {
            debug!(quote_id = %quote.quote_id, rows = quote.items().len(), "Loading starting quote");
            store
                .load_quote(quote)
                .map_err(|e| EngineError::StartingData(e.to_string()))?;
        }

        let modes = Rc::new(EditModeController::new(Rc::clone(&store)));
        modes.attach(&bus);

        let workflow = Rc::new(WorkflowController::new(Rc::clone(&store), pricing));
        workflow.attach(&bus);

        let renderer = Rc::new(RenderHost::with_default_components(Rc::clone(&store), adapter));
        renderer.attach(&bus);

        if let Some(topic) = Topic::ALL.into_iter().find(|t| bus.subscriber_count(*t) == 0) {
            return Err(EngineError::Wiring(format!("no subscriber for {}", topic)));
        }

        let router = InputRouter::with_default_handlers(Rc::clone(&bus));
        renderer.render_all()?;

        let state = store.snapshot();
        info!(
            quote_id = %state.quote.quote_id,
            product = %state.quote.current_product,
            tab = %state.ui.active_tab,
            "Engine initialized"
        );

        Ok(AppContext {
            config,
            bus,
            store,
            renderer,
            router,
        })
    }

    /// Routes a raw interaction. Returns whether an event was published.
    pub fn dispatch(&self, interaction: &Interaction) -> EngineResult<bool> {
        self.router.route(interaction)
    }

    /// Publishes a domain event directly, bypassing the input handlers.
    pub fn publish(&self, event: &Event) -> EngineResult<()> {
        self.bus.publish(event)
    }

    pub fn snapshot(&self) -> Rc<AppState> {
        self.store.snapshot()
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    pub fn store(&self) -> &Rc<StateStore> {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Completed render passes, the initial one included.
    pub fn render_passes(&self) -> usize {
        self.renderer.pass_count()
    }
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids;
    use crate::pricing::PriceList;
    use crate::render::MemorySurface;
    use shade_core::{BatchField, DriveAccessoryMode, DualChainMode, ExclusiveMode, ItemField, TabId};
    use std::cell::Cell;

    struct Harness {
        ctx: AppContext,
        surface: Rc<RefCell<MemorySurface>>,
        changes: Rc<Cell<usize>>,
    }

    fn harness_with(starting: Option<QuoteData>) -> Harness {
        let config = EngineConfig::default();
        let surface = Rc::new(RefCell::new(MemorySurface::new()));
        let pricing = Box::new(PriceList::new(config.pricing.clone()));
        let ctx = AppContext::initialize(config, starting, surface.clone(), pricing).unwrap();

        let changes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&changes);
        ctx.bus().subscribe(Topic::StateChanged, move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });
        Harness { ctx, surface, changes }
    }

    fn harness() -> Harness {
        harness_with(None)
    }

    #[test]
    fn test_initial_render() {
        let h = harness();
        assert_eq!(h.ctx.render_passes(), 1);
        let surface = h.surface.borrow();
        assert!(surface.has_class("k1-tab", "active"));
        assert!(surface.has_class("k1-content", "active"));
        assert!(surface.is_disabled(ids::BTN_LF_DEL));
        assert!(!surface.is_disabled(ids::BTN_LIGHT_FILTER));
    }

    #[test]
    fn test_focus_request_scenario() {
        let h = harness();
        h.ctx.publish(&Event::TabSwitched { tab: TabId::K2 }).unwrap();
        h.changes.set(0);

        h.ctx
            .publish(&Event::FocusModeRequested {
                column: BatchField::Fabric,
            })
            .unwrap();

        assert_eq!(h.ctx.snapshot().ui.modes.active_edit_mode, Some(ExclusiveMode::FocusColor));
        assert_eq!(h.changes.get(), 1);
        let surface = h.surface.borrow();
        assert!(surface.has_class(ids::BTN_FOCUS_FABRIC, "active"));
        assert!(surface.is_disabled(ids::BTN_LIGHT_FILTER));
        assert!(surface.is_disabled(ids::BTN_K2_SSET));
    }

    #[test]
    fn test_lf_delete_stays_disabled_without_rows() {
        let h = harness();
        h.ctx.store().set_edit_mode(Some(ExclusiveMode::LightFilterDelete)).unwrap();

        assert!(h.surface.borrow().has_class(ids::BTN_LF_DEL, "active"));
        assert!(h.surface.borrow().is_disabled(ids::BTN_LF_DEL));
    }

    #[test]
    fn test_batch_enter_and_blur_stay_distinct() {
        let h = harness();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for topic in [Topic::BatchInputCommittedByEnter, Topic::BatchInputCommittedByBlur] {
            let seen = Rc::clone(&seen);
            h.ctx.bus().subscribe(topic, move |e| {
                seen.borrow_mut().push(e.clone());
                Ok(())
            });
        }

        let enter = Interaction::enter(ids::BATCH_INPUT, "Red")
            .with_data("type", "fabric")
            .with_data("field", "color");
        let blur = Interaction::blur(ids::BATCH_INPUT, "Linen")
            .with_data("type", "B1")
            .with_data("field", "fabric");
        assert!(h.ctx.dispatch(&enter).unwrap());
        assert!(h.ctx.dispatch(&blur).unwrap());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        match (&seen[0], &seen[1]) {
            (Event::BatchInputCommittedByEnter(a), Event::BatchInputCommittedByBlur(b)) => {
                assert_eq!((a.fabric_type.as_str(), a.value.as_str()), ("fabric", "Red"));
                assert_eq!(a.field, BatchField::Color);
                assert_eq!((b.fabric_type.as_str(), b.value.as_str()), ("B1", "Linen"));
                assert_eq!(b.field, BatchField::Fabric);
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn test_drive_mode_blocks_tab_switch() {
        let h = harness();
        h.ctx.dispatch(&Interaction::click("k4-tab")).unwrap();
        h.ctx.dispatch(&Interaction::click("btn-k4-winder")).unwrap();

        let state = h.ctx.snapshot();
        assert_eq!(state.ui.modes.active_edit_mode, None);
        assert_eq!(state.ui.modes.compound.drive_accessory, Some(DriveAccessoryMode::Winder));

        let disabled = h.surface.borrow().is_disabled("k1-tab");
        assert!(disabled);
        assert!(h.surface.borrow().is_disabled(ids::LEFT_PANEL_TOGGLE));

        // The front end reports the disabled flag; nothing is published.
        let click = Interaction::click("k1-tab").with_disabled(disabled);
        assert!(!h.ctx.dispatch(&click).unwrap());
        assert_eq!(h.ctx.snapshot().ui.active_tab, TabId::K4);
    }

    #[test]
    fn test_publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::new();
        bus.publish(&Event::CalculationRequested).unwrap();

        let h = harness();
        let before = h.ctx.snapshot();
        h.ctx.publish(&Event::StateChanged {
            region: crate::events::StateRegion::Ui,
        })
        .unwrap();
        assert_eq!(*h.ctx.snapshot(), *before);
    }

    #[test]
    fn test_repeated_render_leaves_surface_unchanged() {
        let h = harness();
        h.surface.borrow_mut().take_changes();

        h.ctx.renderer.render_all().unwrap();
        assert!(h.surface.borrow_mut().take_changes().is_empty());
    }

    #[test]
    fn test_new_quote_restores_template() {
        let h = harness();
        let first_id = h.ctx.snapshot().quote.quote_id.clone();
        h.ctx.dispatch(&Interaction::click("k3-tab")).unwrap();
        h.ctx.dispatch(&Interaction::click(ids::BTN_INSERT_ROW).with_data("at", "1")).unwrap();

        h.ctx.dispatch(&Interaction::click(ids::BTN_NEW_QUOTE)).unwrap();

        let state = h.ctx.snapshot();
        assert_eq!(state.ui.active_tab, TabId::K1);
        assert_eq!(state.quote.items().len(), 1);
        assert_ne!(state.quote.quote_id, first_id);
        assert!(h.surface.borrow().has_class("k1-tab", "active"));
    }

    #[test]
    fn test_calculation_updates_price_labels() {
        let h = harness();
        h.ctx.dispatch(&Interaction::click("k4-tab")).unwrap();
        h.ctx.dispatch(&Interaction::click("btn-k4-remote")).unwrap();
        h.ctx.dispatch(&Interaction::click("btn-k4-remote-add")).unwrap();
        h.ctx.dispatch(&Interaction::click(ids::BTN_CALCULATE)).unwrap();

        let state = h.ctx.snapshot();
        assert_eq!(state.ui.accessory_counts.remote, 1);
        let surface = h.surface.borrow();
        assert_eq!(surface.text("k4-remote-count"), Some("1"));
        assert_eq!(surface.text("k4-remote-price"), Some("$70"));
    }

    #[test]
    fn test_invalid_starting_quote_is_rejected() {
        let mut quote = QuoteData::new("rollerBlind");
        quote.ui_metadata.lf_modified_rows.insert(5);

        let surface = Rc::new(RefCell::new(MemorySurface::new()));
        let config = EngineConfig::default();
        let pricing = Box::new(PriceList::new(config.pricing.clone()));
        let result = AppContext::initialize(config, Some(quote), surface, pricing);
        assert!(matches!(result, Err(EngineError::StartingData(_))));
    }

    #[test]
    fn test_starting_quote_is_loaded() {
        let mut quote = QuoteData::new("rollerBlind");
        quote.insert_row(1).unwrap();
        let h = harness_with(Some(quote.clone()));

        assert_eq!(h.ctx.snapshot().quote.quote_id, quote.quote_id);
        assert_eq!(h.ctx.snapshot().quote.items().len(), 2);
    }

    #[test]
    fn test_focus_moves_between_batch_columns() {
        let h = harness();
        h.ctx.dispatch(&Interaction::click("k2-tab")).unwrap();
        h.ctx.dispatch(&Interaction::click(ids::BTN_FOCUS_FABRIC)).unwrap();
        assert!(!h.surface.borrow().is_disabled(ids::BTN_FOCUS_COLOR));

        h.ctx.dispatch(&Interaction::click(ids::BTN_FOCUS_COLOR)).unwrap();

        let state = h.ctx.snapshot();
        assert_eq!(state.ui.modes.active_edit_mode, Some(ExclusiveMode::FocusColor));
        assert_eq!(state.ui.scratch.focus_column, Some(BatchField::Color));
        let surface = h.surface.borrow();
        assert!(surface.has_class(ids::BTN_FOCUS_COLOR, "active"));
        assert!(!surface.has_class(ids::BTN_FOCUS_FABRIC, "active"));
    }

    #[test]
    fn test_mixed_event_sequences_keep_state_consistent() {
        const MODE_BUTTONS: [&str; 7] = [
            ids::BTN_FOCUS_LOCATION,
            ids::BTN_FOCUS_FABRIC,
            ids::BTN_FOCUS_COLOR,
            ids::BTN_LIGHT_FILTER,
            ids::BTN_LF_DEL,
            ids::BTN_K2_SSET,
            ids::BTN_K3_EDIT,
        ];
        let steps: Vec<Event> = vec![
            Event::RowInserted { at: 1 },
            Event::LightFilterModeRequested,
            Event::TableCellClicked { row: 1, column: ItemField::Fabric },
            Event::LightFilterCommitted {
                fabric: "Sheer".to_string(),
                color: "White".to_string(),
            },
            Event::DualChainModeRequested { mode: DualChainMode::Chain },
            Event::TableCellClicked { row: 2, column: ItemField::Width },
            Event::RowInserted { at: 0 },
            Event::SSetModeRequested,
            Event::TableCellClicked { row: 0, column: ItemField::FabricType },
            Event::RowDeleted { row: 1 },
            Event::FocusModeRequested { column: BatchField::Color },
            Event::LightFilterDeleteModeRequested,
            Event::TableCellClicked { row: 1, column: ItemField::Fabric },
            Event::DriveAccessoryModeRequested { mode: DriveAccessoryMode::Winder },
            Event::TabSwitched { tab: TabId::K5 },
            Event::DualChainValueCommitted { value: "1500".to_string() },
            Event::OptionsModeRequested,
            Event::RowDeleted { row: 0 },
            Event::LocationModeRequested,
            Event::TableCellClicked { row: 0, column: ItemField::Height },
            Event::SSetCommitted {
                fabric_type: "B2".to_string(),
            },
        ];

        let h = harness();
        // Fixed-seed walk so the order mixes differently from the list.
        let mut seed: u64 = 0x5eed;
        for step in 0..300 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let pick = (seed >> 33) as usize % (steps.len() + 1);

            if pick == steps.len() {
                let mut quote = QuoteData::new("rollerBlind");
                quote.insert_row(1).unwrap();
                h.ctx.store().load_quote(quote).unwrap();
            } else {
                h.ctx.publish(&steps[pick]).unwrap();
            }

            let state = h.ctx.snapshot();
            assert!(state.check_invariants().is_ok(), "step {}: {:?}", step, state);
            let selecting = matches!(
                state.ui.modes.active_edit_mode,
                Some(ExclusiveMode::LightFilterSelect | ExclusiveMode::SSetSelect)
            );
            assert!(selecting || state.ui.scratch.selected_rows.is_empty(), "step {}", step);

            let surface = h.surface.borrow();
            let active = MODE_BUTTONS.iter().filter(|id| surface.has_class(id, "active")).count();
            assert!(active <= 1, "step {}: {} mode buttons active", step, active);
            assert_eq!(active == 1, state.ui.modes.any_exclusive_active(), "step {}", step);
        }
    }
}
