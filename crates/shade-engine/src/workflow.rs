//! # Workflow Controller
//!
//! Turns the non-mode domain events into store mutations: navigation,
//! typed input, row edits, accessory counts, calculation and new quote.
//!
//! Mutations triggered by user events may be rejected (a value out of
//! range, a row deleted a moment ago). Those rejections are logged by the
//! store and absorbed here; the UI simply keeps showing the unchanged state.

use std::rc::Rc;

use shade_core::ItemField;
use tracing::{debug, info};

use crate::bus::{EventBus, SubscriptionId};
use crate::error::EngineResult;
use crate::events::{BatchCommit, Event, Topic};
use crate::pricing::PricingProvider;
use crate::store::StateStore;

/// Drops rejected mutations, propagates every other failure.
pub(crate) fn absorb(topic: Topic, result: EngineResult<()>) -> EngineResult<()> {
    match result {
        Err(e) if e.is_rejected_mutation() => {
            debug!(%topic, error = %e, "User event rejected by store");
            Ok(())
        }
        other => other,
    }
}

pub struct WorkflowController {
    store: Rc<StateStore>,
    pricing: Box<dyn PricingProvider>,
}

impl WorkflowController {
    pub fn new(store: Rc<StateStore>, pricing: Box<dyn PricingProvider>) -> Self {
        WorkflowController { store, pricing }
    }

    pub fn attach(self: &Rc<Self>, bus: &EventBus) -> Vec<SubscriptionId> {
        const TOPICS: [Topic; 14] = [
            Topic::TabSwitched,
            Topic::NavigationToggled,
            Topic::LocationInputChanged,
            Topic::LocationInputCommitted,
            Topic::BatchInputCommittedByEnter,
            Topic::BatchInputCommittedByBlur,
            Topic::CellValueCommitted,
            Topic::DualChainInputChanged,
            Topic::DualChainValueCommitted,
            Topic::AccessoryCountChanged,
            Topic::RowInserted,
            Topic::RowDeleted,
            Topic::CalculationRequested,
            Topic::NewQuoteRequested,
        ];

        TOPICS
            .into_iter()
            .map(|topic| {
                let workflow = Rc::clone(self);
                bus.subscribe(topic, move |event| workflow.handle(event))
            })
            .collect()
    }

    pub fn handle(&self, event: &Event) -> EngineResult<()> {
        let store = &self.store;
        let result = match event {
            Event::TabSwitched { tab } => store.set_active_tab(*tab),
            Event::NavigationToggled => {
                let view = store.with_state(|s| s.ui.current_view.toggled());
                store.set_current_view(view)
            }
            Event::LocationInputChanged { value } => store.set_location_input(value),
            Event::LocationInputCommitted { value } => store.commit_location_input(value),
            Event::BatchInputCommittedByEnter(commit) => self.commit_batch(commit, "enter"),
            Event::BatchInputCommittedByBlur(commit) => self.commit_batch(commit, "blur"),
            Event::CellValueCommitted { row, column, value } => self.commit_cell(*row, *column, value),
            Event::DualChainInputChanged { value } => store.set_dual_chain_input(value),
            Event::DualChainValueCommitted { value } => store.apply_dual_chain_value(value),
            Event::AccessoryCountChanged { kind, delta } => {
                let current = store.with_state(|s| s.ui.accessory_counts.get(*kind));
                let next = i64::from(current) + i64::from(*delta);
                store.set_accessory_count(*kind, next.clamp(0, i64::from(u32::MAX)) as u32)
            }
            Event::RowInserted { at } => store.insert_row(*at),
            Event::RowDeleted { row } => store.delete_row(*row),
            Event::CalculationRequested => self.calculate(),
            Event::NewQuoteRequested => {
                info!("Starting a new quote");
                store.reset()
            }
            _ => Ok(()),
        };
        absorb(event.topic(), result)
    }

    fn commit_batch(&self, commit: &BatchCommit, via: &'static str) -> EngineResult<()> {
        debug!(
            fabric_type = %commit.fabric_type,
            field = ?commit.field,
            via,
            "Batch input committed"
        );
        self.store
            .apply_batch_input(&commit.fabric_type, commit.field, &commit.value)
    }

    fn commit_cell(&self, row: usize, column: ItemField, value: &str) -> EngineResult<()> {
        self.store.update_item_field(row, column, value)
    }

    /// Prices the current quote and stores the result.
    pub fn calculate(&self) -> EngineResult<()> {
        let snapshot = self.store.snapshot();
        let summary = self
            .pricing
            .summarize(&snapshot.quote, &snapshot.ui.accessory_counts);
        let lines = self.pricing.line_prices(&snapshot.quote);
        debug!(total = ?summary.total_cents, "Quote priced");
        self.store.apply_summary(summary, &lines)
    }
}
