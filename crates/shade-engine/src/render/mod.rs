//! # Render Layer
//!
//! Pure render components plus the host that applies their output.
//!
//! ## Render Pass
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StateChanged ──► RenderHost::render_all                                │
//! │                     │                                                   │
//! │                     ├─► snapshot = store.snapshot()                     │
//! │                     ├─► for each component: render(&snapshot) ─► frame  │
//! │                     └─► adapter.apply(id, patch) for every patch        │
//! │                                                                         │
//! │  Components own a fixed set of elements and recompute every attribute  │
//! │  they own on each pass. Rendering the same snapshot twice gives equal   │
//! │  frames.                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod left_panel;
mod surface;
mod tabs;

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use shade_core::AppState;
use tracing::trace;
use ts_rs::TS;

use crate::bus::{EventBus, SubscriptionId};
use crate::error::{EngineError, EngineResult};
use crate::events::Topic;
use crate::store::StateStore;

pub use left_panel::LeftPanelComponent;
pub use surface::{ElementState, MemorySurface};
pub use tabs::{K1TabComponent, K2TabComponent, K3TabComponent, K4TabComponent, K5TabComponent};

// =============================================================================
// Frames
// =============================================================================

/// Id of a rendered element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ElementId(String);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        ElementId(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        ElementId(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attribute updates for one element. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AttributePatch {
    /// Class name to present/absent.
    pub classes: BTreeMap<String, bool>,
    pub disabled: Option<bool>,
    pub styles: BTreeMap<String, String>,
    pub text: Option<String>,
}

impl AttributePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, name: &str, present: bool) -> Self {
        self.classes.insert(name.to_string(), present);
        self
    }

    /// Shorthand for the `active` class.
    pub fn active(self, active: bool) -> Self {
        self.class("active", active)
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn style(mut self, property: &str, value: impl Into<String>) -> Self {
        self.styles.insert(property.to_string(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Output of one component for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RenderFrame {
    pub patches: Vec<(ElementId, AttributePatch)>,
}

impl RenderFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: impl Into<ElementId>, patch: AttributePatch) {
        self.patches.push((id.into(), patch));
    }

    /// Patch for an element, if this frame owns it.
    pub fn get(&self, id: &str) -> Option<&AttributePatch> {
        self.patches
            .iter()
            .find(|(element, _)| element.as_str() == id)
            .map(|(_, patch)| patch)
    }

    pub fn extend(&mut self, other: RenderFrame) {
        self.patches.extend(other.patches);
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

// =============================================================================
// Contracts
// =============================================================================

/// Writes patches to a concrete surface. Unknown elements are skipped by
/// surfaces that cannot create them.
pub trait RenderAdapter {
    fn apply(&mut self, id: &ElementId, patch: &AttributePatch);
}

/// Pure function from a snapshot to UI updates.
pub trait RenderComponent {
    fn name(&self) -> &'static str;

    fn render(&self, state: &AppState) -> RenderFrame;
}

// =============================================================================
// Host
// =============================================================================

/// Re-renders every component after each committed state change.
pub struct RenderHost {
    store: Rc<StateStore>,
    components: Vec<Box<dyn RenderComponent>>,
    adapter: Rc<RefCell<dyn RenderAdapter>>,
    passes: Cell<usize>,
}

impl RenderHost {
    pub fn new(store: Rc<StateStore>, adapter: Rc<RefCell<dyn RenderAdapter>>) -> Self {
        RenderHost {
            store,
            components: Vec::new(),
            adapter,
            passes: Cell::new(0),
        }
    }

    /// Host with the left panel and all five tab components.
    pub fn with_default_components(store: Rc<StateStore>, adapter: Rc<RefCell<dyn RenderAdapter>>) -> Self {
        let mut host = Self::new(store, adapter);
        host.add_component(Box::new(LeftPanelComponent));
        host.add_component(Box::new(K1TabComponent));
        host.add_component(Box::new(K2TabComponent));
        host.add_component(Box::new(K3TabComponent));
        host.add_component(Box::new(K4TabComponent));
        host.add_component(Box::new(K5TabComponent));
        host
    }

    pub fn add_component(&mut self, component: Box<dyn RenderComponent>) {
        self.components.push(component);
    }

    pub fn attach(self: &Rc<Self>, bus: &EventBus) -> SubscriptionId {
        let host = Rc::clone(self);
        bus.subscribe(Topic::StateChanged, move |_| host.render_all())
    }

    /// Combined frame of every component for a snapshot.
    pub fn render_frame(&self, state: &AppState) -> RenderFrame {
        let mut frame = RenderFrame::new();
        for component in &self.components {
            let part = component.render(state);
            trace!(component = component.name(), patches = part.len(), "Rendered");
            frame.extend(part);
        }
        frame
    }

    /// Renders the current snapshot and applies it.
    pub fn render_all(&self) -> EngineResult<()> {
        let snapshot = self.store.snapshot();
        let frame = self.render_frame(&snapshot);

        let mut adapter = self.adapter.try_borrow_mut().map_err(|_| EngineError::Handler {
            topic: Topic::StateChanged,
            message: "render surface is busy".to_string(),
        })?;
        for (id, patch) in &frame.patches {
            adapter.apply(id, patch);
        }
        self.passes.set(self.passes.get() + 1);
        Ok(())
    }

    /// Number of completed render passes.
    pub fn pass_count(&self) -> usize {
        self.passes.get()
    }
}
