//! In-memory render surface.
//!
//! Keeps the last known attributes of every element and records which
//! elements actually changed, so a headless front end can forward only the
//! differences.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::{AttributePatch, ElementId, RenderAdapter};

/// Attributes of one element as the surface currently shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementState {
    pub classes: BTreeSet<String>,
    pub disabled: bool,
    pub styles: BTreeMap<String, String>,
    pub text: String,
}

impl ElementState {
    fn merge(&mut self, patch: &AttributePatch) {
        for (class, present) in &patch.classes {
            if *present {
                self.classes.insert(class.clone());
            } else {
                self.classes.remove(class);
            }
        }
        if let Some(disabled) = patch.disabled {
            self.disabled = disabled;
        }
        for (property, value) in &patch.styles {
            self.styles.insert(property.clone(), value.clone());
        }
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    elements: BTreeMap<ElementId, ElementState>,
    changed: BTreeSet<ElementId>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.get(&ElementId::from(id))
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.classes.contains(class))
    }

    /// Unknown elements read as enabled.
    pub fn is_disabled(&self, id: &str) -> bool {
        self.element(id).is_some_and(|e| e.disabled)
    }

    pub fn style(&self, id: &str, property: &str) -> Option<&str> {
        self.element(id)?.styles.get(property).map(String::as_str)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id).map(|e| e.text.as_str())
    }

    /// Elements whose attributes changed since the last call, with their
    /// current state.
    pub fn take_changes(&mut self) -> Vec<(ElementId, ElementState)> {
        let changed = std::mem::take(&mut self.changed);
        changed
            .into_iter()
            .filter_map(|id| {
                let state = self.elements.get(&id)?.clone();
                Some((id, state))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl RenderAdapter for MemorySurface {
    fn apply(&mut self, id: &ElementId, patch: &AttributePatch) {
        let element = self.elements.entry(id.clone()).or_default();
        let before = element.clone();
        element.merge(patch);
        if *element != before {
            self.changed.insert(id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_merges_and_tracks_changes() {
        let mut surface = MemorySurface::new();
        let id = ElementId::from("k1-tab");

        surface.apply(&id, &AttributePatch::new().active(true).disabled(false));
        assert!(surface.has_class("k1-tab", "active"));
        assert_eq!(surface.take_changes().len(), 1);

        // Same attributes again: no change recorded.
        surface.apply(&id, &AttributePatch::new().active(true).disabled(false));
        assert!(surface.take_changes().is_empty());

        surface.apply(&id, &AttributePatch::new().active(false));
        assert!(!surface.has_class("k1-tab", "active"));
        assert_eq!(surface.take_changes()[0].0, id);
    }

    #[test]
    fn test_unset_fields_are_left_alone() {
        let mut surface = MemorySurface::new();
        let id = ElementId::from("k4-remote-count");
        surface.apply(&id, &AttributePatch::new().text("2").disabled(true));
        surface.apply(&id, &AttributePatch::new().style("opacity", "1"));

        assert_eq!(surface.text("k4-remote-count"), Some("2"));
        assert!(surface.is_disabled("k4-remote-count"));
        assert_eq!(surface.style("k4-remote-count", "opacity"), Some("1"));
        assert!(!surface.is_disabled("missing"));
    }
}
