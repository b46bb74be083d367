#![forbid(unsafe_code)]

//! Active-panel state.

use folio_layout::ViewportClass;

use super::registry::{PanelId, PanelRegistry};

/// Result of a selection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// `active` moved; the orchestrator should animate the change.
    Changed { from: PanelId, to: PanelId },
    /// The id was already active.
    Unchanged,
    /// The id is not registered; nothing changed.
    Unknown,
}

impl SelectOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Which panel is active and which layout is showing.
///
/// `active` always resolves in the registry the state was mounted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseState {
    active: PanelId,
    viewport_class: ViewportClass,
}

impl ShowcaseState {
    /// Fresh state with the first registered panel active.
    pub fn mount(registry: &PanelRegistry, viewport_class: ViewportClass) -> Self {
        Self {
            active: registry.first().id.clone(),
            viewport_class,
        }
    }

    pub fn active(&self) -> &PanelId {
        &self.active
    }

    pub fn viewport_class(&self) -> ViewportClass {
        self.viewport_class
    }

    /// Make `id` the active panel.
    pub fn select(&mut self, registry: &PanelRegistry, id: &str) -> SelectOutcome {
        let Some(panel) = registry.get(id) else {
            tracing::warn!(panel = id, "select ignored: unknown panel id");
            return SelectOutcome::Unknown;
        };
        if panel.id == self.active {
            return SelectOutcome::Unchanged;
        }
        let from = std::mem::replace(&mut self.active, panel.id.clone());
        tracing::debug!(%from, to = %self.active, "active panel changed");
        SelectOutcome::Changed {
            from,
            to: self.active.clone(),
        }
    }

    /// Record the layout class. Returns whether it changed.
    pub fn set_viewport_class(&mut self, class: ViewportClass) -> bool {
        let changed = self.viewport_class != class;
        self.viewport_class = class;
        changed
    }

    /// Activate the next panel, wrapping at the end.
    pub fn select_next(&mut self, registry: &PanelRegistry) -> SelectOutcome {
        self.step(registry, 1)
    }

    /// Activate the previous panel, wrapping at the start.
    pub fn select_prev(&mut self, registry: &PanelRegistry) -> SelectOutcome {
        self.step(registry, registry.len() - 1)
    }

    fn step(&mut self, registry: &PanelRegistry, by: usize) -> SelectOutcome {
        let current = registry.index_of(self.active.as_str()).unwrap_or(0);
        let next = (current + by) % registry.len();
        match registry.at(next) {
            Some(panel) => {
                let id = panel.id.clone();
                self.select(registry, id.as_str())
            }
            None => SelectOutcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::AccentToken;
    use crate::showcase::registry::PanelDescriptor;

    fn registry() -> PanelRegistry {
        PanelRegistry::new(
            ["a", "b", "c"]
                .into_iter()
                .map(|id| PanelDescriptor::new(id, id, AccentToken::Primary))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn mounts_on_first() {
        let state = ShowcaseState::mount(&registry(), ViewportClass::Expanded);
        assert_eq!(state.active().as_str(), "a");
    }

    #[test]
    fn select_reports_change() {
        let reg = registry();
        let mut state = ShowcaseState::mount(&reg, ViewportClass::Expanded);
        assert_eq!(
            state.select(&reg, "b"),
            SelectOutcome::Changed {
                from: "a".into(),
                to: "b".into()
            }
        );
        assert_eq!(state.select(&reg, "b"), SelectOutcome::Unchanged);
    }

    #[test]
    fn unknown_id_leaves_state() {
        let reg = registry();
        let mut state = ShowcaseState::mount(&reg, ViewportClass::Expanded);
        let before = state.clone();
        assert_eq!(state.select(&reg, "nope"), SelectOutcome::Unknown);
        assert_eq!(state, before);
    }

    #[test]
    fn cycling_wraps() {
        let reg = registry();
        let mut state = ShowcaseState::mount(&reg, ViewportClass::Compact);
        state.select_prev(&reg);
        assert_eq!(state.active().as_str(), "c");
        state.select_next(&reg);
        assert_eq!(state.active().as_str(), "a");
    }

    #[test]
    fn viewport_class_change_is_reported_once() {
        let reg = registry();
        let mut state = ShowcaseState::mount(&reg, ViewportClass::Expanded);
        assert!(state.set_viewport_class(ViewportClass::Compact));
        assert!(!state.set_viewport_class(ViewportClass::Compact));
        assert_eq!(state.active().as_str(), "a");
    }
}
