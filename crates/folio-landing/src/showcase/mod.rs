#![forbid(unsafe_code)]

//! Technology showcase: a tab strip selecting one of several panels, each
//! with text, a staggered feature list, and an image with pointer parallax.
//!
//! [`Showcase`] wires the pieces together:
//!
//! ```text
//!  click / key ──▶ ShowcaseState::select ──Changed──▶ TransitionOrchestrator::begin
//!  resize ───────▶ set_viewport_class (re-render only)
//!  frame ────────▶ tick ──▶ compose ──▶ paint
//! ```

pub mod registry;
pub mod state;
pub mod transition;
pub mod view;

use std::time::Duration;

use folio_core::animation::{Animation, Fade, ease_out};
use folio_core::parallax::PointerOffset;
use folio_layout::ViewportClass;

pub use registry::{PanelDescriptor, PanelId, PanelRegistry, RegistryError};
pub use state::{SelectOutcome, ShowcaseState};
pub use transition::{Presence, PresencePhase, TransitionOrchestrator};
pub use view::ShowcaseView;

/// Section fade-in once it scrolls into view.
const REVEAL_DURATION: Duration = Duration::from_millis(600);

/// The mounted showcase section.
#[derive(Debug, Clone)]
pub struct Showcase {
    registry: PanelRegistry,
    state: ShowcaseState,
    orchestrator: TransitionOrchestrator,
    reveal: Fade,
    in_view: bool,
    revealed: bool,
}

impl Showcase {
    /// Mount with the first panel active and entering.
    pub fn mount(registry: PanelRegistry, class: ViewportClass) -> Self {
        let state = ShowcaseState::mount(&registry, class);
        let reveal_items = registry
            .get(state.active().as_str())
            .map_or(0, |panel| panel.features.len());
        let orchestrator =
            TransitionOrchestrator::new(state.active().clone(), class).with_reveal_items(reveal_items);
        tracing::debug!(panel = %state.active(), %class, "showcase mounted");
        Self {
            registry,
            state,
            orchestrator,
            reveal: Fade::new(REVEAL_DURATION).easing(ease_out),
            in_view: false,
            revealed: false,
        }
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    pub fn state(&self) -> &ShowcaseState {
        &self.state
    }

    pub fn orchestrator(&self) -> &TransitionOrchestrator {
        &self.orchestrator
    }

    /// Activate `id`, animating the change if it is a real one.
    pub fn select(&mut self, id: &str) -> SelectOutcome {
        let outcome = self.state.select(&self.registry, id);
        self.forward(&outcome);
        outcome
    }

    /// Activate the panel at tab position `index`.
    pub fn select_index(&mut self, index: usize) -> SelectOutcome {
        match self.registry.at(index) {
            Some(panel) => {
                let id = panel.id.clone();
                self.select(id.as_str())
            }
            None => SelectOutcome::Unknown,
        }
    }

    pub fn select_next(&mut self) -> SelectOutcome {
        let outcome = self.state.select_next(&self.registry);
        self.forward(&outcome);
        outcome
    }

    pub fn select_prev(&mut self) -> SelectOutcome {
        let outcome = self.state.select_prev(&self.registry);
        self.forward(&outcome);
        outcome
    }

    fn forward(&mut self, outcome: &SelectOutcome) {
        if let SelectOutcome::Changed { from, to } = outcome {
            let reveal_items = self
                .registry
                .get(to.as_str())
                .map_or(0, |panel| panel.features.len());
            self.orchestrator.begin_revealing(from, to.clone(), reveal_items);
        }
    }

    /// Record a layout flip. Returns whether it changed.
    pub fn set_viewport_class(&mut self, class: ViewportClass) -> bool {
        self.orchestrator.set_viewport_class(class);
        self.state.set_viewport_class(class)
    }

    /// In-view changes start the one-shot section reveal.
    pub fn set_in_view(&mut self, in_view: bool) {
        if in_view && !self.in_view {
            tracing::trace!("showcase entered view");
            self.revealed = true;
        }
        self.in_view = in_view;
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.revealed {
            self.reveal.tick(dt);
        }
        self.orchestrator.tick(dt);
    }

    /// Whether another frame would change anything.
    pub fn is_animating(&self) -> bool {
        (self.revealed && !self.reveal.is_complete()) || !self.orchestrator.settled()
    }

    /// Drop the mounted panel and everything in flight.
    pub fn unmount(&mut self) {
        tracing::debug!(generation = self.orchestrator.generation(), "showcase unmounted");
        self.orchestrator.cancel();
    }

    /// Compose the current frame's view.
    pub fn view(&self, pointer: Option<PointerOffset>) -> ShowcaseView {
        let reveal = if self.revealed { self.reveal.value() } else { 0.0 };
        view::compose(
            &self.registry,
            &self.state,
            self.orchestrator.presence().as_ref(),
            pointer,
            reveal,
        )
    }

    /// Skip the section reveal and any running transition.
    pub fn settle_now(&mut self) {
        self.revealed = true;
        self.reveal.finish();
        // Finish any exit and enter first; the reveal length then belongs
        // to whichever panel ended up mounted.
        self.orchestrator
            .tick(transition::PHASE_DURATION.saturating_mul(2));
        let reveal = transition::reveal_duration(self.orchestrator.reveal_items());
        self.orchestrator.tick(reveal);
    }
}
