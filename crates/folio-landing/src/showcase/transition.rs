#![forbid(unsafe_code)]

//! Keyed exit-then-enter sequencing for the active panel.
//!
//! At most one panel subtree is mounted at any instant. Changing the active
//! panel runs the mounted panel's exit animation to completion, then mounts
//! the target and plays its enter animation ("wait" presence):
//!
//! ```text
//!            begin(B)               exit done            enter done
//!   [A idle] ───────▶ [A exiting] ───────────▶ [B entering] ─────────▶ [B idle]
//!                        │ begin(C): pending = C    │ begin(C): exit B from
//!                        ▼                          ▼ its current pose
//! ```
//!
//! A generation counter increments on every `begin` and on `cancel`, so a
//! caller can tell whether a transition it started is still the live one.

use std::time::Duration;

use folio_core::animation::stagger::StaggerPlan;
use folio_core::animation::{Animation, Pose, Transition, Tween, ease_in_out, ease_out, ease_reveal};
use folio_layout::ViewportClass;
use serde::Serialize;

use super::registry::PanelId;

/// Length of the exit phase and of the enter phase.
pub const PHASE_DURATION: Duration = Duration::from_millis(500);
/// Slide distance for panel content, in logical pixels.
pub const SLIDE_PX: f32 = 20.0;
/// Scale of the image slot while hidden.
pub const IMAGE_HIDDEN_SCALE: f32 = 0.9;

/// Feature list reveal: container waits 200 ms, children 100 ms apart.
pub const FEATURE_STAGGER: StaggerPlan =
    StaggerPlan::new(Duration::from_millis(200), Duration::from_millis(100));
/// Duration of one staggered item's rise.
pub const ITEM_DURATION: Duration = Duration::from_millis(500);
/// Distance a staggered item rises, in logical pixels.
pub const ITEM_RISE_PX: f32 = 20.0;
/// Checkmark `i` pops in at `CHECK_DELAY + i * CHECK_STAGGER`.
pub const CHECK_DELAY: Duration = Duration::from_millis(300);
pub const CHECK_STAGGER: Duration = Duration::from_millis(100);
pub const CHECK_DURATION: Duration = Duration::from_millis(300);
/// Delay before the call-to-action rises.
pub const CTA_DELAY: Duration = Duration::from_millis(600);

/// Pose a panel enters from.
pub fn enter_from(class: ViewportClass) -> Pose {
    match class {
        ViewportClass::Expanded => Pose::HIDDEN.with_x(-SLIDE_PX),
        ViewportClass::Compact => Pose::HIDDEN.with_y(SLIDE_PX),
    }
}

/// Pose a panel exits to.
pub fn exit_to(class: ViewportClass) -> Pose {
    match class {
        ViewportClass::Expanded => Pose::HIDDEN.with_x(SLIDE_PX),
        ViewportClass::Compact => Pose::HIDDEN.with_y(-SLIDE_PX),
    }
}

const IMAGE_HIDDEN: Pose = Pose::HIDDEN.with_scale(IMAGE_HIDDEN_SCALE);

/// Lifecycle stage of the mounted subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresencePhase {
    Entering,
    Present,
    Exiting,
}

/// What is mounted right now and how it looks.
#[derive(Debug, Clone, PartialEq)]
pub struct Presence {
    pub panel: PanelId,
    pub phase: PresencePhase,
    /// Pose of the text column.
    pub content: Pose,
    /// Pose of the image slot.
    pub image: Pose,
    /// Time since this panel was mounted; drives the staggered reveal.
    pub mounted_for: Duration,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Entering { content: Tween, image: Tween },
    Exiting { content: Tween, image: Tween },
}

/// Sequences panel changes. Owned by the showcase; never shared.
#[derive(Debug, Clone)]
pub struct TransitionOrchestrator {
    mounted: Option<PanelId>,
    pending: Option<PanelId>,
    pending_reveal_items: usize,
    phase: Phase,
    class: ViewportClass,
    mounted_for: Duration,
    reveal_items: usize,
    generation: u64,
    cancelled: bool,
}

impl TransitionOrchestrator {
    /// Mount `initial` and play its enter animation.
    pub fn new(initial: PanelId, class: ViewportClass) -> Self {
        Self {
            mounted: Some(initial),
            pending: None,
            pending_reveal_items: 5,
            phase: enter_phase(class),
            class,
            mounted_for: Duration::ZERO,
            reveal_items: 5,
            generation: 0,
            cancelled: false,
        }
    }

    /// Mount `initial` already at rest.
    pub fn settled_on(initial: PanelId, class: ViewportClass) -> Self {
        let mut orchestrator = Self::new(initial, class);
        orchestrator.phase = Phase::Idle;
        orchestrator.mounted_for = reveal_duration(orchestrator.reveal_items);
        orchestrator
    }

    /// Number of staggered list items the mounted panel reveals.
    #[must_use]
    pub fn with_reveal_items(mut self, count: usize) -> Self {
        self.reveal_items = count;
        self
    }

    pub fn reveal_items(&self) -> usize {
        self.reveal_items
    }

    /// [`begin_revealing`](Self::begin_revealing) for a target with as many
    /// list items as the mounted panel.
    pub fn begin(&mut self, from: &PanelId, to: PanelId) {
        self.begin_revealing(from, to, self.reveal_items);
    }

    /// Transition from the logical previous target `from` to `to`, which
    /// reveals `reveal_items` list items once mounted.
    ///
    /// - Idle: the mounted panel starts exiting.
    /// - Exiting: only the pending target changes.
    /// - Entering: the entering panel exits from wherever it is.
    ///
    /// Ignored once cancelled.
    pub fn begin_revealing(&mut self, from: &PanelId, to: PanelId, reveal_items: usize) {
        if self.cancelled {
            return;
        }
        self.generation += 1;
        tracing::debug!(%from, %to, generation = self.generation, "panel transition");

        match self.phase {
            Phase::Idle => {
                if self.mounted.as_ref() == Some(&to) {
                    self.pending = None;
                    return;
                }
                self.phase = exit_phase(self.class, Pose::REST, Pose::REST);
            }
            Phase::Exiting { .. } => {}
            Phase::Entering { content, image } => {
                self.phase = exit_phase(self.class, content.pose(), image.pose());
            }
        }
        self.pending = Some(to);
        self.pending_reveal_items = reveal_items;
    }

    /// Advance the clock.
    pub fn tick(&mut self, dt: Duration) {
        if self.cancelled {
            return;
        }
        self.mounted_for = self.mounted_for.saturating_add(dt);

        let exited = match &mut self.phase {
            Phase::Idle => None,
            Phase::Entering { content, image } => {
                content.tick(dt);
                image.tick(dt);
                if content.is_complete() && image.is_complete() {
                    self.phase = Phase::Idle;
                }
                None
            }
            Phase::Exiting { content, image } => {
                content.tick(dt);
                image.tick(dt);
                (content.is_complete() && image.is_complete()).then(|| content.overshoot())
            }
        };
        if let Some(carry) = exited {
            self.swap_in(carry);
        }
    }

    fn swap_in(&mut self, carry: Duration) {
        let Some(next) = self.pending.take() else {
            self.phase = Phase::Idle;
            return;
        };
        tracing::trace!(panel = %next, "mounting entering panel");
        self.mounted = Some(next);
        self.reveal_items = self.pending_reveal_items;
        self.mounted_for = Duration::ZERO;
        self.phase = enter_phase(self.class);
        if !carry.is_zero() {
            self.tick(carry);
        }
    }

    /// Layout changes affect transitions started afterwards.
    pub fn set_viewport_class(&mut self, class: ViewportClass) {
        self.class = class;
    }

    /// Drop everything. A cancelled orchestrator stays inert.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.cancelled = true;
        self.mounted = None;
        self.pending = None;
        self.phase = Phase::Idle;
    }

    /// No transition in flight and the mounted panel's reveal has finished.
    pub fn settled(&self) -> bool {
        self.cancelled
            || (matches!(self.phase, Phase::Idle)
                && self.pending.is_none()
                && self.mounted_for >= self.reveal_length())
    }

    /// No enter or exit in flight (the staggered reveal may still run).
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    fn reveal_length(&self) -> Duration {
        reveal_duration(self.reveal_items)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn mounted(&self) -> Option<&PanelId> {
        self.mounted.as_ref()
    }

    pub fn pending(&self) -> Option<&PanelId> {
        self.pending.as_ref()
    }

    /// The mounted subtree, or `None` after cancel.
    pub fn presence(&self) -> Option<Presence> {
        let panel = self.mounted.clone()?;
        let (phase, content, image) = match &self.phase {
            Phase::Idle => (PresencePhase::Present, Pose::REST, Pose::REST),
            Phase::Entering { content, image } => {
                (PresencePhase::Entering, content.pose(), image.pose())
            }
            Phase::Exiting { content, image } => {
                (PresencePhase::Exiting, content.pose(), image.pose())
            }
        };
        Some(Presence {
            panel,
            phase,
            content,
            image,
            mounted_for: self.mounted_for,
        })
    }
}

fn enter_phase(class: ViewportClass) -> Phase {
    Phase::Entering {
        content: Transition::new(enter_from(class), Pose::REST, PHASE_DURATION)
            .easing(ease_in_out)
            .start(),
        image: Transition::new(IMAGE_HIDDEN, Pose::REST, PHASE_DURATION)
            .easing(ease_in_out)
            .start(),
    }
}

fn exit_phase(class: ViewportClass, content_at: Pose, image_at: Pose) -> Phase {
    Phase::Exiting {
        content: Transition::new(Pose::REST, exit_to(class), PHASE_DURATION)
            .easing(ease_in_out)
            .starting_at(content_at)
            .start(),
        image: Transition::new(Pose::REST, IMAGE_HIDDEN, PHASE_DURATION)
            .easing(ease_in_out)
            .starting_at(image_at)
            .start(),
    }
}

// ---------------------------------------------------------------------------
// Staggered reveal
// ---------------------------------------------------------------------------

fn reveal_pose(delay: Duration, elapsed: Duration) -> Pose {
    let mut tween = Transition::new(Pose::HIDDEN.with_y(ITEM_RISE_PX), Pose::REST, ITEM_DURATION)
        .delay(delay)
        .easing(ease_reveal)
        .start();
    tween.tick(elapsed);
    tween.pose()
}

/// Pose of the title and description, which rise without delay.
pub fn heading_pose(elapsed: Duration) -> Pose {
    reveal_pose(Duration::ZERO, elapsed)
}

/// Pose of feature `index` after `elapsed` since mount.
pub fn feature_pose(index: usize, elapsed: Duration) -> Pose {
    reveal_pose(FEATURE_STAGGER.offset(index), elapsed)
}

/// Scale of checkmark `index` in `[0, 1]`.
pub fn checkmark_scale(index: usize, elapsed: Duration) -> f32 {
    let start = CHECK_DELAY.saturating_add(CHECK_STAGGER.saturating_mul(index as u32));
    let mut tween = Transition::new(Pose::REST.with_scale(0.0), Pose::REST, CHECK_DURATION)
        .delay(start)
        .easing(ease_out)
        .start();
    tween.tick(elapsed);
    tween.pose().scale
}

/// Pose of the call-to-action, which follows the list.
pub fn cta_pose(elapsed: Duration) -> Pose {
    reveal_pose(CTA_DELAY, elapsed)
}

/// Time until a `count`-item list and the call-to-action have finished
/// revealing.
pub fn reveal_duration(count: usize) -> Duration {
    let cta = CTA_DELAY.saturating_add(ITEM_DURATION);
    let Some(last) = count.checked_sub(1) else {
        return cta;
    };
    let items = FEATURE_STAGGER.offset(last).saturating_add(ITEM_DURATION);
    let checks = CHECK_DELAY
        .saturating_add(CHECK_STAGGER.saturating_mul(last as u32))
        .saturating_add(CHECK_DURATION);
    items.max(checks).max(cta)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn id(s: &str) -> PanelId {
        PanelId::from(s)
    }

    fn run(o: &mut TransitionOrchestrator, total: Duration) {
        let mut left = total;
        while !left.is_zero() {
            let dt = left.min(FRAME);
            o.tick(dt);
            left -= dt;
        }
    }

    fn settled_on_a() -> TransitionOrchestrator {
        TransitionOrchestrator::settled_on(id("a"), ViewportClass::Expanded)
    }

    #[test]
    fn mount_plays_enter() {
        let mut o = TransitionOrchestrator::new(id("a"), ViewportClass::Expanded);
        let p = o.presence().unwrap();
        assert_eq!(p.phase, PresencePhase::Entering);
        assert_eq!(p.content, enter_from(ViewportClass::Expanded));
        run(&mut o, PHASE_DURATION);
        assert!(o.is_idle());
    }

    #[test]
    fn exit_then_enter() {
        let mut o = settled_on_a();
        o.begin(&id("a"), id("b"));
        assert_eq!(o.mounted(), Some(&id("a")));
        assert_eq!(o.presence().unwrap().phase, PresencePhase::Exiting);

        run(&mut o, Duration::from_millis(496));
        assert_eq!(o.mounted(), Some(&id("a")), "b must wait for a's exit");

        run(&mut o, Duration::from_millis(16));
        let p = o.presence().unwrap();
        assert_eq!(p.panel, id("b"));
        assert_eq!(p.phase, PresencePhase::Entering);

        run(&mut o, PHASE_DURATION);
        assert!(o.is_idle());
        assert_eq!(o.presence().unwrap().content, Pose::REST);
    }

    #[test]
    fn exit_reaches_mirrored_pose() {
        let mut o = settled_on_a();
        o.begin(&id("a"), id("b"));
        run(&mut o, Duration::from_millis(480));
        let p = o.presence().unwrap();
        assert!(p.content.x > 15.0, "exit slides right, got {}", p.content.x);
        assert!(p.image.scale < 0.95);
    }

    #[test]
    fn compact_uses_vertical_slide() {
        let mut o = TransitionOrchestrator::settled_on(id("a"), ViewportClass::Compact);
        o.begin(&id("a"), id("b"));
        run(&mut o, Duration::from_millis(480));
        let p = o.presence().unwrap();
        assert!(p.content.y < -15.0);
        assert_eq!(p.content.x, 0.0);
    }

    #[test]
    fn supersede_while_exiting_replaces_target() {
        let mut o = settled_on_a();
        o.begin(&id("a"), id("b"));
        run(&mut o, Duration::from_millis(200));
        let before = o.presence().unwrap().content;
        o.begin(&id("b"), id("c"));
        assert_eq!(o.pending(), Some(&id("c")));
        assert_eq!(o.presence().unwrap().content, before, "exit keeps running");

        run(&mut o, Duration::from_millis(304));
        assert_eq!(o.mounted(), Some(&id("c")));
    }

    #[test]
    fn supersede_while_entering_exits_from_current_pose() {
        let mut o = settled_on_a();
        o.begin(&id("a"), id("b"));
        run(&mut o, Duration::from_millis(752));
        let mid = o.presence().unwrap();
        assert_eq!(mid.phase, PresencePhase::Entering);

        o.begin(&id("b"), id("c"));
        let p = o.presence().unwrap();
        assert_eq!(p.panel, id("b"));
        assert_eq!(p.phase, PresencePhase::Exiting);
        assert_eq!(p.content, mid.content);
    }

    #[test]
    fn generation_counts_begins() {
        let mut o = settled_on_a();
        o.begin(&id("a"), id("b"));
        o.begin(&id("b"), id("c"));
        assert_eq!(o.generation(), 2);
        o.cancel();
        assert_eq!(o.generation(), 3);
    }

    #[test]
    fn cancel_is_terminal() {
        let mut o = settled_on_a();
        o.begin(&id("a"), id("b"));
        o.cancel();
        assert!(o.presence().is_none());
        o.tick(Duration::from_secs(5));
        o.begin(&id("b"), id("c"));
        assert!(o.presence().is_none());
        assert!(o.settled());
    }

    #[test]
    fn returning_to_mounted_panel_while_idle_is_noop() {
        let mut o = settled_on_a();
        o.begin(&id("b"), id("a"));
        assert!(o.is_idle());
        assert!(o.pending().is_none());
    }

    #[test]
    fn stagger_schedule() {
        assert_eq!(feature_pose(0, Duration::from_millis(200)).opacity, 0.0);
        assert_eq!(feature_pose(2, Duration::from_millis(900)), Pose::REST);
        assert!(feature_pose(1, Duration::from_millis(400)).opacity > 0.5);
        assert_eq!(heading_pose(ITEM_DURATION), Pose::REST);
    }

    #[test]
    fn checkmarks_pop_in_order() {
        assert_eq!(checkmark_scale(0, Duration::from_millis(300)), 0.0);
        assert_eq!(checkmark_scale(0, Duration::from_millis(600)), 1.0);
        let t = Duration::from_millis(500);
        assert!(checkmark_scale(0, t) > checkmark_scale(1, t));
    }

    #[test]
    fn reveal_duration_covers_last_item() {
        assert_eq!(reveal_duration(5), Duration::from_millis(1100));
        assert_eq!(reveal_duration(8), Duration::from_millis(1400));
        assert_eq!(reveal_duration(0), CTA_DELAY + ITEM_DURATION);
    }

    #[test]
    fn settled_waits_for_the_mounted_panels_own_list() {
        let mut o = settled_on_a().with_reveal_items(1);
        o.begin_revealing(&id("a"), id("b"), 10);
        run(&mut o, PHASE_DURATION * 2 + reveal_duration(1));
        assert_eq!(o.mounted(), Some(&id("b")));
        assert_eq!(o.reveal_items(), 10);
        assert!(!o.settled(), "last of ten items still rising");
        run(&mut o, reveal_duration(10));
        assert!(o.settled());
        let elapsed = o.presence().unwrap().mounted_for;
        assert_eq!(feature_pose(9, elapsed), Pose::REST);
    }

    #[test]
    fn superseded_target_brings_its_own_list_length() {
        let mut o = settled_on_a();
        o.begin_revealing(&id("a"), id("b"), 2);
        o.begin_revealing(&id("b"), id("c"), 8);
        run(&mut o, PHASE_DURATION * 2);
        assert_eq!(o.mounted(), Some(&id("c")));
        assert_eq!(o.reveal_items(), 8);
    }

    #[test]
    fn settled_waits_for_reveal() {
        let mut o = settled_on_a();
        assert!(o.settled());
        o.begin(&id("a"), id("b"));
        run(&mut o, PHASE_DURATION * 2);
        assert!(o.is_idle());
        assert!(!o.settled());
        run(&mut o, reveal_duration(5));
        assert!(o.settled());
    }
}
