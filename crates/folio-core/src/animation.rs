#![forbid(unsafe_code)]

//! Composable animation primitives.
//!
//! Time-based animations that produce normalized `f32` values (0.0–1.0),
//! plus a declarative [`Transition`] (from-pose, to-pose, duration, delay,
//! easing) interpreted by a [`Tween`]. Views read poses; they never drive
//! the clock themselves.
//!
//! Nothing here allocates during `tick`.

pub mod stagger;

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-out (slower end than quadratic).
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// The page's reveal curve: `cubic-bezier(0.22, 1, 0.36, 1)`.
///
/// Fast rise with a long settle; used for staggered list items.
#[inline]
pub fn ease_reveal(t: f32) -> f32 {
    const REVEAL: CubicBezier = CubicBezier::new(0.22, 1.0, 0.36, 1.0);
    REVEAL.sample(t)
}

/// A CSS-style cubic Bézier timing curve anchored at (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    /// Create a curve from its two control points.
    ///
    /// `x1` and `x2` must lie in [0, 1] for the curve to be a function of time.
    #[must_use]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn component(p1: f32, p2: f32, s: f32) -> f32 {
        // B(s) = 3(1-s)^2 s p1 + 3(1-s) s^2 p2 + s^3
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    }

    fn derivative(p1: f32, p2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
    }

    /// Evaluate the curve's y for time `t` in [0, 1].
    #[must_use]
    pub fn sample(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        // Newton-Raphson on x(s) = t, falling back to bisection.
        let mut s = t;
        for _ in 0..8 {
            let x = Self::component(self.x1, self.x2, s) - t;
            if x.abs() < 1e-5 {
                return Self::component(self.y1, self.y2, s);
            }
            let dx = Self::derivative(self.x1, self.x2, s);
            if dx.abs() < 1e-6 {
                break;
            }
            s = (s - x / dx).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        s = t;
        for _ in 0..32 {
            let x = Self::component(self.x1, self.x2, s);
            if (x - t).abs() < 1e-5 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        Self::component(self.y1, self.y2, s)
    }
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Reset the animation to its initial state.
    fn reset(&mut self);

    /// Time elapsed past completion.
    ///
    /// Lets a caller chaining two animations forward leftover time into the
    /// second one. Returns [`Duration::ZERO`] for animations that never complete.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Linear progression from 0.0 to 1.0 over a duration, with configurable easing.
///
/// Tracks elapsed time as [`Duration`] internally for precise accumulation
/// (no floating-point drift) and accurate overshoot calculation.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a fade with the given duration and default linear easing.
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: nonzero(duration),
            easing: linear,
        }
    }

    /// Set the easing function.
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Raw linear progress (before easing), in [0.0, 1.0].
    pub fn raw_progress(&self) -> f32 {
        progress(self.elapsed, self.duration)
    }

    /// Jump straight to the end state.
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.raw_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

// ---------------------------------------------------------------------------
// Delayed
// ---------------------------------------------------------------------------

/// Wait for a delay, then play the inner animation.
#[derive(Debug, Clone, Copy)]
pub struct Delayed<A> {
    delay: Duration,
    elapsed: Duration,
    inner: A,
    started: bool,
}

impl<A: Animation> Delayed<A> {
    /// Create a delayed animation that waits `delay` before starting `inner`.
    pub fn new(delay: Duration, inner: A) -> Self {
        Self {
            delay,
            elapsed: Duration::ZERO,
            inner,
            started: delay.is_zero(),
        }
    }

    /// Whether the delay period has elapsed and the inner animation has started.
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Access the inner animation.
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

impl<A: Animation> Animation for Delayed<A> {
    fn tick(&mut self, dt: Duration) {
        if !self.started {
            self.elapsed = self.elapsed.saturating_add(dt);
            if self.elapsed >= self.delay {
                self.started = true;
                // Forward overshoot into the inner animation.
                let os = self.elapsed.saturating_sub(self.delay);
                if !os.is_zero() {
                    self.inner.tick(os);
                }
            }
        } else {
            self.inner.tick(dt);
        }
    }

    fn is_complete(&self) -> bool {
        self.started && self.inner.is_complete()
    }

    fn value(&self) -> f32 {
        if self.started {
            self.inner.value()
        } else {
            0.0
        }
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.started = self.delay.is_zero();
        self.inner.reset();
    }

    fn overshoot(&self) -> Duration {
        if self.started {
            self.inner.overshoot()
        } else {
            Duration::ZERO
        }
    }
}

/// Create a [`Delayed`] animation.
pub fn delay<A: Animation>(d: Duration, a: A) -> Delayed<A> {
    Delayed::new(d, a)
}

// ---------------------------------------------------------------------------
// Pose / Transition / Tween
// ---------------------------------------------------------------------------

/// Visual state of an animated element.
///
/// Offsets are in logical pixels; the renderer converts them to cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Opacity in [0, 1].
    pub opacity: f32,
    /// Horizontal offset.
    pub x: f32,
    /// Vertical offset.
    pub y: f32,
    /// Uniform scale factor.
    pub scale: f32,
}

impl Pose {
    /// Fully visible, in place, unscaled.
    pub const REST: Pose = Pose {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Invisible, in place.
    pub const HIDDEN: Pose = Pose {
        opacity: 0.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Builder: set horizontal offset.
    #[must_use]
    pub const fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Builder: set vertical offset.
    #[must_use]
    pub const fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Builder: set scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Linear interpolation between two poses; `t` is clamped to [0, 1].
    #[must_use]
    pub fn lerp(self, to: Pose, t: f32) -> Pose {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Pose {
            opacity: mix(self.opacity, to.opacity).clamp(0.0, 1.0),
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            scale: mix(self.scale, to.scale),
        }
    }

    /// Whether this pose paints anything at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::REST
    }
}

/// Declarative description of a pose change.
///
/// A `Transition` carries no clock. It is interpreted by a [`Tween`], which
/// keeps the panel logic independent of how time is advanced.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    /// Starting pose.
    pub from: Pose,
    /// Final pose.
    pub to: Pose,
    /// Time from start to finish, excluding `delay`.
    pub duration: Duration,
    /// Wait before the pose starts changing.
    pub delay: Duration,
    /// Timing curve.
    pub easing: EasingFn,
}

impl Transition {
    /// Create a transition with no delay and linear easing.
    #[must_use]
    pub fn new(from: Pose, to: Pose, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            delay: Duration::ZERO,
            easing: linear,
        }
    }

    /// Builder: set the start delay.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Builder: set the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Same timing, starting from a different pose.
    ///
    /// Used when an animation is interrupted and must continue from wherever
    /// the element currently is.
    #[must_use]
    pub fn starting_at(mut self, from: Pose) -> Self {
        self.from = from;
        self
    }

    /// Start interpreting this transition.
    #[must_use]
    pub fn start(self) -> Tween {
        Tween::new(self)
    }
}

/// Clock-driven interpreter for a [`Transition`].
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    spec: Transition,
    elapsed: Duration,
}

impl Tween {
    /// Start a tween at time zero.
    #[must_use]
    pub fn new(spec: Transition) -> Self {
        Self {
            spec,
            elapsed: Duration::ZERO,
        }
    }

    /// The transition this tween interprets.
    #[must_use]
    pub fn spec(&self) -> &Transition {
        &self.spec
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.spec.from.lerp(self.spec.to, self.value())
    }

    fn active_elapsed(&self) -> Duration {
        self.elapsed.saturating_sub(self.spec.delay)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.active_elapsed() >= self.spec.duration
    }

    fn value(&self) -> f32 {
        if self.spec.duration.is_zero() {
            return if self.elapsed >= self.spec.delay { 1.0 } else { 0.0 };
        }
        (self.spec.easing)(progress(self.active_elapsed(), self.spec.duration))
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.active_elapsed().saturating_sub(self.spec.duration)
    }
}

fn nonzero(duration: Duration) -> Duration {
    if duration.is_zero() {
        Duration::from_nanos(1)
    } else {
        duration
    }
}

fn progress(elapsed: Duration, duration: Duration) -> f32 {
    let t = elapsed.as_secs_f64() / nonzero(duration).as_secs_f64();
    (t as f32).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
