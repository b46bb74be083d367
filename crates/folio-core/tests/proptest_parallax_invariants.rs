//! Property-based invariant tests for pointer parallax and pose tweening.
//!
//! 1. Normalized offsets always lie in [-1, 1] on both axes.
//! 2. Normalization is monotone along each axis.
//! 3. Layer displacement never exceeds the layer's multiplier.
//! 4. A pointer signal recomputes at most once per frame.
//! 5. A detached signal never reports an offset.
//! 6. Tween opacity stays in [0, 1] for any tick sequence.

use std::time::Duration;

use folio_core::animation::{Animation, Pose, Transition};
use folio_core::parallax::{ParallaxLayer, PointerSignal, normalize, normalize_cell};
use proptest::prelude::*;

fn viewport() -> impl Strategy<Value = (u16, u16)> {
    (1u16..=400, 1u16..=200)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Bounded output
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalized_offset_is_bounded(
        x in -5000.0f32..5000.0,
        y in -5000.0f32..5000.0,
        w in 0.0f32..4000.0,
        h in 0.0f32..4000.0,
    ) {
        let o = normalize(x, y, w, h);
        prop_assert!((-1.0..=1.0).contains(&o.x), "x out of range: {:?}", o);
        prop_assert!((-1.0..=1.0).contains(&o.y), "y out of range: {:?}", o);
    }

    #[test]
    fn cell_offset_is_bounded(col in any::<u16>(), row in any::<u16>(), (w, h) in viewport()) {
        let o = normalize_cell(col, row, w, h);
        prop_assert!((-1.0..=1.0).contains(&o.x));
        prop_assert!((-1.0..=1.0).contains(&o.y));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Monotone
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalization_is_monotone(a in 0u16..400, b in 0u16..400, (w, h) in viewport()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let o_lo = normalize_cell(lo, 0, w, h);
        let o_hi = normalize_cell(hi, 0, w, h);
        prop_assert!(o_lo.x <= o_hi.x);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Displacement bounded by multiplier
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn displacement_within_multiplier(col in any::<u16>(), row in any::<u16>(), (w, h) in viewport()) {
        let o = normalize_cell(col, row, w, h);
        for layer in [
            ParallaxLayer::BACKDROP_NEAR,
            ParallaxLayer::BACKDROP_FAR,
            ParallaxLayer::DECOR_LEAD,
            ParallaxLayer::DECOR_TRAIL,
            ParallaxLayer::CONTENT_TILT,
        ] {
            let (dx, dy) = layer.apply(o);
            prop_assert!(dx.abs() <= layer.x.abs() + 1e-4);
            prop_assert!(dy.abs() <= layer.y.abs() + 1e-4);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4 + 5. Frame gating
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn at_most_one_recompute_per_frame(
        frames in proptest::collection::vec(
            proptest::collection::vec((0u16..120, 0u16..40), 0..20),
            1..30,
        ),
    ) {
        let mut signal = PointerSignal::new(120, 40);
        for (i, samples) in frames.iter().enumerate() {
            for &(c, r) in samples {
                signal.publish(c, r);
            }
            signal.on_frame();
            prop_assert!(signal.recompute_count() <= (i as u64) + 1);
        }
    }

    #[test]
    fn detached_signal_is_silent(samples in proptest::collection::vec((0u16..80, 0u16..24), 0..20)) {
        let mut signal = PointerSignal::new(80, 24);
        signal.detach();
        for (c, r) in samples {
            signal.publish(c, r);
            prop_assert_eq!(signal.on_frame(), None);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Tween opacity bounded
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tween_opacity_bounded(ticks in proptest::collection::vec(0u64..200, 0..40)) {
        let spec = Transition::new(Pose::HIDDEN.with_x(-20.0), Pose::REST, Duration::from_millis(500));
        let mut tween = spec.start();
        for ms in ticks {
            tween.tick(Duration::from_millis(ms));
            let p = tween.pose();
            prop_assert!((0.0..=1.0).contains(&p.opacity));
        }
    }
}
