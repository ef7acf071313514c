//! Easing functions for driver timing.
//!
//! Every easing maps normalized time in `[0, 1]` to a progress value.
//! Monotonic curves stay inside `[0, 1]`; `BackOut` overshoots and declares
//! its own range via [`EasingFunction::output_range`].
//!
//! # Usage
//!
//! ```
//! use sidebar_scene::animation::easing::EasingFunction;
//!
//! let ease = EasingFunction::CubicOut;
//! assert!(ease.evaluate(0.5) > 0.5);
//! assert_eq!(ease.output_range(), (0.0, 1.0));
//! ```

use serde::{Deserialize, Serialize};

/// Overshoot constant of the back-out curve.
const BACK_OVERSHOOT: f32 = 1.70158;

/// Easing function for driver timing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    /// No easing. Used by the exit slide.
    Linear,

    /// `1 - (1 - t)³`. Used by every other top bar transition.
    #[default]
    CubicOut,

    /// Decelerates past the target and settles back onto it.
    BackOut,
}

impl EasingFunction {
    pub const ALL: [EasingFunction; 3] = [Self::Linear, Self::CubicOut, Self::BackOut];

    /// Evaluate at normalized time `t`, clamped to `[0, 1]`.
    ///
    /// The output lies within [`output_range`](Self::output_range) and is
    /// exactly 0 at `t = 0` and 1 at `t = 1`.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::BackOut => {
                let u = t - 1.0;
                1.0 + (BACK_OVERSHOOT + 1.0) * u * u * u + BACK_OVERSHOOT * u * u
            }
        }
    }

    /// Progress never decreases and never leaves `[0, 1]`.
    pub fn is_monotonic(&self) -> bool {
        let (lo, hi) = self.output_range();
        lo >= 0.0 && hi <= 1.0
    }

    /// Declared bounds of [`evaluate`](Self::evaluate) over `[0, 1]`.
    pub fn output_range(&self) -> (f32, f32) {
        match self {
            Self::BackOut => (0.0, 1.1),
            Self::Linear | Self::CubicOut => (0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn samples(ease: EasingFunction) -> impl Iterator<Item = f32> {
        (0..=200).map(move |i| ease.evaluate(i as f32 / 200.0))
    }

    #[test]
    fn test_endpoints() {
        for ease in EasingFunction::ALL {
            assert!(approx_eq(ease.evaluate(0.0), 0.0), "{:?} at 0", ease);
            assert!(approx_eq(ease.evaluate(1.0), 1.0), "{:?} at 1", ease);
        }
    }

    #[test]
    fn test_input_is_clamped() {
        for ease in EasingFunction::ALL {
            assert_eq!(ease.evaluate(-0.5), ease.evaluate(0.0));
            assert_eq!(ease.evaluate(1.5), ease.evaluate(1.0));
        }
    }

    #[test]
    fn test_cubic_out() {
        let ease = EasingFunction::CubicOut;
        assert!(approx_eq(ease.evaluate(0.5), 0.875));
        assert!(ease.evaluate(0.25) > EasingFunction::Linear.evaluate(0.25));
    }

    #[test]
    fn test_monotonic_curves_never_decrease() {
        for ease in EasingFunction::ALL.into_iter().filter(|e| e.is_monotonic()) {
            let values: Vec<f32> = samples(ease).collect();
            assert!(
                values.windows(2).all(|w| w[1] >= w[0] - 1e-6),
                "{:?} decreased",
                ease
            );
            assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_back_out_overshoots_within_declared_range() {
        let ease = EasingFunction::BackOut;
        let (lo, hi) = ease.output_range();
        assert!(!ease.is_monotonic());

        let peak = samples(ease).fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "back-out should overshoot, peak {}", peak);
        assert!(samples(ease).all(|v| v >= lo - EPSILON && v <= hi + EPSILON));
    }

    #[test]
    fn test_default_and_serde_tag() {
        assert_eq!(EasingFunction::default(), EasingFunction::CubicOut);
        let json = serde_json::to_string(&EasingFunction::BackOut).unwrap();
        assert_eq!(json, r#"{"type":"back_out"}"#);
    }
}
