//! Property driver: interpolates one property of one target over time.
//!
//! An [`Anim`] is created per transition, started once, and discarded once it
//! finishes or is cancelled. Time is supplied by the caller (the scheduler's
//! clock), so a driver can also be ticked on its own:
//!
//! ```
//! use std::collections::HashMap;
//! use sidebar_scene::animation::{
//!     AnimatableProperty, Anim, EasingFunction, RenderState, Vector3,
//! };
//!
//! let mut targets = HashMap::new();
//! targets.insert("photo".to_string(), RenderState::default());
//!
//! let mut fade = Anim::new(
//!     "photo",
//!     AnimatableProperty::Transparent,
//!     200,
//!     EasingFunction::Linear,
//!     Vector3::alpha(0.0),
//!     Vector3::alpha(1.0),
//! );
//! fade.start(0.0).unwrap();
//! fade.tick(100.0, &mut targets);
//! assert!((targets["photo"].opacity - 0.5).abs() < 1e-4);
//! ```

use super::easing::EasingFunction;
use super::error::{AnimError, Result};
use super::interpolate::Interpolate;
use super::target::AnimationTargets;
use super::types::{AnimatableProperty, AnimationId, AnimationState};
use super::vector::Vector3;

/// What a single tick did to a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimStep {
    /// The delay elapsed on this tick.
    pub started: bool,
    /// The end value was applied on this tick.
    pub finished: bool,
}

/// Drives one property of one target from `from` to `to`.
#[derive(Debug, Clone)]
pub struct Anim {
    id: AnimationId,
    /// Target this driver writes into. Resolved on every tick.
    pub target_id: String,
    pub property: AnimatableProperty,
    pub duration_ms: u32,
    pub easing: EasingFunction,
    pub from: Vector3,
    pub to: Vector3,
    /// Delay between `start` and the first interpolated frame.
    pub delay_ms: u32,
    /// Make the target visible on the tick the driver starts.
    pub reveal_on_start: bool,
    state: AnimationState,
    start_time_ms: f64,
}

impl Anim {
    pub fn new(
        target_id: impl Into<String>,
        property: AnimatableProperty,
        duration_ms: u32,
        easing: EasingFunction,
        from: Vector3,
        to: Vector3,
    ) -> Self {
        Self {
            id: AnimationId::new(),
            target_id: target_id.into(),
            property,
            duration_ms,
            easing,
            from,
            to,
            delay_ms: 0,
            reveal_on_start: false,
            state: AnimationState::Idle,
            start_time_ms: 0.0,
        }
    }

    /// Set the start delay.
    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Make the target visible when the delay elapses.
    pub fn reveal_on_start(mut self) -> Self {
        self.reveal_on_start = true;
        self
    }

    pub fn id(&self) -> AnimationId {
        self.id
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Pending or running.
    pub fn is_active(&self) -> bool {
        matches!(self.state, AnimationState::Pending | AnimationState::Running)
    }

    pub fn is_finished(&self) -> bool {
        self.state == AnimationState::Finished
    }

    /// Schedule the interpolation to begin `delay_ms` after `now_ms`.
    pub fn start(&mut self, now_ms: f64) -> Result<()> {
        if self.state != AnimationState::Idle {
            return Err(AnimError::AnimAlreadyStarted(self.id));
        }
        self.start_time_ms = now_ms;
        self.state = AnimationState::Pending;
        Ok(())
    }

    /// Milliseconds elapsed since the delay ended; negative while pending.
    fn active_elapsed(&self, now_ms: f64) -> f64 {
        now_ms - self.start_time_ms - self.delay_ms as f64
    }

    /// Normalized time in `[0, 1]` at `now_ms`.
    pub fn progress(&self, now_ms: f64) -> f32 {
        match self.state {
            AnimationState::Idle => 0.0,
            AnimationState::Finished => 1.0,
            _ => {
                if self.duration_ms == 0 {
                    return if self.active_elapsed(now_ms) >= 0.0 { 1.0 } else { 0.0 };
                }
                (self.active_elapsed(now_ms) / self.duration_ms as f64).clamp(0.0, 1.0) as f32
            }
        }
    }

    /// The interpolated value at `now_ms`, without side effects.
    pub fn value_at(&self, now_ms: f64) -> Vector3 {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.to;
        }
        self.from.interpolate(&self.to, self.easing.evaluate(t))
    }

    /// Milliseconds from `now_ms` until this driver next needs a frame.
    ///
    /// `None` once finished or cancelled, `Some(0.0)` while interpolating.
    pub fn next_frame_in(&self, now_ms: f64) -> Option<f64> {
        match self.state {
            AnimationState::Pending => Some((-self.active_elapsed(now_ms)).max(0.0)),
            AnimationState::Running => Some(0.0),
            _ => None,
        }
    }

    /// Advance to `now_ms` and write the current value into the target.
    ///
    /// Does nothing unless the driver is pending or running. The terminal
    /// tick writes exactly `to`.
    pub fn tick(&mut self, now_ms: f64, targets: &mut dyn AnimationTargets) -> AnimStep {
        let mut step = AnimStep::default();
        if !self.is_active() {
            return step;
        }

        let elapsed = self.active_elapsed(now_ms);
        if elapsed < 0.0 {
            return step;
        }

        let target = targets.target_mut(&self.target_id);

        if self.state == AnimationState::Pending {
            self.state = AnimationState::Running;
            step.started = true;
        }

        let finished = elapsed >= self.duration_ms as f64;
        let value = if finished { self.to } else { self.value_at(now_ms) };

        if let Some(target) = target {
            if step.started && self.reveal_on_start {
                target.set_visible(true);
            }
            target.apply(self.property, value);
        }

        if finished {
            self.state = AnimationState::Finished;
            step.finished = true;
        }
        step
    }

    /// Stop without applying the end value.
    ///
    /// Returns `false` if the driver had already finished or been cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            AnimationState::Finished | AnimationState::Cancelled => false,
            _ => {
                self.state = AnimationState::Cancelled;
                true
            }
        }
    }
}
