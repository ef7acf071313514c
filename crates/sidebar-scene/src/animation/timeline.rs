//! Timelines: several drivers (and nested timelines) run as one transition.
//!
//! A [`Timeline`] starts all members together, each honoring its own delay
//! plus the timeline's delay, and is complete once every member has finished
//! naturally. Completion is tracked by an explicit [`TimelineState`], so it
//! can be observed at most once and never after a cancel.
//!
//! # Example
//!
//! ```ignore
//! let mut enter = Timeline::new();
//! enter.add_anim(Anim::new("photo", AnimatableProperty::Move, 200, EasingFunction::CubicOut,
//!     Vector3::offset(0.0, -height), Vector3::ZERO));
//! enter.add_timeline(item.dim());
//! let id = manager.start(enter)?;
//! ```

use tracing::warn;

use super::anim::Anim;
use super::error::{AnimError, Result};
use super::events::AnimEvent;
use super::target::AnimationTargets;
use super::types::{TimelineId, TimelineState};

/// A timeline member, and what item operations hand back.
#[derive(Debug, Clone)]
pub enum Animation {
    Anim(Anim),
    Timeline(Timeline),
}

impl Animation {
    fn start(&mut self, now_ms: f64) -> Result<()> {
        match self {
            Self::Anim(anim) => anim.start(now_ms),
            Self::Timeline(timeline) => timeline.start(now_ms),
        }
    }

    fn add_delay(&mut self, delay_ms: u32) {
        match self {
            Self::Anim(anim) => anim.delay_ms += delay_ms,
            Self::Timeline(timeline) => timeline.delay_ms += delay_ms,
        }
    }

    /// Started and not yet finished or cancelled.
    fn is_active(&self) -> bool {
        match self {
            Self::Anim(anim) => anim.is_active(),
            Self::Timeline(timeline) => timeline.is_running(),
        }
    }

    fn cancel(&mut self) -> bool {
        match self {
            Self::Anim(anim) => anim.cancel(),
            Self::Timeline(timeline) => timeline.cancel(),
        }
    }

    fn next_frame_in(&self, now_ms: f64) -> Option<f64> {
        match self {
            Self::Anim(anim) => anim.next_frame_in(now_ms),
            Self::Timeline(timeline) => timeline.next_frame_in(now_ms),
        }
    }

    /// Ticks the member; returns `true` on the tick it finishes.
    fn tick(
        &mut self,
        now_ms: f64,
        targets: &mut dyn AnimationTargets,
        events: &mut Vec<AnimEvent>,
    ) -> bool {
        match self {
            Self::Anim(anim) => {
                let step = anim.tick(now_ms, targets);
                if step.started {
                    events.push(AnimEvent::Started {
                        animation_id: anim.id(),
                        target_id: anim.target_id.clone(),
                        property: anim.property,
                    });
                }
                if step.finished {
                    events.push(AnimEvent::Ended {
                        animation_id: anim.id(),
                        target_id: anim.target_id.clone(),
                        property: anim.property,
                    });
                }
                step.finished
            }
            Self::Timeline(timeline) => timeline.tick(now_ms, targets, events),
        }
    }
}

impl From<Anim> for Animation {
    fn from(anim: Anim) -> Self {
        Self::Anim(anim)
    }
}

impl From<Timeline> for Animation {
    fn from(timeline: Timeline) -> Self {
        Self::Timeline(timeline)
    }
}

/// A set of members started and completed as one logical transition.
#[derive(Debug, Clone)]
pub struct Timeline {
    id: TimelineId,
    members: Vec<Animation>,
    /// Extra delay applied to every member at start.
    delay_ms: u32,
    state: TimelineState,
    /// Members still running.
    pending: usize,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            id: TimelineId::new(),
            members: Vec::new(),
            delay_ms: 0,
            state: TimelineState::NotStarted,
            pending: 0,
        }
    }

    /// Builder form of [`add`](Self::add). A rejected member is logged and dropped.
    pub fn with(mut self, member: impl Into<Animation>) -> Self {
        if let Err(err) = self.add(member) {
            warn!("dropping timeline member: {}", err);
        }
        self
    }

    /// Append a member. Only allowed before `start`.
    pub fn add(&mut self, member: impl Into<Animation>) -> Result<()> {
        if self.state != TimelineState::NotStarted {
            return Err(AnimError::AddAfterStart(self.id));
        }
        self.members.push(member.into());
        Ok(())
    }

    pub fn add_anim(&mut self, anim: Anim) -> Result<()> {
        self.add(anim)
    }

    pub fn add_timeline(&mut self, timeline: Timeline) -> Result<()> {
        self.add(timeline)
    }

    /// Uniform extra delay, additive with each member's own delay.
    pub fn set_delay(&mut self, delay_ms: u32) {
        self.delay_ms = delay_ms;
    }

    pub fn id(&self) -> TimelineId {
        self.id
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimelineState::Running
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn members(&self) -> &[Animation] {
        &self.members
    }

    /// Drivers in this timeline and every nested one, in insertion order.
    pub fn anims(&self) -> Vec<&Anim> {
        let mut out = Vec::new();
        for member in &self.members {
            match member {
                Animation::Anim(anim) => out.push(anim),
                Animation::Timeline(nested) => out.extend(nested.anims()),
            }
        }
        out
    }

    /// Start every member at `now_ms`.
    ///
    /// A timeline with no startable members completes immediately. A member
    /// that refuses to start (it was started elsewhere) is logged and does
    /// not hold the timeline open.
    pub fn start(&mut self, now_ms: f64) -> Result<()> {
        if self.state != TimelineState::NotStarted {
            return Err(AnimError::TimelineAlreadyStarted(self.id));
        }

        let delay_ms = self.delay_ms;
        let mut pending = 0;
        for member in &mut self.members {
            member.add_delay(delay_ms);
            if let Err(err) = member.start(now_ms) {
                warn!("{}: member not started: {}", self.id, err);
                continue;
            }
            if member.is_active() {
                pending += 1;
            }
        }

        self.pending = pending;
        self.state = if pending == 0 {
            TimelineState::Completed
        } else {
            TimelineState::Running
        };
        Ok(())
    }

    /// Advance every member to `now_ms`.
    ///
    /// Driver events are appended to `events`. Returns `true` on the tick
    /// the last member finishes; never after a cancel.
    pub fn tick(
        &mut self,
        now_ms: f64,
        targets: &mut dyn AnimationTargets,
        events: &mut Vec<AnimEvent>,
    ) -> bool {
        if self.state != TimelineState::Running {
            return false;
        }

        for member in &mut self.members {
            if member.tick(now_ms, targets, events) {
                self.pending = self.pending.saturating_sub(1);
            }
        }

        if self.pending == 0 {
            self.state = TimelineState::Completed;
            return true;
        }
        false
    }

    /// Cancel every member and suppress completion.
    ///
    /// Returns `false` if the timeline had already completed or been
    /// cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        for member in &mut self.members {
            member.cancel();
        }
        self.state = TimelineState::Cancelled;
        true
    }

    /// Milliseconds until the next member needs a frame.
    pub fn next_frame_in(&self, now_ms: f64) -> Option<f64> {
        if self.state != TimelineState::Running {
            return None;
        }
        self.members
            .iter()
            .filter_map(|m| m.next_frame_in(now_ms))
            .reduce(f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::easing::EasingFunction;
    use crate::animation::target::RenderState;
    use crate::animation::types::AnimatableProperty;
    use crate::animation::vector::Vector3;
    use std::collections::HashMap;

    fn targets(ids: &[&str]) -> HashMap<String, RenderState> {
        ids.iter()
            .map(|id| (id.to_string(), RenderState::default()))
            .collect()
    }

    fn fade(target: &str, duration_ms: u32) -> Anim {
        Anim::new(
            target,
            AnimatableProperty::Transparent,
            duration_ms,
            EasingFunction::Linear,
            Vector3::alpha(0.0),
            Vector3::alpha(1.0),
        )
    }

    #[test]
    fn test_completes_after_last_member() {
        let mut targets = targets(&["a", "b"]);
        let mut events = Vec::new();
        let mut timeline = Timeline::new()
            .with(fade("a", 100))
            .with(fade("b", 100).with_delay(50));

        timeline.start(0.0).unwrap();
        assert!(timeline.is_running());

        assert!(!timeline.tick(100.0, &mut targets, &mut events));
        assert_eq!(targets["a"].opacity, 1.0);
        assert!((targets["b"].opacity - 0.5).abs() < 1e-4);

        assert!(timeline.tick(150.0, &mut targets, &mut events));
        assert_eq!(timeline.state(), TimelineState::Completed);

        // Completion is reported once.
        assert!(!timeline.tick(200.0, &mut targets, &mut events));

        let ended = events
            .iter()
            .filter(|e| matches!(e, AnimEvent::Ended { .. }))
            .count();
        assert_eq!(ended, 2);
    }

    #[test]
    fn test_empty_timeline_completes_on_start() {
        let mut timeline = Timeline::new();
        timeline.start(0.0).unwrap();
        assert_eq!(timeline.state(), TimelineState::Completed);
    }

    #[test]
    fn test_double_start_is_reported() {
        let mut timeline = Timeline::new().with(fade("a", 10));
        timeline.start(0.0).unwrap();
        assert_eq!(
            timeline.start(5.0),
            Err(AnimError::TimelineAlreadyStarted(timeline.id()))
        );
    }

    #[test]
    fn test_add_after_start_is_rejected() {
        let mut timeline = Timeline::new().with(fade("a", 10));
        timeline.start(0.0).unwrap();
        assert_eq!(
            timeline.add(fade("b", 10)),
            Err(AnimError::AddAfterStart(timeline.id()))
        );
        assert_eq!(timeline.len(), 1);
    }

    #[test]
    fn test_set_delay_is_additive_and_nested() {
        let mut targets = targets(&["a", "b"]);
        let mut events = Vec::new();

        let nested = Timeline::new().with(fade("b", 100));
        let mut timeline = Timeline::new()
            .with(fade("a", 100).with_delay(20))
            .with(nested);
        timeline.set_delay(30);
        timeline.start(0.0).unwrap();

        timeline.tick(40.0, &mut targets, &mut events);
        // "a" waits 50ms, nested "b" waits 30ms.
        assert!(events.iter().all(|e| e.target_id() == "b"));
        assert_eq!(events.len(), 1);

        assert!(!timeline.tick(130.0, &mut targets, &mut events));
        assert!(timeline.tick(150.0, &mut targets, &mut events));
    }

    #[test]
    fn test_cancel_suppresses_completion() {
        let mut targets = targets(&["a"]);
        let mut events = Vec::new();
        let mut timeline = Timeline::new().with(fade("a", 100));
        timeline.start(0.0).unwrap();
        timeline.tick(50.0, &mut targets, &mut events);
        let frozen = targets["a"].opacity;

        assert!(timeline.cancel());
        assert!(!timeline.cancel());
        assert!(!timeline.tick(200.0, &mut targets, &mut events));
        assert_eq!(targets["a"].opacity, frozen);
        assert_eq!(timeline.state(), TimelineState::Cancelled);
        assert!(timeline.anims().iter().all(|a| !a.is_active()));
    }

    #[test]
    fn test_next_frame_in() {
        let mut timeline = Timeline::new()
            .with(fade("a", 100).with_delay(40))
            .with(fade("b", 100).with_delay(10));
        assert_eq!(timeline.next_frame_in(0.0), None);
        timeline.start(0.0).unwrap();
        assert_eq!(timeline.next_frame_in(0.0), Some(10.0));
    }
}
