//! The scheduling loop for timelines.
//!
//! `AnimationManager` is the single cooperative loop every driver runs on.
//! It owns a monotonic clock that only moves when the host calls
//! [`update`](AnimationManager::update) (once per frame) and the set of
//! running timelines in registration order. Nothing here blocks or spawns
//! threads: delays and durations are just later ticks.
//!
//! # Usage
//!
//! ```
//! use std::collections::HashMap;
//! use sidebar_scene::animation::{
//!     AnimatableProperty, Anim, AnimationManager, EasingFunction, RenderState, Timeline,
//!     Vector3,
//! };
//!
//! let mut targets = HashMap::new();
//! targets.insert("photo".to_string(), RenderState::default());
//!
//! let mut manager = AnimationManager::new();
//! let fade = Anim::new(
//!     "photo",
//!     AnimatableProperty::Transparent,
//!     200,
//!     EasingFunction::CubicOut,
//!     Vector3::alpha(1.0),
//!     Vector3::alpha(0.4),
//! );
//! let id = manager.start(Timeline::new().with(fade)).unwrap();
//!
//! while manager.has_active_animations() {
//!     manager.update(16.0, &mut targets);
//! }
//! assert!(!manager.is_running(id));
//! assert!((targets["photo"].opacity - 0.4).abs() < 1e-6);
//! ```

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::error::{AnimError, Result};
use super::events::{AnimationEventKind, EventQueue, TimelineEvent};
use super::target::AnimationTargets;
use super::timeline::{Animation, Timeline};
use super::types::{TimelineId, TimelineState};

/// Drives every scheduled timeline from one frame clock.
#[derive(Debug, Default)]
pub struct AnimationManager {
    /// Monotonic scheduler time in milliseconds.
    now_ms: f64,

    /// Running timelines. IDs grow monotonically, so iteration order is
    /// registration order.
    timelines: BTreeMap<TimelineId, Timeline>,

    /// Events emitted since the last drain.
    event_queue: EventQueue,
}

impl AnimationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scheduler time in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Start an animation on this scheduler.
    ///
    /// A bare driver is wrapped in a single-member timeline. The
    /// `TimelineEvent::Started` event is queued before this returns; an empty
    /// timeline also queues `Completed` immediately.
    pub fn start(&mut self, animation: impl Into<Animation>) -> Result<TimelineId> {
        let mut timeline = match animation.into() {
            Animation::Timeline(timeline) => timeline,
            Animation::Anim(anim) => Timeline::new().with(anim),
        };
        let timeline_id = timeline.id();

        timeline.start(self.now_ms)?;
        self.event_queue.push(TimelineEvent::Started { timeline_id });

        if timeline.state() == TimelineState::Completed {
            debug!("{} completed on start", timeline_id);
            self.event_queue.push(TimelineEvent::Completed { timeline_id });
        } else {
            debug!("{} started with {} members", timeline_id, timeline.len());
            self.timelines.insert(timeline_id, timeline);
        }
        Ok(timeline_id)
    }

    /// Cancel a running timeline.
    ///
    /// Its drivers stop writing immediately and `Completed` is never emitted;
    /// `TimelineEvent::Cancelled` is queued instead. Returns `false` if the
    /// timeline is not running (already finished, cancelled, or unknown).
    pub fn cancel(&mut self, timeline_id: TimelineId) -> bool {
        let Some(mut timeline) = self.timelines.remove(&timeline_id) else {
            return false;
        };
        timeline.cancel();
        debug!("{} cancelled", timeline_id);
        self.event_queue.push(TimelineEvent::Cancelled { timeline_id });
        true
    }

    /// Like [`cancel`](Self::cancel) but reports unknown timelines.
    pub fn try_cancel(&mut self, timeline_id: TimelineId) -> Result<()> {
        if self.cancel(timeline_id) {
            Ok(())
        } else {
            Err(AnimError::UnknownTimeline(timeline_id))
        }
    }

    /// Cancel everything that is running, in registration order.
    pub fn cancel_all(&mut self) {
        let ids: Vec<TimelineId> = self.timelines.keys().copied().collect();
        for id in ids {
            self.cancel(id);
        }
    }

    /// Advance the clock by `delta_ms` and tick every running timeline.
    ///
    /// All drivers are advanced before any completion is published, and
    /// completions are published in registration order.
    pub fn update(&mut self, delta_ms: f32, targets: &mut dyn AnimationTargets) {
        if delta_ms < 0.0 || !delta_ms.is_finite() {
            warn!("ignoring invalid frame delta {}", delta_ms);
        } else {
            self.now_ms += delta_ms as f64;
        }
        self.tick(targets);
    }

    /// Move the clock to an absolute time. Earlier times are ignored.
    pub fn advance_to(&mut self, now_ms: f64, targets: &mut dyn AnimationTargets) {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
        self.tick(targets);
    }

    fn tick(&mut self, targets: &mut dyn AnimationTargets) {
        if self.timelines.is_empty() {
            return;
        }

        let now_ms = self.now_ms;
        let mut anim_events = Vec::new();
        let mut completed = Vec::new();

        for (id, timeline) in self.timelines.iter_mut() {
            if timeline.tick(now_ms, targets, &mut anim_events) {
                completed.push(*id);
            }
        }

        for event in anim_events {
            self.event_queue.push(event);
        }

        for timeline_id in completed {
            self.timelines.remove(&timeline_id);
            debug!("{} completed", timeline_id);
            self.event_queue.push(TimelineEvent::Completed { timeline_id });
        }
    }

    /// Whether `timeline_id` is still running on this scheduler.
    pub fn is_running(&self, timeline_id: TimelineId) -> bool {
        self.timelines.contains_key(&timeline_id)
    }

    pub fn has_active_animations(&self) -> bool {
        !self.timelines.is_empty()
    }

    pub fn running_count(&self) -> usize {
        self.timelines.len()
    }

    /// Milliseconds until the scheduler next needs a tick.
    ///
    /// `None` when idle; `Some(0.0)` when a driver is interpolating. Hosts use
    /// this to schedule their next frame callback.
    pub fn next_tick_in_ms(&self) -> Option<f64> {
        self.timelines
            .values()
            .filter_map(|t| t.next_frame_in(self.now_ms))
            .reduce(f64::min)
    }

    // ========================================================================
    // Event Methods
    // ========================================================================

    /// Drain all pending events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = AnimationEventKind> + '_ {
        self.event_queue.drain()
    }

    pub fn pending_event_count(&self) -> usize {
        self.event_queue.len()
    }

    pub fn peek_event(&self) -> Option<&AnimationEventKind> {
        self.event_queue.peek()
    }

    pub fn pop_event(&mut self) -> Option<AnimationEventKind> {
        self.event_queue.pop()
    }

    pub fn clear_events(&mut self) {
        self.event_queue.clear();
    }
}
