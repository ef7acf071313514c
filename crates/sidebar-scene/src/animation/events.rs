//! Animation events for lifecycle notifications.
//!
//! Drivers and scheduled timelines report their lifecycle as events instead
//! of invoking callbacks. The scheduler pushes them onto an [`EventQueue`]
//! during `start`, `cancel` and `update`; the owner drains the queue after
//! each call and reacts to them.
//!
//! # Usage
//!
//! ```ignore
//! manager.update(16.0, &mut targets);
//! for event in manager.drain_events() {
//!     if let AnimationEventKind::Timeline(TimelineEvent::Completed { timeline_id }) = event {
//!         // release the status flag guarding this transition
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::types::{AnimatableProperty, AnimationId, TimelineId};

/// Event emitted when a single driver changes state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimEvent {
    /// The driver's delay elapsed and it began writing its target.
    Started {
        animation_id: AnimationId,
        target_id: String,
        property: AnimatableProperty,
    },
    /// The driver reached its end value.
    Ended {
        animation_id: AnimationId,
        target_id: String,
        property: AnimatableProperty,
    },
}

impl AnimEvent {
    pub fn target_id(&self) -> &str {
        match self {
            Self::Started { target_id, .. } | Self::Ended { target_id, .. } => target_id,
        }
    }

    pub fn animation_id(&self) -> AnimationId {
        match self {
            Self::Started { animation_id, .. } | Self::Ended { animation_id, .. } => *animation_id,
        }
    }

    pub fn property(&self) -> AnimatableProperty {
        match self {
            Self::Started { property, .. } | Self::Ended { property, .. } => *property,
        }
    }
}

/// Event emitted when a scheduled timeline changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEvent {
    /// Emitted synchronously from `start`.
    Started { timeline_id: TimelineId },
    /// Every member finished naturally. Emitted at most once.
    Completed { timeline_id: TimelineId },
    /// The timeline was cancelled; `Completed` will never follow.
    Cancelled { timeline_id: TimelineId },
}

impl TimelineEvent {
    pub fn timeline_id(&self) -> TimelineId {
        match self {
            Self::Started { timeline_id }
            | Self::Completed { timeline_id }
            | Self::Cancelled { timeline_id } => *timeline_id,
        }
    }
}

/// Wrapper enum for driver and timeline events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnimationEventKind {
    Anim(AnimEvent),
    Timeline(TimelineEvent),
}

impl AnimationEventKind {
    /// Check if this is a "started" event.
    pub fn is_started(&self) -> bool {
        matches!(
            self,
            Self::Anim(AnimEvent::Started { .. }) | Self::Timeline(TimelineEvent::Started { .. })
        )
    }

    /// Check if this is an "ended" / "completed" event.
    pub fn is_ended(&self) -> bool {
        matches!(
            self,
            Self::Anim(AnimEvent::Ended { .. }) | Self::Timeline(TimelineEvent::Completed { .. })
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Timeline(TimelineEvent::Cancelled { .. }))
    }

    /// The timeline this event belongs to, if it is a timeline event.
    pub fn timeline_id(&self) -> Option<TimelineId> {
        match self {
            Self::Timeline(e) => Some(e.timeline_id()),
            Self::Anim(_) => None,
        }
    }
}

impl From<AnimEvent> for AnimationEventKind {
    fn from(event: AnimEvent) -> Self {
        Self::Anim(event)
    }
}

impl From<TimelineEvent> for AnimationEventKind {
    fn from(event: TimelineEvent) -> Self {
        Self::Timeline(event)
    }
}

/// Queue collecting events between drains.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<AnimationEventKind>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push any event onto the queue.
    pub fn push(&mut self, event: impl Into<AnimationEventKind>) {
        self.events.push_back(event.into());
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn pop(&mut self) -> Option<AnimationEventKind> {
        self.events.pop_front()
    }

    /// Drain all events from the queue, in emission order.
    pub fn drain(&mut self) -> impl Iterator<Item = AnimationEventKind> + '_ {
        self.events.drain(..)
    }

    pub fn peek(&self) -> Option<&AnimationEventKind> {
        self.events.front()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Driver events for a specific target.
    pub fn events_for_target(&self, target_id: &str) -> Vec<&AnimEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AnimationEventKind::Anim(a) if a.target_id() == target_id => Some(a),
                _ => None,
            })
            .collect()
    }
}
