//! Animation core: property drivers, timelines and the scheduling loop.
//!
//! This module provides:
//! - **Drivers** (`Anim`): interpolate one property of one target
//! - **Timelines**: run drivers and nested timelines as one transition
//! - **Scheduler** (`AnimationManager`): single cooperative frame loop
//! - **Events**: lifecycle notifications drained after each update
//! - **Status flags**: advisory bookkeeping of in-flight transitions
//!
//! # Architecture
//!
//! ```text
//! AnimationManager (clock + event queue)
//!   └── Timeline (aggregate state, pending count)
//!         ├── Anim ──writes──> AnimationTargets ──> dyn Renderable
//!         └── Timeline (nested)
//! ```

pub mod anim;
pub mod easing;
pub mod error;
pub mod events;
pub mod interpolate;
pub mod manager;
pub mod status;
pub mod target;
pub mod timeline;
pub mod types;
pub mod vector;

pub use anim::{Anim, AnimStep};
pub use easing::EasingFunction;
pub use error::{AnimError, Result};
pub use events::{AnimEvent, AnimationEventKind, EventQueue, TimelineEvent};
pub use interpolate::Interpolate;
pub use manager::AnimationManager;
pub use status::{StatusFlag, StatusRegistry};
pub use target::{AnimationTargets, RenderState, Renderable};
pub use timeline::{Animation, Timeline};
pub use types::{AnimatableProperty, AnimationId, AnimationState, TimelineId, TimelineState};
pub use vector::Vector3;
