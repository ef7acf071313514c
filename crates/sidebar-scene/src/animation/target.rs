//! Targets that drivers write into.
//!
//! Drivers never own their targets. They hold a target id and resolve it
//! through [`AnimationTargets`] on every tick; a target that no longer
//! resolves is skipped.

use std::collections::HashMap;

use super::types::AnimatableProperty;
use super::vector::Vector3;

/// Property setters a renderable item exposes to the animation core.
pub trait Renderable {
    fn set_position_offset(&mut self, offset: Vector3);
    fn set_opacity(&mut self, opacity: f32);
    fn set_scale(&mut self, scale: f32);
    fn set_visible(&mut self, visible: bool);

    fn position_offset(&self) -> Vector3;
    fn opacity(&self) -> f32;
    fn scale(&self) -> f32;
    fn is_visible(&self) -> bool;

    /// Write an interpolated value into the field selected by `property`.
    fn apply(&mut self, property: AnimatableProperty, value: Vector3) {
        match property {
            AnimatableProperty::Move => self.set_position_offset(value),
            AnimatableProperty::Transparent => self.set_opacity(value.z.clamp(0.0, 1.0)),
            AnimatableProperty::Scale => self.set_scale(value.x),
        }
    }
}

/// Resolves target ids to live renderables.
pub trait AnimationTargets {
    fn target_mut(&mut self, target_id: &str) -> Option<&mut dyn Renderable>;
}

/// Plain render state: offset, opacity, scale and visibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub offset: Vector3,
    pub opacity: f32,
    pub scale: f32,
    pub visible: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            offset: Vector3::ZERO,
            opacity: 1.0,
            scale: 1.0,
            visible: true,
        }
    }
}

impl Renderable for RenderState {
    fn set_position_offset(&mut self, offset: Vector3) {
        self.offset = offset;
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn position_offset(&self) -> Vector3 {
        self.offset
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

impl AnimationTargets for HashMap<String, RenderState> {
    fn target_mut(&mut self, target_id: &str) -> Option<&mut dyn Renderable> {
        self.get_mut(target_id).map(|r| r as &mut dyn Renderable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_routes_by_property() {
        let mut state = RenderState::default();

        state.apply(AnimatableProperty::Move, Vector3::offset(0.0, -40.0));
        assert_eq!(state.offset, Vector3::offset(0.0, -40.0));

        state.apply(AnimatableProperty::Transparent, Vector3::alpha(1.4));
        assert_eq!(state.opacity, 1.0);

        state.apply(AnimatableProperty::Scale, Vector3::scale(0.9));
        assert!((state.scale - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_map_resolves_targets() {
        let mut targets = HashMap::new();
        targets.insert("photo".to_string(), RenderState::default());

        assert!(targets.target_mut("photo").is_some());
        assert!(targets.target_mut("missing").is_none());
    }
}
