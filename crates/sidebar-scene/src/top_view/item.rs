//! Items that take part in top bar transitions.
//!
//! Every item exposes the same three semantic operations. Each returns an
//! animation ready to start, running from the item's current values:
//! - `dim`: fade back into the background
//! - `highlight`: become the emphasized item
//! - `resume`: return to the neutral state

use sidebar_config::SidebarConfig;

use crate::animation::{
    AnimatableProperty, Anim, Animation, EasingFunction, RenderState, Renderable, Timeline,
    Vector3,
};

/// Capability shared by every item in the top bar.
pub trait TopItem: Renderable {
    fn id(&self) -> &str;
    fn dim(&self) -> Animation;
    fn highlight(&self) -> Animation;
    fn resume(&self) -> Animation;

    fn as_renderable_mut(&mut self) -> &mut dyn Renderable;
}

/// Styling applied by item operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStyle {
    pub duration_ms: u32,
    pub dim_alpha: f32,
    pub highlight_scale: f32,
    pub shade_alpha: f32,
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self::from_config(&SidebarConfig::default())
    }
}

impl ItemStyle {
    pub fn from_config(config: &SidebarConfig) -> Self {
        Self {
            duration_ms: config.animation.item_duration_ms,
            dim_alpha: config.items.dim_alpha,
            highlight_scale: config.items.highlight_scale,
            shade_alpha: config.items.shade_alpha,
        }
    }
}

fn fade(target: &str, duration_ms: u32, from: f32, to: f32) -> Anim {
    Anim::new(
        target,
        AnimatableProperty::Transparent,
        duration_ms,
        EasingFunction::CubicOut,
        Vector3::alpha(from),
        Vector3::alpha(to),
    )
}

macro_rules! delegate_renderable {
    ($ty:ty) => {
        impl Renderable for $ty {
            fn set_position_offset(&mut self, offset: Vector3) {
                self.render.set_position_offset(offset);
            }
            fn set_opacity(&mut self, opacity: f32) {
                self.render.set_opacity(opacity);
            }
            fn set_scale(&mut self, scale: f32) {
                self.render.set_scale(scale);
            }
            fn set_visible(&mut self, visible: bool) {
                self.render.set_visible(visible);
            }
            fn position_offset(&self) -> Vector3 {
                self.render.position_offset()
            }
            fn opacity(&self) -> f32 {
                self.render.opacity()
            }
            fn scale(&self) -> f32 {
                self.render.scale()
            }
            fn is_visible(&self) -> bool {
                self.render.is_visible()
            }
        }
    };
}

/// An icon item (photos, files, clipboard).
///
/// Neutral: opacity 1, scale 1. Dimmed: opacity `dim_alpha`. Highlighted:
/// opacity 1, scale `highlight_scale`.
#[derive(Debug, Clone)]
pub struct TopItemView {
    id: String,
    render: RenderState,
    style: ItemStyle,
}

impl TopItemView {
    pub fn new(id: impl Into<String>, style: ItemStyle) -> Self {
        Self {
            id: id.into(),
            render: RenderState::default(),
            style,
        }
    }

    fn transition_to(&self, opacity: f32, scale: f32) -> Animation {
        let duration = self.style.duration_ms;
        Timeline::new()
            .with(fade(&self.id, duration, self.render.opacity, opacity))
            .with(Anim::new(
                &self.id,
                AnimatableProperty::Scale,
                duration,
                EasingFunction::CubicOut,
                Vector3::scale(self.render.scale),
                Vector3::scale(scale),
            ))
            .into()
    }
}

delegate_renderable!(TopItemView);

impl TopItem for TopItemView {
    fn id(&self) -> &str {
        &self.id
    }

    fn dim(&self) -> Animation {
        self.transition_to(self.style.dim_alpha, 1.0)
    }

    fn highlight(&self) -> Animation {
        self.transition_to(1.0, self.style.highlight_scale)
    }

    fn resume(&self) -> Animation {
        self.transition_to(1.0, 1.0)
    }

    fn as_renderable_mut(&mut self) -> &mut dyn Renderable {
        self
    }
}

/// A spacer or overlay that darkens when dimmed.
///
/// Its opacity is the shade layer: 0 when neutral, `shade_alpha` when
/// dimmed. Highlighting a spacer is the same as resuming it.
#[derive(Debug, Clone)]
pub struct DimSpaceView {
    id: String,
    render: RenderState,
    style: ItemStyle,
}

impl DimSpaceView {
    pub fn new(id: impl Into<String>, style: ItemStyle) -> Self {
        Self {
            id: id.into(),
            render: RenderState {
                opacity: 0.0,
                ..RenderState::default()
            },
            style,
        }
    }
}

delegate_renderable!(DimSpaceView);

impl TopItem for DimSpaceView {
    fn id(&self) -> &str {
        &self.id
    }

    fn dim(&self) -> Animation {
        fade(
            &self.id,
            self.style.duration_ms,
            self.render.opacity,
            self.style.shade_alpha,
        )
        .into()
    }

    fn highlight(&self) -> Animation {
        self.resume()
    }

    fn resume(&self) -> Animation {
        fade(&self.id, self.style.duration_ms, self.render.opacity, 0.0).into()
    }

    fn as_renderable_mut(&mut self) -> &mut dyn Renderable {
        self
    }
}
