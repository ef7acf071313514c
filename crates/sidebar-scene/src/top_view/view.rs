//! The top bar orchestrator.
//!
//! `TopView` owns the top bar scene (surface, shadow line, disable overlay
//! and items), an [`AnimationManager`] and the [`StatusRegistry`] for its
//! transitions. Every operation starts timelines on the manager and returns;
//! completions and cancellations come back as events, handled after each
//! operation and after each [`update`](TopView::update).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sidebar_config::{AnimationConfig, SidebarConfig};
use tracing::{debug, error, info, warn};

use crate::animation::{
    AnimatableProperty, Anim, AnimationEventKind, AnimationManager, AnimationTargets,
    EasingFunction, RenderState, Renderable, StatusFlag, StatusRegistry, Timeline, TimelineEvent,
    TimelineId, Vector3,
};

use super::controller::{ContentController, ContentType, SidebarStatus};
use super::item::{DimSpaceView, ItemStyle, TopItem, TopItemView};

pub const SURFACE_ID: &str = "top_view";
pub const SHADOW_LINE_ID: &str = "top_view_shadow_line";
pub const DISABLE_VIEW_ID: &str = "topbar_disable_view";
pub const LEFT_SPACE_ID: &str = "top_dim_view_left";
pub const PHOTO_ID: &str = "photo";
pub const FILE_ID: &str = "file";
pub const CLIPBOARD_ID: &str = "clipboard";
pub const RIGHT_SPACE_ID: &str = "top_dim_view_right";

/// Surface background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Background {
    #[default]
    Transparent,
    Solid,
}

/// Result of [`TopView::on_item_click`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A transition is in flight; nothing happened.
    Blocked,
    /// Not a content item, or nothing to do for it.
    Ignored,
    /// The content panel was asked to show this type.
    Selected(ContentType),
    /// The content panel was dismissed.
    Dismissed,
}

/// Where the top bar is, derived from running transitions and the
/// controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopViewState {
    Normal,
    TransitioningIn,
    ContentShown,
    TransitioningOut,
    Hidden,
    Entering,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Enter,
    Exit,
    Click,
    Resume,
    DimAll,
    Enable,
}

impl Transition {
    fn flag(self) -> Option<StatusFlag> {
        match self {
            Self::Enter => Some(StatusFlag::TopViewEnter),
            Self::Exit => Some(StatusFlag::TopViewExit),
            Self::Click => Some(StatusFlag::TopViewClick),
            Self::Resume => Some(StatusFlag::TopViewResume),
            Self::DimAll | Self::Enable => None,
        }
    }

    /// Enter and exit raise their flag when the timeline starts; click and
    /// resume raise it before starting.
    fn flags_on_start(self) -> bool {
        matches!(self, Self::Enter | Self::Exit)
    }
}

/// Everything the top bar's timelines write into.
pub struct TopScene {
    pub surface: RenderState,
    pub shadow_line: RenderState,
    disable_view: DimSpaceView,
    items: Vec<Box<dyn TopItem>>,
}

impl TopScene {
    fn new(items: Vec<Box<dyn TopItem>>, style: ItemStyle) -> Self {
        Self {
            surface: RenderState {
                visible: false,
                ..RenderState::default()
            },
            shadow_line: RenderState {
                visible: false,
                ..RenderState::default()
            },
            disable_view: DimSpaceView::new(DISABLE_VIEW_ID, style),
            items,
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &dyn TopItem> {
        self.items.iter().map(|item| item.as_ref() as &dyn TopItem)
    }

    pub fn item(&self, id: &str) -> Option<&dyn TopItem> {
        self.items().find(|item| item.id() == id)
    }

    fn item_mut(&mut self, id: &str) -> Option<&mut dyn TopItem> {
        for item in self.items.iter_mut() {
            if item.id() == id {
                return Some(item.as_mut());
            }
        }
        None
    }

    pub fn disable_view(&self) -> &DimSpaceView {
        &self.disable_view
    }
}

impl AnimationTargets for TopScene {
    fn target_mut(&mut self, target_id: &str) -> Option<&mut dyn Renderable> {
        match target_id {
            SURFACE_ID => Some(&mut self.surface),
            SHADOW_LINE_ID => Some(&mut self.shadow_line),
            DISABLE_VIEW_ID => Some(&mut self.disable_view),
            _ => {
                for item in self.items.iter_mut() {
                    if item.id() == target_id {
                        return Some(item.as_renderable_mut());
                    }
                }
                None
            }
        }
    }
}

/// The sidebar top bar.
pub struct TopView<C: ContentController> {
    controller: C,
    timing: AnimationConfig,
    scene: TopScene,
    item_types: Vec<(String, ContentType)>,
    manager: AnimationManager,
    status: StatusRegistry,
    transitions: BTreeMap<TimelineId, Transition>,
    background: Background,
    height: f32,
    enabled: bool,
    awaiting_layout: bool,
}

impl<C: ContentController> TopView<C> {
    /// A top bar with the standard items: left spacer, photos, files,
    /// clipboard, right spacer.
    pub fn new(controller: C, config: &SidebarConfig) -> Self {
        let style = ItemStyle::from_config(config);
        let icon = |id: &str| -> Box<dyn TopItem> { Box::new(TopItemView::new(id, style)) };
        let space = |id: &str| -> Box<dyn TopItem> { Box::new(DimSpaceView::new(id, style)) };
        let items = vec![
            (space(LEFT_SPACE_ID), ContentType::None),
            (icon(PHOTO_ID), ContentType::Photo),
            (icon(FILE_ID), ContentType::File),
            (icon(CLIPBOARD_ID), ContentType::Clipboard),
            (space(RIGHT_SPACE_ID), ContentType::None),
        ];
        Self::with_items(controller, config, items)
    }

    /// A top bar with a custom item set. Items mapped to
    /// `ContentType::None` take part in dim/resume but ignore clicks and
    /// stay put during the enter transition.
    pub fn with_items(
        controller: C,
        config: &SidebarConfig,
        items: Vec<(Box<dyn TopItem>, ContentType)>,
    ) -> Self {
        let style = ItemStyle::from_config(config);
        let item_types = items
            .iter()
            .map(|(item, content_type)| (item.id().to_string(), *content_type))
            .collect();
        let items = items.into_iter().map(|(item, _)| item).collect();

        Self {
            controller,
            timing: config.animation.clone(),
            scene: TopScene::new(items, style),
            item_types,
            manager: AnimationManager::new(),
            status: StatusRegistry::new(),
            transitions: BTreeMap::new(),
            background: Background::Transparent,
            height: 0.0,
            enabled: true,
            awaiting_layout: false,
        }
    }

    // ---- accessors ----

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub fn status(&self) -> &StatusRegistry {
        &self.status
    }

    pub fn scene(&self) -> &TopScene {
        &self.scene
    }

    pub fn item(&self, id: &str) -> Option<&dyn TopItem> {
        self.scene.item(id)
    }

    pub fn surface(&self) -> &RenderState {
        &self.scene.surface
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn is_shadow_line_visible(&self) -> bool {
        self.scene.shadow_line.visible
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn content_type_of(&self, item_id: &str) -> Option<ContentType> {
        self.item_types
            .iter()
            .find(|(id, _)| id == item_id)
            .map(|(_, content_type)| *content_type)
    }

    pub fn state(&self) -> TopViewState {
        if self.is_playing(Transition::Exit) {
            TopViewState::Exiting
        } else if self.awaiting_layout || self.is_playing(Transition::Enter) {
            TopViewState::Entering
        } else if !self.scene.surface.visible {
            TopViewState::Hidden
        } else if self.is_playing(Transition::Click) {
            TopViewState::TransitioningIn
        } else if self.is_playing(Transition::Resume) {
            TopViewState::TransitioningOut
        } else if self.controller.current_content_type() != ContentType::None {
            TopViewState::ContentShown
        } else {
            TopViewState::Normal
        }
    }

    /// `show(true)` was called and the enter waits for `on_layout`.
    pub fn is_awaiting_layout(&self) -> bool {
        self.awaiting_layout
    }

    /// No timeline is running and no enter is waiting for layout.
    pub fn is_idle(&self) -> bool {
        !self.manager.has_active_animations() && !self.awaiting_layout
    }

    /// Milliseconds until the next frame matters, or `None` when nothing runs.
    pub fn next_tick_in_ms(&self) -> Option<f64> {
        self.manager.next_tick_in_ms()
    }

    // ---- frame clock ----

    /// Advance every running transition by `delta_ms`.
    pub fn update(&mut self, delta_ms: f32) {
        self.manager.update(delta_ms, &mut self.scene);
        self.process_events();
    }

    /// Tick frames of `frame_ms` until no timeline is running. Returns the
    /// number of frames.
    pub fn run_transitions(&mut self, frame_ms: f32) -> usize {
        if frame_ms <= 0.0 || !frame_ms.is_finite() {
            warn!("cannot run transitions with frame interval {}", frame_ms);
            return 0;
        }
        let mut frames = 0;
        while self.manager.has_active_animations() {
            self.update(frame_ms);
            frames += 1;
        }
        frames
    }

    // ---- operations ----

    /// Route a click on the item `item_id`.
    pub fn on_item_click(&mut self, item_id: &str) -> ClickOutcome {
        if !self.status.can_show_content_view() {
            self.status.dump_status();
            return ClickOutcome::Blocked;
        }

        let content_type = match self.content_type_of(item_id) {
            Some(ContentType::None) | None => {
                debug!("click on {} ignored, not a content item", item_id);
                return ClickOutcome::Ignored;
            }
            Some(content_type) => content_type,
        };

        let current = self.controller.current_content_type();
        if current == ContentType::None {
            info!("showing {} content", content_type);
            self.status.set_status(StatusFlag::TopViewClick, true);
            self.controller.show_content(content_type);

            let mut timeline = Timeline::new();
            for item in self.scene.items() {
                let animation = if item.id() == item_id {
                    item.highlight()
                } else {
                    item.dim()
                };
                timeline = timeline.with(animation);
            }
            self.launch(Transition::Click, timeline);
            self.process_events();
            ClickOutcome::Selected(content_type)
        } else if current == content_type {
            info!("dismissing {} content", content_type);
            self.controller.dismiss_content(true);
            self.resume_to_normal();
            ClickOutcome::Dismissed
        } else {
            debug!(
                "click on {} while {} content is shown, never happen",
                item_id, current
            );
            ClickOutcome::Ignored
        }
    }

    /// Return every item to neutral. Dropped (`false`) while a resume is
    /// already playing.
    pub fn resume_to_normal(&mut self) -> bool {
        if self.status.get_status(StatusFlag::TopViewResume) {
            error!("{} is true, return !", StatusFlag::TopViewResume);
            return false;
        }
        self.status.set_status(StatusFlag::TopViewResume, true);

        let timeline = self
            .scene
            .items()
            .fold(Timeline::new(), |timeline, item| timeline.with(item.resume()));
        let started = self.launch(Transition::Resume, timeline).is_some();
        self.process_events();
        started
    }

    /// Dim every item. Sets no flag.
    pub fn dim_all(&mut self) {
        let timeline = self
            .scene
            .items()
            .fold(Timeline::new(), |timeline, item| timeline.with(item.dim()));
        self.launch(Transition::DimAll, timeline);
        self.process_events();
    }

    /// Sidebar-wide status change pushed by the host.
    pub fn request_status(&mut self, status: SidebarStatus) {
        match status {
            SidebarStatus::Normal => {
                self.resume_to_normal();
            }
            SidebarStatus::DimRequested => self.dim_all(),
        }
    }

    /// Report a content panel transition starting (`true`) or ending
    /// (`false`). Only `ContentViewEnter` and `ContentViewExit` are accepted;
    /// returns `false` for any top bar flag, which this view owns.
    pub fn set_content_status(&mut self, flag: StatusFlag, active: bool) -> bool {
        match flag {
            StatusFlag::ContentViewEnter | StatusFlag::ContentViewExit => {
                debug!("{} = {}", flag, active);
                self.status.set_status(flag, active);
                true
            }
            _ => {
                warn!("{} is owned by the top view, ignoring external update", flag);
                false
            }
        }
    }

    /// Enable or disable the top bar by lifting or lowering the disable
    /// overlay.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        let overlay = if enabled {
            self.scene.disable_view.resume()
        } else {
            self.scene.disable_view.dim()
        };
        self.launch(Transition::Enable, Timeline::new().with(overlay));
        self.process_events();
    }

    /// Show or hide the top bar.
    ///
    /// Showing waits for the next [`on_layout`](Self::on_layout) before the
    /// enter transition starts, since it needs the surface height.
    pub fn show(&mut self, show: bool) {
        if show {
            if let Some(exit) = self.playing(Transition::Exit) {
                error!("show requested while exiting, cancelling exit");
                self.manager.cancel(exit);
            }
            if let Some(enter) = self.playing(Transition::Enter) {
                debug!("show requested while entering, restarting enter");
                self.manager.cancel(enter);
            }
            self.scene.surface.visible = true;
            self.awaiting_layout = true;
        } else {
            if self.awaiting_layout {
                debug!("dropping pending enter");
                self.awaiting_layout = false;
            }
            if let Some(enter) = self.playing(Transition::Enter) {
                self.manager.cancel(enter);
            }
            if self.is_playing(Transition::Exit) {
                debug!("hide requested while exiting, ignored");
            } else {
                self.start_exit();
            }
        }
        self.process_events();
    }

    /// Layout pass with the surface's measured height.
    pub fn on_layout(&mut self, height: f32) {
        self.height = height;
        if self.awaiting_layout {
            self.awaiting_layout = false;
            self.start_enter();
            self.process_events();
        }
    }

    /// Touch on the top bar outside any item. Returns `true` if consumed.
    pub fn on_touch_down(&mut self) -> bool {
        if self.controller.current_content_type() != ContentType::None
            && self.status.can_show_content_view()
        {
            self.controller.resume_sidebar();
            return true;
        }
        false
    }

    // ---- transitions ----

    fn content_item_ids(&self) -> Vec<String> {
        self.item_types
            .iter()
            .filter(|(_, content_type)| *content_type != ContentType::None)
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn start_enter(&mut self) {
        if let Some(enter) = self.playing(Transition::Enter) {
            self.manager.cancel(enter);
        }
        let height = self.height;
        let duration = self.timing.item_duration_ms;
        let hidden_offset = Vector3::offset(0.0, -height);

        self.scene.shadow_line.visible = false;
        self.scene.shadow_line.opacity = 0.0;
        self.scene.surface.visible = false;
        self.scene.surface.opacity = 0.0;

        let mut timeline = Timeline::new();
        for id in self.content_item_ids() {
            if let Some(item) = self.scene.item_mut(&id) {
                item.set_opacity(0.0);
                item.set_position_offset(hidden_offset);
            }
            timeline = timeline
                .with(Anim::new(
                    &id,
                    AnimatableProperty::Move,
                    duration,
                    EasingFunction::CubicOut,
                    hidden_offset,
                    Vector3::ZERO,
                ))
                .with(Anim::new(
                    &id,
                    AnimatableProperty::Transparent,
                    duration,
                    EasingFunction::CubicOut,
                    Vector3::alpha(0.0),
                    Vector3::alpha(1.0),
                ));
        }

        let shadow_line = Anim::new(
            SHADOW_LINE_ID,
            AnimatableProperty::Transparent,
            self.timing.shadow_line_duration_ms,
            EasingFunction::CubicOut,
            Vector3::alpha(0.0),
            Vector3::alpha(1.0),
        )
        .with_delay(self.timing.shadow_line_delay_ms)
        .reveal_on_start();

        let surface = Anim::new(
            SURFACE_ID,
            AnimatableProperty::Transparent,
            self.timing.background_duration_ms,
            EasingFunction::CubicOut,
            Vector3::alpha(0.0),
            Vector3::alpha(1.0),
        )
        .with_delay(self.timing.background_delay_ms)
        .reveal_on_start();

        debug!("top view enter, height {}", height);
        self.launch(Transition::Enter, timeline.with(shadow_line).with(surface));
    }

    fn on_enter_complete(&mut self) {
        self.background = Background::Solid;
        for id in self.content_item_ids() {
            if let Some(item) = self.scene.item_mut(&id) {
                item.set_opacity(1.0);
                item.set_position_offset(Vector3::ZERO);
            }
        }
        if self.controller.sidebar_status() == SidebarStatus::DimRequested {
            self.dim_all();
        }
    }

    fn start_exit(&mut self) {
        let duration = self.timing.exit_duration_ms;
        self.background = Background::Transparent;
        self.scene.shadow_line.visible = false;

        let timeline = Timeline::new()
            .with(Anim::new(
                SURFACE_ID,
                AnimatableProperty::Move,
                duration,
                EasingFunction::Linear,
                Vector3::ZERO,
                Vector3::offset(0.0, -self.height),
            ))
            .with(Anim::new(
                SURFACE_ID,
                AnimatableProperty::Transparent,
                duration,
                EasingFunction::CubicOut,
                Vector3::alpha(1.0),
                Vector3::alpha(0.0),
            ));

        debug!("top view exit");
        self.launch(Transition::Exit, timeline);
    }

    fn on_exit_complete(&mut self) {
        self.resume_to_normal();
        self.scene.surface.offset = Vector3::ZERO;
        self.scene.surface.opacity = 1.0;
        self.scene.surface.visible = false;
        for id in self.content_item_ids() {
            if let Some(item) = self.scene.item_mut(&id) {
                item.set_position_offset(Vector3::ZERO);
            }
        }
    }

    // ---- bookkeeping ----

    fn playing(&self, kind: Transition) -> Option<TimelineId> {
        self.transitions
            .iter()
            .find(|(_, transition)| **transition == kind)
            .map(|(id, _)| *id)
    }

    fn is_playing(&self, kind: Transition) -> bool {
        self.playing(kind).is_some()
    }

    fn launch(&mut self, kind: Transition, timeline: Timeline) -> Option<TimelineId> {
        match self.manager.start(timeline) {
            Ok(timeline_id) => {
                self.transitions.insert(timeline_id, kind);
                Some(timeline_id)
            }
            Err(err) => {
                error!("failed to start {:?} transition: {}", kind, err);
                if let Some(flag) = kind.flag() {
                    self.status.set_status(flag, false);
                }
                None
            }
        }
    }

    fn process_events(&mut self) {
        loop {
            let events: Vec<AnimationEventKind> = self.manager.drain_events().collect();
            if events.is_empty() {
                break;
            }
            for event in events {
                if let AnimationEventKind::Timeline(event) = event {
                    self.handle_timeline_event(event);
                }
            }
        }
    }

    fn handle_timeline_event(&mut self, event: TimelineEvent) {
        match event {
            TimelineEvent::Started { timeline_id } => {
                let kind = self.transitions.get(&timeline_id).copied();
                if let Some(flag) = kind.filter(|k| k.flags_on_start()).and_then(Transition::flag) {
                    self.status.set_status(flag, true);
                }
            }
            TimelineEvent::Completed { timeline_id } => {
                let Some(kind) = self.transitions.remove(&timeline_id) else {
                    return;
                };
                if let Some(flag) = kind.flag() {
                    self.status.set_status(flag, false);
                }
                match kind {
                    Transition::Enter => self.on_enter_complete(),
                    Transition::Exit => self.on_exit_complete(),
                    _ => {}
                }
            }
            TimelineEvent::Cancelled { timeline_id } => {
                let Some(kind) = self.transitions.remove(&timeline_id) else {
                    return;
                };
                debug!("{:?} transition cancelled", kind);
                if let Some(flag) = kind.flag() {
                    self.status.set_status(flag, false);
                }
                if kind == Transition::Exit {
                    self.scene.surface.offset = Vector3::ZERO;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::top_view::controller::{ControllerCall, LocalContentController};

    fn view() -> TopView<LocalContentController> {
        TopView::new(LocalContentController::new(), &SidebarConfig::default())
    }

    fn shown() -> TopView<LocalContentController> {
        let mut view = view();
        view.show(true);
        view.on_layout(120.0);
        view.run_transitions(16.0);
        view
    }

    #[test]
    fn test_starts_hidden_and_idle() {
        let view = view();
        assert_eq!(view.state(), TopViewState::Hidden);
        assert!(view.is_idle());
        assert_eq!(view.background(), Background::Transparent);
    }

    #[test]
    fn test_enter_waits_for_layout() {
        let mut view = view();
        view.show(true);
        assert_eq!(view.state(), TopViewState::Entering);
        assert!(!view.is_idle());
        assert!(!view.status().get_status(StatusFlag::TopViewEnter));

        view.on_layout(120.0);
        assert!(view.status().get_status(StatusFlag::TopViewEnter));
        assert_eq!(
            view.item(PHOTO_ID).map(|item| item.position_offset()),
            Some(Vector3::offset(0.0, -120.0))
        );
        assert!(!view.surface().visible);
    }

    #[test]
    fn test_enter_completes_to_normal() {
        let view = shown();
        assert_eq!(view.state(), TopViewState::Normal);
        assert!(view.is_idle());
        assert!(view.status().is_settled());
        assert_eq!(view.background(), Background::Solid);
        assert!(view.is_shadow_line_visible());
        assert!(view.surface().visible);
        assert_eq!(view.surface().opacity, 1.0);
        for id in [PHOTO_ID, FILE_ID, CLIPBOARD_ID] {
            let item = view.item(id).unwrap();
            assert_eq!(item.opacity(), 1.0);
            assert_eq!(item.position_offset(), Vector3::ZERO);
        }
    }

    #[test]
    fn test_surface_hidden_until_background_delay() {
        let mut view = view();
        view.show(true);
        view.on_layout(120.0);
        view.update(100.0);
        assert!(!view.surface().visible);
        view.update(30.0);
        assert!(view.surface().visible);
    }

    #[test]
    fn test_enter_dims_when_requested() {
        let mut view = view();
        view.controller_mut().status = SidebarStatus::DimRequested;
        view.show(true);
        view.on_layout(120.0);
        view.run_transitions(16.0);

        let dim_alpha = SidebarConfig::default().items.dim_alpha;
        assert!((view.item(FILE_ID).unwrap().opacity() - dim_alpha).abs() < 1e-6);
        assert!(view.status().is_settled());
    }

    #[test]
    fn test_spacer_click_is_ignored() {
        let mut view = shown();
        assert_eq!(view.on_item_click(LEFT_SPACE_ID), ClickOutcome::Ignored);
        assert_eq!(view.on_item_click("missing"), ClickOutcome::Ignored);
        assert!(view.controller().calls.is_empty());
    }

    #[test]
    fn test_click_blocked_while_entering() {
        let mut view = view();
        view.show(true);
        view.on_layout(120.0);
        assert_eq!(view.on_item_click(PHOTO_ID), ClickOutcome::Blocked);
        assert!(view.controller().calls.is_empty());
    }

    #[test]
    fn test_mismatched_click_is_ignored() {
        let mut view = shown();
        view.on_item_click(PHOTO_ID);
        view.run_transitions(16.0);

        assert_eq!(view.on_item_click(FILE_ID), ClickOutcome::Ignored);
        assert_eq!(view.controller().current, ContentType::Photo);
        assert_eq!(view.state(), TopViewState::ContentShown);
    }

    #[test]
    fn test_touch_down_resumes_sidebar_when_content_shown() {
        let mut view = shown();
        assert!(!view.on_touch_down());

        view.on_item_click(CLIPBOARD_ID);
        assert!(!view.on_touch_down(), "click transition still playing");

        view.run_transitions(16.0);
        assert!(view.on_touch_down());
        assert_eq!(view.controller().count(ControllerCall::ResumeSidebar), 1);
    }

    #[test]
    fn test_set_enabled_moves_disable_overlay() {
        let mut view = shown();
        let shade = SidebarConfig::default().items.shade_alpha;

        view.set_enabled(false);
        view.run_transitions(16.0);
        assert!(!view.is_enabled());
        assert!((view.scene().disable_view().opacity() - shade).abs() < 1e-6);

        view.set_enabled(true);
        view.run_transitions(16.0);
        assert_eq!(view.scene().disable_view().opacity(), 0.0);
        assert!(view.status().is_settled());
    }

    #[test]
    fn test_request_status() {
        let mut view = shown();
        view.request_status(SidebarStatus::DimRequested);
        view.run_transitions(16.0);
        assert!(view.item(PHOTO_ID).unwrap().opacity() < 1.0);

        view.request_status(SidebarStatus::Normal);
        assert!(view.status().get_status(StatusFlag::TopViewResume));
        view.run_transitions(16.0);
        assert_eq!(view.item(PHOTO_ID).unwrap().opacity(), 1.0);
        assert!(view.status().is_settled());
    }

    #[test]
    fn test_show_during_exit_cancels_exit() {
        let mut view = shown();
        view.show(false);
        view.update(50.0);
        assert_eq!(view.state(), TopViewState::Exiting);

        view.show(true);
        assert!(!view.status().get_status(StatusFlag::TopViewExit));
        assert_eq!(view.surface().offset, Vector3::ZERO);
        assert_eq!(view.state(), TopViewState::Entering);

        view.on_layout(120.0);
        view.run_transitions(16.0);
        assert_eq!(view.state(), TopViewState::Normal);
        assert!(view.status().is_settled());
    }

    #[test]
    fn test_run_transitions_rejects_bad_interval() {
        let mut view = view();
        view.show(true);
        view.on_layout(120.0);
        assert_eq!(view.run_transitions(0.0), 0);
        assert_eq!(view.run_transitions(f32::NAN), 0);
    }

    #[test]
    fn test_second_show_restarts_enter_and_keeps_gate_closed() {
        let mut view = view();
        view.show(true);
        view.on_layout(120.0);
        view.update(100.0);

        view.show(true);
        view.on_layout(120.0);
        view.update(230.0);

        assert_eq!(view.state(), TopViewState::Entering);
        assert!(view.status().get_status(StatusFlag::TopViewEnter));
        assert!(!view.status().can_show_content_view());
        assert_eq!(view.on_item_click(PHOTO_ID), ClickOutcome::Blocked);
        assert!(view.controller().calls.is_empty());

        view.run_transitions(16.0);
        assert_eq!(view.state(), TopViewState::Normal);
        assert!(view.status().is_settled());
        assert_eq!(view.item(PHOTO_ID).unwrap().position_offset(), Vector3::ZERO);
    }

    #[test]
    fn test_repeated_hide_keeps_running_exit() {
        let mut view = shown();
        view.show(false);
        view.update(100.0);
        let surface = *view.surface();
        assert!(surface.opacity < 1.0);

        view.show(false);
        assert_eq!(*view.surface(), surface);
        assert!(view.status().get_status(StatusFlag::TopViewExit));

        view.update(16.0);
        assert!(view.surface().opacity <= surface.opacity);
        assert!(view.surface().offset.y <= surface.offset.y);

        view.run_transitions(16.0);
        assert_eq!(view.state(), TopViewState::Hidden);
        assert!(view.status().is_settled());
    }

    #[test]
    fn test_content_flags_block_clicks_and_touch() {
        for flag in [StatusFlag::ContentViewEnter, StatusFlag::ContentViewExit] {
            let mut view = shown();
            view.on_item_click(FILE_ID);
            view.run_transitions(16.0);

            assert!(view.set_content_status(flag, true));
            assert_eq!(view.on_item_click(FILE_ID), ClickOutcome::Blocked);
            assert!(!view.on_touch_down());

            assert!(view.set_content_status(flag, false));
            assert!(view.on_touch_down());
            assert_eq!(view.on_item_click(FILE_ID), ClickOutcome::Dismissed);
        }
    }

    #[test]
    fn test_top_bar_flags_are_not_externally_settable() {
        let mut view = shown();
        assert!(!view.set_content_status(StatusFlag::TopViewClick, true));
        assert!(view.status().is_settled());
    }
}
