use anyhow::{Result, ensure};
use sidebar_config::SidebarConfig;
use sidebar_scene::animation::{Renderable, StatusFlag, Vector3};
use sidebar_scene::top_view::{
    CLIPBOARD_ID, ClickOutcome, ContentType, ControllerCall, FILE_ID, LEFT_SPACE_ID,
    LocalContentController, PHOTO_ID, RIGHT_SPACE_ID, TopView, TopViewState,
};

const FRAME_MS: f32 = 16.0;
const HEIGHT: f32 = 120.0;

fn shown_view() -> TopView<LocalContentController> {
    let mut view = TopView::new(LocalContentController::new(), &SidebarConfig::default());
    view.show(true);
    view.on_layout(HEIGHT);
    view.run_transitions(FRAME_MS);
    view
}

fn opacity(view: &TopView<LocalContentController>, id: &str) -> f32 {
    view.item(id).map(|item| item.opacity()).unwrap_or(f32::NAN)
}

fn scale(view: &TopView<LocalContentController>, id: &str) -> f32 {
    view.item(id).map(|item| item.scale()).unwrap_or(f32::NAN)
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn click_selects_and_highlights_item() -> Result<()> {
    let style = SidebarConfig::default().items;
    let mut view = shown_view();
    ensure!(view.state() == TopViewState::Normal, "enter should settle to normal");

    let outcome = view.on_item_click(PHOTO_ID);
    assert_eq!(outcome, ClickOutcome::Selected(ContentType::Photo));
    assert_eq!(view.controller().count(ControllerCall::Show(ContentType::Photo)), 1);
    assert!(view.status().get_status(StatusFlag::TopViewClick));
    assert!(!view.status().can_show_content_view());
    assert_eq!(view.state(), TopViewState::TransitioningIn);

    view.run_transitions(FRAME_MS);

    assert!(!view.status().get_status(StatusFlag::TopViewClick));
    assert_eq!(view.state(), TopViewState::ContentShown);
    assert!(close(opacity(&view, PHOTO_ID), 1.0));
    assert!(close(scale(&view, PHOTO_ID), style.highlight_scale));
    for id in [FILE_ID, CLIPBOARD_ID] {
        assert!(close(opacity(&view, id), style.dim_alpha), "{} should be dimmed", id);
        assert!(close(scale(&view, id), 1.0));
    }
    for id in [LEFT_SPACE_ID, RIGHT_SPACE_ID] {
        assert!(close(opacity(&view, id), style.shade_alpha), "{} should be shaded", id);
    }
    Ok(())
}

#[test]
fn second_click_dismisses_and_resumes() -> Result<()> {
    let mut view = shown_view();
    view.on_item_click(PHOTO_ID);
    view.run_transitions(FRAME_MS);

    let outcome = view.on_item_click(PHOTO_ID);
    assert_eq!(outcome, ClickOutcome::Dismissed);
    assert_eq!(view.controller().count(ControllerCall::Dismiss { animated: true }), 1);
    assert!(view.status().get_status(StatusFlag::TopViewResume));
    assert_eq!(view.state(), TopViewState::TransitioningOut);

    view.run_transitions(FRAME_MS);

    assert!(!view.status().get_status(StatusFlag::TopViewResume));
    assert_eq!(view.state(), TopViewState::Normal);
    for id in [PHOTO_ID, FILE_ID, CLIPBOARD_ID] {
        assert!(close(opacity(&view, id), 1.0));
        assert!(close(scale(&view, id), 1.0));
    }
    for id in [LEFT_SPACE_ID, RIGHT_SPACE_ID] {
        assert!(close(opacity(&view, id), 0.0));
    }
    Ok(())
}

#[test]
fn hide_during_enter_cancels_enter_and_exits() -> Result<()> {
    let mut view = TopView::new(LocalContentController::new(), &SidebarConfig::default());
    view.show(true);
    view.on_layout(HEIGHT);
    view.update(50.0);
    assert!(view.status().get_status(StatusFlag::TopViewEnter));

    view.show(false);
    assert!(!view.status().get_status(StatusFlag::TopViewEnter));
    assert!(view.status().get_status(StatusFlag::TopViewExit));
    assert_eq!(view.state(), TopViewState::Exiting);

    view.run_transitions(FRAME_MS);

    assert!(view.status().is_settled(), "flags left set: {:?}", view.status().active_flags());
    assert_eq!(view.state(), TopViewState::Hidden);
    let surface = view.surface();
    assert!(!surface.visible);
    assert_eq!(surface.opacity, 1.0);
    assert_eq!(surface.offset, Vector3::ZERO);
    for id in [PHOTO_ID, FILE_ID, CLIPBOARD_ID] {
        assert_eq!(view.item(id).map(|item| item.position_offset()), Some(Vector3::ZERO));
    }
    Ok(())
}

#[test]
fn hide_before_layout_drops_pending_enter() -> Result<()> {
    let mut view = TopView::new(LocalContentController::new(), &SidebarConfig::default());
    view.show(true);
    view.show(false);
    view.run_transitions(FRAME_MS);

    // a layout pass after hiding must not start the enter
    view.on_layout(HEIGHT);
    assert!(view.is_idle());
    assert!(!view.status().get_status(StatusFlag::TopViewEnter));
    assert_eq!(view.state(), TopViewState::Hidden);
    Ok(())
}

#[test]
fn overlapping_resume_is_dropped() -> Result<()> {
    let mut view = shown_view();

    assert!(view.resume_to_normal());
    assert!(!view.resume_to_normal());
    assert!(view.status().get_status(StatusFlag::TopViewResume));

    let frames = view.run_transitions(FRAME_MS);
    ensure!(frames > 0, "resume should take at least one frame");
    assert!(!view.status().get_status(StatusFlag::TopViewResume));

    // flag cleared once, so a later resume is accepted again
    assert!(view.resume_to_normal());
    view.run_transitions(FRAME_MS);
    assert!(view.status().is_settled());
    Ok(())
}

#[test]
fn clicks_are_blocked_while_any_flag_is_set() -> Result<()> {
    let mut view = shown_view();
    view.on_item_click(FILE_ID);

    // still highlighting
    assert_eq!(view.on_item_click(FILE_ID), ClickOutcome::Blocked);
    assert_eq!(view.on_item_click(CLIPBOARD_ID), ClickOutcome::Blocked);
    assert_eq!(view.controller().calls.len(), 1);

    view.run_transitions(FRAME_MS);
    assert_eq!(view.on_item_click(FILE_ID), ClickOutcome::Dismissed);
    Ok(())
}

#[test]
fn exit_resets_a_selected_bar() -> Result<()> {
    let mut view = shown_view();
    view.on_item_click(CLIPBOARD_ID);
    view.run_transitions(FRAME_MS);

    view.show(false);
    view.run_transitions(FRAME_MS);

    assert_eq!(view.state(), TopViewState::Hidden);
    assert!(close(opacity(&view, FILE_ID), 1.0));
    assert!(close(scale(&view, CLIPBOARD_ID), 1.0));
    assert!(view.status().is_settled());
    Ok(())
}
