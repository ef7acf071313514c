use anyhow::{Context, Result};
use sidebar_config::SidebarConfig;
use sidebar_scene::animation::{Renderable, StatusFlag};
use sidebar_scene::top_view::{
    ClickOutcome, LocalContentController, PHOTO_ID, TopView, TopViewState,
};

/// Headless run of the top bar: enter, select photos, dismiss, exit.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional config path: --config=<path>
    let config_path = std::env::args().find_map(|a| a.strip_prefix("--config=").map(String::from));
    let mut config = match config_path {
        Some(path) => SidebarConfig::load_from_file(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => SidebarConfig::load_or_default(),
    };
    config.merge_with_env();

    let frame_ms = config.demo.frame_ms;
    let mut view = TopView::new(LocalContentController::new(), &config);

    view.show(true);
    view.on_layout(config.demo.surface_height);
    report(&mut view, "enter", frame_ms);

    match view.on_item_click(PHOTO_ID) {
        ClickOutcome::Selected(content_type) => log::info!("selected {}", content_type),
        other => anyhow::bail!("photo click was not selected: {:?}", other),
    }
    // content panel transition spans the highlight
    view.set_content_status(StatusFlag::ContentViewEnter, true);
    report(&mut view, "highlight", frame_ms);
    view.set_content_status(StatusFlag::ContentViewEnter, false);

    let outcome = view.on_item_click(PHOTO_ID);
    log::info!("second click: {:?}", outcome);
    report(&mut view, "resume", frame_ms);

    view.show(false);
    report(&mut view, "exit", frame_ms);

    if view.state() != TopViewState::Hidden || !view.status().is_settled() {
        view.status().dump_status();
        anyhow::bail!("top view did not settle: {:?}", view.state());
    }
    log::info!("controller calls: {:?}", view.controller().calls);
    Ok(())
}

fn report(view: &mut TopView<LocalContentController>, phase: &str, frame_ms: f32) {
    let frames = view.run_transitions(frame_ms);
    log::info!(
        "{}: {} frames, state {:?}, surface opacity {:.2}",
        phase,
        frames,
        view.state(),
        view.surface().opacity
    );
    if let Some(photo) = view.item(PHOTO_ID) {
        log::info!(
            "  photo opacity {:.2} scale {:.2}",
            photo.opacity(),
            photo.scale()
        );
    }
}
