//! The sidebar top bar: items, the content controller seam and the
//! orchestrator that sequences their transitions.

pub mod controller;
pub mod item;
pub mod view;

pub use controller::{
    ContentController, ContentType, ControllerCall, LocalContentController, SidebarStatus,
};
pub use item::{DimSpaceView, ItemStyle, TopItem, TopItemView};
pub use view::{
    Background, ClickOutcome, TopScene, TopView, TopViewState, CLIPBOARD_ID, DISABLE_VIEW_ID,
    FILE_ID, LEFT_SPACE_ID, PHOTO_ID, RIGHT_SPACE_ID, SHADOW_LINE_ID, SURFACE_ID,
};
