//! The content panel seam the top bar talks to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of content a top bar item opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// No content panel is showing. Also the type of non-content items.
    #[default]
    None,
    Photo,
    File,
    Clipboard,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Photo => "photo",
            Self::File => "file",
            Self::Clipboard => "clipboard",
        };
        f.write_str(name)
    }
}

/// Sidebar-wide state the top bar consults after entering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidebarStatus {
    #[default]
    Normal,
    /// Something else is in focus; the top bar should dim once visible.
    DimRequested,
}

/// The content panel and sidebar the top bar drives.
///
/// Calls happen synchronously from inside top bar operations.
pub trait ContentController {
    fn current_content_type(&self) -> ContentType;
    fn show_content(&mut self, content_type: ContentType);
    fn dismiss_content(&mut self, animated: bool);

    fn sidebar_status(&self) -> SidebarStatus {
        SidebarStatus::Normal
    }

    /// Ask the sidebar to leave whatever content state it is in.
    fn resume_sidebar(&mut self) {}
}

/// A call received by [`LocalContentController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerCall {
    Show(ContentType),
    Dismiss { animated: bool },
    ResumeSidebar,
}

/// In-process controller: shows content instantly and records every call.
#[derive(Debug, Clone, Default)]
pub struct LocalContentController {
    pub current: ContentType,
    pub status: SidebarStatus,
    pub calls: Vec<ControllerCall>,
}

impl LocalContentController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, call: ControllerCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl ContentController for LocalContentController {
    fn current_content_type(&self) -> ContentType {
        self.current
    }

    fn show_content(&mut self, content_type: ContentType) {
        self.calls.push(ControllerCall::Show(content_type));
        self.current = content_type;
    }

    fn dismiss_content(&mut self, animated: bool) {
        self.calls.push(ControllerCall::Dismiss { animated });
        self.current = ContentType::None;
    }

    fn sidebar_status(&self) -> SidebarStatus {
        self.status
    }

    fn resume_sidebar(&mut self) {
        self.calls.push(ControllerCall::ResumeSidebar);
    }
}
