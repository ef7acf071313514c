//! Advisory status flags for in-flight transitions.
//!
//! Each flag marks "a transition of this kind is playing". Flags are not
//! locks: everything runs on the one scheduling loop, so they only make
//! overlapping logical transitions detectable. Whoever sets a flag must
//! clear it exactly once, on completion and on cancellation alike.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;

/// Kinds of transition tracked by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFlag {
    /// Top bar sliding/fading onto the screen.
    TopViewEnter,
    /// Top bar sliding/fading off the screen.
    TopViewExit,
    /// Highlight/dim transition after an item click.
    TopViewClick,
    /// Items returning to their neutral state.
    TopViewResume,
    /// Content panel opening.
    ContentViewEnter,
    /// Content panel closing.
    ContentViewExit,
}

impl StatusFlag {
    pub const ALL: [StatusFlag; 6] = [
        StatusFlag::TopViewEnter,
        StatusFlag::TopViewExit,
        StatusFlag::TopViewClick,
        StatusFlag::TopViewResume,
        StatusFlag::ContentViewEnter,
        StatusFlag::ContentViewExit,
    ];

    /// Flags that keep the content view from being shown.
    pub const BLOCKS_CONTENT_VIEW: [StatusFlag; 6] = Self::ALL;

    pub fn name(&self) -> &'static str {
        match self {
            Self::TopViewEnter => "ON_TOP_VIEW_ENTER",
            Self::TopViewExit => "ON_TOP_VIEW_EXIT",
            Self::TopViewClick => "ON_TOP_VIEW_CLICK",
            Self::TopViewResume => "ON_TOP_VIEW_RESUME",
            Self::ContentViewEnter => "ON_CONTENT_VIEW_ENTER",
            Self::ContentViewExit => "ON_CONTENT_VIEW_EXIT",
        }
    }
}

impl fmt::Display for StatusFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of transition flags owned by one surface.
#[derive(Debug, Clone, Default)]
pub struct StatusRegistry {
    flags: BTreeMap<StatusFlag, bool>,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins.
    pub fn set_status(&mut self, flag: StatusFlag, value: bool) {
        self.flags.insert(flag, value);
    }

    /// Current value; flags never set read as `false`.
    pub fn get_status(&self, flag: StatusFlag) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }

    /// True only while no transition that blocks the content view is playing.
    pub fn can_show_content_view(&self) -> bool {
        StatusFlag::BLOCKS_CONTENT_VIEW
            .iter()
            .all(|flag| !self.get_status(*flag))
    }

    /// Flags currently set, in declaration order.
    pub fn active_flags(&self) -> Vec<StatusFlag> {
        StatusFlag::ALL
            .into_iter()
            .filter(|flag| self.get_status(*flag))
            .collect()
    }

    /// No flag is set.
    pub fn is_settled(&self) -> bool {
        self.active_flags().is_empty()
    }

    /// Log every flag value and return the same report.
    ///
    /// Used when a caller is turned away by a flag.
    pub fn dump_status(&self) -> String {
        let report = StatusFlag::ALL
            .iter()
            .map(|flag| format!("{}={}", flag, self.get_status(*flag)))
            .collect::<Vec<_>>()
            .join(", ");
        warn!("anim status: {}", report);
        report
    }
}
