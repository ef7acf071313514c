//! Animation orchestration for the sidebar top bar.
//!
//! [`animation`] is a small single-threaded animation core: property
//! drivers, timelines, a frame-driven scheduler and a status registry.
//! [`top_view`] builds the top bar on it: enter and exit transitions,
//! item highlight/dim on click, and resume to neutral.

pub mod animation;
pub mod top_view;
