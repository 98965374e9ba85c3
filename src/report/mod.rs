//! Presentation support for diff results.
//!
//! A diff tree shares nodes: the same pair diff or added subtree can be
//! reachable from many parents. [`RenderTracker`] lets a renderer expand each
//! of them once, and [`DiffReport`] uses it to build an owned JSON snapshot.

mod json;
mod tracker;

pub use json::{
    ComponentReport, ComponentTree, DiffReport, PairEntry, PairReport, ToolInfo, TreeEntry,
};
pub use tracker::RenderTracker;
