//! Navigation model construction over scanned documents.
//!
//! Takes the [`ScanResult`](docpipe_scan::ScanResult) partitioning and
//! produces the UI-facing navigation model: a sorted
//! [`NavigationTree`] of categories and root files, metadata-derived
//! [`Grouper`] grouping for the designated category, breadcrumbs,
//! category filtering, and text search. All types serialize to JSON
//! with a `type` tag per node.

mod group;
mod node;
mod path;
mod tree;

pub use group::Grouper;
pub use node::{GroupUi, KeyboardShortcuts, MobileBehavior, NavigationNode};
pub use path::{file_path_to_url_path, title_to_slug};
pub use tree::{
    Breadcrumb, NavigationTree, build_breadcrumbs, build_navigation, filter_by_category,
    search_navigation, sort_by_priority,
};
