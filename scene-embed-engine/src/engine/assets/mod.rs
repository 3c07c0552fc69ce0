//! Model asset plumbing: placement manifest types, the sibling-name path
//! rewrite, and the dedicated storage-host asset source.

/// Manifest entry types, id selection, and placement/camera transforms.
pub mod model_config;

/// `models://` asset source whose reader scopes the path rewrite.
pub mod model_source;

/// Pure rename rules for the JSON-only storage host.
pub mod path_rewrite;
