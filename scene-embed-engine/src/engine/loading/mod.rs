//! Staged model loading pipeline.
//!
//! Resolves the placement manifest, requests the glTF descriptor through the
//! dedicated model source, tracks fetch progress for the overlay, and spawns
//! the configured model on completion.

/// Placement manifest fetch and terminal resolution.
pub mod manifest_loader;

/// Descriptor load, normal smoothing, placement, and swap handling.
pub mod model_loader;

/// Progress fraction rule for the loading indicator.
pub mod progress;
