//! Camera state publication for the indicator widget.
//!
//! A throttled per-frame system copies the live camera into plain snapshots
//! and publishes them twice: as an in-app event for engine consumers and as
//! a document-level CustomEvent for the external overlay.

pub mod camera_bridge;
