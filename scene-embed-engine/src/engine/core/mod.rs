//! Core application setup and lifecycle management.
//!
//! Builds the Bevy app, drives the viewer state machine from first
//! connection through model swaps, and binds the engine to the host canvas.

/// Application assembly: plugins, resources, state-gated system schedules.
pub mod app_setup;

/// Viewer lifecycle states, the active-model resource, and swap requests.
pub mod app_state;

/// Platform-specific window/canvas configuration and cursor feedback.
pub mod window_config;
