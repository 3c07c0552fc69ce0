//! Constrained orbit camera for the viewer.
//!
//! Pointer drag orbits the fixed target inside a narrow azimuth/polar window
//! with light damping; pan and zoom stay disabled.

/// Orbit controller resource and pointer-input system.
pub mod orbit_camera;
