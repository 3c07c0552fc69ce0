//! Persistent scene furniture: the fixed lighting rig and the ground plane
//! that survive model swaps.

pub mod ground;
pub mod lighting;
