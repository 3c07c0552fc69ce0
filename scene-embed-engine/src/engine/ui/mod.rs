//! In-canvas overlay UI: the loading card with its progress bar and the
//! reload affordance shown on fatal failures.

pub mod overlay;
