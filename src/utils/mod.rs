//! Utility functions and helpers

pub mod display;
pub mod logging;
pub mod units;

pub use display::*;
pub use logging::*;
pub use units::*;
