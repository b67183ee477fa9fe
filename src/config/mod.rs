//! Configuration: run settings and network profiles

pub mod networks;
pub mod settings;

pub use networks::*;
pub use settings::*;
