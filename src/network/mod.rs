//! Provider setup and transaction confirmation

pub mod confirmation;
pub mod providers;

pub use confirmation::*;
pub use providers::*;
