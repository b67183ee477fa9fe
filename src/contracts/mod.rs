//! Contract bindings and handle construction

pub mod bindings;
pub mod handles;

pub use bindings::*;
pub use handles::ContractHandles;
