//! Data persistence and file operations

pub mod deployments;
pub mod reports;

pub use deployments::*;
pub use reports::*;
