//! Error types shared by every workflow step

pub mod workflow_error;

pub use workflow_error::*;
