//! Core data types shared by the workflow steps

pub mod snapshot;
pub mod tokens;
pub mod pools;
pub mod position;
pub mod swap;
pub mod transactions;
pub mod balances;

pub use snapshot::*;
pub use tokens::*;
pub use pools::*;
pub use position::*;
pub use swap::*;
pub use transactions::*;
pub use balances::*;
