//! v3-pool-workbench: test token deployment and Uniswap V3 pool exercising
//!
//! Deploys ERC-20 test tokens to an EVM test network, then bootstraps a
//! Uniswap V3 pool at a price implied by two deposits, mints a liquidity
//! position around the current tick and runs a single-hop test swap,
//! reporting pool and owner balances before and after.

pub mod cli;
pub mod config;
pub mod contracts;
pub mod deploy;
pub mod errors;
pub mod gateway;
pub mod math;
pub mod network;
pub mod storage;
pub mod types;
pub mod utils;
pub mod workflow;

// Re-export commonly used items
pub use config::{NetworkProfile, Settings};
pub use errors::{MathError, WorkflowError, WorkflowResult};
pub use gateway::{AlloyGateway, ChainGateway};
pub use types::*;

// Type alias for our read-only provider
pub type ConcreteProvider = alloy::providers::RootProvider<alloy::transports::BoxTransport>;
