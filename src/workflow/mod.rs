//! Pool bootstrap, position mint and swap steps
//!
//! Each step takes the gateway and the resolved network profile by reference
//! and returns once its transactions are confirmed.

pub mod approval;
pub mod balances;
pub mod bootstrap;
pub mod orchestrator;
pub mod position;
pub mod swap;

pub use approval::*;
pub use balances::*;
pub use bootstrap::*;
pub use orchestrator::*;
pub use position::*;
pub use swap::*;

#[cfg(test)]
pub(crate) mod testing {
    use alloy::primitives::{address, Address, TxHash};
    use crate::{
        config::{NetworkProfile, NetworkTokens},
        types::TxOutcome,
    };

    pub const OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    pub const FACTORY: Address = address!("1F98431c8aD98523631AE4a59f267346ea31F984");
    pub const MANAGER: Address = address!("C36442b4a4522E871399CD717aBDD847Ab11FE88");
    pub const ROUTER: Address = address!("E592427A0AEce92De3Edee1F18E0157C05861564");
    pub const DAI: Address = address!("F6fEd63aAF618d25050e5E3d3B4c525ab2154554");
    pub const USDC: Address = address!("2D7eB0e8802d3a530E298a1f94ce176ad6B3Ab43");
    pub const POOL: Address = address!("9000000000000000000000000000000000000009");

    pub fn profile() -> NetworkProfile {
        NetworkProfile {
            name: "polygonMumbai".into(),
            rpc_url: "http://127.0.0.1:8545".into(),
            chain_id: 80001,
            block_confirmations: 1,
            explorer_api_key: None,
            factory: Some(FACTORY),
            position_manager: Some(MANAGER),
            swap_router: Some(ROUTER),
            tokens: NetworkTokens {
                dai: Some(DAI),
                usdc: Some(USDC),
                usdt: None,
            },
            is_local: false,
        }
    }

    pub fn tx(action: &str) -> TxOutcome {
        TxOutcome::new(action, TxHash::with_last_byte(1), Some(1))
    }
}
