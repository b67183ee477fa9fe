//! Contract instances bound to a provider

use alloy::{
    network::Ethereum,
    primitives::Address,
    providers::Provider,
    transports::Transport,
};
use std::marker::PhantomData;
use super::bindings::{
    IERC20::{self, IERC20Instance},
    INonfungiblePositionManager::{self, INonfungiblePositionManagerInstance},
    ISwapRouter02::{self, ISwapRouter02Instance},
    IUniswapV3Factory::{self, IUniswapV3FactoryInstance},
    IUniswapV3Pool::{self, IUniswapV3PoolInstance},
};

/// Builds typed handles for the ERC-20 tokens and Uniswap V3 contracts.
#[derive(Debug, Clone)]
pub struct ContractHandles<T, P> {
    provider: P,
    _transport: PhantomData<fn() -> T>,
}

impl<T, P> ContractHandles<T, P>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Clone,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            _transport: PhantomData,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn erc20(&self, token: Address) -> IERC20Instance<T, P> {
        IERC20::new(token, self.provider.clone())
    }

    pub fn factory(&self, factory: Address) -> IUniswapV3FactoryInstance<T, P> {
        IUniswapV3Factory::new(factory, self.provider.clone())
    }

    pub fn pool(&self, pool: Address) -> IUniswapV3PoolInstance<T, P> {
        IUniswapV3Pool::new(pool, self.provider.clone())
    }

    pub fn position_manager(&self, manager: Address) -> INonfungiblePositionManagerInstance<T, P> {
        INonfungiblePositionManager::new(manager, self.provider.clone())
    }

    pub fn router(&self, router: Address) -> ISwapRouter02Instance<T, P> {
        ISwapRouter02::new(router, self.provider.clone())
    }
}
