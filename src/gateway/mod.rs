//! The seam between workflow steps and the chain
//!
//! Every remote read or state-changing transaction the workflow performs goes
//! through [`ChainGateway`]. [`AlloyGateway`] is the JSON-RPC implementation;
//! tests substitute mocks or an in-memory ledger.

pub mod rpc;

use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use crate::{
    errors::WorkflowResult,
    types::{CreatePoolRequest, MintRequest, PoolImmutables, PoolState, SwapRequest, TxOutcome},
};

pub use rpc::AlloyGateway;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Account that signs and pays for every transaction.
    fn owner(&self) -> Address;

    async fn balance_of(&self, token: Address, holder: Address) -> WorkflowResult<U256>;

    async fn has_code(&self, address: Address) -> WorkflowResult<bool>;

    /// Zero address when the factory has no pool for the pair and fee.
    async fn get_pool(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> WorkflowResult<Address>;

    async fn pool_immutables(&self, pool: Address) -> WorkflowResult<PoolImmutables>;

    async fn pool_state(&self, pool: Address) -> WorkflowResult<PoolState>;

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> WorkflowResult<TxOutcome>;

    async fn create_and_initialize_pool(
        &self,
        position_manager: Address,
        request: &CreatePoolRequest,
    ) -> WorkflowResult<TxOutcome>;

    async fn mint(&self, position_manager: Address, request: &MintRequest) -> WorkflowResult<TxOutcome>;

    async fn exact_input_single(&self, router: Address, request: &SwapRequest) -> WorkflowResult<TxOutcome>;

    /// Sends a contract creation transaction with `init_code` (bytecode
    /// followed by ABI-encoded constructor arguments).
    async fn deploy(&self, init_code: Bytes) -> WorkflowResult<TxOutcome>;
}
