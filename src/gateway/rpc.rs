//! JSON-RPC implementation of the chain gateway

use alloy::{
    network::{Ethereum, TransactionBuilder},
    primitives::{aliases::{I24, U160, U24}, Address, Bytes, U256},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
    transports::{Transport, TransportError},
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use crate::{
    contracts::{ContractHandles, INonfungiblePositionManager, ISwapRouter02},
    errors::{MathError, WorkflowError, WorkflowResult},
    network::await_confirmation,
    types::{CreatePoolRequest, MintRequest, PoolImmutables, PoolState, SwapRequest, TxOutcome},
};
use super::ChainGateway;

pub struct AlloyGateway<T, P> {
    handles: ContractHandles<T, P>,
    owner: Address,
    endpoint: String,
    confirmations: u64,
    timeout: Duration,
}

impl<T, P> AlloyGateway<T, P>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Clone + 'static,
{
    pub fn new(
        provider: P,
        owner: Address,
        endpoint: impl Into<String>,
        confirmations: u64,
        timeout: Duration,
    ) -> Self {
        Self {
            handles: ContractHandles::new(provider),
            owner,
            endpoint: endpoint.into(),
            confirmations: confirmations.max(1),
            timeout,
        }
    }

    /// Node error responses are rejections; anything else means the
    /// endpoint could not be reached.
    fn transport_error(&self, action: &str, err: TransportError) -> WorkflowError {
        match err.as_error_resp().map(|payload| payload.message.to_string()) {
            Some(message) => WorkflowError::Transaction {
                action: action.to_string(),
                message,
                source: Some(err.into()),
            },
            None => WorkflowError::connection(&self.endpoint, err),
        }
    }

    fn contract_error(&self, action: &str, err: alloy::contract::Error) -> WorkflowError {
        match err {
            alloy::contract::Error::TransportError(e) => self.transport_error(action, e),
            other => WorkflowError::Transaction {
                action: action.to_string(),
                message: other.to_string(),
                source: Some(other.into()),
            },
        }
    }

    /// A view call against an address without code returns empty data, which
    /// fails ABI decoding. That case is reported as NotFound.
    async fn read_error(&self, action: &str, target: Address, err: alloy::contract::Error) -> WorkflowError {
        if matches!(err, alloy::contract::Error::AbiError(_)) {
            if let Ok(false) = self.code_present(target).await {
                return WorkflowError::NotFound {
                    what: format!("contract code at {} ({})", target, action),
                    address: Some(target),
                };
            }
        }
        self.contract_error(action, err)
    }

    async fn code_present(&self, address: Address) -> WorkflowResult<bool> {
        let code = self
            .handles
            .provider()
            .get_code_at(address)
            .await
            .map_err(|e| self.transport_error("eth_getCode", e))?;
        Ok(!code.is_empty())
    }
}

fn to_i24(tick: i32) -> WorkflowResult<I24> {
    I24::try_from(tick).map_err(|_| WorkflowError::Math(MathError::TickOutOfBounds(tick)))
}

#[async_trait]
impl<T, P> ChainGateway for AlloyGateway<T, P>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Clone + 'static,
{
    fn owner(&self) -> Address {
        self.owner
    }

    async fn balance_of(&self, token: Address, holder: Address) -> WorkflowResult<U256> {
        let erc20 = self.handles.erc20(token);
        match erc20.balanceOf(holder).call().await {
            Ok(balance) => Ok(balance._0),
            Err(e) => Err(self.read_error("balanceOf", token, e).await),
        }
    }

    async fn has_code(&self, address: Address) -> WorkflowResult<bool> {
        self.code_present(address).await
    }

    async fn get_pool(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> WorkflowResult<Address> {
        let factory_handle = self.handles.factory(factory);
        match factory_handle.getPool(token_a, token_b, U24::from(fee)).call().await {
            Ok(result) => Ok(result.pool),
            Err(e) => Err(self.read_error("getPool", factory, e).await),
        }
    }

    async fn pool_immutables(&self, pool: Address) -> WorkflowResult<PoolImmutables> {
        let handle = self.handles.pool(pool);
        let factory = handle.factory();
        let token0 = handle.token0();
        let token1 = handle.token1();
        let fee = handle.fee();
        let tick_spacing = handle.tickSpacing();
        let max_liquidity = handle.maxLiquidityPerTick();

        let joined = tokio::try_join!(
            factory.call(),
            token0.call(),
            token1.call(),
            fee.call(),
            tick_spacing.call(),
            max_liquidity.call(),
        );
        let (factory, token0, token1, fee, tick_spacing, max_liquidity) = match joined {
            Ok(values) => values,
            Err(e) => return Err(self.read_error("pool immutables", pool, e).await),
        };

        Ok(PoolImmutables {
            factory: factory._0,
            token0: token0._0,
            token1: token1._0,
            fee: fee._0.to::<u32>(),
            tick_spacing: tick_spacing._0.as_i32(),
            max_liquidity_per_tick: max_liquidity._0,
        })
    }

    async fn pool_state(&self, pool: Address) -> WorkflowResult<PoolState> {
        let handle = self.handles.pool(pool);
        let liquidity = handle.liquidity();
        let slot0 = handle.slot0();

        let (liquidity, slot0) = match tokio::try_join!(liquidity.call(), slot0.call()) {
            Ok(values) => values,
            Err(e) => return Err(self.read_error("pool state", pool, e).await),
        };

        Ok(PoolState {
            liquidity: liquidity._0,
            sqrt_price_x96: U256::from(slot0.sqrtPriceX96),
            tick: slot0.tick.as_i32(),
            observation_index: slot0.observationIndex,
            observation_cardinality: slot0.observationCardinality,
            observation_cardinality_next: slot0.observationCardinalityNext,
            fee_protocol: slot0.feeProtocol,
            unlocked: slot0.unlocked,
        })
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> WorkflowResult<TxOutcome> {
        debug!("approve {} of {} for {}", amount, token, spender);
        let erc20 = self.handles.erc20(token);
        let pending = erc20
            .approve(spender, amount)
            .send()
            .await
            .map_err(|e| self.contract_error("approve", e))?;
        await_confirmation(pending, "approve", self.confirmations, self.timeout).await
    }

    async fn create_and_initialize_pool(
        &self,
        position_manager: Address,
        request: &CreatePoolRequest,
    ) -> WorkflowResult<TxOutcome> {
        const ACTION: &str = "createAndInitializePoolIfNecessary";
        request.validate()?;
        let manager = self.handles.position_manager(position_manager);
        let pending = manager
            .createAndInitializePoolIfNecessary(
                request.token0,
                request.token1,
                U24::from(request.fee),
                request.sqrt_price_x96.to::<U160>(),
            )
            .send()
            .await
            .map_err(|e| self.contract_error(ACTION, e))?;
        await_confirmation(pending, ACTION, self.confirmations, self.timeout).await
    }

    async fn mint(&self, position_manager: Address, request: &MintRequest) -> WorkflowResult<TxOutcome> {
        let params = INonfungiblePositionManager::MintParams {
            token0: request.token0,
            token1: request.token1,
            fee: U24::from(request.fee),
            tickLower: to_i24(request.tick_lower)?,
            tickUpper: to_i24(request.tick_upper)?,
            amount0Desired: request.amount0_desired,
            amount1Desired: request.amount1_desired,
            amount0Min: request.amount0_min,
            amount1Min: request.amount1_min,
            recipient: request.recipient,
            deadline: U256::from(request.deadline),
        };
        let manager = self.handles.position_manager(position_manager);
        let pending = manager
            .mint(params)
            .send()
            .await
            .map_err(|e| self.contract_error("mint", e))?;
        await_confirmation(pending, "mint", self.confirmations, self.timeout).await
    }

    async fn exact_input_single(&self, router: Address, request: &SwapRequest) -> WorkflowResult<TxOutcome> {
        const ACTION: &str = "exactInputSingle";
        request.validate()?;
        let params = ISwapRouter02::ExactInputSingleParams {
            tokenIn: request.token_in,
            tokenOut: request.token_out,
            fee: U24::from(request.fee),
            recipient: request.recipient,
            amountIn: request.amount_in,
            amountOutMinimum: request.amount_out_minimum,
            sqrtPriceLimitX96: request.sqrt_price_limit_x96.to::<U160>(),
        };
        let handle = self.handles.router(router);
        let pending = handle
            .exactInputSingle(params)
            .send()
            .await
            .map_err(|e| self.contract_error(ACTION, e))?;
        await_confirmation(pending, ACTION, self.confirmations, self.timeout).await
    }

    async fn deploy(&self, init_code: Bytes) -> WorkflowResult<TxOutcome> {
        info!("📤 Sending contract creation ({} bytes of init code)", init_code.len());
        let tx = TransactionRequest::default()
            .with_from(self.owner)
            .with_deploy_code(init_code);
        let pending = self
            .handles
            .provider()
            .send_transaction(tx)
            .await
            .map_err(|e| self.transport_error("deploy", e))?;
        let outcome = await_confirmation(pending, "deploy", self.confirmations, self.timeout).await?;
        if outcome.contract_address.is_none() {
            return Err(WorkflowError::rejected("deploy", "receipt carries no contract address"));
        }
        Ok(outcome)
    }
}
