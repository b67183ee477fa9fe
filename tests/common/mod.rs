//! In-memory stand-in for the chain: ERC-20 balances and allowances, a
//! factory/position manager pair and a router, all behind `ChainGateway`.

#![allow(dead_code)]

pub mod rpc;

use alloy::primitives::{address, Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use v3_pool_workbench::{
    config::{NetworkProfile, NetworkTokens},
    errors::{WorkflowError, WorkflowResult},
    gateway::ChainGateway,
    math::{get_sqrt_ratio_at_tick, mint_amounts, quote_exact_input_at_spot, sqrt_ratio_to_price},
    types::{CreatePoolRequest, MintRequest, PoolImmutables, PoolState, SwapRequest, TxOutcome},
};

pub const OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const FACTORY: Address = address!("00000000000000000000000000000000000f4c70");
pub const MANAGER: Address = address!("00000000000000000000000000000000000a4a6e");
pub const ROUTER: Address = address!("000000000000000000000000000000000000a07e");
pub const DAI: Address = address!("F6fEd63aAF618d25050e5E3d3B4c525ab2154554");
pub const USDC: Address = address!("2D7eB0e8802d3a530E298a1f94ce176ad6B3Ab43");

pub fn e18(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(18u8))
}

#[derive(Default)]
struct LedgerState {
    balances: HashMap<(Address, Address), U256>,
    allowances: HashMap<(Address, Address, Address), U256>,
    pools: HashMap<(Address, Address, u32), Address>,
    pool_data: HashMap<Address, (PoolImmutables, PoolState)>,
    code: HashSet<Address>,
    next_address: u64,
    block: u64,
    create_pool_calls: usize,
}

pub struct InMemoryChain {
    owner: Address,
    state: Mutex<LedgerState>,
}

fn tick_spacing_for(fee: u32) -> WorkflowResult<i32> {
    match fee {
        100 => Ok(1),
        500 => Ok(10),
        3000 => Ok(60),
        10000 => Ok(200),
        other => Err(WorkflowError::rejected(
            "createAndInitializePoolIfNecessary",
            format!("fee {} is not enabled", other),
        )),
    }
}

fn tick_at(sqrt_price_x96: U256) -> i32 {
    let price = sqrt_ratio_to_price(sqrt_price_x96);
    let mut tick = (price.ln() / 1.0001f64.ln()).floor() as i32;
    while get_sqrt_ratio_at_tick(tick + 1).unwrap() <= sqrt_price_x96 {
        tick += 1;
    }
    while get_sqrt_ratio_at_tick(tick).unwrap() > sqrt_price_x96 {
        tick -= 1;
    }
    tick
}

impl LedgerState {
    fn tx(&mut self, action: &str) -> TxOutcome {
        self.block += 1;
        TxOutcome::new(action, TxHash::with_last_byte(self.block as u8), Some(self.block))
    }

    fn fresh_address(&mut self) -> Address {
        self.next_address += 1;
        let mut bytes = [0u8; 20];
        bytes[0] = 0xc0;
        bytes[12..].copy_from_slice(&self.next_address.to_be_bytes());
        Address::from(bytes)
    }

    fn balance(&self, token: Address, holder: Address) -> U256 {
        self.balances.get(&(token, holder)).copied().unwrap_or_default()
    }

    fn transfer(&mut self, action: &str, token: Address, from: Address, to: Address, amount: U256) -> WorkflowResult<()> {
        let from_balance = self.balance(token, from);
        if from_balance < amount {
            return Err(WorkflowError::rejected(action, "ERC20: transfer amount exceeds balance"));
        }
        self.balances.insert((token, from), from_balance - amount);
        let to_balance = self.balance(token, to);
        self.balances.insert((token, to), to_balance + amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        action: &str,
        token: Address,
        from: Address,
        spender: Address,
        to: Address,
        amount: U256,
    ) -> WorkflowResult<()> {
        let allowance = self.allowances.get(&(token, from, spender)).copied().unwrap_or_default();
        if allowance < amount {
            return Err(WorkflowError::rejected(action, "ERC20: insufficient allowance"));
        }
        self.transfer(action, token, from, to, amount)?;
        self.allowances.insert((token, from, spender), allowance - amount);
        Ok(())
    }
}

impl InMemoryChain {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            state: Mutex::new(LedgerState::default()),
        }
    }

    pub fn profile(&self) -> NetworkProfile {
        NetworkProfile {
            name: "localhost".into(),
            rpc_url: "http://127.0.0.1:8545".into(),
            chain_id: 31337,
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
            is_local: true,
        }
    }

    pub fn fund(&self, token: Address, holder: Address, amount: U256) {
        let mut state = self.state.lock().unwrap();
        state.code.insert(token);
        let balance = state.balance(token, holder);
        state.balances.insert((token, holder), balance + amount);
    }

    /// A contract pulling `amount` of the owner's tokens through its allowance.
    pub fn spend_allowance(&self, token: Address, spender: Address, to: Address, amount: U256) -> WorkflowResult<()> {
        let owner = self.owner;
        self.state
            .lock()
            .unwrap()
            .transfer_from("transferFrom", token, owner, spender, to, amount)
    }

    pub fn allowance_of(&self, token: Address, spender: Address) -> U256 {
        let state = self.state.lock().unwrap();
        state.allowances.get(&(token, self.owner, spender)).copied().unwrap_or_default()
    }

    pub fn create_pool_calls(&self) -> usize {
        self.state.lock().unwrap().create_pool_calls
    }
}

#[async_trait]
impl ChainGateway for InMemoryChain {
    fn owner(&self) -> Address {
        self.owner
    }

    async fn balance_of(&self, token: Address, holder: Address) -> WorkflowResult<U256> {
        Ok(self.state.lock().unwrap().balance(token, holder))
    }

    async fn has_code(&self, address: Address) -> WorkflowResult<bool> {
        Ok(self.state.lock().unwrap().code.contains(&address))
    }

    async fn get_pool(&self, factory: Address, token_a: Address, token_b: Address, fee: u32) -> WorkflowResult<Address> {
        assert_eq!(factory, FACTORY);
        let (token0, token1) = if token_a < token_b { (token_a, token_b) } else { (token_b, token_a) };
        let state = self.state.lock().unwrap();
        Ok(state.pools.get(&(token0, token1, fee)).copied().unwrap_or(Address::ZERO))
    }

    async fn pool_immutables(&self, pool: Address) -> WorkflowResult<PoolImmutables> {
        let state = self.state.lock().unwrap();
        state
            .pool_data
            .get(&pool)
            .map(|(immutables, _)| immutables.clone())
            .ok_or(WorkflowError::NotFound { what: "pool".into(), address: Some(pool) })
    }

    async fn pool_state(&self, pool: Address) -> WorkflowResult<PoolState> {
        let state = self.state.lock().unwrap();
        state
            .pool_data
            .get(&pool)
            .map(|(_, pool_state)| pool_state.clone())
            .ok_or(WorkflowError::NotFound { what: "pool".into(), address: Some(pool) })
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> WorkflowResult<TxOutcome> {
        let mut state = self.state.lock().unwrap();
        state.allowances.insert((token, self.owner, spender), amount);
        Ok(state.tx("approve"))
    }

    async fn create_and_initialize_pool(
        &self,
        position_manager: Address,
        request: &CreatePoolRequest,
    ) -> WorkflowResult<TxOutcome> {
        assert_eq!(position_manager, MANAGER);
        request.validate()?;
        let tick_spacing = tick_spacing_for(request.fee)?;

        let mut state = self.state.lock().unwrap();
        state.create_pool_calls += 1;
        let key = (request.token0, request.token1, request.fee);
        if !state.pools.contains_key(&key) {
            let pool = state.fresh_address();
            state.pools.insert(key, pool);
            state.code.insert(pool);
            let immutables = PoolImmutables {
                factory: FACTORY,
                token0: request.token0,
                token1: request.token1,
                fee: request.fee,
                tick_spacing,
                max_liquidity_per_tick: u128::MAX,
            };
            let pool_state = PoolState {
                liquidity: 0,
                sqrt_price_x96: request.sqrt_price_x96,
                tick: tick_at(request.sqrt_price_x96),
                observation_index: 0,
                observation_cardinality: 1,
                observation_cardinality_next: 1,
                fee_protocol: 0,
                unlocked: true,
            };
            state.pool_data.insert(pool, (immutables, pool_state));
        }
        Ok(state.tx("createAndInitializePoolIfNecessary"))
    }

    async fn mint(&self, position_manager: Address, request: &MintRequest) -> WorkflowResult<TxOutcome> {
        assert_eq!(position_manager, MANAGER);
        let mut state = self.state.lock().unwrap();
        let pool = state
            .pools
            .get(&(request.token0, request.token1, request.fee))
            .copied()
            .ok_or_else(|| WorkflowError::rejected("mint", "pool does not exist"))?;
        let (immutables, pool_state) = state.pool_data[&pool].clone();
        request.validate(0, immutables.tick_spacing)?;

        // largest liquidity the desired amounts allow, probed at the position's scale
        let unit = mint_amounts(
            pool_state.sqrt_price_x96,
            pool_state.tick,
            request.tick_lower,
            request.tick_upper,
            1_000_000_000_000_000_000,
        )?;
        let scale = |desired: U256, per_unit: U256| {
            if per_unit.is_zero() { U256::MAX } else { desired * U256::from(10u64).pow(U256::from(18u8)) / per_unit }
        };
        let liquidity = scale(request.amount0_desired, unit.amount0)
            .min(scale(request.amount1_desired, unit.amount1))
            .min(U256::from(u128::MAX))
            .to::<u128>();
        let used = mint_amounts(
            pool_state.sqrt_price_x96,
            pool_state.tick,
            request.tick_lower,
            request.tick_upper,
            liquidity,
        )?;
        let amount0 = used.amount0.min(request.amount0_desired);
        let amount1 = used.amount1.min(request.amount1_desired);
        if amount0 < request.amount0_min || amount1 < request.amount1_min {
            return Err(WorkflowError::rejected("mint", "Price slippage check"));
        }

        let owner = self.owner;
        state.transfer_from("mint", request.token0, owner, MANAGER, pool, amount0)?;
        state.transfer_from("mint", request.token1, owner, MANAGER, pool, amount1)?;
        if let Some((_, pool_state)) = state.pool_data.get_mut(&pool) {
            if request.tick_lower <= pool_state.tick && pool_state.tick < request.tick_upper {
                pool_state.liquidity += liquidity;
            }
        }
        Ok(state.tx("mint"))
    }

    async fn exact_input_single(&self, router: Address, request: &SwapRequest) -> WorkflowResult<TxOutcome> {
        assert_eq!(router, ROUTER);
        request.validate()?;
        let mut state = self.state.lock().unwrap();
        let (token0, token1) = if request.token_in < request.token_out {
            (request.token_in, request.token_out)
        } else {
            (request.token_out, request.token_in)
        };
        let pool = state
            .pools
            .get(&(token0, token1, request.fee))
            .copied()
            .ok_or_else(|| WorkflowError::rejected("exactInputSingle", "pool does not exist"))?;
        let (_, pool_state) = state.pool_data[&pool].clone();

        let amount_out = quote_exact_input_at_spot(
            pool_state.sqrt_price_x96,
            request.amount_in,
            request.fee,
            request.token_in == token0,
        )?;
        if amount_out < request.amount_out_minimum {
            return Err(WorkflowError::rejected("exactInputSingle", "Too little received"));
        }

        let owner = self.owner;
        state.transfer_from("exactInputSingle", request.token_in, owner, ROUTER, pool, request.amount_in)?;
        state.transfer("exactInputSingle", request.token_out, pool, request.recipient, amount_out)?;
        Ok(state.tx("exactInputSingle"))
    }

    async fn deploy(&self, init_code: Bytes) -> WorkflowResult<TxOutcome> {
        if init_code.is_empty() {
            return Err(WorkflowError::rejected("deploy", "empty init code"));
        }
        let mut state = self.state.lock().unwrap();
        let address = state.fresh_address();
        state.code.insert(address);
        Ok(state.tx("deploy").with_contract_address(Some(address)))
    }
}
