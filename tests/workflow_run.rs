mod common;

use alloy::primitives::{Address, U256};
use common::{e18, InMemoryChain, DAI, MANAGER, OWNER, ROUTER, USDC};
use v3_pool_workbench::{
    config::Settings,
    deploy::initial_supply,
    errors::WorkflowError,
    workflow::{self, approve, create_pool, swap_input, WorkflowPlan},
};

fn funded_chain() -> InMemoryChain {
    let chain = InMemoryChain::new(OWNER);
    chain.fund(DAI, OWNER, initial_supply());
    chain.fund(USDC, OWNER, initial_supply());
    chain
}

fn default_plan(chain: &InMemoryChain) -> WorkflowPlan {
    let settings = Settings::from_lookup(&|_| None).unwrap();
    WorkflowPlan::from_settings(&settings, &chain.profile()).unwrap()
}

#[tokio::test]
async fn create_pool_is_idempotent() {
    let chain = funded_chain();
    let profile = chain.profile();

    let first = create_pool(&chain, &profile, DAI, USDC, e18(100_000), e18(101_000), 100)
        .await
        .unwrap();
    let second = create_pool(&chain, &profile, DAI, USDC, e18(100_000), e18(101_000), 100)
        .await
        .unwrap();

    assert_ne!(first.pool, Address::ZERO);
    assert_eq!(first.pool, second.pool);
    assert_eq!(chain.create_pool_calls(), 2);
    // USDC sorts below DAI
    assert_eq!(first.token0, USDC);
    assert_eq!(first.token1, DAI);
}

// Pins the ledger's ERC-20 allowance semantics that the workflow tests rely on:
// an allowance set through `approve` caps what the spender may pull.
#[tokio::test]
async fn ledger_allowance_caps_pulls_after_approve() {
    let chain = funded_chain();
    let amount = e18(5);
    approve(&chain, DAI, MANAGER, amount).await.unwrap();

    let over = chain.spend_allowance(DAI, MANAGER, Address::repeat_byte(9), amount + U256::from(1u8));
    assert!(matches!(over, Err(WorkflowError::Transaction { .. })));

    chain.spend_allowance(DAI, MANAGER, Address::repeat_byte(9), amount).unwrap();
    let again = chain.spend_allowance(DAI, MANAGER, Address::repeat_byte(9), U256::from(1u8));
    assert!(again.is_err());
}

#[tokio::test]
async fn full_run_moves_exactly_the_swap_amount_into_the_pool() {
    let chain = funded_chain();
    let profile = chain.profile();
    let plan = default_plan(&chain);

    let summary = workflow::run(&chain, &profile, &plan).await.unwrap();

    assert!(summary.is_consistent());
    assert_eq!(summary.reports.len(), 2);
    assert_eq!(summary.reports[0].label, "after creating position");
    assert_eq!(summary.reports[1].label, "after swap");

    let pool = summary.pool();
    let before = summary.reports[0].amount(pool, DAI).unwrap();
    let after = summary.reports[1].amount(pool, DAI).unwrap();
    assert_eq!(after - before, e18(10));

    let delta = summary.swap_delta.unwrap();
    assert!(delta.amount_out() > U256::ZERO);
    assert!(delta.amount_out() >= summary.swap.request.amount_out_minimum);

    let owner_dai = summary.reports[1].amount(OWNER, DAI).unwrap();
    let owner_dai_before = summary.reports[0].amount(OWNER, DAI).unwrap();
    assert_eq!(owner_dai_before - owner_dai, e18(10));
}

#[tokio::test]
async fn second_run_reuses_the_pool() {
    let chain = funded_chain();
    let profile = chain.profile();
    let plan = default_plan(&chain);

    let first = workflow::run(&chain, &profile, &plan).await.unwrap();
    let second = workflow::run(&chain, &profile, &plan).await.unwrap();

    assert_eq!(first.pool(), second.pool());
    assert!(second.is_consistent());
    assert_ne!(first.run_id, second.run_id);
}

#[tokio::test]
async fn zero_amount_swap_is_rejected() {
    let chain = funded_chain();
    let profile = chain.profile();
    let pool = create_pool(&chain, &profile, DAI, USDC, e18(100_000), e18(101_000), 100)
        .await
        .unwrap()
        .pool;

    let result = swap_input(&chain, &profile, DAI, USDC, U256::ZERO, pool, 50).await;
    assert!(matches!(result, Err(WorkflowError::Transaction { .. })));
    assert_eq!(chain.allowance_of(DAI, ROUTER), U256::ZERO);
}

#[tokio::test]
async fn swap_without_funds_fails() {
    let chain = InMemoryChain::new(OWNER);
    chain.fund(USDC, OWNER, e18(1));
    chain.fund(DAI, Address::repeat_byte(7), e18(1));
    let profile = chain.profile();
    let pool = create_pool(&chain, &profile, DAI, USDC, e18(1), e18(1), 100)
        .await
        .unwrap()
        .pool;

    let result = swap_input(&chain, &profile, DAI, USDC, e18(10), pool, 0).await;
    assert!(result.is_err());
}
