//! Provider construction and the chain id pre-flight probe

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::Address,
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::{reqwest::Url, Client, Http},
};
use std::str::FromStr;
use tracing::info;
use crate::{
    config::NetworkProfile,
    errors::{WorkflowError, WorkflowResult},
    ConcreteProvider,
};

fn parse_endpoint(rpc_url: &str) -> WorkflowResult<Url> {
    rpc_url
        .parse()
        .map_err(|e| WorkflowError::config(format!("invalid RPC URL '{}': {}", rpc_url, e)))
}

/// Unsigned provider used for reads and the pre-flight probe.
pub fn connect_read_only(rpc_url: &str) -> WorkflowResult<ConcreteProvider> {
    Ok(ProviderBuilder::new().on_http(parse_endpoint(rpc_url)?).boxed())
}

pub fn load_signer(private_key: &str) -> WorkflowResult<PrivateKeySigner> {
    PrivateKeySigner::from_str(private_key.trim())
        .map_err(|e| WorkflowError::config(format!("PRIVATE_KEY is not a valid secp256k1 key: {}", e)))
}

/// Provider that fills nonce, gas and chain id and signs with `signer`.
pub fn connect_signer(
    rpc_url: &str,
    signer: PrivateKeySigner,
) -> WorkflowResult<(Address, impl Provider<Http<Client>, Ethereum> + Clone + 'static)> {
    let owner = signer.address();
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(EthereumWallet::from(signer))
        .on_http(parse_endpoint(rpc_url)?);
    Ok((owner, provider))
}

/// Checks the endpoint answers and serves the chain the profile expects.
pub async fn probe_chain_id<P>(provider: &P, profile: &NetworkProfile) -> WorkflowResult<u64>
where
    P: Provider + ?Sized,
{
    info!("🔗 Testing connection to {} at {}...", profile.name, profile.rpc_url);
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| WorkflowError::connection(&profile.rpc_url, e))?;

    if chain_id != profile.chain_id {
        return Err(WorkflowError::config(format!(
            "endpoint {} serves chain {} but network {} expects {}",
            profile.rpc_url, chain_id, profile.name, profile.chain_id
        )));
    }

    let block = provider
        .get_block_number()
        .await
        .map_err(|e| WorkflowError::connection(&profile.rpc_url, e))?;
    info!("✅ Connected to {} (chain {}) at block {}", profile.name, chain_id, block);
    Ok(chain_id)
}
