//! Static network mapping and profile resolution

use alloy::primitives::{Address, address};
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;
use crate::{
    errors::{WorkflowError, WorkflowResult},
    storage::DeploymentStore,
};

pub const DEFAULT_BLOCK_CONFIRMATIONS: u64 = 1;
pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";
pub const LOCAL_CHAIN_ID: u64 = 31337;

/// Networks served by a local development node (anvil / hardhat node).
pub const DEVELOPMENT_CHAINS: &[&str] = &["hardhat", "localhost"];

#[derive(Debug, Clone, Default)]
pub struct NetworkEntry {
    pub chain_id: Option<u64>,
    pub rpc_url_env: Option<&'static str>,
    pub block_confirmations: Option<u64>,
    pub dai: Option<Address>,
    pub usdc: Option<Address>,
    pub usdt: Option<Address>,
    pub position_manager: Option<Address>,
    pub factory: Option<Address>,
    pub swap_router: Option<Address>,
    pub explorer_api_key_env: Option<&'static str>,
}

lazy_static! {
    pub static ref NETWORKS: HashMap<&'static str, NetworkEntry> = {
        let mut networks = HashMap::new();
        networks.insert("localhost", NetworkEntry::default());
        networks.insert("hardhat", NetworkEntry::default());
        networks.insert("optimisticGoerli", NetworkEntry {
            chain_id: Some(420),
            rpc_url_env: Some("OPT_GOERLI_RPC_URL"),
            block_confirmations: Some(6),
            dai: Some(address!("312C1C8F5BC23f08331B1486Da723dd1B80F9040")),
            usdc: Some(address!("EA2aa731c7493BeC9DfB3663E6A9888269d269bF")),
            usdt: Some(address!("7bF76F5Eac3f6993cd880f7c12c1f299A129387d")),
            position_manager: Some(address!("3E3bedb16cEf30C7B07F410F329B9425bACfAdEc")),
            factory: Some(address!("5c18D5e2F6e162CE192B5996EDbB38e100711167")),
            swap_router: Some(address!("8DB3b09D50CA3E303A06d993A210ab61eB9f6Ea3")),
            explorer_api_key_env: Some("OPT_ETHERSCAN_API_KEY"),
        });
        networks.insert("polygonMumbai", NetworkEntry {
            chain_id: Some(80001),
            rpc_url_env: Some("MUMBAI_RPC_URL"),
            block_confirmations: Some(6),
            dai: Some(address!("F6fEd63aAF618d25050e5E3d3B4c525ab2154554")),
            usdc: Some(address!("2D7eB0e8802d3a530E298a1f94ce176ad6B3Ab43")),
            usdt: Some(address!("60965aB564AD3D6069577027DB5d1a43e5AD06a6")),
            position_manager: Some(address!("C36442b4a4522E871399CD717aBDD847Ab11FE88")),
            factory: Some(address!("1F98431c8aD98523631AE4a59f267346ea31F984")),
            swap_router: Some(address!("E592427A0AEce92De3Edee1F18E0157C05861564")),
            explorer_api_key_env: Some("MUMBAI_ETHERSCAN_API_KEY"),
        });
        networks
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkTokens {
    pub dai: Option<Address>,
    pub usdc: Option<Address>,
    pub usdt: Option<Address>,
}

/// Everything a run needs to know about the selected network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkProfile {
    pub name: String,
    pub rpc_url: String,
    pub chain_id: u64,
    pub block_confirmations: u64,
    #[serde(skip)]
    pub explorer_api_key: Option<String>,
    pub factory: Option<Address>,
    pub position_manager: Option<Address>,
    pub swap_router: Option<Address>,
    pub tokens: NetworkTokens,
    pub is_local: bool,
}

fn required(value: Option<Address>, network: &str, field: &str) -> WorkflowResult<Address> {
    value.ok_or_else(|| {
        WorkflowError::config(format!("{} address is not configured for network {}", field, network))
    })
}

impl NetworkProfile {
    pub fn factory(&self) -> WorkflowResult<Address> {
        required(self.factory, &self.name, "uniswap_v3_factory")
    }

    pub fn position_manager(&self) -> WorkflowResult<Address> {
        required(self.position_manager, &self.name, "nonfungible_position_manager")
    }

    pub fn swap_router(&self) -> WorkflowResult<Address> {
        required(self.swap_router, &self.name, "swap_router")
    }

    pub fn dai(&self) -> WorkflowResult<Address> {
        required(self.tokens.dai, &self.name, "dai")
    }

    pub fn usdc(&self) -> WorkflowResult<Address> {
        required(self.tokens.usdc, &self.name, "usdc")
    }

    pub fn usdt(&self) -> WorkflowResult<Address> {
        required(self.tokens.usdt, &self.name, "usdt")
    }
}

fn env_address(
    env: &dyn Fn(&str) -> Option<String>,
    key: &str,
) -> WorkflowResult<Option<Address>> {
    match env(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse::<Address>()
            .map(Some)
            .map_err(|e| WorkflowError::config(format!("{} is not an address: {}", key, e))),
        None => Ok(None),
    }
}

/// Resolves `name` against the static mapping.
///
/// `env` supplies environment values (RPC URLs, explorer keys and address
/// overrides); `deployed` looks up addresses recorded by the deployer and is
/// only consulted for development chains.
pub fn resolve_with(
    name: &str,
    env: &dyn Fn(&str) -> Option<String>,
    deployed: &dyn Fn(&str) -> Option<Address>,
) -> WorkflowResult<NetworkProfile> {
    let entry = NETWORKS.get(name).ok_or_else(|| {
        let mut known: Vec<_> = NETWORKS.keys().copied().collect();
        known.sort_unstable();
        WorkflowError::config(format!("unknown network '{}' (known: {})", name, known.join(", ")))
    })?;
    let is_local = DEVELOPMENT_CHAINS.contains(&name);

    let rpc_url = env("RPC_URL")
        .or_else(|| entry.rpc_url_env.and_then(env))
        .filter(|url| !url.trim().is_empty())
        .or_else(|| is_local.then(|| LOCAL_RPC_URL.to_string()))
        .ok_or_else(|| {
            WorkflowError::config(format!(
                "RPC endpoint for {} is unset (set {})",
                name,
                entry.rpc_url_env.unwrap_or("RPC_URL")
            ))
        })?;

    let chain_id = entry
        .chain_id
        .or_else(|| is_local.then_some(LOCAL_CHAIN_ID))
        .ok_or_else(|| WorkflowError::config(format!("chain id for {} is unset", name)))?;

    let explorer_api_key = entry
        .explorer_api_key_env
        .and_then(env)
        .filter(|key| !key.trim().is_empty());

    let local_fallback = |contract: &str| if is_local { deployed(contract) } else { None };

    let profile = NetworkProfile {
        name: name.to_string(),
        rpc_url,
        chain_id,
        block_confirmations: entry.block_confirmations.unwrap_or(DEFAULT_BLOCK_CONFIRMATIONS),
        explorer_api_key,
        factory: env_address(env, "UNISWAP_V3_FACTORY_ADDRESS")?.or(entry.factory),
        position_manager: env_address(env, "NONFUNGIBLE_POSITION_MANAGER_ADDRESS")?
            .or(entry.position_manager),
        swap_router: env_address(env, "SWAP_ROUTER_ADDRESS")?.or(entry.swap_router),
        tokens: NetworkTokens {
            dai: env_address(env, "DAI_ADDRESS")?
                .or(entry.dai)
                .or_else(|| local_fallback("TestDAI")),
            usdc: env_address(env, "USDC_ADDRESS")?
                .or(entry.usdc)
                .or_else(|| local_fallback("TestUSDC")),
            usdt: env_address(env, "USDT_ADDRESS")?
                .or(entry.usdt)
                .or_else(|| local_fallback("TestUSDT")),
        },
        is_local,
    };

    if !is_local {
        profile.factory()?;
        profile.position_manager()?;
        profile.swap_router()?;
        profile.dai()?;
        profile.usdc()?;
    }

    Ok(profile)
}

/// Resolves against the process environment, falling back to recorded
/// deployments for the local networks.
pub fn resolve(name: &str, deployments: &DeploymentStore) -> WorkflowResult<NetworkProfile> {
    resolve_with(
        name,
        &|key| std::env::var(key).ok(),
        &|contract| deployments.address_of(name, contract),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    fn nothing_deployed(_: &str) -> Option<Address> {
        None
    }

    #[test]
    fn unknown_network_is_a_configuration_error() {
        let err = resolve_with("goerli", &env_from(&[]), &nothing_deployed).unwrap_err();
        assert!(matches!(err, WorkflowError::Configuration { .. }));
        assert!(err.to_string().contains("polygonMumbai"));
    }

    #[test]
    fn remote_network_requires_endpoint() {
        let err = resolve_with("polygonMumbai", &env_from(&[]), &nothing_deployed).unwrap_err();
        assert!(err.to_string().contains("MUMBAI_RPC_URL"));
    }

    #[test]
    fn remote_network_resolves_static_addresses() {
        let env = env_from(&[
            ("MUMBAI_RPC_URL", "https://mumbai.example"),
            ("MUMBAI_ETHERSCAN_API_KEY", "key"),
        ]);
        let profile = resolve_with("polygonMumbai", &env, &nothing_deployed).unwrap();
        assert_eq!(profile.chain_id, 80001);
        assert_eq!(profile.block_confirmations, 6);
        assert_eq!(profile.rpc_url, "https://mumbai.example");
        assert_eq!(profile.explorer_api_key.as_deref(), Some("key"));
        assert_eq!(
            profile.factory().unwrap(),
            address!("1F98431c8aD98523631AE4a59f267346ea31F984")
        );
        assert!(!profile.is_local);
    }

    #[test]
    fn local_network_defaults_and_deployment_fallback() {
        let deployed = |name: &str| match name {
            "TestDAI" => Some(address!("5FbDB2315678afecb367f032d93F642f64180aa3")),
            _ => None,
        };
        let profile = resolve_with("hardhat", &env_from(&[]), &deployed).unwrap();
        assert_eq!(profile.rpc_url, LOCAL_RPC_URL);
        assert_eq!(profile.chain_id, LOCAL_CHAIN_ID);
        assert_eq!(profile.block_confirmations, DEFAULT_BLOCK_CONFIRMATIONS);
        assert_eq!(
            profile.dai().unwrap(),
            address!("5FbDB2315678afecb367f032d93F642f64180aa3")
        );
        // infrastructure is not deployed locally; asking for it is a config error
        assert!(matches!(profile.factory(), Err(WorkflowError::Configuration { .. })));
    }

    #[test]
    fn env_overrides_take_precedence() {
        let env = env_from(&[
            ("OPT_GOERLI_RPC_URL", "https://goerli.example"),
            ("SWAP_ROUTER_ADDRESS", "0x0000000000000000000000000000000000000abc"),
        ]);
        let profile = resolve_with("optimisticGoerli", &env, &nothing_deployed).unwrap();
        assert_eq!(
            profile.swap_router().unwrap(),
            address!("0000000000000000000000000000000000000abc")
        );
    }

    #[test]
    fn malformed_override_is_rejected() {
        let env = env_from(&[("RPC_URL", "http://node"), ("DAI_ADDRESS", "not-an-address")]);
        let err = resolve_with("localhost", &env, &nothing_deployed).unwrap_err();
        assert!(err.to_string().contains("DAI_ADDRESS"));
    }
}
