//! Deploy-or-reuse of the planned contracts

use alloy::primitives::keccak256;
use chrono::Utc;
use tracing::{info, warn};
use crate::{
    config::NetworkProfile,
    errors::{WorkflowError, WorkflowResult},
    gateway::ChainGateway,
    storage::{DeploymentRecord, DeploymentStore},
};
use super::{
    artifacts::ArtifactStore,
    plan::{select, PlannedContract},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentAction {
    Deployed,
    Reused,
}

#[derive(Debug, Clone)]
pub struct DeploymentResult {
    pub action: DeploymentAction,
    pub record: DeploymentRecord,
}

pub struct Deployer<'a> {
    gateway: &'a dyn ChainGateway,
    profile: &'a NetworkProfile,
    artifacts: ArtifactStore,
    store: DeploymentStore,
}

impl<'a> Deployer<'a> {
    pub fn new(
        gateway: &'a dyn ChainGateway,
        profile: &'a NetworkProfile,
        artifacts: ArtifactStore,
        store: DeploymentStore,
    ) -> Self {
        Self {
            gateway,
            profile,
            artifacts,
            store,
        }
    }

    /// Deploys every planned contract carrying one of `tags` (all of them
    /// when `tags` is empty), in plan order.
    pub async fn deploy_tagged(&self, tags: &[String]) -> WorkflowResult<Vec<DeploymentResult>> {
        let selected = select(tags);
        if selected.is_empty() {
            warn!("⚠️ No contracts match tags {:?}", tags);
        }

        let mut results = Vec::with_capacity(selected.len());
        for contract in &selected {
            results.push(self.deploy_one(contract).await?);
        }
        Ok(results)
    }

    async fn deploy_one(&self, contract: &PlannedContract) -> WorkflowResult<DeploymentResult> {
        let artifact = self.artifacts.load(contract.name)?;
        let init_code = contract.init_code(&artifact.bytecode);
        let init_code_hash = keccak256(&init_code);

        if let Some(existing) = self.store.load(&self.profile.name, contract.name)? {
            if existing.init_code_hash == init_code_hash && self.gateway.has_code(existing.address).await? {
                info!("♻️ Reusing {} at {}", contract.name, existing.address);
                return Ok(DeploymentResult {
                    action: DeploymentAction::Reused,
                    record: existing,
                });
            }
        }

        info!("📦 Deploying {} with args {:?}", contract.name, contract.display_args());
        let outcome = self.gateway.deploy(init_code).await?;
        let address = outcome.contract_address.ok_or_else(|| {
            WorkflowError::rejected("deploy", format!("{} receipt has no contract address", contract.name))
        })?;

        let record = DeploymentRecord {
            contract_name: contract.name.to_string(),
            network: self.profile.name.clone(),
            chain_id: self.profile.chain_id,
            address,
            tx_hash: Some(outcome.tx_hash),
            block_number: outcome.block_number,
            constructor_args: contract.display_args(),
            init_code_hash,
            deployed_at: Utc::now(),
        };
        self.store.save(&record)?;
        info!("✅ {} deployed at {}", contract.name, address);

        if !self.profile.is_local && self.profile.explorer_api_key.is_some() {
            info!(
                "🔎 Explorer key configured; source verification of {} is left to external tooling",
                contract.name
            );
        }

        Ok(DeploymentResult {
            action: DeploymentAction::Deployed,
            record,
        })
    }
}
