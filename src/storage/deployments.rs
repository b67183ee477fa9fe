//! Deployment records, one JSON file per contract and network

use alloy::primitives::{Address, TxHash, B256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;
use crate::errors::{WorkflowError, WorkflowResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub contract_name: String,
    pub network: String,
    pub chain_id: u64,
    pub address: Address,
    pub tx_hash: Option<TxHash>,
    pub block_number: Option<u64>,
    pub constructor_args: Vec<String>,
    /// keccak256 of bytecode plus encoded constructor arguments
    pub init_code_hash: B256,
    pub deployed_at: DateTime<Utc>,
}

/// `<root>/<network>/<ContractName>.json`
#[derive(Debug, Clone)]
pub struct DeploymentStore {
    root: PathBuf,
}

impl DeploymentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, network: &str, contract_name: &str) -> PathBuf {
        self.root.join(network).join(format!("{}.json", contract_name))
    }

    pub fn load(&self, network: &str, contract_name: &str) -> WorkflowResult<Option<DeploymentRecord>> {
        let path = self.record_path(network, contract_name);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| WorkflowError::storage(format!("reading {}", path.display()), e))?;
        let record = serde_json::from_str(&raw)
            .map_err(|e| WorkflowError::storage(format!("parsing {}", path.display()), e))?;
        Ok(Some(record))
    }

    pub fn save(&self, record: &DeploymentRecord) -> WorkflowResult<PathBuf> {
        let path = self.record_path(&record.network, &record.contract_name);
        let context = || format!("writing {}", path.display());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WorkflowError::storage(context(), e))?;
        }
        let json = serde_json::to_string_pretty(record).map_err(|e| WorkflowError::storage(context(), e))?;
        std::fs::write(&path, json).map_err(|e| WorkflowError::storage(context(), e))?;
        debug!("wrote deployment record {}", path.display());
        Ok(path)
    }

    /// Address of a recorded deployment. Unreadable records count as absent.
    pub fn address_of(&self, network: &str, contract_name: &str) -> Option<Address> {
        self.load(network, contract_name).ok().flatten().map(|r| r.address)
    }
}
