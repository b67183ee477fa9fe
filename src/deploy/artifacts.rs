//! Compiled contract artifacts in the Hardhat layout

use alloy::primitives::Bytes;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use crate::errors::{WorkflowError, WorkflowResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub bytecode: Bytes,
}

/// Reads `<root>/contracts/<Name>.sol/<Name>.json`.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, contract_name: &str) -> PathBuf {
        self.root
            .join("contracts")
            .join(format!("{}.sol", contract_name))
            .join(format!("{}.json", contract_name))
    }

    pub fn load(&self, contract_name: &str) -> WorkflowResult<ContractArtifact> {
        let path = self.path_for(contract_name);
        let artifact = read_artifact(&path)?;
        if artifact.bytecode.is_empty() {
            return Err(WorkflowError::config(format!(
                "{} has no creation bytecode (abstract contract or interface?)",
                path.display()
            )));
        }
        Ok(artifact)
    }
}

fn read_artifact(path: &Path) -> WorkflowResult<ContractArtifact> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        WorkflowError::config(format!("artifact {} unreadable ({}); compile the contracts first", path.display(), e))
    })?;
    serde_json::from_str(&raw)
        .map_err(|e| WorkflowError::storage(format!("parsing artifact {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_artifact(root: &Path, name: &str, bytecode: &str) {
        let dir = root.join("contracts").join(format!("{}.sol", name));
        std::fs::create_dir_all(&dir).unwrap();
        let json = serde_json::json!({
            "_format": "hh-sol-artifact-1",
            "contractName": name,
            "sourceName": format!("contracts/{}.sol", name),
            "abi": [],
            "bytecode": bytecode,
            "deployedBytecode": "0x",
        });
        std::fs::write(dir.join(format!("{}.json", name)), json.to_string()).unwrap();
    }

    #[test]
    fn loads_creation_bytecode() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "TestDAI", "0x6080604052");

        let artifact = ArtifactStore::new(dir.path()).load("TestDAI").unwrap();
        assert_eq!(artifact.contract_name, "TestDAI");
        assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn empty_bytecode_and_missing_files_are_configuration_errors() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "IERC20", "0x");
        let store = ArtifactStore::new(dir.path());

        assert_eq!(store.load("IERC20").unwrap_err().kind(), "configuration");
        assert_eq!(store.load("WETH").unwrap_err().kind(), "configuration");
    }
}
