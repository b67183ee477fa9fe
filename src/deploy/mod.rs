//! Test token and example contract deployment

pub mod artifacts;
pub mod deployer;
pub mod plan;

pub use artifacts::{ArtifactStore, ContractArtifact};
pub use deployer::{Deployer, DeploymentAction, DeploymentResult};
pub use plan::{deployment_plan, initial_supply, PlannedContract, TAG_ALL};
