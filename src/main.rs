//! v3-pool-workbench - command line entry point

use alloy::{
    network::Ethereum,
    primitives::Address,
    providers::Provider,
    transports::{
        http::{Client, Http},
        BoxTransport,
    },
};
use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use v3_pool_workbench::{
    cli::{Cli, Command},
    config::{resolve, NetworkProfile, Settings},
    deploy::{ArtifactStore, Deployer, DeploymentAction},
    errors::{WorkflowError, WorkflowResult},
    gateway::AlloyGateway,
    network::{connect_read_only, connect_signer, load_signer, probe_chain_id},
    storage::{save_balance_report, save_run_summary, DeploymentStore},
    types::TokenInfo,
    utils::{self, display},
    workflow::{self, WorkflowPlan},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::load()?;
    utils::setup_output_directories(&settings.output_dir)?;
    let _logging_guard = utils::setup_logging(&settings.logs_dir())?;

    info!("🧪 v3-pool-workbench v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = execute(&cli, &settings).await {
        error!(kind = e.kind(), "❌ {}", e);
        return Err(e.into());
    }
    Ok(())
}

fn signing_gateway(
    profile: &NetworkProfile,
    settings: &Settings,
) -> WorkflowResult<AlloyGateway<Http<Client>, impl Provider<Http<Client>, Ethereum> + Clone + 'static>> {
    let signer = load_signer(settings.require_private_key()?)?;
    let (owner, provider) = connect_signer(&profile.rpc_url, signer)?;
    info!("🔑 Signing as {}", owner);
    Ok(AlloyGateway::new(
        provider,
        owner,
        &profile.rpc_url,
        profile.block_confirmations,
        settings.tx_timeout(),
    ))
}

async fn execute(cli: &Cli, settings: &Settings) -> WorkflowResult<()> {
    let deployments = DeploymentStore::new(&settings.deployments_dir);
    let profile = resolve(&cli.network, &deployments)?;
    display::print_network_profile(&profile);

    let read_only = connect_read_only(&profile.rpc_url)?;
    probe_chain_id(&read_only, &profile).await?;

    match &cli.command {
        Command::Deploy { tags } => {
            let gateway = signing_gateway(&profile, settings)?;
            let deployer = Deployer::new(
                &gateway,
                &profile,
                ArtifactStore::new(&settings.artifacts_dir),
                deployments,
            );
            let results = deployer.deploy_tagged(tags).await?;
            let deployed = results.iter().filter(|r| r.action == DeploymentAction::Deployed).count();
            info!("📦 {} deployed, {} reused", deployed, results.len() - deployed);
        }
        Command::Run => {
            let gateway = signing_gateway(&profile, settings)?;
            let plan = WorkflowPlan::from_settings(settings, &profile)?;
            let summary = workflow::run(&gateway, &profile, &plan).await?;
            let path = save_run_summary(&settings.reports_dir(), &summary)?;
            info!("🏁 Run {} complete, summary in {}", summary.run_id, path.display());
        }
        Command::Balances => {
            let owner = settings
                .private_key
                .as_deref()
                .map(load_signer)
                .transpose()?
                .map(|signer| signer.address());
            let gateway = AlloyGateway::<BoxTransport, _>::new(
                read_only,
                owner.unwrap_or(Address::ZERO),
                &profile.rpc_url,
                profile.block_confirmations,
                settings.tx_timeout(),
            );

            let (dai, usdc) = (profile.dai()?, profile.usdc()?);
            let pool = workflow::pool_by_tokens_and_fee(&gateway, &profile, dai, usdc, settings.pool_fee).await?;
            if pool == Address::ZERO {
                return Err(WorkflowError::NotFound {
                    what: format!("pool for DAI/USDC at fee {}", settings.pool_fee),
                    address: None,
                });
            }
            let (immutables, state) = workflow::fetch_pool(&gateway, pool).await?;
            display::print_pool_summary(&pool, &immutables, &state);

            let mut holders = vec![("pool".to_string(), pool)];
            if let Some(owner) = owner {
                holders.push(("owner".to_string(), owner));
            }
            let tokens = vec![
                TokenInfo::new("DAI", dai, settings.token_decimals),
                TokenInfo::new("USDC", usdc, settings.token_decimals),
            ];
            let report = workflow::collect_report(&gateway, "current", &holders, &tokens).await?;
            display::print_balance_report(&report);
            save_balance_report(&settings.reports_dir(), &report)?;
        }
    }
    Ok(())
}
