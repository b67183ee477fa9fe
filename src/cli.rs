use clap::{Parser, Subcommand};

/// Deploys test tokens and exercises a Uniswap V3 pool on EVM test networks.
#[derive(Parser, PartialEq, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Network to run against (localhost, hardhat, optimisticGoerli, polygonMumbai)
    #[clap(long, env = "NETWORK", default_value = "hardhat")]
    pub network: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, PartialEq, Debug)]
pub enum Command {
    /// Deploys the test tokens and the swap example contract.
    Deploy {
        /// Only deploy contracts carrying this tag (repeatable): all, tokens, swapExamples
        #[clap(long = "tag")]
        tags: Vec<String>,
    },
    /// Creates the pool, mints a position, swaps and reports balances.
    Run,
    /// Prints the pool state and the pool and owner balances.
    Balances,
}
