use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "atm-dispenser")]
#[command(about = "Greedy ATM cash dispenser")]
pub struct CliConfig {
    /// Path to the machine TOML file
    #[arg(short, long, default_value = "atm-config.toml")]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Withdraw one or more amounts in order, stopping at the first failure
    Withdraw {
        #[arg(required = true)]
        amounts: Vec<u64>,

        /// Print each breakdown as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the loaded cassettes
    Inventory,
    /// GET a health endpoint under the configured base_url
    Health {
        #[arg(long, default_value = "/health")]
        endpoint: String,

        #[arg(long, default_value = "200")]
        expect: u16,
    },
}
