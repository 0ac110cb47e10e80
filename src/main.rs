use atm_dispenser::utils::error::{AtmError, ErrorSeverity, Result};
use atm_dispenser::utils::{logger, validation::Validate};
use atm_dispenser::{check_health, CliConfig, Command, MachineConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // Load the machine file
    let config = match MachineConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load machine file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // Init logging
    logger::init_logger(config.log_format(), args.verbose);
    tracing::info!("Starting atm-dispenser for machine '{}'", config.machine.name);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    match args.command {
        Command::Withdraw { amounts, json } => {
            if let Err(e) = run_withdrawals(&config, &amounts, json) {
                fail(&e);
            }
        }
        Command::Inventory => show_inventory(&config),
        Command::Health { endpoint, expect } => {
            run_health_check(&config, &endpoint, expect).await
        }
    }

    Ok(())
}

fn run_withdrawals(config: &MachineConfig, amounts: &[u64], json: bool) -> Result<()> {
    let mut atm = config.build_dispenser()?;
    tracing::debug!("Commit policy: {:?}", atm.policy());

    for &amount in amounts {
        match atm.withdraw(amount) {
            Ok(result) => {
                if json {
                    println!("{}", result.to_json()?);
                } else {
                    println!("✅ {}: {}", amount, result);
                }
            }
            Err(e) => {
                if e.may_have_mutated_inventory() {
                    tracing::warn!(
                        "Inventory after failed withdrawal: {} remaining",
                        atm.inventory().total_value()
                    );
                }
                return Err(e);
            }
        }
    }

    tracing::info!(
        "Bank balance for {}: {}",
        atm.authorizer().account(),
        atm.authorizer().current_balance()
    );
    Ok(())
}

fn show_inventory(config: &MachineConfig) {
    let inventory = match config.build_inventory() {
        Ok(inventory) => inventory,
        Err(e) => fail(&e),
    };

    println!("💵 {} ({} total)", config.machine.name, inventory.total_value());
    for (denomination, count) in inventory.iter() {
        println!("  {:>6} x {}", denomination, count);
    }
}

async fn run_health_check(config: &MachineConfig, endpoint: &str, expect: u16) {
    let base_url = match config.base_url() {
        Ok(url) => url,
        Err(e) => fail(&e),
    };

    let client = reqwest::Client::new();
    match check_health(&client, base_url, endpoint).await {
        Ok(report) if report.is_expected(expect) => {
            println!("✅ {} -> {}", report.url, report.status);
        }
        Ok(report) => {
            eprintln!("❌ {} -> {} (expected {})", report.url, report.status, expect);
            std::process::exit(2);
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &AtmError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
