use anyhow::Result;
use clap::Parser;
use log::{ debug, error, info };

use ptltl_bench::implementations::config::ToolConfig;
use ptltl_bench::implementations::schema_registry::SchemaRegistry;
mod cli;
use cli::{ BenchCli, Commands };

#[tokio::main]
async fn main() {
    let cli = BenchCli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        cli::ui::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: BenchCli) -> Result<()> {
    setup_logging(&cli.log_level);

    // A missing .env is normal; keys may come from the environment
    if let Err(e) = dotenv::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let config = ToolConfig::load(cli.config.as_deref())?;
    let registry = SchemaRegistry::from_config(&config)?;

    match &cli.command {
        Commands::Check { reference, generated, domain, show_model } => {
            cli::commands::check::execute(
                &config,
                registry,
                reference,
                generated,
                domain.as_deref(),
                *show_model
            ).await?;
        }

        Commands::CheckLtl { first, second } => {
            cli::commands::check_ltl::execute(first, second)?;
        }

        Commands::Normalize { formula } => {
            cli::commands::normalize::execute(formula)?;
        }

        Commands::Schema { domain, table } => {
            cli::commands::schema::execute(&registry, domain.as_deref(), *table)?;
        }

        Commands::Vars { input, domain } => {
            cli::commands::vars::execute(&registry, input, domain.as_deref())?;
        }

        Commands::Translate { input, chunk_size, run } => {
            cli::commands::runs::translate(&config, &registry, input, *chunk_size, run).await?;
        }

        Commands::RoundTrip { input, run } => {
            cli::commands::runs::round_trip(&config, &registry, input, run).await?;
        }

        Commands::Synthetic { run } => {
            cli::commands::runs::synthetic(&config, &registry, run).await?;
        }

        Commands::Ltl { input, model, temperature, iterations, output } => {
            cli::commands::runs::ltl(
                &config,
                &registry,
                input,
                model.clone(),
                *temperature,
                *iterations,
                output.clone()
            ).await?;
        }

        Commands::Doctor => {
            cli::commands::doctor::execute(&config, &registry).await?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
