//! Schema Registry Init CLI
//!
//! Waits for the schema registry, registers every schema in the schema
//! directory and exits non-zero if anything went wrong.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use schema_registry_init::{Console, InitConfig, Initializer, RegistryClient, Tone};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-registry-init")]
#[command(about = "Wait for the schema registry and register all local schemas")]
#[command(version)]
struct Cli {
    /// Config file to load (optional)
    #[arg(short, long)]
    config: Option<String>,

    /// Registry base address (overrides KAFKA_SCHEMA_REGISTRY_URL)
    #[arg(short, long)]
    registry_url: Option<String>,

    /// Directory holding the schema files
    #[arg(short, long)]
    schemas_dir: Option<PathBuf>,

    /// Write a JSON report of the run to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = InitConfig::load_from(cli.config.as_deref())?;
    if let Some(url) = cli.registry_url {
        config.registry.url = url;
    }
    if let Some(dir) = cli.schemas_dir {
        config.schemas.dir = dir;
    }
    if cli.no_color {
        config.output.color = false;
    }

    if cli.print_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut console = Console::stdout(config.output.color);
    let client = match RegistryClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            console.line(Tone::Failure, format!("\u{2717} {}", e));
            return Ok(ExitCode::from(1));
        }
    };
    tracing::debug!(registry = client.base_url(), dir = %config.schemas.dir.display(), "starting run");

    let code = match Initializer::new(&config, &client, &mut console)
        .with_report(cli.report)
        .run()
    {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            tracing::error!(error = %e, "initialization aborted");
            1
        }
    };

    Ok(ExitCode::from(code as u8))
}
