use anyhow::Result;
use clap::Parser;
use herald_game::error::logging::{self, LogFormat, LogOutput};
use std::path::PathBuf;

mod app;
mod config;

use app::GameApp;
use config::{LaunchOptions, Preset};

#[derive(Parser)]
#[command(name = "herald-demo")]
#[command(about = "A demo game process driven by the Herald engine over stdio")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in content used when no configuration file is given
    #[arg(short, long, value_enum, default_value = "demo")]
    preset: Preset,

    /// Keep reading after an unknown command instead of stopping
    #[arg(long)]
    continue_on_unknown: bool,

    /// Skip commands with malformed arguments instead of stopping
    #[arg(long)]
    skip_malformed: bool,

    /// Print the resolved configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Emit log records as JSON
    #[arg(long)]
    log_json: bool,

    /// Append log records to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout stays reserved for the engine
    let mut logging_config = logging::config_from_env();
    if cli.log_json {
        logging_config.format = LogFormat::Json;
    }
    if let Some(path) = cli.log_file {
        logging_config.output = LogOutput::File(path);
    }
    logging::init_logging(logging_config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let options = LaunchOptions {
        config_file: cli.config,
        preset: cli.preset,
        continue_on_unknown: cli.continue_on_unknown,
        skip_malformed: cli.skip_malformed,
    };
    let config = options.resolve()?;

    if cli.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    GameApp::new(config).run()?;

    Ok(())
}
