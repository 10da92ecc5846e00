use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;
mod config;

use cli::Cli;
use config::Config;
use revolver::default_output_path;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("revolver")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("revolver.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input, &config.output_suffix));

    let processor = config
        .processor(cli.feature_aware)
        .context("Failed to build processor")?;

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
        println!(
            "  {} nozzles, {} feature mappings, feature switching {}",
            processor.rewriter().nozzles().len(),
            processor.rewriter().features().len(),
            if processor.rewriter().feature_switching() { "on" } else { "off" }
        );
    }

    let summary = processor
        .process_file(&cli.input, &output)
        .context(format!("Failed to process {}", cli.input.display()))?;

    println!(
        "{} Processed {} -> {}",
        "✅".green(),
        summary.input.display(),
        summary.output.display()
    );
    println!("   Added {} revolver commands", summary.selections.to_string().cyan());

    if cli.is_verbose() {
        println!(
            "   {} lines read, {} lines written, {} init blocks",
            summary.lines_read, summary.lines_written, summary.init_blocks
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
