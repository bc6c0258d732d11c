mod analytics;
mod cli;
mod config;
mod error;
mod gateway;
mod insights;
mod repos;
mod report_helpers;
mod scan;
mod util;
mod walk;

use std::path::PathBuf;

use clap::Parser;

use cli::{Cli, Commands, GlobalArgs};
use config::Config;
use scan::ScanOptions;

fn init_tracing(global: &GlobalArgs) {
    let level = if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("VIBECHECK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("warning: failed to initialize logging: {err}");
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(cli.global.config.as_deref())?;
    let workers = config.gateway.workers.max(1);

    match cli.command {
        Commands::Scan {
            path,
            extensions,
            max_files,
            focus,
            top,
            offline,
            json,
        } => {
            let target = path.unwrap_or_else(|| PathBuf::from("."));
            let mut pinned = config.focus.files;
            pinned.extend(focus);
            let options = ScanOptions {
                extensions: if extensions.is_empty() {
                    config.scan.extensions
                } else {
                    extensions
                },
                max_files: max_files.unwrap_or(config.scan.max_files),
                focus: pinned,
                workers,
            };
            let gateway = gateway::from_config(&config.gateway, offline);
            scan::run(&target, json, top, &options, gateway.as_ref())
        }
        Commands::Analytics {
            history,
            json,
            offline,
        } => {
            let gateway = gateway::from_config(&config.gateway, offline);
            analytics::run(&history, json, gateway.as_ref())
        }
        Commands::Catchup {
            history,
            topic,
            json,
        } => {
            let gateway = gateway::from_config(&config.gateway, false);
            analytics::run_catchup(&history, &topic, json, gateway.as_ref())
        }
        Commands::Insights {
            history,
            session,
            json,
        } => {
            let gateway = gateway::from_config(&config.gateway, false);
            insights::run(&history, session, json, gateway.as_ref())
        }
        Commands::Repos { group, json } => {
            let gateway = gateway::from_config(&config.gateway, false);
            repos::run(&group, json, gateway.as_ref(), workers)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.global);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
