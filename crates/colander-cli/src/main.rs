//! Colander CLI - emoji catalog curation tool.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use log::LevelFilter;

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if std::env::var("RUST_LOG").is_err() {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        builder.filter_level(level);
    }
    let _ = builder.format_timestamp_millis().try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect { file, json } => commands::inspect::run(file, json),

        Commands::Export(args) => commands::export::run(args),

        Commands::Replay {
            base,
            edited,
            output,
        } => commands::replay::run(base, edited, output),

        Commands::Diff { file, base, json } => commands::diff::run(file, base, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
