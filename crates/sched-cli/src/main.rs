use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sched_cli::commands::{
    day, import, init, place, proposals, service, show, slot, track, unplace, validate,
};
use sched_cli::{Cli, Commands, Config, DayAction};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout();
    match &cli.command {
        Commands::Init => init::run(&mut stdout, &config),
        Commands::Import { file } => import::run(&mut stdout, &config, file),
        Commands::Proposals => proposals::run(&mut stdout, &config),
        Commands::Day { action } => match action {
            DayAction::Add { date } => day::add(&mut stdout, &config, *date),
            DayAction::List => day::list(&mut stdout, &config),
        },
        Commands::Track { action } => track::run(&mut stdout, &config, action),
        Commands::Place {
            proposal,
            date,
            track,
            at,
        } => place::run(&mut stdout, &config, proposal, *date, *track, *at),
        Commands::Unplace { date, track, entry } => {
            unplace::run(&mut stdout, &config, *date, *track, *entry)
        }
        Commands::Service { action } => service::run(&mut stdout, &config, action),
        Commands::Slot {
            date,
            track,
            duration,
            near,
        } => slot::run(&mut stdout, &config, *date, *track, *duration, *near),
        Commands::Show { date } => show::run(&mut stdout, &config, *date),
        Commands::Validate => validate::run(&mut stdout, &config),
    }
}
