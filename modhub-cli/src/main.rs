//! modhub CLI
//!
//! Command-line interface for harvesting the game mod catalog.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Run {
            output,
            icons,
            config,
        } => commands::run::run_harvest(output, icons, config, cli.quiet),
        Commands::Config { action } => match action {
            ConfigAction::Show { config } => commands::config::run_config_show(config),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
