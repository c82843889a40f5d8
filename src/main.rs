//! prep - write and present PREP speeches

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use prepdeck::cli::{CloudCommands, Cli, Commands, ConfigCommands};
use prepdeck::{logging, Config};

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config problems must not lock the user out of `prep config edit`
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {:#}. Using default settings.", e);
            Config::default()
        }
    };

    if let Err(e) = logging::init(&config.logging.level) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    debug!(command = ?cli.command, "starting");

    match cli.command {
        Commands::Show => commands::deck::handle_show(&config),
        Commands::Set { section, text } => commands::deck::handle_set(&config, section, &text),
        Commands::Edit { section } => commands::deck::handle_edit(&config, section),
        Commands::Link { url, clear } => commands::deck::handle_link(&config, url.as_deref(), clear),
        Commands::Duration { section, seconds } => {
            commands::deck::handle_duration(&config, section, seconds)
        }
        Commands::Preset { name } => commands::deck::handle_preset(&config, name),
        Commands::Present { preset } => commands::present::handle(&config, preset),
        Commands::Export {
            path,
            with_title,
            force,
        } => commands::exchange::handle_export(&config, path.as_deref(), with_title, force),
        Commands::Import { path } => commands::exchange::handle_import(&config, &path),
        Commands::Cloud { command } => match command {
            CloudCommands::Save => commands::cloud::handle_save(&config),
            CloudCommands::Load { id } => commands::cloud::handle_load(&config, &id),
            CloudCommands::List => commands::cloud::handle_list(&config),
            CloudCommands::Delete { id } => commands::cloud::handle_delete(&config, &id),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Edit => commands::config::handle_edit(),
            ConfigCommands::Migrate { yes } => commands::config::handle_migrate(yes),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
