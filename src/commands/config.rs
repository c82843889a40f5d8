//! `prep config` handlers

use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use prepdeck::config::{migrate_config, MigrateResult};
use prepdeck::theme::{current_theme, Theme};
use prepdeck::Config;

use super::run_editor;

/// Print the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let theme = current_theme();
    println!(
        "{}",
        theme.secondary_text(&format!("# {}", Config::config_path()?.display()))
    );
    println!("{}", theme.primary_text(&toml::to_string_pretty(&config)?));
    Ok(())
}

/// Open the configuration file in `$EDITOR`, creating it first if needed.
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let config_path = Config::config_path()?;
    let theme = current_theme();

    if !config_path.exists() {
        Config::default().save()?;
    }

    println!(
        "{}",
        theme.primary_text(&format!("Opening {}", config_path.display()))
    );
    run_editor(&config_path)?;

    // Report mistakes now rather than on the next command
    if let Err(e) = Config::load() {
        println!("{}", theme.error_text(&format!("Warning: {:#}", e)));
    }
    Ok(())
}

/// Add missing fields to the configuration file.
///
/// Shows what would be added and asks before writing, unless `yes`.
/// Without a terminal on stdin the answer is no.
#[cfg(not(tarpaulin_include))]
pub fn handle_migrate(yes: bool) -> Result<()> {
    let theme = current_theme();
    let config_path = Config::config_path()?;
    let file_exists = config_path.exists();

    let content = if file_exists {
        fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?
    } else {
        String::new()
    };

    let result = migrate_config(&content)?;
    if !result.has_changes() {
        println!("{}", theme.primary_text("Config is already up to date."));
        return Ok(());
    }

    let question = if file_exists {
        println!("{}", theme.primary_text(&summary(&result)));
        format!("Apply these changes to {}?", config_path.display())
    } else {
        println!(
            "{}",
            theme.primary_text("Config file does not exist. Will create it with default settings.")
        );
        format!("Create {}?", config_path.display())
    };
    println!();
    print_diff_preview(&theme, &result, !file_exists);
    println!();

    if !yes && !prompt_confirmation(&question)? {
        println!("{}", theme.primary_text("No changes made."));
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, &result.content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    let done = if file_exists {
        "Config updated."
    } else {
        "Config file created."
    };
    println!("{}", theme.success_text(done));
    Ok(())
}

fn summary(result: &MigrateResult) -> String {
    match result.sections_added.len() {
        0 => format!("Found {} missing field(s):", result.added_fields.len()),
        sections => format!(
            "Found {} missing field(s) in {} new section(s):",
            result.added_fields.len(),
            sections
        ),
    }
}

/// Print added lines of the migrated file with a `+` prefix.
///
/// For a new file every non-empty line counts as added. Otherwise only the
/// added fields are shown, each under its section header.
fn print_diff_preview(theme: &Theme, result: &MigrateResult, is_new_file: bool) {
    let added: HashSet<&str> = result.added_fields.iter().map(String::as_str).collect();
    let mut section = String::new();
    let mut header_printed = false;

    for line in result.content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            section = trimmed[1..trimmed.len() - 1].to_string();
            header_printed = false;
            if is_new_file {
                println!("{}", theme.success_text(&format!("+ {}", line)));
                header_printed = true;
            }
            continue;
        }

        let field = trimmed
            .split_once('=')
            .map(|(key, _)| format!("{}.{}", section, key.trim()));
        let is_added = field.as_deref().is_some_and(|f| added.contains(f));

        if is_new_file || is_added {
            if !header_printed {
                let new_section = result.sections_added.contains(&section);
                let header = format!("[{}]", section);
                if new_section {
                    println!("{}", theme.success_text(&format!("+ {}", header)));
                } else {
                    println!("  {}", header);
                }
                header_printed = true;
            }
            println!("{}", theme.success_text(&format!("+ {}", line)));
        }
    }
}

/// Ask a yes/no question on stdin. Non-interactive stdin answers no.
fn prompt_confirmation(message: &str) -> Result<bool> {
    let theme = current_theme();

    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{}",
            theme.secondary_text("Non-interactive mode: use --yes to apply changes automatically")
        );
        return Ok(false);
    }

    print!("{} [y/N] ", theme.primary_text(message));
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
