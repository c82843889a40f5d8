//! Command-line definitions
//!
//! Shared between the `prep` binary and `xtask` (man page generation).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::deck::{Preset, SectionKey};

/// Version string shown by `--version`.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("PREPDECK_GIT_SHA"),
    " ",
    env!("PREPDECK_BUILD_DATE"),
    ")"
);

/// Version string shown by `--version`.
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("PREPDECK_BUILD_DATE"),
    ")"
);

/// Write a PREP speech and present it as a timed slideshow.
#[derive(Debug, Parser)]
#[command(
    name = "prep",
    version = VERSION,
    about = "Write a PREP speech (Point, Reason, Example, Summary) and present it on a timer",
    long_about = "Write a PREP speech (Point, Reason, Example, Summary) and present it on a timer.\n\n\
        Edits are saved to a local record immediately. `prep present` plays the four\n\
        sections as a full-screen slideshow that advances on its own.",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the current deck and its timing
    Show,

    /// Replace the text of a section
    #[command(after_help = "Pass `-` as TEXT to read the text from stdin.")]
    Set {
        /// point, reason, example or summary (or p, r, e, s)
        section: SectionKey,
        /// New text (Markdown allowed)
        text: String,
    },

    /// Edit a section in $EDITOR
    Edit {
        /// point, reason, example or summary (or p, r, e, s)
        section: SectionKey,
    },

    /// Set or clear the reference link shown with the example
    Link {
        /// http(s) URL; omit to print the current link
        #[arg(conflicts_with = "clear")]
        url: Option<String>,
        /// Remove the reference link
        #[arg(long)]
        clear: bool,
    },

    /// Set how long a section stays on screen
    Duration {
        /// point, reason, example or summary (or p, r, e, s)
        section: SectionKey,
        /// Seconds, clamped to 3..=90
        #[arg(allow_negative_numbers = true)]
        seconds: f64,
    },

    /// Apply a duration preset to all sections
    Preset {
        /// default (60 s), extended (90 s) or long (120 s)
        name: Preset,
    },

    /// Present the deck full-screen
    Present {
        /// Use a preset's durations for this run only
        #[arg(long)]
        preset: Option<Preset>,
    },

    /// Write a JSON backup of the deck
    Export {
        /// Output file or directory (default: current directory)
        path: Option<PathBuf>,
        /// Prefix the generated file name with the deck title
        #[arg(long)]
        with_title: bool,
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },

    /// Replace the deck with a JSON backup
    Import {
        /// Export file, cloud deck or legacy record
        path: PathBuf,
    },

    /// Save, load and manage decks in cloud storage
    Cloud {
        #[command(subcommand)]
        command: CloudCommands,
    },

    /// Show, edit or migrate the configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum CloudCommands {
    /// Save the current deck (assigns an id on first save)
    Save,
    /// Replace the current deck with a cloud deck
    Load {
        /// Deck id as printed by `prep cloud list`
        id: String,
    },
    /// List cloud decks, newest first
    List,
    /// Delete a cloud deck
    Delete {
        /// Deck id as printed by `prep cloud list`
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Open the configuration file in $EDITOR
    Edit,
    /// Add missing fields to the configuration file
    Migrate {
        /// Apply without asking
        #[arg(long, short)]
        yes: bool,
    },
}
