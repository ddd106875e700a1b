//! Command-line interface for pbtracker.
//!
//! This module provides the CLI structure for the `pbtrack` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CalcCommand, CategoryAddArgs, CategoryCommand, CategoryUpdateArgs, ConfigCommand,
    ExportCommand, GameCommand, GameUpdateArgs, ImportCommand, RemindersCommand, SectionArg,
    SettingsCommand, StatsCommand,
};

/// pbtrack - Track your speedrun personal bests
///
/// Keeps a catalog of games, categories, PB times and placements, and works
/// out who you need to beat next and by how much.
#[derive(Debug, Parser)]
#[command(name = "pbtrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Time and placement arithmetic
    #[command(subcommand)]
    Calc(CalcCommand),

    /// Manage games
    #[command(subcommand)]
    Game(GameCommand),

    /// Manage run categories
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Show collection statistics
    Stats(StatsCommand),

    /// List upcoming run reminders
    Reminders(RemindersCommand),

    /// Export all data as JSON
    Export(ExportCommand),

    /// Import a JSON backup
    Import(ImportCommand),

    /// View or change app settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Command {
    /// Whether this command reads or writes the record store.
    #[must_use]
    pub fn needs_storage(&self) -> bool {
        !matches!(self, Self::Calc(_) | Self::Config(_))
    }
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Stats(StatsCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "pbtrack");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;
        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_calc_diff() {
        let cli = Cli::try_parse_from(["pbtrack", "calc", "diff", "1:00:00", "1:20:00"]).unwrap();
        match cli.command {
            Command::Calc(CalcCommand::Diff { pb, target }) => {
                assert_eq!(pb, "1:00:00");
                assert_eq!(target, "1:20:00");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_calc_next_negative() {
        let cli = Cli::try_parse_from(["pbtrack", "calc", "next", "-3"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Calc(CalcCommand::Next { placement: -3 })
        ));
    }

    #[test]
    fn test_parse_game_add() {
        let cli = Cli::try_parse_from([
            "pbtrack", "game", "add", "Celeste", "--section", "ils", "--tags", "a,b",
        ])
        .unwrap();
        match cli.command {
            Command::Game(GameCommand::Add {
                title,
                section,
                tags,
                ..
            }) => {
                assert_eq!(title, "Celeste");
                assert_eq!(section, SectionArg::Ils);
                assert_eq!(tags, vec!["a", "b"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_category_add_requires_pb() {
        assert!(Cli::try_parse_from(["pbtrack", "category", "add", "1", "Any%"]).is_err());
        let cli = Cli::try_parse_from([
            "pbtrack", "category", "add", "1", "Any%", "--pb", "27:00", "-p", "4",
        ])
        .unwrap();
        match cli.command {
            Command::Category(CategoryCommand::Add(args)) => {
                assert_eq!(args.placement, 4);
                assert_eq!(args.pb, "27:00");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_config_and_verbose() {
        let cli =
            Cli::try_parse_from(["pbtrack", "-c", "/custom/config.toml", "-v", "stats"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_needs_storage() {
        let calc = Cli::try_parse_from(["pbtrack", "calc", "format", "90"]).unwrap();
        assert!(!calc.command.needs_storage());

        let stats = Cli::try_parse_from(["pbtrack", "stats"]).unwrap();
        assert!(stats.command.needs_storage());
    }
}
