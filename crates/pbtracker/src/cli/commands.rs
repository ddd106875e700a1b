//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::{Category, CategoryUpdate, GameUpdate, Section};

/// Time arithmetic commands.
#[derive(Debug, Subcommand)]
pub enum CalcCommand {
    /// Convert a time string (MM:SS or HH:MM:SS) to seconds
    Parse {
        /// The time string
        time: String,
    },

    /// Convert seconds to a time string
    Format {
        /// Whole seconds
        seconds: u64,
    },

    /// Show how much a PB must improve to reach a target time
    Diff {
        /// Personal best
        pb: String,
        /// Time to beat
        target: String,
    },

    /// Show who to chase from a placement
    Next {
        /// Current placement (1 = world record)
        #[arg(allow_negative_numbers = true)]
        placement: i64,
    },
}

/// Game management commands.
#[derive(Debug, Subcommand)]
pub enum GameCommand {
    /// Add a game
    Add {
        /// Game title
        title: String,

        /// Section to file the game under
        #[arg(short, long, value_enum, default_value = "full-runs")]
        section: SectionArg,

        /// Cover image path or URL
        #[arg(long)]
        image: Option<String>,

        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Mark as favorite
        #[arg(long)]
        favorite: bool,
    },

    /// List all games
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show a game and its categories
    Show {
        /// Game id
        id: i64,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Update a game
    Update(GameUpdateArgs),

    /// Remove a game and all its categories
    Remove {
        /// Game id
        id: i64,
    },
}

/// Arguments for `game update`.
#[derive(Debug, Args)]
pub struct GameUpdateArgs {
    /// Game id
    pub id: i64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New section
    #[arg(short, long, value_enum)]
    pub section: Option<SectionArg>,

    /// New cover image
    #[arg(long)]
    pub image: Option<String>,

    /// Replace tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    /// Set favorite flag
    #[arg(long)]
    pub favorite: Option<bool>,
}

impl From<GameUpdateArgs> for GameUpdate {
    fn from(args: GameUpdateArgs) -> Self {
        Self {
            title: args.title,
            image: args.image,
            section: args.section.map(Section::from),
            tags: args.tags,
            is_favorite: args.favorite,
        }
    }
}

/// Category management commands.
#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// Add a category to a game
    Add(CategoryAddArgs),

    /// Update a category
    Update(CategoryUpdateArgs),

    /// Remove a category from a game
    Remove {
        /// Game id
        game_id: i64,
        /// Category id
        category_id: u32,
    },
}

/// Arguments for `category add`.
#[derive(Debug, Args)]
pub struct CategoryAddArgs {
    /// Game id
    pub game_id: i64,

    /// Category name (e.g. "Any%")
    pub name: String,

    /// Personal best (MM:SS or HH:MM:SS)
    #[arg(long)]
    pub pb: String,

    /// Leaderboard placement
    #[arg(short, long, default_value_t = 1)]
    pub placement: u32,

    /// Time of the runner one place above
    #[arg(long)]
    pub time_to_beat: Option<String>,

    /// Sum of best segments
    #[arg(long)]
    pub sum_of_best: Option<String>,

    /// Date of the PB run (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Date the next run is eligible (YYYY-MM-DD)
    #[arg(long)]
    pub eligible: Option<String>,

    /// Link to the run video
    #[arg(long)]
    pub video: Option<String>,

    /// Notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Leaderboard variables
    #[arg(long)]
    pub variables: Option<String>,

    /// Mark as favorite
    #[arg(long)]
    pub favorite: bool,
}

impl CategoryAddArgs {
    /// Build the category record, with derived fields filled in.
    #[must_use]
    pub fn to_category(&self) -> Category {
        let mut category = Category::new(self.name.clone(), self.placement, self.pb.clone());
        category.time_to_beat = self.time_to_beat.clone().unwrap_or_default();
        category.sum_of_best.clone_from(&self.sum_of_best);
        category.date_of_run = self.date.clone().unwrap_or_default();
        category.next_run_eligible.clone_from(&self.eligible);
        category.video_link.clone_from(&self.video);
        category.notes.clone_from(&self.notes);
        category.variables.clone_from(&self.variables);
        category.is_favorite = self.favorite;
        category.refresh_derived();
        category
    }
}

/// Arguments for `category update`.
#[derive(Debug, Args)]
pub struct CategoryUpdateArgs {
    /// Game id
    pub game_id: i64,

    /// Category id
    pub category_id: u32,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New personal best; the old one is kept in the history
    #[arg(long)]
    pub pb: Option<String>,

    /// New placement
    #[arg(short, long)]
    pub placement: Option<u32>,

    /// New time to beat
    #[arg(long)]
    pub time_to_beat: Option<String>,

    /// New sum of best
    #[arg(long)]
    pub sum_of_best: Option<String>,

    /// New run date
    #[arg(long)]
    pub date: Option<String>,

    /// New eligibility date
    #[arg(long)]
    pub eligible: Option<String>,

    /// New video link
    #[arg(long)]
    pub video: Option<String>,

    /// New notes
    #[arg(long)]
    pub notes: Option<String>,

    /// New leaderboard variables
    #[arg(long)]
    pub variables: Option<String>,

    /// Set favorite flag
    #[arg(long)]
    pub favorite: Option<bool>,
}

impl From<CategoryUpdateArgs> for CategoryUpdate {
    fn from(args: CategoryUpdateArgs) -> Self {
        Self {
            name: args.name,
            placement: args.placement,
            pb_time: args.pb,
            sum_of_best: args.sum_of_best,
            date_of_run: args.date,
            time_to_beat: args.time_to_beat,
            next_run_eligible: args.eligible,
            video_link: args.video,
            notes: args.notes,
            variables: args.variables,
            is_favorite: args.favorite,
        }
    }
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Reminders command arguments.
#[derive(Debug, Args)]
pub struct RemindersCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Backup file to import
    pub file: PathBuf,
}

/// Settings commands.
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Change settings
    Set {
        /// Use the dark theme
        #[arg(long)]
        dark_mode: Option<bool>,

        /// Image for games without one
        #[arg(long)]
        default_image: Option<String>,

        /// Enable run reminders
        #[arg(long)]
        notifications: Option<bool>,

        /// Add a tag preset (repeatable)
        #[arg(long = "add-tag")]
        add_tags: Vec<String>,

        /// Remove a tag preset (repeatable)
        #[arg(long = "remove-tag")]
        remove_tags: Vec<String>,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Section argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionArg {
    /// Individual levels
    Ils,
    /// Full-game runs
    FullRuns,
    /// Multi-game runs
    MultiRuns,
    /// Troll runs
    TrollRuns,
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Ils => Self::IndividualLevels,
            SectionArg::FullRuns => Self::FullRuns,
            SectionArg::MultiRuns => Self::MultiRuns,
            SectionArg::TrollRuns => Self::TrollRuns,
        }
    }
}
