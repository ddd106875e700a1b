//! `pbtracker` - Personal speedrun progress tracking
//!
//! This library provides the core functionality for keeping a catalog of
//! games and run categories, deriving placement and time-gap information,
//! and persisting everything to a local database.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod reminder;
pub mod stats;
pub mod storage;
pub mod timecalc;

pub use backup::{export_data, import_data, Backup, ImportSummary};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{Category, CategoryUpdate, Game, GameUpdate, Section, Settings};
pub use stats::Stats;
pub use storage::{RecordStore, Storage};
pub use timecalc::{
    format_time, next_person_to_beat, parse_time, time_difference, TimeDifference,
};
