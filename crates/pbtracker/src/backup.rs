//! JSON export and import of the whole catalog.
//!
//! The document layout is `{ "games": [...], "settings": {...}, "exportedAt": "..." }`,
//! the same shape the mobile app writes, so backups move in both directions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::model::{Game, Settings};
use crate::storage::RecordStore;

/// A full backup document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// Every game, in collection order.
    pub games: Vec<Game>,
    /// App settings.
    pub settings: Settings,
    /// When the backup was taken.
    pub exported_at: DateTime<Utc>,
}

/// An incoming document; either section may be missing.
#[derive(Debug, Deserialize)]
struct ImportDocument {
    games: Option<Vec<Game>>,
    settings: Option<Settings>,
}

/// What an import changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of games written, or `None` if the document had no games.
    pub games_imported: Option<usize>,
    /// Whether the settings were replaced.
    pub settings_imported: bool,
}

/// Snapshot the store into a [`Backup`].
///
/// # Errors
///
/// Returns an error if the store can't be read.
pub fn snapshot(store: &impl RecordStore) -> Result<Backup> {
    Ok(Backup {
        games: store.games()?,
        settings: store.settings()?,
        exported_at: Utc::now(),
    })
}

/// Export the store as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the store can't be read or serialization fails.
pub fn export_data(store: &impl RecordStore) -> Result<String> {
    let backup = snapshot(store)?;
    let json = serde_json::to_string_pretty(&backup)?;
    info!("Exported {} games", backup.games.len());
    Ok(json)
}

/// Import a JSON backup into the store.
///
/// A `games` section replaces the whole collection and a `settings` section
/// replaces the settings; a missing section leaves that part untouched. Ids in
/// the document are discarded: games get fresh ids and categories are
/// renumbered in order.
///
/// # Errors
///
/// Returns a JSON error for a malformed document, or a validation error if a
/// game or category is incomplete. Games and settings are written in one
/// step, so nothing is written when any part fails.
pub fn import_data(store: &mut impl RecordStore, json: &str) -> Result<ImportSummary> {
    let mut document: ImportDocument = serde_json::from_str(json)?;

    if let Some(games) = &mut document.games {
        for game in games.iter_mut() {
            game.id = None;
            for category in &mut game.categories {
                category.id = 0;
            }
            game.validate()?;
        }
    }

    store.replace_all(document.games.as_deref(), document.settings.as_ref())?;

    let summary = ImportSummary {
        games_imported: document.games.as_ref().map(Vec::len),
        settings_imported: document.settings.is_some(),
    };

    info!(
        "Imported backup: games={:?}, settings={}",
        summary.games_imported, summary.settings_imported
    );
    Ok(summary)
}
