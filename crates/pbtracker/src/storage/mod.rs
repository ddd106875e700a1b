//! Storage layer for pbtracker.
//!
//! This module provides the [`RecordStore`] abstraction over the game
//! collection and settings, and [`Storage`], its `SQLite` implementation with
//! record-level add/update/delete operations.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{Category, CategoryUpdate, Game, GameUpdate, Section, Settings};

/// Metadata key holding the settings JSON.
const SETTINGS_KEY: &str = "settings";

const GAME_COLUMNS: &str =
    "id, title, image, section, categories, tags, is_favorite, created_at, updated_at";

/// Persistence for the ordered game collection and the settings record.
///
/// Anything that needs to read or replace the whole catalog (backups,
/// statistics) goes through this trait rather than a concrete store.
pub trait RecordStore {
    /// All games, in collection order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store can't be read.
    fn games(&self) -> Result<Vec<Game>>;

    /// Replace the whole collection with `games`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if any game fails validation or the write fails.
    /// On error the previous collection is left intact.
    fn save_games(&mut self, games: &[Game]) -> Result<()>;

    /// The stored settings, or defaults if none have been saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store can't be read.
    fn settings(&self) -> Result<Settings>;

    /// Replace the stored settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_settings(&mut self, settings: &Settings) -> Result<()>;

    /// Replace the collection and/or the settings as one unit. A `None` part
    /// is left as it is.
    ///
    /// # Errors
    ///
    /// Returns an error if any game fails validation or a write fails. On
    /// error neither part is changed.
    fn replace_all(&mut self, games: Option<&[Game]>, settings: Option<&Settings>) -> Result<()>;
}

/// `SQLite`-backed record store.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a game to the end of the collection.
    ///
    /// Category ids are assigned, derived fields are recomputed and both
    /// timestamps are set to now. Returns the new game's id.
    ///
    /// # Errors
    ///
    /// Returns an error if the game fails validation or the insert fails.
    pub fn add_game(&self, mut game: Game) -> Result<i64> {
        prepare_for_save(&mut game)?;
        let now = Utc::now();
        game.id = None;
        game.created_at = now;
        game.updated_at = now;

        let position: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM games",
            [],
            |row| row.get(0),
        )?;

        let id = insert_game(&self.conn, &game, position)?;
        info!("Added game {} ({})", id, game.title);
        Ok(id)
    }

    /// Get a game by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_game(&self, id: i64) -> Result<Option<Game>> {
        let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1");
        let game = self
            .conn
            .query_row(&sql, [id], Self::row_to_game)
            .optional()?;
        Ok(game)
    }

    /// Merge a partial update into a game and return the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameNotFound`] if there is no such game, or a
    /// validation error if the update blanks the title.
    pub fn update_game(&self, id: i64, update: GameUpdate) -> Result<Game> {
        let mut game = self.require_game(id)?;
        update.apply(&mut game);
        game.validate()?;
        self.write_game(&game)?;
        debug!("Updated game {}", id);
        Ok(game)
    }

    /// Delete a game by id.
    ///
    /// Returns `true` if a game was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_game(&self, id: i64) -> Result<bool> {
        let affected = self.conn.execute("DELETE FROM games WHERE id = ?1", [id])?;
        if affected > 0 {
            info!("Deleted game {}", id);
        }
        Ok(affected > 0)
    }

    /// Add a category to a game and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameNotFound`] if there is no such game, or a
    /// validation error if the category is incomplete.
    pub fn add_category(&self, game_id: i64, mut category: Category) -> Result<u32> {
        category.validate()?;
        let mut game = self.require_game(game_id)?;

        category.id = game.next_category_id();
        category.refresh_derived();
        let category_id = category.id;
        game.categories.push(category);
        game.touch();

        self.write_game(&game)?;
        debug!("Added category {} to game {}", category_id, game_id);
        Ok(category_id)
    }

    /// Merge a partial update into one of a game's categories.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the game or category doesn't exist, or a
    /// validation error if the update leaves the category incomplete.
    pub fn update_category(
        &self,
        game_id: i64,
        category_id: u32,
        update: CategoryUpdate,
    ) -> Result<Category> {
        let mut game = self.require_game(game_id)?;
        let category = game
            .category_mut(category_id)
            .ok_or(Error::CategoryNotFound {
                game_id,
                category_id,
            })?;

        update.apply(category);
        category.validate()?;
        let updated = category.clone();
        game.touch();

        self.write_game(&game)?;
        debug!("Updated category {} of game {}", category_id, game_id);
        Ok(updated)
    }

    /// Remove a category from a game.
    ///
    /// Returns `true` if a category was removed, `false` if the game has no
    /// such category.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameNotFound`] if there is no such game.
    pub fn remove_category(&self, game_id: i64, category_id: u32) -> Result<bool> {
        let mut game = self.require_game(game_id)?;
        let before = game.categories.len();
        game.categories.retain(|c| c.id != category_id);
        if game.categories.len() == before {
            return Ok(false);
        }
        game.touch();
        self.write_game(&game)?;
        debug!("Removed category {} from game {}", category_id, game_id);
        Ok(true)
    }

    /// Count total games in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
        Ok(count)
    }

    fn require_game(&self, id: i64) -> Result<Game> {
        self.get_game(id)?.ok_or(Error::GameNotFound { id })
    }

    /// Rewrite every column of an existing game except its position.
    fn write_game(&self, game: &Game) -> Result<()> {
        let id = game
            .id
            .ok_or_else(|| Error::internal("cannot update a game without an id"))?;

        let affected = self.conn.execute(
            r"
            UPDATE games SET title = ?1, image = ?2, section = ?3, categories = ?4,
                tags = ?5, is_favorite = ?6, created_at = ?7, updated_at = ?8
            WHERE id = ?9
            ",
            params![
                game.title,
                game.image,
                game.section.as_str(),
                serde_json::to_string(&game.categories)?,
                serde_json::to_string(&game.tags)?,
                game.is_favorite,
                game.created_at.to_rfc3339(),
                game.updated_at.to_rfc3339(),
                id,
            ],
        )?;

        if affected == 0 {
            return Err(Error::GameNotFound { id });
        }
        Ok(())
    }

    /// Convert a database row to a Game struct.
    fn row_to_game(row: &rusqlite::Row) -> rusqlite::Result<Game> {
        let id: i64 = row.get(0)?;
        let title: String = row.get(1)?;
        let image: Option<String> = row.get(2)?;
        let section_str: String = row.get(3)?;
        let categories_json: String = row.get(4)?;
        let tags_json: String = row.get(5)?;
        let is_favorite: bool = row.get(6)?;
        let created_str: String = row.get(7)?;
        let updated_str: String = row.get(8)?;

        let section = Section::from_label(&section_str).unwrap_or_else(|| {
            warn!(
                "Unknown section: {}, defaulting to {}",
                section_str,
                Section::FullRuns
            );
            Section::FullRuns
        });

        let categories: Vec<Category> = serde_json::from_str(&categories_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
        let tags: Vec<String> = serde_json::from_str(&tags_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

        Ok(Game {
            id: Some(id),
            title,
            image,
            section,
            categories,
            tags,
            created_at: parse_timestamp(&created_str),
            updated_at: parse_timestamp(&updated_str),
            is_favorite,
        })
    }
}

impl RecordStore for Storage {
    fn games(&self) -> Result<Vec<Game>> {
        let sql = format!("SELECT {GAME_COLUMNS} FROM games ORDER BY position ASC, id ASC");
        let mut stmt = self.conn.prepare(&sql)?;
        let games = stmt
            .query_map([], Self::row_to_game)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(games)
    }

    fn save_games(&mut self, games: &[Game]) -> Result<()> {
        self.replace_all(Some(games), None)
    }

    fn settings(&self) -> Result<Settings> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM metadata WHERE key = ?1",
                [SETTINGS_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match stored {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Settings::default()),
        }
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        write_settings(&self.conn, settings)
    }

    fn replace_all(&mut self, games: Option<&[Game]>, settings: Option<&Settings>) -> Result<()> {
        let prepared = games
            .map(|games| {
                games
                    .iter()
                    .cloned()
                    .map(|mut game| prepare_for_save(&mut game).map(|()| game))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        let tx = self.conn.transaction()?;
        if let Some(prepared) = &prepared {
            tx.execute("DELETE FROM games", [])?;
            for (position, game) in (0_i64..).zip(prepared) {
                insert_game(&tx, game, position)?;
            }
        }
        if let Some(settings) = settings {
            write_settings(&tx, settings)?;
        }
        tx.commit()?;

        if let Some(prepared) = &prepared {
            info!("Saved {} games", prepared.len());
        }
        Ok(())
    }
}

fn write_settings(conn: &Connection, settings: &Settings) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (SETTINGS_KEY, serde_json::to_string(settings)?),
    )?;
    debug!("Saved settings");
    Ok(())
}

/// Validate a game and normalize its categories before it is written.
fn prepare_for_save(game: &mut Game) -> Result<()> {
    game.validate()?;
    game.assign_category_ids();
    for category in &mut game.categories {
        category.refresh_derived();
    }
    Ok(())
}

/// Insert a game row. A `None` id lets `SQLite` assign one.
fn insert_game(conn: &Connection, game: &Game, position: i64) -> Result<i64> {
    conn.execute(
        r"
        INSERT INTO games (id, position, title, image, section, categories, tags,
            is_favorite, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        ",
        params![
            game.id,
            position,
            game.title,
            game.image,
            game.section.as_str(),
            serde_json::to_string(&game.categories)?,
            serde_json::to_string(&game.tags)?,
            game.is_favorite,
            game.created_at.to_rfc3339(),
            game.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value).map_or_else(
        |_| {
            warn!("Invalid stored timestamp {:?}, using now", value);
            Utc::now()
        },
        |dt| dt.with_timezone(&Utc),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    fn create_test_game(title: &str) -> Game {
        Game::new(title, Section::FullRuns)
    }

    #[test]
    fn test_open_in_memory() {
        assert!(Storage::open_in_memory().is_ok());
    }

    #[test]
    fn test_add_and_get_game() {
        let storage = create_test_storage();
        let mut game = create_test_game("Celeste");
        game.tags = vec!["platformer".to_string()];
        game.categories.push(Category::new("Any%", 3, "27:45"));

        let id = storage.add_game(game).unwrap();
        let retrieved = storage.get_game(id).unwrap().unwrap();

        assert_eq!(retrieved.id, Some(id));
        assert_eq!(retrieved.title, "Celeste");
        assert_eq!(retrieved.tags, vec!["platformer"]);
        assert_eq!(retrieved.categories.len(), 1);
        assert_eq!(retrieved.categories[0].id, 1);
        assert_eq!(retrieved.categories[0].next_person_to_beat, "2nd place");
    }

    #[test]
    fn test_add_game_rejects_blank_title() {
        let storage = create_test_storage();
        let err = storage.add_game(create_test_game("  ")).unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(storage.count().unwrap(), 0);
    }

    #[test]
    fn test_get_nonexistent() {
        let storage = create_test_storage();
        assert!(storage.get_game(99999).unwrap().is_none());
    }

    #[test]
    fn test_games_keep_insertion_order() {
        let storage = create_test_storage();
        for title in ["Zelda", "Among Us", "Metroid"] {
            storage.add_game(create_test_game(title)).unwrap();
        }

        let titles: Vec<String> = storage.games().unwrap().into_iter().map(|g| g.title).collect();
        assert_eq!(titles, vec!["Zelda", "Among Us", "Metroid"]);
    }

    #[test]
    fn test_update_game() {
        let storage = create_test_storage();
        let id = storage.add_game(create_test_game("Celeste")).unwrap();
        let original = storage.get_game(id).unwrap().unwrap();

        let updated = storage
            .update_game(
                id,
                GameUpdate {
                    section: Some(Section::IndividualLevels),
                    is_favorite: Some(true),
                    ..GameUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.section, Section::IndividualLevels);
        assert!(updated.is_favorite);
        assert!(updated.updated_at >= original.updated_at);
        assert_eq!(updated.created_at, original.created_at);

        let stored = storage.get_game(id).unwrap().unwrap();
        assert_eq!(stored.section, Section::IndividualLevels);
    }

    #[test]
    fn test_update_missing_game() {
        let storage = create_test_storage();
        let err = storage.update_game(42, GameUpdate::default()).unwrap_err();
        assert!(matches!(err, Error::GameNotFound { id: 42 }));
    }

    #[test]
    fn test_delete_game() {
        let storage = create_test_storage();
        let id = storage.add_game(create_test_game("Celeste")).unwrap();

        assert!(storage.delete_game(id).unwrap());
        assert!(storage.get_game(id).unwrap().is_none());
        assert!(!storage.delete_game(id).unwrap());
    }

    #[test]
    fn test_add_category_assigns_ids() {
        let storage = create_test_storage();
        let id = storage.add_game(create_test_game("Celeste")).unwrap();

        let first = storage
            .add_category(id, Category::new("Any%", 1, "27:00"))
            .unwrap();
        let second = storage
            .add_category(id, Category::new("100%", 2, "1:40:00"))
            .unwrap();

        assert_eq!((first, second), (1, 2));
        let game = storage.get_game(id).unwrap().unwrap();
        assert_eq!(game.category(1).unwrap().next_person_to_beat, "World Record");
        assert_eq!(game.category(2).unwrap().next_person_to_beat, "1st place");
    }

    #[test]
    fn test_add_category_to_missing_game() {
        let storage = create_test_storage();
        let err = storage
            .add_category(5, Category::new("Any%", 1, "27:00"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_category_recomputes_difference() {
        let storage = create_test_storage();
        let id = storage.add_game(create_test_game("Celeste")).unwrap();
        let cat = storage
            .add_category(id, Category::new("Any%", 4, "28:00"))
            .unwrap();

        let updated = storage
            .update_category(
                id,
                cat,
                CategoryUpdate {
                    time_to_beat: Some("27:10".to_string()),
                    ..CategoryUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.time_difference, "Already ahead!");

        let updated = storage
            .update_category(
                id,
                cat,
                CategoryUpdate {
                    pb_time: Some("26:55".to_string()),
                    time_to_beat: Some("27:30".to_string()),
                    ..CategoryUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.time_difference, "00:35");
        assert_eq!(updated.previous_times, vec!["28:00"]);

        let stored = storage.get_game(id).unwrap().unwrap();
        assert_eq!(stored.category(cat).unwrap(), &updated);
    }

    #[test]
    fn test_update_missing_category() {
        let storage = create_test_storage();
        let id = storage.add_game(create_test_game("Celeste")).unwrap();
        let err = storage
            .update_category(id, 9, CategoryUpdate::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::CategoryNotFound {
                category_id: 9,
                ..
            }
        ));
    }

    #[test]
    fn test_update_category_rejects_blank_name() {
        let storage = create_test_storage();
        let id = storage.add_game(create_test_game("Celeste")).unwrap();
        let cat = storage
            .add_category(id, Category::new("Any%", 1, "27:00"))
            .unwrap();

        let err = storage
            .update_category(
                id,
                cat,
                CategoryUpdate {
                    name: Some(String::new()),
                    ..CategoryUpdate::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation_error());
        let stored = storage.get_game(id).unwrap().unwrap();
        assert_eq!(stored.category(cat).unwrap().name, "Any%");
    }

    #[test]
    fn test_remove_category() {
        let storage = create_test_storage();
        let id = storage.add_game(create_test_game("Celeste")).unwrap();
        let cat = storage
            .add_category(id, Category::new("Any%", 1, "27:00"))
            .unwrap();

        assert!(storage.remove_category(id, cat).unwrap());
        assert!(!storage.remove_category(id, cat).unwrap());
        assert!(storage.get_game(id).unwrap().unwrap().categories.is_empty());
    }

    #[test]
    fn test_save_games_replaces_collection() {
        let mut storage = create_test_storage();
        storage.add_game(create_test_game("Old")).unwrap();

        let games = vec![create_test_game("First"), create_test_game("Second")];
        storage.save_games(&games).unwrap();

        let titles: Vec<String> = storage.games().unwrap().into_iter().map(|g| g.title).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn test_save_games_is_atomic_on_validation_error() {
        let mut storage = create_test_storage();
        storage.add_game(create_test_game("Keep me")).unwrap();

        let games = vec![create_test_game("Fine"), create_test_game("")];
        assert!(storage.save_games(&games).is_err());

        let titles: Vec<String> = storage.games().unwrap().into_iter().map(|g| g.title).collect();
        assert_eq!(titles, vec!["Keep me"]);
    }

    #[test]
    fn test_settings_default_when_unset() {
        let storage = create_test_storage();
        assert_eq!(storage.settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load_settings() {
        let mut storage = create_test_storage();
        let settings = Settings {
            dark_mode: true,
            tag_presets: vec!["glitched".to_string()],
            ..Settings::default()
        };
        storage.save_settings(&settings).unwrap();
        assert_eq!(storage.settings().unwrap(), settings);
    }

    #[test]
    fn test_count() {
        let storage = create_test_storage();
        assert_eq!(storage.count().unwrap(), 0);

        storage.add_game(create_test_game("One")).unwrap();
        storage.add_game(create_test_game("Two")).unwrap();

        assert_eq!(storage.count().unwrap(), 2);
    }

    #[test]
    fn test_path() {
        let storage = create_test_storage();
        assert_eq!(storage.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_unicode_title() {
        let storage = create_test_storage();
        let id = storage.add_game(create_test_game("ゼルダの伝説")).unwrap();
        assert_eq!(storage.get_game(id).unwrap().unwrap().title, "ゼルダの伝説");
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp_dir = std::env::temp_dir();
        let nested_path = temp_dir.join(format!(
            "pbtracker_test_{}/nested/records.db",
            std::process::id()
        ));

        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }

        let storage = Storage::open(&nested_path).unwrap();
        storage.add_game(create_test_game("Celeste")).unwrap();
        assert!(nested_path.exists());
        assert_eq!(storage.path(), nested_path);

        drop(storage);
        let reopened = Storage::open(&nested_path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);

        drop(reopened);
        if let Some(parent) = nested_path.parent().and_then(Path::parent) {
            let _ = std::fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn test_add_category_after_max_id() {
        let storage = create_test_storage();
        let mut game = create_test_game("Celeste");
        let mut top = Category::new("Any%", 1, "27:00");
        top.id = u32::MAX;
        game.categories.push(top);
        let id = storage.add_game(game).unwrap();

        let cat = storage
            .add_category(id, Category::new("100%", 2, "1:30:00"))
            .unwrap();
        assert_eq!(cat, 1);

        let game = storage.get_game(id).unwrap().unwrap();
        let ids: Vec<u32> = game.categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![u32::MAX, 1]);
    }

    #[test]
    fn test_replace_all_rolls_back_games_when_settings_fail() {
        let mut storage = create_test_storage();
        storage.add_game(create_test_game("Celeste")).unwrap();
        storage.conn.execute("DROP TABLE metadata", []).unwrap();

        let json = r#"{"games": [{"title": "Portal", "section": "ILs"}],
                       "settings": {"darkMode": true}}"#;
        assert!(crate::backup::import_data(&mut storage, json).is_err());

        let games = storage.games().unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].title, "Celeste");
    }

    #[test]
    fn test_replace_all_settings_only_keeps_games() {
        let mut storage = create_test_storage();
        storage.add_game(create_test_game("Celeste")).unwrap();
        let settings = Settings {
            dark_mode: true,
            ..Settings::default()
        };

        storage.replace_all(None, Some(&settings)).unwrap();
        assert_eq!(storage.count().unwrap(), 1);
        assert!(storage.settings().unwrap().dark_mode);
    }
}
