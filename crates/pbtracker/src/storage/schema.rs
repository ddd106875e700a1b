//! `SQLite` schema definitions for pbtracker.

/// SQL statement to create the games table.
///
/// Categories and tags travel with their game as JSON text; `position`
/// keeps the user's ordering of the collection.
pub const CREATE_GAMES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS games (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    position INTEGER NOT NULL,
    title TEXT NOT NULL,
    image TEXT,
    section TEXT NOT NULL,
    categories TEXT NOT NULL DEFAULT '[]',
    tags TEXT NOT NULL DEFAULT '[]',
    is_favorite INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create an index on position for ordered listing.
pub const CREATE_POSITION_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_games_position ON games(position)
";

/// SQL statement to create an index on section for per-tab counts.
pub const CREATE_SECTION_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_games_section ON games(section)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_GAMES_TABLE,
    CREATE_POSITION_INDEX,
    CREATE_SECTION_INDEX,
    CREATE_METADATA_TABLE,
];
