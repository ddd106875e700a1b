//! Core record types for pbtracker.
//!
//! A [`Game`] owns an ordered list of [`Category`] records, each holding a
//! personal best and the placement it earned. [`Settings`] holds app-wide
//! preferences. JSON field names are camelCase so backups stay compatible with
//! the mobile app's export format.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::timecalc::{self, TimeDifference};

/// Default image shown for games without one.
pub const DEFAULT_GAME_IMAGE: &str = "/placeholder.svg";

/// The tab a game is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Individual levels.
    #[serde(rename = "ILs")]
    IndividualLevels,
    /// Full-game runs.
    #[serde(rename = "Full Runs")]
    FullRuns,
    /// Several games run back to back.
    #[serde(rename = "MultiRuns")]
    MultiRuns,
    /// Joke categories.
    #[serde(rename = "Troll Runs")]
    TrollRuns,
}

impl Section {
    /// Every section, in display order.
    pub const ALL: [Section; 4] = [
        Self::IndividualLevels,
        Self::FullRuns,
        Self::MultiRuns,
        Self::TrollRuns,
    ];

    /// The label used in storage and backups.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IndividualLevels => "ILs",
            Self::FullRuns => "Full Runs",
            Self::MultiRuns => "MultiRuns",
            Self::TrollRuns => "Troll Runs",
        }
    }

    /// Look a section up by its label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Accepts a numeric id or anything else (string ids from older exports),
/// mapping non-numeric values to the default so storage can reassign them.
fn lenient_category_id<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or_default())
}

fn lenient_game_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_i64())
}

/// The id after `after`, or the lowest id not in `used` once `after` hits `u32::MAX`.
fn next_free_id(used: &HashSet<u32>, after: u32) -> u32 {
    match after.checked_add(1) {
        Some(id) if !used.contains(&id) => id,
        _ => (1..=u32::MAX).find(|id| !used.contains(id)).unwrap_or(0),
    }
}

fn default_placement() -> u32 {
    1
}

/// A run category within a game, with the runner's PB and placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Identifier, unique within the owning game (assigned by storage).
    #[serde(default, deserialize_with = "lenient_category_id")]
    pub id: u32,

    /// Category name, e.g. `Any%`.
    pub name: String,

    /// Current leaderboard placement (1 = world record).
    #[serde(default = "default_placement")]
    pub placement: u32,

    /// Personal best as a time string.
    #[serde(default)]
    pub pb_time: String,

    /// Sum of best segments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum_of_best: Option<String>,

    /// When the PB was set.
    #[serde(default)]
    pub date_of_run: String,

    /// Derived from `placement`.
    #[serde(default)]
    pub next_person_to_beat: String,

    /// Time of the runner one place above.
    #[serde(default)]
    pub time_to_beat: String,

    /// Derived from `pb_time` and `time_to_beat`.
    #[serde(default)]
    pub time_difference: String,

    /// Date from which the leaderboard accepts another submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run_eligible: Option<String>,

    /// Link to the run video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,

    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Leaderboard variables (platform, version, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<String>,

    /// Earlier PBs, oldest first.
    #[serde(default)]
    pub previous_times: Vec<String>,

    /// Pinned by the user.
    #[serde(default)]
    pub is_favorite: bool,
}

impl Category {
    /// Create a category with derived fields already filled in.
    #[must_use]
    pub fn new(name: impl Into<String>, placement: u32, pb_time: impl Into<String>) -> Self {
        let mut category = Self {
            id: 0,
            name: name.into(),
            placement,
            pb_time: pb_time.into(),
            sum_of_best: None,
            date_of_run: String::new(),
            next_person_to_beat: String::new(),
            time_to_beat: String::new(),
            time_difference: String::new(),
            next_run_eligible: None,
            video_link: None,
            notes: None,
            variables: None,
            previous_times: Vec::new(),
            is_favorite: false,
        };
        category.refresh_derived();
        category
    }

    /// Recompute `next_person_to_beat` and `time_difference`.
    ///
    /// First place has nobody to chase, so the time to beat and the
    /// difference are cleared.
    pub fn refresh_derived(&mut self) {
        self.next_person_to_beat = timecalc::next_person_to_beat(i64::from(self.placement));
        if self.placement > 1 {
            self.time_difference = timecalc::time_difference_label(&self.pb_time, &self.time_to_beat);
        } else {
            self.time_to_beat.clear();
            self.time_difference.clear();
        }
    }

    /// Typed comparison against the time to beat, if there is one.
    #[must_use]
    pub fn gap(&self) -> Option<TimeDifference> {
        (self.placement > 1).then(|| timecalc::time_difference(&self.pb_time, &self.time_to_beat))
    }

    /// PB in whole seconds.
    #[must_use]
    pub fn pb_seconds(&self) -> timecalc::Seconds {
        timecalc::parse_time(&self.pb_time)
    }

    /// Replace the PB, keeping the old one in `previous_times`.
    pub fn record_new_pb(&mut self, new_time: impl Into<String>) {
        let new_time = new_time.into();
        if new_time == self.pb_time {
            return;
        }
        let old = std::mem::replace(&mut self.pb_time, new_time);
        if !old.trim().is_empty() {
            self.previous_times.push(old);
        }
    }

    /// Check the fields a category can't be saved without.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name or PB time is blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("category name", "must not be empty"));
        }
        if self.pb_time.trim().is_empty() {
            return Err(Error::validation("pb time", "must not be empty"));
        }
        Ok(())
    }
}

/// A game and its run categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Storage-assigned identifier.
    #[serde(
        default,
        deserialize_with = "lenient_game_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,

    /// Game title.
    pub title: String,

    /// Cover image path or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Section the game is filed under.
    pub section: Section,

    /// Run categories, in display order.
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// When the game was added.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When the game or any of its categories last changed.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,

    /// Pinned by the user.
    #[serde(default)]
    pub is_favorite: bool,
}

impl Game {
    /// Create a new game with no categories.
    #[must_use]
    pub fn new(title: impl Into<String>, section: Section) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            title: title.into(),
            image: None,
            section,
            categories: Vec::new(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            is_favorite: false,
        }
    }

    /// Check the fields a game can't be saved without.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the title or any category is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::validation("title", "must not be empty"));
        }
        self.categories.iter().try_for_each(Category::validate)
    }

    /// Find a category by id.
    #[must_use]
    pub fn category(&self, id: u32) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Find a category by id, mutably.
    pub fn category_mut(&mut self, id: u32) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    /// The id the next inserted category should get.
    ///
    /// Normally one past the highest id in use. If that would overflow, the
    /// lowest unused id is handed out instead.
    #[must_use]
    pub fn next_category_id(&self) -> u32 {
        let used: HashSet<u32> = self.categories.iter().map(|c| c.id).collect();
        next_free_id(&used, used.iter().copied().max().unwrap_or(0))
    }

    /// Give every category without an id (id 0) or with a duplicate id a fresh one.
    pub fn assign_category_ids(&mut self) {
        let mut seen = HashSet::new();
        let needs_id: Vec<usize> = self
            .categories
            .iter()
            .enumerate()
            .filter(|(_, c)| c.id == 0 || !seen.insert(c.id))
            .map(|(i, _)| i)
            .collect();

        let mut last = seen.iter().copied().max().unwrap_or(0);
        for i in needs_id {
            last = next_free_id(&seen, last);
            seen.insert(last);
            self.categories[i].id = last;
        }
    }

    /// Mark the game as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// The image to show, falling back to the configured default.
    #[must_use]
    pub fn image_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.image
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(default)
    }
}

/// A partial update to a game. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct GameUpdate {
    pub title: Option<String>,
    pub image: Option<String>,
    pub section: Option<Section>,
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
}

impl GameUpdate {
    /// Merge this update into `game` and bump its `updated_at`.
    pub fn apply(self, game: &mut Game) {
        if let Some(title) = self.title {
            game.title = title;
        }
        if let Some(image) = self.image {
            game.image = Some(image);
        }
        if let Some(section) = self.section {
            game.section = section;
        }
        if let Some(tags) = self.tags {
            game.tags = tags;
        }
        if let Some(fav) = self.is_favorite {
            game.is_favorite = fav;
        }
        game.touch();
    }
}

/// A partial update to a category. `None` fields are left unchanged.
///
/// A new `pb_time` pushes the old one onto the category's history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub placement: Option<u32>,
    pub pb_time: Option<String>,
    pub sum_of_best: Option<String>,
    pub date_of_run: Option<String>,
    pub time_to_beat: Option<String>,
    pub next_run_eligible: Option<String>,
    pub video_link: Option<String>,
    pub notes: Option<String>,
    pub variables: Option<String>,
    pub is_favorite: Option<bool>,
}

impl CategoryUpdate {
    /// Merge this update into `category` and recompute its derived fields.
    pub fn apply(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(placement) = self.placement {
            category.placement = placement;
        }
        if let Some(pb) = self.pb_time {
            category.record_new_pb(pb);
        }
        if let Some(sob) = self.sum_of_best {
            category.sum_of_best = Some(sob);
        }
        if let Some(date) = self.date_of_run {
            category.date_of_run = date;
        }
        if let Some(target) = self.time_to_beat {
            category.time_to_beat = target;
        }
        if let Some(eligible) = self.next_run_eligible {
            category.next_run_eligible = Some(eligible);
        }
        if let Some(link) = self.video_link {
            category.video_link = Some(link);
        }
        if let Some(notes) = self.notes {
            category.notes = Some(notes);
        }
        if let Some(vars) = self.variables {
            category.variables = Some(vars);
        }
        if let Some(fav) = self.is_favorite {
            category.is_favorite = fav;
        }
        category.refresh_derived();
    }
}

fn default_game_image() -> String {
    DEFAULT_GAME_IMAGE.to_string()
}

/// App-wide preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Use the dark theme.
    pub dark_mode: bool,
    /// Image for games without their own.
    #[serde(default = "default_game_image")]
    pub default_game_image: String,
    /// Tags offered when tagging a game.
    pub tag_presets: Vec<String>,
    /// Whether run reminders are wanted.
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            default_game_image: default_game_image(),
            tag_presets: Vec::new(),
            notifications_enabled: false,
        }
    }
}
