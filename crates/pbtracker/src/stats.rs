//! Summary statistics over the game collection.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::StatsConfig;
use crate::model::{Game, Section};
use crate::reminder::parse_date;

/// Number of games in one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionCount {
    /// The section.
    pub section: Section,
    /// Games filed under it.
    pub games: usize,
}

/// A game ranked by how many categories it tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveGame {
    /// Game id.
    pub game_id: Option<i64>,
    /// Game title.
    pub title: String,
    /// Number of categories.
    pub categories: usize,
}

/// A category that becomes eligible for another run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibleRun {
    /// Title of the owning game.
    pub game_title: String,
    /// Category name.
    pub category: String,
    /// When the run becomes eligible.
    pub eligible_at: DateTime<Utc>,
    /// Already eligible as of the computation time.
    pub overdue: bool,
}

/// Collection-wide statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Total games.
    pub total_games: usize,
    /// Total categories across all games.
    pub total_categories: usize,
    /// Categories where the runner holds the world record.
    pub first_places: usize,
    /// Categories placed 1st to 3rd.
    pub top_three: usize,
    /// Categories whose run date falls inside the recent window.
    pub recent_runs: usize,
    /// Game counts for every section, in display order.
    pub sections: Vec<SectionCount>,
    /// Games with the most categories, most first.
    pub most_active: Vec<ActiveGame>,
    /// Upcoming (or overdue) eligible runs, soonest first.
    pub next_eligible: Vec<EligibleRun>,
}

impl Stats {
    /// Compute statistics for `games` as of `now`.
    #[must_use]
    pub fn compute(games: &[Game], now: DateTime<Utc>, config: &StatsConfig) -> Self {
        let categories = || games.iter().flat_map(|g| g.categories.iter());
        let recent_cutoff = now
            .checked_sub_signed(Duration::days(i64::from(config.recent_window_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let sections = Section::ALL
            .into_iter()
            .map(|section| SectionCount {
                section,
                games: games.iter().filter(|g| g.section == section).count(),
            })
            .collect();

        let mut most_active: Vec<ActiveGame> = games
            .iter()
            .map(|g| ActiveGame {
                game_id: g.id,
                title: g.title.clone(),
                categories: g.categories.len(),
            })
            .collect();
        // stable sort keeps catalog order among ties
        most_active.sort_by(|a, b| b.categories.cmp(&a.categories));
        most_active.truncate(config.most_active_limit);

        let mut next_eligible: Vec<EligibleRun> = games
            .iter()
            .flat_map(|game| {
                game.categories.iter().filter_map(move |category| {
                    let eligible_at = parse_date(category.next_run_eligible.as_deref()?)?;
                    Some(EligibleRun {
                        game_title: game.title.clone(),
                        category: category.name.clone(),
                        eligible_at,
                        overdue: eligible_at < now,
                    })
                })
            })
            .collect();
        next_eligible.sort_by_key(|run| run.eligible_at);
        next_eligible.truncate(config.upcoming_limit);

        Self {
            total_games: games.len(),
            total_categories: categories().count(),
            first_places: categories().filter(|c| c.placement == 1).count(),
            top_three: categories().filter(|c| c.placement <= 3).count(),
            recent_runs: categories()
                .filter_map(|c| parse_date(&c.date_of_run))
                .filter(|date| *date >= recent_cutoff)
                .count(),
            sections,
            most_active,
            next_eligible,
        }
    }
}
