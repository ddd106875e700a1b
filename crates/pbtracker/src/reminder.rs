//! Date arithmetic for "you can rerun soon" reminders.
//!
//! Delivering notifications is up to the platform; this module only works
//! out when a reminder is due. Like the time helpers, nothing here fails on
//! bad input: an unparseable date simply produces no reminder.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::model::Game;

/// Title used for every run reminder.
pub const REMINDER_TITLE: &str = "Speedrun Reminder";

/// Default lead time: one day before the run becomes eligible.
#[must_use]
pub fn default_lead_time() -> Duration {
    Duration::days(1)
}

/// Parse a user-entered date.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates, which are taken
/// as midnight UTC. Returns `None` for anything else.
#[must_use]
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// When to remind about a run that becomes eligible at `eligible`.
#[must_use]
pub fn reminder_time(eligible: &str, lead: Duration) -> Option<DateTime<Utc>> {
    let at = parse_date(eligible).and_then(|date| date.checked_sub_signed(lead));
    if at.is_none() {
        debug!("No reminder for eligible date {:?}", eligible);
    }
    at
}

/// A reminder that is due in the future.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// When to fire.
    pub at: DateTime<Utc>,
    /// The game the run belongs to.
    pub game_id: Option<i64>,
    /// The category within that game.
    pub category_id: u32,
}

impl Reminder {
    fn new(game: &Game, category_id: u32, category_name: &str, at: DateTime<Utc>) -> Self {
        Self {
            title: REMINDER_TITLE.to_string(),
            body: format!(
                "You're almost eligible to rerun {} - {}",
                game.title, category_name
            ),
            at,
            game_id: game.id,
            category_id,
        }
    }
}

/// Reminders for every category whose reminder time is still after `now`,
/// soonest first.
#[must_use]
pub fn upcoming_reminders(games: &[Game], now: DateTime<Utc>, lead: Duration) -> Vec<Reminder> {
    let mut reminders: Vec<Reminder> = games
        .iter()
        .flat_map(|game| {
            game.categories.iter().filter_map(move |category| {
                let eligible = category.next_run_eligible.as_deref()?;
                let at = reminder_time(eligible, lead)?;
                (at > now).then(|| Reminder::new(game, category.id, &category.name, at))
            })
        })
        .collect();

    reminders.sort_by_key(|r| r.at);
    reminders
}
