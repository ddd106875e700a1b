//! Time and placement arithmetic for run records.
//!
//! These functions convert between the `MM:SS` / `HH:MM:SS` strings that users
//! type and whole seconds, and derive the read-only "time difference" and
//! "next person to beat" fields of a category. Every function is total: bad
//! input degrades to a default instead of producing an error.

use std::fmt;

use tracing::debug;

/// Whole seconds, the unit all time arithmetic is done in.
pub type Seconds = u64;

/// Display text for a PB that is already at or under the target time.
pub const ALREADY_AHEAD: &str = "Already ahead!";

/// Display text for a first-place runner.
pub const WORLD_RECORD: &str = "World Record";

/// Parse a time string into whole seconds.
///
/// Accepts `HH:MM:SS` and `MM:SS`. Components are non-negative integers and
/// may be zero-padded or surrounded by whitespace. Any other shape, any
/// component that is not an integer, and any value that overflows yields `0`.
///
/// # Examples
///
/// ```
/// use pbtracker::timecalc::parse_time;
///
/// assert_eq!(parse_time("1:30"), 90);
/// assert_eq!(parse_time("01:01:01"), 3661);
/// assert_eq!(parse_time("garbage"), 0);
/// ```
#[must_use]
pub fn parse_time(time_str: &str) -> Seconds {
    let parsed: Option<Vec<Seconds>> = time_str
        .split(':')
        .map(|part| part.trim().parse::<Seconds>().ok())
        .collect();

    let total = match parsed.as_deref() {
        Some(&[hours, minutes, seconds]) => hours
            .checked_mul(3600)
            .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(seconds)),
        Some(&[minutes, seconds]) => minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds)),
        _ => None,
    };

    total.unwrap_or_else(|| {
        debug!("Unparseable time string {:?}, treating as 0", time_str);
        0
    })
}

/// Format whole seconds as `MM:SS`, or `HH:MM:SS` once there is at least an hour.
///
/// Each field is padded to two digits; hours are never truncated.
#[must_use]
pub fn format_time(seconds: Seconds) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// How a personal best compares to the time it needs to beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeDifference {
    /// The PB is already at or below the target.
    AlreadyAhead {
        /// Seconds of margin; `0` when the times are equal.
        by: Seconds,
    },
    /// The PB is slower than the target by this many seconds.
    Behind(Seconds),
}

impl TimeDifference {
    /// Check if the PB already matches or beats the target.
    #[must_use]
    pub fn is_ahead(&self) -> bool {
        matches!(self, Self::AlreadyAhead { .. })
    }

    /// Seconds still to cut, or `None` when already ahead.
    #[must_use]
    pub fn deficit(&self) -> Option<Seconds> {
        match self {
            Self::AlreadyAhead { .. } => None,
            Self::Behind(seconds) => Some(*seconds),
        }
    }
}

impl fmt::Display for TimeDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyAhead { .. } => f.write_str(ALREADY_AHEAD),
            Self::Behind(seconds) => f.write_str(&format_time(*seconds)),
        }
    }
}

/// Compare a PB against the time to beat.
///
/// Both strings go through [`parse_time`], so malformed input counts as zero.
#[must_use]
pub fn time_difference(pb_time: &str, time_to_beat: &str) -> TimeDifference {
    let pb = parse_time(pb_time);
    let target = parse_time(time_to_beat);

    if target > pb {
        TimeDifference::Behind(target - pb)
    } else {
        TimeDifference::AlreadyAhead { by: pb - target }
    }
}

/// [`time_difference`] rendered for display.
#[must_use]
pub fn time_difference_label(pb_time: &str, time_to_beat: &str) -> String {
    time_difference(pb_time, time_to_beat).to_string()
}

/// Label for the runner ranked directly above `placement`.
///
/// Placements of 1 or lower have nobody above them.
#[must_use]
pub fn next_person_to_beat(placement: i64) -> String {
    if placement <= 1 {
        return WORLD_RECORD.to_string();
    }
    let target = placement.unsigned_abs() - 1;
    format!("{target}{} place", ordinal_suffix(target))
}

/// English ordinal suffix for `n` (`st`, `nd`, `rd`, `th`).
#[must_use]
pub fn ordinal_suffix(n: u64) -> &'static str {
    if matches!(n % 100, 11..=13) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
