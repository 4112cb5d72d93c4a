use std::fmt;

use chrono::{DateTime, Utc};

/// Run duration split into whole minutes and leftover whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTime {
    minutes: u64,
    seconds: u8,
}

impl ElapsedTime {
    /// Floors `millis` to whole seconds, then splits into minutes and seconds.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        let total_secs = millis / 1000;
        Self {
            minutes: total_secs / 60,
            seconds: (total_secs % 60) as u8,
        }
    }

    #[must_use]
    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    #[must_use]
    pub fn seconds(&self) -> u8 {
        self.seconds
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = if self.minutes == 1 { "minute" } else { "minutes" };
        let s = if self.seconds == 1 { "second" } else { "seconds" };
        write!(f, "{} {m} {} {s}", self.minutes, self.seconds)
    }
}

/// Elapsed time between two run timestamps, or `None` while either is missing.
///
/// A finish before the start (clock skew) clamps to zero.
#[must_use]
pub fn elapsed_between(
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
) -> Option<ElapsedTime> {
    let (start, end) = (started_at?, finished_at?);
    let millis = (end - start).num_milliseconds().max(0);
    Some(ElapsedTime::from_millis(millis.unsigned_abs()))
}
