//! Daily delivery timing.
//!
//! The scheduler ticks coarsely (once a minute). A delivery is due once the
//! configured UTC time has passed today and nothing was delivered yet today,
//! so a late tick postpones the post instead of skipping or repeating it.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Configured daily post time (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostTime {
    time: NaiveTime,
}

impl PostTime {
    /// Builds a post time; `None` if the hour or minute is out of range.
    #[must_use]
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|time| Self { time })
    }

    /// Time of day of the post.
    #[must_use]
    pub const fn time(self) -> NaiveTime {
        self.time
    }
}

/// Whether the daily delivery should happen at `now`.
#[must_use]
pub fn is_due(now: NaiveDateTime, post_time: PostTime, last_delivery: Option<NaiveDate>) -> bool {
    let today = now.date();
    if last_delivery.is_some_and(|last| last >= today) {
        return false;
    }
    now.time() >= post_time.time()
}
