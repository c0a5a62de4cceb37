//! Weekly opening hours.
//!
//! Hours are a singleton: one object holding all seven weekdays. Every day
//! and every per-day field is required when decoding, so a stored value that
//! lost a day fails to decode instead of producing a half-filled week.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week, in the order the venue lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opening and closing time for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: String,
    pub close: String,
    pub closed: bool,
}

impl DayHours {
    pub fn open(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            closed: false,
        }
    }

    /// A day the venue does not open. The times are kept for display.
    pub fn closed(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            closed: true,
        }
    }
}

/// Opening hours for the whole week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hours {
    pub sunday: DayHours,
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
}

impl Hours {
    #[must_use]
    pub fn day(&self, day: Weekday) -> &DayHours {
        match day {
            Weekday::Sunday => &self.sunday,
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut DayHours {
        match day {
            Weekday::Sunday => &mut self.sunday,
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
        }
    }

    /// Replaces one day, returning the new week.
    #[must_use]
    pub fn with_day(mut self, day: Weekday, hours: DayHours) -> Self {
        *self.day_mut(day) = hours;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayHours)> {
        Weekday::ALL.into_iter().map(move |day| (day, self.day(day)))
    }

    /// Days the venue is closed.
    pub fn closed_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.iter().filter(|(_, h)| h.closed).map(|(day, _)| day)
    }
}

impl Default for Hours {
    fn default() -> Self {
        crate::defaults::default_hours()
    }
}
