//! Calendar field kinds.
//!
//! [`FieldKind`] is a closed enumeration of the calendar granularities that
//! formats, differences and period lookups talk about. The declaration order
//! is the fixed total order used everywhere in the crate: nanosecond is the
//! finest kind and era the coarsest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DateKitError;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_YEAR: f64 = 365.2425;

/// A named calendar granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Nanosecond,
    Second,
    Minute,
    Hour,
    Day,
    Weekday,
    WeekdayOrdinal,
    WeekOfMonth,
    WeekOfYear,
    Month,
    Quarter,
    Year,
    YearForWeekOfYear,
    TimeZone,
    Calendar,
    Era,
}

impl FieldKind {
    /// Every kind, finest first.
    pub const ALL: [FieldKind; 16] = [
        FieldKind::Nanosecond,
        FieldKind::Second,
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::Day,
        FieldKind::Weekday,
        FieldKind::WeekdayOrdinal,
        FieldKind::WeekOfMonth,
        FieldKind::WeekOfYear,
        FieldKind::Month,
        FieldKind::Quarter,
        FieldKind::Year,
        FieldKind::YearForWeekOfYear,
        FieldKind::TimeZone,
        FieldKind::Calendar,
        FieldKind::Era,
    ];

    /// The kinds a calendar date decomposes into without redundancy.
    pub const MINIMAL: [FieldKind; 7] = [
        FieldKind::Nanosecond,
        FieldKind::Second,
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::Day,
        FieldKind::Month,
        FieldKind::Year,
    ];

    /// Alias used by week-based shorthands.
    pub const WEEK: FieldKind = FieldKind::WeekOfYear;

    /// The next finer kind this one splits into.
    pub fn smaller(self) -> Option<FieldKind> {
        use FieldKind::*;
        match self {
            Era => Some(Year),
            Year => Some(Month),
            Month => Some(Day),
            Day => Some(Hour),
            Hour => Some(Minute),
            Minute => Some(Second),
            Second => Some(Nanosecond),
            Weekday | WeekdayOrdinal => Some(Hour),
            Quarter => Some(Month),
            WeekOfMonth | WeekOfYear => Some(Day),
            YearForWeekOfYear => Some(WeekOfYear),
            Nanosecond | Calendar | TimeZone => None,
        }
    }

    /// The next coarser kind this one is contained in.
    pub fn larger(self) -> Option<FieldKind> {
        use FieldKind::*;
        match self {
            Era | Calendar | TimeZone => None,
            Year => Some(Era),
            Month => Some(Year),
            Day => Some(Month),
            Hour => Some(Day),
            Minute => Some(Hour),
            Second => Some(Minute),
            Weekday | WeekdayOrdinal => Some(Day),
            Quarter => Some(Year),
            WeekOfMonth => Some(Month),
            WeekOfYear => Some(YearForWeekOfYear),
            YearForWeekOfYear => Some(Era),
            Nanosecond => Some(Second),
        }
    }

    /// Follows [`larger`](Self::larger) until the chain ends.
    pub fn all_larger(self) -> Vec<FieldKind> {
        let mut result = Vec::new();
        let mut current = self.larger();
        while let Some(kind) = current {
            result.push(kind);
            current = kind.larger();
        }
        result
    }

    /// Approximate fixed length of one unit in seconds.
    ///
    /// Months and years use the mean Gregorian year (365.2425 days), so the
    /// value is only suitable for coarse comparisons. Kinds whose length is
    /// not expressible as a duration (era, time zone, calendar) return `None`.
    pub fn nominal_seconds(self) -> Option<f64> {
        use FieldKind::*;
        let year = DAYS_PER_YEAR * SECONDS_PER_DAY;
        match self {
            Era | TimeZone | Calendar => None,
            Year | YearForWeekOfYear => Some(year),
            Quarter => Some(year / 4.0),
            Month => Some(year / 12.0),
            WeekOfMonth | WeekOfYear => Some(7.0 * SECONDS_PER_DAY),
            Day | Weekday | WeekdayOrdinal => Some(SECONDS_PER_DAY),
            Hour => Some(3_600.0),
            Minute => Some(60.0),
            Second => Some(1.0),
            Nanosecond => Some(1e-9),
        }
    }

    /// How many `other` units one unit of `self` is nominally worth.
    ///
    /// Converting to seconds treats a kind without a nominal length as one
    /// second, so a lone era or time-zone entry never disappears silently.
    pub fn ratio_to(self, other: FieldKind) -> Option<f64> {
        if other == FieldKind::Second {
            return Some(self.nominal_seconds().unwrap_or(1.0));
        }
        let target = other.nominal_seconds()?;
        if target == 0.0 {
            return Some(0.0);
        }
        self.nominal_seconds().map(|s| s / target)
    }

    /// The lowest value the component takes in a decomposed date.
    pub fn first_value(self) -> i64 {
        use FieldKind::*;
        match self {
            Era | Year | Month | Day | Weekday | WeekOfYear | WeekOfMonth | WeekdayOrdinal
            | YearForWeekOfYear => 1,
            _ => 0,
        }
    }

    /// Stable camelCase name, also used by serde.
    pub fn name(self) -> &'static str {
        use FieldKind::*;
        match self {
            Era => "era",
            Year => "year",
            Quarter => "quarter",
            Month => "month",
            WeekOfYear => "weekOfYear",
            WeekOfMonth => "weekOfMonth",
            Day => "day",
            Weekday => "weekday",
            WeekdayOrdinal => "weekdayOrdinal",
            Hour => "hour",
            Minute => "minute",
            Second => "second",
            Nanosecond => "nanosecond",
            YearForWeekOfYear => "yearForWeekOfYear",
            TimeZone => "timeZone",
            Calendar => "calendar",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = DateKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| DateKitError::UnknownField(format!("'{s}'")))
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
