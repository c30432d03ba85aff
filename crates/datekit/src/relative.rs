//! Relative date formats ("Yesterday", "Today", weekday within this week, ...).
//!
//! A [`RelativeDateFormat`] holds a default pattern plus overrides keyed by a
//! [`ComponentMap`]. The key is matched against the period difference between
//! the reference instant and the formatted date, so `{day: -1}` means "the
//! calendar day before the reference", regardless of time of day.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{difference_between, Calendar};
use crate::context::ResolvedContext;
use crate::difference::{pick_label, ComponentMap};
use crate::field::FieldKind;
use crate::pattern::DateFormat;
use crate::render::render;

/// A default format plus relative overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelativeDateFormat {
    pub default_format: DateFormat,
    /// Overrides in priority order for equally specific keys.
    #[serde(default)]
    pub relative: Vec<(ComponentMap, DateFormat)>,
}

impl RelativeDateFormat {
    pub fn new(default_format: impl Into<DateFormat>) -> Self {
        Self {
            default_format: default_format.into(),
            relative: Vec::new(),
        }
    }

    /// Add an override used when the difference matches `key`.
    ///
    /// A later override with an identical key replaces the earlier one.
    pub fn at(mut self, key: ComponentMap, format: impl Into<DateFormat>) -> Self {
        let format = format.into();
        match self.relative.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = format,
            None => self.relative.push((key, format)),
        }
        self
    }

    /// Field kinds mentioned by any override key.
    fn key_kinds(&self) -> BTreeSet<FieldKind> {
        self.relative
            .iter()
            .flat_map(|(key, _)| key.keys().copied())
            .collect()
    }

    /// Choose the format for `date` seen from `reference`.
    pub fn select<Z: TimeZone>(
        &self,
        date: DateTime<Utc>,
        reference: DateTime<Utc>,
        calendar: &Calendar,
        tz: &Z,
    ) -> &DateFormat {
        let difference = difference_between(reference, date, self.key_kinds(), calendar, tz);
        let chosen = pick_label(&self.relative, &difference, &self.default_format);
        debug!(
            difference = ?difference,
            format = %chosen,
            "selected relative date format"
        );
        chosen
    }
}

impl From<DateFormat> for RelativeDateFormat {
    fn from(default_format: DateFormat) -> Self {
        Self::new(default_format)
    }
}

/// Render `date` relative to `reference` in the context's time zone.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use datekit::context::ResolvedContext;
/// use datekit::difference::ComponentMap;
/// use datekit::field::FieldKind;
/// use datekit::relative::{format_relative, RelativeDateFormat};
///
/// let format = RelativeDateFormat::new("dd.MM.yyyy")
///     .at(ComponentMap::from([(FieldKind::Day, 0)]), "'Today'");
/// let ctx = ResolvedContext::platform();
/// let now = Utc.with_ymd_and_hms(2023, 8, 12, 12, 0, 0).unwrap();
/// let last_week = Utc.with_ymd_and_hms(2023, 8, 5, 12, 0, 0).unwrap();
///
/// assert_eq!(format_relative(now, now, &format, &ctx), "Today");
/// assert_eq!(format_relative(last_week, now, &format, &ctx), "05.08.2023");
/// ```
pub fn format_relative(
    date: DateTime<Utc>,
    reference: DateTime<Utc>,
    format: &RelativeDateFormat,
    ctx: &ResolvedContext,
) -> String {
    let chosen = format.select(date, reference, &ctx.calendar, &ctx.timezone);
    render(&chosen.tokens(), &date.with_timezone(&ctx.timezone), &ctx.calendar)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekStartDay;
    use crate::context::Locale;
    use crate::pattern::{FormatToken, Style};
    use chrono_tz::Tz;

    fn key(kind: FieldKind, value: i64) -> ComponentMap {
        ComponentMap::from([(kind, value)])
    }

    fn sample_format() -> RelativeDateFormat {
        RelativeDateFormat::new("dd.MM.yyyy")
            .at(key(FieldKind::Day, -1), "'Yesterday'")
            .at(key(FieldKind::Day, 0), "'Today'")
            .at(key(FieldKind::Day, 1), "'Tomorrow'")
            .at(
                key(FieldKind::WEEK, 0),
                DateFormat::from_tokens(&[FormatToken::for_field(FieldKind::Weekday, Style::Full)]),
            )
            .at(key(FieldKind::Year, 0), "dd.MM")
    }

    fn ts(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap()
    }

    fn utc_context() -> ResolvedContext {
        ResolvedContext::platform()
    }

    // Saturday, 2023-08-12 12:33:53 UTC
    const DATE: i64 = 1_691_843_633;

    #[test]
    fn test_today_wins_over_coarser_matches() {
        let text = format_relative(ts(DATE), ts(DATE), &sample_format(), &utc_context());
        assert_eq!(text, "Today");
    }

    #[test]
    fn test_tomorrow_across_midnight() {
        // reference 2023-08-11 22:33:53
        let text = format_relative(ts(DATE), ts(1_691_793_233), &sample_format(), &utc_context());
        assert_eq!(text, "Tomorrow");
    }

    #[test]
    fn test_yesterday() {
        // reference 2023-08-13 22:33:53
        let text = format_relative(ts(DATE), ts(1_691_966_033), &sample_format(), &utc_context());
        assert_eq!(text, "Yesterday");
    }

    #[test]
    fn test_same_week_renders_weekday() {
        // reference Monday 2023-08-07
        let text = format_relative(ts(DATE), ts(1_691_447_633), &sample_format(), &utc_context());
        assert_eq!(text, "Saturday");
    }

    #[test]
    fn test_same_year_short_date() {
        // reference 2023-07-07
        let text = format_relative(ts(DATE), ts(1_688_769_233), &sample_format(), &utc_context());
        assert_eq!(text, "12.08");
    }

    #[test]
    fn test_falls_back_to_default() {
        // reference 2021-07-07
        let text = format_relative(ts(DATE), ts(1_625_697_233), &sample_format(), &utc_context());
        assert_eq!(text, "12.08.2023");
    }

    #[test]
    fn test_timezone_moves_day_boundary() {
        // 2023-08-12 02:00 UTC is still August 11 in New York
        let ctx = ResolvedContext {
            calendar: Calendar::gregorian(),
            locale: Locale::new("en_US"),
            timezone: Tz::America__New_York,
        };
        let date = Utc.with_ymd_and_hms(2023, 8, 12, 2, 0, 0).unwrap();
        let reference = Utc.with_ymd_and_hms(2023, 8, 11, 14, 0, 0).unwrap();
        assert_eq!(format_relative(date, reference, &sample_format(), &ctx), "Today");
        assert_eq!(format_relative(date, reference, &sample_format(), &utc_context()), "Tomorrow");
    }

    #[test]
    fn test_week_start_changes_week_match() {
        // Sunday 2023-08-13 seen from Saturday 2023-08-12: same ISO week, new US week
        let format = RelativeDateFormat::new("dd.MM.yyyy").at(key(FieldKind::WEEK, 0), "EEEE");
        let date = Utc.with_ymd_and_hms(2023, 8, 13, 9, 0, 0).unwrap();
        let reference = ts(DATE);

        let monday = Calendar::gregorian();
        assert_eq!(format.select(date, reference, &monday, &Utc).as_str(), "EEEE");

        let sunday = Calendar::with_week_start(WeekStartDay::Sunday);
        assert_eq!(format.select(date, reference, &sunday, &Utc).as_str(), "dd.MM.yyyy");
    }

    #[test]
    fn test_at_replaces_identical_key() {
        let format = RelativeDateFormat::new("yyyy")
            .at(key(FieldKind::Day, 0), "'Today'")
            .at(key(FieldKind::Day, 0), "'Now'");
        assert_eq!(format.relative.len(), 1);
        assert_eq!(format.relative[0].1.as_str(), "'Now'");
    }

    #[test]
    fn test_serde_round_trip() {
        let format = sample_format();
        let json = serde_json::to_string(&format).unwrap();
        assert!(json.contains("\"default_format\":\"dd.MM.yyyy\""), "got: {json}");
        let back: RelativeDateFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, format);
    }
}
