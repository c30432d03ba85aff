//! Render format tokens for a concrete datetime.
//!
//! Text is English only; every value comes from chrono. Unknown symbols and
//! widths degrade to the nearest supported rendering rather than failing.

use std::fmt::Display;

use chrono::{DateTime, Datelike, Offset, TimeZone, Timelike};

use crate::calendar::{days_from_week_start, Calendar, WeekStartDay};
use crate::pattern::{tokenize, FormatToken};

/// Render `tokens` for `dt`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use datekit::calendar::Calendar;
/// use datekit::pattern::tokenize;
/// use datekit::render::render;
///
/// let dt = Utc.with_ymd_and_hms(2023, 8, 12, 12, 33, 53).unwrap();
/// let text = render(&tokenize("dd-MM-yyyy"), &dt, &Calendar::gregorian());
/// assert_eq!(text, "12-08-2023");
/// ```
pub fn render<T>(tokens: &[FormatToken], dt: &DateTime<T>, calendar: &Calendar) -> String
where
    T: TimeZone,
    T::Offset: Display,
{
    let mut out = String::new();
    for token in tokens {
        match token {
            FormatToken::Literal { text } | FormatToken::QuotedLiteral { text } => {
                out.push_str(text)
            }
            FormatToken::FieldRun { symbol, width } => {
                out.push_str(&render_field(*symbol, *width, dt, calendar))
            }
        }
    }
    out
}

/// Tokenize `pattern` and render it for `dt`.
pub fn render_pattern<T>(pattern: &str, dt: &DateTime<T>, calendar: &Calendar) -> String
where
    T: TimeZone,
    T::Offset: Display,
{
    render(&tokenize(pattern), dt, calendar)
}

fn render_field<T>(symbol: char, width: usize, dt: &DateTime<T>, calendar: &Calendar) -> String
where
    T: TimeZone,
    T::Offset: Display,
{
    match symbol {
        'G' => era(dt.year() > 0, width),
        'y' => year(dt.year(), width),
        'Y' => year(dt.iso_week().year(), width),
        'M' => month(dt, width),
        'd' => padded(dt.day() as i64, width),
        'H' => padded(dt.hour() as i64, width),
        'h' => padded(dt.hour12().1 as i64, width),
        'm' => padded(dt.minute() as i64, width),
        's' => padded(dt.second() as i64, width),
        'a' => dt.format("%p").to_string(),
        'S' => fraction(dt.nanosecond(), width),
        'E' => weekday(dt, width),
        'Q' => quarter(dt.month0() / 3 + 1, width),
        'w' => padded(week_of_year(dt, calendar), width),
        'W' => padded(week_of_month(dt, calendar), width),
        'Z' => offset(dt, width),
        'z' if width >= 4 => localized_gmt(dt),
        'z' => dt.offset().to_string(),
        other => other.to_string().repeat(width),
    }
}

fn padded(value: i64, width: usize) -> String {
    if value < 0 {
        format!("-{:0width$}", value.unsigned_abs(), width = width.saturating_sub(1))
    } else {
        format!("{value:0width$}")
    }
}

fn era(common_era: bool, width: usize) -> String {
    let text = match (common_era, width) {
        (true, 4) => "Anno Domini",
        (false, 4) => "Before Christ",
        (true, 5) => "A",
        (false, 5) => "B",
        (true, _) => "AD",
        (false, _) => "BC",
    };
    text.to_string()
}

fn year(value: i32, width: usize) -> String {
    if width == 2 {
        format!("{:02}", value.rem_euclid(100))
    } else {
        padded(value as i64, width)
    }
}

fn month<T>(dt: &DateTime<T>, width: usize) -> String
where
    T: TimeZone,
    T::Offset: Display,
{
    match width {
        1 | 2 => padded(dt.month() as i64, width),
        3 => dt.format("%b").to_string(),
        4 => dt.format("%B").to_string(),
        _ => narrow(dt.format("%B").to_string()),
    }
}

fn weekday<T>(dt: &DateTime<T>, width: usize) -> String
where
    T: TimeZone,
    T::Offset: Display,
{
    let full = dt.format("%A").to_string();
    match width {
        4 => full,
        5 => narrow(full),
        6 => full.chars().take(2).collect(),
        _ => dt.format("%a").to_string(),
    }
}

fn narrow(name: String) -> String {
    name.chars().take(1).collect()
}

fn quarter(value: u32, width: usize) -> String {
    match width {
        1 | 2 => padded(value as i64, width),
        3 => format!("Q{value}"),
        _ => {
            let suffix = match value {
                1 => "st",
                2 => "nd",
                3 => "rd",
                _ => "th",
            };
            format!("{value}{suffix} quarter")
        }
    }
}

/// Fractional seconds truncated (not rounded) to `width` digits.
fn fraction(nanos: u32, width: usize) -> String {
    // Leap-second nanos run past 1e9; keep the digits of the sub-second part.
    let digits = format!("{:09}", nanos % 1_000_000_000);
    if width <= 9 {
        digits[..width].to_string()
    } else {
        format!("{digits:0<width$}")
    }
}

fn week_of_year<T: TimeZone>(dt: &DateTime<T>, calendar: &Calendar) -> i64 {
    match calendar.week_start {
        WeekStartDay::Monday => dt.iso_week().week() as i64,
        WeekStartDay::Sunday => {
            // Week 1 contains January 1.
            let ordinal0 = dt.ordinal0() as i64;
            let jan1_weekday =
                (dt.weekday().num_days_from_sunday() as i64 - ordinal0).rem_euclid(7);
            (ordinal0 + jan1_weekday) / 7 + 1
        }
    }
}

fn week_of_month<T: TimeZone>(dt: &DateTime<T>, calendar: &Calendar) -> i64 {
    let day0 = dt.day0() as i64;
    let lead = (days_from_week_start(dt.weekday(), calendar.week_start) - day0).rem_euclid(7);
    (day0 + lead) / 7 + 1
}

fn offset<T>(dt: &DateTime<T>, width: usize) -> String
where
    T: TimeZone,
    T::Offset: Display,
{
    let seconds = dt.offset().fix().local_minus_utc();
    match width {
        4 => localized_gmt(dt),
        5 if seconds == 0 => "Z".to_string(),
        5 => format_offset(seconds, ":"),
        _ => format_offset(seconds, ""),
    }
}

fn localized_gmt<T: TimeZone>(dt: &DateTime<T>) -> String {
    let seconds = dt.offset().fix().local_minus_utc();
    if seconds == 0 {
        "GMT".to_string()
    } else {
        format!("GMT{}", format_offset(seconds, ":"))
    }
}

fn format_offset(seconds: i32, separator: &str) -> String {
    let sign = if seconds >= 0 { "+" } else { "-" };
    let abs = seconds.unsigned_abs();
    format!("{sign}{:02}{separator}{:02}", abs / 3600, (abs % 3600) / 60)
}

// ── Tests ───────────────────────────────────────────────────────────────────
