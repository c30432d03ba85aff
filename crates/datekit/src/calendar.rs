//! Calendar arithmetic delegated to chrono.
//!
//! Nothing here implements calendar rules. Month lengths, leap years and
//! time-zone offsets all come from `chrono` / `chrono-tz`; these functions only
//! translate between [`FieldKind`]s, [`DateDifference`]s and chrono calls.
//!
//! # Functions
//!
//! - [`add_difference`] — apply a difference to an instant
//! - [`count_between`] — whole units elapsed between two instants
//! - [`difference_between`] — per-field period difference, used for relative labels
//! - [`start_of`] / [`end_of`] — bounds of the period containing an instant
//!
//! Calendar-unit arithmetic (days and larger) works on local wall-clock time in
//! the given zone so that "+1 day" keeps the time of day across DST changes.
//! Clock units (hours and smaller) are exact elapsed time, and clock periods
//! are counted on the UTC timeline, so a repeated local hour is two periods.

use chrono::{
    DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Timelike,
    Utc, Weekday,
};
use serde::{Deserialize, Serialize};

use crate::difference::{ComponentMap, DateDifference};
use crate::error::{DateKitError, Result};
use crate::field::FieldKind;

// ── Configurable week start ─────────────────────────────────────────────────

/// Which day begins a week for week-based fields and periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// ISO 8601 standard (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
}

/// How many days `weekday` is from the week-start day.
pub(crate) fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> i64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
    }
}

/// Gregorian calendar parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Calendar {
    pub week_start: WeekStartDay,
}

impl Calendar {
    pub fn gregorian() -> Self {
        Self::default()
    }

    pub fn with_week_start(week_start: WeekStartDay) -> Self {
        Self { week_start }
    }
}

// ── add_difference ──────────────────────────────────────────────────────────

/// Apply `difference` to `instant`.
///
/// Component maps are applied coarse to fine: years, quarters and months in
/// one step, then weeks and days, in local time of `tz`; hours and smaller are
/// added as exact durations. Era, time-zone and calendar entries are ignored.
///
/// # Errors
///
/// Returns [`DateKitError::InvalidDatetime`] if the result is out of range or
/// lands on a nonexistent or ambiguous local time.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use datekit::calendar::add_difference;
/// use datekit::difference::DateDifference;
///
/// let jan31 = Utc.with_ymd_and_hms(2026, 1, 31, 9, 0, 0).unwrap();
/// let result = add_difference(jan31, &DateDifference::months(1), &Utc).unwrap();
/// assert_eq!(result, Utc.with_ymd_and_hms(2026, 2, 28, 9, 0, 0).unwrap());
/// ```
pub fn add_difference<Z: TimeZone>(
    instant: DateTime<Utc>,
    difference: &DateDifference,
    tz: &Z,
) -> Result<DateTime<Utc>> {
    match difference {
        DateDifference::Components(map) => add_components(instant, map, tz),
        other => instant
            .checked_add_signed(delta_from_seconds(other.interval_seconds()))
            .ok_or_else(|| out_of_range(&instant)),
    }
}

fn add_components<Z: TimeZone>(
    instant: DateTime<Utc>,
    map: &ComponentMap,
    tz: &Z,
) -> Result<DateTime<Utc>> {
    let mut months = 0i64;
    let mut days = 0i64;
    let mut exact = TimeDelta::zero();

    for (&kind, &value) in map {
        match kind {
            FieldKind::Year | FieldKind::YearForWeekOfYear => {
                months = months.saturating_add(value.saturating_mul(12))
            }
            FieldKind::Quarter => months = months.saturating_add(value.saturating_mul(3)),
            FieldKind::Month => months = months.saturating_add(value),
            FieldKind::WeekOfYear | FieldKind::WeekOfMonth | FieldKind::WeekdayOrdinal => {
                days = days.saturating_add(value.saturating_mul(7))
            }
            FieldKind::Day | FieldKind::Weekday => days = days.saturating_add(value),
            FieldKind::Hour | FieldKind::Minute | FieldKind::Second | FieldKind::Nanosecond => {
                let delta = clock_delta(kind, value).ok_or_else(|| out_of_range(&instant))?;
                exact = exact
                    .checked_add(&delta)
                    .ok_or_else(|| out_of_range(&instant))?;
            }
            FieldKind::Era | FieldKind::TimeZone | FieldKind::Calendar => {}
        }
    }

    let mut result = instant;
    if months != 0 || days != 0 {
        // Calendar units move the wall clock, then map back through the zone.
        let local = instant.with_timezone(tz).naive_local();
        let shifted = shift_months(local, months)
            .and_then(|dt| shift_days(dt, days))
            .ok_or_else(|| out_of_range(&instant))?;
        result = tz
            .from_local_datetime(&shifted)
            .single()
            .ok_or_else(|| {
                DateKitError::InvalidDatetime(format!(
                    "'{shifted}' is ambiguous or nonexistent in the target timezone"
                ))
            })?
            .with_timezone(&Utc);
    }

    result
        .checked_add_signed(exact)
        .ok_or_else(|| out_of_range(&instant))
}

// ── count_between ───────────────────────────────────────────────────────────

/// Number of whole `kind` units elapsed from `from` to `to`.
///
/// Negative when `to` is before `from`. Kinds without a duration (era, time
/// zone, calendar) count as 0.
pub fn count_between<Z: TimeZone>(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    kind: FieldKind,
    tz: &Z,
) -> i64 {
    let elapsed = to - from;
    let local_from = from.with_timezone(tz).naive_local();
    let local_to = to.with_timezone(tz).naive_local();

    match kind {
        FieldKind::Nanosecond => {
            let saturated = if elapsed < TimeDelta::zero() {
                i64::MIN
            } else {
                i64::MAX
            };
            elapsed.num_nanoseconds().unwrap_or(saturated)
        }
        FieldKind::Second => elapsed.num_seconds(),
        FieldKind::Minute => elapsed.num_minutes(),
        FieldKind::Hour => elapsed.num_hours(),
        FieldKind::Day | FieldKind::Weekday => whole_days(local_from, local_to),
        FieldKind::WeekOfYear | FieldKind::WeekOfMonth | FieldKind::WeekdayOrdinal => {
            whole_days(local_from, local_to) / 7
        }
        FieldKind::Month => whole_months(local_from, local_to),
        FieldKind::Quarter => whole_months(local_from, local_to) / 3,
        FieldKind::Year | FieldKind::YearForWeekOfYear => whole_months(local_from, local_to) / 12,
        FieldKind::Era | FieldKind::TimeZone | FieldKind::Calendar => 0,
    }
}

fn whole_days(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let estimate = (to.date() - from.date()).num_days();
    whole_units(from, to, estimate, shift_days)
}

fn whole_months(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let estimate = month_index(&to) - month_index(&from);
    whole_units(from, to, estimate, shift_months)
}

/// Correct a unit-count estimate so that stepping `n` units from `from`
/// stays on the near side of `to`.
fn whole_units<F>(from: NaiveDateTime, to: NaiveDateTime, estimate: i64, step: F) -> i64
where
    F: Fn(NaiveDateTime, i64) -> Option<NaiveDateTime>,
{
    let within = |n: i64| match step(from, n) {
        Some(reached) if n >= 0 => reached <= to,
        Some(reached) => reached >= to,
        None => false,
    };

    let mut n = estimate;
    if to >= from {
        n = n.max(0);
        while n > 0 && !within(n) {
            n -= 1;
        }
        while within(n + 1) {
            n += 1;
        }
    } else {
        n = n.min(0);
        while n < 0 && !within(n) {
            n += 1;
        }
        while within(n - 1) {
            n -= 1;
        }
    }
    n
}

// ── difference_between ──────────────────────────────────────────────────────

/// For each kind, how many periods of that kind separate the period containing
/// `from` and the period containing `to`.
///
/// Unlike [`count_between`] this ignores the position inside the period:
/// 23:00 on Monday and 01:00 on Tuesday are one day apart.
pub fn difference_between<Z: TimeZone>(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    kinds: impl IntoIterator<Item = FieldKind>,
    calendar: &Calendar,
    tz: &Z,
) -> ComponentMap {
    let local_from = from.with_timezone(tz).naive_local();
    let local_to = to.with_timezone(tz).naive_local();

    kinds
        .into_iter()
        .map(|kind| {
            let value = match kind {
                FieldKind::Nanosecond => count_between(from, to, kind, tz),
                _ => {
                    period_index(kind, &to, &local_to, calendar.week_start)
                        - period_index(kind, &from, &local_from, calendar.week_start)
                }
            };
            (kind, value)
        })
        .collect()
}

/// Length in seconds of a clock period (second, minute, hour).
fn clock_unit_seconds(kind: FieldKind) -> Option<i64> {
    match kind {
        FieldKind::Second => Some(1),
        FieldKind::Minute => Some(60),
        FieldKind::Hour => Some(3_600),
        _ => None,
    }
}

/// A running index of the period of `kind` that contains `instant`, whose
/// wall-clock time in the target zone is `local`.
///
/// Clock periods are aligned to the wall clock but counted on the UTC
/// timeline, so a local hour repeated by a DST fall-back is two periods.
/// Calendar periods are counted on the wall clock.
fn period_index(
    kind: FieldKind,
    instant: &DateTime<Utc>,
    local: &NaiveDateTime,
    week_start: WeekStartDay,
) -> i64 {
    match kind {
        FieldKind::Nanosecond | FieldKind::Second => instant.timestamp(),
        FieldKind::Minute => clock_period_index(instant, local, 60),
        FieldKind::Hour => clock_period_index(instant, local, 3_600),
        FieldKind::Day | FieldKind::Weekday => local.date().num_days_from_ce() as i64,
        FieldKind::WeekOfYear | FieldKind::WeekOfMonth | FieldKind::WeekdayOrdinal => {
            let day = local.date().num_days_from_ce() as i64;
            (day - days_from_week_start(local.weekday(), week_start)).div_euclid(7)
        }
        FieldKind::Month => month_index(local),
        FieldKind::Quarter => local.year() as i64 * 4 + local.month0() as i64 / 3,
        FieldKind::Year => local.year() as i64,
        FieldKind::YearForWeekOfYear => local.iso_week().year() as i64,
        FieldKind::Era => i64::from(local.year() > 0),
        FieldKind::TimeZone | FieldKind::Calendar => 0,
    }
}

fn clock_period_index(instant: &DateTime<Utc>, local: &NaiveDateTime, unit: i64) -> i64 {
    let into_period = local.and_utc().timestamp().rem_euclid(unit);
    (instant.timestamp() - into_period).div_euclid(unit)
}

fn month_index(dt: &NaiveDateTime) -> i64 {
    dt.year() as i64 * 12 + dt.month0() as i64
}

// ── start_of / end_of ───────────────────────────────────────────────────────

/// The first instant of the `kind` period containing `instant`.
///
/// # Errors
///
/// Returns [`DateKitError::UnsupportedField`] for era, time zone and calendar,
/// and [`DateKitError::InvalidDatetime`] if the period start does not exist
/// in `tz`.
pub fn start_of<Z: TimeZone>(
    instant: DateTime<Utc>,
    kind: FieldKind,
    calendar: &Calendar,
    tz: &Z,
) -> Result<DateTime<Utc>> {
    if let Some(start) = clock_period_start(instant, kind, tz) {
        return start;
    }
    let local = instant.with_timezone(tz).naive_local();
    let start = local_period_start(&local, kind, calendar.week_start)?;
    to_utc(&start, tz)
}

/// The last instant (one nanosecond before the next period) of the `kind`
/// period containing `instant`.
///
/// # Errors
///
/// Same as [`start_of`].
pub fn end_of<Z: TimeZone>(
    instant: DateTime<Utc>,
    kind: FieldKind,
    calendar: &Calendar,
    tz: &Z,
) -> Result<DateTime<Utc>> {
    if let Some(start) = clock_period_start(instant, kind, tz) {
        let length = match clock_unit_seconds(kind) {
            Some(unit) => TimeDelta::seconds(unit),
            None => TimeDelta::nanoseconds(1),
        };
        return start?
            .checked_add_signed(length - TimeDelta::nanoseconds(1))
            .ok_or_else(|| out_of_range(&instant));
    }
    let local = instant.with_timezone(tz).naive_local();
    let start = local_period_start(&local, kind, calendar.week_start)?;
    let next = step_naive(kind, start, 1).ok_or_else(|| out_of_range(&instant))?;
    Ok(to_utc(&next, tz)? - TimeDelta::nanoseconds(1))
}

/// Start of a clock period (nanosecond through hour), or `None` for calendar
/// kinds.
///
/// The instant is truncated with its own UTC offset, so inside a repeated
/// local hour the period stays on the pass that contains the instant.
fn clock_period_start<Z: TimeZone>(
    instant: DateTime<Utc>,
    kind: FieldKind,
    tz: &Z,
) -> Option<Result<DateTime<Utc>>> {
    if kind == FieldKind::Nanosecond {
        return Some(Ok(instant));
    }
    let unit = clock_unit_seconds(kind)?;
    let local = instant.with_timezone(tz).naive_local();
    let into_period = local.and_utc().timestamp().rem_euclid(unit);
    let start = instant
        .with_nanosecond(0)
        .and_then(|whole| whole.checked_sub_signed(TimeDelta::seconds(into_period)))
        .ok_or_else(|| out_of_range(&instant));
    Some(start)
}

fn local_period_start(
    dt: &NaiveDateTime,
    kind: FieldKind,
    week_start: WeekStartDay,
) -> Result<NaiveDateTime> {
    let date = dt.date();
    let start = match kind {
        // Clock periods are truncated on the UTC timeline by `clock_period_start`.
        FieldKind::Nanosecond | FieldKind::Second | FieldKind::Minute | FieldKind::Hour => {
            Some(*dt)
        }
        FieldKind::Day | FieldKind::Weekday => date.and_hms_opt(0, 0, 0),
        FieldKind::WeekOfYear | FieldKind::WeekOfMonth | FieldKind::WeekdayOrdinal => date
            .checked_sub_days(Days::new(
                days_from_week_start(dt.weekday(), week_start) as u64,
            ))
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
        FieldKind::Month => date.with_day(1).and_then(|d| d.and_hms_opt(0, 0, 0)),
        FieldKind::Quarter => NaiveDate::from_ymd_opt(dt.year(), dt.month0() / 3 * 3 + 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
        FieldKind::Year => {
            NaiveDate::from_ymd_opt(dt.year(), 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        }
        FieldKind::YearForWeekOfYear => {
            NaiveDate::from_isoywd_opt(dt.iso_week().year(), 1, Weekday::Mon)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        }
        FieldKind::Era | FieldKind::TimeZone | FieldKind::Calendar => {
            return Err(DateKitError::UnsupportedField(format!(
                "'{kind}' has no period bounds"
            )))
        }
    };
    start.ok_or_else(|| DateKitError::InvalidDatetime(format!("no start of {kind} for '{dt}'")))
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Step a local datetime by `n` units of `kind`.
fn step_naive(kind: FieldKind, dt: NaiveDateTime, n: i64) -> Option<NaiveDateTime> {
    match kind {
        FieldKind::Nanosecond | FieldKind::Second | FieldKind::Minute | FieldKind::Hour => {
            dt.checked_add_signed(clock_delta(kind, n)?)
        }
        FieldKind::Day | FieldKind::Weekday => shift_days(dt, n),
        FieldKind::WeekOfYear | FieldKind::WeekOfMonth | FieldKind::WeekdayOrdinal => {
            shift_days(dt, n.checked_mul(7)?)
        }
        FieldKind::Month => shift_months(dt, n),
        FieldKind::Quarter => shift_months(dt, n.checked_mul(3)?),
        FieldKind::Year | FieldKind::YearForWeekOfYear => shift_months(dt, n.checked_mul(12)?),
        FieldKind::Era | FieldKind::TimeZone | FieldKind::Calendar => None,
    }
}

fn clock_delta(kind: FieldKind, value: i64) -> Option<TimeDelta> {
    match kind {
        FieldKind::Hour => TimeDelta::try_hours(value),
        FieldKind::Minute => TimeDelta::try_minutes(value),
        FieldKind::Second => TimeDelta::try_seconds(value),
        FieldKind::Nanosecond => Some(TimeDelta::nanoseconds(value)),
        _ => None,
    }
}

fn shift_months(dt: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        dt.checked_add_months(magnitude)
    } else {
        dt.checked_sub_months(magnitude)
    }
}

fn shift_days(dt: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        dt.checked_add_days(magnitude)
    } else {
        dt.checked_sub_days(magnitude)
    }
}

fn to_utc<Z: TimeZone>(local: &NaiveDateTime, tz: &Z) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            DateKitError::InvalidDatetime(format!("'{local}' does not exist in the target timezone"))
        })
}

fn out_of_range(instant: &DateTime<Utc>) -> DateKitError {
    DateKitError::InvalidDatetime(format!(
        "adjusting '{}' leaves the supported range",
        instant.to_rfc3339()
    ))
}

/// Elapsed seconds between two instants, sub-second precise.
pub(crate) fn elapsed_seconds(from: &DateTime<Utc>, to: &DateTime<Utc>) -> f64 {
    let delta = *to - *from;
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
}

/// Largest whole-second magnitude chrono can represent as a `TimeDelta`.
const MAX_DELTA_SECONDS: f64 = (i64::MAX / 1_000) as f64;

/// Convert a floating seconds value to a `TimeDelta`, saturating at chrono's
/// limits. NaN maps to zero.
pub(crate) fn delta_from_seconds(seconds: f64) -> TimeDelta {
    if seconds.is_nan() {
        return TimeDelta::zero();
    }
    if seconds.is_infinite() {
        return if seconds < 0.0 {
            TimeDelta::MIN
        } else {
            TimeDelta::MAX
        };
    }
    let whole = seconds.trunc().clamp(-MAX_DELTA_SECONDS, MAX_DELTA_SECONDS);
    let nanos = ((seconds - seconds.trunc()) * 1e9).round() as i64;
    let base = TimeDelta::try_seconds(whole as i64).unwrap_or(if whole < 0.0 {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    });
    base.checked_add(&TimeDelta::nanoseconds(nanos)).unwrap_or(base)
}

/// `from + seconds`, pinned to the representable range.
pub(crate) fn shift_saturating(from: DateTime<Utc>, seconds: f64) -> DateTime<Utc> {
    from.checked_add_signed(delta_from_seconds(seconds))
        .unwrap_or(if seconds < 0.0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

// ── Tests ───────────────────────────────────────────────────────────────────
