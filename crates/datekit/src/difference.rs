//! Calendar-aware time differences and their arithmetic.
//!
//! A [`DateDifference`] is one of three representations:
//!
//! - [`DateDifference::Seconds`] — elapsed time, independent of any calendar
//! - [`DateDifference::Instants`] — the span between two concrete instants
//! - [`DateDifference::Components`] — a symbolic amount such as "+1 month, −1 day"
//!
//! Arithmetic is defined for every combination of representations. Two
//! component maps stay symbolic, seconds stay seconds, and an instant pair
//! combined with seconds stays anchored to its `from` instant. Every other mix
//! falls back to plain elapsed seconds via [`DateDifference::interval_seconds`],
//! which loses calendar meaning ("a month" becomes ~30.44 days).
//!
//! Integer magnitudes saturate instead of overflowing.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::calendar::{self, add_difference, count_between, elapsed_seconds};
use crate::field::FieldKind;

/// Signed magnitudes per field kind. A missing key means "not specified".
pub type ComponentMap = BTreeMap<FieldKind, i64>;

/// A difference in time.
///
/// Equality and ordering compare elapsed time, not representation:
/// `hours(24) == days(1)`. For that reason the type implements neither `Eq`
/// nor `Hash`; a hash of the representation would disagree with `==`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateDifference {
    Seconds(f64),
    Instants {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
    Components(ComponentMap),
}

impl Default for DateDifference {
    fn default() -> Self {
        DateDifference::Components(ComponentMap::new())
    }
}

// ── Constructors ────────────────────────────────────────────────────────────

impl DateDifference {
    pub fn from_seconds(value: f64) -> Self {
        DateDifference::Seconds(value)
    }

    pub fn from_instants(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        DateDifference::Instants { from, to }
    }

    /// Later entries for the same kind replace earlier ones.
    pub fn from_components(components: impl IntoIterator<Item = (FieldKind, i64)>) -> Self {
        DateDifference::Components(components.into_iter().collect())
    }

    /// A single-entry component map.
    pub fn of(kind: FieldKind, value: i64) -> Self {
        Self::from_components([(kind, value)])
    }

    pub fn eras(value: i64) -> Self {
        Self::of(FieldKind::Era, value)
    }

    pub fn years(value: i64) -> Self {
        Self::of(FieldKind::Year, value)
    }

    pub fn quarters(value: i64) -> Self {
        Self::of(FieldKind::Quarter, value)
    }

    pub fn months(value: i64) -> Self {
        Self::of(FieldKind::Month, value)
    }

    pub fn weeks(value: i64) -> Self {
        Self::of(FieldKind::WEEK, value)
    }

    pub fn days(value: i64) -> Self {
        Self::of(FieldKind::Day, value)
    }

    pub fn hours(value: i64) -> Self {
        Self::of(FieldKind::Hour, value)
    }

    pub fn minutes(value: i64) -> Self {
        Self::of(FieldKind::Minute, value)
    }

    pub fn seconds(value: i64) -> Self {
        Self::of(FieldKind::Second, value)
    }

    pub fn nanoseconds(value: i64) -> Self {
        Self::of(FieldKind::Nanosecond, value)
    }
}

impl FromIterator<(FieldKind, i64)> for DateDifference {
    fn from_iter<I: IntoIterator<Item = (FieldKind, i64)>>(iter: I) -> Self {
        Self::from_components(iter)
    }
}

impl From<ComponentMap> for DateDifference {
    fn from(map: ComponentMap) -> Self {
        DateDifference::Components(map)
    }
}

// ── Projections ─────────────────────────────────────────────────────────────

impl DateDifference {
    /// Elapsed seconds represented by this difference.
    ///
    /// Exact for seconds and instant pairs. For component maps this sums each
    /// magnitude times the kind's nominal length (a month is 1/12 of 365.2425
    /// days), and kinds without a nominal length contribute nothing, so the
    /// result is only a heuristic for ordering. Real date arithmetic goes
    /// through [`calendar::add_difference`].
    pub fn interval_seconds(&self) -> f64 {
        match self {
            DateDifference::Seconds(value) => *value,
            DateDifference::Instants { from, to } => elapsed_seconds(from, to),
            DateDifference::Components(map) => map
                .iter()
                .map(|(kind, value)| *value as f64 * kind.nominal_seconds().unwrap_or(0.0))
                .sum(),
        }
    }

    /// The component map, if this difference is symbolic.
    pub fn as_components(&self) -> Option<&ComponentMap> {
        match self {
            DateDifference::Components(map) => Some(map),
            _ => None,
        }
    }

    /// This difference expressed as whole units of `kind`, truncated toward
    /// zero.
    ///
    /// Instant pairs count calendar units between the two instants in UTC;
    /// seconds and component maps convert through nominal lengths. Kinds with
    /// no nominal length give 0 unless they appear in a component map.
    pub fn component(&self, kind: FieldKind) -> i64 {
        match self {
            DateDifference::Seconds(value) => match kind.nominal_seconds() {
                Some(unit) if unit != 0.0 => (value / unit) as i64,
                _ => 0,
            },
            DateDifference::Instants { from, to } => count_between(*from, *to, kind, &Utc),
            DateDifference::Components(map) => {
                let total: f64 = map
                    .iter()
                    .map(|(k, v)| {
                        if *k == kind {
                            *v as f64
                        } else {
                            *v as f64 * k.ratio_to(kind).unwrap_or(0.0)
                        }
                    })
                    .sum();
                total as i64
            }
        }
    }

    /// [`component`](Self::component) for each kind in `kinds`.
    pub fn to_components(&self, kinds: impl IntoIterator<Item = FieldKind>) -> ComponentMap {
        kinds
            .into_iter()
            .map(|kind| (kind, self.component(kind)))
            .collect()
    }

    pub fn eras_part(&self) -> i64 {
        self.component(FieldKind::Era)
    }

    pub fn years_part(&self) -> i64 {
        self.component(FieldKind::Year)
    }

    pub fn months_part(&self) -> i64 {
        self.component(FieldKind::Month)
    }

    pub fn weeks_part(&self) -> i64 {
        self.component(FieldKind::WEEK)
    }

    pub fn days_part(&self) -> i64 {
        self.component(FieldKind::Day)
    }

    pub fn hours_part(&self) -> i64 {
        self.component(FieldKind::Hour)
    }

    pub fn minutes_part(&self) -> i64 {
        self.component(FieldKind::Minute)
    }

    pub fn seconds_part(&self) -> i64 {
        self.component(FieldKind::Second)
    }
}

// ── Arithmetic ──────────────────────────────────────────────────────────────

/// The float and integer forms of one binary operation.
struct BinaryOp {
    float: fn(f64, f64) -> f64,
    int: fn(i64, i64) -> i64,
}

const ADD: BinaryOp = BinaryOp {
    float: |a, b| a + b,
    int: i64::saturating_add,
};

const SUB: BinaryOp = BinaryOp {
    float: |a, b| a - b,
    int: i64::saturating_sub,
};

const MUL: BinaryOp = BinaryOp {
    float: |a, b| a * b,
    int: i64::saturating_mul,
};

const DIV: BinaryOp = BinaryOp {
    float: |a, b| a / b,
    int: |a, b| a.checked_div(b).unwrap_or(0),
};

fn combine(lhs: DateDifference, rhs: DateDifference, op: &BinaryOp) -> DateDifference {
    use DateDifference::*;
    match (lhs, rhs) {
        (Components(mut left), Components(right)) => {
            for (kind, value) in right {
                let entry = left.entry(kind).or_insert(0);
                *entry = (op.int)(*entry, value);
            }
            Components(left)
        }
        (Seconds(left), Seconds(right)) => Seconds((op.float)(left, right)),
        (Instants { from, to }, Seconds(right)) => {
            let elapsed = (op.float)(elapsed_seconds(&from, &to), right);
            Instants {
                from,
                to: calendar::shift_saturating(from, elapsed),
            }
        }
        (Seconds(left), Instants { from, to }) => {
            let elapsed = (op.float)(left, elapsed_seconds(&from, &to));
            Instants {
                from,
                to: calendar::shift_saturating(from, elapsed),
            }
        }
        (lhs, rhs) => {
            debug!(
                lhs = ?lhs,
                rhs = ?rhs,
                "mixed difference representations, combining as elapsed seconds"
            );
            Seconds((op.float)(lhs.interval_seconds(), rhs.interval_seconds()))
        }
    }
}

fn scale(lhs: DateDifference, rhs: i64, op: &BinaryOp) -> DateDifference {
    use DateDifference::*;
    match lhs {
        Seconds(value) => Seconds((op.float)(value, rhs as f64)),
        Instants { from, to } => {
            let elapsed = (op.float)(elapsed_seconds(&from, &to), rhs as f64);
            Instants {
                from,
                to: calendar::shift_saturating(from, elapsed),
            }
        }
        Components(map) => Components(
            map.into_iter()
                .map(|(kind, value)| (kind, (op.int)(value, rhs)))
                .collect(),
        ),
    }
}

impl Add for DateDifference {
    type Output = DateDifference;

    fn add(self, rhs: DateDifference) -> DateDifference {
        combine(self, rhs, &ADD)
    }
}

impl Sub for DateDifference {
    type Output = DateDifference;

    fn sub(self, rhs: DateDifference) -> DateDifference {
        combine(self, rhs, &SUB)
    }
}

impl Mul<i64> for DateDifference {
    type Output = DateDifference;

    fn mul(self, rhs: i64) -> DateDifference {
        scale(self, rhs, &MUL)
    }
}

impl Mul<DateDifference> for i64 {
    type Output = DateDifference;

    fn mul(self, rhs: DateDifference) -> DateDifference {
        rhs * self
    }
}

/// Integer division by zero yields 0 for component magnitudes; seconds and
/// instant pairs follow IEEE float division.
impl Div<i64> for DateDifference {
    type Output = DateDifference;

    fn div(self, rhs: i64) -> DateDifference {
        scale(self, rhs, &DIV)
    }
}

impl Neg for DateDifference {
    type Output = DateDifference;

    fn neg(self) -> DateDifference {
        self * -1
    }
}

impl AddAssign for DateDifference {
    fn add_assign(&mut self, rhs: DateDifference) {
        *self = std::mem::take(self) + rhs;
    }
}

impl SubAssign for DateDifference {
    fn sub_assign(&mut self, rhs: DateDifference) {
        *self = std::mem::take(self) - rhs;
    }
}

impl MulAssign<i64> for DateDifference {
    fn mul_assign(&mut self, rhs: i64) {
        *self = std::mem::take(self) * rhs;
    }
}

impl DivAssign<i64> for DateDifference {
    fn div_assign(&mut self, rhs: i64) {
        *self = std::mem::take(self) / rhs;
    }
}

// ── Comparison ──────────────────────────────────────────────────────────────

/// Elapsed seconds of `other` when applied at `from`, falling back to its
/// nominal projection when the calendar cannot place it.
fn anchored_seconds(from: &DateTime<Utc>, other: &DateDifference) -> f64 {
    match add_difference(*from, other, &Utc) {
        Ok(reached) => elapsed_seconds(from, &reached),
        Err(err) => {
            trace!(%err, "cannot anchor difference, comparing nominal seconds");
            other.interval_seconds()
        }
    }
}

impl DateDifference {
    /// The pair of magnitudes two differences are compared by.
    ///
    /// When exactly one side is an instant pair, the other side is applied at
    /// the pair's `from` instant so that calendar units keep their real length
    /// ("1 month" from February 1 is 28 days).
    fn comparable(&self, other: &DateDifference) -> (f64, f64) {
        use DateDifference::*;
        match (self, other) {
            (Instants { .. }, Instants { .. }) => (self.interval_seconds(), other.interval_seconds()),
            (Instants { from, to }, rhs) => (elapsed_seconds(from, to), anchored_seconds(from, rhs)),
            (lhs, Instants { from, to }) => (anchored_seconds(from, lhs), elapsed_seconds(from, to)),
            _ => (self.interval_seconds(), other.interval_seconds()),
        }
    }
}

impl PartialEq for DateDifference {
    fn eq(&self, other: &Self) -> bool {
        let (lhs, rhs) = self.comparable(other);
        lhs == rhs
    }
}

impl PartialOrd for DateDifference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let (lhs, rhs) = self.comparable(other);
        lhs.partial_cmp(&rhs)
    }
}

// ── pick_label ──────────────────────────────────────────────────────────────

/// Select the label whose key is contained in `difference`.
///
/// A key matches when every kind it specifies is present in `difference` with
/// exactly the same value. Among matching keys the one whose finest kind is
/// the finest wins; on a tie the earlier candidate wins. An empty key matches
/// any difference but loses to every non-empty match. Without a match,
/// `default` is returned.
///
/// # Examples
///
/// ```
/// use datekit::difference::{pick_label, ComponentMap};
/// use datekit::field::FieldKind;
///
/// let key = |v: i64| ComponentMap::from([(FieldKind::Day, v)]);
/// let candidates = [(key(-1), "Yesterday"), (key(0), "Today"), (key(1), "Tomorrow")];
///
/// assert_eq!(*pick_label(&candidates, &key(0), &"Default"), "Today");
/// assert_eq!(*pick_label(&candidates, &key(5), &"Default"), "Default");
/// ```
pub fn pick_label<'a, L>(
    candidates: &'a [(ComponentMap, L)],
    difference: &ComponentMap,
    default: &'a L,
) -> &'a L {
    let mut best: Option<(Option<FieldKind>, &'a L)> = None;

    for (key, label) in candidates {
        if !is_contained(key, difference) {
            continue;
        }
        let finest = key.keys().next().copied();
        let better = match best {
            None => true,
            Some((current, _)) => ranks_before(finest, current),
        };
        if better {
            best = Some((finest, label));
        }
    }

    best.map_or(default, |(_, label)| label)
}

fn is_contained(key: &ComponentMap, difference: &ComponentMap) -> bool {
    key.iter()
        .all(|(kind, value)| difference.get(kind) == Some(value))
}

/// Whether a key with finest kind `candidate` beats one with `current`.
/// `None` (an empty key) ranks last.
fn ranks_before(candidate: Option<FieldKind>, current: Option<FieldKind>) -> bool {
    match (candidate, current) {
        (Some(c), Some(cur)) => c < cur,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn map(entries: &[(FieldKind, i64)]) -> ComponentMap {
        entries.iter().copied().collect()
    }

    // ── component arithmetic tests ──────────────────────────────────────

    #[test]
    fn test_add_components_merges_keys() {
        let lhs = DateDifference::from_components([
            (FieldKind::Day, -1),
            (FieldKind::Second, -1),
            (FieldKind::Year, 1),
        ]);
        let sum = lhs + DateDifference::days(1);
        assert_eq!(
            sum.as_components(),
            Some(&map(&[
                (FieldKind::Day, 0),
                (FieldKind::Second, -1),
                (FieldKind::Year, 1)
            ]))
        );
    }

    #[test]
    fn test_sub_components_treats_missing_as_zero() {
        let diff = DateDifference::months(2) - DateDifference::days(3);
        assert_eq!(
            diff.as_components(),
            Some(&map(&[(FieldKind::Month, 2), (FieldKind::Day, -3)]))
        );
    }

    #[test]
    fn test_scale_components() {
        let doubled = DateDifference::months(1) * 2;
        assert_eq!(doubled.as_components(), Some(&map(&[(FieldKind::Month, 2)])));

        let left = 3 * DateDifference::days(2);
        assert_eq!(left.as_components(), Some(&map(&[(FieldKind::Day, 6)])));

        let halved = DateDifference::hours(7) / 2;
        assert_eq!(halved.as_components(), Some(&map(&[(FieldKind::Hour, 3)])));
    }

    #[test]
    fn test_divide_components_by_zero_yields_zero() {
        let diff = DateDifference::days(5) / 0;
        assert_eq!(diff.as_components(), Some(&map(&[(FieldKind::Day, 0)])));
    }

    #[test]
    fn test_negate_components() {
        let diff = -DateDifference::from_components([(FieldKind::Year, 1), (FieldKind::Day, -2)]);
        assert_eq!(
            diff.as_components(),
            Some(&map(&[(FieldKind::Year, -1), (FieldKind::Day, 2)]))
        );
    }

    #[test]
    fn test_component_arithmetic_saturates() {
        let diff = DateDifference::days(i64::MAX) + DateDifference::days(1);
        assert_eq!(diff.as_components(), Some(&map(&[(FieldKind::Day, i64::MAX)])));
    }

    #[test]
    fn test_assign_operators() {
        let mut diff = DateDifference::days(1);
        diff += DateDifference::hours(2);
        diff *= 3;
        diff -= DateDifference::days(1);
        assert_eq!(
            diff.as_components(),
            Some(&map(&[(FieldKind::Hour, 6), (FieldKind::Day, 2)]))
        );
    }

    // ── seconds / instants arithmetic tests ─────────────────────────────

    #[test]
    fn test_seconds_plus_seconds() {
        let sum = DateDifference::from_seconds(1.5) + DateDifference::from_seconds(2.0);
        assert!(matches!(sum, DateDifference::Seconds(v) if v == 3.5));
    }

    #[test]
    fn test_instants_plus_seconds_reanchors_to() {
        let from = utc(2026, 3, 16, 9, 0, 0);
        let pair = DateDifference::from_instants(from, utc(2026, 3, 16, 10, 0, 0));

        let later = pair.clone() + DateDifference::from_seconds(1_800.0);
        match later {
            DateDifference::Instants { from: f, to } => {
                assert_eq!(f, from);
                assert_eq!(to, utc(2026, 3, 16, 10, 30, 0));
            }
            other => panic!("expected instants, got {other:?}"),
        }

        // seconds - pair keeps the operand order: 600 - 3600
        let reversed = DateDifference::from_seconds(600.0) - pair;
        assert_eq!(reversed.interval_seconds(), -3_000.0);
        assert!(matches!(reversed, DateDifference::Instants { .. }));
    }

    #[test]
    fn test_scale_instants() {
        let from = utc(2026, 3, 16, 9, 0, 0);
        let pair = DateDifference::from_instants(from, utc(2026, 3, 16, 10, 0, 0)) * 3;
        match pair {
            DateDifference::Instants { to, .. } => assert_eq!(to, utc(2026, 3, 16, 12, 0, 0)),
            other => panic!("expected instants, got {other:?}"),
        }
    }

    #[test]
    fn test_mixed_representations_fall_back_to_seconds() {
        let sum = DateDifference::days(1) + DateDifference::from_seconds(60.0);
        assert!(matches!(sum, DateDifference::Seconds(v) if v == 86_460.0));

        let pair = DateDifference::from_instants(utc(2026, 1, 1, 0, 0, 0), utc(2026, 1, 1, 1, 0, 0));
        let sum = pair + DateDifference::hours(1);
        assert!(matches!(sum, DateDifference::Seconds(v) if v == 7_200.0));
    }

    #[test]
    fn test_instants_plus_instants_is_seconds() {
        let a = DateDifference::from_instants(utc(2026, 1, 1, 0, 0, 0), utc(2026, 1, 1, 0, 1, 0));
        let b = DateDifference::from_instants(utc(2027, 1, 1, 0, 0, 0), utc(2027, 1, 1, 0, 0, 30));
        assert!(matches!(a + b, DateDifference::Seconds(v) if v == 90.0));
    }

    // ── projection tests ────────────────────────────────────────────────

    #[test]
    fn test_interval_seconds() {
        assert_eq!(DateDifference::from_seconds(-12.5).interval_seconds(), -12.5);
        assert_eq!(DateDifference::weeks(1).interval_seconds(), 604_800.0);
        assert_eq!(DateDifference::eras(3).interval_seconds(), 0.0);
        let pair = DateDifference::from_instants(utc(2026, 1, 1, 0, 0, 0), utc(2026, 1, 2, 0, 0, 0));
        assert_eq!(pair.interval_seconds(), 86_400.0);
    }

    #[test]
    fn test_component_extraction() {
        assert_eq!(DateDifference::from_seconds(7_200.0).component(FieldKind::Minute), 120);
        assert_eq!(DateDifference::weeks(2).days_part(), 14);
        assert_eq!(DateDifference::years(1).months_part(), 12);
        assert_eq!(DateDifference::from_seconds(100.0).eras_part(), 0);

        let pair = DateDifference::from_instants(utc(2026, 1, 31, 0, 0, 0), utc(2026, 3, 30, 0, 0, 0));
        assert_eq!(pair.months_part(), 1);
        assert_eq!(pair.days_part(), 58);
    }

    #[test]
    fn test_to_components() {
        let diff = DateDifference::from_seconds(90_061.0);
        let parts = diff.to_components([FieldKind::Day, FieldKind::Hour]);
        assert_eq!(parts, map(&[(FieldKind::Day, 1), (FieldKind::Hour, 25)]));
    }

    // ── comparison tests ────────────────────────────────────────────────

    #[test]
    fn test_compare_components_by_projection() {
        assert!(DateDifference::days(1) < DateDifference::weeks(1));
        assert!(DateDifference::hours(24) == DateDifference::days(1));
        assert!(DateDifference::months(1) * 2 == DateDifference::months(2));
    }

    #[test]
    fn test_compare_seconds() {
        assert!(DateDifference::from_seconds(1.0) < DateDifference::from_seconds(2.0));
        assert!(DateDifference::from_seconds(60.0) == DateDifference::minutes(1));
    }

    #[test]
    fn test_compare_anchors_at_instant_pair() {
        // February 2026 has 28 days: one month from Feb 1 is exactly 28 days
        let feb = DateDifference::from_instants(utc(2026, 2, 1, 0, 0, 0), utc(2026, 3, 1, 0, 0, 0));
        assert!(feb == DateDifference::months(1));
        assert!(DateDifference::months(1) == feb);
        assert!(DateDifference::days(28) == feb);
        assert!(DateDifference::days(29) > feb);

        // The nominal month is ~30.44 days, so without anchoring these would differ
        assert!(DateDifference::days(28) < DateDifference::months(1));
    }

    #[test]
    fn test_compare_nan_is_unordered() {
        let nan = DateDifference::from_seconds(f64::NAN);
        assert!(nan.partial_cmp(&DateDifference::from_seconds(0.0)).is_none());
        assert!(nan != nan.clone());
    }

    // ── pick_label tests ────────────────────────────────────────────────

    fn relative_candidates() -> Vec<(ComponentMap, &'static str)> {
        vec![
            (map(&[(FieldKind::Day, -1)]), "Yesterday"),
            (map(&[(FieldKind::Day, 0)]), "Today"),
            (map(&[(FieldKind::Day, 1)]), "Tomorrow"),
            (map(&[(FieldKind::WEEK, 0)]), "EEEE"),
            (map(&[(FieldKind::Year, 0)]), "dd.MM"),
        ]
    }

    #[test]
    fn test_pick_label_exact_match() {
        let candidates = relative_candidates();
        let diff = map(&[(FieldKind::Day, 0), (FieldKind::WEEK, 0), (FieldKind::Year, 0)]);
        assert_eq!(*pick_label(&candidates, &diff, &"default"), "Today");
    }

    #[test]
    fn test_pick_label_prefers_finest_kind() {
        let candidates = relative_candidates();
        let diff = map(&[(FieldKind::Day, 3), (FieldKind::WEEK, 0), (FieldKind::Year, 0)]);
        assert_eq!(*pick_label(&candidates, &diff, &"default"), "EEEE");

        let diff = map(&[(FieldKind::Day, 30), (FieldKind::WEEK, 4), (FieldKind::Year, 0)]);
        assert_eq!(*pick_label(&candidates, &diff, &"default"), "dd.MM");
    }

    #[test]
    fn test_pick_label_default_when_nothing_matches() {
        let candidates = relative_candidates();
        assert_eq!(
            *pick_label(&candidates, &map(&[(FieldKind::Day, 5)]), &"default"),
            "default"
        );
        let none: Vec<(ComponentMap, &str)> = Vec::new();
        assert_eq!(*pick_label(&none, &map(&[(FieldKind::Day, 0)]), &"default"), "default");
    }

    #[test]
    fn test_pick_label_missing_field_does_not_match() {
        let candidates = vec![(map(&[(FieldKind::Hour, 0)]), "this hour")];
        assert_eq!(
            *pick_label(&candidates, &map(&[(FieldKind::Day, 0)]), &"default"),
            "default"
        );
    }

    #[test]
    fn test_pick_label_tie_keeps_first_and_empty_key_ranks_last() {
        let candidates = vec![
            (ComponentMap::new(), "any"),
            (map(&[(FieldKind::Day, 0)]), "first"),
            (map(&[(FieldKind::Day, 0), (FieldKind::Year, 0)]), "second"),
        ];
        let diff = map(&[(FieldKind::Day, 0), (FieldKind::Year, 0)]);
        assert_eq!(*pick_label(&candidates, &diff, &"default"), "first");
        assert_eq!(*pick_label(&candidates, &map(&[(FieldKind::Day, 9)]), &"default"), "any");
    }
}
