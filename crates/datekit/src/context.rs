//! Explicit calendar, locale and time-zone configuration.
//!
//! Nothing in the crate reads ambient process state. Callers pass a
//! [`DateContext`] at the call site, optionally layered over an injected
//! default (for example loaded from JSON at startup), and resolve it into a
//! [`ResolvedContext`]:
//!
//! call-site value > injected default > platform default (UTC, `en`, Monday).

use std::fmt;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::calendar::{Calendar, WeekStartDay};
use crate::error::{DateKitError, Result};

/// Regions whose weeks conventionally start on Sunday (CLDR `firstDay`).
const SUNDAY_START_REGIONS: &[&str] = &[
    "AG", "AS", "BD", "BR", "BS", "BT", "BW", "BZ", "CA", "CN", "CO", "DM", "DO", "ET", "GT",
    "GU", "HK", "HN", "ID", "IL", "IN", "JM", "JP", "KE", "KH", "KR", "LA", "MH", "MM", "MO",
    "MT", "MX", "MZ", "NI", "NP", "PA", "PE", "PH", "PK", "PR", "PT", "PY", "SA", "SG", "SV",
    "TH", "TT", "TW", "UM", "US", "VE", "VI", "WS", "YE", "ZA", "ZW",
];

// ── Locale ──────────────────────────────────────────────────────────────────

/// A locale identifier such as `en`, `en_US` or `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    /// The region subtag (`US` in `en_US`), if any.
    pub fn region(&self) -> Option<&str> {
        self.0
            .split(['_', '-'])
            .skip(1)
            .find(|part| {
                (part.len() == 2 && part.chars().all(|c| c.is_ascii_uppercase()))
                    || (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()))
            })
    }

    /// The conventional first day of the week for this locale's region.
    pub fn week_start(&self) -> WeekStartDay {
        match self.region() {
            Some(region) if SUNDAY_START_REGIONS.contains(&region) => WeekStartDay::Sunday,
            _ => WeekStartDay::Monday,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── DateContext ─────────────────────────────────────────────────────────────

/// Partially specified configuration; unset fields fall through to the next
/// layer when resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateContext {
    pub calendar: Option<Calendar>,
    pub locale: Option<Locale>,
    /// IANA time-zone name, e.g. `"Europe/Berlin"`.
    pub timezone: Option<String>,
}

impl DateContext {
    /// Parse a context from JSON, e.g.
    /// `{"timezone": "Asia/Tokyo", "calendar": {"week_start": "sunday"}}`.
    ///
    /// # Errors
    ///
    /// Returns [`DateKitError::InvalidConfig`] if the JSON is malformed or has
    /// the wrong shape. Time-zone names are checked by [`resolve`](Self::resolve).
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DateKitError::InvalidConfig(e.to_string()))
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Resolve against an injected default, then the platform default.
    ///
    /// A calendar that neither layer sets is derived from the resolved
    /// locale's week-start convention.
    ///
    /// # Errors
    ///
    /// Returns [`DateKitError::InvalidTimezone`] if the winning time-zone name
    /// is not a valid IANA identifier.
    pub fn resolve(&self, injected: &DateContext) -> Result<ResolvedContext> {
        let locale = self
            .locale
            .clone()
            .or_else(|| injected.locale.clone())
            .unwrap_or_default();
        let calendar = self
            .calendar
            .or(injected.calendar)
            .unwrap_or_else(|| Calendar::with_week_start(locale.week_start()));
        let timezone = match self.timezone.as_deref().or(injected.timezone.as_deref()) {
            Some(name) => parse_timezone(name)?,
            None => Tz::UTC,
        };

        trace!(%locale, %timezone, week_start = ?calendar.week_start, "resolved date context");
        Ok(ResolvedContext {
            calendar,
            locale,
            timezone,
        })
    }
}

/// Fully specified configuration used by rendering and relative formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContext {
    pub calendar: Calendar,
    pub locale: Locale,
    pub timezone: Tz,
}

impl ResolvedContext {
    /// UTC, locale `en`, Monday-start Gregorian calendar.
    pub fn platform() -> Self {
        Self {
            calendar: Calendar::gregorian(),
            locale: Locale::default(),
            timezone: Tz::UTC,
        }
    }
}

impl Default for ResolvedContext {
    fn default() -> Self {
        Self::platform()
    }
}

fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| DateKitError::InvalidTimezone(format!("'{}'", s)))
}

// ── Tests ───────────────────────────────────────────────────────────────────
