//! # datekit
//!
//! Date formatting patterns, calendar-aware duration algebra and relative date
//! labels on top of `chrono`.
//!
//! All calendar rules (month lengths, leap years, time-zone transitions) come
//! from `chrono` and `chrono-tz`. This crate adds the pieces around them: a
//! pattern tokenizer, a duration type that can be a plain interval, an instant
//! pair or a set of calendar components, and formatting that picks a pattern
//! by how far a date is from a reference.
//!
//! ## Modules
//!
//! - [`field`] — calendar field kinds, their order and nominal lengths
//! - [`pattern`] — pattern string ↔ token sequence
//! - [`difference`] — `DateDifference` arithmetic, comparison and label lookup
//! - [`calendar`] — apply differences, period differences, start/end of periods
//! - [`render`] — render tokens for a concrete datetime (English)
//! - [`relative`] — pick a format relative to a reference instant
//! - [`context`] — explicit calendar, locale and time-zone configuration
//! - [`error`] — Error types

pub mod calendar;
pub mod context;
pub mod difference;
pub mod error;
pub mod field;
pub mod pattern;
pub mod relative;
pub mod render;

pub use calendar::{
    add_difference, count_between, difference_between, end_of, start_of, Calendar, WeekStartDay,
};
pub use context::{DateContext, Locale, ResolvedContext};
pub use difference::{pick_label, ComponentMap, DateDifference};
pub use error::DateKitError;
pub use field::FieldKind;
pub use pattern::{serialize, tokenize, DateFormat, FormatToken, Style};
pub use relative::{format_relative, RelativeDateFormat};
pub use render::{render, render_pattern};
