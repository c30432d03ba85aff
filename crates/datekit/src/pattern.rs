//! Date format patterns.
//!
//! A pattern such as `"yyyy-MM-dd'T'HH:mm:ss"` is split into an ordered
//! sequence of [`FormatToken`]s: plain literal runs, quoted literal runs and
//! field runs (one symbol repeated `width` times). Tokenizing is total: any
//! string, including a malformed one, yields some token sequence.
//!
//! # Functions
//!
//! - [`tokenize`] — pattern string → tokens
//! - [`serialize`] — tokens → pattern string (left inverse of [`tokenize`])

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::field::FieldKind;

/// The quoting delimiter for literal text.
pub const QUOTE: char = '\'';

/// Characters that denote calendar fields.
pub const FIELD_SYMBOLS: [char; 17] = [
    'a', 'G', 'y', 'Y', 'M', 'd', 'H', 'h', 'm', 's', 'E', 'Q', 'w', 'W', 'S', 'Z', 'z',
];

/// Whether `c` starts a field run.
pub fn is_field_symbol(c: char) -> bool {
    FIELD_SYMBOLS.contains(&c)
}

/// One piece of a format pattern.
///
/// Patterns have no escape for the quote character, so literal text holding
/// `'` cannot be written back. The [`literal`](Self::literal) and
/// [`quoted`](Self::quoted) constructors drop it; a token built from the
/// variants directly with a quote in its text does not survive
/// [`serialize`] followed by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormatToken {
    /// Text emitted verbatim.
    Literal { text: String },
    /// Text that was wrapped in quotes in the pattern, quotes stripped.
    QuotedLiteral { text: String },
    /// `symbol` repeated `width` times.
    FieldRun { symbol: char, width: usize },
}

impl FormatToken {
    /// Plain literal text, with any `'` removed.
    pub fn literal(text: impl Into<String>) -> Self {
        FormatToken::Literal {
            text: strip_quotes(text.into()),
        }
    }

    /// Quoted literal text, with any `'` removed.
    pub fn quoted(text: impl Into<String>) -> Self {
        FormatToken::QuotedLiteral {
            text: strip_quotes(text.into()),
        }
    }

    pub fn field(symbol: char, width: usize) -> Self {
        FormatToken::FieldRun { symbol, width }
    }

    /// Interpret a short string the way a pattern author would: a run of a
    /// single field symbol (`"MMMM"`) is a field run, anything else a literal.
    pub fn from_shorthand(value: &str) -> Self {
        let mut chars = value.chars();
        match chars.next() {
            Some(first) if is_field_symbol(first) && chars.all(|c| c == first) => {
                FormatToken::field(first, value.chars().count())
            }
            _ => FormatToken::literal(value),
        }
    }

    /// The pattern text for this token alone.
    pub fn format(&self) -> String {
        match self {
            FormatToken::Literal { text } if needs_quoting(text) => quote(text),
            FormatToken::Literal { text } => text.clone(),
            FormatToken::QuotedLiteral { text } => quote(text),
            FormatToken::FieldRun { symbol, width } => symbol.to_string().repeat(*width),
        }
    }

    /// The field run that renders `field` at `style`.
    pub fn for_field(field: FieldKind, style: Style) -> Self {
        use FieldKind::*;
        use Style::*;
        let (symbol, width) = match field {
            Era => match style {
                Short | Narrow => ('G', 1),
                Abbreviated => ('G', 3),
                Full | SpellOut => ('G', 4),
            },
            Year => match style {
                Short | Narrow => ('y', 2),
                Abbreviated => ('y', 1),
                Full | SpellOut => ('y', 4),
            },
            Month => match style {
                Short => ('M', 1),
                Full => ('M', 2),
                Abbreviated => ('M', 3),
                SpellOut => ('M', 4),
                Narrow => ('M', 5),
            },
            Day => match style {
                Short => ('d', 1),
                _ => ('d', 2),
            },
            Hour => match style {
                Short | Narrow => ('h', 1),
                Full => ('h', 2),
                Abbreviated => ('H', 1),
                SpellOut => ('H', 2),
            },
            Minute => match style {
                Short | Narrow => ('m', 1),
                _ => ('m', 2),
            },
            Second => match style {
                Short => ('s', 1),
                _ => ('s', 2),
            },
            Weekday | WeekdayOrdinal => match style {
                Short | Abbreviated => ('E', 1),
                Full | SpellOut => ('E', 4),
                Narrow => ('E', 5),
            },
            Quarter => match style {
                Short => ('Q', 1),
                Full | Abbreviated | Narrow => ('Q', 3),
                SpellOut => ('Q', 4),
            },
            WeekOfMonth => ('W', 1),
            WeekOfYear => match style {
                Short | Narrow => ('w', 1),
                _ => ('w', 2),
            },
            YearForWeekOfYear => match style {
                Short | Narrow => ('Y', 2),
                Abbreviated => ('Y', 1),
                Full | SpellOut => ('Y', 4),
            },
            Nanosecond => match style {
                Short | Narrow => ('S', 3),
                Full | SpellOut | Abbreviated => ('S', 4),
            },
            TimeZone | Calendar => match style {
                Short => ('Z', 1),
                Abbreviated => ('Z', 5),
                Full | SpellOut => ('z', 4),
                Narrow => ('z', 3),
            },
        };
        FormatToken::field(symbol, width)
    }
}

/// Verbosity of a field rendered through [`FormatToken::for_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Style {
    Short,
    Full,
    SpellOut,
    Abbreviated,
    Narrow,
}

/// A literal must be quoted when re-parsing it would otherwise split it into
/// field runs or quoted runs.
fn needs_quoting(text: &str) -> bool {
    text.chars().any(|c| c == QUOTE || is_field_symbol(c))
}

fn strip_quotes(mut text: String) -> String {
    text.retain(|c| c != QUOTE);
    text
}

fn quote(text: &str) -> String {
    format!("{QUOTE}{text}{QUOTE}")
}

// ── tokenize / serialize ────────────────────────────────────────────────────

/// Split a pattern into tokens.
///
/// A quote that is never closed swallows the rest of the input into one
/// [`FormatToken::QuotedLiteral`].
///
/// # Examples
///
/// ```
/// use datekit::pattern::{tokenize, FormatToken};
///
/// let tokens = tokenize("yyyy-MM");
/// assert_eq!(
///     tokens,
///     vec![
///         FormatToken::field('y', 4),
///         FormatToken::literal("-"),
///         FormatToken::field('M', 2),
///     ]
/// );
/// ```
pub fn tokenize(pattern: &str) -> Vec<FormatToken> {
    let mut tokens = Vec::new();
    let mut pending = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == QUOTE {
            flush_literal(&mut pending, &mut tokens);
            let mut text = String::new();
            let mut closed = false;
            for q in chars.by_ref() {
                if q == QUOTE {
                    closed = true;
                    break;
                }
                text.push(q);
            }
            if !closed {
                debug!(pattern, "unterminated quote consumed to end of pattern");
            }
            tokens.push(FormatToken::QuotedLiteral { text });
        } else if is_field_symbol(c) {
            flush_literal(&mut pending, &mut tokens);
            let mut width = 1;
            while chars.next_if_eq(&c).is_some() {
                width += 1;
            }
            tokens.push(FormatToken::FieldRun { symbol: c, width });
        } else {
            pending.push(c);
        }
    }
    flush_literal(&mut pending, &mut tokens);

    tokens
}

fn flush_literal(pending: &mut String, tokens: &mut Vec<FormatToken>) {
    if !pending.is_empty() {
        tokens.push(FormatToken::Literal {
            text: std::mem::take(pending),
        });
    }
}

/// Join tokens back into a pattern string.
pub fn serialize(tokens: &[FormatToken]) -> String {
    tokens.iter().map(FormatToken::format).collect()
}

// ── DateFormat ──────────────────────────────────────────────────────────────

/// A format pattern kept in its textual form.
///
/// Serializes as the bare pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DateFormat {
    pattern: String,
}

impl DateFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// `yyyy-MM-dd'T'HH:mm:ss.SSSZZZZZ`
    pub fn iso8601() -> Self {
        Self::from_tokens(&[
            FormatToken::field('y', 4),
            FormatToken::literal("-"),
            FormatToken::field('M', 2),
            FormatToken::literal("-"),
            FormatToken::field('d', 2),
            FormatToken::quoted("T"),
            FormatToken::field('H', 2),
            FormatToken::literal(":"),
            FormatToken::field('m', 2),
            FormatToken::literal(":"),
            FormatToken::field('s', 2),
            FormatToken::literal("."),
            FormatToken::field('S', 3),
            FormatToken::field('Z', 5),
        ])
    }

    pub fn from_tokens(tokens: &[FormatToken]) -> Self {
        Self::new(serialize(tokens))
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn tokens(&self) -> Vec<FormatToken> {
        tokenize(&self.pattern)
    }

    pub fn set_tokens(&mut self, tokens: &[FormatToken]) {
        self.pattern = serialize(tokens);
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl From<&str> for DateFormat {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for DateFormat {
    fn from(pattern: String) -> Self {
        Self::new(pattern)
    }
}

impl FromIterator<FormatToken> for DateFormat {
    fn from_iter<I: IntoIterator<Item = FormatToken>>(iter: I) -> Self {
        let tokens: Vec<FormatToken> = iter.into_iter().collect();
        Self::from_tokens(&tokens)
    }
}

impl Serialize for DateFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.pattern)
    }
}

impl<'de> Deserialize<'de> for DateFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
