//! Picking a representation for arbitrary text.
//!
//! [`resolve_value`] walks [`VALUE_CANDIDATES`] in order and keeps the first
//! enabled parser that succeeds.  [`resolve_variant`] is the looser entry
//! point used when a host value has to be guessed: it never fails and ends
//! with a plain string.

use chrono::NaiveDateTime;

use crate::config::ParseConfig;
use crate::diag::{expected, Diagnostic, ParseError};
use crate::flags::ParseFlags;
use crate::value::{Value, ValueKind};
use crate::{list, number, structured, temporal};

type Parser = fn(&str, ParseFlags, &ParseConfig) -> Result<Value, Diagnostic>;

/// One entry of the representation table.
#[derive(Clone, Copy)]
pub struct ValueCandidate {
    pub kind: ValueKind,
    parse: Parser,
}

impl ValueCandidate {
    pub fn flag(&self) -> ParseFlags {
        self.kind.flag().unwrap_or(ParseFlags::NONE)
    }
}

impl std::fmt::Debug for ValueCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueCandidate").field("kind", &self.kind).finish()
    }
}

/// Representations tried by [`resolve_value`], in order.  Boolean comes
/// after every numeric form so that `"1"` stays an integer.
pub const VALUE_CANDIDATES: &[ValueCandidate] = &[
    ValueCandidate { kind: ValueKind::Byte, parse: |t, f, c| number::byte(t, f, c).map(Value::Byte) },
    ValueCandidate {
        kind: ValueKind::NarrowInteger,
        parse: |t, f, c| number::narrow_integer(t, f, c).map(Value::NarrowInteger),
    },
    ValueCandidate { kind: ValueKind::Character, parse: |t, _, _| character(t).map(Value::Character) },
    ValueCandidate { kind: ValueKind::Integer, parse: |t, f, c| number::integer(t, f, c).map(Value::Integer) },
    ValueCandidate {
        kind: ValueKind::WideInteger,
        parse: |t, f, c| number::wide_integer(t, f, c).map(Value::WideInteger),
    },
    ValueCandidate { kind: ValueKind::Decimal, parse: |t, _, c| number::decimal(t, c).map(Value::Decimal) },
    ValueCandidate { kind: ValueKind::Single, parse: |t, _, c| number::single(t, c).map(Value::Single) },
    ValueCandidate { kind: ValueKind::Double, parse: |t, _, c| number::double(t, c).map(Value::Double) },
    ValueCandidate { kind: ValueKind::Boolean, parse: |t, f, c| number::boolean(t, f, c).map(Value::Boolean) },
    ValueCandidate {
        kind: ValueKind::DateTime,
        parse: |t, f, c| temporal::date_time(t, None, f, c).map(Value::DateTime),
    },
    ValueCandidate { kind: ValueKind::TimeSpan, parse: |t, f, c| temporal::time_span(t, f, c).map(Value::TimeSpan) },
    ValueCandidate { kind: ValueKind::Guid, parse: |t, _, _| structured::guid(t).map(Value::Guid) },
    ValueCandidate { kind: ValueKind::List, parse: |t, _, _| list::split_list(t).map(Value::List) },
];

// ── Characters ────────────────────────────────────────────────────────────────

pub(crate) fn character(text: &str) -> Result<char, Diagnostic> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Diagnostic::single(expected("character", text))),
    }
}

/// Accept exactly one character.
pub fn resolve_character(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<char, ParseError> {
    character(text).map_err(|d| config.fail(d, flags))
}

// ── Values ────────────────────────────────────────────────────────────────────

pub(crate) fn value(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<Value, Diagnostic> {
    // Callers naming only representations get both signedness readings.
    let flags = if flags.has_any(ParseFlags::SIGNEDNESS_MASK) {
        flags
    } else {
        flags | ParseFlags::SIGNEDNESS_MASK
    };
    let mut diag = Diagnostic::new();
    for candidate in VALUE_CANDIDATES.iter().filter(|c| flags.has_all(c.flag())) {
        match (candidate.parse)(text, flags, config) {
            Ok(value) => return Ok(value),
            Err(d) => {
                tracing::trace!(text, kind = %candidate.kind, "value candidate rejected");
                diag.merge(d);
            }
        }
    }
    Err(diag.with_headline(expected("value", text)))
}

/// The first representation enabled in `flags` that accepts `text`, tried
/// in [`VALUE_CANDIDATES`] order.  When `flags` carries neither
/// [`ParseFlags::SIGNED`] nor [`ParseFlags::UNSIGNED`], both are assumed.
pub fn resolve_value(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<Value, ParseError> {
    value(text, flags, config).map_err(|d| config.fail(d, flags))
}

// ── Variants ──────────────────────────────────────────────────────────────────

/// Host-side numeric recognition consulted before the built-in parsers.
pub trait HostNumericResolver {
    fn try_resolve_numeric(&self, text: &str) -> Option<Value>;
}

/// A host with no numeric types of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHost;

impl HostNumericResolver for NoHost {
    fn try_resolve_numeric(&self, _text: &str) -> Option<Value> {
        None
    }
}

impl<F> HostNumericResolver for F
where
    F: Fn(&str) -> Option<Value>,
{
    fn try_resolve_numeric(&self, text: &str) -> Option<Value> {
        self(text)
    }
}

fn variant_date_time(text: &str, flags: ParseFlags, config: &ParseConfig) -> Option<NaiveDateTime> {
    temporal::date_time(text, None, flags, config).ok()
}

/// Best guess at a native value: the host first, then numbers, date/times,
/// and time spans.  Anything else is kept as a string.
pub fn resolve_variant(
    text: &str,
    host: &dyn HostNumericResolver,
    flags: ParseFlags,
    config: &ParseConfig,
) -> Value {
    if let Some(value) = host.try_resolve_numeric(text) {
        return value;
    }
    if let Ok(value) = number::numeric(text, flags, config) {
        return value;
    }
    if let Some(dt) = variant_date_time(text, flags, config) {
        return Value::DateTime(dt);
    }
    if let Ok(span) = temporal::time_span(text, flags, config) {
        return Value::TimeSpan(span);
    }
    tracing::trace!(text, "variant kept as string");
    Value::Str(text.to_owned())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
