//! The tagged value produced by every resolver.
//!
//! Script values are always valid as text; a [`Value`] is the cached native
//! form of one.  Exactly one tag is active, and moving between tags goes
//! through the explicit (fallible) `to_*` conversions.

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use uuid::Uuid;

use crate::decimal::Decimal;
use crate::flags::ParseFlags;
use crate::{lexicon, list, temporal};

/// A natively typed script value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Byte(u8),
    NarrowInteger(i16),
    Character(char),
    Integer(i32),
    WideInteger(i64),
    UnsignedWideInteger(u64),
    Decimal(Decimal),
    Single(f32),
    Double(f64),
    Str(String),
    DateTime(NaiveDateTime),
    TimeSpan(TimeDelta),
    Guid(Uuid),
    List(Vec<String>),
}

/// The tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    Byte,
    NarrowInteger,
    Character,
    Integer,
    WideInteger,
    UnsignedWideInteger,
    Decimal,
    Single,
    Double,
    Str,
    DateTime,
    TimeSpan,
    Guid,
    List,
}

impl ValueKind {
    /// Name used in messages and by `whatis`-style introspection.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Byte => "byte",
            ValueKind::NarrowInteger => "narrow integer",
            ValueKind::Character => "character",
            ValueKind::Integer => "integer",
            ValueKind::WideInteger => "wide integer",
            ValueKind::UnsignedWideInteger => "unsigned wide integer",
            ValueKind::Decimal => "decimal",
            ValueKind::Single => "single",
            ValueKind::Double => "double",
            ValueKind::Str => "string",
            ValueKind::DateTime => "date-time",
            ValueKind::TimeSpan => "time span",
            ValueKind::Guid => "guid",
            ValueKind::List => "list",
        }
    }

    /// The parse flag that enables this representation, if it has one.
    pub fn flag(self) -> Option<ParseFlags> {
        Some(match self {
            ValueKind::Boolean => ParseFlags::BOOLEAN,
            ValueKind::Byte => ParseFlags::BYTE,
            ValueKind::NarrowInteger => ParseFlags::NARROW_INTEGER,
            ValueKind::Character => ParseFlags::CHARACTER,
            ValueKind::Integer => ParseFlags::INTEGER,
            ValueKind::WideInteger => ParseFlags::WIDE_INTEGER,
            ValueKind::Decimal => ParseFlags::DECIMAL,
            ValueKind::Single => ParseFlags::SINGLE,
            ValueKind::Double => ParseFlags::DOUBLE,
            ValueKind::DateTime => ParseFlags::DATE_TIME,
            ValueKind::TimeSpan => ParseFlags::TIME_SPAN,
            ValueKind::Guid => ParseFlags::GUID,
            ValueKind::List => ParseFlags::LIST,
            ValueKind::UnsignedWideInteger | ValueKind::Str => return None,
        })
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure of an explicit conversion between tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("cannot convert {from} to {to}")]
    Unsupported { from: ValueKind, to: ValueKind },
    #[error("{from} value \"{value}\" is out of range for {to}")]
    OutOfRange { from: ValueKind, to: ValueKind, value: String },
}

impl Default for Value {
    fn default() -> Self {
        Value::Str(String::new())
    }
}

/// Canonical text of a float: whole numbers keep one fractional digit,
/// very large or very small magnitudes use exponent notation, and the
/// special values use the names the resolvers accept.
fn format_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        f.write_str("NaN")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "Inf" } else { "-Inf" })
    } else if x != 0.0 && (x.abs() >= 1e15 || x.abs() < 1e-5) {
        write!(f, "{x:e}")
    } else if x.fract() == 0.0 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Byte(n) => write!(f, "{n}"),
            Value::NarrowInteger(n) => write!(f, "{n}"),
            Value::Character(c) => write!(f, "{c}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::WideInteger(n) => write!(f, "{n}"),
            Value::UnsignedWideInteger(n) => write!(f, "{n}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Single(x) => {
                // Shortest text that round-trips the f32, not its f64 widening.
                if x.is_finite() && x.fract() != 0.0 && x.abs() < 1e15 && x.abs() >= 1e-5 {
                    write!(f, "{x}")
                } else {
                    format_float(f, f64::from(*x))
                }
            }
            Value::Double(x) => format_float(f, *x),
            Value::Str(s) => write!(f, "{s}"),
            Value::DateTime(dt) => write!(f, "{}", dt.format(temporal::CANONICAL_DATE_TIME)),
            Value::TimeSpan(span) => f.write_str(&temporal::format_time_span(*span)),
            Value::Guid(g) => write!(f, "{g}"),
            Value::List(items) => f.write_str(&list::format_list(items.as_slice())),
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Byte(_) => ValueKind::Byte,
            Value::NarrowInteger(_) => ValueKind::NarrowInteger,
            Value::Character(_) => ValueKind::Character,
            Value::Integer(_) => ValueKind::Integer,
            Value::WideInteger(_) => ValueKind::WideInteger,
            Value::UnsignedWideInteger(_) => ValueKind::UnsignedWideInteger,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Single(_) => ValueKind::Single,
            Value::Double(_) => ValueKind::Double,
            Value::Str(_) => ValueKind::Str,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::TimeSpan(_) => ValueKind::TimeSpan,
            Value::Guid(_) => ValueKind::Guid,
            Value::List(_) => ValueKind::List,
        }
    }

    /// Name of the active tag.
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether the value is one of the integral or floating-point tags.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Byte(_)
                | Value::NarrowInteger(_)
                | Value::Integer(_)
                | Value::WideInteger(_)
                | Value::UnsignedWideInteger(_)
                | Value::Decimal(_)
                | Value::Single(_)
                | Value::Double(_)
        )
    }

    fn unsupported(&self, to: ValueKind) -> ValueError {
        ValueError::Unsupported { from: self.kind(), to }
    }

    fn out_of_range(&self, to: ValueKind) -> ValueError {
        ValueError::OutOfRange { from: self.kind(), to, value: self.to_string() }
    }

    // ── Conversions ───────────────────────────────────────────────────────────

    /// Numbers are true when non-zero; strings must be a boolean word.
    pub fn to_boolean(&self) -> Result<bool, ValueError> {
        let to = ValueKind::Boolean;
        match self {
            Value::Boolean(b) => Ok(*b),
            Value::Byte(n) => Ok(*n != 0),
            Value::NarrowInteger(n) => Ok(*n != 0),
            Value::Integer(n) => Ok(*n != 0),
            Value::WideInteger(n) => Ok(*n != 0),
            Value::UnsignedWideInteger(n) => Ok(*n != 0),
            Value::Decimal(d) => Ok(!d.is_zero()),
            Value::Single(x) if !x.is_nan() => Ok(*x != 0.0),
            Value::Double(x) if !x.is_nan() => Ok(*x != 0.0),
            Value::Single(_) | Value::Double(_) => Err(self.out_of_range(to)),
            Value::Str(s) => lexicon::recognize_boolean(s, false)
                .map(|(b, _)| b)
                .ok_or_else(|| self.unsupported(to)),
            _ => Err(self.unsupported(to)),
        }
    }

    /// Integral tags exactly; floats and decimals only without a fractional
    /// part; date/times and time spans as ticks.
    pub fn to_wide_integer(&self) -> Result<i64, ValueError> {
        let to = ValueKind::WideInteger;
        match self {
            Value::Boolean(b) => Ok(i64::from(*b)),
            Value::Byte(n) => Ok(i64::from(*n)),
            Value::NarrowInteger(n) => Ok(i64::from(*n)),
            Value::Character(c) => Ok(i64::from(u32::from(*c))),
            Value::Integer(n) => Ok(i64::from(*n)),
            Value::WideInteger(n) => Ok(*n),
            Value::UnsignedWideInteger(n) => i64::try_from(*n).map_err(|_| self.out_of_range(to)),
            Value::Decimal(d) => d.to_i64().ok_or_else(|| self.out_of_range(to)),
            Value::Single(x) => float_to_i64(f64::from(*x)).ok_or_else(|| self.out_of_range(to)),
            Value::Double(x) => float_to_i64(*x).ok_or_else(|| self.out_of_range(to)),
            Value::DateTime(dt) => temporal::date_time_to_ticks(*dt).ok_or_else(|| self.out_of_range(to)),
            Value::TimeSpan(span) => temporal::time_span_to_ticks(*span).ok_or_else(|| self.out_of_range(to)),
            Value::Str(_) | Value::Guid(_) | Value::List(_) => Err(self.unsupported(to)),
        }
    }

    pub fn to_double(&self) -> Result<f64, ValueError> {
        match self {
            Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Byte(n) => Ok(f64::from(*n)),
            Value::NarrowInteger(n) => Ok(f64::from(*n)),
            Value::Integer(n) => Ok(f64::from(*n)),
            Value::WideInteger(n) => Ok(*n as f64),
            Value::UnsignedWideInteger(n) => Ok(*n as f64),
            Value::Decimal(d) => Ok(d.to_f64()),
            Value::Single(x) => Ok(f64::from(*x)),
            Value::Double(x) => Ok(*x),
            _ => Err(self.unsupported(ValueKind::Double)),
        }
    }

    pub fn to_decimal(&self) -> Result<Decimal, ValueError> {
        let to = ValueKind::Decimal;
        match self {
            Value::Decimal(d) => Ok(*d),
            Value::Single(x) => Decimal::from_f64(f64::from(*x)).ok_or_else(|| self.out_of_range(to)),
            Value::Double(x) => Decimal::from_f64(*x).ok_or_else(|| self.out_of_range(to)),
            Value::UnsignedWideInteger(n) => {
                Decimal::new(i128::from(*n), 0).ok_or_else(|| self.out_of_range(to))
            }
            Value::Boolean(_)
            | Value::Byte(_)
            | Value::NarrowInteger(_)
            | Value::Integer(_)
            | Value::WideInteger(_) => Ok(Decimal::from_i64(self.to_wide_integer()?)),
            _ => Err(self.unsupported(to)),
        }
    }

    /// Lists as-is, strings split as a list, anything else as one element.
    pub fn to_list(&self) -> Result<Vec<String>, ValueError> {
        match self {
            Value::List(items) => Ok(items.clone()),
            Value::Str(s) => list::split_list(s).map_err(|_| self.unsupported(ValueKind::List)),
            other => Ok(vec![other.to_string()]),
        }
    }
}

fn float_to_i64(x: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it does not fit.
    if x.is_finite() && x.fract() == 0.0 && x >= -9_223_372_036_854_775_808.0 && x < 9_223_372_036_854_775_808.0 {
        Some(x as i64)
    } else {
        None
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::WideInteger(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Double(x)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<Uuid> for Value {
    fn from(g: Uuid) -> Self {
        Value::Guid(g)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
