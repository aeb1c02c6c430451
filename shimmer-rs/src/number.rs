//! Numeric literal parsing.
//!
//! Three layers:
//!
//! - a locale-aware scanner for plain (non-radix) numbers, driven by a
//!   [`NumberStyle`];
//! - per-width integer resolvers (byte, narrow, standard, wide) that try the
//!   radix-prefix path first and then the plain path, under one or both
//!   signedness interpretations;
//! - [`resolve_numeric`], which picks the best numeric representation for
//!   arbitrary text.

use crate::config::{Locale, NumberStyle, NumericWidth, ParseConfig};
use crate::decimal::Decimal;
use crate::diag::{expected, Diagnostic, ParseError};
use crate::flags::ParseFlags;
use crate::lexicon::{self, RadixLiteral};
use crate::value::Value;

// ── Plain number scanner ──────────────────────────────────────────────────────

/// The lexical parts of a plain number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Scanned {
    pub negative: bool,
    /// Integral digits followed by fractional digits.
    pub digits: String,
    /// Number of fractional digits in `digits`.
    pub scale: i64,
    pub exponent: i64,
}

/// Exponents beyond this magnitude are clamped; they already overflow or
/// underflow every supported type.
const EXPONENT_LIMIT: i64 = 100_000;

fn strip_sign<'a>(s: &'a str, locale: &Locale, leading: bool) -> Option<(bool, &'a str)> {
    for (sign, negative) in [(&locale.negative_sign, true), (&locale.positive_sign, false)] {
        if sign.is_empty() {
            continue;
        }
        let rest = if leading { s.strip_prefix(sign.as_str()) } else { s.strip_suffix(sign.as_str()) };
        if let Some(rest) = rest {
            return Some((negative, rest));
        }
    }
    None
}

/// Split `text` into sign, digits, scale, and exponent according to `style`.
/// Returns `None` for anything the style does not admit.
pub(crate) fn scan(text: &str, style: NumberStyle, locale: &Locale) -> Option<Scanned> {
    let mut s = text;
    if style.leading_white {
        s = s.trim_start();
    }
    if style.trailing_white {
        s = s.trim_end();
    }

    let mut negative = false;
    let mut signed = false;
    if style.parentheses && s.len() >= 2 && s.starts_with('(') && s.ends_with(')') {
        negative = true;
        signed = true;
        s = &s[1..s.len() - 1];
    }
    if !signed && style.leading_sign {
        if let Some((neg, rest)) = strip_sign(s, locale, true) {
            negative = neg;
            signed = true;
            s = rest;
        }
    }
    if !signed && style.trailing_sign {
        if let Some((neg, rest)) = strip_sign(s, locale, false) {
            negative = neg;
            s = rest;
        }
    }

    let decimal_sep = locale.decimal_separator.as_str();
    let group_sep = locale.group_separator.as_str();
    let mut digits = String::with_capacity(s.len());
    let mut scale = 0i64;
    let mut in_fraction = false;
    let mut exponent = 0i64;
    let mut rest = s;

    while let Some(c) = rest.chars().next() {
        if c.is_ascii_digit() {
            digits.push(c);
            if in_fraction {
                scale += 1;
            }
            rest = &rest[1..];
        } else if style.decimal_point
            && !in_fraction
            && !decimal_sep.is_empty()
            && rest.starts_with(decimal_sep)
        {
            in_fraction = true;
            rest = &rest[decimal_sep.len()..];
        } else if style.thousands
            && !in_fraction
            && !digits.is_empty()
            && !group_sep.is_empty()
            && rest.starts_with(group_sep)
        {
            rest = &rest[group_sep.len()..];
        } else if style.exponent && !digits.is_empty() && (c == 'e' || c == 'E') {
            exponent = scan_exponent(&rest[1..])?;
            rest = "";
        } else {
            return None;
        }
    }

    if digits.is_empty() {
        return None;
    }
    Some(Scanned { negative, digits, scale, exponent })
}

fn scan_exponent(s: &str) -> Option<i64> {
    let (negative, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = body.parse::<i64>().unwrap_or(i64::MAX).min(EXPONENT_LIMIT);
    Some(if negative { -magnitude } else { magnitude })
}

impl Scanned {
    /// The exact integral value, if the number has no non-zero fractional
    /// digits and fits an `i128`.
    pub fn to_i128(&self) -> Option<i128> {
        let shift = self.exponent - self.scale;
        let trimmed = self.digits.trim_start_matches('0');
        let mut digits = trimmed.to_owned();
        if shift < 0 {
            let cut = usize::try_from(-shift).ok()?;
            if cut > digits.len() {
                if !digits.bytes().all(|b| b == b'0') {
                    return None;
                }
                digits.clear();
            } else {
                let (keep, dropped) = digits.split_at(digits.len() - cut);
                if dropped.bytes().any(|b| b != b'0') {
                    return None;
                }
                digits = keep.to_owned();
            }
        } else if !digits.is_empty() {
            let zeros = usize::try_from(shift).ok()?;
            if digits.len() + zeros > 38 {
                return None;
            }
            digits.extend(std::iter::repeat('0').take(zeros));
        }
        if digits.is_empty() {
            return Some(0);
        }
        if digits.len() > 38 {
            return None;
        }
        let magnitude: i128 = digits.parse().ok()?;
        Some(if self.negative { -magnitude } else { magnitude })
    }

    pub fn to_decimal(&self) -> Option<Decimal> {
        Decimal::from_digits(self.negative, &self.digits, self.scale, self.exponent)
    }

    /// The nearest finite `f64`; `None` when the value overflows.
    pub fn to_f64(&self) -> Option<f64> {
        let sign = if self.negative { "-" } else { "" };
        let exponent = self.exponent.saturating_sub(self.scale);
        let value: f64 = format!("{sign}{}e{exponent}", self.digits).parse().ok()?;
        value.is_finite().then_some(value)
    }

    pub fn to_f32(&self) -> Option<f32> {
        let sign = if self.negative { "-" } else { "" };
        let exponent = self.exponent.saturating_sub(self.scale);
        let value: f32 = format!("{sign}{}e{exponent}", self.digits).parse().ok()?;
        value.is_finite().then_some(value)
    }
}

fn starts_with_sign(text: &str, locale: &Locale) -> bool {
    let s = text.trim_start();
    s.starts_with('+')
        || s.starts_with('-')
        || (!locale.negative_sign.is_empty() && s.starts_with(locale.negative_sign.as_str()))
        || (!locale.positive_sign.is_empty() && s.starts_with(locale.positive_sign.as_str()))
}

// ── Radix path ────────────────────────────────────────────────────────────────

/// Parse the digits of a radix literal into a wide integer.
///
/// The magnitude is read as 64 unsigned bits and reinterpreted as signed
/// before the sign is applied, so `0xFFFFFFFFFFFFFFFF` is `-1`.  Negating
/// `i64::MIN` is an error for every radix.
fn radix_wide(text: &str, lit: &RadixLiteral<'_>) -> Result<i64, String> {
    let base = lit.radix.base();
    if lit.digits.is_empty() || !lit.digits.chars().all(|c| c.is_digit(base)) {
        return Err(format!(
            "expected {} digits after radix prefix \"0{}\" but got {}",
            radix_name(base),
            lit.radix.letter(),
            crate::diag::quoted(text)
        ));
    }
    let magnitude = u64::from_str_radix(lit.digits, base)
        .map_err(|_| format!("integer value too large to represent: {}", crate::diag::quoted(text)))?;
    let value = magnitude as i64;
    if lit.negative {
        value.checked_neg().ok_or_else(|| {
            format!("cannot negate minimum integer value: {}", crate::diag::quoted(text))
        })
    } else {
        Ok(value)
    }
}

fn radix_name(base: u32) -> &'static str {
    match base {
        2 => "binary",
        8 => "octal",
        16 => "hexadecimal",
        _ => "decimal",
    }
}

// ── Per-width integers ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signedness {
    Signed,
    Unsigned,
}

impl Signedness {
    fn flag(self) -> ParseFlags {
        match self {
            Signedness::Signed => ParseFlags::SIGNED,
            Signedness::Unsigned => ParseFlags::UNSIGNED,
        }
    }

    fn other(self) -> Self {
        match self {
            Signedness::Signed => Signedness::Unsigned,
            Signedness::Unsigned => Signedness::Signed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntegerWidth {
    Byte,
    NarrowInteger,
    Integer,
    WideInteger,
}

impl IntegerWidth {
    fn style_width(self) -> NumericWidth {
        match self {
            IntegerWidth::Byte => NumericWidth::Byte,
            IntegerWidth::NarrowInteger => NumericWidth::NarrowInteger,
            IntegerWidth::Integer => NumericWidth::Integer,
            IntegerWidth::WideInteger => NumericWidth::WideInteger,
        }
    }

    fn bits(self) -> u32 {
        match self {
            IntegerWidth::Byte => 8,
            IntegerWidth::NarrowInteger => 16,
            IntegerWidth::Integer => 32,
            IntegerWidth::WideInteger => 64,
        }
    }

    /// Inclusive range for one signedness.
    fn range(self, signedness: Signedness) -> (i128, i128) {
        let bits = self.bits();
        match signedness {
            Signedness::Signed => (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1),
            Signedness::Unsigned => (0, (1i128 << bits) - 1),
        }
    }

    fn default_signedness(self) -> Signedness {
        match self {
            IntegerWidth::Byte => Signedness::Unsigned,
            _ => Signedness::Signed,
        }
    }

    fn name(self, signedness: Signedness) -> &'static str {
        match (self, signedness) {
            (IntegerWidth::Byte, Signedness::Unsigned) => "byte",
            (IntegerWidth::Byte, Signedness::Signed) => "signed byte",
            (IntegerWidth::NarrowInteger, Signedness::Signed) => "narrow integer",
            (IntegerWidth::NarrowInteger, Signedness::Unsigned) => "unsigned narrow integer",
            (IntegerWidth::Integer, Signedness::Signed) => "integer",
            (IntegerWidth::Integer, Signedness::Unsigned) => "unsigned integer",
            (IntegerWidth::WideInteger, Signedness::Signed) => "wide integer",
            (IntegerWidth::WideInteger, Signedness::Unsigned) => "unsigned wide integer",
        }
    }
}

/// One width, one signedness: radix path first, then the plain path.
fn integer_attempt(
    text: &str,
    flags: ParseFlags,
    config: &ParseConfig,
    width: IntegerWidth,
    signedness: Signedness,
) -> Result<i128, String> {
    let fail = || expected(width.name(signedness), text);

    let value = if let Some(lit) = lexicon::recognize_radix(text, flags) {
        let wide = radix_wide(text, &lit)?;
        match (width, signedness) {
            // Unsigned hex wraps through i64; a negated literal is never unsigned.
            (IntegerWidth::WideInteger, Signedness::Unsigned) if !lit.negative => (wide as u64) as i128,
            _ => wide as i128,
        }
    } else {
        let style = config.number_style(width.style_width());
        scan(text, style, &config.locale())
            .and_then(|s| s.to_i128())
            .ok_or_else(fail)?
    };

    let (min, max) = width.range(signedness);
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(fail())
    }
}

/// Try the permitted signedness interpretations in `order`, aggregating the
/// failures.  Returns the value together with the interpretation that won.
fn integer_width(
    text: &str,
    flags: ParseFlags,
    config: &ParseConfig,
    width: IntegerWidth,
    first: Signedness,
) -> Result<(i128, Signedness), Diagnostic> {
    let order = [first, first.other()];
    let allowed: Vec<Signedness> = order.into_iter().filter(|s| flags.has_all(s.flag())).collect();
    if allowed.is_empty() {
        return Err(Diagnostic::single("no signedness is supported"));
    }

    let mut diag = Diagnostic::new();
    for signedness in allowed {
        match integer_attempt(text, flags, config, width, signedness) {
            Ok(value) => return Ok((value, signedness)),
            Err(message) => {
                tracing::trace!(text, kind = width.name(signedness), %message, "integer attempt failed");
                diag.push(message);
            }
        }
    }
    if let Some(first) = diag.messages().first().cloned() {
        diag.set_headline(first);
    }
    Err(diag)
}

pub(crate) fn byte(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<u8, Diagnostic> {
    let (value, signedness) = integer_width(text, flags, config, IntegerWidth::Byte, Signedness::Unsigned)?;
    Ok(match signedness {
        Signedness::Unsigned => value as u8,
        Signedness::Signed => value as i8 as u8,
    })
}

pub(crate) fn narrow_integer(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<i16, Diagnostic> {
    let width = IntegerWidth::NarrowInteger;
    let (value, signedness) = integer_width(text, flags, config, width, width.default_signedness())?;
    Ok(match signedness {
        Signedness::Signed => value as i16,
        Signedness::Unsigned => value as u16 as i16,
    })
}

pub(crate) fn integer(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<i32, Diagnostic> {
    let width = IntegerWidth::Integer;
    let (value, signedness) = integer_width(text, flags, config, width, width.default_signedness())?;
    Ok(match signedness {
        Signedness::Signed => value as i32,
        Signedness::Unsigned => value as u32 as i32,
    })
}

pub(crate) fn wide_integer(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<i64, Diagnostic> {
    let width = IntegerWidth::WideInteger;
    let (value, signedness) = integer_width(text, flags, config, width, width.default_signedness())?;
    Ok(match signedness {
        Signedness::Signed => value as i64,
        Signedness::Unsigned => value as u64 as i64,
    })
}

pub(crate) fn unsigned_wide_integer(
    text: &str,
    flags: ParseFlags,
    config: &ParseConfig,
) -> Result<u64, Diagnostic> {
    let width = IntegerWidth::WideInteger;
    let (value, signedness) = integer_width(text, flags, config, width, Signedness::Unsigned)?;
    Ok(match signedness {
        Signedness::Unsigned => value as u64,
        Signedness::Signed => value as i64 as u64,
    })
}

/// Parse an unsigned byte; with [`ParseFlags::SIGNED`] a signed byte is
/// accepted too and its bits are kept (`-1` → `255`).
pub fn resolve_byte(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<u8, ParseError> {
    byte(text, flags, config).map_err(|d| config.fail(d, flags))
}

/// Parse a 16-bit signed integer.
pub fn resolve_narrow_integer(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<i16, ParseError> {
    narrow_integer(text, flags, config).map_err(|d| config.fail(d, flags))
}

/// Parse a 32-bit signed integer; with [`ParseFlags::UNSIGNED`] values up to
/// `u32::MAX` are accepted and wrap (`0xFFFFFFFF` → `-1`).
pub fn resolve_integer(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<i32, ParseError> {
    integer(text, flags, config).map_err(|d| config.fail(d, flags))
}

/// Parse a 64-bit signed integer.
pub fn resolve_wide_integer(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<i64, ParseError> {
    wide_integer(text, flags, config).map_err(|d| config.fail(d, flags))
}

/// Parse a 64-bit unsigned integer, trying the unsigned reading first.
pub fn resolve_unsigned_wide_integer(
    text: &str,
    flags: ParseFlags,
    config: &ParseConfig,
) -> Result<u64, ParseError> {
    unsigned_wide_integer(text, flags, config).map_err(|d| config.fail(d, flags))
}

// ── Fixed and floating point ──────────────────────────────────────────────────

pub(crate) fn decimal(text: &str, config: &ParseConfig) -> Result<Decimal, Diagnostic> {
    let style = config.number_style(NumericWidth::Decimal);
    scan(text, style, &config.locale())
        .and_then(|s| s.to_decimal())
        .ok_or_else(|| Diagnostic::single(expected("decimal", text)))
}

pub(crate) fn double(text: &str, config: &ParseConfig) -> Result<f64, Diagnostic> {
    if let Some(value) = config.named_double(text.trim()) {
        return Ok(value);
    }
    let style = config.number_style(NumericWidth::Double);
    scan(text, style, &config.locale())
        .and_then(|s| s.to_f64())
        .ok_or_else(|| Diagnostic::single(expected("floating point value", text)))
}

pub(crate) fn single(text: &str, config: &ParseConfig) -> Result<f32, Diagnostic> {
    if let Some(value) = config.named_single(text.trim()) {
        return Ok(value);
    }
    let style = config.number_style(NumericWidth::Single);
    scan(text, style, &config.locale())
        .and_then(|s| s.to_f32())
        .ok_or_else(|| Diagnostic::single(expected("single-precision floating point value", text)))
}

/// Parse a fixed-point decimal.
pub fn resolve_decimal(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<Decimal, ParseError> {
    decimal(text, config).map_err(|d| config.fail(d, flags))
}

/// Parse a double, accepting the named constants (`Inf`, `-Inf`, `NaN`, …).
pub fn resolve_double(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<f64, ParseError> {
    double(text, config).map_err(|d| config.fail(d, flags))
}

/// Parse a single-precision float, accepting the named constants.
pub fn resolve_single(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<f32, ParseError> {
    single(text, config).map_err(|d| config.fail(d, flags))
}

// ── Booleans ──────────────────────────────────────────────────────────────────

pub(crate) fn boolean(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<bool, Diagnostic> {
    let case_sensitive = !flags.has_all(ParseFlags::NO_CASE);
    let allow_integer = flags.has_all(ParseFlags::ALLOW_INTEGER);
    match lexicon::recognize_boolean(text, case_sensitive) {
        Some((value, false)) => return Ok(value),
        Some((value, true)) if allow_integer => return Ok(value),
        _ => {}
    }
    let mut diag = Diagnostic::new();
    if allow_integer && !flags.has_all(ParseFlags::STRICT) {
        // Any other number is true unless it is zero.
        match wide_integer(text, flags | ParseFlags::SIGNEDNESS_MASK, config) {
            Ok(n) => return Ok(n != 0),
            Err(d) => diag.merge(d),
        }
        match double(text, config) {
            Ok(x) if !x.is_nan() => return Ok(x != 0.0),
            Ok(_) => {}
            Err(d) => diag.merge(d),
        }
    }
    Err(diag.with_headline(expected("boolean value", text)))
}

/// Parse a boolean word (`true`, `yes`, `on`, `enable`, …).  With
/// [`ParseFlags::ALLOW_INTEGER`] the digits `0`/`1` are accepted, and unless
/// [`ParseFlags::STRICT`] is set any other number is true when non-zero.
pub fn resolve_boolean(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<bool, ParseError> {
    boolean(text, flags, config).map_err(|d| config.fail(d, flags))
}

// ── Best-fit numeric value ────────────────────────────────────────────────────

/// The narrowest of `Integer` / `WideInteger` that holds `n`.
pub fn narrow(n: i64) -> Value {
    match i32::try_from(n) {
        Ok(i) => Value::Integer(i),
        Err(_) => Value::WideInteger(n),
    }
}

pub(crate) fn numeric(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<Value, Diagnostic> {
    let mut diag = Diagnostic::new();
    let mut double_tried = false;

    let record = |diag: &mut Diagnostic, kind: &str, d: Diagnostic| {
        tracing::trace!(text, kind, "numeric attempt failed");
        diag.merge(d);
    };

    // 1. Boolean words; the digit forms stay integers.
    match lexicon::recognize_boolean(text, false) {
        Some((value, true)) => return Ok(Value::Integer(i32::from(value))),
        Some((value, false)) => return Ok(Value::Boolean(value)),
        None => diag.push(expected("boolean value", text)),
    }

    // 2. Named constants.
    if let Some(value) = config.named_double(text) {
        return Ok(Value::Double(value));
    }

    // 3. Anything with a decimal separator is fixed or floating point.
    let separator = config.decimal_separator();
    if !separator.is_empty() && text.contains(separator.as_str()) {
        match decimal(text, config) {
            Ok(d) => return Ok(Value::Decimal(d)),
            Err(d) => record(&mut diag, "decimal", d),
        }
        match double(text, config) {
            Ok(x) => return Ok(Value::Double(x)),
            Err(d) => record(&mut diag, "double", d),
        }
        return Err(diag.with_headline(expected("fixed/floating point value", text)));
    }

    // 4. An exponent marker means floating point.
    if text.contains(['e', 'E']) {
        double_tried = true;
        match double(text, config) {
            Ok(x) => return Ok(Value::Double(x)),
            Err(d) => record(&mut diag, "double", d),
        }
    }

    // 5. Radix prefixes are final whatever the sign.
    if let Some(lit) = lexicon::recognize_radix(text, flags) {
        match radix_wide(text, &lit) {
            Ok(n) => return Ok(narrow(n)),
            Err(message) => record(&mut diag, "radix", Diagnostic::single(message)),
        }
    }

    // 6. Explicitly signed integers.
    let width = IntegerWidth::WideInteger;
    if starts_with_sign(text, &config.locale()) {
        match integer_attempt(text, flags, config, width, Signedness::Signed) {
            Ok(n) => return Ok(narrow(n as i64)),
            Err(message) => record(&mut diag, "wide integer", Diagnostic::single(message)),
        }
    }

    // 7. Unsigned integers, wrapped into the signed range unless widening.
    match integer_attempt(text, flags, config, width, Signedness::Unsigned) {
        Ok(n) => {
            let n = n as u64;
            if flags.has_all(ParseFlags::WIDEN_TO_UNSIGNED) && n > i64::MAX as u64 {
                return Ok(Value::UnsignedWideInteger(n));
            }
            return Ok(narrow(n as i64));
        }
        Err(message) => record(&mut diag, "unsigned wide integer", Diagnostic::single(message)),
    }

    // 8. Fixed point.
    match decimal(text, config) {
        Ok(d) => return Ok(Value::Decimal(d)),
        Err(d) => record(&mut diag, "decimal", d),
    }

    // 9. Floating point, unless step 4 already tried it.
    if !double_tried {
        match double(text, config) {
            Ok(x) => return Ok(Value::Double(x)),
            Err(d) => record(&mut diag, "double", d),
        }
    }

    Err(diag.with_headline(expected("numeric value", text)))
}

/// Resolve `text` to the best-fitting numeric value: boolean words, named
/// constants, decimals, doubles, and integers narrowed to `Integer` when
/// they fit 32 bits.
pub fn resolve_numeric(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<Value, ParseError> {
    numeric(text, flags, config).map_err(|d| config.fail(d, flags))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Locale;

    fn cfg() -> ParseConfig {
        ParseConfig::default()
    }

    const F: ParseFlags = ParseFlags::DEFAULT;

    // -- scan -----------------------------------------------------------------

    #[test]
    fn scan_parts() {
        let s = scan(" -12.50e3 ", NumberStyle::FLOAT, &Locale::invariant()).unwrap();
        assert_eq!(s, Scanned { negative: true, digits: "1250".into(), scale: 2, exponent: 3 });
    }

    #[test]
    fn scan_respects_style() {
        let inv = Locale::invariant();
        assert!(scan("1.5", NumberStyle::INTEGER, &inv).is_none());
        assert!(scan("1e5", NumberStyle::INTEGER, &inv).is_none());
        assert!(scan(" 7", NumberStyle::NONE, &inv).is_none());
        assert!(scan("(7)", NumberStyle::INTEGER, &inv).is_none());
        assert!(scan("(7)", NumberStyle::ANY, &inv).unwrap().negative);
        assert!(scan("7-", NumberStyle::NUMBER, &inv).unwrap().negative);
        assert!(scan("", NumberStyle::ANY, &inv).is_none());
        assert!(scan("-", NumberStyle::ANY, &inv).is_none());
        assert!(scan("1e", NumberStyle::FLOAT, &inv).is_none());
    }

    #[test]
    fn scan_thousands_is_lax() {
        let style = NumberStyle { thousands: true, ..NumberStyle::INTEGER };
        let s = scan("1,234,,555", style, &Locale::invariant()).unwrap();
        assert_eq!(s.to_i128(), Some(1_234_555));
        assert!(scan(",1", style, &Locale::invariant()).is_none());
    }

    #[test]
    fn scanned_integral_values() {
        let inv = Locale::invariant();
        assert_eq!(scan("1.000", NumberStyle::FLOAT, &inv).unwrap().to_i128(), Some(1));
        assert_eq!(scan("1.5", NumberStyle::FLOAT, &inv).unwrap().to_i128(), None);
        assert_eq!(scan("15e-1", NumberStyle::FLOAT, &inv).unwrap().to_i128(), None);
        assert_eq!(scan("2e3", NumberStyle::FLOAT, &inv).unwrap().to_i128(), Some(2000));
        assert_eq!(scan("0e99999", NumberStyle::FLOAT, &inv).unwrap().to_i128(), Some(0));
    }

    // -- Per-width integers ---------------------------------------------------

    #[test]
    fn wide_integer_plain_and_radix() {
        let c = cfg();
        assert_eq!(resolve_wide_integer("42", F, &c).unwrap(), 42);
        assert_eq!(resolve_wide_integer(" -42 ", F, &c).unwrap(), -42);
        assert_eq!(resolve_wide_integer("0x1F", F, &c).unwrap(), 31);
        assert_eq!(resolve_wide_integer("-0b101", F, &c).unwrap(), -5);
        assert_eq!(resolve_wide_integer("0o17", F, &c).unwrap(), 15);
        assert_eq!(resolve_wide_integer("0d99", F, &c).unwrap(), 99);
    }

    #[test]
    fn wide_integer_wraps_full_width_radix() {
        let c = cfg();
        assert_eq!(resolve_wide_integer("0xFFFFFFFFFFFFFFFF", F, &c).unwrap(), -1);
        assert_eq!(resolve_wide_integer("18446744073709551615", F, &c).unwrap(), -1);
        assert_eq!(resolve_wide_integer("0x8000000000000000", F, &c).unwrap(), i64::MIN);
    }

    #[test]
    fn negating_minimum_is_fatal() {
        let c = cfg();
        let err = resolve_wide_integer("-0x8000000000000000", F, &c).unwrap_err();
        assert!(err.to_string().contains("cannot negate minimum"), "{err}");
        let min_binary = format!("-0b1{}", "0".repeat(63));
        assert!(resolve_wide_integer(&min_binary, F, &c).is_err());
    }

    #[test]
    fn wide_integer_failure_message() {
        let err = resolve_wide_integer("12x4", F, &cfg()).unwrap_err();
        assert_eq!(err.to_string(), "expected wide integer but got \"12x4\"");
        assert_eq!(err.diagnostic().len(), 2);
    }

    #[test]
    fn verbose_lists_both_signedness_failures() {
        let err = resolve_wide_integer("12x4", F | ParseFlags::VERBOSE, &cfg()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected wide integer but got \"12x4\"\nexpected unsigned wide integer but got \"12x4\""
        );
    }

    #[test]
    fn no_signedness() {
        let flags = F.without(ParseFlags::SIGNEDNESS_MASK);
        let err = resolve_integer("1", flags, &cfg()).unwrap_err();
        assert_eq!(err.to_string(), "no signedness is supported");
    }

    #[test]
    fn integer_range_and_unsigned_alternate() {
        let c = cfg();
        assert_eq!(resolve_integer("2147483647", F, &c).unwrap(), i32::MAX);
        assert_eq!(resolve_integer("4294967295", F, &c).unwrap(), -1);
        assert_eq!(resolve_integer("0xFFFFFFFF", F, &c).unwrap(), -1);
        let signed_only = F.without(ParseFlags::UNSIGNED);
        let err = resolve_integer("4294967295", signed_only, &c).unwrap_err();
        assert_eq!(err.to_string(), "expected integer but got \"4294967295\"");
        assert!(resolve_integer("4294967296", F, &c).is_err());
    }

    #[test]
    fn byte_defaults_to_unsigned() {
        let c = cfg();
        assert_eq!(resolve_byte("255", F, &c).unwrap(), 255);
        assert_eq!(resolve_byte("-1", F, &c).unwrap(), 255);
        let unsigned_only = F.without(ParseFlags::SIGNED);
        let err = resolve_byte("-1", unsigned_only, &c).unwrap_err();
        assert_eq!(err.to_string(), "expected byte but got \"-1\"");
        assert!(resolve_byte("256", F, &c).is_err());
    }

    #[test]
    fn narrow_integer_range() {
        let c = cfg();
        assert_eq!(resolve_narrow_integer("-32768", F, &c).unwrap(), i16::MIN);
        assert_eq!(resolve_narrow_integer("65535", F, &c).unwrap(), -1);
        assert!(resolve_narrow_integer("65536", F, &c).is_err());
    }

    #[test]
    fn unsigned_wide_integer() {
        let c = cfg();
        assert_eq!(resolve_unsigned_wide_integer("18446744073709551615", F, &c).unwrap(), u64::MAX);
        assert_eq!(resolve_unsigned_wide_integer("-1", F, &c).unwrap(), u64::MAX);
        let unsigned_only = F.without(ParseFlags::SIGNED);
        assert!(resolve_unsigned_wide_integer("-1", unsigned_only, &c).is_err());
        assert_eq!(resolve_unsigned_wide_integer("0xFFFFFFFFFFFFFFFF", unsigned_only, &c).unwrap(), u64::MAX);
        assert!(resolve_unsigned_wide_integer("-0x1", unsigned_only, &c).is_err());
        assert!(resolve_byte("-0x1", unsigned_only, &c).is_err());
        // With signed input allowed the bits are kept, as for every width.
        assert_eq!(resolve_unsigned_wide_integer("-0x1", F, &c).unwrap(), u64::MAX);
        assert_eq!(resolve_byte("-0x1", F, &c).unwrap(), u8::MAX);
    }

    #[test]
    fn radix_requires_permission() {
        let c = cfg();
        let no_hex = F.without(ParseFlags::HEXADECIMAL_RADIX);
        assert!(resolve_wide_integer("0x10", no_hex, &c).is_err());
        let no_sign = F | ParseFlags::NO_RADIX_SIGN;
        assert!(resolve_wide_integer("-0x10", no_sign, &c).is_err());
        assert_eq!(resolve_wide_integer("0x10", no_sign, &c).unwrap(), 16);
    }

    #[test]
    fn bad_radix_digits() {
        let err = resolve_wide_integer("0b102", F, &cfg()).unwrap_err();
        assert!(err.to_string().contains("binary digits"), "{err}");
    }

    // -- Floating point -------------------------------------------------------

    #[test]
    fn doubles_and_named_constants() {
        let c = cfg();
        assert_eq!(resolve_double("1.5", F, &c).unwrap(), 1.5);
        assert_eq!(resolve_double("-2e-3", F, &c).unwrap(), -0.002);
        assert_eq!(resolve_double("+Inf", F, &c).unwrap(), f64::INFINITY);
        assert_eq!(resolve_double("-inf", F, &c).unwrap(), f64::NEG_INFINITY);
        let nan = resolve_double("NaN", F, &c).unwrap();
        assert!(nan.is_nan());
        #[allow(clippy::eq_op)]
        let equal = nan == nan;
        assert!(!equal);
    }

    #[test]
    fn double_rejects_rust_only_spellings() {
        let c = cfg();
        assert!(resolve_double("infinity_", F, &c).is_err());
        assert!(resolve_double("1e999", F, &c).is_err());
        assert!(resolve_double("0x1p3", F, &c).is_err());
    }

    #[test]
    fn singles() {
        let c = cfg();
        assert_eq!(resolve_single("0.25", F, &c).unwrap(), 0.25f32);
        assert!(resolve_single("1e39", F, &c).is_err());
        assert_eq!(resolve_single("Inf", F, &c).unwrap(), f32::INFINITY);
    }

    #[test]
    fn decimals() {
        let c = cfg();
        assert_eq!(resolve_decimal("1.50", F, &c).unwrap().to_string(), "1.50");
        assert_eq!(resolve_decimal("1,000.5", F, &c).unwrap().to_string(), "1000.5");
        assert!(resolve_decimal("abc", F, &c).is_err());
        let tiny = resolve_decimal("0.000000000000000000000000000001", F, &c).unwrap();
        assert!(tiny.is_zero());
        assert_eq!(tiny.scale(), 28);
    }

    #[test]
    fn locale_decimal_separator() {
        let c = ParseConfig::new(Locale::named("de-DE").unwrap());
        assert_eq!(resolve_double("1,5", F, &c).unwrap(), 1.5);
        assert_eq!(resolve_numeric("1,5", F, &c).unwrap(), Value::Decimal(Decimal::new(15, 1).unwrap()));
        assert_eq!(resolve_double("∞", F, &c).unwrap(), f64::INFINITY);
    }

    // -- Booleans -------------------------------------------------------------

    #[test]
    fn booleans() {
        let c = cfg();
        assert!(resolve_boolean("TRUE", F, &c).unwrap());
        assert!(!resolve_boolean("off", F, &c).unwrap());
        assert!(resolve_boolean("1", F, &c).unwrap());
        assert!(resolve_boolean("42", F, &c).unwrap());
        assert!(!resolve_boolean("0.0", F, &c).unwrap());
    }

    #[test]
    fn boolean_strictness() {
        let c = cfg();
        let exact = ParseFlags::BOOLEAN;
        assert!(resolve_boolean("TRUE", exact, &c).is_err());
        assert!(resolve_boolean("1", exact, &c).is_err());
        let strict = F | ParseFlags::STRICT;
        assert!(resolve_boolean("1", strict, &c).unwrap());
        assert!(resolve_boolean("42", strict, &c).is_err());
        let err = resolve_boolean("maybe", F, &c).unwrap_err();
        assert_eq!(err.to_string(), "expected boolean value but got \"maybe\"");
    }

    // -- resolve_numeric ------------------------------------------------------

    #[test]
    fn numeric_integers_narrow() {
        let c = cfg();
        assert_eq!(resolve_numeric("42", F, &c).unwrap(), Value::Integer(42));
        assert_eq!(resolve_numeric("-2147483648", F, &c).unwrap(), Value::Integer(i32::MIN));
        assert_eq!(resolve_numeric("2147483648", F, &c).unwrap(), Value::WideInteger(2_147_483_648));
        assert_eq!(resolve_numeric("0x10", F, &c).unwrap(), Value::Integer(16));
    }

    #[test]
    fn numeric_booleans() {
        let c = cfg();
        assert_eq!(resolve_numeric("1", F, &c).unwrap(), Value::Integer(1));
        assert_eq!(resolve_numeric("Yes", F, &c).unwrap(), Value::Boolean(true));
    }

    #[test]
    fn numeric_floating() {
        let c = cfg();
        assert_eq!(resolve_numeric("1.25", F, &c).unwrap(), Value::Decimal(Decimal::new(125, 2).unwrap()));
        assert_eq!(resolve_numeric("1e3", F, &c).unwrap(), Value::Double(1000.0));
        assert_eq!(resolve_numeric("-Inf", F, &c).unwrap(), Value::Double(f64::NEG_INFINITY));
        assert_eq!(resolve_numeric("0xE", F, &c).unwrap(), Value::Integer(14));
    }

    #[test]
    fn numeric_big_values() {
        let c = cfg();
        assert_eq!(resolve_numeric("18446744073709551615", F, &c).unwrap(), Value::Integer(-1));
        let widen = F | ParseFlags::WIDEN_TO_UNSIGNED;
        assert_eq!(
            resolve_numeric("18446744073709551615", widen, &c).unwrap(),
            Value::UnsignedWideInteger(u64::MAX)
        );
        let big = resolve_numeric("99999999999999999999", F, &c).unwrap();
        assert!(matches!(big, Value::Decimal(_)));
    }

    #[test]
    fn numeric_failures() {
        let c = cfg();
        let err = resolve_numeric("abc", F, &c).unwrap_err();
        assert_eq!(err.to_string(), "expected numeric value but got \"abc\"");
        assert!(err.diagnostic().len() > 1);
        let err = resolve_numeric("1.2.3", F, &c).unwrap_err();
        assert_eq!(err.to_string(), "expected fixed/floating point value but got \"1.2.3\"");
    }
}
