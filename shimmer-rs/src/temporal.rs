//! Date/time and time-span parsing.
//!
//! Both kinds try a structured parse first.  Unless [`ParseFlags::STRICT`]
//! is set, text that fails it is read as a wide integer and taken as a count
//! of 100-nanosecond ticks: since 0001-01-01T00:00:00 for a date/time, and
//! as the length itself for a time span.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};

use crate::config::{DateTimeStyle, ParseConfig};
use crate::diag::{quoted, Diagnostic, ParseError};
use crate::flags::ParseFlags;
use crate::number;

/// Rendering used by `Value::DateTime`; parses back through [`ISO_FORMATS`].
pub const CANONICAL_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Culture-independent formats tried before the locale's own.
const ISO_FORMATS: [&str; 4] =
    [CANONICAL_DATE_TIME, "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d"];

pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Ticks of 9999-12-31T23:59:59.9999999, the last representable instant.
pub const MAX_DATE_TIME_TICKS: i64 = 3_155_378_975_999_999_999;

const SECONDS_PER_DAY: i64 = 86_400;

// ── Ticks ─────────────────────────────────────────────────────────────────────

fn tick_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1, 1, 1)?.and_hms_opt(0, 0, 0)
}

pub fn ticks_to_time_span(ticks: i64) -> TimeDelta {
    TimeDelta::microseconds(ticks / 10) + TimeDelta::nanoseconds((ticks % 10) * 100)
}

/// Whole ticks in `span`, truncating sub-tick precision; `None` if the count
/// does not fit an `i64`.
pub fn time_span_to_ticks(span: TimeDelta) -> Option<i64> {
    let micros = span.num_microseconds()?;
    let rest = (span - TimeDelta::microseconds(micros)).num_nanoseconds()?;
    micros.checked_mul(10)?.checked_add(rest / 100)
}

pub fn ticks_to_date_time(ticks: i64) -> Option<NaiveDateTime> {
    if !(0..=MAX_DATE_TIME_TICKS).contains(&ticks) {
        return None;
    }
    tick_epoch()?.checked_add_signed(ticks_to_time_span(ticks))
}

pub fn date_time_to_ticks(dt: NaiveDateTime) -> Option<i64> {
    let ticks = time_span_to_ticks(dt.signed_duration_since(tick_epoch()?))?;
    (0..=MAX_DATE_TIME_TICKS).contains(&ticks).then_some(ticks)
}

/// Tick fallback shared by both kinds.
fn ticks(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<i64, Diagnostic> {
    number::wide_integer(text, flags.with(ParseFlags::SIGNED), config)
}

// ── Date/time ─────────────────────────────────────────────────────────────────

/// `text` under one format: a full date/time, a bare date at midnight, or
/// a date/time with an offset.
fn parse_with(text: &str, format: &str, style: DateTimeStyle) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| NaiveDate::parse_from_str(text, format).ok()?.and_hms_opt(0, 0, 0))
        .or_else(|| {
            let dt = DateTime::parse_from_str(text, format).ok()?;
            Some(if style.adjust_to_utc { dt.naive_utc() } else { dt.naive_local() })
        })
}

fn parse_any(text: &str, config: &ParseConfig, style: DateTimeStyle) -> Option<NaiveDateTime> {
    if let Some(dt) = ISO_FORMATS.iter().find_map(|f| parse_with(text, f, style)) {
        return Some(dt);
    }
    let locale = config.locale();
    if let Some(dt) = locale.date_time_formats.iter().find_map(|f| parse_with(text, f, style)) {
        return Some(dt);
    }
    let dt = DateTime::parse_from_rfc3339(text).ok()?;
    Some(if style.adjust_to_utc { dt.naive_utc() } else { dt.naive_local() })
}

pub(crate) fn date_time(
    text: &str,
    format: Option<&str>,
    flags: ParseFlags,
    config: &ParseConfig,
) -> Result<NaiveDateTime, Diagnostic> {
    let style = config.date_time_style();
    let trimmed = if style.allow_white { text.trim() } else { text };
    let parsed = match format {
        Some(f) => parse_with(trimmed, f, style),
        None => parse_any(trimmed, config, style),
    };
    if let Some(dt) = parsed {
        return Ok(dt);
    }

    let headline = match format {
        Some(f) => format!("unable to convert date-time string {} using format {}", quoted(text), quoted(f)),
        None => format!("unable to convert date-time string {}", quoted(text)),
    };
    let mut diag = Diagnostic::single(headline.clone());
    if !flags.has_all(ParseFlags::STRICT) {
        match ticks(text, flags, config) {
            Ok(n) => match ticks_to_date_time(n) {
                Some(dt) => return Ok(dt),
                None => diag.push(format!("date-time ticks {n} out of range")),
            },
            Err(d) => diag.merge(d),
        }
    }
    Err(diag.with_headline(headline))
}

/// Parse a date/time from the ISO forms, the locale's formats, or RFC 3339
/// with an offset.
pub fn resolve_date_time(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<NaiveDateTime, ParseError> {
    date_time(text, None, flags, config).map_err(|d| config.fail(d, flags))
}

/// Parse a date/time against one explicit `strftime`-style format.
pub fn resolve_date_time_with_format(
    text: &str,
    format: &str,
    flags: ParseFlags,
    config: &ParseConfig,
) -> Result<NaiveDateTime, ParseError> {
    date_time(text, Some(format), flags, config).map_err(|d| config.fail(d, flags))
}

// ── Time spans ────────────────────────────────────────────────────────────────

/// `[-][d.]hh:mm:ss[.fffffff]`, the fraction printed only when non-zero.
pub fn format_time_span(span: TimeDelta) -> String {
    let sign = if span < TimeDelta::zero() { "-" } else { "" };
    let span = span.abs();
    let secs = span.num_seconds();
    let (days, secs) = (secs / SECONDS_PER_DAY, secs % SECONDS_PER_DAY);
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    let mut out = String::from(sign);
    if days != 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!("{h:02}:{m:02}:{s:02}"));
    let ticks = span.subsec_nanos() / 100;
    if ticks != 0 {
        out.push_str(&format!(".{ticks:07}"));
    }
    out
}

fn component(s: &str, max: i64) -> Option<i64> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().filter(|&n| n <= max)
}

fn digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse `[-]d` or `[-][d.]hh:mm[:ss[.fffffff]]` into ticks.
fn parse_span_ticks(text: &str) -> Option<i64> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let Some(colon) = body.find(':') else {
        let days = digits(body)?;
        let ticks = days.checked_mul(SECONDS_PER_DAY * TICKS_PER_SECOND)?;
        return Some(if negative { -ticks } else { ticks });
    };

    let (days, clock) = match body[..colon].find('.') {
        Some(dot) => (digits(&body[..dot])?, &body[dot + 1..]),
        None => (0, body),
    };
    let mut parts = clock.splitn(3, ':');
    let hours = component(parts.next()?, 23)?;
    let minutes = component(parts.next()?, 59)?;
    let (seconds, fraction) = match parts.next() {
        None => (0, 0),
        Some(rest) => {
            let (sec, frac) = rest.split_once('.').unwrap_or((rest, ""));
            let fraction = match frac {
                "" if rest.contains('.') => return None,
                "" => 0,
                f if f.len() <= 7 && f.bytes().all(|b| b.is_ascii_digit()) => {
                    format!("{f:0<7}").parse::<i64>().ok()?
                }
                _ => return None,
            };
            (component(sec, 59)?, fraction)
        }
    };

    let secs = days
        .checked_mul(SECONDS_PER_DAY)?
        .checked_add(hours * 3600 + minutes * 60 + seconds)?;
    let ticks = secs.checked_mul(TICKS_PER_SECOND)?.checked_add(fraction)?;
    Some(if negative { -ticks } else { ticks })
}

/// Parse the canonical time-span text.
pub fn parse_time_span(text: &str) -> Option<TimeDelta> {
    parse_span_ticks(text).map(ticks_to_time_span)
}

pub(crate) fn time_span(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<TimeDelta, Diagnostic> {
    if let Some(span) = parse_time_span(text.trim()) {
        return Ok(span);
    }
    let headline = format!("unable to convert time span string {}", quoted(text));
    let mut diag = Diagnostic::single(headline.clone());
    if !flags.has_all(ParseFlags::STRICT) {
        match ticks(text, flags, config) {
            Ok(n) => return Ok(ticks_to_time_span(n)),
            Err(d) => diag.merge(d),
        }
    }
    Err(diag.with_headline(headline))
}

/// Parse a time span (`[-][d.]hh:mm[:ss[.fffffff]]` or whole days).
pub fn resolve_time_span(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<TimeDelta, ParseError> {
    time_span(text, flags, config).map_err(|d| config.fail(d, flags))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
