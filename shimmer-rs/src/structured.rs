//! GUIDs, versions, version ranges, and URIs.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;
use uuid::Uuid;

use crate::config::ParseConfig;
use crate::diag::{quoted, Diagnostic, ParseError};
use crate::flags::ParseFlags;
use crate::number;

// ── GUID ──────────────────────────────────────────────────────────────────────

pub(crate) fn guid(text: &str) -> Result<Uuid, Diagnostic> {
    Uuid::parse_str(text.trim())
        .map_err(|e| {
            let mut diag = Diagnostic::single(e.to_string());
            diag.set_headline(format!("unable to convert guid string {}", quoted(text)));
            diag
        })
}

/// Parse a GUID in hyphenated, simple, braced, or URN form.
pub fn resolve_guid(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<Uuid, ParseError> {
    guid(text).map_err(|d| config.fail(d, flags))
}

// ── Versions ──────────────────────────────────────────────────────────────────

/// `major.minor[.build[.revision]]`; each component fits an `i32`.
///
/// Ordering is component-wise, an absent component sorting before any
/// present one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
    pub revision: Option<u32>,
}

impl Version {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor, build: None, revision: None }
    }

    /// Strict parse of the dotted form.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split('.');
        let major = version_component(parts.next()?)?;
        let minor = version_component(parts.next()?)?;
        let build = match parts.next() {
            Some(p) => Some(version_component(p)?),
            None => None,
        };
        let revision = match parts.next() {
            Some(p) => Some(version_component(p)?),
            None => None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self { major, minor, build, revision })
    }
}

fn version_component(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok().filter(|&n| n <= i32::MAX as u32)
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{build}")?;
            if let Some(revision) = self.revision {
                write!(f, ".{revision}")?;
            }
        }
        Ok(())
    }
}

pub(crate) fn version(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<Version, Diagnostic> {
    if let Some(v) = Version::parse(text.trim()) {
        return Ok(v);
    }
    let headline = format!("unable to convert version string {}", quoted(text));
    let mut diag = Diagnostic::single(headline.clone());
    if !flags.has_all(ParseFlags::STRICT) {
        match number::wide_integer(text, flags.with(ParseFlags::SIGNED), config) {
            Ok(n) => match u32::try_from(n) {
                Ok(major) if major <= i32::MAX as u32 => return Ok(Version::new(major, 0)),
                _ => diag.push(format!("version component {n} out of range")),
            },
            Err(d) => diag.merge(d),
        }
    }
    Err(diag.with_headline(headline))
}

/// Parse a version; outside strict mode a bare integer is taken as
/// `major.0`.
pub fn resolve_version(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<Version, ParseError> {
    version(text, flags, config).map_err(|d| config.fail(d, flags))
}

// ── Version ranges ────────────────────────────────────────────────────────────

static VERSION_RANGE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^\s*([0-9.]*)\s*-\s*([0-9.]*)\s*$").ok());

/// An inclusive range of versions; `None` marks an open side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionRange {
    pub low: Option<Version>,
    pub high: Option<Version>,
}

impl VersionRange {
    pub fn contains(&self, v: &Version) -> bool {
        self.low.map_or(true, |low| low <= *v) && self.high.map_or(true, |high| *v <= high)
    }

    pub fn is_empty(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(low) = self.low {
            write!(f, "{low}")?;
        }
        f.write_str("-")?;
        if let Some(high) = self.high {
            write!(f, "{high}")?;
        }
        Ok(())
    }
}

fn range_side(
    side: &str,
    open_flag: ParseFlags,
    which: &str,
    text: &str,
    flags: ParseFlags,
    config: &ParseConfig,
) -> Result<Option<Version>, Diagnostic> {
    if side.is_empty() {
        if flags.has_all(open_flag) {
            return Ok(None);
        }
        return Err(Diagnostic::single(format!("version range {} has no {which} bound", quoted(text))));
    }
    version(side, flags, config).map(Some)
}

pub(crate) fn version_range(
    text: &str,
    flags: ParseFlags,
    config: &ParseConfig,
) -> Result<VersionRange, Diagnostic> {
    let headline = format!("unable to convert version range string {}", quoted(text));
    let Some(caps) = VERSION_RANGE.as_ref().and_then(|re| re.captures(text)) else {
        // A single version is the degenerate range [v, v].
        return match version(text, flags, config) {
            Ok(v) => Ok(VersionRange { low: Some(v), high: Some(v) }),
            Err(mut diag) => {
                diag.set_headline(headline);
                Err(diag)
            }
        };
    };
    let (low, high) = (&caps[1], &caps[2]);

    if low.is_empty() && high.is_empty() {
        if flags.has_all(ParseFlags::ALLOW_EMPTY) {
            return Ok(VersionRange { low: None, high: None });
        }
        return Err(Diagnostic::single(format!("version range {} is empty", quoted(text))).with_headline(headline));
    }

    // ALLOW_EMPTY alone admits "-" but not a single open side.
    let open = |side: &str, open_flag: ParseFlags, which: &str| {
        range_side(side, open_flag, which, text, flags, config)
    };
    let sides = open(low, ParseFlags::ALLOW_OPEN_LOW, "lower")
        .and_then(|l| open(high, ParseFlags::ALLOW_OPEN_HIGH, "upper").map(|h| (l, h)));
    match sides {
        Ok((Some(l), Some(h))) if l > h => Ok(VersionRange { low: Some(h), high: Some(l) }),
        Ok((low, high)) => Ok(VersionRange { low, high }),
        Err(mut diag) => {
            diag.set_headline(headline);
            Err(diag)
        }
    }
}

/// Parse `low-high`, either side optional under the matching
/// `ALLOW_OPEN_*` flag.  Reversed bounds are swapped.
pub fn resolve_version_range(
    text: &str,
    flags: ParseFlags,
    config: &ParseConfig,
) -> Result<VersionRange, ParseError> {
    version_range(text, flags, config).map_err(|d| config.fail(d, flags))
}

// ── URIs ──────────────────────────────────────────────────────────────────────

pub(crate) fn uri(text: &str, base: Option<&Url>, flags: ParseFlags) -> Result<Url, Diagnostic> {
    let headline = format!("unable to convert URI string {}", quoted(text));
    let err = match Url::parse(text) {
        Ok(url) => return Ok(url),
        Err(e) => e,
    };
    let mut diag = Diagnostic::single(err.to_string());
    if err == url::ParseError::RelativeUrlWithoutBase && !flags.has_all(ParseFlags::STRICT) {
        if let Some(base) = base {
            match base.join(text) {
                Ok(url) => {
                    tracing::trace!(text, %base, %url, "resolved relative URI");
                    return Ok(url);
                }
                Err(e) => diag.push(e.to_string()),
            }
        }
    }
    Err(diag.with_headline(headline))
}

/// Parse an absolute URI.  Outside strict mode a relative reference is
/// resolved against `base` when one is given.
pub fn resolve_uri(
    text: &str,
    base: Option<&Url>,
    flags: ParseFlags,
    config: &ParseConfig,
) -> Result<Url, ParseError> {
    uri(text, base, flags).map_err(|d| config.fail(d, flags))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
