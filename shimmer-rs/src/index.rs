//! Index expressions: `TERM` or `TERM OP TERM`.
//!
//! | Term            | Value                                    |
//! |-----------------|------------------------------------------|
//! | `none`          | [`INVALID_INDEX`]                        |
//! | `start`         | first valid index                        |
//! | `end`           | last valid index                         |
//! | `count`         | element count (never bounds-checked)     |
//! | integer         | any wide-integer literal, radix included |
//! | boolean word    | 0 or 1                                   |
//!
//! Operators are `+ - * / %`.  The expression is split at the first
//! operator character after the first character, so a leading sign stays
//! with the first term (`-1+2`, `end--1`).

use crate::config::ParseConfig;
use crate::diag::{expected, Diagnostic, ParseError};
use crate::flags::ParseFlags;
use crate::lexicon::{self, NamedIndex};
use crate::number;

/// Sentinel produced by `none`.
pub const INVALID_INDEX: i64 = -1;

const OPERATORS: [char; 5] = ['+', '-', '*', '/', '%'];

/// The collection an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBounds {
    pub count: i64,
    pub first: i64,
    pub last: i64,
    /// Reject results outside `[first, last]`.
    pub strict: bool,
}

impl IndexBounds {
    /// Bounds of a zero-based collection with `count` elements.
    pub fn for_count(count: i64, strict: bool) -> Self {
        Self { count, first: 0, last: count.saturating_sub(1), strict }
    }

    /// An empty collection has no valid bounds.
    pub fn is_valid(&self) -> bool {
        self.first >= 0 && self.first <= self.last
    }

    fn check(&self, n: i64) -> Result<i64, Diagnostic> {
        if !self.strict {
            return Ok(n);
        }
        if !self.is_valid() {
            return Err(Diagnostic::single("bad index bounds"));
        }
        if n < self.first || n > self.last {
            return Err(Diagnostic::single(format!(
                "index {n} out-of-bounds, must be between {} and {}",
                self.first, self.last
            )));
        }
        Ok(n)
    }
}

/// One side of an index expression, before the collection is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Term {
    None,
    Start,
    End,
    Count,
    Value(i64),
}

impl Term {
    /// The term's value against `bounds`.  Under strict bounds `start` and
    /// `end` need a non-empty collection and literal values must lie in
    /// `[first, last]`; `relaxed` lifts both requirements.  `none` and
    /// `count` are never checked.
    fn resolve(self, bounds: &IndexBounds, relaxed: bool) -> Result<i64, Diagnostic> {
        let checked = bounds.strict && !relaxed;
        match self {
            Term::None => Ok(INVALID_INDEX),
            Term::Count => Ok(bounds.count),
            Term::Start | Term::End if checked && !bounds.is_valid() => {
                Err(Diagnostic::single("bad index bounds"))
            }
            Term::Start => Ok(bounds.first),
            Term::End => Ok(bounds.last),
            Term::Value(n) if checked => bounds.check(n),
            Term::Value(n) => Ok(n),
        }
    }
}

fn term(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<Term, Diagnostic> {
    if flags.has_all(ParseFlags::NAMED_INDEX) {
        let no_case = flags.has_all(ParseFlags::NO_CASE);
        if let Some(named) = lexicon::recognize_named_index(text, no_case) {
            return Ok(match named {
                NamedIndex::None => Term::None,
                NamedIndex::Start => Term::Start,
                NamedIndex::End => Term::End,
                NamedIndex::Count => Term::Count,
            });
        }
    }

    let mut diag = match number::wide_integer(text, flags, config) {
        Ok(n) => return Ok(Term::Value(n)),
        Err(d) => d,
    };

    let case_sensitive = !flags.has_all(ParseFlags::NO_CASE);
    if let Some((value, _)) = lexicon::recognize_boolean(text, case_sensitive) {
        return Ok(Term::Value(i64::from(value)));
    }
    diag.push(expected("boolean value", text));
    Err(diag)
}

fn split(text: &str) -> Option<(&str, char, &str)> {
    let mut chars = text.char_indices();
    chars.next()?;
    let (at, op) = chars.find(|(_, c)| OPERATORS.contains(c))?;
    Some((&text[..at], op, &text[at + op.len_utf8()..]))
}

fn apply(lhs: i64, op: char, rhs: i64, text: &str) -> Result<i64, Diagnostic> {
    if matches!(op, '/' | '%') && rhs == 0 {
        return Err(Diagnostic::single(format!("cannot divide {lhs} by zero (via {op}) for index")));
    }
    let result = match op {
        '+' => lhs.checked_add(rhs),
        '-' => lhs.checked_sub(rhs),
        '*' => lhs.checked_mul(rhs),
        '/' => lhs.checked_div(rhs),
        _ => lhs.checked_rem(rhs),
    };
    result.ok_or_else(|| Diagnostic::single(format!("integer overflow evaluating index \"{text}\"")))
}

pub(crate) fn index(
    text: &str,
    bounds: &IndexBounds,
    flags: ParseFlags,
    config: &ParseConfig,
) -> Result<i64, Diagnostic> {
    let mut diag = match term(text, flags, config) {
        Ok(whole) => return whole.resolve(bounds, false),
        Err(d) => d,
    };

    let Some((lhs, op, rhs)) = split(text) else {
        return Err(diag.with_headline(expected("index", text)));
    };
    tracing::trace!(text, lhs, %op, rhs, "index expression");

    let terms = term(lhs, flags, config).and_then(|l| term(rhs, flags, config).map(|r| (l, r)));
    let (lhs, rhs) = match terms {
        Ok(terms) => terms,
        Err(d) => {
            diag.merge(d);
            return Err(diag.with_headline(expected("index", text)));
        }
    };
    let offset = flags.has_all(ParseFlags::WITH_OFFSET);
    let l = lhs.resolve(bounds, false)?;
    let r = rhs.resolve(bounds, offset)?;
    bounds.check(apply(l, op, r, text)?)
}

/// Evaluate an index expression against `bounds`.
///
/// `none` always yields [`INVALID_INDEX`] and `count` the element count.
/// When `bounds.strict` is set, each term and the final result must lie in
/// `[first, last]`; `WITH_OFFSET` exempts the second term.
pub fn resolve_index(
    text: &str,
    bounds: &IndexBounds,
    flags: ParseFlags,
    config: &ParseConfig,
) -> Result<i64, ParseError> {
    index(text, bounds, flags, config).map_err(|d| config.fail(d, flags))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const F: ParseFlags = ParseFlags::INDEX;

    fn idx(text: &str, bounds: IndexBounds) -> Result<i64, ParseError> {
        resolve_index(text, &bounds, F, &ParseConfig::default())
    }

    fn five() -> IndexBounds {
        IndexBounds::for_count(5, false)
    }

    #[test]
    fn named_terms() {
        assert_eq!(idx("start", five()).unwrap(), 0);
        assert_eq!(idx("end", five()).unwrap(), 4);
        assert_eq!(idx("count", five()).unwrap(), 5);
        assert_eq!(idx("none", five()).unwrap(), INVALID_INDEX);
    }

    #[test]
    fn arithmetic() {
        assert_eq!(idx("end-1", five()).unwrap(), 3);
        assert_eq!(idx("start+2", five()).unwrap(), 2);
        assert_eq!(idx("2*3", five()).unwrap(), 6);
        assert_eq!(idx("count/2", five()).unwrap(), 2);
        assert_eq!(idx("count%2", five()).unwrap(), 1);
        assert_eq!(idx("end--1", five()).unwrap(), 5);
        assert_eq!(idx("-1+2", five()).unwrap(), 1);
        assert_eq!(idx("0x10+1", five()).unwrap(), 17);
        assert_eq!(idx("true+1", five()).unwrap(), 2);
    }

    #[test]
    fn plain_integers() {
        assert_eq!(idx("3", five()).unwrap(), 3);
        assert_eq!(idx("-7", five()).unwrap(), -7);
    }

    #[test]
    fn divide_by_zero() {
        let err = idx("end/0", five()).unwrap_err();
        assert_eq!(err.message(), "cannot divide 4 by zero (via /) for index");
        let err = idx("7%0", five()).unwrap_err();
        assert_eq!(err.message(), "cannot divide 7 by zero (via %) for index");
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(idx("9223372036854775807+1", five()).is_err());
    }

    #[test]
    fn strict_bounds() {
        let strict = IndexBounds::for_count(5, true);
        assert_eq!(idx("end", strict).unwrap(), 4);
        let err = idx("end+1", strict).unwrap_err();
        assert_eq!(err.message(), "index 5 out-of-bounds, must be between 0 and 4");
        // count is returned verbatim, never checked.
        assert_eq!(idx("count", strict).unwrap(), 5);
        assert_eq!(idx("count-1", strict).unwrap(), 4);
    }

    #[test]
    fn strict_bounds_check_each_term() {
        let strict = IndexBounds::for_count(5, true);
        let err = idx("10-8", strict).unwrap_err();
        assert_eq!(err.message(), "index 10 out-of-bounds, must be between 0 and 4");
        let err = idx("4+-1", strict).unwrap_err();
        assert_eq!(err.message(), "index -1 out-of-bounds, must be between 0 and 4");

        let cfg = ParseConfig::default();
        let with_offset = F | ParseFlags::WITH_OFFSET;
        assert_eq!(resolve_index("4+-1", &strict, with_offset, &cfg).unwrap(), 3);
        assert!(resolve_index("10-8", &strict, with_offset, &cfg).is_err());
        assert_eq!(idx("10-8", five()).unwrap(), 2);
    }

    #[test]
    fn empty_collection() {
        let strict = IndexBounds::for_count(0, true);
        assert_eq!(idx("start", strict).unwrap_err().message(), "bad index bounds");
        assert_eq!(idx("end", strict).unwrap_err().message(), "bad index bounds");
        assert_eq!(idx("start+1", strict).unwrap_err().message(), "bad index bounds");
        assert_eq!(idx("none", strict).unwrap(), INVALID_INDEX);
        assert_eq!(idx("count", strict).unwrap(), 0);

        let lax = IndexBounds::for_count(0, false);
        assert_eq!(idx("start", lax).unwrap(), 0);
        assert_eq!(idx("end", lax).unwrap(), -1);
        assert_eq!(idx("count", lax).unwrap(), 0);
    }

    #[test]
    fn offset_term_skips_bounds_availability() {
        let strict = IndexBounds { count: 0, first: 0, last: -1, strict: true };
        let cfg = ParseConfig::default();
        let with_offset = F | ParseFlags::WITH_OFFSET;
        let err = resolve_index("count+end", &strict, with_offset, &cfg).unwrap_err();
        // The offset term resolves; the result is still rejected.
        assert_eq!(err.message(), "bad index bounds");
        let err = resolve_index("count+end", &strict, with_offset | ParseFlags::VERBOSE, &cfg).unwrap_err();
        assert!(!err.message().contains("expected index"));
        let err = resolve_index("count+end", &strict, F, &cfg).unwrap_err();
        assert_eq!(err.message(), "bad index bounds");
    }

    #[test]
    fn named_words_need_flag() {
        let cfg = ParseConfig::default();
        let flags = F.without(ParseFlags::NAMED_INDEX);
        assert!(resolve_index("end", &five(), flags, &cfg).is_err());
        assert!(resolve_index("END", &five(), F, &cfg).is_err());
        assert_eq!(resolve_index("END", &five(), F | ParseFlags::NO_CASE, &cfg).unwrap(), 4);
    }

    #[test]
    fn garbage() {
        let err = idx("foo", five()).unwrap_err();
        assert_eq!(err.message(), "expected index but got \"foo\"");
        assert!(idx("end+foo", five()).is_err());
        assert!(idx("", five()).is_err());
    }
}
