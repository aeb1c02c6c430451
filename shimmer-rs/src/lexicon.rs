//! Fixed-vocabulary recognizers: boolean words, named index words, and radix
//! prefixes.

use crate::flags::ParseFlags;

// ── Booleans ──────────────────────────────────────────────────────────────────

/// `(spelling, value, is_integer_form)`, in the order they are checked.
///
/// The order is historical; `on`/`off` are deliberately last.
const BOOLEAN_WORDS: &[(&str, bool, bool)] = &[
    ("0", false, true),
    ("1", true, true),
    ("true", true, false),
    ("false", false, false),
    ("yes", true, false),
    ("no", false, false),
    ("enable", true, false),
    ("disable", false, false),
    ("enabled", true, false),
    ("disabled", false, false),
    ("on", true, false),
    ("off", false, false),
];

/// Recognise a boolean spelling.
///
/// Returns `(value, was_integer_form)`; `was_integer_form` is `true` for
/// `"0"` and `"1"`.  Candidates of the wrong length are skipped before any
/// character comparison.
pub fn recognize_boolean(text: &str, case_sensitive: bool) -> Option<(bool, bool)> {
    BOOLEAN_WORDS
        .iter()
        .filter(|(word, _, _)| word.len() == text.len())
        .find(|(word, _, _)| {
            if case_sensitive {
                *word == text
            } else {
                word.eq_ignore_ascii_case(text)
            }
        })
        .map(|&(_, value, integer_form)| (value, integer_form))
}

/// The boolean lexicon in check order, for callers that list accepted words.
pub fn boolean_words() -> impl Iterator<Item = &'static str> {
    BOOLEAN_WORDS.iter().map(|(word, _, _)| *word)
}

// ── Named indexes ─────────────────────────────────────────────────────────────

/// A symbolic index keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedIndex {
    None,
    Start,
    End,
    Count,
}

impl NamedIndex {
    pub fn as_str(self) -> &'static str {
        match self {
            NamedIndex::None => "none",
            NamedIndex::Start => "start",
            NamedIndex::End => "end",
            NamedIndex::Count => "count",
        }
    }
}

const NAMED_INDEXES: [NamedIndex; 4] =
    [NamedIndex::None, NamedIndex::Start, NamedIndex::End, NamedIndex::Count];

/// Recognise `none`, `start`, `end`, or `count`.  Matching is exact unless
/// `no_case` is set.
pub fn recognize_named_index(text: &str, no_case: bool) -> Option<NamedIndex> {
    NAMED_INDEXES.into_iter().find(|n| {
        let word = n.as_str();
        word.len() == text.len() && if no_case { word.eq_ignore_ascii_case(text) } else { word == text }
    })
}

// ── Radix prefixes ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    /// The flag that permits this radix.
    pub fn flag(self) -> ParseFlags {
        match self {
            Radix::Binary => ParseFlags::BINARY_RADIX,
            Radix::Octal => ParseFlags::OCTAL_RADIX,
            Radix::Decimal => ParseFlags::DECIMAL_RADIX,
            Radix::Hexadecimal => ParseFlags::HEXADECIMAL_RADIX,
        }
    }

    /// Lower-case prefix letter.
    pub fn letter(self) -> char {
        match self {
            Radix::Binary => 'b',
            Radix::Octal => 'o',
            Radix::Decimal => 'd',
            Radix::Hexadecimal => 'x',
        }
    }

    fn from_letter(c: u8) -> Option<Self> {
        match c {
            b'b' | b'B' => Some(Radix::Binary),
            b'o' | b'O' => Some(Radix::Octal),
            b'd' | b'D' => Some(Radix::Decimal),
            b'x' | b'X' => Some(Radix::Hexadecimal),
            _ => None,
        }
    }
}

/// A recognised radix-prefixed literal, split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadixLiteral<'a> {
    pub negative: bool,
    pub radix: Radix,
    /// Everything after the two-character prefix (not yet validated).
    pub digits: &'a str,
}

/// Recognise `[sign]0<letter><digits>` where the radix is permitted by
/// `flags`.  A sign in front of the prefix is only accepted when
/// [`ParseFlags::NO_RADIX_SIGN`] is clear.
pub fn recognize_radix(text: &str, flags: ParseFlags) -> Option<RadixLiteral<'_>> {
    let (negative, rest) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if rest.len() != text.len() && flags.has_all(ParseFlags::NO_RADIX_SIGN) {
        return None;
    }
    let bytes = rest.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = Radix::from_letter(bytes[1])?;
    if !flags.has_all(radix.flag()) {
        return None;
    }
    Some(RadixLiteral { negative, radix, digits: &rest[2..] })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_digits_are_integer_form() {
        assert_eq!(recognize_boolean("0", true), Some((false, true)));
        assert_eq!(recognize_boolean("1", true), Some((true, true)));
    }

    #[test]
    fn boolean_word_pairs() {
        for (w, b) in [
            ("true", true),
            ("false", false),
            ("yes", true),
            ("no", false),
            ("enable", true),
            ("disable", false),
            ("enabled", true),
            ("disabled", false),
            ("on", true),
            ("off", false),
        ] {
            assert_eq!(recognize_boolean(w, true), Some((b, false)), "{w}");
        }
    }

    #[test]
    fn boolean_case_sensitivity() {
        assert_eq!(recognize_boolean("TRUE", true), None);
        assert_eq!(recognize_boolean("TRUE", false), Some((true, false)));
        assert_eq!(recognize_boolean("Off", false), Some((false, false)));
    }

    #[test]
    fn boolean_rejects_others() {
        for w in ["", "2", "t", "y", "tru", "truee", "01", " true", "o"] {
            assert_eq!(recognize_boolean(w, false), None, "{w:?}");
        }
    }

    #[test]
    fn boolean_check_order() {
        let words: Vec<&str> = boolean_words().collect();
        assert_eq!(words.first(), Some(&"0"));
        assert_eq!(&words[words.len() - 2..], ["on", "off"]);
    }

    #[test]
    fn named_index() {
        assert_eq!(recognize_named_index("end", false), Some(NamedIndex::End));
        assert_eq!(recognize_named_index("END", false), None);
        assert_eq!(recognize_named_index("END", true), Some(NamedIndex::End));
        assert_eq!(recognize_named_index("count", false), Some(NamedIndex::Count));
        assert_eq!(recognize_named_index("none", false), Some(NamedIndex::None));
        assert_eq!(recognize_named_index("starts", false), None);
    }

    #[test]
    fn radix_prefixes() {
        let all = ParseFlags::RADIX_MASK;
        let lit = recognize_radix("0x1F", all).unwrap();
        assert_eq!((lit.negative, lit.radix, lit.digits), (false, Radix::Hexadecimal, "1F"));
        let lit = recognize_radix("-0B101", all).unwrap();
        assert_eq!((lit.negative, lit.radix, lit.digits), (true, Radix::Binary, "101"));
        assert_eq!(recognize_radix("+0o17", all).unwrap().radix, Radix::Octal);
        assert_eq!(recognize_radix("0d99", all).unwrap().radix, Radix::Decimal);
    }

    #[test]
    fn radix_not_recognized() {
        let all = ParseFlags::RADIX_MASK;
        assert!(recognize_radix("123", all).is_none());
        assert!(recognize_radix("0", all).is_none());
        assert!(recognize_radix("0z12", all).is_none());
        assert!(recognize_radix("", all).is_none());
        assert!(recognize_radix("0x10", ParseFlags::BINARY_RADIX).is_none());
    }

    #[test]
    fn radix_sign_prohibition() {
        let f = ParseFlags::RADIX_MASK | ParseFlags::NO_RADIX_SIGN;
        assert!(recognize_radix("-0x10", f).is_none());
        assert!(recognize_radix("0x10", f).is_some());
    }
}
