//! Parse flags: which representations a single parse call may produce, and
//! the modifiers that change how each representation is recognised.
//!
//! Flags are a plain bitset.  They are combined with `|` and tested with
//! [`ParseFlags::has_all`] / [`ParseFlags::has_any`]; a parse call receives
//! them by value and never changes them.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// An immutable set of parse flags.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParseFlags(u64);

impl ParseFlags {
    pub const NONE: ParseFlags = ParseFlags(0);

    // ── Candidate representations ─────────────────────────────────────────────

    pub const BOOLEAN: ParseFlags = ParseFlags(1 << 0);
    pub const BYTE: ParseFlags = ParseFlags(1 << 1);
    pub const NARROW_INTEGER: ParseFlags = ParseFlags(1 << 2);
    pub const CHARACTER: ParseFlags = ParseFlags(1 << 3);
    pub const INTEGER: ParseFlags = ParseFlags(1 << 4);
    pub const WIDE_INTEGER: ParseFlags = ParseFlags(1 << 5);
    pub const DECIMAL: ParseFlags = ParseFlags(1 << 6);
    pub const SINGLE: ParseFlags = ParseFlags(1 << 7);
    pub const DOUBLE: ParseFlags = ParseFlags(1 << 8);
    pub const DATE_TIME: ParseFlags = ParseFlags(1 << 9);
    pub const TIME_SPAN: ParseFlags = ParseFlags(1 << 10);
    pub const GUID: ParseFlags = ParseFlags(1 << 11);
    pub const LIST: ParseFlags = ParseFlags(1 << 12);
    pub const OBJECT: ParseFlags = ParseFlags(1 << 13);

    // ── Modifiers ─────────────────────────────────────────────────────────────

    /// Disallow every fallback conversion.
    pub const STRICT: ParseFlags = ParseFlags(1 << 20);
    /// Case-insensitive matching of words (booleans, named indexes).
    pub const NO_CASE: ParseFlags = ParseFlags(1 << 21);
    /// Booleans may be spelled `0` / `1`.
    pub const ALLOW_INTEGER: ParseFlags = ParseFlags(1 << 22);
    /// Keep unsigned wide values above `i64::MAX` instead of wrapping them.
    pub const WIDEN_TO_UNSIGNED: ParseFlags = ParseFlags(1 << 23);
    pub const SIGNED: ParseFlags = ParseFlags(1 << 24);
    pub const UNSIGNED: ParseFlags = ParseFlags(1 << 25);
    pub const BINARY_RADIX: ParseFlags = ParseFlags(1 << 26);
    pub const OCTAL_RADIX: ParseFlags = ParseFlags(1 << 27);
    pub const DECIMAL_RADIX: ParseFlags = ParseFlags(1 << 28);
    pub const HEXADECIMAL_RADIX: ParseFlags = ParseFlags(1 << 29);
    /// Reject a leading sign in front of a radix prefix (`-0x10`).
    pub const NO_RADIX_SIGN: ParseFlags = ParseFlags(1 << 30);
    /// Enable the `none` / `start` / `end` / `count` index keywords.
    pub const NAMED_INDEX: ParseFlags = ParseFlags(1 << 31);
    /// Treat the second term of an index expression as an offset, exempt
    /// from the per-term bounds check.
    pub const WITH_OFFSET: ParseFlags = ParseFlags(1 << 32);
    /// Render every collected diagnostic instead of the most specific one.
    pub const VERBOSE: ParseFlags = ParseFlags(1 << 33);
    pub const ALLOW_OPEN_LOW: ParseFlags = ParseFlags(1 << 34);
    pub const ALLOW_OPEN_HIGH: ParseFlags = ParseFlags(1 << 35);
    pub const ALLOW_EMPTY: ParseFlags = ParseFlags(1 << 36);

    // ── Masks ─────────────────────────────────────────────────────────────────

    pub const SIGNEDNESS_MASK: ParseFlags = ParseFlags(Self::SIGNED.0 | Self::UNSIGNED.0);
    pub const RADIX_MASK: ParseFlags = ParseFlags(
        Self::BINARY_RADIX.0 | Self::OCTAL_RADIX.0 | Self::DECIMAL_RADIX.0 | Self::HEXADECIMAL_RADIX.0,
    );
    pub const INTEGRAL_MASK: ParseFlags = ParseFlags(
        Self::BYTE.0 | Self::NARROW_INTEGER.0 | Self::INTEGER.0 | Self::WIDE_INTEGER.0,
    );
    pub const FLOATING_MASK: ParseFlags =
        ParseFlags(Self::DECIMAL.0 | Self::SINGLE.0 | Self::DOUBLE.0);
    pub const NUMERIC_MASK: ParseFlags = ParseFlags(Self::INTEGRAL_MASK.0 | Self::FLOATING_MASK.0);
    pub const TEMPORAL_MASK: ParseFlags = ParseFlags(Self::DATE_TIME.0 | Self::TIME_SPAN.0);

    /// Flags suitable for most callers: every numeric and temporal
    /// representation, booleans, both signedness and every radix prefix,
    /// with case-insensitive words.
    pub const DEFAULT: ParseFlags = ParseFlags(
        Self::BOOLEAN.0
            | Self::NUMERIC_MASK.0
            | Self::TEMPORAL_MASK.0
            | Self::GUID.0
            | Self::NO_CASE.0
            | Self::ALLOW_INTEGER.0
            | Self::SIGNEDNESS_MASK.0
            | Self::RADIX_MASK.0,
    );

    /// Flags for index parsing: named keywords, integers with radix prefixes.
    pub const INDEX: ParseFlags =
        ParseFlags(Self::NAMED_INDEX.0 | Self::SIGNEDNESS_MASK.0 | Self::RADIX_MASK.0);

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn from_bits(bits: u64) -> Self {
        ParseFlags(bits)
    }

    /// `true` if every bit of `other` is set.
    pub const fn has_all(self, other: ParseFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// `true` if at least one bit of `other` is set.
    pub const fn has_any(self, other: ParseFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// A copy with the bits of `other` added.
    #[must_use]
    pub const fn with(self, other: ParseFlags) -> Self {
        ParseFlags(self.0 | other.0)
    }

    /// A copy with the bits of `other` removed.
    #[must_use]
    pub const fn without(self, other: ParseFlags) -> Self {
        ParseFlags(self.0 & !other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ParseFlags {
    type Output = ParseFlags;
    fn bitor(self, rhs: ParseFlags) -> ParseFlags {
        ParseFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ParseFlags {
    fn bitor_assign(&mut self, rhs: ParseFlags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ParseFlags {
    type Output = ParseFlags;
    fn bitand(self, rhs: ParseFlags) -> ParseFlags {
        ParseFlags(self.0 & rhs.0)
    }
}

impl Not for ParseFlags {
    type Output = ParseFlags;
    fn not(self) -> ParseFlags {
        ParseFlags(!self.0)
    }
}

const NAMES: &[(ParseFlags, &str)] = &[
    (ParseFlags::BOOLEAN, "Boolean"),
    (ParseFlags::BYTE, "Byte"),
    (ParseFlags::NARROW_INTEGER, "NarrowInteger"),
    (ParseFlags::CHARACTER, "Character"),
    (ParseFlags::INTEGER, "Integer"),
    (ParseFlags::WIDE_INTEGER, "WideInteger"),
    (ParseFlags::DECIMAL, "Decimal"),
    (ParseFlags::SINGLE, "Single"),
    (ParseFlags::DOUBLE, "Double"),
    (ParseFlags::DATE_TIME, "DateTime"),
    (ParseFlags::TIME_SPAN, "TimeSpan"),
    (ParseFlags::GUID, "Guid"),
    (ParseFlags::LIST, "List"),
    (ParseFlags::OBJECT, "Object"),
    (ParseFlags::STRICT, "Strict"),
    (ParseFlags::NO_CASE, "NoCase"),
    (ParseFlags::ALLOW_INTEGER, "AllowInteger"),
    (ParseFlags::WIDEN_TO_UNSIGNED, "WidenToUnsigned"),
    (ParseFlags::SIGNED, "Signed"),
    (ParseFlags::UNSIGNED, "Unsigned"),
    (ParseFlags::BINARY_RADIX, "BinaryRadix"),
    (ParseFlags::OCTAL_RADIX, "OctalRadix"),
    (ParseFlags::DECIMAL_RADIX, "DecimalRadix"),
    (ParseFlags::HEXADECIMAL_RADIX, "HexadecimalRadix"),
    (ParseFlags::NO_RADIX_SIGN, "NoRadixSign"),
    (ParseFlags::NAMED_INDEX, "NamedIndex"),
    (ParseFlags::WITH_OFFSET, "WithOffset"),
    (ParseFlags::VERBOSE, "Verbose"),
    (ParseFlags::ALLOW_OPEN_LOW, "AllowOpenLow"),
    (ParseFlags::ALLOW_OPEN_HIGH, "AllowOpenHigh"),
    (ParseFlags::ALLOW_EMPTY, "AllowEmpty"),
];

impl fmt::Debug for ParseFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.has_all(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join(" | "))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
