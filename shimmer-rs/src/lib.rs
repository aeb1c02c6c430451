//! Value parsing and coercion for a Tcl-compatible scripting runtime.
//!
//! Every script value is a string; this crate recognises the native form a
//! string stands for.  It covers:
//!
//! - Boolean words, named index words, and radix prefixes ([`lexicon`])
//! - Integers of every width, fixed-point decimals, and floats ([`number`])
//! - Index arithmetic such as `end-1` ([`index`])
//! - Date/times and time spans ([`temporal`])
//! - GUIDs, versions, version ranges, and URIs ([`structured`])
//! - Tcl lists ([`list`])
//! - Best-fit resolution of arbitrary text ([`resolve`])
//!
//! Which representations a call may produce, and how leniently, is chosen
//! with [`ParseFlags`].  Locale, number styles, named constants, and the
//! diagnostic hook live in a [`ParseConfig`] passed by reference.
//!
//! # Quick start
//!
//! ```rust
//! use shimmer::{resolve_numeric, resolve_index, IndexBounds, ParseConfig, ParseFlags, Value};
//!
//! let cfg = ParseConfig::default();
//! assert_eq!(resolve_numeric("0x2A", ParseFlags::DEFAULT, &cfg).unwrap(), Value::Integer(42));
//!
//! let bounds = IndexBounds::for_count(5, true);
//! assert_eq!(resolve_index("end-1", &bounds, ParseFlags::INDEX, &cfg).unwrap(), 3);
//!
//! let err = resolve_numeric("forty-two", ParseFlags::DEFAULT, &cfg).unwrap_err();
//! assert_eq!(err.message(), "expected numeric value but got \"forty-two\"");
//! ```

pub mod config;
pub mod decimal;
pub mod diag;
pub mod flags;
pub mod index;
pub mod lexicon;
pub mod list;
pub mod number;
pub mod resolve;
pub mod structured;
pub mod temporal;
pub mod value;

// Re-exports for convenience.
pub use config::{ConfigError, DateTimeStyle, Locale, NumberStyle, NumericWidth, ParseConfig};
pub use decimal::Decimal;
pub use diag::{Diagnostic, ParseError};
pub use flags::ParseFlags;
pub use index::{resolve_index, IndexBounds, INVALID_INDEX};
pub use list::resolve_list;
pub use number::{
    resolve_boolean, resolve_byte, resolve_decimal, resolve_double, resolve_integer,
    resolve_narrow_integer, resolve_numeric, resolve_single, resolve_unsigned_wide_integer,
    resolve_wide_integer,
};
pub use resolve::{
    resolve_character, resolve_value, resolve_variant, HostNumericResolver, NoHost, VALUE_CANDIDATES,
};
pub use structured::{
    resolve_guid, resolve_uri, resolve_version, resolve_version_range, Version, VersionRange,
};
pub use temporal::{resolve_date_time, resolve_date_time_with_format, resolve_time_span};
pub use value::{Value, ValueError, ValueKind};
