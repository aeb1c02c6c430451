//! Parse configuration: locale profile, number styles, date/time style, named
//! numeric constants, and the diagnostic hook.
//!
//! A [`ParseConfig`] is handed by reference to every resolver.  All of its
//! state sits behind one mutex; each accessor holds the lock only for the
//! read or write itself and hands back an owned copy, so no lock is ever
//! held across a parse attempt.
//!
//! Configuration can also be loaded from a profile script:
//!
//! | Directive | Action |
//! |-----------|--------|
//! | `/set <name>=<value>` or `/set <name> <value>` | set a profile option |
//! | Lines starting with `;` | comment, ignored |
//! | Any other `/command` | silently skipped |
//!
//! Recognised option names are listed on [`ParseConfig::set_option`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::diag::{Diagnostic, ParseError};
use crate::flags::ParseFlags;
use crate::lexicon;

// ── Locale ────────────────────────────────────────────────────────────────────

/// A locale/formatting profile supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub name: String,
    pub decimal_separator: String,
    pub group_separator: String,
    pub positive_sign: String,
    pub negative_sign: String,
    pub positive_infinity: String,
    pub negative_infinity: String,
    pub nan_symbol: String,
    /// `chrono` format strings tried, in order, after the ISO forms.
    pub date_time_formats: Vec<String>,
}

impl Locale {
    /// The culture-neutral profile.
    pub fn invariant() -> Self {
        Self {
            name: "invariant".to_owned(),
            decimal_separator: ".".to_owned(),
            group_separator: ",".to_owned(),
            positive_sign: "+".to_owned(),
            negative_sign: "-".to_owned(),
            positive_infinity: "Infinity".to_owned(),
            negative_infinity: "-Infinity".to_owned(),
            nan_symbol: "NaN".to_owned(),
            date_time_formats: vec!["%m/%d/%Y %H:%M:%S".to_owned(), "%m/%d/%Y".to_owned()],
        }
    }

    /// Look up one of the built-in profiles by name (case-insensitive).
    pub fn named(name: &str) -> Option<Self> {
        let invariant = Self::invariant();
        let locale = match name.to_ascii_lowercase().as_str() {
            "" | "invariant" => invariant,
            "en-us" => Self {
                name: "en-US".to_owned(),
                date_time_formats: vec![
                    "%m/%d/%Y %I:%M:%S %p".to_owned(),
                    "%m/%d/%Y %H:%M:%S".to_owned(),
                    "%m/%d/%Y".to_owned(),
                ],
                ..invariant
            },
            "de-de" => Self {
                name: "de-DE".to_owned(),
                decimal_separator: ",".to_owned(),
                group_separator: ".".to_owned(),
                positive_infinity: "∞".to_owned(),
                negative_infinity: "-∞".to_owned(),
                date_time_formats: vec!["%d.%m.%Y %H:%M:%S".to_owned(), "%d.%m.%Y".to_owned()],
                ..invariant
            },
            "fr-fr" => Self {
                name: "fr-FR".to_owned(),
                decimal_separator: ",".to_owned(),
                group_separator: "\u{a0}".to_owned(),
                positive_infinity: "+Infini".to_owned(),
                negative_infinity: "-Infini".to_owned(),
                date_time_formats: vec!["%d/%m/%Y %H:%M:%S".to_owned(), "%d/%m/%Y".to_owned()],
                ..invariant
            },
            _ => return None,
        };
        Some(locale)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::invariant()
    }
}

// ── Number styles ─────────────────────────────────────────────────────────────

/// Which lexical elements a plain (non-radix) number may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumberStyle {
    pub leading_white: bool,
    pub trailing_white: bool,
    pub leading_sign: bool,
    pub trailing_sign: bool,
    pub parentheses: bool,
    pub decimal_point: bool,
    /// Group separators in the integral part.  Consecutive separators
    /// (`1,234,,555`) are accepted too.
    pub thousands: bool,
    pub exponent: bool,
}

impl NumberStyle {
    pub const NONE: NumberStyle = NumberStyle {
        leading_white: false,
        trailing_white: false,
        leading_sign: false,
        trailing_sign: false,
        parentheses: false,
        decimal_point: false,
        thousands: false,
        exponent: false,
    };

    pub const INTEGER: NumberStyle = NumberStyle {
        leading_white: true,
        trailing_white: true,
        leading_sign: true,
        ..Self::NONE
    };

    pub const NUMBER: NumberStyle = NumberStyle {
        trailing_sign: true,
        decimal_point: true,
        thousands: true,
        ..Self::INTEGER
    };

    pub const FLOAT: NumberStyle = NumberStyle {
        decimal_point: true,
        exponent: true,
        ..Self::INTEGER
    };

    pub const ANY: NumberStyle = NumberStyle {
        leading_white: true,
        trailing_white: true,
        leading_sign: true,
        trailing_sign: true,
        parentheses: true,
        decimal_point: true,
        thousands: true,
        exponent: true,
    };

    /// Parse a style description: comma-separated presets (`none`,
    /// `integer`, `number`, `float`, `any`) and element names, unioned.
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut style = Self::NONE;
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let other = match part.to_ascii_lowercase().as_str() {
                "none" => Self::NONE,
                "integer" => Self::INTEGER,
                "number" => Self::NUMBER,
                "float" => Self::FLOAT,
                "any" => Self::ANY,
                "leading_white" => NumberStyle { leading_white: true, ..Self::NONE },
                "trailing_white" => NumberStyle { trailing_white: true, ..Self::NONE },
                "leading_sign" => NumberStyle { leading_sign: true, ..Self::NONE },
                "trailing_sign" => NumberStyle { trailing_sign: true, ..Self::NONE },
                "parentheses" => NumberStyle { parentheses: true, ..Self::NONE },
                "decimal_point" => NumberStyle { decimal_point: true, ..Self::NONE },
                "thousands" => NumberStyle { thousands: true, ..Self::NONE },
                "exponent" => NumberStyle { exponent: true, ..Self::NONE },
                other => return Err(format!("unknown number style element '{other}'")),
            };
            style = style.union(other);
        }
        Ok(style)
    }

    #[must_use]
    pub fn union(self, o: NumberStyle) -> Self {
        NumberStyle {
            leading_white: self.leading_white || o.leading_white,
            trailing_white: self.trailing_white || o.trailing_white,
            leading_sign: self.leading_sign || o.leading_sign,
            trailing_sign: self.trailing_sign || o.trailing_sign,
            parentheses: self.parentheses || o.parentheses,
            decimal_point: self.decimal_point || o.decimal_point,
            thousands: self.thousands || o.thousands,
            exponent: self.exponent || o.exponent,
        }
    }
}

/// Numeric widths that carry their own [`NumberStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericWidth {
    Byte,
    NarrowInteger,
    Integer,
    WideInteger,
    Decimal,
    Single,
    Double,
}

impl NumericWidth {
    pub const COUNT: usize = 7;

    pub const ALL: [NumericWidth; Self::COUNT] = [
        NumericWidth::Byte,
        NumericWidth::NarrowInteger,
        NumericWidth::Integer,
        NumericWidth::WideInteger,
        NumericWidth::Decimal,
        NumericWidth::Single,
        NumericWidth::Double,
    ];

    /// Name used in profile option keys (`<name>_style`).
    pub fn name(self) -> &'static str {
        match self {
            NumericWidth::Byte => "byte",
            NumericWidth::NarrowInteger => "narrow_integer",
            NumericWidth::Integer => "integer",
            NumericWidth::WideInteger => "wide_integer",
            NumericWidth::Decimal => "decimal",
            NumericWidth::Single => "single",
            NumericWidth::Double => "double",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.name() == name)
    }

    fn slot(self) -> usize {
        self as usize
    }

    fn default_style(self) -> NumberStyle {
        match self {
            NumericWidth::Byte
            | NumericWidth::NarrowInteger
            | NumericWidth::Integer
            | NumericWidth::WideInteger => NumberStyle::INTEGER,
            NumericWidth::Decimal | NumericWidth::Single | NumericWidth::Double => NumberStyle {
                thousands: true,
                ..NumberStyle::FLOAT
            },
        }
    }
}

// ── Date/time style ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeStyle {
    /// Ignore whitespace around the date/time text.
    pub allow_white: bool,
    /// Convert values carrying an explicit UTC offset to UTC; otherwise the
    /// offset is dropped and the local wall-clock time is kept.
    pub adjust_to_utc: bool,
}

impl Default for DateTimeStyle {
    fn default() -> Self {
        Self { allow_white: true, adjust_to_utc: true }
    }
}

// ── ConfigError ───────────────────────────────────────────────────────────────

/// A non-fatal error encountered while loading a profile script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ConfigError {
    pub line: usize,
    pub message: String,
}

// ── ParseConfig ───────────────────────────────────────────────────────────────

/// Callback that may rewrite (or just observe) every diagnostic before it is
/// returned to a caller.
pub type DiagnosticHook = Arc<dyn Fn(Diagnostic) -> Diagnostic + Send + Sync>;

struct ConfigState {
    locale: Locale,
    styles: [NumberStyle; NumericWidth::COUNT],
    date_time_style: DateTimeStyle,
    single_constants: HashMap<String, f32>,
    double_constants: HashMap<String, f64>,
    hook: Option<DiagnosticHook>,
}

impl ConfigState {
    fn new(locale: Locale) -> Self {
        Self {
            locale,
            styles: NumericWidth::ALL.map(NumericWidth::default_style),
            date_time_style: DateTimeStyle::default(),
            single_constants: HashMap::new(),
            double_constants: HashMap::new(),
            hook: None,
        }
    }

    /// Fill the named-constant tables on first use.  A populated table is
    /// left alone.
    fn ensure_constants(&mut self) {
        if self.single_constants.is_empty() {
            for (name, value) in [
                ("Inf", f32::INFINITY),
                ("+Inf", f32::INFINITY),
                ("-Inf", f32::NEG_INFINITY),
                ("NaN", f32::NAN),
            ] {
                self.single_constants.insert(name.to_lowercase(), value);
            }
        }
        if self.double_constants.is_empty() {
            for (name, value) in [
                ("Inf", f64::INFINITY),
                ("+Inf", f64::INFINITY),
                ("-Inf", f64::NEG_INFINITY),
                ("NaN", f64::NAN),
            ] {
                self.double_constants.insert(name.to_lowercase(), value);
            }
        }
    }

    /// The locale's own spellings of the special values.
    fn locale_constant(&self, name: &str) -> Option<f64> {
        let l = &self.locale;
        if name.eq_ignore_ascii_case(&l.positive_infinity) {
            Some(f64::INFINITY)
        } else if name.eq_ignore_ascii_case(&l.negative_infinity) {
            Some(f64::NEG_INFINITY)
        } else if name.eq_ignore_ascii_case(&l.nan_symbol) {
            Some(f64::NAN)
        } else {
            None
        }
    }
}

/// Shared parse configuration.
pub struct ParseConfig {
    state: Mutex<ConfigState>,
}

static GLOBAL: Lazy<ParseConfig> = Lazy::new(ParseConfig::default);

impl Default for ParseConfig {
    fn default() -> Self {
        Self::new(Locale::invariant())
    }
}

impl std::fmt::Debug for ParseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ParseConfig")
            .field("locale", &state.locale.name)
            .field("date_time_style", &state.date_time_style)
            .field("hook", &state.hook.is_some())
            .finish()
    }
}

impl ParseConfig {
    pub fn new(locale: Locale) -> Self {
        Self { state: Mutex::new(ConfigState::new(locale)) }
    }

    /// The process-wide configuration, created on first use.
    pub fn global() -> &'static ParseConfig {
        &GLOBAL
    }

    // -- Locale ---------------------------------------------------------------

    /// A copy of the active locale profile.
    pub fn locale(&self) -> Locale {
        self.state.lock().locale.clone()
    }

    pub fn set_locale(&self, locale: Locale) {
        tracing::debug!(locale = %locale.name, "switching parse locale");
        self.state.lock().locale = locale;
    }

    pub fn decimal_separator(&self) -> String {
        self.state.lock().locale.decimal_separator.clone()
    }

    // -- Styles ---------------------------------------------------------------

    pub fn number_style(&self, width: NumericWidth) -> NumberStyle {
        self.state.lock().styles[width.slot()]
    }

    pub fn set_number_style(&self, width: NumericWidth, style: NumberStyle) {
        tracing::debug!(width = width.name(), ?style, "changing number style");
        self.state.lock().styles[width.slot()] = style;
    }

    pub fn date_time_style(&self) -> DateTimeStyle {
        self.state.lock().date_time_style
    }

    pub fn set_date_time_style(&self, style: DateTimeStyle) {
        tracing::debug!(?style, "changing date/time style");
        self.state.lock().date_time_style = style;
    }

    // -- Named constants ------------------------------------------------------

    /// Look up a named double constant (case-insensitive), including the
    /// locale's own infinity and NaN symbols.
    pub fn named_double(&self, name: &str) -> Option<f64> {
        let mut state = self.state.lock();
        state.ensure_constants();
        state
            .double_constants
            .get(&name.to_lowercase())
            .copied()
            .or_else(|| state.locale_constant(name))
    }

    /// Look up a named single constant (case-insensitive).
    pub fn named_single(&self, name: &str) -> Option<f32> {
        let mut state = self.state.lock();
        state.ensure_constants();
        state
            .single_constants
            .get(&name.to_lowercase())
            .copied()
            .or_else(|| state.locale_constant(name).map(|v| v as f32))
    }

    /// Add a named double constant.  Existing names keep their value; returns
    /// `false` when the name was already defined.
    pub fn define_named_double(&self, name: &str, value: f64) -> bool {
        let mut state = self.state.lock();
        state.ensure_constants();
        let key = name.to_lowercase();
        if state.double_constants.contains_key(&key) {
            return false;
        }
        tracing::debug!(name, value, "defining named double constant");
        state.double_constants.insert(key, value);
        true
    }

    // -- Diagnostic hook ------------------------------------------------------

    /// Register (or replace) the diagnostic hook.
    pub fn set_diagnostic_hook<F>(&self, hook: F)
    where
        F: Fn(Diagnostic) -> Diagnostic + Send + Sync + 'static,
    {
        tracing::debug!("registering diagnostic hook");
        self.state.lock().hook = Some(Arc::new(hook));
    }

    pub fn clear_diagnostic_hook(&self) {
        self.state.lock().hook = None;
    }

    pub fn has_diagnostic_hook(&self) -> bool {
        self.state.lock().hook.is_some()
    }

    /// Turn a failed parse's diagnostic into the error handed to the caller,
    /// passing it through the hook first.
    pub(crate) fn fail(&self, diagnostic: Diagnostic, flags: ParseFlags) -> ParseError {
        // The hook runs without the lock so it may itself consult the config.
        let hook = self.state.lock().hook.clone();
        let diagnostic = match hook {
            Some(hook) => hook(diagnostic),
            None => diagnostic,
        };
        ParseError::new(diagnostic, flags)
    }

    // -- Profile scripts ------------------------------------------------------

    /// Build a configuration from a profile script.
    ///
    /// Returns the config and a list of errors on recognised lines; unknown
    /// directives are skipped.
    pub fn load_str(s: &str) -> (Self, Vec<ConfigError>) {
        let config = ParseConfig::default();
        let errors = config.apply_str(s);
        (config, errors)
    }

    /// Read and apply a profile script from disk.
    pub fn load_file(path: &Path) -> std::io::Result<(Self, Vec<ConfigError>)> {
        let s = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading parse profile");
        Ok(Self::load_str(&s))
    }

    /// Apply a profile script to this configuration.
    pub fn apply_str(&self, s: &str) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (i, raw) in s.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let Some(rest) = line.strip_prefix('/') else { continue };

            let (cmd, args_str) = rest
                .split_once(|c: char| c.is_ascii_whitespace())
                .unwrap_or((rest, ""));

            if cmd == "set" {
                let tokens = split_args(args_str.trim());
                let result = parse_set(&tokens)
                    .and_then(|(name, value)| self.set_option(&name, &value));
                if let Err(message) = result {
                    errors.push(ConfigError { line: lineno, message });
                }
            }
        }

        errors
    }

    /// Set one profile option by name.
    ///
    /// | Name | Value |
    /// |------|-------|
    /// | `locale` | built-in profile name (`invariant`, `en-US`, `de-DE`, `fr-FR`) |
    /// | `decimal_separator`, `group_separator` | separator text |
    /// | `positive_sign`, `negative_sign` | sign text |
    /// | `infinity`, `negative_infinity`, `nan` | special-value symbols |
    /// | `date_format` | `chrono` format appended to the locale's list |
    /// | `<width>_style` | a [`NumberStyle::parse`] description |
    /// | `date_time_white`, `adjust_to_utc` | boolean word |
    pub fn set_option(&self, name: &str, value: &str) -> Result<(), String> {
        if let Some(width) = name.strip_suffix("_style").and_then(NumericWidth::from_name) {
            let style = NumberStyle::parse(value)?;
            self.set_number_style(width, style);
            return Ok(());
        }

        let flag = || {
            lexicon::recognize_boolean(value, false)
                .map(|(b, _)| b)
                .ok_or_else(|| format!("expected boolean value for '{name}' but got \"{value}\""))
        };

        match name {
            "locale" => {
                let locale =
                    Locale::named(value).ok_or_else(|| format!("unknown locale '{value}'"))?;
                self.set_locale(locale);
            }
            "date_time_white" => {
                let allow_white = flag()?;
                let style = DateTimeStyle { allow_white, ..self.date_time_style() };
                self.set_date_time_style(style);
            }
            "adjust_to_utc" => {
                let adjust_to_utc = flag()?;
                let style = DateTimeStyle { adjust_to_utc, ..self.date_time_style() };
                self.set_date_time_style(style);
            }
            _ => {
                if value.is_empty() {
                    return Err(format!("'{name}' cannot be empty"));
                }
                let mut state = self.state.lock();
                let locale = &mut state.locale;
                let slot = match name {
                    "decimal_separator" => &mut locale.decimal_separator,
                    "group_separator" => &mut locale.group_separator,
                    "positive_sign" => &mut locale.positive_sign,
                    "negative_sign" => &mut locale.negative_sign,
                    "infinity" => &mut locale.positive_infinity,
                    "negative_infinity" => &mut locale.negative_infinity,
                    "nan" => &mut locale.nan_symbol,
                    "date_format" => {
                        locale.date_time_formats.push(value.to_owned());
                        return Ok(());
                    }
                    _ => return Err(format!("unknown option '{name}'")),
                };
                *slot = value.to_owned();
                tracing::debug!(name, value, "profile option set");
            }
        }
        Ok(())
    }
}

// ── Argument tokenizer ────────────────────────────────────────────────────────

/// Split `s` into whitespace-delimited tokens, honouring double-quoted strings
/// and `\"` escapes within them.
fn split_args(s: &str) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if !in_quotes => {
                in_quotes = true;
                quoted = true;
            }
            '"' if in_quotes => in_quotes = false,
            '\\' if in_quotes => {
                if let Some(escaped) = chars.next() {
                    cur.push(escaped);
                }
            }
            c if c.is_ascii_whitespace() && !in_quotes => {
                if !cur.is_empty() || quoted {
                    args.push(std::mem::take(&mut cur));
                    quoted = false;
                }
            }
            c => cur.push(c),
        }
    }
    if !cur.is_empty() || quoted {
        args.push(cur);
    }
    args
}

// ── /set ─────────────────────────────────────────────────────────────────────

/// Parse `/set <name>=<value>` or `/set <name> <value>`.
fn parse_set(tokens: &[String]) -> Result<(String, String), String> {
    if tokens.is_empty() {
        return Err("/set: requires an argument".into());
    }

    let (name, value) = if let Some(eq) = tokens[0].find('=') {
        (tokens[0][..eq].to_owned(), tokens[0][eq + 1..].to_owned())
    } else if tokens.len() >= 2 {
        (tokens[0].clone(), tokens[1..].join(" "))
    } else {
        return Err(format!("/set: missing value for '{}'", tokens[0]));
    };

    if name.is_empty() {
        return Err("/set: option name cannot be empty".into());
    }

    Ok((name, value))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
