//! Failure reporting for parse calls.
//!
//! A parse call that tries several representations collects one message per
//! failed attempt into a [`Diagnostic`].  When the call gives up, the
//! diagnostic is turned into a [`ParseError`] whose message is either the
//! whole list (under [`ParseFlags::VERBOSE`]) or only the most specific
//! entry.

use std::fmt;

use crate::flags::ParseFlags;

/// Ordered, de-duplicated list of failure messages for one parse call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostic {
    messages: Vec<String>,
    /// Index into `messages` of the entry to show in non-verbose mode.
    headline: Option<usize>,
}

impl Diagnostic {
    pub fn new() -> Self {
        Self::default()
    }

    /// A diagnostic holding one message.
    pub fn single(message: impl Into<String>) -> Self {
        let mut d = Self::new();
        d.push(message);
        d
    }

    /// Append a message unless an identical one is already present.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.messages.contains(&message) {
            self.messages.push(message);
        }
    }

    /// Append every message of `other`, keeping order and skipping duplicates.
    pub fn merge(&mut self, other: Diagnostic) {
        for message in other.messages {
            self.push(message);
        }
    }

    /// Record `message` (if new) and mark it as the most specific entry.
    pub fn set_headline(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.push(message.clone());
        self.headline = self.messages.iter().position(|m| *m == message);
    }

    /// Builder form of [`Diagnostic::set_headline`].
    #[must_use]
    pub fn with_headline(mut self, message: impl Into<String>) -> Self {
        self.set_headline(message);
        self
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The entry shown in non-verbose mode: the headline when one was set,
    /// otherwise the last message recorded.
    pub fn most_specific(&self) -> Option<&str> {
        match self.headline {
            Some(i) => self.messages.get(i).map(String::as_str),
            None => self.messages.last().map(String::as_str),
        }
    }

    /// Render for display.  Verbose output lists every message, one per line.
    pub fn render(&self, verbose: bool) -> String {
        if verbose {
            self.messages.join("\n")
        } else {
            self.most_specific().unwrap_or("unknown parse failure").to_owned()
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// The single failure type returned by every resolver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    diagnostic: Diagnostic,
}

impl ParseError {
    /// Render `diagnostic` according to `flags`.
    pub fn new(diagnostic: Diagnostic, flags: ParseFlags) -> Self {
        let message = diagnostic.render(flags.has_all(ParseFlags::VERBOSE));
        Self { message, diagnostic }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        self.diagnostic
    }
}

/// Quote `text` the way failure messages show offending input.
pub(crate) fn quoted(text: &str) -> String {
    format!("\"{text}\"")
}

/// `expected <what> but got "<text>"`.
pub(crate) fn expected(what: &str, text: &str) -> String {
    format!("expected {what} but got {}", quoted(text))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_deduplicates_and_keeps_order() {
        let mut d = Diagnostic::new();
        d.push("a");
        d.push("b");
        d.push("a");
        assert_eq!(d.messages(), ["a", "b"]);
    }

    #[test]
    fn merge_keeps_order() {
        let mut a = Diagnostic::single("one");
        let mut b = Diagnostic::single("two");
        b.push("one");
        b.push("three");
        a.merge(b);
        assert_eq!(a.messages(), ["one", "two", "three"]);
    }

    #[test]
    fn most_specific_defaults_to_last() {
        let mut d = Diagnostic::new();
        d.push("first");
        d.push("second");
        assert_eq!(d.most_specific(), Some("second"));
    }

    #[test]
    fn headline_wins() {
        let mut d = Diagnostic::new();
        d.push("first");
        d.push("second");
        d.set_headline("first");
        assert_eq!(d.most_specific(), Some("first"));
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn verbose_rendering() {
        let d = Diagnostic::single("x").with_headline("y");
        assert_eq!(ParseError::new(d.clone(), ParseFlags::NONE).to_string(), "y");
        assert_eq!(ParseError::new(d, ParseFlags::VERBOSE).to_string(), "x\ny");
    }

    #[test]
    fn empty_renders_placeholder() {
        assert_eq!(Diagnostic::new().render(false), "unknown parse failure");
    }

    #[test]
    fn expected_message_shape() {
        assert_eq!(expected("wide integer", "12x4"), "expected wide integer but got \"12x4\"");
    }
}
