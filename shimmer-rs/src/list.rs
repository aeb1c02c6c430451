//! Tcl-style lists: whitespace-separated elements, with `{...}` grouping
//! (nested, taken verbatim), `"..."` grouping, and backslash escapes.

use crate::config::ParseConfig;
use crate::diag::{quoted, Diagnostic, ParseError};
use crate::flags::ParseFlags;

fn is_list_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Decode one backslash sequence; `chars` is positioned after the
/// backslash.
fn backslash(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, out: &mut String) {
    let Some(c) = chars.next() else {
        out.push('\\');
        return;
    };
    match c {
        'a' => out.push('\x07'),
        'b' => out.push('\x08'),
        'f' => out.push('\x0C'),
        'n' => out.push('\n'),
        'r' => out.push('\r'),
        't' => out.push('\t'),
        'v' => out.push('\x0B'),
        '\n' => {
            while chars.next_if(|&c| c == ' ' || c == '\t').is_some() {}
            out.push(' ');
        }
        'x' | 'u' => {
            let max = if c == 'x' { 2 } else { 4 };
            let mut hex = String::new();
            while hex.len() < max {
                match chars.next_if(char::is_ascii_hexdigit) {
                    Some(h) => hex.push(h),
                    None => break,
                }
            }
            match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                Some(decoded) if !hex.is_empty() => out.push(decoded),
                _ => {
                    out.push(c);
                    out.push_str(&hex);
                }
            }
        }
        other => out.push(other),
    }
}

/// Split `text` into list elements.
pub fn split_list(text: &str) -> Result<Vec<String>, Diagnostic> {
    let mut items = Vec::new();
    let mut chars = text.chars().peekable();

    loop {
        while chars.next_if(|&c| is_list_space(c)).is_some() {}
        let Some(&first) = chars.peek() else { break };
        let mut item = String::new();

        match first {
            '{' => {
                chars.next();
                let mut depth = 1usize;
                loop {
                    match chars.next() {
                        None => return Err(Diagnostic::single("unmatched open brace in list")),
                        Some('\\') => {
                            item.push('\\');
                            if let Some(c) = chars.next() {
                                item.push(c);
                            }
                        }
                        Some('{') => {
                            depth += 1;
                            item.push('{');
                        }
                        Some('}') => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                            item.push('}');
                        }
                        Some(c) => item.push(c),
                    }
                }
                if let Some(&c) = chars.peek() {
                    if !is_list_space(c) {
                        return Err(Diagnostic::single(format!(
                            "list element in braces followed by {} instead of space",
                            quoted(&trailing(&mut chars))
                        )));
                    }
                }
            }
            '"' => {
                chars.next();
                loop {
                    match chars.next() {
                        None => return Err(Diagnostic::single("unmatched open quote in list")),
                        Some('"') => break,
                        Some('\\') => backslash(&mut chars, &mut item),
                        Some(c) => item.push(c),
                    }
                }
                if let Some(&c) = chars.peek() {
                    if !is_list_space(c) {
                        return Err(Diagnostic::single(format!(
                            "list element in quotes followed by {} instead of space",
                            quoted(&trailing(&mut chars))
                        )));
                    }
                }
            }
            _ => {
                while let Some(c) = chars.next_if(|&c| !is_list_space(c)) {
                    if c == '\\' {
                        backslash(&mut chars, &mut item);
                    } else {
                        item.push(c);
                    }
                }
            }
        }
        items.push(item);
    }
    Ok(items)
}

fn trailing(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    std::iter::from_fn(|| chars.next_if(|&c| !is_list_space(c))).collect()
}

/// Whether braces in `s` nest properly, ignoring escaped ones.
fn braces_balance(s: &str) -> bool {
    let mut depth = 0i64;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return false;
                }
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Quote one element so that [`split_list`] gives it back unchanged.
pub fn quote_element(s: &str) -> String {
    if s.is_empty() {
        return "{}".to_owned();
    }
    let special = |c: char| is_list_space(c) || matches!(c, '{' | '}' | '[' | ']' | '$' | '"' | '\\' | ';');
    if !s.contains(special) && !s.starts_with('#') {
        return s.to_owned();
    }
    if braces_balance(s) && !s.ends_with('\\') {
        return format!("{{{s}}}");
    }
    let mut out = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0B' => out.push_str("\\v"),
            '\x0C' => out.push_str("\\f"),
            c if special(c) || c == '#' => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Canonical list text: quoted elements joined by single spaces.
pub fn format_list<S: AsRef<str>>(items: &[S]) -> String {
    items.iter().map(|s| quote_element(s.as_ref())).collect::<Vec<_>>().join(" ")
}

/// Split `text` as a list.
pub fn resolve_list(text: &str, flags: ParseFlags, config: &ParseConfig) -> Result<Vec<String>, ParseError> {
    split_list(text).map_err(|d| {
        let headline = format!("unable to convert list string {}", quoted(text));
        config.fail(d.with_headline(headline), flags)
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
