//! Message cleanup and string-literal emission for rewritten calls.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static INTERPOLATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // `${expr}` markers inside template literals. Nested braces are not supported.
    Regex::new(r"\$\{[^}]+\}").unwrap()
});

/// Quote character used for emitted string literals and the inserted import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Double,
    Single,
}

impl QuoteStyle {
    pub fn as_char(&self) -> char {
        match self {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }

    /// Wrap `text` in this quote style, escaping bare occurrences of the quote.
    pub fn literal(&self, text: &str) -> String {
        let quote = self.as_char();
        let mut out = String::with_capacity(text.len() + 2);
        out.push(quote);

        let mut escaped = false;
        for c in text.chars() {
            if c == quote && !escaped {
                out.push('\\');
            }
            escaped = c == '\\' && !escaped;
            out.push(c);
        }

        out.push(quote);
        out
    }
}

pub fn has_interpolation(message: &str) -> bool {
    message.contains("${")
}

/// Remove every `${...}` marker together with its expression.
///
/// Lossy: the interpolated value is dropped from the message, not carried
/// over as structured data. The result is trimmed only when a marker was
/// present, so plain messages pass through untouched.
pub fn strip_interpolation(message: &str) -> String {
    if !has_interpolation(message) {
        return message.to_string();
    }
    INTERPOLATION_PATTERN
        .replace_all(message, "")
        .trim()
        .to_string()
}

/// Message cleanup for calls that carry an error value: drop square brackets
/// (the `[Component]` prefixes common in console output) and trim.
pub fn strip_brackets(message: &str) -> String {
    message.replace(['[', ']'], "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_interpolation_removes_markers() {
        assert_eq!(strip_interpolation("Low disk: ${diskPct}%"), "Low disk: %");
        assert_eq!(
            strip_interpolation("${user.name} logged in at ${time}"),
            "logged in at"
        );
    }

    #[test]
    fn strip_interpolation_leaves_plain_text() {
        assert_eq!(strip_interpolation("  spaced  "), "  spaced  ");
        assert_eq!(strip_interpolation("costs $5 {approx}"), "costs $5 {approx}");
    }

    #[test]
    fn strip_brackets_cleans_prefix() {
        assert_eq!(strip_brackets("[Auth] Login failed:"), "Auth Login failed:");
        assert_eq!(strip_brackets(" Failed: "), "Failed:");
    }

    #[test]
    fn double_literal_escapes_inner_quotes() {
        assert_eq!(QuoteStyle::Double.literal("plain"), "\"plain\"");
        assert_eq!(
            QuoteStyle::Double.literal("say \"hi\""),
            "\"say \\\"hi\\\"\""
        );
    }

    #[test]
    fn literal_keeps_existing_escapes() {
        assert_eq!(QuoteStyle::Double.literal(r#"a \" b"#), r#""a \" b""#);
        assert_eq!(QuoteStyle::Single.literal("it's"), r"'it\'s'");
        assert_eq!(QuoteStyle::Single.literal("say \"hi\""), "'say \"hi\"'");
    }
}
