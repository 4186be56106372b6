//! Markdown character escaping.
//!
//! [`escape`] makes plain text safe to drop into Markdown output: text that came
//! out of an HTML text node such as `<p>**Not Bold**</p>` must end up as
//! `\*\*Not Bold\*\*` so it renders literally instead of as strong emphasis.
//!
//! Rules are applied in a fixed order. Block-level rules are line anchored and run
//! first; the inline character rules run last over the whole text.
//!
//! 1. backslashes that already escape something are doubled
//! 2. ATX headings (`# Title`)
//! 3. thematic breaks (`---`, `***`, `___`)
//! 4. ordered list markers (`1. item`)
//! 5. bullet list markers (`- item`, `* item`, `+ item`)
//! 6. blockquote markers (`> quote`)
//! 7. emphasis, code and table characters (`*`, `_`, `` ` ``, `|`)
//! 8. link and image brackets (`[`, `]`)
//!
//! Character classes are ASCII: a "word" character is `[0-9A-Za-z_]` and
//! whitespace is `[\t\n\f\r ]`.
//!
//! Escaping is not idempotent. Running it twice doubles the backslashes inserted by
//! the first pass, which is what keeps a literal `\*` in the source text literal.

use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex, Replacer};

static BACKSLASH: LazyLock<Regex> = LazyLock::new(|| compile(r"\\([^\t\n\f\r ])"));
static HEADING: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^(#{1,6} )"));
static HORIZONTAL_DIVIDER: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^([-*_] *){3,}$"));
static ORDERED_LIST: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^([^0-9A-Za-z_]* {0,3})([0-9]+)\. "));
static UNORDERED_LIST: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^([^\\0-9A-Za-z_]*)[*+-] "));
static BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^([^0-9A-Za-z_]* {0,3})> "));

/// Divider characters in the order they are checked when escaping a thematic break.
const DIVIDER_PRIORITY: [char; 3] = ['-', '_', '*'];

/// Only this many divider characters are escaped per line.
const DIVIDER_ESCAPES: usize = 3;

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("escape patterns are valid regular expressions")
}

/// Characters any of the rules can act on.
fn is_significant(ch: char) -> bool {
    matches!(
        ch,
        '\\' | '#' | '-' | '*' | '_' | '+' | '.' | '>' | '`' | '|' | '[' | ']'
    )
}

/// Escape Markdown characters in `text` so it renders literally.
///
/// Text without any Markdown-significant character is returned borrowed.
///
/// # Example
///
/// ```
/// use marksafe_converters_markdown::escape;
///
/// assert_eq!(escape("**bold**"), r"\*\*bold\*\*");
/// assert_eq!(escape("1. Item"), r"1\. Item");
/// assert_eq!(escape("plain"), "plain");
/// ```
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(is_significant) {
        return Cow::Borrowed(text);
    }

    let text = replace_all(&BACKSLASH, text.to_string(), r"\\${1}");
    let text = replace_all(&HEADING, text, r"\${1}");
    let text = replace_all(&HORIZONTAL_DIVIDER, text, |caps: &Captures<'_>| {
        escape_divider(matched(caps))
    });
    let text = replace_all(&ORDERED_LIST, text, r"${1}${2}\. ");
    let text = replace_all(&UNORDERED_LIST, text, |caps: &Captures<'_>| {
        escape_bullets(matched(caps))
    });
    let text = replace_all(&BLOCKQUOTE, text, r"${1}\> ");

    Cow::Owned(escape_inline(&text))
}

/// Run `regex` over `text`, reusing the allocation when nothing matched.
fn replace_all<R: Replacer>(regex: &Regex, text: String, replacement: R) -> String {
    let replaced = match regex.replace_all(&text, replacement) {
        Cow::Owned(replaced) => Some(replaced),
        Cow::Borrowed(_) => None,
    };
    replaced.unwrap_or(text)
}

fn matched<'h>(caps: &Captures<'h>) -> &'h str {
    caps.get(0).map_or("", |m| m.as_str())
}

/// Escape the first few occurrences of the highest priority divider character.
///
/// A line mixing characters (`-*-`) still matches the divider pattern; only the
/// first character found in [`DIVIDER_PRIORITY`] order is escaped.
fn escape_divider(line: &str) -> String {
    let marker = DIVIDER_PRIORITY
        .into_iter()
        .find(|marker| line.contains(*marker))
        .unwrap_or('*');

    let mut result = String::with_capacity(line.len() + DIVIDER_ESCAPES);
    let mut remaining = DIVIDER_ESCAPES;
    for ch in line.chars() {
        if ch == marker && remaining > 0 {
            result.push('\\');
            remaining -= 1;
        }
        result.push(ch);
    }
    result
}

/// Escape every bullet character in a matched list marker prefix.
fn escape_bullets(marker: &str) -> String {
    let mut result = String::with_capacity(marker.len() + 2);
    for ch in marker.chars() {
        if matches!(ch, '*' | '+' | '-') {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}

/// Escape emphasis, code span, table and link bracket characters wherever they are.
fn escape_inline(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        if matches!(ch, '*' | '_' | '`' | '|' | '[' | ']') {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}
