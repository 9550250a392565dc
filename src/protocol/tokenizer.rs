//! Shell-style line tokenizer and the matching quoting rule.
//!
//! ```text
//!   START ps=Hello rt='Now Playing' file="a b.mp3"
//!   └───┘ └──────┘ └──────────────┘ └────────────┘
//!   token  token        token            token
//! ```
//!
//! Splitting happens on ASCII space, tab, CR and LF outside quotes.  A
//! single or double quote opens a quoted span that only the same quote
//! character closes.  There is no escape processing: a backslash is a
//! literal character.  An unterminated quote swallows the rest of the line
//! into the current token.

use std::borrow::Cow;

/// Characters that separate tokens outside a quoted span.
const fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Split `line` into tokens.
///
/// Adjacent delimiters collapse, so no empty tokens are produced.  An
/// empty or whitespace-only line yields an empty vector.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => current.push(c),
            None if c == '\'' || c == '"' => quote = Some(c),
            None if is_delimiter(c) => {
                if !current.is_empty() {
                    tokens.push(core::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Quote `value` for an outbound line if it would not survive tokenizing.
///
/// Values containing a space, single quote or double quote are wrapped in
/// single quotes, with embedded single quotes written as `\'`.  The
/// tokenizer does not undo that escape, so such values do not round-trip
/// exactly; deployed peers rely on this exact encoding.
pub fn quote_if_needed(value: &str) -> Cow<'_, str> {
    if !value.contains([' ', '\'', '"']) {
        return Cow::Borrowed(value);
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' {
            quoted.push_str("\\'");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    Cow::Owned(quoted)
}
