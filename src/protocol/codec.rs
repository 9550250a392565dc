//! Line codec: token stream ⇄ structured [`Command`].
//!
//! Wire format (one command per newline-free UTF-8 line):
//! ```text
//! ┌──────┬──────────────┬──────────────────────────┐
//! │ NAME │ arg arg ...  │ key=value key=value ...  │
//! └──────┴──────────────┴──────────────────────────┘
//! ```
//!
//! The first token is the command name (uppercased).  Every later token
//! containing `=` is a kwarg split at its first `=`; the rest are
//! positional args.  Decoding is total: any input yields a `Command`.

use core::fmt::Write as _;

use super::tokenizer::{quote_if_needed, tokenize};

/// Kwarg key the response helpers read and write.
const MESSAGE_KEY: &str = "message";

/// Insertion-ordered kwarg map; re-inserting a key replaces its value in place.
///
/// Equality ignores order: two maps are equal when they hold the same pairs.
#[derive(Debug, Clone, Default)]
pub struct Kwargs {
    entries: Vec<(String, String)>,
}

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, keeping its original position if it is already present.
    /// Returns the replaced value.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(core::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl PartialEq for Kwargs {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Kwargs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut kwargs = Self::new();
        for (k, v) in iter {
            kwargs.insert(k.into(), v.into());
        }
        kwargs
    }
}

/// One decoded or to-be-sent protocol line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Command {
    /// Uppercase command name.  Empty only for a line with no tokens.
    pub name: String,
    /// Positional arguments, in wire order.
    pub args: Vec<String>,
    /// `key=value` arguments; the last duplicate wins.
    pub kwargs: Kwargs,
}

impl Command {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_uppercase(),
            ..Self::default()
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Set a kwarg.
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    /// `true` for a blank line; callers treat it as a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Look up a kwarg value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.kwargs.get(key).map(String::as_str)
    }

    /// Encode back into a wire line.
    pub fn to_line(&self) -> String {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        let kwargs: Vec<(&str, &str)> = self
            .kwargs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        encode(&self.name, &args, &kwargs)
    }
}

/// Decode a received line.  Never fails; a blank line gives an empty command.
pub fn decode(line: &str) -> Command {
    let mut tokens = tokenize(line).into_iter();

    let Some(first) = tokens.next() else {
        return Command::default();
    };

    let mut command = Command {
        name: first.to_uppercase(),
        ..Command::default()
    };

    for token in tokens {
        match token.split_once('=') {
            Some((key, value)) => {
                command.kwargs.insert(key.to_owned(), value.to_owned());
            }
            None => command.args.push(token),
        }
    }

    command
}

/// Build an outbound line: uppercase name, quoted args, then `key=value` pairs
/// in the given order.
pub fn encode(name: &str, args: &[&str], kwargs: &[(&str, &str)]) -> String {
    let mut line = name.to_uppercase();

    for arg in args {
        line.push(' ');
        line.push_str(&quote_if_needed(arg));
    }

    for (key, value) in kwargs {
        // Writing into a String cannot fail.
        let _ = write!(line, " {}={}", key, quote_if_needed(value));
    }

    line
}

/// Split a response line into `(status, message)`; the message defaults to empty.
pub fn decode_response(line: &str) -> (String, String) {
    let mut command = decode(line);
    let message = command
        .kwargs
        .get(MESSAGE_KEY)
        .cloned()
        .unwrap_or_default();
    (core::mem::take(&mut command.name), message)
}

/// Build a response line; an empty message yields a bare status.
pub fn encode_response(status: &str, message: &str) -> String {
    if message.is_empty() {
        encode(status, &[], &[])
    } else {
        encode(status, &[], &[(MESSAGE_KEY, message)])
    }
}
