//! Key-value list with message.
//!
//! Commit and tag objects share a simple text layout: a block of header
//! lines (`key value`), then a blank line, then free-form text. Header values
//! may span several lines; each continuation line starts with a single space.
//!
//! ```text
//! tree 29ff16c9c14e2652b22f8b78bb08a5a07930c147
//! parent 206941306e8a8af65b66eaaaea388a7ae24d49a0
//! author A. U. Thor <author@localhost> 1527025023 +0200
//! committer A. U. Thor <author@localhost> 1527025044 +0200
//!
//! Create first draft
//! ```

use std::fmt::{self, Display, Formatter};

use super::{Error, Kind};

/// An ordered multi-map of header values plus the trailing message.
///
/// Keys keep the order in which they were first seen. Each key maps to
/// one or more values, kept in the order they were added.
///
/// The message is stored exactly as it appeared after the last header line,
/// including the blank separator line, so that printing a parsed document
/// reproduces the original text byte for byte.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Kvlm {
    headers: Vec<(String, Vec<String>)>,
    message: Option<String>,
}

impl Kvlm {
    /// Create an empty document with no headers and no message.
    pub fn new() -> Kvlm {
        Kvlm::default()
    }

    /// Parse a header block followed by a message.
    ///
    /// Parsing cannot fail: as soon as a line does not look like a
    /// `key value` header, the remainder of the text becomes the message.
    pub fn parse(raw: &str) -> Kvlm {
        let mut doc = Kvlm::new();
        let mut start = 0;

        loop {
            let rest = &raw[start..];

            let space = rest.find(' ');
            let newline = rest.find('\n');

            let space = match (space, newline) {
                (Some(space), Some(newline)) if space < newline => space,
                _ => {
                    doc.message = Some(rest.to_string());
                    return doc;
                }
            };

            let key = &rest[..space];

            // The value ends at the first newline not followed by a space.
            let mut cursor = space;
            let end = loop {
                match rest[cursor + 1..].find('\n') {
                    Some(n) => {
                        cursor += 1 + n;
                        if rest.as_bytes().get(cursor + 1) != Some(&b' ') {
                            break cursor;
                        }
                    }
                    None => break rest.len(),
                }
            };

            let value = rest[space + 1..end].replace("\n ", "\n");
            doc.push(key, value);

            start += end + 1;
            if start > raw.len() {
                doc.message = Some(String::new());
                return doc;
            }
        }
    }

    /// Append a value for `key`, after any values already present.
    ///
    /// An empty key sets the message instead.
    pub fn push<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();

        if key.is_empty() {
            self.message = Some(value);
            return;
        }

        match self.headers.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.headers.push((key, vec![value])),
        }
    }

    /// Set the message text, replacing any previous message.
    ///
    /// The text is printed verbatim after the header lines, so it should
    /// normally begin with the blank separator line (`"\n"`).
    pub fn set_message<S: Into<String>>(&mut self, message: S) {
        self.message = Some(message.into());
    }

    /// Return all values for `key` in insertion order.
    pub fn get(&self, key: &str) -> &[String] {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Return the first value for `key`, if any.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).first().map(|v| v.as_str())
    }

    /// Iterate over the header keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(|(k, _)| k.as_str())
    }

    /// Return the raw message text.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns true if the document has neither headers nor a message.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.message.is_none()
    }
}

impl Display for Kvlm {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (key, values) in &self.headers {
            for value in values {
                writeln!(f, "{} {}", key, value.replace('\n', "\n "))?;
            }
        }

        if let Some(message) = &self.message {
            f.write_str(message)?;
        }

        Ok(())
    }
}

/// Reject any header key not in `allowed`. The message slot is always allowed.
pub(crate) fn check_keys(doc: &Kvlm, kind: Kind, allowed: &[&str]) -> Result<(), Error> {
    match doc.keys().find(|key| !allowed.contains(key)) {
        Some(key) => Err(Error::InvalidHeaderKey {
            kind,
            key: key.to_string(),
        }),
        None => Ok(()),
    }
}

/// The message of a commit or tag without its leading blank separator line.
pub(crate) fn message_text(doc: &Kvlm) -> &str {
    let message = doc.message().unwrap_or_default();
    message.strip_prefix('\n').unwrap_or(message)
}
