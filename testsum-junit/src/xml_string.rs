// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{borrow::Borrow, fmt, ops::Deref};

/// A string that can be written into an XML document.
///
/// Captured test output routinely contains terminal color codes and other control characters that
/// XML 1.0 does not allow, even escaped. On construction, ANSI escape sequences are removed and
/// any remaining disallowed character is replaced with U+FFFD REPLACEMENT CHARACTER.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct XmlString {
    data: Box<str>,
}

impl XmlString {
    /// Creates a new `XmlString`, sanitizing the input.
    pub fn new(data: impl AsRef<str>) -> Self {
        let data = data.as_ref();
        // The escape stripper also drops tabs and carriage returns, so only run it when there is
        // an escape sequence to remove.
        let stripped = if data.contains('\x1b') {
            strip_ansi_escapes::strip_str(data)
        } else {
            data.to_owned()
        };

        let data = if stripped.chars().all(is_xml_char) {
            stripped
        } else {
            stripped
                .chars()
                .map(|c| if is_xml_char(c) { c } else { '\u{FFFD}' })
                .collect()
        };

        Self {
            data: data.into_boxed_str(),
        }
    }

    /// Returns the sanitized string.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Converts `self` into a `String`.
    pub fn into_string(self) -> String {
        self.data.into_string()
    }
}

// https://www.w3.org/TR/xml/#charsets
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

impl From<&str> for XmlString {
    fn from(data: &str) -> Self {
        Self::new(data)
    }
}

impl From<String> for XmlString {
    fn from(data: String) -> Self {
        Self::new(data)
    }
}

impl From<&String> for XmlString {
    fn from(data: &String) -> Self {
        Self::new(data)
    }
}

impl Deref for XmlString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl AsRef<str> for XmlString {
    fn as_ref(&self) -> &str {
        &self.data
    }
}

impl Borrow<str> for XmlString {
    fn borrow(&self) -> &str {
        &self.data
    }
}

impl PartialEq<str> for XmlString {
    fn eq(&self, other: &str) -> bool {
        &*self.data == other
    }
}

impl PartialEq<&str> for XmlString {
    fn eq(&self, other: &&str) -> bool {
        &*self.data == *other
    }
}

impl fmt::Display for XmlString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("plain text", "plain text" ; "unchanged")]
    #[test_case("tabs\tand\r\nnewlines\n", "tabs\tand\r\nnewlines\n" ; "whitespace kept")]
    #[test_case("\x1b[31mred\x1b[0m text", "red text" ; "ansi stripped")]
    #[test_case("bell\x07here", "bell\u{FFFD}here" ; "control replaced")]
    #[test_case("nul\0and\u{FFFE}", "nul\u{FFFD}and\u{FFFD}" ; "nul and noncharacter replaced")]
    #[test_case("<&>\"'", "<&>\"'" ; "markup left for the writer to escape")]
    fn sanitize(input: &str, expected: &str) {
        assert_eq!(XmlString::new(input).as_str(), expected);
    }
}
