//! Configuration options for tokenizing documents.
//!
//! [`ParseOptions`] is a combinable bitmask. Each flag relaxes the grammar:
//!
//! - [`ParseOptions::ALLOW_SLASH_COMMENTS`]: `//` starts a comment, like `;`
//! - [`ParseOptions::ALLOW_NAKED_STRINGS`]: unquoted runs that are not numbers,
//!   booleans or keywords become strings instead of being discarded
//! - [`ParseOptions::FIRST_LINE_IS_TITLE`]: the first non-empty, non-comment
//!   line is captured verbatim as a single string
//!
//! ## Examples
//!
//! ```rust
//! use gendoc::ParseOptions;
//!
//! let options = ParseOptions::ALLOW_SLASH_COMMENTS | ParseOptions::ALLOW_NAKED_STRINGS;
//! assert!(options.allows_slash_comments());
//! assert!(!options.first_line_is_title());
//!
//! // Builder style
//! let options = ParseOptions::new().with_naked_strings().with_title_line();
//! assert_eq!(options.bits(), 6);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Bitmask of tokenizer options.
///
/// Serializes as its integer bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParseOptions(u32);

impl ParseOptions {
    /// Strict grammar: `;` comments, quoted strings, numbers, booleans, keywords.
    pub const NONE: ParseOptions = ParseOptions(0);
    /// Treat `//` as a comment start.
    pub const ALLOW_SLASH_COMMENTS: ParseOptions = ParseOptions(1 << 0);
    /// Treat unrecognized unquoted runs as strings instead of garbage.
    pub const ALLOW_NAKED_STRINGS: ParseOptions = ParseOptions(1 << 1);
    /// Capture the first non-empty, non-comment line verbatim as a string.
    pub const FIRST_LINE_IS_TITLE: ParseOptions = ParseOptions(1 << 2);

    const ALL: u32 = 0b111;

    /// Creates the strict default (no flags set).
    #[must_use]
    pub const fn new() -> Self {
        Self::NONE
    }

    /// Builds options from raw bits. Unknown bits are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gendoc::ParseOptions;
    ///
    /// let options = ParseOptions::from_bits(0xff);
    /// assert_eq!(options.bits(), 0b111);
    /// ```
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        ParseOptions(bits & Self::ALL)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every flag in `other` is also set in `self`.
    #[must_use]
    pub const fn contains(self, other: ParseOptions) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn allows_slash_comments(self) -> bool {
        self.contains(Self::ALLOW_SLASH_COMMENTS)
    }

    #[must_use]
    pub const fn allows_naked_strings(self) -> bool {
        self.contains(Self::ALLOW_NAKED_STRINGS)
    }

    #[must_use]
    pub const fn first_line_is_title(self) -> bool {
        self.contains(Self::FIRST_LINE_IS_TITLE)
    }

    /// Enables `//` comments.
    #[must_use]
    pub fn with_slash_comments(self) -> Self {
        self | Self::ALLOW_SLASH_COMMENTS
    }

    /// Enables naked (unquoted) strings.
    #[must_use]
    pub fn with_naked_strings(self) -> Self {
        self | Self::ALLOW_NAKED_STRINGS
    }

    /// Enables capture of the first line as a title.
    #[must_use]
    pub fn with_title_line(self) -> Self {
        self | Self::FIRST_LINE_IS_TITLE
    }
}

impl BitOr for ParseOptions {
    type Output = ParseOptions;

    fn bitor(self, rhs: Self) -> Self::Output {
        ParseOptions(self.0 | rhs.0)
    }
}

impl BitOrAssign for ParseOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        let options = ParseOptions::default();
        assert_eq!(options, ParseOptions::NONE);
        assert!(!options.allows_slash_comments());
        assert!(!options.allows_naked_strings());
        assert!(!options.first_line_is_title());
    }

    #[test]
    fn test_combine() {
        let mut options = ParseOptions::ALLOW_NAKED_STRINGS;
        options |= ParseOptions::FIRST_LINE_IS_TITLE;
        assert!(options.allows_naked_strings());
        assert!(options.first_line_is_title());
        assert!(!options.allows_slash_comments());
        assert!(options.contains(ParseOptions::NONE));
    }

    #[test]
    fn test_serde_as_bits() {
        let options = ParseOptions::new().with_slash_comments().with_title_line();
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, "5");
        let back: ParseOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
