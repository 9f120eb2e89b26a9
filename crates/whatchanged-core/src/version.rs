//! Version ordering.
//!
//! Release servers publish arbitrary version-like strings (`3.38.1`, `40.alpha`,
//! `2.0rc1`, `1.0a`). They are compared component by component:
//!
//! - runs of digits are numbers, runs of letters are words, anything else separates;
//! - `alpha`, `beta`, `rc`, `pre` and other words rank as pre-releases, below zero;
//! - `patch`, `post`, `pl` and `errata` rank as post-releases, above zero but below one;
//! - a single letter glued to a number (`1.0a`) ranks above any number;
//! - words compare by their first letter only, so `1.0a1 == 1.0alpha1`;
//! - the shorter version is padded with zeros, so `1.0 == 1.0.0`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{VersionError, VersionResult};

/// Where a component sits relative to the others, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    PreRelease,
    Zero,
    PostRelease,
    Nonzero,
    LetterSuffix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Component {
    rank: Rank,
    /// Digits with leading zeros stripped, or the lowercased first letter of a word.
    value: String,
}

/// Fills in for the missing tail of the shorter version.
static PADDING: Component = Component {
    rank: Rank::Zero,
    value: String::new(),
};

impl Component {
    fn number(digits: &str) -> Self {
        let value = digits.trim_start_matches('0');
        let rank = if value.is_empty() {
            Rank::Zero
        } else {
            Rank::Nonzero
        };
        Self {
            rank,
            value: value.to_string(),
        }
    }

    fn word(letters: &str, glued_suffix: bool) -> Self {
        let lowered = letters.to_lowercase();
        let rank = if glued_suffix {
            Rank::LetterSuffix
        } else if matches!(lowered.as_str(), "patch" | "post" | "pl" | "errata") {
            Rank::PostRelease
        } else {
            Rank::PreRelease
        };
        let value = lowered.chars().next().map(String::from).unwrap_or_default();
        Self { rank, value }
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank).then_with(|| match self.rank {
            Rank::Zero => Ordering::Equal,
            // Numbers without leading zeros: longer is larger.
            Rank::Nonzero => self
                .value
                .len()
                .cmp(&other.value.len())
                .then_with(|| self.value.cmp(&other.value)),
            _ => self.value.cmp(&other.value),
        })
    }
}

/// Splits a version string into comparable components.
fn components(raw: &str) -> Vec<Component> {
    let chars: Vec<char> = raw.chars().collect();
    let mut parts = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let start = i;
        if chars[i].is_ascii_digit() {
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let digits: String = chars[start..i].iter().collect();
            parts.push(Component::number(&digits));
        } else if chars[i].is_alphabetic() {
            while i < chars.len() && chars[i].is_alphabetic() {
                i += 1;
            }
            let letters: String = chars[start..i].iter().collect();
            let after_number = start > 0 && chars[start - 1].is_ascii_digit();
            let before_number = chars.get(i).is_some_and(char::is_ascii_digit);
            let glued_suffix = after_number && !before_number && i - start == 1;
            parts.push(Component::word(&letters, glued_suffix));
        } else {
            i += 1;
        }
    }

    parts
}

/// A published version with a total order.
///
/// Equality follows the ordering: `Version::parse("1.0")` equals
/// `Version::parse("1.0.0")`, while [`Version::as_str`] keeps the original text.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    components: Vec<Component>,
}

impl Version {
    /// Parses a version string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string contains no digits or letters at all.
    pub fn parse(raw: &str) -> VersionResult<Self> {
        let trimmed = raw.trim();
        if trimmed.chars().any(char::is_whitespace) {
            return Err(VersionError::Malformed(raw.to_string()));
        }

        let components = components(trimmed);
        if components.is_empty() {
            return Err(VersionError::Malformed(raw.to_string()));
        }

        Ok(Self {
            raw: trimmed.to_string(),
            components,
        })
    }

    /// Returns the version as published.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `start < self <= end`.
    ///
    /// The start is exclusive: its own notes belong to the previous range.
    #[must_use]
    pub fn in_range(&self, start: &Self, end: &Self) -> bool {
        start < self && self <= end
    }

    /// Branch: the first two dot-separated segments (`3.38` for `3.38.1`).
    #[must_use]
    pub fn branch(&self) -> String {
        self.raw.split('.').take(2).collect::<Vec<_>>().join(".")
    }

    /// First dot-separated segment.
    #[must_use]
    pub fn major(&self) -> &str {
        self.segment(0).unwrap_or(&self.raw)
    }

    /// Second dot-separated segment.
    #[must_use]
    pub fn minor(&self) -> Option<&str> {
        self.segment(1)
    }

    /// Third dot-separated segment.
    #[must_use]
    pub fn patch(&self) -> Option<&str> {
        self.segment(2)
    }

    fn segment(&self, index: usize) -> Option<&str> {
        self.raw.split('.').nth(index)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| {
                let ours = self.components.get(i).unwrap_or(&PADDING);
                let theirs = other.components.get(i).unwrap_or(&PADDING);
                ours.compare(theirs)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Version {}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
