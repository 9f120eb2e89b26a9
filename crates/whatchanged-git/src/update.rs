//! Package update headings in the nixpkgs style.

use std::sync::LazyLock;

use regex::Regex;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<attr>[^:]+):\s*(?P<old>.+)\s*(?:→|->)\s*(?P<new>.+)$")
        .expect("update heading pattern must be valid")
});

/// Prefixes of commits meant to be folded into another one.
const AUTOSQUASH_PREFIXES: &[&str] = &["fixup!", "squash!"];

/// A package update announced by a commit heading, e.g. `gtk3: 3.24.28 -> 3.24.29`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUpdate {
    /// Attribute path of the updated package.
    pub attr: String,
    /// Version before the update.
    pub old_version: String,
    /// Version after the update.
    pub new_version: String,
}

impl PackageUpdate {
    /// Parses a commit heading.
    ///
    /// Returns `None` for headings that do not announce an update, including
    /// `fixup!` and `squash!` commits.
    #[must_use]
    pub fn parse(heading: &str) -> Option<Self> {
        let captures = HEADING.captures(heading)?;

        let attr = captures["attr"].trim();
        if AUTOSQUASH_PREFIXES
            .iter()
            .any(|prefix| attr.starts_with(prefix))
        {
            return None;
        }

        Some(Self {
            attr: attr.to_string(),
            old_version: captures["old"].trim().to_string(),
            new_version: captures["new"].trim().to_string(),
        })
    }
}
