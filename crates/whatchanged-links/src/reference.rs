//! Shorthand reference notations and their recognizers.
//!
//! Each notation family has its own recognizer. Recognizers are anchored: they
//! only report a match that starts exactly at the offset they are asked about.

use std::ops::Range;

use regex::{Captures, Regex};

/// What a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// An issue, `.../issues/<n>`.
    Issue,
    /// A merge request, `.../merge_requests/<n>`.
    MergeRequest,
}

impl ReferenceKind {
    /// Returns the GitLab URL path segment for this kind.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Issue => "issues",
            Self::MergeRequest => "merge_requests",
        }
    }
}

/// A recognized reference, borrowing from the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'t> {
    /// `!12`, `#15`, `MR!17`, `gitlab#25`, `GNOME/gcr!24`.
    GitLab {
        /// Explicit `namespace/project` qualifier.
        repository: Option<&'t str>,
        kind: ReferenceKind,
        number: &'t str,
    },
    /// reStructuredText roles: ``:issue:`15` `` and ``:mr:`12` ``.
    Role { kind: ReferenceKind, number: &'t str },
    /// Evolution-style `M!12`, `I#15`, optionally tagged as in `evo-I#25`.
    Evolution {
        tag: Option<&'t str>,
        kind: ReferenceKind,
        number: &'t str,
    },
    /// Launchpad bugs: `LP:#1234567`.
    Launchpad { number: &'t str },
}

/// A reference together with the byte span it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch<'t> {
    /// Byte range of the matched text.
    pub span: Range<usize>,
    /// The matched text, used as the link label.
    pub label: &'t str,
    /// The parsed reference.
    pub reference: Reference<'t>,
}

/// Recognizes one notation family at a given offset.
pub(crate) trait Recognizer: Send + Sync {
    /// Returns the match starting exactly at `at`, if any.
    fn recognize<'t>(&self, text: &'t str, at: usize) -> Option<ReferenceMatch<'t>>;
}

/// Whether the character right before `at` is a word character.
fn follows_word_char(text: &str, at: usize) -> bool {
    text[..at]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// Runs an anchored pattern against the tail of `text` starting at `at`.
fn captures_at<'t>(pattern: &Regex, text: &'t str, at: usize) -> Option<(Captures<'t>, Range<usize>)> {
    let captures = pattern.captures(&text[at..])?;
    let whole = captures.get(0)?;
    let span = at + whole.start()..at + whole.end();
    Some((captures, span))
}

/// Compiles a built-in reference pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("reference pattern must be valid")
}

/// GitLab references, optionally qualified by `gitlab` or `<namespace>/<project>`.
pub(crate) struct GitLabRecognizer {
    pattern: Regex,
}

impl GitLabRecognizer {
    pub(crate) fn new(namespace: &str) -> Self {
        let namespace = regex::escape(namespace);
        Self {
            pattern: compile(&format!(
                r"^(?:gitlab|(?P<repo>{namespace}/[a-z-]+))?(?P<sigil>(?:MR)?!|#)(?P<number>[0-9]+)\b"
            )),
        }
    }
}

impl Recognizer for GitLabRecognizer {
    fn recognize<'t>(&self, text: &'t str, at: usize) -> Option<ReferenceMatch<'t>> {
        if follows_word_char(text, at) {
            return None;
        }
        let (captures, span) = captures_at(&self.pattern, text, at)?;
        let kind = match captures.name("sigil")?.as_str() {
            "#" => ReferenceKind::Issue,
            _ => ReferenceKind::MergeRequest,
        };

        Some(ReferenceMatch {
            label: &text[span.clone()],
            span,
            reference: Reference::GitLab {
                repository: captures.name("repo").map(|m| m.as_str()),
                kind,
                number: captures.name("number")?.as_str(),
            },
        })
    }
}

/// reStructuredText `:issue:` and `:mr:` roles.
pub(crate) struct RoleRecognizer {
    pattern: Regex,
}

impl RoleRecognizer {
    pub(crate) fn new() -> Self {
        Self {
            pattern: compile(r"^:(?P<role>issue|mr):`(?P<number>[0-9]+)`"),
        }
    }
}

impl Recognizer for RoleRecognizer {
    fn recognize<'t>(&self, text: &'t str, at: usize) -> Option<ReferenceMatch<'t>> {
        let (captures, span) = captures_at(&self.pattern, text, at)?;
        let kind = match captures.name("role")?.as_str() {
            "issue" => ReferenceKind::Issue,
            _ => ReferenceKind::MergeRequest,
        };

        Some(ReferenceMatch {
            label: &text[span.clone()],
            span,
            reference: Reference::Role {
                kind,
                number: captures.name("number")?.as_str(),
            },
        })
    }
}

/// Evolution-family `M!`/`I#` references with an optional lowercase tag.
pub(crate) struct EvolutionRecognizer {
    pattern: Regex,
}

impl EvolutionRecognizer {
    pub(crate) fn new() -> Self {
        Self {
            pattern: compile(r"^(?:(?P<tag>[a-z]+)-)?(?P<sigil>M!|I#)(?P<number>[0-9]+)\b"),
        }
    }
}

impl Recognizer for EvolutionRecognizer {
    fn recognize<'t>(&self, text: &'t str, at: usize) -> Option<ReferenceMatch<'t>> {
        if follows_word_char(text, at) {
            return None;
        }
        let (captures, span) = captures_at(&self.pattern, text, at)?;
        let kind = match captures.name("sigil")?.as_str() {
            "I#" => ReferenceKind::Issue,
            _ => ReferenceKind::MergeRequest,
        };

        Some(ReferenceMatch {
            label: &text[span.clone()],
            span,
            reference: Reference::Evolution {
                tag: captures.name("tag").map(|m| m.as_str()),
                kind,
                number: captures.name("number")?.as_str(),
            },
        })
    }
}

/// Launchpad `LP:#<n>` bug references.
pub(crate) struct LaunchpadRecognizer {
    pattern: Regex,
}

impl LaunchpadRecognizer {
    pub(crate) fn new() -> Self {
        Self {
            pattern: compile(r"^LP:#(?P<number>[0-9]+)"),
        }
    }
}

impl Recognizer for LaunchpadRecognizer {
    fn recognize<'t>(&self, text: &'t str, at: usize) -> Option<ReferenceMatch<'t>> {
        let (captures, span) = captures_at(&self.pattern, text, at)?;

        Some(ReferenceMatch {
            label: &text[span.clone()],
            span,
            reference: Reference::Launchpad {
                number: captures.name("number")?.as_str(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'t>(recognizer: &dyn Recognizer, text: &'t str) -> Option<Reference<'t>> {
        recognizer.recognize(text, 0).map(|m| m.reference)
    }

    #[test]
    fn test_gitlab_bare_merge_request() {
        let recognizer = GitLabRecognizer::new("GNOME");
        assert_eq!(
            first(&recognizer, "!5"),
            Some(Reference::GitLab {
                repository: None,
                kind: ReferenceKind::MergeRequest,
                number: "5",
            })
        );
    }

    #[test]
    fn test_gitlab_qualified_issue() {
        let recognizer = GitLabRecognizer::new("GNOME");
        assert_eq!(
            first(&recognizer, "GNOME/gcr#24"),
            Some(Reference::GitLab {
                repository: Some("GNOME/gcr"),
                kind: ReferenceKind::Issue,
                number: "24",
            })
        );
    }

    #[test]
    fn test_gitlab_prefixes() {
        let recognizer = GitLabRecognizer::new("GNOME");
        let m = recognizer.recognize("MR!37 and more", 0).unwrap();
        assert_eq!(m.label, "MR!37");
        assert_eq!(m.span, 0..5);

        let m = recognizer.recognize("gitlab#52", 0).unwrap();
        assert_eq!(m.label, "gitlab#52");
    }

    #[test]
    fn test_gitlab_requires_boundary_before() {
        let recognizer = GitLabRecognizer::new("GNOME");
        assert!(recognizer.recognize("dada!29", 4).is_none());
        assert!(recognizer.recognize("AMR!17", 1).is_none());
    }

    #[test]
    fn test_gitlab_requires_boundary_after() {
        let recognizer = GitLabRecognizer::new("GNOME");
        assert!(recognizer.recognize("!29boo", 0).is_none());
    }

    #[test]
    fn test_gitlab_respects_namespace() {
        let recognizer = GitLabRecognizer::new("World");
        assert_eq!(
            first(&recognizer, "World/fragments!3"),
            Some(Reference::GitLab {
                repository: Some("World/fragments"),
                kind: ReferenceKind::MergeRequest,
                number: "3",
            })
        );
        assert!(recognizer.recognize("GNOME/gcr!24", 0).is_none());
    }

    #[test]
    fn test_gitlab_only_matches_at_offset() {
        let recognizer = GitLabRecognizer::new("GNOME");
        assert!(recognizer.recognize("see !5", 0).is_none());
        let m = recognizer.recognize("see !5", 4).unwrap();
        assert_eq!(m.span, 4..6);
    }

    #[test]
    fn test_role_references() {
        let recognizer = RoleRecognizer::new();
        assert_eq!(
            first(&recognizer, ":mr:`77`"),
            Some(Reference::Role {
                kind: ReferenceKind::MergeRequest,
                number: "77",
            })
        );
        assert_eq!(
            first(&recognizer, ":issue:`15`"),
            Some(Reference::Role {
                kind: ReferenceKind::Issue,
                number: "15",
            })
        );
        assert!(first(&recognizer, ":bug:`15`").is_none());
    }

    #[test]
    fn test_evolution_references() {
        let recognizer = EvolutionRecognizer::new();
        assert_eq!(
            first(&recognizer, "evo-I#52"),
            Some(Reference::Evolution {
                tag: Some("evo"),
                kind: ReferenceKind::Issue,
                number: "52",
            })
        );
        assert_eq!(
            first(&recognizer, "M!12"),
            Some(Reference::Evolution {
                tag: None,
                kind: ReferenceKind::MergeRequest,
                number: "12",
            })
        );
        assert!(first(&recognizer, "I!13").is_none());
        assert!(first(&recognizer, "M#14").is_none());
    }

    #[test]
    fn test_launchpad_reference() {
        let recognizer = LaunchpadRecognizer::new();
        assert_eq!(
            first(&recognizer, "LP:#1234567"),
            Some(Reference::Launchpad { number: "1234567" })
        );
    }

    #[test]
    fn test_follows_word_char_handles_multibyte() {
        assert!(follows_word_char("é!1", "é".len()));
        assert!(!follows_word_char("—!1", "—".len()));
        assert!(!follows_word_char("!1", 0));
    }
}
