//! Rewriting of shorthand references into hyperlinks.

use tracing::debug;

use crate::formatter::LinkFormatter;
use crate::reference::{
    EvolutionRecognizer, GitLabRecognizer, LaunchpadRecognizer, Recognizer, Reference,
    ReferenceMatch, RoleRecognizer,
};

/// Sibling projects reachable through an Evolution-style tag such as `evo-I#52`.
const EVOLUTION_PROJECTS: &[(&str, &str)] = &[
    ("evo", "evolution"),
    ("eds", "evolution-data-server"),
    ("ews", "evolution-ews"),
];

/// Where references point to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTargets {
    /// GitLab instance root, e.g. `https://gitlab.gnome.org`.
    pub gitlab_url: String,
    /// Namespace the current project lives in, e.g. `GNOME`.
    pub namespace: String,
    /// Launchpad bug redirect prefix; the bug number is appended.
    pub launchpad_url: String,
}

impl Default for LinkTargets {
    fn default() -> Self {
        Self {
            gitlab_url: "https://gitlab.gnome.org".to_string(),
            namespace: "GNOME".to_string(),
            launchpad_url: "https://bugs.launchpad.net/launchpad/+bug".to_string(),
        }
    }
}

impl LinkTargets {
    /// Resolves a reference found in the notes of `project` into a URL.
    ///
    /// Returns `None` for references whose target is unknown, which must then
    /// be left as they are.
    #[must_use]
    pub fn url(&self, project: &str, reference: &Reference<'_>) -> Option<String> {
        let gitlab = self.gitlab_url.trim_end_matches('/');
        let own = || format!("{}/{project}", self.namespace);

        let (repository, kind, number) = match *reference {
            Reference::GitLab {
                repository,
                kind,
                number,
            } => (repository.map_or_else(own, str::to_string), kind, number),
            Reference::Role { kind, number } => (own(), kind, number),
            Reference::Evolution { tag, kind, number } => {
                let target = match tag {
                    None => project,
                    Some(tag) => EVOLUTION_PROJECTS
                        .iter()
                        .find(|(known, _)| *known == tag)
                        .map(|(_, name)| *name)?,
                };
                (format!("{}/{target}", self.namespace), kind, number)
            }
            Reference::Launchpad { number } => {
                let launchpad = self.launchpad_url.trim_end_matches('/');
                return Some(format!("{launchpad}/{number}"));
            }
        };

        Some(format!(
            "{gitlab}/{repository}/{}/{number}",
            kind.path_segment()
        ))
    }
}

/// Finds shorthand references in release notes and turns them into links.
///
/// Recognizers are tried in a fixed order at every offset, left to right.
/// The first one that matches consumes its span; matches never overlap.
pub struct Linkifier {
    recognizers: Vec<Box<dyn Recognizer>>,
    targets: LinkTargets,
}

impl Linkifier {
    /// Creates a linkifier resolving references against `targets`.
    #[must_use]
    pub fn new(targets: LinkTargets) -> Self {
        let recognizers: Vec<Box<dyn Recognizer>> = vec![
            Box::new(GitLabRecognizer::new(&targets.namespace)),
            Box::new(RoleRecognizer::new()),
            Box::new(EvolutionRecognizer::new()),
            Box::new(LaunchpadRecognizer::new()),
        ];

        Self {
            recognizers,
            targets,
        }
    }

    /// Iterates over the references in `text`, left to right.
    pub fn references<'l, 't>(&'l self, text: &'t str) -> References<'l, 't> {
        References {
            recognizers: &self.recognizers,
            text,
            at: 0,
        }
    }

    /// Rewrites every resolvable reference in `text` through `formatter`.
    ///
    /// Text outside references, and references with an unknown target, is
    /// copied unchanged.
    pub fn rewrite(&self, project: &str, text: &str, formatter: &dyn LinkFormatter) -> String {
        let mut output = String::with_capacity(text.len());
        let mut copied = 0;

        for found in self.references(text) {
            output.push_str(&text[copied..found.span.start]);
            match self.targets.url(project, &found.reference) {
                Some(url) => output.push_str(&formatter.link(found.label, &url)),
                None => {
                    debug!(label = found.label, "leaving reference with unknown target");
                    output.push_str(found.label);
                }
            }
            copied = found.span.end;
        }

        output.push_str(&text[copied..]);
        output
    }
}

impl Default for Linkifier {
    fn default() -> Self {
        Self::new(LinkTargets::default())
    }
}

/// Iterator returned by [`Linkifier::references`].
pub struct References<'l, 't> {
    recognizers: &'l [Box<dyn Recognizer>],
    text: &'t str,
    at: usize,
}

impl<'t> Iterator for References<'_, 't> {
    type Item = ReferenceMatch<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.at < self.text.len() {
            let at = self.at;
            if let Some(found) = self
                .recognizers
                .iter()
                .find_map(|recognizer| recognizer.recognize(self.text, at))
            {
                self.at = found.span.end;
                return Some(found);
            }
            self.at += self.text[at..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }
}
