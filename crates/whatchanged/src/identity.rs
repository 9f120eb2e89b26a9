//! Mapping nixpkgs attributes to upstream GNOME projects.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

static GNOME_MIRROR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:mirror://gnome|(?:ftp|http)s?://(?:ftp.gnome.org/pub/gnome|download.gnome.org))/sources/(?P<project>[^/]+)",
    )
    .expect("mirror pattern must be valid")
});

/// Why an attribute could not be mapped to a project.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("“{0}” is an alias")]
    Alias(String),

    #[error("Attribute “{0}” does not exist")]
    Missing(String),

    #[error("Error verifying the existence of “{0}”")]
    Check(String),

    #[error("Probably not a GNOME package")]
    NotGnome,
}

/// Maps a package attribute to the project directory on the release server.
pub trait ProjectResolver {
    fn resolve(&self, attr: &str) -> Result<String, IdentityError>;
}

/// Extracts the project name from the first GNOME mirror URL.
pub fn project_from_urls<S: AsRef<str>>(urls: &[S]) -> Option<String> {
    urls.iter().find_map(|url| {
        GNOME_MIRROR
            .captures(url.as_ref())
            .map(|captures| captures["project"].to_string())
    })
}

/// Resolves attributes by evaluating a nixpkgs checkout with `nix-instantiate`.
pub struct NixResolver {
    nixpkgs: PathBuf,
}

impl NixResolver {
    pub fn new(nixpkgs: impl Into<PathBuf>) -> Self {
        Self {
            nixpkgs: nixpkgs.into(),
        }
    }

    /// Evaluates `pkgs ? <attr>`; `None` when the evaluation itself fails.
    fn has_attr(&self, attr: &str, allow_aliases: bool) -> Option<bool> {
        let expression =
            format!("with import ./. {{ config.allowAliases = {allow_aliases}; }}; pkgs ? {attr}");
        let output = Command::new("nix-instantiate")
            .args(["--eval", "-E", &expression, "--json"])
            .current_dir(&self.nixpkgs)
            .stdin(Stdio::null())
            .output()
            .inspect_err(|err| debug!(error = %err, "cannot run nix-instantiate"))
            .ok()?;

        if !output.status.success() {
            debug!(attr, status = %output.status, "attribute check failed");
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).trim() == "true")
    }

    fn source_urls(&self, attr: &str) -> Vec<String> {
        let output = Command::new("nix-instantiate")
            .args(["--eval", "-A", &format!("{attr}.src.urls"), "--json"])
            .current_dir(&self.nixpkgs)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                serde_json::from_slice(&output.stdout).unwrap_or_default()
            }
            _ => Vec::new(),
        }
    }
}

impl ProjectResolver for NixResolver {
    fn resolve(&self, attr: &str) -> Result<String, IdentityError> {
        let check = || IdentityError::Check(attr.to_string());

        if !self.has_attr(attr, false).ok_or_else(check)? {
            return Err(if self.has_attr(attr, true).ok_or_else(check)? {
                IdentityError::Alias(attr.to_string())
            } else {
                IdentityError::Missing(attr.to_string())
            });
        }

        let urls = self.source_urls(attr);
        project_from_urls(&urls).ok_or(IdentityError::NotGnome)
    }
}
