//! Reference linkification for whatchanged.
//!
//! This crate provides:
//! - Output formatters that render a `(label, url)` pair
//! - Recognizers for the shorthand issue and merge request notations found in release notes
//! - The [`Linkifier`] that rewrites those notations into hyperlinks

mod formatter;
mod linkifier;
mod reference;

pub use formatter::{HtmlFormatter, LinkFormatter, PlainFormatter, TerminalFormatter};
pub use linkifier::{LinkTargets, Linkifier, References};
pub use reference::{Reference, ReferenceKind, ReferenceMatch};
