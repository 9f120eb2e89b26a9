//! Rendering helpers shared by the commands.

use std::io::{self, Write};

use whatchanged_config::OutputFormat;
use whatchanged_core::ChangeRecord;
use whatchanged_links::{HtmlFormatter, LinkFormatter, PlainFormatter, TerminalFormatter};

/// Returns the hyperlink formatter for `format`.
pub fn formatter_for(format: OutputFormat) -> &'static dyn LinkFormatter {
    match format {
        OutputFormat::Plain => &PlainFormatter,
        OutputFormat::Terminal => &TerminalFormatter,
        OutputFormat::Html => &HtmlFormatter,
    }
}

/// Prefixes every line of `text` with a tab.
pub fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("\t{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Joins rendered records with blank lines.
pub fn join_records(records: impl IntoIterator<Item = ChangeRecord>) -> String {
    records
        .into_iter()
        .map(|record| record.to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Writes records as they arrive, separated by blank lines.
///
/// Returns how many records were written.
pub fn write_records(
    out: &mut impl Write,
    records: impl IntoIterator<Item = ChangeRecord>,
) -> io::Result<usize> {
    let mut written = 0;
    for record in records {
        if written > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{record}")?;
        out.flush()?;
        written += 1;
    }
    Ok(written)
}
