//! Link formatters.

/// Renders a hyperlink for the output medium.
///
/// Implementations are stateless. One is picked per run and passed by
/// reference into every [`Linkifier::rewrite`](crate::Linkifier::rewrite) call.
pub trait LinkFormatter: Send + Sync {
    /// Renders `label` as a link pointing at `url`.
    fn link(&self, label: &str, url: &str) -> String;
}

/// Leaves the label untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl LinkFormatter for PlainFormatter {
    fn link(&self, label: &str, _url: &str) -> String {
        label.to_string()
    }
}

/// OSC 8 terminal hyperlinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalFormatter;

impl LinkFormatter for TerminalFormatter {
    fn link(&self, label: &str, url: &str) -> String {
        format!("\x1b]8;;{url}\x1b\\{label}\x1b]8;;\x1b\\")
    }
}

/// HTML anchors.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter;

impl LinkFormatter for HtmlFormatter {
    fn link(&self, label: &str, url: &str) -> String {
        let href = html_escape::encode_quoted_attribute(url);
        format!("<a href=\"{href}\">{label}</a>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://gitlab.gnome.org/GNOME/foo/merge_requests/5";

    #[test]
    fn test_plain_returns_label() {
        assert_eq!(PlainFormatter.link("!5", URL), "!5");
    }

    #[test]
    fn test_terminal_osc8_sequence() {
        assert_eq!(
            TerminalFormatter.link("!5", URL),
            "\x1b]8;;https://gitlab.gnome.org/GNOME/foo/merge_requests/5\x1b\\!5\x1b]8;;\x1b\\"
        );
    }

    #[test]
    fn test_html_anchor() {
        assert_eq!(
            HtmlFormatter.link("!5", URL),
            "<a href=\"https://gitlab.gnome.org/GNOME/foo/merge_requests/5\">!5</a>"
        );
    }

    #[test]
    fn test_html_escapes_attribute() {
        let rendered = HtmlFormatter.link("x", "https://example.com/?a=1&b=\"2\"");
        assert_eq!(
            rendered,
            "<a href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\">x</a>"
        );
    }

    #[test]
    fn test_formatters_are_object_safe() {
        let formatters: [&dyn LinkFormatter; 3] =
            [&PlainFormatter, &TerminalFormatter, &HtmlFormatter];
        for formatter in formatters {
            assert!(formatter.link("#1", URL).contains("#1"));
        }
    }
}
