//! Inline style rendering for text runs.

use crate::model::TextStyle;

/// Opening tag used for underline (Markdown has no underline syntax).
pub const UNDERLINE_OPEN: &str = "<ins>";

/// Closing tag used for underline.
pub const UNDERLINE_CLOSE: &str = "</ins>";

const BOLD: &str = "**";
const ITALIC: &str = "_";
const STRIKETHROUGH: &str = "~~";

/// Render one run of text with its style as an inline Markdown fragment.
///
/// A link wraps the content first, so the other markers enclose the whole
/// `[content](url)` fragment. Markers open in the order bold, italic,
/// underline, strikethrough and close in reverse.
pub fn render_run(content: &str, style: &TextStyle) -> String {
    let mut text = match style.link_url() {
        Some(url) => format!("[{}]({})", content, url),
        None => content.to_string(),
    };

    let markers = active_markers(style);
    if markers.is_empty() {
        return text;
    }

    let openers: String = markers.concat();
    text.insert_str(0, &openers);

    for marker in markers.iter().rev() {
        text.push_str(closing_marker(marker));
    }

    text
}

fn active_markers(style: &TextStyle) -> Vec<&'static str> {
    let mut markers = Vec::with_capacity(4);
    if style.bold {
        markers.push(BOLD);
    }
    if style.italic {
        markers.push(ITALIC);
    }
    if style.underline {
        markers.push(UNDERLINE_OPEN);
    }
    if style.strikethrough {
        markers.push(STRIKETHROUGH);
    }
    markers
}

fn closing_marker(marker: &'static str) -> &'static str {
    if marker == UNDERLINE_OPEN {
        UNDERLINE_CLOSE
    } else {
        marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_plain_run() {
        assert_eq!(render_run("hello", &TextStyle::default()), "hello");
    }

    #[test]
    fn test_single_markers() {
        assert_eq!(render_run("a", &TextStyle::default().bold()), "**a**");
        assert_eq!(render_run("a", &TextStyle::default().italic()), "_a_");
        assert_eq!(
            render_run("a", &TextStyle::default().underline()),
            "<ins>a</ins>"
        );
        assert_eq!(
            render_run("a", &TextStyle::default().strikethrough()),
            "~~a~~"
        );
    }

    #[test]
    fn test_all_markers_nest_in_stack_order() {
        let style = TextStyle::default()
            .bold()
            .italic()
            .underline()
            .strikethrough();
        assert_eq!(render_run("x", &style), "**_<ins>~~x~~</ins>_**");
    }

    #[test]
    fn test_bold_link_wraps_whole_link() {
        let style = TextStyle::default().bold().with_link("http://x");
        assert_eq!(render_run("click", &style), "**[click](http://x)**");
    }

    #[test]
    fn test_empty_link_is_ignored() {
        let style = TextStyle::default().italic().with_link("");
        assert_eq!(render_run("click", &style), "_click_");
    }

    #[test]
    fn test_whitespace_content_still_gets_markers() {
        assert_eq!(render_run(" ", &TextStyle::default().bold()), "** **");
    }

    #[test]
    fn test_marker_balance_for_every_flag_combination() {
        for bits in 0u8..16 {
            let style = TextStyle {
                bold: bits & 1 != 0,
                italic: bits & 2 != 0,
                underline: bits & 4 != 0,
                strikethrough: bits & 8 != 0,
                link: None,
            };
            let out = render_run("text", &style);
            assert_eq!(count(&out, "**") % 2, 0, "{out}");
            assert_eq!(count(&out, "~~") % 2, 0, "{out}");
            assert_eq!(count(&out, "_") % 2, 0, "{out}");
            assert_eq!(count(&out, UNDERLINE_OPEN), count(&out, UNDERLINE_CLOSE));
        }
    }
}
