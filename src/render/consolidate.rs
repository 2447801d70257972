//! Post-processing pass that repairs inline formatting split by block
//! boundaries.
//!
//! The pass runs in two ordered groups. The merge group joins marker spans
//! whose body was broken by a newline (`**a\nb**` becomes `**ab**` followed by
//! a blank line). The trim group removes spaces and newlines left in front of
//! closing markers (`**bold \n**` becomes `**bold**`). Each group makes one
//! linear pass per marker kind, in the order bold, italic, strikethrough,
//! underline.
//!
//! Spans are found by pairing marker tokens within one paragraph; a blank
//! line always ends a span. Both groups are repeated until the text stops
//! changing, so running the pass twice gives the same text as running it
//! once. Every round that changes the text either removes a line break from
//! inside a paragraph or shortens the text without adding one, so the loop
//! terminates.

use std::ops::Range;
use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use super::style::{UNDERLINE_CLOSE, UNDERLINE_OPEN};

/// Link and image destinations: `](...)`. Markers inside are literal.
static LINK_DESTINATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\([^)\n]*\)").expect("link destination pattern is valid"));

/// Consolidate formatting with the default settings.
pub fn consolidate(text: &str) -> String {
    FormattingConsolidator::default().process(text)
}

/// Inline marker kinds handled by the consolidator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `**...**`
    Bold,
    /// `_..._`
    Italic,
    /// `~~...~~`
    Strikethrough,
    /// `<ins>...</ins>`
    Underline,
}

impl Marker {
    /// All marker kinds in processing order.
    pub const ALL: [Marker; 4] = [
        Marker::Bold,
        Marker::Italic,
        Marker::Strikethrough,
        Marker::Underline,
    ];

    /// Opening token.
    pub fn opener(self) -> &'static str {
        match self {
            Marker::Bold => "**",
            Marker::Italic => "_",
            Marker::Strikethrough => "~~",
            Marker::Underline => UNDERLINE_OPEN,
        }
    }

    /// Closing token.
    pub fn closer(self) -> &'static str {
        match self {
            Marker::Underline => UNDERLINE_CLOSE,
            other => other.opener(),
        }
    }
}

/// Text consolidation pass.
#[derive(Debug, Clone)]
pub struct FormattingConsolidator {
    /// Join spans broken by newlines
    pub merge_split_spans: bool,

    /// Strip whitespace in front of closing markers
    pub trim_before_closers: bool,
}

impl Default for FormattingConsolidator {
    fn default() -> Self {
        Self {
            merge_split_spans: true,
            trim_before_closers: true,
        }
    }
}

impl FormattingConsolidator {
    /// Create a consolidator with both groups enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the merge group.
    pub fn with_merge(mut self, enabled: bool) -> Self {
        self.merge_split_spans = enabled;
        self
    }

    /// Enable or disable the trim group.
    pub fn with_trim(mut self, enabled: bool) -> Self {
        self.trim_before_closers = enabled;
        self
    }

    /// Run the pass over `text`.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();
        let mut rounds = 0;

        loop {
            let next = self.round(&result);
            if next == result {
                break;
            }
            result = next;
            rounds += 1;
        }

        if rounds > 1 {
            trace!("Consolidation settled after {} rounds", rounds);
        }
        result
    }

    /// One application of both groups.
    fn round(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.merge_split_spans {
            for marker in Marker::ALL {
                let (next, merged) = merge_split_spans(&result, marker);
                if merged > 0 {
                    trace!("Merged {} split {:?} span(s)", merged, marker);
                }
                result = next;
            }
        }

        if self.trim_before_closers {
            for marker in Marker::ALL {
                let (next, trimmed) = trim_before_closers(&result, marker);
                if trimmed > 0 {
                    trace!("Trimmed whitespace before {} {:?} closer(s)", trimmed, marker);
                }
                result = next;
            }
        }

        result
    }
}

/// An opener/closer pair, as byte ranges into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    open: Range<usize>,
    close: Range<usize>,
}

impl Span {
    fn inner<'t>(&self, text: &'t str) -> &'t str {
        &text[self.open.end..self.close.start]
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn is_stray_whitespace(c: char) -> bool {
    c == ' ' || is_line_break(c)
}

fn merge_split_spans(text: &str, marker: Marker) -> (String, usize) {
    let spans = find_spans(text, marker);
    let mut output = String::with_capacity(text.len() + 2 * spans.len());
    let mut cursor = 0;
    let mut merged = 0;

    for span in &spans {
        let inner = span.inner(text);
        output.push_str(&text[cursor..span.open.end]);

        // Only a break followed by more text splits the span; trailing
        // breaks belong to the trim group.
        if content_end(inner).contains(is_line_break) {
            output.extend(inner.chars().filter(|c| !is_line_break(*c)));
            output.push_str(&text[span.close.clone()]);
            output.push_str("\n\n");
            merged += 1;
        } else {
            output.push_str(&text[span.open.end..span.close.end]);
        }
        cursor = span.close.end;
    }

    output.push_str(&text[cursor..]);
    (output, merged)
}

/// `inner` without trailing whitespace and trailing marker tokens, so a
/// nested closer after a final newline does not count as text.
fn content_end(inner: &str) -> &str {
    let mut rest = inner;
    loop {
        rest = rest.trim_end_matches(is_stray_whitespace);
        let token = Marker::ALL
            .iter()
            .flat_map(|m| [m.opener(), m.closer()])
            .find(|token| rest.ends_with(token));
        match token {
            Some(token) => rest = &rest[..rest.len() - token.len()],
            None => return rest,
        }
    }
}

fn trim_before_closers(text: &str, marker: Marker) -> (String, usize) {
    let spans = find_spans(text, marker);
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut trimmed = 0;

    for span in &spans {
        let inner = span.inner(text);
        let mut kept = inner.trim_end_matches(is_stray_whitespace);

        // Gluing an italic closer between two letters would turn it into
        // literal text.
        if marker == Marker::Italic
            && ends_alphanumeric(kept)
            && starts_alphanumeric(&text[span.close.end..])
        {
            kept = inner;
        }

        if kept.len() != inner.len() {
            trimmed += 1;
        }

        output.push_str(&text[cursor..span.open.end]);
        output.push_str(kept);
        output.push_str(&text[span.close.clone()]);
        cursor = span.close.end;
    }

    output.push_str(&text[cursor..]);
    (output, trimmed)
}

/// Pair marker tokens of one kind, left to right within each paragraph.
fn find_spans(text: &str, marker: Marker) -> Vec<Span> {
    let opaque: Vec<Range<usize>> = LINK_DESTINATION
        .find_iter(text)
        .map(|m| m.range())
        .collect();
    let is_opaque = |pos: usize| opaque.iter().any(|r| r.contains(&pos));
    let breaks = paragraph_breaks(text);
    let paragraph = |pos: usize| breaks.partition_point(|&b| b < pos);

    let mut tokens: Vec<(Range<usize>, bool)> = text
        .match_indices(marker.opener())
        .map(|(start, token)| (start..start + token.len(), true))
        .filter(|(r, _)| marker != Marker::Italic || !is_intraword(text, r.start))
        .collect();
    if marker == Marker::Underline {
        tokens.extend(
            text.match_indices(marker.closer())
                .map(|(start, token)| (start..start + token.len(), false)),
        );
        tokens.sort_by_key(|(r, _)| r.start);
    }

    let mut spans = Vec::new();
    let mut pending: Option<Range<usize>> = None;

    for (range, is_opener) in tokens {
        if is_opaque(range.start) {
            continue;
        }
        if pending
            .as_ref()
            .is_some_and(|open| paragraph(open.start) != paragraph(range.start))
        {
            pending = None;
        }
        match pending.take() {
            // Symmetric markers close on the next token; tags need a closer.
            Some(open) if marker != Marker::Underline || !is_opener => {
                spans.push(Span { open, close: range });
            }
            Some(open) => pending = Some(open),
            None if is_opener => pending = Some(range),
            None => {}
        }
    }

    spans
}

/// Offsets of newlines that end a paragraph: newlines followed by a blank
/// line.
fn paragraph_breaks(text: &str) -> Vec<usize> {
    text.match_indices('\n')
        .map(|(pos, _)| pos)
        .filter(|&pos| {
            text[pos + 1..]
                .trim_start_matches([' ', '\t', '\r'])
                .starts_with('\n')
        })
        .collect()
}

/// `_` between two alphanumerics (`snake_case`) is not a marker.
fn is_intraword(text: &str, pos: usize) -> bool {
    ends_alphanumeric(&text[..pos]) && starts_alphanumeric(&text[pos + 1..])
}

fn ends_alphanumeric(s: &str) -> bool {
    s.chars().next_back().is_some_and(char::is_alphanumeric)
}

fn starts_alphanumeric(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_alphanumeric)
}
