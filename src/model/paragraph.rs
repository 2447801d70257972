//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of styled text runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph style (heading or list context)
    pub style: Option<ParagraphStyle>,

    /// Text runs in document order
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with a single unstyled run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_run(TextRun::new(text));
        p
    }

    /// Create a heading paragraph.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let mut p = Self::with_text(text);
        p.style = Some(ParagraphStyle::heading(level));
        p
    }

    /// Create a list item belonging to the given list.
    pub fn list_item(text: impl Into<String>, list_id: impl Into<String>) -> Self {
        let mut p = Self::with_text(text);
        p.style = Some(ParagraphStyle::bullet(list_id));
        p
    }

    /// Add a run to the paragraph.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Builder form of [`Paragraph::add_run`].
    pub fn with_run(mut self, run: TextRun) -> Self {
        self.runs.push(run);
        self
    }

    /// Get the plain text of all runs.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.content.as_str()).collect()
    }

    /// Heading level if the paragraph uses a heading style.
    pub fn heading_level(&self) -> Option<u8> {
        match self.style.as_ref()?.named_style.as_ref()? {
            NamedStyle::Heading(level) => Some(*level),
            NamedStyle::Other(_) => None,
        }
    }

    /// List id if the paragraph is a list item.
    pub fn list_id(&self) -> Option<&str> {
        self.style
            .as_ref()?
            .bullet
            .as_ref()
            .map(|b| b.list_id.as_str())
    }
}

/// Paragraph styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Named style (headings and everything else)
    pub named_style: Option<NamedStyle>,

    /// List membership
    pub bullet: Option<Bullet>,
}

impl ParagraphStyle {
    /// Style for a heading of the given level.
    pub fn heading(level: u8) -> Self {
        Self {
            named_style: Some(NamedStyle::Heading(level)),
            bullet: None,
        }
    }

    /// Style for an item of the given list.
    pub fn bullet(list_id: impl Into<String>) -> Self {
        Self {
            named_style: None,
            bullet: Some(Bullet {
                list_id: list_id.into(),
            }),
        }
    }
}

/// Named paragraph style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedStyle {
    /// `HEADING_<n>`; the level is kept as written, 0 if it was not a number
    Heading(u8),
    /// Any other named style (`NORMAL_TEXT`, `TITLE`, ...)
    Other(String),
}

impl NamedStyle {
    /// Parse a named style type such as `HEADING_2` or `NORMAL_TEXT`.
    pub fn parse(value: &str) -> Self {
        match value.strip_prefix("HEADING_") {
            Some(level) => NamedStyle::Heading(level.parse().unwrap_or(0)),
            None => NamedStyle::Other(value.to_string()),
        }
    }

    /// Number of `#` characters used for this style, if it is a heading.
    ///
    /// Levels outside 1..=6 fall back to a single `#`.
    pub fn markdown_level(&self) -> Option<usize> {
        match self {
            NamedStyle::Heading(level @ 1..=6) => Some(*level as usize),
            NamedStyle::Heading(_) => Some(1),
            NamedStyle::Other(_) => None,
        }
    }
}

/// Reference from a paragraph to its list definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    /// Key into the document's list map
    pub list_id: String,
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Raw text; may be empty or whitespace-only and usually ends with `\n`
    /// on the last run of a paragraph
    pub content: String,

    /// Text styling
    pub style: Option<TextStyle>,
}

impl TextRun {
    /// Create a new unstyled run.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: None,
        }
    }

    /// Create a run with the given style.
    pub fn styled(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            style: Some(style),
        }
    }

    /// Create a bold run.
    pub fn bold(content: impl Into<String>) -> Self {
        Self::styled(content, TextStyle::default().bold())
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Inline styling flags. All flags are independent and may combine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Hyperlink target
    pub link: Option<Link>,
}

impl TextStyle {
    /// Set bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set underline.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Set strikethrough.
    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    /// Set the hyperlink target.
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(Link { url: url.into() });
        self
    }

    /// Check if any marker-producing flag is set.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline || self.strikethrough
    }

    /// Non-empty link URL, if any.
    pub fn link_url(&self) -> Option<&str> {
        self.link
            .as_ref()
            .map(|l| l.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

/// A hyperlink target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL
    pub url: String,
}
