//! Integration tests for formatting consolidation.

use gdocs2md::render::{render_run, FormattingConsolidator};
use gdocs2md::{consolidate, TextStyle};

#[test]
fn test_split_bold_is_joined() {
    assert_eq!(
        consolidate("**Line1isbold\nmore**"),
        "**Line1isboldmore**\n\n"
    );
}

#[test]
fn test_every_rendered_style_survives_a_trailing_newline() {
    let styles = [
        TextStyle::default().bold(),
        TextStyle::default().italic(),
        TextStyle::default().underline(),
        TextStyle::default().strikethrough(),
        TextStyle::default().bold().italic().underline().strikethrough(),
    ];

    for style in styles {
        let fragment = render_run("word \n", &style);
        let clean = render_run("word", &style);
        assert_eq!(consolidate(&fragment), clean, "{fragment:?}");
    }
}

#[test]
fn test_following_paragraphs_are_not_swallowed() {
    let text = "**Heading run\n**\n\nNext paragraph with **bold** text\n\n";
    assert_eq!(
        consolidate(text),
        "**Heading run**\n\nNext paragraph with **bold** text\n\n"
    );
}

#[test]
fn test_stray_markers_keep_paragraphs_apart() {
    let text = "Call _private here\n\n\nThen _emph_ text\n\n";
    assert_eq!(consolidate(text), text);

    let text = "2 ** 3 is 8\n\n\n**Bold**\n\n\nplain\n\n";
    assert_eq!(consolidate(text), text);
}

#[test]
fn test_stray_underscore_before_styled_run() {
    let bold = render_run("Summary \n", &TextStyle::default().bold());
    let text = format!("Set _private\n\n{}\n\n", bold);
    assert_eq!(consolidate(&text), "Set _private\n\n**Summary**\n\n");
}

#[test]
fn test_identifiers_and_urls_keep_underscores() {
    let text = "Call `parse_file` then see [docs](https://x.dev/a_b_c)\n\n";
    assert_eq!(consolidate(text), text);
}

#[test]
fn test_idempotent_on_document_like_text() {
    let samples = [
        "# Title\n\n**Bold \n**\n\n_Italic\nsplit_ and <ins>under </ins>\n\n",
        "| **A** | _b_ |\n| --- | --- |\n\n~~old\n~~\n\n",
        "- item one\n\n1. **first\n**\n\n![Image](image_1.jpg)\n\n",
        "unpaired ** marker and _lonely\n",
        "_x](y \n_) _z_",
        "~~a\nb **c~~ d**",
        "Call _private here\n\n\nThen _emph_ text\n\n",
    ];

    for text in samples {
        let once = consolidate(text);
        assert_eq!(consolidate(&once), once, "{text:?}");
    }
}

#[test]
fn test_disabled_consolidator_is_identity() {
    let text = "**a\nb **";
    let out = FormattingConsolidator::new()
        .with_merge(false)
        .with_trim(false)
        .process(text);
    assert_eq!(out, text);
}
