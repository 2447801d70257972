//! Comment and revision sections exported next to a document.

use chrono::NaiveDateTime;

use crate::model::{Author, Comment, Revision};

use super::consolidate::consolidate;

/// Heading that opens the comments section.
pub const COMMENTS_HEADING: &str = "## COMMENTS:";

/// Render the comments section appended to a document.
///
/// Returns an empty string when there are no comments. Comments are numbered
/// from 1 in listing order.
pub fn render_comments(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return String::new();
    }

    let mut output = format!("\n\n{}\n", COMMENTS_HEADING);
    for (i, comment) in comments.iter().enumerate() {
        output.push_str(&format!(
            "**Comment {} by {} on {}**: {}\n",
            i + 1,
            format_author(&comment.author),
            comment.created_time,
            comment.content
        ));
    }
    output
}

/// Render one revision: a metadata header followed by the revision's text.
///
/// The result is consolidated like a converted document.
pub fn render_revision(revision: &Revision, content: &str) -> String {
    let text = format!(
        "**Revision ID:** {}\n**Modified Time:** {}\n**Modified By:** {}\n\n{}",
        revision.id,
        revision.modified_time,
        format_author(&revision.last_modifying_user),
        content
    );
    consolidate(&text)
}

/// File name for an exported revision, e.g. `20240301T101500_42.md`.
pub fn revision_file_name(exported_at: &NaiveDateTime, revision_id: &str) -> String {
    format!("{}_{}.md", exported_at.format("%Y%m%dT%H%M%S"), revision_id)
}

fn format_author(author: &Author) -> String {
    format!("{} ({})", author.display_name, author.email_address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn comment(content: &str, name: &str) -> Comment {
        Comment {
            content: content.to_string(),
            author: Author::new(name, format!("{}@example.com", name.to_lowercase())),
            created_time: "2024-03-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_no_comments_renders_nothing() {
        assert_eq!(render_comments(&[]), "");
    }

    #[test]
    fn test_comments_are_numbered() {
        let out = render_comments(&[comment("First", "Ana"), comment("Second", "Bo")]);
        assert_eq!(
            out,
            "\n\n## COMMENTS:\n\
             **Comment 1 by Ana (ana@example.com) on 2024-03-01T10:00:00Z**: First\n\
             **Comment 2 by Bo (bo@example.com) on 2024-03-01T10:00:00Z**: Second\n"
        );
    }

    #[test]
    fn test_revision_header_and_consolidation() {
        let revision = Revision {
            id: "7".to_string(),
            modified_time: "2024-03-02T08:30:00Z".to_string(),
            last_modifying_user: Author::new("Ana", "ana@example.com"),
        };
        let out = render_revision(&revision, "Body **bold \n**\n");
        assert_eq!(
            out,
            "**Revision ID:** 7\n\
             **Modified Time:** 2024-03-02T08:30:00Z\n\
             **Modified By:** Ana (ana@example.com)\n\n\
             Body **bold**\n"
        );
    }

    #[test]
    fn test_revision_file_name() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        assert_eq!(revision_file_name(&at, "42"), "20240301T101500_42.md");
    }
}
