//! Comment and revision metadata attached to a document.
//!
//! These mirror the drive API's JSON (camelCase field names) so exported
//! listings can be deserialized directly.

use serde::{Deserialize, Serialize};

/// A person who commented on or edited a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
    /// Display name
    pub display_name: String,

    /// Email address (may be empty when hidden)
    pub email_address: String,
}

impl Author {
    /// Create an author.
    pub fn new(display_name: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email_address: email_address.into(),
        }
    }
}

/// A comment on a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    /// Comment text
    pub content: String,

    /// Comment author
    pub author: Author,

    /// Creation time as reported by the service (RFC 3339)
    pub created_time: String,
}

/// A historical revision of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Revision {
    /// Revision identifier
    pub id: String,

    /// Modification time as reported by the service (RFC 3339)
    pub modified_time: String,

    /// Last user who modified the document in this revision
    pub last_modifying_user: Author,
}

/// Listing wrapper for comments (`{"comments": [...]}`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentList {
    /// Comments in listing order
    pub comments: Vec<Comment>,
}

/// Listing wrapper for revisions (`{"revisions": [...]}`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RevisionList {
    /// Revisions in listing order
    pub revisions: Vec<Revision>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_from_json() {
        let json = r#"{
            "comments": [{
                "content": "Looks good",
                "createdTime": "2024-03-01T10:00:00.000Z",
                "author": {"displayName": "Sam", "emailAddress": "sam@example.com"}
            }]
        }"#;
        let list: CommentList = serde_json::from_str(json).unwrap();
        assert_eq!(list.comments.len(), 1);
        assert_eq!(list.comments[0].author.display_name, "Sam");
        assert_eq!(list.comments[0].created_time, "2024-03-01T10:00:00.000Z");
    }

    #[test]
    fn test_revision_missing_fields_default() {
        let json = r#"{"revisions": [{"id": "42"}]}"#;
        let list: RevisionList = serde_json::from_str(json).unwrap();
        assert_eq!(list.revisions[0].id, "42");
        assert_eq!(list.revisions[0].last_modifying_user, Author::default());
    }
}
