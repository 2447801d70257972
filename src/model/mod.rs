//! Document model types.
//!
//! This module defines the representation the converter walks: a title, an
//! ordered sequence of blocks, and the list and image maps that blocks refer
//! to. Wire formats are translated into it by [`crate::source`].

mod activity;
mod block;
mod document;
mod paragraph;
mod table;

pub use activity::{Author, Comment, CommentList, Revision, RevisionList};
pub use block::Block;
pub use document::{Document, GlyphType, InlineImage, ListDefinition};
pub use paragraph::{Bullet, Link, NamedStyle, Paragraph, ParagraphStyle, TextRun, TextStyle};
pub use table::{Table, TableCell, TableRow};
