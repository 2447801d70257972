//! Markdown rendering: inline styles, blocks, consolidation and the
//! comment/revision sections.

pub mod annotations;
mod block;
mod consolidate;
mod result;
mod style;

pub use annotations::{render_comments, render_revision, revision_file_name};
pub use block::BlockRenderer;
pub use consolidate::{consolidate, FormattingConsolidator, Marker};
pub use result::ExtractionStats;
pub use style::{render_run, UNDERLINE_CLOSE, UNDERLINE_OPEN};
