//! Block-level Markdown rendering.

use log::debug;

use crate::error::{Error, Result};
use crate::model::{Block, Document, Paragraph, Table, TableCell, TextRun};

use super::style::render_run;

/// Renders the blocks of one document.
///
/// The renderer borrows the document so list references can be resolved
/// while walking its blocks.
pub struct BlockRenderer<'a> {
    doc: &'a Document,
}

impl<'a> BlockRenderer<'a> {
    /// Create a renderer for blocks of `doc`.
    pub fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    /// Render a block into a new string.
    pub fn render(&self, block: &Block) -> Result<String> {
        let mut output = String::new();
        self.render_into(&mut output, block)?;
        Ok(output)
    }

    /// Append the Markdown for `block` to `output`.
    pub fn render_into(&self, output: &mut String, block: &Block) -> Result<()> {
        match block {
            Block::Paragraph(p) => self.render_paragraph(output, p)?,
            Block::Table(t) => self.render_table(output, t),
            Block::SectionBreak => output.push_str("\n---\n"),
        }
        Ok(())
    }

    fn render_paragraph(&self, output: &mut String, para: &Paragraph) -> Result<()> {
        output.push_str(&self.paragraph_prefix(para)?);
        for run in &para.runs {
            output.push_str(render_styled_run(run).trim_end_matches(' '));
        }
        output.push_str("\n\n");
        Ok(())
    }

    fn paragraph_prefix(&self, para: &Paragraph) -> Result<String> {
        let Some(style) = para.style.as_ref() else {
            return Ok(String::new());
        };

        if let Some(level) = style.named_style.as_ref().and_then(|s| s.markdown_level()) {
            return Ok(format!("{} ", "#".repeat(level)));
        }

        if let Some(bullet) = style.bullet.as_ref() {
            let list = self.doc.get_list(&bullet.list_id).ok_or_else(|| {
                Error::MalformedInput(format!(
                    "paragraph references unknown list '{}'",
                    bullet.list_id
                ))
            })?;
            // Always "1."; Markdown renderers renumber ordered lists.
            let marker = if list.is_ordered() { "1. " } else { "- " };
            return Ok(marker.to_string());
        }

        Ok(String::new())
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        output.push('\n');

        for (i, row) in table.rows.iter().enumerate() {
            let cells: Vec<String> = row.cells.iter().map(render_cell).collect();
            output.push_str("| ");
            output.push_str(&cells.join(" | "));
            output.push_str(" |\n");

            // Separator after the first row
            if i == 0 {
                output.push('|');
                for _ in &row.cells {
                    output.push_str(" --- |");
                }
                output.push('\n');
            }
        }

        output.push('\n');
    }
}

fn render_styled_run(run: &TextRun) -> String {
    match run.style {
        Some(ref style) => render_run(&run.content, style),
        None => run.content.clone(),
    }
}

/// Render cell content on one line.
fn render_cell(cell: &TableCell) -> String {
    let skipped = cell.content.iter().filter(|b| !b.is_paragraph()).count();
    if skipped > 0 {
        debug!("Skipping {} non-paragraph block(s) inside table cell", skipped);
    }

    let paragraphs: Vec<String> = cell
        .paragraphs()
        .map(|para| {
            let mut text = String::new();
            for run in &para.runs {
                let flat = TextRun {
                    content: run.content.replace(['\r', '\n'], ""),
                    style: run.style.clone(),
                };
                text.push_str(render_styled_run(&flat).trim_end_matches(' '));
            }
            text
        })
        .filter(|text| !text.is_empty())
        .collect();

    paragraphs.join(" ")
}
