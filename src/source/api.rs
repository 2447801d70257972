//! Wire types for the document API's JSON representation.
//!
//! Only the fields the converter reads are modelled; everything else in the
//! payload is ignored. [`ApiDocument`] converts into the crate's
//! [`Document`](crate::model::Document) with `TryFrom`.

use std::collections::HashMap;

use log::{debug, warn};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{
    Block, Bullet, Document, GlyphType, InlineImage, Link, ListDefinition, NamedStyle, Paragraph,
    ParagraphStyle, Table, TableCell, TableRow, TextRun, TextStyle,
};

/// Parse a document from its API JSON.
pub fn from_api_json(json: &str) -> Result<Document> {
    let api: ApiDocument = serde_json::from_str(json)
        .map_err(|e| Error::Fetch(format!("invalid document JSON: {}", e)))?;
    Document::try_from(api)
}

/// Top-level document resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiDocument {
    pub document_id: String,
    pub title: String,
    pub body: Option<ApiBody>,
    pub lists: HashMap<String, ApiList>,
    pub inline_objects: HashMap<String, ApiInlineObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiBody {
    pub content: Vec<StructuralElement>,
}

/// One body element. Exactly one of the fields is normally set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuralElement {
    pub paragraph: Option<ApiParagraph>,
    pub table: Option<ApiTable>,
    pub section_break: Option<serde_json::Value>,
    pub table_of_contents: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiParagraph {
    pub elements: Vec<ParagraphElement>,
    pub paragraph_style: Option<ApiParagraphStyle>,
    pub bullet: Option<ApiBullet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiParagraphStyle {
    pub named_style_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiBullet {
    pub list_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphElement {
    pub text_run: Option<ApiTextRun>,
    pub inline_object_element: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiTextRun {
    pub content: String,
    pub text_style: Option<ApiTextStyle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiTextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub link: Option<ApiLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiLink {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiTable {
    pub table_rows: Vec<ApiTableRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiTableRow {
    pub table_cells: Vec<ApiTableCell>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiTableCell {
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiList {
    pub list_properties: ApiListProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiListProperties {
    pub nesting_levels: Vec<ApiNestingLevel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiNestingLevel {
    pub glyph_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiInlineObject {
    pub inline_object_properties: Option<ApiInlineObjectProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiInlineObjectProperties {
    pub embedded_object: Option<ApiEmbeddedObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiEmbeddedObject {
    pub image_properties: Option<ApiImageProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiImageProperties {
    pub content_uri: String,
}

impl TryFrom<ApiDocument> for Document {
    type Error = Error;

    fn try_from(api: ApiDocument) -> Result<Self> {
        let mut doc = Document::new(api.title);
        doc.document_id = api.document_id;

        for (id, list) in api.lists {
            let glyph = list
                .list_properties
                .nesting_levels
                .first()
                .map(|level| GlyphType::parse(&level.glyph_type))
                .unwrap_or(GlyphType::Unspecified);
            doc.add_list(id, ListDefinition { glyph_type: glyph });
        }

        for (id, object) in api.inline_objects {
            let uri = object
                .inline_object_properties
                .and_then(|p| p.embedded_object)
                .and_then(|e| e.image_properties)
                .map(|i| i.content_uri)
                .filter(|uri| !uri.is_empty());
            match uri {
                Some(uri) => doc.add_image(id, InlineImage::new(uri)),
                None => debug!("Inline object {} has no image content, skipping", id),
            }
        }

        let content = api.body.map(|b| b.content).unwrap_or_default();
        doc.blocks = convert_elements(content);
        check_list_references(&doc, &doc.blocks)?;

        Ok(doc)
    }
}

/// Every bullet, including those inside table cells, must name a declared list.
fn check_list_references(doc: &Document, blocks: &[Block]) -> Result<()> {
    for block in blocks {
        match block {
            Block::Paragraph(paragraph) => {
                if let Some(id) = paragraph.list_id() {
                    if doc.get_list(id).is_none() {
                        return Err(Error::MalformedInput(format!(
                            "paragraph references undeclared list '{}'",
                            id
                        )));
                    }
                }
            }
            Block::Table(table) => {
                for cell in table.rows.iter().flat_map(|row| &row.cells) {
                    check_list_references(doc, &cell.content)?;
                }
            }
            Block::SectionBreak => {}
        }
    }
    Ok(())
}

fn convert_elements(elements: Vec<StructuralElement>) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(elements.len());

    for element in elements {
        if let Some(paragraph) = element.paragraph {
            blocks.push(Block::Paragraph(convert_paragraph(paragraph)));
        } else if let Some(table) = element.table {
            blocks.push(Block::Table(convert_table(table)));
        } else if element.section_break.is_some() {
            blocks.push(Block::SectionBreak);
        } else if element.table_of_contents.is_some() {
            debug!("Skipping table of contents");
        } else {
            warn!("Skipping unrecognized body element");
        }
    }

    blocks
}

fn convert_paragraph(api: ApiParagraph) -> Paragraph {
    let named_style = api
        .paragraph_style
        .map(|s| s.named_style_type)
        .filter(|s| !s.is_empty())
        .map(|s| NamedStyle::parse(&s));
    let bullet = api.bullet.map(|b| Bullet { list_id: b.list_id });

    let style = (named_style.is_some() || bullet.is_some())
        .then_some(ParagraphStyle { named_style, bullet });

    let mut skipped = 0;
    let runs = api
        .elements
        .into_iter()
        .filter_map(|element| {
            if element.text_run.is_none() {
                skipped += 1;
            }
            element.text_run
        })
        .map(|run| TextRun {
            content: run.content,
            style: run.text_style.map(convert_text_style),
        })
        .collect();

    if skipped > 0 {
        debug!("Skipped {} non-text paragraph element(s)", skipped);
    }

    Paragraph { style, runs }
}

fn convert_text_style(api: ApiTextStyle) -> TextStyle {
    TextStyle {
        bold: api.bold,
        italic: api.italic,
        underline: api.underline,
        strikethrough: api.strikethrough,
        link: api.link.map(|l| Link { url: l.url }),
    }
}

fn convert_table(api: ApiTable) -> Table {
    let mut table = Table::new();
    for row in api.table_rows {
        let cells = row
            .table_cells
            .into_iter()
            .map(|cell| TableCell {
                content: convert_elements(cell.content),
            })
            .collect();
        table.add_row(TableRow::new(cells));
    }
    table
}
