//! Benchmarks for gdocs2md conversion performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic documents built in memory.

use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gdocs2md::model::{ListDefinition, Table, TableRow, TextStyle};
use gdocs2md::{Document, ImageStore, InlineImage, Paragraph, TextRun};

/// Image store that accepts everything without touching the filesystem.
struct DiscardStore;

impl ImageStore for DiscardStore {
    fn persist(&self, _source_uri: &str, _destination: &Path) -> gdocs2md::Result<()> {
        Ok(())
    }
}

/// Creates a document with `sections` repetitions of a heading, styled
/// paragraphs, list items, a table and an image.
fn create_test_document(sections: usize) -> Document {
    let mut doc = Document::new("Benchmark");
    doc.add_list("bullets", ListDefinition::unordered());
    doc.add_list("numbers", ListDefinition::ordered());

    for i in 0..sections {
        doc.add_paragraph(Paragraph::heading(format!("Section {}\n", i + 1), 2));
        doc.add_paragraph(
            Paragraph::with_text("Plain text with ")
                .with_run(TextRun::bold("bold "))
                .with_run(TextRun::styled(
                    "linked",
                    TextStyle::default().italic().with_link("https://example.com/a_b"),
                ))
                .with_run(TextRun::new(" words.\n")),
        );
        doc.add_paragraph(Paragraph::list_item("first item\n", "bullets"));
        doc.add_paragraph(Paragraph::list_item("second item\n", "numbers"));

        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["Name", "Value"]));
        table.add_row(TableRow::from_strings(["alpha", "1"]));
        doc.add_table(table);
        doc.add_section_break();
        doc.add_image(
            format!("kix.{:04}", i),
            InlineImage::new(format!("https://img/{}", i)),
        );
    }

    doc
}

/// Benchmark whole-document conversion at various sizes.
fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for sections in [1, 10, 100].iter() {
        let doc = create_test_document(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| gdocs2md::convert(black_box(&doc), &DiscardStore).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the consolidation pass on its own.
fn bench_consolidate(c: &mut Criterion) {
    let text =
        "**Line1isbold\nmore** and _tilt \n_ plain ~~gone ~~ <ins>under\n</ins>\n\n".repeat(200);

    c.bench_function("consolidate", |b| {
        b.iter(|| gdocs2md::consolidate(black_box(&text)));
    });
}

criterion_group!(benches, bench_convert, bench_consolidate);
criterion_main!(benches);
