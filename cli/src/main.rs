//! gdocs2md CLI - document to Markdown export tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use gdocs2md::source::{extract_document_id, extract_folder_id};
use gdocs2md::storage::{HttpImageStore, ImageStore, LocalImageStore};
use gdocs2md::{
    list_container, ConvertOptions, ExportSummary, Exporter, ExtractionStats, JsonFileSource,
};

#[derive(Parser)]
#[command(name = "gdocs2md")]
#[command(version)]
#[command(about = "Export documents to Markdown with images, comments and revisions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export documents to Markdown folders
    Convert {
        /// Document ids, document URLs or paths to exported JSON
        #[arg(value_name = "DOC", required_unless_present = "all", conflicts_with = "all")]
        documents: Vec<String>,

        /// Export every document in a folder: a folder URL or a directory below --source-dir
        #[arg(long, value_name = "FOLDER")]
        all: Option<String>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", env = "GDOCS2MD_OUTPUT_DIR", default_value = ".")]
        output: PathBuf,

        /// Directory holding exported document JSON
        #[arg(long, value_name = "DIR", env = "GDOCS2MD_SOURCE_DIR", default_value = ".")]
        source_dir: PathBuf,

        /// Copy images from local paths instead of downloading them
        #[arg(long)]
        local_images: bool,

        /// Export one document at a time
        #[arg(long)]
        sequential: bool,

        /// Skip revision files
        #[arg(long)]
        no_revisions: bool,

        /// Skip formatting consolidation
        #[arg(long)]
        raw: bool,

        /// Print a JSON summary instead of the tree view
        #[arg(long)]
        json: bool,
    },

    /// Repair Markdown formatting split across lines
    Consolidate {
        /// Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

struct ConvertArgs {
    documents: Vec<String>,
    all: Option<String>,
    output: PathBuf,
    source_dir: PathBuf,
    local_images: bool,
    sequential: bool,
    no_revisions: bool,
    raw: bool,
    json: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            documents,
            all,
            output,
            source_dir,
            local_images,
            sequential,
            no_revisions,
            raw,
            json,
        } => cmd_convert(ConvertArgs {
            documents,
            all,
            output,
            source_dir,
            local_images,
            sequential,
            no_revisions,
            raw,
            json,
        }),
        Commands::Consolidate { input, output } => cmd_consolidate(&input, output.as_deref()),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(args: ConvertArgs) -> Result<(), Box<dyn std::error::Error>> {
    let source = JsonFileSource::new(&args.source_dir);
    let (output, documents) = match args.all {
        Some(ref folder) => {
            let listing = list_container(&source, extract_folder_id(folder), &args.output)?;
            if !args.json {
                println!(
                    "{} {} document(s) in {}",
                    "Found".green().bold(),
                    listing.documents.len(),
                    listing.name.cyan()
                );
            }
            (listing.folder, listing.documents)
        }
        None => (args.output.clone(), args.documents.clone()),
    };
    fs::create_dir_all(&output)?;

    let store: Box<dyn ImageStore + Sync> = if args.local_images {
        Box::new(LocalImageStore::new().with_base_dir(&args.source_dir))
    } else {
        Box::new(HttpImageStore::new())
    };
    let options = ConvertOptions::new()
        .with_consolidation(!args.raw)
        .with_stats(true);

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let export_one = |doc: &String| {
        let id = extract_document_id(doc);
        pb.set_message(id.to_string());
        let result = Exporter::new(&source, store.as_ref(), &output)
            .with_options(options.clone())
            .with_revisions(!args.no_revisions)
            .export(id);
        pb.inc(1);
        (doc.clone(), result)
    };

    let results: Vec<_> = if args.sequential {
        documents.iter().map(export_one).collect()
    } else {
        documents.par_iter().map(export_one).collect()
    };

    pb.finish_and_clear();

    let mut summaries = Vec::new();
    let mut failures = 0;
    for (doc, result) in results {
        match result {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", "Failed".red().bold(), doc, e);
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for summary in &summaries {
            print_summary(summary);
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} document(s) failed", failures, documents.len()).into());
    }

    let mut total = ExtractionStats::new();
    for stats in summaries.iter().filter_map(|s| s.stats.as_ref()) {
        total.merge(stats);
    }

    if !args.json {
        println!(
            "\n{} {} document(s) exported ({} words, {} images)",
            "Done!".green().bold(),
            summaries.len(),
            total.word_count,
            total.image_count
        );
    }
    Ok(())
}

fn print_summary(summary: &ExportSummary) {
    println!(
        "\n{} {}",
        summary.title.cyan().bold(),
        summary.folder.display().to_string().dimmed()
    );
    println!("  {} document.md", "├─".dimmed());
    if summary.image_count > 0 {
        println!("  {} {} image(s)", "├─".dimmed(), summary.image_count);
    }
    if summary.comment_count > 0 {
        println!("  {} {} comment(s)", "├─".dimmed(), summary.comment_count);
    }
    for path in &summary.revision_paths {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} {}", "├─".dimmed(), name);
    }
    if let Some(ref stats) = summary.stats {
        println!(
            "  {} {} words, {} headings, {} tables",
            "└─".dimmed(),
            stats.word_count,
            stats.heading_count,
            stats.table_count
        );
    }
}

fn cmd_consolidate(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let consolidated = gdocs2md::consolidate(&text);

    if let Some(path) = output {
        fs::write(path, &consolidated)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", consolidated);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "gdocs2md".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document to Markdown export tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_args_parse() {
        let cli = Cli::try_parse_from([
            "gdocs2md",
            "convert",
            "abc",
            "def",
            "-o",
            "out",
            "--sequential",
            "--no-revisions",
        ])
        .unwrap();
        let Commands::Convert {
            documents,
            output,
            sequential,
            no_revisions,
            ..
        } = cli.command
        else {
            panic!("expected convert");
        };
        assert_eq!(documents, vec!["abc", "def"]);
        assert_eq!(output, PathBuf::from("out"));
        assert!(sequential);
        assert!(no_revisions);
    }

    #[test]
    fn test_consolidate_file() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in.md");
        let output = tmp.path().join("out.md");
        fs::write(&input, "**Line1isbold\nmore**").unwrap();

        cmd_consolidate(&input, Some(&output)).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "**Line1isboldmore**\n\n");
    }

    #[test]
    fn test_convert_local_export() {
        let tmp = TempDir::new().unwrap();
        let source_dir = tmp.path().join("src");
        fs::create_dir_all(&source_dir).unwrap();
        fs::write(source_dir.join("doc1.json"), r#"{"title": "Local"}"#).unwrap();

        cmd_convert(ConvertArgs {
            documents: vec!["doc1".to_string()],
            all: None,
            output: tmp.path().join("out"),
            source_dir,
            local_images: true,
            sequential: true,
            no_revisions: false,
            raw: false,
            json: true,
        })
        .unwrap();

        let markdown = fs::read_to_string(tmp.path().join("out/Local/document.md")).unwrap();
        assert_eq!(markdown, "# Local\n\n");
    }

    #[test]
    fn test_convert_all_requires_no_documents() {
        let cli = Cli::try_parse_from(["gdocs2md", "convert", "--all", "team"]).unwrap();
        let Commands::Convert { documents, all, .. } = cli.command else {
            panic!("expected convert");
        };
        assert!(documents.is_empty());
        assert_eq!(all.as_deref(), Some("team"));

        assert!(Cli::try_parse_from(["gdocs2md", "convert"]).is_err());
        assert!(Cli::try_parse_from(["gdocs2md", "convert", "doc1", "--all", "team"]).is_err());
    }

    #[test]
    fn test_convert_all_exports_into_container_folder() {
        let tmp = TempDir::new().unwrap();
        let source_dir = tmp.path().join("src");
        let team = source_dir.join("Team");
        fs::create_dir_all(&team).unwrap();
        fs::write(team.join("one.json"), r#"{"title": "One"}"#).unwrap();
        fs::write(team.join("two.json"), r#"{"title": "Two"}"#).unwrap();
        fs::write(team.join("two.comments.json"), r#"{"comments": []}"#).unwrap();

        cmd_convert(ConvertArgs {
            documents: Vec::new(),
            all: Some("Team".to_string()),
            output: tmp.path().join("out"),
            source_dir,
            local_images: true,
            sequential: false,
            no_revisions: true,
            raw: false,
            json: true,
        })
        .unwrap();

        let base = tmp.path().join("out").join("Team");
        assert_eq!(
            fs::read_to_string(base.join("One").join("document.md")).unwrap(),
            "# One\n\n"
        );
        assert_eq!(
            fs::read_to_string(base.join("Two").join("document.md")).unwrap(),
            "# Two\n\n"
        );
        assert_eq!(fs::read_dir(&base).unwrap().count(), 2);
    }
}
