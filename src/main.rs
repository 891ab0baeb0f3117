use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;

use faa_forms_pdf::StoredDocument;

/// Render a stored maintenance document as an FAA form PDF.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Stored document (`id`, `docType`, `content`, `hash`), or a bare
    /// form record when --doc-type is given
    input: PathBuf,

    /// Directory the PDF is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Document type: 8130-3, 337 or 8010-4
    #[arg(long)]
    doc_type: Option<String>,

    /// Integrity hash stamped on every page
    #[arg(long)]
    hash: Option<String>,

    /// Storage id used when the record has no identifying field
    #[arg(long)]
    id: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let value: Value = serde_json::from_str(&fs::read_to_string(&cli.input)?)?;
    let bare = cli.doc_type.is_some() && value.get("content").is_none();
    let mut doc: StoredDocument = if bare {
        StoredDocument {
            content: value,
            ..StoredDocument::default()
        }
    } else {
        serde_json::from_value(value)?
    };

    if let Some(doc_type) = cli.doc_type {
        doc.doc_type = doc_type;
    }
    if cli.hash.is_some() {
        doc.hash = cli.hash;
    }
    if let Some(id) = cli.id {
        doc.id = id;
    }
    if doc.id.is_empty() {
        doc.id = cli
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
    }

    let path = doc.render()?.write_to(&cli.output_dir)?;
    println!("{}", path.display());
    Ok(())
}
