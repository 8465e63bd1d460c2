//! Knowledge ingestion commands.
//!
//! # Usage
//!
//! ```bash
//! bk-cli ingest text --title "Delivery zones" --source ops-wiki --file zones.txt
//! bk-cli ingest url --url https://example.com/faq --source website
//! bk-cli ingest pdf --file menu.pdf --title "Menu 2026" --source kitchen
//! ```

use std::path::{Path, PathBuf};

use barakah_client::types::{
    DistilledUrlIngest, PdfUpload, TextDistill, TextIngest, UrlIngest,
};

use super::{CliError, authed_backend};

/// Read ingestion text from a file, or stdin when no file is given.
fn read_text(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
            Ok(buf)
        }
    }
}

#[allow(clippy::print_stdout)]
fn report(verb: &str, receipt: Option<serde_json::Value>) {
    match receipt {
        Some(value) => println!("{verb}: {value}"),
        None => println!("{verb}."),
    }
}

/// Ingest raw text.
pub async fn text(
    title: String,
    source: String,
    lang: Option<String>,
    description: Option<String>,
    file: Option<PathBuf>,
) -> Result<(), CliError> {
    let payload = TextIngest {
        title,
        source,
        lang,
        description,
        text: read_text(file.as_deref())?,
    };
    let receipt = authed_backend()?.ingest_text(&payload).await?;
    report("Ingested", receipt);
    Ok(())
}

/// Ingest a URL.
pub async fn url(
    url: String,
    source: String,
    lang: Option<String>,
    description: Option<String>,
) -> Result<(), CliError> {
    let payload = UrlIngest {
        url,
        source,
        lang,
        description,
    };
    let receipt = authed_backend()?.ingest_url(&payload).await?;
    report("Ingested", receipt);
    Ok(())
}

/// Ingest a URL with distillation.
pub async fn url_distilled(
    url: String,
    source: String,
    lang: Option<String>,
    description: Option<String>,
    entity_hints: Vec<String>,
) -> Result<(), CliError> {
    let payload = DistilledUrlIngest {
        url,
        source,
        lang,
        description,
        entity_hints: if entity_hints.is_empty() {
            None
        } else {
            Some(entity_hints)
        },
    };
    let receipt = authed_backend()?.ingest_url_distilled(&payload).await?;
    report("Ingested", receipt);
    Ok(())
}

/// Distill text into structured facts.
pub async fn distill_text(
    source: String,
    lang: Option<String>,
    description: Option<String>,
    entity_hints: Vec<String>,
    file: Option<PathBuf>,
) -> Result<(), CliError> {
    let payload = TextDistill {
        text: read_text(file.as_deref())?,
        source,
        lang,
        description,
        entity_hints: if entity_hints.is_empty() {
            None
        } else {
            Some(entity_hints)
        },
    };
    let receipt = authed_backend()?.distill_text(&payload).await?;
    report("Distilled", receipt);
    Ok(())
}

/// Ingest a PDF file.
pub async fn pdf(
    file: PathBuf,
    title: String,
    source: String,
    lang: Option<String>,
    description: Option<String>,
) -> Result<(), CliError> {
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.pdf".to_owned());
    let upload = PdfUpload {
        file_name,
        bytes: std::fs::read(&file)?,
        title,
        source,
        lang,
        description,
    };
    let receipt = authed_backend()?.ingest_pdf(upload).await?;
    report("Ingested", receipt);
    Ok(())
}
