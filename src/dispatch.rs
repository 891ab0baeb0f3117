use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;
use crate::model::{Form337, Form8010, Form8130, Record};
use crate::{render_337, render_8010, render_8130};

pub const CONTENT_TYPE: &str = "application/pdf";

/// Declared type of a stored document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DocType {
    Form8130_3,
    Form337,
    Form8010_4,
    /// Rendered with the Form 337 layout.
    Unknown(String),
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> &'a str {
    match s.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => s[prefix.len()..].trim_start(),
        _ => s,
    }
}

impl DocType {
    /// Accepts `8130-3`, `FAA Form 8130-3`, `form 337` and so on.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let code = strip_prefix_ignore_case(trimmed, "FAA ");
        let code = strip_prefix_ignore_case(code, "Form ");
        match code {
            "8130-3" => DocType::Form8130_3,
            "337" => DocType::Form337,
            "8010-4" => DocType::Form8010_4,
            _ => DocType::Unknown(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DocType::Form8130_3 => "8130-3",
            DocType::Form337 => "337",
            DocType::Form8010_4 => "8010-4",
            DocType::Unknown(name) => name,
        }
    }
}

impl FromStr for DocType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DocType::parse(s))
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub doc_type: DocType,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl RenderedPdf {
    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    /// Value for a `Content-Disposition` response header.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }

    /// Write the PDF as `dir/<filename>`, creating `dir` if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, Error> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.bytes)?;
        log::debug!("wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Render a document whose content is stored as a JSON string.
pub fn dispatch(
    doc_type: &str,
    content_json: &str,
    hash: Option<&str>,
    storage_id: &str,
) -> Result<RenderedPdf, Error> {
    let content: Value = serde_json::from_str(content_json)?;
    dispatch_value(doc_type, &content, hash, storage_id)
}

pub fn dispatch_value(
    doc_type: &str,
    content: &Value,
    hash: Option<&str>,
    storage_id: &str,
) -> Result<RenderedPdf, Error> {
    let doc_type = DocType::parse(doc_type);
    let (bytes, ident) = match &doc_type {
        DocType::Form8130_3 => {
            let record = Form8130::from_value(content)?;
            (render_8130(&record, hash)?, record.block3)
        }
        DocType::Form337 => {
            let record = Form337::from_value(content)?;
            let ident = record.aircraft.as_ref().and_then(|a| a.registration.clone());
            (render_337(&record, hash)?, ident)
        }
        DocType::Form8010_4 => {
            let record = Form8010::from_value(content)?;
            let ident = record.defect_part.as_ref().and_then(|p| p.serial_number.clone());
            (render_8010(&record, hash)?, ident)
        }
        DocType::Unknown(name) => {
            log::warn!("Unknown document type {name:?} for {storage_id}, rendering as Form 337");
            let record = Form337::from_value(content)?;
            let ident = record.aircraft.as_ref().and_then(|a| a.registration.clone());
            (render_337(&record, hash)?, ident)
        }
    };
    let filename = filename(&doc_type, ident.as_deref(), storage_id);
    log::debug!("{storage_id}: {filename} ({} bytes)", bytes.len());
    Ok(RenderedPdf {
        doc_type,
        filename,
        bytes,
    })
}

/// Suggested download name: the form's identifying field when present,
/// otherwise the storage id.
pub fn filename(doc_type: &DocType, ident: Option<&str>, storage_id: &str) -> String {
    let ident = ident
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(storage_id);
    let stem = match doc_type {
        DocType::Form8130_3 => format!("8130-3_{ident}"),
        DocType::Form337 => format!("Form337_{ident}"),
        DocType::Form8010_4 => format!("Form8010-4_{ident}"),
        DocType::Unknown(name) if name.is_empty() => format!("document_{ident}"),
        DocType::Unknown(name) => format!("{name}_{ident}"),
    };
    let safe: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    format!("{safe}.pdf")
}

/// A generated document as persisted: `content` is either the stored JSON
/// string or an inline object.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredDocument {
    pub id: String,
    pub doc_type: String,
    pub content: Value,
    pub hash: Option<String>,
}

impl StoredDocument {
    pub fn render(&self) -> Result<RenderedPdf, Error> {
        let hash = self.hash.as_deref();
        match &self.content {
            Value::String(json) => dispatch(&self.doc_type, json, hash, &self.id),
            other => dispatch_value(&self.doc_type, other, hash, &self.id),
        }
    }
}
