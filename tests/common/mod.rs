#![allow(dead_code)]

use std::fs;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Document, Object};
use serde_json::Value;

use faa_forms_pdf::Record;

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parsed JSON from tests/fixtures/.
pub fn fixture(name: &str) -> Value {
    let path = Path::new("tests/fixtures").join(name);
    let raw = fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

pub fn record<R: Record>(name: &str) -> R {
    R::from_value(&fixture(name)).unwrap()
}

pub fn assert_pdf(bytes: &[u8]) {
    assert!(bytes.starts_with(b"%PDF-"), "missing %PDF- header");
    assert!(bytes.len() > 1024, "only {} bytes", bytes.len());
    load(bytes);
}

pub fn load(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("output parses as PDF")
}

pub fn page_count(bytes: &[u8]) -> usize {
    load(bytes).get_pages().len()
}

/// Text shown on each page, one string per page. WinAnsi bytes are read as
/// Latin-1, which is exact for ASCII.
pub fn page_texts(bytes: &[u8]) -> Vec<String> {
    let doc = load(bytes);
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let raw = doc.get_page_content(page_id).expect("page content");
            let content = Content::decode(&raw).expect("content stream decodes");
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .flat_map(|op| op.operands.iter())
                .filter_map(|operand| match operand {
                    Object::String(s, _) => Some(s.iter().map(|&b| b as char).collect::<String>()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// All page text with whitespace runs collapsed.
pub fn text(bytes: &[u8]) -> String {
    normalized(&page_texts(bytes).join(" "))
}

pub fn normalized(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn info_entry(bytes: &[u8], key: &[u8]) -> Option<String> {
    let doc = load(bytes);
    let info_id = doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
    match doc.get_dictionary(info_id).ok()?.get(key).ok()? {
        Object::String(s, _) => Some(String::from_utf8_lossy(s).into_owned()),
        _ => None,
    }
}

/// Font resource names (`F1`..) used to show strings equal to `needle`.
pub fn fonts_showing(bytes: &[u8], needle: &str) -> Vec<String> {
    let doc = load(bytes);
    let mut found = Vec::new();
    for &page_id in doc.get_pages().values() {
        let raw = doc.get_page_content(page_id).expect("page content");
        let content = Content::decode(&raw).expect("content stream decodes");
        let mut font = String::new();
        for op in &content.operations {
            match (op.operator.as_str(), op.operands.first()) {
                ("Tf", Some(Object::Name(name))) => font = String::from_utf8_lossy(name).into_owned(),
                ("Tj", Some(Object::String(s, _))) if s.as_slice() == needle.as_bytes() => {
                    found.push(font.clone());
                }
                _ => {}
            }
        }
    }
    found
}

/// Lowest text baseline (`Td` y) on each page.
pub fn lowest_baselines(bytes: &[u8]) -> Vec<f32> {
    let doc = load(bytes);
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let raw = doc.get_page_content(page_id).expect("page content");
            let content = Content::decode(&raw).expect("content stream decodes");
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Td")
                .filter_map(|op| op.operands.get(1)?.as_float().ok())
                .fold(f32::INFINITY, f32::min)
        })
        .collect()
}
