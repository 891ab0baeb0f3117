pub(crate) mod layout;
pub(crate) mod table;
pub(crate) mod wrap;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::error::Error;
use crate::fonts::register_fonts;

use layout::{PAGE_HEIGHT, PAGE_WIDTH};

const PRODUCER: &str = concat!("faa-forms-pdf ", env!("CARGO_PKG_VERSION"));

pub(crate) struct DocumentInfo<'a> {
    pub(crate) title: &'a str,
    pub(crate) subject: &'a str,
    pub(crate) hash: Option<&'a str>,
}

/// Serialize laid-out pages. Nothing time-dependent is written, so the
/// same pages always produce the same bytes.
pub(crate) fn write(pages: Vec<Content>, info: &DocumentInfo<'_>) -> Result<Vec<u8>, Error> {
    if pages.is_empty() {
        return Err(Error::Layout("no pages were laid out".into()));
    }

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();
    let fonts = register_fonts(&mut pdf, &mut alloc);

    let n = pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, c) in pages.into_iter().enumerate() {
        let raw = c.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for (page_id, content_id) in page_ids.iter().zip(&content_ids) {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(pages_id)
            .contents(*content_id);
        let mut resources = page.resources();
        let mut font_dict = resources.fonts();
        for (face, font_ref) in &fonts {
            font_dict.pair(Name(face.pdf_name().as_bytes()), *font_ref);
        }
    }

    {
        let mut doc_info = pdf.document_info(info_id);
        doc_info
            .title(TextStr(info.title))
            .subject(TextStr(info.subject))
            .producer(TextStr(PRODUCER));
        if let Some(hash) = info.hash {
            doc_info.pair(Name(b"IntegrityHash"), TextStr(hash));
        }
    }

    Ok(pdf.finish())
}
