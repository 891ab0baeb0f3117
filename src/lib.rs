mod dispatch;
mod error;
mod fonts;
mod forms;
mod model;
mod pdf;
pub mod schema;

pub use dispatch::{CONTENT_TYPE, DocType, RenderedPdf, StoredDocument, dispatch, dispatch_value, filename};
pub use error::Error;
pub use model::{
    AircraftIdentity, Approval, ComponentAssembly, Conformity, DefectPart, Form337, Form8010,
    Form8130, Owner, PartMetrics, Record, Sources, Submitter, UnitClass, UnitIdentity,
};

use std::time::Instant;

use pdf::DocumentInfo;
use pdf::layout::PageCursor;
use schema::{FORM_337, FORM_8010_4, FORM_8130_3};

/// FAA Form 8130-3, Authorized Release Certificate.
pub fn render_8130(record: &Form8130, hash: Option<&str>) -> Result<Vec<u8>, Error> {
    render(FORM_8130_3.form_number, FORM_8130_3.title, hash, || {
        forms::render_grid(&FORM_8130_3, record)
    })
}

/// FAA Form 337, Major Repair and Alteration.
pub fn render_337(record: &Form337, hash: Option<&str>) -> Result<Vec<u8>, Error> {
    render(FORM_337.form_number, FORM_337.title, hash, || {
        forms::render_flow(&FORM_337, "Continuation of Item 8 - Description of Work", record)
    })
}

/// FAA Form 8010-4, Malfunction or Defect Report.
pub fn render_8010(record: &Form8010, hash: Option<&str>) -> Result<Vec<u8>, Error> {
    render(FORM_8010_4.form_number, FORM_8010_4.title, hash, || {
        forms::render_flow(&FORM_8010_4, "Continuation of Comments", record)
    })
}

fn render(
    form_number: &str,
    title: &str,
    hash: Option<&str>,
    layout: impl FnOnce() -> PageCursor,
) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();
    let hash = hash.map(str::trim).filter(|h| !h.is_empty());

    let pages = layout().finish(hash);
    let page_count = pages.len();
    let t_layout = t0.elapsed();

    let info = DocumentInfo {
        title: form_number,
        subject: title,
        hash,
    };
    let bytes = pdf::write(pages, &info)?;
    let t_total = t0.elapsed();

    log::debug!("{form_number}: {page_count} page(s), hash {}", if hash.is_some() { "stamped" } else { "absent" });
    log::info!(
        "Timing: render={:.1}ms, assemble={:.1}ms, total={:.1}ms (output {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(bytes)
}
