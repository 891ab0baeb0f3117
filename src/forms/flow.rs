use crate::model::Record;
use crate::pdf::layout::{Advance, CONTENT_WIDTH, MARGIN, PageCursor, continued_page_capacity, hline};
use crate::pdf::table::{PAD_X, Row, SECTION_H, draw_section_header};
use crate::schema::{FlowSchema, SectionBody};

use super::{NARRATIVE_LINE, cell, flow_lines, narrative_lines};

const SECTION_GAP: f32 = 8.0;
/// Smallest slice of a split row worth starting on a part-filled page.
const MIN_SPLIT: f32 = 48.0;

/// Sections top to bottom. A row that does not fit starts a new page, and
/// a row taller than a page is split across pages. A section title never
/// sits alone at the bottom of a page.
pub(crate) fn render_flow<R: Record>(schema: &FlowSchema<R>, continuation: &str, record: &R) -> PageCursor {
    let mut cursor = PageCursor::new(schema.form_number, schema.title);

    for section in schema.sections {
        match &section.body {
            SectionBody::Rows(rows) => {
                let rows: Vec<Row<'_>> = rows
                    .iter()
                    .map(|fields| Row {
                        cells: fields.iter().map(|f| cell(f, record)).collect(),
                    })
                    .collect();
                let first = rows.first().map_or(0.0, |r| r.height(CONTENT_WIDTH));
                let keep_with = if first > continued_page_capacity() { MIN_SPLIT } else { first };
                section_header(&mut cursor, section.title, keep_with);
                for row in rows {
                    place_row(&mut cursor, row);
                }
            }
            SectionBody::Narrative { field, headings } => {
                let text = field.display(record);
                let lines = narrative_lines(&text, *headings, CONTENT_WIDTH - 2.0 * PAD_X);
                log::debug!("{}: {} narrative line(s) in {:?}", schema.form_number, lines.len(), section.title);

                section_header(&mut cursor, section.title, NARRATIVE_LINE);
                cursor.skip(2.0);
                cursor.set_continuation(Some(continuation.to_string()));
                flow_lines(&mut cursor, &lines, MARGIN + PAD_X);
                cursor.set_continuation(None);
            }
        }
        cursor.skip(SECTION_GAP);
    }

    cursor
}

fn place_row(cursor: &mut PageCursor, mut row: Row<'_>) {
    loop {
        let height = row.height(CONTENT_WIDTH);
        if let Advance::Placed(top) = cursor.advance(height) {
            draw_row(cursor, &row, top, height);
            return;
        }
        let splits = height > continued_page_capacity() && cursor.remaining() >= MIN_SPLIT;
        if !splits && !cursor.at_page_top() {
            cursor.reset();
            continue;
        }

        let (head, tail) = row.split(CONTENT_WIDTH, cursor.remaining());
        let head_height = head.height(CONTENT_WIDTH);
        let top = cursor.place(head_height);
        draw_row(cursor, &head, top, head_height);
        match tail {
            Some(rest) => {
                log::debug!("row split at page {}", cursor.page_count());
                cursor.reset();
                row = rest;
            }
            None => return,
        }
    }
}

fn draw_row(cursor: &mut PageCursor, row: &Row<'_>, top: f32, height: f32) {
    hline(cursor.content(), MARGIN, MARGIN + CONTENT_WIDTH, top, 0.5);
    row.draw(cursor.content(), MARGIN, top, CONTENT_WIDTH, height);
}

fn section_header(cursor: &mut PageCursor, title: &str, keep_with: f32) {
    if cursor.remaining() < SECTION_H + keep_with && !cursor.at_page_top() {
        cursor.reset();
    }
    let top = cursor.place(SECTION_H);
    draw_section_header(cursor.content(), MARGIN, top, CONTENT_WIDTH, title);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Form337, Form8010, Owner};
    use crate::schema::{FORM_337, FORM_8010_4};

    #[test]
    fn empty_records_fit_one_page() {
        let cursor = render_flow(&FORM_337, "Continuation of Item 8 - Description of Work", &Form337::default());
        assert_eq!(cursor.page_count(), 1);
        let cursor = render_flow(&FORM_8010_4, "Continuation of Comments", &Form8010::default());
        assert_eq!(cursor.page_count(), 1);
    }

    #[test]
    fn row_taller_than_a_page_is_split() {
        let address = (1..=90).map(|i| format!("Line {i}")).collect::<Vec<_>>().join("\n");
        let record = Form337 {
            owner: Some(Owner {
                name: Some("Test Corp".into()),
                address: Some(address),
            }),
            ..Form337::default()
        };
        let cursor = render_flow(&FORM_337, "Continuation of Item 8 - Description of Work", &record);
        assert!(cursor.page_count() >= 2);
    }

    #[test]
    fn split_row_pieces_stay_on_their_pages() {
        let text = (1..=200).map(|i| format!("Line {i}")).collect::<Vec<_>>().join("\n");
        let row = Row {
            cells: vec![crate::pdf::table::Cell::new("Address", text)],
        };
        let mut cursor = PageCursor::new("FAA Form 337", "Major Repair and Alteration");
        place_row(&mut cursor, row);
        assert!(cursor.page_count() >= 3);
        assert!(cursor.remaining() >= 0.0);
    }

    #[test]
    fn long_work_description_continues() {
        let record = Form337 {
            work_description: Some("Removed and replaced the left main gear actuator.\n".repeat(150)),
            ..Form337::default()
        };
        let cursor = render_flow(&FORM_337, "Continuation of Item 8 - Description of Work", &record);
        assert!(cursor.page_count() > 1);
    }
}
