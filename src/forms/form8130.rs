use crate::fonts::Face;
use crate::model::Form8130;
use crate::pdf::layout::{ACCENT, CONTENT_WIDTH, INK, MARGIN, PageCursor, show_text, stroke_box};
use crate::pdf::table::{LABEL_LINE, PAD_X, draw_label};
use crate::schema::{GridBlock, GridSchema};

use super::{NARRATIVE_LINE, NARRATIVE_SIZE, NarrativeLine, cell, flow_lines, narrative_lines};

const BOX_PAD_TOP: f32 = 3.0;
const BOX_PAD_BOTTOM: f32 = 4.0;
const CONTINUED_MARKER: &str = "(continued on next page)";

/// The fixed grid on page 1. Values shrink to fit their box. Remarks that
/// do not fit continue on pages carrying only remarks text, and any other
/// block too long for its box is repeated in full after them.
pub(crate) fn render_grid(schema: &GridSchema<Form8130>, record: &Form8130) -> PageCursor {
    let mut cursor = PageCursor::new(schema.form_number, schema.title);
    let origin = cursor.place(schema.height());

    let mut overflow = Vec::new();
    let mut cut = Vec::new();
    for block in schema.blocks {
        let x = MARGIN + block.at.x;
        let top = origin - block.at.y;
        let (width, height) = (block.at.width, block.at.height);
        stroke_box(cursor.content(), x, top, width, height);
        if block.overflows {
            overflow = draw_narrative_box(&mut cursor, block, record, x, top);
        } else if !cell(&block.field, record).draw(cursor.content(), x, top, width, height) {
            log::warn!("{}: value does not fit its box, continued in full", block.field.key);
            cut.push(&block.field);
        }
    }

    let mut segments = Vec::new();
    if !overflow.is_empty() {
        segments.push((schema.continuation.to_string(), overflow));
    }
    for field in cut {
        let Some(text) = field.value(record) else { continue };
        let mut lines = vec![NarrativeLine {
            text: field.label,
            face: Face::Bold,
        }];
        lines.extend(narrative_lines(text, false, CONTENT_WIDTH - 2.0 * PAD_X));
        segments.push((continuation_label(field.label), lines));
    }

    for (i, (label, lines)) in segments.into_iter().enumerate() {
        cursor.set_continuation(Some(label));
        if i == 0 {
            cursor.reset();
        } else {
            cursor.skip(NARRATIVE_LINE);
        }
        flow_lines(&mut cursor, &lines, MARGIN + PAD_X);
    }
    cursor
}

/// `4. Organization Name and Address` becomes
/// `Continuation of Block 4 - Organization Name and Address`.
fn continuation_label(label: &str) -> String {
    match label.split_once(". ") {
        Some((number, name)) => format!("Continuation of Block {number} - {name}"),
        None => format!("Continuation of {label}"),
    }
}

/// Fill the box with as many lines as it holds and return the rest.
fn draw_narrative_box<'r>(
    cursor: &mut PageCursor,
    block: &GridBlock<Form8130>,
    record: &'r Form8130,
    x: f32,
    top: f32,
) -> Vec<NarrativeLine<'r>> {
    let field = &block.field;
    let text = field.value(record).unwrap_or(field.absent.placeholder());
    let mut lines = narrative_lines(text, false, block.at.width - 2.0 * PAD_X);

    let usable = block.at.height - BOX_PAD_TOP - LABEL_LINE - BOX_PAD_BOTTOM;
    let capacity = ((usable / NARRATIVE_LINE).floor() as usize).max(1);
    let overflows = lines.len() > capacity;
    let shown = if overflows { capacity - 1 } else { lines.len() };

    let content = cursor.content();
    draw_label(content, x, top, field.label);
    let first_baseline = top - BOX_PAD_TOP - LABEL_LINE - NARRATIVE_SIZE;
    for (i, line) in lines[..shown].iter().enumerate() {
        let baseline = first_baseline - i as f32 * NARRATIVE_LINE;
        show_text(content, line.face, NARRATIVE_SIZE, INK, x + PAD_X, baseline, line.text);
    }

    if !overflows {
        return Vec::new();
    }
    let baseline = first_baseline - shown as f32 * NARRATIVE_LINE;
    show_text(content, Face::Oblique, NARRATIVE_SIZE, ACCENT, x + PAD_X, baseline, CONTINUED_MARKER);
    log::debug!(
        "{}: {} of {} line(s) continued",
        field.key,
        lines.len() - shown,
        lines.len()
    );
    lines.split_off(shown)
}
