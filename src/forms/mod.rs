mod flow;
mod form8130;

pub(crate) use flow::render_flow;
pub(crate) use form8130::render_grid;

use crate::fonts::Face;
use crate::model::Record;
use crate::pdf::layout::{Advance, INK, PageCursor, show_text};
use crate::pdf::table::Cell;
use crate::pdf::wrap::wrap;
use crate::schema::{FieldDef, FieldKind};

pub(crate) const NARRATIVE_SIZE: f32 = 8.5;
pub(crate) const NARRATIVE_LINE: f32 = 10.5;

fn cell<'r, R: Record>(field: &FieldDef<R>, record: &'r R) -> Cell<'r> {
    let mut cell = Cell::new(field.label, field.display(record));
    cell.highlight = field.highlight;
    cell.weight = field.weight;
    cell.signature = field.kind == FieldKind::Signature;
    cell.source = record.sources().get(field.key).map(String::as_str);
    cell
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct NarrativeLine<'a> {
    pub(crate) text: &'a str,
    pub(crate) face: Face,
}

/// A line like `FINDINGS:` or `PARTS CONSUMED:`.
pub(crate) fn is_heading(line: &str) -> bool {
    let line = line.trim();
    let mut letters = 0;
    for ch in line.chars() {
        if ch.is_ascii_uppercase() {
            letters += 1;
        } else if ch.is_alphabetic() || !(ch == ' ' || ":-&/,.".contains(ch)) {
            return false;
        }
    }
    letters >= 3
}

/// Wrap free text for a column. With `headings`, ALL-CAPS lines are set bold.
pub(crate) fn narrative_lines(text: &str, headings: bool, width: f32) -> Vec<NarrativeLine<'_>> {
    let mut out = Vec::new();
    for source in text.lines() {
        let face = if headings && is_heading(source) {
            Face::Bold
        } else {
            Face::Regular
        };
        out.extend(wrap(source, face, NARRATIVE_SIZE, width).map(|text| NarrativeLine { text, face }));
    }
    out
}

/// Lay narrative lines out one at a time, breaking pages as needed.
pub(crate) fn flow_lines(cursor: &mut PageCursor, lines: &[NarrativeLine<'_>], x: f32) {
    for line in lines {
        let top = match cursor.advance(NARRATIVE_LINE) {
            Advance::Placed(top) => top,
            Advance::PageFull => {
                cursor.reset();
                cursor.place(NARRATIVE_LINE)
            }
        };
        show_text(cursor.content(), line.face, NARRATIVE_SIZE, INK, x, top - NARRATIVE_SIZE, line.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_heuristic() {
        for heading in ["FINDINGS:", "PARTS CONSUMED:", "WORK PERFORMED:", "  TEST RESULTS  ", "R&R / NDT"] {
            assert!(is_heading(heading), "{heading:?}");
        }
        for plain in [
            "",
            "OK",
            "Findings:",
            "- Piston bore diameter",
            "P/N 881700-1089",
            "STEP 1: REMOVE",
            "CRACK FOUND (AFT)",
        ] {
            assert!(!is_heading(plain), "{plain:?}");
        }
    }

    #[test]
    fn headings_are_bold_only_when_enabled() {
        let text = "FINDINGS:\nBearing worn.\n\nACTION TAKEN:\nReplaced.";
        let with: Vec<Face> = narrative_lines(text, true, 500.0).iter().map(|l| l.face).collect();
        assert_eq!(
            with,
            vec![Face::Bold, Face::Regular, Face::Regular, Face::Bold, Face::Regular]
        );
        assert!(narrative_lines(text, false, 500.0).iter().all(|l| l.face == Face::Regular));
    }

    #[test]
    fn narrative_keeps_blank_lines() {
        let lines = narrative_lines("one\n\ntwo", false, 500.0);
        let texts: Vec<&str> = lines.iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["one", "", "two"]);
    }

    #[test]
    fn flowing_many_lines_adds_pages() {
        let text = (0..200).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let lines = narrative_lines(&text, false, 500.0);
        let mut cursor = PageCursor::new("FAA Form 8010-4", "Malfunction or Defect Report");
        flow_lines(&mut cursor, &lines, 40.0);
        assert!(cursor.page_count() >= 3);
    }
}
