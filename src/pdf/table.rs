use std::borrow::Cow;

use pdf_writer::Content;

use crate::fonts::Face;

use super::layout::{ACCENT, BAND, HIGHLIGHT, INK, MUTED, fill_box, hline, show_text, vline};
use super::wrap::{WrappedLines, wrap};

pub(crate) const PAD_X: f32 = 4.0;
const PAD_TOP: f32 = 3.0;
const PAD_BOTTOM: f32 = 4.0;
pub(crate) const LABEL_SIZE: f32 = 6.0;
pub(crate) const LABEL_LINE: f32 = 9.0;
pub(crate) const VALUE_SIZE: f32 = 9.0;
pub(crate) const VALUE_LINE: f32 = 11.0;
const MIN_VALUE_SIZE: f32 = 6.0;
const SIZE_STEP: f32 = 0.5;
const SOURCE_SIZE: f32 = 5.5;
const SOURCE_LINE: f32 = 7.0;
const SIGNATURE_H: f32 = 12.0;
pub(crate) const SECTION_H: f32 = 14.0;
const CUT_MARKER: &str = "(see continuation)";

fn line_height(size: f32) -> f32 {
    size * VALUE_LINE / VALUE_SIZE
}

/// Label above a value. `value` is wrapped to the cell width; `highlight`
/// sets it bold monospace for machine-captured identifiers.
#[derive(Clone, Debug)]
pub(crate) struct Cell<'a> {
    pub(crate) label: Cow<'a, str>,
    pub(crate) value: Cow<'a, str>,
    pub(crate) highlight: bool,
    pub(crate) source: Option<&'a str>,
    pub(crate) signature: bool,
    /// Share of the row width.
    pub(crate) weight: f32,
}

impl<'a> Cell<'a> {
    pub(crate) fn new(label: &'a str, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            label: Cow::Borrowed(label),
            value: value.into(),
            highlight: false,
            source: None,
            signature: false,
            weight: 1.0,
        }
    }

    fn value_face(&self) -> Face {
        if self.highlight { Face::MonoBold } else { Face::Regular }
    }

    fn value_lines(&self, width: f32, size: f32) -> WrappedLines<'_> {
        wrap(&self.value, self.value_face(), size, (width - 2.0 * PAD_X).max(1.0))
    }

    fn reserved(&self) -> f32 {
        let mut h = 0.0;
        if self.source.is_some() {
            h += SOURCE_LINE;
        }
        if self.signature {
            h += SIGNATURE_H;
        }
        h
    }

    /// Value lines a box of `height` holds at `size`; at least one.
    fn capacity(&self, height: f32, size: f32) -> usize {
        let avail = height - PAD_TOP - LABEL_LINE - PAD_BOTTOM - self.reserved();
        ((avail / line_height(size)).floor().max(0.0) as usize).max(1)
    }

    /// Natural height when every wrapped value line is shown.
    pub(crate) fn height(&self, width: f32) -> f32 {
        let lines = self.value_lines(width, VALUE_SIZE).count().max(1);
        PAD_TOP + LABEL_LINE + lines as f32 * VALUE_LINE + self.reserved() + PAD_BOTTOM
    }

    /// Largest value size, stepping down from the body size, at which every
    /// line fits the box. `None` when even the smallest size overflows.
    pub(crate) fn fitted_size(&self, width: f32, height: f32) -> Option<f32> {
        let mut size = VALUE_SIZE;
        while size >= MIN_VALUE_SIZE {
            if self.value_lines(width, size).count() <= self.capacity(height, size) {
                return Some(size);
            }
            size -= SIZE_STEP;
        }
        None
    }

    /// Draw into a box whose top-left corner is (`x`, `top`). A value too
    /// long for the box at the smallest size ends in a marker line; returns
    /// false in that case so the caller can carry the full text elsewhere.
    pub(crate) fn draw(&self, content: &mut Content, x: f32, top: f32, width: f32, height: f32) -> bool {
        draw_label(content, x, top, &self.label);

        let fitted = self.fitted_size(width, height);
        let size = fitted.unwrap_or(MIN_VALUE_SIZE);
        let line_h = line_height(size);
        let capacity = self.capacity(height, size);
        let max_lines = if fitted.is_some() { capacity } else { capacity - 1 };
        let first_baseline = top - PAD_TOP - LABEL_LINE - size + 1.0;
        let face = self.value_face();
        let color = if self.highlight { HIGHLIGHT } else { INK };

        let mut shown = 0usize;
        for (i, line) in self.value_lines(width, size).take(max_lines).enumerate() {
            let baseline = first_baseline - i as f32 * line_h;
            show_text(content, face, size, color, x + PAD_X, baseline, line);
            shown += 1;
        }
        if fitted.is_none() {
            let baseline = first_baseline - shown as f32 * line_h;
            show_text(content, Face::Oblique, size, ACCENT, x + PAD_X, baseline, CUT_MARKER);
            shown += 1;
        }
        let last_baseline = first_baseline - shown.saturating_sub(1) as f32 * line_h;

        if let Some(source) = self.source {
            let baseline = last_baseline - SOURCE_LINE - 0.5;
            let note = format!("Source: {source}");
            show_text(content, Face::Oblique, SOURCE_SIZE, ACCENT, x + PAD_X, baseline, &note);
        }

        if self.signature {
            let line_y = top - height + PAD_BOTTOM + 2.0;
            hline(content, x + PAD_X, x + width - PAD_X, line_y, 0.5);
        }
        fitted.is_some()
    }
}

pub(crate) fn draw_label(content: &mut Content, x: f32, top: f32, label: &str) {
    let label = label.to_uppercase();
    show_text(content, Face::Regular, LABEL_SIZE, MUTED, x + PAD_X, top - PAD_TOP - LABEL_SIZE, &label);
}

/// Shaded bar with a bold title, one per flowing-form section.
pub(crate) fn draw_section_header(content: &mut Content, x: f32, top: f32, width: f32, title: &str) {
    fill_box(content, x, top, width, SECTION_H, BAND);
    show_text(content, Face::Bold, 8.0, INK, x + PAD_X, top - SECTION_H + 4.0, title);
    hline(content, x, x + width, top - SECTION_H, 0.75);
}

/// Cells side by side with a bottom border. Widths follow the cells' weights.
#[derive(Clone, Debug)]
pub(crate) struct Row<'a> {
    pub(crate) cells: Vec<Cell<'a>>,
}

impl<'a> Row<'a> {
    fn widths(&self, total_width: f32) -> Vec<f32> {
        let sum: f32 = self.cells.iter().map(|c| c.weight).sum::<f32>().max(f32::EPSILON);
        self.cells.iter().map(|c| c.weight / sum * total_width).collect()
    }

    pub(crate) fn height(&self, total_width: f32) -> f32 {
        self.cells
            .iter()
            .zip(self.widths(total_width))
            .map(|(cell, w)| cell.height(w))
            .fold(0.0f32, f32::max)
    }

    /// Split into what fits `height` and the rest. The rest keeps the
    /// labels, marked continued; `None` when every line fits.
    pub(crate) fn split(&self, total_width: f32, height: f32) -> (Row<'a>, Option<Row<'a>>) {
        let mut head = Vec::with_capacity(self.cells.len());
        let mut tail = Vec::with_capacity(self.cells.len());
        let mut carried = false;
        for (cell, w) in self.cells.iter().zip(self.widths(total_width)) {
            let lines: Vec<&str> = cell.value_lines(w, VALUE_SIZE).collect();
            let keep = cell.capacity(height, VALUE_SIZE);
            let mut first = cell.clone();
            let mut rest = Cell {
                label: Cow::Owned(format!("{} (continued)", cell.label)),
                value: Cow::Borrowed(""),
                source: None,
                signature: false,
                ..cell.clone()
            };
            if lines.len() > keep {
                first.value = Cow::Owned(lines[..keep].join("\n"));
                rest.value = Cow::Owned(lines[keep..].join("\n"));
                carried = true;
            }
            head.push(first);
            tail.push(rest);
        }
        let tail = carried.then_some(Row { cells: tail });
        (Row { cells: head }, tail)
    }

    pub(crate) fn draw(&self, content: &mut Content, x: f32, top: f32, total_width: f32, height: f32) {
        let bottom = top - height;
        let mut cx = x;
        for (cell, w) in self.cells.iter().zip(self.widths(total_width)) {
            cell.draw(content, cx, top, w, height);
            vline(content, cx, top, bottom, 0.5);
            cx += w;
        }
        vline(content, x + total_width, top, bottom, 0.5);
        hline(content, x, x + total_width, bottom, 0.5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_keeps_one_line() {
        let empty = Cell::new("Serial Number", "");
        let one = Cell::new("Serial Number", "SN-2024-11432");
        assert_eq!(empty.height(120.0), one.height(120.0));
    }

    #[test]
    fn multiline_value_grows_the_cell() {
        let short = Cell::new("Address", "Line 1");
        let long = Cell::new("Address", "Line 1\nLine 2\nLine 3\nLine 4");
        assert!((long.height(200.0) - short.height(200.0) - 3.0 * VALUE_LINE).abs() < 1e-3);
    }

    #[test]
    fn source_and_signature_reserve_space() {
        let plain = Cell::new("Part Number", "881700-1089");
        let mut noted = plain.clone();
        noted.source = Some("QR SCAN");
        noted.signature = true;
        assert!(noted.height(100.0) > plain.height(100.0));
    }

    #[test]
    fn row_height_is_the_tallest_cell() {
        let row = Row {
            cells: vec![
                Cell::new("Name", "Delta Air Lines"),
                Cell::new("Address", "1030 Delta Blvd\nAtlanta, GA 30354"),
            ],
        };
        let w = 540.0 / 2.0;
        assert_eq!(row.height(540.0), row.cells[1].height(w));
    }

    #[test]
    fn long_value_shrinks_to_fit_its_box() {
        let address = Cell::new("Address", "ACE Aerospace\nHangar 4\n1200 Airport Rd\nSuite 210\nWichita, KS 67209\nUSA");
        let size = address.fitted_size(390.0, 64.0).unwrap();
        assert!(size < VALUE_SIZE);
        assert!(address.value_lines(390.0, size).count() <= address.capacity(64.0, size));

        let short = Cell::new("Address", "Hangar 4");
        assert_eq!(short.fitted_size(390.0, 64.0), Some(VALUE_SIZE));
    }

    #[test]
    fn value_past_the_smallest_size_reports_a_cut() {
        let text = (1..=30).map(|i| format!("Line {i}")).collect::<Vec<_>>().join("\n");
        let cell = Cell::new("Address", text);
        assert_eq!(cell.fitted_size(390.0, 64.0), None);
        let mut content = Content::new();
        assert!(!cell.draw(&mut content, 36.0, 700.0, 390.0, 64.0));
        assert!(Cell::new("Address", "Hangar 4").draw(&mut content, 36.0, 600.0, 390.0, 64.0));
    }

    #[test]
    fn split_carries_the_lines_that_do_not_fit() {
        let text = (1..=90).map(|i| format!("Line {i}")).collect::<Vec<_>>().join("\n");
        let row = Row {
            cells: vec![Cell::new("Name", "Test Corp"), Cell::new("Address", text)],
        };
        let (head, tail) = row.split(540.0, 300.0);
        assert!(head.height(540.0) <= 300.0);
        let tail = tail.unwrap();
        assert_eq!(tail.cells[1].label, "Address (continued)");
        assert_eq!(tail.cells[0].value, "");

        let shown = head.cells[1].value.lines().count();
        assert_eq!(tail.cells[1].value.lines().next(), Some(format!("Line {}", shown + 1).as_str()));
        assert_eq!(shown + tail.cells[1].value.lines().count(), 90);
    }

    #[test]
    fn split_of_a_fitting_row_leaves_nothing() {
        let row = Row {
            cells: vec![Cell::new("Make", "Cessna"), Cell::new("Model", "172S")],
        };
        let (head, tail) = row.split(540.0, 200.0);
        assert!(tail.is_none());
        assert_eq!(head.cells[0].value, "Cessna");
    }

    #[test]
    fn weights_split_the_row() {
        let mut wide = Cell::new("Item", "HPC Module");
        wide.weight = 3.0;
        let row = Row {
            cells: vec![wide, Cell::new("Qty", "1")],
        };
        assert_eq!(row.widths(400.0), vec![300.0, 100.0]);
    }
}
