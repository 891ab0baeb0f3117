use pdf_writer::{Content, Name, Str};

use crate::fonts::{Face, to_winansi_bytes};

// US Letter, in points.
pub(crate) const PAGE_WIDTH: f32 = 612.0;
pub(crate) const PAGE_HEIGHT: f32 = 792.0;
pub(crate) const MARGIN: f32 = 36.0;
pub(crate) const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

/// Lowest y the cursor may write to; the footer lives below it.
pub(crate) const CONTENT_BOTTOM: f32 = 50.0;

pub(crate) type Rgb = [f32; 3];

pub(crate) const INK: Rgb = [0.10, 0.11, 0.13];
pub(crate) const MUTED: Rgb = [0.42, 0.45, 0.50];
pub(crate) const ACCENT: Rgb = [0.15, 0.35, 0.75];
pub(crate) const HIGHLIGHT: Rgb = [0.10, 0.20, 0.52];
pub(crate) const RULE: Rgb = [0.62, 0.65, 0.70];
pub(crate) const BAND: Rgb = [0.91, 0.93, 0.95];

pub(crate) fn show_text(
    content: &mut Content,
    face: Face,
    font_size: f32,
    color: Rgb,
    x: f32,
    baseline_y: f32,
    text: &str,
) {
    let bytes = to_winansi_bytes(text);
    if bytes.is_empty() {
        return;
    }
    content.set_fill_rgb(color[0], color[1], color[2]);
    content
        .begin_text()
        .set_font(Name(face.pdf_name().as_bytes()), font_size)
        .next_line(x, baseline_y)
        .show(Str(&bytes))
        .end_text();
}

/// Like `show_text` but the text ends at `right_x`.
pub(crate) fn show_text_right(
    content: &mut Content,
    face: Face,
    font_size: f32,
    color: Rgb,
    right_x: f32,
    baseline_y: f32,
    text: &str,
) {
    let w = face.text_width(text, font_size);
    show_text(content, face, font_size, color, right_x - w, baseline_y, text);
}

pub(crate) fn hline(content: &mut Content, x1: f32, x2: f32, y: f32, width: f32) {
    content.set_stroke_rgb(RULE[0], RULE[1], RULE[2]);
    content.set_line_width(width);
    content.move_to(x1, y).line_to(x2, y).stroke();
}

pub(crate) fn vline(content: &mut Content, x: f32, y1: f32, y2: f32, width: f32) {
    content.set_stroke_rgb(RULE[0], RULE[1], RULE[2]);
    content.set_line_width(width);
    content.move_to(x, y1).line_to(x, y2).stroke();
}

/// Outline of a box given by its top edge, top-down like the rest of the layout code.
pub(crate) fn stroke_box(content: &mut Content, x: f32, top: f32, width: f32, height: f32) {
    content.set_stroke_rgb(RULE[0], RULE[1], RULE[2]);
    content.set_line_width(0.75);
    content.rect(x, top - height, width, height).stroke();
}

pub(crate) fn fill_box(content: &mut Content, x: f32, top: f32, width: f32, height: f32, color: Rgb) {
    content.set_fill_rgb(color[0], color[1], color[2]);
    content.rect(x, top - height, width, height).fill_nonzero();
}

pub(crate) enum Advance {
    /// The block fits; its top edge is at this y.
    Placed(f32),
    PageFull,
}

/// Running page chrome: drawn by the cursor at the top of every page and
/// stamped into the footer once the page count is known.
#[derive(Debug)]
struct Chrome {
    form_number: &'static str,
    title: &'static str,
    continuation: Option<String>,
}

const TITLE_SIZE: f32 = 12.0;
const CHROME_SIZE: f32 = 7.5;
const CONTINUED_LINE: f32 = 12.0;
const RULE_GAP: f32 = 6.0;
const BODY_GAP: f32 = 8.0;

/// Content height of a page after the first, below its running header.
pub(crate) fn continued_page_capacity() -> f32 {
    PAGE_HEIGHT - MARGIN - TITLE_SIZE - CONTINUED_LINE - RULE_GAP - BODY_GAP - CONTENT_BOTTOM
}

/// Vertical write position over a growing list of pages. Each render owns
/// one; nothing here is shared between documents.
pub(crate) struct PageCursor {
    chrome: Chrome,
    finished: Vec<Content>,
    content: Content,
    y: f32,
    page_top: f32,
}

impl PageCursor {
    pub(crate) fn new(form_number: &'static str, title: &'static str) -> Self {
        let mut cursor = Self {
            chrome: Chrome {
                form_number,
                title,
                continuation: None,
            },
            finished: Vec::new(),
            content: Content::new(),
            y: 0.0,
            page_top: 0.0,
        };
        cursor.start_page();
        cursor
    }

    fn start_page(&mut self) {
        let continued = !self.finished.is_empty();
        let right = PAGE_WIDTH - MARGIN;
        let mut baseline = PAGE_HEIGHT - MARGIN - TITLE_SIZE;

        let title = self.chrome.title.to_uppercase();
        show_text(&mut self.content, Face::Bold, TITLE_SIZE, INK, MARGIN, baseline, &title);
        show_text_right(
            &mut self.content,
            Face::Bold,
            CHROME_SIZE + 1.0,
            INK,
            right,
            baseline,
            self.chrome.form_number,
        );

        if continued {
            baseline -= CONTINUED_LINE;
            show_text_right(&mut self.content, Face::Oblique, CHROME_SIZE, MUTED, right, baseline, "(continued)");
            if let Some(label) = &self.chrome.continuation {
                show_text(&mut self.content, Face::Bold, CHROME_SIZE + 0.5, INK, MARGIN, baseline, label);
            }
        }

        let rule_y = baseline - RULE_GAP;
        hline(&mut self.content, MARGIN, right, rule_y, 1.0);
        self.y = rule_y - BODY_GAP;
        self.page_top = self.y;
    }

    pub(crate) fn content(&mut self) -> &mut Content {
        &mut self.content
    }

    #[cfg(test)]
    pub(crate) fn y(&self) -> f32 {
        self.y
    }

    pub(crate) fn remaining(&self) -> f32 {
        self.y - CONTENT_BOTTOM
    }

    pub(crate) fn at_page_top(&self) -> bool {
        (self.y - self.page_top).abs() < 0.5
    }

    pub(crate) fn page_count(&self) -> usize {
        self.finished.len() + 1
    }

    /// Label printed in the running header of pages started from now on.
    pub(crate) fn set_continuation(&mut self, label: Option<String>) {
        self.chrome.continuation = label;
    }

    pub(crate) fn advance(&mut self, height: f32) -> Advance {
        if height > self.remaining() + 0.01 {
            return Advance::PageFull;
        }
        let top = self.y;
        self.y -= height;
        Advance::Placed(top)
    }

    /// Finish the current page and start a fresh one with the running header.
    pub(crate) fn reset(&mut self) {
        let done = std::mem::replace(&mut self.content, Content::new());
        self.finished.push(done);
        self.start_page();
    }

    /// Place a block, breaking to a new page when it does not fit. A block
    /// taller than an empty page is placed anyway, so callers split content
    /// that can exceed a page before placing it.
    pub(crate) fn place(&mut self, height: f32) -> f32 {
        if let Advance::Placed(top) = self.advance(height) {
            return top;
        }
        if !self.at_page_top() {
            self.reset();
        }
        let top = self.y;
        self.y -= height;
        top
    }

    /// Vertical gap; never crosses a page boundary.
    pub(crate) fn skip(&mut self, gap: f32) {
        if !self.at_page_top() {
            self.y = (self.y - gap).max(CONTENT_BOTTOM);
        }
    }

    /// Stamp footers on every page and hand back the finished content streams.
    pub(crate) fn finish(self, hash: Option<&str>) -> Vec<Content> {
        let Self {
            chrome,
            mut finished,
            content,
            ..
        } = self;
        finished.push(content);
        let total = finished.len();
        for (i, page) in finished.iter_mut().enumerate() {
            stamp_footer(page, &chrome, i + 1, total, hash);
        }
        finished
    }
}

fn stamp_footer(content: &mut Content, chrome: &Chrome, page_num: usize, total: usize, hash: Option<&str>) {
    let right = PAGE_WIDTH - MARGIN;
    let rule_y = CONTENT_BOTTOM - 8.0;
    let baseline = rule_y - 9.0;
    hline(content, MARGIN, right, rule_y, 0.5);

    let left = format!("{} - {}", chrome.form_number, chrome.title);
    show_text(content, Face::Regular, CHROME_SIZE, MUTED, MARGIN, baseline, &left);
    show_text_right(
        content,
        Face::Regular,
        CHROME_SIZE,
        MUTED,
        right,
        baseline,
        &format!("Page {page_num} of {total}"),
    );

    if let Some(hash) = hash {
        let stamp = format!("Integrity hash: {hash}");
        show_text(content, Face::MonoBold, 6.0, ACCENT, MARGIN, baseline - 9.0, &stamp);
    }
}
