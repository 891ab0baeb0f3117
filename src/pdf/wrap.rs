use crate::fonts::Face;

/// Lazily wrapped lines of `text`, borrowed from the input.
///
/// Source newlines always break (an empty source line yields an empty
/// line). Within a source line, lines break at the last whitespace that
/// fits `max_width`; a word wider than the column is broken between
/// characters. The iterator is `Clone`, so a wrap can be restarted or
/// measured ahead without re-allocating.
#[derive(Clone, Debug)]
pub(crate) struct WrappedLines<'a> {
    text: &'a str,
    pos: usize,
    face: Face,
    font_size: f32,
    max_width: f32,
}

pub(crate) fn wrap(text: &str, face: Face, font_size: f32, max_width: f32) -> WrappedLines<'_> {
    WrappedLines {
        text,
        pos: 0,
        face,
        font_size,
        max_width,
    }
}

impl<'a> WrappedLines<'a> {
    fn char_w(&self, ch: char) -> f32 {
        self.face.char_width_1000(ch) * self.font_size / 1000.0
    }

    /// Returns the next line of `source` and how many bytes of it were consumed.
    fn break_line(&self, source: &'a str) -> (&'a str, usize) {
        let trimmed = source.trim_end();
        if self.face.text_width(trimmed, self.font_size) <= self.max_width {
            return (trimmed, source.len());
        }

        // an indent does not carry over onto a line that has to break
        let lead = source.len() - source.trim_start().len();
        let mut width = 0.0f32;
        let mut last_break: Option<usize> = None;
        let mut prev_ws = true;
        for (i, ch) in source.char_indices().skip_while(|&(i, _)| i < lead) {
            let is_ws = ch.is_whitespace();
            if is_ws && !prev_ws {
                last_break = Some(i);
            }
            let cw = self.char_w(ch);
            if !is_ws && width + cw > self.max_width {
                return match last_break {
                    Some(end) => {
                        let resume = source[end..]
                            .find(|c: char| !c.is_whitespace())
                            .map_or(source.len(), |off| end + off);
                        (&source[lead..end], resume)
                    }
                    None => {
                        // hard break; always take at least one character
                        let end = if i == lead { i + ch.len_utf8() } else { i };
                        (&source[lead..end], end)
                    }
                };
            }
            width += cw;
            prev_ws = is_ws;
        }
        (trimmed, source.len())
    }
}

impl<'a> Iterator for WrappedLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.pos > self.text.len() {
            return None;
        }
        let rest = &self.text[self.pos..];
        let line_end = rest.find('\n').unwrap_or(rest.len());
        let source = &rest[..line_end];
        let (line, consumed) = self.break_line(source);
        if consumed >= source.len() {
            self.pos += line_end + 1;
        } else {
            self.pos += consumed;
        }
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    const REMARKS: &str = "Component 881700-1089 S/N SN-2024-11432 received for overhaul per CMM 881700-OH Rev. 12.\n\nFINDINGS:\n- Piston bore diameter: 2.4985 in. (Spec: 2.500 \u{00B1} 0.002 in.) \u{2014} within limits, serviceable\n- Gear backlash: 0.004 in. (Spec: 0.003\u{2013}0.006 in.) \u{2014} within limits, serviceable";

    #[test]
    fn rejoined_lines_reproduce_the_text() {
        for width in [60.0, 120.0, 250.0, 530.0] {
            let lines: Vec<&str> = wrap(REMARKS, Face::Regular, 8.5, width).collect();
            assert_eq!(normalized(&lines.join(" ")), normalized(REMARKS), "width {width}");
        }
    }

    #[test]
    fn lines_fit_the_column() {
        for width in [40.0, 90.0, 200.0] {
            for line in wrap(REMARKS, Face::Regular, 8.5, width) {
                let w = Face::Regular.text_width(line, 8.5);
                assert!(
                    w <= width + 1e-3 || line.chars().count() == 1,
                    "{line:?} is {w}pt wide in a {width}pt column"
                );
            }
        }
    }

    #[test]
    fn source_newlines_are_kept() {
        let lines: Vec<&str> = wrap("FINDINGS\n\nBearing replaced.\r\n", Face::Regular, 9.0, 500.0).collect();
        assert_eq!(lines, vec!["FINDINGS", "", "Bearing replaced.", ""]);
    }

    #[test]
    fn breaks_at_the_last_fitting_space() {
        let width = Face::Regular.text_width("alpha beta", 10.0) + 1.0;
        let lines: Vec<&str> = wrap("alpha beta gamma", Face::Regular, 10.0, width).collect();
        assert_eq!(lines, vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn long_word_is_hard_broken() {
        let word = "SK-881700-1-CoC-24-11892-PARKER-HANNIFIN";
        let width = Face::MonoBold.text_width("0123456789", 10.0);
        let lines: Vec<&str> = wrap(word, Face::MonoBold, 10.0, width).collect();
        assert_eq!(lines.concat(), word);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn indent_is_dropped_before_a_hard_break() {
        let source = "      SK-881700-1-CoC-24-11892-PARKER-HANNIFIN";
        let width = Face::MonoBold.text_width("0123456789", 10.0);
        let lines: Vec<&str> = wrap(source, Face::MonoBold, 10.0, width).collect();
        assert_eq!(lines[0], "SK-881700-");
        assert_eq!(lines.concat(), source.trim_start());
        for line in &lines {
            assert!(Face::MonoBold.text_width(line, 10.0) <= width + 1e-3, "{line:?}");
        }
    }

    #[test]
    fn indented_line_that_fits_keeps_its_indent() {
        let lines: Vec<&str> = wrap("  - Gear backlash", Face::Regular, 9.0, 500.0).collect();
        assert_eq!(lines, vec!["  - Gear backlash"]);
    }

    #[test]
    fn narrow_column_still_makes_progress() {
        let lines: Vec<&str> = wrap("WW", Face::Bold, 12.0, 1.0).collect();
        assert_eq!(lines, vec!["W", "W"]);
    }

    #[test]
    fn restarting_yields_the_same_sequence() {
        let lines = wrap(REMARKS, Face::Regular, 8.5, 150.0);
        let first: Vec<&str> = lines.clone().collect();
        let count = lines.clone().count();
        assert_eq!(first.len(), count);
        assert_eq!(first, lines.collect::<Vec<_>>());
    }
}
