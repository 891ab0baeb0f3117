use pdf_writer::{Name, Pdf, Ref};

/// The standard Type1 faces used by every form. None are embedded; viewers
/// supply the base-14 metrics, so width tables here only drive layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Face {
    Regular,
    Bold,
    Oblique,
    MonoBold,
}

impl Face {
    pub(crate) const ALL: [Face; 4] = [Face::Regular, Face::Bold, Face::Oblique, Face::MonoBold];

    pub(crate) fn pdf_name(self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
            Face::Oblique => "F3",
            Face::MonoBold => "F4",
        }
    }

    fn base_font(self) -> &'static [u8] {
        match self {
            Face::Regular => b"Helvetica",
            Face::Bold => b"Helvetica-Bold",
            Face::Oblique => b"Helvetica-Oblique",
            Face::MonoBold => b"Courier-Bold",
        }
    }

    /// Width of a single character in 1000-units. Unmappable characters are
    /// dropped by `to_winansi_bytes`, so they measure zero.
    pub(crate) fn char_width_1000(self, ch: char) -> f32 {
        let byte = if ch == '\t' { b' ' } else { char_to_winansi(ch) };
        if byte < 32 {
            return 0.0;
        }
        match self {
            Face::Regular | Face::Oblique => helvetica_width(byte),
            Face::Bold => helvetica_bold_width(byte),
            Face::MonoBold => 600.0,
        }
    }

    pub(crate) fn text_width(self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi bytes.
fn helvetica_width(b: u8) -> f32 {
    match b {
        32 => 278.0,                          // space
        33..=47 => 333.0,                     // punctuation
        48..=57 => 556.0,                     // digits
        58..=64 => 333.0,                     // more punctuation
        73 | 74 => 278.0,                     // I J (narrow uppercase)
        77 => 833.0,                          // M (wide)
        87 => 944.0,                          // W
        65..=90 => 667.0,                     // uppercase A-Z (average)
        91..=96 => 333.0,                     // brackets etc.
        102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
        109 | 119 => 833.0,                   // m w (wide)
        97..=122 => 556.0,                    // lowercase a-z (average)
        0x96 => 556.0,                        // en dash
        0x97 => 1000.0,                       // em dash
        _ => 556.0,
    }
}

fn helvetica_bold_width(b: u8) -> f32 {
    match b {
        32 => 278.0,
        33..=47 => 333.0,
        48..=57 => 556.0,
        58..=64 => 333.0,
        73 => 278.0,
        74 => 556.0,
        77 => 833.0,
        87 => 944.0,
        65..=90 => 722.0,
        91..=96 => 333.0,
        105 | 106 | 108 => 278.0,
        102 | 116 => 333.0,
        109 => 889.0,
        119 => 778.0,
        97..=122 => 611.0,
        0x96 => 556.0,
        0x97 => 1000.0,
        _ => 611.0,
    }
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Tabs become spaces; other control and unmappable characters are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c {
            '\t' => Some(b' '),
            _ => match char_to_winansi(c) {
                0 => None,
                b => Some(b),
            },
        })
        .collect()
}

pub(crate) fn register_fonts(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref) -> Vec<(Face, Ref)> {
    Face::ALL
        .iter()
        .map(|&face| {
            let font_ref = alloc();
            pdf.type1_font(font_ref)
                .base_font(Name(face.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            (face, font_ref)
        })
        .collect()
}
