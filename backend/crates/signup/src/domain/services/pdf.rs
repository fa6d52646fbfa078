//! Minimal single-page PDF writer
//!
//! Just enough of PDF 1.4 for a flat template: filled and stroked
//! rectangles, and single-line text in the standard Helvetica faces. Fonts
//! are referenced, never embedded. Text is WinAnsi-encoded; characters
//! outside that set print as `?`.
//!
//! Output is uncompressed and fully determined by the drawing calls and
//! [`DocumentInfo`], so the same page always serializes to the same bytes.

use chrono::{DateTime, Utc};

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Helvetica-Bold advance widths (1/1000 em) for ASCII 32..=126
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

/// Width used for every non-ASCII glyph
const FALLBACK_WIDTH: u16 = 556;

/// Standard-14 Helvetica faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Oblique,
}

impl Font {
    const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Oblique];

    fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Oblique => "F3",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Oblique => "Helvetica-Oblique",
        }
    }

    fn glyph_width(self, byte: u8) -> u16 {
        let table = match self {
            Font::Bold => &HELVETICA_BOLD_WIDTHS,
            Font::Regular | Font::Oblique => &HELVETICA_WIDTHS,
        };
        match byte {
            32..=126 => table[usize::from(byte - 32)],
            _ => FALLBACK_WIDTH,
        }
    }

    /// Width of `text` in points at `size`
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|b| u32::from(self.glyph_width(b)))
            .sum();
        units as f32 * size / 1000.0
    }
}

/// RGB colour, components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }
}

/// Document metadata written to the trailer's `/Info` dictionary
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Drawing surface for one page; origin at the top-left corner
#[derive(Debug, Clone)]
pub struct PageCanvas {
    width: f32,
    height: f32,
    content: Vec<u8>,
}

impl PageCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            content: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn fill_rect(&mut self, x: f32, top: f32, w: f32, h: f32, color: Rgb) {
        let y = self.height - top - h;
        self.op(format!(
            "{} rg\n{:.2} {:.2} {:.2} {:.2} re f\n",
            color_operands(color),
            x,
            y,
            w,
            h
        ));
    }

    pub fn stroke_rect(&mut self, x: f32, top: f32, w: f32, h: f32, line_width: f32, color: Rgb) {
        let y = self.height - top - h;
        self.op(format!(
            "{} RG\n{:.2} w\n{:.2} {:.2} {:.2} {:.2} re S\n",
            color_operands(color),
            line_width,
            x,
            y,
            w,
            h
        ));
    }

    /// Draw one line centred horizontally; `baseline` is measured from the
    /// top edge
    pub fn centered_text(&mut self, text: &str, font: Font, size: f32, baseline: f32, color: Rgb) {
        let x = (self.width - font.text_width(text, size)) / 2.0;
        let y = self.height - baseline;
        self.op(format!(
            "BT\n/{} {:.2} Tf\n{} rg\n{:.2} {:.2} Td\n(",
            font.resource_name(),
            size,
            color_operands(color),
            x,
            y
        ));
        self.content.extend(escape_literal(&encode_win_ansi(text)));
        self.op(") Tj\nET\n".to_string());
    }

    fn op(&mut self, op: String) {
        self.content.extend_from_slice(op.as_bytes());
    }

    /// Serialize the page as a complete PDF file
    pub fn into_pdf(self, info: &DocumentInfo) -> Vec<u8> {
        let fonts: String = Font::ALL
            .iter()
            .enumerate()
            .map(|(i, font)| format!("/{} {} 0 R ", font.resource_name(), 5 + i))
            .collect();

        let mut objects: Vec<Vec<u8>> = vec![
            b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
            b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.0} {:.0}] \
                 /Resources << /Font << {}>> >> /Contents 4 0 R >>",
                self.width, self.height, fonts
            )
            .into_bytes(),
        ];

        let mut stream = format!("<< /Length {} >>\nstream\n", self.content.len()).into_bytes();
        stream.extend_from_slice(&self.content);
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);

        for font in Font::ALL {
            objects.push(
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.base_font()
                )
                .into_bytes(),
            );
        }

        let mut info_dict = b"<< /Title (".to_vec();
        info_dict.extend(escape_literal(&encode_win_ansi(&info.title)));
        info_dict.extend_from_slice(b") /Author (");
        info_dict.extend(escape_literal(&encode_win_ansi(&info.author)));
        info_dict.extend_from_slice(
            format!(
                ") /CreationDate (D:{}Z) >>",
                info.created_at.format("%Y%m%d%H%M%S")
            )
            .as_bytes(),
        );
        objects.push(info_dict);
        let info_ref = objects.len();

        // Header plus a binary marker comment
        let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_at = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                info_ref,
                xref_at
            )
            .as_bytes(),
        );
        out
    }
}

fn color_operands(Rgb(r, g, b): Rgb) -> String {
    format!("{:.3} {:.3} {:.3}", r, g, b)
}

/// Map text to WinAnsiEncoding bytes
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            'Œ' => 0x8c,
            'œ' => 0x9c,
            'Š' => 0x8a,
            'š' => 0x9a,
            'Ž' => 0x8e,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}

fn escape_literal(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        if matches!(b, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn info() -> DocumentInfo {
        DocumentInfo {
            title: "Test".into(),
            author: "PlantTech".into(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_text_width() {
        // "Hi" = H(722) + i(222)
        assert!((Font::Regular.text_width("Hi", 10.0) - 9.44).abs() < 1e-4);
        // Bold: H(722) + i(278)
        assert!((Font::Bold.text_width("Hi", 10.0) - 10.0).abs() < 1e-4);
        assert_eq!(Font::Oblique.text_width("", 12.0), 0.0);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Ab é"), vec![b'A', b'b', b' ', 0xe9]);
        assert_eq!(encode_win_ansi("€—"), vec![0x80, 0x97]);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal(b"a(b)c\\"), b"a\\(b\\)c\\\\".to_vec());
    }

    #[test]
    fn test_document_structure() {
        let mut canvas = PageCanvas::new(842.0, 595.0);
        canvas.fill_rect(0.0, 0.0, 842.0, 595.0, Rgb::from_hex(0x111827));
        canvas.centered_text("Hello (world)", Font::Bold, 20.0, 100.0, Rgb(1.0, 1.0, 1.0));
        let pdf = canvas.into_pdf(&info());

        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF\n"));
        assert!(contains(&pdf, b"/MediaBox [0 0 842 595]"));
        assert!(contains(&pdf, b"(Hello \\(world\\)) Tj"));
        assert!(contains(&pdf, b"/BaseFont /Helvetica-Bold"));
        assert!(contains(&pdf, b"/CreationDate (D:20260102030405Z)"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let pdf = PageCanvas::new(100.0, 100.0).into_pdf(&info());
        let text = String::from_utf8_lossy(&pdf);

        let startxref: usize = text
            .rsplit("startxref\n")
            .next()
            .and_then(|tail| tail.lines().next())
            .unwrap()
            .parse()
            .unwrap();
        assert!(pdf[startxref..].starts_with(b"xref\n0 9\n"));

        // Entry for object 1
        let entry_at = startxref + "xref\n0 9\n".len() + 20;
        let offset: usize = std::str::from_utf8(&pdf[entry_at..entry_at + 10])
            .unwrap()
            .parse()
            .unwrap();
        assert!(pdf[offset..].starts_with(b"1 0 obj\n"));
    }

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb::from_hex(0xff00ff), Rgb(1.0, 0.0, 1.0));
    }
}
