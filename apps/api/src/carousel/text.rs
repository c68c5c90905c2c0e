//! Static Inter glyph widths and greedy word wrap for slide text.
//!
//! SVG text does not wrap, so line breaks are decided here before the markup
//! is built. Widths are in em units; the table is an approximation, and every
//! text box keeps some slack for the residual error.
//! The table covers ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

/// Font weight used by the slide templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

impl Weight {
    pub fn css_value(self) -> u16 {
        match self {
            Weight::Regular => 400,
            Weight::Bold => 700,
        }
    }

    /// Inter Bold runs wider than Regular by roughly this factor.
    fn width_factor(self) -> f32 {
        match self {
            Weight::Regular => 1.0,
            Weight::Bold => 1.07,
        }
    }
}

/// Inter Regular advance widths in em.
#[rustfmt::skip]
static INTER_WIDTHS: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
    // 0     1     2     3     4     5     6     7     8     9
    0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
    // :     ;     <     =     >     ?     @
    0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
    // A     B     C     D     E     F     G     H     I     J     K     L     M
    0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
    // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
    0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
    // [     \     ]     ^     _     `
    0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
    // a     b     c     d     e     f     g     h     i     j     k     l     m
    0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
    // n     o     p     q     r     s     t     u     v     w     x     y     z
    0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
    // {     |     }     ~
    0.33, 0.26, 0.33, 0.59,
];

/// Fallback width for non-ASCII characters.
const AVERAGE_CHAR_WIDTH: f32 = 0.58;
const SPACE_WIDTH: f32 = 0.25;
const ELLIPSIS: char = '…';

fn char_em(c: char) -> f32 {
    let code = c as usize;
    if (32..=126).contains(&code) {
        INTER_WIDTHS[code - 32]
    } else {
        AVERAGE_CHAR_WIDTH
    }
}

/// Rendered width of `s` in pixels.
pub fn measure(s: &str, font_size: f32, weight: Weight) -> f32 {
    s.chars().map(char_em).sum::<f32>() * font_size * weight.width_factor()
}

/// Greedy word wrap into lines no wider than `max_width` pixels.
///
/// Words wider than a whole line are split between characters. Output is
/// clamped to `max_lines`; a clamped last line ends with an ellipsis.
pub fn wrap(
    text: &str,
    font_size: f32,
    weight: Weight,
    max_width: f32,
    max_lines: usize,
) -> Vec<String> {
    let space_w = SPACE_WIDTH * font_size * weight.width_factor();
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_w = 0.0_f32;

    for word in text.split_whitespace() {
        for piece in split_long_word(word, font_size, weight, max_width) {
            let piece_w = measure(&piece, font_size, weight);
            if current.is_empty() {
                current = piece;
                current_w = piece_w;
            } else if current_w + space_w + piece_w <= max_width {
                current.push(' ');
                current.push_str(&piece);
                current_w += space_w + piece_w;
            } else {
                lines.push(std::mem::take(&mut current));
                current = piece;
                current_w = piece_w;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines && max_lines > 0 {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = with_ellipsis(last, font_size, weight, max_width);
        }
    }
    lines
}

fn split_long_word(word: &str, font_size: f32, weight: Weight, max_width: f32) -> Vec<String> {
    if measure(word, font_size, weight) <= max_width {
        return vec![word.to_string()];
    }
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        let mut candidate = piece.clone();
        candidate.push(c);
        if !piece.is_empty() && measure(&candidate, font_size, weight) > max_width {
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        } else {
            piece = candidate;
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

fn with_ellipsis(line: &str, font_size: f32, weight: Weight, max_width: f32) -> String {
    let mut out: String = line.trim_end().to_string();
    loop {
        let candidate = format!("{out}{ELLIPSIS}");
        if out.is_empty() || measure(&candidate, font_size, weight) <= max_width {
            return candidate;
        }
        out.pop();
        out = out.trim_end().to_string();
    }
}

/// Escapes text for use in SVG character data and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters are not allowed in XML 1.0.
            c if c.is_control() && c != '\n' && c != '\t' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty_is_zero() {
        assert_eq!(measure("", 32.0, Weight::Regular), 0.0);
    }

    #[test]
    fn test_measure_scales_with_size() {
        // "Rust" = R(0.61) + u(0.56) + s(0.44) + t(0.39) = 2.00em
        let w = measure("Rust", 10.0, Weight::Regular);
        assert!((w - 20.0).abs() < 1e-3, "got {w}");
    }

    #[test]
    fn test_bold_is_wider() {
        assert!(measure("Leadership", 28.0, Weight::Bold) > measure("Leadership", 28.0, Weight::Regular));
    }

    #[test]
    fn test_non_ascii_falls_back() {
        let w = measure("é", 1.0, Weight::Regular);
        assert!((w - AVERAGE_CHAR_WIDTH).abs() < 1e-4);
    }

    #[test]
    fn test_short_text_single_line() {
        assert_eq!(
            wrap("Team Building", 32.0, Weight::Regular, 800.0, 3),
            vec!["Team Building".to_string()]
        );
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let text = "Helping B2B SaaS companies turn messy data into revenue-driving decisions \
                    through analytics engineering and pragmatic leadership";
        let lines = wrap(text, 32.0, Weight::Regular, 900.0, 10);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(measure(line, 32.0, Weight::Regular) <= 900.0, "{line} too wide");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_clamped_output_ends_with_ellipsis() {
        let text = "word ".repeat(200);
        let lines = wrap(&text, 32.0, Weight::Regular, 400.0, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with(ELLIPSIS));
        assert!(measure(&lines[1], 32.0, Weight::Regular) <= 400.0);
    }

    #[test]
    fn test_overlong_word_is_split() {
        let word = "x".repeat(100);
        let lines = wrap(&word, 32.0, Weight::Regular, 300.0, 20);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_blank_text_no_lines() {
        assert!(wrap("   ", 32.0, Weight::Regular, 300.0, 3).is_empty());
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml("R&D <lead> \"quoted\" it's"),
            "R&amp;D &lt;lead&gt; &quot;quoted&quot; it&apos;s"
        );
        assert_eq!(escape_xml("a\u{0}b"), "ab");
    }
}
