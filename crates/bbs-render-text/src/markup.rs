//! ANSI-to-HTML conversion.
//!
//! The scanner splits the input; complete CSI sequences are fed through the
//! VTE state machine so SGR parameters are parsed the same way a terminal
//! would. Literal text is HTML-escaped and every other sequence is dropped.

use std::fmt::Write as _;

use vte::{Params, Perform};

use bbs_render_core::{Color, Style};

use crate::scanner::{scan, SequenceKind, TokenKind};

/// Foreground used when reverse video swaps in the default color.
const DEFAULT_FG_CSS: &str = "#aaaaaa";
/// Background used when reverse video swaps in the default color.
const DEFAULT_BG_CSS: &str = "#000000";

/// Convert ANSI-styled text to HTML with inline-styled spans.
///
/// The output never contains control characters, and every span opened is
/// closed before the end of the string.
pub fn to_html(text: &str) -> String {
    let mut writer = HtmlWriter::default();
    let mut parser = vte::Parser::new();

    for token in scan(text) {
        match token.kind {
            TokenKind::Sequence(SequenceKind::Csi) => {
                for byte in token.text.bytes() {
                    parser.advance(&mut writer, byte);
                }
            }
            TokenKind::Sequence(_) => {}
            TokenKind::Text | TokenKind::Malformed | TokenKind::Unterminated => {
                writer.push_text(token.text);
            }
        }
    }

    writer.finish()
}

/// VTE performer accumulating HTML output.
#[derive(Debug, Default)]
struct HtmlWriter {
    out: String,
    /// Style set by the most recent SGR codes
    style: Style,
    /// Declarations of the span currently open in `out`
    open_css: Option<String>,
}

impl HtmlWriter {
    fn push_text(&mut self, text: &str) {
        let mut visible = text.chars().filter(|c| !c.is_control()).peekable();
        if visible.peek().is_none() {
            return;
        }

        self.sync_span();
        for c in visible {
            push_escaped(&mut self.out, c);
        }
    }

    /// Make the open span match the current style.
    fn sync_span(&mut self) {
        let css = style_css(&self.style);
        let wanted = (!css.is_empty()).then_some(css);
        if wanted == self.open_css {
            return;
        }

        if self.open_css.is_some() {
            self.out.push_str("</span>");
        }
        if let Some(css) = &wanted {
            let _ = write!(self.out, "<span style=\"{css}\">");
        }
        self.open_css = wanted;
    }

    fn finish(mut self) -> String {
        if self.open_css.take().is_some() {
            self.out.push_str("</span>");
        }
        self.out
    }

    fn process_sgr(&mut self, params: &Params) {
        let mut iter = params.iter();
        let style = &mut self.style;

        while let Some(param) = iter.next() {
            let code = param.first().copied().unwrap_or(0);

            match code {
                0 => *style = Style::default(),

                1 => style.attrs.bold = true,
                2 => style.attrs.dim = true,
                3 => style.attrs.italic = true,
                4 => style.attrs.underline = true,
                5 => style.attrs.blink = true,
                7 => style.attrs.reverse = true,
                8 => style.attrs.hidden = true,
                9 => style.attrs.strikethrough = true,

                22 => {
                    style.attrs.bold = false;
                    style.attrs.dim = false;
                }
                23 => style.attrs.italic = false,
                24 => style.attrs.underline = false,
                25 => style.attrs.blink = false,
                27 => style.attrs.reverse = false,
                28 => style.attrs.hidden = false,
                29 => style.attrs.strikethrough = false,

                30..=37 => style.fg = Color::Indexed((code - 30) as u8),
                39 => style.fg = Color::Default,
                40..=47 => style.bg = Color::Indexed((code - 40) as u8),
                49 => style.bg = Color::Default,
                90..=97 => style.fg = Color::Indexed((code - 90 + 8) as u8),
                100..=107 => style.bg = Color::Indexed((code - 100 + 8) as u8),

                38 | 48 => {
                    // Colon form carries its arguments as sub-parameters.
                    let color = if param.len() > 1 {
                        extended_color(&mut param[1..].iter().copied())
                    } else {
                        let mut rest = iter.by_ref().map(|p| p.first().copied().unwrap_or(0));
                        extended_color(&mut rest)
                    };
                    if let Some(color) = color {
                        if code == 38 {
                            style.fg = color;
                        } else {
                            style.bg = color;
                        }
                    }
                }

                _ => {}
            }
        }
    }
}

/// Parse the arguments of a `38`/`48` code: `5;n` or `2;r;g;b`.
fn extended_color(args: &mut dyn Iterator<Item = u16>) -> Option<Color> {
    match args.next()? {
        5 => args.next().map(|n| Color::Indexed(n.min(255) as u8)),
        2 => {
            let r = args.next()?.min(255) as u8;
            let g = args.next()?.min(255) as u8;
            let b = args.next()?.min(255) as u8;
            Some(Color::Rgb { r, g, b })
        }
        _ => None,
    }
}

/// Inline CSS declarations for a style; empty when nothing is visible.
fn style_css(style: &Style) -> String {
    let attrs = &style.attrs;
    let mut fg = style.fg.to_css();
    let mut bg = style.bg.to_css();
    if attrs.reverse {
        let swapped_fg = bg.unwrap_or_else(|| DEFAULT_BG_CSS.to_string());
        let swapped_bg = fg.unwrap_or_else(|| DEFAULT_FG_CSS.to_string());
        fg = Some(swapped_fg);
        bg = Some(swapped_bg);
    }

    let mut decls: Vec<String> = Vec::new();
    if let Some(fg) = fg {
        decls.push(format!("color:{fg}"));
    }
    if let Some(bg) = bg {
        decls.push(format!("background-color:{bg}"));
    }
    if attrs.bold {
        decls.push("font-weight:bold".to_string());
    }
    if attrs.dim {
        decls.push("opacity:0.5".to_string());
    }
    if attrs.italic {
        decls.push("font-style:italic".to_string());
    }
    match (attrs.underline, attrs.strikethrough) {
        (true, true) => decls.push("text-decoration:underline line-through".to_string()),
        (true, false) => decls.push("text-decoration:underline".to_string()),
        (false, true) => decls.push("text-decoration:line-through".to_string()),
        (false, false) => {}
    }
    if attrs.hidden {
        decls.push("visibility:hidden".to_string());
    }
    decls.join(";")
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        c => out.push(c),
    }
}

impl Perform for HtmlWriter {
    fn print(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.push_text(c.encode_utf8(&mut buf));
    }

    fn execute(&mut self, _byte: u8) {}

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _c: char) {}

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    /// Only SGR affects markup; cursor movement and private modes are dropped.
    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, c: char) {
        if c == 'm' && intermediates.is_empty() && !ignore {
            self.process_sgr(params);
        }
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorizer::colorize;

    #[test]
    fn test_plain_text_is_escaped() {
        assert_eq!(to_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(to_html("it's"), "it&#39;s");
    }

    #[test]
    fn test_colorized_text_becomes_span() {
        let html = to_html(&colorize("Hi", "yellow").unwrap());
        assert_eq!(html, "<span style=\"color:#aa5500\">Hi</span>");
    }

    #[test]
    fn test_attributes_and_resets() {
        assert_eq!(
            to_html("\x1b[1;4mA\x1b[24mB\x1b[0mC"),
            "<span style=\"font-weight:bold;text-decoration:underline\">A</span>\
             <span style=\"font-weight:bold\">B</span>C"
        );
    }

    #[test]
    fn test_extended_colors() {
        assert_eq!(
            to_html("\x1b[38;5;196mx\x1b[0m"),
            "<span style=\"color:#ff0000\">x</span>"
        );
        assert_eq!(
            to_html("\x1b[48;2;1;2;3mx"),
            "<span style=\"background-color:#010203\">x</span>"
        );
        assert_eq!(
            to_html("\x1b[38:5:21mx"),
            "<span style=\"color:#0000ff\">x</span>"
        );
    }

    #[test]
    fn test_reverse_uses_default_colors() {
        assert_eq!(
            to_html("\x1b[7mx"),
            "<span style=\"color:#000000;background-color:#aaaaaa\">x</span>"
        );
    }

    #[test]
    fn test_span_closed_at_end() {
        let html = to_html("\x1b[31munclosed");
        assert!(html.ends_with("</span>"));
        assert_eq!(html.matches("<span").count(), html.matches("</span>").count());
    }

    #[test]
    fn test_redundant_codes_do_not_split_spans() {
        assert_eq!(
            to_html("\x1b[32mab\x1b[32mcd\x1b[0m"),
            "<span style=\"color:#00aa00\">abcd</span>"
        );
    }

    #[test]
    fn test_blink_only_has_no_span() {
        assert_eq!(to_html("\x1b[5mx\x1b[0m"), "x");
    }

    #[test]
    fn test_other_sequences_and_controls_dropped() {
        let html = to_html("\x1b[2J\x1b]0;title\x07a\tb\x1b[1\nc\x1b7\x1b[3");
        assert!(!html.chars().any(|c| c.is_control()));
        assert_eq!(html, "ab[1c[3");
    }

    #[test]
    fn test_box_drawing_passes_through() {
        assert_eq!(to_html("│ hello   │"), "│ hello   │");
    }
}
