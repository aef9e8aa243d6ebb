//! Color and text style types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Terminal color supporting ANSI, 256-color palette, and true RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// Default terminal color
    Default,

    /// Standard ANSI colors (0-7)
    Black,
    /// ANSI Red
    Red,
    /// ANSI Green
    Green,
    /// ANSI Yellow
    Yellow,
    /// ANSI Blue
    Blue,
    /// ANSI Magenta
    Magenta,
    /// ANSI Cyan
    Cyan,
    /// ANSI White
    White,

    /// Bright ANSI colors (8-15)
    BrightBlack,
    /// Bright Red
    BrightRed,
    /// Bright Green
    BrightGreen,
    /// Bright Yellow
    BrightYellow,
    /// Bright Blue
    BrightBlue,
    /// Bright Magenta
    BrightMagenta,
    /// Bright Cyan
    BrightCyan,
    /// Bright White
    BrightWhite,

    /// 256-color palette index (0-255)
    Indexed(u8),

    /// True color RGB (24-bit)
    Rgb {
        /// Red component
        r: u8,
        /// Green component
        g: u8,
        /// Blue component
        b: u8,
    },
}

/// The sixteen named colors in palette order.
const NAMED: [Color; 16] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
    Color::BrightBlack,
    Color::BrightRed,
    Color::BrightGreen,
    Color::BrightYellow,
    Color::BrightBlue,
    Color::BrightMagenta,
    Color::BrightCyan,
    Color::BrightWhite,
];

/// CGA palette, the de-facto standard for ANSI art.
const PALETTE: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00),
    (0xaa, 0x00, 0x00),
    (0x00, 0xaa, 0x00),
    (0xaa, 0x55, 0x00),
    (0x00, 0x00, 0xaa),
    (0xaa, 0x00, 0xaa),
    (0x00, 0xaa, 0xaa),
    (0xaa, 0xaa, 0xaa),
    (0x55, 0x55, 0x55),
    (0xff, 0x55, 0x55),
    (0x55, 0xff, 0x55),
    (0xff, 0xff, 0x55),
    (0x55, 0x55, 0xff),
    (0xff, 0x55, 0xff),
    (0x55, 0xff, 0xff),
    (0xff, 0xff, 0xff),
];

impl Color {
    /// Look up a named color.
    ///
    /// Case-insensitive; `bright_cyan`, `bright-cyan` and `brightcyan` are all
    /// accepted, and `gray`/`grey` alias `bright_black`.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let color = match key.as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "brightblack" | "gray" | "grey" => Color::BrightBlack,
            "brightred" => Color::BrightRed,
            "brightgreen" => Color::BrightGreen,
            "brightyellow" => Color::BrightYellow,
            "brightblue" => Color::BrightBlue,
            "brightmagenta" => Color::BrightMagenta,
            "brightcyan" => Color::BrightCyan,
            "brightwhite" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }

    /// Palette slot (0-15) for the named colors.
    pub fn palette_index(&self) -> Option<u8> {
        NAMED.iter().position(|c| c == self).map(|i| i as u8)
    }

    /// SGR parameters selecting this color as foreground.
    pub fn fg_params(&self) -> String {
        match self {
            Color::Default => "39".to_string(),
            Color::Indexed(n) => format!("38;5;{n}"),
            Color::Rgb { r, g, b } => format!("38;2;{r};{g};{b}"),
            named => {
                let idx = named.palette_index().unwrap_or(7);
                if idx < 8 {
                    format!("{}", 30 + idx)
                } else {
                    format!("{}", 90 + idx - 8)
                }
            }
        }
    }

    /// Resolve to an RGB triple; `None` for the terminal default.
    pub fn to_rgb(&self) -> Option<(u8, u8, u8)> {
        match *self {
            Color::Default => None,
            Color::Rgb { r, g, b } => Some((r, g, b)),
            Color::Indexed(n) => Some(indexed_to_rgb(n)),
            named => named.palette_index().map(|i| PALETTE[i as usize]),
        }
    }

    /// CSS hex color (`#rrggbb`); `None` for the terminal default.
    pub fn to_css(&self) -> Option<String> {
        self.to_rgb()
            .map(|(r, g, b)| format!("#{r:02x}{g:02x}{b:02x}"))
    }
}

/// xterm 256-color palette: 16 base colors, 6x6x6 cube, 24 grays.
fn indexed_to_rgb(n: u8) -> (u8, u8, u8) {
    match n {
        0..=15 => PALETTE[n as usize],
        16..=231 => {
            let i = n - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            (level(i / 36), level((i / 6) % 6), level(i % 6))
        }
        _ => {
            let v = 8 + (n - 232) * 10;
            (v, v, v)
        }
    }
}

/// Text attributes toggled by SGR codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextAttributes {
    /// Bold/bright text
    pub bold: bool,
    /// Dimmed text
    pub dim: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Blinking text
    pub blink: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
    /// Hidden text
    pub hidden: bool,
    /// Strikethrough text
    pub strikethrough: bool,
}

/// Accumulated SGR state: colors plus attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Text attributes
    pub attrs: TextAttributes,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: Color::Default,
            bg: Color::Default,
            attrs: TextAttributes::default(),
        }
    }
}
