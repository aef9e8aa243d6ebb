//! Border styles and their box-drawing glyph sets.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Box-drawing character set for one border style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxCharSet {
    /// Top-left corner
    pub top_left: char,
    /// Top-right corner
    pub top_right: char,
    /// Bottom-left corner
    pub bottom_left: char,
    /// Bottom-right corner
    pub bottom_right: char,
    /// Horizontal rule
    pub horizontal: char,
    /// Vertical side
    pub vertical: char,
}

/// Light box: ┌─┐│└┘
const SINGLE: BoxCharSet = BoxCharSet {
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    horizontal: '─',
    vertical: '│',
};

/// Double box: ╔═╗║╚╝
const DOUBLE: BoxCharSet = BoxCharSet {
    top_left: '╔',
    top_right: '╗',
    bottom_left: '╚',
    bottom_right: '╝',
    horizontal: '═',
    vertical: '║',
};

/// Heavy box: ┏━┓┃┗┛
const HEAVY: BoxCharSet = BoxCharSet {
    top_left: '┏',
    top_right: '┓',
    bottom_left: '┗',
    bottom_right: '┛',
    horizontal: '━',
    vertical: '┃',
};

/// Rounded: ╭─╮│╰╯
const ROUNDED: BoxCharSet = BoxCharSet {
    top_left: '╭',
    top_right: '╮',
    bottom_left: '╰',
    bottom_right: '╯',
    horizontal: '─',
    vertical: '│',
};

/// ASCII: +-+|++
const ASCII: BoxCharSet = BoxCharSet {
    top_left: '+',
    top_right: '+',
    bottom_left: '+',
    bottom_right: '+',
    horizontal: '-',
    vertical: '|',
};

/// Border style of a frame.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    /// Light single-line box
    #[default]
    Single,
    /// Double-line box
    Double,
    /// Heavy single-line box
    Heavy,
    /// Single-line box with rounded corners
    Rounded,
    /// Plain ASCII box for terminals without line-drawing glyphs
    Ascii,
}

impl BorderStyle {
    /// Every style, in detection order.
    pub const ALL: [BorderStyle; 5] = [
        BorderStyle::Single,
        BorderStyle::Double,
        BorderStyle::Heavy,
        BorderStyle::Rounded,
        BorderStyle::Ascii,
    ];

    /// Glyphs used to draw this style.
    pub fn glyphs(&self) -> &'static BoxCharSet {
        match self {
            BorderStyle::Single => &SINGLE,
            BorderStyle::Double => &DOUBLE,
            BorderStyle::Heavy => &HEAVY,
            BorderStyle::Rounded => &ROUNDED,
            BorderStyle::Ascii => &ASCII,
        }
    }

    /// Identify a style from its top-left corner glyph.
    pub fn from_top_left(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.glyphs().top_left == c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single() {
        assert_eq!(BorderStyle::default(), BorderStyle::Single);
        assert_eq!(BorderStyle::default().glyphs().horizontal, '─');
    }

    #[test]
    fn test_from_top_left() {
        assert_eq!(BorderStyle::from_top_left('┌'), Some(BorderStyle::Single));
        assert_eq!(BorderStyle::from_top_left('╔'), Some(BorderStyle::Double));
        assert_eq!(BorderStyle::from_top_left('┏'), Some(BorderStyle::Heavy));
        assert_eq!(BorderStyle::from_top_left('╭'), Some(BorderStyle::Rounded));
        assert_eq!(BorderStyle::from_top_left('+'), Some(BorderStyle::Ascii));
        assert_eq!(BorderStyle::from_top_left('x'), None);
    }

    #[test]
    fn test_glyph_sets_distinct_corners() {
        for style in BorderStyle::ALL {
            let g = style.glyphs();
            if style != BorderStyle::Ascii {
                assert_ne!(g.top_left, g.top_right);
                assert_ne!(g.bottom_left, g.bottom_right);
            }
            assert_ne!(g.horizontal, g.vertical);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&BorderStyle::Rounded).unwrap();
        assert_eq!(json, "\"rounded\"");
        let style: BorderStyle = serde_json::from_str("\"double\"").unwrap();
        assert_eq!(style, BorderStyle::Double);
    }
}
