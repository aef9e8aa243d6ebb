//! Output-target policy: width, line ending, color mode, validation toggle.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Line terminator used when joining rendered lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    /// `\n`, for local terminals and markup
    Lf,
    /// `\r\n`, for telnet and other line-mode terminals
    Crlf,
}

impl LineEnding {
    /// The terminator bytes.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// How styling is serialized for the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Raw ANSI escape sequences
    Ansi,
    /// Inline-styled HTML spans; no control bytes
    Html,
    /// Plain text, all styling stripped
    None,
}

/// A named bundle of output-target policy.
///
/// Values are built once at configuration time and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct RenderContext {
    /// Maximum visual width of any output line
    pub width: usize,
    /// Terminator used between lines
    pub line_ending: LineEnding,
    /// Styling serialization
    pub color_mode: ColorMode,
    /// Run alignment validation before returning
    pub validate: bool,
}

impl RenderContext {
    /// Local ANSI terminal, 80 columns.
    pub const TERMINAL_80: RenderContext = RenderContext {
        width: 80,
        line_ending: LineEnding::Lf,
        color_mode: ColorMode::Ansi,
        validate: true,
    };

    /// Telnet client, 80 columns, CRLF line endings.
    pub const TELNET_80: RenderContext = RenderContext {
        width: 80,
        line_ending: LineEnding::Crlf,
        color_mode: ColorMode::Ansi,
        validate: true,
    };

    /// Web page, 80 columns, HTML markup.
    pub const WEB_80: RenderContext = RenderContext {
        width: 80,
        line_ending: LineEnding::Lf,
        color_mode: ColorMode::Html,
        validate: true,
    };

    /// Builtin contexts by configuration name.
    pub const BUILTIN: [(&'static str, RenderContext); 3] = [
        ("terminal_80", Self::TERMINAL_80),
        ("telnet_80", Self::TELNET_80),
        ("web_80", Self::WEB_80),
    ];

    /// Look up a builtin context by name (case-insensitive).
    pub fn builtin(name: &str) -> Option<RenderContext> {
        Self::BUILTIN
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, ctx)| *ctx)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::TERMINAL_80
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contexts() {
        assert_eq!(RenderContext::TERMINAL_80.width, 80);
        assert_eq!(RenderContext::TERMINAL_80.line_ending, LineEnding::Lf);
        assert_eq!(RenderContext::TERMINAL_80.color_mode, ColorMode::Ansi);
        assert!(RenderContext::TERMINAL_80.validate);

        assert_eq!(RenderContext::TELNET_80.line_ending, LineEnding::Crlf);
        assert_eq!(RenderContext::TELNET_80.color_mode, ColorMode::Ansi);

        assert_eq!(RenderContext::WEB_80.line_ending, LineEnding::Lf);
        assert_eq!(RenderContext::WEB_80.color_mode, ColorMode::Html);
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(
            RenderContext::builtin("telnet_80"),
            Some(RenderContext::TELNET_80)
        );
        assert_eq!(RenderContext::builtin("WEB_80"), Some(RenderContext::WEB_80));
        assert_eq!(RenderContext::builtin("vt52"), None);
    }

    #[test]
    fn test_line_ending_bytes() {
        assert_eq!(LineEnding::Lf.as_str(), "\n");
        assert_eq!(LineEnding::Crlf.as_str(), "\r\n");
    }

    #[test]
    fn test_context_yaml() {
        let yaml = "width: 132\nline_ending: crlf\ncolor_mode: none\nvalidate: false\n";
        let ctx: RenderContext = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(ctx.width, 132);
        assert_eq!(ctx.line_ending, LineEnding::Crlf);
        assert_eq!(ctx.color_mode, ColorMode::None);
        assert!(!ctx.validate);
    }
}
