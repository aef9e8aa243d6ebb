//! ANSI colorization: apply, detect, close and strip SGR styling.

use std::borrow::Cow;

use bbs_render_core::{Color, Error, Result};

use crate::scanner::scan;
use crate::width::{demote_malformed, strip_ansi};

/// SGR reset sequence.
pub const RESET: &str = "\x1b[0m";

/// Wrap `text` in the named color and append a reset.
///
/// The visual width of the result equals the visual width of `text`:
/// malformed and dangling sequences in `text` are demoted to plain text first
/// so they cannot swallow the reset.
///
/// # Errors
///
/// Returns [`Error::UnknownColor`] when `color_name` is not a named color.
pub fn colorize(text: &str, color_name: &str) -> Result<String> {
    let color =
        Color::from_name(color_name).ok_or_else(|| Error::UnknownColor(color_name.to_string()))?;
    Ok(colorize_with(text, color))
}

/// Wrap `text` in an already-resolved color and append a reset.
pub fn colorize_with(text: &str, color: Color) -> String {
    let body = demote_malformed(text);
    format!("\x1b[{}m{}{}", color.fg_params(), body, RESET)
}

/// Plain text with all styling removed.
pub fn strip(text: &str) -> String {
    strip_ansi(text).into_owned()
}

/// Whether SGR styling set in `s` is still in effect at the end of `s`.
///
/// Any non-reset SGR parameter counts as opening a style; only a trailing
/// `0` (or empty parameter list) closes it.
pub fn has_open_style(s: &str) -> bool {
    let mut open = false;
    for params in scan(s).filter_map(|t| t.sgr_params()) {
        open = sgr_leaves_open(params, open);
    }
    open
}

/// Apply one SGR parameter list to the open/closed state.
fn sgr_leaves_open(params: &str, mut open: bool) -> bool {
    if params.is_empty() {
        return false;
    }

    let mut codes = params.split(';');
    while let Some(code) = codes.next() {
        // Colon sub-parameters (38:5:n) travel inside one code.
        let head = code.split(':').next().unwrap_or("");
        match head.parse::<u16>().unwrap_or(0) {
            0 => open = false,
            38 | 48 | 58 if !code.contains(':') => {
                open = true;
                match codes.next() {
                    Some("5") => {
                        codes.next();
                    }
                    Some("2") => {
                        codes.next();
                        codes.next();
                        codes.next();
                    }
                    _ => {}
                }
            }
            _ => open = true,
        }
    }
    open
}

/// Ensure no styling leaks past the end of `s`.
///
/// Demotes malformed and dangling sequences, then appends a reset if an SGR
/// style is still open.
pub fn close_open_style(s: &str) -> Cow<'_, str> {
    let demoted = demote_malformed(s);
    if !has_open_style(&demoted) {
        return demoted;
    }
    let mut out = demoted.into_owned();
    out.push_str(RESET);
    Cow::Owned(out)
}
