//! Visual width calculation and escape-sequence stripping.
//!
//! Width is the sum of per-codepoint widths of the text left after removing
//! recognized escape sequences. Per-codepoint widths come from `unicode-width`:
//!
//! - East Asian Width W and F, and Emoji_Presentation codepoints: 2
//! - East Asian Width A (box drawing, block elements, ...): 1
//! - combining marks and other zero-width codepoints: 0
//! - control characters: 0
//! - everything else: 1
//!
//! Because width is always measured on the stripped text,
//! `visual_width(s) == visual_width(&strip_ansi(s))` holds for every `s`.

use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;

use crate::scanner::{scan, TokenKind};

/// Display width of a single character in terminal columns.
#[inline]
pub fn char_width(c: char) -> usize {
    if c.is_control() {
        0
    } else {
        c.width().unwrap_or(0)
    }
}

/// Display width of text that contains no escape sequences.
pub fn plain_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Display width of `s` in terminal columns, ignoring escape sequences.
///
/// Malformed and unterminated sequences count as literal text.
pub fn visual_width(s: &str) -> usize {
    scan(s)
        .filter(|t| t.is_literal())
        .map(|t| plain_width(t.text))
        .sum()
}

/// Remove every recognized escape sequence, keeping all other bytes verbatim.
///
/// Idempotent. Borrows when there is nothing to remove.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    for token in scan(s).filter(|t| t.is_literal()) {
        out.push_str(token.text);
    }
    Cow::Owned(out)
}

/// Number of complete escape sequences in `s`.
pub fn sequence_count(s: &str) -> usize {
    scan(s)
        .filter(|t| matches!(t.kind, TokenKind::Sequence(_)))
        .count()
}

/// Whether `s` ends inside an escape sequence.
pub fn ends_mid_sequence(s: &str) -> bool {
    scan(s)
        .last()
        .is_some_and(|t| t.kind == TokenKind::Unterminated)
}

/// Demote every malformed or unterminated sequence to plain text.
///
/// Their ESC characters are removed, so a terminal prints the remaining
/// characters instead of starting a sequence that swallows whatever follows.
/// Complete sequences are kept. ESC has no width, so the visual width of the
/// result equals that of `s`.
pub fn demote_malformed(s: &str) -> Cow<'_, str> {
    if !scan(s).any(|t| is_broken(t.kind)) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    for token in scan(s) {
        if is_broken(token.kind) {
            out.extend(token.text.chars().filter(|c| *c != '\x1b'));
        } else {
            out.push_str(token.text);
        }
    }
    Cow::Owned(out)
}

fn is_broken(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Malformed | TokenKind::Unterminated)
}

/// First control character a terminal would act on in the visible text of `s`.
///
/// Characters inside complete escape sequences are ignored, and so is ESC,
/// which [`demote_malformed`] takes care of.
pub fn first_control_char(s: &str) -> Option<char> {
    scan(s)
        .filter(|t| t.is_literal())
        .flat_map(|t| t.text.chars())
        .find(|c| c.is_control() && *c != '\x1b')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_width() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('中'), 2);
        assert_eq!(char_width('─'), 1);
        assert_eq!(char_width('║'), 1);
        assert_eq!(char_width('█'), 1);
        assert_eq!(char_width('\u{301}'), 0);
        assert_eq!(char_width('\x1b'), 0);
        assert_eq!(char_width('\n'), 0);
        assert_eq!(char_width('😀'), 2);
    }

    #[test]
    fn test_visual_width_plain() {
        assert_eq!(visual_width(""), 0);
        assert_eq!(visual_width("hello"), 5);
        assert_eq!(visual_width("┌─────────┐"), 11);
        assert_eq!(visual_width("日本語"), 6);
        assert_eq!(visual_width("e\u{301}"), 1);
    }

    #[test]
    fn test_visual_width_ignores_sequences() {
        assert_eq!(visual_width("\x1b[36mBBS\x1b[0m"), 3);
        assert_eq!(visual_width("\x1b[38;2;255;0;0mred\x1b[0m"), 3);
        assert_eq!(visual_width("\x1b]8;;http://bbs\x07link\x1b]8;;\x07"), 4);
        assert_eq!(visual_width("\x1b[2J\x1b[H"), 0);
    }

    #[test]
    fn test_visual_width_unterminated_is_literal() {
        // ESC itself has no width; the rest of the dangling sequence does.
        assert_eq!(visual_width("ab\x1b[12"), 5);
        assert_eq!(visual_width("\x1b"), 0);
    }

    #[test]
    fn test_strip_ansi() {
        assert!(matches!(strip_ansi("plain"), Cow::Borrowed("plain")));
        assert_eq!(strip_ansi("\x1b[1;33mHi\x1b[0m there"), "Hi there");
        assert_eq!(strip_ansi("\x1b]0;title\x1b\\text"), "text");
        assert_eq!(strip_ansi("ab\x1b[12"), "ab\x1b[12");
        assert_eq!(strip_ansi("\x1b[12\x1b[0mm"), "\x1b[12\x1b[0mm");
    }

    #[test]
    fn test_strip_ansi_idempotent_on_tricky_input() {
        for s in [
            "\x1b[12\x1b[0mm",
            "\x1b\x1b[31mx",
            "\x1b]0;t\x1bx\x1b[0m",
            "a\x1b[1\n\x1b[0mb",
            "\x1b[31m\x1b",
        ] {
            let once = strip_ansi(s).into_owned();
            assert_eq!(strip_ansi(&once), once, "input {s:?}");
            assert_eq!(visual_width(s), visual_width(&once), "input {s:?}");
        }
    }

    #[test]
    fn test_sequence_count() {
        assert_eq!(sequence_count("plain"), 0);
        assert_eq!(sequence_count("\x1b[31mA\x1b[0m\x1b[1mB\x1b[0m"), 4);
        assert_eq!(sequence_count("\x1b[31"), 0);
    }

    #[test]
    fn test_ends_mid_sequence() {
        assert!(ends_mid_sequence("text\x1b[3"));
        assert!(ends_mid_sequence("\x1b]0;title"));
        assert!(!ends_mid_sequence("text\x1b[3m"));
        assert!(!ends_mid_sequence(""));
    }

    #[test]
    fn test_demote_malformed() {
        assert!(matches!(demote_malformed("ok\x1b[0m"), Cow::Borrowed(_)));
        assert_eq!(demote_malformed("ab\x1b[3"), "ab[3");
        assert_eq!(demote_malformed("\x1b]0;t\x1b"), "]0;t");
        assert_eq!(demote_malformed("ab\x1b\x1b"), "ab");
        assert_eq!(demote_malformed("\x1b[31mx\x1b[1\x1b!"), "\x1b[31mx[1!");

        for s in ["\x1b[31mred\x1b[1", "x\x1b[1\x1b", "\x1b[12\x1b[0mm"] {
            let demoted = demote_malformed(s);
            assert_eq!(visual_width(&demoted), visual_width(s), "input {s:?}");
            assert!(!ends_mid_sequence(&demoted), "input {s:?}");
            assert!(
                scan(&demoted).all(|t| !is_broken(t.kind)),
                "input {s:?}"
            );
        }
    }

    #[test]
    fn test_first_control_char() {
        assert_eq!(first_control_char("plain"), None);
        assert_eq!(first_control_char("a\tb"), Some('\t'));
        assert_eq!(first_control_char("ab\rcd"), Some('\r'));
        assert_eq!(first_control_char("\x1b[31mred\x1b[0m"), None);
        assert_eq!(first_control_char("\x1b]0;title\x07x"), None);
        assert_eq!(first_control_char("ab\x1b\x1b"), None);
        assert_eq!(first_control_char("\x1b[1\x08"), Some('\x08'));
    }
}
