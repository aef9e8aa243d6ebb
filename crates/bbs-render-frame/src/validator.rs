//! Read-only checks over rendered line sets.
//!
//! Neither check ever fails: defects are collected into a
//! [`ValidationResult`] and the caller decides what to do with them.

use bbs_render_core::{BorderStyle, BoxCharSet, ValidationError, ValidationResult};
use bbs_render_text::{strip_ansi, visual_width};

/// Check that every line has exactly `target_width` columns.
pub fn validate_alignment<S: AsRef<str>>(lines: &[S], target_width: usize) -> ValidationResult {
    let errors = lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let width = visual_width(line.as_ref());
            (width != target_width)
                .then(|| ValidationError::width_mismatch(index, target_width, width))
        })
        .collect();

    ValidationResult::from_errors(errors)
}

/// Check that `lines` form a well-drawn box.
///
/// The border style is identified from the top-left glyph. The top rule may
/// carry a space-padded title; every other position must hold the expected
/// glyph.
pub fn validate_borders<S: AsRef<str>>(lines: &[S]) -> ValidationResult {
    let plain: Vec<Vec<char>> = lines
        .iter()
        .map(|line| strip_ansi(line.as_ref()).chars().collect())
        .collect();
    let widths: Vec<usize> = lines.iter().map(|l| visual_width(l.as_ref())).collect();
    let top_width = widths.first().copied().unwrap_or(0);

    let mut tracer = BorderTracer {
        top_width,
        widths: &widths,
        errors: Vec::new(),
    };

    if plain.len() < 2 {
        tracer.report(
            0,
            format!("frame needs at least 2 lines, found {}", plain.len()),
        );
        return ValidationResult::from_errors(tracer.errors);
    }

    let top = &plain[0];
    let Some(style) = top.first().and_then(|c| BorderStyle::from_top_left(*c)) else {
        let found = top.first().map_or("nothing".to_string(), |c| format!("'{c}'"));
        tracer.report(0, format!("unrecognized top-left corner: found {found}"));
        return ValidationResult::from_errors(tracer.errors);
    };
    let glyphs = style.glyphs();

    tracer.check_top(top, glyphs);

    let last = plain.len() - 1;
    for (index, line) in plain.iter().enumerate().take(last).skip(1) {
        tracer.check_ends(index, line, glyphs.vertical, glyphs.vertical, "side");
    }

    let bottom = &plain[last];
    tracer.check_ends(
        last,
        bottom,
        glyphs.bottom_left,
        glyphs.bottom_right,
        "bottom corner",
    );
    tracer.check_rule(last, bottom, glyphs.horizontal);

    ValidationResult::from_errors(tracer.errors)
}

/// Collects border defects line by line.
struct BorderTracer<'a> {
    top_width: usize,
    widths: &'a [usize],
    errors: Vec<ValidationError>,
}

impl BorderTracer<'_> {
    fn report(&mut self, line_index: usize, detail: String) {
        self.errors.push(ValidationError {
            line_index,
            expected_width: self.top_width,
            actual_width: self.widths.get(line_index).copied().unwrap_or(0),
            detail,
        });
    }

    fn check_top(&mut self, top: &[char], glyphs: &BoxCharSet) {
        if top.len() < 2 || top[top.len() - 1] != glyphs.top_right {
            let found = if top.len() < 2 { None } else { top.last() };
            self.report(0, mismatch("top-right corner", glyphs.top_right, found));
            return;
        }

        // A title sits between the first and last non-rule glyphs and is
        // padded with one space on each side.
        let inner = &top[1..top.len() - 1];
        let first = inner.iter().position(|c| *c != glyphs.horizontal);
        let last = inner.iter().rposition(|c| *c != glyphs.horizontal);
        if let (Some(first), Some(last)) = (first, last) {
            if inner[first] != ' ' || inner[last] != ' ' || first == last {
                let offending = if inner[first] != ' ' {
                    inner[first]
                } else {
                    inner[last]
                };
                self.report(
                    0,
                    format!(
                        "top rule: expected '{}' or a space-padded title, found '{}'",
                        glyphs.horizontal, offending
                    ),
                );
            }
        }
    }

    fn check_ends(&mut self, index: usize, line: &[char], left: char, right: char, what: &str) {
        match line.first() {
            Some(c) if *c == left => {}
            found => {
                self.report(index, mismatch(&format!("left {what}"), left, found));
                return;
            }
        }
        match line.last() {
            Some(c) if line.len() >= 2 && *c == right => {}
            found => {
                let found = if line.len() < 2 { None } else { found };
                self.report(index, mismatch(&format!("right {what}"), right, found));
            }
        }
    }

    fn check_rule(&mut self, index: usize, line: &[char], horizontal: char) {
        if line.len() < 2 {
            return;
        }
        if let Some(c) = line[1..line.len() - 1].iter().find(|c| **c != horizontal) {
            self.report(index, format!("bottom rule: expected '{horizontal}', found '{c}'"));
        }
    }
}

fn mismatch(what: &str, expected: char, found: Option<&char>) -> String {
    match found {
        Some(c) => format!("{what}: expected '{expected}', found '{c}'"),
        None => format!("{what}: expected '{expected}', found nothing"),
    }
}
