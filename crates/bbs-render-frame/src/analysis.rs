//! Line-by-line width analysis of rendered frames.
//!
//! Used to diagnose alignment problems in stored ANSI art and captured
//! output: each line's raw length, visual width and escape-sequence count,
//! plus whether the non-empty lines agree on a width.

use std::fmt::Write as _;

use serde::Serialize;

use bbs_render_text::{sequence_count, strip_ansi, visual_width};

/// Characters of stripped text shown per line in a summary.
const PREVIEW_CHARS: usize = 60;

/// Measurements for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineStats {
    /// 1-based line number
    pub index: usize,
    /// Length in characters, escape sequences included
    pub raw_len: usize,
    /// Display width in columns
    pub visual_width: usize,
    /// Number of complete escape sequences
    pub sequence_count: usize,
    /// Text with escape sequences removed
    pub plain: String,
}

/// Analysis of a whole frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    /// Per-line measurements
    pub lines: Vec<LineStats>,
    /// Narrowest and widest non-empty line, if any
    pub width_range: Option<(usize, usize)>,
    /// True when all non-empty lines share one width
    pub consistent: bool,
}

impl FrameReport {
    /// Human-readable report.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let preview: String = line.plain.chars().take(PREVIEW_CHARS).collect();
            let _ = writeln!(
                out,
                "Line {:2}: raw={:3}, visual={:3}, ansi={:2} | {}",
                line.index, line.raw_len, line.visual_width, line.sequence_count, preview
            );
        }

        if let Some((min, max)) = self.width_range {
            let _ = writeln!(out, "\nWidth range: {min} - {max} characters");
            if self.consistent {
                out.push_str("✓ Consistent width\n");
            } else {
                let _ = writeln!(
                    out,
                    "⚠️  INCONSISTENT WIDTH: {} character difference",
                    max - min
                );
            }
        }
        out
    }
}

/// Measure every line of `text`.
///
/// Lines are split on LF with an optional preceding CR; a trailing line
/// ending does not start an extra line. Empty lines (after stripping) are
/// listed but do not count towards the width range.
pub fn analyze_frame(text: &str) -> FrameReport {
    let lines: Vec<LineStats> = text
        .lines()
        .enumerate()
        .map(|(i, line)| LineStats {
            index: i + 1,
            raw_len: line.chars().count(),
            visual_width: visual_width(line),
            sequence_count: sequence_count(line),
            plain: strip_ansi(line).into_owned(),
        })
        .collect();

    let mut widths = lines
        .iter()
        .filter(|l| !l.plain.is_empty())
        .map(|l| l.visual_width);
    let width_range = widths.next().map(|first| {
        widths.fold((first, first), |(min, max), w| (min.min(w), max.max(w)))
    });

    FrameReport {
        consistent: width_range.map_or(true, |(min, max)| min == max),
        lines,
        width_range,
    }
}
