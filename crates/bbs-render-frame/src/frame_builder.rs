//! Bordered, width-uniform frame construction.
//!
//! A frame of width `W` is a top rule, one line per content segment and a
//! bottom rule, each exactly `W` columns wide:
//!
//! ```text
//! ┌─────────┐
//! │ hello   │
//! └─────────┘
//! ```
//!
//! Content sits between one column of padding on each side, so the interior
//! holds `W - 4` columns. Content that does not fit is rejected, never
//! truncated or wrapped.

use tracing::{debug, error, trace};

use bbs_render_core::{
    BorderStyle, BoxCharSet, Error, FrameOptions, RenderedFrame, Result, StyledSegment,
    MIN_FRAME_WIDTH,
};
use bbs_render_text::{close_open_style, colorize, first_control_char, visual_width};

use crate::validator::validate_alignment;

/// Border columns plus one padding column on each side.
const CHROME_WIDTH: usize = 4;

/// Builds frames in one border style.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameBuilder {
    style: BorderStyle,
}

impl FrameBuilder {
    /// Create a builder drawing with `style`.
    pub fn new(style: BorderStyle) -> Self {
        Self { style }
    }

    /// Build an untitled frame.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidWidth`] if `width` is below the minimum
    /// - [`Error::InvalidInput`] if a segment or the title contains a control
    ///   character other than ESC
    /// - [`Error::ContentTooWide`] if a segment exceeds the interior width
    /// - [`Error::UnknownColor`] if a segment names an unknown color
    /// - [`Error::FrameInvariantViolation`] if a produced line has the wrong width
    pub fn build(&self, content_lines: &[StyledSegment], width: usize) -> Result<RenderedFrame> {
        self.assemble(None, content_lines, width)
    }

    /// Build a frame with `title` centered in the top rule.
    ///
    /// The title is padded with one space on each side; when the leftover
    /// rule cannot be split evenly the extra column goes to the right.
    ///
    /// # Errors
    ///
    /// As [`FrameBuilder::build`], plus [`Error::TitleTooWide`] when the
    /// padded title does not fit between the corners.
    pub fn build_with_title(
        &self,
        title: &str,
        content_lines: &[StyledSegment],
        width: usize,
    ) -> Result<RenderedFrame> {
        self.assemble(Some(title), content_lines, width)
    }

    /// Build the frame described by a request.
    pub fn build_options(options: &FrameOptions) -> Result<RenderedFrame> {
        Self::new(options.border_style).assemble(
            options.title.as_deref(),
            &options.content_lines,
            options.width,
        )
    }

    fn assemble(
        &self,
        title: Option<&str>,
        content_lines: &[StyledSegment],
        width: usize,
    ) -> Result<RenderedFrame> {
        debug!(
            "Building {:?} frame: width={}, content_lines={}, titled={}",
            self.style,
            width,
            content_lines.len(),
            title.is_some()
        );

        if width < MIN_FRAME_WIDTH {
            return Err(Error::InvalidWidth(width));
        }

        let glyphs = self.style.glyphs();
        let interior = width - CHROME_WIDTH;
        let mut lines = Vec::with_capacity(content_lines.len() + 2);

        lines.push(match title {
            Some(title) => title_rule(title, width, glyphs)?,
            None => plain_rule(glyphs.top_left, glyphs.top_right, glyphs.horizontal, width),
        });

        for (index, segment) in content_lines.iter().enumerate() {
            lines.push(content_line(index, segment, interior, glyphs)?);
        }

        lines.push(plain_rule(
            glyphs.bottom_left,
            glyphs.bottom_right,
            glyphs.horizontal,
            width,
        ));

        let check = validate_alignment(&lines, width);
        if !check.valid {
            error!(
                "Frame invariant violated: {} line(s) not {} columns wide",
                check.errors.len(),
                width
            );
            return Err(Error::FrameInvariantViolation(check));
        }

        debug!("Built frame: {} lines of width {}", lines.len(), width);
        Ok(RenderedFrame::new(width, lines))
    }
}

/// Corner, `width - 2` rule glyphs, corner.
fn plain_rule(left: char, right: char, horizontal: char, width: usize) -> String {
    let mut line = String::with_capacity(width * 3);
    line.push(left);
    line.extend(std::iter::repeat(horizontal).take(width - 2));
    line.push(right);
    line
}

fn title_rule(title: &str, width: usize, glyphs: &BoxCharSet) -> Result<String> {
    if let Some(c) = first_control_char(title) {
        return Err(Error::InvalidInput(format!(
            "title contains control character {c:?}"
        )));
    }

    let title = close_open_style(title);
    let padded = visual_width(&title) + 2;
    let room = width - 2;
    if padded > room {
        return Err(Error::TitleTooWide {
            width: padded,
            max: room,
        });
    }

    let left = (room - padded) / 2;
    let right = room - padded - left;
    trace!("Centering title: {} columns, rule {}+{}", padded, left, right);

    let mut line = String::with_capacity(width * 3 + title.len());
    line.push(glyphs.top_left);
    line.extend(std::iter::repeat(glyphs.horizontal).take(left));
    line.push(' ');
    line.push_str(&title);
    line.push(' ');
    line.extend(std::iter::repeat(glyphs.horizontal).take(right));
    line.push(glyphs.top_right);
    Ok(line)
}

fn content_line(
    index: usize,
    segment: &StyledSegment,
    interior: usize,
    glyphs: &BoxCharSet,
) -> Result<String> {
    if let Some(c) = first_control_char(&segment.text) {
        return Err(Error::InvalidInput(format!(
            "content line {index} contains control character {c:?}"
        )));
    }

    let text_width = visual_width(&segment.text);
    if text_width > interior {
        return Err(Error::ContentTooWide {
            line_index: index,
            width: text_width,
            max: interior,
        });
    }

    let body = match &segment.color_name {
        Some(color) => colorize(&segment.text, color)?,
        None => close_open_style(&segment.text).into_owned(),
    };

    let padding = interior - text_width;
    trace!(
        "Content line {}: {} columns, {} padding",
        index,
        text_width,
        padding
    );

    let mut line = String::with_capacity(body.len() + padding + 12);
    line.push(glyphs.vertical);
    line.push(' ');
    line.push_str(&body);
    line.extend(std::iter::repeat(' ').take(padding));
    line.push(' ');
    line.push(glyphs.vertical);
    Ok(line)
}
