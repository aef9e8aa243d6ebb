//! Top-level rendering orchestration.
//!
//! The service picks the output policy from a [`RenderContext`], runs the
//! frame builder, converts styling for the target, checks the result and
//! joins it with the context's line ending.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use bbs_render_core::{ColorMode, Error, FrameOptions, RenderContext, RenderedFrame, Result};
use bbs_render_frame::{validate_alignment, FrameBuilder};
use bbs_render_text::{
    close_open_style, demote_malformed, first_control_char, strip, to_html, visual_width,
};

use crate::template::TemplateRegistry;

/// Renders frames, free text and templates for a target context.
///
/// Holds no per-call state; clones share the template registry.
#[derive(Debug, Clone, Default)]
pub struct RenderingService {
    templates: Arc<TemplateRegistry>,
}

impl RenderingService {
    /// Create a service backed by `templates`.
    pub fn new(templates: Arc<TemplateRegistry>) -> Self {
        Self { templates }
    }

    /// The injected template registry.
    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Build and serialize a frame.
    ///
    /// Lines are converted for the context's color mode, checked against the
    /// frame width when the context asks for validation, checked against the
    /// context width, and joined with the context line ending (no trailing
    /// terminator).
    ///
    /// # Errors
    ///
    /// Frame builder errors, plus [`Error::RenderValidation`] and
    /// [`Error::WidthExceeded`].
    #[instrument(skip_all)]
    pub fn render_frame(&self, options: &FrameOptions, context: &RenderContext) -> Result<String> {
        debug!(
            "Rendering frame: width={}, content_lines={}, context={:?}",
            options.width,
            options.content_lines.len(),
            context
        );

        let frame = FrameBuilder::build_options(options)?;
        let output = serialize(&frame, context, context.validate)?;

        debug!("Rendered frame: {} lines, {} bytes", frame.len(), output.len());
        Ok(output)
    }

    /// Serialize free-form text for a context.
    ///
    /// The text is split on LF or CRLF. Malformed sequences in each line are
    /// demoted to plain text, then the line is checked against the context
    /// width, converted for the color mode (styling left open is closed under
    /// `ansi`) and rejoined with the context line ending.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if a line contains a control character other
    ///   than ESC, such as TAB or a lone CR
    /// - [`Error::WidthExceeded`] for the first line wider than the context
    #[instrument(skip_all)]
    pub fn render_text(&self, text: &str, context: &RenderContext) -> Result<String> {
        debug!("Rendering text: {} bytes, context={:?}", text.len(), context);

        let mut lines = Vec::new();
        for (index, line) in text.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if let Some(c) = first_control_char(line) {
                return Err(Error::InvalidInput(format!(
                    "text line {index} contains control character {c:?}"
                )));
            }
            let line = demote_malformed(line);
            check_width(index, &line, context)?;
            lines.push(match context.color_mode {
                ColorMode::Ansi => close_open_style(&line).into_owned(),
                ColorMode::Html => to_html(&line),
                ColorMode::None => strip(&line),
            });
        }

        debug!("Rendered text: {} lines", lines.len());
        Ok(lines.join(context.line_ending.as_str()))
    }

    /// Render a registered template with `variables` substituted.
    ///
    /// Alignment is always validated here, whatever the context says.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownTemplate`], [`Error::MissingVariable`], and everything
    /// [`RenderingService::render_frame`] can return.
    #[instrument(skip_all)]
    pub fn render_template(
        &self,
        template_id: &str,
        variables: &HashMap<String, String>,
        context: &RenderContext,
    ) -> Result<String> {
        debug!(
            "Rendering template '{}' with {} variable(s)",
            template_id,
            variables.len()
        );

        let template = self.templates.get(template_id)?;
        let options = template.instantiate(variables)?;
        let frame = FrameBuilder::build_options(&options)?;
        serialize(&frame, context, true)
    }
}

/// Convert, check and join a built frame for `context`.
fn serialize(frame: &RenderedFrame, context: &RenderContext, validate: bool) -> Result<String> {
    // Measurements use what the reader will see: the stripped line under
    // `none`, the line before markup under `html`.
    let visible: Vec<Cow<'_, str>> = frame
        .lines()
        .iter()
        .map(|line| match context.color_mode {
            ColorMode::None => Cow::Owned(strip(line)),
            ColorMode::Ansi | ColorMode::Html => Cow::Borrowed(line.as_str()),
        })
        .collect();

    if validate {
        let result = validate_alignment(&visible, frame.width());
        if !result.valid {
            warn!(
                "Rendered frame failed alignment validation: {}",
                result.summary()
            );
            return Err(Error::RenderValidation(result));
        }
    }

    for (index, line) in visible.iter().enumerate() {
        check_width(index, line, context)?;
    }

    let lines: Vec<String> = match context.color_mode {
        ColorMode::Html => visible.iter().map(|line| to_html(line)).collect(),
        ColorMode::Ansi | ColorMode::None => visible.into_iter().map(Cow::into_owned).collect(),
    };
    Ok(lines.join(context.line_ending.as_str()))
}

fn check_width(index: usize, line: &str, context: &RenderContext) -> Result<()> {
    let width = visual_width(line);
    if width > context.width {
        warn!(
            "Line {} is {} columns, context allows {}",
            index, width, context.width
        );
        return Err(Error::WidthExceeded {
            line_index: index,
            width,
            max: context.width,
        });
    }
    Ok(())
}
