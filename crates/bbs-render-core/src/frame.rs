//! Frame request and result types, plus template definitions.

use std::collections::{BTreeSet, HashMap};

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{BorderStyle, Error, LineEnding, Result};

lazy_static! {
    /// `{{name}}` placeholder token; surrounding whitespace inside the braces is allowed.
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid");
}

/// Pre-colorization content unit; one segment per content line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct StyledSegment {
    /// Text, possibly already containing ANSI styling
    pub text: String,
    /// Optional color name applied by the colorizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_name: Option<String>,
}

impl StyledSegment {
    /// Plain, uncolored segment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color_name: None,
        }
    }

    /// Segment rendered in the named color.
    pub fn colored(text: impl Into<String>, color_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color_name: Some(color_name.into()),
        }
    }
}

impl From<&str> for StyledSegment {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for StyledSegment {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

/// Everything needed to build one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FrameOptions {
    /// Total frame width including borders
    pub width: usize,
    /// Optional title centered in the top border
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Content lines, top to bottom
    #[serde(default)]
    pub content_lines: Vec<StyledSegment>,
    /// Border glyph set
    #[serde(default)]
    pub border_style: BorderStyle,
}

impl FrameOptions {
    /// Empty single-bordered frame of the given width.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            title: None,
            content_lines: Vec::new(),
            border_style: BorderStyle::default(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the border style.
    pub fn with_border(mut self, border_style: BorderStyle) -> Self {
        self.border_style = border_style;
        self
    }

    /// Append a content line.
    pub fn line(mut self, segment: impl Into<StyledSegment>) -> Self {
        self.content_lines.push(segment.into());
        self
    }
}

/// Ordered, unjoined lines of a built frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    width: usize,
    lines: Vec<String>,
}

impl RenderedFrame {
    /// Wrap lines built for `width`.
    pub fn new(width: usize, lines: Vec<String>) -> Self {
        Self { width, lines }
    }

    /// Width every line was built to.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The lines, top to bottom.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the frame has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join with a single line ending, no trailing terminator.
    pub fn join(&self, line_ending: LineEnding) -> String {
        self.lines.join(line_ending.as_str())
    }
}

/// A frame with `{{name}}` placeholders, registered at configuration time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TemplateDefinition {
    /// Unique template id
    pub id: String,
    /// Frame whose title and content text may contain placeholders
    pub frame: FrameOptions,
    /// Names the template expects callers to supply
    #[serde(default)]
    pub variable_names: Vec<String>,
}

impl TemplateDefinition {
    /// Every placeholder name used by the frame, sorted and deduplicated.
    pub fn placeholders(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        let texts = self
            .frame
            .title
            .iter()
            .chain(self.frame.content_lines.iter().map(|s| &s.text));
        for text in texts {
            names.extend(placeholder_names(text));
        }
        names
    }

    /// Check that every placeholder is declared in `variable_names`.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Config("template id cannot be empty".to_string()));
        }
        if self.frame.width < crate::MIN_FRAME_WIDTH {
            return Err(Error::Config(format!(
                "template '{}' width {} is below the minimum of {}",
                self.id,
                self.frame.width,
                crate::MIN_FRAME_WIDTH
            )));
        }
        for name in self.placeholders() {
            if !self.variable_names.contains(&name) {
                return Err(Error::Config(format!(
                    "template '{}' uses undeclared variable '{}'",
                    self.id, name
                )));
            }
        }
        Ok(())
    }

    /// Substitute variables into a copy of the frame.
    ///
    /// Values are inserted verbatim and never rescanned for placeholders.
    pub fn instantiate(&self, variables: &HashMap<String, String>) -> Result<FrameOptions> {
        let mut frame = self.frame.clone();
        if let Some(title) = frame.title.as_mut() {
            *title = substitute(title, variables)?;
        }
        for segment in &mut frame.content_lines {
            segment.text = substitute(&segment.text, variables)?;
        }
        Ok(frame)
    }
}

/// Placeholder names appearing in `text`, in order of appearance.
pub fn placeholder_names(text: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Replace every `{{name}}` in `text`; the first unresolved name fails.
pub fn substitute(text: &str, variables: &HashMap<String, String>) -> Result<String> {
    let mut missing: Option<String> = None;
    let replaced = PLACEHOLDER.replace_all(text, |caps: &Captures| {
        let name = &caps[1];
        match variables.get(name) {
            Some(value) => value.clone(),
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(name) => Err(Error::MissingVariable(name)),
        None => Ok(replaced.into_owned()),
    }
}
