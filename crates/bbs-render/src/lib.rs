//! # bbs-render
//!
//! ANSI-aware frame rendering for BBS output targets: raw terminals,
//! line-mode (telnet) terminals and web pages.
//!
//! ## Overview
//!
//! [`RenderingService`] is the entry point. Callers hand it content plus a
//! [`RenderContext`] and get back a finished string, or a structured
//! [`Error`] describing why the content could not be rendered:
//!
//! - `render_frame`: bordered frame from a [`FrameOptions`] request
//! - `render_text`: free text, serialized for the target
//! - `render_template`: a registered template with `{{name}}` variables
//!
//! ## Architecture
//!
//! This is Layer 3 - it ties together:
//! - bbs-render-core: Core types, errors and configuration
//! - bbs-render-text: Escape-sequence scanning, width and colorization
//! - bbs-render-frame: Frame building, validation and analysis

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod schema;
pub mod service;
pub mod template;

// Re-export commonly used types
pub use bbs_render_core::{
    BorderStyle, ColorMode, Error, FrameOptions, LineEnding, RenderConfig, RenderContext,
    RenderedFrame, Result, StyledSegment, TemplateDefinition, ValidationResult,
};
pub use bbs_render_frame::{analyze_frame, validate_alignment, validate_borders, FrameReport};
pub use bbs_render_text::{colorize, strip_ansi, to_html, visual_width};
pub use schema::frame_options_schema;
pub use service::RenderingService;
pub use template::TemplateRegistry;
