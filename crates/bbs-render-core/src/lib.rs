//! # bbs-render-core
//!
//! Core types for the bbs-render frame rendering engine.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other bbs-render crates. It provides:
//!
//! - Render contexts (TERMINAL_80, TELNET_80, WEB_80) and their policy enums
//! - Frame request types (FrameOptions, StyledSegment) and RenderedFrame
//! - Template definitions and `{{name}}` substitution
//! - Color, style and border glyph types
//! - Validation results and the error type
//! - YAML configuration
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other bbs-render crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod border;
pub mod config;
pub mod context;
pub mod error;
pub mod frame;
pub mod style;
pub mod validation;

pub use border::{BorderStyle, BoxCharSet};
pub use config::{LoggingSettings, RenderConfig};
pub use context::{ColorMode, LineEnding, RenderContext};
pub use error::{Error, Result};
pub use frame::{FrameOptions, RenderedFrame, StyledSegment, TemplateDefinition};
pub use style::{Color, Style, TextAttributes};
pub use validation::{ValidationError, ValidationResult};

/// Narrowest frame: two border columns plus one padding column on each side.
pub const MIN_FRAME_WIDTH: usize = 4;
