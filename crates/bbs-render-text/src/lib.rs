//! # bbs-render-text
//!
//! Text-level primitives for the bbs-render engine.
//!
//! This crate provides:
//! - An escape-sequence scanner (linear state machine, never fails)
//! - Visual width calculation and ANSI stripping
//! - Colorization, open-style detection and closing
//! - ANSI-to-HTML conversion using the VTE parser
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on bbs-render-core
//! and is used by the frame builder and the rendering service.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod colorizer;
pub mod markup;
pub mod scanner;
pub mod width;

// Re-export commonly used items
pub use colorizer::{close_open_style, colorize, colorize_with, has_open_style, strip, RESET};
pub use markup::to_html;
pub use scanner::{scan, Scanner, SequenceKind, Token, TokenKind};
pub use width::{
    char_width, demote_malformed, ends_mid_sequence, first_control_char, plain_width,
    sequence_count, strip_ansi, visual_width,
};
