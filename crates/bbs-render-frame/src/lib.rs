//! # bbs-render-frame
//!
//! Frame construction and inspection for the bbs-render engine.
//!
//! This crate provides:
//! - [`FrameBuilder`]: bordered, width-uniform frames with optional titles
//! - [`validate_alignment`] and [`validate_borders`]: read-only checks over
//!   rendered lines
//! - [`analyze_frame`]: per-line width report for diagnosing stored art
//!
//! ## Architecture
//!
//! This is Layer 2 in the architecture - it depends on bbs-render-core and
//! bbs-render-text, and is orchestrated by the rendering service.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod frame_builder;
pub mod validator;

pub use analysis::{analyze_frame, FrameReport, LineStats};
pub use frame_builder::FrameBuilder;
pub use validator::{validate_alignment, validate_borders};
