//! ASCII conversion engine for glyphcam.
//!
//! Walks a downsampled RGB frame cell by cell, quantizes each cell's
//! brightness into a glyph index, and emits one colored draw call per cell
//! through the [`gc_core::traits::GlyphRasterizer`] collaborator.

pub mod engine;
pub mod renderer;

pub use engine::{AsciiEngine, EngineMode};
