//! Types, traits, and configuration shared across the glyphcam workspace.
//!
//! Everything here is toolkit-free: the conversion engine talks to the
//! outside world (camera, glyph rasterizer) through the traits in
//! [`traits`], so the core stays unit-testable without a live terminal
//! or capture device.

pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod luminance;
pub mod ramp;
pub mod traits;

pub use config::EngineConfig;
pub use error::CoreError;
pub use frame::{ChannelOrder, FrameBuffer};
pub use geometry::{RenderGeometry, TargetRect};
pub use ramp::{Ramp, RampSet};
pub use traits::{Capture, GlyphRasterizer, Rgb, VideoSource};
