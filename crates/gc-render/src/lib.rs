//! Terminal backend for glyphcam: the glyph rasterizer over a ratatui
//! buffer, the FPS counter, and the status overlay.

pub mod fps;
pub mod term;
pub mod ui;

pub use term::TermSurface;
