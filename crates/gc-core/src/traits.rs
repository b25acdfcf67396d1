use std::sync::Arc;

use crate::frame::FrameBuffer;

/// Couleur RGB 8-bit. Tuple nu, comme partout dans le workspace.
pub type Rgb = (u8, u8, u8);

/// Outcome of polling a video source for one tick.
///
/// `Pending` is not an error: the camera produces frames at its own rate,
/// decoupled from the tick rate, and the previous rendered output simply
/// stays on screen.
pub enum Capture {
    /// A fresh frame. Dropping the `Arc` releases the pool slot.
    Frame(Arc<FrameBuffer>),
    /// No new frame this tick; reuse the last output.
    Pending,
    /// Device gone; the engine should switch to its disconnected state
    /// and retry reacquisition.
    Disconnected,
}

/// Fournit des frames RGB24 au moteur de conversion.
///
/// Implémenté par : `WebcamSource`, `ImageSource`.
///
/// # Example
/// ```
/// use gc_core::traits::{Capture, VideoSource};
///
/// struct DummySource;
/// impl VideoSource for DummySource {
///     fn poll_frame(&mut self) -> Capture { Capture::Pending }
///     fn native_size(&self) -> (u32, u32) { (0, 0) }
///     fn is_live(&self) -> bool { false }
/// }
/// ```
pub trait VideoSource {
    /// Poll for the next frame. Never blocks.
    fn poll_frame(&mut self) -> Capture;

    /// Dimensions natives de la source (avant downsampling).
    fn native_size(&self) -> (u32, u32);

    /// Indique si la source est vivante (webcam) ou statique (image).
    fn is_live(&self) -> bool;

    /// Human-readable label for the status line.
    fn label(&self) -> String {
        String::from("source")
    }
}

/// Dessine des glyphes individuels dans une surface cible.
///
/// C'est la seule voie de sortie du moteur : une passe de rendu est un
/// `clear` suivi d'une séquence déterministe de `draw_glyph`.
///
/// # Example
/// ```
/// use gc_core::traits::{GlyphRasterizer, Rgb};
///
/// struct NullRaster;
/// impl GlyphRasterizer for NullRaster {
///     fn set_glyph_size(&mut self, _px: f32) {}
///     fn clear(&mut self, _color: Rgb) {}
///     fn draw_glyph(&mut self, _ch: char, _x: f32, _y: f32, _color: Rgb) {}
/// }
/// ```
pub trait GlyphRasterizer {
    /// Update the glyph size so glyphs exactly tile the target rectangle.
    fn set_glyph_size(&mut self, px: f32);

    /// Fill the target surface with `color`.
    fn clear(&mut self, color: Rgb);

    /// Draw one glyph with its top-left corner at surface pixel (x, y).
    fn draw_glyph(&mut self, ch: char, x: f32, y: f32, color: Rgb);
}
