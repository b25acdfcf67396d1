use gc_core::frame::FrameBuffer;
use gc_core::geometry::TargetRect;
use gc_core::luminance::quantize;
use gc_core::ramp::Ramp;
use gc_core::traits::{GlyphRasterizer, Rgb};

/// Fond neutre sombre du clear. Les glyphes ne couvrent jamais toute leur
/// cellule; ce fond fixe rend le backdrop déterministe.
pub const BACKDROP: Rgb = (0x18, 0x18, 0x18);

/// Render one frame as a glyph grid.
///
/// Clears the surface, then walks the frame row-major (top-to-bottom,
/// left-to-right). Each cell reads exactly one source pixel — no area
/// averaging, smoothing is the downsampler's job — quantizes it against
/// `ramp`, and issues one draw call at the cell's top-left pixel position
/// with the pixel's *original* color.
///
/// Cell size is `rect.height / frame.height`; cells are square, so the
/// caller pre-scales the frame to the target aspect ratio.
///
/// For a fixed frame and ramp the sequence and content of draw calls is
/// fully deterministic.
///
/// # Panics
/// An empty ramp or a zero-sized frame is a broken collaborator contract
/// (both are controlled by the caller each frame) and asserts rather than
/// being reported as a recoverable error.
pub fn render<R: GlyphRasterizer>(
    raster: &mut R,
    rect: &TargetRect,
    frame: &FrameBuffer,
    ramp: &Ramp,
    backdrop: Rgb,
) {
    assert!(!ramp.is_empty(), "render with an empty ramp");
    assert!(
        frame.width > 0 && frame.height > 0,
        "render with a zero-sized frame"
    );

    raster.clear(backdrop);

    let cell = rect.height / frame.height as f32;
    for y in 0..frame.height {
        let y_pos = rect.y + y as f32 * cell;
        for x in 0..frame.width {
            let x_pos = rect.x + x as f32 * cell;

            let (r, g, b) = frame.pixel(x, y);
            let index = quantize(r, g, b, ramp.len());

            raster.draw_glyph(ramp.glyph(index), x_pos, y_pos, (r, g, b));
        }
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use gc_core::traits::{GlyphRasterizer, Rgb};

    /// Test double capturing the exact call sequence the engine emits.
    #[derive(Clone, Debug, PartialEq)]
    pub enum RasterOp {
        GlyphSize(f32),
        Clear(Rgb),
        Glyph(char, f32, f32, Rgb),
    }

    #[derive(Default)]
    pub struct RecordingRasterizer {
        pub ops: Vec<RasterOp>,
    }

    impl GlyphRasterizer for RecordingRasterizer {
        fn set_glyph_size(&mut self, px: f32) {
            self.ops.push(RasterOp::GlyphSize(px));
        }

        fn clear(&mut self, color: Rgb) {
            self.ops.push(RasterOp::Clear(color));
        }

        fn draw_glyph(&mut self, ch: char, x: f32, y: f32, color: Rgb) {
            self.ops.push(RasterOp::Glyph(ch, x, y, color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::{RasterOp, RecordingRasterizer};
    use super::*;
    use gc_core::frame::ChannelOrder;

    fn checker_2x2() -> FrameBuffer {
        // {black, white, black, white}
        let mut frame = FrameBuffer::new(2, 2, ChannelOrder::Rgb);
        frame.data.copy_from_slice(&[
            0, 0, 0, 255, 255, 255, //
            0, 0, 0, 255, 255, 255,
        ]);
        frame
    }

    #[test]
    fn end_to_end_2x2_checker() {
        let frame = checker_2x2();
        let ramp = Ramp::parse(" #").unwrap();
        let rect = TargetRect::new(0.0, 0.0, 8.0, 8.0);
        let mut raster = RecordingRasterizer::default();

        render(&mut raster, &rect, &frame, &ramp, BACKDROP);

        let cell = 4.0;
        assert_eq!(
            raster.ops,
            vec![
                RasterOp::Clear(BACKDROP),
                RasterOp::Glyph(' ', 0.0, 0.0, (0, 0, 0)),
                RasterOp::Glyph('#', cell, 0.0, (255, 255, 255)),
                RasterOp::Glyph(' ', 0.0, cell, (0, 0, 0)),
                RasterOp::Glyph('#', cell, cell, (255, 255, 255)),
            ]
        );
    }

    #[test]
    fn render_is_deterministic() {
        let frame = checker_2x2();
        let ramp = Ramp::parse(" .:#").unwrap();
        let rect = TargetRect::new(0.0, 0.0, 100.0, 100.0);

        let mut first = RecordingRasterizer::default();
        render(&mut first, &rect, &frame, &ramp, BACKDROP);
        let mut second = RecordingRasterizer::default();
        render(&mut second, &rect, &frame, &ramp, BACKDROP);

        assert_eq!(first.ops, second.ops);
    }

    #[test]
    fn draw_color_is_original_not_quantized() {
        let mut frame = FrameBuffer::new(1, 1, ChannelOrder::Rgb);
        frame.data.copy_from_slice(&[200, 30, 90]);
        let ramp = Ramp::parse(" #").unwrap();
        let rect = TargetRect::new(0.0, 0.0, 10.0, 10.0);
        let mut raster = RecordingRasterizer::default();

        render(&mut raster, &rect, &frame, &ramp, BACKDROP);

        match raster.ops[1] {
            RasterOp::Glyph(_, _, _, color) => assert_eq!(color, (200, 30, 90)),
            ref op => panic!("expected glyph draw, got {op:?}"),
        }
    }

    #[test]
    fn rect_origin_offsets_every_cell() {
        let frame = checker_2x2();
        let ramp = Ramp::parse(" #").unwrap();
        let rect = TargetRect::new(10.0, 20.0, 8.0, 8.0);
        let mut raster = RecordingRasterizer::default();

        render(&mut raster, &rect, &frame, &ramp, BACKDROP);

        assert_eq!(
            raster.ops[1],
            RasterOp::Glyph(' ', 10.0, 20.0, (0, 0, 0))
        );
        assert_eq!(
            raster.ops[4],
            RasterOp::Glyph('#', 14.0, 24.0, (255, 255, 255))
        );
    }

    #[test]
    fn bgr_source_draws_logical_not_physical_color() {
        // Same three bytes under both declared orders: each render sees a
        // different logical color, and the draw call carries that logical
        // reading, never the raw byte order.
        let mut frame = checker_2x2();
        frame.data[0..3].copy_from_slice(&[0x10, 0x80, 0xF0]);
        let ramp = Ramp::parse(" .:#").unwrap();
        let rect = TargetRect::new(0.0, 0.0, 8.0, 8.0);

        let mut rgb_raster = RecordingRasterizer::default();
        render(&mut rgb_raster, &rect, &frame, &ramp, BACKDROP);

        frame.order = ChannelOrder::Bgr;
        let mut bgr_raster = RecordingRasterizer::default();
        render(&mut bgr_raster, &rect, &frame, &ramp, BACKDROP);

        let (RasterOp::Glyph(_, _, _, rgb_col), RasterOp::Glyph(_, _, _, bgr_col)) =
            (&rgb_raster.ops[1], &bgr_raster.ops[1])
        else {
            panic!("expected glyph draws");
        };
        assert_eq!(*rgb_col, (0x10, 0x80, 0xF0));
        assert_eq!(*bgr_col, (0xF0, 0x80, 0x10));
    }

    #[test]
    #[should_panic(expected = "zero-sized frame")]
    fn zero_sized_frame_asserts() {
        let frame = FrameBuffer::new(0, 0, ChannelOrder::Rgb);
        let ramp = Ramp::default();
        let rect = TargetRect::new(0.0, 0.0, 8.0, 8.0);
        let mut raster = RecordingRasterizer::default();
        render(&mut raster, &rect, &frame, &ramp, BACKDROP);
    }
}
