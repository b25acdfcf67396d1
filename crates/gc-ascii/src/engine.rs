use gc_core::config::EngineConfig;
use gc_core::frame::FrameBuffer;
use gc_core::geometry::{RenderGeometry, TargetRect};
use gc_core::ramp::RampSet;
use gc_core::traits::{GlyphRasterizer, Rgb};

use crate::renderer;

/// Taille de glyphe fixe de l'écran "Disconnected...".
pub const STATUS_GLYPH_PX: f32 = 48.0;

/// Explicit two-state machine replacing the implicit font toggles of the
/// render loop: entering a state re-sizes the rasterizer's glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineMode {
    /// Converting frames into glyph grids.
    Rendering,
    /// No device; the UI layer shows a placeholder while reacquisition is
    /// retried each tick.
    Disconnected,
}

/// Moteur de conversion : possède le registre de ramps, la géométrie de
/// rendu et le mode courant. Construit au démarrage, passé par `&mut` à la
/// boucle de tick et aux handlers d'input — aucun état global.
///
/// # Example
/// ```
/// use gc_ascii::engine::AsciiEngine;
/// use gc_core::config::EngineConfig;
/// use gc_core::geometry::TargetRect;
/// use gc_core::ramp::RampSet;
///
/// let engine = AsciiEngine::new(
///     &EngineConfig::default(),
///     RampSet::load(None),
///     TargetRect::new(0.0, 0.0, 800.0, 800.0),
/// );
/// assert!(engine.ramp_count() >= 1);
/// ```
pub struct AsciiEngine {
    ramps: RampSet,
    geometry: RenderGeometry,
    mode: EngineMode,
    backdrop: Rgb,
    mode_dirty: bool,
}

impl AsciiEngine {
    /// Build the engine from a validated config, a loaded ramp registry,
    /// and the initial destination rectangle.
    #[must_use]
    pub fn new(config: &EngineConfig, ramps: RampSet, rect: TargetRect) -> Self {
        let mut geometry = RenderGeometry::new(
            rect,
            config.resolution,
            config.min_resolution,
            config.max_resolution,
            config.scale_step,
        );
        geometry.set_glyph_aspect(config.glyph_aspect);

        Self {
            ramps,
            geometry,
            mode: EngineMode::Rendering,
            backdrop: config.backdrop,
            mode_dirty: true,
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    /// Transition the state machine. The entry action (glyph re-sizing) is
    /// applied on the next [`Self::sync_rasterizer`].
    pub fn set_mode(&mut self, mode: EngineMode) {
        if self.mode != mode {
            log::info!("engine mode {:?} → {:?}", self.mode, mode);
            self.mode = mode;
            self.mode_dirty = true;
        }
    }

    /// Cycle the ramp selection. Positive = forward, negative = backward,
    /// wraparound both ways.
    pub fn cycle_ramp(&mut self, direction: i32) {
        if direction >= 0 {
            self.ramps.next();
        } else {
            self.ramps.previous();
        }
    }

    /// Finer character grid (more cells).
    pub fn resolution_up(&mut self) {
        self.geometry.resolution_up();
    }

    /// Coarser character grid (fewer cells).
    pub fn resolution_down(&mut self) {
        self.geometry.resolution_down();
    }

    /// Update the destination rectangle (surface resize).
    pub fn set_rect(&mut self, rect: TargetRect) {
        self.geometry.set_rect(rect);
    }

    /// Update the source aspect ratio (camera switch).
    pub fn set_source_aspect(&mut self, aspect: f32) {
        self.geometry.set_source_aspect(aspect);
    }

    /// Render geometry, read-only (grid dimensions for the downsampler,
    /// status display).
    #[must_use]
    pub fn geometry(&self) -> &RenderGeometry {
        &self.geometry
    }

    /// Nombre de ramps chargées.
    #[must_use]
    pub fn ramp_count(&self) -> usize {
        self.ramps.count()
    }

    /// Index de la ramp sélectionnée.
    #[must_use]
    pub fn ramp_index(&self) -> usize {
        self.ramps.selected_index()
    }

    /// Push pending glyph-size changes to the rasterizer. Called before
    /// every render so a resolution or mode change always reaches the
    /// rasterizer before the next draw sequence.
    pub fn sync_rasterizer<R: GlyphRasterizer>(&mut self, raster: &mut R) {
        let geometry_dirty = self.geometry.take_dirty();
        if !(self.mode_dirty || geometry_dirty) {
            return;
        }
        match self.mode {
            EngineMode::Rendering => raster.set_glyph_size(self.geometry.cell_size()),
            EngineMode::Disconnected => raster.set_glyph_size(STATUS_GLYPH_PX),
        }
        self.mode_dirty = false;
    }

    /// One render pass: sync glyph size, then clear + per-cell draw calls
    /// against the currently selected ramp.
    pub fn render_frame<R: GlyphRasterizer>(&mut self, raster: &mut R, frame: &FrameBuffer) {
        self.sync_rasterizer(raster);
        renderer::render(
            raster,
            &self.geometry.rect(),
            frame,
            self.ramps.current(),
            self.backdrop,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{RasterOp, RecordingRasterizer};
    use gc_core::frame::{ChannelOrder, FrameBuffer};

    fn engine_800() -> AsciiEngine {
        let config = EngineConfig {
            glyph_aspect: 1.0,
            ..EngineConfig::default()
        };
        AsciiEngine::new(
            &config,
            RampSet::load(None),
            TargetRect::new(0.0, 0.0, 800.0, 800.0),
        )
    }

    fn gray_frame(w: u32, h: u32) -> FrameBuffer {
        let mut frame = FrameBuffer::new(w, h, ChannelOrder::Rgb);
        frame.data.fill(128);
        frame
    }

    #[test]
    fn glyph_size_pushed_before_first_render() {
        let mut engine = engine_800();
        let mut raster = RecordingRasterizer::default();
        engine.render_frame(&mut raster, &gray_frame(2, 2));

        assert_eq!(raster.ops[0], RasterOp::GlyphSize(8.0));
        assert_eq!(raster.ops[1], RasterOp::Clear(renderer::BACKDROP));
    }

    #[test]
    fn resolution_change_resizes_glyphs_before_next_render() {
        let mut engine = engine_800();
        let mut raster = RecordingRasterizer::default();
        engine.render_frame(&mut raster, &gray_frame(2, 2));

        // 100 → 110 columns at 800 px: cell shrinks 8.0 → ≈7.27.
        engine.resolution_up();
        let mut raster = RecordingRasterizer::default();
        engine.render_frame(&mut raster, &gray_frame(2, 2));

        let RasterOp::GlyphSize(px) = raster.ops[0] else {
            panic!("expected set_glyph_size before render, got {:?}", raster.ops[0]);
        };
        assert!((px - 800.0 / 110.0).abs() < 1e-4);
        assert!((px - 7.27).abs() < 0.01);
    }

    #[test]
    fn steady_state_does_not_repeat_glyph_size() {
        let mut engine = engine_800();
        let mut raster = RecordingRasterizer::default();
        engine.render_frame(&mut raster, &gray_frame(2, 2));

        let mut raster = RecordingRasterizer::default();
        engine.render_frame(&mut raster, &gray_frame(2, 2));
        assert_eq!(raster.ops[0], RasterOp::Clear(renderer::BACKDROP));
    }

    #[test]
    fn disconnected_entry_sets_status_glyph_size() {
        let mut engine = engine_800();
        let mut raster = RecordingRasterizer::default();
        engine.render_frame(&mut raster, &gray_frame(2, 2));

        engine.set_mode(EngineMode::Disconnected);
        let mut raster = RecordingRasterizer::default();
        engine.sync_rasterizer(&mut raster);
        assert_eq!(raster.ops, vec![RasterOp::GlyphSize(STATUS_GLYPH_PX)]);

        // Re-entering Rendering restores the cell size.
        engine.set_mode(EngineMode::Rendering);
        let mut raster = RecordingRasterizer::default();
        engine.sync_rasterizer(&mut raster);
        assert_eq!(raster.ops, vec![RasterOp::GlyphSize(8.0)]);
    }

    #[test]
    fn ramp_cycling_wraps_both_ways() {
        let mut engine = engine_800();
        let start = engine.ramp_index();
        for _ in 0..engine.ramp_count() {
            engine.cycle_ramp(1);
        }
        assert_eq!(engine.ramp_index(), start);
        engine.cycle_ramp(-1);
        assert_eq!(engine.ramp_index(), engine.ramp_count() - 1);
    }
}
