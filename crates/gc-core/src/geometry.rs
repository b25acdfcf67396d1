/// Rectangle de destination, en pixels de la surface cible.
///
/// # Example
/// ```
/// use gc_core::geometry::TargetRect;
/// let rect = TargetRect::new(0.0, 0.0, 800.0, 800.0);
/// assert_eq!(rect.height, 800.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TargetRect {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Géométrie de rendu : rect de destination + résolution de la grille de
/// caractères.
///
/// La résolution horizontale est bornée ([min, max] colonnes) et pilotée
/// par pas multiplicatifs; la verticale dérive de l'aspect ratio source
/// corrigé par l'aspect des glyphes du terminal.
///
/// Every mutation (rect, resolution, aspect) marks the geometry dirty so
/// the engine pushes a matching `set_glyph_size` to the rasterizer before
/// the next render. That recomputation is a required side effect of any
/// resolution change, not only of initialization.
///
/// # Example
/// ```
/// use gc_core::geometry::{RenderGeometry, TargetRect};
/// let mut geo = RenderGeometry::new(TargetRect::new(0.0, 0.0, 800.0, 800.0), 100, 16, 240, 1.1);
/// assert_eq!(geo.rows(), 100);
/// assert!((geo.cell_size() - 8.0).abs() < f32::EPSILON);
/// ```
pub struct RenderGeometry {
    rect: TargetRect,
    cols: u32,
    rows: u32,
    /// Source aspect ratio, height / width.
    aspect: f32,
    /// Glyph cell aspect (height / width). 1.0 = square pixels; terminal
    /// fonts are typically ~2.0.
    glyph_aspect: f32,
    min_cols: u32,
    max_cols: u32,
    scale_step: f32,
    dirty: bool,
}

impl RenderGeometry {
    /// Create a geometry with square source/glyph aspect. `cols` is clamped
    /// into `[min_cols, max_cols]`.
    #[must_use]
    pub fn new(rect: TargetRect, cols: u32, min_cols: u32, max_cols: u32, scale_step: f32) -> Self {
        let mut geo = Self {
            rect,
            cols: cols.clamp(min_cols, max_cols),
            rows: 1,
            aspect: 1.0,
            glyph_aspect: 1.0,
            min_cols,
            max_cols,
            scale_step,
            dirty: true,
        };
        geo.recompute();
        geo
    }

    fn recompute(&mut self) {
        let rows = (self.cols as f32 * self.aspect / self.glyph_aspect).round();
        self.rows = (rows as u32).max(1);
        self.dirty = true;
    }

    /// Update the destination rectangle (window/terminal resize).
    pub fn set_rect(&mut self, rect: TargetRect) {
        if rect != self.rect {
            self.rect = rect;
            self.dirty = true;
        }
    }

    /// Update the source aspect ratio (camera switch).
    pub fn set_source_aspect(&mut self, aspect: f32) {
        self.aspect = aspect.max(f32::EPSILON);
        self.recompute();
    }

    /// Update the glyph cell aspect correction.
    pub fn set_glyph_aspect(&mut self, glyph_aspect: f32) {
        self.glyph_aspect = glyph_aspect.max(f32::EPSILON);
        self.recompute();
    }

    /// Finer grid: multiply columns by the scale step, clamped to bounds.
    pub fn resolution_up(&mut self) {
        self.cols = ((self.cols as f32 * self.scale_step).round() as u32)
            .clamp(self.min_cols, self.max_cols);
        self.recompute();
    }

    /// Coarser grid: divide columns by the scale step, clamped to bounds.
    pub fn resolution_down(&mut self) {
        self.cols = ((self.cols as f32 / self.scale_step).round() as u32)
            .clamp(self.min_cols, self.max_cols);
        self.recompute();
    }

    /// Destination rectangle.
    #[must_use]
    pub fn rect(&self) -> TargetRect {
        self.rect
    }

    /// Character grid width.
    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Character grid height.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Cell pixel size: `rect.height / rows`. Cells are square; aspect
    /// mismatch is resolved upstream by pre-scaling the frame.
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.rect.height / self.rows as f32
    }

    /// Consume the dirty flag. True when the glyph size must be re-pushed
    /// to the rasterizer before the next render.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo_800() -> RenderGeometry {
        RenderGeometry::new(TargetRect::new(0.0, 0.0, 800.0, 800.0), 100, 16, 240, 1.1)
    }

    #[test]
    fn cell_size_follows_resolution() {
        let mut geo = geo_800();
        assert!((geo.cell_size() - 8.0).abs() < 1e-6);

        geo.resolution_up(); // 100 → 110
        assert_eq!(geo.rows(), 110);
        assert!((geo.cell_size() - 800.0 / 110.0).abs() < 1e-6);
        assert!((geo.cell_size() - 7.27).abs() < 0.01);
    }

    #[test]
    fn resolution_clamped_to_bounds() {
        let mut geo = geo_800();
        for _ in 0..64 {
            geo.resolution_up();
        }
        assert_eq!(geo.cols(), 240);
        for _ in 0..64 {
            geo.resolution_down();
        }
        assert_eq!(geo.cols(), 16);
    }

    #[test]
    fn mutations_mark_dirty_once() {
        let mut geo = geo_800();
        assert!(geo.take_dirty()); // construction
        assert!(!geo.take_dirty());

        geo.resolution_down();
        assert!(geo.take_dirty());

        geo.set_rect(TargetRect::new(0.0, 0.0, 400.0, 400.0));
        assert!(geo.take_dirty());

        // Unchanged rect is not a mutation.
        geo.set_rect(TargetRect::new(0.0, 0.0, 400.0, 400.0));
        assert!(!geo.take_dirty());
    }

    #[test]
    fn rows_follow_source_and_glyph_aspect() {
        let mut geo = geo_800();
        geo.set_source_aspect(0.75); // 4:3 camera
        assert_eq!(geo.rows(), 75);
        geo.set_glyph_aspect(2.0); // tall terminal glyphs
        assert_eq!(geo.rows(), 38);
    }
}
