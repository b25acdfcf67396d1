use gc_core::traits::{GlyphRasterizer, Rgb};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

/// Surface de rendu terminal : implémente [`GlyphRasterizer`] par écriture
/// directe dans un `ratatui::Buffer` — pas de widget, zéro overhead.
///
/// Positions are surface pixels; the current glyph size is the divisor
/// that locates the terminal cell, so a draw at `(col·size, row·size)`
/// lands exactly on cell `(col, row)`. Glyph size lives outside the
/// surface (`&mut f32` owned by the caller) because the surface itself is
/// rebuilt around the frame buffer on every draw.
pub struct TermSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    glyph_px: &'a mut f32,
}

impl<'a> TermSurface<'a> {
    /// Wrap a ratatui buffer region for one draw pass.
    pub fn new(buf: &'a mut Buffer, area: Rect, glyph_px: &'a mut f32) -> Self {
        Self {
            buf,
            area,
            glyph_px,
        }
    }
}

impl GlyphRasterizer for TermSurface<'_> {
    fn set_glyph_size(&mut self, px: f32) {
        // Sub-unit sizes are fine (grid finer than the terminal, edges
        // clipped below); zero would break the cell divisor.
        *self.glyph_px = px.max(f32::EPSILON);
    }

    fn clear(&mut self, color: Rgb) {
        let bg = Color::Rgb(color.0, color.1, color.2);
        for cy in self.area.top()..self.area.bottom() {
            for cx in self.area.left()..self.area.right() {
                if let Some(cell) = self.buf.cell_mut((cx, cy)) {
                    cell.set_char(' ');
                    cell.set_bg(bg);
                }
            }
        }
    }

    fn draw_glyph(&mut self, ch: char, x: f32, y: f32, color: Rgb) {
        let col = (x / *self.glyph_px).round() as i64;
        let row = (y / *self.glyph_px).round() as i64;
        if col < 0 || row < 0 {
            return;
        }
        let (col, row) = (col as u16, row as u16);
        // Clip to the surface area; grids finer than the terminal lose
        // their right/bottom edge rather than wrapping.
        if col >= self.area.width || row >= self.area.height {
            return;
        }
        let buf_x = self.area.x + col;
        let buf_y = self.area.y + row;
        if let Some(cell) = self.buf.cell_mut((buf_x, buf_y)) {
            cell.set_char(ch);
            cell.set_fg(Color::Rgb(color.0, color.1, color.2));
        }
    }
}
