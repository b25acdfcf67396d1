/// Physical byte order of a 3-byte pixel packing.
///
/// Webcam buffers pack 3 bytes per pixel with no alignment byte, so the
/// in-memory channel order depends on the source's endianness: a big-endian
/// packing stores `[R, G, B]`, a little-endian one stores `[B, G, R]`.
/// Readers must honor the declared order instead of assuming one.
///
/// # Example
/// ```
/// use gc_core::frame::{ChannelOrder, FrameBuffer};
/// let mut fb = FrameBuffer::new(1, 1, ChannelOrder::Bgr);
/// fb.data.copy_from_slice(&[0x10, 0x80, 0xF0]);
/// assert_eq!(fb.pixel(0, 0), (0xF0, 0x80, 0x10));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Bytes are `[R, G, B]` (big-endian packing).
    Rgb,
    /// Bytes are `[B, G, R]` (little-endian packing).
    Bgr,
}

/// Buffer de pixels RGB24 réutilisable. Pré-alloué, jamais redimensionné
/// en hot path.
///
/// Stocke les pixels row-major, 3 bytes par pixel, sans padding de ligne.
///
/// # Example
/// ```
/// use gc_core::frame::{ChannelOrder, FrameBuffer};
/// let fb = FrameBuffer::new(10, 10, ChannelOrder::Rgb);
/// assert_eq!(fb.data.len(), 300);
/// ```
pub struct FrameBuffer {
    /// Raw pixel bytes, row-major, 3 bytes per pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Physical channel order of the 3-byte packing.
    pub order: ChannelOrder,
}

impl FrameBuffer {
    /// Crée un buffer pré-alloué (noir) aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use gc_core::frame::{ChannelOrder, FrameBuffer};
    /// let fb = FrameBuffer::new(100, 50, ChannelOrder::Rgb);
    /// assert_eq!(fb.data.len(), 100 * 50 * 3);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32, order: ChannelOrder) -> Self {
        Self {
            data: vec![0u8; (width * height * 3) as usize],
            width,
            height,
            order,
        }
    }

    /// Accès au pixel (x, y) → (r, g, b) logique, quel que soit l'ordre
    /// physique des bytes.
    ///
    /// # Example
    /// ```
    /// use gc_core::frame::{ChannelOrder, FrameBuffer};
    /// let mut fb = FrameBuffer::new(1, 1, ChannelOrder::Rgb);
    /// fb.data.copy_from_slice(&[0x10, 0x80, 0xF0]);
    /// assert_eq!(fb.pixel(0, 0), (0x10, 0x80, 0xF0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = ((y * self.width + x) * 3) as usize;
        if idx + 2 >= self.data.len() {
            return (0, 0, 0);
        }
        match self.order {
            ChannelOrder::Rgb => (self.data[idx], self.data[idx + 1], self.data[idx + 2]),
            ChannelOrder::Bgr => (self.data[idx + 2], self.data[idx + 1], self.data[idx]),
        }
    }

    /// Luminance perceptuelle BT.709 du pixel (x, y).
    ///
    /// # Example
    /// ```
    /// use gc_core::frame::{ChannelOrder, FrameBuffer};
    /// let mut fb = FrameBuffer::new(1, 1, ChannelOrder::Rgb);
    /// fb.data.copy_from_slice(&[255, 255, 255]);
    /// assert_eq!(fb.luminance(0, 0), 255);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        let (r, g, b) = self.pixel(x, y);
        crate::luminance::luminance(r, g, b)
    }

    /// Source aspect ratio height/width. Zero-width buffers yield 1.0.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 {
            1.0
        } else {
            self.height as f32 / self.width as f32
        }
    }
}
