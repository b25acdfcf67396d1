use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer as FirResizer};
use gc_core::frame::FrameBuffer;

/// Resizer réutilisable wrappant fast_image_resize, en RGB24 (U8x3).
///
/// C'est l'étape de downsampling côté collaborateur : le moteur de rendu
/// échantillonne un pixel par cellule et ne scale jamais lui-même. Tout le
/// lissage se passe ici.
///
/// # Example
/// ```
/// use gc_source::resize::Resizer;
/// let r = Resizer::new();
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch copy of the source (the fir API wants `&mut` on it).
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a new resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new(),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`; `dst`'s dimensions pick the output size.
    /// The channel order tags along untouched — per-channel filtering
    /// never mixes R and B.
    ///
    /// # Errors
    /// Returns an error if the resize operation fails.
    ///
    /// # Example
    /// ```
    /// use gc_core::frame::{ChannelOrder, FrameBuffer};
    /// use gc_source::resize::Resizer;
    /// let mut r = Resizer::new();
    /// let src = FrameBuffer::new(100, 100, ChannelOrder::Rgb);
    /// let mut dst = FrameBuffer::new(50, 50, ChannelOrder::Rgb);
    /// r.resize_into(&src, &mut dst).unwrap();
    /// ```
    pub fn resize_into(&mut self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<()> {
        dst.order = src.order;

        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x3)
                .context("Invalid source dimensions")?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x3)
                .context("Invalid destination dimensions")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Resize failed")?;

        Ok(())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}
