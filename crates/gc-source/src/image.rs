use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use gc_core::frame::{ChannelOrder, FrameBuffer};
use gc_core::traits::{Capture, VideoSource};

/// Source d'image statique. Sert la même frame à chaque poll — pratique
/// pour tester le moteur sans caméra.
///
/// # Example
/// ```no_run
/// use gc_source::image::ImageSource;
/// use std::path::Path;
/// let source = ImageSource::new(Path::new("portrait.png")).unwrap();
/// ```
pub struct ImageSource {
    frame: Arc<FrameBuffer>,
    label: String,
}

impl ImageSource {
    /// Load an image from disk and convert it to RGB24.
    ///
    /// # Errors
    /// Returns an error if the image cannot be loaded or decoded.
    pub fn new(path: &Path) -> Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("Impossible de charger {}", path.display()))?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let label = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();

        log::info!("Image source {label} : {width}x{height}");

        Ok(Self {
            frame: Arc::new(FrameBuffer {
                data: rgb.into_raw(),
                width,
                height,
                order: ChannelOrder::Rgb,
            }),
            label,
        })
    }
}

impl VideoSource for ImageSource {
    fn poll_frame(&mut self) -> Capture {
        Capture::Frame(Arc::clone(&self.frame))
    }

    fn native_size(&self) -> (u32, u32) {
        (self.frame.width, self.frame.height)
    }

    fn is_live(&self) -> bool {
        false
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}
