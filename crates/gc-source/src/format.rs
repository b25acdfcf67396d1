/// Un format de capture offert par un périphérique.
///
/// # Example
/// ```
/// use gc_source::format::CameraFormat;
/// let f = CameraFormat::new(640, 480, 30);
/// assert!((f.aspect_ratio() - 0.75).abs() < f32::EPSILON);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraFormat {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl CameraFormat {
    #[must_use]
    pub fn new(width: u32, height: u32, fps: u32) -> Self {
        Self { width, height, fps }
    }

    /// Aspect ratio height/width.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 {
            1.0
        } else {
            self.height as f32 / self.width as f32
        }
    }
}

/// Formats candidats demandés à ffmpeg quand le périphérique ne publie
/// rien de consultable. Ordre = préférence à fps égal.
pub const DEFAULT_FORMATS: &[CameraFormat] = &[
    CameraFormat {
        width: 640,
        height: 480,
        fps: 30,
    },
    CameraFormat {
        width: 1280,
        height: 720,
        fps: 30,
    },
    CameraFormat {
        width: 640,
        height: 480,
        fps: 60,
    },
];

/// Selection policy over a device's offered formats: highest fps wins,
/// ties broken by first-seen order. `None` only for an empty list.
///
/// # Example
/// ```
/// use gc_source::format::{best_format, CameraFormat};
/// let formats = [
///     CameraFormat::new(1920, 1080, 30),
///     CameraFormat::new(640, 480, 60),
/// ];
/// assert_eq!(best_format(&formats), Some(&formats[1]));
/// ```
#[must_use]
pub fn best_format(formats: &[CameraFormat]) -> Option<&CameraFormat> {
    let mut best: Option<&CameraFormat> = None;
    for f in formats {
        match best {
            Some(b) if f.fps <= b.fps => {}
            _ => best = Some(f),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_fps_wins() {
        let formats = [
            CameraFormat::new(1920, 1080, 24),
            CameraFormat::new(1280, 720, 60),
            CameraFormat::new(640, 480, 30),
        ];
        assert_eq!(best_format(&formats), Some(&formats[1]));
    }

    #[test]
    fn ties_break_first_seen() {
        let formats = [
            CameraFormat::new(640, 480, 30),
            CameraFormat::new(1920, 1080, 30),
        ];
        assert_eq!(best_format(&formats), Some(&formats[0]));
    }

    #[test]
    fn empty_list_yields_none() {
        assert_eq!(best_format(&[]), None);
    }

    #[test]
    fn default_formats_non_empty() {
        assert!(best_format(DEFAULT_FORMATS).is_some());
    }
}
