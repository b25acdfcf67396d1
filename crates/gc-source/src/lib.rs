//! Video source collaborators for glyphcam.
//!
//! Supplies fixed-size RGB24 frames on demand: live webcam capture through
//! an ffmpeg pipe, or a static image for running without a device. Also
//! owns the downsampling step (the renderer itself never scales).

pub mod format;
pub mod image;
pub mod resize;
pub mod webcam;

pub use format::{best_format, CameraFormat};
pub use image::ImageSource;
pub use resize::Resizer;
pub use webcam::{list_devices, CameraDevice, WebcamSource};
