//! Capture webcam via subprocess ffmpeg.
//!
//! ffmpeg lit le périphérique natif (v4l2 / avfoundation / dshow) et écrit
//! des frames RGB24 brutes sur stdout. Un thread lecteur dédié consomme le
//! pipe par frames entières et alimente un canal borné; la boucle de tick
//! reste mono-thread et fait un `try_recv` non-bloquant par tick.
//! Prérequis runtime : `ffmpeg` dans le PATH.

use std::io::Read;
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use flume::{Receiver, Sender, TrySendError};
use gc_core::frame::{ChannelOrder, FrameBuffer};
use gc_core::traits::{Capture, VideoSource};

use crate::format::{best_format, CameraFormat, DEFAULT_FORMATS};

/// Taille du pool de frames pré-allouées.
/// Doit être > capacité du canal (2) pour garantir un slot libre.
const POOL_SIZE: usize = 4;

/// A capture device as handed to ffmpeg's input flag.
///
/// # Example
/// ```
/// use gc_source::webcam::CameraDevice;
/// let dev = CameraDevice::new("video0", "/dev/video0");
/// assert_eq!(dev.name, "video0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraDevice {
    /// Short display name for the status line.
    pub name: String,
    /// ffmpeg `-i` argument.
    pub input: String,
}

impl CameraDevice {
    #[must_use]
    pub fn new(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
        }
    }
}

/// Enumerate capture devices.
///
/// Linux scans `/dev/video*`; the other platforms expose ffmpeg's default
/// device under index 0 (dshow/avfoundation offer no cheap enumeration
/// without parsing ffmpeg's stderr). An empty result means no device — a
/// logged, non-fatal condition handled by the disconnected state.
#[must_use]
pub fn list_devices() -> Vec<CameraDevice> {
    #[cfg(target_os = "linux")]
    {
        let mut names: Vec<String> = match std::fs::read_dir("/dev") {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .filter_map(|e| e.file_name().into_string().ok())
                .filter(|n| {
                    n.strip_prefix("video")
                        .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_digit()))
                })
                .collect(),
            Err(e) => {
                log::warn!("Couldn't enumerate /dev: {e}");
                Vec::new()
            }
        };
        names.sort();
        return names
            .into_iter()
            .map(|n| CameraDevice::new(&n, &format!("/dev/{n}")))
            .collect();
    }

    #[cfg(target_os = "macos")]
    {
        return vec![CameraDevice::new("camera 0", "0:none")];
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        vec![CameraDevice::new("default", "video=default")]
    }
}

/// Platform-specific ffmpeg capture arguments: native grabber in, raw
/// rgb24 low-latency stream out on stdout.
fn capture_args(device: &CameraDevice, format: &CameraFormat) -> Vec<String> {
    let grabber = if cfg!(target_os = "macos") {
        "avfoundation"
    } else if cfg!(target_os = "windows") {
        "dshow"
    } else {
        "v4l2"
    };
    let size = format!("{}x{}", format.width, format.height);
    let fps = format.fps.to_string();

    [
        "-f",
        grabber,
        "-framerate",
        fps.as_str(),
        "-video_size",
        size.as_str(),
        "-i",
        device.input.as_str(),
        // output opts
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgb24",
        // latency opts
        "-probesize",
        "32",
        "-analyzeduration",
        "0",
        "-fflags",
        "nobuffer",
        "-flags",
        "low_delay",
        "-hide_banner",
        "-loglevel",
        "error",
        "pipe:1",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

/// Source webcam vivante. `poll_frame` ne bloque jamais; la frame rendue
/// précédente reste affichée tant que la caméra n'a rien produit de neuf.
pub struct WebcamSource {
    device: CameraDevice,
    format: CameraFormat,
    child: Child,
    frame_rx: Receiver<Arc<FrameBuffer>>,
    reader: Option<thread::JoinHandle<()>>,
}

impl WebcamSource {
    /// Open `device` with the best of [`DEFAULT_FORMATS`] (highest fps,
    /// first-seen ties) and start the reader thread.
    ///
    /// # Errors
    /// Returns an error if ffmpeg cannot be spawned or exposes no stdout —
    /// a fatal startup error for the first device, a logged retry for
    /// later reconnections.
    pub fn open(device: &CameraDevice) -> Result<Self> {
        let format = *best_format(DEFAULT_FORMATS)
            .context("Liste de formats candidats vide")?;

        let mut child = Command::new("ffmpeg")
            .args(capture_args(device, &format))
            .stdout(Stdio::piped())
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("Impossible de lancer ffmpeg. Vérifiez qu'il est installé et dans le PATH.")?;

        let stdout = child
            .stdout
            .take()
            .context("Pas de stdout sur le process ffmpeg")?;

        let (frame_tx, frame_rx) = flume::bounded(2);
        let (w, h) = (format.width, format.height);
        let reader = thread::Builder::new()
            .name("gc-capture".to_string())
            .spawn(move || capture_loop(stdout, &frame_tx, w, h))
            .context("Impossible de spawner le thread de capture")?;

        log::info!(
            "Caméra {} ouverte : {}x{} @ {}fps",
            device.name,
            format.width,
            format.height,
            format.fps
        );

        Ok(Self {
            device: device.clone(),
            format,
            child,
            frame_rx,
            reader: Some(reader),
        })
    }

    /// The negotiated capture format.
    #[must_use]
    pub fn format(&self) -> CameraFormat {
        self.format
    }
}

impl VideoSource for WebcamSource {
    fn poll_frame(&mut self) -> Capture {
        match self.frame_rx.try_recv() {
            Ok(frame) => Capture::Frame(frame),
            Err(flume::TryRecvError::Empty) => Capture::Pending,
            // Reader thread gone: ffmpeg hit EOF or the device vanished.
            Err(flume::TryRecvError::Disconnected) => Capture::Disconnected,
        }
    }

    fn native_size(&self) -> (u32, u32) {
        (self.format.width, self.format.height)
    }

    fn is_live(&self) -> bool {
        true
    }

    fn label(&self) -> String {
        format!(
            "{} | {}x{} {}fps",
            self.device.name, self.format.width, self.format.height, self.format.fps
        )
    }
}

impl Drop for WebcamSource {
    fn drop(&mut self) {
        // Kill ffmpeg first so the reader's blocking read unblocks.
        if let Err(e) = self.child.kill() {
            log::debug!("kill ffmpeg: {e}");
        }
        let _ = self.child.wait();
        if let Some(handle) = self.reader.take() {
            let _ = handle.join();
        }
    }
}

/// Boucle du thread lecteur : remplit un slot libre du pool, frame entière
/// par frame entière, et l'envoie sur le canal. Sort sur EOF, erreur I/O,
/// ou canal fermé; le canal fermé côté lecteur signale "disconnected" à la
/// boucle principale.
fn capture_loop(mut stdout: ChildStdout, frame_tx: &Sender<Arc<FrameBuffer>>, w: u32, h: u32) {
    let mut pool: Vec<Arc<FrameBuffer>> = (0..POOL_SIZE)
        .map(|_| Arc::new(FrameBuffer::new(w, h, ChannelOrder::Rgb)))
        .collect();

    loop {
        let slot = find_free_slot(&mut pool, w, h);
        let Some(buf) = Arc::get_mut(&mut pool[slot]) else {
            // find_free_slot guarantees a uniquely-owned slot.
            log::error!("Pool slot aliased, stopping capture");
            return;
        };
        match read_exact_or_eof(&mut stdout, &mut buf.data) {
            Ok(true) => {}
            Ok(false) => {
                log::info!("Flux caméra terminé (EOF)");
                return;
            }
            Err(e) => {
                log::warn!("Lecture caméra échouée : {e}");
                return;
            }
        }

        match frame_tx.try_send(Arc::clone(&pool[slot])) {
            Ok(()) => {}
            // Tick loop slower than the camera: drop this frame, the
            // slot frees itself when the Arc clone dies here.
            Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => return,
        }
    }
}

/// Trouve ou crée un slot libre (uniquement possédé) dans le pool.
fn find_free_slot(pool: &mut Vec<Arc<FrameBuffer>>, w: u32, h: u32) -> usize {
    if let Some(i) = pool.iter().position(|a| Arc::strong_count(a) == 1) {
        i
    } else {
        // Pool saturé : allouer plutôt que bloquer.
        pool.push(Arc::new(FrameBuffer::new(w, h, ChannelOrder::Rgb)));
        pool.len() - 1
    }
}

/// Lit exactement `buf.len()` bytes. `Ok(false)` sur EOF avant complétion.
fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<bool> {
    let mut total = 0usize;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => return Ok(false),
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(true)
}
