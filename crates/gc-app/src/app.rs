//! Boucle applicative : tick cadencé au FPS cible, input clavier,
//! orchestration source → downsample → moteur → surface terminal.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use gc_ascii::engine::{AsciiEngine, EngineMode};
use gc_core::config::EngineConfig;
use gc_core::frame::FrameBuffer;
use gc_core::geometry::TargetRect;
use gc_core::traits::{Capture, VideoSource};
use gc_render::fps::FpsCounter;
use gc_render::term::TermSurface;
use gc_render::ui::{self, StatusInfo};
use gc_source::resize::Resizer;
use gc_source::webcam::{self, CameraDevice, WebcamSource};
use ratatui::DefaultTerminal;

/// Délai minimum entre deux tentatives de réouverture d'une caméra perdue.
/// Chaque tentative spawn un process ffmpeg, on ne le fait pas à 60 Hz.
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// État applicatif complet. Possède le moteur, la source vidéo courante et
/// les buffers de travail; la boucle de tick reste mono-thread, le seul
/// thread annexe est le lecteur du pipe ffmpeg côté [`WebcamSource`].
pub struct App {
    config: EngineConfig,
    engine: AsciiEngine,
    source: Option<Box<dyn VideoSource>>,
    devices: Vec<CameraDevice>,
    device_index: usize,
    /// False quand on affiche une image fixe (`--image`).
    webcam_mode: bool,
    /// Frame downsamplée aux dimensions de la grille, réallouée seulement
    /// quand la résolution change.
    scaled: Option<FrameBuffer>,
    resizer: Resizer,
    fps_counter: FpsCounter,
    /// Taille de glyphe courante du rasterizer, persiste entre les draws.
    glyph_px: f32,
    terminal_size: (u16, u16),
    next_retry: Instant,
    quitting: bool,
}

impl App {
    pub fn new(
        config: EngineConfig,
        engine: AsciiEngine,
        source: Option<Box<dyn VideoSource>>,
        devices: Vec<CameraDevice>,
        device_index: usize,
        webcam_mode: bool,
        terminal_size: (u16, u16),
    ) -> Self {
        Self {
            config,
            engine,
            source,
            devices,
            device_index,
            webcam_mode,
            scaled: None,
            resizer: Resizer::new(),
            fps_counter: FpsCounter::new(60),
            glyph_px: 1.0,
            terminal_size,
            next_retry: Instant::now(),
            quitting: false,
        }
    }

    /// Boucle principale. Rend la main quand l'utilisateur quitte (q/Esc)
    /// ou sur erreur I/O terminal.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let budget = Duration::from_secs_f64(1.0 / f64::from(self.config.target_fps.max(1)));
        let mut last_tick = Instant::now();

        while !self.quitting {
            let elapsed = last_tick.elapsed();
            if elapsed < budget {
                // Le reste du budget sert de timeout d'attente input.
                if event::poll(budget - elapsed)? {
                    self.handle_event(&event::read()?);
                }
                continue;
            }
            last_tick = Instant::now();

            while event::poll(Duration::ZERO)? {
                self.handle_event(&event::read()?);
            }

            self.check_resize()?;
            self.poll_source();
            if self.engine.mode() == EngineMode::Disconnected && self.webcam_mode {
                self.try_reconnect();
            }
            self.draw(&mut terminal)?;
            self.fps_counter.tick();
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key);
            }
        }
        // Resize : rattrapé par check_resize au tick suivant.
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quitting = true,
            KeyCode::Char('+' | '=') => self.engine.resolution_up(),
            KeyCode::Char('-') => self.engine.resolution_down(),
            KeyCode::Up => self.engine.cycle_ramp(1),
            KeyCode::Down => self.engine.cycle_ramp(-1),
            KeyCode::Right => self.cycle_camera(1),
            KeyCode::Left => self.cycle_camera(-1),
            _ => {}
        }
    }

    fn check_resize(&mut self) -> Result<()> {
        let size = crossterm::terminal::size()?;
        if size != self.terminal_size {
            self.terminal_size = size;
            self.engine
                .set_rect(TargetRect::new(0.0, 0.0, f32::from(size.0), f32::from(size.1)));
        }
        Ok(())
    }

    /// Un poll non-bloquant par tick. `Pending` garde la dernière frame
    /// downsamplée affichée.
    fn poll_source(&mut self) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        match source.poll_frame() {
            Capture::Frame(frame) => {
                self.scale_frame(&frame);
                // `frame` meurt ici : le slot retourne au pool de capture.
            }
            Capture::Pending => {}
            Capture::Disconnected => {
                log::warn!("Caméra perdue");
                self.source = None;
                self.scaled = None;
                self.engine.set_mode(EngineMode::Disconnected);
            }
        }
    }

    /// Downsample la frame capturée aux dimensions de la grille courante.
    fn scale_frame(&mut self, frame: &FrameBuffer) {
        let cols = self.engine.geometry().cols();
        let rows = self.engine.geometry().rows();
        let stale = self
            .scaled
            .as_ref()
            .map_or(true, |s| s.width != cols || s.height != rows);
        if stale {
            self.scaled = Some(FrameBuffer::new(cols, rows, frame.order));
        }
        if let Some(scaled) = self.scaled.as_mut() {
            if let Err(e) = self.resizer.resize_into(frame, scaled) {
                log::warn!("Downsample échoué : {e:#}");
                self.scaled = None;
            }
        }
    }

    /// Retente l'ouverture de la caméra courante, au plus une fois par
    /// [`RECONNECT_DELAY`]. Ré-énumère d'abord : le périphérique a pu
    /// changer d'index ou disparaître.
    fn try_reconnect(&mut self) {
        let now = Instant::now();
        if now < self.next_retry {
            return;
        }
        self.next_retry = now + RECONNECT_DELAY;

        self.devices = webcam::list_devices();
        if self.devices.is_empty() {
            return;
        }
        self.device_index = self.device_index.min(self.devices.len() - 1);
        self.open_current_device();
    }

    /// Caméra suivante/précédente, avec wraparound aux deux bouts.
    fn cycle_camera(&mut self, offset: i32) {
        if !self.webcam_mode || self.devices.is_empty() {
            return;
        }
        let count = self.devices.len() as i32;
        self.device_index = (self.device_index as i32 + offset).rem_euclid(count) as usize;
        self.open_current_device();
    }

    fn open_current_device(&mut self) {
        let device = self.devices[self.device_index].clone();
        // Libère d'abord le périphérique courant (ffmpeg tué au drop).
        self.source = None;
        self.scaled = None;
        match WebcamSource::open(&device) {
            Ok(cam) => {
                self.engine.set_source_aspect(cam.format().aspect_ratio());
                self.source = Some(Box::new(cam));
                self.engine.set_mode(EngineMode::Rendering);
            }
            Err(e) => {
                log::error!("Ouverture de {} échouée : {e:#}", device.name);
                self.engine.set_mode(EngineMode::Disconnected);
            }
        }
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            {
                let mut surface = TermSurface::new(frame.buffer_mut(), area, &mut self.glyph_px);
                match (self.engine.mode(), self.scaled.as_ref()) {
                    (EngineMode::Rendering, Some(scaled)) => {
                        self.engine.render_frame(&mut surface, scaled);
                    }
                    // Pas encore de frame, ou déconnecté : on pousse quand
                    // même les changements de taille de glyphe.
                    _ => self.engine.sync_rasterizer(&mut surface),
                }
            }
            if self.engine.mode() == EngineMode::Disconnected {
                ui::draw_disconnected(frame, area);
            }

            let label = self
                .source
                .as_ref()
                .map_or_else(|| "no device".to_string(), |s| s.label());
            let (camera_index, camera_count) = if self.webcam_mode {
                (self.device_index + 1, self.devices.len())
            } else {
                (1, 1)
            };
            let info = StatusInfo {
                source: &label,
                camera_index,
                camera_count,
                table_index: self.engine.ramp_index() + 1,
                table_count: self.engine.ramp_count(),
                cols: self.engine.geometry().cols(),
                rows: self.engine.geometry().rows(),
                fps: self.fps_counter.fps(),
            };
            ui::draw_status(frame, area, &info);
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use gc_core::ramp::RampSet;

    fn app() -> App {
        let config = EngineConfig::default();
        let engine = AsciiEngine::new(
            &config,
            RampSet::load(None),
            TargetRect::new(0.0, 0.0, 80.0, 40.0),
        );
        App::new(config, engine, None, Vec::new(), 0, true, (80, 40))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        let mut app = app();
        assert!(!app.quitting);
        app.handle_key(&press(KeyCode::Char('q')));
        assert!(app.quitting);

        let mut app = self::app();
        app.handle_key(&press(KeyCode::Esc));
        assert!(app.quitting);
    }

    #[test]
    fn resolution_keys_reach_the_engine() {
        let mut app = app();
        let before = app.engine.geometry().cols();
        app.handle_key(&press(KeyCode::Char('+')));
        assert!(app.engine.geometry().cols() > before);
        app.handle_key(&press(KeyCode::Char('-')));
        assert_eq!(app.engine.geometry().cols(), before);
    }

    #[test]
    fn camera_cycling_without_devices_is_a_no_op() {
        let mut app = app();
        app.cycle_camera(1);
        assert_eq!(app.device_index, 0);
        assert!(app.source.is_none());
    }
}
