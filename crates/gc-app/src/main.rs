//! Point d'entrée du binaire `glyphcam`.

mod app;
mod cli;

use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use gc_ascii::engine::{AsciiEngine, EngineMode};
use gc_core::config::{load_config, EngineConfig};
use gc_core::geometry::TargetRect;
use gc_core::ramp::RampSet;
use gc_core::traits::VideoSource;
use gc_source::image::ImageSource;
use gc_source::webcam::{self, WebcamSource};

use crate::app::App;
use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Logging sur stderr (le terminal alternatif occupe stdout).
    let level = log::LevelFilter::from_str(&cli.log_level).unwrap_or(log::LevelFilter::Warn);
    env_logger::Builder::new().filter_level(level).init();

    // 2. Configuration : fichier TOML s'il existe, défauts sinon.
    let mut config = if cli.config.exists() {
        load_config(&cli.config)?
    } else {
        log::debug!(
            "Pas de fichier {} : valeurs par défaut",
            cli.config.display()
        );
        EngineConfig::default()
    };
    if let Some(fps) = cli.fps {
        config.target_fps = fps;
        config.validate().context("Override --fps invalide")?;
    }

    // 3. Tables de ramps.
    let ramps = RampSet::load(cli.tables.as_deref());

    // 4. Source vidéo. Une caméra absente au démarrage n'est pas fatale :
    // on démarre en mode Disconnected et la boucle retente l'ouverture.
    let mut devices = Vec::new();
    let mut device_index = 0usize;
    let webcam_mode = cli.image.is_none();
    let source: Option<Box<dyn VideoSource>> = if let Some(path) = cli.image.as_deref() {
        Some(Box::new(ImageSource::new(path)?))
    } else {
        devices = webcam::list_devices();
        if devices.is_empty() {
            log::warn!("Aucune caméra détectée");
            None
        } else {
            device_index = cli.device.min(devices.len() - 1);
            match WebcamSource::open(&devices[device_index]) {
                Ok(cam) => Some(Box::new(cam)),
                Err(e) => {
                    log::error!(
                        "Ouverture de {} échouée : {e:#}",
                        devices[device_index].name
                    );
                    None
                }
            }
        }
    };

    // 5. Moteur : rect initial = surface du terminal, en cellules.
    let (cols, rows) = crossterm::terminal::size().context("Taille du terminal illisible")?;
    let mut engine = AsciiEngine::new(
        &config,
        ramps,
        TargetRect::new(0.0, 0.0, f32::from(cols), f32::from(rows)),
    );
    match &source {
        Some(src) => {
            let (w, h) = src.native_size();
            if w > 0 {
                engine.set_source_aspect(h as f32 / w as f32);
            }
        }
        None => engine.set_mode(EngineMode::Disconnected),
    }

    // 6. Boucle, avec restauration du terminal quoi qu'il arrive.
    let terminal = ratatui::init();
    let result = App::new(
        config,
        engine,
        source,
        devices,
        device_index,
        webcam_mode,
        (cols, rows),
    )
    .run(terminal);
    ratatui::restore();
    result
}
