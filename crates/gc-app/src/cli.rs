use std::path::PathBuf;

use clap::Parser;

/// glyphcam — Terminal ASCII webcam.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de tables : une ramp par ligne (sombre → clair), 7 entrées
    /// max en plus de la ramp built-in. Sans ce flag, `ascii.tbl` est
    /// cherché dans le répertoire courant.
    #[arg(short = 'f', long = "tables")]
    pub tables: Option<PathBuf>,

    /// Source visuelle : image fixe (PNG, JPEG, BMP) au lieu de la webcam.
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Index du périphérique caméra au démarrage.
    #[arg(long, default_value_t = 0)]
    pub device: usize,

    /// Fichier de configuration TOML. Défaut : glyphcam.toml.
    #[arg(short, long, default_value = "glyphcam.toml")]
    pub config: PathBuf,

    /// FPS cible de la boucle (override la config).
    #[arg(long)]
    pub fps: Option<u32>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
