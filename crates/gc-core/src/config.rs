use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration du moteur. Sérialisable en TOML, chaque champ a une
/// valeur par défaut saine.
///
/// # Example
/// ```
/// use gc_core::config::EngineConfig;
/// let config = EngineConfig::default();
/// assert_eq!(config.target_fps, 60);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Résolution horizontale initiale de la grille (colonnes).
    pub resolution: u32,
    /// Borne inférieure de la résolution.
    pub min_resolution: u32,
    /// Borne supérieure de la résolution. 240 historique, 256 possible.
    pub max_resolution: u32,
    /// Pas multiplicatif des touches +/−.
    pub scale_step: f32,
    /// Correction d'aspect des glyphes (hauteur/largeur, ~2.0 en terminal).
    pub glyph_aspect: f32,
    /// FPS cible de la boucle (le budget par tick en découle).
    pub target_fps: u32,
    /// Couleur de fond du clear, RGB.
    pub backdrop: (u8, u8, u8),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolution: 100,
            min_resolution: 16,
            max_resolution: 240,
            scale_step: 1.1,
            glyph_aspect: 2.0,
            target_fps: 60,
            backdrop: (0x18, 0x18, 0x18),
        }
    }
}

impl EngineConfig {
    /// Reject structurally valid but nonsensical values early.
    ///
    /// # Errors
    /// Returns a configuration error for inverted bounds or a degenerate
    /// scale step.
    pub fn validate(&self) -> Result<(), crate::CoreError> {
        if self.min_resolution == 0 || self.min_resolution > self.max_resolution {
            return Err(crate::CoreError::Config(format!(
                "bornes de résolution invalides : [{}, {}]",
                self.min_resolution, self.max_resolution
            )));
        }
        if self.scale_step <= 1.0 {
            return Err(crate::CoreError::Config(format!(
                "scale_step doit être > 1.0 (reçu {})",
                self.scale_step
            )));
        }
        if self.target_fps == 0 {
            return Err(crate::CoreError::Config("target_fps nul".into()));
        }
        Ok(())
    }
}

/// Charge une config TOML depuis `path`.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or fails
/// [`EngineConfig::validate`]. A *missing* config is handled by the caller
/// (fall back to defaults), a *broken* one is a startup error.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let config: EngineConfig = toml::from_str(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;

    config.validate()?;
    Ok(config)
}
