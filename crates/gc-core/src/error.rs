use thiserror::Error;

/// Errors originating from the core module.
///
/// Configuration and device errors are non-fatal by design: the loop keeps
/// running with a degraded ramp set or a placeholder screen. Contract
/// violations (empty ramp, malformed frame) are not represented here —
/// those assert.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Capture device missing or lost mid-session.
    #[error("Périphérique indisponible : {0}")]
    Device(String),

    /// Capture or rendering backend failed to initialize.
    #[error("Backend init échoué : {0}")]
    Backend(String),

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}
