use std::collections::VecDeque;
use std::time::Instant;

/// Compteur FPS par fenêtre glissante. Zéro allocation après init.
///
/// # Example
/// ```
/// use gc_render::fps::FpsCounter;
/// let mut counter = FpsCounter::new(60);
/// counter.tick();
/// assert!(counter.fps() >= 0.0);
/// ```
pub struct FpsCounter {
    /// Timestamps des dernières N frames.
    timestamps: VecDeque<Instant>,
    /// Taille de la fenêtre (nombre de frames à moyenner).
    window: usize,
    /// FPS calculé, mis à jour à chaque tick.
    fps: f64,
}

impl FpsCounter {
    /// Create a counter averaging over `window` frames.
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            timestamps: VecDeque::with_capacity(window + 1),
            window,
            fps: 0.0,
        }
    }

    /// Appeler une fois par tick, après le rendu.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.timestamps.push_back(now);
        if self.timestamps.len() > self.window {
            self.timestamps.pop_front();
        }
        if self.timestamps.len() >= 2 {
            let first = self.timestamps.front().copied().unwrap_or(now);
            let secs = now.duration_since(first).as_secs_f64();
            if secs > 0.0 {
                self.fps = (self.timestamps.len() - 1) as f64 / secs;
            }
        }
    }

    /// FPS moyen sur la fenêtre.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let counter = FpsCounter::new(60);
        assert!(counter.fps().abs() < f64::EPSILON);
    }

    #[test]
    fn window_is_bounded() {
        let mut counter = FpsCounter::new(4);
        for _ in 0..32 {
            counter.tick();
        }
        assert!(counter.timestamps.len() <= 4);
    }
}
