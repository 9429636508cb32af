//! Asset loading progress
//!
//! Collaborators (GPU surface, audio context) report in asynchronously.
//! A failed asset still counts as loaded: the game degrades instead of
//! refusing to start.

#[derive(Debug, Clone, Default)]
pub struct LoadProgress {
    total: usize,
    loaded: usize,
    failed: usize,
}

impl LoadProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            loaded: 0,
            failed: 0,
        }
    }

    /// Record a successful load
    pub fn mark_loaded(&mut self, name: &str) {
        self.loaded = (self.loaded + 1).min(self.total);
        log::info!("Loaded {} ({}/{})", name, self.loaded, self.total);
        self.log_if_complete();
    }

    /// Record a failed load (counts toward progress)
    pub fn mark_failed(&mut self, name: &str) {
        self.loaded = (self.loaded + 1).min(self.total);
        self.failed += 1;
        log::warn!("Failed to load {} ({}/{})", name, self.loaded, self.total);
        self.log_if_complete();
    }

    fn log_if_complete(&self) {
        if self.is_complete() {
            log::info!("Loading complete ({} failed)", self.failed);
        }
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Progress in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.loaded as f32 / self.total as f32
        }
    }

    pub fn is_complete(&self) -> bool {
        self.loaded >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_count_as_loaded() {
        let mut progress = LoadProgress::new(2);
        assert!(!progress.is_complete());

        progress.mark_loaded("renderer");
        assert_eq!(progress.fraction(), 0.5);

        progress.mark_failed("audio");
        assert!(progress.is_complete());
        assert_eq!(progress.failed(), 1);
    }

    #[test]
    fn test_empty_manifest_is_complete() {
        assert!(LoadProgress::new(0).is_complete());
        assert!(LoadProgress::default().is_complete());
    }
}
