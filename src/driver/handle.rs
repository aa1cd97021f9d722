//! Liveness flag for the auto-step loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared play/pause flag.
///
/// The loop reads it once per tick; setting it false stops the next tick
/// from firing but never interrupts one already running.
#[derive(Clone, Debug, Default)]
pub struct RunHandle {
    running: Arc<AtomicBool>,
}

impl RunHandle {
    /// A paused handle.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    pub fn pause(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> bool {
        !self.running.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_handle_is_paused() {
        assert!(!RunHandle::new().is_running());
    }

    #[test]
    fn clones_share_the_flag() {
        let handle = RunHandle::new();
        let clone = handle.clone();

        clone.start();
        assert!(handle.is_running());

        handle.pause();
        assert!(!clone.is_running());
    }

    #[test]
    fn toggle_returns_new_value() {
        let handle = RunHandle::new();
        assert!(handle.toggle());
        assert!(!handle.toggle());
        assert!(!handle.is_running());
    }
}
