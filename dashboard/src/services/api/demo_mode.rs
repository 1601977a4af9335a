//! Session-wide demo mode flag.
//!
//! Set once when the backend is judged unreachable and never cleared automatically.
//! The flag is injected into the request client rather than held in a static, so each
//! session (and each test) owns its own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared handle to the session's demo mode flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct DemoModeState {
    active: Arc<AtomicBool>,
}

impl DemoModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Turn demo mode on. Returns true only for the call that actually flipped it.
    pub fn activate(&self) -> bool {
        let flipped = !self.active.swap(true, Ordering::AcqRel);
        if flipped {
            tracing::warn!("Backend unreachable - switching session to demo data");
        }
        flipped
    }

    /// Start a fresh session. Not called by the client itself.
    pub fn reset(&self) {
        self.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_is_sticky_and_reports_first_flip() {
        let state = DemoModeState::new();
        assert!(!state.is_active());
        assert!(state.activate());
        assert!(!state.activate());
        assert!(state.is_active());
    }

    #[test]
    fn test_clones_share_flag_and_reset() {
        let state = DemoModeState::new();
        let other = state.clone();
        other.activate();
        assert!(state.is_active());
        state.reset();
        assert!(!other.is_active());
    }
}
