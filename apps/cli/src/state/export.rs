//! # Export State
//!
//! Keeps the export trigger disabled while an export is pending.
//!
//! ```text
//! try_begin() ──► Some(permit) ──► export runs ──► permit dropped ──► idle
//!      │
//!      └── already pending ──► None ("Exporting...")
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct ExportState {
    pending: AtomicBool,
}

impl ExportState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the export trigger. Returns `None` while another export is
    /// still running.
    pub fn try_begin(&self) -> Option<ExportPermit<'_>> {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportPermit { state: self })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

/// Held for the duration of one export.
#[derive(Debug)]
pub struct ExportPermit<'a> {
    state: &'a ExportState,
}

impl Drop for ExportPermit<'_> {
    fn drop(&mut self) {
        self.state.pending.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_permit_at_a_time() {
        let state = ExportState::new();

        let permit = state.try_begin();
        assert!(permit.is_some());
        assert!(state.is_pending());
        assert!(state.try_begin().is_none());

        drop(permit);
        assert!(!state.is_pending());
        assert!(state.try_begin().is_some());
    }
}
