//! Per-screen busy flag.

use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether a screen is waiting on a request.
///
/// [`try_begin`](LoadingFlag::try_begin) refuses a second request while one
/// is running; [`hold`](LoadingFlag::hold) always sets the flag.
#[derive(Debug, Default)]
pub struct LoadingFlag {
    busy: AtomicBool,
}

impl LoadingFlag {
    pub fn new(initial: bool) -> Self {
        LoadingFlag {
            busy: AtomicBool::new(initial),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Sets the flag if it was clear.
    pub fn try_begin(&self) -> Option<LoadingGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| LoadingGuard { flag: self })
    }

    /// Sets the flag regardless of its current value.
    pub fn hold(&self) -> LoadingGuard<'_> {
        self.busy.store(true, Ordering::SeqCst);
        LoadingGuard { flag: self }
    }
}

/// Clears the flag when dropped, on every exit path.
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    flag: &'a LoadingFlag,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.busy.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_resets() {
        let flag = LoadingFlag::new(false);
        {
            let _guard = flag.try_begin().unwrap();
            assert!(flag.is_loading());
            assert!(flag.try_begin().is_none());
        }
        assert!(!flag.is_loading());
    }

    #[test]
    fn test_hold_over_initial_state() {
        let flag = LoadingFlag::new(true);
        assert!(flag.try_begin().is_none());
        drop(flag.hold());
        assert!(!flag.is_loading());
    }
}
