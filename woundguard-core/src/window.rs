//! Fixed-Capacity Violation Window
//!
//! ## Overview
//!
//! The persistence check needs the last `window_size` violation flags, oldest
//! first, with the oldest dropped as each new flag arrives. `window_size`
//! depends on the sampling interval chosen at runtime, so the flags live in a
//! `heapless::Deque` of the largest supported size and the deque is capped at
//! the configured size by an explicit length check.
//!
//! ```text
//! capacity = 4, pushing F T T F T
//!
//! push F   [F]
//! push T   [F T]
//! push T   [F T T]
//! push F   [F T T F]        full
//! push T   [T T F T]        evicted F
//! ```
//!
//! ## Performance
//!
//! - `push()`: O(1), no allocation
//! - `violation_count()` / `rate()`: O(1), a running count is kept
//! - `iter()`: O(n), oldest to newest
//!
//! ## Usage Example
//!
//! ```
//! use woundguard_core::ViolationWindow;
//!
//! let mut window = ViolationWindow::new(3).unwrap();
//! window.push(true);
//! window.push(false);
//! window.push(true);
//! assert!(window.is_full());
//!
//! // Oldest flag (true) falls out
//! assert_eq!(window.push(false), Some(true));
//! assert_eq!(window.violation_count(), 1);
//! ```

use heapless::Deque;

use crate::constants::buffers::MAX_WINDOW_SAMPLES;
use crate::errors::{ConfigError, DetectorResult};

/// Bounded FIFO of per-sample violation flags
///
/// ## Internal Invariants
///
/// - `capacity` is in `1..=MAX_WINDOW_SAMPLES`
/// - `flags.len() <= capacity`
/// - `violations` equals the number of `true` flags in `flags`
///
/// Not thread-safe; the owning engine is single-session by design.
#[derive(Debug, Clone)]
pub struct ViolationWindow {
    flags: Deque<bool, MAX_WINDOW_SAMPLES>,
    capacity: usize,
    violations: usize,
}

impl ViolationWindow {
    /// Create an empty window holding at most `capacity` flags
    pub fn new(capacity: usize) -> DetectorResult<Self> {
        if capacity == 0 {
            return Err(ConfigError::InvalidPolicy { reason: "window size is zero" });
        }
        if capacity > MAX_WINDOW_SAMPLES {
            return Err(ConfigError::WindowTooLarge {
                required: capacity,
                capacity: MAX_WINDOW_SAMPLES,
            });
        }

        Ok(Self {
            flags: Deque::new(),
            capacity,
            violations: 0,
        })
    }

    /// Append a flag, evicting the oldest once the window is full
    ///
    /// Returns the evicted flag, if any.
    pub fn push(&mut self, violated: bool) -> Option<bool> {
        let evicted = if self.flags.len() == self.capacity {
            self.flags.pop_front()
        } else {
            None
        };

        if evicted == Some(true) {
            self.violations -= 1;
        }

        // Cannot fail: capacity <= MAX_WINDOW_SAMPLES and we just made room
        if self.flags.push_back(violated).is_ok() && violated {
            self.violations += 1;
        }

        evicted
    }

    /// Number of flags currently held
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Configured window size
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when no flags have been pushed since creation or `clear`
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// True once the window holds `capacity` flags
    pub fn is_full(&self) -> bool {
        self.flags.len() == self.capacity
    }

    /// Number of `true` flags in the window
    pub fn violation_count(&self) -> usize {
        self.violations
    }

    /// Fraction of held flags that are `true`; 0 when empty
    ///
    /// Divides by the current length, not the capacity, so a partially
    /// filled window reports the rate of what it has seen.
    pub fn rate(&self) -> f32 {
        if self.flags.is_empty() {
            return 0.0;
        }
        self.violations as f32 / self.flags.len() as f32
    }

    /// Iterate flags from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.flags.iter().copied()
    }

    /// Drop every flag, keeping the capacity
    pub fn clear(&mut self) {
        self.flags.clear();
        self.violations = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn empty_window() {
        let window = ViolationWindow::new(5).unwrap();
        assert!(window.is_empty());
        assert!(!window.is_full());
        assert_eq!(window.len(), 0);
        assert_eq!(window.rate(), 0.0);
    }

    #[test]
    fn rejects_bad_capacity() {
        assert!(ViolationWindow::new(0).is_err());
        assert_eq!(
            ViolationWindow::new(MAX_WINDOW_SAMPLES + 1).unwrap_err(),
            ConfigError::WindowTooLarge {
                required: MAX_WINDOW_SAMPLES + 1,
                capacity: MAX_WINDOW_SAMPLES,
            }
        );
        assert!(ViolationWindow::new(MAX_WINDOW_SAMPLES).is_ok());
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut window = ViolationWindow::new(3).unwrap();

        for flag in [true, false, true] {
            assert_eq!(window.push(flag), None);
        }
        assert!(window.is_full());

        assert_eq!(window.push(false), Some(true));
        assert_eq!(window.len(), 3);

        let flags: Vec<bool> = window.iter().collect();
        assert_eq!(flags, [false, true, false]);
    }

    #[test]
    fn running_count_tracks_evictions() {
        let mut window = ViolationWindow::new(4).unwrap();

        for _ in 0..4 {
            window.push(true);
        }
        assert_eq!(window.violation_count(), 4);
        assert_eq!(window.rate(), 1.0);

        window.push(false);
        window.push(false);
        assert_eq!(window.violation_count(), 2);
        assert_eq!(window.rate(), 0.5);
    }

    #[test]
    fn partial_window_rate_uses_length() {
        let mut window = ViolationWindow::new(48).unwrap();
        window.push(true);
        window.push(false);
        assert_eq!(window.rate(), 0.5);
    }

    #[test]
    fn clear_resets_count() {
        let mut window = ViolationWindow::new(2).unwrap();
        window.push(true);
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.violation_count(), 0);
        assert_eq!(window.capacity(), 2);
    }
}
