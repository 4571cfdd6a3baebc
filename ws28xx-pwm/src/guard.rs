//! Mutual exclusion for the encode-and-transfer cycle.
//!
//! A [`TransferGuard`] is a single flag. Acquiring it yields a
//! [`GuardToken`]; the flag is cleared when that token is dropped, so only
//! the holder can release it. Waiting is a poll with a short sleep between
//! attempts and has no timeout.

use embassy_time::Timer;
use embedded_hal::delay::DelayNs;
use portable_atomic::{AtomicBool, Ordering};

/// Sleep between two polls of a held guard, in milliseconds.
pub const POLL_INTERVAL_MS: u32 = 1;

/// Serializes encode-and-transfer cycles of one strip.
#[derive(Debug, Default)]
pub struct TransferGuard {
    locked: AtomicBool,
}

impl TransferGuard {
    /// Create a released guard.
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Whether a cycle currently holds the guard.
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Take the guard if it is free.
    pub fn try_acquire(&self) -> Option<GuardToken<'_>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| GuardToken { guard: self })
    }

    /// Take the guard, sleeping [`POLL_INTERVAL_MS`] on `delay` between
    /// attempts until it is free.
    pub fn acquire<D: DelayNs>(&self, delay: &mut D) -> GuardToken<'_> {
        loop {
            if let Some(token) = self.try_acquire() {
                return token;
            }
            delay.delay_ms(POLL_INTERVAL_MS);
        }
    }

    /// Take the guard, yielding to the executor between attempts.
    pub async fn acquire_async(&self) -> GuardToken<'_> {
        loop {
            if let Some(token) = self.try_acquire() {
                return token;
            }
            Timer::after_millis(u64::from(POLL_INTERVAL_MS)).await;
        }
    }
}

/// Proof of holding a [`TransferGuard`]. Releases it on drop.
#[must_use = "the guard is released as soon as the token is dropped"]
#[derive(Debug)]
pub struct GuardToken<'a> {
    guard: &'a TransferGuard,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.guard.locked.store(false, Ordering::Release);
    }
}
