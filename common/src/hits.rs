// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Process-wide request hit counter.
//!
//! A single atomic word: increments, reads and resets never block each other
//! and never observe a torn value. The counter lives only in memory and starts
//! at zero with every process.

use std::sync::atomic::{AtomicU64, Ordering};

/// Concurrency-safe counter of hits on instrumented routes.
///
/// Owned by whoever builds the router and shared by reference; there is no
/// global instance, so every test can construct its own.
#[derive(Debug, Default)]
pub struct HitCounter {
    hits: AtomicU64,
}

impl HitCounter {
    /// Create a counter starting at zero.
    pub const fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
        }
    }

    /// Record one hit.
    pub fn increment(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Current number of hits since start or the last reset.
    pub fn read(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Set the counter back to zero.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}
