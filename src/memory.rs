// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Heap accounting and timing probes.
//!
//! [`TrackingAllocator`] wraps the system allocator and keeps a current and
//! a peak byte count per thread, so measurements taken on one worker are not
//! disturbed by allocations on another. A binary opts in with
//! `#[global_allocator]`; without it every memory reading is zero.
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: patternbench_lib::memory::TrackingAllocator =
//!     patternbench_lib::memory::TrackingAllocator::new();
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

thread_local! {
    static CURRENT: Cell<usize> = const { Cell::new(0) };
    static PEAK: Cell<usize> = const { Cell::new(0) };
}

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Global allocator that records per-thread heap usage.
#[derive(Debug, Default)]
pub struct TrackingAllocator;

impl TrackingAllocator {
    /// Creates the allocator; usable in a `static`.
    pub const fn new() -> Self {
        Self
    }
}

#[inline]
fn record_alloc(size: usize) {
    if !INSTALLED.load(Ordering::Relaxed) {
        INSTALLED.store(true, Ordering::Relaxed);
    }
    // try_with: the slots may already be gone during thread teardown
    let _ = CURRENT.try_with(|current| {
        let now = current.get().saturating_add(size);
        current.set(now);
        let _ = PEAK.try_with(|peak| {
            if now > peak.get() {
                peak.set(now);
            }
        });
    });
}

#[inline]
fn record_dealloc(size: usize) {
    // Memory freed on a thread other than its allocating thread saturates at zero.
    let _ = CURRENT.try_with(|current| current.set(current.get().saturating_sub(size)));
}

// SAFETY: every call is forwarded unchanged to `System`; the bookkeeping
// only touches const-initialized thread-local cells and never allocates.
unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            // Count the new block before releasing the old one so a moving
            // realloc shows up in the peak.
            record_alloc(new_size);
            record_dealloc(layout.size());
        }
        new_ptr
    }
}

/// Whether a [`TrackingAllocator`] is serving allocations in this process.
pub fn is_tracking() -> bool {
    INSTALLED.load(Ordering::Relaxed)
}

/// Bytes currently allocated by this thread.
pub fn current_bytes() -> usize {
    CURRENT.try_with(Cell::get).unwrap_or(0)
}

/// Highest value [`current_bytes`] has reached since the last reset.
pub fn peak_bytes() -> usize {
    PEAK.try_with(Cell::get).unwrap_or(0)
}

/// Lowers this thread's peak to its current usage.
pub fn reset_peak() {
    let now = current_bytes();
    let _ = PEAK.try_with(|peak| peak.set(now));
}

/// Time and memory cost of one measured call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sample {
    /// Wall-clock duration
    pub elapsed: Duration,
    /// Peak heap bytes above the baseline at the start of the call
    pub peak_memory: usize,
}

/// Measures wall-clock time and peak heap growth of a region.
///
/// Nothing unrelated to the call under test should allocate between
/// [`Probe::start`] and [`Probe::finish`].
#[derive(Debug)]
pub struct Probe {
    started: Instant,
    baseline: usize,
}

impl Probe {
    /// Resets the thread's peak and starts the clock.
    pub fn start() -> Self {
        let baseline = current_bytes();
        reset_peak();
        Self {
            started: Instant::now(),
            baseline,
        }
    }

    /// Stops the clock and reads the peak.
    pub fn finish(self) -> Sample {
        let elapsed = self.started.elapsed();
        let peak_memory = peak_bytes().saturating_sub(self.baseline);
        Sample {
            elapsed,
            peak_memory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The library test harness installs TrackingAllocator (see lib.rs).

    #[test]
    fn test_probe_sees_allocation() {
        let probe = Probe::start();
        let buffer: Vec<u8> = Vec::with_capacity(64 * 1024);
        let sample = probe.finish();
        drop(buffer);

        assert!(is_tracking());
        assert!(sample.peak_memory >= 64 * 1024);
    }

    #[test]
    fn test_peak_survives_free() {
        let probe = Probe::start();
        {
            let transient = vec![0u64; 4096];
            std::hint::black_box(&transient);
        }
        let sample = probe.finish();

        assert!(sample.peak_memory >= 4096 * std::mem::size_of::<u64>());
    }

    #[test]
    fn test_threads_are_isolated() {
        let probe = Probe::start();
        std::thread::spawn(|| {
            let big = vec![0u8; 1 << 20];
            std::hint::black_box(&big);
        })
        .join()
        .unwrap();
        let sample = probe.finish();

        // Spawning allocates a little on this thread, never the worker's megabyte.
        assert!(sample.peak_memory < 1 << 20);
    }
}
