//! Render telemetry counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic diagnostics counters shared across render workers.
///
/// Increments are relaxed; nothing synchronizes through these values and
/// they are only read after the render finishes.
#[derive(Debug, Default)]
pub struct RenderStats {
    primary_rays: AtomicU64,
    secondary_rays: AtomicU64,
    shadow_rays: AtomicU64,
    intersection_tests: AtomicU64,
}

impl RenderStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn count_primary_ray(&self) {
        self.primary_rays.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn count_secondary_ray(&self) {
        self.secondary_rays.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn count_shadow_ray(&self) {
        self.shadow_rays.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn count_intersection_test(&self) {
        self.intersection_tests.fetch_add(1, Ordering::Relaxed);
    }

    /// Read every counter at once.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            primary_rays: self.primary_rays.load(Ordering::Relaxed),
            secondary_rays: self.secondary_rays.load(Ordering::Relaxed),
            shadow_rays: self.shadow_rays.load(Ordering::Relaxed),
            intersection_tests: self.intersection_tests.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.primary_rays.store(0, Ordering::Relaxed);
        self.secondary_rays.store(0, Ordering::Relaxed);
        self.shadow_rays.store(0, Ordering::Relaxed);
        self.intersection_tests.store(0, Ordering::Relaxed);
    }
}

/// Plain-data copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub primary_rays: u64,
    pub secondary_rays: u64,
    pub shadow_rays: u64,
    pub intersection_tests: u64,
}
