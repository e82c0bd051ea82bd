//! Process-level CPU and memory sampling for timer tags

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

// Memory reads are point-in-time, so one shared System serves every caller.
static MEMORY: Lazy<Mutex<System>> = Lazy::new(|| {
    Mutex::new(System::new_with_specifics(
        RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
    ))
});

/// Total and free physical memory, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySnapshot {
    /// Total physical memory
    pub total: u64,
    /// Free physical memory
    pub free: u64,
}

/// Current total/free memory values.
pub fn memory_snapshot() -> MemorySnapshot {
    let mut system = MEMORY.lock();
    system.refresh_memory();
    MemorySnapshot { total: system.total_memory(), free: system.free_memory() }
}

/// Average CPU utilization between two sampled instants
///
/// CPU usage is a delta measurement: `begin` marks the start of the interval
/// and `utilization` reports the averaged across-core usage accumulated since
/// then. Each tracker owns its own sampler so overlapping timers do not share
/// intervals.
pub struct CpuTracker {
    system: System,
}

impl CpuTracker {
    /// Create a tracker and take the initial baseline sample.
    pub fn new() -> Self {
        let mut system = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage()),
        );
        system.refresh_cpu_usage();
        Self { system }
    }

    /// Mark the start of a measurement interval.
    pub fn begin(&mut self) {
        self.system.refresh_cpu_usage();
    }

    /// Average utilization percentage across all cores since `begin`.
    ///
    /// Computed as `100 - floor(idle%)` over the averaged per-core deltas.
    pub fn utilization(&mut self) -> f64 {
        self.system.refresh_cpu_usage();
        let cpus = self.system.cpus();
        if cpus.is_empty() {
            return 0.0;
        }
        let busy =
            cpus.iter().map(|cpu| f64::from(cpu.cpu_usage())).sum::<f64>() / cpus.len() as f64;
        let idle = (100.0 - busy).clamp(0.0, 100.0);
        100.0 - idle.floor()
    }
}

impl Default for CpuTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for measures::process.
    use super::*;

    /// Validates `memory_snapshot` behavior for the live sample scenario.
    ///
    /// Assertions:
    /// - Ensures `snapshot.total > 0` evaluates to true.
    /// - Ensures `snapshot.free <= snapshot.total` evaluates to true.
    #[test]
    fn test_memory_snapshot() {
        let snapshot = memory_snapshot();
        assert!(snapshot.total > 0);
        assert!(snapshot.free <= snapshot.total);
    }

    /// Validates `CpuTracker::utilization` behavior for the bounded-range
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures `(0.0..=100.0).contains(&pct)` evaluates to true.
    #[test]
    fn test_cpu_utilization_in_range() {
        let mut tracker = CpuTracker::new();
        tracker.begin();
        let pct = tracker.utilization();
        assert!((0.0..=100.0).contains(&pct));
    }
}
