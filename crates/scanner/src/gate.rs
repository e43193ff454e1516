//! Deciding which translated code regions need byte-level monitoring

use crate::admission::AdmissionFilter;
use keyscan_params::ASSUMED_REGION_SIZE;
use std::sync::Arc;
use tracing::{info, trace, warn};

/// Counters of region decisions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GateStats {
    /// Regions for which monitoring was enabled
    pub instrumented: u64,
    /// Regions examined in a watched context
    pub total: u64,
}

/// Per-region enable/disable helper for a harness
///
/// The harness calls [`RegionGate::before_region`] before translating a code
/// region and [`RegionGate::after_region`] once its real size is known.
/// Without a filter every region is monitored and nothing is counted.
#[derive(Debug, Default)]
pub struct RegionGate {
    filter: Option<Arc<AdmissionFilter>>,
    armed: bool,
    stats: GateStats,
}

impl RegionGate {
    /// Create a gate over an optional filter
    pub fn new(filter: Option<Arc<AdmissionFilter>>) -> Self {
        Self {
            filter,
            armed: false,
            stats: GateStats::default(),
        }
    }

    /// Decide whether the region starting at `start` in `context` needs
    /// monitoring
    ///
    /// The region is assumed to span [`ASSUMED_REGION_SIZE`] bytes.
    pub fn before_region(&mut self, context: u64, start: u64) -> bool {
        let filter = match &self.filter {
            Some(filter) => filter,
            None => return true,
        };
        if !filter.watches_context(context) {
            return false;
        }

        let end = start.saturating_add(ASSUMED_REGION_SIZE);
        let enable = filter.region_overlaps(start, end);
        if enable {
            trace!(context, start, end, "enabling byte monitoring for region");
            self.armed = true;
            self.stats.instrumented += 1;
        }
        self.stats.total += 1;
        enable
    }

    /// Close the decision for the region just translated
    ///
    /// Warns when a monitored region turned out larger than assumed, since
    /// taps past the assumed end could have been missed.
    pub fn after_region(&mut self, start: u64, actual_size: u64) {
        if self.filter.is_none() {
            return;
        }
        if self.armed {
            if actual_size > ASSUMED_REGION_SIZE {
                warn!(
                    start,
                    actual_size,
                    assumed = ASSUMED_REGION_SIZE,
                    "region is larger than assumed"
                );
            }
            self.armed = false;
        }
    }

    /// Whether monitoring is currently enabled
    pub fn is_armed(&self) -> bool {
        self.filter.is_none() || self.armed
    }

    /// Decision counters so far
    pub fn stats(&self) -> GateStats {
        self.stats
    }

    /// Log the decision counters
    pub fn log_summary(&self) {
        info!(
            instrumented = self.stats.instrumented,
            total = self.stats.total,
            "regions instrumented"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyscan_api::ProgramPoint;

    fn gate() -> RegionGate {
        let filter = AdmissionFilter::new([
            ProgramPoint::new(0x1, 0x4010, 0x3),
            ProgramPoint::new(0x1, 0x9000, 0x3),
        ]);
        RegionGate::new(Some(Arc::new(filter)))
    }

    #[test]
    fn test_without_filter_everything_is_monitored() {
        let mut g = RegionGate::new(None);
        assert!(g.before_region(42, 0));
        assert!(g.is_armed());
        g.after_region(0, 4096);
        assert!(g.is_armed());
        assert_eq!(g.stats(), GateStats::default());
    }

    #[test]
    fn test_region_covering_a_tap_is_monitored() {
        let mut g = gate();
        assert!(g.before_region(0x3, 0x4000));
        assert!(g.is_armed());
        g.after_region(0x4000, 64);
        assert!(!g.is_armed());

        // 0x3f10 + 256 = 0x4010, which is outside the half-open region
        assert!(!g.before_region(0x3, 0x3f10));
        assert!(g.before_region(0x3, 0x3f11));
        assert_eq!(
            g.stats(),
            GateStats {
                instrumented: 2,
                total: 3
            }
        );
    }

    #[test]
    fn test_unwatched_context_is_not_counted() {
        let mut g = gate();
        assert!(!g.before_region(0x4, 0x4000));
        assert_eq!(g.stats().total, 0);
    }

    #[test]
    fn test_region_end_saturates() {
        let mut g = RegionGate::new(Some(Arc::new(AdmissionFilter::new([ProgramPoint::new(
            0,
            u64::MAX - 1,
            0,
        )]))));
        assert!(g.before_region(0, u64::MAX - 10));
    }
}
