// 🔄 Refresh Simulation - balance delta source + provider latency
//
// A refresh stands in for a call to a real banking provider: wait a little,
// then nudge the balance. The delta source is a trait so tests can pin the
// outcome instead of reading the clock.

use std::time::Duration;

use chrono::Utc;

/// Simulated latency of the upstream provider call.
///
/// The account store holds its write guard across this wait, so refreshes
/// of the same account serialize.
pub const REFRESH_LATENCY: Duration = Duration::from_millis(100);

/// Source of the balance delta applied by a refresh.
///
/// One draw per refresh. Implementations must stay within the closed range
/// [-1.00, +1.00].
pub trait DeltaSource: Send + Sync {
    fn delta(&self) -> f64;
}

/// Default source: derives the delta from the wall clock's nanosecond
/// component. Not cryptographically meaningful; the demo only needs the
/// balance to move a little on every refresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockDelta;

impl DeltaSource for ClockDelta {
    fn delta(&self) -> f64 {
        let nanos = Utc::now().timestamp_subsec_nanos();
        (f64::from(nanos % 200) - 100.0) / 100.0
    }
}

/// Fixed source for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelta(pub f64);

impl DeltaSource for FixedDelta {
    fn delta(&self) -> f64 {
        self.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
