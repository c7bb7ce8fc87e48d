//! High-precision timing utilities
//!
//! Send and receive stamps are taken on two different threads and later
//! subtracted pairwise, so they must come from a single clock that is both
//! monotonic and comparable across threads. `SessionClock` anchors a
//! monotonic `Instant` to the wall clock once at session start and hands
//! out microsecond stamps from that origin.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Microsecond clock shared by the driver and collector threads
///
/// Stamps are microseconds since the Unix epoch, advanced monotonically
/// from the instant the clock was created. The wall anchor keeps stamps
/// meaningful in dumped ledgers; the monotonic base keeps latencies
/// non-negative even if the wall clock steps during a run.
#[derive(Debug)]
pub struct SessionClock {
    wall_origin_us: u64,
    origin: Instant,
}

impl SessionClock {
    /// Create a clock anchored to the current wall time
    pub fn new() -> Self {
        let wall_origin_us = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_micros() as u64;
        Self {
            wall_origin_us,
            origin: Instant::now(),
        }
    }

    /// Current stamp in microseconds since the Unix epoch
    #[inline]
    pub fn now_us(&self) -> u64 {
        self.wall_origin_us + self.origin.elapsed().as_micros() as u64
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a microsecond duration in human-readable form
///
/// # Examples
///
/// ```
/// use kvpulse::util::time::format_micros;
///
/// assert_eq!(format_micros(500), "500us");
/// assert_eq!(format_micros(2_500), "2.50ms");
/// assert_eq!(format_micros(5_000_000), "5.00s");
/// ```
pub fn format_micros(us: u64) -> String {
    if us < 1_000 {
        format!("{}us", us)
    } else if us < 1_000_000 {
        format!("{:.2}ms", us as f64 / 1_000.0)
    } else {
        format!("{:.2}s", us as f64 / 1_000_000.0)
    }
}

/// Format a byte count in human-readable form
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

    let b = bytes as f64;
    if b >= GIB {
        format!("{:.2} GiB", b / GIB)
    } else if b >= MIB {
        format!("{:.2} MiB", b / MIB)
    } else if b >= KIB {
        format!("{:.2} KiB", b / KIB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_monotonic() {
        let clock = SessionClock::new();
        let a = clock.now_us();
        thread::sleep(Duration::from_millis(2));
        let b = clock.now_us();
        assert!(b > a);
    }

    #[test]
    fn test_clock_never_zero() {
        // Wall anchoring puts every stamp far above zero
        let clock = SessionClock::new();
        assert!(clock.now_us() > 0);
    }

    #[test]
    fn test_clock_shared_across_threads() {
        let clock = std::sync::Arc::new(SessionClock::new());
        let before = clock.now_us();
        let c = clock.clone();
        let after = thread::spawn(move || c.now_us()).join().unwrap();
        assert!(after >= before);
    }

    #[test]
    fn test_format_micros() {
        assert_eq!(format_micros(0), "0us");
        assert_eq!(format_micros(999), "999us");
        assert_eq!(format_micros(1_500), "1.50ms");
        assert_eq!(format_micros(1_500_000), "1.50s");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MiB");
    }
}
