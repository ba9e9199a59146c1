//! Prometheus metrics (lock-free atomics).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    pub execute_total: AtomicU64,
    pub execute_success: AtomicU64,
    pub execute_runtime_error: AtomicU64,
    pub execute_bad_request: AtomicU64,

    // μs, max updated via CAS
    pub execute_duration_us_sum: AtomicU64,
    pub execute_duration_us_max: AtomicU64,

    pub challenges_signed: AtomicU64,
}

impl Metrics {
    const fn new() -> Self {
        Self {
            execute_total: AtomicU64::new(0),
            execute_success: AtomicU64::new(0),
            execute_runtime_error: AtomicU64::new(0),
            execute_bad_request: AtomicU64::new(0),
            execute_duration_us_sum: AtomicU64::new(0),
            execute_duration_us_max: AtomicU64::new(0),
            challenges_signed: AtomicU64::new(0),
        }
    }

    pub fn record_execute_duration(&self, start: Instant) {
        let us = start.elapsed().as_micros() as u64;
        self.execute_duration_us_sum.fetch_add(us, Ordering::Relaxed);
        let mut cur = self.execute_duration_us_max.load(Ordering::Relaxed);
        while us > cur {
            match self.execute_duration_us_max.compare_exchange_weak(
                cur,
                us,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => cur = actual,
            }
        }
    }

    /// Render in Prometheus text exposition format. Resets the max gauge.
    pub fn render(&self, uptime_secs: u64) -> String {
        let total = self.execute_total.load(Ordering::Relaxed);
        let success = self.execute_success.load(Ordering::Relaxed);
        let runtime_errors = self.execute_runtime_error.load(Ordering::Relaxed);
        let bad_requests = self.execute_bad_request.load(Ordering::Relaxed);
        let dur_sum = self.execute_duration_us_sum.load(Ordering::Relaxed);
        let dur_max = self.execute_duration_us_max.swap(0, Ordering::Relaxed);
        let challenges = self.challenges_signed.load(Ordering::Relaxed);

        let dur_sum_s = dur_sum as f64 / 1_000_000.0;
        let dur_max_s = dur_max as f64 / 1_000_000.0;

        format!(
            "\
# HELP agent_execute_total Execute requests received.\n\
# TYPE agent_execute_total counter\n\
agent_execute_total {total}\n\
# HELP agent_execute_success_total Executions answered with a dialog item.\n\
# TYPE agent_execute_success_total counter\n\
agent_execute_success_total {success}\n\
# HELP agent_execute_runtime_error_total Executions that failed inside the agent.\n\
# TYPE agent_execute_runtime_error_total counter\n\
agent_execute_runtime_error_total {runtime_errors}\n\
# HELP agent_execute_bad_request_total Execute requests with an unreadable body.\n\
# TYPE agent_execute_bad_request_total counter\n\
agent_execute_bad_request_total {bad_requests}\n\
# HELP agent_execute_duration_seconds_sum Total execute time (seconds).\n\
# TYPE agent_execute_duration_seconds_sum counter\n\
agent_execute_duration_seconds_sum {dur_sum_s:.6}\n\
# HELP agent_execute_duration_seconds_max Max execute time since last scrape (seconds).\n\
# TYPE agent_execute_duration_seconds_max gauge\n\
agent_execute_duration_seconds_max {dur_max_s:.6}\n\
# HELP agent_challenges_signed_total Challenge nonces signed.\n\
# TYPE agent_challenges_signed_total counter\n\
agent_challenges_signed_total {challenges}\n\
# HELP agent_uptime_seconds Seconds since start.\n\
# TYPE agent_uptime_seconds gauge\n\
agent_uptime_seconds {uptime_secs}\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_tracks_largest() {
        let m = Metrics::new();
        m.execute_duration_us_max.store(10, Ordering::Relaxed);
        let start = Instant::now() - std::time::Duration::from_millis(5);
        m.record_execute_duration(start);
        assert!(m.execute_duration_us_max.load(Ordering::Relaxed) >= 5_000);
    }

    #[test]
    fn test_render_resets_max() {
        let m = Metrics::new();
        m.execute_total.fetch_add(3, Ordering::Relaxed);
        m.execute_duration_us_max.store(1_500_000, Ordering::Relaxed);
        let out = m.render(7);
        assert!(out.contains("agent_execute_total 3\n"));
        assert!(out.contains("agent_execute_duration_seconds_max 1.500000\n"));
        assert!(out.contains("agent_uptime_seconds 7\n"));
        assert_eq!(m.execute_duration_us_max.load(Ordering::Relaxed), 0);
    }
}
