//! Cosmetic progress ticker.
//!
//! The model API gives no visibility into synthesis progress, so the UI
//! shows a bar that advances on a fixed time schedule while the blocking
//! generate call runs. The reported percentage is decorative: it does not
//! track real synthesis progress and is capped at 99 until the call
//! returns, at which point 100 is emitted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Per-tick advance in percent.
const STEP_PERCENT: u8 = 10;

/// Default interval between ticks.
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(300);

/// Background ticker feeding percent updates to a callback.
pub struct ProgressTicker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    /// Starts a ticker with the default 300 ms schedule.
    pub fn start<F>(on_tick: F) -> Self
    where
        F: Fn(u8) + Send + 'static,
    {
        Self::start_with_interval(DEFAULT_TICK_INTERVAL, on_tick)
    }

    /// Starts a ticker with a custom interval (shortened in tests).
    pub fn start_with_interval<F>(interval: Duration, on_tick: F) -> Self
    where
        F: Fn(u8) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = std::thread::spawn(move || {
            let mut percent: u8 = 0;
            loop {
                std::thread::sleep(interval);
                if stop_flag.load(Ordering::SeqCst) {
                    break;
                }
                percent = (percent + STEP_PERCENT).min(99);
                on_tick(percent);
            }
            on_tick(100);
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stops the ticker and emits the final 100% tick.
    pub fn finish(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn collect_ticks(run_for: Duration, interval: Duration) -> Vec<u8> {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&ticks);
        let ticker = ProgressTicker::start_with_interval(interval, move |p| {
            sink.lock().unwrap().push(p);
        });
        std::thread::sleep(run_for);
        ticker.finish();
        let ticks = ticks.lock().unwrap().clone();
        ticks
    }

    #[test]
    fn ticker_advances_and_ends_at_100() {
        let ticks = collect_ticks(Duration::from_millis(50), Duration::from_millis(5));
        assert!(!ticks.is_empty());
        assert_eq!(*ticks.last().unwrap(), 100);
        // Monotone non-decreasing throughout.
        assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn ticker_caps_at_99_before_finish() {
        let ticks = collect_ticks(Duration::from_millis(200), Duration::from_millis(2));
        // Every tick except the final one stays below 100.
        let (last, body) = ticks.split_last().unwrap();
        assert_eq!(*last, 100);
        assert!(body.iter().all(|&p| p <= 99));
        assert!(body.iter().any(|&p| p == 99));
    }

    #[test]
    fn finishing_immediately_still_reports_completion() {
        let ticks = collect_ticks(Duration::ZERO, Duration::from_millis(50));
        assert_eq!(ticks, vec![100]);
    }
}
