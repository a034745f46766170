//! A simple stopwatch used to time requests for the logs.
use std::{
    fmt,
    time::{Duration, Instant},
};

/// Measures the wall clock time since it was started.
#[derive(Debug, Clone, Copy)]
pub struct StopWatch {
    started: Instant,
}
impl StopWatch {
    /// Create a stopwatch that is already running.
    pub fn start_new() -> Self {
        Self { started: Instant::now() }
    }
    /// The time that has passed since the stopwatch started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Shows the elapsed time as milliseconds, or seconds once past a second.
impl fmt::Display for StopWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elapsed = self.elapsed();
        match elapsed.as_secs() {
            0 => write!(f, "{}ms", elapsed.as_millis()),
            _ => write!(f, "{:.3}s", elapsed.as_secs_f64()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed() {
        let stopwatch = StopWatch::start_new();
        std::thread::sleep(Duration::from_millis(5));
        assert!(stopwatch.elapsed() >= Duration::from_millis(5));
        assert!(stopwatch.to_string().ends_with("ms"));
    }
}
