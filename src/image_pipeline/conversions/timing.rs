use std::time::{Duration, Instant};

use tracing::{info, info_span};

#[derive(Debug, Clone)]
pub struct StageTiming {
    pub stage: &'static str,
    pub duration: Duration,
}

/// Wall-clock cost of each stage of one frame.
#[derive(Debug, Default)]
pub struct StageTimings {
    stages: Vec<StageTiming>,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stage: &'static str, duration: Duration) {
        self.stages.push(StageTiming { stage, duration });
    }

    /// Runs `f` inside a `stage` span and records how long it took.
    pub fn time<T>(&mut self, stage: &'static str, f: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let value = info_span!("stage", name = stage).in_scope(f);
        self.record(stage, started.elapsed());
        value
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    /// Summed duration of every record named `stage`.
    pub fn stage(&self, stage: &str) -> Option<Duration> {
        let mut matching = self.stages.iter().filter(|s| s.stage == stage).peekable();
        matching.peek()?;
        Some(matching.map(|s| s.duration).sum())
    }

    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }

    pub fn log_summary(&self) {
        let total = self.total().as_secs_f64();
        for s in &self.stages {
            let share = if total > 0.0 {
                s.duration.as_secs_f64() / total * 100.0
            } else {
                0.0
            };
            info!(
                "{:<20} {:>10.3}ms ({:>5.1}%)",
                s.stage,
                s.duration.as_secs_f64() * 1000.0,
                share
            );
        }
        info!("{:<20} {:>10.3}ms", "total", total * 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_lookup_sums_repeats() {
        let mut timings = StageTimings::new();
        timings.record("convert", Duration::from_millis(2));
        timings.record("resize", Duration::from_millis(1));
        timings.record("convert", Duration::from_millis(3));

        assert_eq!(timings.stage("convert"), Some(Duration::from_millis(5)));
        assert_eq!(timings.stage("missing"), None);
        assert_eq!(timings.total(), Duration::from_millis(6));
        assert_eq!(timings.stages().len(), 3);
    }

    #[test]
    fn test_time_returns_closure_value() {
        let mut timings = StageTimings::new();
        let value = timings.time("work", || 41 + 1);
        assert_eq!(value, 42);
        assert!(timings.stage("work").is_some());
    }
}
