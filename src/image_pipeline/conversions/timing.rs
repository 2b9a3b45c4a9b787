use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub duration: Duration,
}

/// Durations of the steps of one captured frame.
#[derive(Debug, Clone, Default)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
    step_map: HashMap<String, Duration>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, duration: Duration) {
        let name = name.into();
        *self.step_map.entry(name.clone()).or_insert(Duration::ZERO) += duration;
        self.steps.push(StepTiming { name, duration });
    }

    /// Run `f`, recording how long it took under `name`.
    pub fn time<T>(&mut self, name: &str, f: impl FnOnce() -> T) -> T {
        let timer = Timer::start(name);
        let out = f();
        let (name, duration) = timer.stop();
        self.add_step(name, duration);
        out
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.step_map.get(name).copied()
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn log_summary(&self, frame: u64) {
        let total = self.total_duration();
        for step in &self.steps {
            let percentage = if total.as_secs_f64() > 0.0 {
                (step.duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            } else {
                0.0
            };
            debug!(
                frame,
                "{:<14} {:>10.3}ms ({:>5.1}%)",
                step.name,
                step.duration.as_secs_f64() * 1000.0,
                percentage
            );
        }
        debug!(frame, "{:<14} {:>10.3}ms", "total", total.as_secs_f64() * 1000.0);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> (String, Duration) {
        (self.name, self.start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_accumulate_by_name() {
        let mut timings = PipelineTimings::new();
        timings.add_step("read_frame", Duration::from_millis(2));
        timings.add_step("demosaic", Duration::from_millis(3));
        timings.add_step("read_frame", Duration::from_millis(1));

        assert_eq!(timings.steps().len(), 3);
        assert_eq!(timings.get_step("read_frame"), Some(Duration::from_millis(3)));
        assert_eq!(timings.get_step("export"), None);
        assert_eq!(timings.total_duration(), Duration::from_millis(6));
    }

    #[test]
    fn test_time_records_closure() {
        let mut timings = PipelineTimings::new();
        let value = timings.time("work", || 21 * 2);

        assert_eq!(value, 42);
        assert!(timings.get_step("work").is_some());
    }
}
