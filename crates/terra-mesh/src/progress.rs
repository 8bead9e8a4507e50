//! Progress reporting sink for long-running mesh passes.

/// Receives checkpoints from mesh generation. Nothing it does can affect
/// the generated result.
pub trait Progress {
    /// A new task with `steps` total steps has started.
    fn progress_start(&mut self, steps: u32, info: &str);

    /// The current task is making progress that cannot be measured in steps.
    fn progress_stall(&mut self, reason: &str);

    /// The current task has reached `step`.
    fn progress_step(&mut self, step: u32);

    /// The current task has finished.
    fn progress_complete(&mut self, info: &str);
}

/// Discards all progress reports.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn progress_start(&mut self, _steps: u32, _info: &str) {}
    fn progress_stall(&mut self, _reason: &str) {}
    fn progress_step(&mut self, _step: u32) {}
    fn progress_complete(&mut self, _info: &str) {}
}

/// Forwards progress reports to `tracing`.
///
/// Steps are only logged when they cross a new tenth of the task, so a
/// million-vertex pass does not flood the log.
#[derive(Debug, Default)]
pub struct LogProgress {
    task: String,
    steps: u32,
    last_decile: u32,
}

impl Progress for LogProgress {
    fn progress_start(&mut self, steps: u32, info: &str) {
        self.task = info.to_string();
        self.steps = steps.max(1);
        self.last_decile = 0;
        tracing::info!("{info}");
    }

    fn progress_stall(&mut self, reason: &str) {
        tracing::debug!("{}: {reason}", self.task);
    }

    fn progress_step(&mut self, step: u32) {
        let decile = (step.min(self.steps) * 10) / self.steps;
        if decile > self.last_decile {
            self.last_decile = decile;
            tracing::debug!("{}: {}%", self.task, decile * 10);
        }
    }

    fn progress_complete(&mut self, info: &str) {
        tracing::info!("{info}");
    }
}

/// Maps raw work items onto a 0-100 progress scale.
#[derive(Debug)]
pub struct ProgressCounter {
    total: u64,
    done: u64,
}

impl ProgressCounter {
    /// Steps reported for a complete task.
    pub const HUNDRED_PERCENT: u32 = 100;

    pub fn new(total: usize) -> Self {
        Self {
            total: total.max(1) as u64,
            done: 0,
        }
    }

    /// Count one work item and report the new percentage.
    pub fn step(&mut self, progress: &mut dyn Progress) {
        self.done += 1;
        let pct = (u64::from(Self::HUNDRED_PERCENT) * self.done) / self.total;
        progress.progress_step(pct as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        steps: Vec<u32>,
    }

    impl Progress for Recorder {
        fn progress_start(&mut self, _steps: u32, _info: &str) {}
        fn progress_stall(&mut self, _reason: &str) {}
        fn progress_step(&mut self, step: u32) {
            self.steps.push(step);
        }
        fn progress_complete(&mut self, _info: &str) {}
    }

    #[test]
    fn test_counter_reaches_hundred() {
        let mut recorder = Recorder::default();
        let mut counter = ProgressCounter::new(4);
        for _ in 0..4 {
            counter.step(&mut recorder);
        }
        assert_eq!(recorder.steps, vec![25, 50, 75, 100]);
    }

    #[test]
    fn test_counter_handles_empty_task() {
        let mut recorder = Recorder::default();
        let mut counter = ProgressCounter::new(0);
        counter.step(&mut recorder);
        assert_eq!(recorder.steps, vec![100]);
    }
}
