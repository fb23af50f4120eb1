//! Counter view model with a background increment.

use std::time::Duration;

use eframe::egui;
use rmvvm::models::counter::SLOW_INCREMENT_DELAY;
use rmvvm::models::CounterModel;
use tracing::{info, warn};

use crate::io::{BackgroundTask, TaskEvent, TaskOptions};

/// Presentation state for the counter view.
///
/// Increments run on a worker thread against a snapshot of the count; the
/// result is applied here, on the GUI thread, when `poll` drains it.
pub struct CounterViewModel {
    model: CounterModel,
    task: BackgroundTask<i32>,
    delay: Duration,
    progress: Option<u8>,
    last_error: Option<String>,
}

impl Default for CounterViewModel {
    fn default() -> Self {
        Self::new(CounterModel::new())
    }
}

impl CounterViewModel {
    pub fn new(model: CounterModel) -> Self {
        Self {
            model,
            task: BackgroundTask::new("counter-increment"),
            delay: SLOW_INCREMENT_DELAY,
            progress: None,
            last_error: None,
        }
    }

    /// Overrides the simulated increment delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    // ===== Queries =====

    pub fn count(&self) -> i32 {
        self.model.count()
    }

    pub fn is_busy(&self) -> bool {
        self.task.is_running()
    }

    pub fn progress(&self) -> Option<u8> {
        self.progress
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn can_increment(&self) -> bool {
        !self.is_busy() && self.model.can_increment()
    }

    pub fn can_decrement(&self) -> bool {
        !self.is_busy() && self.model.can_decrement()
    }

    // ===== Commands =====

    /// Starts the slow increment on a worker thread.
    ///
    /// Returns false when an increment is already in flight.
    pub fn request_increment(&mut self, repaint: Option<egui::Context>) -> bool {
        let snapshot = self.model.count();
        let delay = self.delay;
        let options = TaskOptions {
            report_progress: true,
            repaint,
        };

        let started = self.task.start(options, move |progress| {
            let value = CounterModel::simulate_slow_increment(snapshot, delay, |p| progress.report(p))?;
            Ok(value)
        });
        if started {
            self.progress = Some(0);
            self.last_error = None;
        }
        started
    }

    pub fn decrement(&mut self) {
        if self.is_busy() {
            return;
        }
        match self.model.decrement() {
            Ok(count) => {
                info!(count, "counter decremented");
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err.to_string()),
        }
    }

    pub fn reset(&mut self) {
        if self.is_busy() {
            return;
        }
        self.model.reset();
        self.last_error = None;
        info!("counter reset");
    }

    /// Applies finished background work. Call once per frame.
    pub fn poll(&mut self) {
        for event in self.task.poll() {
            match event {
                TaskEvent::Progress(p) => self.progress = Some(p),
                TaskEvent::Result(value) => match self.model.set_count(value) {
                    Ok(()) => info!(count = value, "counter incremented"),
                    Err(err) => self.last_error = Some(err.to_string()),
                },
                TaskEvent::Error(msg) => {
                    warn!(error = %msg, "counter increment failed");
                    self.last_error = Some(msg);
                }
                TaskEvent::Finished => self.progress = None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmvvm::models::MAX_COUNT;
    use std::time::Instant;

    fn settle(vm: &mut CounterViewModel) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while vm.is_busy() && Instant::now() < deadline {
            vm.poll();
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_initial_button_states() {
        let vm = CounterViewModel::default();
        assert_eq!(vm.count(), 0);
        assert!(vm.can_increment());
        assert!(!vm.can_decrement());
        assert!(!vm.is_busy());
    }

    #[test]
    fn test_background_increment_applies_on_poll() {
        let mut vm = CounterViewModel::default().with_delay(Duration::ZERO);

        assert!(vm.request_increment(None));
        assert!(vm.is_busy());
        assert!(!vm.can_increment());
        assert!(!vm.request_increment(None));

        settle(&mut vm);
        assert_eq!(vm.count(), 1);
        assert_eq!(vm.progress(), None);
        assert!(vm.can_decrement());
    }

    #[test]
    fn test_increment_at_maximum_reports_error() {
        let model = CounterModel::with_count(MAX_COUNT).unwrap();
        let mut vm = CounterViewModel::new(model).with_delay(Duration::ZERO);

        assert!(!vm.can_increment());
        vm.request_increment(None);
        settle(&mut vm);

        assert_eq!(vm.count(), MAX_COUNT);
        assert!(vm.last_error().is_some());
    }

    #[test]
    fn test_decrement_and_reset() {
        let mut vm = CounterViewModel::new(CounterModel::with_count(3).unwrap());
        vm.decrement();
        assert_eq!(vm.count(), 2);
        vm.reset();
        assert_eq!(vm.count(), 0);
        vm.decrement();
        assert_eq!(vm.count(), 0);
        assert!(vm.last_error().is_some());
    }
}
