//! Single background task offloaded from the GUI thread.
//!
//! The worker never touches application state. It reports back through a
//! channel that the GUI thread drains once per frame, sending exactly one
//! `Result` or `Error` and always a final `Finished`.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use eframe::egui;
use tracing::{debug, warn};

/// Message delivered from the worker to the GUI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent<T> {
    /// Percentage in `0..=100`; only sent when progress reporting is enabled
    Progress(u8),
    Result(T),
    Error(String),
    Finished,
}

/// Options every task is started with.
#[derive(Clone, Default)]
pub struct TaskOptions {
    /// Forward progress updates to the GUI thread
    pub report_progress: bool,
    /// Context to wake when an event is sent
    pub repaint: Option<egui::Context>,
}

/// Handle given to the task body for reporting progress.
///
/// Reporting is a no-op unless the task was started with
/// `report_progress` set.
pub struct TaskProgress<T> {
    sender: Option<Sender<TaskEvent<T>>>,
    repaint: Option<egui::Context>,
}

impl<T> TaskProgress<T> {
    pub fn report(&self, percent: u8) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(TaskEvent::Progress(percent.min(100)));
            if let Some(ctx) = &self.repaint {
                ctx.request_repaint();
            }
        }
    }
}

/// Runs one task at a time on a worker thread.
pub struct BackgroundTask<T> {
    name: &'static str,
    receiver: Option<Receiver<TaskEvent<T>>>,
}

impl<T: Send + 'static> BackgroundTask<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            receiver: None,
        }
    }

    /// True from `start` until `Finished` has been drained by `poll`.
    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }

    /// Starts `work` on a new thread. Returns false if a run is still in flight.
    pub fn start<F>(&mut self, options: TaskOptions, work: F) -> bool
    where
        F: FnOnce(&TaskProgress<T>) -> anyhow::Result<T> + Send + 'static,
    {
        if self.is_running() {
            warn!(task = self.name, "task is already running");
            return false;
        }

        let (sender, receiver) = channel();
        self.receiver = Some(receiver);

        let name = self.name;
        let progress = TaskProgress {
            sender: options.report_progress.then(|| sender.clone()),
            repaint: options.repaint.clone(),
        };
        let repaint = options.repaint;

        thread::spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| work(&progress)));
            let event = match outcome {
                Ok(Ok(value)) => TaskEvent::Result(value),
                Ok(Err(err)) => TaskEvent::Error(format!("{err:#}")),
                Err(payload) => TaskEvent::Error(panic_message(payload.as_ref())),
            };

            let _ = sender.send(event);
            let _ = sender.send(TaskEvent::Finished);
            debug!(task = name, "background task finished");

            // Notify GUI thread to repaint
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });

        debug!(task = self.name, "background task started");
        true
    }

    /// Drains every event received since the last call.
    ///
    /// After `Finished` is returned the task is idle again.
    pub fn poll(&mut self) -> Vec<TaskEvent<T>> {
        let Some(receiver) = &self.receiver else {
            return Vec::new();
        };

        let mut events = Vec::new();
        let mut disconnected = false;
        loop {
            match receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        if events.iter().any(|e| matches!(e, TaskEvent::Finished)) {
            self.receiver = None;
        } else if disconnected {
            // The worker died without reporting
            self.receiver = None;
            events.push(TaskEvent::Error(format!("task '{}' stopped unexpectedly", self.name)));
            events.push(TaskEvent::Finished);
        }
        events
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("task panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("task panicked: {s}")
    } else {
        "task panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn drain<T: Send + 'static>(task: &mut BackgroundTask<T>) -> Vec<TaskEvent<T>> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut all = Vec::new();
        while task.is_running() && Instant::now() < deadline {
            all.extend(task.poll());
            thread::sleep(Duration::from_millis(1));
        }
        all
    }

    #[test]
    fn test_idle_task_has_no_events() {
        let mut task: BackgroundTask<i32> = BackgroundTask::new("idle");
        assert!(!task.is_running());
        assert!(task.poll().is_empty());
    }

    #[test]
    fn test_result_then_finished() {
        let mut task = BackgroundTask::new("ok");
        assert!(task.start(TaskOptions::default(), |_| Ok(41 + 1)));

        let events = drain(&mut task);
        assert_eq!(events, vec![TaskEvent::Result(42), TaskEvent::Finished]);
        assert!(!task.is_running());
    }

    #[test]
    fn test_error_then_finished() {
        let mut task: BackgroundTask<i32> = BackgroundTask::new("err");
        task.start(TaskOptions::default(), |_| Err(anyhow::anyhow!("boom")));

        let events = drain(&mut task);
        assert_eq!(events, vec![TaskEvent::Error("boom".into()), TaskEvent::Finished]);
    }

    #[test]
    fn test_panic_is_reported_as_error() {
        let mut task: BackgroundTask<i32> = BackgroundTask::new("panic");
        task.start(TaskOptions::default(), |_| panic!("kaput"));

        let events = drain(&mut task);
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], TaskEvent::Error(msg) if msg.contains("kaput")));
        assert_eq!(events[1], TaskEvent::Finished);
    }

    #[test]
    fn test_progress_only_when_requested() {
        let mut quiet = BackgroundTask::new("quiet");
        quiet.start(TaskOptions::default(), |p| {
            p.report(50);
            Ok(())
        });
        assert!(!drain(&mut quiet).iter().any(|e| matches!(e, TaskEvent::Progress(_))));

        let mut loud = BackgroundTask::new("loud");
        let options = TaskOptions {
            report_progress: true,
            ..TaskOptions::default()
        };
        loud.start(options, |p| {
            p.report(50);
            p.report(250);
            Ok(())
        });
        let events = drain(&mut loud);
        assert_eq!(
            events,
            vec![
                TaskEvent::Progress(50),
                TaskEvent::Progress(100),
                TaskEvent::Result(()),
                TaskEvent::Finished
            ]
        );
    }

    #[test]
    fn test_second_start_rejected_while_running() {
        let mut task = BackgroundTask::new("busy");
        let (release_tx, release_rx) = channel::<()>();
        assert!(task.start(TaskOptions::default(), move |_| {
            let _ = release_rx.recv();
            Ok(1)
        }));
        assert!(!task.start(TaskOptions::default(), |_| Ok(2)));

        release_tx.send(()).unwrap();
        assert_eq!(drain(&mut task), vec![TaskEvent::Result(1), TaskEvent::Finished]);
        assert!(task.start(TaskOptions::default(), |_| Ok(3)));
    }
}
