//! Bounded counter with a deliberately slow increment.

use std::thread;
use std::time::Duration;

use thiserror::Error;

pub const MIN_COUNT: i32 = 0;
pub const MAX_COUNT: i32 = 10;

/// Delay used by the simulated slow increment.
pub const SLOW_INCREMENT_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CounterError {
    #[error("counter is already at its maximum ({})", MAX_COUNT)]
    AtMaximum,
    #[error("counter is already at its minimum ({})", MIN_COUNT)]
    AtMinimum,
    #[error("value {0} is outside the counter range 0..=10")]
    OutOfRange(i32),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterModel {
    count: i32,
}

impl CounterModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a previously saved value.
    pub fn with_count(count: i32) -> Result<Self, CounterError> {
        let mut model = Self::new();
        model.set_count(count)?;
        Ok(model)
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn can_increment(&self) -> bool {
        self.count < MAX_COUNT
    }

    pub fn can_decrement(&self) -> bool {
        self.count > MIN_COUNT
    }

    /// The value one step above `count`.
    pub fn next_value(count: i32) -> Result<i32, CounterError> {
        if count >= MAX_COUNT {
            Err(CounterError::AtMaximum)
        } else {
            Ok(count + 1)
        }
    }

    /// Blocking increment used off the UI thread.
    ///
    /// Sleeps for `delay` in ten slices, calling `progress` with 10..=100
    /// after each slice, then returns [`CounterModel::next_value`].
    pub fn simulate_slow_increment(
        count: i32,
        delay: Duration,
        mut progress: impl FnMut(u8),
    ) -> Result<i32, CounterError> {
        let slice = delay / 10;
        for step in 1..=10u8 {
            thread::sleep(slice);
            progress(step * 10);
        }
        Self::next_value(count)
    }

    pub fn increment(&mut self) -> Result<i32, CounterError> {
        self.count = Self::next_value(self.count)?;
        Ok(self.count)
    }

    pub fn decrement(&mut self) -> Result<i32, CounterError> {
        if !self.can_decrement() {
            return Err(CounterError::AtMinimum);
        }
        self.count -= 1;
        Ok(self.count)
    }

    pub fn set_count(&mut self, count: i32) -> Result<(), CounterError> {
        if !(MIN_COUNT..=MAX_COUNT).contains(&count) {
            return Err(CounterError::OutOfRange(count));
        }
        self.count = count;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.count = MIN_COUNT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let mut model = CounterModel::new();
        assert!(model.can_increment());
        assert!(!model.can_decrement());
        assert_eq!(model.decrement(), Err(CounterError::AtMinimum));

        for _ in MIN_COUNT..MAX_COUNT {
            model.increment().unwrap();
        }
        assert_eq!(model.count(), MAX_COUNT);
        assert!(!model.can_increment());
        assert!(model.can_decrement());
        assert_eq!(model.increment(), Err(CounterError::AtMaximum));

        model.reset();
        assert_eq!(model.count(), 0);
    }

    #[test]
    fn test_set_count_rejects_out_of_range() {
        assert_eq!(CounterModel::with_count(11), Err(CounterError::OutOfRange(11)));
        assert_eq!(CounterModel::with_count(-1), Err(CounterError::OutOfRange(-1)));
        assert_eq!(CounterModel::with_count(4).unwrap().count(), 4);
    }

    #[test]
    fn test_slow_increment_reports_progress() {
        let mut seen = Vec::new();
        let value =
            CounterModel::simulate_slow_increment(3, Duration::ZERO, |p| seen.push(p)).unwrap();

        assert_eq!(value, 4);
        assert_eq!(seen.first(), Some(&10));
        assert_eq!(seen.last(), Some(&100));
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_slow_increment_at_maximum_fails() {
        let result = CounterModel::simulate_slow_increment(MAX_COUNT, Duration::ZERO, |_| {});
        assert_eq!(result, Err(CounterError::AtMaximum));
    }
}
