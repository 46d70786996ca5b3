/// Countdown started after completing a set.
///
/// The timer does not own a clock: an external caller invokes [`tick`] once
/// per elapsed second while the timer is running.
///
/// [`tick`]: RestTimer::tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RestTimer {
    active: bool,
    remaining: u32,
}

impl RestTimer {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Remaining time in seconds. Zero when the timer is stopped.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Starts a countdown of the given number of seconds. Starting with zero
    /// seconds leaves the timer stopped.
    pub fn start(&mut self, seconds: u32) {
        if seconds == 0 {
            self.stop();
        } else {
            self.active = true;
            self.remaining = seconds;
        }
    }

    /// Stops the countdown. Safe to call on an already stopped timer.
    pub fn stop(&mut self) {
        self.active = false;
        self.remaining = 0;
    }

    /// Advances the countdown by one second. A no-op while stopped.
    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        if self.remaining <= 1 {
            self.stop();
        } else {
            self.remaining -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_countdown() {
        let mut timer = RestTimer::default();
        timer.start(90);
        assert!(timer.is_active());
        assert_eq!(timer.remaining(), 90);

        for _ in 0..89 {
            timer.tick();
        }
        assert!(timer.is_active());
        assert_eq!(timer.remaining(), 1);

        timer.tick();
        assert!(!timer.is_active());
        assert_eq!(timer.remaining(), 0);

        timer.tick();
        assert!(!timer.is_active());
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_start_with_zero_seconds() {
        let mut timer = RestTimer::default();
        timer.start(0);
        assert!(!timer.is_active());
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_restart_replaces_countdown() {
        let mut timer = RestTimer::default();
        timer.start(90);
        timer.tick();
        timer.start(60);
        assert!(timer.is_active());
        assert_eq!(timer.remaining(), 60);
    }

    #[test]
    fn test_stop_is_always_safe() {
        let mut timer = RestTimer::default();
        timer.stop();
        assert!(!timer.is_active());
        timer.start(30);
        timer.stop();
        assert!(!timer.is_active());
        assert_eq!(timer.remaining(), 0);
        timer.stop();
        assert!(!timer.is_active());
    }

    #[test]
    fn test_tick_while_stopped_is_noop() {
        let mut timer = RestTimer::default();
        timer.tick();
        assert_eq!(timer, RestTimer::default());
    }
}
