//! Cooperative scheduler
//!
//! The foreground loop calls [`Scheduler::service`] on every iteration and
//! from inside the blocking byte I/O helpers. Each pass checks the period
//! due-flags in fast→medium→slow order, runs the registered housekeeping
//! action for any flag that is set, and clears that flag after the action
//! returns. A flag set while its action runs counts as serviced for that
//! pass; it is not run twice.
//!
//! Housekeeping actions must be short and non-blocking. They never receive
//! the console, so they cannot reach the blocking I/O helpers that pump
//! this scheduler; as a second line of defense a pass that re-enters
//! `service` returns immediately.

use crate::tick::Period;

/// Foreground view of the tick source.
///
/// Implementations mask the tick interrupt for the duration of each call
/// so that the multi-byte counter and the flags are read and cleared
/// without tearing.
pub trait Clock {
    /// Monotonic tick count (milliseconds at the default tick rate)
    fn millis(&self) -> u32;

    /// True when the given period is due for servicing
    fn is_due(&self, period: Period) -> bool;

    /// Mark the given period serviced
    fn clear_due(&self, period: Period);
}

/// Periodic housekeeping actions.
///
/// One method per period; the defaults do nothing, so an implementation
/// only overrides the cadences it uses. Actions run in the foreground
/// context with interrupts enabled.
pub trait Housekeeping {
    /// Runs once per fast period (default 5 ms)
    fn fast(&mut self) {}

    /// Runs once per medium period (default 50 ms)
    fn medium(&mut self) {}

    /// Runs once per slow period (default 500 ms)
    fn slow(&mut self) {}
}

/// No-op housekeeping for monitors with no background work.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTasks;

impl Housekeeping for NullTasks {}

/// Due-flag dispatcher.
///
/// Holds only the re-entrancy guard; the flags themselves live with the
/// tick state behind the [`Clock`] seam.
#[derive(Debug, Default)]
pub struct Scheduler {
    active: bool,
}

impl Scheduler {
    /// Create an idle scheduler
    pub const fn new() -> Self {
        Self { active: false }
    }

    /// Run one servicing pass.
    ///
    /// Executes each due period's action exactly once, clearing the flag
    /// after the action returns. Re-entrant calls (a housekeeping action
    /// somehow pumping the scheduler again) are no-ops.
    pub fn service<C: Clock, H: Housekeeping>(&mut self, clock: &C, tasks: &mut H) {
        if self.active {
            return;
        }
        self.active = true;

        if clock.is_due(Period::Fast) {
            tasks.fast();
            clock.clear_due(Period::Fast);
        }
        if clock.is_due(Period::Medium) {
            tasks.medium();
            clock.clear_due(Period::Medium);
        }
        if clock.is_due(Period::Slow) {
            tasks.slow();
            clock.clear_due(Period::Slow);
        }

        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick::{Period, TickState};
    use core::cell::RefCell;

    /// Host-side clock: tick state in a RefCell stands in for the
    /// interrupt-masked cell a target would use.
    struct TestClock {
        state: RefCell<TickState>,
    }

    impl TestClock {
        fn new() -> Self {
            Self {
                state: RefCell::new(TickState::default()),
            }
        }

        fn advance(&self, ticks: u32) {
            let mut state = self.state.borrow_mut();
            for _ in 0..ticks {
                state.tick();
            }
        }
    }

    impl Clock for TestClock {
        fn millis(&self) -> u32 {
            self.state.borrow().millis()
        }

        fn is_due(&self, period: Period) -> bool {
            self.state.borrow().is_due(period)
        }

        fn clear_due(&self, period: Period) {
            self.state.borrow_mut().clear_due(period);
        }
    }

    #[derive(Default)]
    struct CountingTasks {
        fast: u32,
        medium: u32,
        slow: u32,
    }

    impl Housekeeping for CountingTasks {
        fn fast(&mut self) {
            self.fast += 1;
        }
        fn medium(&mut self) {
            self.medium += 1;
        }
        fn slow(&mut self) {
            self.slow += 1;
        }
    }

    #[test]
    fn test_service_runs_due_actions_once() {
        let clock = TestClock::new();
        let mut sched = Scheduler::new();
        let mut tasks = CountingTasks::default();

        clock.advance(50);
        sched.service(&clock, &mut tasks);
        assert_eq!(tasks.fast, 1);
        assert_eq!(tasks.medium, 1);
        assert_eq!(tasks.slow, 0);
    }

    #[test]
    fn test_service_idempotent_without_new_ticks() {
        let clock = TestClock::new();
        let mut sched = Scheduler::new();
        let mut tasks = CountingTasks::default();

        clock.advance(500);
        sched.service(&clock, &mut tasks);
        let after_first = (tasks.fast, tasks.medium, tasks.slow);

        // No ticks in between: second pass must do nothing
        sched.service(&clock, &mut tasks);
        assert_eq!((tasks.fast, tasks.medium, tasks.slow), after_first);
    }

    #[test]
    fn test_service_counts_over_time() {
        let clock = TestClock::new();
        let mut sched = Scheduler::new();
        let mut tasks = CountingTasks::default();

        // Service after every tick for one second of simulated time
        for _ in 0..1000 {
            clock.advance(1);
            sched.service(&clock, &mut tasks);
        }
        assert_eq!(tasks.fast, 200);
        assert_eq!(tasks.medium, 20);
        assert_eq!(tasks.slow, 2);
    }

    #[test]
    fn test_stalled_foreground_drops_missed_periods() {
        let clock = TestClock::new();
        let mut sched = Scheduler::new();
        let mut tasks = CountingTasks::default();

        // 100 ms of ticks with no servicing: 20 fast periods elapse
        clock.advance(100);
        sched.service(&clock, &mut tasks);
        // ...but the sticky flag yields exactly one service
        assert_eq!(tasks.fast, 1);
        assert_eq!(tasks.medium, 1);
    }
}
