//! Countdown state machine deciding when a relaunch attempt fires.

use crate::focus::WatchEvent;

/// Tracks how long the target has been out of focus and which threshold the
/// next relaunch attempt fires at.
///
/// Owned exclusively by the relaunch loop; every other loop talks to it
/// through [`WatchEvent`]s. Seconds are advanced only by [`tick`], one call
/// per armed second.
///
/// [`tick`]: RelaunchCountdown::tick
#[derive(Debug, Clone)]
pub struct RelaunchCountdown {
    default_timeout_secs: u64,
    retry_timeout_secs: u64,
    armed: bool,
    seconds_since_focus: u64,
    current_timeout_secs: u64,
}

impl RelaunchCountdown {
    pub fn new(default_timeout_secs: u64, retry_timeout_secs: u64) -> Self {
        RelaunchCountdown {
            default_timeout_secs,
            retry_timeout_secs,
            armed: false,
            seconds_since_focus: 0,
            current_timeout_secs: default_timeout_secs,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn seconds_since_focus(&self) -> u64 {
        self.seconds_since_focus
    }

    pub fn current_timeout_secs(&self) -> u64 {
        self.current_timeout_secs
    }

    /// Applies one event to the countdown.
    pub fn apply(&mut self, event: WatchEvent) {
        match event {
            WatchEvent::FocusGained | WatchEvent::RelaunchSucceeded => {
                self.armed = false;
                self.seconds_since_focus = 0;
                self.current_timeout_secs = self.default_timeout_secs;
            }
            WatchEvent::FocusLost => {
                // Counters stay put; only tick() advances them.
                self.armed = true;
            }
            WatchEvent::RelaunchFailed => {
                self.current_timeout_secs = self.retry_timeout_secs;
            }
        }
    }

    /// Advances one second of armed time.
    ///
    /// Returns true when the count reaches the current timeout; the counter
    /// restarts at zero so the following period is counted in full.
    pub fn tick(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.seconds_since_focus += 1;
        if self.seconds_since_focus == self.current_timeout_secs {
            self.seconds_since_focus = 0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed_countdown(timeout: u64) -> RelaunchCountdown {
        let mut countdown = RelaunchCountdown::new(timeout, 5);
        countdown.apply(WatchEvent::FocusLost);
        countdown
    }

    #[test]
    fn starts_disarmed_at_the_default_timeout() {
        let countdown = RelaunchCountdown::new(1200, 5);
        assert!(!countdown.is_armed());
        assert_eq!(countdown.seconds_since_focus(), 0);
        assert_eq!(countdown.current_timeout_secs(), 1200);
    }

    #[test]
    fn disarmed_ticks_never_fire() {
        let mut countdown = RelaunchCountdown::new(3, 5);
        for _ in 0..10 {
            assert!(!countdown.tick());
        }
        assert_eq!(countdown.seconds_since_focus(), 0);
    }

    #[test]
    fn fires_exactly_at_the_timeout_tick() {
        let mut countdown = armed_countdown(4);
        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert!(countdown.tick());
        assert_eq!(countdown.seconds_since_focus(), 0);
    }

    #[test]
    fn fires_once_per_timeout_period() {
        let mut countdown = armed_countdown(3);
        let fired: Vec<bool> = (0..9).map(|_| countdown.tick()).collect();
        assert_eq!(
            fired,
            vec![false, false, true, false, false, true, false, false, true]
        );
    }

    #[test]
    fn focus_gained_resets_counters_regardless_of_prior_state() {
        let mut countdown = armed_countdown(100);
        for _ in 0..42 {
            countdown.tick();
        }
        countdown.apply(WatchEvent::RelaunchFailed);
        assert_eq!(countdown.current_timeout_secs(), 5);

        countdown.apply(WatchEvent::FocusGained);
        assert!(!countdown.is_armed());
        assert_eq!(countdown.seconds_since_focus(), 0);
        assert_eq!(countdown.current_timeout_secs(), 100);
    }

    #[test]
    fn repeated_focus_lost_does_not_restart_the_count() {
        let mut countdown = armed_countdown(10);
        for _ in 0..7 {
            countdown.tick();
        }
        countdown.apply(WatchEvent::FocusLost);
        assert_eq!(countdown.seconds_since_focus(), 7);
        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert!(countdown.tick());
    }

    #[test]
    fn failed_attempt_moves_the_threshold_to_retry() {
        let mut countdown = armed_countdown(3);
        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert!(countdown.tick());

        countdown.apply(WatchEvent::RelaunchFailed);
        assert!(countdown.is_armed());
        assert_eq!(countdown.current_timeout_secs(), 5);

        for _ in 0..4 {
            assert!(!countdown.tick());
        }
        assert!(countdown.tick());
    }

    #[test]
    fn successful_attempt_restores_the_default_and_disarms() {
        let mut countdown = armed_countdown(3);
        while !countdown.tick() {}

        countdown.apply(WatchEvent::RelaunchSucceeded);
        assert!(!countdown.is_armed());
        assert_eq!(countdown.seconds_since_focus(), 0);
        assert_eq!(countdown.current_timeout_secs(), 3);
        assert!(!countdown.tick());
    }

    #[test]
    fn rearming_after_focus_counts_from_zero() {
        let mut countdown = armed_countdown(5);
        for _ in 0..3 {
            countdown.tick();
        }
        countdown.apply(WatchEvent::FocusGained);
        countdown.apply(WatchEvent::FocusLost);

        for _ in 0..4 {
            assert!(!countdown.tick());
        }
        assert!(countdown.tick());
    }

    #[test]
    fn twenty_minutes_unfocused_fires_a_single_attempt() {
        let mut countdown = armed_countdown(1200);
        let mut attempts = 0;
        for _ in 0..1200 {
            if countdown.tick() {
                attempts += 1;
            }
        }
        assert_eq!(attempts, 1);

        countdown.apply(WatchEvent::RelaunchFailed);
        assert!(countdown.is_armed());
        assert_eq!(countdown.current_timeout_secs(), 5);
    }

    #[test]
    fn twenty_minute_attempt_that_succeeds_reverts_to_default() {
        let mut countdown = armed_countdown(1200);
        for _ in 0..1199 {
            assert!(!countdown.tick());
        }
        assert!(countdown.tick());

        countdown.apply(WatchEvent::RelaunchSucceeded);
        assert!(!countdown.is_armed());
        assert_eq!(countdown.current_timeout_secs(), 1200);
    }
}
