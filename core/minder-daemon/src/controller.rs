//! Relaunch countdown loop.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use minder_core::{classify_title, FocusState, RelaunchCountdown, WatchEvent};
use tracing::{debug, info, warn};

use crate::platform::{WindowAutomation, WindowSystem};

/// Single owner of the countdown state machine. Consumes the classifier's
/// events and performs relaunch attempts when the countdown fires.
pub struct RelaunchController<W: WindowSystem, A: WindowAutomation> {
    window: W,
    automation: A,
    window_title: String,
    events: Receiver<WatchEvent>,
    countdown: RelaunchCountdown,
    settle_delay: Duration,
}

impl<W: WindowSystem, A: WindowAutomation> RelaunchController<W, A> {
    pub fn new(
        window: W,
        automation: A,
        window_title: String,
        events: Receiver<WatchEvent>,
        countdown: RelaunchCountdown,
        settle_delay: Duration,
    ) -> Self {
        RelaunchController {
            window,
            automation,
            window_title,
            events,
            countdown,
            settle_delay,
        }
    }

    pub fn countdown(&self) -> &RelaunchCountdown {
        &self.countdown
    }

    /// Drains pending events and advances one armed second, firing a
    /// relaunch attempt when the countdown reaches its threshold.
    pub fn run_tick(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => self.countdown.apply(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if self.countdown.tick() {
            let outcome = self.attempt_relaunch();
            self.countdown.apply(outcome);
        } else if self.countdown.is_armed() {
            debug!(
                seconds_since_focus = self.countdown.seconds_since_focus(),
                timeout_secs = self.countdown.current_timeout_secs(),
                "waiting for focus"
            );
        }
    }

    /// One attempt: activation call, settle delay, focus re-check.
    fn attempt_relaunch(&self) -> WatchEvent {
        info!(
            target_title = %self.window_title,
            "neglect timeout reached, bringing target to foreground"
        );
        if let Err(err) = self.automation.bring_to_foreground(&self.window_title) {
            warn!(error = %err, "foreground activation failed");
        }

        // Give the window manager a moment before re-reading the title.
        thread::sleep(self.settle_delay);

        let title = self.window.foreground_title();
        match classify_title(title.as_deref(), &self.window_title) {
            FocusState::InFocus => {
                info!("target regained focus");
                WatchEvent::RelaunchSucceeded
            }
            FocusState::NotInFocus => {
                warn!("target did not regain focus, retrying on the short interval");
                WatchEvent::RelaunchFailed
            }
        }
    }
}
