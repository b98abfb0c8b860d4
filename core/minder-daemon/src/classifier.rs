//! Foreground-focus classification loop.

use std::sync::mpsc::Sender;

use minder_core::{classify_title, FocusState, WatchEvent};
use tracing::{debug, info};

use crate::platform::WindowSystem;

/// Samples the foreground window once per tick and publishes the resulting
/// focus event to the countdown owner.
pub struct FocusClassifier<W: WindowSystem> {
    window: W,
    window_title: String,
    events: Sender<WatchEvent>,
    last_state: Option<FocusState>,
}

impl<W: WindowSystem> FocusClassifier<W> {
    pub fn new(window: W, window_title: String, events: Sender<WatchEvent>) -> Self {
        FocusClassifier {
            window,
            window_title,
            events,
            last_state: None,
        }
    }

    /// Classifies the current foreground window and publishes the event.
    ///
    /// Returns false once the consumer hung up and the loop should stop.
    pub fn run_tick(&mut self) -> bool {
        let title = self.window.foreground_title();
        let state = classify_title(title.as_deref(), &self.window_title);

        if self.last_state != Some(state) {
            match state {
                FocusState::InFocus => {
                    info!(target_title = %self.window_title, "target window in focus");
                }
                FocusState::NotInFocus => {
                    info!(target_title = %self.window_title, "target window lost focus");
                }
            }
            self.last_state = Some(state);
        }
        debug!(state = ?state, title = ?title, "focus sample");

        self.events.send(state.as_event()).is_ok()
    }
}
