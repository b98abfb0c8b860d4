//! Focus classification and the event vocabulary of the watch loops.

/// Whether the target application currently holds input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    InFocus,
    NotInFocus,
}

/// Events flowing into the countdown state machine.
///
/// The classifier publishes a focus event every tick, so consumers must
/// treat repeats as idempotent. Relaunch outcomes are produced by the
/// relaunch loop itself after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    FocusGained,
    FocusLost,
    RelaunchSucceeded,
    RelaunchFailed,
}

impl FocusState {
    /// The event the classifier publishes for this state.
    pub fn as_event(self) -> WatchEvent {
        match self {
            FocusState::InFocus => WatchEvent::FocusGained,
            FocusState::NotInFocus => WatchEvent::FocusLost,
        }
    }
}

/// Classifies a foreground window title against the target substring.
///
/// A missing or empty title means nothing we care about holds focus.
/// Matching is case-sensitive containment.
pub fn classify_title(title: Option<&str>, target: &str) -> FocusState {
    match title {
        Some(text) if text.contains(target) => FocusState::InFocus,
        _ => FocusState::NotInFocus,
    }
}
