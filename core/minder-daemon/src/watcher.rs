//! Lifecycle for the three watch loops.
//!
//! Each loop runs on its own thread under a [`ServiceHandle`] whose running
//! flag can be cleared at any time; [`Watcher::shutdown`] clears all three
//! flags first and then joins, so stopping costs about one tick interval in
//! total rather than one per loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use minder_core::{DayLedger, RelaunchCountdown, ResidencyTally, WatchConfig};
use tracing::{info, warn};

use crate::classifier::FocusClassifier;
use crate::controller::RelaunchController;
use crate::platform::{ProcessTable, WindowAutomation, WindowSystem};
use crate::residency::ResidencyAccumulator;

/// Tick cadence and relaunch settle delay, kept apart from [`WatchConfig`]
/// so tests can run the loops at millisecond speed.
#[derive(Debug, Clone)]
pub struct Timing {
    pub tick_interval: Duration,
    pub settle_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            tick_interval: Duration::from_secs(1),
            settle_delay: Duration::from_secs(1),
        }
    }
}

/// A periodic loop that can be stopped and joined.
pub struct ServiceHandle {
    name: &'static str,
    running: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

impl ServiceHandle {
    /// Spawns `tick` on its own thread, invoking it once per `interval`
    /// until the handle is stopped or `tick` returns false.
    pub fn spawn<F>(name: &'static str, interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let thread = thread::spawn(move || {
            while flag.load(Ordering::SeqCst) {
                if !tick() {
                    break;
                }
                thread::sleep(interval);
            }
        });
        ServiceHandle {
            name,
            running,
            thread,
        }
    }

    /// Signals the loop to stop after its current tick.
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Waits for the loop thread to finish.
    pub fn join(self) {
        if self.thread.join().is_err() {
            warn!(service = self.name, "watch thread panicked");
        }
    }

    /// Stops the loop and waits for it.
    pub fn stop(self) {
        self.request_stop();
        self.join();
    }
}

/// The three running watch loops.
pub struct Watcher {
    classifier: ServiceHandle,
    controller: ServiceHandle,
    accumulator: ServiceHandle,
}

impl Watcher {
    /// Wires the classifier, controller and accumulator together and starts
    /// all three loops.
    ///
    /// The classifier and the controller each get their own window handle;
    /// the controller re-checks focus itself right after an attempt instead
    /// of waiting a tick for the classifier's verdict.
    pub fn spawn<W, A, P>(
        config: &WatchConfig,
        ledger: DayLedger,
        tally: ResidencyTally,
        classifier_window: W,
        controller_window: W,
        automation: A,
        table: P,
        timing: Timing,
    ) -> Self
    where
        W: WindowSystem + 'static,
        A: WindowAutomation + 'static,
        P: ProcessTable + 'static,
    {
        let (events, event_feed) = mpsc::channel();

        let mut classifier =
            FocusClassifier::new(classifier_window, config.window_title.clone(), events);
        let mut controller = RelaunchController::new(
            controller_window,
            automation,
            config.window_title.clone(),
            event_feed,
            RelaunchCountdown::new(config.default_timeout_secs, config.retry_timeout_secs),
            timing.settle_delay,
        );
        let mut accumulator =
            ResidencyAccumulator::new(table, config.process_name.clone(), ledger, tally);

        info!(
            tick_interval_ms = timing.tick_interval.as_millis() as u64,
            "starting watch loops"
        );
        Watcher {
            classifier: ServiceHandle::spawn("focus-classifier", timing.tick_interval, move || {
                classifier.run_tick()
            }),
            controller: ServiceHandle::spawn(
                "relaunch-controller",
                timing.tick_interval,
                move || {
                    controller.run_tick();
                    true
                },
            ),
            accumulator: ServiceHandle::spawn(
                "residency-accumulator",
                timing.tick_interval,
                move || {
                    accumulator.run_tick();
                    true
                },
            ),
        }
    }

    /// Stops every loop and joins their threads.
    pub fn shutdown(self) {
        info!("stopping watch loops");
        self.classifier.request_stop();
        self.controller.request_stop();
        self.accumulator.request_stop();
        self.classifier.join();
        self.controller.join();
        self.accumulator.join();
    }
}
