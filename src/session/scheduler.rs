//! Fixed-interval tick driver.
//!
//! Ticks and gestures are handled on one task, so a tick always runs to
//! completion before the next gesture is applied or the next tick starts.

use super::config::AppConfig;
use super::error::SessionError;
use super::input::Gesture;
use super::Session;
use crate::core::ScreenKind;
use crate::registry::Surface;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

/// Totals of one scheduler run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub gestures: u64,
    pub final_screen: Option<ScreenKind>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickScheduler {
    interval: Duration,
}

impl TickScheduler {
    /// Intervals below one millisecond are raised to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.tick_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Tick `session` until a [`Gesture::Quit`] arrives, the gesture
    /// channel closes, or a tick fails.
    pub async fn run<S: Surface>(
        &self,
        session: &mut Session<S>,
        gestures: &mut UnboundedReceiver<Gesture>,
    ) -> Result<RunSummary, SessionError> {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut summary = RunSummary::default();

        info!(interval_ms = self.interval.as_millis() as u64, "scheduler started");
        loop {
            tokio::select! {
                biased;

                _ = ticker.tick() => {
                    if let Err(e) = session.tick() {
                        error!(error = %e, tick = session.ticks(), "tick failed");
                        return Err(e);
                    }
                    summary.ticks += 1;
                }
                gesture = gestures.recv() => match gesture {
                    Some(Gesture::Quit) | None => break,
                    Some(gesture) => {
                        session.apply_gesture(&gesture);
                        summary.gestures += 1;
                    }
                },
            }
        }

        summary.final_screen = session.screen();
        info!(ticks = summary.ticks, gestures = summary.gestures, "scheduler stopped");
        Ok(summary)
    }
}
