//! Simulated live readings (heart rate, step count).
//!
//! A timer overwrites a single "current reading" on a `watch` channel.
//! Readers always see the latest value; intermediate values are dropped.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

const HR_FLOOR: f64 = 45.0;
const HR_CEILING: f64 = 195.0;
const HR_MAX_STEP: f64 = 4.0;
const STEPS_MAX_PER_TICK: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleKind {
    HeartRate,
    Steps,
}

/// The latest simulated reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub kind: SampleKind,
    pub value: f64,
    pub at: DateTime<Utc>,
}

/// Owner of a running sampler. Dropping it stops the timer.
pub struct SamplerHandle {
    rx: watch::Receiver<Option<Reading>>,
    task: JoinHandle<()>,
}

impl SamplerHandle {
    /// Latest reading, if one has been produced.
    pub fn current(&self) -> Option<Reading> {
        *self.rx.borrow()
    }

    /// A receiver for awaiting changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Reading>> {
        self.rx.clone()
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start a sampler ticking every `interval`, starting from `baseline`
/// (resting heart rate or the current step count).
pub fn start_sampler(kind: SampleKind, interval: Duration, baseline: f64) -> SamplerHandle {
    let (tx, rx) = watch::channel(None);

    let task = tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut value = baseline;
        let mut ticker = tokio::time::interval(interval);
        // Skip immediate first tick
        ticker.tick().await;

        loop {
            ticker.tick().await;
            value = match kind {
                SampleKind::HeartRate => {
                    (value + rng.gen_range(-HR_MAX_STEP..=HR_MAX_STEP)).clamp(HR_FLOOR, HR_CEILING)
                }
                SampleKind::Steps => value + f64::from(rng.gen_range(0..=STEPS_MAX_PER_TICK)),
            };
            let reading = Reading {
                kind,
                value,
                at: Utc::now(),
            };
            debug!(kind = ?kind, value, "Sample");
            if tx.send(Some(reading)).is_err() {
                return;
            }
        }
    });

    SamplerHandle { rx, task }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn no_reading_before_first_tick() {
        let sampler = start_sampler(SampleKind::HeartRate, Duration::from_secs(3), 70.0);
        assert!(sampler.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn heart_rate_stays_in_range() {
        let sampler = start_sampler(SampleKind::HeartRate, Duration::from_secs(1), 70.0);
        let mut rx = sampler.subscribe();
        for _ in 0..20 {
            rx.changed().await.unwrap();
            let reading = (*rx.borrow()).unwrap();
            assert_eq!(reading.kind, SampleKind::HeartRate);
            assert!((HR_FLOOR..=HR_CEILING).contains(&reading.value));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn steps_never_decrease() {
        let sampler = start_sampler(SampleKind::Steps, Duration::from_secs(1), 1000.0);
        let mut rx = sampler.subscribe();
        let mut last = 1000.0;
        for _ in 0..10 {
            rx.changed().await.unwrap();
            let value = rx.borrow().unwrap().value;
            assert!(value >= last);
            last = value;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stop_closes_channel() {
        let sampler = start_sampler(SampleKind::Steps, Duration::from_secs(1), 0.0);
        let mut rx = sampler.subscribe();
        rx.changed().await.unwrap();
        sampler.stop();
        tokio::task::yield_now().await;
        assert!(rx.changed().await.is_err());
    }
}
