//! Simulated device pairing scan.
//!
//! Candidates are resolved one after another with a fixed delay, and each
//! resolved device is pushed onto a channel. The scan task is owned by a
//! [`PairingHandle`]; cancelling or dropping the handle aborts the task, so
//! navigating away never leaves a timer behind.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::model::{ConnectedDevice, DeviceCandidate};

/// Default delay per device.
pub const DEFAULT_PAIRING_DELAY: Duration = Duration::from_millis(1500);

/// Owner of an in-flight pairing scan.
pub struct PairingHandle {
    rx: mpsc::Receiver<ConnectedDevice>,
    task: JoinHandle<()>,
    total: usize,
}

impl PairingHandle {
    /// Wait for the next device to connect. `None` once the scan is over.
    pub async fn next_device(&mut self) -> Option<ConnectedDevice> {
        self.rx.recv().await
    }

    /// Wait for every remaining device.
    pub async fn collect(mut self) -> Vec<ConnectedDevice> {
        let mut devices = Vec::with_capacity(self.total);
        while let Some(device) = self.rx.recv().await {
            devices.push(device);
        }
        devices
    }

    /// Number of devices requested.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Abort the scan. Devices already received stay valid.
    pub fn cancel(&self) {
        if !self.task.is_finished() {
            info!("Pairing scan cancelled");
        }
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PairingHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start pairing `candidates` sequentially, one per `delay`.
pub fn start_pairing(candidates: Vec<DeviceCandidate>, delay: Duration) -> PairingHandle {
    let total = candidates.len();
    let (tx, rx) = mpsc::channel(total.max(1));

    let task = tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        for candidate in candidates {
            tokio::time::sleep(delay).await;
            let battery = rng.gen_range(40..=100u8);
            let device = ConnectedDevice::connect(&candidate, Some(battery));
            debug!(device_id = %device.id, name = %device.name, kind = %device.kind, "Device paired");
            if tx.send(device).await.is_err() {
                // Receiver gone: nobody is waiting for the rest.
                return;
            }
        }
        info!(count = total, "Pairing scan complete");
    });

    PairingHandle { rx, task, total }
}
