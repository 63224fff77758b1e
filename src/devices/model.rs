//! Connected device and equipment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of wearable or sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    ChestStrap,
    Smartwatch,
    FitnessBand,
    SleepSensor,
    SmartRing,
    Phone,
    SmartScale,
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ChestStrap => "chest_strap",
            Self::Smartwatch => "smartwatch",
            Self::FitnessBand => "fitness_band",
            Self::SleepSensor => "sleep_sensor",
            Self::SmartRing => "smart_ring",
            Self::Phone => "phone",
            Self::SmartScale => "smart_scale",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    #[default]
    Connected,
    Syncing,
    Disconnected,
}

/// A device offered on the pairing screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCandidate {
    pub name: String,
    pub kind: DeviceKind,
}

impl DeviceCandidate {
    pub fn new(name: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A paired device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedDevice {
    pub id: Uuid,
    pub name: String,
    pub kind: DeviceKind,
    pub status: DeviceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<u8>,
    pub last_sync: DateTime<Utc>,
}

impl ConnectedDevice {
    /// Mark `candidate` as connected now.
    pub fn connect(candidate: &DeviceCandidate, battery_level: Option<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: candidate.name.clone(),
            kind: candidate.kind,
            status: DeviceStatus::Connected,
            battery_level,
            last_sync: Utc::now(),
        }
    }
}

/// Where a domain's daily numbers come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingSource {
    #[default]
    Manual,
    Device,
}

impl TrackingSource {
    /// `Device` when at least one device was paired, otherwise manual logging.
    pub fn from_devices(devices: &[ConnectedDevice]) -> Self {
        if devices.is_empty() {
            Self::Manual
        } else {
            Self::Device
        }
    }
}

/// Strength training equipment available to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Bodyweight,
    Dumbbells,
    Barbell,
    Kettlebell,
    ResistanceBands,
    Machines,
    PullUpBar,
}

/// What the pairing/equipment step produced for one domain.
///
/// An empty list is a valid outcome (the user skipped); the wizard then
/// falls back to manual logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum PairingOutcome {
    Devices(Vec<ConnectedDevice>),
    Equipment(Vec<Equipment>),
}

impl PairingOutcome {
    /// The user skipped the step.
    pub fn skipped() -> Self {
        Self::Devices(Vec::new())
    }

    pub fn devices(&self) -> &[ConnectedDevice] {
        match self {
            Self::Devices(devices) => devices,
            Self::Equipment(_) => &[],
        }
    }

    pub fn equipment(&self) -> &[Equipment] {
        match self {
            Self::Equipment(items) => items,
            Self::Devices(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_copies_candidate() {
        let candidate = DeviceCandidate::new("Polar H10", DeviceKind::ChestStrap);
        let device = ConnectedDevice::connect(&candidate, Some(90));
        assert_eq!(device.name, "Polar H10");
        assert_eq!(device.kind, DeviceKind::ChestStrap);
        assert_eq!(device.status, DeviceStatus::Connected);
        assert_eq!(device.battery_level, Some(90));
    }

    #[test]
    fn skipped_outcome_is_empty() {
        let outcome = PairingOutcome::skipped();
        assert!(outcome.devices().is_empty());
        assert!(outcome.equipment().is_empty());
    }

    #[test]
    fn outcome_serde_is_tagged() {
        let outcome = PairingOutcome::Equipment(vec![Equipment::Dumbbells]);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "equipment");
        assert_eq!(json["items"][0], "dumbbells");
    }
}
