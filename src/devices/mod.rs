//! Devices: connected device models, simulated pairing, and live sampling.

pub mod model;
pub mod pairing;
pub mod sampler;

pub use model::{
    ConnectedDevice, DeviceCandidate, DeviceKind, DeviceStatus, Equipment, PairingOutcome,
    TrackingSource,
};
pub use pairing::{DEFAULT_PAIRING_DELAY, PairingHandle, start_pairing};
pub use sampler::{Reading, SampleKind, SamplerHandle, start_sampler};
