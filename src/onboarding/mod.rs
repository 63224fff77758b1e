//! Onboarding: first-launch screens, goal selection, and the setup sequencer
//! that walks the user through each pending domain.
//!
//! The flow is Welcome → ProfileSetup → GoalSelection → GoalSetup → Main.
//! GoalSetup repeats pairing and wizard steps, one domain at a time in
//! priority order, until no selected domain is missing its profile.

pub mod manager;
pub mod model;
pub mod sequencer;
pub mod state;

pub use manager::{OnboardingManager, SelectionOutcome};
pub use model::{AppState, Tab, UserProfile};
pub use sequencer::{PRIORITY_CHAIN, PairingSession, SetupStep, next_step, pairing_candidates};
pub use state::Screen;
