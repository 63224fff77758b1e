//! Per-goal domain profiles and their persisted containers.
//!
//! A domain profile's presence in its container is the only "setup
//! completed" signal for that domain.

pub mod cardio;
pub mod sleep;
pub mod steps;
pub mod strength;
pub mod weight_loss;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::devices::PairingOutcome;
use crate::error::StoreError;
use crate::goals::{GoalTarget, GoalType};
use crate::store::{BlobStore, Container};

pub use cardio::{CardioProfile, CardioState, WorkoutSession};
pub use sleep::{SleepEntry, SleepProfile, SleepState};
pub use steps::{StepsEntry, StepsProfile, StepsState};
pub use strength::{StrengthProfile, StrengthState};
pub use weight_loss::{MealLog, MealSlot, WeightLossProfile, WeightLossState};

/// A completed domain profile, tagged by its goal type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", content = "profile", rename_all = "snake_case")]
pub enum DomainProfile {
    WeightLoss(WeightLossProfile),
    CardioEndurance(CardioProfile),
    StrengthBuilding(StrengthProfile),
    SleepTracking(SleepProfile),
    DailySteps(StepsProfile),
}

impl DomainProfile {
    pub fn goal_type(&self) -> GoalType {
        match self {
            Self::WeightLoss(_) => GoalType::WeightLoss,
            Self::CardioEndurance(_) => GoalType::CardioEndurance,
            Self::StrengthBuilding(_) => GoalType::StrengthBuilding,
            Self::SleepTracking(_) => GoalType::SleepTracking,
            Self::DailySteps(_) => GoalType::DailySteps,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::WeightLoss(p) => p.id,
            Self::CardioEndurance(p) => p.id,
            Self::StrengthBuilding(p) => p.id,
            Self::SleepTracking(p) => p.id,
            Self::DailySteps(p) => p.id,
        }
    }

    /// User-customized goal target. Steps goals use the static table.
    pub fn goal_target(&self) -> Option<GoalTarget> {
        match self {
            Self::WeightLoss(p) => Some(p.goal_target()),
            Self::CardioEndurance(p) => Some(p.goal_target()),
            Self::StrengthBuilding(p) => Some(p.goal_target()),
            Self::SleepTracking(p) => Some(p.goal_target()),
            Self::DailySteps(_) => None,
        }
    }
}

/// The five domain containers.
///
/// Each container is independent; a write to one never reads or locks
/// another. Only the onboarding orchestrator reads across all of them.
#[derive(Clone)]
pub struct DomainStores {
    pub weight_loss: Arc<Container<WeightLossState>>,
    pub cardio: Arc<Container<CardioState>>,
    pub strength: Arc<Container<StrengthState>>,
    pub sleep: Arc<Container<SleepState>>,
    pub steps: Arc<Container<StepsState>>,
}

impl DomainStores {
    pub async fn load(store: Arc<dyn BlobStore>) -> Result<Self, StoreError> {
        Ok(Self {
            weight_loss: Container::load(Arc::clone(&store)).await?,
            cardio: Container::load(Arc::clone(&store)).await?,
            strength: Container::load(Arc::clone(&store)).await?,
            sleep: Container::load(Arc::clone(&store)).await?,
            steps: Container::load(store).await?,
        })
    }

    /// The stored profile for `goal_type`, if its setup is complete.
    pub async fn profile(&self, goal_type: GoalType) -> Option<DomainProfile> {
        match goal_type {
            GoalType::WeightLoss => self
                .weight_loss
                .read(|s| s.profile.clone().map(DomainProfile::WeightLoss))
                .await,
            GoalType::CardioEndurance => self
                .cardio
                .read(|s| s.profile.clone().map(DomainProfile::CardioEndurance))
                .await,
            GoalType::StrengthBuilding => self
                .strength
                .read(|s| s.profile.clone().map(DomainProfile::StrengthBuilding))
                .await,
            GoalType::SleepTracking => self
                .sleep
                .read(|s| s.profile.clone().map(DomainProfile::SleepTracking))
                .await,
            GoalType::DailySteps => self
                .steps
                .read(|s| s.profile.clone().map(DomainProfile::DailySteps))
                .await,
            GoalType::WorkoutConsistency => None,
        }
    }

    /// Whether `goal_type` has a completed profile.
    pub async fn is_configured(&self, goal_type: GoalType) -> bool {
        match goal_type {
            GoalType::WeightLoss => self.weight_loss.read(|s| s.profile.is_some()).await,
            GoalType::CardioEndurance => self.cardio.read(|s| s.profile.is_some()).await,
            GoalType::StrengthBuilding => self.strength.read(|s| s.profile.is_some()).await,
            GoalType::SleepTracking => self.sleep.read(|s| s.profile.is_some()).await,
            GoalType::DailySteps => self.steps.read(|s| s.profile.is_some()).await,
            GoalType::WorkoutConsistency => false,
        }
    }

    /// Goal types that have a completed profile.
    pub async fn configured(&self) -> Vec<GoalType> {
        let mut configured = Vec::new();
        for goal_type in GoalType::ALL {
            if self.is_configured(goal_type).await {
                configured.push(goal_type);
            }
        }
        configured
    }

    /// Store a completed profile, plus the devices or equipment chosen on the
    /// pairing step, in that domain's container only.
    ///
    /// An existing profile is never replaced; returns `false` in that case.
    pub async fn save_profile(
        &self,
        profile: DomainProfile,
        pairing: Option<PairingOutcome>,
    ) -> Result<bool, StoreError> {
        let goal_type = profile.goal_type();
        let pairing = pairing.unwrap_or_else(PairingOutcome::skipped);
        let saved = match profile {
            DomainProfile::WeightLoss(p) => {
                self.weight_loss
                    .update(|s| store_once(&mut s.profile, p))
                    .await?
            }
            DomainProfile::CardioEndurance(p) => {
                self.cardio
                    .update(|s| {
                        let saved = store_once(&mut s.profile, p);
                        if saved {
                            s.devices.extend_from_slice(pairing.devices());
                        }
                        saved
                    })
                    .await?
            }
            DomainProfile::StrengthBuilding(p) => {
                self.strength
                    .update(|s| {
                        let saved = store_once(&mut s.profile, p);
                        if saved {
                            s.equipment.extend_from_slice(pairing.equipment());
                        }
                        saved
                    })
                    .await?
            }
            DomainProfile::SleepTracking(p) => {
                self.sleep
                    .update(|s| {
                        let saved = store_once(&mut s.profile, p);
                        if saved {
                            s.devices.extend_from_slice(pairing.devices());
                        }
                        saved
                    })
                    .await?
            }
            DomainProfile::DailySteps(p) => {
                self.steps
                    .update(|s| {
                        let saved = store_once(&mut s.profile, p);
                        if saved {
                            s.devices.extend_from_slice(pairing.devices());
                        }
                        saved
                    })
                    .await?
            }
        };
        if saved {
            info!(goal = %goal_type, "Domain profile saved");
        }
        Ok(saved)
    }
}

fn store_once<T>(slot: &mut Option<T>, profile: T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(profile);
    true
}
