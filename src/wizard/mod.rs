//! Per-domain setup wizards.
//!
//! Each wizard is a linear step machine over a typed draft. Committing from
//! the review step yields a [`DomainProfile`]; the wizard never persists it.

pub mod cardio;
pub mod sleep;
pub mod state;
pub mod steps;
pub mod strength;
pub mod weight_loss;

use crate::devices::PairingOutcome;
use crate::domains::DomainProfile;
use crate::error::WizardError;
use crate::goals::GoalType;
use crate::onboarding::UserProfile;

pub use cardio::{CardioDraft, CardioStep};
pub use sleep::{SleepDraft, SleepStep};
pub use state::{Wizard, WizardDraft, WizardStep};
pub use steps::{StepsDraft, StepsStep};
pub use strength::{StrengthDraft, StrengthStep};
pub use weight_loss::{WeightLossDraft, WeightLossStep};

/// An open wizard for one domain.
#[derive(Debug, Clone)]
pub enum DomainWizard {
    WeightLoss(Wizard<WeightLossDraft>),
    Cardio(Wizard<CardioDraft>),
    Strength(Wizard<StrengthDraft>),
    Sleep(Wizard<SleepDraft>),
    Steps(Wizard<StepsDraft>),
}

impl DomainWizard {
    /// Open the wizard for `goal_type`, prefilled from `user` and the pairing
    /// step's outcome. `None` for goal types without a wizard.
    pub fn open(goal_type: GoalType, user: &UserProfile, pairing: &PairingOutcome) -> Option<Self> {
        let wizard = match goal_type {
            GoalType::WeightLoss => Self::WeightLoss(Wizard::new(WeightLossDraft::from_user(user))),
            GoalType::CardioEndurance => Self::Cardio(Wizard::new(
                CardioDraft::from_user(user).with_devices(pairing.devices()),
            )),
            GoalType::StrengthBuilding => {
                Self::Strength(Wizard::new(StrengthDraft::with_equipment(pairing.equipment())))
            }
            GoalType::SleepTracking => {
                Self::Sleep(Wizard::new(SleepDraft::with_devices(pairing.devices())))
            }
            GoalType::DailySteps => Self::Steps(Wizard::new(
                StepsDraft::from_user(user).with_devices(pairing.devices()),
            )),
            GoalType::WorkoutConsistency => return None,
        };
        Some(wizard)
    }

    pub fn goal_type(&self) -> GoalType {
        match self {
            Self::WeightLoss(_) => GoalType::WeightLoss,
            Self::Cardio(_) => GoalType::CardioEndurance,
            Self::Strength(_) => GoalType::StrengthBuilding,
            Self::Sleep(_) => GoalType::SleepTracking,
            Self::Steps(_) => GoalType::DailySteps,
        }
    }

    /// Current step name, as shown in the progress header.
    pub fn step_name(&self) -> String {
        match self {
            Self::WeightLoss(w) => w.step().to_string(),
            Self::Cardio(w) => w.step().to_string(),
            Self::Strength(w) => w.step().to_string(),
            Self::Sleep(w) => w.step().to_string(),
            Self::Steps(w) => w.step().to_string(),
        }
    }

    /// `(current, total)` step numbers, one-based.
    pub fn progress(&self) -> (usize, usize) {
        fn of<S: WizardStep>(step: S) -> (usize, usize) {
            (step.position() + 1, S::STEPS.len())
        }
        match self {
            Self::WeightLoss(w) => of(w.step()),
            Self::Cardio(w) => of(w.step()),
            Self::Strength(w) => of(w.step()),
            Self::Sleep(w) => of(w.step()),
            Self::Steps(w) => of(w.step()),
        }
    }

    pub fn can_advance(&self) -> bool {
        match self {
            Self::WeightLoss(w) => w.can_advance(),
            Self::Cardio(w) => w.can_advance(),
            Self::Strength(w) => w.can_advance(),
            Self::Sleep(w) => w.can_advance(),
            Self::Steps(w) => w.can_advance(),
        }
    }

    pub fn advance(&mut self) -> Result<(), WizardError> {
        match self {
            Self::WeightLoss(w) => w.advance().map(drop),
            Self::Cardio(w) => w.advance().map(drop),
            Self::Strength(w) => w.advance().map(drop),
            Self::Sleep(w) => w.advance().map(drop),
            Self::Steps(w) => w.advance().map(drop),
        }
    }

    /// Move back one step. Returns `false` on the first step.
    pub fn back(&mut self) -> bool {
        match self {
            Self::WeightLoss(w) => w.back().is_some(),
            Self::Cardio(w) => w.back().is_some(),
            Self::Strength(w) => w.back().is_some(),
            Self::Sleep(w) => w.back().is_some(),
            Self::Steps(w) => w.back().is_some(),
        }
    }

    pub fn is_at_review(&self) -> bool {
        match self {
            Self::WeightLoss(w) => w.step().is_review(),
            Self::Cardio(w) => w.step().is_review(),
            Self::Strength(w) => w.step().is_review(),
            Self::Sleep(w) => w.step().is_review(),
            Self::Steps(w) => w.step().is_review(),
        }
    }

    pub fn preview(&self) -> Option<DomainProfile> {
        match self {
            Self::WeightLoss(w) => w.preview().map(DomainProfile::WeightLoss),
            Self::Cardio(w) => w.preview().map(DomainProfile::CardioEndurance),
            Self::Strength(w) => w.preview().map(DomainProfile::StrengthBuilding),
            Self::Sleep(w) => w.preview().map(DomainProfile::SleepTracking),
            Self::Steps(w) => w.preview().map(DomainProfile::DailySteps),
        }
    }

    pub fn commit(&self) -> Result<DomainProfile, WizardError> {
        match self {
            Self::WeightLoss(w) => w.commit().map(DomainProfile::WeightLoss),
            Self::Cardio(w) => w.commit().map(DomainProfile::CardioEndurance),
            Self::Strength(w) => w.commit().map(DomainProfile::StrengthBuilding),
            Self::Sleep(w) => w.commit().map(DomainProfile::SleepTracking),
            Self::Steps(w) => w.commit().map(DomainProfile::DailySteps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::{Gender, HeightUnit, WeightUnit};
    use crate::devices::{ConnectedDevice, DeviceCandidate, DeviceKind, Equipment, TrackingSource};

    fn user() -> UserProfile {
        UserProfile::new(82.0, WeightUnit::Kg, 178.0, HeightUnit::Cm, 33, Gender::Male)
    }

    #[test]
    fn no_wizard_for_consistency() {
        assert!(
            DomainWizard::open(
                GoalType::WorkoutConsistency,
                &user(),
                &PairingOutcome::skipped()
            )
            .is_none()
        );
    }

    #[test]
    fn opens_on_first_step_for_every_domain() {
        for goal_type in GoalType::ALL.into_iter().filter(GoalType::has_wizard) {
            let wizard = DomainWizard::open(goal_type, &user(), &PairingOutcome::skipped()).unwrap();
            assert_eq!(wizard.goal_type(), goal_type);
            assert_eq!(wizard.progress().0, 1);
            assert!(!wizard.is_at_review());
        }
    }

    #[test]
    fn equipment_flows_into_strength_draft() {
        let pairing = PairingOutcome::Equipment(vec![Equipment::Barbell, Equipment::PullUpBar]);
        let wizard = DomainWizard::open(GoalType::StrengthBuilding, &user(), &pairing).unwrap();
        match wizard {
            DomainWizard::Strength(w) => assert_eq!(w.draft().equipment.len(), 2),
            other => panic!("unexpected wizard {other:?}"),
        }
    }

    #[test]
    fn paired_devices_switch_to_device_tracking() {
        let ring = DeviceCandidate::new("Oura Ring", DeviceKind::SmartRing);
        let pairing = PairingOutcome::Devices(vec![ConnectedDevice::connect(&ring, Some(80))]);

        let mut sleep = DomainWizard::open(GoalType::SleepTracking, &user(), &pairing).unwrap();
        if let DomainWizard::Sleep(w) = &mut sleep {
            assert_eq!(w.draft().devices.len(), 1);
            w.draft_mut().bedtime = "22:30".to_string();
        }
        while !sleep.is_at_review() {
            sleep.advance().unwrap();
        }
        match sleep.commit().unwrap() {
            DomainProfile::SleepTracking(p) => assert_eq!(p.tracking, TrackingSource::Device),
            other => panic!("unexpected profile {other:?}"),
        }

        let mut steps =
            DomainWizard::open(GoalType::DailySteps, &user(), &PairingOutcome::skipped()).unwrap();
        steps.advance().unwrap();
        match steps.commit().unwrap() {
            DomainProfile::DailySteps(p) => assert_eq!(p.tracking, TrackingSource::Manual),
            other => panic!("unexpected profile {other:?}"),
        }
    }

    #[test]
    fn steps_wizard_commits_through_wrapper() {
        let mut wizard =
            DomainWizard::open(GoalType::DailySteps, &user(), &PairingOutcome::skipped()).unwrap();
        assert_eq!(wizard.progress(), (1, 2));
        wizard.advance().unwrap();
        assert!(wizard.is_at_review());
        assert_eq!(wizard.step_name(), "review");

        let profile = wizard.commit().unwrap();
        assert_eq!(profile.goal_type(), GoalType::DailySteps);
        assert!(wizard.back());
        assert!(!wizard.back());
    }
}
