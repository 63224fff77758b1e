//! Linear wizard state machine shared by every domain wizard.

use std::fmt;

use crate::error::WizardError;

/// A named wizard step.
///
/// Steps progress linearly through `STEPS`; the last entry is the read-only
/// review step.
pub trait WizardStep: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// All steps in order. Never empty.
    const STEPS: &'static [Self];

    fn first() -> Self {
        Self::STEPS[0]
    }

    fn position(&self) -> usize {
        Self::STEPS.iter().position(|s| s == self).unwrap_or(0)
    }

    /// The next step in the linear progression, if any.
    fn next(&self) -> Option<Self> {
        Self::STEPS.get(self.position() + 1).copied()
    }

    fn previous(&self) -> Option<Self> {
        self.position()
            .checked_sub(1)
            .and_then(|i| Self::STEPS.get(i).copied())
    }

    /// Only adjacent steps are reachable.
    fn can_transition_to(&self, target: Self) -> bool {
        self.next() == Some(target) || self.previous() == Some(target)
    }

    fn is_review(&self) -> bool {
        self.next().is_none()
    }
}

/// The values a wizard collects, plus how to turn them into a profile.
pub trait WizardDraft: Clone {
    type Step: WizardStep;
    type Profile;

    /// Whether `step`'s required fields are filled and valid.
    fn is_step_complete(&self, step: Self::Step) -> bool;

    /// Run the derivation functions over the draft. `None` while any required
    /// field is missing.
    fn derive(&self) -> Option<Self::Profile>;
}

/// A wizard positioned on one step of its draft.
///
/// Moving back never clears anything: the draft is owned by the wizard and
/// only edited through [`Wizard::draft_mut`].
#[derive(Debug, Clone)]
pub struct Wizard<D: WizardDraft> {
    step: D::Step,
    draft: D,
}

impl<D: WizardDraft> Wizard<D> {
    pub fn new(draft: D) -> Self {
        Self {
            step: D::Step::first(),
            draft,
        }
    }

    pub fn step(&self) -> D::Step {
        self.step
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Whether the "next" control is enabled.
    pub fn can_advance(&self) -> bool {
        !self.step.is_review() && self.draft.is_step_complete(self.step)
    }

    /// Move forward one step.
    pub fn advance(&mut self) -> Result<D::Step, WizardError> {
        let next = self.step.next().ok_or_else(|| WizardError::AtTerminalStep {
            step: self.step.to_string(),
        })?;
        if !self.draft.is_step_complete(self.step) {
            return Err(WizardError::StepIncomplete {
                step: self.step.to_string(),
            });
        }
        self.step = next;
        Ok(next)
    }

    /// Move back one step. Returns `None` on the first step.
    pub fn back(&mut self) -> Option<D::Step> {
        let previous = self.step.previous()?;
        self.step = previous;
        Some(previous)
    }

    /// Derived output shown on the review step.
    pub fn preview(&self) -> Option<D::Profile> {
        if self.step.is_review() {
            self.draft.derive()
        } else {
            None
        }
    }

    /// Produce the completed profile. Persisting it is the caller's job.
    pub fn commit(&self) -> Result<D::Profile, WizardError> {
        if !self.step.is_review() {
            return Err(WizardError::NotAtReview {
                step: self.step.to_string(),
            });
        }
        if let Some(step) = D::Step::STEPS
            .iter()
            .find(|s| !self.draft.is_step_complete(**s))
        {
            return Err(WizardError::StepIncomplete {
                step: step.to_string(),
            });
        }
        self.draft.derive().ok_or_else(|| WizardError::StepIncomplete {
            step: self.step.to_string(),
        })
    }
}
