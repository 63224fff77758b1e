//! OnboardingManager: coordinates goal selection, the setup sequencer,
//! pairing, wizard commits, and goal merging.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::devices::{DeviceCandidate, PairingHandle, PairingOutcome, start_pairing};
use crate::domains::{DomainProfile, DomainStores};
use crate::error::{Result, SessionError};
use crate::events::{AppEvent, EventBus};
use crate::goals::{
    Goal, GoalType, SelectionDiff, active_types, deactivate_goals, merge_goals, resolve_selection,
};
use crate::store::Container;
use crate::wizard::DomainWizard;

use super::model::{AppState, Tab, UserProfile};
use super::sequencer::{PairingSession, SetupStep, next_step};
use super::state::Screen;

/// Result of applying a goal selection.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    pub diff: SelectionDiff,
    /// Goals created right away (domain already configured, or no wizard).
    pub merged: Vec<Goal>,
    pub next: SetupStep,
}

/// Coordinates the onboarding flow over the app container and the five
/// domain containers.
///
/// Writes go to one container at a time; only the "is configured" checks
/// read across domains.
pub struct OnboardingManager {
    app: Arc<Container<AppState>>,
    domains: DomainStores,
    events: EventBus,
    session: RwLock<PairingSession>,
    pairing_delay: Duration,
}

impl OnboardingManager {
    pub fn new(
        app: Arc<Container<AppState>>,
        domains: DomainStores,
        events: EventBus,
        pairing_delay: Duration,
    ) -> Self {
        Self {
            app,
            domains,
            events,
            session: RwLock::new(PairingSession::new()),
            pairing_delay,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub async fn screen(&self) -> Screen {
        self.app.read(|s| s.screen).await
    }

    pub async fn user_profile(&self) -> Option<UserProfile> {
        self.app.read(|s| s.user_profile.clone()).await
    }

    /// All goals, including removed ones.
    pub async fn goals(&self) -> Vec<Goal> {
        self.app.read(|s| s.goals.clone()).await
    }

    pub async fn active_goals(&self) -> Vec<Goal> {
        self.app.read(|s| s.active_goals().cloned().collect()).await
    }

    /// Navigate to `target` if the screen machine allows it.
    ///
    /// Returns `false` (and leaves the screen alone) for invalid transitions.
    pub async fn navigate(&self, target: Screen) -> Result<bool> {
        let moved = self
            .app
            .update(|s| {
                if s.screen.can_transition_to(target) {
                    s.screen = target;
                    true
                } else {
                    false
                }
            })
            .await?;
        if moved {
            self.events.publish(AppEvent::ScreenChanged { screen: target });
        } else {
            warn!(target = %target, "Rejected screen transition");
        }
        Ok(moved)
    }

    pub async fn set_tab(&self, tab: Tab) -> Result<()> {
        self.app.update(|s| s.tab = tab).await?;
        debug!(tab = %tab, "Tab changed");
        Ok(())
    }

    /// Leave the welcome screen.
    pub async fn start_if_needed(&self) -> Result<Screen> {
        let screen = self.screen().await;
        if screen == Screen::Welcome {
            if let Some(next) = screen.next() {
                self.navigate(next).await?;
            }
        }
        Ok(self.screen().await)
    }

    /// Store the base profile and move on to goal selection.
    ///
    /// The profile is created once; an existing profile is kept as is.
    pub async fn create_user_profile(&self, profile: UserProfile) -> Result<UserProfile> {
        if !profile.is_valid() {
            return Err(SessionError::InvalidProfile.into());
        }
        let (stored, created) = self
            .app
            .update(|s| {
                let created = s.user_profile.is_none();
                if created {
                    s.user_profile = Some(profile);
                }
                if s.screen != Screen::Main {
                    s.screen = Screen::GoalSelection;
                }
                (s.user_profile.clone(), created)
            })
            .await?;
        let stored = stored.ok_or(SessionError::NoUserProfile)?;
        if created {
            info!(age = stored.age, "User profile created");
        } else {
            debug!("User profile already exists, keeping it");
        }
        Ok(stored)
    }

    /// Apply the goal-selection screen's checkbox state.
    ///
    /// Re-selecting an active goal removes it. Newly added types whose domain
    /// is already configured (or which have no wizard) become goals at once;
    /// the rest wait for their wizard.
    pub async fn select_goals(&self, selected: &[GoalType]) -> Result<SelectionOutcome> {
        let configured = self.domains.configured().await;
        let mut targets = Vec::new();
        for goal_type in &configured {
            if let Some(profile) = self.domains.profile(*goal_type).await {
                targets.push((*goal_type, profile.goal_target()));
            }
        }

        let (diff, merged, selection) = self
            .app
            .update(|s| {
                let Some(user) = s.user_profile.as_mut() else {
                    return Err(SessionError::NoUserProfile);
                };
                let diff = resolve_selection(selected, &active_types(&s.goals));
                for goal_type in &diff.to_remove {
                    user.deselect(*goal_type);
                }
                for goal_type in &diff.to_add {
                    user.select(*goal_type);
                }
                let selection = user.selected_goals.clone();
                deactivate_goals(&mut s.goals, &diff.to_remove);

                let ready: Vec<GoalType> = diff
                    .to_add
                    .iter()
                    .copied()
                    .filter(|g| !g.has_wizard() || configured.contains(g))
                    .collect();
                let merged = merge_goals(&mut s.goals, &ready, |g| {
                    targets
                        .iter()
                        .find(|(t, _)| *t == g)
                        .and_then(|(_, target)| *target)
                });
                Ok((diff, merged, selection))
            })
            .await??;

        info!(
            added = diff.to_add.len(),
            removed = diff.to_remove.len(),
            merged = merged.len(),
            "Goal selection applied"
        );
        if !diff.is_empty() {
            self.events.publish(AppEvent::GoalsChanged {
                added: diff.to_add.clone(),
                removed: diff.to_remove.clone(),
            });
        }
        for goal in &merged {
            self.publish_merged(goal);
        }

        let next = {
            let session = self.session.read().await;
            next_step(&selection, &configured, &session)
        };
        let screen = if next.is_done() {
            Screen::Main
        } else {
            Screen::GoalSetup
        };
        self.force_screen(screen).await?;

        Ok(SelectionOutcome { diff, merged, next })
    }

    /// Remove an active goal. The goal is deactivated, not deleted, and its
    /// domain profile is kept. Returns `false` if no active goal matched.
    pub async fn remove_goal(&self, goal_type: GoalType) -> Result<bool> {
        let removed = self
            .app
            .update(|s| {
                if let Some(user) = s.user_profile.as_mut() {
                    user.deselect(goal_type);
                }
                deactivate_goals(&mut s.goals, &[goal_type]) > 0
            })
            .await?;
        if removed {
            info!(goal = %goal_type, "Goal removed");
            self.events.publish(AppEvent::GoalsChanged {
                added: Vec::new(),
                removed: vec![goal_type],
            });
        }
        Ok(removed)
    }

    /// What the goal-setup screen shows next.
    ///
    /// Selected domains that are configured but have no active goal (a goal
    /// write failed after the profile was saved) get their goal first.
    pub async fn next_step(&self) -> SetupStep {
        if let Err(e) = self.merge_configured().await {
            warn!(error = %e, "Could not merge goals for configured domains");
        }
        self.current_step().await
    }

    async fn current_step(&self) -> SetupStep {
        let selected = self
            .app
            .read(|s| {
                s.user_profile
                    .as_ref()
                    .map(|u| u.selected_goals.clone())
                    .unwrap_or_default()
            })
            .await;
        let configured = self.domains.configured().await;
        let session = self.session.read().await;
        next_step(&selected, &configured, &session)
    }

    /// Begin pairing the devices the user picked for `goal_type`.
    ///
    /// The returned handle owns the scan; drop or cancel it on navigate-away.
    pub async fn start_pairing(
        &self,
        goal_type: GoalType,
        chosen: Vec<DeviceCandidate>,
    ) -> Result<PairingHandle> {
        self.expect_pending(goal_type).await?;
        info!(goal = %goal_type, count = chosen.len(), "Pairing started");
        Ok(start_pairing(chosen, self.pairing_delay))
    }

    /// Record the pairing step's outcome and return the next step.
    ///
    /// Pairing again before the wizard commits replaces the earlier outcome.
    pub async fn complete_pairing(
        &self,
        goal_type: GoalType,
        outcome: PairingOutcome,
    ) -> Result<SetupStep> {
        self.expect_pending(goal_type).await?;
        info!(
            goal = %goal_type,
            devices = outcome.devices().len(),
            equipment = outcome.equipment().len(),
            "Pairing step completed"
        );
        self.session.write().await.record(goal_type, outcome);
        Ok(self.next_step().await)
    }

    /// Skip pairing; the wizard falls back to manual logging.
    pub async fn skip_pairing(&self, goal_type: GoalType) -> Result<SetupStep> {
        self.complete_pairing(goal_type, PairingOutcome::skipped())
            .await
    }

    /// Open the wizard for the pending domain.
    pub async fn open_wizard(&self) -> Result<DomainWizard> {
        let user = self.user_profile().await.ok_or(SessionError::NoUserProfile)?;
        match self.current_step().await {
            SetupStep::Wizard { goal_type, pairing } => {
                let pairing = pairing.unwrap_or_else(PairingOutcome::skipped);
                let wizard = DomainWizard::open(goal_type, &user, &pairing)
                    .ok_or(SessionError::NoWizard(goal_type))?;
                debug!(goal = %goal_type, "Wizard opened");
                Ok(wizard)
            }
            SetupStep::Pairing { goal_type } => Err(SessionError::PairingPending(goal_type).into()),
            SetupStep::Done => Err(SessionError::NothingPending.into()),
        }
    }

    /// Commit `wizard`, persist its profile to the domain's container, merge
    /// the goal, and return the next step.
    pub async fn complete_wizard(&self, wizard: &DomainWizard) -> Result<SetupStep> {
        let goal_type = wizard.goal_type();
        if let SetupStep::Pairing { .. } = self.expect_pending(goal_type).await? {
            return Err(SessionError::PairingPending(goal_type).into());
        }
        let profile = wizard.commit()?;
        self.apply_profile(profile).await?;

        let next = self.next_step().await;
        if next.is_done() {
            self.force_screen(Screen::Main).await?;
        }
        Ok(next)
    }

    async fn apply_profile(&self, profile: DomainProfile) -> Result<()> {
        let goal_type = profile.goal_type();
        let profile_id = profile.id();
        // The outcome stays in the session until the domain write succeeds.
        let pairing = self.session.read().await.get(goal_type).cloned();

        if !self.domains.save_profile(profile, pairing).await? {
            warn!(goal = %goal_type, "Domain already configured, keeping existing profile");
        }
        self.session.write().await.take(goal_type);
        info!(goal = %goal_type, profile_id = %profile_id, "Wizard committed");
        self.events.publish(AppEvent::DomainConfigured {
            goal_type,
            profile_id,
        });

        self.merge_configured().await?;
        Ok(())
    }

    /// Create the goal for every selected type whose domain profile exists
    /// but which has no active goal. Targets come from the profile.
    async fn merge_configured(&self) -> Result<Vec<Goal>> {
        let missing = self
            .app
            .read(|s| {
                let active = active_types(&s.goals);
                s.user_profile
                    .as_ref()
                    .map(|u| {
                        u.selected_goals
                            .iter()
                            .copied()
                            .filter(|g| !active.contains(g))
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default()
            })
            .await;

        let mut targets = Vec::new();
        for goal_type in missing {
            if let Some(profile) = self.domains.profile(goal_type).await {
                targets.push((goal_type, profile.goal_target()));
            }
        }
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        let types: Vec<GoalType> = targets.iter().map(|(t, _)| *t).collect();
        let merged = self
            .app
            .update(|s| {
                merge_goals(&mut s.goals, &types, |g| {
                    targets
                        .iter()
                        .find(|(t, _)| *t == g)
                        .and_then(|(_, target)| *target)
                })
            })
            .await?;
        for goal in &merged {
            self.publish_merged(goal);
        }
        Ok(merged)
    }

    /// The sequencer's current step, provided it is on `goal_type`.
    async fn expect_pending(&self, goal_type: GoalType) -> Result<SetupStep> {
        let step = self.current_step().await;
        match step.goal_type() {
            None => Err(SessionError::NothingPending.into()),
            Some(expected) if expected != goal_type => Err(SessionError::WrongDomain {
                expected,
                actual: goal_type,
            }
            .into()),
            Some(_) => Ok(step),
        }
    }

    async fn force_screen(&self, screen: Screen) -> Result<()> {
        let changed = self
            .app
            .update(|s| {
                let changed = s.screen != screen;
                s.screen = screen;
                changed
            })
            .await?;
        if changed {
            debug!(screen = %screen, "Screen changed");
            self.events.publish(AppEvent::ScreenChanged { screen });
        }
        Ok(())
    }

    fn publish_merged(&self, goal: &Goal) {
        info!(goal = %goal.goal_type, goal_id = %goal.id, "Goal merged");
        self.events.publish(AppEvent::GoalMerged {
            goal_type: goal.goal_type,
            goal_id: goal.id,
        });
    }
}
