//! Screen state machine: which top-level screen the user is on.

use serde::{Deserialize, Serialize};

/// Top-level screens.
///
/// First launch progresses Welcome → ProfileSetup → GoalSelection →
/// GoalSetup → Main. From Main the user can return to GoalSelection to
/// change goals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Welcome,
    ProfileSetup,
    GoalSelection,
    GoalSetup,
    Main,
}

impl Screen {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: Screen) -> bool {
        use Screen::*;
        matches!(
            (self, target),
            (Welcome, ProfileSetup)
                | (ProfileSetup, GoalSelection)
                | (GoalSelection, GoalSetup)
                // Nothing to set up, or an empty selection.
                | (GoalSelection, Main)
                | (GoalSetup, Main)
                | (Main, GoalSelection)
        )
    }

    /// Whether the daily-tracking surface is unlocked.
    pub fn is_main(&self) -> bool {
        matches!(self, Self::Main)
    }

    /// The next screen on first launch, if any.
    pub fn next(&self) -> Option<Screen> {
        use Screen::*;
        match self {
            Welcome => Some(ProfileSetup),
            ProfileSetup => Some(GoalSelection),
            GoalSelection => Some(GoalSetup),
            GoalSetup => Some(Main),
            Main => None,
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::ProfileSetup => "profile_setup",
            Self::GoalSelection => "goal_selection",
            Self::GoalSetup => "goal_setup",
            Self::Main => "main",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use Screen::*;
        let transitions = [
            (Welcome, ProfileSetup),
            (ProfileSetup, GoalSelection),
            (GoalSelection, GoalSetup),
            (GoalSelection, Main),
            (GoalSetup, Main),
            (Main, GoalSelection),
        ];
        for (from, to) in transitions {
            assert!(
                from.can_transition_to(to),
                "{from} should transition to {to}"
            );
        }
    }

    #[test]
    fn invalid_transitions() {
        use Screen::*;
        assert!(!Welcome.can_transition_to(Main));
        assert!(!ProfileSetup.can_transition_to(GoalSetup));
        assert!(!Main.can_transition_to(Welcome));
        assert!(!GoalSetup.can_transition_to(GoalSetup));
    }

    #[test]
    fn next_walks_first_launch() {
        let mut current = Screen::Welcome;
        let mut seen = vec![current];
        while let Some(next) = current.next() {
            assert!(current.can_transition_to(next));
            seen.push(next);
            current = next;
        }
        assert_eq!(seen.len(), 5);
        assert!(current.is_main());
    }

    #[test]
    fn display_matches_serde() {
        use Screen::*;
        for screen in [Welcome, ProfileSetup, GoalSelection, GoalSetup, Main] {
            let display = format!("{screen}");
            let json = serde_json::to_string(&screen).unwrap();
            assert_eq!(
                format!("\"{display}\""),
                json,
                "Display and serde should match for {screen:?}"
            );
        }
    }
}
