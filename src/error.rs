//! Error types for fittrack.

use std::time::Duration;

use crate::goals::GoalType;

/// Top-level error type for the tracking core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error for container {key}: {reason}")]
    Serialization { key: String, reason: String },
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Setup wizard navigation errors.
///
/// These never reach the user as an error state: the caller maps
/// `StepIncomplete` to a disabled "next" control.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Step {step} is missing required fields")]
    StepIncomplete { step: String },

    #[error("Already at terminal step {step}")]
    AtTerminalStep { step: String },

    #[error("Commit is only allowed from the review step, current step is {step}")]
    NotAtReview { step: String },
}

/// Onboarding session errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("No user profile exists yet")]
    NoUserProfile,

    #[error("User profile is missing weight, height, or age")]
    InvalidProfile,

    #[error("No goal type is pending setup")]
    NothingPending,

    #[error("Expected setup for {expected}, got {actual}")]
    WrongDomain { expected: GoalType, actual: GoalType },

    #[error("Goal type {0} has no setup wizard")]
    NoWizard(GoalType),

    #[error("Device selection for {0} has not been made")]
    PairingPending(GoalType),
}

/// Result type alias for the tracking core.
pub type Result<T> = std::result::Result<T, Error>;
