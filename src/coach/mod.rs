//! Goal-focused coach chat.
//!
//! Replies come from the configured LLM when one is available. Any provider
//! or parse failure degrades to a static, goal-specific reply with
//! `using_fallback` set.

pub mod fallback;
pub mod model;
pub mod prompts;
pub mod service;

pub use fallback::fallback_response;
pub use model::{CoachRequest, CoachResponse, DataUpdates};
pub use service::Coach;
