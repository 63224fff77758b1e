//! fittrack: onboarding, goal setup, and daily tracking core for a
//! multi-goal fitness app.

pub mod coach;
pub mod config;
pub mod derive;
pub mod devices;
pub mod domains;
pub mod error;
pub mod events;
pub mod food;
pub mod goals;
pub mod llm;
pub mod onboarding;
pub mod store;
pub mod tracking;
pub mod wizard;
