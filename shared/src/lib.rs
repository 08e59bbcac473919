//! FitAI Shared Library
//!
//! This crate contains the domain types, API types, and validation utilities
//! shared between the backend and any future clients.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{
    Difficulty, Equipment, ExperienceLevel, Role, TemplateDifficulty, TrainingGoal, WorkoutStatus,
};
pub use types::*;
