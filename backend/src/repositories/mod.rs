//! Database repositories
//!
//! Provides the data access layer. Repositories return `anyhow::Result`;
//! services translate failures into API errors.

pub mod account;
pub mod ai;
pub mod catalog;
pub mod workout;

pub use account::{AccountRecord, AccountRepository, CreateAccount, UpdateAccount};
pub use ai::{
    ProfileRecord, ProfileRepository, RecommendationRecord, RecommendationRepository, UpsertProfile,
};
pub use catalog::{
    CatalogFilter, CreateExercise, ExerciseRecord, ExerciseRepository, MuscleGroupRecord,
    MuscleGroupRepository, UpdateExercise,
};
pub use workout::{
    CreateTemplate, NewWorkoutExercise, TemplateFilter, TemplateRecord, TemplateRepository,
    UpdateTemplate, UserWorkoutRecord, UserWorkoutRepository, WorkoutExerciseRecord,
};
