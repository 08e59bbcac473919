//! Domain model enums for the FitAI platform
//!
//! All enums use a snake_case wire representation and round-trip through
//! their `Display`/`FromStr` impls, which is also how they are stored in
//! Postgres text columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Trainer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Trainer => "trainer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Role::Client),
            "trainer" => Ok(Role::Trainer),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// Equipment required by a catalog exercise
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Bodyweight,
    Dumbbell,
    Barbell,
    Machine,
    Cable,
    Kettlebell,
    ResistanceBand,
}

impl Equipment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::Bodyweight => "bodyweight",
            Equipment::Dumbbell => "dumbbell",
            Equipment::Barbell => "barbell",
            Equipment::Machine => "machine",
            Equipment::Cable => "cable",
            Equipment::Kettlebell => "kettlebell",
            Equipment::ResistanceBand => "resistance_band",
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Equipment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bodyweight" => Ok(Equipment::Bodyweight),
            "dumbbell" => Ok(Equipment::Dumbbell),
            "barbell" => Ok(Equipment::Barbell),
            "machine" => Ok(Equipment::Machine),
            "cable" => Ok(Equipment::Cable),
            "kettlebell" => Ok(Equipment::Kettlebell),
            "resistance_band" => Ok(Equipment::ResistanceBand),
            other => Err(format!("Unknown equipment: {other}")),
        }
    }
}

/// Exercise difficulty rating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            "expert" => Ok(Difficulty::Expert),
            other => Err(format!("Unknown difficulty: {other}")),
        }
    }
}

/// Workout template difficulty (templates do not use the expert tier)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TemplateDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl TemplateDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateDifficulty::Beginner => "beginner",
            TemplateDifficulty::Intermediate => "intermediate",
            TemplateDifficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for TemplateDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(TemplateDifficulty::Beginner),
            "intermediate" => Ok(TemplateDifficulty::Intermediate),
            "advanced" => Ok(TemplateDifficulty::Advanced),
            other => Err(format!("Unknown template difficulty: {other}")),
        }
    }
}

/// Training goal, used for templates and training profiles
///
/// This is a closed set: the recommendation table is keyed on it and any
/// goal without a dedicated canned plan falls back to the strength plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrainingGoal {
    Strength,
    Hypertrophy,
    Endurance,
    NeuralStrength,
    WeightLoss,
}

impl TrainingGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingGoal::Strength => "strength",
            TrainingGoal::Hypertrophy => "hypertrophy",
            TrainingGoal::Endurance => "endurance",
            TrainingGoal::NeuralStrength => "neural_strength",
            TrainingGoal::WeightLoss => "weight_loss",
        }
    }
}

impl fmt::Display for TrainingGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(TrainingGoal::Strength),
            "hypertrophy" => Ok(TrainingGoal::Hypertrophy),
            "endurance" => Ok(TrainingGoal::Endurance),
            "neural_strength" => Ok(TrainingGoal::NeuralStrength),
            "weight_loss" => Ok(TrainingGoal::WeightLoss),
            other => Err(format!("Unknown training goal: {other}")),
        }
    }
}

/// Training experience level captured during anamnesis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
            ExperienceLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "advanced" => Ok(ExperienceLevel::Advanced),
            "expert" => Ok(ExperienceLevel::Expert),
            other => Err(format!("Unknown experience level: {other}")),
        }
    }
}

/// Lifecycle status of a scheduled workout instance
///
/// Transitions are monotonic forward:
///
/// ```text
/// scheduled --> in_progress --> completed
///     \
///      +--> skipped
/// ```
///
/// `completed` and `skipped` are terminal. There is no way back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    Scheduled,
    InProgress,
    Completed,
    Skipped,
}

impl WorkoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutStatus::Scheduled => "scheduled",
            WorkoutStatus::InProgress => "in_progress",
            WorkoutStatus::Completed => "completed",
            WorkoutStatus::Skipped => "skipped",
        }
    }

    /// Whether a transition from `self` to `next` is permitted.
    ///
    /// This is the single source of truth for the workout state machine;
    /// the repository enforces the same guard with a conditional UPDATE.
    pub fn can_transition(self, next: WorkoutStatus) -> bool {
        matches!(
            (self, next),
            (WorkoutStatus::Scheduled, WorkoutStatus::InProgress)
                | (WorkoutStatus::Scheduled, WorkoutStatus::Skipped)
                | (WorkoutStatus::InProgress, WorkoutStatus::Completed)
        )
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkoutStatus::Completed | WorkoutStatus::Skipped)
    }
}

impl fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(WorkoutStatus::Scheduled),
            "in_progress" => Ok(WorkoutStatus::InProgress),
            "completed" => Ok(WorkoutStatus::Completed),
            "skipped" => Ok(WorkoutStatus::Skipped),
            other => Err(format!("Unknown workout status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Client, Role::Trainer, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_goal_is_rejected() {
        assert!("cardio".parse::<TrainingGoal>().is_err());
        assert!("".parse::<TrainingGoal>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&TrainingGoal::NeuralStrength).unwrap();
        assert_eq!(json, "\"neural_strength\"");
        let json = serde_json::to_string(&WorkoutStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_allowed_transitions() {
        assert!(WorkoutStatus::Scheduled.can_transition(WorkoutStatus::InProgress));
        assert!(WorkoutStatus::Scheduled.can_transition(WorkoutStatus::Skipped));
        assert!(WorkoutStatus::InProgress.can_transition(WorkoutStatus::Completed));
    }

    #[test]
    fn test_forbidden_transitions() {
        // No un-completing, no restarting, no skipping mid-run
        assert!(!WorkoutStatus::Completed.can_transition(WorkoutStatus::InProgress));
        assert!(!WorkoutStatus::Completed.can_transition(WorkoutStatus::Scheduled));
        assert!(!WorkoutStatus::InProgress.can_transition(WorkoutStatus::Scheduled));
        assert!(!WorkoutStatus::InProgress.can_transition(WorkoutStatus::Skipped));
        assert!(!WorkoutStatus::Skipped.can_transition(WorkoutStatus::InProgress));
        assert!(!WorkoutStatus::Scheduled.can_transition(WorkoutStatus::Completed));
    }

    #[test]
    fn test_terminal_states() {
        assert!(WorkoutStatus::Completed.is_terminal());
        assert!(WorkoutStatus::Skipped.is_terminal());
        assert!(!WorkoutStatus::Scheduled.is_terminal());
        assert!(!WorkoutStatus::InProgress.is_terminal());
    }
}
