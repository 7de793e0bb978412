//! Study plan persistence port definition.

use crate::domain::{AppError, StudyPlan};

/// Port for loading and saving the study plan.
pub trait PlanStore {
    /// Load the plan; an absent plan is empty.
    fn load(&self) -> Result<StudyPlan, AppError>;

    fn save(&self, plan: &StudyPlan) -> Result<(), AppError>;
}
