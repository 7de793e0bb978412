use std::sync::Mutex;

use crate::domain::{AppError, StudyPlan};
use crate::ports::PlanStore;

#[derive(Default)]
pub struct MemoryPlanStore {
    pub plan: Mutex<StudyPlan>,
    pub saves: Mutex<u32>,
}

impl MemoryPlanStore {
    pub fn snapshot(&self) -> StudyPlan {
        self.plan.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> u32 {
        *self.saves.lock().unwrap()
    }
}

impl PlanStore for MemoryPlanStore {
    fn load(&self) -> Result<StudyPlan, AppError> {
        Ok(self.plan.lock().unwrap().clone())
    }

    fn save(&self, plan: &StudyPlan) -> Result<(), AppError> {
        *self.plan.lock().unwrap() = plan.clone();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}
