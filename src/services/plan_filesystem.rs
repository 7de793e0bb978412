//! JSON-file backed study plan store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, StudyPlan};
use crate::ports::PlanStore;

const PLAN_DIR: &str = ".versecast";
const PLAN_FILE: &str = "study_plan.json";

/// Study plan stored as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct FilesystemPlanStore {
    path: PathBuf,
}

impl FilesystemPlanStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$HOME/.versecast/study_plan.json`.
    pub fn from_home() -> Result<Self, AppError> {
        let home = std::env::var("HOME")
            .map_err(|_| AppError::config_error("HOME environment variable not set"))?;
        Ok(Self::new(PathBuf::from(home).join(PLAN_DIR).join(PLAN_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlanStore for FilesystemPlanStore {
    fn load(&self) -> Result<StudyPlan, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(StudyPlan::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, plan: &StudyPlan) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(plan)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
