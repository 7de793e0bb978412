//! versecast: turn scripture references into OBS verse scenes cloned from a template.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    GenerateOptions, GenerateOutcome, ReplicationReport, fetch_verses, generate, load_config,
    parse_reference, plan_add, plan_complete, plan_list, plan_next,
};
pub use domain::{AppConfig, AppError, Passage, ScriptureReference, StudyItem, VerseRecord};
