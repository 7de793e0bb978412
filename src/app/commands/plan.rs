//! Study plan commands.

use chrono::{DateTime, Utc};

use crate::domain::{AppError, GeneratedImage, PlanStatus, ScriptureReference, StudyItem};
use crate::ports::PlanStore;

/// Append a pending reference. The reference must parse.
pub fn add(
    store: &impl PlanStore,
    reference: &str,
    now: DateTime<Utc>,
) -> Result<StudyItem, AppError> {
    let mut plan = store.load()?;
    let item = plan.add(reference.trim(), now)?.clone();
    store.save(&plan)?;
    Ok(item)
}

pub fn list(store: &impl PlanStore) -> Result<Vec<StudyItem>, AppError> {
    Ok(store.load()?.items)
}

/// First pending reference, if any.
pub fn next_pending(store: &impl PlanStore) -> Result<Option<StudyItem>, AppError> {
    Ok(store.load()?.next_pending().cloned())
}

pub fn complete(
    store: &impl PlanStore,
    reference: &str,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let mut plan = store.load()?;
    plan.set_status(reference.trim(), PlanStatus::Complete, now)?;
    store.save(&plan)
}

/// Mark the plan item naming `reference` as processed and record its title and images.
///
/// Items match when they parse to the same reference, so `john 3:16` in the plan matches a
/// run for `John 3:16`. Returns whether an item was updated.
pub fn record_processed<P: PlanStore + ?Sized>(
    store: &P,
    reference: &ScriptureReference,
    title: Option<&str>,
    images: &[GeneratedImage],
    now: DateTime<Utc>,
) -> Result<bool, AppError> {
    let mut plan = store.load()?;
    let Some(key) = plan.find_equivalent(reference).map(|item| item.reference.clone()) else {
        return Ok(false);
    };

    plan.set_status(&key, PlanStatus::Processed, now)?;
    if let Some(title) = title {
        plan.set_title(&key, title, now)?;
    }
    if !images.is_empty() {
        plan.set_images(&key, images.to_vec(), now)?;
    }
    store.save(&plan)?;
    Ok(true)
}
