//! Study plan: an ordered list of references waiting to be turned into scenes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AppError, GeneratedImage, ScriptureReference};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanStatus {
    Pending,
    Processed,
    Complete,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Pending => "Pending",
            PlanStatus::Processed => "Processed",
            PlanStatus::Complete => "Complete",
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyItem {
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub status: PlanStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generated_images: Vec<GeneratedImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    #[serde(default)]
    pub items: Vec<StudyItem>,
}

impl StudyPlan {
    /// Append a pending item. The reference must parse, and an item naming the same verses
    /// under any spelling counts as a duplicate.
    pub fn add(&mut self, reference: &str, now: DateTime<Utc>) -> Result<&StudyItem, AppError> {
        let parsed = ScriptureReference::parse(reference)?;
        if self.find_equivalent(&parsed).is_some() {
            return Err(AppError::PlanItemExists(reference.to_string()));
        }
        self.items.push(StudyItem {
            reference: reference.to_string(),
            title: None,
            status: PlanStatus::Pending,
            generated_images: Vec::new(),
            created_at: now,
            updated_at: now,
        });
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn find(&self, reference: &str) -> Option<&StudyItem> {
        self.items.iter().find(|item| item.reference == reference)
    }

    /// Item whose reference parses to `reference`.
    pub fn find_equivalent(&self, reference: &ScriptureReference) -> Option<&StudyItem> {
        self.items.iter().find(|item| {
            ScriptureReference::parse(&item.reference).is_ok_and(|parsed| parsed == *reference)
        })
    }

    pub fn next_pending(&self) -> Option<&StudyItem> {
        self.items.iter().find(|item| item.status == PlanStatus::Pending)
    }

    pub fn set_status(
        &mut self,
        reference: &str,
        status: PlanStatus,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let item = self.find_mut(reference)?;
        item.status = status;
        item.updated_at = now;
        Ok(())
    }

    pub fn set_title(
        &mut self,
        reference: &str,
        title: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let item = self.find_mut(reference)?;
        item.title = Some(title.to_string());
        item.updated_at = now;
        Ok(())
    }

    pub fn set_images(
        &mut self,
        reference: &str,
        images: Vec<GeneratedImage>,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let item = self.find_mut(reference)?;
        item.generated_images = images;
        item.updated_at = now;
        Ok(())
    }

    fn find_mut(&mut self, reference: &str) -> Result<&mut StudyItem, AppError> {
        self.items
            .iter_mut()
            .find(|item| item.reference == reference)
            .ok_or_else(|| AppError::PlanItemNotFound(reference.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn add_rejects_duplicates() {
        let mut plan = StudyPlan::default();
        plan.add("John 3:16-17", at(8)).unwrap();
        let err = plan.add("John 3:16-17", at(9)).unwrap_err();
        assert!(matches!(err, AppError::PlanItemExists(r) if r == "John 3:16-17"));
        assert_eq!(plan.items.len(), 1);
    }

    #[test]
    fn add_rejects_differently_spelled_duplicates() {
        let mut plan = StudyPlan::default();
        plan.add("john 3:16", at(8)).unwrap();
        let err = plan.add("John 3:16.", at(9)).unwrap_err();
        assert!(matches!(err, AppError::PlanItemExists(r) if r == "John 3:16."));
        assert_eq!(plan.items.len(), 1);

        plan.add("John 3:16-17", at(9)).unwrap();
        assert_eq!(plan.items.len(), 2);
    }

    #[test]
    fn add_rejects_unparseable_reference() {
        let mut plan = StudyPlan::default();
        assert!(matches!(plan.add("John", at(8)), Err(AppError::InvalidReference { .. })));
        assert!(plan.items.is_empty());
    }

    #[test]
    fn images_are_recorded_and_serialized_only_when_present() {
        let mut plan = StudyPlan::default();
        plan.add("John 3:16", at(8)).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json["items"][0].get("generated_images").is_none());

        let image = GeneratedImage {
            filename: "/out/John_3_16-16/img_1.png".to_string(),
            verse_range: "16".to_string(),
            description: "God's Love".to_string(),
        };
        plan.set_images("John 3:16", vec![image], at(10)).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["items"][0]["generated_images"][0]["verse_range"], "16");
        assert_eq!(plan.items[0].updated_at, at(10));
    }

    #[test]
    fn next_pending_skips_processed_items() {
        let mut plan = StudyPlan::default();
        plan.add("John 3:16", at(8)).unwrap();
        plan.add("1 Sam 23:1-6", at(8)).unwrap();
        plan.set_status("John 3:16", PlanStatus::Processed, at(10)).unwrap();

        let next = plan.next_pending().unwrap();
        assert_eq!(next.reference, "1 Sam 23:1-6");
        assert_eq!(plan.find("John 3:16").unwrap().updated_at, at(10));
    }

    #[test]
    fn updates_on_missing_reference_fail() {
        let mut plan = StudyPlan::default();
        assert!(matches!(
            plan.set_status("Ruth 1:1", PlanStatus::Complete, at(8)),
            Err(AppError::PlanItemNotFound(_))
        ));
        assert!(plan.set_title("Ruth 1:1", "Naomi and Ruth", at(8)).is_err());
    }

    #[test]
    fn serializes_with_status_names() {
        let mut plan = StudyPlan::default();
        plan.add("Ruth 1:16", at(8)).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["items"][0]["status"], "Pending");
        assert!(json["items"][0].get("title").is_none());

        let back: StudyPlan = serde_json::from_value(json).unwrap();
        assert_eq!(back, plan);
    }
}
