// src/types/job.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::candidate::ClearanceLevel;

/// Job posting as maintained by the admin side of the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub clearance_required: String,
    pub description: String,
    pub is_active: bool,
    pub posted_at: DateTime<Utc>,
}

impl JobPosting {
    /// The clearance a candidate must hold, if this posting requires one.
    /// A value of "none" (or anything unrecognized) means no requirement.
    pub fn required_clearance(&self) -> Option<ClearanceLevel> {
        let level = ClearanceLevel::parse(&self.clearance_required)?;
        (level != ClearanceLevel::None).then_some(level)
    }
}

/// Insert payload for new postings (admin tooling, tests).
#[derive(Debug, Clone)]
pub struct NewJobPosting {
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub clearance_required: String,
    pub description: String,
    pub is_active: bool,
    pub posted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(clearance: &str) -> JobPosting {
        JobPosting {
            id: 1,
            title: "Medical Physicist".to_string(),
            department: "Medical Physics".to_string(),
            location: "Washington DC".to_string(),
            employment_type: "full-time".to_string(),
            clearance_required: clearance.to_string(),
            description: String::new(),
            is_active: true,
            posted_at: Utc::now(),
        }
    }

    #[test]
    fn none_clearance_means_no_requirement() {
        assert!(posting("none").required_clearance().is_none());
    }

    #[test]
    fn unrecognized_clearance_means_no_requirement() {
        assert!(posting("unknown-tier").required_clearance().is_none());
    }

    #[test]
    fn real_requirement_is_surfaced() {
        assert_eq!(
            posting("secret").required_clearance(),
            Some(ClearanceLevel::Secret)
        );
    }
}
