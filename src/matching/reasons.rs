// src/matching/reasons.rs
//! Human-readable explanations for why a posting matched. Display only;
//! scoring never reads these.

use crate::matching::scorer::{
    clearance_satisfied, department_satisfied, employment_type_satisfied, location_satisfied,
    specialty_aligned,
};
use crate::types::candidate::Candidate;
use crate::types::job::JobPosting;

/// One sentence per satisfied condition, in a fixed order: location,
/// department, employment type, clearance, specialty. Always returns at
/// least one entry; when nothing applies, a fallback sentence carries the
/// numeric score.
pub fn match_reasons(candidate: &Candidate, job: &JobPosting, score: i64) -> Vec<String> {
    let mut reasons = Vec::new();

    if location_satisfied(candidate, job) {
        reasons.push(format!("{} is one of your preferred locations", job.location));
    }

    if department_satisfied(candidate, job) {
        reasons.push(format!(
            "The {} department matches your preferences",
            job.department
        ));
    }

    if employment_type_satisfied(candidate, job) {
        reasons.push(format!(
            "Offers the {} schedule you are looking for",
            job.employment_type
        ));
    }

    if clearance_satisfied(candidate, job) {
        if let (Some(held), Some(required)) =
            (candidate.preferences.clearance, job.required_clearance())
        {
            reasons.push(format!(
                "Your {} clearance meets the {} requirement",
                held.label(),
                required.label()
            ));
        }
    }

    if specialty_aligned(candidate, job) {
        if let Some(specialty) = candidate.specialty.as_deref() {
            reasons.push(format!(
                "The {} department aligns with your {} specialty",
                job.department,
                specialty.trim()
            ));
        }
    }

    if reasons.is_empty() {
        reasons.push(format!("Scored {} out of 100 against your profile", score));
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::scorer::score_candidate_job;
    use crate::types::candidate::{CandidatePreferences, ClearanceLevel};
    use chrono::Utc;

    fn candidate() -> Candidate {
        Candidate {
            id: 1,
            email: "pat@example.com".to_string(),
            display_name: Some("Pat".to_string()),
            specialty: None,
            min_match_score: 0,
            preferences: CandidatePreferences {
                locations: Some(vec!["Washington DC".to_string()]),
                departments: Some(vec!["Medical Physics".to_string()]),
                employment_types: Some(vec!["full-time".to_string()]),
                clearance: Some(ClearanceLevel::Secret),
            },
        }
    }

    fn job() -> JobPosting {
        JobPosting {
            id: 10,
            title: "Chief Medical Physicist".to_string(),
            department: "Medical Physics".to_string(),
            location: "Washington DC".to_string(),
            employment_type: "full-time".to_string(),
            clearance_required: "secret".to_string(),
            description: String::new(),
            is_active: true,
            posted_at: Utc::now(),
        }
    }

    #[test]
    fn full_agreement_yields_four_reasons_in_order() {
        let candidate = candidate();
        let job = job();
        let score = score_candidate_job(&candidate, &job);
        let reasons = match_reasons(&candidate, &job, score);

        assert_eq!(reasons.len(), 4);
        assert!(reasons[0].contains("Washington DC"));
        assert!(reasons[1].contains("Medical Physics"));
        assert!(reasons[2].contains("full-time"));
        assert!(reasons[3].contains("clearance"));
    }

    #[test]
    fn no_match_falls_back_to_score_sentence() {
        let candidate = candidate();
        let mut job = job();
        job.location = "Boston".to_string();
        job.department = "Radiation Therapy".to_string();
        job.employment_type = "contract".to_string();
        job.clearance_required = "none".to_string();

        let reasons = match_reasons(&candidate, &job, 0);
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains('0'));
    }

    #[test]
    fn specialty_sentence_appears_alongside_structured_matches() {
        let mut candidate = candidate();
        candidate.specialty = Some("physics".to_string());

        let reasons = match_reasons(&candidate, &job(), 100);
        assert_eq!(reasons.len(), 5);
        assert!(reasons[4].contains("specialty"));
    }

    #[test]
    fn reasons_are_never_empty() {
        let candidate = Candidate {
            id: 9,
            email: "empty@example.com".to_string(),
            display_name: None,
            specialty: None,
            min_match_score: 0,
            preferences: CandidatePreferences::default(),
        };
        assert!(!match_reasons(&candidate, &job(), 50).is_empty());
    }
}
