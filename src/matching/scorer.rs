// src/matching/scorer.rs
//! Weighted compatibility score between one candidate and one job posting.
//!
//! Each preference dimension the candidate actually filled in contributes its
//! weight to the possible total; the earned total collects the weights of the
//! dimensions the posting satisfies. The final score is the earned share of
//! the possible total, scaled to 0-100. A candidate with no structured
//! preferences at all falls back to a fixed specialty heuristic.

use crate::types::candidate::Candidate;
use crate::types::job::JobPosting;

pub const LOCATION_WEIGHT: i64 = 30;
pub const DEPARTMENT_WEIGHT: i64 = 30;
pub const EMPLOYMENT_TYPE_WEIGHT: i64 = 20;
pub const CLEARANCE_WEIGHT: i64 = 20;

/// Fixed fallback scores for candidates without structured preferences.
/// Kept as-is for compatibility with historical digests.
pub const SPECIALTY_FALLBACK_SCORE: i64 = 75;
pub const NEUTRAL_FALLBACK_SCORE: i64 = 50;

pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub(crate) fn location_satisfied(candidate: &Candidate, job: &JobPosting) -> bool {
    candidate
        .preferences
        .locations
        .as_ref()
        .is_some_and(|wanted| wanted.iter().any(|want| contains_ci(&job.location, want)))
}

pub(crate) fn department_satisfied(candidate: &Candidate, job: &JobPosting) -> bool {
    candidate
        .preferences
        .departments
        .as_ref()
        .is_some_and(|wanted| wanted.iter().any(|want| contains_ci(&job.department, want)))
}

pub(crate) fn employment_type_satisfied(candidate: &Candidate, job: &JobPosting) -> bool {
    candidate
        .preferences
        .employment_types
        .as_ref()
        .is_some_and(|wanted| wanted.iter().any(|want| want == &job.employment_type))
}

/// True when the posting requires clearance, the candidate declared a level,
/// and that level is at or above the requirement.
pub(crate) fn clearance_satisfied(candidate: &Candidate, job: &JobPosting) -> bool {
    match (candidate.preferences.clearance, job.required_clearance()) {
        (Some(held), Some(required)) => held.satisfies(required),
        _ => false,
    }
}

pub(crate) fn specialty_aligned(candidate: &Candidate, job: &JobPosting) -> bool {
    candidate
        .specialty
        .as_deref()
        .map(str::trim)
        .filter(|specialty| !specialty.is_empty())
        .is_some_and(|specialty| contains_ci(&job.department, specialty))
}

/// Compute the 0-100 compatibility score. Deterministic, no side effects.
pub fn score_candidate_job(candidate: &Candidate, job: &JobPosting) -> i64 {
    let prefs = &candidate.preferences;
    let mut earned: i64 = 0;
    let mut possible: i64 = 0;

    if prefs.locations.is_some() {
        possible += LOCATION_WEIGHT;
        if location_satisfied(candidate, job) {
            earned += LOCATION_WEIGHT;
        }
    }

    if prefs.departments.is_some() {
        possible += DEPARTMENT_WEIGHT;
        if department_satisfied(candidate, job) {
            earned += DEPARTMENT_WEIGHT;
        }
    }

    if prefs.employment_types.is_some() {
        possible += EMPLOYMENT_TYPE_WEIGHT;
        if employment_type_satisfied(candidate, job) {
            earned += EMPLOYMENT_TYPE_WEIGHT;
        }
    }

    // The clearance dimension only counts when the posting actually requires
    // a clearance; a job open to everyone neither rewards nor penalizes.
    if prefs.clearance.is_some() && job.required_clearance().is_some() {
        possible += CLEARANCE_WEIGHT;
        if clearance_satisfied(candidate, job) {
            earned += CLEARANCE_WEIGHT;
        }
    }

    if possible == 0 {
        return specialty_fallback(candidate, job);
    }

    ((earned as f64 / possible as f64) * 100.0).round() as i64
}

fn specialty_fallback(candidate: &Candidate, job: &JobPosting) -> i64 {
    if specialty_aligned(candidate, job) {
        SPECIALTY_FALLBACK_SCORE
    } else {
        NEUTRAL_FALLBACK_SCORE
    }
}
