// src/matching/digest.rs
//! Compile one candidate's digest from the week's eligible postings.

use crate::matching::reasons::match_reasons;
use crate::matching::scorer::score_candidate_job;
use crate::types::candidate::Candidate;
use crate::types::job::JobPosting;

/// A scored pairing of one candidate and one posting. Ephemeral: recomputed
/// on every run, never stored.
#[derive(Debug, Clone)]
pub struct JobMatch {
    pub job: JobPosting,
    pub score: i64,
    pub reasons: Vec<String>,
}

/// Score every eligible posting for the candidate, keep those at or above
/// the candidate's minimum, strongest first. Equal scores keep the incoming
/// posting order. An empty result means the candidate is skipped this week.
pub fn compile_digest(candidate: &Candidate, jobs: &[JobPosting]) -> Vec<JobMatch> {
    let mut matches: Vec<JobMatch> = jobs
        .iter()
        .map(|job| {
            let score = score_candidate_job(candidate, job);
            JobMatch {
                job: job.clone(),
                score,
                reasons: match_reasons(candidate, job, score),
            }
        })
        .filter(|candidate_match| candidate_match.score >= candidate.min_match_score)
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}
