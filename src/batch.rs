// src/batch.rs
//! Weekly digest batch: one sequential pass over opted-in candidates.
//!
//! A failure loading candidates or jobs is fatal and aborts the run. A
//! failure sending or logging for one candidate is recorded and the loop
//! moves on to the next candidate.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::database::{CandidateRepository, JobRepository, NotificationLogRepository};
use crate::email::client::{DigestEmail, DigestMailer, FROM_ADDRESS};
use crate::email::template::{render_digest_html, subject_line};
use crate::matching::digest::{compile_digest, JobMatch};
use crate::types::candidate::Candidate;
use crate::types::notification::{DeliveryStatus, NotificationLogInsert};

/// Jobs posted within this many days of the run are eligible for matching.
pub const MATCH_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestSummary {
    pub sent: usize,
    pub failed: usize,
}

pub struct DigestBatch<'a> {
    pool: &'a SqlitePool,
    mailer: &'a dyn DigestMailer,
    site_base_url: String,
}

impl<'a> DigestBatch<'a> {
    pub fn new(pool: &'a SqlitePool, mailer: &'a dyn DigestMailer, site_base_url: String) -> Self {
        Self {
            pool,
            mailer,
            site_base_url,
        }
    }

    /// Run the batch once. Candidates with no above-threshold matches are
    /// skipped silently: no email, no log row.
    pub async fn run(&self) -> Result<DigestSummary> {
        let run_id = Uuid::new_v4().to_string();

        let candidates = CandidateRepository::new(self.pool)
            .list_digest_enabled()
            .await
            .context("Failed to load digest candidates")?;

        let cutoff = Utc::now() - Duration::days(MATCH_WINDOW_DAYS);
        let jobs = JobRepository::new(self.pool)
            .list_active_since(cutoff)
            .await
            .context("Failed to load eligible job postings")?;

        info!(
            run_id = %run_id,
            candidates = candidates.len(),
            jobs = jobs.len(),
            "Starting weekly digest run"
        );

        let logs = NotificationLogRepository::new(self.pool);
        let mut summary = DigestSummary::default();

        for candidate in &candidates {
            let matches = compile_digest(candidate, &jobs);
            if matches.is_empty() {
                debug!(recipient = %candidate.email, "No matches above threshold, skipping");
                continue;
            }

            let subject = subject_line(matches.len());
            let email = DigestEmail {
                from: FROM_ADDRESS.to_string(),
                to: candidate.email.clone(),
                subject: subject.clone(),
                html: render_digest_html(candidate, &matches, &self.site_base_url),
            };

            match self.mailer.send(&email).await {
                Ok(()) => {
                    let entry =
                        log_entry(&run_id, candidate, &matches, &subject, DeliveryStatus::Sent, None);
                    match logs.insert(&entry).await {
                        Ok(_) => {
                            summary.sent += 1;
                            info!(
                                recipient = %candidate.email,
                                matches = matches.len(),
                                top_score = matches[0].score,
                                "Digest sent"
                            );
                        }
                        Err(e) => {
                            summary.failed += 1;
                            warn!(recipient = %candidate.email, error = %e, "Digest sent but logging failed");
                        }
                    }
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!(recipient = %candidate.email, error = %e, "Digest send failed");

                    let entry = log_entry(
                        &run_id,
                        candidate,
                        &matches,
                        &subject,
                        DeliveryStatus::Failed,
                        Some(e.to_string()),
                    );
                    if let Err(log_err) = logs.insert(&entry).await {
                        warn!(recipient = %candidate.email, error = %log_err, "Failed to record delivery failure");
                    }
                }
            }
        }

        info!(
            run_id = %run_id,
            sent = summary.sent,
            failed = summary.failed,
            "Weekly digest run complete"
        );
        Ok(summary)
    }
}

fn log_entry(
    run_id: &str,
    candidate: &Candidate,
    matches: &[JobMatch],
    subject: &str,
    status: DeliveryStatus,
    error: Option<String>,
) -> NotificationLogInsert {
    NotificationLogInsert {
        run_id: run_id.to_string(),
        recipient: candidate.email.clone(),
        subject: subject.to_string(),
        status,
        error,
        matched_job_ids: matches.iter().map(|m| m.job.id).collect(),
        match_count: matches.len() as i64,
        top_score: matches.first().map(|m| m.score).unwrap_or(0),
    }
}
