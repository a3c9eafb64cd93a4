// src/digest_cli.rs
use anyhow::Result;
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::batch::{DigestBatch, MATCH_WINDOW_DAYS};
use crate::config::DigestConfig;
use crate::database::{CandidateRepository, Database, JobRepository};
use crate::email::client::EmailClient;
use crate::email::template::subject_line;
use crate::matching::digest::compile_digest;
use crate::types::candidate::NewCandidate;

#[derive(Parser)]
#[command(name = "staffmatch")]
#[command(about = "Weekly job-match digest for the staffing platform")]
pub struct DigestCli {
    #[command(subcommand)]
    pub command: DigestCommand,
}

#[derive(Subcommand)]
pub enum DigestCommand {
    /// Run the weekly digest batch
    Run {
        /// Compile and render digests without sending or logging
        #[arg(long)]
        dry_run: bool,
    },
    /// Show one candidate's current matches without sending anything
    Preview { email: String },
    /// List digest-enabled candidates
    Candidates,
    /// List job postings inside the matching window
    Jobs,
    /// Import candidates from a CSV file (email,display_name,specialty,min_match_score)
    Import { csv_file: PathBuf },
    /// Initialize the database schema
    Init,
}

pub async fn handle_digest_command(cli: DigestCli, config: &DigestConfig) -> Result<()> {
    let db = Database::connect(&config.database_url).await?;

    match cli.command {
        DigestCommand::Run { dry_run } => {
            if dry_run {
                run_dry(&db).await?;
            } else {
                let mailer =
                    EmailClient::new(config.resend_base_url.clone(), config.resend_api_key.clone())?;
                let batch = DigestBatch::new(db.pool(), &mailer, config.site_base_url.clone());
                let summary = batch.run().await?;

                info!("Digest batch finished: {} sent, {} failed", summary.sent, summary.failed);
                if summary.failed > 0 {
                    anyhow::bail!("{} digest deliveries failed", summary.failed);
                }
            }
        }

        DigestCommand::Preview { email } => {
            let candidate = CandidateRepository::new(db.pool())
                .find_by_email(&email)
                .await?
                .ok_or_else(|| anyhow::anyhow!("No candidate found for email: {}", email))?;

            let cutoff = Utc::now() - Duration::days(MATCH_WINDOW_DAYS);
            let jobs = JobRepository::new(db.pool()).list_active_since(cutoff).await?;
            let matches = compile_digest(&candidate, &jobs);

            if matches.is_empty() {
                info!(
                    "No matches at or above {} for {} this week",
                    candidate.min_match_score, email
                );
                return Ok(());
            }

            info!("{} current matches for {}:", matches.len(), email);
            for job_match in &matches {
                info!(
                    "  {:>3}%  {} ({}, {})",
                    job_match.score, job_match.job.title, job_match.job.location, job_match.job.department
                );
                for reason in &job_match.reasons {
                    info!("        - {}", reason);
                }
            }
        }

        DigestCommand::Candidates => {
            let candidates = CandidateRepository::new(db.pool()).list_digest_enabled().await?;
            if candidates.is_empty() {
                info!("No digest-enabled candidates found.");
            } else {
                info!("Digest-enabled candidates:");
                for candidate in candidates {
                    info!(
                        "  {:<5} {:<30} min score {:>3}",
                        candidate.id, candidate.email, candidate.min_match_score
                    );
                }
            }
        }

        DigestCommand::Jobs => {
            let cutoff = Utc::now() - Duration::days(MATCH_WINDOW_DAYS);
            let jobs = JobRepository::new(db.pool()).list_active_since(cutoff).await?;
            if jobs.is_empty() {
                info!("No active postings in the last {} days.", MATCH_WINDOW_DAYS);
            } else {
                info!("Active postings in the last {} days:", MATCH_WINDOW_DAYS);
                for job in jobs {
                    info!(
                        "  {:<5} {:<35} {:<20} {} ({})",
                        job.id,
                        job.title,
                        job.location,
                        job.department,
                        job.posted_at.format("%Y-%m-%d")
                    );
                }
            }
        }

        DigestCommand::Import { csv_file } => {
            import_candidates(&db, &csv_file).await?;
        }

        DigestCommand::Init => {
            info!("✅ Database initialized at: {}", config.database_url);
            info!("   Tables: candidates, job_postings, notification_logs");
        }
    }

    Ok(())
}

/// Compile every digest without dispatching or logging anything.
async fn run_dry(db: &Database) -> Result<()> {
    let candidates = CandidateRepository::new(db.pool()).list_digest_enabled().await?;
    let cutoff = Utc::now() - Duration::days(MATCH_WINDOW_DAYS);
    let jobs = JobRepository::new(db.pool()).list_active_since(cutoff).await?;

    let mut would_send = 0usize;
    for candidate in &candidates {
        let matches = compile_digest(candidate, &jobs);
        if matches.is_empty() {
            continue;
        }

        would_send += 1;
        info!(
            "Would send \"{}\" to {} (top score {})",
            subject_line(matches.len()),
            candidate.email,
            matches[0].score
        );
    }

    info!(
        "Dry run complete: {} of {} candidates would receive a digest",
        would_send,
        candidates.len()
    );
    Ok(())
}

async fn import_candidates(db: &Database, csv_file: &PathBuf) -> Result<()> {
    if !csv_file.exists() {
        anyhow::bail!("CSV file not found: {}", csv_file.display());
    }

    let content = tokio::fs::read_to_string(csv_file).await?;
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let repo = CandidateRepository::new(db.pool());

    let mut success_count = 0;
    let mut error_count = 0;

    for result in reader.records() {
        match result {
            Ok(record) => {
                let email = record.get(0).unwrap_or("").trim();
                if email.is_empty() {
                    error_count += 1;
                    warn!("⚠️  Skipping record with empty email");
                    continue;
                }

                let candidate = NewCandidate {
                    email: email.to_string(),
                    display_name: non_empty(record.get(1)),
                    specialty: non_empty(record.get(2)),
                    digest_opt_in: true,
                    min_match_score: record
                        .get(3)
                        .and_then(|value| value.trim().parse().ok())
                        .unwrap_or(0),
                    ..NewCandidate::default()
                };

                match repo.create(&candidate).await {
                    Ok(_) => {
                        success_count += 1;
                        info!("✅ Added: {}", email);
                    }
                    Err(e) => {
                        error_count += 1;
                        if e.to_string().contains("UNIQUE constraint failed") {
                            warn!("⚠️  Skipped (already exists): {}", email);
                        } else {
                            error!("❌ Failed to add {}: {}", email, e);
                        }
                    }
                }
            }
            Err(e) => {
                error_count += 1;
                error!("❌ CSV parsing error: {}", e);
            }
        }
    }

    info!("Import completed:");
    info!("  ✅ Success: {}", success_count);
    info!("  ❌ Errors:  {}", error_count);
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
