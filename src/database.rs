// src/database.rs
//! SQLite store for candidates, job postings, and notification logs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::types::candidate::{Candidate, CandidateRow, NewCandidate};
use crate::types::job::{JobPosting, NewJobPosting};
use crate::types::notification::{NotificationLog, NotificationLogInsert};

// ===== Connection Management =====

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect using the configured connection string and run migrations.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool and run migrations.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS candidates (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                display_name TEXT,
                specialty TEXT,
                digest_opt_in BOOLEAN NOT NULL DEFAULT FALSE,
                min_match_score INTEGER NOT NULL DEFAULT 0,
                desired_locations TEXT,
                desired_departments TEXT,
                desired_employment_types TEXT,
                clearance_level TEXT,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS job_postings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                department TEXT NOT NULL,
                location TEXT NOT NULL,
                employment_type TEXT NOT NULL,
                clearance_required TEXT NOT NULL DEFAULT 'none',
                description TEXT NOT NULL DEFAULT '',
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                posted_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS notification_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                run_id TEXT NOT NULL,
                recipient TEXT NOT NULL,
                subject TEXT NOT NULL,
                status TEXT NOT NULL,
                error TEXT,
                metadata TEXT,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_candidates_digest ON candidates(digest_opt_in);")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_job_postings_posted_at ON job_postings(posted_at);",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_notification_logs_run ON notification_logs(run_id);",
        )
        .execute(&self.pool)
        .await?;

        info!("Database migrations completed");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }
}

// ===== Candidate Repository =====

pub struct CandidateRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CandidateRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Candidates eligible for the weekly digest: opted in, with an email
    /// address on file. Preferences are parsed here, once per load.
    pub async fn list_digest_enabled(&self) -> Result<Vec<Candidate>> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT id, email, display_name, specialty, digest_opt_in, min_match_score,
                   desired_locations, desired_departments, desired_employment_types,
                   clearance_level, created_at
            FROM candidates
            WHERE digest_opt_in = TRUE AND email <> ''
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Candidate::from_row).collect())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Candidate>> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT id, email, display_name, specialty, digest_opt_in, min_match_score,
                   desired_locations, desired_departments, desired_employment_types,
                   clearance_level, created_at
            FROM candidates
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Candidate::from_row))
    }

    pub async fn create(&self, candidate: &NewCandidate) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO candidates (
                email, display_name, specialty, digest_opt_in, min_match_score,
                desired_locations, desired_departments, desired_employment_types,
                clearance_level, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&candidate.email)
        .bind(&candidate.display_name)
        .bind(&candidate.specialty)
        .bind(candidate.digest_opt_in)
        .bind(candidate.min_match_score)
        .bind(&candidate.desired_locations)
        .bind(&candidate.desired_departments)
        .bind(&candidate.desired_employment_types)
        .bind(&candidate.clearance_level)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        info!("Created candidate: {}", candidate.email);
        Ok(result.last_insert_rowid())
    }
}

// ===== Job Repository =====

pub struct JobRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> JobRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Active postings created at or after the cutoff, newest first.
    /// The cutoff itself is eligible.
    pub async fn list_active_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<JobPosting>> {
        let jobs = sqlx::query_as::<_, JobPosting>(
            r#"
            SELECT id, title, department, location, employment_type, clearance_required,
                   description, is_active, posted_at
            FROM job_postings
            WHERE is_active = TRUE AND posted_at >= ?
            ORDER BY posted_at DESC, id ASC
            "#,
        )
        .bind(cutoff)
        .fetch_all(self.pool)
        .await?;

        Ok(jobs)
    }

    pub async fn create(&self, job: &NewJobPosting) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO job_postings (
                title, department, location, employment_type, clearance_required,
                description, is_active, posted_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&job.title)
        .bind(&job.department)
        .bind(&job.location)
        .bind(&job.employment_type)
        .bind(&job.clearance_required)
        .bind(&job.description)
        .bind(job.is_active)
        .bind(job.posted_at)
        .execute(self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}

// ===== Notification Log Repository =====

pub struct NotificationLogRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> NotificationLogRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record one delivery attempt. Match metadata is stored as JSON.
    pub async fn insert(&self, entry: &NotificationLogInsert) -> Result<i64> {
        let metadata = serde_json::json!({
            "matched_job_ids": entry.matched_job_ids,
            "match_count": entry.match_count,
            "top_score": entry.top_score,
        })
        .to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO notification_logs (
                run_id, recipient, subject, status, error, metadata, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.run_id)
        .bind(&entry.recipient)
        .bind(&entry.subject)
        .bind(entry.status.as_str())
        .bind(&entry.error)
        .bind(metadata)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn list_for_run(&self, run_id: &str) -> Result<Vec<NotificationLog>> {
        let logs = sqlx::query_as::<_, NotificationLog>(
            r#"
            SELECT id, run_id, recipient, subject, status, error, metadata, created_at
            FROM notification_logs
            WHERE run_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(run_id)
        .fetch_all(self.pool)
        .await?;

        Ok(logs)
    }
}
