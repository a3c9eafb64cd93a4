// src/lib.rs
//! Candidate/job match scoring and the weekly email digest batch for the
//! staffing platform. The web application owns the candidate and posting
//! tables; this crate reads them, scores postings against candidate
//! preferences, and dispatches digest emails on a schedule.

pub mod batch;
pub mod config;
pub mod database;
pub mod digest_cli;
pub mod email;
pub mod matching;
pub mod types;

pub use batch::{DigestBatch, DigestSummary, MATCH_WINDOW_DAYS};
pub use config::DigestConfig;
pub use database::Database;
