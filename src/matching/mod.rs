// src/matching/mod.rs
pub mod digest;
pub mod reasons;
pub mod scorer;

pub use digest::{compile_digest, JobMatch};
pub use reasons::match_reasons;
pub use scorer::score_candidate_job;
