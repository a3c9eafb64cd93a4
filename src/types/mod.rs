// src/types/mod.rs
pub mod candidate;
pub mod job;
pub mod notification;

pub use candidate::{Candidate, CandidatePreferences, CandidateRow, ClearanceLevel, NewCandidate};
pub use job::{JobPosting, NewJobPosting};
pub use notification::{DeliveryStatus, NotificationLog, NotificationLogInsert};
