// src/types/notification.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

/// One row per attempted send. Written exactly once per candidate per run,
/// never updated afterwards.
#[derive(Debug, Clone)]
pub struct NotificationLogInsert {
    pub run_id: String,
    pub recipient: String,
    pub subject: String,
    pub status: DeliveryStatus,
    pub error: Option<String>,
    pub matched_job_ids: Vec<i64>,
    pub match_count: i64,
    pub top_score: i64,
}

/// Stored log row, metadata kept as the JSON it was written with.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NotificationLog {
    pub id: i64,
    pub run_id: String,
    pub recipient: String,
    pub subject: String,
    pub status: String,
    pub error: Option<String>,
    pub metadata: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_matches_stored_values() {
        assert_eq!(DeliveryStatus::Sent.as_str(), "sent");
        assert_eq!(DeliveryStatus::Failed.as_str(), "failed");
    }
}
