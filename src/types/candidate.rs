// src/types/candidate.rs
//! Candidate records and their job-matching preferences.
//!
//! Preference lists are stored as JSON-encoded text columns maintained by the
//! web application. They are parsed exactly once at load time; a missing,
//! empty, or unparseable column means "no preference on this dimension" and
//! never an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Security clearance levels, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ClearanceLevel {
    None,
    PublicTrust,
    Secret,
    TopSecret,
}

impl ClearanceLevel {
    /// Parse the stored text value. Unknown values count as absent.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "none" => Some(Self::None),
            "public-trust" | "public_trust" => Some(Self::PublicTrust),
            "secret" => Some(Self::Secret),
            "top-secret" | "top_secret" => Some(Self::TopSecret),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PublicTrust => "public trust",
            Self::Secret => "secret",
            Self::TopSecret => "top secret",
        }
    }

    /// Whether a candidate holding this level meets a job's required level.
    pub fn satisfies(self, required: ClearanceLevel) -> bool {
        self >= required
    }
}

/// Raw candidate row as stored, preference columns still JSON text.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub email: String,
    pub display_name: Option<String>,
    pub specialty: Option<String>,
    pub digest_opt_in: bool,
    pub min_match_score: i64,
    pub desired_locations: Option<String>,
    pub desired_departments: Option<String>,
    pub desired_employment_types: Option<String>,
    pub clearance_level: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Structured preferences, each dimension independently optional.
#[derive(Debug, Clone, Default)]
pub struct CandidatePreferences {
    pub locations: Option<Vec<String>>,
    pub departments: Option<Vec<String>>,
    pub employment_types: Option<Vec<String>>,
    pub clearance: Option<ClearanceLevel>,
}

/// Candidate with preferences parsed and ready for scoring.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: i64,
    pub email: String,
    pub display_name: Option<String>,
    pub specialty: Option<String>,
    pub min_match_score: i64,
    pub preferences: CandidatePreferences,
}

impl Candidate {
    pub fn from_row(row: CandidateRow) -> Self {
        let preferences = CandidatePreferences {
            locations: parse_preference_list(row.desired_locations.as_deref()),
            departments: parse_preference_list(row.desired_departments.as_deref()),
            employment_types: parse_preference_list(row.desired_employment_types.as_deref()),
            clearance: row.clearance_level.as_deref().and_then(ClearanceLevel::parse),
        };

        Self {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            specialty: row.specialty,
            min_match_score: row.min_match_score,
            preferences,
        }
    }

    /// Name used in the email greeting, with a generic fallback.
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("there")
    }
}

/// Insert payload for new candidate rows (CSV import, tests).
#[derive(Debug, Clone, Default)]
pub struct NewCandidate {
    pub email: String,
    pub display_name: Option<String>,
    pub specialty: Option<String>,
    pub digest_opt_in: bool,
    pub min_match_score: i64,
    pub desired_locations: Option<String>,
    pub desired_departments: Option<String>,
    pub desired_employment_types: Option<String>,
    pub clearance_level: Option<String>,
}

/// Parse a JSON-encoded string array stored in a text column.
/// Anything that is not a non-empty array of non-blank strings is treated
/// as "no preference".
fn parse_preference_list(raw: Option<&str>) -> Option<Vec<String>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    let values: Vec<String> = serde_json::from_str(raw).ok()?;
    let values: Vec<String> = values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_preferences(
        locations: Option<&str>,
        clearance: Option<&str>,
    ) -> CandidateRow {
        CandidateRow {
            id: 1,
            email: "nurse@example.com".to_string(),
            display_name: Some("Jordan".to_string()),
            specialty: Some("Dosimetry".to_string()),
            digest_opt_in: true,
            min_match_score: 40,
            desired_locations: locations.map(str::to_string),
            desired_departments: None,
            desired_employment_types: None,
            clearance_level: clearance.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn parses_valid_preference_list() {
        let candidate =
            Candidate::from_row(row_with_preferences(Some(r#"["Washington DC","Remote"]"#), None));
        assert_eq!(
            candidate.preferences.locations,
            Some(vec!["Washington DC".to_string(), "Remote".to_string()])
        );
    }

    #[test]
    fn malformed_json_means_no_preference() {
        let candidate = Candidate::from_row(row_with_preferences(Some("not json at all"), None));
        assert!(candidate.preferences.locations.is_none());
    }

    #[test]
    fn empty_or_blank_lists_mean_no_preference() {
        let empty = Candidate::from_row(row_with_preferences(Some("[]"), None));
        assert!(empty.preferences.locations.is_none());

        let blanks = Candidate::from_row(row_with_preferences(Some(r#"["", "  "]"#), None));
        assert!(blanks.preferences.locations.is_none());
    }

    #[test]
    fn blank_entries_are_dropped_but_rest_survive() {
        let candidate =
            Candidate::from_row(row_with_preferences(Some(r#"["", "Boston"]"#), None));
        assert_eq!(
            candidate.preferences.locations,
            Some(vec!["Boston".to_string()])
        );
    }

    #[test]
    fn clearance_parses_case_insensitively() {
        assert_eq!(
            ClearanceLevel::parse("Top-Secret"),
            Some(ClearanceLevel::TopSecret)
        );
        assert_eq!(
            ClearanceLevel::parse("PUBLIC_TRUST"),
            Some(ClearanceLevel::PublicTrust)
        );
        assert_eq!(ClearanceLevel::parse("cosmic"), None);
    }

    #[test]
    fn clearance_levels_are_ordered() {
        assert!(ClearanceLevel::TopSecret.satisfies(ClearanceLevel::Secret));
        assert!(ClearanceLevel::Secret.satisfies(ClearanceLevel::Secret));
        assert!(!ClearanceLevel::PublicTrust.satisfies(ClearanceLevel::Secret));
        assert!(!ClearanceLevel::None.satisfies(ClearanceLevel::PublicTrust));
    }

    #[test]
    fn greeting_falls_back_when_name_missing_or_blank() {
        let mut row = row_with_preferences(None, None);
        row.display_name = None;
        assert_eq!(Candidate::from_row(row.clone()).greeting_name(), "there");

        row.display_name = Some("   ".to_string());
        assert_eq!(Candidate::from_row(row.clone()).greeting_name(), "there");

        row.display_name = Some("Jordan".to_string());
        assert_eq!(Candidate::from_row(row).greeting_name(), "Jordan");
    }

    #[test]
    fn clearance_column_flows_into_preferences() {
        let candidate = Candidate::from_row(row_with_preferences(None, Some("secret")));
        assert_eq!(candidate.preferences.clearance, Some(ClearanceLevel::Secret));

        let garbage = Candidate::from_row(row_with_preferences(None, Some("galactic")));
        assert!(garbage.preferences.clearance.is_none());
    }
}
