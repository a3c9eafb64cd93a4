// src/email/template.rs
//! Fixed HTML template for the weekly digest email.

use std::collections::HashMap;

use crate::matching::digest::JobMatch;
use crate::types::candidate::Candidate;

pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;

const DIGEST_SKELETON: &str = r#"<!DOCTYPE html>
<html>
  <body style="margin:0;padding:0;background-color:#f4f6f8;font-family:Arial,Helvetica,sans-serif;">
    <div style="max-width:640px;margin:0 auto;padding:24px;">
      <div style="background-color:#0f4c81;border-radius:8px 8px 0 0;padding:28px 32px;">
        <h1 style="margin:0;color:#ffffff;font-size:22px;">Your Weekly Job Matches</h1>
      </div>
      <div style="background-color:#ffffff;border-radius:0 0 8px 8px;padding:32px;">
        <p style="font-size:16px;color:#1f2933;">Hi {{greeting}},</p>
        <p style="font-size:14px;color:#3e4c59;">We found {{match_count}} new opening(s) from the past week that fit your preferences.</p>
        {{cards}}
        <p style="font-size:12px;color:#7b8794;margin-top:32px;">You are receiving this because you opted into weekly job match emails. Manage your preferences at {{site_url}}/account.</p>
      </div>
    </div>
  </body>
</html>"#;

/// Subject line with singular/plural wording.
pub fn subject_line(match_count: usize) -> String {
    if match_count == 1 {
        "1 New Job Match".to_string()
    } else {
        format!("{} New Job Matches", match_count)
    }
}

/// Render the full digest body for one candidate.
pub fn render_digest_html(candidate: &Candidate, matches: &[JobMatch], site_base_url: &str) -> String {
    let cards: Vec<String> = matches
        .iter()
        .map(|job_match| render_match_card(job_match, site_base_url))
        .collect();

    let mut vars = HashMap::new();
    vars.insert("greeting".to_string(), escape_html(candidate.greeting_name()));
    vars.insert("match_count".to_string(), matches.len().to_string());
    vars.insert("cards".to_string(), cards.join("\n"));
    vars.insert("site_url".to_string(), site_base_url.to_string());

    process_variables(DIGEST_SKELETON, &vars)
}

fn render_match_card(job_match: &JobMatch, site_base_url: &str) -> String {
    let job = &job_match.job;

    let reasons: String = job_match
        .reasons
        .iter()
        .map(|reason| format!("<li style=\"margin-bottom:4px;\">{}</li>", escape_html(reason)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<div style="border:1px solid #e4e7eb;border-radius:8px;padding:20px;margin-top:16px;">
  <table style="width:100%;"><tr>
    <td><h2 style="margin:0;font-size:17px;color:#0f4c81;">{title}</h2></td>
    <td style="text-align:right;"><span style="background-color:#e3f2e8;color:#1d7a46;border-radius:12px;padding:4px 10px;font-size:13px;font-weight:bold;">{score}% match</span></td>
  </tr></table>
  <p style="font-size:13px;color:#3e4c59;margin:10px 0;">&#128205; {location} &nbsp; &#127973; {department} &nbsp; &#128336; {employment_type} &nbsp; &#128274; {clearance}</p>
  <p style="font-size:13px;color:#52606d;">{description}</p>
  <ul style="font-size:13px;color:#3e4c59;padding-left:18px;">
{reasons}
  </ul>
  <a href="{site_url}/jobs/{job_id}" style="display:inline-block;background-color:#0f4c81;color:#ffffff;text-decoration:none;border-radius:6px;padding:10px 18px;font-size:14px;">View &amp; Apply</a>
</div>"#,
        title = escape_html(&job.title),
        score = job_match.score,
        location = escape_html(&job.location),
        department = escape_html(&job.department),
        employment_type = escape_html(&job.employment_type),
        clearance = escape_html(&job.clearance_required),
        description = escape_html(&truncate_description(&job.description, DESCRIPTION_PREVIEW_CHARS)),
        reasons = reasons,
        site_url = site_base_url,
        job_id = job.id,
    )
}

/// Cut the description down to a preview, on a character boundary.
pub fn truncate_description(description: &str, limit: usize) -> String {
    let trimmed = description.trim();
    if trimmed.chars().count() <= limit {
        return trimmed.to_string();
    }

    let head: String = trimmed.chars().take(limit).collect();
    format!("{}...", head)
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Replace {{key}} placeholders in the skeleton.
fn process_variables(content: &str, variables: &HashMap<String, String>) -> String {
    let mut result = content.to_string();
    for (key, value) in variables {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::candidate::CandidatePreferences;
    use crate::types::job::JobPosting;
    use chrono::Utc;

    fn candidate(display_name: Option<&str>) -> Candidate {
        Candidate {
            id: 1,
            email: "pat@example.com".to_string(),
            display_name: display_name.map(str::to_string),
            specialty: None,
            min_match_score: 0,
            preferences: CandidatePreferences::default(),
        }
    }

    fn job_match(description: &str) -> JobMatch {
        JobMatch {
            job: JobPosting {
                id: 42,
                title: "Medical Physicist".to_string(),
                department: "Medical Physics".to_string(),
                location: "Washington DC".to_string(),
                employment_type: "full-time".to_string(),
                clearance_required: "secret".to_string(),
                description: description.to_string(),
                is_active: true,
                posted_at: Utc::now(),
            },
            score: 87,
            reasons: vec!["Washington DC is one of your preferred locations".to_string()],
        }
    }

    #[test]
    fn subject_uses_singular_and_plural_forms() {
        assert_eq!(subject_line(1), "1 New Job Match");
        assert_eq!(subject_line(3), "3 New Job Matches");
    }

    #[test]
    fn greeting_uses_display_name_with_fallback() {
        let matches = vec![job_match("A role.")];

        let named = render_digest_html(&candidate(Some("Jordan")), &matches, "https://example.com");
        assert!(named.contains("Hi Jordan,"));

        let anonymous = render_digest_html(&candidate(None), &matches, "https://example.com");
        assert!(anonymous.contains("Hi there,"));
    }

    #[test]
    fn card_links_to_the_job_detail_page() {
        let matches = vec![job_match("A role.")];
        let html = render_digest_html(&candidate(None), &matches, "https://example.com");

        assert!(html.contains("https://example.com/jobs/42"));
        assert!(html.contains("87% match"));
        assert!(html.contains("preferred locations"));
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let long = "x".repeat(450);
        let preview = truncate_description(&long, DESCRIPTION_PREVIEW_CHARS);
        assert_eq!(preview.chars().count(), DESCRIPTION_PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn short_descriptions_pass_through() {
        assert_eq!(truncate_description("  short text  ", 200), "short text");
    }

    #[test]
    fn truncation_respects_multibyte_characters() {
        let long = "é".repeat(250);
        let preview = truncate_description(&long, DESCRIPTION_PREVIEW_CHARS);
        assert!(preview.starts_with(&"é".repeat(DESCRIPTION_PREVIEW_CHARS)));
    }

    #[test]
    fn markup_in_user_content_is_escaped() {
        let matches = vec![job_match("<script>alert(1)</script>")];
        let html = render_digest_html(&candidate(Some("<b>Pat</b>")), &matches, "https://example.com");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Hi &lt;b&gt;Pat&lt;/b&gt;,"));
    }
}
