//! Raw form input and its conversion into request bodies.
//!
//! Forms hold what the user typed. Conversion applies the same clean-up the
//! web forms did: skills split on commas, blank dates and years omitted.

use chrono::{DateTime, NaiveDate, Utc};
use jobboard_types::{CompanyDraft, Job, JobDraft};
use serde_json::Value;

/// Job posting form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobForm {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub job_type: String,
    pub experience_level: String,
    pub salary: String,
    /// Comma separated.
    pub skills: String,
    /// `YYYY-MM-DD`, or empty.
    pub application_deadline: String,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            requirements: String::new(),
            location: String::new(),
            job_type: "Full-time".to_string(),
            experience_level: "Entry".to_string(),
            salary: String::new(),
            skills: String::new(),
            application_deadline: String::new(),
        }
    }
}

impl JobForm {
    /// Prefills the form from an existing posting for editing.
    pub fn from_job(job: &Job) -> Self {
        let text = |key: &str| job.str_field(key).unwrap_or_default().to_string();
        let skills = job
            .as_value()
            .get("skills")
            .and_then(Value::as_array)
            .map(|skills| {
                skills
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        Self {
            title: text("title"),
            description: text("description"),
            requirements: text("requirements"),
            location: text("location"),
            job_type: text("jobType"),
            experience_level: text("experienceLevel"),
            salary: text("salary"),
            skills,
            application_deadline: job
                .str_field("applicationDeadline")
                .and_then(date_part)
                .unwrap_or_default(),
        }
    }

    pub fn to_draft(&self) -> JobDraft {
        let deadline = self.application_deadline.trim();
        JobDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            requirements: self.requirements.clone(),
            location: self.location.clone(),
            job_type: self.job_type.clone(),
            experience_level: self.experience_level.clone(),
            salary: self.salary.trim().to_string(),
            skills: JobDraft::parse_skills(&self.skills),
            application_deadline: (!deadline.is_empty()).then(|| deadline.to_string()),
        }
    }
}

/// Reduces a server timestamp to its UTC calendar date.
fn date_part(raw: &str) -> Option<String> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc).date_naive().to_string());
    }
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d")
        .ok()
        .map(|date| date.to_string())
}

/// Company form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyForm {
    pub name: String,
    pub description: String,
    pub website: String,
    pub industry: String,
    pub location: String,
    pub size: String,
    /// Free text; anything that is not a whole number is left out.
    pub founded_year: String,
}

impl CompanyForm {
    pub fn to_draft(&self) -> CompanyDraft {
        CompanyDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            website: self.website.clone(),
            industry: self.industry.clone(),
            location: self.location.clone(),
            size: self.size.clone(),
            founded_year: self.founded_year.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use jobboard_types::Record;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_job_form_to_draft_cleans_input() {
        let form = JobForm {
            title: "Rust Dev".to_string(),
            skills: "rust,  tokio , ,".to_string(),
            application_deadline: "  ".to_string(),
            ..Default::default()
        };

        let draft = form.to_draft();

        assert_eq!(draft.skills, vec!["rust", "tokio"]);
        assert_eq!(draft.application_deadline, None);
        assert_eq!(draft.job_type, "Full-time");
        assert_eq!(draft.experience_level, "Entry");
    }

    #[test]
    fn test_job_form_from_job_formats_skills_and_deadline() {
        let job = Record(json!({
            "_id": "j1",
            "title": "Rust Dev",
            "jobType": "Contract",
            "experienceLevel": "Senior",
            "skills": ["rust", "tokio"],
            "applicationDeadline": "2025-03-01T23:30:00.000-02:00"
        }));

        let form = JobForm::from_job(&job);

        assert_eq!(form.skills, "rust, tokio");
        assert_eq!(form.application_deadline, "2025-03-02");
        assert_eq!(form.job_type, "Contract");
        assert_eq!(form.salary, "");
    }

    #[test]
    fn test_date_part_accepts_plain_dates() {
        assert_eq!(date_part("2025-04-05"), Some("2025-04-05".to_string()));
        assert_eq!(date_part("soon"), None);
    }

    #[test]
    fn test_company_form_founded_year() {
        let mut form = CompanyForm {
            name: "Acme".to_string(),
            founded_year: " 1999 ".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_draft().founded_year, Some(1999));

        form.founded_year = String::new();
        assert_eq!(form.to_draft().founded_year, None);
    }
}
