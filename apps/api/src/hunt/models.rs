use serde::{Deserialize, Serialize};

/// Role used when the caller leaves it blank.
pub const FALLBACK_ROLE: &str = "Software Engineer";

/// Search preferences for one hunt run.
/// Missing fields in a request body take the scheduled-run defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HuntPreferences {
    pub role: String,
    pub experience: String,
    pub location: String,
    pub skills: Vec<String>,
}

impl Default for HuntPreferences {
    fn default() -> Self {
        Self {
            role: "Generative AI".to_string(),
            experience: "Any".to_string(),
            location: "Remote".to_string(),
            skills: Vec::new(),
        }
    }
}

impl HuntPreferences {
    pub fn effective_role(&self) -> &str {
        match self.role.trim() {
            "" => FALLBACK_ROLE,
            role => role,
        }
    }

    pub fn effective_location(&self) -> &str {
        self.location.trim()
    }
}

/// A job record as recovered from model output. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub source: Option<String>,
}

/// A deduplicated job posting. `link` is unique within one run's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: String,
    pub summary: String,
    pub source: String,
}

impl JobListing {
    /// Returns `None` when the record has no link to key it by.
    pub fn from_scraped(job: ScrapedJob) -> Option<Self> {
        let link = job.link?;
        Some(Self {
            title: job.title.unwrap_or_default(),
            company: job.company.unwrap_or_default(),
            location: job.location.unwrap_or_default(),
            link,
            summary: job.summary.unwrap_or_default(),
            source: job.source.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HuntStatus {
    Success,
    NoJobsFound,
}

/// Paths and identifiers produced by the report emitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub pdf_path: String,
    pub html_path: String,
    pub record_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntResult {
    pub status: HuntStatus,
    pub results: Vec<JobListing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportMeta>,
}

impl HuntResult {
    pub fn no_jobs_found() -> Self {
        Self {
            status: HuntStatus::NoJobsFound,
            results: Vec::new(),
            report: None,
        }
    }
}
