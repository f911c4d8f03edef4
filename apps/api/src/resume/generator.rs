//! Tailored resume generation.
//!
//! Flow: portfolio from the document store -> LLM writes resume JSON for the
//! target job -> HTML in the chosen style -> PDF -> upload to `resume_generated`.

use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::hunt::truncate_chars;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{strip_json_fences, LanguageModel};
use crate::report::pdf::PdfRenderer;
use crate::report::{file_upload, write_document};
use crate::resume::portfolio::{fetch_portfolio, Portfolio};
use crate::resume::prompts::{RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM};
use crate::resume::templates::{render_resume, ResumeStyle};
use crate::store::DocumentStore;

pub const RESUME_COLLECTION: &str = "resume_generated";

const INVALID_JSON_MESSAGE: &str = "AI did not return valid JSON. Please try again.";

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ResumeRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub style: String,
}

/// Resume content as written by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TailoredResume {
    #[serde(default, deserialize_with = "text_or_sentences")]
    pub summary: String,
    #[serde(default, deserialize_with = "list_or_csv")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<ResumeProject>,
    #[serde(default)]
    pub certifications: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProject {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub tech: String,
    #[serde(default, deserialize_with = "list_or_lines")]
    pub bullet_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeArtifact {
    pub pdf_path: String,
    pub pb_record_id: Option<String>,
    pub collection_id: String,
}

#[derive(Debug, Clone)]
pub struct GeneratedResume {
    pub artifact: ResumeArtifact,
    pub preview: TailoredResume,
}

/// A string, a list, or anything else. Models return all of these for the same
/// field; scalars are stringified, null and objects yield nothing.
#[derive(Deserialize)]
#[serde(untagged)]
enum Flexible {
    One(String),
    Many(Vec<Value>),
    Other(Value),
}

impl Flexible {
    fn into_items(self, split: fn(&str) -> Vec<String>) -> Vec<String> {
        match self {
            Flexible::One(s) => split(&s),
            Flexible::Many(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Null | Value::Object(_) => None,
                    other => Some(other.to_string()),
                })
                .filter(|s| !s.is_empty())
                .collect(),
            Flexible::Other(Value::Number(n)) => split(&n.to_string()),
            Flexible::Other(Value::Bool(b)) => split(&b.to_string()),
            Flexible::Other(_) => Vec::new(),
        }
    }
}

fn split_csv(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| l.trim().trim_start_matches(['-', '*', '•']).trim())
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

fn whole(text: &str) -> Vec<String> {
    match text.trim() {
        "" => Vec::new(),
        t => vec![t.to_string()],
    }
}

fn string_or_list<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Flexible::deserialize(deserializer)?.into_items(whole).join(", "))
}

fn text_or_sentences<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Flexible::deserialize(deserializer)?.into_items(whole).join(" "))
}

fn list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Flexible::deserialize(deserializer)?.into_items(split_csv))
}

fn list_or_lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Flexible::deserialize(deserializer)?.into_items(split_lines))
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

pub async fn generate_resume(
    llm: &dyn LanguageModel,
    store: &DocumentStore,
    renderer: &PdfRenderer,
    output_dir: &Path,
    request: &ResumeRequest,
) -> Result<GeneratedResume, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let style = ResumeStyle::from_name(&request.style);
    info!(
        "Generating {} resume for '{}'",
        style.as_str(),
        request.job_title
    );

    let portfolio = fetch_portfolio(store).await;
    let prompt = build_resume_prompt(&portfolio, &request.job_description)?;
    let system = format!("{RESUME_SYSTEM}\n\n{JSON_ONLY_INSTRUCTION}");

    let raw = llm.complete(&prompt, &system).await?;
    info!("Resume model response: {}", truncate_chars(&raw, 200));

    let resume = parse_resume_json(&raw).map_err(|e| {
        warn!("Resume JSON parse failed: {e}");
        AppError::UnprocessableEntity(INVALID_JSON_MESSAGE.to_string())
    })?;

    let html = render_resume(&resume, style, &request.job_title);
    // Runs are not serialized; the suffix keeps same-minute requests apart.
    let base_name = format!(
        "Resume_{}_{}_{}_{}",
        style.as_str(),
        file_safe(&request.job_title),
        Local::now().format("%H%M"),
        &Uuid::new_v4().simple().to_string()[..8]
    );
    let document = write_document(output_dir, &base_name, &html, renderer).await?;
    info!("Resume written to {}", document.pdf_path.display());

    let upload = file_upload("resume_pdf", &document.pdf_path, "application/pdf").await?;
    let fields = [
        ("date", Local::now().to_rfc3339()),
        (
            "role",
            format!("{} ({})", request.job_title, style.as_str()),
        ),
        ("status", "Generated".to_string()),
    ];
    let pb_record_id = match store
        .create_record(RESUME_COLLECTION, &fields, vec![upload])
        .await
    {
        Ok(id) => {
            info!("Resume saved to document store: {id}");
            Some(id)
        }
        Err(e) => {
            warn!("Failed to upload resume to '{RESUME_COLLECTION}': {e}");
            None
        }
    };

    Ok(GeneratedResume {
        artifact: ResumeArtifact {
            pdf_path: document.pdf_path.display().to_string(),
            pb_record_id,
            collection_id: RESUME_COLLECTION.to_string(),
        },
        preview: resume,
    })
}

fn build_resume_prompt(portfolio: &Portfolio, job_description: &str) -> Result<String, AppError> {
    let portfolio_json =
        serde_json::to_string_pretty(portfolio).map_err(|e| AppError::Internal(e.into()))?;

    Ok(RESUME_PROMPT_TEMPLATE
        .replace("{portfolio_json}", &portfolio_json)
        .replace("{job_description}", job_description))
}

/// Parses the model's resume JSON, tolerating fences and chatter around the object.
pub fn parse_resume_json(raw: &str) -> Result<TailoredResume, serde_json::Error> {
    let cleaned = strip_json_fences(raw);
    let candidate = match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => cleaned.as_str(),
    };
    serde_json::from_str(candidate)
}

/// Keeps ASCII alphanumerics, `-` and `_`; everything else becomes `_`.
fn file_safe(title: &str) -> String {
    let safe: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe.is_empty() {
        "Untitled".to_string()
    } else {
        safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use mockito::Matcher;
    use std::sync::Mutex;

    struct CannedModel {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedModel {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for CannedModel {
        async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    const RESUME_JSON: &str = r#"{
        "summary": "Rust engineer.",
        "skills": ["Rust", "Tokio"],
        "projects": [{"name": "JobOs", "tech": ["Rust", "Axum"], "bullet_points": ["Shipped it"]}],
        "certifications": ["CKA"]
    }"#;

    async fn empty_portfolio_server() -> mockito::ServerGuard {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex("^/api/collections/.*/records".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items": []}"#)
            .create_async()
            .await;
        server
    }

    #[test]
    fn test_parse_resume_json_with_fences_and_chatter() {
        let raw = format!("Sure! Here you go:\n```json\n{RESUME_JSON}\n```\nGood luck!");
        let resume = parse_resume_json(&raw).unwrap();
        assert_eq!(resume.summary, "Rust engineer.");
        assert_eq!(resume.projects[0].tech, "Rust, Axum");
    }

    #[test]
    fn test_parse_resume_json_tech_as_string_or_missing() {
        let resume =
            parse_resume_json(r#"{"projects": [{"name": "A", "tech": "Go"}, {"name": "B"}]}"#)
                .unwrap();
        assert_eq!(resume.projects[0].tech, "Go");
        assert_eq!(resume.projects[1].tech, "");
        assert!(resume.skills.is_empty());
    }

    #[test]
    fn test_parse_resume_json_skills_as_comma_string() {
        let resume = parse_resume_json(
            r#"{"summary": "S.", "skills": "Rust, Go ,", "projects": [], "certifications": []}"#,
        )
        .unwrap();
        assert_eq!(resume.skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_parse_resume_json_summary_as_sentence_list() {
        let resume =
            parse_resume_json(r#"{"summary": ["One.", "Two.", "Three."], "skills": ["Rust", 42]}"#)
                .unwrap();
        assert_eq!(resume.summary, "One. Two. Three.");
        assert_eq!(resume.skills, vec!["Rust", "42"]);
    }

    #[test]
    fn test_parse_resume_json_bullets_as_string_or_null() {
        let resume = parse_resume_json(
            r#"{"summary": null, "projects": [
                {"name": "A", "bullet_points": "- Shipped v1\n- Cut costs"},
                {"name": "B", "bullet_points": null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(resume.summary, "");
        assert_eq!(resume.projects[0].bullet_points, vec!["Shipped v1", "Cut costs"]);
        assert!(resume.projects[1].bullet_points.is_empty());
    }

    #[test]
    fn test_parse_resume_json_rejects_prose() {
        assert!(parse_resume_json("I cannot help with that.").is_err());
    }

    #[test]
    fn test_file_safe() {
        assert_eq!(file_safe("Senior Rust Engineer"), "Senior_Rust_Engineer");
        assert_eq!(file_safe("../etc/passwd"), "___etc_passwd");
        assert_eq!(file_safe("  "), "Untitled");
    }

    #[tokio::test]
    async fn test_empty_job_description_is_validation_error() {
        let model = CannedModel::new(RESUME_JSON);
        let store = DocumentStore::new("http://127.0.0.1:9").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let request = ResumeRequest {
            job_description: "   ".to_string(),
            job_title: "Engineer".to_string(),
            style: String::new(),
        };

        let err = generate_resume(&model, &store, &PdfRenderer::new("cp"), dir.path(), &request)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_model_json_is_unprocessable() {
        let server = empty_portfolio_server().await;
        let model = CannedModel::new("no json here");
        let store = DocumentStore::new(&server.url()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let request = ResumeRequest {
            job_description: "Build APIs in Rust".to_string(),
            job_title: "Engineer".to_string(),
            style: "harvard".to_string(),
        };

        let err = generate_resume(&model, &store, &PdfRenderer::new("cp"), dir.path(), &request)
            .await
            .unwrap_err();
        match err {
            AppError::UnprocessableEntity(msg) => assert_eq!(msg, INVALID_JSON_MESSAGE),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_resume_writes_and_uploads() {
        let mut server = empty_portfolio_server().await;
        let upload = server
            .mock("POST", "/api/collections/resume_generated/records")
            .match_body(Matcher::Regex(r"Backend Engineer \(creative\)".to_string()))
            .with_status(200)
            .with_body(r#"{"id": "res7"}"#)
            .create_async()
            .await;

        let model = CannedModel::new(RESUME_JSON);
        let store = DocumentStore::new(&server.url()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let request = ResumeRequest {
            job_description: "Build APIs in Rust".to_string(),
            job_title: "Backend Engineer".to_string(),
            style: "creative".to_string(),
        };

        let generated =
            generate_resume(&model, &store, &PdfRenderer::new("cp"), dir.path(), &request)
                .await
                .unwrap();

        upload.assert_async().await;
        assert_eq!(generated.artifact.pb_record_id.as_deref(), Some("res7"));
        assert_eq!(generated.artifact.collection_id, "resume_generated");
        assert!(generated
            .artifact
            .pdf_path
            .contains("Resume_creative_Backend_Engineer_"));
        assert_eq!(generated.preview.skills, vec!["Rust", "Tokio"]);

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("Build APIs in Rust"));
    }

    #[tokio::test]
    async fn test_same_title_in_same_minute_gets_distinct_files() {
        let server = empty_portfolio_server().await;
        let model = CannedModel::new(RESUME_JSON);
        let store = DocumentStore::new(&server.url()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let request = ResumeRequest {
            job_description: "Build APIs in Rust".to_string(),
            job_title: "Backend Engineer".to_string(),
            style: "harvard".to_string(),
        };
        let renderer = PdfRenderer::new("cp");

        let first = generate_resume(&model, &store, &renderer, dir.path(), &request)
            .await
            .unwrap();
        let second = generate_resume(&model, &store, &renderer, dir.path(), &request)
            .await
            .unwrap();

        assert_ne!(first.artifact.pdf_path, second.artifact.pdf_path);
        assert!(Path::new(&first.artifact.pdf_path).exists());
        assert!(Path::new(&second.artifact.pdf_path).exists());
        assert!(first.artifact.pb_record_id.is_none());
    }
}
