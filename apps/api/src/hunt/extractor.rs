//! Structured Extractor: turns fetched page content into job records via the LLM.
//!
//! Model output is parsed leniently: a reply that is not a bare JSON array, or
//! is malformed JSON, is an empty batch rather than an error. Only a failed
//! model call is reported to the caller.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::hunt::models::{HuntPreferences, ScrapedJob};
use crate::hunt::prompts::{EXTRACTION_PROMPT_TEMPLATE, EXTRACTION_SYSTEM};
use crate::hunt::truncate_chars;
use crate::llm_client::{strip_json_fences, LanguageModel, LlmError};

/// Content beyond this many characters is not sent to the model.
pub const MAX_PROMPT_CONTENT_CHARS: usize = 15_000;

pub struct JobExtractor {
    llm: Arc<dyn LanguageModel>,
}

impl JobExtractor {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    pub async fn extract(
        &self,
        content: &str,
        preferences: &HuntPreferences,
    ) -> Result<Vec<ScrapedJob>, LlmError> {
        let prompt = build_extraction_prompt(content, preferences);
        let raw = self.llm.complete(&prompt, EXTRACTION_SYSTEM).await?;
        Ok(parse_job_batch(&raw))
    }
}

fn build_extraction_prompt(content: &str, preferences: &HuntPreferences) -> String {
    EXTRACTION_PROMPT_TEMPLATE
        .replace("{role}", preferences.effective_role())
        .replace("{location}", preferences.effective_location())
        .replace("{content}", truncate_chars(content, MAX_PROMPT_CONTENT_CHARS))
}

/// Parses raw model output into job records. Never fails: anything that is not
/// a JSON array after fence stripping yields an empty batch.
pub fn parse_job_batch(raw: &str) -> Vec<ScrapedJob> {
    let cleaned = strip_json_fences(raw);

    if !cleaned.starts_with('[') {
        warn!("Model did not return a JSON array; treating as no jobs");
        return Vec::new();
    }

    let items: Vec<Value> = match serde_json::from_str(&cleaned) {
        Ok(items) => items,
        Err(e) => {
            warn!("Model returned malformed JSON ({e}); treating as no jobs");
            return Vec::new();
        }
    };

    let jobs: Vec<ScrapedJob> = items
        .iter()
        .filter_map(Value::as_object)
        .map(scraped_job_from_object)
        .collect();

    info!("Extracted {} jobs", jobs.len());
    jobs
}

fn scraped_job_from_object(obj: &Map<String, Value>) -> ScrapedJob {
    ScrapedJob {
        title: text_field(obj, "title"),
        company: text_field(obj, "company"),
        location: text_field(obj, "location"),
        link: text_field(obj, "link"),
        summary: text_field(obj, "summary"),
        source: text_field(obj, "source"),
    }
}

/// Strings are trimmed, other scalars stringified; null, blank and nested values are absent.
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match obj.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
