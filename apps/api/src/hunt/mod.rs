// Job hunt pipeline: reader-proxy fetch, LLM extraction, link dedup, reporting.
// All LLM calls go through llm_client via the LanguageModel trait.

pub mod dedup;
pub mod extractor;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod scheduler;
pub mod sources;

/// Returns at most the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
