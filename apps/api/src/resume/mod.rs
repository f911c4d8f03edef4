// Tailored resume generation from the stored portfolio.
// All LLM calls go through llm_client via the LanguageModel trait.

pub mod generator;
pub mod handlers;
pub mod portfolio;
pub mod prompts;
pub mod templates;
