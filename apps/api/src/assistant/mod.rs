// Conversational assistant over the document store.
// Tool-calling chat through llm_client, history persisted in SQLite.

pub mod agent;
pub mod handlers;
pub mod history;
pub mod prompts;
pub mod tools;
