//! Tool-calling chat loop.
//!
//! Flow: load session history → [system, history.., user] → model round →
//!       tool calls? execute and feed results back (max 5 rounds) → reply →
//!       persist user message and reply.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::assistant::history::{append_message, load_history, HISTORY_LIMIT};
use crate::assistant::prompts::{ASSISTANT_SYSTEM, FALLBACK_REPLY};
use crate::assistant::tools::{tool_definitions, ToolBox};
use crate::errors::AppError;
use crate::llm_client::{ChatMessage, LanguageModel};

const MAX_ROUNDS: usize = 5;

pub struct Assistant {
    llm: Arc<dyn LanguageModel>,
    tools: ToolBox,
    db: SqlitePool,
}

impl Assistant {
    pub fn new(llm: Arc<dyn LanguageModel>, tools: ToolBox, db: SqlitePool) -> Self {
        Self { llm, tools, db }
    }

    pub async fn reply(&self, session_id: &str, message: &str) -> Result<String, AppError> {
        let history = load_history(&self.db, session_id, HISTORY_LIMIT).await?;
        info!(
            "Chat turn for session '{session_id}' with {} prior messages",
            history.len()
        );

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(ASSISTANT_SYSTEM));
        messages.extend(history);
        messages.push(ChatMessage::user(message));

        let reply = self.run_rounds(messages).await?;

        append_message(&self.db, session_id, "user", message).await?;
        append_message(&self.db, session_id, "assistant", &reply).await?;

        Ok(reply)
    }

    async fn run_rounds(&self, mut messages: Vec<ChatMessage>) -> Result<String, AppError> {
        let definitions = tool_definitions();

        for round in 1..=MAX_ROUNDS {
            let response = self.llm.chat(&messages, &definitions).await?;

            if response.tool_calls.is_empty() {
                return Ok(response.content.unwrap_or_default());
            }

            info!("Round {round}: {} tool call(s)", response.tool_calls.len());
            let calls = response.tool_calls.clone();
            messages.push(response);

            for call in calls {
                let output = self
                    .tools
                    .execute(&call.function.name, &call.function.arguments)
                    .await;
                messages.push(ChatMessage::tool_result(&call.id, &output));
            }
        }

        warn!("Model still calling tools after {MAX_ROUNDS} rounds; giving up");
        Ok(FALLBACK_REPLY.to_string())
    }
}
