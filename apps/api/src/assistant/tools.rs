//! Tools the assistant can call. Every failure is reported back to the model
//! as text starting with "Error" so it can recover or explain.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::hunt::truncate_chars;
use crate::store::{DocumentStore, ListQuery};

pub const GET_COLLECTION_DATA: &str = "get_collection_data";
pub const READ_FILE_CONTENT: &str = "read_file_content";

const COLLECTION_PAGE_SIZE: u32 = 50;
const MAX_FILE_TEXT_CHARS: usize = 5_000;

#[derive(Debug, Deserialize)]
struct CollectionArgs {
    collection: String,
    #[serde(default)]
    filter: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileArgs {
    collection: String,
    record_id: String,
    filename: String,
}

/// Function schemas in the chat-completions `tools` format.
pub fn tool_definitions() -> Vec<Value> {
    vec![
        json!({
            "type": "function",
            "function": {
                "name": GET_COLLECTION_DATA,
                "description": "Fetches records from a document store collection as JSON.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "collection": {
                            "type": "string",
                            "description": "Collection name, e.g. 'projects', 'resumes', 'recruiters'."
                        },
                        "filter": {
                            "type": "string",
                            "description": "Optional filter, e.g. category=\"Gen AI\"."
                        }
                    },
                    "required": ["collection"]
                }
            }
        }),
        json!({
            "type": "function",
            "function": {
                "name": READ_FILE_CONTENT,
                "description": "Reads the text of a PDF file attached to a record.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "collection": {"type": "string", "description": "Collection name."},
                        "record_id": {"type": "string", "description": "The record id."},
                        "filename": {"type": "string", "description": "The filename stored in the record."}
                    },
                    "required": ["collection", "record_id", "filename"]
                }
            }
        }),
    ]
}

#[derive(Clone)]
pub struct ToolBox {
    store: DocumentStore,
}

impl ToolBox {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Runs the named tool with JSON-encoded arguments and returns its text output.
    pub async fn execute(&self, name: &str, arguments: &str) -> String {
        debug!("Tool call {name}({arguments})");
        match name {
            GET_COLLECTION_DATA => match serde_json::from_str::<CollectionArgs>(arguments) {
                Ok(args) => self.get_collection_data(args).await,
                Err(e) => format!("Error: invalid arguments for {name}: {e}"),
            },
            READ_FILE_CONTENT => match serde_json::from_str::<FileArgs>(arguments) {
                Ok(args) => self.read_file_content(args).await,
                Err(e) => format!("Error: invalid arguments for {name}: {e}"),
            },
            other => {
                warn!("Model requested unknown tool '{other}'");
                format!("Error: unknown tool '{other}'")
            }
        }
    }

    async fn get_collection_data(&self, args: CollectionArgs) -> String {
        let filter = args.filter.as_deref().filter(|f| !f.trim().is_empty());
        let query = ListQuery {
            per_page: COLLECTION_PAGE_SIZE,
            filter,
            sort: None,
        };

        match self.store.list_records(&args.collection, &query).await {
            Ok(items) => serde_json::to_string_pretty(&items)
                .unwrap_or_else(|e| format!("Error fetching data: {e}")),
            Err(e) => format!("Error fetching data: {e}"),
        }
    }

    async fn read_file_content(&self, args: FileArgs) -> String {
        if !args.filename.to_lowercase().ends_with(".pdf") {
            return "Error: Unsupported file format (only PDF supported currently).".to_string();
        }

        let bytes = match self
            .store
            .download_file(&args.collection, &args.record_id, &args.filename)
            .await
        {
            Ok(bytes) => bytes,
            Err(e) => return format!("Error reading file: {e}"),
        };

        let extracted =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;

        match extracted {
            Ok(Ok(text)) => truncate_chars(&text, MAX_FILE_TEXT_CHARS).to_string(),
            Ok(Err(e)) => format!("Error reading file: {e}"),
            Err(e) => format!("Error reading file: {e}"),
        }
    }
}
