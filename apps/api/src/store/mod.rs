//! Document store client (PocketBase REST API).
//!
//! Holds the portfolio collections the resume generator and assistant read,
//! and receives generated reports and resumes as file uploads.

use bytes::Bytes;
use reqwest::{multipart, Client};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Document store returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Query options for listing records.
#[derive(Debug, Clone, Default)]
pub struct ListQuery<'a> {
    pub per_page: u32,
    pub filter: Option<&'a str>,
    pub sort: Option<&'a str>,
}

/// A file attached to a new record.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct RecordList {
    #[serde(default)]
    items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct CreatedRecord {
    id: String,
}

#[derive(Clone)]
pub struct DocumentStore {
    client: Client,
    base_url: String,
}

impl DocumentStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET /api/collections/{collection}/records, returns the `items` array.
    pub async fn list_records(
        &self,
        collection: &str,
        query: &ListQuery<'_>,
    ) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}/api/collections/{collection}/records", self.base_url);

        let mut params = vec![("perPage", query.per_page.max(1).to_string())];
        if let Some(filter) = query.filter.filter(|f| !f.is_empty()) {
            params.push(("filter", filter.to_string()));
        }
        if let Some(sort) = query.sort {
            params.push(("sort", sort.to_string()));
        }

        let response = self.client.get(&url).query(&params).send().await?;
        let response = ensure_success(response).await?;
        let list: RecordList = response.json().await?;

        debug!("Listed {} records from '{collection}'", list.items.len());
        Ok(list.items)
    }

    /// GET /api/files/{collection}/{record_id}/{filename}
    pub async fn download_file(
        &self,
        collection: &str,
        record_id: &str,
        filename: &str,
    ) -> Result<Bytes, StoreError> {
        let url = format!(
            "{}/api/files/{collection}/{record_id}/{}",
            self.base_url,
            urlencoding::encode(filename)
        );

        let response = self.client.get(&url).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.bytes().await?)
    }

    /// Multipart POST /api/collections/{collection}/records, returns the new record id.
    pub async fn create_record(
        &self,
        collection: &str,
        fields: &[(&str, String)],
        files: Vec<FileUpload>,
    ) -> Result<String, StoreError> {
        let url = format!("{}/api/collections/{collection}/records", self.base_url);

        let mut form = multipart::Form::new();
        for (name, value) in fields {
            form = form.text(name.to_string(), value.clone());
        }
        for file in files {
            let part = multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime)?;
            form = form.part(file.field, part);
        }

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = ensure_success(response).await?;
        let record: CreatedRecord = response.json().await?;

        debug!("Created record {} in '{collection}'", record.id);
        Ok(record.id)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}
