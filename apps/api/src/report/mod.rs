//! Report Emitter: renders a hunt's jobs to HTML and PDF, writes both to the
//! reports directory, and uploads them to the document store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Local;
use thiserror::Error;
use tracing::{info, warn};

use crate::hunt::models::{HuntPreferences, JobListing, ReportMeta};
use crate::store::{DocumentStore, FileUpload};

pub mod pdf;
pub mod templates;

use pdf::PdfRenderer;
use templates::render_job_report;

const JOB_REPORTS_COLLECTION: &str = "job_reports";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

#[async_trait]
pub trait ReportEmitter: Send + Sync {
    async fn generate(
        &self,
        jobs: &[JobListing],
        preferences: &HuntPreferences,
    ) -> Result<ReportMeta, ReportError>;
}

/// Paths of one rendered document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub html_path: PathBuf,
    pub pdf_path: PathBuf,
}

/// Writes `<base_name>.html` into `dir` and renders `<base_name>.pdf` beside it.
pub async fn write_document(
    dir: &Path,
    base_name: &str,
    html: &str,
    renderer: &PdfRenderer,
) -> Result<RenderedDocument, ReportError> {
    tokio::fs::create_dir_all(dir).await?;

    let html_path = dir.join(format!("{base_name}.html"));
    let pdf_path = dir.join(format!("{base_name}.pdf"));

    tokio::fs::write(&html_path, html).await?;
    renderer.render(&html_path, &pdf_path).await?;

    Ok(RenderedDocument {
        html_path,
        pdf_path,
    })
}

/// Builds an upload part from a file on disk, named after the file.
pub async fn file_upload(field: &str, path: &Path, mime: &str) -> Result<FileUpload, ReportError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| field.to_string());

    Ok(FileUpload {
        field: field.to_string(),
        file_name,
        mime: mime.to_string(),
        bytes,
    })
}

/// Escapes text for HTML bodies and attribute values. Braces are encoded too,
/// so substituted values never form a template placeholder.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders `link` as an escaped anchor when it is an http(s) URL, otherwise as
/// escaped plain text. Model-supplied links must never carry other schemes.
pub fn render_link(link: &str) -> String {
    let trimmed = link.trim();
    let lower = trimmed.to_ascii_lowercase();
    let escaped = escape_html(trimmed);
    if lower.starts_with("http://") || lower.starts_with("https://") {
        format!(r#"<a href="{escaped}">{escaped}</a>"#)
    } else {
        format!("<span>{escaped}</span>")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// File-based emitter
// ────────────────────────────────────────────────────────────────────────────

pub struct FileReportEmitter {
    reports_dir: PathBuf,
    renderer: PdfRenderer,
    store: DocumentStore,
}

impl FileReportEmitter {
    pub fn new(reports_dir: impl Into<PathBuf>, renderer: PdfRenderer, store: DocumentStore) -> Self {
        Self {
            reports_dir: reports_dir.into(),
            renderer,
            store,
        }
    }

    async fn upload(
        &self,
        document: &RenderedDocument,
        preferences: &HuntPreferences,
        jobs_found: usize,
    ) -> anyhow::Result<String> {
        let files = vec![
            file_upload("report_pdf", &document.pdf_path, "application/pdf").await?,
            file_upload("report_html", &document.html_path, "text/html").await?,
        ];
        let fields = [
            ("date", Local::now().to_rfc3339()),
            ("role", preferences.role.clone()),
            ("status", "Completed".to_string()),
            ("jobs_found", jobs_found.to_string()),
        ];

        Ok(self
            .store
            .create_record(JOB_REPORTS_COLLECTION, &fields, files)
            .await?)
    }
}

#[async_trait]
impl ReportEmitter for FileReportEmitter {
    async fn generate(
        &self,
        jobs: &[JobListing],
        preferences: &HuntPreferences,
    ) -> Result<ReportMeta, ReportError> {
        let now = Local::now();
        let date = now.format("%Y-%m-%d").to_string();
        let base_name = format!("JobOs_Report_{date}_{}", now.format("%H%M%S"));

        let html = render_job_report(jobs, preferences, &date);
        let document = write_document(&self.reports_dir, &base_name, &html, &self.renderer).await?;
        info!("Report written to {}", document.pdf_path.display());

        let record_id = match self.upload(&document, preferences, jobs.len()).await {
            Ok(id) => {
                info!("Report saved to document store: {id}");
                Some(id)
            }
            Err(e) => {
                warn!("Failed to upload report to '{JOB_REPORTS_COLLECTION}': {e}");
                None
            }
        };

        Ok(ReportMeta {
            pdf_path: document.pdf_path.display().to_string(),
            html_path: document.html_path.display().to_string(),
            record_id,
        })
    }
}
