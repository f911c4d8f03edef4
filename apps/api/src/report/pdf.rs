use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use crate::report::ReportError;

/// Converts an HTML file to PDF by running an external renderer as
/// `<command> <input.html> <output.pdf>` (wkhtmltopdf by default).
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    command: String,
}

impl PdfRenderer {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
        }
    }

    pub async fn render(&self, html_path: &Path, pdf_path: &Path) -> Result<(), ReportError> {
        debug!("Rendering {} -> {}", html_path.display(), pdf_path.display());

        let output = Command::new(&self.command)
            .arg(html_path)
            .arg(pdf_path)
            .output()
            .await
            .map_err(|e| ReportError::Pdf(format!("failed to run '{}': {e}", self.command)))?;

        if !output.status.success() {
            return Err(ReportError::Pdf(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}
