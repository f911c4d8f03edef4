//! Daily scheduled hunt using tokio-cron-scheduler.
//!
//! ```text
//! Scheduler (HUNT_SCHEDULE, default 08:00 UTC)
//!     │
//!     └─► HuntOrchestrator::run(default preferences)
//!             └─► results? → email summary to NOTIFY_EMAIL
//! ```

use std::sync::Arc;

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::hunt::models::{HuntPreferences, HuntResult, HuntStatus};
use crate::hunt::orchestrator::HuntOrchestrator;
use crate::notify::EmailNotifier;
use crate::report::{escape_html, render_link};

const SUMMARY_LIMIT: usize = 10;

pub async fn start_scheduler(
    orchestrator: Arc<HuntOrchestrator>,
    notifier: EmailNotifier,
    schedule: &str,
    notify_email: Option<String>,
) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let hunt_job = Job::new_async(schedule, move |_uuid, _lock| {
        let orchestrator = orchestrator.clone();
        let notifier = notifier.clone();
        let notify_email = notify_email.clone();
        Box::pin(async move {
            if let Err(e) =
                run_scheduled_hunt(&orchestrator, &notifier, notify_email.as_deref()).await
            {
                tracing::error!("Scheduled hunt failed: {}", e);
            }
        })
    })?;

    scheduler.add(hunt_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled hunt started ({schedule})");
    Ok(scheduler)
}

/// Runs one hunt with default preferences and mails the summary when there
/// are results and a recipient is configured. Returns the hunt result; a
/// failed email is only logged.
pub async fn run_scheduled_hunt(
    orchestrator: &HuntOrchestrator,
    notifier: &EmailNotifier,
    notify_email: Option<&str>,
) -> Result<HuntResult> {
    tracing::info!("Running scheduled hunt");
    let result = orchestrator.run(HuntPreferences::default()).await;

    if result.status != HuntStatus::Success {
        tracing::info!("Scheduled hunt found no jobs");
        return Ok(result);
    }

    let Some(to) = notify_email else {
        return Ok(result);
    };

    let subject = format!("JobOs: {} new jobs found", result.results.len());
    if let Err(e) = notifier
        .send(to, &subject, &render_hunt_summary(&result))
        .await
    {
        tracing::warn!("Hunt summary email to {to} not sent: {e}");
    }
    Ok(result)
}

pub fn render_hunt_summary(result: &HuntResult) -> String {
    let rows: String = result
        .results
        .iter()
        .take(SUMMARY_LIMIT)
        .map(|job| {
            format!(
                "<li>{} at {} ({}): {}</li>",
                escape_html(&job.title),
                escape_html(&job.company),
                escape_html(&job.location),
                render_link(&job.link)
            )
        })
        .collect();

    let more = result.results.len().saturating_sub(SUMMARY_LIMIT);
    let footer = if more > 0 {
        format!("<p>...and {more} more in the full report.</p>")
    } else {
        String::new()
    };
    let report = result
        .report
        .as_ref()
        .map(|r| format!("<p>Report: {}</p>", escape_html(&r.pdf_path)))
        .unwrap_or_default();

    format!(
        "<h2>Your daily JobOs hunt</h2><p>{} jobs found.</p><ul>{rows}</ul>{footer}{report}",
        result.results.len()
    )
}
