// HTML templates for the job report.
// Placeholders are replaced with HTML-escaped values by `render_job_report`.

use crate::hunt::models::{HuntPreferences, JobListing};
use crate::report::{escape_html, render_link};

/// Replace: {date}, {role}, {experience}, {total_jobs}, {job_cards}
const JOB_REPORT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>JobOs Report {date}</title>
<style>
  body { font-family: Helvetica, Arial, sans-serif; color: #1f2933; margin: 32px; }
  h1 { font-size: 22px; margin-bottom: 4px; }
  .meta { color: #52606d; font-size: 12px; margin-bottom: 24px; }
  .job { border: 1px solid #d9e2ec; border-radius: 6px; padding: 12px 16px; margin-bottom: 12px; }
  .job h2 { font-size: 15px; margin: 0 0 4px 0; }
  .job .company { font-weight: bold; font-size: 12px; }
  .job .details { color: #52606d; font-size: 11px; margin: 4px 0; }
  .job p { font-size: 12px; margin: 6px 0; }
  .job a { font-size: 11px; color: #2563eb; }
</style>
</head>
<body>
<h1>JobOs Daily Report</h1>
<div class="meta">{date} &middot; Role: {role} &middot; Experience: {experience} &middot; {total_jobs} jobs found</div>
{job_cards}
</body>
</html>
"#;

/// Replace: {title}, {company}, {location}, {source}, {summary}, {link}
/// `{link}` takes the rendered anchor from `render_link`.
const JOB_CARD_TEMPLATE: &str = r#"<div class="job">
  <h2>{title}</h2>
  <div class="company">{company}</div>
  <div class="details">{location} &middot; {source}</div>
  <p>{summary}</p>
  {link}
</div>
"#;

pub fn render_job_report(jobs: &[JobListing], preferences: &HuntPreferences, date: &str) -> String {
    let job_cards: String = jobs.iter().map(render_job_card).collect();

    let role = match preferences.role.trim() {
        "" => "General",
        role => role,
    };
    let experience = match preferences.experience.trim() {
        "" => "Any",
        exp => exp,
    };

    JOB_REPORT_TEMPLATE
        .replace("{date}", &escape_html(date))
        .replace("{role}", &escape_html(role))
        .replace("{experience}", &escape_html(experience))
        .replace("{total_jobs}", &jobs.len().to_string())
        .replace("{job_cards}", &job_cards)
}

fn render_job_card(job: &JobListing) -> String {
    JOB_CARD_TEMPLATE
        .replace("{title}", &escape_html(&job.title))
        .replace("{company}", &escape_html(&job.company))
        .replace("{location}", &escape_html(&job.location))
        .replace("{source}", &escape_html(&job.source))
        .replace("{summary}", &escape_html(&job.summary))
        .replace("{link}", &render_link(&job.link))
}
