// HTML templates for tailored resumes, one per style.

use serde_json::Value;

use crate::report::escape_html;
use crate::resume::generator::{ResumeProject, TailoredResume};

/// Replace: {job_title}, {summary}, {skills}, {projects}, {certifications}
const HARVARD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Resume</title>
<style>
  body { font-family: "Times New Roman", Georgia, serif; color: #111; margin: 40px 48px; font-size: 12px; }
  h1 { text-align: center; font-size: 20px; margin: 0 0 2px 0; }
  .target { text-align: center; font-style: italic; margin-bottom: 14px; }
  h2 { font-size: 13px; text-transform: uppercase; border-bottom: 1px solid #111; margin: 16px 0 6px 0; }
  .project h3 { font-size: 12px; margin: 8px 0 0 0; }
  .project .tech { font-style: italic; }
  ul { margin: 4px 0 0 18px; padding: 0; }
</style>
</head>
<body>
<h1>Professional Resume</h1>
<div class="target">{job_title}</div>
<h2>Summary</h2>
<p>{summary}</p>
<h2>Skills</h2>
<p>{skills}</p>
<h2>Projects</h2>
{projects}
<h2>Certifications</h2>
<ul>{certifications}</ul>
</body>
</html>
"#;

/// Replace: {job_title}, {summary}, {skills}, {projects}, {certifications}
const CREATIVE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Resume</title>
<style>
  body { font-family: Helvetica, Arial, sans-serif; color: #1f2933; margin: 0; font-size: 12px; }
  .header { background: #312e81; color: #fff; padding: 24px 40px; }
  .header h1 { margin: 0; font-size: 24px; }
  .header .target { color: #c7d2fe; margin-top: 4px; }
  .content { padding: 16px 40px; }
  h2 { color: #4338ca; font-size: 14px; margin: 16px 0 6px 0; }
  .chip { display: inline-block; background: #eef2ff; color: #3730a3; border-radius: 10px; padding: 2px 8px; margin: 2px; }
  .project { border-left: 3px solid #6366f1; padding-left: 10px; margin-bottom: 10px; }
  .project h3 { margin: 0; font-size: 13px; }
  .project .tech { color: #6366f1; font-size: 11px; }
  ul { margin: 4px 0 0 16px; padding: 0; }
</style>
</head>
<body>
<div class="header">
  <h1>Professional Resume</h1>
  <div class="target">{job_title}</div>
</div>
<div class="content">
<h2>About</h2>
<p>{summary}</p>
<h2>Skills</h2>
<div>{skills}</div>
<h2>Projects</h2>
{projects}
<h2>Certifications</h2>
<ul>{certifications}</ul>
</div>
</body>
</html>
"#;

/// Replace: {name}, {tech}, {bullets}
const PROJECT_TEMPLATE: &str = r#"<div class="project">
  <h3>{name}</h3>
  <div class="tech">{tech}</div>
  <ul>{bullets}</ul>
</div>
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResumeStyle {
    #[default]
    Harvard,
    Creative,
}

impl ResumeStyle {
    /// Anything other than "creative" (case-insensitive) selects Harvard.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("creative") {
            ResumeStyle::Creative
        } else {
            ResumeStyle::Harvard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeStyle::Harvard => "harvard",
            ResumeStyle::Creative => "creative",
        }
    }
}

pub fn render_resume(resume: &TailoredResume, style: ResumeStyle, job_title: &str) -> String {
    let (template, skills) = match style {
        ResumeStyle::Harvard => (
            HARVARD_TEMPLATE,
            escape_html(&resume.skills.join(", ")),
        ),
        ResumeStyle::Creative => (
            CREATIVE_TEMPLATE,
            resume
                .skills
                .iter()
                .map(|s| format!(r#"<span class="chip">{}</span>"#, escape_html(s)))
                .collect(),
        ),
    };

    let projects: String = resume.projects.iter().map(render_project).collect();
    let certifications: String = resume
        .certifications
        .iter()
        .filter_map(certification_line)
        .map(|line| format!("<li>{}</li>", escape_html(&line)))
        .collect();

    template
        .replace("{job_title}", &escape_html(job_title))
        .replace("{summary}", &escape_html(&resume.summary))
        .replace("{skills}", &skills)
        .replace("{projects}", &projects)
        .replace("{certifications}", &certifications)
}

fn render_project(project: &ResumeProject) -> String {
    let bullets: String = project
        .bullet_points
        .iter()
        .map(|b| format!("<li>{}</li>", escape_html(b)))
        .collect();

    PROJECT_TEMPLATE
        .replace("{name}", &escape_html(&project.name))
        .replace("{tech}", &escape_html(&project.tech))
        .replace("{bullets}", &bullets)
}

/// Certifications come back either as plain strings or as objects.
fn certification_line(cert: &Value) -> Option<String> {
    match cert {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(obj) => {
            let name = ["name", "certificate_name", "title"]
                .iter()
                .find_map(|k| obj.get(*k).and_then(Value::as_str))?;
            match obj.get("provider").and_then(Value::as_str) {
                Some(provider) if !provider.is_empty() => Some(format!("{name} ({provider})")),
                _ => Some(name.to_string()),
            }
        }
        _ => None,
    }
}
