//! Job-listing sources targeted by a hunt run.
//!
//! Each source is a URL template with placeholders filled from the preferences:
//! `{role}` (URL-encoded), `{role_lower}` (URL-encoded, lowercased) and
//! `{location_or_worldwide}` (URL-encoded, `Worldwide` when blank).

use crate::hunt::models::HuntPreferences;

/// Sources processed per run. Later entries in the list are skipped.
pub const DEFAULT_SOURCE_CAP: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct SourceTemplate {
    /// Site name, used as the job `source` when the model leaves it out.
    pub label: String,
    pub url_template: String,
}

impl SourceTemplate {
    pub fn new(label: &str, url_template: &str) -> Self {
        Self {
            label: label.to_string(),
            url_template: url_template.to_string(),
        }
    }

    pub fn build_url(&self, preferences: &HuntPreferences) -> String {
        let role = urlencoding::encode(preferences.effective_role()).into_owned();
        let location = match preferences.effective_location() {
            "" => "Worldwide".to_string(),
            loc => urlencoding::encode(loc).into_owned(),
        };

        self.url_template
            .replace("{role_lower}", &role.to_lowercase())
            .replace("{role}", &role)
            .replace("{location_or_worldwide}", &location)
    }
}

/// A source resolved for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSource {
    pub label: String,
    pub url: String,
}

/// The ordered source list.
pub fn default_sources() -> Vec<SourceTemplate> {
    vec![
        SourceTemplate::new(
            "YCombinator",
            "https://www.ycombinator.com/jobs?role=Software%20Engineer&q={role}",
        ),
        SourceTemplate::new("RemoteOK", "https://remoteok.com/remote-{role_lower}-jobs"),
        SourceTemplate::new(
            "LinkedIn",
            "https://www.linkedin.com/jobs/search?keywords={role}&location={location_or_worldwide}\
             &trk=public_jobs_jobs-search-bar_search-submit&position=1&pageNum=0",
        ),
        SourceTemplate::new("Wellfound", "https://wellfound.com/jobs?q={role}"),
        SourceTemplate::new(
            "WeWorkRemotely",
            "https://weworkremotely.com/remote-jobs/search?term={role}",
        ),
        SourceTemplate::new("FlexJobs", "https://www.flexjobs.com/search?search={role}"),
        SourceTemplate::new("Himalayas", "https://himalayas.app/jobs/python"),
        SourceTemplate::new("WorkingNomads", "https://www.workingnomads.com/jobs?tag={role}"),
        SourceTemplate::new("Arc.dev", "https://arc.dev/remote-jobs?q={role}"),
        SourceTemplate::new("Naukri", "https://www.naukri.com/{role_lower}-jobs"),
    ]
}

/// Resolves the first `cap` templates, in list order, for these preferences.
pub fn resolve_sources(
    templates: &[SourceTemplate],
    cap: usize,
    preferences: &HuntPreferences,
) -> Vec<ResolvedSource> {
    templates
        .iter()
        .take(cap)
        .map(|t| ResolvedSource {
            label: t.label.clone(),
            url: t.build_url(preferences),
        })
        .collect()
}
