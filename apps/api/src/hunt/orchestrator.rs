//! Hunt Orchestrator: drives fetch → extract per source, dedups, and hands off
//! to the report emitter.
//!
//! Flow: resolve_sources (first N) → for each: fetch → extract → accumulate →
//!       dedup_by_link → report → HuntResult.
//!
//! A run never fails. Fetch and model failures skip the source; a report
//! failure leaves `report` empty.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::hunt::dedup::dedup_by_link;
use crate::hunt::extractor::JobExtractor;
use crate::hunt::fetcher::ContentFetcher;
use crate::hunt::models::{HuntPreferences, HuntResult, HuntStatus, ScrapedJob};
use crate::hunt::sources::{default_sources, resolve_sources, SourceTemplate, DEFAULT_SOURCE_CAP};
use crate::llm_client::LanguageModel;
use crate::report::ReportEmitter;

pub struct HuntOrchestrator {
    fetcher: Arc<dyn ContentFetcher>,
    extractor: JobExtractor,
    reporter: Arc<dyn ReportEmitter>,
    sources: Vec<SourceTemplate>,
    source_cap: usize,
    /// Serializes runs: a manual trigger during a scheduled run waits for it.
    run_lock: Mutex<()>,
}

impl HuntOrchestrator {
    pub fn new(
        fetcher: Arc<dyn ContentFetcher>,
        llm: Arc<dyn LanguageModel>,
        reporter: Arc<dyn ReportEmitter>,
    ) -> Self {
        Self {
            fetcher,
            extractor: JobExtractor::new(llm),
            reporter,
            sources: default_sources(),
            source_cap: DEFAULT_SOURCE_CAP,
            run_lock: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub fn with_sources(mut self, sources: Vec<SourceTemplate>, cap: usize) -> Self {
        self.sources = sources;
        self.source_cap = cap;
        self
    }

    pub async fn run(&self, preferences: HuntPreferences) -> HuntResult {
        let _guard = self.run_lock.lock().await;
        let run_id = Uuid::new_v4();

        info!(
            "Hunt {run_id} started: role={:?} location={:?}",
            preferences.effective_role(),
            preferences.effective_location()
        );

        let mut accumulated: Vec<ScrapedJob> = Vec::new();

        for source in resolve_sources(&self.sources, self.source_cap, &preferences) {
            info!("Hunt {run_id}: processing {} ({})", source.label, source.url);

            let content = match self.fetcher.fetch(&source.url).await {
                Ok(content) => content,
                Err(e) => {
                    warn!("Hunt {run_id}: skipping {}: {e}", source.label);
                    continue;
                }
            };

            let batch = match self.extractor.extract(&content, &preferences).await {
                Ok(batch) => batch,
                Err(e) => {
                    warn!("Hunt {run_id}: extraction failed for {}: {e}", source.label);
                    continue;
                }
            };

            info!("Hunt {run_id}: {} jobs from {}", batch.len(), source.label);
            for mut job in batch {
                if job.source.is_none() {
                    job.source = Some(source.label.clone());
                }
                accumulated.push(job);
            }
        }

        let jobs = dedup_by_link(accumulated);
        info!("Hunt {run_id} complete: {} unique jobs", jobs.len());

        if jobs.is_empty() {
            return HuntResult::no_jobs_found();
        }

        let report = match self.reporter.generate(&jobs, &preferences).await {
            Ok(meta) => Some(meta),
            Err(e) => {
                warn!("Hunt {run_id}: report generation failed: {e}");
                None
            }
        };

        HuntResult {
            status: HuntStatus::Success,
            results: jobs,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hunt::fetcher::FetchError;
    use crate::hunt::models::{JobListing, ReportMeta};
    use crate::llm_client::LlmError;
    use crate::report::ReportError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;

    // ────────────────────────────────────────────────────────────────────────
    // Test doubles
    // ────────────────────────────────────────────────────────────────────────

    enum Page {
        Content(&'static str),
        Unauthorized,
        Status(u16),
    }

    /// Serves pages by URL and records every URL it was asked for.
    struct MockFetcher {
        pages: HashMap<String, Page>,
        calls: StdMutex<Vec<String>>,
    }

    impl MockFetcher {
        fn new(pages: Vec<(&str, Page)>) -> Self {
            Self {
                pages: pages.into_iter().map(|(u, p)| (u.to_string(), p)).collect(),
                calls: StdMutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());
            match self.pages.get(url) {
                Some(Page::Content(body)) => Ok(body.to_string()),
                Some(Page::Unauthorized) => Err(FetchError::Unauthorized),
                Some(Page::Status(code)) => Err(FetchError::HttpStatus(*code)),
                None => Err(FetchError::Transport("connection refused".to_string())),
            }
        }
    }

    /// Echoes the page content as the model's reply, so each page body is the
    /// model output for that source. Bodies starting with `FAIL` fail the call.
    struct EchoModel {
        calls: StdMutex<usize>,
    }

    impl EchoModel {
        fn new() -> Self {
            Self {
                calls: StdMutex::new(0),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for EchoModel {
        async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            *self.calls.lock().unwrap() += 1;
            let content = prompt.split_once("Content:\n").map(|(_, c)| c).unwrap_or("");
            if content.starts_with("FAIL") {
                return Err(LlmError::Api {
                    status: 500,
                    message: "upstream".to_string(),
                });
            }
            Ok(content.to_string())
        }
    }

    struct RecordingReporter {
        fail: bool,
        received: StdMutex<Vec<Vec<JobListing>>>,
    }

    impl RecordingReporter {
        fn new() -> Self {
            Self {
                fail: false,
                received: StdMutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl ReportEmitter for RecordingReporter {
        async fn generate(
            &self,
            jobs: &[JobListing],
            _preferences: &HuntPreferences,
        ) -> Result<ReportMeta, ReportError> {
            self.received.lock().unwrap().push(jobs.to_vec());
            if self.fail {
                return Err(ReportError::Pdf("renderer exited with status 1".to_string()));
            }
            Ok(ReportMeta {
                pdf_path: "reports/r.pdf".to_string(),
                html_path: "reports/r.html".to_string(),
                record_id: Some("rec123".to_string()),
            })
        }
    }

    fn two_sources() -> Vec<SourceTemplate> {
        vec![
            SourceTemplate::new("SiteA", "https://a.test/jobs?q={role}"),
            SourceTemplate::new("SiteB", "https://b.test/jobs?q={role}"),
        ]
    }

    const URL_A: &str = "https://a.test/jobs?q=Rust";
    const URL_B: &str = "https://b.test/jobs?q=Rust";

    fn rust_prefs() -> HuntPreferences {
        HuntPreferences {
            role: "Rust".to_string(),
            location: String::new(),
            ..Default::default()
        }
    }

    fn orchestrator(
        fetcher: Arc<MockFetcher>,
        reporter: Arc<RecordingReporter>,
        sources: Vec<SourceTemplate>,
        cap: usize,
    ) -> HuntOrchestrator {
        HuntOrchestrator::new(fetcher, Arc::new(EchoModel::new()), reporter).with_sources(sources, cap)
    }

    // ────────────────────────────────────────────────────────────────────────
    // End-to-end scenarios
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_two_sources_distinct_links_success() {
        let fetcher = Arc::new(MockFetcher::new(vec![
            (URL_A, Page::Content(r#"[{"title": "A", "link": "https://a.test/1"}]"#)),
            (URL_B, Page::Content(r#"[{"title": "B", "link": "https://b.test/1"}]"#)),
        ]));
        let reporter = Arc::new(RecordingReporter::new());
        let hunt = orchestrator(fetcher, reporter.clone(), two_sources(), 8);

        let result = hunt.run(rust_prefs()).await;

        assert_eq!(result.status, HuntStatus::Success);
        assert_eq!(result.results.len(), 2);
        assert_eq!(result.report.unwrap().record_id.as_deref(), Some("rec123"));
        assert_eq!(reporter.received.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_error_and_empty_sources_yield_no_jobs_found() {
        let fetcher = Arc::new(MockFetcher::new(vec![
            (URL_A, Page::Status(502)),
            (URL_B, Page::Content("[]")),
        ]));
        let reporter = Arc::new(RecordingReporter::new());
        let hunt = orchestrator(fetcher, reporter.clone(), two_sources(), 8);

        let result = hunt.run(rust_prefs()).await;

        assert_eq!(result.status, HuntStatus::NoJobsFound);
        assert!(result.results.is_empty());
        assert!(result.report.is_none());
        assert!(reporter.received.lock().unwrap().is_empty(), "no report for an empty hunt");
    }

    #[tokio::test]
    async fn test_duplicate_link_keeps_later_source() {
        let fetcher = Arc::new(MockFetcher::new(vec![
            (URL_A, Page::Content(r#"[{"title": "Old Title", "link": "https://x.test/1"}]"#)),
            (URL_B, Page::Content(r#"[{"title": "New Title", "link": "https://x.test/1"}]"#)),
        ]));
        let hunt = orchestrator(fetcher, Arc::new(RecordingReporter::new()), two_sources(), 8);

        let result = hunt.run(rust_prefs()).await;

        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].title, "New Title");
    }

    #[tokio::test]
    async fn test_fetch_error_skips_extraction() {
        let fetcher = Arc::new(MockFetcher::new(vec![
            (URL_A, Page::Unauthorized),
            (URL_B, Page::Content(r#"[{"link": "https://b.test/1"}]"#)),
        ]));
        let model = Arc::new(EchoModel::new());
        let hunt = HuntOrchestrator::new(fetcher, model.clone(), Arc::new(RecordingReporter::new()))
            .with_sources(two_sources(), 8);

        let result = hunt.run(rust_prefs()).await;

        assert_eq!(*model.calls.lock().unwrap(), 1, "only the successful fetch reaches the model");
        assert_eq!(result.results.len(), 1);
    }

    #[tokio::test]
    async fn test_page_that_looks_like_an_error_is_still_extracted() {
        let fetcher = Arc::new(MockFetcher::new(vec![(
            URL_A,
            Page::Content("Error handling engineer wanted\n"),
        )]));
        let model = Arc::new(EchoModel::new());
        let hunt = HuntOrchestrator::new(fetcher, model.clone(), Arc::new(RecordingReporter::new()))
            .with_sources(two_sources(), 1);

        let result = hunt.run(rust_prefs()).await;

        assert_eq!(*model.calls.lock().unwrap(), 1);
        assert_eq!(result.status, HuntStatus::NoJobsFound);
    }

    #[tokio::test]
    async fn test_model_failure_skips_source_only() {
        let fetcher = Arc::new(MockFetcher::new(vec![
            (URL_A, Page::Content("FAIL")),
            (URL_B, Page::Content(r#"[{"link": "https://b.test/1"}]"#)),
        ]));
        let hunt = orchestrator(fetcher, Arc::new(RecordingReporter::new()), two_sources(), 8);

        let result = hunt.run(rust_prefs()).await;

        assert_eq!(result.status, HuntStatus::Success);
        assert_eq!(result.results.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_model_output_skips_source_only() {
        let fetcher = Arc::new(MockFetcher::new(vec![
            (URL_A, Page::Content(r#"[{"link": "#)),
            (URL_B, Page::Content(r#"[{"link": "https://b.test/1"}]"#)),
        ]));
        let hunt = orchestrator(fetcher, Arc::new(RecordingReporter::new()), two_sources(), 8);

        let result = hunt.run(rust_prefs()).await;

        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].link, "https://b.test/1");
    }

    #[tokio::test]
    async fn test_jobs_without_link_are_excluded() {
        let fetcher = Arc::new(MockFetcher::new(vec![(
            URL_A,
            Page::Content(r#"[{"title": "No link"}, {"title": "Linked", "link": "https://a.test/9"}]"#),
        )]));
        let hunt = orchestrator(fetcher, Arc::new(RecordingReporter::new()), two_sources(), 1);

        let result = hunt.run(rust_prefs()).await;

        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].title, "Linked");
    }

    #[tokio::test]
    async fn test_missing_source_is_filled_with_site_label() {
        let fetcher = Arc::new(MockFetcher::new(vec![(
            URL_A,
            Page::Content(
                r#"[{"link": "https://a.test/1"}, {"link": "https://a.test/2", "source": "YC"}]"#,
            ),
        )]));
        let hunt = orchestrator(fetcher, Arc::new(RecordingReporter::new()), two_sources(), 1);

        let result = hunt.run(rust_prefs()).await;

        assert_eq!(result.results[0].source, "SiteA");
        assert_eq!(result.results[1].source, "YC");
    }

    #[tokio::test]
    async fn test_report_failure_still_returns_success() {
        let fetcher = Arc::new(MockFetcher::new(vec![(
            URL_A,
            Page::Content(r#"[{"link": "https://a.test/1"}]"#),
        )]));
        let hunt = orchestrator(fetcher, Arc::new(RecordingReporter::failing()), two_sources(), 1);

        let result = hunt.run(rust_prefs()).await;

        assert_eq!(result.status, HuntStatus::Success);
        assert_eq!(result.results.len(), 1);
        assert!(result.report.is_none());
    }

    // ────────────────────────────────────────────────────────────────────────
    // Source cap
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_source_cap_fetches_exactly_first_eight() {
        let fetcher = Arc::new(MockFetcher::new(Vec::new()));
        let hunt = HuntOrchestrator::new(
            fetcher.clone(),
            Arc::new(EchoModel::new()),
            Arc::new(RecordingReporter::new()),
        );

        let prefs = rust_prefs();
        let result = hunt.run(prefs.clone()).await;

        let expected: Vec<String> = default_sources()
            .iter()
            .take(8)
            .map(|s| s.build_url(&prefs))
            .collect();
        assert_eq!(fetcher.calls(), expected);
        assert_eq!(result.status, HuntStatus::NoJobsFound);
    }

    #[tokio::test]
    async fn test_concurrent_runs_are_serialized() {
        let fetcher = Arc::new(MockFetcher::new(vec![(
            URL_A,
            Page::Content(r#"[{"link": "https://a.test/1"}]"#),
        )]));
        let reporter = Arc::new(RecordingReporter::new());
        let hunt = Arc::new(orchestrator(fetcher.clone(), reporter.clone(), two_sources(), 2));

        let (first, second) = tokio::join!(hunt.run(rust_prefs()), hunt.run(rust_prefs()));

        assert_eq!(first.results.len(), 1);
        assert_eq!(second.results.len(), 1);
        // Serialized runs fetch A,B then A,B, never interleaved.
        assert_eq!(fetcher.calls(), vec![URL_A, URL_B, URL_A, URL_B]);
        assert_eq!(reporter.received.lock().unwrap().len(), 2);
    }
}
