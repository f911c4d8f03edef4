//! Candidate portfolio assembled from the document store.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::store::{DocumentStore, ListQuery};

const PORTFOLIO_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Portfolio {
    pub projects: Vec<PortfolioProject>,
    pub certifications: Vec<PortfolioCertification>,
    /// Unique entries of every project's comma-separated tech stack, sorted.
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioProject {
    pub name: String,
    pub tech_stack: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioCertification {
    pub name: String,
    pub provider: String,
    pub date: String,
}

/// Loads projects and certifications. A collection that cannot be read is
/// logged and left empty; this never fails.
pub async fn fetch_portfolio(store: &DocumentStore) -> Portfolio {
    let projects = store
        .list_records(
            "projects",
            &ListQuery {
                per_page: PORTFOLIO_PAGE_SIZE,
                sort: Some("-created"),
                ..Default::default()
            },
        )
        .await
        .unwrap_or_else(|e| {
            warn!("Could not fetch projects (collection might be missing): {e}");
            Vec::new()
        });

    let certifications = store
        .list_records(
            "certifications",
            &ListQuery {
                per_page: PORTFOLIO_PAGE_SIZE,
                ..Default::default()
            },
        )
        .await
        .unwrap_or_else(|e| {
            warn!("Could not fetch certifications: {e}");
            Vec::new()
        });

    let portfolio = build_portfolio(&projects, &certifications);
    info!(
        "Portfolio loaded: {} projects, {} certifications, {} skills",
        portfolio.projects.len(),
        portfolio.certifications.len(),
        portfolio.skills.len()
    );
    portfolio
}

pub fn build_portfolio(projects: &[Value], certifications: &[Value]) -> Portfolio {
    let projects: Vec<PortfolioProject> = projects
        .iter()
        .map(|p| PortfolioProject {
            name: str_field(p, "project_name").unwrap_or_else(|| "Untitled".to_string()),
            tech_stack: str_field(p, "tech_stack").unwrap_or_default(),
            description: str_field(p, "description").unwrap_or_default(),
            category: str_field(p, "category").unwrap_or_default(),
        })
        .collect();

    let certifications = certifications
        .iter()
        .map(|c| PortfolioCertification {
            name: str_field(c, "certificate_name").unwrap_or_else(|| "Untitled".to_string()),
            provider: str_field(c, "provider").unwrap_or_default(),
            date: str_field(c, "completion_date").unwrap_or_default(),
        })
        .collect();

    let skills: BTreeSet<String> = projects
        .iter()
        .flat_map(|p| p.tech_stack.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    Portfolio {
        projects,
        certifications,
        skills: skills.into_iter().collect(),
    }
}

fn str_field(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn test_build_portfolio_aggregates_unique_skills() {
        let projects = vec![
            json!({"project_name": "Crawler", "tech_stack": "Rust, Tokio ,reqwest"}),
            json!({"project_name": "Agent", "tech_stack": "Python,Rust,"}),
        ];
        let portfolio = build_portfolio(&projects, &[]);
        assert_eq!(portfolio.skills, vec!["Python", "Rust", "Tokio", "reqwest"]);
    }

    #[test]
    fn test_build_portfolio_defaults_missing_names() {
        let portfolio = build_portfolio(
            &[json!({"description": "no name"})],
            &[json!({"provider": "AWS", "completion_date": "2025-01-01"})],
        );
        assert_eq!(portfolio.projects[0].name, "Untitled");
        assert_eq!(portfolio.projects[0].tech_stack, "");
        assert_eq!(portfolio.certifications[0].name, "Untitled");
        assert_eq!(portfolio.certifications[0].provider, "AWS");
        assert!(portfolio.skills.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_portfolio_survives_missing_collection() {
        let mut server = mockito::Server::new_async().await;
        let _projects = server
            .mock("GET", "/api/collections/projects/records")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items": [{"project_name": "JobOs", "tech_stack": "Rust, Axum"}]}"#)
            .create_async()
            .await;
        let _certs = server
            .mock("GET", "/api/collections/certifications/records")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let store = DocumentStore::new(&server.url()).unwrap();
        let portfolio = fetch_portfolio(&store).await;

        assert_eq!(portfolio.projects.len(), 1);
        assert!(portfolio.certifications.is_empty());
        assert_eq!(portfolio.skills, vec!["Axum", "Rust"]);
    }
}
