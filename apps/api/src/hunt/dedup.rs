use indexmap::IndexMap;

use crate::hunt::models::{JobListing, ScrapedJob};

/// Deduplicates accumulated jobs by `link` in a single pass.
///
/// Records without a link are dropped. On a collision the later record replaces
/// the earlier one but keeps the position where that link was first seen.
pub fn dedup_by_link(jobs: Vec<ScrapedJob>) -> Vec<JobListing> {
    let mut by_link: IndexMap<String, JobListing> = IndexMap::new();

    for listing in jobs.into_iter().filter_map(JobListing::from_scraped) {
        by_link.insert(listing.link.clone(), listing);
    }

    by_link.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, link: Option<&str>) -> ScrapedJob {
        ScrapedJob {
            title: Some(title.to_string()),
            link: link.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_records_without_link_are_dropped() {
        let result = dedup_by_link(vec![job("a", None), job("b", Some("l1")), job("c", None)]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "b");
    }

    #[test]
    fn test_one_record_per_link_last_wins() {
        let result = dedup_by_link(vec![
            job("first", Some("l1")),
            job("other", Some("l2")),
            job("second", Some("l1")),
            job("third", Some("l1")),
        ]);
        assert_eq!(result.len(), 2);
        let l1 = result.iter().find(|j| j.link == "l1").unwrap();
        assert_eq!(l1.title, "third");
    }

    #[test]
    fn test_order_follows_first_occurrence() {
        let result = dedup_by_link(vec![
            job("a1", Some("a")),
            job("b1", Some("b")),
            job("a2", Some("a")),
        ]);
        let links: Vec<&str> = result.iter().map(|j| j.link.as_str()).collect();
        assert_eq!(links, vec!["a", "b"]);
        assert_eq!(result[0].title, "a2");
    }

    #[test]
    fn test_empty_input() {
        assert!(dedup_by_link(Vec::new()).is_empty());
    }
}
