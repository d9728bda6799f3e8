//! Search results and pagination.

use serde::Deserialize;

use crate::error::Result;

/// Wire envelope for the search endpoint response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Hits,
}

#[derive(Debug, Deserialize)]
struct Hits {
    found: u64,
    #[serde(default)]
    start: u64,
    #[serde(default)]
    hit: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    id: String,
}

/// One page of matching document ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    ids: Vec<String>,
    total_entries: u64,
    page_size: u64,
    current_page: u64,
}

impl SearchResults {
    pub(crate) fn from_body(body: &str, page_size: u64) -> Result<Self> {
        let response: SearchResponse = serde_json::from_str(body)?;
        let hits = response.hits;
        let current_page = if page_size == 0 {
            1
        } else {
            hits.start / page_size + 1
        };

        Ok(SearchResults {
            ids: hits.hit.into_iter().map(|h| h.id).collect(),
            total_entries: hits.found,
            page_size,
            current_page,
        })
    }

    /// The empty first page returned by sandboxed clients.
    pub(crate) fn sandbox_fake() -> Self {
        SearchResults {
            ids: Vec::new(),
            total_entries: 0,
            page_size: 10,
            current_page: 1,
        }
    }

    /// Matching document ids on this page, in result order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Total matches across all pages.
    pub fn total_entries(&self) -> u64 {
        self.total_entries
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn total_pages(&self) -> u64 {
        if self.total_entries == 0 || self.page_size == 0 {
            1
        } else {
            self.total_entries.div_ceil(self.page_size)
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.ids.iter()
    }
}

impl<'a> IntoIterator for &'a SearchResults {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "hits": {
            "found": 23,
            "start": 10,
            "hit": [{"id": "13"}, {"id": "28"}]
        }
    }"#;

    #[test]
    fn test_parses_ids_in_order() {
        let results = SearchResults::from_body(BODY, 10).unwrap();
        assert_eq!(results.ids(), ["13".to_string(), "28".to_string()]);
    }

    #[test]
    fn test_pagination_math() {
        let results = SearchResults::from_body(BODY, 10).unwrap();
        assert_eq!(results.total_entries(), 23);
        assert_eq!(results.current_page(), 2);
        assert_eq!(results.total_pages(), 3);
    }

    #[test]
    fn test_empty_results_report_one_page() {
        let results =
            SearchResults::from_body(r#"{"hits": {"found": 0, "start": 0, "hit": []}}"#, 10)
                .unwrap();
        assert!(results.is_empty());
        assert_eq!(results.total_pages(), 1);
        assert_eq!(results.current_page(), 1);
    }

    #[test]
    fn test_missing_hit_array_is_empty() {
        let results = SearchResults::from_body(r#"{"hits": {"found": 0}}"#, 10).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        assert!(SearchResults::from_body("not json", 10).is_err());
    }

    #[test]
    fn test_sandbox_fake_is_empty_first_page() {
        let results = SearchResults::sandbox_fake();
        assert!(results.is_empty());
        assert_eq!(results.current_page(), 1);
        assert_eq!(results.total_pages(), 1);
    }

    #[test]
    fn test_iteration() {
        let results = SearchResults::from_body(BODY, 10).unwrap();
        let ids: Vec<&String> = (&results).into_iter().collect();
        assert_eq!(ids.len(), 2);
    }
}
