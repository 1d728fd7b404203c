use serde::Deserialize;

/// Top-level response from the catalog's game search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// One candidate game record. The catalog returns candidates ordered by
/// relevance; only the first is used.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchResult {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub most_popular_media_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl SearchResponse {
    /// The cover-art URL of the best candidate, if the search matched
    /// anything with media attached.
    pub fn best_cover_url(&self) -> Option<&str> {
        self.results
            .iter()
            .map(|r| r.most_popular_media_url.as_str())
            .find(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_search_response() {
        let json = r#"{
            "results": [
                {
                    "created_at": "2017-01-01T00:00:00Z",
                    "created_by": "importer",
                    "id": 42,
                    "name": "Super Mario Bros.",
                    "most_popular_media_url": "http://cdn.example/mario.png"
                }
            ]
        }"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.results.len(), 1);
        assert_eq!(resp.results[0].name, "Super Mario Bros.");
        assert_eq!(resp.best_cover_url(), Some("http://cdn.example/mario.png"));
    }

    #[test]
    fn empty_results_has_no_cover() {
        let resp: SearchResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(resp.best_cover_url(), None);
    }

    #[test]
    fn skips_candidates_without_media() {
        let json = r#"{
            "results": [
                {"id": 1, "name": "First", "most_popular_media_url": ""},
                {"id": 2, "name": "Second", "most_popular_media_url": "http://cdn.example/2.png"}
            ]
        }"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.best_cover_url(), Some("http://cdn.example/2.png"));
    }
}
