//! Routes of the RedGifs API fed by the tag resolver
//!
//! Only the request URL is built here; sending it is up to the caller's HTTP
//! client.

use crate::error::{RedgifsError, Result};
use crate::models::{MediaType, Order};
use crate::tags::Tags;
use tracing::debug;
use url::Url;

/// Base URL of the RedGifs API
pub const API_BASE_URL: &str = "https://api.redgifs.com";

const SEARCH_PATH: &str = "/v2/gifs/search";

/// Number of results requested per page by default
pub const DEFAULT_SEARCH_COUNT: u32 = 80;

/// Parameters of a `GET /v2/gifs/search` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GifSearch {
    search_text: String,
    order: Order,
    count: u32,
    page: u32,
    media_type: Option<MediaType>,
}

impl GifSearch {
    /// Search for an already canonical tag
    pub fn new(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            order: Order::default(),
            count: DEFAULT_SEARCH_COUNT,
            page: 1,
            media_type: None,
        }
    }

    /// Search for the best canonical match of `query`
    ///
    /// Runs [`Tags::search`] (loading the snapshot if needed) and keeps its
    /// first result.
    pub fn resolve(tags: &mut Tags, query: &str) -> Result<Self> {
        let best = tags
            .search(query)?
            .into_iter()
            .next()
            .ok_or_else(|| RedgifsError::InvalidTag(query.to_string()))?;
        debug!(query, tag = %best, "Resolved search text");
        Ok(Self::new(best))
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Builds the request URL against `base` (e.g. [`API_BASE_URL`])
    pub fn to_url(&self, base: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", base.trim_end_matches('/'), SEARCH_PATH))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("search_text", &self.search_text)
                .append_pair("order", self.order.as_str())
                .append_pair("count", &self.count.to_string())
                .append_pair("page", &self.page.to_string());
            if let Some(media_type) = self.media_type {
                query.append_pair("type", media_type.as_str());
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_value(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_default_search_url() {
        let url = GifSearch::new("Hitomi Tanaka").to_url(API_BASE_URL).unwrap();
        assert_eq!(url.host_str(), Some("api.redgifs.com"));
        assert_eq!(url.path(), "/v2/gifs/search");
        assert_eq!(query_value(&url, "search_text").as_deref(), Some("Hitomi Tanaka"));
        assert_eq!(query_value(&url, "order").as_deref(), Some("trending"));
        assert_eq!(query_value(&url, "count").as_deref(), Some("80"));
        assert_eq!(query_value(&url, "page").as_deref(), Some("1"));
        assert_eq!(query_value(&url, "type"), None);
    }

    #[test]
    fn test_image_search_url() {
        let url = GifSearch::new("Ass")
            .order(Order::Top28)
            .count(10)
            .page(3)
            .media_type(MediaType::Image)
            .to_url("http://localhost:8080/api/")
            .unwrap();
        assert_eq!(url.path(), "/api/v2/gifs/search");
        assert_eq!(query_value(&url, "order").as_deref(), Some("top28"));
        assert_eq!(query_value(&url, "count").as_deref(), Some("10"));
        assert_eq!(query_value(&url, "page").as_deref(), Some("3"));
        assert_eq!(query_value(&url, "type").as_deref(), Some("i"));
    }

    #[test]
    fn test_resolve_uses_best_match() {
        let mut tags = Tags::new();
        let search = GifSearch::resolve(&mut tags, "japanes").unwrap();
        assert_eq!(search.search_text(), "Japanese");
    }

    #[test]
    fn test_resolve_propagates_invalid_tag() {
        let mut tags = Tags::new();
        let err = GifSearch::resolve(&mut tags, "qwxzvbn").unwrap_err();
        assert!(err.is_invalid_tag());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(GifSearch::new("Ass").to_url("not a url").is_err());
    }
}
