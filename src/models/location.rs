//! Client-side location tracking.
//!
//! Navigation never reloads anything; it pushes entries onto an
//! in-memory history the way the browser history API did, so filter
//! state stays shareable through the query string.

use crate::models::Route;

/// A path plus query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn for_route(route: Route) -> Self {
        Self::new(route.path())
    }

    /// First value for a query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace a query parameter.
    pub fn set_query_param(&mut self, key: &str, value: &str) {
        if let Some(pair) = self.query.iter_mut().find(|(k, _)| k == key) {
            pair.1 = value.to_string();
        } else {
            self.query.push((key.to_string(), value.to_string()));
        }
    }

    /// Remove a query parameter.
    pub fn remove_query_param(&mut self, key: &str) {
        self.query.retain(|(k, _)| k != key);
    }

    /// Render as a shareable string, e.g. `/blog?tag=rust`.
    pub fn to_url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let qs: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        format!("{}?{}", self.path, qs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_param() {
        let mut loc = Location::new("/blog");
        loc.set_query_param("tag", "rust");
        assert_eq!(loc.query_param("tag"), Some("rust"));
        loc.set_query_param("tag", "ai");
        assert_eq!(loc.query_param("tag"), Some("ai"));
        assert_eq!(loc.query.len(), 1);
    }

    #[test]
    fn test_remove_param() {
        let mut loc = Location::new("/blog");
        loc.set_query_param("tag", "rust");
        loc.remove_query_param("tag");
        assert_eq!(loc.query_param("tag"), None);
        assert_eq!(loc.to_url(), "/blog");
    }

    #[test]
    fn test_to_url_with_query() {
        let mut loc = Location::new("/blog");
        loc.set_query_param("tag", "payments");
        assert_eq!(loc.to_url(), "/blog?tag=payments");
    }
}
