/// Request descriptors and cache-key derivation
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Query parameters in deterministic (sorted) order
pub type QueryParams = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    pub fn is_mutation(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub path: String,
    pub method: HttpMethod,
    pub params: QueryParams,
    pub body: Option<Value>,
    pub use_cache: bool,
}

impl RequestDescriptor {
    fn new(method: HttpMethod, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            path: path.into(),
            method,
            params: QueryParams::new(),
            body,
            use_cache: !method.is_mutation(),
        }
    }

    /// Cached read
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, None)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path, Some(body))
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Put, path, Some(body))
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Patch, path, Some(body))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path, None)
    }

    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params.extend(params);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Whether this request may read or write the cache
    ///
    /// Mutations never touch the cache, whatever `use_cache` says.
    pub fn caches(&self) -> bool {
        self.use_cache && !self.method.is_mutation()
    }

    /// Path plus url-encoded query string
    pub fn path_with_query(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }

        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        let separator = if self.path.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.path, separator, query)
    }

    /// Cache key: path (with query) plus the serialized body when present
    ///
    /// The method is not part of the key.
    pub fn cache_key(&self) -> String {
        match &self.body {
            Some(body) => format!("{}#{}", self.path_with_query(), body),
            None => self.path_with_query(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_string_is_sorted_and_encoded() {
        let request = RequestDescriptor::get("/api/enterprises")
            .with_param("status", "SUSPENDED")
            .with_param("keyword", "green harbor")
            .with_param("page", 2);

        assert_eq!(
            request.path_with_query(),
            "/api/enterprises?keyword=green+harbor&page=2&status=SUSPENDED"
        );
    }

    #[test]
    fn test_cache_key_ignores_method_and_call_site() {
        let a = RequestDescriptor::get("/api/reports/summary");
        let b = RequestDescriptor::delete("/api/reports/summary");
        assert_eq!(a.cache_key(), b.cache_key());

        let c = RequestDescriptor::post("/api/search", json!({"keyword": "x"}));
        let d = RequestDescriptor::post("/api/search", json!({"keyword": "x"}));
        assert_eq!(c.cache_key(), d.cache_key());
        assert_ne!(c.cache_key(), a.cache_key());
    }

    #[test]
    fn test_mutations_never_cache() {
        let post = RequestDescriptor::post("/api/enterprises", json!({})).with_cache(true);
        assert!(!post.caches());

        let get = RequestDescriptor::get("/api/enterprises");
        assert!(get.caches());
        assert!(!get.with_cache(false).caches());
    }
}
