//! URL helpers for backend requests
//!
//! All endpoints are resolved against [`crate::shared::config`].

use crate::shared::config::config;
use serde::Serialize;

/// Build a full API URL from a path
///
/// # Example
/// ```ignore
/// let url = api_url("/categories");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&config().api.base_url, path)
}

/// `GET /products/{id}`
pub fn product_url(id: &str) -> String {
    api_url(&format!(
        "{}/{}",
        config().api.products_path.trim_end_matches('/'),
        urlencoding::encode(id)
    ))
}

/// `/admin/products/{id}` for PUT and DELETE
pub fn admin_product_url(id: &str) -> String {
    let path = &config().api.admin_products_path;
    if path.ends_with('/') {
        api_url(&format!("{}{}", path, urlencoding::encode(id)))
    } else {
        api_url(&format!("{}/{}", path, urlencoding::encode(id)))
    }
}

/// `GET /products/all`
pub fn products_list_url() -> String {
    api_url(&format!(
        "{}/all",
        config().api.products_path.trim_end_matches('/')
    ))
}

/// Append a serialized query string to a URL
pub fn with_query<Q: Serialize>(url: &str, query: &Q) -> String {
    match serde_qs::to_string(query) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", url, qs),
        Ok(_) => url.to_string(),
        Err(e) => {
            log::warn!("Failed to encode query for {}: {}", url, e);
            url.to_string()
        }
    }
}

/// `?_=<millis>` to bypass HTTP caches
#[derive(Debug, Serialize)]
pub struct CacheBust {
    #[serde(rename = "_")]
    pub stamp: i64,
}

/// `?limit=N&t=<millis>` for the product list
#[derive(Debug, Serialize)]
pub struct ListQuery {
    pub limit: u32,
    pub t: i64,
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h:8000/", "/categories"), "http://h:8000/categories");
        assert_eq!(join_url("http://h:8000", "categories"), "http://h:8000/categories");
    }

    #[test]
    fn test_default_urls() {
        assert_eq!(admin_product_url("12"), "http://localhost:8000/admin/products/12");
        assert_eq!(product_url("12"), "http://localhost:8000/products/12");
        assert_eq!(products_list_url(), "http://localhost:8000/products/all");
    }

    #[test]
    fn test_with_query() {
        let url = with_query("http://h/products/all", &ListQuery { limit: 1000, t: 5 });
        assert_eq!(url, "http://h/products/all?limit=1000&t=5");
        let url = with_query("http://h/categories", &CacheBust { stamp: 9 });
        assert_eq!(url, "http://h/categories?_=9");
    }
}
