use crate::domain::common::RecordId;
use crate::shared::serde_helpers::{empty_as_none, lenient_f64, null_as_empty};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Record
// ============================================================================

/// Product as returned by `GET /products/{id}` and `GET /products/all`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: RecordId,

    pub name: String,

    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub sub_category: Option<String>,

    /// Stored image URLs, in display order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: Vec<String>,

    #[serde(default)]
    pub created_at: Option<String>,
}

impl Product {
    pub fn first_image(&self) -> Option<&str> {
        self.image_url.first().map(String::as_str)
    }

    pub fn description_str(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn category_str(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    pub fn sub_category_str(&self) -> &str {
        self.sub_category.as_deref().unwrap_or("")
    }

    /// Creation time as an instant. Accepts RFC 3339, naive ISO date-times and bare dates.
    pub fn created_instant(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_instant)
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ============================================================================
// Requests
// ============================================================================

/// JSON `payload` part of the multipart create request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub sub_category: String,
}

/// Body of `PUT /admin/products/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub sub_category: String,
    /// Existing image URLs, sent back unchanged
    pub image_url: Vec<String>,
}

impl ProductUpdate {
    pub fn from_payload(payload: ProductPayload, image_url: Vec<String>) -> Self {
        Self {
            name: payload.name,
            price: payload.price,
            description: payload.description,
            category: payload.category,
            sub_category: payload.sub_category,
            image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_product() {
        let raw = r#"{
            "id": 3,
            "name": "Κρέμα",
            "price": "12.50",
            "description": "Ενυδατική",
            "category": "υγεία",
            "sub_category": "",
            "image_url": null,
            "created_at": "2025-08-18T10:00:00"
        }"#;
        let p: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(p.id, RecordId::Number(3));
        assert_eq!(p.price, 12.5);
        assert_eq!(p.sub_category, None);
        assert!(p.image_url.is_empty());
        assert!(p.first_image().is_none());
        assert!(p.created_instant().is_some());
    }

    #[test]
    fn test_detail_without_id_or_dates() {
        let raw = r#"{"name":"A","price":4,"image_url":["/a.png","/b.png"]}"#;
        let p: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(p.id, RecordId::default());
        assert_eq!(p.first_image(), Some("/a.png"));
        assert_eq!(p.description_str(), "");
        assert!(p.created_instant().is_none());
    }

    #[test]
    fn test_created_instant_formats() {
        assert!(parse_instant("2025-08-18T10:00:00.123456").is_some());
        assert!(parse_instant("2025-08-18T10:00:00+03:00").is_some());
        assert!(parse_instant("2025-08-18").is_some());
        assert!(parse_instant("yesterday").is_none());
        assert!(parse_instant("2025-08-18").unwrap() < parse_instant("2025-08-19T00:00:01Z").unwrap());
    }

    #[test]
    fn test_update_uses_sub_category_key() {
        let payload = ProductPayload {
            name: "A".into(),
            price: 1.0,
            description: "d".into(),
            category: "c".into(),
            sub_category: "s".into(),
        };
        let update = ProductUpdate::from_payload(payload, vec!["/x.png".into()]);
        let v = serde_json::to_value(&update).unwrap();
        assert_eq!(v["sub_category"], "s");
        assert_eq!(v["image_url"][0], "/x.png");
    }
}
