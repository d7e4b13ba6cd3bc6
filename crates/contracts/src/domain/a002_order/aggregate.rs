use crate::domain::common::RecordId;
use crate::enums::{OrderStatus, PaymentStatus};
use crate::shared::serde_helpers::{lenient_f64, null_as_empty};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Order as listed by `GET /admin/orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: RecordId,
    pub date: NaiveDate,
    pub customer: String,
    pub status: OrderStatus,
    pub payment: PaymentStatus,
    #[serde(deserialize_with = "lenient_f64")]
    pub total: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub shipping: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timeline: Vec<TimelineStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub qty: u32,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.qty as f64 * self.price
    }
}

/// One event in the order history, e.g. "Απεστάλη" at "2025-08-18 13:00"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub label: String,
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_order() {
        let raw = r#"{
            "id": "ORD-009",
            "date": "2025-08-18",
            "customer": "Νίκος",
            "status": "Απεστάλη",
            "payment": "Πληρωμένο",
            "total": 50,
            "items": [{"name":"Α","qty":2,"price":"25"}],
            "timeline": null
        }"#;
        let o: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(o.id, RecordId::Text("ORD-009".into()));
        assert_eq!(o.date, NaiveDate::from_ymd_opt(2025, 8, 18).unwrap());
        assert_eq!(o.status, OrderStatus::Shipped);
        assert_eq!(o.items[0].line_total(), 50.0);
        assert!(o.timeline.is_empty());
        assert_eq!(o.email, "");
    }
}
