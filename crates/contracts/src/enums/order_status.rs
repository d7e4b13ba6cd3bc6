use serde::{Deserialize, Serialize};

/// Order fulfilment status, serialized with the Greek labels the backend uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Ολοκληρώθηκε")]
    Completed,
    #[serde(rename = "Εκκρεμεί")]
    Pending,
    #[serde(rename = "Ακυρώθηκε")]
    Cancelled,
    #[serde(rename = "Απεστάλη")]
    Shipped,
}

impl OrderStatus {
    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "Ολοκληρώθηκε",
            OrderStatus::Pending => "Εκκρεμεί",
            OrderStatus::Cancelled => "Ακυρώθηκε",
            OrderStatus::Shipped => "Απεστάλη",
        }
    }

    /// CSS class suffix for status badges
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "completed",
            OrderStatus::Pending => "pending",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Shipped => "shipped",
        }
    }

    pub fn all() -> Vec<OrderStatus> {
        vec![
            OrderStatus::Completed,
            OrderStatus::Pending,
            OrderStatus::Cancelled,
            OrderStatus::Shipped,
        ]
    }

    /// Parse from a label or a code, as received from `<select>` values
    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|s| s.label() == value || s.code() == value)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_greek_labels() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"Εκκρεμεί\"");
        let back: OrderStatus = serde_json::from_str("\"Απεστάλη\"").unwrap();
        assert_eq!(back, OrderStatus::Shipped);
    }

    #[test]
    fn test_parse_label_or_code() {
        assert_eq!(OrderStatus::parse("cancelled"), Some(OrderStatus::Cancelled));
        assert_eq!(OrderStatus::parse("Ολοκληρώθηκε"), Some(OrderStatus::Completed));
        assert_eq!(OrderStatus::parse("unknown"), None);
    }
}
