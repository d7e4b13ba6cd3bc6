use serde::{Deserialize, Serialize};

/// Payment state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "Πληρωμένο")]
    Paid,
    #[serde(rename = "Απλήρωτο")]
    Unpaid,
    #[serde(rename = "Επιστροφή")]
    Refunded,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Πληρωμένο",
            PaymentStatus::Unpaid => "Απλήρωτο",
            PaymentStatus::Refunded => "Επιστροφή",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn all() -> Vec<PaymentStatus> {
        vec![
            PaymentStatus::Paid,
            PaymentStatus::Unpaid,
            PaymentStatus::Refunded,
        ]
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
