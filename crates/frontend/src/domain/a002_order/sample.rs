//! Built-in orders shown while `/admin/orders` is unavailable

use contracts::domain::a002_order::aggregate::{Order, OrderItem, TimelineStep};
use contracts::domain::common::RecordId;
use contracts::enums::{OrderStatus, PaymentStatus};
use chrono::NaiveDate;

fn item(name: &str, qty: u32, price: f64) -> OrderItem {
    OrderItem {
        name: name.to_string(),
        qty,
        price,
    }
}

fn step(label: &str, date: &str) -> TimelineStep {
    TimelineStep {
        label: label.to_string(),
        date: date.to_string(),
    }
}

fn day(month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, d).unwrap_or_default()
}

pub fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            id: RecordId::from("ORD-001"),
            date: day(8, 18),
            customer: "Γιάννης Παπαδόπουλος".to_string(),
            status: OrderStatus::Completed,
            payment: PaymentStatus::Paid,
            total: 120.5,
            items: vec![item("Προϊόν Α", 2, 30.0), item("Προϊόν Β", 1, 60.5)],
            address: "Αθήνα, Ελλάδα".to_string(),
            phone: "6901234567".to_string(),
            email: "giannis@example.com".to_string(),
            notes: "Παράδοση μετά τις 18:00".to_string(),
            shipping: "Courier".to_string(),
            timeline: vec![
                step("Τοποθετήθηκε", "2025-08-18 10:00"),
                step("Επιβεβαιώθηκε", "2025-08-18 10:10"),
                step("Απεστάλη", "2025-08-18 13:00"),
                step("Ολοκληρώθηκε", "2025-08-19 09:00"),
            ],
        },
        Order {
            id: RecordId::from("ORD-002"),
            date: day(8, 17),
            customer: "Μαρία Κωνσταντίνου".to_string(),
            status: OrderStatus::Pending,
            payment: PaymentStatus::Unpaid,
            total: 75.0,
            items: vec![item("Προϊόν Γ", 3, 25.0)],
            address: "Θεσσαλονίκη, Ελλάδα".to_string(),
            phone: "6987654321".to_string(),
            email: "maria@example.com".to_string(),
            notes: String::new(),
            shipping: "Pickup".to_string(),
            timeline: vec![
                step("Τοποθετήθηκε", "2025-08-17 11:00"),
                step("Επιβεβαιώθηκε", "2025-08-17 11:10"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_totals_match_items() {
        for order in sample_orders() {
            let sum: f64 = order.items.iter().map(OrderItem::line_total).sum();
            assert!((sum - order.total).abs() < 1e-9, "{}", order.id);
        }
    }
}
