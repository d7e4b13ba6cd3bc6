use contracts::enums::{OrderStatus, PaymentStatus};
use leptos::prelude::*;

/// Badge variants map onto `badge--*` css modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Success,
    Warning,
    Error,
    Info,
    Neutral,
}

impl BadgeVariant {
    pub fn class(&self) -> &'static str {
        match self {
            BadgeVariant::Success => "badge badge--success",
            BadgeVariant::Warning => "badge badge--warning",
            BadgeVariant::Error => "badge badge--error",
            BadgeVariant::Info => "badge badge--info",
            BadgeVariant::Neutral => "badge badge--neutral",
        }
    }

    pub fn for_order(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Completed => BadgeVariant::Success,
            OrderStatus::Pending => BadgeVariant::Warning,
            OrderStatus::Cancelled => BadgeVariant::Error,
            OrderStatus::Shipped => BadgeVariant::Info,
        }
    }

    pub fn for_payment(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Paid => BadgeVariant::Success,
            PaymentStatus::Unpaid => BadgeVariant::Warning,
            PaymentStatus::Refunded => BadgeVariant::Neutral,
        }
    }
}

#[component]
pub fn Badge(
    #[prop(optional)] variant: Option<BadgeVariant>,
    children: Children,
) -> impl IntoView {
    let variant = variant.unwrap_or(BadgeVariant::Neutral);
    view! { <span class=variant.class()>{children()}</span> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_variants() {
        assert_eq!(BadgeVariant::for_order(OrderStatus::Completed), BadgeVariant::Success);
        assert_eq!(BadgeVariant::for_order(OrderStatus::Cancelled).class(), "badge badge--error");
        assert_eq!(BadgeVariant::for_payment(PaymentStatus::Unpaid), BadgeVariant::Warning);
    }
}
