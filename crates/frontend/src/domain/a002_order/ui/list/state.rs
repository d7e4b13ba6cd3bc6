use crate::shared::date_utils::{today, DateRange};
use crate::shared::export::CsvExportable;
use crate::shared::list_utils::{
    compare_text, Filterable, Identified, QueryState, Searchable, SortDirection, Sortable,
};
use chrono::NaiveDate;
use contracts::domain::a002_order::aggregate::Order;
use contracts::enums::OrderStatus;
use leptos::prelude::*;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashSet;

pub const CSV_FILENAME: &str = "orders.csv";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderFilters {
    /// `None` means any status
    pub status: Option<OrderStatus>,
    pub date_range: DateRange,
    /// Reference day for the date range
    pub today: NaiveDate,
}

impl OrderFilters {
    /// Pick a range, measured from `today`
    pub fn select_range(&mut self, range: DateRange, today: NaiveDate) {
        self.date_range = range;
        self.today = today;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortKey {
    Id,
    Date,
    Customer,
    Status,
    Total,
}

impl Searchable for Order {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            self.customer.as_str().into(),
            self.id.to_string().into(),
            self.email.as_str().into(),
        ]
    }
}

impl Filterable for Order {
    type Filters = OrderFilters;

    fn matches_filters(&self, filters: &OrderFilters) -> bool {
        filters.status.map_or(true, |s| self.status == s)
            && filters.date_range.contains(self.date, filters.today)
    }
}

impl Sortable for Order {
    type SortKey = OrderSortKey;

    fn compare_by_field(&self, other: &Self, key: OrderSortKey) -> Ordering {
        match key {
            OrderSortKey::Id => compare_text(&self.id.to_string(), &other.id.to_string()),
            OrderSortKey::Date => self.date.cmp(&other.date),
            OrderSortKey::Customer => compare_text(&self.customer, &other.customer),
            OrderSortKey::Status => compare_text(self.status.label(), other.status.label()),
            OrderSortKey::Total => self.total.total_cmp(&other.total),
        }
    }
}

impl Identified for Order {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl CsvExportable for Order {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Ημερομηνία", "Πελάτης", "Email", "Τηλέφωνο", "Κατάσταση", "Πληρωμή", "Σύνολο"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.format("%Y-%m-%d").to_string(),
            self.customer.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.status.label().to_string(),
            self.payment.label().to_string(),
            self.total.to_string(),
        ]
    }
}

pub type OrderListState = QueryState<OrderFilters, OrderSortKey>;

/// Newest first
pub fn default_state() -> OrderListState {
    let mut state: OrderListState = QueryState::new(OrderSortKey::Date, SortDirection::Descending);
    state.filters.today = today();
    state
}

pub fn create_state() -> RwSignal<OrderListState> {
    RwSignal::new(default_state())
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrderStats {
    pub count: usize,
    pub revenue: f64,
    pub pending: usize,
}

/// Quick stats over every loaded order, independent of the current filters
pub fn order_stats(orders: &[Order]) -> OrderStats {
    OrderStats {
        count: orders.len(),
        revenue: orders.iter().map(|o| o.total).sum(),
        pending: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count(),
    }
}

/// Local bulk status change. Returns how many orders changed.
pub fn apply_status(orders: &mut [Order], ids: &HashSet<String>, status: OrderStatus) -> usize {
    let mut changed = 0;
    for order in orders.iter_mut().filter(|o| ids.contains(&o.record_id())) {
        order.status = status;
        changed += 1;
    }
    changed
}

pub fn remove_orders(orders: &mut Vec<Order>, ids: &HashSet<String>) {
    orders.retain(|o| !ids.contains(&o.record_id()));
}

/// Selected orders in list order, for the export
pub fn selected_orders(orders: &[Order], ids: &HashSet<String>) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| ids.contains(&o.record_id()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_order::sample::sample_orders;
    use crate::shared::export::build_csv;
    use crate::shared::list_utils::query;

    fn ids(list: &[Order]) -> Vec<String> {
        list.iter().map(Identified::record_id).collect()
    }

    fn state_on(day: NaiveDate) -> OrderListState {
        let mut state = default_state();
        state.filters.today = day;
        state
    }

    fn aug(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    #[test]
    fn test_default_is_newest_first() {
        let visible = query(&sample_orders(), &state_on(aug(19)));
        assert_eq!(ids(&visible), vec!["ORD-001", "ORD-002"]);
    }

    #[test]
    fn test_search_id_email_customer_case_insensitive() {
        let orders = sample_orders();
        let mut state = state_on(aug(19));
        state.search_term = "ord-001".into();
        assert_eq!(ids(&query(&orders, &state)), vec!["ORD-001"]);
        state.search_term = "MARIA@".into();
        assert_eq!(ids(&query(&orders, &state)), vec!["ORD-002"]);
        state.search_term = "μαρία".into();
        assert_eq!(ids(&query(&orders, &state)), vec!["ORD-002"]);
        state.search_term = "ORD-00".into();
        assert_eq!(query(&orders, &state).len(), 2);
    }

    #[test]
    fn test_status_and_date_filters() {
        let orders = sample_orders();
        let mut state = state_on(aug(18));
        state.filters.status = Some(OrderStatus::Pending);
        assert_eq!(ids(&query(&orders, &state)), vec!["ORD-002"]);

        state.filters.status = None;
        state.filters.date_range = DateRange::Today;
        assert_eq!(ids(&query(&orders, &state)), vec!["ORD-001"]);

        state.filters.today = aug(25);
        state.filters.date_range = DateRange::Week;
        assert_eq!(ids(&query(&orders, &state)), vec!["ORD-001"]);
        state.filters.today = aug(24);
        assert_eq!(query(&orders, &state).len(), 2);
    }

    #[test]
    fn test_select_range_moves_reference_day() {
        let orders = sample_orders();
        let mut state = state_on(aug(18));
        state.filters.select_range(DateRange::Today, aug(18));
        assert_eq!(ids(&query(&orders, &state)), vec!["ORD-001"]);

        // the page stayed open overnight
        state.filters.select_range(DateRange::Today, aug(19));
        assert!(query(&orders, &state).is_empty());
        state.filters.select_range(DateRange::Week, aug(19));
        assert_eq!(query(&orders, &state).len(), 2);
    }

    #[test]
    fn test_total_sort_toggles() {
        let orders = sample_orders();
        let mut state = state_on(aug(19));
        state.toggle_sort(OrderSortKey::Total);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
        assert_eq!(ids(&query(&orders, &state)), vec!["ORD-002", "ORD-001"]);
        state.toggle_sort(OrderSortKey::Total);
        assert_eq!(ids(&query(&orders, &state)), vec!["ORD-001", "ORD-002"]);
    }

    #[test]
    fn test_select_all_then_bulk_status() {
        let mut orders = sample_orders();
        let mut state = state_on(aug(19));
        state.filters.status = Some(OrderStatus::Completed);
        let visible = query(&orders, &state);
        state.select_all(&visible, true);
        assert_eq!(state.selected_ids.len(), 1);

        let changed = apply_status(&mut orders, &state.selected_ids, OrderStatus::Shipped);
        assert_eq!(changed, 1);
        assert_eq!(orders[0].status, OrderStatus::Shipped);
        assert_eq!(orders[1].status, OrderStatus::Pending);
    }

    #[test]
    fn test_stats_and_removal() {
        let mut orders = sample_orders();
        let stats = order_stats(&orders);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.revenue, 195.5);
        assert_eq!(stats.pending, 1);

        let gone: HashSet<String> = ["ORD-002".to_string()].into_iter().collect();
        remove_orders(&mut orders, &gone);
        assert_eq!(order_stats(&orders).pending, 0);
    }

    #[test]
    fn test_csv_rows() {
        let orders = sample_orders();
        let picked: HashSet<String> = ["ORD-002".to_string()].into_iter().collect();
        let csv = build_csv(&selected_orders(&orders, &picked));
        let mut lines = csv.trim_start_matches('\u{FEFF}').lines();
        assert_eq!(
            lines.next(),
            Some("ID,Ημερομηνία,Πελάτης,Email,Τηλέφωνο,Κατάσταση,Πληρωμή,Σύνολο")
        );
        assert_eq!(
            lines.next(),
            Some("ORD-002,2025-08-17,Μαρία Κωνσταντίνου,maria@example.com,6987654321,Εκκρεμεί,Απλήρωτο,75")
        );
        assert_eq!(lines.next(), None);
    }
}
