use crate::shared::list_utils::{
    compare_text, Filterable, Identified, QueryState, Searchable, SortDirection, Sortable,
};
use contracts::domain::a001_product::aggregate::Product;
use leptos::prelude::*;
use std::borrow::Cow;
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    /// Empty means any category
    pub category: String,
    pub subcategory: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortKey {
    Name,
    Price,
    CreatedAt,
}

impl ProductSortKey {
    pub fn code(&self) -> &'static str {
        match self {
            ProductSortKey::Name => "name",
            ProductSortKey::Price => "price",
            ProductSortKey::CreatedAt => "created_at",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "name" => Some(ProductSortKey::Name),
            "price" => Some(ProductSortKey::Price),
            "created_at" => Some(ProductSortKey::CreatedAt),
            _ => None,
        }
    }
}

/// Entries of the combined sort select, in display order
pub const SORT_OPTIONS: [(ProductSortKey, SortDirection, &str); 6] = [
    (ProductSortKey::Name, SortDirection::Ascending, "Όνομα (Α-Ω)"),
    (ProductSortKey::Name, SortDirection::Descending, "Όνομα (Ω-Α)"),
    (ProductSortKey::Price, SortDirection::Ascending, "Τιμή (Χαμηλή-Υψηλή)"),
    (ProductSortKey::Price, SortDirection::Descending, "Τιμή (Υψηλή-Χαμηλή)"),
    (ProductSortKey::CreatedAt, SortDirection::Descending, "Νεότερα Πρώτα"),
    (ProductSortKey::CreatedAt, SortDirection::Ascending, "Παλαιότερα Πρώτα"),
];

/// Select value such as `price-desc`
pub fn sort_value(key: ProductSortKey, direction: SortDirection) -> String {
    let dir = if direction.is_ascending() { "asc" } else { "desc" };
    format!("{}-{}", key.code(), dir)
}

pub fn parse_sort_value(value: &str) -> Option<(ProductSortKey, SortDirection)> {
    let (code, dir) = value.rsplit_once('-')?;
    let direction = match dir {
        "asc" => SortDirection::Ascending,
        "desc" => SortDirection::Descending,
        _ => return None,
    };
    Some((ProductSortKey::from_code(code)?, direction))
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![self.name.as_str().into(), self.description_str().into()]
    }
}

impl Filterable for Product {
    type Filters = ProductFilters;

    fn matches_filters(&self, filters: &ProductFilters) -> bool {
        (filters.category.is_empty() || self.category_str() == filters.category)
            && (filters.subcategory.is_empty() || self.sub_category_str() == filters.subcategory)
    }
}

impl Sortable for Product {
    type SortKey = ProductSortKey;

    fn compare_by_field(&self, other: &Self, key: ProductSortKey) -> Ordering {
        match key {
            ProductSortKey::Name => compare_text(&self.name, &other.name),
            ProductSortKey::Price => self.price.total_cmp(&other.price),
            // records without a date sort before dated ones
            ProductSortKey::CreatedAt => self.created_instant().cmp(&other.created_instant()),
        }
    }
}

impl Identified for Product {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

pub type ProductListState = QueryState<ProductFilters, ProductSortKey>;

pub fn default_state() -> ProductListState {
    QueryState::new(ProductSortKey::Name, SortDirection::Ascending)
}

pub fn create_state() -> RwSignal<ProductListState> {
    RwSignal::new(default_state())
}

/// Anything to reset? Drives the "clear filters" button.
pub fn has_active_filters(state: &ProductListState) -> bool {
    !state.search_term.trim().is_empty()
        || state.filters != ProductFilters::default()
        || state.sort_key != ProductSortKey::Name
        || state.sort_direction != SortDirection::Ascending
}

/// Drop a deleted product from the loaded list
pub fn remove_product(products: &mut Vec<Product>, id: &str) {
    products.retain(|p| p.record_id() != id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::query;

    fn product(id: i64, name: &str, price: f64, category: &str, created: Option<&str>) -> Product {
        let raw = serde_json::json!({
            "id": id,
            "name": name,
            "price": price,
            "description": format!("περιγραφή {}", name),
            "category": category,
            "sub_category": "γενικά",
            "created_at": created,
        });
        serde_json::from_value(raw).unwrap()
    }

    fn sample() -> Vec<Product> {
        vec![
            product(1, "Ηχείο", 35.0, "ηλεκτρονικά", Some("2025-08-10T10:00:00")),
            product(2, "ακουστικά", 49.99, "ηλεκτρονικά", Some("2025-08-12T09:00:00Z")),
            product(3, "Μπλούζα", 15.5, "ρούχα", None),
        ]
    }

    fn names(list: &[Product]) -> Vec<&str> {
        list.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_default_sort_is_name_ascending() {
        let visible = query(&sample(), &default_state());
        assert_eq!(names(&visible), vec!["ακουστικά", "Ηχείο", "Μπλούζα"]);
    }

    #[test]
    fn test_search_covers_description_case_insensitive() {
        let mut state = default_state();
        state.search_term = "ΠΕΡΙΓΡΑΦΉ ΜΠΛΟΎΖΑ".into();
        assert_eq!(names(&query(&sample(), &state)), vec!["Μπλούζα"]);
    }

    #[test]
    fn test_category_filter_and_empty_subcategory() {
        let mut state = default_state();
        state.filters.category = "ηλεκτρονικά".into();
        assert_eq!(query(&sample(), &state).len(), 2);
        state.filters.subcategory = "άλλο".into();
        assert!(query(&sample(), &state).is_empty());
    }

    #[test]
    fn test_price_and_date_sorting() {
        let mut state = default_state();
        state.set_sort(ProductSortKey::Price, SortDirection::Descending);
        assert_eq!(names(&query(&sample(), &state)), vec!["ακουστικά", "Ηχείο", "Μπλούζα"]);

        state.set_sort(ProductSortKey::CreatedAt, SortDirection::Descending);
        assert_eq!(names(&query(&sample(), &state)), vec!["ακουστικά", "Ηχείο", "Μπλούζα"]);
    }

    #[test]
    fn test_sort_values_round_trip_with_select() {
        for (key, dir, _) in SORT_OPTIONS {
            assert_eq!(parse_sort_value(&sort_value(key, dir)), Some((key, dir)));
        }
        assert_eq!(sort_value(ProductSortKey::CreatedAt, SortDirection::Descending), "created_at-desc");
        assert_eq!(parse_sort_value("colour-asc"), None);
    }

    #[test]
    fn test_active_filters_and_removal() {
        let mut state = default_state();
        assert!(!has_active_filters(&state));
        state.set_sort(ProductSortKey::Price, SortDirection::Ascending);
        assert!(has_active_filters(&state));

        let mut products = sample();
        remove_product(&mut products, "2");
        assert_eq!(names(&products), vec!["Ηχείο", "Μπλούζα"]);
    }
}
