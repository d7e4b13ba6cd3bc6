//! Categories and subcategories offered by the product forms and filters

use crate::shared::gateway::ProductGateway;
use contracts::domain::common::Sourced;

/// Built-in catalog used while the backend cannot be reached
const SAMPLE: [(&str, &[&str]); 3] = [
    ("Ηλεκτρονικά", &["Ακουστικά", "Ηχεία", "Αξεσουάρ"]),
    ("Ρούχα", &["Ανδρικά", "Γυναικεία", "Παιδικά"]),
    ("Υγεία", &["Συνταγές", "Συμπληρώματα"]),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub categories: Vec<String>,
    /// Flat list from the backend; empty for the built-in catalog
    pub subcategories: Vec<String>,
    /// Subcategories per category; only the built-in catalog has them
    pub grouped: Vec<(String, Vec<String>)>,
}

impl Catalog {
    pub fn remote(categories: Vec<String>, subcategories: Vec<String>) -> Self {
        Self {
            categories,
            subcategories,
            grouped: Vec::new(),
        }
    }

    pub fn sample() -> Self {
        let grouped: Vec<(String, Vec<String>)> = SAMPLE
            .iter()
            .map(|(cat, subs)| (cat.to_string(), subs.iter().map(|s| s.to_string()).collect()))
            .collect();
        Self {
            categories: grouped.iter().map(|(c, _)| c.clone()).collect(),
            subcategories: Vec::new(),
            grouped,
        }
    }

    /// Subcategory options for the chosen category
    pub fn subcategories_for(&self, category: &str) -> Vec<String> {
        if !self.subcategories.is_empty() {
            return self.subcategories.clone();
        }
        self.grouped
            .iter()
            .find(|(cat, _)| cat == category)
            .map(|(_, subs)| subs.clone())
            .unwrap_or_default()
    }

    /// Every known subcategory, for filters that ignore the category
    pub fn all_subcategories(&self) -> Vec<String> {
        if !self.subcategories.is_empty() {
            return self.subcategories.clone();
        }
        self.grouped.iter().flat_map(|(_, subs)| subs.iter().cloned()).collect()
    }
}

/// Fetch both lists; any failure falls back to the built-in catalog
pub async fn load_catalog<G: ProductGateway>(gateway: &G) -> Sourced<Catalog> {
    let categories = gateway.categories().await;
    let subcategories = gateway.subcategories().await;
    match (categories, subcategories) {
        (Ok(cats), Ok(subs)) => Sourced::remote(Catalog::remote(cats, subs)),
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("Could not fetch categories/subcategories, using sample catalog: {}", e);
            Sourced::fallback(Catalog::sample())
        }
    }
}

/// Label for a category value: first letter upper-cased, underscores as spaces
pub fn display_label(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.map(|c| if c == '_' { ' ' } else { c }))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_subcategories_follow_category() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.categories, vec!["Ηλεκτρονικά", "Ρούχα", "Υγεία"]);
        assert_eq!(catalog.subcategories_for("Υγεία"), vec!["Συνταγές", "Συμπληρώματα"]);
        assert!(catalog.subcategories_for("").is_empty());
        assert_eq!(catalog.all_subcategories().len(), 8);
    }

    #[test]
    fn test_remote_subcategories_are_flat() {
        let catalog = Catalog::remote(vec!["a".into()], vec!["x".into(), "y".into()]);
        assert_eq!(catalog.subcategories_for("anything"), vec!["x", "y"]);
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("ηλεκτρονικά"), "Ηλεκτρονικά");
        assert_eq!(display_label("shoes"), "Shoes");
        assert_eq!(display_label("smart_home"), "Smart home");
        assert_eq!(display_label(""), "");
    }
}
