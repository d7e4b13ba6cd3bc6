use std::collections::BTreeMap;

pub const NAME_REQUIRED: &str = "Απαιτείται όνομα";
pub const PRICE_INVALID: &str = "Εισάγετε έγκυρη τιμή";
pub const CATEGORY_REQUIRED: &str = "Επιλέξτε κατηγορία";
pub const SUBCATEGORY_REQUIRED: &str = "Επιλέξτε υποκατηγορία";
pub const DESCRIPTION_REQUIRED: &str = "Απαιτείται περιγραφή";
pub const IMAGE_REQUIRED: &str = "Πρέπει να επιλέξετε εικόνα";

/// Product form fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    Name,
    Price,
    Description,
    Category,
    Subcategory,
    Image,
}

impl FieldKey {
    pub const ALL: [FieldKey; 6] = [
        FieldKey::Name,
        FieldKey::Price,
        FieldKey::Description,
        FieldKey::Category,
        FieldKey::Subcategory,
        FieldKey::Image,
    ];

    /// Fields with a text value, i.e. everything but the image
    pub const TEXT: [FieldKey; 5] = [
        FieldKey::Name,
        FieldKey::Price,
        FieldKey::Description,
        FieldKey::Category,
        FieldKey::Subcategory,
    ];

    /// DOM id of the input bound to this field
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Price => "price",
            FieldKey::Description => "description",
            FieldKey::Category => "category",
            FieldKey::Subcategory => "subcategory",
            FieldKey::Image => "image",
        }
    }

    /// Enter-to-advance chain. `None` from `Subcategory` means "submit".
    pub fn next_in_chain(&self) -> Option<FieldKey> {
        match self {
            FieldKey::Name => Some(FieldKey::Price),
            FieldKey::Price => Some(FieldKey::Description),
            FieldKey::Description => Some(FieldKey::Category),
            FieldKey::Category => Some(FieldKey::Subcategory),
            FieldKey::Subcategory | FieldKey::Image => None,
        }
    }
}

/// Snapshot of the values a rule can look at
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    pub name: String,
    pub price: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    pub image_count: usize,
}

impl FormValues {
    pub fn text(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Name => &self.name,
            FieldKey::Price => &self.price,
            FieldKey::Description => &self.description,
            FieldKey::Category => &self.category,
            FieldKey::Subcategory => &self.subcategory,
            FieldKey::Image => "",
        }
    }

    pub fn text_mut(&mut self, key: FieldKey) -> Option<&mut String> {
        match key {
            FieldKey::Name => Some(&mut self.name),
            FieldKey::Price => Some(&mut self.price),
            FieldKey::Description => Some(&mut self.description),
            FieldKey::Category => Some(&mut self.category),
            FieldKey::Subcategory => Some(&mut self.subcategory),
            FieldKey::Image => None,
        }
    }
}

type Rule = fn(&FormValues) -> Option<&'static str>;

fn name_rule(v: &FormValues) -> Option<&'static str> {
    v.name.trim().is_empty().then_some(NAME_REQUIRED)
}

fn price_rule(v: &FormValues) -> Option<&'static str> {
    match parse_float_prefix(&v.price) {
        Some(p) if p.is_finite() && p > 0.0 => None,
        _ => Some(PRICE_INVALID),
    }
}

fn description_rule(v: &FormValues) -> Option<&'static str> {
    v.description.trim().is_empty().then_some(DESCRIPTION_REQUIRED)
}

fn category_rule(v: &FormValues) -> Option<&'static str> {
    v.category.is_empty().then_some(CATEGORY_REQUIRED)
}

fn subcategory_rule(v: &FormValues) -> Option<&'static str> {
    v.subcategory.is_empty().then_some(SUBCATEGORY_REQUIRED)
}

fn image_rule(v: &FormValues) -> Option<&'static str> {
    (v.image_count == 0).then_some(IMAGE_REQUIRED)
}

fn rule_for(key: FieldKey) -> Rule {
    match key {
        FieldKey::Name => name_rule,
        FieldKey::Price => price_rule,
        FieldKey::Description => description_rule,
        FieldKey::Category => category_rule,
        FieldKey::Subcategory => subcategory_rule,
        FieldKey::Image => image_rule,
    }
}

/// Validate one field. `None` means the field passes.
pub fn validate(key: FieldKey, values: &FormValues) -> Option<&'static str> {
    rule_for(key)(values)
}

/// Validate `fields`; the result is empty iff the form is submittable
pub fn validate_all(fields: &[FieldKey], values: &FormValues) -> BTreeMap<FieldKey, &'static str> {
    fields
        .iter()
        .filter_map(|&key| validate(key, values).map(|msg| (key, msg)))
        .collect()
}

/// Parse the longest leading decimal number, ignoring leading whitespace
/// and anything after the number (`"12abc"` is `12`, `"abc"` is `None`).
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // exponent only counts when digits follow it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(price: &str) -> FormValues {
        FormValues {
            price: price.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_price_rules() {
        assert_eq!(validate(FieldKey::Price, &values("")), Some(PRICE_INVALID));
        assert_eq!(validate(FieldKey::Price, &values("0")), Some(PRICE_INVALID));
        assert_eq!(validate(FieldKey::Price, &values("-5")), Some(PRICE_INVALID));
        assert_eq!(validate(FieldKey::Price, &values("abc")), Some(PRICE_INVALID));
        assert_eq!(validate(FieldKey::Price, &values("12abc")), None);
        assert_eq!(validate(FieldKey::Price, &values("0.01")), None);
    }

    #[test]
    fn test_name_rule() {
        let mut v = FormValues::default();
        v.name = "   ".into();
        assert_eq!(validate(FieldKey::Name, &v), Some(NAME_REQUIRED));
        v.name = " x ".into();
        assert_eq!(validate(FieldKey::Name, &v), None);
    }

    #[test]
    fn test_select_and_image_rules() {
        let mut v = FormValues::default();
        assert_eq!(validate(FieldKey::Category, &v), Some(CATEGORY_REQUIRED));
        assert_eq!(validate(FieldKey::Subcategory, &v), Some(SUBCATEGORY_REQUIRED));
        assert_eq!(validate(FieldKey::Image, &v), Some(IMAGE_REQUIRED));
        v.category = "ρούχα".into();
        v.subcategory = "ανδρικά".into();
        v.image_count = 1;
        assert_eq!(validate(FieldKey::Category, &v), None);
        assert_eq!(validate(FieldKey::Subcategory, &v), None);
        assert_eq!(validate(FieldKey::Image, &v), None);
    }

    #[test]
    fn test_validate_all_is_union() {
        let v = FormValues {
            name: "A".into(),
            price: "3".into(),
            description: "d".into(),
            category: "c".into(),
            subcategory: String::new(),
            image_count: 0,
        };
        let errors = validate_all(&FieldKey::ALL, &v);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[&FieldKey::Subcategory], SUBCATEGORY_REQUIRED);
        assert_eq!(errors[&FieldKey::Image], IMAGE_REQUIRED);

        let without_image = validate_all(&FieldKey::ALL[..5], &v);
        assert_eq!(without_image.keys().copied().collect::<Vec<_>>(), vec![FieldKey::Subcategory]);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("  3.5kg"), Some(3.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("-2"), Some(-2.0));
        assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("12,50"), Some(12.0));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn test_chain() {
        let mut key = FieldKey::Name;
        let mut seen = vec![key];
        while let Some(next) = key.next_in_chain() {
            seen.push(next);
            key = next;
        }
        assert_eq!(seen, FieldKey::ALL[..5].to_vec());
        assert_eq!(FieldKey::Image.next_in_chain(), None);
    }
}
