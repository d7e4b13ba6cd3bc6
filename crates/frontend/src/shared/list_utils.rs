//! List query engine shared by the product and order lists, plus list UI helpers
//!
//! `query` is a pure function of `(records, QueryState)`: search, then filters,
//! then a stable sort. Nothing is cached.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::ops::Range;

/// Records the free-text search looks at
pub trait Searchable {
    /// Text fields matched against the search term
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    fn matches_filter(&self, term: &str) -> bool {
        let term = normalize(term.trim());
        if term.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| normalize(field).contains(&term))
    }
}

/// Records with structured filters; every active filter must match
pub trait Filterable {
    type Filters: Clone + Default + PartialEq;

    fn matches_filters(&self, filters: &Self::Filters) -> bool;
}

pub trait Sortable {
    type SortKey: Copy + PartialEq;

    fn compare_by_field(&self, other: &Self, key: Self::SortKey) -> Ordering;
}

/// Stable id used by the selection set
pub trait Identified {
    fn record_id(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Ascending
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<F, K> {
    pub search_term: String,
    pub filters: F,
    pub sort_key: K,
    pub sort_direction: SortDirection,
    pub selected_ids: HashSet<String>,
}

impl<F: Default, K> QueryState<F, K> {
    pub fn new(sort_key: K, sort_direction: SortDirection) -> Self {
        Self {
            search_term: String::new(),
            filters: F::default(),
            sort_key,
            sort_direction,
            selected_ids: HashSet::new(),
        }
    }
}

impl<F, K: Copy + PartialEq> QueryState<F, K> {
    /// Header click: the active key flips direction, a new key starts ascending
    pub fn toggle_sort(&mut self, key: K) {
        if self.sort_key == key {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_key = key;
            self.sort_direction = SortDirection::Ascending;
        }
    }

    pub fn set_sort(&mut self, key: K, direction: SortDirection) {
        self.sort_key = key;
        self.sort_direction = direction;
    }

    pub fn toggle_selected(&mut self, id: &str, checked: bool) {
        if checked {
            self.selected_ids.insert(id.to_string());
        } else {
            self.selected_ids.remove(id);
        }
    }

    /// Select exactly the visible records; `false` clears the selection
    pub fn select_all<T: Identified>(&mut self, visible: &[T], checked: bool) {
        self.selected_ids.clear();
        if checked {
            self.selected_ids
                .extend(visible.iter().map(Identified::record_id));
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_ids.contains(id)
    }
}

/// Visible records for the given state
pub fn query<T>(records: &[T], state: &QueryState<T::Filters, T::SortKey>) -> Vec<T>
where
    T: Searchable + Filterable + Sortable + Clone,
{
    let mut visible: Vec<T> = records
        .iter()
        .filter(|r| r.matches_filter(&state.search_term))
        .filter(|r| r.matches_filters(&state.filters))
        .cloned()
        .collect();
    sort_list(&mut visible, state.sort_key, state.sort_direction);
    visible
}

/// Stable sort; equal records keep their relative order in both directions
pub fn sort_list<T: Sortable>(items: &mut [T], key: T::SortKey, direction: SortDirection) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, key);
        if direction.is_ascending() {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Case-insensitive text comparison
pub fn compare_text(a: &str, b: &str) -> Ordering {
    normalize(a).cmp(&normalize(b))
}

fn fold_accent(c: char) -> char {
    match c {
        'ά' => 'α',
        'έ' => 'ε',
        'ή' => 'η',
        'ί' | 'ϊ' | 'ΐ' => 'ι',
        'ό' => 'ο',
        'ύ' | 'ϋ' | 'ΰ' => 'υ',
        'ώ' => 'ω',
        'ς' => 'σ',
        other => other,
    }
}

fn fold_char(c: char) -> impl Iterator<Item = char> {
    c.to_lowercase().map(fold_accent)
}

/// Lowercase and fold Greek accents, so "Ηλεκτρονικά" matches "ηλεκτρονικα"
pub fn normalize(text: &str) -> String {
    text.chars().flat_map(fold_char).collect()
}

/// Folded text, with the byte range of the source character behind every folded byte
fn fold_with_spans(text: &str) -> (String, Vec<Range<usize>>) {
    let mut folded = String::with_capacity(text.len());
    let mut spans = Vec::with_capacity(text.len());
    for (start, c) in text.char_indices() {
        let span = start..start + c.len_utf8();
        for f in fold_char(c) {
            folded.push(f);
            spans.extend(std::iter::repeat(span.clone()).take(f.len_utf8()));
        }
    }
    (folded, spans)
}

/// Byte ranges of `text` matched by `filter` under [`normalize`] folding.
/// Ranges always fall on character boundaries of `text`.
pub fn match_ranges(text: &str, filter: &str) -> Vec<Range<usize>> {
    let needle = normalize(filter.trim());
    if needle.is_empty() {
        return Vec::new();
    }
    let (folded, spans) = fold_with_spans(text);

    let mut ranges: Vec<Range<usize>> = Vec::new();
    for (pos, _) in folded.match_indices(&needle) {
        let last = ranges.last().map_or(0, |r| r.end);
        let start = spans[pos].start.max(last);
        let end = spans[pos + needle.len() - 1].end;
        if end > start {
            ranges.push(start..end);
        }
    }
    ranges
}

/// Highlight matches of `filter` in `text`, folded the same way the search is
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;
    for range in ranges {
        if range.start > last_pos {
            parts.push(view! { <span>{text[last_pos..range.start].to_string()}</span> }.into_any());
        }
        last_pos = range.end;
        parts.push(
            view! { <mark class="search-highlight">{text[range].to_string()}</mark> }.into_any(),
        );
    }

    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Sort indicator for a header
pub fn get_sort_indicator(is_active: bool, direction: SortDirection) -> &'static str {
    match (is_active, direction) {
        (true, SortDirection::Ascending) => " ▲",
        (true, SortDirection::Descending) => " ▼",
        (false, _) => " ⇅",
    }
}

pub fn get_sort_class(is_active: bool) -> &'static str {
    if is_active {
        "sort-icon active"
    } else {
        "sort-icon"
    }
}

/// Search box with debounce and a clear button
#[component]
pub fn SearchInput(
    /// Current committed term
    #[prop(into)]
    value: Signal<String>,
    /// Called with the new term after the debounce delay
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
    #[prop(optional, default = 300)]
    debounce_ms: u32,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Αναζήτηση...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    // dropping a pending Timeout cancels it
    let pending = StoredValue::new_local(None::<Timeout>);

    // external resets (e.g. "clear filters") must reach the input
    Effect::new(move |_| {
        let committed = value.get();
        if committed.is_empty() {
            set_input_value.set(committed);
        }
    });

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let timeout = Timeout::new(debounce_ms, move || on_change.run(new_value));
        pending.set_value(Some(timeout));
    };

    let clear_filter = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <span class="search-input__icon">{crate::shared::icons::icon("search")}</span>
            <input
                type="text"
                class=move || {
                    if value.get().trim().is_empty() {
                        "search-input__field"
                    } else {
                        "search-input__field search-input__field--active"
                    }
                }
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Καθαρισμός">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        name: &'static str,
        group: &'static str,
        amount: f64,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct RowFilters {
        group: Option<&'static str>,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum RowKey {
        Name,
        Amount,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<Cow<'_, str>> {
            vec![self.id.into(), self.name.into()]
        }
    }

    impl Filterable for Row {
        type Filters = RowFilters;
        fn matches_filters(&self, f: &RowFilters) -> bool {
            f.group.map_or(true, |g| g == self.group)
        }
    }

    impl Sortable for Row {
        type SortKey = RowKey;
        fn compare_by_field(&self, other: &Self, key: RowKey) -> Ordering {
            match key {
                RowKey::Name => compare_text(self.name, other.name),
                RowKey::Amount => self.amount.total_cmp(&other.amount),
            }
        }
    }

    impl Identified for Row {
        fn record_id(&self) -> String {
            self.id.to_string()
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: "R1", name: "Ηλεκτρονικά Β", group: "x", amount: 5.0 },
            Row { id: "R2", name: "alpha", group: "y", amount: 1.0 },
            Row { id: "R3", name: "Beta", group: "x", amount: 5.0 },
        ]
    }

    fn ids(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_query_is_idempotent_and_pure() {
        let records = rows();
        let state = QueryState::<RowFilters, RowKey>::new(RowKey::Name, SortDirection::Ascending);
        let first = query(&records, &state);
        let second = query(&records, &state);
        assert_eq!(first, second);
        assert_eq!(records, rows());
    }

    #[test]
    fn test_search_is_case_and_accent_insensitive() {
        let records = rows();
        let mut state = QueryState::<RowFilters, RowKey>::new(RowKey::Name, SortDirection::Ascending);
        state.search_term = "ΗΛΕΚΤΡΟΝΙΚΑ".into();
        assert_eq!(ids(&query(&records, &state)), vec!["R1"]);
        state.search_term = "r2".into();
        assert_eq!(ids(&query(&records, &state)), vec!["R2"]);
        state.search_term = "   ".into();
        assert_eq!(query(&records, &state).len(), 3);
    }

    #[test]
    fn test_filters_and_search_combine() {
        let records = rows();
        let mut state = QueryState::<RowFilters, RowKey>::new(RowKey::Name, SortDirection::Ascending);
        state.filters.group = Some("x");
        assert_eq!(ids(&query(&records, &state)), vec!["R3", "R1"]);
        state.search_term = "beta".into();
        assert_eq!(ids(&query(&records, &state)), vec!["R3"]);
    }

    #[test]
    fn test_stable_sort_both_directions() {
        let records = rows();
        let mut state = QueryState::<RowFilters, RowKey>::new(RowKey::Amount, SortDirection::Ascending);
        assert_eq!(ids(&query(&records, &state)), vec!["R2", "R1", "R3"]);
        state.toggle_sort(RowKey::Amount);
        assert_eq!(state.sort_direction, SortDirection::Descending);
        assert_eq!(ids(&query(&records, &state)), vec!["R1", "R3", "R2"]);
        state.toggle_sort(RowKey::Name);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_select_all_selects_visible_only() {
        let records = rows();
        let mut state = QueryState::<RowFilters, RowKey>::new(RowKey::Name, SortDirection::Ascending);
        state.toggle_selected("R2", true);
        state.filters.group = Some("x");
        let visible = query(&records, &state);
        state.select_all(&visible, true);
        let mut selected: Vec<_> = state.selected_ids.iter().cloned().collect();
        selected.sort();
        assert_eq!(selected, vec!["R1", "R3"]);
        state.select_all(&visible, false);
        assert!(state.selected_ids.is_empty());
    }

    #[test]
    fn test_selection_survives_filtering() {
        let records = rows();
        let mut state = QueryState::<RowFilters, RowKey>::new(RowKey::Name, SortDirection::Ascending);
        state.toggle_selected("R2", true);
        state.filters.group = Some("x");
        let _ = query(&records, &state);
        assert!(state.is_selected("R2"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Υγεία"), "υγεια");
        assert_eq!(normalize("ΟΔΟΣ"), "οδοσ");
        assert_eq!(compare_text("alpha", "Beta"), Ordering::Less);
    }

    #[test]
    fn test_match_ranges_fold_accents() {
        let text = "Ηλεκτρονικά είδη";
        let ranges = match_ranges(text, "ηλεκτρονικα");
        assert_eq!(ranges.len(), 1);
        assert_eq!(&text[ranges[0].clone()], "Ηλεκτρονικά");
        assert_eq!(match_ranges("Ab ab", "AB"), vec![0..2, 3..5]);
        assert!(match_ranges("Ab", "  ").is_empty());
        assert!(match_ranges("Ab", "c").is_empty());
    }

    #[test]
    fn test_match_ranges_stay_on_char_boundaries() {
        // 'İ' grows and 'ẞ' shrinks when lowercased, the total byte length is unchanged
        let text = "İẞx";
        assert_eq!(text.len(), text.to_lowercase().len());
        assert_eq!(match_ranges(text, "ß"), vec![2..5]);
        assert_eq!(match_ranges(text, "i"), vec![0..2]);
        assert_eq!(match_ranges(text, "x"), vec![5..6]);
        for range in match_ranges(text, "ßx") {
            assert!(text.is_char_boundary(range.start) && text.is_char_boundary(range.end));
        }
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator(true, SortDirection::Ascending), " ▲");
        assert_eq!(get_sort_indicator(true, SortDirection::Descending), " ▼");
        assert_eq!(get_sort_indicator(false, SortDirection::Descending), " ⇅");
    }
}
