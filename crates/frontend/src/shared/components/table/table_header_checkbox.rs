//! Select-all checkbox for a table header
//!
//! Checked when every visible row is selected, indeterminate when some are.

use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

/// State of the header checkbox for the visible ids
pub fn checkbox_state(visible_ids: &[String], selected: &HashSet<String>) -> CheckboxState {
    if visible_ids.is_empty() {
        return CheckboxState::Unchecked;
    }
    let selected_count = visible_ids.iter().filter(|id| selected.contains(*id)).count();
    if selected_count == 0 {
        CheckboxState::Unchecked
    } else if selected_count == visible_ids.len() {
        CheckboxState::Checked
    } else {
        CheckboxState::Indeterminate
    }
}

#[component]
pub fn TableHeaderCheckbox(
    /// Ids of the rows currently shown
    #[prop(into)]
    visible_ids: Signal<Vec<String>>,

    #[prop(into)]
    selected: Signal<HashSet<String>>,

    /// `true` = select all visible, `false` = clear
    on_change: Callback<bool>,
) -> impl IntoView {
    let state = Signal::derive(move || checkbox_state(&visible_ids.get(), &selected.get()));
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        let is_indeterminate = matches!(state.get(), CheckboxState::Indeterminate);
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(is_indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || matches!(state.get(), CheckboxState::Checked)
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_checkbox_state() {
        let visible = ids(&["a", "b"]);
        let mut selected: HashSet<String> = HashSet::new();
        assert_eq!(checkbox_state(&visible, &selected), CheckboxState::Unchecked);
        selected.insert("a".into());
        assert_eq!(checkbox_state(&visible, &selected), CheckboxState::Indeterminate);
        selected.insert("b".into());
        assert_eq!(checkbox_state(&visible, &selected), CheckboxState::Checked);
        // hidden selected rows do not count
        selected.insert("z".into());
        assert_eq!(checkbox_state(&visible, &selected), CheckboxState::Checked);
        assert_eq!(checkbox_state(&[], &selected), CheckboxState::Unchecked);
    }
}
