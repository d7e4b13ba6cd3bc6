//! Sortable table header cell
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Σύνολο"
//!     is_active=Signal::derive(move || state.with(|s| s.sort_key == OrderSortKey::Total))
//!     direction=Signal::derive(move || state.with(|s| s.sort_direction))
//!     on_sort=Callback::new(move |_| state.update(|s| s.toggle_sort(OrderSortKey::Total)))
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator, SortDirection};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    /// Whether this column is the current sort key
    #[prop(into)]
    is_active: Signal<bool>,

    #[prop(into)]
    direction: Signal<SortDirection>,

    on_sort: Callback<()>,

    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// Header alignment (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    view! {
        <TableHeaderCell min_width=min_width>
            <div
                class="table__sortable-header"
                style=header_style
                on:click=move |_| on_sort.run(())
            >
                {label}
                <span class=move || get_sort_class(is_active.get())>
                    {move || get_sort_indicator(is_active.get(), direction.get())}
                </span>
            </div>
        </TableHeaderCell>
    }
}
