pub mod state;

use self::state::{
    apply_status, create_state, order_stats, remove_orders, selected_orders, OrderSortKey,
    CSV_FILENAME,
};
use crate::domain::a002_order::sample::sample_orders;
use crate::layout::{use_modal, ModalMessage};
use crate::shared::components::table::{
    format_euro, SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::components::{Badge, BadgeVariant, StatCard};
use crate::shared::date_utils::{today, DateRange};
use crate::shared::export::export_to_csv;
use crate::shared::gateway::{HttpGateway, OrderGateway};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, query, Identified, SearchInput};
use crate::shared::modal::{ConfirmDialog, Modal};
use contracts::domain::a002_order::aggregate::Order;
use contracts::domain::common::Sourced;
use contracts::enums::OrderStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;
use thaw::*;

pub const DEMO_NOTICE: &str = "Εμφανίζονται δεδομένα επίδειξης. Η λίστα παραγγελιών δεν είναι διαθέσιμη.";

/// Orders from the backend, or the sample orders when that fails
pub async fn load_orders<G: OrderGateway>(gateway: &G) -> Sourced<Vec<Order>> {
    match gateway.list_orders().await {
        Ok(orders) => Sourced::remote(orders),
        Err(e) => {
            log::warn!("Orders unavailable, showing sample data: {}", e);
            Sourced::fallback(sample_orders())
        }
    }
}

fn amount(value: f64) -> String {
    format!("€{:.2}", value)
}

/// Hover text of the customer cell
fn contact_tooltip(order: &Order) -> String {
    format!("Email: {}\nΤηλ: {}", order.email, order.phone)
}

#[component]
fn StatusBadge(status: OrderStatus) -> impl IntoView {
    view! { <Badge variant=BadgeVariant::for_order(status)>{status.label()}</Badge> }
}

#[component]
fn OrderDetails(order: Order, on_close: Callback<()>) -> impl IntoView {
    let last = order.timeline.len().saturating_sub(1);
    let notes = if order.notes.trim().is_empty() {
        "-".to_string()
    } else {
        order.notes.clone()
    };

    view! {
        <Modal title="Λεπτομέρειες Παραγγελίας".to_string() on_close=on_close class="modal--order">
            <div class="order-details__grid">
                <div><b>"ID: "</b>{order.id.to_string()}</div>
                <div><b>"Ημερομηνία: "</b>{order.date.format("%Y-%m-%d").to_string()}</div>
                <div><b>"Πελάτης: "</b>{order.customer.clone()}</div>
                <div><b>"Email: "</b>{order.email.clone()}</div>
                <div><b>"Τηλέφωνο: "</b>{order.phone.clone()}</div>
                <div><b>"Κατάσταση: "</b><StatusBadge status=order.status /></div>
                <div>
                    <b>"Πληρωμή: "</b>
                    <Badge variant=BadgeVariant::for_payment(order.payment)>{order.payment.label()}</Badge>
                </div>
                <div><b>"Σύνολο: "</b>{amount(order.total)}</div>
                <div><b>"Διεύθυνση: "</b>{order.address.clone()}</div>
                <div><b>"Τρόπος Αποστολής: "</b>{order.shipping.clone()}</div>
                <div class="order-details__wide"><b>"Σημειώσεις: "</b>{notes}</div>
            </div>

            <div class="order-details__section">
                <b>"Προϊόντα:"</b>
                <ul>
                    {order.items.iter().map(|item| view! {
                        <li>{format!("{} x{} – {}", item.name, item.qty, amount(item.price))}</li>
                    }).collect_view()}
                </ul>
            </div>

            <div class="order-details__section">
                <b>"Χρονολόγιο:"</b>
                <div class="timeline">
                    {order.timeline.iter().enumerate().map(|(idx, step)| {
                        let class = if idx == last { "timeline__step timeline__step--last" } else { "timeline__step" };
                        view! {
                            <div class=class>
                                <span class="timeline__label">{step.label.clone()}</span>
                                " "
                                <span class="timeline__date">{step.date.clone()}</span>
                            </div>
                        }
                    }).collect_view()}
                </div>
            </div>
        </Modal>
    }
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    let state = create_state();
    let orders = RwSignal::new(Vec::<Order>::new());
    let (demo, set_demo) = signal(false);
    let (loading, set_loading) = signal(true);
    let (status_menu, set_status_menu) = signal(false);
    let confirm_delete = RwSignal::new(false);
    let viewing = RwSignal::new(Option::<Order>::None);
    let modal = use_modal();

    spawn_local(async move {
        let loaded = load_orders(&HttpGateway).await;
        set_demo.try_set(loaded.source.is_fallback());
        orders.try_set(loaded.data);
        set_loading.try_set(false);
    });

    let visible = Signal::derive(move || orders.with(|o| state.with(|s| query(o, s))));
    let visible_ids = Signal::derive(move || visible.with(|v| v.iter().map(Identified::record_id).collect::<Vec<_>>()));
    let selected = Signal::derive(move || state.with(|s| s.selected_ids.clone()));
    let search = Signal::derive(move || state.with(|s| s.search_term.clone()));
    let stats = Signal::derive(move || orders.with(|o| order_stats(o)));

    let sort_header = move |label: &'static str, key: OrderSortKey| {
        view! {
            <SortableHeaderCell
                label=label
                is_active=Signal::derive(move || state.with(|s| s.sort_key == key))
                direction=Signal::derive(move || state.with(|s| s.sort_direction))
                on_sort=Callback::new(move |_| state.update(|s| s.toggle_sort(key)))
            />
        }
    };

    let export_selected = move || {
        let rows = orders.with(|o| selected_orders(o, &selected.get_untracked()));
        if rows.is_empty() {
            return;
        }
        if let Err(e) = export_to_csv(&rows, CSV_FILENAME) {
            log::error!("CSV export failed: {}", e);
            modal.show(ModalMessage::error("Σφάλμα", e));
        }
    };

    let bulk_status = move |status: OrderStatus| {
        let ids: HashSet<String> = selected.get_untracked();
        orders.update(|o| {
            apply_status(o, &ids, status);
        });
        set_status_menu.set(false);
        state.update(|s| s.clear_selection());
    };

    let bulk_delete = Callback::new(move |_: ()| {
        let ids: HashSet<String> = selected.get_untracked();
        orders.update(|o| remove_orders(o, &ids));
        state.update(|s| s.clear_selection());
        confirm_delete.set(false);
    });

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Παραγγελίες"</h1>
                    <span class="page__count">{move || orders.with(Vec::len)}</span>
                </div>
            </div>

            <Show when=move || demo.get()>
                <div class="alert alert--info">{DEMO_NOTICE}</div>
            </Show>

            <div class="orders-toolbar">
                <div class="orders-toolbar__filters">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |term: String| state.update(|s| s.search_term = term))
                        placeholder="Αναζήτηση πελάτη, email ή ID..."
                    />
                    <select
                        class="form__select"
                        prop:value=move || state.with(|s| s.filters.status.map(|st| st.label()).unwrap_or(""))
                        on:change=move |ev| {
                            let status = OrderStatus::parse(&event_target_value(&ev));
                            state.update(|s| s.filters.status = status);
                        }
                    >
                        <option value="">"Όλες οι καταστάσεις"</option>
                        {OrderStatus::all().into_iter().map(|st| view! {
                            <option value=st.label()>{st.label()}</option>
                        }).collect_view()}
                    </select>
                    <select
                        class="form__select"
                        prop:value=move || state.with(|s| s.filters.date_range.code())
                        on:change=move |ev| {
                            let range = DateRange::from_code(&event_target_value(&ev));
                            state.update(|s| s.filters.select_range(range, today()));
                        }
                    >
                        {DateRange::all().into_iter().map(|r| view! {
                            <option value=r.code()>{r.label()}</option>
                        }).collect_view()}
                    </select>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| export_selected()
                        disabled=Signal::derive(move || selected.with(HashSet::is_empty))
                    >
                        {icon("download")}
                        " Εξαγωγή CSV"
                    </Button>
                </div>

                <div class="orders-toolbar__stats">
                    <StatCard label="Σύνολο" icon_name="orders" value=Signal::derive(move || stats.get().count.to_string()) />
                    <StatCard label="Έσοδα" icon_name="euro" value=Signal::derive(move || format_euro(stats.get().revenue)) />
                    <StatCard label="Εκκρεμείς" icon_name="clock" value=Signal::derive(move || stats.get().pending.to_string()) />
                </div>
            </div>

            <Show when=move || !selected.with(HashSet::is_empty)>
                <div class="bulk-actions">
                    <span class="bulk-actions__count">
                        {move || format!("Επιλεγμένα: {}", selected.with(HashSet::len))}
                    </span>
                    <button class="button button--danger" on:click=move |_| confirm_delete.set(true)>
                        {icon("delete")}
                        " Διαγραφή"
                    </button>
                    <button class="button button--primary" on:click=move |_| export_selected()>
                        {icon("download")}
                        " Εξαγωγή"
                    </button>
                    <div class="bulk-actions__status">
                        <button
                            class="button button--warning"
                            on:click=move |_| set_status_menu.update(|open| *open = !*open)
                        >
                            {icon("clock")}
                            " Αλλαγή Κατάστασης"
                        </button>
                        <Show when=move || status_menu.get()>
                            <div class="dropdown">
                                {OrderStatus::all().into_iter().map(|st| view! {
                                    <button class="dropdown__item" on:click=move |_| bulk_status(st)>
                                        {st.label()}
                                    </button>
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                </div>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="page__loading">"Φόρτωση..."</div> }
            >
                <div class="table-wrapper">
                    <Table class="orders-table">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    visible_ids=visible_ids
                                    selected=selected
                                    on_change=Callback::new(move |checked: bool| {
                                        let rows = visible.get_untracked();
                                        state.update(|s| s.select_all(&rows, checked));
                                    })
                                />
                                {sort_header("ID", OrderSortKey::Id)}
                                {sort_header("Ημερομηνία", OrderSortKey::Date)}
                                {sort_header("Πελάτης", OrderSortKey::Customer)}
                                <TableHeaderCell>"EMAIL"</TableHeaderCell>
                                <TableHeaderCell>"ΤΗΛΕΦΩΝΟ"</TableHeaderCell>
                                {sort_header("ΚΑΤΑΣΤΑΣΗ", OrderSortKey::Status)}
                                <TableHeaderCell>"ΠΛΗΡΩΜΗ"</TableHeaderCell>
                                {sort_header("ΣΥΝΟΛΟ", OrderSortKey::Total)}
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|order| (order.record_id(), order.status)
                                children=move |order: Order| {
                                    let id = order.record_id();
                                    let id_text = id.clone();
                                    let customer = order.customer.clone();
                                    let email = order.email.clone();
                                    let contact = contact_tooltip(&order);
                                    let for_view = order.clone();
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                item_id=id
                                                selected=selected
                                                on_change=Callback::new(move |(id, checked): (String, bool)| {
                                                    state.update(|s| s.toggle_selected(&id, checked));
                                                })
                                            />
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="mono">{move || highlight_matches(&id_text, &search.get())}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{order.date.format("%Y-%m-%d").to_string()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span title=contact>
                                                        {move || highlight_matches(&customer, &search.get())}
                                                    </span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{move || highlight_matches(&email, &search.get())}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{order.phone.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <StatusBadge status=order.status />
                                            </TableCell>
                                            <TableCell>
                                                <Badge variant=BadgeVariant::for_payment(order.payment)>
                                                    {order.payment.label()}
                                                </Badge>
                                            </TableCell>
                                            <TableCell class="table__cell--money">
                                                <TableCellLayout>{amount(order.total)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <button
                                                    class="button button--primary button--small"
                                                    on:click=move |_| viewing.set(Some(for_view.clone()))
                                                >
                                                    {icon("eye")}
                                                    " Προβολή"
                                                </button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || visible.with(Vec::is_empty)>
                    <div class="empty-state">
                        <div class="empty-state__icon">{icon("orders")}</div>
                        <h3>"Δεν βρέθηκαν παραγγελίες"</h3>
                    </div>
                </Show>
            </Show>

            {move || viewing.get().map(|order| view! {
                <OrderDetails order=order on_close=Callback::new(move |_| viewing.set(None)) />
            })}

            <Show when=move || confirm_delete.get()>
                <ConfirmDialog
                    title="Διαγραφή".to_string()
                    text="Διαγραφή επιλεγμένων παραγγελιών;".to_string()
                    on_confirm=bulk_delete
                    on_cancel=Callback::new(move |_| confirm_delete.set(false))
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::gateway::{Outcome, RemoteError};
    use futures::executor::block_on;
    use std::cell::Cell;

    struct FakeOrders {
        reply: Outcome<Vec<Order>>,
        calls: Cell<usize>,
    }

    impl OrderGateway for FakeOrders {
        async fn list_orders(&self) -> Outcome<Vec<Order>> {
            self.calls.set(self.calls.get() + 1);
            self.reply.clone()
        }
    }

    #[test]
    fn test_remote_orders_are_used_as_is() {
        let gateway = FakeOrders {
            reply: Ok(Vec::new()),
            calls: Cell::new(0),
        };
        let loaded = block_on(load_orders(&gateway));
        assert!(!loaded.source.is_fallback());
        assert!(loaded.data.is_empty());
        assert_eq!(gateway.calls.get(), 1);
    }

    #[test]
    fn test_failure_falls_back_to_sample() {
        for err in [
            RemoteError::Unauthorized,
            RemoteError::Network("offline".into()),
            RemoteError::Server {
                status: 502,
                body: String::new(),
            },
        ] {
            let gateway = FakeOrders {
                reply: Err(err),
                calls: Cell::new(0),
            };
            let loaded = block_on(load_orders(&gateway));
            assert!(loaded.source.is_fallback());
            assert_eq!(loaded.data, sample_orders());
        }
    }

    #[test]
    fn test_amount_has_two_decimals() {
        assert_eq!(amount(75.0), "€75.00");
        assert_eq!(amount(60.5), "€60.50");
    }

    #[test]
    fn test_contact_tooltip_keeps_row_fields() {
        let order = sample_orders().remove(1);
        assert_eq!(contact_tooltip(&order), "Email: maria@example.com\nΤηλ: 6987654321");
        assert_eq!(order.phone, "6987654321");
    }
}
