pub mod state;

use self::state::{
    create_state, default_state, has_active_filters, parse_sort_value, remove_product, sort_value,
    SORT_OPTIONS,
};
use crate::domain::a001_product::catalog::{display_label, load_catalog, Catalog};
use crate::layout::{use_modal, ModalMessage};
use crate::shared::config::config;
use crate::shared::date_utils::format_datetime;
use crate::shared::gateway::{HttpGateway, Outcome, ProductGateway, RemoteError};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, query, Identified, SearchInput};
use crate::shared::modal::{ConfirmDialog, Modal};
use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::common::Sourced;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use thaw::*;

pub const LOAD_FAILED: &str = "Αποτυχία φόρτωσης προϊόντων. Δοκιμάστε ξανά.";
pub const DELETE_FAILED: &str = "Αποτυχία διαγραφής προϊόντος. Παρακαλώ δοκιμάστε ξανά.";

/// Products plus the catalog for the filter selects
pub async fn load_list<G: ProductGateway>(gateway: &G, limit: u32) -> Outcome<(Vec<Product>, Sourced<Catalog>)> {
    let products = gateway.list_products(limit).await?;
    let catalog = load_catalog(gateway).await;
    Ok((products, catalog))
}

/// Delete on the backend; the error is already a modal message
pub async fn delete_one<G: ProductGateway>(gateway: &G, id: &str) -> Result<(), ModalMessage> {
    gateway.delete_product(id).await.map_err(|e| match e {
        RemoteError::Unauthorized => ModalMessage::from_error(&e),
        other => {
            log::error!("delete of product {} failed: {}", id, other);
            let text = match other.server_text() {
                Some(detail) => format!("{}\n{}", DELETE_FAILED, detail),
                None => DELETE_FAILED.to_string(),
            };
            ModalMessage::error("Σφάλμα", text)
        }
    })
}

fn price_label(price: f64) -> String {
    format!("€{}", price)
}

#[component]
fn ProductCard(
    product: Product,
    search: Signal<String>,
    on_view: Callback<Product>,
    on_delete: Callback<Product>,
) -> impl IntoView {
    let navigate = use_navigate();
    let edit_path = format!("/products/{}/edit", product.record_id());
    let name = product.name.clone();
    let description = product.description.clone();
    let for_view = product.clone();
    let for_delete = product.clone();

    view! {
        <div class="product-card card">
            <div class="product-card__image">
                {match product.first_image() {
                    Some(url) => view! { <img src=url.to_string() alt=name.clone() /> }.into_any(),
                    None => view! { <div class="product-card__placeholder">{icon("image")}</div> }.into_any(),
                }}
            </div>
            <div class="product-card__body">
                <h3 class="product-card__name">
                    {move || highlight_matches(&name, &search.get())}
                </h3>
                {description.map(|d| view! { <p class="product-card__description">{d}</p> })}
                <div class="product-card__badges">
                    {product.category.as_deref().map(|c| view! {
                        <span class="badge badge--info">{display_label(c)}</span>
                    })}
                    {product.sub_category.as_deref().map(|c| view! {
                        <span class="badge badge--neutral">{display_label(c)}</span>
                    })}
                </div>
                <div class="product-card__footer">
                    <span class="product-card__price">{price_label(product.price)}</span>
                    <div class="product-card__actions">
                        <button class="button button--icon" title="Προβολή" on:click=move |_| on_view.run(for_view.clone())>
                            {icon("eye")}
                        </button>
                        <button
                            class="button button--icon"
                            title="Επεξεργασία"
                            on:click=move |_| navigate(&edit_path, Default::default())
                        >
                            {icon("edit")}
                        </button>
                        <button
                            class="button button--icon button--danger"
                            title="Διαγραφή"
                            on:click=move |_| on_delete.run(for_delete.clone())
                        >
                            {icon("delete")}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ProductDetails(product: Product, on_close: Callback<()>) -> impl IntoView {
    let created = product.created_at.as_deref().map(format_datetime);
    view! {
        <Modal title=product.name.clone() on_close=on_close class="modal--product">
            {product.first_image().map(|url| view! {
                <img class="product-details__image" src=url.to_string() alt=product.name.clone() />
            })}
            <p class="product-details__price">{price_label(product.price)}</p>
            {product.description.clone().map(|d| view! {
                <div class="product-details__section">
                    <h5>"Περιγραφή"</h5>
                    <p>{d}</p>
                </div>
            })}
            <div class="product-details__row">
                {product.category.as_deref().map(|c| view! {
                    <div class="product-details__section">
                        <h5>"Κατηγορία"</h5>
                        <span class="badge badge--info">{display_label(c)}</span>
                    </div>
                })}
                {product.sub_category.as_deref().map(|c| view! {
                    <div class="product-details__section">
                        <h5>"Υποκατηγορία"</h5>
                        <span class="badge badge--neutral">{display_label(c)}</span>
                    </div>
                })}
            </div>
            {created.map(|c| view! {
                <div class="product-details__section">
                    <h5>"Δημιουργήθηκε"</h5>
                    <p>{c}</p>
                </div>
            })}
        </Modal>
    }
}

#[component]
pub fn ProductListPage() -> impl IntoView {
    let state = create_state();
    let products = RwSignal::new(Vec::<Product>::new());
    let catalog = RwSignal::new(Sourced::<Catalog>::default());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);
    let (show_filters, set_show_filters) = signal(false);
    let viewing = RwSignal::new(Option::<Product>::None);
    let to_delete = RwSignal::new(Option::<Product>::None);
    let modal = use_modal();

    // only the latest load may write the list
    let load_seq = StoredValue::new(0u64);

    let load = move || {
        let seq = load_seq.get_value() + 1;
        load_seq.set_value(seq);
        set_loading.set(true);
        spawn_local(async move {
            let result = load_list(&HttpGateway, config().api.list_limit).await;
            if load_seq.try_get_value() != Some(seq) {
                return;
            }
            set_loading.try_set(false);
            match result {
                Ok((list, cat)) => {
                    products.try_set(list);
                    catalog.try_set(cat);
                    set_error.try_set(None);
                }
                Err(e) => {
                    log::error!("Error fetching products: {}", e);
                    set_error.try_set(Some(LOAD_FAILED.to_string()));
                }
            }
        });
    };

    load();

    // refetch when the user comes back, e.g. from the edit page in another tab
    let focus_handle = window_event_listener(ev::focus, move |_| load());
    on_cleanup(move || focus_handle.remove());

    let visible = Signal::derive(move || products.with(|p| state.with(|s| query(p, s))));
    let search = Signal::derive(move || state.with(|s| s.search_term.clone()));

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(product) = to_delete.get_untracked() else {
            return;
        };
        let id = product.record_id();
        spawn_local(async move {
            match delete_one(&HttpGateway, &id).await {
                Ok(()) => {
                    products.try_update(|list| remove_product(list, &id));
                    to_delete.try_set(None);
                }
                Err(message) => modal.show(message),
            }
        });
    });

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Προϊόντα"</h1>
                    <span class="page__count">{move || format!("{} προϊόντα", visible.with(Vec::len))}</span>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {move || if loading.get() { "Φόρτωση..." } else { "Ανανέωση" }}
                    </Button>
                    <A href="/products/new" attr:class="button button--primary">
                        {icon("plus")}
                        " Προσθήκη Προϊόντος"
                    </A>
                </div>
            </div>

            <div class="filter-panel">
                <div class="filter-panel-header">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |term: String| state.update(|s| s.search_term = term))
                        placeholder="Αναζήτηση προϊόντων..."
                    />
                    <button
                        class="button button--secondary"
                        on:click=move |_| set_show_filters.update(|v| *v = !*v)
                    >
                        {icon("filter")}
                        " Φίλτρα"
                    </button>
                    <Show when=move || state.with(has_active_filters)>
                        <button
                            class="button button--link"
                            on:click=move |_| state.set(default_state())
                        >
                            "Καθαρισμός φίλτρων"
                        </button>
                    </Show>
                </div>

                <Show when=move || show_filters.get()>
                    <div class="filter-panel-content">
                        <select
                            class="form__select"
                            prop:value=move || state.with(|s| s.filters.category.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.filters.category = value);
                            }
                        >
                            <option value="">"Όλες οι Κατηγορίες"</option>
                            {move || catalog.with(|c| c.data.categories.clone()).into_iter().map(|cat| view! {
                                <option value=cat.clone()>{display_label(&cat)}</option>
                            }).collect_view()}
                        </select>

                        <select
                            class="form__select"
                            prop:value=move || state.with(|s| s.filters.subcategory.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.filters.subcategory = value);
                            }
                        >
                            <option value="">"Όλες οι Υποκατηγορίες"</option>
                            {move || catalog.with(|c| c.data.all_subcategories()).into_iter().map(|sub| view! {
                                <option value=sub.clone()>{display_label(&sub)}</option>
                            }).collect_view()}
                        </select>

                        <select
                            class="form__select"
                            prop:value=move || state.with(|s| sort_value(s.sort_key, s.sort_direction))
                            on:change=move |ev| {
                                if let Some((key, direction)) = parse_sort_value(&event_target_value(&ev)) {
                                    state.update(|s| s.set_sort(key, direction));
                                }
                            }
                        >
                            {SORT_OPTIONS.into_iter().map(|(key, direction, label)| view! {
                                <option value=sort_value(key, direction)>{label}</option>
                            }).collect_view()}
                        </select>
                    </div>
                </Show>
            </div>

            {move || error.get().map(|err| view! {
                <div class="alert alert--error">{err}</div>
            })}

            {move || {
                let list = visible.get();
                if list.is_empty() {
                    let text = if products.with(Vec::is_empty) {
                        "Δεν έχουν προστεθεί προϊόντα ακόμα."
                    } else {
                        "Δοκιμάστε να τροποποιήσετε την αναζήτηση ή τα φίλτρα σας."
                    };
                    view! {
                        <div class="empty-state">
                            <div class="empty-state__icon">{icon("products")}</div>
                            <h3>"Δεν βρέθηκαν προϊόντα"</h3>
                            <p>{text}</p>
                            <A href="/products/new" attr:class="button button--primary">
                                {icon("plus")}
                                " Προσθήκη Προϊόντος"
                            </A>
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <div class="product-grid">
                            {list.into_iter().map(|product| view! {
                                <ProductCard
                                    product=product
                                    search=search
                                    on_view=Callback::new(move |p| viewing.set(Some(p)))
                                    on_delete=Callback::new(move |p| to_delete.set(Some(p)))
                                />
                            }).collect_view()}
                        </div>
                    }.into_any()
                }
            }}

            {move || viewing.get().map(|product| view! {
                <ProductDetails product=product on_close=Callback::new(move |_| viewing.set(None)) />
            })}

            {move || to_delete.get().map(|product| view! {
                <ConfirmDialog
                    title="Διαγραφή Προϊόντος".to_string()
                    text=format!("Είστε σίγουροι ότι θέλετε να διαγράψετε το \"{}\";", product.name)
                    on_confirm=confirm_delete
                    on_cancel=Callback::new(move |_| to_delete.set(None))
                />
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::gateway::fake::{Call, FakeProductGateway};
    use futures::executor::block_on;

    #[test]
    fn test_load_list_uses_limit() {
        let gateway = FakeProductGateway::default();
        let (products, catalog) = block_on(load_list(&gateway, 1000)).unwrap();
        assert!(products.is_empty());
        assert!(!catalog.source.is_fallback());
        assert_eq!(gateway.calls()[0], Call::List(1000));
    }

    #[test]
    fn test_load_list_failure_skips_catalog() {
        let gateway = FakeProductGateway {
            products: Err(RemoteError::Network("offline".into())),
            ..Default::default()
        };
        assert!(block_on(load_list(&gateway, 10)).is_err());
        assert_eq!(gateway.calls().len(), 1);
    }

    #[test]
    fn test_delete_failure_message() {
        let gateway = FakeProductGateway {
            write_reply: Err(RemoteError::Server {
                status: 500,
                body: "db down".into(),
            }),
            ..Default::default()
        };
        let err = block_on(delete_one(&gateway, "4")).unwrap_err();
        assert_eq!(err.text, format!("{}\nServer error: 500\ndb down", DELETE_FAILED));
        assert_eq!(gateway.calls(), vec![Call::Delete("4".into())]);

        let gateway = FakeProductGateway {
            write_reply: Err(RemoteError::Network("offline".into())),
            ..Default::default()
        };
        let err = block_on(delete_one(&gateway, "4")).unwrap_err();
        assert_eq!(err.text, DELETE_FAILED);

        let gateway = FakeProductGateway {
            write_reply: Err(RemoteError::Unauthorized),
            ..Default::default()
        };
        let err = block_on(delete_one(&gateway, "4")).unwrap_err();
        assert_eq!(err.title, "Μη εξουσιοδοτημένο");
    }

    #[test]
    fn test_price_label() {
        assert_eq!(price_label(49.99), "€49.99");
        assert_eq!(price_label(20.0), "€20");
    }
}
