use super::view::{ExistingImages, FieldRefs, ProductFormFields};
use super::view_model::{load_for_edit, submit_update, values_from, ProductFormViewModel, SubmitResult, LOAD_FAILED};
use crate::layout::{use_modal, ModalMessage};
use crate::shared::form::FormKind;
use crate::shared::gateway::{HttpGateway, RemoteError};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

#[component]
pub fn EditProductPage() -> impl IntoView {
    let vm = ProductFormViewModel::new(FormKind::Edit);
    let refs = FieldRefs::new();
    let modal = use_modal();
    let navigate = StoredValue::new_local(use_navigate());
    let params = use_params_map();
    let product_id = params.with_untracked(|p| p.get("id").unwrap_or_default());
    let product_id = StoredValue::new(product_id);

    vm.loading.set(true);
    spawn_local(async move {
        let id = product_id.get_value();
        let loaded = load_for_edit(&HttpGateway, &id).await;
        vm.loading.try_set(false);
        match loaded {
            Ok((product, catalog)) => {
                vm.catalog.try_set(catalog);
                vm.existing_images.try_set(product.image_url.clone());
                vm.form.try_update(|f| f.hydrate(&values_from(&product)));
            }
            Err(RemoteError::Unauthorized) => modal.show(ModalMessage::from_error(&RemoteError::Unauthorized)),
            Err(e) => {
                log::error!("could not load product {}: {}", id, e);
                modal.show(ModalMessage::error("Σφάλμα", LOAD_FAILED));
            }
        }
    });

    on_cleanup(move || {
        vm.form.try_update(|f| f.abandon());
    });

    let on_submit = Callback::new(move |_: ()| {
        let id = product_id.get_value();
        let image_url = vm.existing_images.get_untracked();
        spawn_local(async move {
            match submit_update(&HttpGateway, &vm.form, &id, image_url).await {
                SubmitResult::Rejected(key) => refs.focus(key),
                SubmitResult::Done(message) if message.is_success() => {
                    let back_to_list = Callback::new(move |_: ()| {
                        navigate.with_value(|nav| nav("/products", Default::default()));
                    });
                    modal.show_then(message, back_to_list);
                }
                SubmitResult::Done(message) => modal.show(message),
                SubmitResult::Busy | SubmitResult::Stale => {}
            }
        });
    });

    view! {
        <div class="page page--narrow">
            <div class="page__header">
                <h1 class="page__title">"Επεξεργασία Προϊόντος"</h1>
                <A href="/products" attr:class="button button--secondary">"Πίσω στη λίστα"</A>
            </div>

            <Show
                when=move || !vm.loading.get()
                fallback=|| view! { <div class="loading">"Φόρτωση..."</div> }
            >
                <form
                    class="form card"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        on_submit.run(());
                    }
                >
                    <ProductFormFields vm=vm refs=refs on_submit=on_submit />
                    <ExistingImages vm=vm />

                    <div class="form__actions">
                        <button
                            type="submit"
                            class="button button--primary"
                            disabled=move || vm.is_submitting()
                        >
                            {move || if vm.is_submitting() { "Αποθήκευση..." } else { "Αποθήκευση Αλλαγών" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
