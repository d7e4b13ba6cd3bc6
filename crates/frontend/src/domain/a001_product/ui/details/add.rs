use super::view::{FieldRefs, ImagePicker, ProductFormFields};
use super::view_model::{submit_create, ProductFormViewModel, SubmitResult};
use crate::domain::a001_product::catalog::load_catalog;
use crate::layout::use_modal;
use crate::shared::form::{FieldKey, FormKind};
use crate::shared::gateway::HttpGateway;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

#[component]
pub fn AddProductPage() -> impl IntoView {
    let vm = ProductFormViewModel::new(FormKind::Add);
    let refs = FieldRefs::new();
    let modal = use_modal();

    spawn_local(async move {
        let catalog = load_catalog(&HttpGateway).await;
        vm.catalog.try_set(catalog);
    });

    on_cleanup(move || {
        vm.form.try_update(|f| f.abandon());
        vm.images.try_update_value(|sel| sel.clear());
    });

    let on_submit = Callback::new(move |_: ()| {
        let files = vm.upload_files();
        spawn_local(async move {
            match submit_create(&HttpGateway, &vm.form, files).await {
                SubmitResult::Rejected(key) => refs.focus(key),
                SubmitResult::Done(message) => {
                    if message.is_success() {
                        vm.clear_images();
                        refs.focus(FieldKey::Name);
                    }
                    modal.show(message);
                }
                SubmitResult::Busy | SubmitResult::Stale => {}
            }
        });
    });

    view! {
        <div class="page page--narrow">
            <div class="page__header">
                <h1 class="page__title">"Προσθήκη Προϊόντος"</h1>
                <A href="/products" attr:class="button button--secondary">"Προβολή Προϊόντων"</A>
            </div>

            <Show when=move || vm.catalog.with(|c| c.source.is_fallback())>
                <div class="notice notice--warning">
                    "Δεν ήταν δυνατή η φόρτωση κατηγοριών. Εμφανίζονται ενδεικτικές κατηγορίες."
                </div>
            </Show>

            <form
                class="form card"
                on:submit=move |ev| {
                    ev.prevent_default();
                    on_submit.run(());
                }
            >
                <ProductFormFields vm=vm refs=refs on_submit=on_submit />
                <ImagePicker vm=vm refs=refs />

                <div class="form__actions">
                    <button
                        type="submit"
                        class="button button--primary"
                        disabled=move || vm.is_submitting()
                    >
                        {move || if vm.is_submitting() { "Αποθήκευση..." } else { "Αποθήκευση Προϊόντος" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
