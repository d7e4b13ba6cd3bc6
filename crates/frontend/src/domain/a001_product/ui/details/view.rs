use super::view_model::ProductFormViewModel;
use crate::domain::a001_product::catalog::display_label;
use crate::shared::form::{ConfirmOutcome, FieldKey};
use crate::shared::icons::icon;
use crate::shared::image_selection::picked_files;
use leptos::ev::KeyboardEvent;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Element handles for moving focus between fields
#[derive(Clone, Copy)]
pub struct FieldRefs {
    pub name: NodeRef<html::Input>,
    pub price: NodeRef<html::Input>,
    pub description: NodeRef<html::Textarea>,
    pub category: NodeRef<html::Select>,
    pub subcategory: NodeRef<html::Select>,
    pub image: NodeRef<html::Input>,
}

impl FieldRefs {
    pub fn new() -> Self {
        Self {
            name: NodeRef::new(),
            price: NodeRef::new(),
            description: NodeRef::new(),
            category: NodeRef::new(),
            subcategory: NodeRef::new(),
            image: NodeRef::new(),
        }
    }

    pub fn focus(&self, key: FieldKey) {
        let result = match key {
            FieldKey::Name => self.name.get().map(|el| el.focus()),
            FieldKey::Price => self.price.get().map(|el| el.focus()),
            FieldKey::Description => self.description.get().map(|el| el.focus()),
            FieldKey::Category => self.category.get().map(|el| el.focus()),
            FieldKey::Subcategory => self.subcategory.get().map(|el| el.focus()),
            FieldKey::Image => self.image.get().map(|el| el.focus()),
        };
        if let Some(Err(e)) = result {
            log::debug!("focus {} failed: {:?}", key.as_str(), e);
        }
    }
}

impl Default for FieldRefs {
    fn default() -> Self {
        Self::new()
    }
}

/// Enter validates the field and moves on; Shift+Enter in the description is a newline
fn handle_enter(
    vm: ProductFormViewModel,
    refs: FieldRefs,
    on_submit: Callback<()>,
    key: FieldKey,
    ev: &KeyboardEvent,
) {
    if ev.key() != "Enter" {
        return;
    }
    let shift = ev.shift_key();
    if key == FieldKey::Description && shift {
        return;
    }
    ev.prevent_default();
    match vm.form.try_update(|f| f.on_confirm(key, shift)) {
        Some(ConfirmOutcome::Stay(next)) | Some(ConfirmOutcome::Focus(next)) => refs.focus(next),
        Some(ConfirmOutcome::Submit) => on_submit.run(()),
        _ => {}
    }
}

fn field_class(base: &'static str, has_error: bool) -> String {
    if has_error {
        format!("{} {}--error", base, base)
    } else {
        base.to_string()
    }
}

#[component]
fn FieldError(vm: ProductFormViewModel, key: FieldKey) -> impl IntoView {
    move || {
        vm.error(key)
            .map(|message| view! { <p class="form__error">{message}</p> })
    }
}

/// Text, price and catalog fields shared by the add and edit screens
#[component]
pub fn ProductFormFields(
    vm: ProductFormViewModel,
    refs: FieldRefs,
    on_submit: Callback<()>,
) -> impl IntoView {
    let change = move |key: FieldKey, value: String| vm.form.update(|f| f.on_change(key, value));
    let blur = move |key: FieldKey| vm.form.update(|f| f.on_blur(key));
    let focus = move |key: FieldKey| vm.form.update(|f| f.on_focus(key));

    view! {
        <div class="form__group">
            <label class="form__label">"Όνομα προϊόντος"</label>
            <input
                type="text"
                node_ref=refs.name
                class=move || field_class("form__input", vm.error(FieldKey::Name).is_some())
                placeholder="π.χ. Ασύρματα Ακουστικά"
                prop:value=move || vm.value(FieldKey::Name)
                on:input=move |ev| change(FieldKey::Name, event_target_value(&ev))
                on:focus=move |_| focus(FieldKey::Name)
                on:blur=move |_| blur(FieldKey::Name)
                on:keydown=move |ev| handle_enter(vm, refs, on_submit, FieldKey::Name, &ev)
            />
            <FieldError vm=vm key=FieldKey::Name />
        </div>

        <div class="form__group">
            <label class="form__label">"Τιμή (€)"</label>
            <input
                type="text"
                inputmode="decimal"
                node_ref=refs.price
                class=move || field_class("form__input", vm.error(FieldKey::Price).is_some())
                placeholder="π.χ. 49.99"
                prop:value=move || vm.value(FieldKey::Price)
                on:input=move |ev| change(FieldKey::Price, event_target_value(&ev))
                on:focus=move |_| focus(FieldKey::Price)
                on:blur=move |_| blur(FieldKey::Price)
                on:keydown=move |ev| handle_enter(vm, refs, on_submit, FieldKey::Price, &ev)
            />
            <FieldError vm=vm key=FieldKey::Price />
        </div>

        <div class="form__group">
            <label class="form__label">"Περιγραφή"</label>
            <textarea
                node_ref=refs.description
                rows="4"
                class=move || field_class("form__textarea", vm.error(FieldKey::Description).is_some())
                placeholder="Μια σύντομη περιγραφή του προϊόντος"
                prop:value=move || vm.value(FieldKey::Description)
                on:input=move |ev| change(FieldKey::Description, event_target_value(&ev))
                on:focus=move |_| focus(FieldKey::Description)
                on:blur=move |_| blur(FieldKey::Description)
                on:keydown=move |ev| handle_enter(vm, refs, on_submit, FieldKey::Description, &ev)
            ></textarea>
            <FieldError vm=vm key=FieldKey::Description />
        </div>

        <div class="form__row">
            <div class="form__group">
                <label class="form__label">"Κατηγορία"</label>
                <select
                    node_ref=refs.category
                    class=move || field_class("form__select", vm.error(FieldKey::Category).is_some())
                    prop:value=move || vm.value(FieldKey::Category)
                    on:change=move |ev| change(FieldKey::Category, event_target_value(&ev))
                    on:focus=move |_| focus(FieldKey::Category)
                    on:blur=move |_| blur(FieldKey::Category)
                    on:keydown=move |ev| handle_enter(vm, refs, on_submit, FieldKey::Category, &ev)
                >
                    <option value="">"-- Επιλέξτε --"</option>
                    {move || {
                        let selected = vm.value(FieldKey::Category);
                        vm.catalog.with(|c| c.data.categories.clone()).into_iter().map(|cat| {
                            let is_selected = cat == selected;
                            view! {
                                <option value=cat.clone() selected=is_selected>{display_label(&cat)}</option>
                            }
                        }).collect_view()
                    }}
                </select>
                <FieldError vm=vm key=FieldKey::Category />
            </div>

            <div class="form__group">
                <label class="form__label">"Υποκατηγορία"</label>
                <select
                    node_ref=refs.subcategory
                    class=move || field_class("form__select", vm.error(FieldKey::Subcategory).is_some())
                    prop:value=move || vm.value(FieldKey::Subcategory)
                    on:change=move |ev| change(FieldKey::Subcategory, event_target_value(&ev))
                    on:focus=move |_| focus(FieldKey::Subcategory)
                    on:blur=move |_| blur(FieldKey::Subcategory)
                    on:keydown=move |ev| handle_enter(vm, refs, on_submit, FieldKey::Subcategory, &ev)
                >
                    <option value="">"-- Επιλέξτε --"</option>
                    {move || {
                        let selected = vm.value(FieldKey::Subcategory);
                        vm.subcategory_options().into_iter().map(|sub| {
                            let is_selected = sub == selected;
                            view! {
                                <option value=sub.clone() selected=is_selected>{display_label(&sub)}</option>
                            }
                        }).collect_view()
                    }}
                </select>
                <FieldError vm=vm key=FieldKey::Subcategory />
            </div>
        </div>
    }
}

/// Multi-file picker with a preview grid
#[component]
pub fn ImagePicker(vm: ProductFormViewModel, refs: FieldRefs) -> impl IntoView {
    let on_pick = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        vm.add_images(picked_files(&input));
        // lets the same file be picked again after removal
        input.set_value("");
    };

    view! {
        <div class="form__group">
            <label class="form__label">"Εικόνες"</label>
            <input
                type="file"
                accept="image/*"
                multiple=true
                node_ref=refs.image
                class="form__file"
                on:change=on_pick
            />
            <FieldError vm=vm key=FieldKey::Image />

            <Show when=move || !vm.tiles.with(Vec::is_empty)>
                <div class="image-grid">
                    {move || vm.tiles.get().into_iter().enumerate().map(|(index, tile)| {
                        view! {
                            <div class="image-grid__item">
                                <img src=tile.url alt=tile.name.clone() class="image-grid__img" />
                                <span class="image-grid__name">{tile.name}</span>
                                <button
                                    type="button"
                                    class="button button--icon image-grid__remove"
                                    title="Αφαίρεση"
                                    on:click=move |_| vm.remove_image(index)
                                >
                                    {icon("x")}
                                </button>
                            </div>
                        }
                    }).collect_view()}
                </div>
                <button type="button" class="button button--secondary" on:click=move |_| vm.clear_images()>
                    "Καθαρισμός εικόνων"
                </button>
            </Show>
        </div>
    }
}

/// Images already stored for the product
#[component]
pub fn ExistingImages(vm: ProductFormViewModel) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">"Τρέχουσες εικόνες"</label>
            {move || {
                let urls = vm.existing_images.get();
                if urls.is_empty() {
                    view! { <p class="form__hint">"Δεν υπάρχουν εικόνες."</p> }.into_any()
                } else {
                    view! {
                        <div class="image-grid">
                            {urls.into_iter().map(|url| view! {
                                <div class="image-grid__item">
                                    <img src=url class="image-grid__img" alt="" />
                                </div>
                            }).collect_view()}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
