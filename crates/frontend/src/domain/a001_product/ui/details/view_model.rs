use crate::domain::a001_product::catalog::{load_catalog, Catalog};
use crate::layout::ModalMessage;
use crate::shared::form::{parse_float_prefix, FieldKey, FormKind, FormState, FormValues, SubmitGate};
use crate::shared::gateway::{Outcome, ProductGateway, RemoteError};
use crate::shared::image_selection::{ImageSelection, ObjectUrlPreviews};
use contracts::domain::a001_product::aggregate::{Product, ProductPayload, ProductUpdate};
use contracts::domain::common::Sourced;
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub const CREATED_TITLE: &str = "Επιτυχία";
pub const CREATED_TEXT: &str = "Το προϊόν δημιουργήθηκε με επιτυχία.";
pub const UPDATED_TITLE: &str = "Επιτυχία!";
pub const UPDATED_TEXT: &str = "Το προϊόν ενημερώθηκε επιτυχώς!";
pub const UPDATE_FAILED: &str = "Αποτυχία ενημέρωσης προϊόντος. Δοκιμάστε ξανά.";
pub const LOAD_FAILED: &str = "Αποτυχία φόρτωσης δεδομένων προϊόντος. Δοκιμάστε ξανά.";

/// Somewhere a [`FormState`] lives across an await. `None` once it is gone.
pub trait FormCell {
    fn with_form<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> Option<R>;
}

impl FormCell for RwSignal<FormState> {
    fn with_form<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl FormCell for Rc<RefCell<FormState>> {
    fn with_form<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    /// Validation failed, nothing was sent
    Rejected(FieldKey),
    /// Another submission is in flight
    Busy,
    /// The form was reset or left before the reply came
    Stale,
    /// The request settled; show this message
    Done(ModalMessage),
}

pub fn payload_from(values: &FormValues) -> ProductPayload {
    ProductPayload {
        name: values.name.trim().to_string(),
        price: parse_float_prefix(&values.price).unwrap_or(0.0),
        description: values.description.trim().to_string(),
        category: values.category.clone(),
        sub_category: values.subcategory.clone(),
    }
}

pub fn values_from(product: &Product) -> FormValues {
    FormValues {
        name: product.name.clone(),
        price: product.price.to_string(),
        description: product.description_str().to_string(),
        category: product.category_str().to_string(),
        subcategory: product.sub_category_str().to_string(),
        image_count: product.image_url.len(),
    }
}

fn update_failure(err: &RemoteError) -> ModalMessage {
    match err {
        RemoteError::Server { .. } => ModalMessage::error(
            "Σφάλμα",
            err.detail().unwrap_or_else(|| UPDATE_FAILED.to_string()),
        ),
        other => ModalMessage::from_error(other),
    }
}

/// Run one gated submission: validate, send, settle
async fn run_submit<C, Fut>(
    form: &C,
    send: impl FnOnce(FormValues) -> Fut,
    on_success: ModalMessage,
    on_failure: impl FnOnce(&RemoteError) -> ModalMessage,
) -> SubmitResult
where
    C: FormCell,
    Fut: std::future::Future<Output = Outcome<()>>,
{
    let Some(gate) = form.with_form(|f| f.begin_submit()) else {
        return SubmitResult::Stale;
    };
    let ticket = match gate {
        SubmitGate::Rejected(key) => return SubmitResult::Rejected(key),
        SubmitGate::Busy => return SubmitResult::Busy,
        SubmitGate::Proceed(ticket) => ticket,
    };
    let Some(values) = form.with_form(|f| f.values()) else {
        return SubmitResult::Stale;
    };

    let outcome = send(values).await;

    let live = form.with_form(|f| f.settle(ticket)).unwrap_or(false);
    if !live {
        log::debug!("dropping outcome of an abandoned submission");
        return SubmitResult::Stale;
    }
    match outcome {
        Ok(()) => SubmitResult::Done(on_success),
        Err(e) => SubmitResult::Done(on_failure(&e)),
    }
}

/// Create a product from the add form. A success resets the form.
pub async fn submit_create<G, C>(gateway: &G, form: &C, images: Vec<G::Upload>) -> SubmitResult
where
    G: ProductGateway,
    C: FormCell,
{
    let result = run_submit(
        form,
        move |values| async move { gateway.create_product(&payload_from(&values), images).await },
        ModalMessage::success(CREATED_TITLE, CREATED_TEXT),
        ModalMessage::from_error,
    )
    .await;
    if matches!(&result, SubmitResult::Done(m) if m.is_success()) {
        form.with_form(|f| f.reset());
    }
    result
}

/// Save the edit form. Existing image URLs are sent back unchanged.
pub async fn submit_update<G, C>(gateway: &G, form: &C, id: &str, image_url: Vec<String>) -> SubmitResult
where
    G: ProductGateway,
    C: FormCell,
{
    run_submit(
        form,
        move |values| async move {
            let update = ProductUpdate::from_payload(payload_from(&values), image_url);
            gateway.update_product(id, &update).await
        },
        ModalMessage::success(UPDATED_TITLE, UPDATED_TEXT),
        update_failure,
    )
    .await
}

/// Product plus the catalog its form needs
pub async fn load_for_edit<G: ProductGateway>(gateway: &G, id: &str) -> Outcome<(Product, Sourced<Catalog>)> {
    let product = gateway.fetch_product(id).await?;
    let catalog = load_catalog(gateway).await;
    Ok((product, catalog))
}

/// Name, size and preview URL of a picked image, for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTile {
    pub name: String,
    pub size: u64,
    pub url: String,
}

/// Page-level state shared by the add and edit screens
#[derive(Clone, Copy)]
pub struct ProductFormViewModel {
    pub form: RwSignal<FormState>,
    pub catalog: RwSignal<Sourced<Catalog>>,
    /// Images picked for upload (add form)
    pub images: StoredValue<ImageSelection<ObjectUrlPreviews>, LocalStorage>,
    pub tiles: RwSignal<Vec<PreviewTile>>,
    /// Already stored images (edit form)
    pub existing_images: RwSignal<Vec<String>>,
    pub loading: RwSignal<bool>,
}

impl ProductFormViewModel {
    pub fn new(kind: FormKind) -> Self {
        Self {
            form: RwSignal::new(FormState::new(kind)),
            catalog: RwSignal::new(Sourced::default()),
            images: StoredValue::new_local(ImageSelection::new(ObjectUrlPreviews)),
            tiles: RwSignal::new(Vec::new()),
            existing_images: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
        }
    }

    pub fn value(&self, key: FieldKey) -> String {
        self.form.with(|f| f.value(key).to_string())
    }

    pub fn error(&self, key: FieldKey) -> Option<String> {
        self.form.with(|f| f.error(key).map(str::to_string))
    }

    pub fn is_submitting(&self) -> bool {
        self.form.with(|f| f.is_submitting())
    }

    /// Subcategory options for the current category
    pub fn subcategory_options(&self) -> Vec<String> {
        let category = self.value(FieldKey::Category);
        self.catalog.with(|c| c.data.subcategories_for(&category))
    }

    pub fn add_images(&self, files: Vec<(web_sys::File, String, u64)>) {
        if files.is_empty() {
            return;
        }
        self.images.update_value(|sel| {
            sel.add_files(files);
        });
        self.sync_images();
    }

    pub fn remove_image(&self, index: usize) {
        self.images.update_value(|sel| {
            sel.remove_at(index);
        });
        self.sync_images();
    }

    pub fn clear_images(&self) {
        self.images.update_value(|sel| sel.clear());
        self.sync_images();
    }

    /// Mirror the selection into the tile list and the form's image count
    fn sync_images(&self) {
        let (tiles, count) = self
            .images
            .with_value(|sel| {
                let tiles = sel
                    .entries()
                    .iter()
                    .map(|e| PreviewTile {
                        name: e.name.clone(),
                        size: e.size,
                        url: e.preview_url.clone(),
                    })
                    .collect::<Vec<_>>();
                (tiles, sel.len())
            });
        self.tiles.set(tiles);
        self.form.update(|f| f.set_image_count(count));
    }

    pub fn upload_files(&self) -> Vec<web_sys::File> {
        self.images.with_value(|sel| sel.files())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::gateway::fake::{Call, FakeProductGateway};
    use futures::executor::block_on;

    fn filled_add_form() -> Rc<RefCell<FormState>> {
        let mut form = FormState::new(FormKind::Add);
        form.on_change(FieldKey::Name, "  Ακουστικά X ".into());
        form.on_change(FieldKey::Price, "49.99".into());
        form.on_change(FieldKey::Description, "Ασύρματα".into());
        form.on_change(FieldKey::Category, "ηλεκτρονικά".into());
        form.on_change(FieldKey::Subcategory, "ακουστικά".into());
        form.set_image_count(1);
        Rc::new(RefCell::new(form))
    }

    #[test]
    fn test_create_sends_one_multipart_post_and_resets() {
        let gateway = FakeProductGateway::default();
        let form = filled_add_form();

        let result = block_on(submit_create(&gateway, &form, vec!["a.png".to_string()]));

        assert_eq!(
            result,
            SubmitResult::Done(ModalMessage::success(CREATED_TITLE, CREATED_TEXT))
        );
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            Call::Create { payload, images } => {
                assert_eq!(payload.name, "Ακουστικά X");
                assert_eq!(payload.price, 49.99);
                assert_eq!(payload.sub_category, "ακουστικά");
                assert_eq!(images, &vec!["a.png".to_string()]);
            }
            other => panic!("unexpected call {:?}", other),
        }
        let form = form.borrow();
        assert_eq!(form.value(FieldKey::Name), "");
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_empty_price_blocks_request() {
        let gateway = FakeProductGateway::default();
        let form = filled_add_form();
        form.borrow_mut().on_change(FieldKey::Price, String::new());

        let result = block_on(submit_create(&gateway, &form, vec!["a.png".to_string()]));

        assert_eq!(result, SubmitResult::Rejected(FieldKey::Price));
        assert!(gateway.calls().is_empty());
        assert_eq!(
            form.borrow().error(FieldKey::Price),
            Some(crate::shared::form::field::PRICE_INVALID)
        );
    }

    #[test]
    fn test_create_failure_keeps_values() {
        let gateway = FakeProductGateway {
            write_reply: Err(RemoteError::Unauthorized),
            ..Default::default()
        };
        let form = filled_add_form();

        let result = block_on(submit_create(&gateway, &form, Vec::new()));

        let SubmitResult::Done(message) = result else {
            panic!("expected a message");
        };
        assert_eq!(message.title, "Μη εξουσιοδοτημένο");
        assert_eq!(form.borrow().value(FieldKey::Price), "49.99");
        assert!(!form.borrow().is_submitting());
    }

    #[test]
    fn test_abandoned_form_drops_outcome() {
        let form = filled_add_form();
        let handle = form.clone();
        let gateway = FakeProductGateway {
            during_write: Some(Box::new(move || handle.borrow_mut().abandon())),
            ..Default::default()
        };

        let result = block_on(submit_create(&gateway, &form, Vec::new()));

        assert_eq!(result, SubmitResult::Stale);
        // not reset by the late success
        assert_eq!(form.borrow().value(FieldKey::Name), "  Ακουστικά X ");
    }

    #[test]
    fn test_update_passes_images_through() {
        let gateway = FakeProductGateway::default();
        let mut state = FormState::new(FormKind::Edit);
        state.hydrate(&FormValues {
            name: "Ηχείο".into(),
            price: "20".into(),
            description: " Μικρό ".into(),
            category: "ηλεκτρονικά".into(),
            subcategory: "ηχεία".into(),
            image_count: 1,
        });
        let form = Rc::new(RefCell::new(state));

        let result = block_on(submit_update(&gateway, &form, "7", vec!["/img/1.png".into()]));

        assert_eq!(
            result,
            SubmitResult::Done(ModalMessage::success(UPDATED_TITLE, UPDATED_TEXT))
        );
        match &gateway.calls()[0] {
            Call::Update(id, update) => {
                assert_eq!(id, "7");
                assert_eq!(update.description, "Μικρό");
                assert_eq!(update.price, 20.0);
                assert_eq!(update.image_url, vec!["/img/1.png".to_string()]);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_update_server_error_uses_detail() {
        let gateway = FakeProductGateway {
            write_reply: Err(RemoteError::Server {
                status: 422,
                body: r#"{"detail":"price too low"}"#.into(),
            }),
            ..Default::default()
        };
        let mut state = FormState::new(FormKind::Edit);
        state.hydrate(&FormValues {
            name: "a".into(),
            price: "1".into(),
            description: "b".into(),
            category: "c".into(),
            subcategory: "d".into(),
            image_count: 0,
        });
        let form = Rc::new(RefCell::new(state));

        let result = block_on(submit_update(&gateway, &form, "1", Vec::new()));
        assert_eq!(result, SubmitResult::Done(ModalMessage::error("Σφάλμα", "price too low")));
    }

    #[test]
    fn test_load_for_edit_falls_back_on_catalog_failure() {
        let product: Product = serde_json::from_str(
            r#"{"id": 5, "name": "Ηχείο", "price": "12,5", "category": "ηλεκτρονικά", "image_url": null}"#,
        )
        .unwrap();
        let gateway = FakeProductGateway {
            product: Ok(product),
            categories: Err(RemoteError::Network("offline".into())),
            ..Default::default()
        };

        let (product, catalog) = block_on(load_for_edit(&gateway, "5")).unwrap();
        assert_eq!(product.price, 12.5);
        assert!(catalog.source.is_fallback());

        let values = values_from(&product);
        assert_eq!(values.price, "12.5");
        assert_eq!(values.subcategory, "");
        assert_eq!(values.image_count, 0);
    }
}
