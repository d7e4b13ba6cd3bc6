//! Scripted [`ProductGateway`] for unit tests

use super::{Outcome, ProductGateway, RemoteError};
use contracts::domain::a001_product::aggregate::{Product, ProductPayload, ProductUpdate};
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Categories,
    Subcategories,
    Fetch(String),
    List(u32),
    Create {
        payload: ProductPayload,
        images: Vec<String>,
    },
    Update(String, ProductUpdate),
    Delete(String),
}

/// Replies are fixed per operation; every call is recorded in order
pub struct FakeProductGateway {
    pub calls: RefCell<Vec<Call>>,
    pub categories: Outcome<Vec<String>>,
    pub subcategories: Outcome<Vec<String>>,
    pub product: Outcome<Product>,
    pub products: Outcome<Vec<Product>>,
    pub write_reply: Outcome<()>,
    /// Runs inside a create/update call, before it replies
    pub during_write: Option<Box<dyn Fn()>>,
}

impl Default for FakeProductGateway {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            categories: Ok(vec!["ηλεκτρονικά".into()]),
            subcategories: Ok(vec!["ακουστικά".into()]),
            product: Err(RemoteError::Server {
                status: 404,
                body: "not found".into(),
            }),
            products: Ok(Vec::new()),
            write_reply: Ok(()),
            during_write: None,
        }
    }
}

impl FakeProductGateway {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn write(&self) -> Outcome<()> {
        if let Some(hook) = &self.during_write {
            hook();
        }
        self.write_reply.clone()
    }
}

impl ProductGateway for FakeProductGateway {
    type Upload = String;

    async fn categories(&self) -> Outcome<Vec<String>> {
        self.record(Call::Categories);
        self.categories.clone()
    }

    async fn subcategories(&self) -> Outcome<Vec<String>> {
        self.record(Call::Subcategories);
        self.subcategories.clone()
    }

    async fn fetch_product(&self, id: &str) -> Outcome<Product> {
        self.record(Call::Fetch(id.to_string()));
        self.product.clone()
    }

    async fn list_products(&self, limit: u32) -> Outcome<Vec<Product>> {
        self.record(Call::List(limit));
        self.products.clone()
    }

    async fn create_product(&self, payload: &ProductPayload, images: Vec<String>) -> Outcome<()> {
        self.record(Call::Create {
            payload: payload.clone(),
            images,
        });
        self.write()
    }

    async fn update_product(&self, id: &str, update: &ProductUpdate) -> Outcome<()> {
        self.record(Call::Update(id.to_string(), update.clone()));
        self.write()
    }

    async fn delete_product(&self, id: &str) -> Outcome<()> {
        self.record(Call::Delete(id.to_string()));
        self.write_reply.clone()
    }
}
