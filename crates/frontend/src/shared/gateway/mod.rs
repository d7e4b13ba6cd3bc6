//! Remote sync gateway: the only code that talks to the backend
//!
//! Pages depend on the traits below; [`http::HttpGateway`] is the browser
//! implementation. No call is retried automatically.

#[cfg(test)]
pub mod fake;
pub mod http;
pub mod outcome;

pub use http::HttpGateway;
pub use outcome::{Outcome, RemoteError};

use contracts::domain::a001_product::aggregate::{Product, ProductPayload, ProductUpdate};
use contracts::domain::a002_order::aggregate::Order;
use contracts::system::auth::LoginRequest;

#[allow(async_fn_in_trait)]
pub trait ProductGateway {
    /// File handle sent as an `images` part
    type Upload: Clone;

    async fn categories(&self) -> Outcome<Vec<String>>;
    async fn subcategories(&self) -> Outcome<Vec<String>>;
    async fn fetch_product(&self, id: &str) -> Outcome<Product>;
    async fn list_products(&self, limit: u32) -> Outcome<Vec<Product>>;
    /// Multipart create: JSON `payload` plus one part per image
    async fn create_product(&self, payload: &ProductPayload, images: Vec<Self::Upload>) -> Outcome<()>;
    async fn update_product(&self, id: &str, update: &ProductUpdate) -> Outcome<()>;
    async fn delete_product(&self, id: &str) -> Outcome<()>;
}

#[allow(async_fn_in_trait)]
pub trait AuthGateway {
    /// On success the backend sets the session cookie
    async fn login(&self, request: &LoginRequest) -> Outcome<()>;
}

#[allow(async_fn_in_trait)]
pub trait OrderGateway {
    async fn list_orders(&self) -> Outcome<Vec<Order>>;
}
