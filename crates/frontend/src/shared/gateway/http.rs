use super::outcome::{classify, decode, Outcome, RemoteError};
use super::{AuthGateway, OrderGateway, ProductGateway};
use crate::shared::api_utils::{
    admin_product_url, api_url, product_url, products_list_url, with_query, CacheBust, ListQuery,
};
use crate::shared::config::config;
use contracts::domain::a001_product::aggregate::{Product, ProductPayload, ProductUpdate};
use contracts::domain::a002_order::aggregate::Order;
use contracts::system::auth::LoginRequest;
use gloo_net::http::{Request, RequestBuilder};
use web_sys::{FormData, RequestCredentials};

/// Browser gateway over `fetch`. Every request carries the session cookie.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpGateway;

fn now_millis() -> i64 {
    js_sys::Date::now() as i64
}

fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder.credentials(RequestCredentials::Include)
}

fn no_cache(builder: RequestBuilder) -> RequestBuilder {
    builder
        .header("Cache-Control", "no-cache, no-store, must-revalidate")
        .header("Pragma", "no-cache")
}

/// Perform the request. Only transport failures are errors here.
async fn exchange(label: &str, request: Result<Request, gloo_net::Error>) -> Outcome<(u16, String)> {
    let request = request.map_err(|e| {
        log::error!("{}: failed to build request: {}", label, e);
        RemoteError::Network(e.to_string())
    })?;
    log::debug!("{} -> {}", label, request.url());

    let response = request.send().await.map_err(|e| {
        log::error!("{}: network error: {}", label, e);
        RemoteError::Network(e.to_string())
    })?;
    let status = response.status();
    let body = read_body(label, response.text().await)?;
    Ok((status, body))
}

/// An unreadable body fails the call whatever the status was
fn read_body(label: &str, body: Result<String, gloo_net::Error>) -> Outcome<String> {
    body.map_err(|e| {
        log::error!("{}: could not read response body: {}", label, e);
        RemoteError::Network(e.to_string())
    })
}

/// Send and classify. Returns the status with the body so callers can decode.
async fn send(label: &str, request: Result<Request, gloo_net::Error>) -> Outcome<(u16, String)> {
    let (status, body) = exchange(label, request).await?;
    match classify(status, body) {
        Ok(body) => Ok((status, body)),
        Err(err) => {
            match &err {
                RemoteError::Unauthorized => log::warn!("{}: unauthorized", label),
                other => log::error!("{}: {}", label, other),
            }
            Err(err)
        }
    }
}

async fn get_json<T: serde::de::DeserializeOwned>(label: &str, url: &str, fresh: bool) -> Outcome<T> {
    let mut builder = with_credentials(Request::get(url));
    if fresh {
        builder = no_cache(builder);
    }
    let (status, body) = send(label, builder.build()).await?;
    decode(status, &body)
}

impl ProductGateway for HttpGateway {
    type Upload = web_sys::File;

    async fn categories(&self) -> Outcome<Vec<String>> {
        let url = with_query(&api_url(&config().api.categories_path), &CacheBust { stamp: now_millis() });
        get_json("categories", &url, true).await
    }

    async fn subcategories(&self) -> Outcome<Vec<String>> {
        let url = with_query(&api_url(&config().api.subcategories_path), &CacheBust { stamp: now_millis() });
        get_json("subcategories", &url, true).await
    }

    async fn fetch_product(&self, id: &str) -> Outcome<Product> {
        let url = with_query(&product_url(id), &CacheBust { stamp: now_millis() });
        get_json("fetch_product", &url, true).await
    }

    async fn list_products(&self, limit: u32) -> Outcome<Vec<Product>> {
        let url = with_query(&products_list_url(), &ListQuery { limit, t: now_millis() });
        get_json("list_products", &url, true).await
    }

    async fn create_product(&self, payload: &ProductPayload, images: Vec<web_sys::File>) -> Outcome<()> {
        let json = serde_json::to_string(payload).map_err(|e| RemoteError::Network(e.to_string()))?;
        let form = FormData::new().map_err(|e| RemoteError::Network(format!("{:?}", e)))?;
        form.append_with_str("payload", &json)
            .map_err(|e| RemoteError::Network(format!("{:?}", e)))?;
        for file in &images {
            form.append_with_blob_and_filename("images", file, &file.name())
                .map_err(|e| RemoteError::Network(format!("{:?}", e)))?;
        }

        let url = api_url(&config().api.admin_products_path);
        let request = with_credentials(Request::post(&url)).body(form);
        send("create_product", request).await.map(|_| ())
    }

    async fn update_product(&self, id: &str, update: &ProductUpdate) -> Outcome<()> {
        let request = with_credentials(Request::put(&admin_product_url(id))).json(update);
        send("update_product", request).await.map(|_| ())
    }

    async fn delete_product(&self, id: &str) -> Outcome<()> {
        let request = with_credentials(Request::delete(&admin_product_url(id))).build();
        send("delete_product", request).await.map(|_| ())
    }
}

impl AuthGateway for HttpGateway {
    async fn login(&self, request: &LoginRequest) -> Outcome<()> {
        let url = api_url(&config().api.login_path);
        let req = with_credentials(Request::post(&url)).json(request);
        // A rejected login is reported with its body so the `detail` text survives
        let (status, body) = exchange("login", req).await?;
        if (200..300).contains(&status) {
            Ok(())
        } else {
            log::warn!("login: rejected with status {}", status);
            Err(RemoteError::Server { status, body })
        }
    }
}

impl OrderGateway for HttpGateway {
    async fn list_orders(&self) -> Outcome<Vec<Order>> {
        let url = api_url(&config().api.orders_path);
        get_json("list_orders", &url, true).await
    }
}
