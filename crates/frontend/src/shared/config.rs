use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
}

/// Backend endpoints. Paths are appended to `base_url` as-is.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub categories_path: String,
    pub subcategories_path: String,
    pub admin_products_path: String,
    pub products_path: String,
    pub login_path: String,
    pub orders_path: String,
    pub list_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            categories_path: "/categories".to_string(),
            subcategories_path: "/subcategories".to_string(),
            admin_products_path: "/admin/products/".to_string(),
            products_path: "/products".to_string(),
            login_path: "/admin/login".to_string(),
            orders_path: "/admin/orders".to_string(),
            list_limit: 1000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid embedded config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:8000"
categories_path = "/categories"
subcategories_path = "/subcategories"
admin_products_path = "/admin/products/"
products_path = "/products"
login_path = "/admin/login"
orders_path = "/admin/orders"
list_limit = 1000
"#;

impl AppConfig {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply build-time overrides. `None` and blank values keep the configured value.
    pub fn with_overrides(mut self, overrides: &[(&str, Option<&str>)]) -> Self {
        for (key, value) in overrides {
            let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
                continue;
            };
            let api = &mut self.api;
            match *key {
                "ADMIN_API_URL" => api.base_url = value.trim_end_matches('/').to_string(),
                "ADMIN_CATEGORIES_PATH" => api.categories_path = value.to_string(),
                "ADMIN_SUBCATEGORIES_PATH" => api.subcategories_path = value.to_string(),
                "ADMIN_PRODUCTS_PATH" => api.admin_products_path = value.to_string(),
                "ADMIN_PUBLIC_PRODUCTS_PATH" => api.products_path = value.to_string(),
                "ADMIN_LOGIN_PATH" => api.login_path = value.to_string(),
                "ADMIN_ORDERS_PATH" => api.orders_path = value.to_string(),
                other => log::warn!("Unknown config override: {}", other),
            }
        }
        self
    }
}

fn build_time_overrides() -> [(&'static str, Option<&'static str>); 7] {
    [
        ("ADMIN_API_URL", option_env!("ADMIN_API_URL")),
        ("ADMIN_CATEGORIES_PATH", option_env!("ADMIN_CATEGORIES_PATH")),
        ("ADMIN_SUBCATEGORIES_PATH", option_env!("ADMIN_SUBCATEGORIES_PATH")),
        ("ADMIN_PRODUCTS_PATH", option_env!("ADMIN_PRODUCTS_PATH")),
        ("ADMIN_PUBLIC_PRODUCTS_PATH", option_env!("ADMIN_PUBLIC_PRODUCTS_PATH")),
        ("ADMIN_LOGIN_PATH", option_env!("ADMIN_LOGIN_PATH")),
        ("ADMIN_ORDERS_PATH", option_env!("ADMIN_ORDERS_PATH")),
    ]
}

fn load_config() -> AppConfig {
    let config = match AppConfig::from_toml(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            AppConfig {
                api: ApiConfig::default(),
            }
        }
    };
    config.with_overrides(&build_time_overrides())
}

pub static CONFIG: Lazy<AppConfig> = Lazy::new(load_config);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
