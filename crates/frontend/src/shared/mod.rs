pub mod api_utils;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod export;
pub mod form;
pub mod gateway;
pub mod icons;
pub mod image_selection;
pub mod list_utils;
pub mod modal;
pub mod settings;
