pub mod api_error;
pub mod serde_helpers;
