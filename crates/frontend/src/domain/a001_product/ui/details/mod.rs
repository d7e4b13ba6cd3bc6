pub mod add;
pub mod edit;
pub mod view;
pub mod view_model;

pub use add::AddProductPage;
pub use edit::EditProductPage;
