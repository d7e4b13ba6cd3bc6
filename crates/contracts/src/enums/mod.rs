pub mod order_status;
pub mod payment_status;

pub use order_status::OrderStatus;
pub use payment_status::PaymentStatus;
