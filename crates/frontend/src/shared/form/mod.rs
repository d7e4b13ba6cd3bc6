//! Product form state: field rules and the event-driven form machine

pub mod field;
pub mod state;

pub use field::{parse_float_prefix, validate, validate_all, FieldKey, FormValues};
pub use state::{ConfirmOutcome, FormField, FormKind, FormState, SubmitGate, SubmitTicket, ValidationPolicy};
