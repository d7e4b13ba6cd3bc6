//! Common types shared by all backend records

pub mod aggregate_id;
pub mod source;

// Re-exports
pub use aggregate_id::{AggregateId, RecordId};
pub use source::{Source, Sourced};
