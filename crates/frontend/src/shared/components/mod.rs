pub mod badge;
pub mod stat_card;
pub mod table;

pub use badge::{Badge, BadgeVariant};
pub use stat_card::StatCard;
