//! Data models
//!
//! Shapes of the records exchanged with the restaurant service.
//! Field names follow the service's camelCase JSON.

pub mod booking;
pub mod customer;
pub mod floor;
pub mod store_branch;

// Re-exports
pub use booking::*;
pub use customer::*;
pub use floor::*;
pub use store_branch::*;
