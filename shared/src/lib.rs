//! Shared types for the Alo99 dashboard
//!
//! Wire models, response envelopes and query descriptors used by the
//! client crate and the console.

pub mod models;
pub mod query;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Booking, BookingStatus, BookingStatusUpdate, Customer, CustomerOption, Floor, FloorForm,
    FloorPayload, StoreBranch,
};
pub use query::{BookingQuery, CustomerQuery, LoadMore, SortDirection, SortField, sort_bookings};
pub use response::{ItemResponse, ListResponse};
