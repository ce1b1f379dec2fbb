//! Alo Client - restaurant dashboard client
//!
//! Typed access to the restaurant service plus the state flows behind the
//! dashboard: branch selection, booking board, customer type-ahead and floor
//! management.

pub mod api;
pub mod booking;
pub mod client;
pub mod config;
pub mod context;
pub mod customer;
pub mod error;
pub mod floor;
pub mod gate;
pub mod header;
pub mod preference;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};

// Transport
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;

// Services
pub use api::{BookingService, BranchService, CustomerService, FloorService, RestaurantApi};

// Flows
pub use booking::{BoardOptions, BoardView, BookingBoard, FetchOutcome};
pub use context::AppContext;
pub use customer::CustomerSearch;
pub use floor::{FloorManager, Notification, NotificationLevel};
pub use gate::{RequestGate, Ticket};
pub use header::{BranchOption, Header, MenuKey};
pub use preference::{PreferenceCache, STORE_BRANCH_ACTIVE_KEY};

// Re-export shared types for convenience
pub use shared::models::{
    Booking, BookingStatus, BookingStatusUpdate, Customer, CustomerOption, Floor, FloorForm,
    FloorPayload, StoreBranch,
};
pub use shared::query::{BookingQuery, CustomerQuery, SortDirection, SortField};
