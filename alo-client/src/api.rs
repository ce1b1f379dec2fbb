//! Restaurant service API
//!
//! One trait per concern so the dashboard flows can be driven by the real
//! HTTP service or by an in-memory stand-in. `RestaurantApi` implements all
//! of them over any `HttpClient`.

use async_trait::async_trait;
use shared::models::{
    Booking, BookingStatusUpdate, Customer, Floor, FloorPayload, StoreBranch,
};
use shared::query::{BookingQuery, CustomerQuery};
use shared::response::{ItemResponse, ListResponse};
use std::sync::Arc;

use crate::ClientResult;
use crate::client::HttpClient;

/// Endpoint paths, relative to the base URL
pub mod routes {
    pub const STORE_BRANCHES: &str = "api/restaurants";
    pub const BOOKINGS: &str = "api/restaurant-bookings";
    pub const BOOKING_STATUS: &str = "api/restaurant-bookings/status";
    pub const CUSTOMERS: &str = "api/customers";
    pub const FLOORS: &str = "api/restaurant-floors";

    pub fn booking(id: &str) -> String {
        format!("{}/{}", BOOKINGS, id)
    }

    pub fn floor(id: i64) -> String {
        format!("{}/{}", FLOORS, id)
    }
}

#[async_trait]
pub trait BranchService: Send + Sync {
    async fn list_store_branches(&self) -> ClientResult<Vec<StoreBranch>>;
}

#[async_trait]
pub trait BookingService: Send + Sync {
    async fn list_bookings(&self, query: &BookingQuery) -> ClientResult<Vec<Booking>>;
    async fn get_booking(&self, id: &str) -> ClientResult<Option<Booking>>;
    async fn update_booking_status(&self, update: &BookingStatusUpdate) -> ClientResult<()>;
}

#[async_trait]
pub trait CustomerService: Send + Sync {
    async fn search_customers(&self, query: &CustomerQuery) -> ClientResult<Vec<Customer>>;
}

#[async_trait]
pub trait FloorService: Send + Sync {
    async fn list_floors(&self, restaurant_id: i64) -> ClientResult<Vec<Floor>>;
    /// `None` when the service accepted the call but returned no record
    async fn create_floor(&self, payload: &FloorPayload) -> ClientResult<Option<Floor>>;
    async fn update_floor(&self, id: i64, payload: &FloorPayload) -> ClientResult<Option<Floor>>;
    async fn delete_floor(&self, id: i64) -> ClientResult<()>;
}

/// Typed wrapper around the restaurant service endpoints
#[derive(Debug, Clone)]
pub struct RestaurantApi<H> {
    http: H,
}

impl<H: HttpClient> RestaurantApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }
}

#[async_trait]
impl<H: HttpClient> BranchService for RestaurantApi<H> {
    async fn list_store_branches(&self) -> ClientResult<Vec<StoreBranch>> {
        let list: ListResponse<StoreBranch> = self.http.get(routes::STORE_BRANCHES).await?;
        Ok(list.into_items())
    }
}

#[async_trait]
impl<H: HttpClient> BookingService for RestaurantApi<H> {
    async fn list_bookings(&self, query: &BookingQuery) -> ClientResult<Vec<Booking>> {
        let pairs = query.to_query_pairs();
        let list: ListResponse<Booking> =
            self.http.get_with_query(routes::BOOKINGS, &pairs).await?;
        Ok(list.into_items())
    }

    async fn get_booking(&self, id: &str) -> ClientResult<Option<Booking>> {
        let item: ItemResponse<Booking> = self.http.get(&routes::booking(id)).await?;
        Ok(item.into_data())
    }

    async fn update_booking_status(&self, update: &BookingStatusUpdate) -> ClientResult<()> {
        self.http.put_status(routes::BOOKING_STATUS, update).await
    }
}

#[async_trait]
impl<H: HttpClient> CustomerService for RestaurantApi<H> {
    async fn search_customers(&self, query: &CustomerQuery) -> ClientResult<Vec<Customer>> {
        let pairs = query.to_query_pairs();
        let list: ListResponse<Customer> =
            self.http.get_with_query(routes::CUSTOMERS, &pairs).await?;
        Ok(list.into_items())
    }
}

#[async_trait]
impl<H: HttpClient> FloorService for RestaurantApi<H> {
    async fn list_floors(&self, restaurant_id: i64) -> ClientResult<Vec<Floor>> {
        let pairs = [("RestaurantId", restaurant_id.to_string())];
        let list: ListResponse<Floor> = self.http.get_with_query(routes::FLOORS, &pairs).await?;
        Ok(list.into_items())
    }

    async fn create_floor(&self, payload: &FloorPayload) -> ClientResult<Option<Floor>> {
        let item: ItemResponse<Floor> = self.http.post(routes::FLOORS, payload).await?;
        Ok(item.into_data())
    }

    async fn update_floor(&self, id: i64, payload: &FloorPayload) -> ClientResult<Option<Floor>> {
        let item: ItemResponse<Floor> = self.http.put(&routes::floor(id), payload).await?;
        Ok(item.into_data())
    }

    async fn delete_floor(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&routes::floor(id)).await
    }
}

// Shared handles are services too, so one `Arc<RestaurantApi<_>>` can feed every flow.

#[async_trait]
impl<S: BranchService + ?Sized> BranchService for Arc<S> {
    async fn list_store_branches(&self) -> ClientResult<Vec<StoreBranch>> {
        (**self).list_store_branches().await
    }
}

#[async_trait]
impl<S: BookingService + ?Sized> BookingService for Arc<S> {
    async fn list_bookings(&self, query: &BookingQuery) -> ClientResult<Vec<Booking>> {
        (**self).list_bookings(query).await
    }

    async fn get_booking(&self, id: &str) -> ClientResult<Option<Booking>> {
        (**self).get_booking(id).await
    }

    async fn update_booking_status(&self, update: &BookingStatusUpdate) -> ClientResult<()> {
        (**self).update_booking_status(update).await
    }
}

#[async_trait]
impl<S: CustomerService + ?Sized> CustomerService for Arc<S> {
    async fn search_customers(&self, query: &CustomerQuery) -> ClientResult<Vec<Customer>> {
        (**self).search_customers(query).await
    }
}

#[async_trait]
impl<S: FloorService + ?Sized> FloorService for Arc<S> {
    async fn list_floors(&self, restaurant_id: i64) -> ClientResult<Vec<Floor>> {
        (**self).list_floors(restaurant_id).await
    }

    async fn create_floor(&self, payload: &FloorPayload) -> ClientResult<Option<Floor>> {
        (**self).create_floor(payload).await
    }

    async fn update_floor(&self, id: i64, payload: &FloorPayload) -> ClientResult<Option<Floor>> {
        (**self).update_floor(id, payload).await
    }

    async fn delete_floor(&self, id: i64) -> ClientResult<()> {
        (**self).delete_floor(id).await
    }
}
