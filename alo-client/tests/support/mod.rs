// alo-client/tests/support/mod.rs
// In-memory restaurant service shared by the integration tests

#![allow(dead_code)]

use alo_client::{
    BookingService, BranchService, ClientError, ClientResult, CustomerService, FloorService,
};
use async_trait::async_trait;
use shared::models::{
    Booking, BookingStatus, BookingStatusUpdate, Customer, Floor, FloorPayload, StoreBranch,
};
use shared::query::{BookingQuery, CustomerQuery};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

pub fn booking(id: &str, status: BookingStatus, modified: &str) -> Booking {
    let mut booking = Booking::new(id, status);
    booking.booking_date = Some(format!("{}T19:00:00", &modified[..10]));
    booking.modified_date = Some(modified.to_string());
    booking
}

pub fn floor(id: i64, name: &str, restaurant_id: i64) -> Floor {
    Floor {
        id,
        name: name.to_string(),
        floor_number: id as i32,
        capacity: 40,
        layout_url: None,
        restaurant_id: Some(restaurant_id),
        extension_data: None,
    }
}

#[derive(Default)]
pub struct FakeRestaurant {
    pub branches: Mutex<Vec<StoreBranch>>,
    /// (restaurant id, booking)
    pub bookings: Mutex<Vec<(i64, Booking)>>,
    pub customers: Mutex<Vec<Customer>>,
    pub floors: Mutex<Vec<Floor>>,

    pub list_calls: Mutex<Vec<BookingQuery>>,
    pub detail_calls: Mutex<Vec<String>>,
    pub status_updates: Mutex<Vec<BookingStatusUpdate>>,
    pub customer_calls: Mutex<Vec<CustomerQuery>>,
    pub floor_list_calls: Mutex<Vec<i64>>,
    pub floor_payloads: Mutex<Vec<(Option<i64>, FloorPayload)>>,

    /// Delay applied to successive list calls of either kind (front first)
    pub list_delays: Mutex<VecDeque<Duration>>,
    pub fail_lists: Mutex<bool>,
    pub fail_writes: Mutex<bool>,
}

impl FakeRestaurant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bookings(restaurant_id: i64, bookings: Vec<Booking>) -> Self {
        let fake = Self::new();
        *fake.bookings.lock().unwrap() =
            bookings.into_iter().map(|b| (restaurant_id, b)).collect();
        fake
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }

    pub fn detail_count(&self) -> usize {
        self.detail_calls.lock().unwrap().len()
    }

    pub fn last_query(&self) -> Option<BookingQuery> {
        self.list_calls.lock().unwrap().last().cloned()
    }

    pub fn push_list_delay(&self, delay: Duration) {
        self.list_delays.lock().unwrap().push_back(delay);
    }

    pub fn set_fail_lists(&self, fail: bool) {
        *self.fail_lists.lock().unwrap() = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    fn write_guard(&self) -> ClientResult<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(ClientError::Internal("write rejected".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl BranchService for FakeRestaurant {
    async fn list_store_branches(&self) -> ClientResult<Vec<StoreBranch>> {
        Ok(self.branches.lock().unwrap().clone())
    }
}

#[async_trait]
impl BookingService for FakeRestaurant {
    async fn list_bookings(&self, query: &BookingQuery) -> ClientResult<Vec<Booking>> {
        self.list_calls.lock().unwrap().push(query.clone());
        let delay = self.list_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_lists.lock().unwrap() {
            return Err(ClientError::Internal("list unavailable".into()));
        }

        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|(rid, b)| query.matches(*rid, b))
            .map(|(_, b)| b.clone())
            .take(query.total_rows as usize)
            .collect())
    }

    async fn get_booking(&self, id: &str) -> ClientResult<Option<Booking>> {
        self.detail_calls.lock().unwrap().push(id.to_string());
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|(_, b)| b.id == id)
            .map(|(_, b)| b.clone()))
    }

    async fn update_booking_status(&self, update: &BookingStatusUpdate) -> ClientResult<()> {
        self.write_guard()?;
        self.status_updates.lock().unwrap().push(update.clone());
        for (_, booking) in self.bookings.lock().unwrap().iter_mut() {
            if update.booking_ids.contains(&booking.id) {
                booking.booking_status_id = update.booking_status;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerService for FakeRestaurant {
    async fn search_customers(&self, query: &CustomerQuery) -> ClientResult<Vec<Customer>> {
        self.customer_calls.lock().unwrap().push(query.clone());
        let needle = query.search_text.to_lowercase();
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FloorService for FakeRestaurant {
    async fn list_floors(&self, restaurant_id: i64) -> ClientResult<Vec<Floor>> {
        self.floor_list_calls.lock().unwrap().push(restaurant_id);
        let delay = self.list_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_lists.lock().unwrap() {
            return Err(ClientError::Internal("list unavailable".into()));
        }
        Ok(self
            .floors
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.restaurant_id == Some(restaurant_id))
            .cloned()
            .collect())
    }

    async fn create_floor(&self, payload: &FloorPayload) -> ClientResult<Option<Floor>> {
        self.write_guard()?;
        self.floor_payloads.lock().unwrap().push((None, payload.clone()));
        let mut floors = self.floors.lock().unwrap();
        let id = floors.iter().map(|f| f.id).max().unwrap_or(0) + 1;
        let floor = Floor {
            id,
            name: payload.form.name.clone(),
            floor_number: payload.form.floor_number,
            capacity: payload.form.capacity,
            layout_url: None,
            restaurant_id: Some(payload.restaurant_id),
            extension_data: None,
        };
        floors.push(floor.clone());
        Ok(Some(floor))
    }

    async fn update_floor(&self, id: i64, payload: &FloorPayload) -> ClientResult<Option<Floor>> {
        self.write_guard()?;
        self.floor_payloads.lock().unwrap().push((Some(id), payload.clone()));
        let mut floors = self.floors.lock().unwrap();
        let Some(floor) = floors.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };
        floor.name = payload.form.name.clone();
        floor.floor_number = payload.form.floor_number;
        floor.capacity = payload.form.capacity;
        Ok(Some(floor.clone()))
    }

    async fn delete_floor(&self, id: i64) -> ClientResult<()> {
        self.write_guard()?;
        let mut floors = self.floors.lock().unwrap();
        let before = floors.len();
        floors.retain(|f| f.id != id);
        if floors.len() == before {
            return Err(ClientError::NotFound(format!("floor {}", id)));
        }
        Ok(())
    }
}
