//! Query descriptors
//!
//! `BookingQuery` is the filter/pagination descriptor of the booking board.
//! Every optional filter is an `Option`: a cleared filter is `None` and is
//! left out of both the JSON form and the query string, never sent as an
//! empty or sentinel value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{Booking, BookingStatus};

/// Rows fetched per customer search
pub const CUSTOMER_SEARCH_ROWS: u32 = 50;

// =============================================================================
// Sorting
// =============================================================================

/// Date field the booking list is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    BookingDate,
    #[default]
    ModifiedDate,
    CreatedDate,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::BookingDate => "bookingDate",
            SortField::ModifiedDate => "modifiedDate",
            SortField::CreatedDate => "createdDate",
        }
    }

    fn key<'a>(&self, booking: &'a Booking) -> Option<&'a str> {
        match self {
            SortField::BookingDate => booking.booking_date.as_deref(),
            SortField::ModifiedDate => booking.modified_date.as_deref(),
            SortField::CreatedDate => booking.created_date.as_deref(),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace(['-', '_'], "").to_ascii_lowercase().as_str() {
            "bookingdate" => Ok(SortField::BookingDate),
            "modifieddate" => Ok(SortField::ModifiedDate),
            "createddate" => Ok(SortField::CreatedDate),
            _ => Err(format!("unknown sort field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("unknown sort direction: {}", s)),
        }
    }
}

/// Client-side sort applied to the fetched list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl BookingSort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Stable sort by a date field. Missing values come first in ascending order.
///
/// Dates are ISO-8601 strings, so lexical order is chronological order.
pub fn sort_bookings(bookings: &mut [Booking], sort: BookingSort) {
    bookings.sort_by(|a, b| {
        let ord: Ordering = sort.field.key(a).cmp(&sort.field.key(b));
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

// =============================================================================
// Load-more pagination
// =============================================================================

/// Load-more pagination: every page re-fetches from offset 0 with a larger limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMore {
    page_size: u32,
    page_index: u32,
}

impl LoadMore {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            page_index: 1,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Rows requested for the current page index
    pub fn total_rows(&self) -> u32 {
        self.page_size.saturating_mul(self.page_index)
    }

    /// Advance one page and return the new window size
    pub fn next_page(&mut self) -> u32 {
        self.page_index = self.page_index.saturating_add(1);
        self.total_rows()
    }
}

// =============================================================================
// Booking query
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BookingQuery {
    pub restaurant_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<NaiveDate>,
    /// `Some` always holds a non-empty set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_status: Option<Vec<BookingStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub total_rows: u32,
    pub skip_rows: u32,
    /// Applied on the client; never sent
    #[serde(skip)]
    pub sort: BookingSort,
}

impl BookingQuery {
    pub fn new(restaurant_id: i64, booking_date: Option<NaiveDate>, total_rows: u32) -> Self {
        Self {
            restaurant_id,
            booking_date,
            booking_status: None,
            customer_id: None,
            total_rows,
            skip_rows: 0,
            sort: BookingSort::default(),
        }
    }

    /// A restaurant id of 0 means no branch is selected and nothing is fetched
    pub fn has_restaurant(&self) -> bool {
        self.restaurant_id != 0
    }

    pub fn with_restaurant(&self, restaurant_id: i64) -> Self {
        Self {
            restaurant_id,
            ..self.clone()
        }
    }

    pub fn with_booking_date(&self, booking_date: Option<NaiveDate>) -> Self {
        Self {
            booking_date,
            ..self.clone()
        }
    }

    /// An empty set clears the status filter
    pub fn with_statuses<I>(&self, statuses: I) -> Self
    where
        I: IntoIterator<Item = BookingStatus>,
    {
        let mut set: Vec<BookingStatus> = Vec::new();
        for status in statuses {
            if !set.contains(&status) {
                set.push(status);
            }
        }
        Self {
            booking_status: (!set.is_empty()).then_some(set),
            ..self.clone()
        }
    }

    /// An empty or missing id clears the customer filter
    pub fn with_customer(&self, customer_id: Option<String>) -> Self {
        Self {
            customer_id: customer_id.filter(|id| !id.trim().is_empty()),
            ..self.clone()
        }
    }

    /// New load-more window; always restarts from offset 0
    pub fn with_window(&self, total_rows: u32) -> Self {
        Self {
            total_rows,
            skip_rows: 0,
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort: BookingSort) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    /// Query-string form. Statuses repeat the `BookingStatus` key once each.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("RestaurantId", self.restaurant_id.to_string())];
        if let Some(date) = self.booking_date {
            pairs.push(("BookingDate", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(statuses) = &self.booking_status {
            for status in statuses {
                pairs.push(("BookingStatus", status.as_str().to_string()));
            }
        }
        if let Some(customer_id) = &self.customer_id {
            pairs.push(("CustomerId", customer_id.clone()));
        }
        pairs.push(("TotalRows", self.total_rows.to_string()));
        pairs.push(("SkipRows", self.skip_rows.to_string()));
        pairs
    }

    /// Whether a booking satisfies the filters, ignoring the row window
    pub fn matches(&self, restaurant_id: i64, booking: &Booking) -> bool {
        if restaurant_id != self.restaurant_id {
            return false;
        }
        if let Some(date) = self.booking_date
            && booking.booking_day() != Some(date)
        {
            return false;
        }
        if let Some(statuses) = &self.booking_status
            && !statuses.contains(&booking.booking_status_id)
        {
            return false;
        }
        if let Some(customer_id) = &self.customer_id
            && booking.customer_id.as_deref() != Some(customer_id.as_str())
        {
            return false;
        }
        true
    }
}

// =============================================================================
// Customer query
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerQuery {
    pub search_text: String,
    pub total_rows: u32,
    pub skip_rows: u32,
}

impl CustomerQuery {
    pub fn new(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            total_rows: CUSTOMER_SEARCH_ROWS,
            skip_rows: 0,
        }
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("SearchText", self.search_text.clone()),
            ("TotalRows", self.total_rows.to_string()),
            ("SkipRows", self.skip_rows.to_string()),
        ]
    }
}
