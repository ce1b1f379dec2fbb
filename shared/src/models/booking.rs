//! Booking Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Booking lifecycle status (New → Confirm → Using → Completed/Cancelled)
///
/// The service owns the transitions; this side only displays and forwards them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookingStatus {
    New,
    Confirm,
    Using,
    Completed,
    Cancelled,
    /// Any status string this client does not know about
    #[default]
    #[serde(other)]
    Unknown,
}

impl BookingStatus {
    /// Statuses offered by the status filter, in lifecycle order
    pub const FILTERABLE: [BookingStatus; 5] = [
        BookingStatus::New,
        BookingStatus::Confirm,
        BookingStatus::Using,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::New => "New",
            BookingStatus::Confirm => "Confirm",
            BookingStatus::Using => "Using",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Unknown => "Unknown",
        }
    }

    /// Decode a wire name exactly as serde does; anything else is `Unknown`
    pub fn from_wire(name: &str) -> Self {
        Self::FILTERABLE
            .into_iter()
            .find(|status| status.as_str() == name)
            .unwrap_or(BookingStatus::Unknown)
    }

    /// Tag colour used when rendering the status
    pub fn color(&self) -> &'static str {
        match self {
            BookingStatus::New => "#4bae4b",
            BookingStatus::Confirm => "#2db7f5",
            BookingStatus::Cancelled => "red",
            BookingStatus::Completed => "purple",
            _ => "gray",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::FILTERABLE
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown booking status: {}", s))
    }
}

/// Booking entity as returned by the service
///
/// Only the fields used for filtering, sorting and colouring are typed;
/// everything else is carried through untouched in `extra`. A status name
/// this client does not model is kept in `unknown_status` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BookingRecord", into = "BookingRecord")]
pub struct Booking {
    pub id: String,
    pub booking_status_id: BookingStatus,
    /// Wire name behind an `Unknown` status
    pub unknown_status: Option<String>,
    pub booking_date: Option<String>,
    pub created_date: Option<String>,
    pub modified_date: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub number_of_people: Option<i32>,
    pub extra: Map<String, Value>,
}

/// Wire shape of [`Booking`], with the status as the raw string
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingRecord {
    id: String,
    #[serde(default)]
    booking_status_id: Option<String>,
    #[serde(default)]
    booking_date: Option<String>,
    #[serde(default)]
    created_date: Option<String>,
    #[serde(default)]
    modified_date: Option<String>,
    #[serde(default)]
    customer_id: Option<String>,
    #[serde(default)]
    customer_name: Option<String>,
    #[serde(default)]
    number_of_people: Option<i32>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<BookingRecord> for Booking {
    fn from(record: BookingRecord) -> Self {
        let status = record
            .booking_status_id
            .as_deref()
            .map(BookingStatus::from_wire)
            .unwrap_or_default();
        let unknown_status = record
            .booking_status_id
            .filter(|_| status == BookingStatus::Unknown);
        Self {
            id: record.id,
            booking_status_id: status,
            unknown_status,
            booking_date: record.booking_date,
            created_date: record.created_date,
            modified_date: record.modified_date,
            customer_id: record.customer_id,
            customer_name: record.customer_name,
            number_of_people: record.number_of_people,
            extra: record.extra,
        }
    }
}

impl From<Booking> for BookingRecord {
    fn from(booking: Booking) -> Self {
        let status = match (booking.booking_status_id, booking.unknown_status) {
            (BookingStatus::Unknown, Some(raw)) => raw,
            (status, _) => status.as_str().to_string(),
        };
        Self {
            id: booking.id,
            booking_status_id: Some(status),
            booking_date: booking.booking_date,
            created_date: booking.created_date,
            modified_date: booking.modified_date,
            customer_id: booking.customer_id,
            customer_name: booking.customer_name,
            number_of_people: booking.number_of_people,
            extra: booking.extra,
        }
    }
}

impl Booking {
    pub fn new(id: impl Into<String>, status: BookingStatus) -> Self {
        Self {
            id: id.into(),
            booking_status_id: status,
            unknown_status: None,
            booking_date: None,
            created_date: None,
            modified_date: None,
            customer_id: None,
            customer_name: None,
            number_of_people: None,
            extra: Map::new(),
        }
    }

    /// Status name for display; an unmodelled status shows its wire name
    pub fn status_text(&self) -> &str {
        match (&self.booking_status_id, &self.unknown_status) {
            (BookingStatus::Unknown, Some(raw)) => raw.as_str(),
            (status, _) => status.as_str(),
        }
    }

    /// Calendar day of the booking, read from the leading `YYYY-MM-DD`
    pub fn booking_day(&self) -> Option<NaiveDate> {
        let date = self.booking_date.as_deref()?;
        NaiveDate::parse_from_str(date.get(..10)?, "%Y-%m-%d").ok()
    }
}

/// Status update command: `{ bookingIds, bookingStatus }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusUpdate {
    pub booking_ids: Vec<String>,
    pub booking_status: BookingStatus,
}

impl BookingStatusUpdate {
    pub fn single(booking_id: impl Into<String>, status: BookingStatus) -> Self {
        Self {
            booking_ids: vec![booking_id.into()],
            booking_status: status,
        }
    }
}
