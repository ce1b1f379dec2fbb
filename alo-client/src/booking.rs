//! Booking board - list/detail synchronisation
//!
//! Holds the booking query built from the user's filters, the fetched list
//! and the detail of the selected booking. Filter changes rebuild the query;
//! the poller (`run`) fetches on every query change and on a fixed interval.
//!
//! List and detail fetches each go through a [`RequestGate`]: starting a fetch
//! cancels the previous one of the same kind, and only the latest generation
//! may write its response into the view.

use chrono::NaiveDate;
use shared::models::{Booking, BookingStatus, BookingStatusUpdate};
use shared::query::{BookingQuery, BookingSort, LoadMore, SortDirection, SortField, sort_bookings};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::api::BookingService;
use crate::config::{ClientConfig, DEFAULT_PAGE_SIZE, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL};
use crate::context::AppContext;
use crate::gate::RequestGate;
use crate::ClientResult;

/// Board settings
#[derive(Debug, Clone)]
pub struct BoardOptions {
    pub poll_interval: Duration,
    pub page_size: u32,
    /// Date filter the board opens with
    pub initial_date: Option<NaiveDate>,
}

impl BoardOptions {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            poll_interval: config.poll_interval,
            page_size: config.page_size,
            ..Self::default()
        }
    }

    pub fn with_initial_date(mut self, date: Option<NaiveDate>) -> Self {
        self.initial_date = date;
        self
    }
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            page_size: DEFAULT_PAGE_SIZE,
            initial_date: Some(chrono::Local::now().date_naive()),
        }
    }
}

/// What the board currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub query: BookingQuery,
    pub bookings: Vec<Booking>,
    pub selected: Option<String>,
    pub detail: Option<Booking>,
    pub pages: LoadMore,
}

impl BoardView {
    pub fn total_rows(&self) -> u32 {
        self.pages.total_rows()
    }

    pub fn is_selected(&self, booking: &Booking) -> bool {
        self.selected.as_deref() == Some(booking.id.as_str())
    }
}

/// Result of one fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Response written to the view (list length, or 1/0 for a detail)
    Applied(usize),
    /// Nothing to fetch: no branch or no selected booking
    Skipped,
    /// A newer fetch started before this one finished
    Superseded,
    /// The service call failed; the previous data stays
    Failed,
}

pub struct BookingBoard<S> {
    inner: Arc<BoardInner<S>>,
}

impl<S> Clone for BookingBoard<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct BoardInner<S> {
    service: S,
    context: AppContext,
    query: watch::Sender<BookingQuery>,
    view: watch::Sender<BoardView>,
    list_gate: RequestGate,
    detail_gate: RequestGate,
    timer_reset: Notify,
    poll_interval: Duration,
}

impl<S: BookingService> BookingBoard<S> {
    pub fn new(service: S, context: AppContext, options: BoardOptions) -> Self {
        let pages = LoadMore::new(options.page_size);
        let query = BookingQuery::new(
            context.store_branch_active().id,
            options.initial_date,
            pages.total_rows(),
        );
        let view = BoardView {
            query: query.clone(),
            bookings: Vec::new(),
            selected: None,
            detail: None,
            pages,
        };

        Self {
            inner: Arc::new(BoardInner {
                service,
                context,
                query: watch::Sender::new(query),
                view: watch::Sender::new(view),
                list_gate: RequestGate::new(),
                detail_gate: RequestGate::new(),
                timer_reset: Notify::new(),
                poll_interval: options.poll_interval.max(MIN_POLL_INTERVAL),
            }),
        }
    }

    pub fn service(&self) -> &S {
        &self.inner.service
    }

    pub fn query(&self) -> BookingQuery {
        self.inner.query.borrow().clone()
    }

    pub fn view(&self) -> BoardView {
        self.inner.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardView> {
        self.inner.view.subscribe()
    }

    // ========== Filters ==========

    /// Swap in a rebuilt query; returns whether anything changed
    fn update_query<F>(&self, rebuild: F) -> bool
    where
        F: FnOnce(&BookingQuery) -> BookingQuery,
    {
        let mut rebuilt = None;
        self.inner.query.send_if_modified(|query| {
            let next = rebuild(query);
            if next == *query {
                return false;
            }
            *query = next.clone();
            rebuilt = Some(next);
            true
        });

        match rebuilt {
            Some(next) => {
                tracing::debug!(query = ?next, "Booking query rebuilt");
                self.inner.view.send_modify(|view| view.query = next);
                true
            }
            None => false,
        }
    }

    /// `None` clears the date filter
    pub fn set_date_filter(&self, date: Option<NaiveDate>) -> bool {
        self.update_query(|q| q.with_booking_date(date))
    }

    /// An empty set clears the status filter
    pub fn set_status_filter(&self, statuses: Vec<BookingStatus>) -> bool {
        self.update_query(|q| q.with_statuses(statuses))
    }

    /// Customer picked in the type-ahead; `None` or empty clears it
    pub fn set_customer(&self, customer_id: Option<String>) -> bool {
        self.update_query(|q| q.with_customer(customer_id))
    }

    pub fn set_sort_field(&self, field: SortField) -> bool {
        let direction = self.query().sort.direction;
        self.set_sort(BookingSort::new(field, direction))
    }

    pub fn set_sort_direction(&self, direction: SortDirection) -> bool {
        let field = self.query().sort.field;
        self.set_sort(BookingSort::new(field, direction))
    }

    /// Re-sorts what is on screen right away; the query change also refetches
    fn set_sort(&self, sort: BookingSort) -> bool {
        let changed = self.update_query(|q| q.with_sort(sort));
        if changed {
            self.inner
                .view
                .send_modify(|view| sort_bookings(&mut view.bookings, sort));
        }
        changed
    }

    /// Grow the window by one page. The list on screen stays until the
    /// larger response arrives.
    pub fn load_more(&self) -> u32 {
        let mut total_rows = 0;
        self.inner
            .view
            .send_modify(|view| total_rows = view.pages.next_page());
        self.update_query(|q| q.with_window(total_rows));
        total_rows
    }

    /// Scope the board to a branch; 0 (nothing selected) is ignored
    pub fn set_restaurant(&self, restaurant_id: i64) -> bool {
        if restaurant_id == 0 {
            return false;
        }
        self.update_query(|q| q.with_restaurant(restaurant_id))
    }

    // ========== Fetching ==========

    /// Fetch the list for the current query now
    pub async fn refresh(&self) -> FetchOutcome {
        let query = self.query();
        if !query.has_restaurant() {
            return FetchOutcome::Skipped;
        }

        let ticket = self.inner.list_gate.begin();
        let result = tokio::select! {
            biased;
            _ = ticket.cancelled() => return FetchOutcome::Superseded,
            result = self.inner.service.list_bookings(&query) => result,
        };

        match result {
            Ok(bookings) => {
                let count = bookings.len();
                let applied = self.inner.list_gate.commit(&ticket, || {
                    self.inner.view.send_modify(|view| {
                        view.bookings = bookings;
                        sort_bookings(&mut view.bookings, view.query.sort);
                    });
                });
                if applied {
                    tracing::debug!(count, generation = ticket.generation(), "Bookings updated");
                    FetchOutcome::Applied(count)
                } else {
                    tracing::debug!(generation = ticket.generation(), "Dropped stale booking list");
                    FetchOutcome::Superseded
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching bookings");
                FetchOutcome::Failed
            }
        }
    }

    /// Select a booking and fetch its detail
    pub async fn select_booking(&self, id: impl Into<String>) -> FetchOutcome {
        let id = id.into();
        self.inner.view.send_if_modified(|view| {
            if view.selected.as_deref() == Some(id.as_str()) {
                return false;
            }
            view.selected = Some(id);
            true
        });
        self.reload_detail().await
    }

    /// Fetch the detail of the selected booking, independently of the list
    pub async fn reload_detail(&self) -> FetchOutcome {
        let selected = self.inner.view.borrow().selected.clone();
        let Some(id) = selected else {
            return FetchOutcome::Skipped;
        };

        let ticket = self.inner.detail_gate.begin();
        let result = tokio::select! {
            biased;
            _ = ticket.cancelled() => return FetchOutcome::Superseded,
            result = self.inner.service.get_booking(&id) => result,
        };

        match result {
            Ok(detail) => {
                let found = usize::from(detail.is_some());
                let applied = self.inner.detail_gate.commit(&ticket, || {
                    self.inner.view.send_modify(|view| {
                        // The selection may have moved on while this was in flight
                        if view.selected.as_deref() == Some(id.as_str()) {
                            view.detail = detail;
                        }
                    });
                });
                if applied {
                    FetchOutcome::Applied(found)
                } else {
                    FetchOutcome::Superseded
                }
            }
            Err(e) => {
                tracing::error!(booking_id = %id, error = %e, "Error fetching booking detail");
                FetchOutcome::Failed
            }
        }
    }

    /// Send a status change for one booking.
    ///
    /// On success the list and the detail are each fetched once; nothing is
    /// patched locally.
    pub async fn update_status(&self, booking_id: &str, status: BookingStatus) -> ClientResult<()> {
        let update = BookingStatusUpdate::single(booking_id, status);
        if let Err(e) = self.inner.service.update_booking_status(&update).await {
            tracing::error!(booking_id, %status, error = %e, "Error updating booking status");
            return Err(e);
        }

        tracing::info!(booking_id, %status, "Booking status updated");
        self.inner.timer_reset.notify_one();
        tokio::join!(self.refresh(), self.reload_detail());
        Ok(())
    }
}

impl<S: BookingService + 'static> BookingBoard<S> {
    fn spawn_refresh(&self) {
        if !self.query().has_restaurant() {
            return;
        }
        let board = self.clone();
        tokio::spawn(async move {
            board.refresh().await;
        });
    }

    /// Poll until `shutdown` is cancelled.
    ///
    /// Fetches once at start, on every query change and every poll interval
    /// while a branch is selected. A query change restarts the interval. The
    /// board follows the active branch of the context.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut query_rx = self.inner.query.subscribe();
        let mut active_rx = self.inner.context.subscribe_active();

        let active_id = active_rx.borrow_and_update().id;
        self.set_restaurant(active_id);
        query_rx.borrow_and_update();

        let period = self.inner.poll_interval;
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(interval_secs = period.as_secs(), "Booking poller started");
        self.spawn_refresh();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                changed = query_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    query_rx.borrow_and_update();
                    ticker.reset();
                    self.spawn_refresh();
                }
                changed = active_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let active_id = active_rx.borrow_and_update().id;
                    self.set_restaurant(active_id);
                }
                _ = self.inner.timer_reset.notified() => ticker.reset(),
                _ = ticker.tick() => self.spawn_refresh(),
            }
        }

        self.inner.list_gate.close();
        self.inner.detail_gate.close();
        tracing::info!("Booking poller stopped");
    }
}
