//! Floor management
//!
//! CRUD over the floors of the active branch. Every write refetches the
//! list once it completes, whatever the outcome; nothing is patched locally.
//! Successful writes also publish a notification. Failures are logged and
//! returned to the caller.

use shared::models::{Floor, FloorForm, FloorPayload};
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

use crate::api::FloorService;
use crate::context::AppContext;
use crate::gate::RequestGate;
use crate::{ClientError, ClientResult};

const NOTIFICATION_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
}

/// Toast-style message for whoever renders the floor screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }
}

pub struct FloorManager<S> {
    inner: Arc<FloorInner<S>>,
}

impl<S> Clone for FloorManager<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct FloorInner<S> {
    service: S,
    context: AppContext,
    floors: watch::Sender<Vec<Floor>>,
    editing: Mutex<Option<Floor>>,
    notifications: broadcast::Sender<Notification>,
    gate: RequestGate,
}

impl<S: FloorService> FloorManager<S> {
    pub fn new(service: S, context: AppContext) -> Self {
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self {
            inner: Arc::new(FloorInner {
                service,
                context,
                floors: watch::Sender::new(Vec::new()),
                editing: Mutex::new(None),
                notifications,
                gate: RequestGate::new(),
            }),
        }
    }

    pub fn floors(&self) -> Vec<Floor> {
        self.inner.floors.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Floor>> {
        self.inner.floors.subscribe()
    }

    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifications.subscribe()
    }

    fn notify(&self, notification: Notification) {
        // No receiver is fine
        let _ = self.inner.notifications.send(notification);
    }

    /// Fetch the floors of the active branch and return how many are listed
    /// afterwards. Does nothing while no branch is selected; on failure the
    /// current list stays. A fetch overtaken by a newer one leaves the list
    /// to that one and reports its current length.
    pub async fn refresh(&self) -> ClientResult<usize> {
        let branch = self.inner.context.store_branch_active();
        if !branch.is_selected() {
            return Ok(0);
        }

        let ticket = self.inner.gate.begin();
        let result = tokio::select! {
            biased;
            _ = ticket.cancelled() => return Ok(self.inner.floors.borrow().len()),
            result = self.inner.service.list_floors(branch.id) => result,
        };

        let floors = result.inspect_err(|e| {
            tracing::error!(restaurant_id = branch.id, error = %e, "Error fetching floors");
        })?;
        let applied = self.inner.gate.commit(&ticket, || {
            self.inner.floors.send_replace(floors);
        });
        if !applied {
            tracing::debug!(generation = ticket.generation(), "Dropped stale floor list");
        }
        Ok(self.inner.floors.borrow().len())
    }

    async fn refetch(&self) {
        // Already logged
        let _ = self.refresh().await;
    }

    pub async fn create(&self, form: FloorForm) -> ClientResult<Option<Floor>> {
        let restaurant_id = self.inner.context.store_branch_active().id;
        let payload = FloorPayload::create(form, restaurant_id);

        let result = self.inner.service.create_floor(&payload).await;
        match &result {
            Ok(Some(floor)) => {
                tracing::info!(floor_id = floor.id, name = %floor.name, "Floor created");
                self.notify(Notification::success("Create floor successful"));
            }
            Ok(None) => tracing::debug!(restaurant_id, "Create floor returned no record"),
            Err(e) => tracing::error!(restaurant_id, error = %e, "Error creating floor"),
        }
        self.refetch().await;
        result
    }

    /// Start editing a record; returns the form pre-populated from it
    pub fn begin_edit(&self, floor: &Floor) -> FloorForm {
        *self.lock_editing() = Some(floor.clone());
        FloorForm::from(floor)
    }

    /// Forget the record being edited; returns an empty form
    pub fn cancel_edit(&self) -> FloorForm {
        *self.lock_editing() = None;
        FloorForm::default()
    }

    pub fn editing(&self) -> Option<Floor> {
        self.lock_editing().clone()
    }

    fn lock_editing(&self) -> std::sync::MutexGuard<'_, Option<Floor>> {
        self.inner
            .editing
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub async fn update(&self, id: i64, form: FloorForm) -> ClientResult<Option<Floor>> {
        let restaurant_id = self.inner.context.store_branch_active().id;
        let payload = FloorPayload::update(form, restaurant_id);

        let result = self.inner.service.update_floor(id, &payload).await;
        match &result {
            Ok(Some(floor)) => {
                tracing::info!(floor_id = id, name = %floor.name, "Floor updated");
                self.notify(Notification::success("Edit floor successful"));
            }
            Ok(None) => tracing::debug!(floor_id = id, "Update floor returned no record"),
            Err(e) => tracing::error!(floor_id = id, error = %e, "Error updating floor"),
        }
        self.refetch().await;
        result
    }

    /// Update the record passed to `begin_edit`
    pub async fn submit_edit(&self, form: FloorForm) -> ClientResult<Option<Floor>> {
        let editing = self
            .editing()
            .ok_or_else(|| ClientError::Validation("no floor is being edited".to_string()))?;

        let updated = self.update(editing.id, form).await?;
        if updated.is_some() {
            *self.lock_editing() = None;
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let result = self.inner.service.delete_floor(id).await;
        match &result {
            Ok(()) => {
                tracing::info!(floor_id = id, "Floor deleted");
                self.notify(Notification::success("Delete floor successful"));
            }
            Err(e) => tracing::error!(floor_id = id, error = %e, "Error deleting floor"),
        }
        self.refetch().await;
        result
    }

    /// Follow the active branch until `shutdown` is cancelled
    pub async fn run(self, shutdown: CancellationToken) {
        let mut active_rx = self.inner.context.subscribe_active();
        active_rx.borrow_and_update();
        self.refetch().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                changed = active_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    active_rx.borrow_and_update();
                    self.refetch().await;
                }
            }
        }

        self.inner.gate.close();
        tracing::debug!("Floor watcher stopped");
    }
}
