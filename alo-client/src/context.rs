//! Application context - branch selection
//!
//! The store branches and the active branch, shared between the header
//! (single writer) and every flow that scopes its queries to a branch.
//! Passed around explicitly as a cheap cloneable handle.

use shared::models::StoreBranch;
use std::sync::Arc;
use tokio::sync::watch;

use crate::ClientResult;
use crate::api::BranchService;

#[derive(Debug, Clone)]
pub struct AppContext {
    inner: Arc<ContextInner>,
}

#[derive(Debug)]
struct ContextInner {
    store_branches: watch::Sender<Vec<StoreBranch>>,
    store_branch_active: watch::Sender<StoreBranch>,
    is_update: watch::Sender<bool>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ContextInner {
                store_branches: watch::Sender::new(Vec::new()),
                store_branch_active: watch::Sender::new(StoreBranch::none()),
                is_update: watch::Sender::new(false),
            }),
        }
    }

    pub fn store_branches(&self) -> Vec<StoreBranch> {
        self.inner.store_branches.borrow().clone()
    }

    /// Replace the branch set wholesale
    pub fn set_store_branches(&self, branches: Vec<StoreBranch>) {
        self.inner.store_branches.send_replace(branches);
    }

    pub fn store_branch_active(&self) -> StoreBranch {
        self.inner.store_branch_active.borrow().clone()
    }

    /// Select a branch. Membership in the loaded set is the caller's concern.
    pub fn set_store_branch_active(&self, branch: StoreBranch) {
        tracing::info!(branch_id = branch.id, branch = %branch.name, "Active branch changed");
        self.inner.store_branch_active.send_replace(branch);
    }

    pub fn is_update(&self) -> bool {
        *self.inner.is_update.borrow()
    }

    pub fn set_is_update(&self, is_update: bool) {
        self.inner.is_update.send_replace(is_update);
    }

    pub fn subscribe_branches(&self) -> watch::Receiver<Vec<StoreBranch>> {
        self.inner.store_branches.subscribe()
    }

    pub fn subscribe_active(&self) -> watch::Receiver<StoreBranch> {
        self.inner.store_branch_active.subscribe()
    }

    pub fn subscribe_is_update(&self) -> watch::Receiver<bool> {
        self.inner.is_update.subscribe()
    }

    /// Load the branch set from the service
    pub async fn load_store_branches<S>(&self, service: &S) -> ClientResult<Vec<StoreBranch>>
    where
        S: BranchService + ?Sized,
    {
        let branches = service.list_store_branches().await?;
        tracing::debug!(count = branches.len(), "Loaded store branches");
        self.set_store_branches(branches.clone());
        Ok(branches)
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
