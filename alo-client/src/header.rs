//! Navigation header
//!
//! Top-level menu and the branch selector. Selecting a branch persists it in
//! the preference cache and publishes it on the `AppContext`.

use shared::models::StoreBranch;
use std::fmt;
use std::str::FromStr;

use crate::context::AppContext;
use crate::preference::{PreferenceCache, STORE_BRANCH_ACTIVE_KEY};
use crate::{ClientError, ClientResult};

/// Top-level menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Dashboard,
    BookingManagement,
    Settings,
}

impl MenuKey {
    pub const ALL: [MenuKey; 3] = [
        MenuKey::Dashboard,
        MenuKey::BookingManagement,
        MenuKey::Settings,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MenuKey::Dashboard => "dashboard",
            MenuKey::BookingManagement => "booking-management",
            MenuKey::Settings => "settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuKey::Dashboard => "Dashboard",
            MenuKey::BookingManagement => "Booking Management",
            MenuKey::Settings => "Settings",
        }
    }

    pub fn route(&self) -> String {
        format!("/{}", self.key())
    }

    /// Menu entry owning a path; unknown paths land on the dashboard
    pub fn from_path(path: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|item| path.starts_with(&item.route()))
            .unwrap_or(MenuKey::Dashboard)
    }
}

impl fmt::Display for MenuKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MenuKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|item| item.key() == s)
            .ok_or_else(|| format!("unknown menu key: {}", s))
    }
}

/// One entry of the branch selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchOption {
    pub value: i64,
    pub label: String,
}

pub struct Header {
    context: AppContext,
    preferences: PreferenceCache,
    selected: MenuKey,
}

impl Header {
    pub fn new(context: AppContext, preferences: PreferenceCache) -> Self {
        Self {
            context,
            preferences,
            selected: MenuKey::Dashboard,
        }
    }

    /// Header opened on a given path
    pub fn at_path(context: AppContext, preferences: PreferenceCache, path: &str) -> Self {
        Self {
            selected: MenuKey::from_path(path),
            ..Self::new(context, preferences)
        }
    }

    pub fn selected_menu(&self) -> MenuKey {
        self.selected
    }

    /// Select a menu entry and return the route to go to
    pub fn navigate(&mut self, key: MenuKey) -> String {
        self.selected = key;
        key.route()
    }

    /// Selector entries; empty until the branches are loaded
    pub fn branch_options(&self) -> Vec<BranchOption> {
        self.context
            .store_branches()
            .into_iter()
            .map(|branch| BranchOption {
                value: branch.id,
                label: branch.name,
            })
            .collect()
    }

    pub fn active_branch(&self) -> StoreBranch {
        self.context.store_branch_active()
    }

    /// Make a loaded branch active and remember it for the next session
    pub fn select_branch(&self, id: i64) -> ClientResult<StoreBranch> {
        let branch = self
            .context
            .store_branches()
            .into_iter()
            .find(|branch| branch.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("store branch {}", id)))?;

        self.preferences.write(STORE_BRANCH_ACTIVE_KEY, &branch);
        self.context.set_store_branch_active(branch.clone());
        Ok(branch)
    }

    /// Re-apply the branch remembered from a previous session, if any
    pub fn restore_branch(&self) -> Option<StoreBranch> {
        let branch = self
            .preferences
            .read(STORE_BRANCH_ACTIVE_KEY, StoreBranch::none());
        if !branch.is_selected() {
            return None;
        }
        self.context.set_store_branch_active(branch.clone());
        Some(branch)
    }
}
