//! # Session State
//!
//! Who is signed in, and what they may open.
//!
//! The back office ships with two fixed accounts:
//!
//! | username   | role  |
//! |------------|-------|
//! | `admin`    | Admin |
//! | `personel` | Staff |
//!
//! Passwords are not changeable and are never returned to the UI.

use std::sync::{Arc, Mutex};

use sole_core::types::{Role, Section, User};
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};

struct Account {
    id: u32,
    username: &'static str,
    password: &'static str,
    role: Role,
}

const ACCOUNTS: [Account; 2] = [
    Account {
        id: 1,
        username: "admin",
        password: "password123",
        role: Role::Admin,
    },
    Account {
        id: 2,
        username: "personel",
        password: "password123",
        role: Role::Staff,
    },
];

/// Looks up an account by exact username and password.
pub fn authenticate(username: &str, password: &str) -> Option<User> {
    ACCOUNTS
        .iter()
        .find(|a| a.username == username && a.password == password)
        .map(|a| User {
            id: a.id,
            username: a.username.to_string(),
            role: a.role,
        })
}

#[derive(Debug, Default)]
pub struct SessionState {
    user: Arc<Mutex<Option<User>>>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Signs in, replacing any current session.
    pub fn login(&self, username: &str, password: &str) -> ApiResult<User> {
        let Some(user) = authenticate(username, password) else {
            warn!(username, "login refused");
            return Err(ApiError::unauthorized("Invalid username or password"));
        };

        info!(username, role = ?user.role, "user signed in");
        *self.user.lock().expect("Session mutex poisoned") = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&self) {
        if let Some(user) = self.user.lock().expect("Session mutex poisoned").take() {
            info!(username = %user.username, "user signed out");
        }
    }

    pub fn current(&self) -> Option<User> {
        self.user.lock().expect("Session mutex poisoned").clone()
    }

    /// The signed-in user, or `UNAUTHORIZED`.
    pub fn require_user(&self) -> ApiResult<User> {
        self.current()
            .ok_or_else(|| ApiError::unauthorized("Please sign in first"))
    }

    /// The signed-in user if their role may open `section`.
    pub fn require_section(&self, section: Section) -> ApiResult<User> {
        let user = self.require_user()?;
        if !user.role.can_access(section) {
            warn!(username = %user.username, ?section, "section refused");
            return Err(ApiError::forbidden(format!(
                "{:?} is only available to administrators",
                section
            )));
        }
        Ok(user)
    }

    /// The signed-in user if they are an administrator.
    ///
    /// Used for actions inside shared sections, such as editing store
    /// settings or restoring a backup.
    pub fn require_admin(&self, action: &str) -> ApiResult<User> {
        let user = self.require_user()?;
        if user.role != Role::Admin {
            warn!(username = %user.username, action, "admin action refused");
            return Err(ApiError::forbidden(format!(
                "Only administrators may {}",
                action
            )));
        }
        Ok(user)
    }
}
