//! Client-side session context.
//!
//! `SessionContext` is passed explicitly to the auth operations that
//! synchronize it. Synchronization outcomes are returned in `Synced` so the
//! caller can see when the local view of the session diverged from the
//! server's.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::types::User;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session lock poisoned")]
    LockPoisoned,

    #[error("response carried no user")]
    MissingUser,
}

/// Shared holder of the currently authenticated user. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    user: Arc<RwLock<Option<User>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current user; `None` when signed out or poisoned.
    pub fn user(&self) -> Option<User> {
        self.user.read().ok().and_then(|guard| guard.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn set_user(&self, user: User) -> Result<(), SessionError> {
        let mut guard = self.user.write().map_err(|_| SessionError::LockPoisoned)?;
        *guard = Some(user);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        let mut guard = self.user.write().map_err(|_| SessionError::LockPoisoned)?;
        *guard = None;
        Ok(())
    }
}

/// Result of an operation that also updates the session.
#[derive(Debug)]
pub struct Synced<T> {
    pub data: T,
    pub session: Result<(), SessionError>,
}

impl<T> Synced<T> {
    pub fn is_synced(&self) -> bool {
        self.session.is_ok()
    }
}
