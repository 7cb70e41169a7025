//! Session and account state.
//!
//! # Design
//! A `SessionContext` is an immutable pair of (optional session, account).
//! Every endpoint call takes one by reference, so a call never observes a
//! session from one login and an account from another.
//!
//! `SessionStore` owns the current context. Readers clone an `Arc` snapshot
//! and never wait on network IO. A login or logout flow takes a
//! `SessionTransition`, which holds the store's flow mutex for the whole
//! flow so flows run one at a time. The context itself sits behind a
//! separate lock that is only held while an `Arc` is cloned or swapped.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::types::Account;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    pub is_guest: bool,
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    GuestActive,
    UserActive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session: Option<Session>,
    account: Account,
}

impl SessionContext {
    pub fn logged_out() -> Self {
        Self {
            session: None,
            account: Account::guest(),
        }
    }

    pub fn guest(session_id: impl Into<String>, expires_at: Option<String>) -> Self {
        Self {
            session: Some(Session {
                session_id: session_id.into(),
                is_guest: true,
                expires_at,
            }),
            account: Account::guest(),
        }
    }

    pub fn user(session_id: impl Into<String>, account: Account) -> Self {
        Self {
            session: Some(Session {
                session_id: session_id.into(),
                is_guest: false,
                expires_at: None,
            }),
            account,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The active session id, or "" when logged out.
    pub fn session_id(&self) -> &str {
        self.session
            .as_ref()
            .map(|session| session.session_id.as_str())
            .unwrap_or_default()
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn account_id(&self) -> i64 {
        self.account.id
    }

    pub fn state(&self) -> SessionState {
        match &self.session {
            None => SessionState::LoggedOut,
            Some(session) if session.is_guest => SessionState::GuestActive,
            Some(_) => SessionState::UserActive,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::logged_out()
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    flow: Mutex<()>,
    current: RwLock<Arc<SessionContext>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: SessionContext) -> Self {
        Self {
            flow: Mutex::new(()),
            current: RwLock::new(Arc::new(context)),
        }
    }

    /// The last published context. A running transition does not block this.
    pub async fn snapshot(&self) -> Arc<SessionContext> {
        self.current.read().await.clone()
    }

    /// Starts a transition, waiting for any other to finish first.
    pub async fn begin(&self) -> SessionTransition<'_> {
        SessionTransition {
            _flow: self.flow.lock().await,
            store: self,
        }
    }
}

/// Exclusive right to change a `SessionStore` for the length of one flow.
pub struct SessionTransition<'a> {
    _flow: MutexGuard<'a, ()>,
    store: &'a SessionStore,
}

impl SessionTransition<'_> {
    pub async fn current(&self) -> Arc<SessionContext> {
        self.store.snapshot().await
    }

    /// Publishes `next` to readers right away.
    pub async fn replace(&mut self, next: SessionContext) -> Arc<SessionContext> {
        let next = Arc::new(next);
        *self.store.current.write().await = next.clone();
        next
    }
}
