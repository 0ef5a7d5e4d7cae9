//! Caller sessions.

use std::collections::HashMap;

use crate::config::schema::SessionConfig;

/// Identity of the caller, supplied by the hosting environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub user_name: String,
    /// Preferred locale, if the user has one.
    pub locale: Option<String>,
}

impl Session {
    pub fn new(user_id: i64, user_name: impl Into<String>) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            locale: None,
        }
    }
}

/// Lookup of sessions by token.
pub trait SessionStore: Send + Sync {
    fn lookup(&self, token: &str) -> Option<Session>;
}

/// Sessions declared in configuration.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: HashMap<String, Session>,
}

impl InMemorySessionStore {
    pub fn from_config(config: &SessionConfig) -> Self {
        let sessions = config
            .sessions
            .iter()
            .map(|entry| {
                let session = Session {
                    user_id: entry.user_id,
                    user_name: entry.user_name.clone(),
                    locale: entry.locale.clone(),
                };
                (entry.token.clone(), session)
            })
            .collect();
        Self { sessions }
    }

    pub fn insert(&mut self, token: impl Into<String>, session: Session) {
        self.sessions.insert(token.into(), session);
    }
}

impl SessionStore for InMemorySessionStore {
    fn lookup(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).cloned()
    }
}
