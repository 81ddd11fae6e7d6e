//! Sessions: capability handles binding one authenticated identity to a unique id.
//!
//! A session is minted after a successful credential check and lives only in the
//! in-process table; it is never serialized. Its id combines the bound login with the
//! creation instant taken from the [`Clock`](crate::Clock). Sessions are not revoked
//! automatically, and account deletion deliberately leaves them in place (reference
//! behavior); operations through a stale session fail when the bound login no longer
//! resolves.

use std::collections::HashMap;

use crate::Clock;

pub mod errors;

pub use errors::SessionError;

/// An authenticated session: unique id, bound login, creation instant.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    login: String,
    created_at_millis: u64,
}

impl Session {
    fn new(id: String, login: String, created_at_millis: u64) -> Self {
        Self {
            id,
            login,
            created_at_millis,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The login this session is bound to.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Creation instant in milliseconds since Unix epoch.
    pub fn created_at_millis(&self) -> u64 {
        self.created_at_millis
    }
}

/// The id-keyed table of open sessions.
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: HashMap<String, Session>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint and register a session for `login`, returning the new id.
    ///
    /// The id is `<login>_<millis>`; two logins within the same millisecond probe the
    /// instant forward until the id is free.
    pub fn open(&mut self, login: &str, clock: &dyn Clock) -> String {
        let mut instant = clock.now_millis();
        while self.sessions.contains_key(&format!("{login}_{instant}")) {
            instant += 1;
        }
        let id = format!("{login}_{instant}");
        self.sessions
            .insert(id.clone(), Session::new(id.clone(), login.to_owned(), instant));
        id
    }

    pub fn lookup(&self, id: &str) -> Result<&Session, SessionError> {
        self.sessions
            .get(id)
            .ok_or_else(|| SessionError::SessionNotFound { id: id.to_owned() })
    }

    /// Rebind every session held by `old_login` to `new_login`.
    ///
    /// Sessions bind an identity, not a login string, so a login rename follows through
    /// to every open session of that identity. Ids are opaque and keep their original
    /// prefix.
    pub fn rebind(&mut self, old_login: &str, new_login: &str) {
        for session in self.sessions.values_mut() {
            if session.login == old_login {
                session.login = new_login.to_owned();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
    }
}
