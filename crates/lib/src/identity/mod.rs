//! Identity store: user records and the login-keyed table holding them.
//!
//! An [`Identity`] is one registered user: login, display name, password, an open-ended
//! attribute bag, two FIFO inboxes (personal and community) and the owned
//! [`Relationships`] record. The [`IdentityTable`] keys identities by login and is the
//! leaf dependency of every other component.

use std::collections::{HashMap, VecDeque};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::messaging::Message;
use crate::relationship::Relationships;

pub mod errors;

pub use errors::IdentityError;

/// A registered user, uniquely keyed by login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    login: String,
    name: String,
    password: String,
    /// Open-ended extra attributes set through profile editing.
    #[serde(default)]
    attributes: HashMap<String, String>,
    #[serde(default)]
    relationships: Relationships,
    /// Personal inbox, FIFO.
    #[serde(default)]
    inbox: VecDeque<Message>,
    /// Community inbox, FIFO; fan-out copies land here.
    #[serde(default)]
    community_inbox: VecDeque<Message>,
    /// Names of communities this identity belongs to, in join order.
    #[serde(default)]
    communities: IndexSet<String>,
}

impl Identity {
    /// Create a fresh identity with empty relationship state and inboxes.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            name: name.into(),
            password: password.into(),
            attributes: HashMap::new(),
            relationships: Relationships::new(),
            inbox: VecDeque::new(),
            community_inbox: VecDeque::new(),
            communities: IndexSet::new(),
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plain equality check; no hashing is modeled.
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// Rebind the login. Only the table may call this, after it has re-keyed the entry
    /// and checked global uniqueness.
    pub(crate) fn set_login(&mut self, login: &str) {
        self.login = login.to_owned();
    }

    // === Attributes ===

    /// Look up a profile attribute.
    ///
    /// `"name"`, `"password"` and `"login"` resolve to the core fields; any other key
    /// falls through to the extras map and fails with
    /// [`IdentityError::AttributeNotSet`] when absent.
    pub fn attribute(&self, key: &str) -> Result<&str, IdentityError> {
        match key {
            "name" => Ok(&self.name),
            "password" => Ok(&self.password),
            "login" => Ok(&self.login),
            _ => self
                .attributes
                .get(key)
                .map(String::as_str)
                .ok_or_else(|| IdentityError::AttributeNotSet {
                    name: key.to_owned(),
                }),
        }
    }

    /// Set a profile attribute, with the same field-first precedence as [`Self::attribute`].
    ///
    /// Login renames go through [`IdentityTable::rename`] instead, since they re-key the
    /// table; the session layer routes them there.
    pub fn set_attribute(&mut self, key: &str, value: &str) {
        match key {
            "name" => self.name = value.to_owned(),
            "password" => self.password = value.to_owned(),
            _ => {
                self.attributes.insert(key.to_owned(), value.to_owned());
            }
        }
    }

    // === Relationships ===

    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn relationships_mut(&mut self) -> &mut Relationships {
        &mut self.relationships
    }

    // === Inboxes ===

    /// Append to the personal inbox.
    pub fn push_message(&mut self, message: Message) {
        self.inbox.push_back(message);
    }

    /// Dequeue the oldest personal message, if any.
    pub fn pop_message(&mut self) -> Option<Message> {
        self.inbox.pop_front()
    }

    /// Append to the community inbox.
    pub fn push_community_message(&mut self, message: Message) {
        self.community_inbox.push_back(message);
    }

    /// Dequeue the oldest community message, if any.
    pub fn pop_community_message(&mut self) -> Option<Message> {
        self.community_inbox.pop_front()
    }

    pub fn messages(&self) -> &VecDeque<Message> {
        &self.inbox
    }

    pub fn community_messages(&self) -> &VecDeque<Message> {
        &self.community_inbox
    }

    /// Drop every personal-inbox message authored by `sender`. Used by the account
    /// deletion cascade; community inboxes keep their copies (reference behavior).
    pub(crate) fn remove_messages_from(&mut self, sender: &str) {
        self.inbox.retain(|m| m.sender() != sender);
    }

    // === Community membership ===

    pub fn communities(&self) -> &IndexSet<String> {
        &self.communities
    }

    /// Record membership in `name`. Idempotent; the session layer rejects duplicate
    /// joins before calling this.
    pub(crate) fn join_community(&mut self, name: &str) {
        self.communities.insert(name.to_owned());
    }

    /// Forget membership in `name`, preserving the order of the rest.
    pub(crate) fn leave_community(&mut self, name: &str) {
        self.communities.shift_remove(name);
    }
}

/// The login-keyed table of all registered identities.
#[derive(Debug, Default)]
pub struct IdentityTable {
    users: HashMap<String, Identity>,
}

impl IdentityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, login: &str) -> bool {
        self.users.contains_key(login)
    }

    /// Register an identity, rejecting duplicate logins.
    pub fn insert(&mut self, identity: Identity) -> Result<(), IdentityError> {
        if self.users.contains_key(identity.login()) {
            return Err(IdentityError::DuplicateUser {
                login: identity.login().to_owned(),
            });
        }
        self.users.insert(identity.login().to_owned(), identity);
        Ok(())
    }

    pub fn lookup(&self, login: &str) -> Result<&Identity, IdentityError> {
        self.users.get(login).ok_or_else(|| IdentityError::UserNotFound {
            login: login.to_owned(),
        })
    }

    pub fn lookup_mut(&mut self, login: &str) -> Result<&mut Identity, IdentityError> {
        self.users
            .get_mut(login)
            .ok_or_else(|| IdentityError::UserNotFound {
                login: login.to_owned(),
            })
    }

    /// Borrow two distinct identities mutably at once.
    ///
    /// Callers must have rejected self-targeting already; equal logins are a programming
    /// error here.
    pub fn pair_mut(
        &mut self,
        a: &str,
        b: &str,
    ) -> Result<(&mut Identity, &mut Identity), IdentityError> {
        debug_assert_ne!(a, b);
        let [first, second] = self.users.get_disjoint_mut([a, b]);
        let first = first.ok_or_else(|| IdentityError::UserNotFound { login: a.to_owned() })?;
        let second = second.ok_or_else(|| IdentityError::UserNotFound { login: b.to_owned() })?;
        Ok((first, second))
    }

    /// Remove and return the identity registered under `login`.
    pub fn remove(&mut self, login: &str) -> Option<Identity> {
        self.users.remove(login)
    }

    /// Re-key an identity under a new login, keeping the table globally unique.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<(), IdentityError> {
        if self.users.contains_key(to) {
            return Err(IdentityError::LoginTaken {
                login: to.to_owned(),
            });
        }
        let mut identity = self
            .users
            .remove(from)
            .ok_or_else(|| IdentityError::UserNotFound {
                login: from.to_owned(),
            })?;
        identity.set_login(to);
        self.users.insert(to.to_owned(), identity);
        Ok(())
    }

    pub fn values(&self) -> impl Iterator<Item = &Identity> {
        self.users.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Identity> {
        self.users.values_mut()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn clear(&mut self) {
        self.users.clear();
    }
}
