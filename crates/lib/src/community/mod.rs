//! Communities: named groups with a manager and an ordered member roster.

use std::collections::HashMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

pub mod errors;

pub use errors::CommunityError;

/// A community: unique name, description, the manager's login (the creator, fixed at
/// creation) and the member logins in join order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Community {
    name: String,
    description: String,
    manager: String,
    #[serde(default)]
    members: IndexSet<String>,
}

impl Community {
    /// Create a community. The caller enrolls the creator as the first member.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        manager: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            manager: manager.into(),
            members: IndexSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn manager(&self) -> &str {
        &self.manager
    }

    pub fn members(&self) -> &IndexSet<String> {
        &self.members
    }

    /// Enroll a member. Idempotent; the session layer rejects duplicate joins first.
    pub(crate) fn add_member(&mut self, login: &str) {
        self.members.insert(login.to_owned());
    }

    /// Drop a member from the roster, preserving the order of the rest.
    pub(crate) fn remove_member(&mut self, login: &str) {
        self.members.shift_remove(login);
    }
}

/// The name-keyed table of all registered communities.
#[derive(Debug, Default)]
pub struct CommunityTable {
    communities: HashMap<String, Community>,
}

impl CommunityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.communities.contains_key(name)
    }

    /// Register a community, rejecting duplicate names.
    pub fn insert(&mut self, community: Community) -> Result<(), CommunityError> {
        if self.communities.contains_key(community.name()) {
            return Err(CommunityError::DuplicateCommunity {
                name: community.name().to_owned(),
            });
        }
        self.communities
            .insert(community.name().to_owned(), community);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&Community, CommunityError> {
        self.communities
            .get(name)
            .ok_or_else(|| CommunityError::CommunityNotFound {
                name: name.to_owned(),
            })
    }

    pub fn lookup_mut(&mut self, name: &str) -> Result<&mut Community, CommunityError> {
        self.communities
            .get_mut(name)
            .ok_or_else(|| CommunityError::CommunityNotFound {
                name: name.to_owned(),
            })
    }

    pub fn remove(&mut self, name: &str) -> Option<Community> {
        self.communities.remove(name)
    }

    pub fn values(&self) -> impl Iterator<Item = &Community> {
        self.communities.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Community> {
        self.communities.values_mut()
    }

    pub fn len(&self) -> usize {
        self.communities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    pub fn clear(&mut self) {
        self.communities.clear();
    }
}
