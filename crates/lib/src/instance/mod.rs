//! The system context: identity, session and community tables plus the command surface.
//!
//! `Instance` is an explicit context object constructed once by the process entry point;
//! there is no ambient global. It owns the three tables and the persistence backend, and
//! every operation of the command surface is a method on it: account registration and
//! session issuance, profile editing, the relationship mutations, community creation and
//! membership, message delivery and inbox reads, the account-deletion cascade, and
//! snapshot load/save.
//!
//! Every operation is synchronous, runs to completion against the in-memory maps, and
//! either returns a value or fails with one named error before any mutation took place.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::{Backend, Snapshot};
use crate::community::{Community, CommunityError, CommunityTable};
use crate::identity::{Identity, IdentityError, IdentityTable};
use crate::messaging::{
    CommunityBroadcast, Delivery, DeliveryContext, DirectMessage, Message, MessagingError,
    SYSTEM_SENDER,
};
use crate::relationship::{self, CrushOutcome, Relation, RelationshipError};
use crate::render::braced_list;
use crate::session::{Session, SessionError, SessionTable};
use crate::{Clock, Result, SystemClock};


/// The in-memory social network: all tables, the persistence backend and the clock.
///
/// ## Example
///
/// ```
/// # use sodality::{Instance, backend::InMemory};
/// # fn main() -> sodality::Result<()> {
/// let mut instance = Instance::open(Box::new(InMemory::new()));
///
/// instance.create_user("ana", "secret", "Ana Lima")?;
/// instance.create_user("bruno", "hunter2", "Bruno Reis")?;
///
/// let session = instance.open_session("ana", "secret")?;
/// instance.add_friend(&session, "bruno")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Instance {
    identities: IdentityTable,
    communities: CommunityTable,
    sessions: SessionTable,
    backend: Box<dyn Backend>,
    clock: Arc<dyn Clock>,
}

impl Instance {
    /// Load an instance from the backend's persisted snapshot.
    ///
    /// A failed load is reported and yields the empty initial state; it never aborts the
    /// process. Duplicate logins or community names inside a snapshot are reported and
    /// skipped.
    pub fn open(backend: Box<dyn Backend>) -> Self {
        Self::open_impl(backend, Arc::new(SystemClock))
    }

    /// Same as [`Instance::open`] but with an injected clock, for controllable session
    /// instants in tests.
    ///
    /// Only available with the `testing` feature or in test builds.
    #[cfg(any(test, feature = "testing"))]
    pub fn open_with_clock(backend: Box<dyn Backend>, clock: Arc<dyn Clock>) -> Self {
        Self::open_impl(backend, clock)
    }

    fn open_impl(mut backend: Box<dyn Backend>, clock: Arc<dyn Clock>) -> Self {
        let snapshot = match backend.load_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("failed to load snapshot: {e:?}; starting from empty state");
                Snapshot::default()
            }
        };

        let mut identities = IdentityTable::new();
        for identity in snapshot.identities {
            let login = identity.login().to_owned();
            if identities.insert(identity).is_err() {
                warn!(%login, "snapshot holds a duplicate login; entry skipped");
            }
        }
        let mut communities = CommunityTable::new();
        for community in snapshot.communities {
            let name = community.name().to_owned();
            if communities.insert(community).is_err() {
                warn!(%name, "snapshot holds a duplicate community; entry skipped");
            }
        }
        info!(
            users = identities.len(),
            communities = communities.len(),
            "instance opened"
        );

        Self {
            identities,
            communities,
            sessions: SessionTable::new(),
            backend,
            clock,
        }
    }

    /// Persist the full current state through the backend.
    ///
    /// A failed save leaves the in-memory state unaffected; the error is returned for
    /// the caller to report.
    pub fn save(&mut self) -> Result<()> {
        let snapshot = Snapshot {
            identities: self.identities.values().cloned().collect(),
            communities: self.communities.values().cloned().collect(),
        };
        self.backend.save_snapshot(&snapshot)?;
        info!(
            users = snapshot.identities.len(),
            communities = snapshot.communities.len(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Drop all in-memory state and the persisted snapshot.
    pub fn reset(&mut self) -> Result<()> {
        self.identities.clear();
        self.communities.clear();
        self.sessions.clear();
        self.backend.clear()?;
        info!("instance reset");
        Ok(())
    }

    // === Accounts and sessions ===

    /// Register a new identity.
    pub fn create_user(&mut self, login: &str, password: &str, name: &str) -> Result<()> {
        if self.identities.contains(login) {
            return Err(IdentityError::DuplicateUser {
                login: login.to_owned(),
            }
            .into());
        }
        if login.is_empty() {
            return Err(IdentityError::InvalidLogin.into());
        }
        if password.is_empty() {
            return Err(IdentityError::InvalidPassword.into());
        }
        self.identities.insert(Identity::new(login, password, name))?;
        debug!(%login, "user registered");
        Ok(())
    }

    /// Authenticate and mint a session, returning its id.
    pub fn open_session(&mut self, login: &str, password: &str) -> Result<String> {
        let authenticated = self
            .identities
            .lookup(login)
            .map(|identity| identity.verify_password(password))
            .unwrap_or(false);
        if !authenticated {
            return Err(SessionError::InvalidCredentials.into());
        }
        let id = self.sessions.open(login, self.clock.as_ref());
        debug!(%login, session = %id, "session opened");
        Ok(id)
    }

    pub fn lookup_user(&self, login: &str) -> Result<&Identity> {
        Ok(self.identities.lookup(login)?)
    }

    pub fn lookup_session(&self, id: &str) -> Result<&Session> {
        Ok(self.sessions.lookup(id)?)
    }

    pub fn lookup_community(&self, name: &str) -> Result<&Community> {
        Ok(self.communities.lookup(name)?)
    }

    /// Resolve a session id to its bound login.
    fn session_login(&self, session_id: &str) -> Result<String> {
        Ok(self.sessions.lookup(session_id)?.login().to_owned())
    }

    /// Delete the account bound to `session_id` and cascade.
    ///
    /// Every community the identity managed is removed outright (no reassignment), its
    /// name is pruned from every remaining identity's membership list, the deleted login
    /// is pruned from surviving rosters, and every personal-inbox message it authored is
    /// dropped. Community inboxes, other identities' relationship sets and outstanding
    /// sessions are left untouched.
    pub fn delete_account(&mut self, session_id: &str) -> Result<()> {
        let login = self.session_login(session_id)?;
        self.identities
            .remove(&login)
            .ok_or_else(|| IdentityError::UserNotFound {
                login: login.clone(),
            })?;

        let deleted: Vec<String> = self
            .communities
            .values()
            .filter(|community| community.manager() == login)
            .map(|community| community.name().to_owned())
            .collect();
        for name in &deleted {
            self.communities.remove(name);
        }
        for community in self.communities.values_mut() {
            community.remove_member(&login);
        }
        for identity in self.identities.values_mut() {
            for name in &deleted {
                identity.leave_community(name);
            }
            identity.remove_messages_from(&login);
        }
        info!(%login, communities = deleted.len(), "account deleted");
        Ok(())
    }

    // === Profile ===

    /// Edit a profile attribute of the session's identity.
    ///
    /// `"name"` and `"password"` set the core fields; `"login"` re-keys the identity
    /// table (failing with [`IdentityError::LoginTaken`] when the new login is
    /// registered) and follows through to every open session of the identity; any other
    /// key stores an extra attribute, overwriting a previous value.
    pub fn edit_profile(&mut self, session_id: &str, attribute: &str, value: &str) -> Result<()> {
        let login = self.session_login(session_id)?;
        if attribute == "login" {
            self.identities.rename(&login, value)?;
            self.sessions.rebind(&login, value);
            debug!(old = %login, new = %value, "login renamed");
        } else {
            self.identities
                .lookup_mut(&login)?
                .set_attribute(attribute, value);
        }
        Ok(())
    }

    /// Look up a profile attribute of any registered identity.
    pub fn user_attribute(&self, login: &str, attribute: &str) -> Result<String> {
        Ok(self.identities.lookup(login)?.attribute(attribute)?.to_owned())
    }

    // === Relationships ===

    /// Resolve the acting identity and the target for a pairwise relationship mutation.
    ///
    /// Resolution failures come first; self-targeting is rejected before the disjoint
    /// borrow is taken (see the module docs of [`relationship`] for why this ordering is
    /// observationally equivalent to the enmity-first contract).
    fn relation_pair(
        &mut self,
        session_id: &str,
        other_login: &str,
        relation: Relation,
    ) -> Result<(&mut Identity, &mut Identity)> {
        let login = self.session_login(session_id)?;
        self.identities.lookup(other_login)?;
        if login == other_login {
            return Err(RelationshipError::SelfRelation { relation }.into());
        }
        Ok(self.identities.pair_mut(&login, other_login)?)
    }

    /// Request friendship with `other_login`, or accept their pending request.
    pub fn add_friend(&mut self, session_id: &str, other_login: &str) -> Result<()> {
        let (user, other) = self.relation_pair(session_id, other_login, Relation::Friend)?;
        relationship::add_friend(user, other)?;
        debug!(user = %user.login(), other = %other_login, "friend operation applied");
        Ok(())
    }

    /// Record a crush on `other_login`. When the interest turns out to be mutual, both
    /// identities receive a system-authored note in their personal inbox.
    pub fn add_crush(&mut self, session_id: &str, other_login: &str) -> Result<()> {
        let (user, other) = self.relation_pair(session_id, other_login, Relation::Crush)?;
        if let CrushOutcome::Mutual = relationship::add_crush(user, other)? {
            let note_for_user = Message::new(
                SYSTEM_SENDER,
                format!("{} is your crush - a note from sodality", other.name()),
            );
            let note_for_other = Message::new(
                SYSTEM_SENDER,
                format!("{} is your crush - a note from sodality", user.name()),
            );
            user.push_message(note_for_user);
            other.push_message(note_for_other);
            debug!(user = %user.login(), other = %other_login, "mutual crush notified");
        }
        Ok(())
    }

    /// Record admiration for `other_login` (idol on one side, fan on the other).
    pub fn add_idol(&mut self, session_id: &str, other_login: &str) -> Result<()> {
        let (user, other) = self.relation_pair(session_id, other_login, Relation::Fan)?;
        relationship::add_idol(user, other)?;
        Ok(())
    }

    /// Declare `enemy_login` an enemy of the session's identity.
    pub fn add_enemy(&mut self, session_id: &str, enemy_login: &str) -> Result<()> {
        let login = self.session_login(session_id)?;
        self.identities.lookup(enemy_login)?;
        if login == enemy_login {
            return Err(RelationshipError::SelfRelation {
                relation: Relation::Enemy,
            }
            .into());
        }
        let user = self.identities.lookup_mut(&login)?;
        relationship::add_enemy(user, enemy_login)?;
        Ok(())
    }

    /// Whether `other` is an established friend of `login`.
    pub fn is_friend(&self, login: &str, other: &str) -> Result<bool> {
        Ok(self.identities.lookup(login)?.relationships().is_friend(other))
    }

    /// Whether `login` admires `idol`.
    pub fn is_fan(&self, login: &str, idol: &str) -> Result<bool> {
        Ok(self.identities.lookup(login)?.relationships().is_fan_of(idol))
    }

    /// Whether the session's identity holds a crush on `other`.
    pub fn is_crush(&self, session_id: &str, other: &str) -> Result<bool> {
        let login = self.session_login(session_id)?;
        Ok(self
            .identities
            .lookup(&login)?
            .relationships()
            .has_crush_on(other))
    }

    /// Whether `login` has declared `other` an enemy.
    pub fn is_enemy(&self, login: &str, other: &str) -> Result<bool> {
        Ok(self.identities.lookup(login)?.relationships().is_enemy(other))
    }

    /// Braced list of `login`'s friends, in insertion order.
    pub fn friend_list(&self, login: &str) -> Result<String> {
        Ok(braced_list(self.identities.lookup(login)?.relationships().friends()))
    }

    /// Braced list of `login`'s fans.
    pub fn fan_list(&self, login: &str) -> Result<String> {
        Ok(braced_list(self.identities.lookup(login)?.relationships().fans()))
    }

    /// Braced list of the session identity's crushes.
    pub fn crush_list(&self, session_id: &str) -> Result<String> {
        let login = self.session_login(session_id)?;
        Ok(braced_list(self.identities.lookup(&login)?.relationships().crushes()))
    }

    // === Communities ===

    /// Create a community managed by the session's identity, which also becomes its
    /// first member.
    pub fn create_community(
        &mut self,
        session_id: &str,
        name: &str,
        description: &str,
    ) -> Result<()> {
        if self.communities.contains(name) {
            return Err(CommunityError::DuplicateCommunity {
                name: name.to_owned(),
            }
            .into());
        }
        let login = self.session_login(session_id)?;
        let identity = self.identities.lookup_mut(&login)?;
        identity.join_community(name);

        let mut community = Community::new(name, description, &login);
        community.add_member(&login);
        self.communities.insert(community)?;
        debug!(%name, manager = %login, "community created");
        Ok(())
    }

    /// Enroll the session's identity in an existing community.
    pub fn join_community(&mut self, session_id: &str, name: &str) -> Result<()> {
        let login = self.session_login(session_id)?;
        self.communities.lookup(name)?;

        let identity = self.identities.lookup_mut(&login)?;
        if identity.communities().contains(name) {
            return Err(CommunityError::AlreadyMember {
                name: name.to_owned(),
            }
            .into());
        }
        identity.join_community(name);
        self.communities.lookup_mut(name)?.add_member(&login);
        Ok(())
    }

    pub fn community_description(&self, name: &str) -> Result<String> {
        Ok(self.communities.lookup(name)?.description().to_owned())
    }

    pub fn community_manager(&self, name: &str) -> Result<String> {
        Ok(self.communities.lookup(name)?.manager().to_owned())
    }

    /// Braced list of a community's members, in join order.
    pub fn community_members(&self, name: &str) -> Result<String> {
        Ok(braced_list(self.communities.lookup(name)?.members()))
    }

    /// Braced list of the communities `login` belongs to, in join order.
    pub fn communities_of(&self, login: &str) -> Result<String> {
        Ok(braced_list(self.identities.lookup(login)?.communities()))
    }

    // === Messaging ===

    /// Deliver one message through the given strategy. The caller picks the variant per
    /// invocation; the session holds no delivery state.
    pub fn deliver(
        &mut self,
        strategy: &dyn Delivery,
        session_id: &str,
        receiver: &str,
        body: &str,
    ) -> Result<()> {
        let sender = self.session_login(session_id)?;
        let mut ctx = DeliveryContext {
            identities: &mut self.identities,
            communities: &self.communities,
        };
        strategy.deliver(&mut ctx, body, &sender, receiver)
    }

    /// Send a direct message to another identity's personal inbox.
    pub fn send_message(&mut self, session_id: &str, receiver: &str, body: &str) -> Result<()> {
        self.deliver(&DirectMessage, session_id, receiver, body)
    }

    /// Broadcast a message to every member of a community.
    pub fn post_to_community(
        &mut self,
        session_id: &str,
        community: &str,
        body: &str,
    ) -> Result<()> {
        self.deliver(&CommunityBroadcast, session_id, community, body)
    }

    /// Dequeue the oldest personal message of the session's identity.
    pub fn read_message(&mut self, session_id: &str) -> Result<String> {
        let login = self.session_login(session_id)?;
        self.identities
            .lookup_mut(&login)?
            .pop_message()
            .map(Message::into_body)
            .ok_or_else(|| MessagingError::NoDirectMessages.into())
    }

    /// Dequeue the oldest community message of the session's identity.
    pub fn read_community_message(&mut self, session_id: &str) -> Result<String> {
        let login = self.session_login(session_id)?;
        self.identities
            .lookup_mut(&login)?
            .pop_community_message()
            .map(Message::into_body)
            .ok_or_else(|| MessagingError::NoCommunityMessages.into())
    }
}
