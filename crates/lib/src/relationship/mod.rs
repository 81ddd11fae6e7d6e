//! Relationship graph: per-identity relation sets and the transitions between them.
//!
//! Each [`Identity`](crate::identity::Identity) owns one [`Relationships`] record with six
//! insertion-ordered sets of logins. The pairwise operations in this module implement the
//! transition rules: friendship goes through a pending request on the target's side before it
//! becomes mutual, admiration writes both an idol and a fan entry, crushes are one-directional
//! until both sides hold one, and enmity is declared unilaterally but blocks every positive
//! relation toward the declaring side.
//!
//! Check ordering is part of the contract: name resolution fails first, then enmity, then
//! self-reference, then duplicate/pending state. All checks precede all mutations, so a failed
//! operation leaves both identities untouched. The pairwise functions take two distinct
//! identities; self-targeting is rejected by the caller before the disjoint borrow is taken,
//! which is observationally equivalent to checking it here because no reachable state has an
//! identity in its own enemy set.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::identity::Identity;

pub mod errors;

pub use errors::RelationshipError;

/// The relation kinds an identity can hold toward another.
///
/// Used in error payloads to name the set an operation was touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Friend,
    Idol,
    Fan,
    Crush,
    Enemy,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Relation::Friend => "a friend",
            Relation::Idol => "an idol",
            Relation::Fan => "a fan",
            Relation::Crush => "a crush",
            Relation::Enemy => "an enemy",
        };
        f.write_str(name)
    }
}

/// Outcome of recording a crush: either one more one-directional entry, or the
/// discovery that the interest is mutual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrushOutcome {
    Recorded,
    Mutual,
}

/// The six relation sets owned by one identity.
///
/// `friends` is symmetric once established. `incoming_requests` holds the logins that
/// requested friendship with the owner and are awaiting acceptance. `idols` and `fans` are
/// the two independently-owned sides of one conceptual admiration edge. `crushes` and
/// `enemies` are one-directional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Relationships {
    #[serde(default)]
    friends: IndexSet<String>,
    #[serde(default)]
    incoming_requests: IndexSet<String>,
    #[serde(default)]
    idols: IndexSet<String>,
    #[serde(default)]
    fans: IndexSet<String>,
    #[serde(default)]
    crushes: IndexSet<String>,
    #[serde(default)]
    enemies: IndexSet<String>,
}

impl Relationships {
    /// Create an empty relationship record.
    pub fn new() -> Self {
        Self::default()
    }

    // === Membership predicates (never fail) ===

    /// Whether `other` is an established friend of the owner.
    pub fn is_friend(&self, other: &str) -> bool {
        self.friends.contains(other)
    }

    /// Whether `other` has an unanswered friend request pending with the owner.
    pub fn has_incoming_request(&self, other: &str) -> bool {
        self.incoming_requests.contains(other)
    }

    /// Whether the owner admires `other`, i.e. `other` is among the owner's idols.
    pub fn is_fan_of(&self, other: &str) -> bool {
        self.idols.contains(other)
    }

    /// Whether the owner holds a crush on `other`.
    pub fn has_crush_on(&self, other: &str) -> bool {
        self.crushes.contains(other)
    }

    /// Whether the owner has declared `other` an enemy.
    pub fn is_enemy(&self, other: &str) -> bool {
        self.enemies.contains(other)
    }

    // === Set accessors ===

    pub fn friends(&self) -> &IndexSet<String> {
        &self.friends
    }

    pub fn incoming_requests(&self) -> &IndexSet<String> {
        &self.incoming_requests
    }

    pub fn idols(&self) -> &IndexSet<String> {
        &self.idols
    }

    pub fn fans(&self) -> &IndexSet<String> {
        &self.fans
    }

    pub fn crushes(&self) -> &IndexSet<String> {
        &self.crushes
    }

    pub fn enemies(&self) -> &IndexSet<String> {
        &self.enemies
    }

    // === Guarded insertions ===

    /// Record an inbound friend request from `login`.
    ///
    /// The caller's state machine guarantees no duplicate can reach this point: a second
    /// request from the same login fails with [`RelationshipError::RequestPending`] before
    /// any mutation.
    pub(crate) fn push_incoming_request(&mut self, login: &str) {
        self.incoming_requests.insert(login.to_owned());
    }

    /// Promote `login` to an established friend, clearing its pending request if present.
    pub(crate) fn confirm_friend(&mut self, login: &str) {
        self.incoming_requests.shift_remove(login);
        self.friends.insert(login.to_owned());
    }

    /// Insert into the idol set, rejecting duplicates.
    pub(crate) fn insert_idol(&mut self, login: &str) -> Result<(), RelationshipError> {
        if !self.idols.insert(login.to_owned()) {
            return Err(RelationshipError::DuplicateRelation {
                relation: Relation::Idol,
            });
        }
        Ok(())
    }

    /// Insert into the fan set, rejecting duplicates.
    pub(crate) fn insert_fan(&mut self, login: &str) -> Result<(), RelationshipError> {
        if !self.fans.insert(login.to_owned()) {
            return Err(RelationshipError::DuplicateRelation {
                relation: Relation::Fan,
            });
        }
        Ok(())
    }

    /// Insert into the crush set.
    ///
    /// Unlike every other relation, a duplicate crush is a silent no-op rather than an
    /// error. The asymmetry is a behavioral contract of the reference system, kept on
    /// purpose (see DESIGN.md).
    pub(crate) fn insert_crush(&mut self, login: &str) {
        self.crushes.insert(login.to_owned());
    }

    /// Insert into the enemy set, rejecting duplicates.
    pub(crate) fn insert_enemy(&mut self, login: &str) -> Result<(), RelationshipError> {
        if !self.enemies.insert(login.to_owned()) {
            return Err(RelationshipError::DuplicateRelation {
                relation: Relation::Enemy,
            });
        }
        Ok(())
    }
}

/// Fail with [`RelationshipError::EnemyTarget`] if `target` has declared `actor` an enemy.
///
/// Enmity is always checked from the target's perspective: a declared enemy unilaterally
/// blocks every positive relation in either direction.
fn ensure_not_enemy(actor: &Identity, target: &Identity) -> Result<(), RelationshipError> {
    if target.relationships().is_enemy(actor.login()) {
        return Err(RelationshipError::EnemyTarget {
            name: target.name().to_owned(),
        });
    }
    Ok(())
}

/// Request, or confirm, friendship between `user` and `other`.
///
/// If `other` had already requested `user`, the pending entry is consumed and the
/// friendship becomes mutual in one step. A repeated request while the first is still
/// pending fails with [`RelationshipError::RequestPending`]; requesting an established
/// friend fails with [`RelationshipError::DuplicateRelation`]. Otherwise a new pending
/// request is recorded on `other`'s side.
pub fn add_friend(user: &mut Identity, other: &mut Identity) -> Result<(), RelationshipError> {
    debug_assert_ne!(user.login(), other.login());
    ensure_not_enemy(user, other)?;

    if user.relationships().has_incoming_request(other.login()) {
        // `other` asked first; this call is the acceptance.
        let other_login = other.login().to_owned();
        let user_login = user.login().to_owned();
        user.relationships_mut().confirm_friend(&other_login);
        other.relationships_mut().confirm_friend(&user_login);
        return Ok(());
    }
    if other.relationships().has_incoming_request(user.login()) {
        return Err(RelationshipError::RequestPending {
            login: other.login().to_owned(),
        });
    }
    if user.relationships().is_friend(other.login()) {
        return Err(RelationshipError::DuplicateRelation {
            relation: Relation::Friend,
        });
    }

    let user_login = user.login().to_owned();
    other.relationships_mut().push_incoming_request(&user_login);
    Ok(())
}

/// Record a crush held by `user` on `other`.
///
/// Returns [`CrushOutcome::Mutual`] when `other` already holds a crush on `user`; the
/// session layer turns that into a notification in both personal inboxes.
pub fn add_crush(user: &mut Identity, other: &Identity) -> Result<CrushOutcome, RelationshipError> {
    debug_assert_ne!(user.login(), other.login());
    ensure_not_enemy(user, other)?;

    let mutual = other.relationships().has_crush_on(user.login());
    let other_login = other.login().to_owned();
    user.relationships_mut().insert_crush(&other_login);
    Ok(if mutual {
        CrushOutcome::Mutual
    } else {
        CrushOutcome::Recorded
    })
}

/// Record that `user` admires `other`: `other` joins `user`'s idols and `user` joins
/// `other`'s fans. Each side rejects duplicates.
pub fn add_idol(user: &mut Identity, other: &mut Identity) -> Result<(), RelationshipError> {
    debug_assert_ne!(user.login(), other.login());
    ensure_not_enemy(user, other)?;

    let other_login = other.login().to_owned();
    let user_login = user.login().to_owned();
    user.relationships_mut().insert_idol(&other_login)?;
    other.relationships_mut().insert_fan(&user_login)?;
    Ok(())
}

/// Declare `enemy_login` an enemy of `user`. One-sided; the target is not informed and
/// holds no mirror entry.
pub fn add_enemy(user: &mut Identity, enemy_login: &str) -> Result<(), RelationshipError> {
    debug_assert_ne!(user.login(), enemy_login);
    user.relationships_mut().insert_enemy(enemy_login)
}
