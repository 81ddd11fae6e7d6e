//! Messaging router: polymorphic delivery of messages to identities and communities.
//!
//! A [`Message`] is an immutable `(sender, body)` pair. Delivery is polymorphic over the
//! [`Delivery`] capability with two stateless implementers: [`DirectMessage`] puts one copy
//! into a single identity's personal inbox after the interpersonal checks, and
//! [`CommunityBroadcast`] fans one message out to every member's community inbox with no
//! interpersonal blocking. The caller selects the variant explicitly per invocation; nothing
//! holds a delivery strategy as state.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::community::CommunityTable;
use crate::identity::IdentityTable;

pub mod errors;

pub use errors::MessagingError;

/// Sender login used for system-authored notices (e.g. mutual-crush notifications).
pub const SYSTEM_SENDER: &str = "sodality";

/// An immutable message: who sent it and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    sender: String,
    body: String,
}

impl Message {
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume the message, keeping only the body text.
    pub fn into_body(self) -> String {
        self.body
    }
}

/// Mutable view of the tables a delivery may touch.
///
/// The identity table is borrowed mutably (inboxes change); the community table is only
/// read, for member resolution.
pub struct DeliveryContext<'a> {
    pub identities: &'a mut IdentityTable,
    pub communities: &'a CommunityTable,
}

/// Capability for delivering one message to one receiver name.
///
/// Implementers interpret `receiver` their own way: a login for direct delivery, a
/// community name for broadcast.
pub trait Delivery {
    fn deliver(
        &self,
        ctx: &mut DeliveryContext<'_>,
        body: &str,
        sender: &str,
        receiver: &str,
    ) -> Result<()>;
}

/// Direct delivery into one identity's personal inbox.
///
/// Fails with [`MessagingError::SelfMessage`] on self-targeting and with
/// [`MessagingError::EnemyReceiver`] when the receiver has declared the sender an enemy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectMessage;

impl Delivery for DirectMessage {
    fn deliver(
        &self,
        ctx: &mut DeliveryContext<'_>,
        body: &str,
        sender: &str,
        receiver: &str,
    ) -> Result<()> {
        let receiver_identity = ctx.identities.lookup(receiver)?;
        if sender == receiver {
            return Err(MessagingError::SelfMessage.into());
        }
        if receiver_identity.relationships().is_enemy(sender) {
            return Err(MessagingError::EnemyReceiver {
                name: receiver_identity.name().to_owned(),
            }
            .into());
        }
        ctx.identities
            .lookup_mut(receiver)?
            .push_message(Message::new(sender, body));
        Ok(())
    }
}

/// Broadcast into the community inboxes of every member, the sender included if a member.
///
/// One message is constructed and copied per member. No enmity or self-target check is
/// applied; broadcast bypasses interpersonal blocking. Every member is resolved before
/// the first inbox is touched, so a dangling roster entry aborts the fan-out with no
/// partial delivery.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommunityBroadcast;

impl Delivery for CommunityBroadcast {
    fn deliver(
        &self,
        ctx: &mut DeliveryContext<'_>,
        body: &str,
        sender: &str,
        receiver: &str,
    ) -> Result<()> {
        let community = ctx.communities.lookup(receiver)?;
        let message = Message::new(sender, body);
        for member in community.members() {
            ctx.identities.lookup(member)?;
        }
        for member in community.members() {
            ctx.identities
                .lookup_mut(member)?
                .push_community_message(message.clone());
        }
        Ok(())
    }
}
