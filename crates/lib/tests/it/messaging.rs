//! Direct and broadcast delivery through the public instance surface.

use sodality::messaging::{CommunityBroadcast, DirectMessage};

use crate::helpers::{session, trio};

#[test]
fn direct_messages_arrive_in_send_order() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");
    let bruno = session(&mut instance, "bruno", "hunter2");

    instance.send_message(&ana, "bruno", "hello").unwrap();
    instance.send_message(&ana, "bruno", "still there?").unwrap();

    assert_eq!(instance.read_message(&bruno).unwrap(), "hello");
    assert_eq!(instance.read_message(&bruno).unwrap(), "still there?");
    assert!(instance.read_message(&bruno).unwrap_err().is_not_found());
}

#[test]
fn messaging_yourself_is_rejected_even_without_enmity() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");

    let err = instance.send_message(&ana, "ana", "note to self").unwrap_err();
    assert!(err.is_self_reference());
}

#[test]
fn direct_messages_to_enemies_are_rejected() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");
    let bruno = session(&mut instance, "bruno", "hunter2");

    instance.add_enemy(&bruno, "ana").unwrap();
    let err = instance.send_message(&ana, "bruno", "truce?").unwrap_err();
    assert!(err.is_enmity_conflict());
    assert!(instance.read_message(&bruno).unwrap_err().is_not_found());
}

#[test]
fn broadcast_reaches_every_member_with_the_same_message() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");
    let bruno = session(&mut instance, "bruno", "hunter2");
    let clara = session(&mut instance, "clara", "pw");

    instance.create_community(&ana, "rustaceans", "crab people").unwrap();
    instance.join_community(&bruno, "rustaceans").unwrap();
    instance.join_community(&clara, "rustaceans").unwrap();

    instance.post_to_community(&ana, "rustaceans", "meeting at noon").unwrap();

    // Every member, the sender included, received exactly one copy.
    for s in [&ana, &bruno, &clara] {
        assert_eq!(instance.read_community_message(s).unwrap(), "meeting at noon");
        assert!(instance.read_community_message(s).unwrap_err().is_not_found());
    }
}

#[test]
fn broadcast_bypasses_interpersonal_blocking() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");
    let bruno = session(&mut instance, "bruno", "hunter2");

    instance.add_enemy(&bruno, "ana").unwrap();
    instance.create_community(&ana, "rustaceans", "crab people").unwrap();
    instance.join_community(&bruno, "rustaceans").unwrap();

    instance.post_to_community(&ana, "rustaceans", "hello all").unwrap();
    assert_eq!(instance.read_community_message(&bruno).unwrap(), "hello all");
}

#[test]
fn broadcast_and_direct_inboxes_never_mix() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");
    let bruno = session(&mut instance, "bruno", "hunter2");

    instance.create_community(&ana, "rustaceans", "crab people").unwrap();
    instance.join_community(&bruno, "rustaceans").unwrap();

    instance.send_message(&ana, "bruno", "psst").unwrap();
    instance.post_to_community(&ana, "rustaceans", "announcement").unwrap();

    assert_eq!(instance.read_message(&bruno).unwrap(), "psst");
    assert!(instance.read_message(&bruno).unwrap_err().is_not_found());
    assert_eq!(instance.read_community_message(&bruno).unwrap(), "announcement");
}

#[test]
fn the_delivery_strategy_is_chosen_per_invocation() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");
    let bruno = session(&mut instance, "bruno", "hunter2");

    instance.create_community(&bruno, "book-club", "we read").unwrap();

    // Same entry point, different capability per call.
    instance.deliver(&DirectMessage, &ana, "bruno", "direct").unwrap();
    instance.deliver(&CommunityBroadcast, &bruno, "book-club", "fanout").unwrap();

    assert_eq!(instance.read_message(&bruno).unwrap(), "direct");
    assert_eq!(instance.read_community_message(&bruno).unwrap(), "fanout");
}

#[test]
fn posting_to_an_unknown_community_is_rejected() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");

    let err = instance.post_to_community(&ana, "ghost-town", "anyone?").unwrap_err();
    assert!(err.is_not_found());
}
