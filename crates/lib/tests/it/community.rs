//! Community lifecycle and membership through the public instance surface.

use crate::helpers::{session, trio};

#[test]
fn creator_becomes_manager_and_first_member() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");

    instance.create_community(&ana, "rustaceans", "crab people").unwrap();

    assert_eq!(instance.community_manager("rustaceans").unwrap(), "ana");
    assert_eq!(instance.community_description("rustaceans").unwrap(), "crab people");
    assert_eq!(instance.community_members("rustaceans").unwrap(), "{ana}");
    assert_eq!(instance.communities_of("ana").unwrap(), "{rustaceans}");
}

#[test]
fn members_join_in_order() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");
    let bruno = session(&mut instance, "bruno", "hunter2");
    let clara = session(&mut instance, "clara", "pw");

    instance.create_community(&ana, "rustaceans", "crab people").unwrap();
    instance.join_community(&clara, "rustaceans").unwrap();
    instance.join_community(&bruno, "rustaceans").unwrap();

    assert_eq!(instance.community_members("rustaceans").unwrap(), "{ana,clara,bruno}");
}

#[test]
fn duplicate_names_and_joins_are_rejected() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");
    let bruno = session(&mut instance, "bruno", "hunter2");

    instance.create_community(&ana, "rustaceans", "crab people").unwrap();

    let err = instance.create_community(&bruno, "rustaceans", "a second one").unwrap_err();
    assert!(err.is_duplicate());

    instance.join_community(&bruno, "rustaceans").unwrap();
    let err = instance.join_community(&bruno, "rustaceans").unwrap_err();
    assert!(err.is_duplicate());
}

#[test]
fn one_identity_can_run_several_communities() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");

    instance.create_community(&ana, "rustaceans", "crab people").unwrap();
    instance.create_community(&ana, "book-club", "we read").unwrap();

    assert_eq!(instance.communities_of("ana").unwrap(), "{rustaceans,book-club}");
    assert_eq!(instance.community_manager("book-club").unwrap(), "ana");
}

#[test]
fn community_queries_on_unknown_names_fail() {
    let instance = trio();

    assert!(instance.community_description("ghost-town").unwrap_err().is_not_found());
    assert!(instance.community_manager("ghost-town").unwrap_err().is_not_found());
    assert!(instance.community_members("ghost-town").unwrap_err().is_not_found());
}
