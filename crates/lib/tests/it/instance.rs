//! Accounts, sessions, profile editing, the deletion cascade and persistence round trips.

use sodality::Instance;
use sodality::backend::JsonFile;

use crate::helpers::{instance_with_users, session, test_instance, trio};

#[test]
fn accounts_register_once_and_authenticate_by_equality() {
    let mut instance = test_instance();
    instance.create_user("ana", "secret", "Ana Lima").unwrap();

    assert!(instance.create_user("ana", "other", "Impostor").unwrap_err().is_duplicate());
    assert!(instance.create_user("", "pw", "Nameless").unwrap_err().is_invalid_credentials());
    assert!(instance.create_user("dora", "", "Dora").unwrap_err().is_invalid_credentials());

    assert!(instance.open_session("ana", "secret").is_ok());
    assert!(instance.open_session("ana", "SECRET").unwrap_err().is_invalid_credentials());
    assert!(instance.open_session("ghost", "secret").unwrap_err().is_invalid_credentials());
}

#[test]
fn attribute_lookups_check_fields_before_the_bag() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");

    assert_eq!(instance.user_attribute("ana", "name").unwrap(), "Ana Lima");
    assert_eq!(instance.user_attribute("ana", "login").unwrap(), "ana");

    instance.edit_profile(&ana, "city", "Maceió").unwrap();
    assert_eq!(instance.user_attribute("ana", "city").unwrap(), "Maceió");

    let err = instance.user_attribute("ana", "hobby").unwrap_err();
    assert!(err.is_invalid_credentials());
}

#[test]
fn login_renames_keep_the_network_consistent() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");

    instance.edit_profile(&ana, "login", "ana.silva").unwrap();

    assert!(instance.lookup_user("ana").unwrap_err().is_not_found());
    assert!(instance.lookup_user("ana.silva").is_ok());
    // The session follows the identity through the rename.
    instance.edit_profile(&ana, "name", "Ana Silva").unwrap();
    assert_eq!(instance.user_attribute("ana.silva", "name").unwrap(), "Ana Silva");
    // And a fresh session opens under the new login only.
    assert!(instance.open_session("ana", "secret").unwrap_err().is_invalid_credentials());
    assert!(instance.open_session("ana.silva", "secret").is_ok());
}

#[test]
fn deleting_a_manager_account_cascades() {
    let mut instance = trio();
    let ana = session(&mut instance, "ana", "secret");
    let bruno = session(&mut instance, "bruno", "hunter2");
    let clara = session(&mut instance, "clara", "pw");

    instance.create_community(&ana, "rustaceans", "crab people").unwrap();
    instance.join_community(&bruno, "rustaceans").unwrap();
    instance.join_community(&clara, "rustaceans").unwrap();
    instance.create_community(&bruno, "book-club", "we read").unwrap();
    instance.join_community(&ana, "book-club").unwrap();
    instance.send_message(&ana, "clara", "from ana").unwrap();
    instance.send_message(&bruno, "clara", "from bruno").unwrap();

    instance.delete_account(&ana).unwrap();

    // The managed community is gone everywhere.
    assert!(instance.lookup_community("rustaceans").unwrap_err().is_not_found());
    assert_eq!(instance.communities_of("bruno").unwrap(), "{book-club}");
    assert_eq!(instance.communities_of("clara").unwrap(), "{}");
    // The community ana merely joined survives, without her on the roster.
    assert_eq!(instance.community_members("book-club").unwrap(), "{bruno}");
    // Only ana's authored messages disappeared from personal inboxes.
    assert_eq!(instance.read_message(&clara).unwrap(), "from bruno");
    assert!(instance.read_message(&clara).unwrap_err().is_not_found());
    // Broadcasting to the surviving community still works for every member.
    instance.post_to_community(&bruno, "book-club", "still here").unwrap();
    assert_eq!(instance.read_community_message(&bruno).unwrap(), "still here");
}

#[test]
fn snapshot_round_trip_reproduces_the_network() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sodality.json");

    {
        let mut instance = Instance::open(Box::new(JsonFile::new(&path)));
        instance.create_user("ana", "secret", "Ana Lima").unwrap();
        instance.create_user("bruno", "hunter2", "Bruno Reis").unwrap();
        instance.create_user("clara", "pw", "Clara Nunes").unwrap();

        let ana = session(&mut instance, "ana", "secret");
        let bruno = session(&mut instance, "bruno", "hunter2");

        instance.edit_profile(&ana, "city", "Maceió").unwrap();
        instance.add_friend(&ana, "bruno").unwrap();
        instance.add_friend(&bruno, "ana").unwrap();
        instance.add_idol(&ana, "clara").unwrap();
        instance.add_crush(&ana, "bruno").unwrap();
        instance.add_enemy(&bruno, "clara").unwrap();
        instance.create_community(&ana, "rustaceans", "crab people").unwrap();
        instance.join_community(&bruno, "rustaceans").unwrap();
        instance.send_message(&bruno, "ana", "first").unwrap();
        instance.send_message(&bruno, "ana", "second").unwrap();
        instance.post_to_community(&ana, "rustaceans", "welcome").unwrap();

        instance.save().unwrap();
    }

    let mut restored = Instance::open(Box::new(JsonFile::new(&path)));

    // Relationship sets survived.
    assert!(restored.is_friend("ana", "bruno").unwrap());
    assert!(restored.is_friend("bruno", "ana").unwrap());
    assert!(restored.is_fan("ana", "clara").unwrap());
    assert_eq!(restored.fan_list("clara").unwrap(), "{ana}");
    assert!(restored.is_enemy("bruno", "clara").unwrap());
    // Profile state survived.
    assert_eq!(restored.user_attribute("ana", "city").unwrap(), "Maceió");
    // Membership and community metadata survived.
    assert_eq!(restored.community_members("rustaceans").unwrap(), "{ana,bruno}");
    assert_eq!(restored.community_manager("rustaceans").unwrap(), "ana");
    // Sessions are ephemeral: log in again on the restored instance.
    let ana = session(&mut restored, "ana", "secret");
    assert!(restored.is_crush(&ana, "bruno").unwrap());
    // Inbox contents and order survived.
    assert_eq!(restored.read_message(&ana).unwrap(), "first");
    assert_eq!(restored.read_message(&ana).unwrap(), "second");
    assert_eq!(restored.read_community_message(&ana).unwrap(), "welcome");
}

#[test]
fn a_corrupt_snapshot_loads_as_the_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sodality.json");
    std::fs::write(&path, "this is not json").unwrap();

    let instance = Instance::open(Box::new(JsonFile::new(&path)));
    assert!(instance.lookup_user("ana").unwrap_err().is_not_found());
}

#[test]
fn reset_clears_memory_and_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sodality.json");

    let mut instance = Instance::open(Box::new(JsonFile::new(&path)));
    instance.create_user("ana", "secret", "Ana Lima").unwrap();
    instance.save().unwrap();
    assert!(path.exists());

    instance.reset().unwrap();
    assert!(!path.exists());
    assert!(instance.lookup_user("ana").unwrap_err().is_not_found());

    // A reopened instance starts empty.
    let reopened = Instance::open(Box::new(JsonFile::new(&path)));
    assert!(reopened.lookup_user("ana").unwrap_err().is_not_found());
}

#[test]
fn stale_sessions_survive_deletion_but_resolve_nothing() {
    let mut instance = instance_with_users(&[
        ("ana", "secret", "Ana Lima"),
        ("bruno", "hunter2", "Bruno Reis"),
    ]);
    let ana = session(&mut instance, "ana", "secret");

    instance.delete_account(&ana).unwrap();

    assert!(instance.lookup_session(&ana).is_ok());
    assert!(instance.add_friend(&ana, "bruno").unwrap_err().is_not_found());
    assert!(instance.read_message(&ana).unwrap_err().is_not_found());
}
