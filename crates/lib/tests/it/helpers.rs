//! Shared helpers for the integration suite.

use sodality::Instance;
use sodality::backend::InMemory;

/// A fresh instance with no persisted state.
pub fn test_instance() -> Instance {
    Instance::open(Box::new(InMemory::new()))
}

/// A fresh instance with the given `(login, password, name)` users registered.
pub fn instance_with_users(users: &[(&str, &str, &str)]) -> Instance {
    let mut instance = test_instance();
    for (login, password, name) in users {
        instance
            .create_user(login, password, name)
            .expect("test user should register");
    }
    instance
}

/// The three users most tests start from.
pub fn trio() -> Instance {
    instance_with_users(&[
        ("ana", "secret", "Ana Lima"),
        ("bruno", "hunter2", "Bruno Reis"),
        ("clara", "pw", "Clara Nunes"),
    ])
}

/// Open a session, panicking on bad credentials.
pub fn session(instance: &mut Instance, login: &str, password: &str) -> String {
    instance
        .open_session(login, password)
        .expect("test login should succeed")
}
