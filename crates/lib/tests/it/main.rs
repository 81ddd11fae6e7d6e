/*! Integration tests for Sodality.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - relationship: The friend/idol/crush/enemy state machine through the instance surface
 * - messaging: Direct and broadcast delivery, inbox reads
 * - community: Community lifecycle and membership
 * - instance: Accounts, sessions, profile editing, the deletion cascade and persistence round trips
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("sodality=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod community;
mod helpers;
mod instance;
mod messaging;
