//! Behavioural tests for the directory-backed record store.
//!
//! These scenarios cover durability across reopening, idempotent removal, and
//! reporting of damaged records.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

mod test_support;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::{Value, json};
use test_support::{unique_store_root, write_raw_record};
use wall_store::{DirStore, KeyValueStore, RecordKey, StoreError};

#[derive(Default, ScenarioState)]
struct World {
    root: Slot<Utf8PathBuf>,
    read_result: Slot<Result<Option<Value>, StoreError>>,
}

impl World {
    fn root(&self) -> Utf8PathBuf {
        self.root.get().expect("store root should be set")
    }

    fn open_store(&self) -> DirStore {
        DirStore::open(&self.root()).expect("store opens")
    }
}

fn users_value() -> Value {
    json!([{"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "username": "ana"}])
}

fn key(name: &str) -> RecordKey {
    RecordKey::new(name).expect("valid key")
}

#[fixture]
fn world() -> World {
    World::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("an empty record directory")]
fn an_empty_record_directory(world: &World) {
    let root = unique_store_root("store-bdd").expect("create store root");
    world.root.set(root);
}

#[given("a stored session record")]
fn a_stored_session_record(world: &World) {
    let store = world.open_store();
    store
        .set(&key("currentSession"), &json!({"username": "ana"}))
        .expect("write session");
}

#[given("a posts record containing invalid JSON")]
fn a_posts_record_containing_invalid_json(world: &World) {
    write_raw_record(&world.root(), "posts", "[{\"id\": 1,").expect("write raw record");
}

// ============================================================================
// When steps
// ============================================================================

#[when("the users record is written and the store is reopened")]
fn the_users_record_is_written_and_the_store_is_reopened(world: &World) {
    {
        let store = world.open_store();
        store.set(&key("users"), &users_value()).expect("write users");
    }
    let reopened = world.open_store();
    world.read_result.set(reopened.get(&key("users")));
}

#[when("the session record is removed twice")]
fn the_session_record_is_removed_twice(world: &World) {
    let store = world.open_store();
    store.remove(&key("currentSession")).expect("first removal");
    store.remove(&key("currentSession")).expect("second removal");
    world.read_result.set(store.get(&key("currentSession")));
}

#[when("the posts record is read")]
fn the_posts_record_is_read(world: &World) {
    let store = world.open_store();
    world.read_result.set(store.get(&key("posts")));
}

// ============================================================================
// Then steps
// ============================================================================

#[then("the users record holds the written value")]
fn the_users_record_holds_the_written_value(world: &World) {
    let result = world.read_result.get().expect("read result should be set");
    assert_eq!(result, Ok(Some(users_value())));
}

#[then("the session record is absent")]
fn the_session_record_is_absent(world: &World) {
    let result = world.read_result.get().expect("read result should be set");
    assert_eq!(result, Ok(None));
}

#[then("the read fails with a corrupt record error")]
fn the_read_fails_with_a_corrupt_record_error(world: &World) {
    match world.read_result.get().expect("read result should be set") {
        Err(StoreError::Corrupt { key, .. }) => assert_eq!(key, "posts"),
        other => panic!("Expected Corrupt, got: {other:?}"),
    }
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/store.feature",
    name = "Records survive reopening the store"
)]
fn records_survive_reopening_the_store(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/store.feature",
    name = "Removing a record twice succeeds"
)]
fn removing_a_record_twice_succeeds(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/store.feature",
    name = "Damaged records are reported as corrupt"
)]
fn damaged_records_are_reported_as_corrupt(world: World) {
    let _ = world;
}
