//! Unit tests for the BookmarkRepository public API.
//!
//! Exercises per-user listing, newest-first ordering, no-op deletes, and the
//! change notifications published on writes, using an in-memory SQLite
//! database and a real change feed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use markstash::database::Database;
use markstash::managers::bookmark_repository::{BookmarkRepository, BookmarkRepositoryTrait};
use markstash::services::change_feed::ChangeFeed;
use markstash::types::change::ChangeKind;

fn setup() -> (Arc<ChangeFeed>, BookmarkRepository) {
    let db = Arc::new(Database::open_in_memory().expect("Failed to open in-memory database"));
    let feed = Arc::new(ChangeFeed::new());
    (feed.clone(), BookmarkRepository::new(db, feed))
}

#[test]
fn test_list_returns_only_the_users_rows() {
    let (_feed, repo) = setup();

    repo.add("user-a", "A one", "https://a1.example.com").unwrap();
    repo.add("user-b", "B one", "https://b1.example.com").unwrap();
    repo.add("user-a", "A two", "https://a2.example.com").unwrap();

    let a_rows = repo.list("user-a").unwrap();
    assert_eq!(a_rows.len(), 2);
    assert!(a_rows.iter().all(|b| b.user_id == "user-a"));

    let b_rows = repo.list("user-b").unwrap();
    assert_eq!(b_rows.len(), 1);
    assert_eq!(b_rows[0].title, "B one");
}

#[test]
fn test_list_for_unknown_user_is_empty() {
    let (_feed, repo) = setup();
    repo.add("user-a", "A one", "https://a1.example.com").unwrap();
    assert!(repo.list("user-z").unwrap().is_empty());
}

#[test]
fn test_list_orders_newest_first() {
    let (_feed, repo) = setup();

    repo.add("user-a", "first", "https://one.example.com").unwrap();
    repo.add("user-a", "second", "https://two.example.com").unwrap();
    repo.add("user-a", "third", "https://three.example.com").unwrap();

    let rows = repo.list("user-a").unwrap();
    let titles: Vec<&str> = rows.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
    assert!(rows.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[test]
fn test_add_then_list_includes_the_record() {
    let (_feed, repo) = setup();

    let id = repo
        .add("user-a", "Example", "https://example.com")
        .unwrap();

    let rows = repo.list("user-a").unwrap();
    let found = rows.iter().find(|b| b.id == id).expect("row should exist");
    assert_eq!(found.title, "Example");
    assert_eq!(found.url, "https://example.com");
    assert!(found.created_at > 0);
}

#[test]
fn test_delete_then_list_excludes_the_record() {
    let (_feed, repo) = setup();

    let id = repo
        .add("user-a", "Example", "https://example.com")
        .unwrap();
    repo.delete(&id).unwrap();

    assert!(repo.list("user-a").unwrap().is_empty());
}

#[test]
fn test_delete_of_missing_id_is_a_noop() {
    let (_feed, repo) = setup();
    let result = repo.delete("no-such-id");
    assert!(result.is_ok());
}

#[test]
fn test_add_publishes_an_insert_event() {
    let (feed, repo) = setup();
    let inserts = Arc::new(AtomicUsize::new(0));
    let inserts_in_callback = Arc::clone(&inserts);
    let _handle = feed.subscribe("bookmarks", move |event| {
        if event.kind == ChangeKind::Insert {
            inserts_in_callback.fetch_add(1, Ordering::SeqCst);
        }
    });

    repo.add("user-a", "Example", "https://example.com").unwrap();
    assert_eq!(inserts.load(Ordering::SeqCst), 1);
}

#[test]
fn test_delete_publishes_only_when_a_row_went_away() {
    let (feed, repo) = setup();
    let id = repo
        .add("user-a", "Example", "https://example.com")
        .unwrap();

    let deletes = Arc::new(AtomicUsize::new(0));
    let deletes_in_callback = Arc::clone(&deletes);
    let _handle = feed.subscribe("bookmarks", move |event| {
        if event.kind == ChangeKind::Delete {
            deletes_in_callback.fetch_add(1, Ordering::SeqCst);
        }
    });

    repo.delete(&id).unwrap();
    repo.delete(&id).unwrap();
    assert_eq!(deletes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_subscription_sees_every_users_changes() {
    // The feed is keyed by table only: a subscriber observes other users'
    // writes as well. Broadcast scope is intentional — see DESIGN.md.
    let (_feed, repo) = setup();
    let notifications = Arc::new(AtomicUsize::new(0));
    let notifications_in_callback = Arc::clone(&notifications);
    let _handle = repo.subscribe_to_changes(Box::new(move |_event| {
        notifications_in_callback.fetch_add(1, Ordering::SeqCst);
    }));

    repo.add("user-a", "A", "https://a.example.com").unwrap();
    repo.add("user-b", "B", "https://b.example.com").unwrap();
    assert_eq!(notifications.load(Ordering::SeqCst), 2);
}

#[test]
fn test_ids_are_unique_per_add() {
    let (_feed, repo) = setup();
    let id1 = repo.add("user-a", "One", "https://one.example.com").unwrap();
    let id2 = repo.add("user-a", "Two", "https://two.example.com").unwrap();
    assert_ne!(id1, id2);
}
