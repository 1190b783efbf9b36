//! Concurrency tests: the exclusive lock must span each full
//! read-modify-write cycle, so parallel writers can neither share an id
//! nor lose each other's records.

use microblog_store::DocumentStore;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

const WRITERS: usize = 16;

#[test]
fn concurrent_registrations_get_distinct_ids_and_index_entries() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Arc::new(
        DocumentStore::open(dir.path().join("database.json")).expect("Failed to open store"),
    );

    let barrier = Arc::new(Barrier::new(WRITERS));
    let mut handles = Vec::with_capacity(WRITERS);
    for n in 0..WRITERS {
        let store = Arc::clone(&store);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            let email = format!("user{n}@x.com");
            barrier.wait();
            store
                .create_user(&email, "hash")
                .expect("Failed to create user")
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        let user = handle.join().expect("writer thread panicked");
        assert!(ids.insert(user.id), "id {} was handed out twice", user.id);
    }
    assert_eq!(ids.len(), WRITERS);
    assert_eq!(*ids.iter().max().expect("at least one id"), WRITERS as u64);

    // Every registration also survived in the index: no lost updates.
    for n in 0..WRITERS {
        store
            .find_user_by_email(&format!("user{n}@x.com"))
            .expect("registration was lost");
    }
}

#[test]
fn concurrent_posting_never_loses_a_post() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Arc::new(
        DocumentStore::open(dir.path().join("database.json")).expect("Failed to open store"),
    );

    let barrier = Arc::new(Barrier::new(WRITERS));
    let mut handles = Vec::with_capacity(WRITERS);
    for n in 0..WRITERS {
        let store = Arc::clone(&store);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            store
                .create_post(&format!("post {n}"), n as u64 + 1)
                .expect("Failed to create post")
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        let post = handle.join().expect("writer thread panicked");
        assert!(ids.insert(post.id));
    }

    let listed = store.list_posts(None).expect("Failed to list posts");
    assert_eq!(listed.len(), WRITERS);
}

#[test]
fn readers_interleaved_with_writers_see_consistent_snapshots() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Arc::new(
        DocumentStore::open(dir.path().join("database.json")).expect("Failed to open store"),
    );

    let mut handles = Vec::new();
    for n in 0..8u64 {
        let writer = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            writer
                .create_post(&format!("post {n}"), 1)
                .expect("Failed to create post");
        }));

        let reader = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            // A reader must always observe a parseable, internally
            // consistent snapshot, whatever subset of writes landed.
            let posts = reader.list_posts(Some(1)).expect("Failed to list posts");
            assert!(posts.len() <= 8);
        }));
    }
    for handle in handles {
        handle.join().expect("thread panicked");
    }

    assert_eq!(store.list_posts(None).expect("final list").len(), 8);
}
