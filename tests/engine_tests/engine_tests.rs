//! Tests for Engine
//!
//! These tests verify:
//! - Operations before and after init
//! - Command execution
//! - Re-initialization discarding the previous map
//! - Concurrent access patterns

use std::sync::Arc;
use std::thread;

use pagedkv::config::MapConfig;
use pagedkv::engine::Engine;
use pagedkv::protocol::{Command, Response};
use pagedkv::PagedKvError;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_engine(page_size: u32, number_of_pages: u32) -> Engine {
    Engine::with_map(MapConfig::new(page_size, number_of_pages)).unwrap()
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_operations_before_init_fail() {
    let engine = Engine::new();

    assert!(!engine.is_initialized());
    assert!(matches!(engine.get(3), Err(PagedKvError::UninitializedMap)));
    assert!(matches!(engine.put(3, 1), Err(PagedKvError::UninitializedMap)));
    assert!(matches!(engine.delete(3), Err(PagedKvError::UninitializedMap)));
    assert!(matches!(engine.dump(), Err(PagedKvError::UninitializedMap)));
    assert!(engine.stats().is_err());
    assert_eq!(engine.config(), None);
}

#[test]
fn test_init_creates_map() {
    let engine = Engine::new();

    engine.init(MapConfig::new(16, 2)).unwrap();

    assert!(engine.is_initialized());
    assert_eq!(engine.config(), Some(MapConfig::new(16, 2)));
    assert_eq!(engine.snapshot().unwrap().len(), 50);
}

#[test]
fn test_reinit_discards_previous_map() {
    let engine = setup_engine(16, 2);
    engine.put(3, 100).unwrap();
    engine.put(1, 42).unwrap();

    engine.init(MapConfig::new(32, 4)).unwrap();

    assert_eq!(engine.get(3).unwrap(), 0);
    assert_eq!(engine.get(1).unwrap(), 0);
    assert_eq!(engine.config(), Some(MapConfig::new(32, 4)));
    assert!(engine.snapshot().unwrap()[8..].iter().all(|b| *b == 0));
}

#[test]
fn test_failed_init_keeps_previous_map() {
    let engine = setup_engine(16, 2);
    engine.put(3, 100).unwrap();

    assert!(engine.init(MapConfig::new(16, 0)).is_err());

    assert_eq!(engine.get(3).unwrap(), 100);
}

#[test]
fn test_failed_first_init_leaves_engine_uninitialized() {
    let engine = Engine::new();

    assert!(engine.init(MapConfig::new(10, 2)).is_err());

    assert!(!engine.is_initialized());
}

// =============================================================================
// Command Execution Tests
// =============================================================================

#[test]
fn test_execute_commands() {
    let engine = Engine::new();

    let init = engine
        .execute(Command::Init {
            page_size: 16,
            number_of_pages: 2,
        })
        .unwrap();
    assert_eq!(init, Response::Empty);

    assert_eq!(
        engine.execute(Command::Put { key: 3, value: 100 }).unwrap(),
        Response::Empty
    );
    assert_eq!(
        engine.execute(Command::Get { key: 3 }).unwrap(),
        Response::Value(100)
    );
    assert_eq!(
        engine.execute(Command::Delete { key: 3 }).unwrap(),
        Response::Empty
    );
    assert_eq!(
        engine.execute(Command::Get { key: 3 }).unwrap(),
        Response::Value(0)
    );
}

#[test]
fn test_execute_dump() {
    let engine = setup_engine(8, 1);
    engine.put(2, 3).unwrap();

    let response = engine.execute(Command::Dump).unwrap();

    assert_eq!(
        response,
        Response::Dump("00000008 00000001 00 00000000 00 00000000 [00000002:00000003,]".to_string())
    );
}

#[test]
fn test_execute_overflow_is_reported() {
    let engine = setup_engine(16, 2);
    engine.put(3, 100).unwrap();
    engine.put(5, 200).unwrap();

    let err = engine.execute(Command::Put { key: 7, value: 300 }).unwrap_err();

    assert!(matches!(err, PagedKvError::PageOverflow { key: 7, page: 1 }));
    assert_eq!(engine.get(7).unwrap(), 0);
    assert_eq!(engine.get(3).unwrap(), 100);
    assert_eq!(engine.get(5).unwrap(), 200);
}

#[test]
fn test_delete_absent_key_is_ok() {
    let engine = setup_engine(16, 2);
    engine.delete(9).unwrap();
    engine.delete(1).unwrap();
}

#[test]
fn test_stats_through_engine() {
    let engine = setup_engine(16, 2);
    engine.put(2, 1).unwrap();
    engine.put(0, 1).unwrap();

    let stats = engine.stats().unwrap();

    assert_eq!(stats.live, 1);
    assert_eq!(stats.special_present, 1);
    assert_eq!(stats.empty, 3);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_writers_disjoint_keys() {
    let engine = Arc::new(setup_engine(256, 8));
    let mut handles = vec![];

    for t in 0..4 {
        let engine = Arc::clone(&engine);
        handles.push(thread::spawn(move || {
            for i in 0..40 {
                let key = 2 + t * 1000 + i;
                engine.put(key, key * 2).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    for t in 0..4 {
        for i in 0..40 {
            let key = 2 + t * 1000 + i;
            assert_eq!(engine.get(key).unwrap(), key * 2);
        }
    }
    assert_eq!(engine.stats().unwrap().live, 160);
}

#[test]
fn test_concurrent_readers_see_consistent_values() {
    let engine = Arc::new(setup_engine(64, 4));
    for key in 2..20 {
        engine.put(key, key).unwrap();
    }

    let writer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for round in 0..200 {
                engine.put(10, if round % 2 == 0 { 10 } else { -10 }).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..200 {
                    let value = engine.get(10).unwrap();
                    assert!(value == 10 || value == -10, "torn value {}", value);
                    assert_eq!(engine.get(11).unwrap(), 11);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}
