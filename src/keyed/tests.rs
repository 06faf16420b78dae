use std::collections::BTreeMap;

use super::{Inserted, KeyedStore, ABORTS_ON_CONFLICT};
use crate::test_util::{self, Monster, Player};

type Set = (Player, Monster);

#[test]
fn test_insert_find_erase() {
    test_util::init();

    let mut store = KeyedStore::<Set, u64>::new();
    let player = Player::new(1);

    assert_eq!(store.insert(7, &player).expect("no conflict"), Inserted::New);
    let found = store.find::<Player, _>(&7).expect("key was inserted");
    assert_eq!(found.id, 1);
    assert!(store.contains_key::<Player, _>(&7));
    assert_eq!(store.count::<Player, _>(), 1);

    assert!(store.erase::<Player, _>(&7));
    assert!(!store.erase::<Player, _>(&7));
    assert!(store.find::<Player, _>(&7).is_none());
    assert!(store.is_empty());
}

#[test]
fn test_insert_same_object_twice() {
    test_util::init();

    let mut store = KeyedStore::<Set, u64>::new();
    let player = Player::new(1);

    assert_eq!(store.insert(7, &player).expect("no conflict"), Inserted::New);
    assert_eq!(store.insert(7, &player).expect("no conflict"), Inserted::AlreadyPresent);
    assert_eq!(store.count::<Player, _>(), 1);
}

#[test]
fn test_separate_key_spaces() {
    test_util::init();

    let mut store = KeyedStore::<Set, u64>::new();
    let player = Player::new(1);
    let monster = Monster::new(2);

    store.insert(7, &player).expect("no conflict");
    store.insert(7, &monster).expect("player and monster keys are independent");

    assert_eq!(store.find::<Player, _>(&7).map(|player| player.id), Some(1));
    assert_eq!(store.find::<Monster, _>(&7).map(|monster| monster.id), Some(2));
    assert_eq!(store.len(), 2);

    store.erase::<Monster, _>(&7);
    assert!(store.contains_key::<Player, _>(&7));
}

#[test]
fn test_objects_may_be_stored_and_keyed() {
    test_util::init();

    let mut keyed = KeyedStore::<Set, &'static str>::new();
    let mut store = crate::Store::<Set>::new();
    let monster = Monster::new(1);

    assert!(store.insert(&monster));
    keyed.insert("boss", &monster).expect("no conflict");
    assert_eq!(store.count::<Monster, _>(), 1);
    assert_eq!(keyed.count::<Monster, _>(), 1);
}

#[test]
fn test_dropped_object_is_replaced() {
    test_util::init();

    let mut store = KeyedStore::<Set, u64>::new();
    let old = Monster::new(1);
    store.insert(3, &old).expect("no conflict");
    drop(old);

    assert!(store.find::<Monster, _>(&3).is_none());
    assert!(store.contains_key::<Monster, _>(&3), "dead mappings are kept until replaced");

    let new = Monster::new(2);
    assert_eq!(store.insert(3, &new).expect("dead mapping is replaced"), Inserted::New);
    assert_eq!(store.find::<Monster, _>(&3).map(|monster| monster.id), Some(2));
}

#[test]
fn test_iter() {
    test_util::init();

    let mut store = KeyedStore::<Set, u64>::new();
    let mut monsters: Vec<_> = (0..4).map(Monster::new).collect();
    for monster in &monsters {
        store.insert(u64::from(monster.id) * 10, monster).expect("no conflict");
    }
    drop(monsters.pop());

    let found: BTreeMap<u64, u32> =
        store.iter::<Monster, _>().map(|(&key, monster)| (key, monster.id)).collect();
    assert_eq!(found, BTreeMap::from([(0, 0), (10, 1), (20, 2)]));
}

#[test]
fn test_iter_order() {
    test_util::init();

    let mut store = KeyedStore::<Set, &'static str>::new();
    let players: Vec<_> = (0..4).map(Player::new).collect();
    for (key, player) in ["a", "b", "c", "d"].into_iter().zip(&players) {
        store.insert(key, player).expect("no conflict");
    }

    let keys: Vec<&str> = store.iter::<Player, _>().map(|(&key, _)| key).collect();
    assert_eq!(keys, ["a", "b", "c", "d"]);

    assert!(store.erase::<Player, _>(&"b"));
    let keys: Vec<&str> = store.iter::<Player, _>().map(|(&key, _)| key).collect();
    assert_eq!(keys, ["a", "d", "c"]);
}

#[test]
#[cfg_attr(
    any(
        all(debug_assertions, feature = "debug-conflict-abort"),
        all(not(debug_assertions), feature = "release-conflict-abort"),
    ),
    should_panic = "Key 7 is already mapped to a different gridstore::test_util::Player"
)]
fn test_conflict() {
    test_util::init();

    let mut store = KeyedStore::<Set, u64>::new();
    let p1 = Player::new(1);
    let p2 = Player::new(2);
    store.insert(7, &p1).expect("no conflict");

    let result = store.insert(7, &p2);
    assert!(!ABORTS_ON_CONFLICT, "conflict should have panicked");

    let err = result.expect_err("different object under the same key");
    assert!(matches!(err, crate::Error::KeyConflict { key, .. } if key == "7"));
    assert_eq!(
        store.find::<Player, _>(&7).map(|player| player.id),
        Some(1),
        "conflicting insert must not overwrite"
    );
}
