use std::rc::Rc;

use super::Store;
use crate::test_util::{self, Corpse, GameObject, Monster, Pet, Player};
use crate::GridObject;

type Set = (Player, Monster, Pet);

#[test]
fn test_insert_remove_round_trip() {
    test_util::init();

    let mut store = Store::<Set>::new();
    let monster = Monster::new(1);

    assert!(store.insert(&monster));
    assert!(store.contains(&*monster));
    assert_eq!(store.count::<Monster, _>(), 1);

    assert!(store.remove(&*monster));
    assert!(!store.contains(&*monster));
    assert_eq!(store.count::<Monster, _>(), 0);
    assert!(store.is_empty());
}

#[test]
fn test_type_isolation() {
    test_util::init();

    let mut store = Store::<Set>::new();
    let players: Vec<_> = (0..3).map(Player::new).collect();
    let pets: Vec<_> = (0..2).map(Pet::new).collect();
    for player in &players {
        store.insert(player);
    }
    for pet in &pets {
        store.insert(pet);
    }

    assert_eq!(store.count::<Player, _>(), 3);
    assert_eq!(store.count::<Monster, _>(), 0);
    assert_eq!(store.count::<Pet, _>(), 2);
    assert_eq!(store.len(), 5);

    store.remove(&*pets[0]);
    assert_eq!(store.count::<Player, _>(), 3, "removing a pet must not affect players");
    assert_eq!(store.count::<Pet, _>(), 1);

    let pet_ids: Vec<u32> = store.collection::<Pet, _>().iter().map(|pet| pet.1).collect();
    assert_eq!(pet_ids, [1]);
}

#[test]
fn test_double_insert_refused() {
    test_util::init();

    let mut s1 = Store::<Set>::new();
    let mut s2 = Store::<Set>::new();
    let player = Player::new(1);

    assert!(s1.insert(&player));
    assert!(!s1.insert(&player));
    assert!(!s2.insert(&player), "object is still linked into s1");
    assert_eq!(s1.count::<Player, _>(), 1);
    assert_eq!(s2.count::<Player, _>(), 0);

    assert!(!s2.remove(&*player), "object is not in s2");
    assert!(s1.contains(&*player));
}

#[test]
fn test_try_insert() {
    test_util::init();

    let mut store = Store::<Set>::new();
    let pet = Pet::new(1);
    let corpse = Corpse::new(1);

    assert!(Store::<Set>::supports::<Pet>());
    assert!(!Store::<Set>::supports::<Corpse>());

    assert!(store.try_insert(&pet));
    assert_eq!(store.count::<Pet, _>(), 1);
    assert!(!store.try_insert(&pet), "already linked");

    assert!(!store.try_insert(&corpse), "Corpse is not a member");
    assert!(!corpse.grid_ref().is_linked());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_clear() {
    test_util::init();

    let mut store = Store::<Set>::new();
    let player = Player::new(1);
    let monster = Monster::new(1);
    store.insert(&player);
    store.insert(&monster);
    let slot = player.grid_ref().slot().expect("player is linked");
    assert!(store.is_live(slot));

    assert_eq!(store.clear(), 2);
    assert!(store.is_empty());
    assert!(!store.is_live(slot));
    assert!(!player.grid_ref().is_linked());
    assert!(!monster.grid_ref().is_linked());
}

#[test]
fn test_active_len() {
    test_util::init();

    let mut store = Store::<Set>::new();
    let player = Player::new(1);
    let monster = Monster::new(1);
    let pet = Pet::new(1);
    assert!(store.insert_marked(&player, true));
    assert!(store.insert_marked(&monster, true));
    assert!(store.insert(&pet));
    assert_eq!(store.active_len(), 2);

    assert!(store.remove(&*player));
    assert_eq!(store.active_len(), 1);
    drop(monster);
    assert_eq!(store.active_len(), 0);

    assert!(store.insert_marked(&player, true));
    assert_eq!(store.clear(), 2);
    assert_eq!(store.active_len(), 0);
}

#[test]
fn test_slot_positions() {
    test_util::init();

    let mut store = Store::<Set>::new();
    let player = Player::new(1);
    let pet = Pet::new(1);
    store.insert(&player);
    store.insert(&pet);

    let player_slot = player.grid_ref().slot().expect("player is linked");
    let pet_slot = pet.grid_ref().slot().expect("pet is linked");
    assert_eq!(player_slot.position(), 0);
    assert_eq!(pet_slot.position(), 2);
    assert!(store.is_live(player_slot));
    assert!(store.is_live(pet_slot));
}

#[test]
fn test_drop_store_before_objects() {
    test_util::init();

    let objects: Vec<Rc<GameObject>> = (0..3).map(GameObject::new).collect();
    {
        let mut store = Store::<(GameObject,)>::new();
        for object in &objects {
            store.insert(object);
        }
        assert_eq!(store.len(), 3);
    }

    for object in &objects {
        assert!(!object.grid_ref().is_linked());
    }
}

#[test]
fn test_debug() {
    test_util::init();

    let mut store = Store::<(Player, Pet)>::new();
    store.insert(&Player::new(1));
    let player = Player::new(2);
    store.insert(&player);

    let debug = format!("{store:?}");
    assert!(debug.contains("Player"));
    assert!(debug.contains("Pet"));
    assert!(debug.ends_with("{ len: 1 }"), "temporary object is dropped: {debug}");
}

macro_rules! test_each_member {
    ($($ty:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[test]
                fn [<test_ $ty:snake _lifecycle>]() {
                    test_util::init();

                    let mut store = Store::<Set>::new();
                    let objects: Vec<_> = (0..8).map($ty::new).collect();
                    for object in &objects {
                        assert!(store.insert(object));
                    }
                    assert_eq!(store.count::<$ty, _>(), 8);
                    assert_eq!(store.len(), 8);

                    for object in objects.iter().step_by(2) {
                        assert!(store.remove(&**object));
                    }
                    assert_eq!(store.count::<$ty, _>(), 4);

                    drop(objects);
                    assert_eq!(store.count::<$ty, _>(), 0);
                    assert!(store.is_empty());
                }
            )*
        }
    };
}

test_each_member!(Player, Monster, Pet);
