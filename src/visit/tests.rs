use std::collections::BTreeSet;
use std::rc::Rc;

use super::{Count, OnlyVisit, Visit};
use crate::test_util::{self, Corpse, GameObject, Monster, Player};
use crate::{Collection, Store};

type Set = (Player, Monster, Corpse);

/// Records the order in which collections are visited.
#[derive(Default)]
struct Order(Vec<&'static str>);

impl Visit<Player> for Order {
    fn visit(&mut self, _: &Collection<Player>) { self.0.push("player"); }
}
impl Visit<Monster> for Order {
    fn visit(&mut self, _: &Collection<Monster>) { self.0.push("monster"); }
}
impl Visit<Corpse> for Order {
    fn visit(&mut self, _: &Collection<Corpse>) { self.0.push("corpse"); }
}

/// Only cares about monsters.
#[derive(Default)]
struct Damage(u32);

impl Visit<Monster> for Damage {
    fn visit(&mut self, monsters: &Collection<Monster>) {
        for monster in monsters {
            monster.health.set(monster.health.get() - self.0);
        }
    }
}
impl Visit<Player> for Damage {}
impl Visit<Corpse> for Damage {}

fn populated() -> (Store<Set>, Vec<Rc<Player>>, Vec<Rc<Monster>>) {
    let mut store = Store::<Set>::new();
    let players: Vec<_> = (0..2).map(Player::new).collect();
    let monsters: Vec<_> = (0..3).map(Monster::new).collect();
    for player in &players {
        store.insert(player);
    }
    for monster in &monsters {
        store.insert(monster);
    }
    (store, players, monsters)
}

#[test]
fn test_visit_in_type_set_order() {
    test_util::init();

    let store = Store::<Set>::new();
    let mut order = Order::default();
    store.accept(&mut order);
    assert_eq!(order.0, ["player", "monster", "corpse"], "every collection is visited once");
}

#[test]
fn test_visit_empty_type_set() {
    test_util::init();

    let store = Store::<()>::new();
    let mut order = Order::default();
    store.accept(&mut order);
    assert!(order.0.is_empty());
}

#[test]
fn test_default_visit_ignores_other_types() {
    test_util::init();

    let (store, _players, monsters) = populated();
    store.accept(&mut Damage(3));

    for monster in &monsters {
        assert_eq!(monster.health.get(), 7);
    }
}

#[test]
fn test_only_visit() {
    test_util::init();

    let (store, _players, _monsters) = populated();

    let mut ids = BTreeSet::new();
    store.accept(&mut OnlyVisit::new(|monster: &Rc<Monster>| {
        ids.insert(monster.id);
    }));
    assert_eq!(ids, BTreeSet::from([0, 1, 2]));

    let mut visitor = OnlyVisit::new(|_: &Rc<Corpse>| panic!("there are no corpses"));
    store.accept(&mut visitor);
}

#[test]
fn test_count() {
    test_util::init();

    let (store, players, _monsters) = populated();

    let mut count = Count::<Monster>::new();
    store.accept(&mut count);
    assert_eq!(count.get(), 3);

    let mut count = Count::<Player>::new();
    store.accept(&mut count);
    assert_eq!(count.get(), players.len());

    let mut count = Count::<Corpse>::default();
    store.accept(&mut count);
    assert_eq!(count.get(), 0);
}

#[test]
fn test_adapters_distinguish_identical_layouts() {
    test_util::init();

    let mut store = Store::<(GameObject, Corpse)>::new();
    let objects: Vec<_> = (0..3).map(GameObject::new).collect();
    let corpse = Corpse::new(7);
    for object in &objects {
        store.insert(object);
    }
    store.insert(&corpse);

    let mut count = Count::<Corpse>::new();
    store.accept(&mut count);
    assert_eq!(count.get(), 1);

    let mut ids = Vec::new();
    store.accept(&mut OnlyVisit::new(|corpse: &Rc<Corpse>| ids.push(corpse.id)));
    assert_eq!(ids, [7]);
}

#[test]
fn test_visitor_may_mutate_store() {
    test_util::init();

    let (store, _players, monsters) = populated();

    let mut killed = Vec::new();
    store.accept(&mut OnlyVisit::new(|monster: &Rc<Monster>| {
        monster.grid_ref.unlink();
        killed.push(monster.id);
    }));
    assert_eq!(killed.len(), 3);
    assert_eq!(store.count::<Monster, _>(), 0);
    assert_eq!(store.count::<Player, _>(), 2);
    drop(monsters);
}
