//! Property tests for the entity allocator and component store.
//!
//! These tests use `proptest` to generate random sequences of operations
//! and verify that storage invariants hold after each sequence: parallel
//! vectors stay in sync, iteration order matches insertion order, and stale
//! handles never alias live entities.

use proptest::prelude::*;
use umbra_ecs::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Marker(u32);

/// Operations we can perform against one allocator + one store.
#[derive(Debug, Clone)]
enum StoreOp {
    Spawn(u32),
    Despawn(usize),
    Replace(usize, u32),
    Remove(usize),
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        any::<u32>().prop_map(StoreOp::Spawn),
        (0..64usize).prop_map(StoreOp::Despawn),
        (0..64usize, any::<u32>()).prop_map(|(i, v)| StoreOp::Replace(i, v)),
        (0..64usize).prop_map(StoreOp::Remove),
    ]
}

proptest! {
    #[test]
    fn random_ops_preserve_store_invariants(
        ops in prop::collection::vec(store_op_strategy(), 1..60),
    ) {
        let mut alloc = EntityAllocator::new();
        let mut store: ComponentStore<Marker> = ComponentStore::new();
        // Model: the live entities in insertion order, with values.
        let mut model: Vec<(EntityId, u32)> = Vec::new();
        let mut spawned: Vec<EntityId> = Vec::new();

        for op in ops {
            match op {
                StoreOp::Spawn(v) => {
                    let e = alloc.allocate();
                    store.insert(e, Marker(v));
                    model.push((e, v));
                    spawned.push(e);
                }
                StoreOp::Despawn(i) => {
                    if let Some(&e) = spawned.get(i) {
                        if alloc.is_alive(e) {
                            alloc.deallocate(e);
                            store.remove(e);
                            model.retain(|(m, _)| *m != e);
                        }
                    }
                }
                StoreOp::Replace(i, v) => {
                    if let Some(&e) = spawned.get(i) {
                        if store.has(e) {
                            store.insert(e, Marker(v));
                            if let Some(entry) =
                                model.iter_mut().find(|(m, _)| *m == e)
                            {
                                entry.1 = v;
                            }
                        }
                    }
                }
                StoreOp::Remove(i) => {
                    if let Some(&e) = spawned.get(i) {
                        store.remove(e);
                        model.retain(|(m, _)| *m != e);
                    }
                }
            }

            // Store length matches the model.
            prop_assert_eq!(store.len(), model.len());
            // Iteration yields the model exactly: same entities, same
            // values, same insertion order.
            let observed: Vec<(EntityId, u32)> =
                store.iter().map(|(e, m)| (e, m.0)).collect();
            let expected: Vec<(EntityId, u32)> = model.clone();
            prop_assert_eq!(observed, expected);
            // The dense entity list agrees with iteration.
            let order: Vec<EntityId> = model.iter().map(|(e, _)| *e).collect();
            prop_assert_eq!(store.entities(), order.as_slice());
        }
    }

    #[test]
    fn recycled_handles_never_alias(spawn_count in 1..40usize) {
        let mut alloc = EntityAllocator::new();
        let mut seen: Vec<EntityId> = Vec::new();

        // Spawn, kill everything, spawn again: every handle ever issued
        // must be distinct.
        for _ in 0..spawn_count {
            seen.push(alloc.allocate());
        }
        for &e in &seen {
            prop_assert!(alloc.deallocate(e));
        }
        for _ in 0..spawn_count {
            let fresh = alloc.allocate();
            prop_assert!(!seen.contains(&fresh), "recycled handle aliased {fresh}");
            prop_assert!(alloc.is_alive(fresh));
        }
        for &stale in &seen {
            prop_assert!(!alloc.is_alive(stale));
        }
    }
}
