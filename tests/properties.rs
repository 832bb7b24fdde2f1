//! Property tests for dispatch folding, emissions, and entity helpers.

use proptest::prelude::*;
use state_guardian::state::overwrite;
use state_guardian::{delete_one, normalize, update_one, Field, State, Store, Version};

#[derive(Clone, Debug, Default, PartialEq)]
struct Triple {
    a: i32,
    b: i32,
    c: i32,
}

#[derive(Clone, Debug, Default)]
struct TriplePatch {
    a: Option<i32>,
    b: Option<i32>,
    c: Option<i32>,
}

impl State for Triple {
    type Patch = TriplePatch;

    fn merge(&mut self, patch: TriplePatch) {
        overwrite(&mut self.a, patch.a);
        overwrite(&mut self.b, patch.b);
        overwrite(&mut self.c, patch.c);
    }
}

fn patch_strategy() -> impl Strategy<Value = TriplePatch> {
    (
        proptest::option::of(-100..100i32),
        proptest::option::of(-100..100i32),
        proptest::option::of(-100..100i32),
    )
        .prop_map(|(a, b, c)| TriplePatch { a, b, c })
}

/// Reference shallow merge, field by field.
fn fold(initial: &Triple, patches: &[TriplePatch]) -> Triple {
    patches.iter().fold(initial.clone(), |state, p| Triple {
        a: p.a.unwrap_or(state.a),
        b: p.b.unwrap_or(state.b),
        c: p.c.unwrap_or(state.c),
    })
}

proptest! {
    #[test]
    fn prop_dispatch_equals_fold(
        a in -100..100i32,
        patches in proptest::collection::vec(patch_strategy(), 0..30),
    ) {
        let initial = Triple { a, b: 0, c: 0 };
        let store = Store::new(initial.clone());

        for patch in &patches {
            let patch = patch.clone();
            store.dispatch(move |_| patch);
        }

        prop_assert_eq!(store.snapshot(), fold(&initial, &patches));
        prop_assert_eq!(store.version(), Version(patches.len() as u64));
    }

    #[test]
    fn prop_one_emission_per_dispatch(
        patches in proptest::collection::vec(patch_strategy(), 0..30),
    ) {
        let store = Store::new(Triple::default());
        let b = store.select(Field::new("b", |s: &Triple| s.b));

        let mut expected = vec![0];
        let mut current = Triple::default();
        for patch in &patches {
            current = fold(&current, std::slice::from_ref(patch));
            expected.push(current.b);
            let patch = patch.clone();
            store.dispatch(move |_| patch);
        }

        prop_assert_eq!(b.drain(), expected);
    }

    #[test]
    fn prop_delete_removes_every_match(
        ids in proptest::collection::vec(0..5u8, 0..40),
        target in 0..5u8,
    ) {
        let out = delete_one(&ids, &target, |id| *id);

        prop_assert!(out.iter().all(|id| *id != target));
        let kept: Vec<u8> = ids.iter().copied().filter(|id| *id != target).collect();
        prop_assert_eq!(out, kept);
    }

    #[test]
    fn prop_update_keeps_length_and_order(
        ids in proptest::collection::vec(0..5u8, 0..40),
        target in 0..5u8,
    ) {
        let entities: Vec<(u8, usize)> = ids.iter().copied().zip(0..).collect();
        let out = update_one(&entities, (target, usize::MAX), |e| e.0);

        prop_assert_eq!(out.len(), entities.len());
        match entities.iter().position(|e| e.0 == target) {
            Some(pos) => {
                prop_assert_eq!(out[pos], (target, usize::MAX));
                for (i, e) in out.iter().enumerate().filter(|(i, _)| *i != pos) {
                    prop_assert_eq!(*e, entities[i]);
                }
            }
            None => prop_assert_eq!(out, entities),
        }
    }

    #[test]
    fn prop_normalize_last_write_wins(
        ids in proptest::collection::vec(0..5u8, 0..40),
    ) {
        let entities: Vec<(u8, usize)> = ids.iter().copied().zip(0..).collect();
        let map = normalize(&entities, |e| e.0);

        for (id, index) in &entities {
            let last = entities.iter().rev().find(|e| e.0 == *id).unwrap();
            prop_assert_eq!(map[&id.to_string()], *last);
            prop_assert!(*index <= last.1);
        }
    }
}
