use super::*;
use crate::types::CanvasTransform;

fn add(store: &mut PointStore, slot: Slot, x: f64, y: f64) -> PointHandle {
    store.add_point(slot, x, y).expect("add point").handle
}

#[test]
fn quadrant_scenario_adds_and_commits_pair() {
    let t = CanvasTransform::new(300.0, 300.0);
    let mut store = PointStore::new();

    let (x, y) = t.to_math(310.0, 280.0);
    let before = store.add_point(Slot::Before, x, y).expect("before");
    assert_eq!(before.point, Point::unfixed(PointId(1), Slot::Before, 10.0, 20.0));
    assert_eq!(before.followup, Followup::Persist);
    assert_eq!(store.next_slot(), Slot::After);

    let (x, y) = t.to_math(290.0, 320.0);
    let after = store.add_point(Slot::After, x, y).expect("after");
    assert_eq!(after.point, Point::unfixed(PointId(1), Slot::After, -10.0, -20.0));
    assert_eq!(store.phase(PointId(1)), IdPhase::Full);

    let commit = store.commit_current_id().expect("commit");
    assert_eq!(commit.id, PointId(1));
    assert_eq!(commit.next_id, PointId(2));
    assert_eq!(commit.fixed, vec![before.handle, after.handle]);
    assert_eq!(commit.followup, Followup::PersistAndExport);
    assert!(store.points().iter().all(|p| p.fixed));
    assert_eq!(store.current_id(), PointId(2));
    assert_eq!(store.next_slot(), Slot::Before);
    assert_eq!(store.phase(PointId(1)), IdPhase::Fixed);
    assert_eq!(store.phase(PointId(2)), IdPhase::Empty);
}

#[test]
fn duplicate_slot_is_rejected() {
    let mut store = PointStore::new();
    add(&mut store, Slot::Before, 1.0, 1.0);
    let err = store.add_point(Slot::Before, 2.0, 2.0).unwrap_err();
    assert_eq!(
        err,
        StoreError::SlotOccupied {
            id: PointId(1),
            slot: Slot::Before
        }
    );
    let befores = store
        .points()
        .iter()
        .filter(|p| p.id == PointId(1) && p.slot == Slot::Before)
        .count();
    assert_eq!(befores, 1);
    assert_eq!(store.points()[0].x, 1.0);
}

#[test]
fn commit_without_points_fails() {
    let mut store = PointStore::new();
    assert_eq!(
        store.commit_current_id().unwrap_err(),
        StoreError::NoPointsForId { id: PointId(1) }
    );
    assert_eq!(store.current_id(), PointId(1));
}

#[test]
fn commit_from_partial_fixes_single_point() {
    let mut store = PointStore::new();
    add(&mut store, Slot::After, 3.0, 4.0);
    assert_eq!(store.phase(PointId(1)), IdPhase::Partial);
    let commit = store.commit_current_id().expect("commit");
    assert_eq!(commit.fixed.len(), 1);
    assert!(store.points()[0].fixed);
}

#[test]
fn fixed_points_cannot_move() {
    let mut store = PointStore::new();
    let handle = add(&mut store, Slot::Before, 5.0, 6.0);
    store.commit_current_id().expect("commit");

    for _ in 0..3 {
        let err = store.update_position(handle, 99.0, 99.0).unwrap_err();
        assert_eq!(err, StoreError::AlreadyFixed { id: PointId(1) });
    }
    let p = store.get(handle).expect("point");
    assert_eq!((p.x, p.y), (5.0, 6.0));
    assert!(p.fixed);
}

#[test]
fn unfixed_point_moves_in_place() {
    let mut store = PointStore::new();
    let handle = add(&mut store, Slot::Before, 5.0, 6.0);
    let followup = store.update_position(handle, -7.5, 8.25).expect("move");
    assert_eq!(followup, Followup::Persist);
    let p = store.get(handle).expect("point");
    assert_eq!(*p, Point::unfixed(PointId(1), Slot::Before, -7.5, 8.25));
}

#[test]
fn second_commit_targets_new_id_only() {
    let mut store = PointStore::new();
    add(&mut store, Slot::Before, 1.0, 2.0);
    add(&mut store, Slot::After, 3.0, 4.0);
    store.commit_current_id().expect("first commit");
    let snapshot = store.points().to_vec();

    assert_eq!(
        store.commit_current_id().unwrap_err(),
        StoreError::NoPointsForId { id: PointId(2) }
    );
    assert_eq!(store.points(), snapshot.as_slice());

    add(&mut store, Slot::Before, 9.0, 9.0);
    let commit = store.commit_current_id().expect("second commit");
    assert_eq!(commit.id, PointId(2));
    assert_eq!(commit.fixed.len(), 1);
    assert_eq!(&store.points()[..2], snapshot.as_slice());
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let mut store = PointStore::new();
    assert!(matches!(
        store.add_point(Slot::Before, f64::NAN, 0.0),
        Err(StoreError::NonFiniteCoordinate { .. })
    ));
    assert!(store.points().is_empty());

    let handle = add(&mut store, Slot::Before, 0.0, 0.0);
    assert!(matches!(
        store.update_position(handle, 0.0, f64::INFINITY),
        Err(StoreError::NonFiniteCoordinate { .. })
    ));
    assert_eq!(store.get(handle).map(|p| (p.x, p.y)), Some((0.0, 0.0)));
}

#[test]
fn loaded_points_lock_and_advance_cursor() {
    let table = LoadedTable {
        points: vec![
            Point::fixed(PointId(5), Slot::Before, 1.0, 2.0),
            Point::fixed(PointId(2), Slot::After, 0.0, 0.0),
        ],
        next_id: PointId(6),
    };
    let mut store = PointStore::from_loaded(table);
    assert_eq!(store.current_id(), PointId(6));
    assert!(!store.is_current_id_fixed());
    assert!(!store.has_slot_for_current_id(Slot::Before));

    let first = store.nearest(1.0, 2.0, 5.0).expect("hit");
    assert!(matches!(
        store.update_position(first, 0.0, 0.0),
        Err(StoreError::AlreadyFixed { id: PointId(5) })
    ));
}

#[test]
fn commit_on_last_id_fails_without_fixing() {
    let table = LoadedTable {
        points: vec![Point::fixed(PointId(u32::MAX - 1), Slot::Before, 1.0, 1.0)],
        next_id: PointId(u32::MAX),
    };
    let mut store = PointStore::from_loaded(table);
    let handle = add(&mut store, Slot::Before, 2.0, 2.0);

    let err = store.commit_current_id().unwrap_err();
    assert_eq!(err, StoreError::IdsExhausted { id: PointId(u32::MAX) });
    assert_eq!(store.current_id(), PointId(u32::MAX));
    assert!(!store.get(handle).expect("point").fixed);
    assert!(store.update_position(handle, 3.0, 3.0).is_ok());
    assert_eq!(PointId(u32::MAX).next(), None);
}

#[test]
fn nearest_prefers_closest_within_radius() {
    let mut store = PointStore::new();
    let a = add(&mut store, Slot::Before, 0.0, 0.0);
    let b = add(&mut store, Slot::After, 4.0, 0.0);
    assert_eq!(store.nearest(1.0, 0.0, 5.0), Some(a));
    assert_eq!(store.nearest(3.0, 0.0, 5.0), Some(b));
    assert_eq!(store.nearest(50.0, 50.0, 5.0), None);
}

#[test]
fn advance_slot_flips_indicator_only() {
    let mut store = PointStore::new();
    store.advance_slot();
    assert_eq!(store.next_slot(), Slot::After);
    store.advance_slot();
    assert_eq!(store.next_slot(), Slot::Before);
    assert!(store.points().is_empty());
}

/// Small xorshift generator so the sequence test is reproducible.
struct XorShift(u64);

impl XorShift {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

#[test]
fn random_sequences_keep_one_point_per_slot() {
    for seed in 1..=32_u64 {
        let mut rng = XorShift(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let mut store = PointStore::new();
        let mut last_id = store.current_id();
        for step in 0..200 {
            let roll = rng.next_u64() % 10;
            let x = f64::from(u32::try_from(rng.next_u64() % 600).unwrap()) - 300.0;
            let y = f64::from(step);
            match roll {
                0..=5 => {
                    let slot = if rng.next_u64() % 2 == 0 {
                        Slot::Before
                    } else {
                        Slot::After
                    };
                    let _ = store.add_point(slot, x, y);
                }
                6 | 7 => {
                    if let Some(handle) = store.nearest(x, y, 1_000.0) {
                        let _ = store.update_position(handle, x, y);
                    }
                }
                _ => {
                    let _ = store.commit_current_id();
                }
            }
            assert!(store.current_id() >= last_id);
            last_id = store.current_id();
        }

        for (i, a) in store.points().iter().enumerate() {
            for b in &store.points()[i + 1..] {
                assert!(
                    !(a.id == b.id && a.slot == b.slot),
                    "duplicate {} for id {} (seed {seed})",
                    a.slot,
                    a.id
                );
            }
            if !a.fixed {
                assert_eq!(a.id, store.current_id());
            }
        }
    }
}
