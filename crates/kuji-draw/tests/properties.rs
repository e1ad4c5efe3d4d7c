//! Property tests for the planner and the draw session.

use std::collections::HashSet;

use kuji_core::{EntryStore, MemoryStore};
use kuji_draw::{
    LotteryError, LotterySession, PlacementConfig, PlacementPlanner, ScriptedRandom,
    SessionConfig, SessionState, spiral_cells,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn arb_placement_config() -> impl Strategy<Value = PlacementConfig> {
    (1.0f64..10.0, 0.0f64..4.0, 0.0f64..12.0, 1u32..60).prop_map(
        |(cell, offset, min_distance, attempts)| {
            PlacementConfig::default()
                .with_cell_size(cell)
                .with_offset_range(offset)
                .with_min_distance(min_distance)
                .with_max_attempts(attempts)
        },
    )
}

proptest! {
    /// Property: plan returns one placement per index, each on its own cell
    #[test]
    fn plan_count_and_unique_cells(
        count in 0usize..60,
        seed in any::<u64>(),
        config in arb_placement_config(),
    ) {
        let planner = PlacementPlanner::new(config).unwrap();
        let layout = planner.plan(count, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(layout.len(), count);
        let cells: HashSet<_> = layout.placements().iter().map(|p| p.cell).collect();
        prop_assert_eq!(cells.len(), count);
    }

    /// Property: non-forced placements keep the minimum spacing
    #[test]
    fn non_forced_pairs_keep_spacing(
        count in 0usize..50,
        seed in any::<u64>(),
        config in arb_placement_config(),
    ) {
        let min_distance = config.min_distance;
        let planner = PlacementPlanner::new(config).unwrap();
        let layout = planner.plan(count, &mut StdRng::seed_from_u64(seed));
        let ps = layout.placements();

        for (i, p) in ps.iter().enumerate() {
            for q in &ps[i + 1..] {
                if !p.forced && !q.forced {
                    prop_assert!(
                        p.position.distance(&q.position) >= min_distance,
                        "{} and {} closer than {}", p.position, q.position, min_distance
                    );
                }
            }
        }
    }

    /// Property: the spiral does not depend on randomness
    #[test]
    fn spiral_is_deterministic(count in 0usize..500) {
        prop_assert_eq!(spiral_cells(count), spiral_cells(count));
    }

    /// Property: a session never hands out the same entry twice
    #[test]
    fn no_entry_drawn_twice(size in 0usize..25, seed in any::<u64>()) {
        let store = MemoryStore::with_names((0..size).map(|i| format!("E{i}")));
        let mut session =
            LotterySession::start(store, SessionConfig::default().with_seed(seed)).unwrap();

        let mut seen = HashSet::new();
        while session.state() != SessionState::Complete {
            let before = session.remaining();
            let outcome = session.draw().unwrap();
            prop_assert!(seen.insert(outcome.entry_id));
            prop_assert_eq!(session.remaining(), before - 1);
            prop_assert!(session.entry(outcome.lineup_index).unwrap().selected);
            session.acknowledge_reveal().unwrap();
        }
        prop_assert_eq!(seen.len(), size);
    }

    /// Property: reset(keep) restores the full pool whatever was drawn
    #[test]
    fn reset_keep_restores_pool(size in 1usize..20, draws in 0usize..20, seed in any::<u64>()) {
        let store = MemoryStore::with_names((0..size).map(|i| format!("E{i}")));
        let mut session =
            LotterySession::start(store, SessionConfig::default().with_seed(seed)).unwrap();

        for _ in 0..draws.min(size) {
            session.draw().unwrap();
            session.acknowledge_reveal().unwrap();
        }
        session.reset(true).unwrap();

        prop_assert_eq!(session.remaining(), size);
        prop_assert_eq!(session.state(), SessionState::ReadyToDraw);
        prop_assert!(session.store().list_entries().unwrap().iter().all(|e| !e.selected));
    }
}

#[test]
fn scripted_first_index_draws_in_order() {
    let store = MemoryStore::with_names(["A", "B", "C"]);
    let mut session = LotterySession::with_random(
        store,
        SessionConfig::default().with_shuffle(false),
        ScriptedRandom::first_index(),
    )
    .unwrap();

    let mut order = Vec::new();
    for _ in 0..3 {
        order.push(session.draw().unwrap().name);
        session.acknowledge_reveal().unwrap();
    }
    assert_eq!(order, ["A", "B", "C"]);
    assert_eq!(session.state(), SessionState::Complete);
}

#[test]
fn five_placements_respect_spacing_unless_forced() {
    let config = PlacementConfig::default()
        .with_min_distance(8.0)
        .with_cell_size(6.0);
    let planner = PlacementPlanner::new(config).unwrap();

    for seed in 0..50 {
        let layout = planner.plan(5, &mut StdRng::seed_from_u64(seed));
        assert_eq!(layout.len(), 5);
        let ps = layout.placements();
        for i in 0..ps.len() {
            for j in i + 1..ps.len() {
                let (p, q) = (&ps[i], &ps[j]);
                assert!(
                    p.forced || q.forced || p.position.distance(&q.position) >= 8.0,
                    "seed {seed}: {i} and {j} too close"
                );
            }
        }
    }
}

#[test]
fn revealing_rejects_second_draw() {
    let store = MemoryStore::with_names(["A", "B"]);
    let mut session = LotterySession::start(store, SessionConfig::default()).unwrap();
    session.draw().unwrap();
    let before = session.remaining();
    assert!(matches!(
        session.draw(),
        Err(LotteryError::InvalidState { .. })
    ));
    assert_eq!(session.remaining(), before);
}

#[test]
fn empty_store_is_complete_immediately() {
    let session = LotterySession::start(MemoryStore::new(), SessionConfig::default()).unwrap();
    assert_eq!(session.state(), SessionState::Complete);
}

#[test]
fn session_can_borrow_its_store() {
    let mut store = MemoryStore::with_names(["A", "B"]);
    {
        let mut session = LotterySession::start(&mut store, SessionConfig::default()).unwrap();
        session.draw().unwrap();
    }
    assert_eq!(store.roster().selections().len(), 1);
}
