use physnake_core::{FoodKind, Playfield, SpawnPolicy};
use physnake_system_spawning::{Config, FoodSpawner};
use proptest::prelude::*;

proptest! {
    #[test]
    fn spawns_land_on_inset_cells(
        seed in any::<u64>(),
        columns in 1_u32..40,
        rows in 1_u32..40,
        grid in prop_oneof![Just(10_u32), Just(20), Just(32)],
    ) {
        let playfield = Playfield::new(columns * grid, rows * grid, grid);
        let mut spawner = FoodSpawner::new(Config::new(SpawnPolicy::AlwaysOrdinary, 150.0, seed));
        for _ in 0..16 {
            let spawn = spawner.next(playfield);
            if columns >= 3 && rows >= 3 {
                prop_assert!(playfield.is_inset_cell(spawn.cell), "{:?}", spawn.cell);
                prop_assert!(playfield.contains(spawn.cell));
            }
            prop_assert!(spawn.velocity.x.abs() <= 150.0);
            prop_assert!(spawn.velocity.y.abs() <= 150.0);
        }
    }
}

#[test]
fn identical_seeds_replay_identical_spawns() {
    let playfield = Playfield::new(600, 400, 20);
    let config = Config::new(SpawnPolicy::ShrinkChance { probability: 0.5 }, 150.0, 0xfeed);
    let mut first = FoodSpawner::new(config);
    let mut second = FoodSpawner::new(config);

    for _ in 0..32 {
        assert_eq!(first.next(playfield), second.next(playfield));
    }
}

#[test]
fn different_seeds_diverge() {
    let playfield = Playfield::new(600, 400, 20);
    let mut first = FoodSpawner::new(Config::new(SpawnPolicy::AlwaysOrdinary, 150.0, 1));
    let mut second = FoodSpawner::new(Config::new(SpawnPolicy::AlwaysOrdinary, 150.0, 2));

    let first: Vec<_> = (0..8).map(|_| first.next(playfield).cell).collect();
    let second: Vec<_> = (0..8).map(|_| second.next(playfield).cell).collect();
    assert_ne!(first, second);
}

#[test]
fn always_ordinary_never_spawns_shrink_food() {
    let playfield = Playfield::new(600, 400, 20);
    let mut spawner = FoodSpawner::new(Config::new(SpawnPolicy::AlwaysOrdinary, 150.0, 99));
    assert!((0..200).all(|_| spawner.next(playfield).kind == FoodKind::Ordinary));
}

#[test]
fn certain_shrink_chance_always_spawns_shrink_food() {
    let playfield = Playfield::new(600, 400, 20);
    let mut spawner = FoodSpawner::new(Config::new(
        SpawnPolicy::ShrinkChance { probability: 1.0 },
        150.0,
        99,
    ));
    assert!((0..50).all(|_| spawner.next(playfield).kind == FoodKind::Shrink));
}

#[test]
fn shrink_chance_mixes_kinds() {
    let playfield = Playfield::new(600, 400, 20);
    let mut spawner = FoodSpawner::new(Config::new(
        SpawnPolicy::ShrinkChance { probability: 0.3 },
        150.0,
        12_345,
    ));
    let shrink = (0..1_000)
        .filter(|_| spawner.next(playfield).kind == FoodKind::Shrink)
        .count();
    assert!((200..400).contains(&shrink), "shrink count {shrink}");
}

#[test]
fn degenerate_playfield_still_spawns() {
    let playfield = Playfield::new(40, 40, 20);
    let mut spawner = FoodSpawner::new(Config::new(SpawnPolicy::AlwaysOrdinary, 150.0, 3));
    let spawn = spawner.next(playfield);
    assert_eq!(spawn.cell, playfield.inset_cell_position(0, 0));
}
