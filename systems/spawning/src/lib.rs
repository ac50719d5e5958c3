#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for choosing where food appears.

use glam::Vec2;
use physnake_core::{FoodKind, GridPosition, Playfield, SpawnPolicy};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    policy: SpawnPolicy,
    max_impulse: f32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided kind policy, impulse bound and seed.
    #[must_use]
    pub const fn new(policy: SpawnPolicy, max_impulse: f32, rng_seed: u64) -> Self {
        Self {
            policy,
            max_impulse,
            rng_seed,
        }
    }
}

/// Placement chosen for a new food item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoodSpawn {
    /// Kind of the new item.
    pub kind: FoodKind,
    /// Grid-aligned cell whose centre the item starts at.
    pub cell: GridPosition,
    /// Initial velocity in world units per second.
    pub velocity: Vec2,
}

/// Seeded system that picks a kind, a cell inside the inset playfield and a
/// small random impulse for every food item.
#[derive(Debug)]
pub struct FoodSpawner {
    policy: SpawnPolicy,
    max_impulse: f32,
    rng: ChaCha8Rng,
}

impl FoodSpawner {
    /// Creates a new spawner using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            policy: config.policy,
            max_impulse: config.max_impulse.max(0.0),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Chooses the next food placement on `playfield`.
    pub fn next(&mut self, playfield: Playfield) -> FoodSpawn {
        let kind = self.select_kind();
        let cell = self.select_cell(playfield);
        let velocity = self.select_velocity();
        FoodSpawn {
            kind,
            cell,
            velocity,
        }
    }

    fn select_kind(&mut self) -> FoodKind {
        match self.policy {
            SpawnPolicy::AlwaysOrdinary => FoodKind::Ordinary,
            SpawnPolicy::ShrinkChance { probability } => {
                let probability = f64::from(probability.clamp(0.0, 1.0));
                if self.rng.gen_bool(probability) {
                    FoodKind::Shrink
                } else {
                    FoodKind::Ordinary
                }
            }
        }
    }

    fn select_cell(&mut self, playfield: Playfield) -> GridPosition {
        let (columns, rows) = playfield.inset_cells();
        let column = self.rng.gen_range(0..columns);
        let row = self.rng.gen_range(0..rows);
        playfield.inset_cell_position(column, row)
    }

    fn select_velocity(&mut self) -> Vec2 {
        if self.max_impulse == 0.0 {
            return Vec2::ZERO;
        }
        let bound = self.max_impulse;
        Vec2::new(
            self.rng.gen_range(-bound..=bound),
            self.rng.gen_range(-bound..=bound),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_impulse_spawns_at_rest() {
        let mut spawner = FoodSpawner::new(Config::new(SpawnPolicy::AlwaysOrdinary, 0.0, 7));
        let spawn = spawner.next(Playfield::new(200, 200, 20));
        assert_eq!(spawn.velocity, Vec2::ZERO);
    }

    #[test]
    fn negative_impulse_is_treated_as_zero() {
        let spawner = FoodSpawner::new(Config::new(SpawnPolicy::AlwaysOrdinary, -3.0, 7));
        assert_eq!(spawner.max_impulse, 0.0);
    }
}
