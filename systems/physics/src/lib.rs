#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rigid-body simulation that moves food items around the playfield.
//!
//! The simulation runs in cell units: one grid cell maps to one simulation
//! metre. Callers work exclusively in world units (pixels) and the
//! conversion happens at this crate's boundary.

mod food;

use glam::Vec2;
use physnake_core::{PhysicsConfig, Playfield};
use rapier2d::prelude::*;
use tracing::debug;

pub use food::{food_anchor_from_center, FoodBody};

/// Owns the rapier pipeline, the static boundary walls and any dynamic bodies.
pub struct PhysicsWorld {
    pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    integration_params: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    walls: Vec<RigidBodyHandle>,
    dynamic_bodies: Vec<RigidBodyHandle>,
    material: Material,
    units_per_metre: f32,
    destroyed: bool,
}

/// Surface and mass properties applied to every dynamic body.
#[derive(Clone, Copy, Debug)]
struct Material {
    restitution: f32,
    friction: f32,
    density: f32,
    linear_damping: f32,
}

impl PhysicsWorld {
    /// Creates a simulation surrounding the playfield with four static walls.
    #[must_use]
    pub fn new(playfield: Playfield, config: &PhysicsConfig) -> Self {
        let units_per_metre = playfield.grid_size().max(1) as f32;
        let gravity = config.gravity / units_per_metre;
        let integration_params = IntegrationParameters {
            dt: config.timestep_seconds,
            ..IntegrationParameters::default()
        };

        let mut world = Self {
            pipeline: PhysicsPipeline::new(),
            gravity: vector![gravity.x, gravity.y],
            integration_params,
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            walls: Vec::with_capacity(4),
            dynamic_bodies: Vec::new(),
            material: Material {
                restitution: config.restitution,
                friction: config.friction,
                density: config.density,
                linear_damping: config.linear_damping,
            },
            units_per_metre,
            destroyed: false,
        };
        world.build_walls(playfield, config.wall_thickness);
        world
    }

    fn build_walls(&mut self, playfield: Playfield, thickness: f32) {
        let width = playfield.width() as f32;
        let height = playfield.height() as f32;
        let half = thickness * 0.5;

        // (centre, half extents) in world units; the corners overlap.
        let walls = [
            (
                Vec2::new(width * 0.5, -half),
                Vec2::new(width * 0.5 + thickness, half),
            ),
            (
                Vec2::new(width * 0.5, height + half),
                Vec2::new(width * 0.5 + thickness, half),
            ),
            (
                Vec2::new(-half, height * 0.5),
                Vec2::new(half, height * 0.5 + thickness),
            ),
            (
                Vec2::new(width + half, height * 0.5),
                Vec2::new(half, height * 0.5 + thickness),
            ),
        ];

        for (centre, half_extents) in walls {
            let centre = self.to_simulation(centre);
            let half_extents = self.to_simulation(half_extents);
            let body = RigidBodyBuilder::fixed().translation(centre).build();
            let handle = self.rigid_body_set.insert(body);
            let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
                .restitution(self.material.restitution)
                .friction(self.material.friction)
                .build();
            let _ = self
                .collider_set
                .insert_with_parent(collider, handle, &mut self.rigid_body_set);
            self.walls.push(handle);
        }
    }

    /// Inserts the food item's rigid body into the simulation.
    ///
    /// Returns `false` without side effects when the world has been destroyed
    /// or the food is already a member.
    pub fn add_body(&mut self, food: &mut FoodBody) -> bool {
        if self.destroyed || food.handle().is_some() {
            return false;
        }

        let centre = self.to_simulation(food.initial_center());
        let velocity = self.to_simulation(food.initial_velocity());
        let body = RigidBodyBuilder::dynamic()
            .translation(centre)
            .linvel(velocity)
            .linear_damping(self.material.linear_damping)
            .ccd_enabled(true)
            .build();
        let handle = self.rigid_body_set.insert(body);
        let collider = ColliderBuilder::ball(0.5)
            .restitution(self.material.restitution)
            .friction(self.material.friction)
            .density(self.material.density)
            .build();
        let _ = self
            .collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        self.dynamic_bodies.push(handle);
        food.attach(handle);
        debug!(kind = ?food.kind(), centre = ?food.initial_center(), "food body added");
        true
    }

    /// Removes the food item's rigid body from the simulation.
    ///
    /// Removing a body that is not a member is a no-op.
    pub fn remove_body(&mut self, food: &mut FoodBody) {
        let Some(handle) = food.detach() else {
            return;
        };
        let Some(index) = self.dynamic_bodies.iter().position(|&member| member == handle) else {
            return;
        };
        let _ = self.dynamic_bodies.swap_remove(index);
        let _ = self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        debug!(kind = ?food.kind(), "food body removed");
    }

    /// Advances every body by one fixed physics timestep.
    pub fn update(&mut self) {
        if self.destroyed {
            return;
        }
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Releases every body and the simulation state. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.walls.clear();
        self.dynamic_bodies.clear();
        self.rigid_body_set = RigidBodySet::new();
        self.collider_set = ColliderSet::new();
        self.impulse_joint_set = ImpulseJointSet::new();
        self.multibody_joint_set = MultibodyJointSet::new();
        self.island_manager = IslandManager::new();
        self.broad_phase = DefaultBroadPhase::new();
        self.narrow_phase = NarrowPhase::new();
        self.ccd_solver = CCDSolver::new();
        debug!("physics world destroyed");
    }

    /// Reports whether [`PhysicsWorld::destroy`] has been called.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Number of dynamic bodies currently simulated.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.dynamic_bodies.len()
    }

    /// Number of static boundary walls currently simulated.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Centre and rotation of a member body in world units.
    #[must_use]
    pub fn body_pose(&self, food: &FoodBody) -> Option<(Vec2, f32)> {
        let handle = food.handle()?;
        let body = self.rigid_body_set.get(handle)?;
        let translation = body.translation();
        let centre = Vec2::new(translation.x, translation.y) * self.units_per_metre;
        Some((centre, body.rotation().angle()))
    }

    /// Linear velocity of a member body in world units per second.
    #[must_use]
    pub fn body_velocity(&self, food: &FoodBody) -> Option<Vec2> {
        let handle = food.handle()?;
        let body = self.rigid_body_set.get(handle)?;
        let velocity = body.linvel();
        Some(Vec2::new(velocity.x, velocity.y) * self.units_per_metre)
    }

    fn to_simulation(&self, value: Vec2) -> Vector<Real> {
        let scaled = value / self.units_per_metre;
        vector![scaled.x, scaled.y]
    }
}

impl std::fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("bodies", &self.dynamic_bodies.len())
            .field("walls", &self.walls.len())
            .field("units_per_metre", &self.units_per_metre)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
