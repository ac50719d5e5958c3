use glam::Vec2;
use physnake_core::{FoodKind, FoodSnapshot, GridPosition};
use rapier2d::prelude::RigidBodyHandle;

use crate::PhysicsWorld;

/// Food item backed by a circular rigid body.
///
/// The body is the source of truth; [`FoodBody::update`] copies its pose into
/// the cached top-left anchored position that the rest of the game reads.
#[derive(Clone, Debug)]
pub struct FoodBody {
    kind: FoodKind,
    grid_size: u32,
    initial_center: Vec2,
    initial_velocity: Vec2,
    position: Vec2,
    angle: f32,
    handle: Option<RigidBodyHandle>,
}

impl FoodBody {
    /// Creates a food item centred in `cell`, moving with `velocity`.
    ///
    /// The item only starts simulating once passed to
    /// [`PhysicsWorld::add_body`].
    #[must_use]
    pub fn new(kind: FoodKind, cell: GridPosition, velocity: Vec2, grid_size: u32) -> Self {
        let position = cell.as_vec2();
        Self {
            kind,
            grid_size,
            initial_center: position + Vec2::splat(grid_size as f32 * 0.5),
            initial_velocity: velocity,
            position,
            angle: 0.0,
            handle: None,
        }
    }

    /// Re-reads the body's pose from the physics world.
    ///
    /// Leaves the cached projection untouched when the body is not simulated.
    pub fn update(&mut self, world: &PhysicsWorld) {
        if let Some((center, angle)) = world.body_pose(self) {
            self.position = food_anchor_from_center(center, self.grid_size);
            self.angle = angle;
        }
    }

    /// Kind of the food item, fixed at construction.
    #[must_use]
    pub const fn kind(&self) -> FoodKind {
        self.kind
    }

    /// Cached top-left anchored position in world units.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Cached rotation in radians.
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Reports whether the item currently has a body in a physics world.
    #[must_use]
    pub const fn is_simulated(&self) -> bool {
        self.handle.is_some()
    }

    /// Copies the cached projection.
    #[must_use]
    pub const fn snapshot(&self) -> FoodSnapshot {
        FoodSnapshot {
            kind: self.kind,
            position: self.position,
            angle: self.angle,
        }
    }

    pub(crate) const fn initial_center(&self) -> Vec2 {
        self.initial_center
    }

    pub(crate) const fn initial_velocity(&self) -> Vec2 {
        self.initial_velocity
    }

    pub(crate) const fn handle(&self) -> Option<RigidBodyHandle> {
        self.handle
    }

    pub(crate) fn attach(&mut self, handle: RigidBodyHandle) {
        self.handle = Some(handle);
    }

    pub(crate) fn detach(&mut self) -> Option<RigidBodyHandle> {
        self.handle.take()
    }
}

/// Converts a body centre into the top-left corner of the cell it occupies.
#[must_use]
pub fn food_anchor_from_center(center: Vec2, grid_size: u32) -> Vec2 {
    center - Vec2::splat(grid_size as f32 * 0.5)
}
