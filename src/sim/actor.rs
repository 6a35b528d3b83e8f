//! Actors and their motion model
//!
//! Every movement goes through [`Actor::move_in`]: keyboard input, waypoint
//! seeking and patrol all end up there or in [`Actor::move_to`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{BoundingRect, rect_intersect};
use crate::assets::Texture;
use crate::platform::{Key, TickInput};

/// Stable actor identity, used for non-owning references into the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Any positioned, drawable, optionally collidable entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Patrol anchor
    pub home: Vec2,
    /// Current patrol waypoint
    pub target: Vec2,
    /// Units per tick
    pub speed: f32,
    /// Per-axis intent, each component in {-1, 0, 1}
    pub direction: Vec2,
    /// Visible and alive; false means soft-deleted
    pub draw: bool,
    pub collision_enabled: bool,
    pub texture: Texture,
    /// Position before the last `move_in`, for rollback
    #[serde(default)]
    prev_pos: Vec2,
}

impl Actor {
    pub fn new(
        id: ActorId,
        name: impl Into<String>,
        pos: Vec2,
        texture: Texture,
        speed: f32,
        collision_enabled: bool,
    ) -> Self {
        debug_assert!(pos.is_finite(), "actor spawned at non-finite position");
        Self {
            id,
            name: name.into(),
            pos,
            home: pos,
            target: pos,
            speed: speed.max(0.0),
            direction: Vec2::ZERO,
            draw: true,
            collision_enabled,
            texture,
            prev_pos: pos,
        }
    }

    /// Visible and collidable
    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.draw && self.collision_enabled
    }

    pub fn bounding_rect(&self) -> BoundingRect {
        BoundingRect::from_pos_size(self.pos, self.texture.size())
    }

    pub fn center(&self) -> Vec2 {
        crate::box_center(self.pos, self.texture.size())
    }

    pub fn collides_with(&self, other: &Actor) -> bool {
        rect_intersect(&self.bounding_rect(), &other.bounding_rect())
    }

    /// Step `speed` units along `direction`; zero-length directions are ignored
    pub fn move_in(&mut self, direction: Vec2) {
        if direction.length_squared() > 0.0 {
            self.prev_pos = self.pos;
            self.pos += direction.normalize() * self.speed;
        }
    }

    /// Arrow keys set the per-axis intent; opposite keys cancel out
    pub fn handle_input(&mut self, input: &TickInput) {
        self.direction = Vec2::ZERO;
        for key in &input.pressed {
            match key {
                Key::Up => self.direction.y = -1.0,
                Key::Down => self.direction.y = 1.0,
                Key::Left => self.direction.x = -1.0,
                Key::Right => self.direction.x = 1.0,
                _ => {}
            }
        }
        if input.is_pressed(Key::Up) && input.is_pressed(Key::Down) {
            self.direction.y = 0.0;
        }
        if input.is_pressed(Key::Left) && input.is_pressed(Key::Right) {
            self.direction.x = 0.0;
        }
        self.move_in(self.direction);
    }

    /// Undo the last `move_in` by restoring the saved position
    pub fn rollback_position(&mut self) {
        self.pos = self.prev_pos;
    }

    /// Step toward `target` along its bearing, snapping any overshooting axis
    pub fn move_to(&mut self, target: Vec2) {
        let delta = target - self.pos;
        if delta == Vec2::ZERO {
            return;
        }
        let bearing = delta.y.atan2(delta.x);
        self.prev_pos = self.pos;
        self.pos += Vec2::new(bearing.cos(), bearing.sin()) * self.speed;

        let overshot = |travel: f32, now: f32, goal: f32| {
            travel == 0.0 || (travel > 0.0 && now >= goal) || (travel < 0.0 && now <= goal)
        };
        if overshot(delta.x, self.pos.x, target.x) {
            self.pos.x = target.x;
        }
        if overshot(delta.y, self.pos.y, target.y) {
            self.pos.y = target.y;
        }
    }

    /// Wander between random waypoints within `range` of home
    pub fn patrol(&mut self, range: f32, rng: &mut impl Rng) {
        if self.pos == self.target {
            let range = range.abs();
            self.target = Vec2::new(
                self.home.x + rng.random_range(-range..=range),
                self.home.y + rng.random_range(-range..=range),
            );
            log::trace!(
                "{} patrols to ({:.1}, {:.1})",
                self.name,
                self.target.x,
                self.target.y
            );
        } else {
            self.move_to(self.target);
        }
    }

    /// Keep the whole sprite inside `[0, max_x] x [0, max_y]`
    pub fn set_limit_bounds(&mut self, max_x: f32, max_y: f32) {
        let size = self.texture.size();
        self.pos.x = self.pos.x.min(max_x - size.x).max(0.0);
        self.pos.y = self.pos.y.min(max_y - size.y).max(0.0);
    }
}
