//! What a weak block can be hit by, and how the collision engine is answered.
//!
//! The collision engine classifies the other party into a [`Contact`] before
//! calling in; projectile and creature behaviour stays with those objects and
//! is reached through the [`Projectile`] and [`Flammable`] capabilities.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// How the collision engine should resolve a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitResponse {
    /// Both sides keep resolving normally
    ContinueCollision,
    /// Cancel the other side's move
    AbortMove,
    /// Do not move me, the other side resolves
    ForceMove,
}

/// Contact geometry from the collision engine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionHit {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
    pub slope_normal: Vec2,
}

impl CollisionHit {
    pub fn from_left() -> Self {
        Self {
            left: true,
            ..Default::default()
        }
    }

    pub fn from_top() -> Self {
        Self {
            top: true,
            ..Default::default()
        }
    }

    /// Surface normal of the struck face, pointing away from the block
    pub fn normal(&self) -> Vec2 {
        if self.slope_normal != Vec2::ZERO {
            return self.slope_normal;
        }
        let x = match (self.left, self.right) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        let y = match (self.top, self.bottom) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        Vec2::new(x, y).normalize_or_zero()
    }
}

/// Bonus projectile types a player can shoot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    Fire,
    Ice,
    Air,
    Earth,
}

impl ProjectileKind {
    pub fn is_incendiary(&self) -> bool {
        matches!(self, Self::Fire)
    }
}

/// Projectile capability used by the block
pub trait Projectile {
    fn kind(&self) -> ProjectileKind;
    /// Destroy the projectile on impact
    fn consume(&mut self);
    /// Deflect off the struck surface
    fn ricochet(&mut self, hit: &CollisionHit);
}

/// Anything that can be set on fire (hostile creatures)
pub trait Flammable {
    fn ignite(&mut self);
}

/// The other party of a contact
pub enum Contact<'a> {
    Projectile(&'a mut dyn Projectile),
    Explosion,
    Creature(&'a mut dyn Flammable),
    Other,
}

impl Contact<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Projectile(_) => "projectile",
            Self::Explosion => "explosion",
            Self::Creature(_) => "creature",
            Self::Other => "other",
        }
    }
}

/// Effect a contact had on the block itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    None,
    /// The block entered Burning
    Ignited,
}
