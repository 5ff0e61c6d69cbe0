//! Weak block state machine.
//!
//! A weak block is a solid tile that burns (straw) or melts (ice) when hit by
//! fire. Lifecycle is strictly forward: Normal → Burning → Disintegrating →
//! removed. Chain ignition of neighbours is driven by the [`crate::sector`]
//! that owns all blocks of an area; this module only reports when a block
//! entered Burning or Disintegrating.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod contact;
pub mod glow;

pub use contact::{
    CollisionHit, Contact, Flammable, HitResponse, Projectile, ProjectileKind, Reaction,
};
pub use glow::{FlickerRng, GameRandom, Glow, LightColor, LightSize};

use crate::config::{BlockSettings, BlockTimings};
use crate::constants::{
    BLOCK_DRAW_LAYER, FIRE_SOUND, MELTBOX_SPRITE, SIZZLE_SOUND, STRAWBOX_SPRITE, TILE_SIZE,
};

pub const ACTION_NORMAL: &str = "normal";
pub const ACTION_BURNING: &str = "burning";
pub const ACTION_DISINTEGRATING: &str = "disintegrating";

/// Lifecycle phase; ordering follows the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockState {
    Normal,
    Burning,
    Disintegrating,
}

/// Which stimulus destroys the block and which cues it plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockVariant {
    /// Straw box: burns, spreads fire to creatures
    Flammable,
    /// Ice box: melts with a sizzle
    Meltable,
}

impl BlockVariant {
    /// Only the meltbox sprite selects Meltable
    pub fn from_sprite(sprite: &str) -> Self {
        if sprite == MELTBOX_SPRITE {
            Self::Meltable
        } else {
            Self::Flammable
        }
    }

    pub fn sprite(&self) -> &'static str {
        match self {
            Self::Flammable => STRAWBOX_SPRITE,
            Self::Meltable => MELTBOX_SPRITE,
        }
    }

    pub fn sound(&self) -> &'static str {
        match self {
            Self::Flammable => FIRE_SOUND,
            Self::Meltable => SIZZLE_SOUND,
        }
    }

    pub fn ignites_creatures(&self) -> bool {
        matches!(self, Self::Flammable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionGroup {
    /// Solid, blocks movement
    Static,
    /// Excluded from collision
    Disabled,
}

/// Currently playing sprite action. One-shot actions report done once their time is up.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAction {
    name: &'static str,
    remaining: Option<f32>,
}

impl SpriteAction {
    pub fn looping(name: &'static str) -> Self {
        Self {
            name,
            remaining: None,
        }
    }

    pub fn once(name: &'static str, secs: f32) -> Self {
        Self {
            name,
            remaining: Some(secs),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= dt;
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.remaining, Some(r) if r <= 0.0)
    }
}

/// Outcome of one update step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    /// Burn finished; the block is now Disintegrating and sets its neighbours alight
    Disintegrating,
    /// Disintegration finished; the owner must drop the block
    Removed,
}

#[derive(Debug, Clone)]
pub struct WeakBlock {
    state: BlockState,
    variant: BlockVariant,
    linked: bool,
    bbox: Rect,
    group: CollisionGroup,
    action: SpriteAction,
    glow: Glow,
    timings: BlockTimings,
}

impl WeakBlock {
    pub fn new(settings: &BlockSettings, timings: BlockTimings) -> Self {
        let variant = settings.variant();
        let origin = Vec2::new(settings.x, settings.y);
        Self {
            state: BlockState::Normal,
            variant,
            linked: settings.linked,
            bbox: Rect::from_corners(origin, origin + Vec2::splat(TILE_SIZE)),
            group: CollisionGroup::Static,
            action: SpriteAction::looping(ACTION_NORMAL),
            glow: Glow::burning(variant == BlockVariant::Flammable),
            timings,
        }
    }

    pub fn state(&self) -> BlockState {
        self.state
    }

    pub fn variant(&self) -> BlockVariant {
        self.variant
    }

    pub fn linked(&self) -> bool {
        self.linked
    }

    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    /// Top-left corner; proximity checks compare anchors, not centers
    pub fn anchor(&self) -> Vec2 {
        self.bbox.min
    }

    pub fn group(&self) -> CollisionGroup {
        self.group
    }

    pub fn is_solid(&self) -> bool {
        self.group == CollisionGroup::Static
    }

    pub fn action_name(&self) -> &'static str {
        self.action.name()
    }

    pub fn glow(&self) -> &Glow {
        &self.glow
    }

    pub fn shows_glow(&self) -> bool {
        self.linked && self.state != BlockState::Normal
    }

    pub fn draw_layer(&self) -> i32 {
        BLOCK_DRAW_LAYER
    }

    /// Sound to preload when the block is created
    pub fn preload_sound(&self) -> &'static str {
        self.variant.sound()
    }

    /// Every contact resolves with the block held in place
    pub fn hit_response(&self) -> HitResponse {
        HitResponse::ForceMove
    }

    /// Start burning. Returns false, changing nothing, unless the block was Normal.
    pub fn ignite(&mut self) -> bool {
        if self.state != BlockState::Normal {
            return false;
        }
        self.state = BlockState::Burning;
        self.action = SpriteAction::once(ACTION_BURNING, self.timings.burn_secs);
        true
    }

    pub fn collision(&mut self, contact: Contact<'_>, hit: &CollisionHit) -> Reaction {
        match self.state {
            BlockState::Normal => match contact {
                Contact::Projectile(projectile) => self.collision_bullet(projectile, hit),
                Contact::Explosion => self.ignite_reaction(),
                Contact::Creature(_) | Contact::Other => Reaction::None,
            },
            BlockState::Burning => {
                if let Contact::Creature(creature) = contact {
                    if self.variant.ignites_creatures() {
                        creature.ignite();
                    }
                }
                Reaction::None
            }
            BlockState::Disintegrating => Reaction::None,
        }
    }

    /// Only fire destroys a block; other projectiles bounce off a Normal block.
    pub fn collision_bullet(
        &mut self,
        projectile: &mut dyn Projectile,
        hit: &CollisionHit,
    ) -> Reaction {
        if self.state != BlockState::Normal {
            return Reaction::None;
        }
        if projectile.kind().is_incendiary() {
            let reaction = self.ignite_reaction();
            projectile.consume();
            reaction
        } else {
            projectile.ricochet(hit);
            Reaction::None
        }
    }

    fn ignite_reaction(&mut self) -> Reaction {
        if self.ignite() {
            Reaction::Ignited
        } else {
            Reaction::None
        }
    }

    pub fn update(&mut self, dt: f32, rng: &mut impl FlickerRng) -> Transition {
        match self.state {
            BlockState::Normal => Transition::None,
            BlockState::Burning => {
                if self.linked {
                    self.glow.flicker(rng);
                }
                self.action.advance(dt);
                if !self.action.is_done() {
                    return Transition::None;
                }
                self.state = BlockState::Disintegrating;
                self.action =
                    SpriteAction::once(ACTION_DISINTEGRATING, self.timings.disintegrate_secs);
                self.group = CollisionGroup::Disabled;
                self.glow = Glow::embers();
                Transition::Disintegrating
            }
            BlockState::Disintegrating => {
                self.action.advance(dt);
                if self.action.is_done() {
                    Transition::Removed
                } else {
                    Transition::None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.125;

    #[derive(Default)]
    struct TestBullet {
        kind: Option<ProjectileKind>,
        consumed: bool,
        ricochets: u32,
    }

    impl TestBullet {
        fn of(kind: ProjectileKind) -> Self {
            Self {
                kind: Some(kind),
                ..Default::default()
            }
        }
    }

    impl Projectile for TestBullet {
        fn kind(&self) -> ProjectileKind {
            self.kind.unwrap_or(ProjectileKind::Ice)
        }

        fn consume(&mut self) {
            self.consumed = true;
        }

        fn ricochet(&mut self, _hit: &CollisionHit) {
            self.ricochets += 1;
        }
    }

    #[derive(Default)]
    struct TestCreature {
        ignitions: u32,
    }

    impl Flammable for TestCreature {
        fn ignite(&mut self) {
            self.ignitions += 1;
        }
    }

    fn timings() -> BlockTimings {
        BlockTimings {
            burn_secs: 0.5,
            disintegrate_secs: 0.25,
        }
    }

    fn straw() -> WeakBlock {
        WeakBlock::new(&BlockSettings::at(32.0, 64.0), timings())
    }

    fn ice() -> WeakBlock {
        WeakBlock::new(
            &BlockSettings::at(0.0, 0.0).with_sprite(MELTBOX_SPRITE),
            timings(),
        )
    }

    fn run_until(block: &mut WeakBlock, want: Transition) -> u32 {
        let mut rng = GameRandom::seeded(1);
        for frame in 1..1000 {
            if block.update(DT, &mut rng) == want {
                return frame;
            }
        }
        panic!("never reached {want:?}");
    }

    #[test]
    fn test_new_block() {
        let block = straw();
        assert_eq!(block.state(), BlockState::Normal);
        assert_eq!(block.variant(), BlockVariant::Flammable);
        assert!(block.linked());
        assert!(block.is_solid());
        assert_eq!(block.action_name(), ACTION_NORMAL);
        assert_eq!(block.anchor(), Vec2::new(32.0, 64.0));
        assert_eq!(block.bbox().max, Vec2::new(64.0, 96.0));
        assert!(!block.shows_glow());
        assert_eq!(block.preload_sound(), FIRE_SOUND);
        assert_eq!(ice().preload_sound(), SIZZLE_SOUND);
    }

    #[test]
    fn test_ignite_is_idempotent() {
        let mut block = straw();
        assert!(block.ignite());
        assert_eq!(block.state(), BlockState::Burning);
        assert_eq!(block.action_name(), ACTION_BURNING);
        assert!(!block.ignite());
        assert_eq!(block.state(), BlockState::Burning);
    }

    #[test]
    fn test_fire_bullet_ignites_and_is_consumed() {
        let mut block = straw();
        let mut bullet = TestBullet::of(ProjectileKind::Fire);
        let reaction = block.collision(Contact::Projectile(&mut bullet), &CollisionHit::from_left());
        assert_eq!(reaction, Reaction::Ignited);
        assert!(bullet.consumed);
        assert_eq!(block.state(), BlockState::Burning);
    }

    #[test]
    fn test_second_fire_bullet_same_frame_passes() {
        let mut block = straw();
        let mut first = TestBullet::of(ProjectileKind::Fire);
        let mut second = TestBullet::of(ProjectileKind::Fire);
        let hit = CollisionHit::from_top();
        assert_eq!(block.collision_bullet(&mut first, &hit), Reaction::Ignited);
        assert_eq!(block.collision_bullet(&mut second, &hit), Reaction::None);
        assert!(first.consumed);
        assert!(!second.consumed);
    }

    #[test]
    fn test_other_bullets_ricochet() {
        let mut block = straw();
        for kind in [ProjectileKind::Ice, ProjectileKind::Air, ProjectileKind::Earth] {
            let mut bullet = TestBullet::of(kind);
            let reaction =
                block.collision(Contact::Projectile(&mut bullet), &CollisionHit::from_left());
            assert_eq!(reaction, Reaction::None);
            assert_eq!(bullet.ricochets, 1);
            assert!(!bullet.consumed);
        }
        assert_eq!(block.state(), BlockState::Normal);
    }

    #[test]
    fn test_bullets_ignored_after_normal() {
        let mut block = straw();
        block.ignite();
        let mut bullet = TestBullet::of(ProjectileKind::Ice);
        block.collision_bullet(&mut bullet, &CollisionHit::default());
        assert_eq!(bullet.ricochets, 0);
        assert_eq!(block.state(), BlockState::Burning);
    }

    #[test]
    fn test_explosion_ignites_only_normal() {
        let mut block = straw();
        let hit = CollisionHit::default();
        assert_eq!(block.collision(Contact::Explosion, &hit), Reaction::Ignited);
        assert_eq!(block.collision(Contact::Explosion, &hit), Reaction::None);
        assert_eq!(block.state(), BlockState::Burning);
    }

    #[test]
    fn test_other_contact_does_nothing() {
        let mut block = straw();
        let reaction = block.collision(Contact::Other, &CollisionHit::default());
        assert_eq!(reaction, Reaction::None);
        assert_eq!(block.state(), BlockState::Normal);
        assert_eq!(block.hit_response(), HitResponse::ForceMove);
    }

    #[test]
    fn test_burning_straw_ignites_creature_every_contact() {
        let mut block = straw();
        let mut creature = TestCreature::default();
        let hit = CollisionHit::default();

        block.collision(Contact::Creature(&mut creature), &hit);
        assert_eq!(creature.ignitions, 0, "normal block must not ignite");

        block.ignite();
        for _ in 0..3 {
            block.collision(Contact::Creature(&mut creature), &hit);
        }
        assert_eq!(creature.ignitions, 3);
        assert_eq!(block.state(), BlockState::Burning);
    }

    #[test]
    fn test_burning_ice_does_not_ignite_creature() {
        let mut block = ice();
        block.ignite();
        let mut creature = TestCreature::default();
        block.collision(Contact::Creature(&mut creature), &CollisionHit::default());
        assert_eq!(creature.ignitions, 0);
    }

    #[test]
    fn test_burn_then_disintegrate() {
        let mut block = straw();
        block.ignite();
        assert!(block.shows_glow());

        let frames = run_until(&mut block, Transition::Disintegrating);
        assert_eq!(frames, 4);
        assert_eq!(block.state(), BlockState::Disintegrating);
        assert_eq!(block.action_name(), ACTION_DISINTEGRATING);
        assert!(!block.is_solid());
        assert_eq!(block.group(), CollisionGroup::Disabled);
        assert_eq!(*block.glow(), Glow::embers());

        let frames = run_until(&mut block, Transition::Removed);
        assert_eq!(frames, 2);
    }

    #[test]
    fn test_disintegrating_ignores_creatures() {
        let mut block = straw();
        block.ignite();
        run_until(&mut block, Transition::Disintegrating);
        let mut creature = TestCreature::default();
        block.collision(Contact::Creature(&mut creature), &CollisionHit::default());
        assert_eq!(creature.ignitions, 0);
    }

    #[test]
    fn test_normal_update_is_noop() {
        let mut block = straw();
        let mut rng = GameRandom::seeded(3);
        for _ in 0..100 {
            assert_eq!(block.update(DT, &mut rng), Transition::None);
        }
        assert_eq!(block.state(), BlockState::Normal);
    }

    #[test]
    fn test_unlinked_hides_glow() {
        let mut block = WeakBlock::new(&BlockSettings::at(0.0, 0.0).with_linked(false), timings());
        block.ignite();
        assert!(!block.shows_glow());
        let before = *block.glow();
        block.update(DT, &mut GameRandom::seeded(9));
        assert_eq!(*block.glow(), before, "unlinked blocks do not flicker");
    }

    #[test]
    fn test_states_are_ordered() {
        assert!(BlockState::Normal < BlockState::Burning);
        assert!(BlockState::Burning < BlockState::Disintegrating);
    }
}
