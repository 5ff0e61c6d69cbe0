use bevy::prelude::*;

use super::{BlockEvent, BlockId, Sector};
use crate::block::{CollisionHit, Contact, Flammable, GameRandom, Projectile, ProjectileKind};
use crate::config::BlockTimings;

pub struct WeakBlockPlugin {
    pub timings: BlockTimings,
}

impl Default for WeakBlockPlugin {
    fn default() -> Self {
        Self {
            timings: BlockTimings::default(),
        }
    }
}

impl Plugin for WeakBlockPlugin {
    fn build(&self, app: &mut App) {
        let sector = Sector::try_new(self.timings).unwrap_or_else(|e| {
            tracing::warn!("{}, using default weak block timings", e);
            Sector::new(BlockTimings::default())
        });
        app.insert_resource(SectorBlocks(sector))
            .init_resource::<FlickerSource>()
            .add_event::<BlockContactEvent>()
            .add_event::<SoundEvent>()
            .add_event::<ProjectileEvent>()
            .add_event::<CreatureIgniteEvent>()
            .add_event::<BlockRemovedEvent>()
            .add_systems(
                Update,
                (apply_block_contacts, tick_weak_blocks, forward_block_events).chain(),
            );
    }
}

/// The weak blocks of the current area
#[derive(Resource, Debug, Default)]
pub struct SectorBlocks(pub Sector);

/// Random source for glow flicker
#[derive(Resource, Debug)]
pub struct FlickerSource(pub GameRandom);

impl Default for FlickerSource {
    fn default() -> Self {
        Self(GameRandom::seeded(rand::random()))
    }
}

/// Category of the other party, as classified by the collision engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Projectile(ProjectileKind),
    Explosion,
    HostileCreature,
    Other,
}

/// Collision engine → weak block
#[derive(Event, Debug, Clone)]
pub struct BlockContactEvent {
    pub block: BlockId,
    pub other: Entity,
    pub kind: ContactKind,
    pub hit: CollisionHit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Preload,
    Play,
}

/// Weak block → audio
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SoundEvent {
    pub sound: &'static str,
    pub cue: SoundCue,
}

/// Weak block → projectile owner
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ProjectileEvent {
    Consumed(Entity),
    Ricochet { projectile: Entity, normal: Vec2 },
}

/// Weak block → creature: catch fire
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatureIgniteEvent(pub Entity);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRemovedEvent(pub BlockId);

/// Records what the block did to a projectile entity
struct ProjectileProxy {
    kind: ProjectileKind,
    consumed: bool,
    ricochet: Option<Vec2>,
}

impl Projectile for ProjectileProxy {
    fn kind(&self) -> ProjectileKind {
        self.kind
    }

    fn consume(&mut self) {
        self.consumed = true;
    }

    fn ricochet(&mut self, hit: &CollisionHit) {
        self.ricochet = Some(hit.normal());
    }
}

#[derive(Default)]
struct CreatureProxy {
    ignited: bool,
}

impl Flammable for CreatureProxy {
    fn ignite(&mut self) {
        self.ignited = true;
    }
}

/// System: hand contacts from the collision engine to the sector
fn apply_block_contacts(
    mut contacts: EventReader<BlockContactEvent>,
    mut sector: ResMut<SectorBlocks>,
    mut projectiles: EventWriter<ProjectileEvent>,
    mut creatures: EventWriter<CreatureIgniteEvent>,
) {
    for event in contacts.read() {
        let result = match event.kind {
            ContactKind::Projectile(kind) => {
                let mut proxy = ProjectileProxy {
                    kind,
                    consumed: false,
                    ricochet: None,
                };
                let result =
                    sector
                        .0
                        .collision(event.block, Contact::Projectile(&mut proxy), &event.hit);
                if proxy.consumed {
                    projectiles.send(ProjectileEvent::Consumed(event.other));
                }
                if let Some(normal) = proxy.ricochet {
                    projectiles.send(ProjectileEvent::Ricochet {
                        projectile: event.other,
                        normal,
                    });
                }
                result
            }
            ContactKind::HostileCreature => {
                let mut proxy = CreatureProxy::default();
                let result =
                    sector
                        .0
                        .collision(event.block, Contact::Creature(&mut proxy), &event.hit);
                if proxy.ignited {
                    creatures.send(CreatureIgniteEvent(event.other));
                }
                result
            }
            ContactKind::Explosion => {
                sector
                    .0
                    .collision(event.block, Contact::Explosion, &event.hit)
            }
            ContactKind::Other => sector.0.collision(event.block, Contact::Other, &event.hit),
        };

        if let Err(e) = result {
            tracing::debug!(other = ?event.other, "dropped contact: {}", e);
        }
    }
}

/// System: advance burn and disintegrate actions
fn tick_weak_blocks(
    time: Res<Time>,
    mut sector: ResMut<SectorBlocks>,
    mut rng: ResMut<FlickerSource>,
) {
    let dt = time.delta_secs();
    sector.0.update(dt, &mut rng.0);
}

/// System: turn sector side effects into events for audio and object management
fn forward_block_events(
    mut sector: ResMut<SectorBlocks>,
    mut sounds: EventWriter<SoundEvent>,
    mut removed: EventWriter<BlockRemovedEvent>,
) {
    for event in sector.0.drain_events() {
        match event {
            BlockEvent::SoundPreloaded { sound, .. } => {
                sounds.send(SoundEvent {
                    sound,
                    cue: SoundCue::Preload,
                });
            }
            BlockEvent::Ignited { sound, .. } => {
                sounds.send(SoundEvent {
                    sound,
                    cue: SoundCue::Play,
                });
            }
            BlockEvent::Disintegrating { .. } => {}
            BlockEvent::Removed { block } => {
                removed.send(BlockRemovedEvent(block));
            }
        }
    }
}
