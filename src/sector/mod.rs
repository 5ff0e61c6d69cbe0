//! All weak blocks of one level area and the chain reaction between them.
//!
//! The sector owns its blocks in slots addressed by [`BlockId`]. Blocks never
//! see each other directly: when one burns out and enters Disintegrating, the
//! sector scans its neighbours through a [`SiblingQuery`] view and ignites the
//! ones in range. Fire therefore walks a linked wall one burn duration per hop.
//!
//! Blocks are dropped only from [`Sector::update`], after the scan triggered by
//! that block has finished.

use serde::{Deserialize, Serialize};
use std::fmt;

use bevy::prelude::Vec2;

use crate::block::{
    BlockState, BlockVariant, CollisionHit, Contact, FlickerRng, HitResponse, Projectile,
    Reaction, Transition, WeakBlock,
};
use crate::config::{BlockSettings, BlockTimings, LevelLayout};
use crate::constants::SPREAD_RADIUS;
use crate::error::BlockError;

pub mod plugin;

pub use plugin::{
    BlockContactEvent, BlockRemovedEvent, ContactKind, CreatureIgniteEvent, FlickerSource,
    ProjectileEvent, SectorBlocks, SoundCue, SoundEvent, WeakBlockPlugin,
};

/// Slot of a block inside its sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub usize);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block#{}", self.0)
    }
}

/// What a chain-reaction scan needs to know about a sibling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiblingView {
    pub id: BlockId,
    pub anchor: Vec2,
    pub state: BlockState,
}

/// Read-only view over the live weak blocks of an area
pub trait SiblingQuery {
    fn siblings(&self) -> impl Iterator<Item = SiblingView> + '_;
}

impl SiblingQuery for [SiblingView] {
    fn siblings(&self) -> impl Iterator<Item = SiblingView> + '_ {
        self.iter().copied()
    }
}

/// Siblings the block at `origin` sets on fire: every other Normal block whose
/// anchor lies within [`SPREAD_RADIUS`] on both axes. Unlinked blocks spread nothing.
pub fn spread_targets<Q: SiblingQuery + ?Sized>(
    origin: BlockId,
    anchor: Vec2,
    linked: bool,
    query: &Q,
) -> Vec<BlockId> {
    if !linked {
        return Vec::new();
    }
    query
        .siblings()
        .filter(|s| s.id != origin && s.state == BlockState::Normal)
        .filter(|s| {
            let dx = (s.anchor.x - anchor.x).abs();
            let dy = (s.anchor.y - anchor.y).abs();
            dx <= SPREAD_RADIUS && dy <= SPREAD_RADIUS
        })
        .map(|s| s.id)
        .collect()
}

/// Side effects for the audio and object-management collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum BlockEvent {
    SoundPreloaded {
        block: BlockId,
        sound: &'static str,
    },
    /// Entered Burning; `sound` is to be played
    Ignited {
        block: BlockId,
        variant: BlockVariant,
        sound: &'static str,
    },
    Disintegrating {
        block: BlockId,
    },
    Removed {
        block: BlockId,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Sector {
    blocks: Vec<Option<WeakBlock>>,
    timings: BlockTimings,
    events: Vec<BlockEvent>,
}

impl SiblingQuery for Sector {
    fn siblings(&self) -> impl Iterator<Item = SiblingView> + '_ {
        self.blocks.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref().map(|block| SiblingView {
                id: BlockId(index),
                anchor: block.anchor(),
                state: block.state(),
            })
        })
    }
}

impl Sector {
    pub fn new(timings: BlockTimings) -> Self {
        debug_assert!(timings.validate().is_ok(), "invalid timings {timings:?}");
        Self {
            blocks: Vec::new(),
            timings,
            events: Vec::new(),
        }
    }

    /// Like [`Sector::new`], rejecting negative or non-finite timings.
    pub fn try_new(timings: BlockTimings) -> Result<Self, BlockError> {
        timings.validate()?;
        Ok(Self::new(timings))
    }

    pub fn timings(&self) -> BlockTimings {
        self.timings
    }

    /// Place a block and preload its sound.
    pub fn spawn(&mut self, settings: &BlockSettings) -> BlockId {
        let block = WeakBlock::new(settings, self.timings);
        let id = BlockId(self.blocks.len());
        self.events.push(BlockEvent::SoundPreloaded {
            block: id,
            sound: block.preload_sound(),
        });
        self.blocks.push(Some(block));
        id
    }

    pub fn load_level(&mut self, layout: &LevelLayout) -> Vec<BlockId> {
        let ids: Vec<BlockId> = layout.blocks.iter().map(|b| self.spawn(b)).collect();
        tracing::debug!(count = ids.len(), "weak blocks loaded");
        ids
    }

    pub fn get(&self, id: BlockId) -> Option<&WeakBlock> {
        self.blocks.get(id.0).and_then(Option::as_ref)
    }

    pub fn state(&self, id: BlockId) -> Option<BlockState> {
        self.get(id).map(WeakBlock::state)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live blocks
    pub fn len(&self) -> usize {
        self.blocks.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn live_ids(&self) -> Vec<BlockId> {
        self.siblings().map(|s| s.id).collect()
    }

    /// Hand pending side effects to the caller
    pub fn drain_events(&mut self) -> Vec<BlockEvent> {
        std::mem::take(&mut self.events)
    }

    fn block_mut(&mut self, id: BlockId) -> Result<&mut WeakBlock, BlockError> {
        match self.blocks.get_mut(id.0).and_then(Option::as_mut) {
            Some(block) => Ok(block),
            None => {
                tracing::debug!(block = %id, "unhandled state: block is not live");
                Err(BlockError::UnknownBlock(id))
            }
        }
    }

    /// Set a block on fire. Returns whether it transitioned.
    pub fn ignite(&mut self, id: BlockId) -> Result<bool, BlockError> {
        if !self.block_mut(id)?.ignite() {
            return Ok(false);
        }
        self.record_ignition(id);
        Ok(true)
    }

    /// Contact reported by the collision engine.
    pub fn collision(
        &mut self,
        id: BlockId,
        contact: Contact<'_>,
        hit: &CollisionHit,
    ) -> Result<HitResponse, BlockError> {
        let label = contact.label();
        let block = self.block_mut(id)?;
        let response = block.hit_response();
        if block.collision(contact, hit) == Reaction::Ignited {
            tracing::debug!(block = %id, by = label, "weak block hit");
            self.record_ignition(id);
        }
        Ok(response)
    }

    /// Projectile contact reported by the collision engine.
    pub fn collision_bullet(
        &mut self,
        id: BlockId,
        projectile: &mut dyn Projectile,
        hit: &CollisionHit,
    ) -> Result<HitResponse, BlockError> {
        let block = self.block_mut(id)?;
        let response = block.hit_response();
        if block.collision_bullet(projectile, hit) == Reaction::Ignited {
            self.record_ignition(id);
        }
        Ok(response)
    }

    /// Advance every block by one frame.
    ///
    /// All blocks are ticked before any burn-out spreads, so a block lit this
    /// frame starts its burn on the next frame whatever its slot.
    pub fn update(&mut self, dt: f32, rng: &mut impl FlickerRng) {
        let transitions: Vec<(BlockId, Transition)> = self
            .blocks
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| {
                let block = slot.as_mut()?;
                match block.update(dt, rng) {
                    Transition::None => None,
                    transition => Some((BlockId(index), transition)),
                }
            })
            .collect();

        for (id, transition) in transitions {
            match transition {
                Transition::None => {}
                Transition::Disintegrating => {
                    self.events.push(BlockEvent::Disintegrating { block: id });
                    self.spread_hit(id);
                }
                Transition::Removed => {
                    self.blocks[id.0] = None;
                    self.events.push(BlockEvent::Removed { block: id });
                    tracing::debug!(block = %id, "weak block removed");
                }
            }
        }
    }

    fn record_ignition(&mut self, id: BlockId) {
        let Some(block) = self.get(id) else {
            return;
        };
        let variant = block.variant();
        self.events.push(BlockEvent::Ignited {
            block: id,
            variant,
            sound: variant.sound(),
        });
    }

    /// Ignite the Normal neighbours of a block that just burned out.
    fn spread_hit(&mut self, origin: BlockId) {
        let Some(block) = self.get(origin) else {
            return;
        };
        let targets = spread_targets(origin, block.anchor(), block.linked(), &*self);
        tracing::trace!(block = %origin, targets = targets.len(), "spread scan");

        for target in targets {
            let caught = self
                .blocks
                .get_mut(target.0)
                .and_then(Option::as_mut)
                .is_some_and(WeakBlock::ignite);
            if caught {
                self.record_ignition(target);
            }
        }
    }
}
