//! Weak Block - Destructible Obstacle Core
//!
//! Tile-sized blocks that burn (straw) or melt (ice) when struck by fire or
//! an explosion:
//! - Forward-only lifecycle: Normal → Burning → Disintegrating → removed
//! - Collision classification over a closed set of contact kinds
//! - Chain ignition of linked neighbours within one tile
//! - Bevy plugin wiring contacts, ticking, audio and removal events

pub mod block;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod sector;

pub use block::{BlockState, BlockVariant, WeakBlock};
pub use config::{BlockSettings, BlockTimings, LevelLayout};
pub use error::BlockError;
pub use sector::{BlockEvent, BlockId, Sector};
