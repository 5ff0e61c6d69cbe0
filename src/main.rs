use std::time::Duration;

use anyhow::{Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use weak_block::block::{CollisionHit, ProjectileKind};
use weak_block::config::{BlockTimings, LevelLayout};
use weak_block::logging::LoggingPlugin;
use weak_block::sector::{BlockContactEvent, ContactKind, SectorBlocks, WeakBlockPlugin};

const DEFAULT_LEVEL: &str = "levels/demo.ron";
const FRAME_SECS: f64 = 1.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 60;

/// Headless run: load a level, shoot a fireball at its first block, and step
/// the simulation until every block has burned away or the time limit hits.
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let level_path = args.next().unwrap_or_else(|| DEFAULT_LEVEL.to_string());
    let timings = match args.next() {
        Some(path) => BlockTimings::load(&path).with_context(|| format!("loading timings {path}"))?,
        None => BlockTimings::default(),
    };
    let layout =
        LevelLayout::load(&level_path).with_context(|| format!("loading level {level_path}"))?;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(LoggingPlugin)
        .add_plugins(WeakBlockPlugin { timings })
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            FRAME_SECS,
        )));

    let ids = app
        .world_mut()
        .resource_mut::<SectorBlocks>()
        .0
        .load_level(&layout);
    let Some(&first) = ids.first() else {
        tracing::warn!("Level {} has no weak blocks", level_path);
        return Ok(());
    };
    tracing::info!("Loaded {} weak blocks from {}", ids.len(), level_path);

    app.world_mut().send_event(BlockContactEvent {
        block: first,
        other: Entity::PLACEHOLDER,
        kind: ContactKind::Projectile(ProjectileKind::Fire),
        hit: CollisionHit::from_left(),
    });

    for frame in 1..=MAX_FRAMES {
        app.update();
        let sector = &app.world().resource::<SectorBlocks>().0;
        if sector.is_empty() {
            tracing::info!("All weak blocks cleared after {} frames", frame);
            return Ok(());
        }
    }

    let remaining = app.world().resource::<SectorBlocks>().0.len();
    tracing::info!("{} weak blocks still standing after {} frames", remaining, MAX_FRAMES);
    Ok(())
}
