//! Centralized constants for the weak block core.
//!
//! Asset identifiers, spread radius, and draw layers are fixed by existing
//! level layouts and sprite packs. They are not tuning knobs.

// =====================================================
// Geometry
// =====================================================

/// Edge length of one level tile in world units
pub const TILE_SIZE: f32 = 32.0;

/// Max per-axis anchor distance for chain ignition (one tile plus slack)
pub const SPREAD_RADIUS: f32 = 32.5;

// =====================================================
// Assets
// =====================================================

/// Sprite of the flammable (straw) block
pub const STRAWBOX_SPRITE: &str = "images/objects/weak_block/strawbox.sprite";

/// Sprite of the meltable (ice) block
pub const MELTBOX_SPRITE: &str = "images/objects/weak_block/meltbox.sprite";

/// Glow used while burning
pub const LIGHT_SMALL_SPRITE: &str = "images/objects/lightmap_light/lightmap_light-small.sprite";

/// Glow used while disintegrating
pub const LIGHT_TINY_SPRITE: &str = "images/objects/lightmap_light/lightmap_light-tiny.sprite";

pub const FIRE_SOUND: &str = "sounds/fire.ogg";
pub const SIZZLE_SOUND: &str = "sounds/sizzle.ogg";

// =====================================================
// Rendering
// =====================================================

/// Layer of regular moving objects
pub const LAYER_OBJECTS: i32 = 50;

/// Blocks draw just in front of other objects
pub const BLOCK_DRAW_LAYER: i32 = LAYER_OBJECTS + 10;

/// Warm ember glow (r, g, b)
pub const EMBER_COLOR: (f32, f32, f32) = (0.3, 0.2, 0.1);

/// Flicker draws `roll(FLICKER_ROLL_RANGE)`; rolls at or above the threshold jitter the glow
pub const FLICKER_ROLL_RANGE: u32 = 10;
pub const FLICKER_THRESHOLD: u32 = 7;

/// Upper bound of the per-channel jitter draw, divided by 100 when applied
pub const FLICKER_JITTER: f32 = 20.0;

// =====================================================
// Animation
// =====================================================

/// Default length of the one-shot "burning" action in seconds
pub const DEFAULT_BURN_SECS: f32 = 0.6;

/// Default length of the one-shot "disintegrating" action in seconds
pub const DEFAULT_DISINTEGRATE_SECS: f32 = 0.3;
