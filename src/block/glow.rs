//! Ambient glow drawn over a burning block, and its flicker.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::constants::{
    EMBER_COLOR, FLICKER_JITTER, FLICKER_ROLL_RANGE, FLICKER_THRESHOLD, LIGHT_SMALL_SPRITE,
    LIGHT_TINY_SPRITE,
};

/// Random source for cosmetic flicker.
pub trait FlickerRng {
    /// Uniform integer in `[0, bound)`
    fn roll(&mut self, bound: u32) -> u32;
    /// Uniform float in `[0, max)`
    fn randf(&mut self, max: f32) -> f32;
}

/// Seeded game-wide random source.
#[derive(Debug, Clone)]
pub struct GameRandom(Xoshiro256PlusPlus);

impl GameRandom {
    pub fn seeded(seed: u64) -> Self {
        Self(Xoshiro256PlusPlus::seed_from_u64(seed))
    }
}

impl FlickerRng for GameRandom {
    fn roll(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.0.gen_range(0..bound)
    }

    fn randf(&mut self, max: f32) -> f32 {
        if max <= 0.0 {
            return 0.0;
        }
        self.0.gen_range(0.0..max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LightColor {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const EMBER: Self = Self::new(EMBER_COLOR.0, EMBER_COLOR.1, EMBER_COLOR.2);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightSize {
    Small,
    Tiny,
}

impl LightSize {
    pub fn sprite(&self) -> &'static str {
        match self {
            Self::Small => LIGHT_SMALL_SPRITE,
            Self::Tiny => LIGHT_TINY_SPRITE,
        }
    }
}

/// Light overlay state handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    pub size: LightSize,
    pub color: LightColor,
    pub additive: bool,
}

impl Glow {
    /// Straw burns with an additive ember glow; the melt glow keeps the sprite's own tint.
    pub fn burning(flammable: bool) -> Self {
        if flammable {
            Self {
                size: LightSize::Small,
                color: LightColor::EMBER,
                additive: true,
            }
        } else {
            Self {
                size: LightSize::Small,
                color: LightColor::WHITE,
                additive: false,
            }
        }
    }

    pub fn embers() -> Self {
        Self {
            size: LightSize::Tiny,
            color: LightColor::EMBER,
            additive: true,
        }
    }

    pub fn flicker(&mut self, rng: &mut impl FlickerRng) {
        self.color = flicker_color(rng);
    }
}

/// 3 in 10 frames jitter red and green; the rest hold the ember color.
pub fn flicker_color(rng: &mut impl FlickerRng) -> LightColor {
    if rng.roll(FLICKER_ROLL_RANGE) >= FLICKER_THRESHOLD {
        LightColor::new(
            0.2 + rng.randf(FLICKER_JITTER) / 100.0,
            0.1 + rng.randf(FLICKER_JITTER) / 100.0,
            0.1,
        )
    } else {
        LightColor::EMBER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays fixed rolls and always returns `max / 2` for floats.
    struct ScriptedRng {
        rolls: Vec<u32>,
    }

    impl FlickerRng for ScriptedRng {
        fn roll(&mut self, _bound: u32) -> u32 {
            self.rolls.remove(0)
        }

        fn randf(&mut self, max: f32) -> f32 {
            max / 2.0
        }
    }

    #[test]
    fn test_low_roll_holds_ember() {
        let mut rng = ScriptedRng { rolls: vec![6] };
        assert_eq!(flicker_color(&mut rng), LightColor::EMBER);
    }

    #[test]
    fn test_high_roll_jitters() {
        let mut rng = ScriptedRng { rolls: vec![7] };
        let color = flicker_color(&mut rng);
        assert!((color.r - 0.3).abs() < 1e-6);
        assert!((color.g - 0.2).abs() < 1e-6);
        assert!((color.b - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_jitter_bounds() {
        let mut rng = GameRandom::seeded(7);
        for _ in 0..500 {
            let c = flicker_color(&mut rng);
            assert!((0.2..0.4).contains(&c.r) || c == LightColor::EMBER);
            assert!((0.1..0.3).contains(&c.g));
            assert_eq!(c.b, 0.1);
        }
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = GameRandom::seeded(42);
        let mut b = GameRandom::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.roll(10), b.roll(10));
        }
    }

    #[test]
    fn test_ember_glow_is_tiny() {
        let glow = Glow::embers();
        assert_eq!(glow.size, LightSize::Tiny);
        assert_eq!(glow.size.sprite(), LIGHT_TINY_SPRITE);
        assert!(glow.additive);
    }
}
