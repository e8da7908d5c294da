//! Color palette for entities, foliage and particles

use ratatui::style::Color as TermColor;

use crate::entity::{EnemyKind, EntityKind, ParticleTint};
use crate::ui::LogCategory;

/// Opaque color from a 0xRRGGBB literal, usable in constants
macro_rules! hex {
    ($hex:expr) => {
        Color::new(
            (($hex >> 16) & 0xFF) as f32 / 255.0,
            (($hex >> 8) & 0xFF) as f32 / 255.0,
            ($hex & 0xFF) as f32 / 255.0,
            1.0,
        )
    };
}

/// RGBA color (0.0 to 1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Darken color by a factor (0.0 = black, 1.0 = unchanged)
    pub fn darken(&self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }

    /// Terminals have no alpha; blend toward the background instead
    pub fn with_alpha(&self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        Self {
            r: BACKGROUND.r + (self.r - BACKGROUND.r) * alpha,
            g: BACKGROUND.g + (self.g - BACKGROUND.g) * alpha,
            b: BACKGROUND.b + (self.b - BACKGROUND.b) * alpha,
            a: 1.0,
        }
    }
}

impl From<Color> for TermColor {
    fn from(color: Color) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        TermColor::Rgb(channel(color.r), channel(color.g), channel(color.b))
    }
}

pub const BACKGROUND: Color = hex!(0x0F172A);
pub const GUARDIAN: Color = hex!(0xF59E0B);
pub const ESCORTEE: Color = hex!(0xFEE2E2);
pub const WOLF: Color = hex!(0x374151);
pub const DOG: Color = hex!(0x991B1B);
pub const CRIMINAL: Color = hex!(0x111827);
pub const BUSH: Color = hex!(0x064E3B);
pub const BUSH_LEAF: Color = hex!(0x059669);
pub const GRASS: Color = hex!(0x10B981);
pub const HOUSE_WALL: Color = hex!(0x92400E);
pub const HOUSE_ROOF: Color = hex!(0x7F1D1D);
pub const HOUSE_WINDOW: Color = hex!(0xFDE047);
pub const HEALTH_OK: Color = hex!(0x10B981);
pub const HEALTH_LOW: Color = hex!(0xEF4444);
pub const DUST: Color = hex!(0x78716C);
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Get the base color for an entity kind
pub fn kind_color(kind: EntityKind) -> Color {
    match kind {
        EntityKind::Guardian => GUARDIAN,
        EntityKind::Escortee => ESCORTEE,
        EntityKind::Enemy(EnemyKind::Wolf) => WOLF,
        EntityKind::Enemy(EnemyKind::Dog) => DOG,
        EntityKind::Enemy(EnemyKind::Criminal) => CRIMINAL,
    }
}

pub fn particle_color(tint: ParticleTint) -> Color {
    match tint {
        ParticleTint::Dust => DUST,
        ParticleTint::Shockwave => WHITE,
        ParticleTint::Spark => GUARDIAN,
        ParticleTint::Blood => HEALTH_LOW,
    }
}

/// Log line tint per category
pub fn log_category_color(category: LogCategory) -> Color {
    match category {
        LogCategory::Combat => HEALTH_LOW,
        LogCategory::Stealth => BUSH_LEAF,
        LogCategory::System => GUARDIAN,
    }
}

/// Health bar fill: green until 30%, red below
pub fn health_bar_color(fraction: f32) -> Color {
    if fraction > 0.3 {
        HEALTH_OK
    } else {
        HEALTH_LOW
    }
}

/// Brighten toward white while an enemy is flashing from a hit
pub fn flash_tint(base: Color, flashing: bool) -> Color {
    if !flashing {
        return base;
    }
    Color {
        r: base.r + (1.0 - base.r) * 0.7,
        g: base.g + (1.0 - base.g) * 0.7,
        b: base.b + (1.0 - base.b) * 0.7,
        a: base.a,
    }
}
