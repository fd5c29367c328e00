#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod effect;
pub mod enchantment;
pub mod registry;
pub mod tool;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use effect::{StatusEffect, StatusEffectType, StatusEffects};
pub use enchantment::{enchantment_level, Enchantment, EnchantmentType};
pub use registry::{RegistryKey, RegistryKeyError, DEFAULT_NAMESPACE, NATIVE_NAMESPACE};
pub use tool::{
    BlockTag, CustomToolCategory, CustomToolTier, ToolCategory, ToolTier, VanillaToolCategory,
    VanillaToolTier,
};

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Game mode of the player that is breaking a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Regular mining rules.
    #[default]
    Survival,
    /// Instant breaking, subject to the held item.
    Creative,
    /// Breaking restricted by the held item's `can_break` predicate.
    Adventure,
    /// Cannot break anything.
    Spectator,
}

impl GameMode {
    /// Parse a game mode from its lowercase name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "survival" => Some(GameMode::Survival),
            "creative" => Some(GameMode::Creative),
            "adventure" => Some(GameMode::Adventure),
            "spectator" => Some(GameMode::Spectator),
            _ => None,
        }
    }
}
