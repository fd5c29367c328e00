//! Status effects relevant to mining.
//!
//! Effects are stored by amplifier (level - 1), the way the host reports them.
//! Amplifiers are not clamped: commands can apply arbitrarily strong effects
//! and the mining formula has defined behavior for every level.

use serde::{Deserialize, Serialize};

/// Status effect types that change how fast a player breaks blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEffectType {
    /// Increases mining speed by 20% per level
    Haste,
    /// Decreases mining speed
    MiningFatigue,
}

/// An active status effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// The type of effect.
    pub effect_type: StatusEffectType,
    /// The amplifier (level - 1). 0 = Level I, 1 = Level II, etc.
    pub amplifier: u8,
    /// Remaining duration in game ticks (20 ticks = 1 second).
    #[serde(default)]
    pub duration_ticks: u32,
}

impl StatusEffect {
    /// Create a new status effect.
    pub fn new(effect_type: StatusEffectType, amplifier: u8, duration_ticks: u32) -> Self {
        Self {
            effect_type,
            amplifier,
            duration_ticks,
        }
    }

    /// Create an effect at a 1-based `level`. Returns `None` for level 0.
    pub fn at_level(effect_type: StatusEffectType, level: u8, duration_ticks: u32) -> Option<Self> {
        level
            .checked_sub(1)
            .map(|amplifier| Self::new(effect_type, amplifier, duration_ticks))
    }

    /// Get the effect level (1-based).
    pub fn level(&self) -> u32 {
        u32::from(self.amplifier) + 1
    }
}

/// Collection of active status effects on a player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    /// Create empty status effects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or upgrade a status effect.
    ///
    /// A stronger effect replaces a weaker one of the same type; an equal one
    /// only extends the duration.
    pub fn add(&mut self, effect: StatusEffect) {
        match self
            .effects
            .iter_mut()
            .find(|e| e.effect_type == effect.effect_type)
        {
            Some(existing) if effect.amplifier > existing.amplifier => *existing = effect,
            Some(existing) if effect.amplifier == existing.amplifier => {
                existing.duration_ticks = existing.duration_ticks.max(effect.duration_ticks);
            }
            Some(_) => {}
            None => self.effects.push(effect),
        }
    }

    /// Get an effect by type.
    pub fn get(&self, effect_type: StatusEffectType) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.effect_type == effect_type)
    }

    /// 1-based level of an effect, 0 when it is not active.
    pub fn level(&self, effect_type: StatusEffectType) -> u32 {
        self.get(effect_type).map(StatusEffect::level).unwrap_or(0)
    }
}

impl FromIterator<StatusEffect> for StatusEffects {
    fn from_iter<I: IntoIterator<Item = StatusEffect>>(iter: I) -> Self {
        let mut effects = StatusEffects::new();
        for effect in iter {
            effects.add(effect);
        }
        effects
    }
}
