//! Snapshot of the breaking player.

use toolcraft_core::{
    enchantment_level, Enchantment, EnchantmentType, GameMode, StatusEffectType, StatusEffects,
};

use crate::progress::MiningModifiers;

/// Attribute values reported by the host. `None` means the attribute is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Attributes {
    /// `mining_efficiency`; absent counts as 0.
    pub mining_efficiency: Option<f64>,
    /// `block_break_speed`; absent counts as 1.
    pub block_break_speed: Option<f64>,
    /// `submerged_mining_speed`; absent counts as 0.2.
    pub submerged_mining_speed: Option<f64>,
}

/// Everything about the player the mining rules look at.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Current game mode.
    pub game_mode: GameMode,
    /// Attribute values.
    pub attributes: Attributes,
    /// Active status effects.
    pub effects: StatusEffects,
    /// Whether the player stands on the ground.
    pub on_ground: bool,
    /// Whether the player's eyes are in water.
    pub eye_in_water: bool,
    /// Enchantments on the worn helmet.
    pub helmet: Vec<Enchantment>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            game_mode: GameMode::Survival,
            attributes: Attributes::default(),
            effects: StatusEffects::new(),
            on_ground: true,
            eye_in_water: false,
            helmet: Vec::new(),
        }
    }
}

impl PlayerState {
    /// A grounded survival player with no modifiers.
    pub fn survival() -> Self {
        Self::default()
    }

    /// Same player in another game mode.
    pub fn in_mode(mut self, game_mode: GameMode) -> Self {
        self.game_mode = game_mode;
        self
    }

    /// Whether the underwater mining penalty applies.
    ///
    /// Aqua Affinity on the helmet lifts the penalty.
    pub fn is_underwater(&self) -> bool {
        self.eye_in_water && enchantment_level(&self.helmet, EnchantmentType::AquaAffinity) == 0
    }

    /// Formula inputs derived from this snapshot.
    pub fn mining_modifiers(&self) -> MiningModifiers {
        let defaults = MiningModifiers::default();
        MiningModifiers {
            efficiency: self
                .attributes
                .mining_efficiency
                .unwrap_or(defaults.efficiency),
            haste_level: self.effects.level(StatusEffectType::Haste),
            fatigue_level: self.effects.level(StatusEffectType::MiningFatigue),
            block_break_speed: self
                .attributes
                .block_break_speed
                .unwrap_or(defaults.block_break_speed),
            submerged_mining_speed: self
                .attributes
                .submerged_mining_speed
                .unwrap_or(defaults.submerged_mining_speed),
            on_ground: self.on_ground,
            underwater: self.is_underwater(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolcraft_core::StatusEffect;

    #[test]
    fn absent_attributes_use_defaults() {
        let mods = PlayerState::survival().mining_modifiers();
        assert_eq!(mods, MiningModifiers::default());
    }

    #[test]
    fn effect_levels_are_amplifier_plus_one() {
        let mut player = PlayerState::survival();
        player
            .effects
            .add(StatusEffect::new(StatusEffectType::Haste, 1, 600));
        player
            .effects
            .add(StatusEffect::new(StatusEffectType::MiningFatigue, 0, 600));
        let mods = player.mining_modifiers();
        assert_eq!(mods.haste_level, 2);
        assert_eq!(mods.fatigue_level, 1);
    }

    #[test]
    fn aqua_affinity_negates_underwater_penalty() {
        let mut player = PlayerState {
            eye_in_water: true,
            ..PlayerState::default()
        };
        assert!(player.is_underwater());

        player
            .helmet
            .push(Enchantment::new(EnchantmentType::AquaAffinity, 1));
        assert!(!player.is_underwater());
        assert!(!player.mining_modifiers().underwater);
    }

    #[test]
    fn attributes_pass_through() {
        let player = PlayerState {
            attributes: Attributes {
                mining_efficiency: Some(10.0),
                block_break_speed: Some(1.5),
                submerged_mining_speed: Some(1.0),
            },
            on_ground: false,
            ..PlayerState::default()
        };
        let mods = player.mining_modifiers();
        assert_eq!(mods.efficiency, 10.0);
        assert_eq!(mods.block_break_speed, 1.5);
        assert_eq!(mods.submerged_mining_speed, 1.0);
        assert!(!mods.on_ground);
    }
}
