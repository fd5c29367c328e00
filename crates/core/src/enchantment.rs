//! Enchantments that influence block breaking.

use serde::{Deserialize, Serialize};

/// Enchantments the break calculation reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnchantmentType {
    /// Increases mining speed (tool)
    Efficiency,
    /// Removes the underwater mining speed penalty (helmet)
    AquaAffinity,
}

impl EnchantmentType {
    /// Get the maximum level for this enchantment
    pub fn max_level(&self) -> u8 {
        match self {
            EnchantmentType::Efficiency => 5,
            EnchantmentType::AquaAffinity => 1,
        }
    }
}

/// An enchantment with a specific level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enchantment {
    /// The type of enchantment
    pub enchantment_type: EnchantmentType,
    /// The level of the enchantment (1 to max_level)
    pub level: u8,
}

impl Enchantment {
    /// Create a new enchantment, clamping the level to the type's maximum.
    pub fn new(enchantment_type: EnchantmentType, level: u8) -> Self {
        let level = level.min(enchantment_type.max_level());
        Self {
            enchantment_type,
            level,
        }
    }
}

/// Level of `enchant_type` within `enchantments`, or 0 if absent.
pub fn enchantment_level(enchantments: &[Enchantment], enchant_type: EnchantmentType) -> u8 {
    enchantments
        .iter()
        .find(|e| e.enchantment_type == enchant_type)
        .map(|e| e.level)
        .unwrap_or(0)
}
