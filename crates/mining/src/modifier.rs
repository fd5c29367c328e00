//! Per-item hooks that reshape the damage a tool deals to a block each tick.

use std::fmt;

use crate::block::BlockRef;
use crate::item::CustomItem;
use crate::player::PlayerState;

/// Transforms the damage per tick computed for a custom item.
///
/// Implementations must be pure: the same inputs always give the same output.
pub trait DamageModifier: fmt::Debug + Send + Sync {
    /// Return the damage per tick to use instead of `damage`.
    fn modify_block_damage(
        &self,
        player: &PlayerState,
        item: &CustomItem,
        block: BlockRef<'_>,
        damage: f64,
    ) -> f64;
}

/// Leaves the damage untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Identity;

impl DamageModifier for Identity {
    fn modify_block_damage(
        &self,
        _: &PlayerState,
        _: &CustomItem,
        _: BlockRef<'_>,
        damage: f64,
    ) -> f64 {
        damage
    }
}

/// Multiplies the damage by a constant factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleDamage(pub f64);

impl DamageModifier for ScaleDamage {
    fn modify_block_damage(
        &self,
        _: &PlayerState,
        _: &CustomItem,
        _: BlockRef<'_>,
        damage: f64,
    ) -> f64 {
        damage * self.0
    }
}

/// Adds a constant to the damage, never going below zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetDamage(pub f64);

impl DamageModifier for OffsetDamage {
    fn modify_block_damage(
        &self,
        _: &PlayerState,
        _: &CustomItem,
        _: BlockRef<'_>,
        damage: f64,
    ) -> f64 {
        (damage + self.0).max(0.0)
    }
}

/// Keeps the damage within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampDamage {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl DamageModifier for ClampDamage {
    fn modify_block_damage(
        &self,
        _: &PlayerState,
        _: &CustomItem,
        _: BlockRef<'_>,
        damage: f64,
    ) -> f64 {
        damage.max(self.min).min(self.max)
    }
}

/// Adapts a closure into a [`DamageModifier`].
pub struct FnModifier<F>(pub F);

impl<F> fmt::Debug for FnModifier<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnModifier")
    }
}

impl<F> DamageModifier for FnModifier<F>
where
    F: Fn(&PlayerState, &CustomItem, BlockRef<'_>, f64) -> f64 + Send + Sync,
{
    fn modify_block_damage(
        &self,
        player: &PlayerState,
        item: &CustomItem,
        block: BlockRef<'_>,
        damage: f64,
    ) -> f64 {
        (self.0)(player, item, block, damage)
    }
}
