//! Damage a player deals to a block per tick, gated by game mode.

use toolcraft_core::{GameMode, ToolCategory, VanillaToolCategory};
use tracing::debug;

use crate::block::BlockRef;
use crate::item::ToolRef;
use crate::player::PlayerState;
use crate::progress::compute_progress;
use crate::resolver::{is_correct_tool_for_drops, tool_categories_of_item};
use crate::speed::destroy_speed;

/// Blocks that any sword cuts through in a single tick.
pub const SWORD_INSTANT_BLOCKS: [&str; 2] = ["bamboo", "bamboo_sapling"];

/// Native items that cannot break blocks in creative mode.
pub const CREATIVE_NON_BREAKING_ITEMS: [&str; 2] = ["debug_stick", "trident"];

/// Efficiency attribute granted by an Efficiency enchantment of `level`.
pub fn mining_efficiency_for_level(level: u8) -> f64 {
    if level == 0 {
        return 0.0;
    }
    let level = f64::from(level);
    level * level + 1.0
}

/// Whether a creative player holding `tool` breaks blocks.
pub fn can_break_blocks_in_creative(tool: ToolRef<'_>) -> bool {
    match tool {
        ToolRef::None => true,
        ToolRef::Custom(item) => item
            .tool
            .as_ref()
            .map_or(true, |behavior| behavior.can_break_blocks_in_creative),
        ToolRef::Native(item) if !item.categories.is_empty() => item
            .categories
            .iter()
            .any(|category| category.can_break_blocks_in_creative()),
        ToolRef::Native(item) => {
            !(item.id.is_native() && CREATIVE_NON_BREAKING_ITEMS.contains(&item.id.path()))
        }
    }
}

fn is_sword_instant_block(block: BlockRef<'_>) -> bool {
    match block {
        BlockRef::Native(native) => {
            native.id.is_native() && SWORD_INSTANT_BLOCKS.contains(&native.id.path())
        }
        BlockRef::Custom(_) => false,
    }
}

/// Progress `player` adds to `block` each tick while holding `tool`.
///
/// The result is in `[0, 1]` before any custom damage modifier runs; 1.0
/// means the block breaks on the first tick. Creative mode depends only on
/// the held item and spectators never break anything. Adventure mode returns
/// the survival damage only when the item's `can_break` predicate matches
/// the block, and 0.0 otherwise.
pub fn calculate_damage(player: &PlayerState, block: BlockRef<'_>, tool: ToolRef<'_>) -> f64 {
    match player.game_mode {
        GameMode::Creative => {
            let allowed = can_break_blocks_in_creative(tool);
            debug!(block = %block.id(), allowed, "creative break");
            return if allowed { 1.0 } else { 0.0 };
        }
        GameMode::Spectator => return 0.0,
        GameMode::Adventure => {
            let permitted = tool
                .can_break()
                .is_some_and(|predicate| predicate.test(block));
            if !permitted {
                debug!(block = %block.id(), "adventure break denied");
                return 0.0;
            }
        }
        GameMode::Survival => {}
    }

    if is_sword_instant_block(block)
        && tool_categories_of_item(tool).contains(&ToolCategory::Vanilla(VanillaToolCategory::Sword))
    {
        return 1.0;
    }

    let hardness = block.hardness();
    let correct = is_correct_tool_for_drops(block, tool);
    let speed = destroy_speed(block, tool);
    let damage = compute_progress(hardness, correct, speed, &player.mining_modifiers());
    debug!(
        block = %block.id(),
        hardness,
        correct,
        speed,
        damage,
        "computed block damage"
    );

    match tool {
        ToolRef::Custom(item) => item
            .damage_modifier
            .modify_block_damage(player, item, block, damage),
        ToolRef::None | ToolRef::Native(_) => damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Breakable, CustomBlock, NativeBlock};
    use crate::item::{BlockPredicate, CustomItem, NativeItem, ToolBehavior};
    use crate::modifier::ScaleDamage;
    use std::collections::BTreeSet;
    use toolcraft_core::{BlockTag, RegistryKey, VanillaToolTier};

    fn key(s: &str) -> RegistryKey {
        RegistryKey::parse(s).unwrap()
    }

    fn stone() -> NativeBlock {
        let mut block = NativeBlock::new(key("minecraft:stone"), 1.5);
        block.tags.insert(BlockTag::MineableWithPickaxe);
        block.requires_correct_tool_for_drops = true;
        block
    }

    fn sword() -> NativeItem {
        let mut item = NativeItem::plain(key("minecraft:iron_sword"));
        item.categories.insert(VanillaToolCategory::Sword);
        item.tier = Some(VanillaToolTier::Iron);
        item
    }

    fn drill(creative: bool) -> CustomItem {
        CustomItem::new(key("toolcraft:drill")).with_tool(ToolBehavior {
            categories: [VanillaToolCategory::Pickaxe.into()].into_iter().collect(),
            tier: Some(VanillaToolTier::Diamond.into()),
            break_speed: 15.0,
            can_break_blocks_in_creative: creative,
        })
    }

    #[test]
    fn efficiency_levels() {
        assert_eq!(mining_efficiency_for_level(0), 0.0);
        assert_eq!(mining_efficiency_for_level(1), 2.0);
        assert_eq!(mining_efficiency_for_level(5), 26.0);
    }

    #[test]
    fn bare_hands_in_survival() {
        let block = stone();
        let damage = calculate_damage(&PlayerState::survival(), BlockRef::Native(&block), ToolRef::None);
        assert_eq!(damage, 0.007);
    }

    #[test]
    fn creative_depends_on_the_held_item() {
        let player = PlayerState::survival().in_mode(GameMode::Creative);
        let block = stone();
        let block = BlockRef::Native(&block);

        assert_eq!(calculate_damage(&player, block, ToolRef::None), 1.0);
        assert_eq!(calculate_damage(&player, block, ToolRef::Native(&sword())), 0.0);
        assert_eq!(calculate_damage(&player, block, ToolRef::Custom(&drill(true))), 1.0);
        assert_eq!(calculate_damage(&player, block, ToolRef::Custom(&drill(false))), 0.0);

        let trident = NativeItem::plain(key("minecraft:trident"));
        let stick = NativeItem::plain(key("minecraft:stick"));
        assert_eq!(calculate_damage(&player, block, ToolRef::Native(&trident)), 0.0);
        assert_eq!(calculate_damage(&player, block, ToolRef::Native(&stick)), 1.0);
    }

    #[test]
    fn spectators_never_break() {
        let player = PlayerState::survival().in_mode(GameMode::Spectator);
        let block = NativeBlock::new(key("minecraft:short_grass"), 0.0);
        assert_eq!(calculate_damage(&player, BlockRef::Native(&block), ToolRef::None), 0.0);
    }

    #[test]
    fn adventure_requires_a_matching_predicate() {
        let player = PlayerState::survival().in_mode(GameMode::Adventure);
        let block = stone();
        let block = BlockRef::Native(&block);

        assert_eq!(calculate_damage(&player, block, ToolRef::None), 0.0);
        assert_eq!(calculate_damage(&player, block, ToolRef::Custom(&drill(true))), 0.0);

        let allowed = drill(true).with_can_break(BlockPredicate {
            blocks: Default::default(),
            tags: [BlockTag::MineableWithPickaxe].into_iter().collect(),
        });
        let survival = calculate_damage(&PlayerState::survival(), block, ToolRef::Custom(&allowed));
        assert!(survival > 0.0);
        assert_eq!(calculate_damage(&player, block, ToolRef::Custom(&allowed)), survival);
    }

    #[test]
    fn swords_cut_bamboo_instantly() {
        let bamboo = NativeBlock::new(key("minecraft:bamboo"), 1.0);
        let player = PlayerState::survival();
        assert_eq!(
            calculate_damage(&player, BlockRef::Native(&bamboo), ToolRef::Native(&sword())),
            1.0
        );
        assert!(calculate_damage(&player, BlockRef::Native(&bamboo), ToolRef::None) < 1.0);
    }

    #[test]
    fn custom_bamboo_is_not_cut_by_swords() {
        let player = PlayerState::survival();
        let unbreakable = CustomBlock {
            id: key("minecraft:bamboo"),
            breakable: None,
        };
        assert_eq!(
            calculate_damage(&player, BlockRef::Custom(&unbreakable), ToolRef::Native(&sword())),
            0.0
        );

        let sapling = CustomBlock {
            id: key("minecraft:bamboo_sapling"),
            breakable: Some(Breakable {
                hardness: 1.0,
                tool_categories: BTreeSet::new(),
                required_tier: None,
                requires_tool_for_drops: false,
            }),
        };
        assert!(
            calculate_damage(&player, BlockRef::Custom(&sapling), ToolRef::Native(&sword())) < 1.0
        );
    }

    #[test]
    fn custom_items_apply_their_damage_modifier() {
        let ore = CustomBlock {
            id: key("toolcraft:ruby_ore"),
            breakable: Some(Breakable {
                hardness: 2.0,
                tool_categories: [VanillaToolCategory::Pickaxe.into()].into_iter().collect(),
                required_tier: Some(VanillaToolTier::Iron.into()),
                requires_tool_for_drops: true,
            }),
        };
        let player = PlayerState::survival();
        let plain = drill(true);
        let boosted = drill(true).with_damage_modifier(ScaleDamage(2.0));

        assert_eq!(calculate_damage(&player, BlockRef::Custom(&ore), ToolRef::Custom(&plain)), 0.25);
        assert_eq!(calculate_damage(&player, BlockRef::Custom(&ore), ToolRef::Custom(&boosted)), 0.5);
    }

    #[test]
    fn unbreakable_custom_block() {
        let void = CustomBlock {
            id: key("toolcraft:void_crystal"),
            breakable: None,
        };
        let damage = calculate_damage(
            &PlayerState::survival(),
            BlockRef::Custom(&void),
            ToolRef::Custom(&drill(true)),
        );
        assert_eq!(damage, 0.0);
    }
}
