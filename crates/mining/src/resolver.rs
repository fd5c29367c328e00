//! Decides whether a tool is the correct tool for drops on a block.

use std::collections::BTreeSet;

use toolcraft_core::{BlockTag, ToolCategory, ToolTier};

use crate::block::BlockRef;
use crate::item::{NativeItem, ToolRef};

/// Tool categories of the held item.
pub fn tool_categories_of_item(tool: ToolRef<'_>) -> BTreeSet<ToolCategory> {
    match tool {
        ToolRef::None => BTreeSet::new(),
        ToolRef::Custom(item) => item
            .tool
            .as_ref()
            .map(|behavior| behavior.categories.clone())
            .unwrap_or_default(),
        ToolRef::Native(item) => item
            .categories
            .iter()
            .copied()
            .map(ToolCategory::from)
            .collect(),
    }
}

/// Tier of the held item, if it has one.
pub fn tool_tier_of_item(tool: ToolRef<'_>) -> Option<ToolTier> {
    match tool {
        ToolRef::None => None,
        ToolRef::Custom(item) => item.tool.as_ref().and_then(|behavior| behavior.tier.clone()),
        ToolRef::Native(item) => item.tier.map(ToolTier::from),
    }
}

/// Tool categories suited to the block.
pub fn tool_categories_of_block(block: BlockRef<'_>) -> BTreeSet<ToolCategory> {
    block.tool_categories()
}

/// Whether the item belongs to one of the block's tool categories.
///
/// Blocks without categories accept any item.
pub fn has_correct_tool_category(block: BlockRef<'_>, tool: ToolRef<'_>) -> bool {
    let block_categories = tool_categories_of_block(block);
    block_categories.is_empty()
        || tool_categories_of_item(tool)
            .iter()
            .any(|category| block_categories.contains(category))
}

/// Whether the item's tier satisfies the block's required tier.
pub fn is_correct_tier(block: BlockRef<'_>, tool: ToolRef<'_>) -> bool {
    match block.required_tier() {
        None => true,
        Some(required) => tool_tier_of_item(tool).is_some_and(|tier| tier.meets(&required)),
    }
}

fn category_and_tier_match(block: BlockRef<'_>, tool: ToolRef<'_>) -> bool {
    has_correct_tool_category(block, tool) && is_correct_tier(block, tool)
}

/// Whether breaking `block` with `tool` yields drops.
pub fn is_correct_tool_for_drops(block: BlockRef<'_>, tool: ToolRef<'_>) -> bool {
    match block {
        BlockRef::Custom(custom) => match &custom.breakable {
            None => return false,
            Some(breakable) if !breakable.requires_tool_for_drops => return true,
            Some(_) => {}
        },
        BlockRef::Native(native) => {
            if native.has_tag(&BlockTag::MineableWithPickaxe)
                || native.has_tag(&BlockTag::MineableWithAxe)
            {
                return native.destroy_speed == 0.0 || category_and_tier_match(block, tool);
            }
            if !native.requires_correct_tool_for_drops {
                return true;
            }
        }
    }

    match (block, tool) {
        (
            BlockRef::Native(native),
            ToolRef::Native(NativeItem {
                tool: Some(component),
                ..
            }),
        ) => component.is_correct_for_drops(native),
        (BlockRef::Native(_), ToolRef::Native(NativeItem { tool: None, .. }))
        | (BlockRef::Native(_), ToolRef::Custom(_) | ToolRef::None)
        | (BlockRef::Custom(_), _) => category_and_tier_match(block, tool),
    }
}
