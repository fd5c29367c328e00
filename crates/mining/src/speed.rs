//! Base mining speed of the held item against a block.

use std::collections::BTreeSet;

use toolcraft_core::{BlockTag, ToolCategory};

use crate::block::BlockRef;
use crate::item::{NativeItem, RuleTarget, ToolComponent, ToolRule, ToolRef};

/// Speed of bare hands and of items that are not suited to the block.
pub const HAND_SPEED: f64 = 1.0;

/// Base speed fed into the progress formula.
pub fn destroy_speed(block: BlockRef<'_>, tool: ToolRef<'_>) -> f64 {
    match (tool, block) {
        (ToolRef::None, _) => HAND_SPEED,
        (
            ToolRef::Native(NativeItem {
                tool: Some(component),
                ..
            }),
            BlockRef::Custom(_),
        ) => {
            // Native rules cannot name custom blocks; go through similar tags.
            matching_tool_rules(component, &block.tool_categories())
                .map(|rule| rule.speed.unwrap_or(HAND_SPEED))
                .reduce(f64::max)
                .unwrap_or(HAND_SPEED)
        }
        (
            ToolRef::Native(NativeItem {
                tool: Some(component),
                ..
            }),
            BlockRef::Native(native),
        ) => component.mining_speed(native),
        (ToolRef::Native(NativeItem { tool: None, .. }), _) => HAND_SPEED,
        (ToolRef::Custom(item), _) => match &item.tool {
            Some(behavior) => {
                let block_categories = block.tool_categories();
                if behavior
                    .categories
                    .iter()
                    .any(|category| block_categories.contains(category))
                {
                    behavior.break_speed
                } else {
                    HAND_SPEED
                }
            }
            None => HAND_SPEED,
        },
    }
}

/// Rules of `component` whose tag is similar to one of `categories`.
pub fn matching_tool_rules<'c>(
    component: &'c ToolComponent,
    categories: &BTreeSet<ToolCategory>,
) -> impl Iterator<Item = &'c ToolRule> + 'c {
    let tags: BTreeSet<BlockTag> = categories
        .iter()
        .filter_map(ToolCategory::similar_tag)
        .collect();
    component
        .rules
        .iter()
        .filter(move |rule| matches!(&rule.target, RuleTarget::Tag(tag) if tags.contains(tag)))
}
