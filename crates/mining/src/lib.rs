#![warn(missing_docs)]
//! Block break progress: which tool is correct for a block and how fast a
//! player breaks it.

pub mod block;
pub mod breaking;
pub mod item;
pub mod modifier;
pub mod player;
pub mod progress;
pub mod resolver;
pub mod session;
pub mod speed;

pub use block::{BlockRef, Breakable, CustomBlock, NativeBlock};
pub use breaking::{calculate_damage, can_break_blocks_in_creative, mining_efficiency_for_level};
pub use item::{
    BlockPredicate, CustomItem, NativeItem, RuleTarget, ToolBehavior, ToolComponent, ToolRef,
    ToolRule,
};
pub use modifier::{ClampDamage, DamageModifier, FnModifier, Identity, OffsetDamage, ScaleDamage};
pub use player::{Attributes, PlayerState};
pub use progress::{compute_progress, effective_speed, fatigue_multiplier, MiningModifiers};
pub use resolver::{
    has_correct_tool_category, is_correct_tier, is_correct_tool_for_drops,
    tool_categories_of_block, tool_categories_of_item, tool_tier_of_item,
};
pub use session::{ticks_to_break, BreakSession, BreakStatus};
pub use speed::destroy_speed;
