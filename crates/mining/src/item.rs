//! Item and tool descriptors.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use toolcraft_core::{
    BlockTag, RegistryKey, ToolCategory, ToolTier, VanillaToolCategory, VanillaToolTier,
};

use crate::block::{BlockRef, NativeBlock};
use crate::modifier::{DamageModifier, Identity};

/// Blocks a [`ToolRule`] applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleTarget {
    /// Every block carrying the tag.
    Tag(BlockTag),
    /// An explicit list of block ids.
    Blocks(BTreeSet<RegistryKey>),
}

impl RuleTarget {
    /// Whether the rule targets `block`.
    pub fn matches(&self, block: &NativeBlock) -> bool {
        match self {
            RuleTarget::Tag(tag) => block.has_tag(tag),
            RuleTarget::Blocks(ids) => ids.contains(&block.id),
        }
    }
}

/// One rule of a native tool component.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRule {
    /// Blocks the rule applies to.
    pub target: RuleTarget,
    /// Mining speed override for those blocks.
    pub speed: Option<f64>,
    /// Drop-correctness override for those blocks.
    pub correct_for_drops: Option<bool>,
}

/// The host's mining data for a tool item.
///
/// Rules are evaluated in order; the first rule that matches and sets the
/// queried value decides it.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolComponent {
    /// Ordered rules.
    pub rules: Vec<ToolRule>,
    /// Speed used when no rule sets one.
    pub default_mining_speed: f64,
}

impl Default for ToolComponent {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            default_mining_speed: 1.0,
        }
    }
}

impl ToolComponent {
    /// Mining speed of this tool against `block`.
    pub fn mining_speed(&self, block: &NativeBlock) -> f64 {
        self.rules
            .iter()
            .filter(|rule| rule.target.matches(block))
            .find_map(|rule| rule.speed)
            .unwrap_or(self.default_mining_speed)
    }

    /// Whether this tool yields drops from `block`.
    pub fn is_correct_for_drops(&self, block: &NativeBlock) -> bool {
        self.rules
            .iter()
            .filter(|rule| rule.target.matches(block))
            .find_map(|rule| rule.correct_for_drops)
            .unwrap_or(false)
    }
}

/// Adventure-mode `can_break` predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPredicate {
    /// Block ids that may be broken.
    pub blocks: BTreeSet<RegistryKey>,
    /// Native tags whose blocks may be broken.
    pub tags: BTreeSet<BlockTag>,
}

impl BlockPredicate {
    /// Test the predicate. Custom blocks carry no tags and only match by id.
    pub fn test(&self, block: BlockRef<'_>) -> bool {
        if self.blocks.contains(block.id()) {
            return true;
        }
        match block {
            BlockRef::Native(native) => native.tags.iter().any(|tag| self.tags.contains(tag)),
            BlockRef::Custom(_) => false,
        }
    }
}

/// An item provided by the host game.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeItem {
    /// Item id (e.g., `minecraft:iron_pickaxe`).
    pub id: RegistryKey,
    /// Tool categories this item belongs to.
    pub categories: BTreeSet<VanillaToolCategory>,
    /// Tool tier, if the item is a tiered tool.
    pub tier: Option<VanillaToolTier>,
    /// Tool component, if the item is a tool.
    pub tool: Option<ToolComponent>,
    /// Adventure-mode predicate.
    pub can_break: Option<BlockPredicate>,
}

impl NativeItem {
    /// A plain item without any tool data.
    pub fn plain(id: RegistryKey) -> Self {
        Self {
            id,
            categories: BTreeSet::new(),
            tier: None,
            tool: None,
            can_break: None,
        }
    }
}

/// Tool behavior of a custom item.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolBehavior {
    /// Tool categories of the item.
    pub categories: BTreeSet<ToolCategory>,
    /// Tier of the item.
    pub tier: Option<ToolTier>,
    /// Speed used against blocks of a matching category.
    pub break_speed: f64,
    /// Whether creative players can break blocks while holding it.
    pub can_break_blocks_in_creative: bool,
}

/// An item added by a content pack.
#[derive(Clone)]
pub struct CustomItem {
    /// Item id.
    pub id: RegistryKey,
    /// Tool behavior, absent for non-tool items.
    pub tool: Option<ToolBehavior>,
    /// Adventure-mode predicate.
    pub can_break: Option<BlockPredicate>,
    /// Transforms the computed damage per tick.
    pub damage_modifier: Arc<dyn DamageModifier>,
}

impl CustomItem {
    /// Create an item without tool behavior.
    pub fn new(id: RegistryKey) -> Self {
        Self {
            id,
            tool: None,
            can_break: None,
            damage_modifier: Arc::new(Identity),
        }
    }

    /// Attach tool behavior.
    pub fn with_tool(mut self, tool: ToolBehavior) -> Self {
        self.tool = Some(tool);
        self
    }

    /// Attach an adventure-mode predicate.
    pub fn with_can_break(mut self, predicate: BlockPredicate) -> Self {
        self.can_break = Some(predicate);
        self
    }

    /// Replace the damage modifier.
    pub fn with_damage_modifier(mut self, modifier: impl DamageModifier + 'static) -> Self {
        self.damage_modifier = Arc::new(modifier);
        self
    }
}

impl fmt::Debug for CustomItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomItem")
            .field("id", &self.id)
            .field("tool", &self.tool)
            .field("can_break", &self.can_break)
            .field("damage_modifier", &self.damage_modifier)
            .finish()
    }
}

/// The item held while breaking, if any.
#[derive(Debug, Clone, Copy, Default)]
pub enum ToolRef<'a> {
    /// Bare hands.
    #[default]
    None,
    /// A pack-defined item.
    Custom(&'a CustomItem),
    /// A host item.
    Native(&'a NativeItem),
}

impl<'a> ToolRef<'a> {
    /// Item id, `None` for bare hands.
    pub fn id(&self) -> Option<&'a RegistryKey> {
        match self {
            ToolRef::None => None,
            ToolRef::Custom(item) => Some(&item.id),
            ToolRef::Native(item) => Some(&item.id),
        }
    }

    /// Adventure-mode predicate of the item.
    pub fn can_break(&self) -> Option<&'a BlockPredicate> {
        match self {
            ToolRef::None => None,
            ToolRef::Custom(item) => item.can_break.as_ref(),
            ToolRef::Native(item) => item.can_break.as_ref(),
        }
    }
}
