//! Block descriptors as seen by the mining rules.

use std::collections::BTreeSet;

use toolcraft_core::{BlockTag, RegistryKey, ToolCategory, ToolTier};

/// A block provided by the host game.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeBlock {
    /// Block id (e.g., `minecraft:stone`).
    pub id: RegistryKey,
    /// Host destroy speed, used as hardness. Negative means unbreakable.
    pub destroy_speed: f64,
    /// Tags the host attaches to this block.
    pub tags: BTreeSet<BlockTag>,
    /// Whether the host only drops items when the correct tool is used.
    pub requires_correct_tool_for_drops: bool,
}

impl NativeBlock {
    /// Create a block without tags that drops with any tool.
    pub fn new(id: RegistryKey, destroy_speed: f64) -> Self {
        Self {
            id,
            destroy_speed,
            tags: BTreeSet::new(),
            requires_correct_tool_for_drops: false,
        }
    }

    /// Check whether the block carries `tag`.
    pub fn has_tag(&self, tag: &BlockTag) -> bool {
        self.tags.contains(tag)
    }

    /// Tool categories implied by the block's mineable tags.
    pub fn tool_categories(&self) -> BTreeSet<ToolCategory> {
        self.tags
            .iter()
            .filter_map(BlockTag::tool_category)
            .map(ToolCategory::from)
            .collect()
    }

    /// Highest tier demanded by the block's `needs_*_tool` tags.
    pub fn required_tier(&self) -> Option<ToolTier> {
        self.tags
            .iter()
            .filter_map(BlockTag::required_tier)
            .max_by(|a, b| a.level().total_cmp(&b.level()))
            .map(ToolTier::from)
    }
}

/// Mining data of a custom block. Blocks without it cannot be broken.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakable {
    /// Hardness; negative means unbreakable, zero breaks instantly.
    pub hardness: f64,
    /// Tool categories that mine this block efficiently.
    pub tool_categories: BTreeSet<ToolCategory>,
    /// Minimum tier needed for drops.
    pub required_tier: Option<ToolTier>,
    /// Whether drops require the correct tool.
    pub requires_tool_for_drops: bool,
}

/// A block added by a content pack.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomBlock {
    /// Block id (e.g., `toolcraft:ruby_ore`).
    pub id: RegistryKey,
    /// Breaking behavior, if the block can be broken at all.
    pub breakable: Option<Breakable>,
}

/// Either kind of block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockRef<'a> {
    /// A pack-defined block.
    Custom(&'a CustomBlock),
    /// A host block.
    Native(&'a NativeBlock),
}

impl<'a> BlockRef<'a> {
    /// Block id.
    pub fn id(&self) -> &'a RegistryKey {
        match self {
            BlockRef::Custom(block) => &block.id,
            BlockRef::Native(block) => &block.id,
        }
    }

    /// Hardness; custom blocks without [`Breakable`] report `-1.0`.
    pub fn hardness(&self) -> f64 {
        match self {
            BlockRef::Custom(block) => block
                .breakable
                .as_ref()
                .map(|breakable| breakable.hardness)
                .unwrap_or(-1.0),
            BlockRef::Native(block) => block.destroy_speed,
        }
    }

    /// Tool categories that mine this block efficiently.
    pub fn tool_categories(&self) -> BTreeSet<ToolCategory> {
        match self {
            BlockRef::Custom(block) => block
                .breakable
                .as_ref()
                .map(|breakable| breakable.tool_categories.clone())
                .unwrap_or_default(),
            BlockRef::Native(block) => block.tool_categories(),
        }
    }

    /// Minimum tier needed for drops, if any.
    pub fn required_tier(&self) -> Option<ToolTier> {
        match self {
            BlockRef::Custom(block) => block
                .breakable
                .as_ref()
                .and_then(|breakable| breakable.required_tier.clone()),
            BlockRef::Native(block) => block.required_tier(),
        }
    }

    /// Whether this is a pack-defined block.
    pub fn is_custom(&self) -> bool {
        matches!(self, BlockRef::Custom(_))
    }
}
