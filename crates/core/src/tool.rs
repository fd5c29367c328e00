//! Tool categories, tool tiers and native block tags.
//!
//! Native (host) content uses the closed vanilla enums. Content packs may add
//! their own categories and tiers, which are identified by [`RegistryKey`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::registry::{RegistryKey, RegistryKeyError};

/// A block tag of the host game.
///
/// Tags the mining rules care about get their own variant; every other tag is
/// kept as [`BlockTag::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BlockTag {
    /// `minecraft:mineable/pickaxe`
    MineableWithPickaxe,
    /// `minecraft:mineable/axe`
    MineableWithAxe,
    /// `minecraft:mineable/shovel`
    MineableWithShovel,
    /// `minecraft:mineable/hoe`
    MineableWithHoe,
    /// `minecraft:leaves`
    Leaves,
    /// `minecraft:sword_efficient`
    SwordEfficient,
    /// `minecraft:needs_stone_tool`
    NeedsStoneTool,
    /// `minecraft:needs_iron_tool`
    NeedsIronTool,
    /// `minecraft:needs_diamond_tool`
    NeedsDiamondTool,
    /// Any other tag.
    Other(RegistryKey),
}

impl BlockTag {
    /// Map a tag key to its variant.
    pub fn from_key(key: RegistryKey) -> Self {
        if !key.is_native() {
            return BlockTag::Other(key);
        }
        match key.path() {
            "mineable/pickaxe" => BlockTag::MineableWithPickaxe,
            "mineable/axe" => BlockTag::MineableWithAxe,
            "mineable/shovel" => BlockTag::MineableWithShovel,
            "mineable/hoe" => BlockTag::MineableWithHoe,
            "leaves" => BlockTag::Leaves,
            "sword_efficient" => BlockTag::SwordEfficient,
            "needs_stone_tool" => BlockTag::NeedsStoneTool,
            "needs_iron_tool" => BlockTag::NeedsIronTool,
            "needs_diamond_tool" => BlockTag::NeedsDiamondTool,
            _ => BlockTag::Other(key),
        }
    }

    /// Parse a tag; keys without a namespace default to `minecraft`.
    pub fn parse(input: &str) -> Result<Self, RegistryKeyError> {
        RegistryKey::native(input).map(Self::from_key)
    }

    /// The vanilla tool category whose blocks carry this tag, if any.
    pub fn tool_category(&self) -> Option<VanillaToolCategory> {
        match self {
            BlockTag::MineableWithPickaxe => Some(VanillaToolCategory::Pickaxe),
            BlockTag::MineableWithAxe => Some(VanillaToolCategory::Axe),
            BlockTag::MineableWithShovel => Some(VanillaToolCategory::Shovel),
            BlockTag::MineableWithHoe => Some(VanillaToolCategory::Hoe),
            BlockTag::Leaves => Some(VanillaToolCategory::Shears),
            BlockTag::SwordEfficient => Some(VanillaToolCategory::Sword),
            _ => None,
        }
    }

    /// The minimum tier a block with this tag demands, if any.
    pub fn required_tier(&self) -> Option<VanillaToolTier> {
        match self {
            BlockTag::NeedsStoneTool => Some(VanillaToolTier::Stone),
            BlockTag::NeedsIronTool => Some(VanillaToolTier::Iron),
            BlockTag::NeedsDiamondTool => Some(VanillaToolTier::Diamond),
            _ => None,
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = match self {
            BlockTag::MineableWithPickaxe => "mineable/pickaxe",
            BlockTag::MineableWithAxe => "mineable/axe",
            BlockTag::MineableWithShovel => "mineable/shovel",
            BlockTag::MineableWithHoe => "mineable/hoe",
            BlockTag::Leaves => "leaves",
            BlockTag::SwordEfficient => "sword_efficient",
            BlockTag::NeedsStoneTool => "needs_stone_tool",
            BlockTag::NeedsIronTool => "needs_iron_tool",
            BlockTag::NeedsDiamondTool => "needs_diamond_tool",
            BlockTag::Other(key) => return write!(f, "{key}"),
        };
        write!(f, "{}:{path}", crate::NATIVE_NAMESPACE)
    }
}

impl TryFrom<String> for BlockTag {
    type Error = RegistryKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BlockTag> for String {
    fn from(tag: BlockTag) -> Self {
        tag.to_string()
    }
}

/// Tool categories known to the host game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VanillaToolCategory {
    /// Pickaxe - mines stone, ores
    Pickaxe,
    /// Axe - chops wood
    Axe,
    /// Shovel - digs dirt, sand, gravel
    Shovel,
    /// Hoe - harvests crops and organic blocks
    Hoe,
    /// Shears - cuts leaves, wool, cobwebs
    Shears,
    /// Sword - combat weapon
    Sword,
}

impl VanillaToolCategory {
    /// All vanilla categories.
    pub const ALL: [VanillaToolCategory; 6] = [
        VanillaToolCategory::Pickaxe,
        VanillaToolCategory::Axe,
        VanillaToolCategory::Shovel,
        VanillaToolCategory::Hoe,
        VanillaToolCategory::Shears,
        VanillaToolCategory::Sword,
    ];

    /// Parse a category from its name (e.g., "pickaxe").
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
    }

    /// Lowercase name of this category.
    pub fn name(self) -> &'static str {
        match self {
            VanillaToolCategory::Pickaxe => "pickaxe",
            VanillaToolCategory::Axe => "axe",
            VanillaToolCategory::Shovel => "shovel",
            VanillaToolCategory::Hoe => "hoe",
            VanillaToolCategory::Shears => "shears",
            VanillaToolCategory::Sword => "sword",
        }
    }

    /// Native block tag that loosely corresponds to this category.
    ///
    /// Used to match native tool rules (which only name native tags) against
    /// custom blocks that only know their tool categories.
    pub fn similar_tag(self) -> Option<BlockTag> {
        match self {
            VanillaToolCategory::Axe => Some(BlockTag::MineableWithAxe),
            VanillaToolCategory::Hoe => Some(BlockTag::MineableWithHoe),
            VanillaToolCategory::Pickaxe => Some(BlockTag::MineableWithPickaxe),
            VanillaToolCategory::Shears => Some(BlockTag::Leaves),
            VanillaToolCategory::Shovel => Some(BlockTag::MineableWithShovel),
            VanillaToolCategory::Sword => None,
        }
    }

    /// Whether holding a tool of this category lets creative players break blocks.
    pub fn can_break_blocks_in_creative(self) -> bool {
        !matches!(self, VanillaToolCategory::Sword)
    }
}

/// A tool category declared by a content pack.
///
/// Identity is the id alone; `similar_tag` is lookup metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomToolCategory {
    /// Category id (e.g., `toolcraft:hammer`).
    pub id: RegistryKey,
    /// Native tag used when native tool rules are matched against this category.
    #[serde(default)]
    pub similar_tag: Option<BlockTag>,
}

impl PartialEq for CustomToolCategory {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CustomToolCategory {}

impl Hash for CustomToolCategory {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for CustomToolCategory {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CustomToolCategory {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

/// A tool category, either native or pack-defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolCategory {
    /// Category known to the host.
    Vanilla(VanillaToolCategory),
    /// Category declared by a content pack.
    Custom(CustomToolCategory),
}

impl ToolCategory {
    /// Native tag similar to this category, if one exists.
    pub fn similar_tag(&self) -> Option<BlockTag> {
        match self {
            ToolCategory::Vanilla(category) => category.similar_tag(),
            ToolCategory::Custom(category) => category.similar_tag.clone(),
        }
    }
}

impl From<VanillaToolCategory> for ToolCategory {
    fn from(category: VanillaToolCategory) -> Self {
        ToolCategory::Vanilla(category)
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolCategory::Vanilla(category) => f.write_str(category.name()),
            ToolCategory::Custom(category) => write!(f, "{}", category.id),
        }
    }
}

/// Tool material tiers of the host game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VanillaToolTier {
    /// Wooden tools (level 0)
    Wood,
    /// Gold tools (fast, but the same level as wood)
    Gold,
    /// Stone tools (level 1)
    Stone,
    /// Iron tools (level 2)
    Iron,
    /// Diamond tools (level 3)
    Diamond,
    /// Netherite tools (level 4)
    Netherite,
}

impl VanillaToolTier {
    /// Parse a tier from its name (e.g., "iron").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wood" | "wooden" => Some(VanillaToolTier::Wood),
            "gold" | "golden" => Some(VanillaToolTier::Gold),
            "stone" => Some(VanillaToolTier::Stone),
            "iron" => Some(VanillaToolTier::Iron),
            "diamond" => Some(VanillaToolTier::Diamond),
            "netherite" => Some(VanillaToolTier::Netherite),
            _ => None,
        }
    }

    /// Harvest level of this tier.
    pub fn level(self) -> f64 {
        match self {
            VanillaToolTier::Wood | VanillaToolTier::Gold => 0.0,
            VanillaToolTier::Stone => 1.0,
            VanillaToolTier::Iron => 2.0,
            VanillaToolTier::Diamond => 3.0,
            VanillaToolTier::Netherite => 4.0,
        }
    }
}

/// A tier declared by a content pack, placed on the vanilla level scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomToolTier {
    /// Tier id (e.g., `toolcraft:star`).
    pub id: RegistryKey,
    /// Harvest level; comparable with [`VanillaToolTier::level`].
    pub level: f64,
}

/// A tool tier, either native or pack-defined.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolTier {
    /// Tier known to the host.
    Vanilla(VanillaToolTier),
    /// Tier declared by a content pack.
    Custom(CustomToolTier),
}

impl ToolTier {
    /// Harvest level of this tier.
    pub fn level(&self) -> f64 {
        match self {
            ToolTier::Vanilla(tier) => tier.level(),
            ToolTier::Custom(tier) => tier.level,
        }
    }

    /// Whether a tool of this tier satisfies a block requiring `required`.
    pub fn meets(&self, required: &ToolTier) -> bool {
        self.level() >= required.level()
    }
}

impl From<VanillaToolTier> for ToolTier {
    fn from(tier: VanillaToolTier) -> Self {
        ToolTier::Vanilla(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_strings() {
        let tag = BlockTag::parse("minecraft:mineable/pickaxe").unwrap();
        assert_eq!(tag, BlockTag::MineableWithPickaxe);
        assert_eq!(tag.to_string(), "minecraft:mineable/pickaxe");

        assert_eq!(BlockTag::parse("leaves").unwrap(), BlockTag::Leaves);

        let other = BlockTag::parse("minecraft:logs").unwrap();
        assert!(matches!(other, BlockTag::Other(_)));
        assert_eq!(other.to_string(), "minecraft:logs");

        let foreign = BlockTag::parse("toolcraft:mineable/pickaxe").unwrap();
        assert!(matches!(foreign, BlockTag::Other(_)));
    }

    #[test]
    fn similar_tag_table() {
        use VanillaToolCategory::*;
        assert_eq!(Axe.similar_tag(), Some(BlockTag::MineableWithAxe));
        assert_eq!(Hoe.similar_tag(), Some(BlockTag::MineableWithHoe));
        assert_eq!(Pickaxe.similar_tag(), Some(BlockTag::MineableWithPickaxe));
        assert_eq!(Shears.similar_tag(), Some(BlockTag::Leaves));
        assert_eq!(Shovel.similar_tag(), Some(BlockTag::MineableWithShovel));
        assert_eq!(Sword.similar_tag(), None);
    }

    #[test]
    fn custom_category_identity_is_its_id() {
        let id = RegistryKey::parse("toolcraft:hammer").unwrap();
        let a = CustomToolCategory {
            id: id.clone(),
            similar_tag: Some(BlockTag::MineableWithPickaxe),
        };
        let b = CustomToolCategory {
            id,
            similar_tag: None,
        };
        assert_eq!(ToolCategory::Custom(a.clone()), ToolCategory::Custom(b));
        assert_eq!(
            ToolCategory::Custom(a).similar_tag(),
            Some(BlockTag::MineableWithPickaxe)
        );
    }

    #[test]
    fn only_swords_stop_creative_breaking() {
        for category in VanillaToolCategory::ALL {
            assert_eq!(
                category.can_break_blocks_in_creative(),
                category != VanillaToolCategory::Sword
            );
        }
    }

    #[test]
    fn tier_levels_are_ordered() {
        assert_eq!(VanillaToolTier::Gold.level(), VanillaToolTier::Wood.level());
        assert!(ToolTier::from(VanillaToolTier::Diamond).meets(&VanillaToolTier::Iron.into()));
        assert!(!ToolTier::from(VanillaToolTier::Stone).meets(&VanillaToolTier::Iron.into()));

        let star = ToolTier::Custom(CustomToolTier {
            id: RegistryKey::parse("toolcraft:star").unwrap(),
            level: 3.5,
        });
        assert!(star.meets(&VanillaToolTier::Diamond.into()));
        assert!(!star.meets(&VanillaToolTier::Netherite.into()));
    }

    #[test]
    fn needs_tags_map_to_tiers() {
        assert_eq!(
            BlockTag::NeedsIronTool.required_tier(),
            Some(VanillaToolTier::Iron)
        );
        assert_eq!(BlockTag::Leaves.required_tier(), None);
        assert_eq!(
            BlockTag::Leaves.tool_category(),
            Some(VanillaToolCategory::Shears)
        );
        assert_eq!(
            VanillaToolCategory::parse("Pickaxe"),
            Some(VanillaToolCategory::Pickaxe)
        );
    }
}
