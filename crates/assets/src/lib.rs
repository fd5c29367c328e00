#![warn(missing_docs)]
//! Content pack schema and the registry built from it.
//!
//! A pack is a JSON object with optional arrays `categories`, `tiers`,
//! `blocks`, `items`, `native_blocks` and `native_items`. Category and tier
//! references are either vanilla names (`"pickaxe"`, `"iron"`) or ids of
//! custom entries declared by a pack loaded earlier or in the same pack.

mod loader;
mod registry;

pub use loader::{builtin_native_pack, pack_from_file, pack_from_str, registry_from_files};
pub use registry::{ContentRegistry, ContentRegistryBuilder};

use serde::Deserialize;
use thiserror::Error;
use toolcraft_core::RegistryKeyError;

/// A whole content pack as written on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackDefinition {
    /// Custom tool categories.
    #[serde(default)]
    pub categories: Vec<CategoryDefinition>,
    /// Custom tool tiers.
    #[serde(default)]
    pub tiers: Vec<TierDefinition>,
    /// Custom blocks.
    #[serde(default)]
    pub blocks: Vec<BlockDefinition>,
    /// Custom items.
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
    /// Host blocks.
    #[serde(default)]
    pub native_blocks: Vec<NativeBlockDefinition>,
    /// Host items.
    #[serde(default)]
    pub native_items: Vec<NativeItemDefinition>,
}

/// A custom tool category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDefinition {
    /// Category id; bare paths land in the `toolcraft` namespace.
    pub id: String,
    /// Native tag whose blocks this category mines like a vanilla tool.
    #[serde(default)]
    pub similar_tag: Option<String>,
}

/// A custom tool tier.
#[derive(Debug, Clone, Deserialize)]
pub struct TierDefinition {
    /// Tier id.
    pub id: String,
    /// Harvest level on the vanilla scale (wood 0 .. netherite 4).
    pub level: f64,
}

/// A custom block.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockDefinition {
    /// Block id.
    pub id: String,
    /// Breaking behavior; absent means the block is unbreakable.
    #[serde(default)]
    pub breakable: Option<BreakableDefinition>,
}

/// Breaking behavior of a custom block.
#[derive(Debug, Clone, Deserialize)]
pub struct BreakableDefinition {
    /// Hardness; 0 breaks instantly.
    pub hardness: f64,
    /// Tool categories suited to the block.
    #[serde(default)]
    pub tool_categories: Vec<String>,
    /// Minimum tier for drops.
    #[serde(default)]
    pub required_tier: Option<String>,
    /// Whether drops need a correct tool.
    #[serde(default = "default_true")]
    pub requires_tool_for_drops: bool,
}

/// A custom item.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDefinition {
    /// Item id.
    pub id: String,
    /// Tool behavior, if the item is a tool.
    #[serde(default)]
    pub tool: Option<ToolDefinition>,
    /// Adventure-mode predicate.
    #[serde(default)]
    pub can_break: Option<PredicateDefinition>,
    /// Damage modifier applied after the progress formula.
    #[serde(default)]
    pub damage_modifier: Option<DamageModifierDefinition>,
}

/// Tool behavior of a custom item.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolDefinition {
    /// Tool categories.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Tool tier.
    #[serde(default)]
    pub tier: Option<String>,
    /// Speed against blocks of a matching category.
    pub break_speed: f64,
    /// Whether creative players break blocks with it.
    #[serde(default = "default_true")]
    pub can_break_blocks_in_creative: bool,
}

/// Built-in damage modifiers, e.g. `{"multiply": 2.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageModifierDefinition {
    /// Multiply the damage.
    Multiply(f64),
    /// Add to the damage (never below zero).
    Add(f64),
    /// Clamp the damage into `[min, max]`.
    Clamp {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

/// Adventure-mode `can_break` predicate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredicateDefinition {
    /// Block ids; bare paths are native.
    #[serde(default)]
    pub blocks: Vec<String>,
    /// Native block tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A host block.
#[derive(Debug, Clone, Deserialize)]
pub struct NativeBlockDefinition {
    /// Block id; bare paths are native.
    pub id: String,
    /// Destroy speed (hardness); negative is unbreakable.
    pub destroy_speed: f64,
    /// Block tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether drops need a correct tool.
    #[serde(default)]
    pub requires_correct_tool_for_drops: bool,
}

/// A host item.
#[derive(Debug, Clone, Deserialize)]
pub struct NativeItemDefinition {
    /// Item id; bare paths are native.
    pub id: String,
    /// Vanilla tool categories.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Vanilla tier.
    #[serde(default)]
    pub tier: Option<String>,
    /// Tool component.
    #[serde(default)]
    pub tool: Option<ToolComponentDefinition>,
    /// Adventure-mode predicate.
    #[serde(default)]
    pub can_break: Option<PredicateDefinition>,
}

/// Tool component of a host item.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolComponentDefinition {
    /// Ordered rules.
    #[serde(default)]
    pub rules: Vec<ToolRuleDefinition>,
    /// Speed when no rule sets one.
    #[serde(default = "default_mining_speed")]
    pub default_mining_speed: f64,
}

/// One rule of a tool component. Exactly one of `tag` or `blocks` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolRuleDefinition {
    /// Tag target.
    #[serde(default)]
    pub tag: Option<String>,
    /// Explicit block targets.
    #[serde(default)]
    pub blocks: Vec<String>,
    /// Speed override.
    #[serde(default)]
    pub speed: Option<f64>,
    /// Drop-correctness override.
    #[serde(default)]
    pub correct_for_drops: Option<bool>,
}

fn default_true() -> bool {
    true
}

fn default_mining_speed() -> f64 {
    1.0
}

/// Errors emitted during pack loading.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Wrap IO errors when reading packs.
    #[error("failed to read content pack: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse content pack: {0}")]
    Parse(#[from] serde_json::Error),
    /// An id or tag is not a valid registry key.
    #[error("invalid key `{key}`: {source}")]
    InvalidKey {
        /// Offending input.
        key: String,
        /// Parse failure.
        source: RegistryKeyError,
    },
    /// A category reference names no known category.
    #[error("unknown tool category `{0}`")]
    UnknownCategory(String),
    /// A tier reference names no known tier.
    #[error("unknown tool tier `{0}`")]
    UnknownTier(String),
    /// The same id was declared twice.
    #[error("duplicate definition of `{0}`")]
    Duplicate(String),
    /// A value is out of range or inconsistent.
    #[error("invalid value in `{id}`: {reason}")]
    InvalidValue {
        /// Entry the value belongs to.
        id: String,
        /// What is wrong with it.
        reason: String,
    },
}
