use std::collections::{BTreeMap, BTreeSet};

use toolcraft_core::{
    BlockTag, CustomToolCategory, CustomToolTier, RegistryKey, ToolCategory, ToolTier,
    VanillaToolCategory, VanillaToolTier,
};
use toolcraft_mining::{
    BlockPredicate, BlockRef, Breakable, ClampDamage, CustomBlock, CustomItem, NativeBlock,
    NativeItem, OffsetDamage, RuleTarget, ScaleDamage, ToolBehavior, ToolComponent, ToolRef,
    ToolRule,
};
use tracing::debug;

use crate::{
    AssetError, BlockDefinition, DamageModifierDefinition, ItemDefinition, NativeBlockDefinition,
    NativeItemDefinition, PackDefinition, PredicateDefinition, ToolComponentDefinition,
    ToolRuleDefinition,
};

/// Immutable lookup of every block and item known to the calculator.
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    custom_blocks: BTreeMap<RegistryKey, CustomBlock>,
    custom_items: BTreeMap<RegistryKey, CustomItem>,
    native_blocks: BTreeMap<RegistryKey, NativeBlock>,
    native_items: BTreeMap<RegistryKey, NativeItem>,
}

impl ContentRegistry {
    /// Start building a registry.
    pub fn builder() -> ContentRegistryBuilder {
        ContentRegistryBuilder::default()
    }

    /// Resolve a block id; custom blocks shadow native ones.
    pub fn resolve_block(&self, id: &RegistryKey) -> Option<BlockRef<'_>> {
        self.custom_blocks
            .get(id)
            .map(BlockRef::Custom)
            .or_else(|| self.native_blocks.get(id).map(BlockRef::Native))
    }

    /// Resolve an item id; custom items shadow native ones.
    pub fn resolve_tool(&self, id: &RegistryKey) -> Option<ToolRef<'_>> {
        self.custom_items
            .get(id)
            .map(ToolRef::Custom)
            .or_else(|| self.native_items.get(id).map(ToolRef::Native))
    }

    /// Custom block by id.
    pub fn custom_block(&self, id: &RegistryKey) -> Option<&CustomBlock> {
        self.custom_blocks.get(id)
    }

    /// Custom item by id.
    pub fn custom_item(&self, id: &RegistryKey) -> Option<&CustomItem> {
        self.custom_items.get(id)
    }

    /// Native block by id.
    pub fn native_block(&self, id: &RegistryKey) -> Option<&NativeBlock> {
        self.native_blocks.get(id)
    }

    /// Native item by id.
    pub fn native_item(&self, id: &RegistryKey) -> Option<&NativeItem> {
        self.native_items.get(id)
    }

    /// Every block id, sorted.
    pub fn block_ids(&self) -> impl Iterator<Item = &RegistryKey> {
        let mut ids: Vec<&RegistryKey> = self
            .custom_blocks
            .keys()
            .chain(self.native_blocks.keys())
            .collect();
        ids.sort();
        ids.into_iter()
    }

    /// Every item id, sorted.
    pub fn item_ids(&self) -> impl Iterator<Item = &RegistryKey> {
        let mut ids: Vec<&RegistryKey> = self
            .custom_items
            .keys()
            .chain(self.native_items.keys())
            .collect();
        ids.sort();
        ids.into_iter()
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.custom_blocks.len() + self.native_blocks.len()
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.custom_items.len() + self.native_items.len()
    }
}

/// Accumulates packs into a [`ContentRegistry`].
///
/// Categories and tiers declared by one pack are visible to every pack added
/// after it. Declaring an id twice is an error.
#[derive(Debug, Clone, Default)]
pub struct ContentRegistryBuilder {
    categories: BTreeMap<RegistryKey, CustomToolCategory>,
    tiers: BTreeMap<RegistryKey, CustomToolTier>,
    registry: ContentRegistry,
}

impl ContentRegistryBuilder {
    /// Validate and add one pack.
    ///
    /// A pack that fails validation leaves the builder unchanged.
    pub fn add_pack(&mut self, pack: PackDefinition) -> Result<&mut Self, AssetError> {
        let mut staged = self.clone();
        staged.apply(pack)?;
        *self = staged;
        debug!(
            categories = self.categories.len(),
            tiers = self.tiers.len(),
            blocks = self.registry.block_count(),
            items = self.registry.item_count(),
            "content pack added"
        );
        Ok(self)
    }

    /// Finish building.
    pub fn build(self) -> ContentRegistry {
        self.registry
    }

    fn apply(&mut self, pack: PackDefinition) -> Result<(), AssetError> {
        for def in pack.categories {
            let id = custom_key(&def.id)?;
            let similar_tag = def.similar_tag.as_deref().map(parse_tag).transpose()?;
            if self.categories.contains_key(&id) || VanillaToolCategory::parse(id.path()).is_some() {
                return Err(AssetError::Duplicate(id.to_string()));
            }
            self.categories
                .insert(id.clone(), CustomToolCategory { id, similar_tag });
        }

        for def in pack.tiers {
            let id = custom_key(&def.id)?;
            if !def.level.is_finite() {
                return Err(AssetError::InvalidValue {
                    id: def.id,
                    reason: "tier level must be finite".to_string(),
                });
            }
            if self.tiers.contains_key(&id) || VanillaToolTier::parse(id.path()).is_some() {
                return Err(AssetError::Duplicate(id.to_string()));
            }
            self.tiers.insert(
                id.clone(),
                CustomToolTier {
                    id,
                    level: def.level,
                },
            );
        }

        for def in pack.blocks {
            let block = self.custom_block(def)?;
            if self.registry.custom_blocks.contains_key(&block.id) {
                return Err(AssetError::Duplicate(block.id.to_string()));
            }
            self.registry.custom_blocks.insert(block.id.clone(), block);
        }

        for def in pack.items {
            let item = self.custom_item(def)?;
            if self.registry.custom_items.contains_key(&item.id) {
                return Err(AssetError::Duplicate(item.id.to_string()));
            }
            self.registry.custom_items.insert(item.id.clone(), item);
        }

        for def in pack.native_blocks {
            let block = native_block(def)?;
            if self.registry.native_blocks.contains_key(&block.id) {
                return Err(AssetError::Duplicate(block.id.to_string()));
            }
            self.registry.native_blocks.insert(block.id.clone(), block);
        }

        for def in pack.native_items {
            let item = native_item(def)?;
            if self.registry.native_items.contains_key(&item.id) {
                return Err(AssetError::Duplicate(item.id.to_string()));
            }
            self.registry.native_items.insert(item.id.clone(), item);
        }
        Ok(())
    }

    fn category(&self, reference: &str) -> Result<ToolCategory, AssetError> {
        if let Some(vanilla) = VanillaToolCategory::parse(reference) {
            return Ok(ToolCategory::Vanilla(vanilla));
        }
        let id = custom_key(reference)?;
        self.categories
            .get(&id)
            .cloned()
            .map(ToolCategory::Custom)
            .ok_or_else(|| AssetError::UnknownCategory(reference.to_string()))
    }

    fn tier(&self, reference: &str) -> Result<ToolTier, AssetError> {
        if let Some(vanilla) = VanillaToolTier::parse(reference) {
            return Ok(ToolTier::Vanilla(vanilla));
        }
        let id = custom_key(reference)?;
        self.tiers
            .get(&id)
            .cloned()
            .map(ToolTier::Custom)
            .ok_or_else(|| AssetError::UnknownTier(reference.to_string()))
    }

    fn categories_of(&self, references: &[String]) -> Result<BTreeSet<ToolCategory>, AssetError> {
        references.iter().map(|r| self.category(r)).collect()
    }

    fn custom_block(&self, def: BlockDefinition) -> Result<CustomBlock, AssetError> {
        let id = custom_key(&def.id)?;
        let breakable = match def.breakable {
            None => None,
            Some(breakable) => {
                if breakable.hardness.is_nan() {
                    return Err(AssetError::InvalidValue {
                        id: def.id,
                        reason: "hardness must be a number".to_string(),
                    });
                }
                Some(Breakable {
                    hardness: breakable.hardness,
                    tool_categories: self.categories_of(&breakable.tool_categories)?,
                    required_tier: breakable
                        .required_tier
                        .as_deref()
                        .map(|tier| self.tier(tier))
                        .transpose()?,
                    requires_tool_for_drops: breakable.requires_tool_for_drops,
                })
            }
        };
        Ok(CustomBlock { id, breakable })
    }

    fn custom_item(&self, def: ItemDefinition) -> Result<CustomItem, AssetError> {
        let mut item = CustomItem::new(custom_key(&def.id)?);

        if let Some(tool) = def.tool {
            if tool.break_speed.is_nan() || tool.break_speed < 0.0 {
                return Err(AssetError::InvalidValue {
                    id: def.id,
                    reason: format!("break_speed must be >= 0, got {}", tool.break_speed),
                });
            }
            item = item.with_tool(ToolBehavior {
                categories: self.categories_of(&tool.categories)?,
                tier: tool.tier.as_deref().map(|tier| self.tier(tier)).transpose()?,
                break_speed: tool.break_speed,
                can_break_blocks_in_creative: tool.can_break_blocks_in_creative,
            });
        }
        if let Some(predicate) = def.can_break {
            item = item.with_can_break(block_predicate(predicate)?);
        }
        item = match def.damage_modifier {
            None => item,
            Some(DamageModifierDefinition::Multiply(factor)) => {
                finite(&def.id, "multiply factor", factor)?;
                item.with_damage_modifier(ScaleDamage(factor))
            }
            Some(DamageModifierDefinition::Add(offset)) => {
                finite(&def.id, "add offset", offset)?;
                item.with_damage_modifier(OffsetDamage(offset))
            }
            Some(DamageModifierDefinition::Clamp { min, max }) => {
                finite(&def.id, "clamp min", min)?;
                finite(&def.id, "clamp max", max)?;
                if min > max {
                    return Err(AssetError::InvalidValue {
                        id: def.id,
                        reason: format!("clamp min {min} exceeds max {max}"),
                    });
                }
                item.with_damage_modifier(ClampDamage { min, max })
            }
        };
        Ok(item)
    }
}

fn finite(id: &str, what: &str, value: f64) -> Result<(), AssetError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AssetError::InvalidValue {
            id: id.to_string(),
            reason: format!("{what} must be finite, got {value}"),
        })
    }
}

fn custom_key(input: &str) -> Result<RegistryKey, AssetError> {
    RegistryKey::parse(input).map_err(|source| AssetError::InvalidKey {
        key: input.to_string(),
        source,
    })
}

fn native_key(input: &str) -> Result<RegistryKey, AssetError> {
    RegistryKey::native(input).map_err(|source| AssetError::InvalidKey {
        key: input.to_string(),
        source,
    })
}

fn parse_tag(input: &str) -> Result<BlockTag, AssetError> {
    BlockTag::parse(input).map_err(|source| AssetError::InvalidKey {
        key: input.to_string(),
        source,
    })
}

fn block_predicate(def: PredicateDefinition) -> Result<BlockPredicate, AssetError> {
    Ok(BlockPredicate {
        blocks: def
            .blocks
            .iter()
            .map(|id| native_key(id))
            .collect::<Result<_, _>>()?,
        tags: def
            .tags
            .iter()
            .map(|tag| parse_tag(tag))
            .collect::<Result<_, _>>()?,
    })
}

fn native_block(def: NativeBlockDefinition) -> Result<NativeBlock, AssetError> {
    if def.destroy_speed.is_nan() {
        return Err(AssetError::InvalidValue {
            id: def.id,
            reason: "destroy_speed must be a number".to_string(),
        });
    }
    Ok(NativeBlock {
        id: native_key(&def.id)?,
        destroy_speed: def.destroy_speed,
        tags: def
            .tags
            .iter()
            .map(|tag| parse_tag(tag))
            .collect::<Result<_, _>>()?,
        requires_correct_tool_for_drops: def.requires_correct_tool_for_drops,
    })
}

fn native_item(def: NativeItemDefinition) -> Result<NativeItem, AssetError> {
    let categories = def
        .categories
        .iter()
        .map(|name| {
            VanillaToolCategory::parse(name).ok_or_else(|| AssetError::UnknownCategory(name.clone()))
        })
        .collect::<Result<_, _>>()?;
    let tier = def
        .tier
        .as_deref()
        .map(|name| VanillaToolTier::parse(name).ok_or_else(|| AssetError::UnknownTier(name.to_string())))
        .transpose()?;
    let tool = def.tool.map(tool_component).transpose()?;
    let can_break = def.can_break.map(block_predicate).transpose()?;

    Ok(NativeItem {
        id: native_key(&def.id)?,
        categories,
        tier,
        tool,
        can_break,
    })
}

fn tool_component(def: ToolComponentDefinition) -> Result<ToolComponent, AssetError> {
    Ok(ToolComponent {
        rules: def
            .rules
            .into_iter()
            .map(tool_rule)
            .collect::<Result<_, _>>()?,
        default_mining_speed: def.default_mining_speed,
    })
}

fn tool_rule(def: ToolRuleDefinition) -> Result<ToolRule, AssetError> {
    let target = match (def.tag, def.blocks.is_empty()) {
        (Some(tag), true) => RuleTarget::Tag(parse_tag(&tag)?),
        (None, false) => RuleTarget::Blocks(
            def.blocks
                .iter()
                .map(|id| native_key(id))
                .collect::<Result<_, _>>()?,
        ),
        (Some(tag), false) => {
            return Err(AssetError::InvalidValue {
                id: tag,
                reason: "tool rule sets both `tag` and `blocks`".to_string(),
            })
        }
        (None, true) => {
            return Err(AssetError::InvalidValue {
                id: "tool rule".to_string(),
                reason: "tool rule needs `tag` or `blocks`".to_string(),
            })
        }
    };
    Ok(ToolRule {
        target,
        speed: def.speed,
        correct_for_drops: def.correct_for_drops,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack_from_str;

    fn key(s: &str) -> RegistryKey {
        RegistryKey::parse(s).unwrap()
    }

    const PACK: &str = r#"{
        "categories": [{ "id": "hammer", "similar_tag": "mineable/pickaxe" }],
        "tiers": [{ "id": "star", "level": 5 }],
        "blocks": [
            {
                "id": "ruby_ore",
                "breakable": {
                    "hardness": 3.0,
                    "tool_categories": ["pickaxe", "hammer"],
                    "required_tier": "star"
                }
            },
            { "id": "void_crystal" }
        ],
        "items": [
            {
                "id": "star_hammer",
                "tool": { "categories": ["hammer"], "tier": "star", "break_speed": 12.0 },
                "damage_modifier": { "clamp": { "min": 0.05, "max": 0.5 } }
            }
        ]
    }"#;

    #[test]
    fn custom_references_resolve() {
        let mut builder = ContentRegistry::builder();
        builder.add_pack(pack_from_str(PACK).unwrap()).unwrap();
        let registry = builder.build();

        let ore = registry.custom_block(&key("toolcraft:ruby_ore")).unwrap();
        let breakable = ore.breakable.as_ref().unwrap();
        assert!(breakable.requires_tool_for_drops);
        assert_eq!(breakable.required_tier.as_ref().map(ToolTier::level), Some(5.0));
        assert_eq!(breakable.tool_categories.len(), 2);

        let hammer = registry.custom_item(&key("toolcraft:star_hammer")).unwrap();
        let behavior = hammer.tool.as_ref().unwrap();
        assert!(behavior.can_break_blocks_in_creative);
        let category = behavior.categories.iter().next().unwrap();
        assert_eq!(category.similar_tag(), Some(BlockTag::MineableWithPickaxe));

        assert!(matches!(
            registry.resolve_block(&key("toolcraft:void_crystal")),
            Some(BlockRef::Custom(CustomBlock { breakable: None, .. }))
        ));
        assert!(registry.resolve_tool(&key("minecraft:stick")).is_none());
    }

    #[test]
    fn later_packs_see_earlier_categories() {
        let mut builder = ContentRegistry::builder();
        builder.add_pack(pack_from_str(PACK).unwrap()).unwrap();
        let extra = r#"{ "blocks": [{ "id": "basalt_ruby", "breakable": { "hardness": 1, "tool_categories": ["hammer"] } }] }"#;
        builder.add_pack(pack_from_str(extra).unwrap()).unwrap();
        assert_eq!(builder.build().block_count(), 3);
    }

    #[test]
    fn unknown_references_fail() {
        let pack = r#"{ "items": [{ "id": "x", "tool": { "categories": ["spoon"], "break_speed": 1 } }] }"#;
        let err = ContentRegistry::builder()
            .add_pack(pack_from_str(pack).unwrap())
            .unwrap_err();
        assert!(matches!(err, AssetError::UnknownCategory(name) if name == "spoon"));

        let pack = r#"{ "blocks": [{ "id": "x", "breakable": { "hardness": 1, "required_tier": "mithril" } }] }"#;
        let err = ContentRegistry::builder()
            .add_pack(pack_from_str(pack).unwrap())
            .unwrap_err();
        assert!(matches!(err, AssetError::UnknownTier(name) if name == "mithril"));
    }

    #[test]
    fn duplicates_fail() {
        let pack = r#"{ "blocks": [{ "id": "a" }, { "id": "toolcraft:a" }] }"#;
        let err = ContentRegistry::builder()
            .add_pack(pack_from_str(pack).unwrap())
            .unwrap_err();
        assert!(matches!(err, AssetError::Duplicate(id) if id == "toolcraft:a"));
    }

    #[test]
    fn invalid_keys_and_values_fail() {
        let pack = r#"{ "blocks": [{ "id": "Bad Id" }] }"#;
        let err = ContentRegistry::builder()
            .add_pack(pack_from_str(pack).unwrap())
            .unwrap_err();
        assert!(matches!(err, AssetError::InvalidKey { .. }));

        let pack = r#"{ "native_items": [{ "id": "odd", "tool": { "rules": [{ "speed": 2 }] } }] }"#;
        let err = ContentRegistry::builder()
            .add_pack(pack_from_str(pack).unwrap())
            .unwrap_err();
        assert!(matches!(err, AssetError::InvalidValue { .. }));

        let pack = r#"{ "items": [{ "id": "x", "tool": { "break_speed": -1 } }] }"#;
        let err = ContentRegistry::builder()
            .add_pack(pack_from_str(pack).unwrap())
            .unwrap_err();
        assert!(matches!(err, AssetError::InvalidValue { .. }));
    }

    #[test]
    fn non_finite_modifiers_fail() {
        let modifiers = [
            DamageModifierDefinition::Multiply(f64::NAN),
            DamageModifierDefinition::Add(f64::INFINITY),
            DamageModifierDefinition::Clamp {
                min: f64::NAN,
                max: 0.5,
            },
            DamageModifierDefinition::Clamp {
                min: 0.0,
                max: f64::NEG_INFINITY,
            },
        ];
        for modifier in modifiers {
            let pack = PackDefinition {
                items: vec![ItemDefinition {
                    id: "x".to_string(),
                    tool: None,
                    can_break: None,
                    damage_modifier: Some(modifier),
                }],
                ..PackDefinition::default()
            };
            let err = ContentRegistry::builder().add_pack(pack).unwrap_err();
            assert!(
                matches!(err, AssetError::InvalidValue { ref id, .. } if id == "x"),
                "{modifier:?} was accepted"
            );
        }
    }

    #[test]
    fn failed_pack_leaves_builder_untouched() {
        let mut builder = ContentRegistry::builder();
        let bad = r#"{ "categories": [{ "id": "drill" }], "blocks": [{ "id": "x", "breakable": { "hardness": 1, "tool_categories": ["spoon"] } }] }"#;
        assert!(builder.add_pack(pack_from_str(bad).unwrap()).is_err());

        // The category from the rejected pack must not leak.
        let uses_drill = r#"{ "blocks": [{ "id": "y", "breakable": { "hardness": 1, "tool_categories": ["drill"] } }] }"#;
        let err = builder.add_pack(pack_from_str(uses_drill).unwrap()).unwrap_err();
        assert!(matches!(err, AssetError::UnknownCategory(_)));
        assert_eq!(builder.build().block_count(), 0);
    }

    #[test]
    fn custom_blocks_shadow_native_ones() {
        let pack = r#"{
            "blocks": [{ "id": "minecraft:stone", "breakable": { "hardness": 9 } }],
            "native_blocks": [{ "id": "stone", "destroy_speed": 1.5 }]
        }"#;
        let mut builder = ContentRegistry::builder();
        builder.add_pack(pack_from_str(pack).unwrap()).unwrap();
        let registry = builder.build();
        let block = registry.resolve_block(&key("minecraft:stone")).unwrap();
        assert!(block.is_custom());
        assert_eq!(block.hardness(), 9.0);
        assert_eq!(registry.block_ids().count(), 2);
    }
}
