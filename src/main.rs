//! toolcraft - block break progress calculator
//!
//! Resolves a block and an optional held item from the loaded content packs
//! and prints how much break progress a player makes per tick.

mod config;

use anyhow::{bail, Context, Result};
use clap::Parser;
use config::{ToolcraftConfig, DEFAULT_CONFIG_PATH};
use serde::Serialize;
use std::path::{Path, PathBuf};
use toolcraft_assets::{builtin_native_pack, pack_from_file, ContentRegistry};
use toolcraft_core::{
    Enchantment, EnchantmentType, GameMode, RegistryKey, StatusEffect, StatusEffectType,
    StatusEffects,
};
use toolcraft_mining::{
    calculate_damage, destroy_speed, is_correct_tool_for_drops, mining_efficiency_for_level,
    ticks_to_break, BlockRef, PlayerState, ToolRef,
};
use tracing::{info, warn};

// Long enough to outlast any break.
const EFFECT_DURATION_TICKS: u32 = 20 * 60 * 60;

#[derive(Parser, Debug)]
#[command(author, version, about = "Block break progress calculator for custom and vanilla content", long_about = None)]
struct Args {
    /// Block id (bare paths are looked up in the `minecraft` namespace)
    #[arg(short, long)]
    block: String,

    /// Held item id; bare hands when omitted
    #[arg(short, long)]
    tool: Option<String>,

    /// Game mode: survival, creative, adventure or spectator
    #[arg(long, default_value = "survival", value_parser = parse_game_mode)]
    mode: GameMode,

    /// Haste level (0 = none)
    #[arg(long, default_value_t = 0)]
    haste: u8,

    /// Mining fatigue level (0 = none)
    #[arg(long, default_value_t = 0)]
    fatigue: u8,

    /// Efficiency enchantment level of the held tool (0 = none, capped at 5)
    #[arg(long, default_value_t = 0)]
    efficiency: u8,

    /// The player is not standing on the ground
    #[arg(long)]
    airborne: bool,

    /// The player's eyes are under water
    #[arg(long)]
    underwater: bool,

    /// The player's helmet has Aqua Affinity
    #[arg(long)]
    aqua_affinity: bool,

    /// Config file path
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Extra content pack (repeatable); loaded after the packs from the config
    #[arg(long)]
    pack: Vec<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Write a default config file to `--config` and exit
    #[arg(long)]
    init_config: bool,
}

fn parse_game_mode(input: &str) -> Result<GameMode, String> {
    GameMode::parse(input).ok_or_else(|| format!("unknown game mode `{input}`"))
}

#[derive(Debug, Serialize)]
struct Report {
    block: String,
    tool: Option<String>,
    game_mode: GameMode,
    correct_for_drops: bool,
    destroy_speed: f64,
    damage_per_tick: f64,
    ticks_to_break: Option<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over the config's filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(ToolcraftConfig::peek_log_filter(&args.config))
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    if args.init_config {
        if args.config.exists() {
            bail!("{} already exists", args.config.display());
        }
        ToolcraftConfig::default()
            .save_to_path(&args.config)
            .with_context(|| format!("Failed to write {}", args.config.display()))?;
        println!("wrote {}", args.config.display());
        return Ok(());
    }

    let config = ToolcraftConfig::load_from_path(&args.config);
    let registry = load_registry(&config.packs, &args.pack)?;
    info!(
        blocks = registry.block_count(),
        items = registry.item_count(),
        "content loaded"
    );

    let block_id = RegistryKey::native(&args.block)
        .with_context(|| format!("Invalid block id `{}`", args.block))?;
    let Some(block) = registry.resolve_block(&block_id) else {
        bail!("Unknown block `{block_id}`");
    };
    let tool = match &args.tool {
        None => ToolRef::None,
        Some(raw) => {
            let id = RegistryKey::native(raw).with_context(|| format!("Invalid item id `{raw}`"))?;
            registry
                .resolve_tool(&id)
                .with_context(|| format!("Unknown item `{id}`"))?
        }
    };

    let player = build_player(&args, &config);
    let report = evaluate(&player, block, tool);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Built-in pack and `--pack` files must load; config packs are skipped on error.
fn load_registry(config_packs: &[PathBuf], cli_packs: &[PathBuf]) -> Result<ContentRegistry> {
    let mut builder = ContentRegistry::builder();
    builder
        .add_pack(builtin_native_pack().context("Built-in vanilla pack is invalid")?)
        .context("Built-in vanilla pack is invalid")?;

    for path in config_packs {
        if let Err(err) = add_pack_file(&mut builder, path) {
            warn!("Skipping content pack {}: {err:#}", path.display());
        }
    }
    for path in cli_packs {
        add_pack_file(&mut builder, path)?;
    }
    Ok(builder.build())
}

fn add_pack_file(builder: &mut toolcraft_assets::ContentRegistryBuilder, path: &Path) -> Result<()> {
    let pack = pack_from_file(path)
        .with_context(|| format!("Failed to load content pack {}", path.display()))?;
    builder
        .add_pack(pack)
        .with_context(|| format!("Invalid content pack {}", path.display()))?;
    Ok(())
}

fn build_player(args: &Args, config: &ToolcraftConfig) -> PlayerState {
    let mut attributes = config.player.attributes();
    if args.efficiency > 0 {
        let efficiency = Enchantment::new(EnchantmentType::Efficiency, args.efficiency);
        attributes.mining_efficiency = Some(mining_efficiency_for_level(efficiency.level));
    }

    let effects: StatusEffects = [
        StatusEffect::at_level(StatusEffectType::Haste, args.haste, EFFECT_DURATION_TICKS),
        StatusEffect::at_level(
            StatusEffectType::MiningFatigue,
            args.fatigue,
            EFFECT_DURATION_TICKS,
        ),
    ]
    .into_iter()
    .flatten()
    .collect();

    let helmet = if args.aqua_affinity {
        vec![Enchantment::new(EnchantmentType::AquaAffinity, 1)]
    } else {
        Vec::new()
    };

    PlayerState {
        game_mode: args.mode,
        attributes,
        effects,
        on_ground: !args.airborne,
        eye_in_water: args.underwater,
        helmet,
    }
}

fn evaluate(player: &PlayerState, block: BlockRef<'_>, tool: ToolRef<'_>) -> Report {
    let damage = calculate_damage(player, block, tool);
    Report {
        block: block.id().to_string(),
        tool: tool.id().map(ToString::to_string),
        game_mode: player.game_mode,
        correct_for_drops: is_correct_tool_for_drops(block, tool),
        destroy_speed: destroy_speed(block, tool),
        damage_per_tick: damage,
        ticks_to_break: ticks_to_break(damage),
    }
}

fn print_report(report: &Report) {
    println!("block:             {}", report.block);
    println!(
        "tool:              {}",
        report.tool.as_deref().unwrap_or("bare hands")
    );
    println!("correct for drops: {}", report.correct_for_drops);
    println!("destroy speed:     {}", report.destroy_speed);
    println!("damage per tick:   {}", report.damage_per_tick);
    match report.ticks_to_break {
        Some(ticks) => println!(
            "ticks to break:    {ticks} ({:.2}s)",
            f64::from(ticks) / 20.0
        ),
        None => println!("ticks to break:    never"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["toolcraft", "--block", "stone"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn registry() -> ContentRegistry {
        load_registry(&[], &[]).unwrap()
    }

    #[test]
    fn flags_build_the_player() {
        let player = build_player(
            &args(&[
                "--haste",
                "2",
                "--efficiency",
                "5",
                "--airborne",
                "--underwater",
                "--aqua-affinity",
                "--mode",
                "adventure",
            ]),
            &ToolcraftConfig::default(),
        );
        let mods = player.mining_modifiers();
        assert_eq!(player.game_mode, GameMode::Adventure);
        assert_eq!(mods.haste_level, 2);
        assert_eq!(mods.fatigue_level, 0);
        assert_eq!(mods.efficiency, 26.0);
        assert!(!mods.on_ground);
        assert!(!mods.underwater);
    }

    #[test]
    fn efficiency_is_capped_at_its_max_level() {
        let player = build_player(&args(&["--efficiency", "9"]), &ToolcraftConfig::default());
        assert_eq!(player.mining_modifiers().efficiency, 26.0);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Args::try_parse_from(["toolcraft", "--block", "stone", "--mode", "hardcore"]).is_err());
    }

    #[test]
    fn report_for_vanilla_pickaxe() {
        let registry = registry();
        let stone = registry
            .resolve_block(&RegistryKey::native("stone").unwrap())
            .unwrap();
        let pickaxe = registry
            .resolve_tool(&RegistryKey::native("iron_pickaxe").unwrap())
            .unwrap();
        let report = evaluate(&PlayerState::survival(), stone, pickaxe);
        assert!(report.correct_for_drops);
        assert_eq!(report.destroy_speed, 6.0);
        assert_eq!(report.damage_per_tick, 0.133);
        assert_eq!(report.ticks_to_break, Some(8));
        assert_eq!(report.tool.as_deref(), Some("minecraft:iron_pickaxe"));
    }

    #[test]
    fn missing_cli_pack_is_an_error() {
        let missing = std::env::temp_dir().join("toolcraft-no-such-pack.json");
        assert!(load_registry(&[], &[missing.clone()]).is_err());
        assert!(load_registry(&[missing], &[]).is_ok());
    }
}
