use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use toolcraft_mining::Attributes;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/toolcraft.toml";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolcraftConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Content packs loaded after the built-in vanilla pack.
    pub packs: Vec<PathBuf>,
    pub player: PlayerDefaults,
}

/// Attribute values applied to every simulated player unless overridden.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mining_efficiency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_break_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submerged_mining_speed: Option<f64>,
}

impl PlayerDefaults {
    pub fn attributes(&self) -> Attributes {
        Attributes {
            mining_efficiency: self.mining_efficiency,
            block_break_speed: self.block_break_speed,
            submerged_mining_speed: self.submerged_mining_speed,
        }
    }
}

impl Default for ToolcraftConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            packs: Vec::new(),
            player: PlayerDefaults::default(),
        }
    }
}

impl ToolcraftConfig {
    /// Read only the log filter, without logging anything.
    ///
    /// Used before the subscriber exists; problems surface later through
    /// [`ToolcraftConfig::load_from_path`].
    pub fn peek_log_filter(path: &Path) -> String {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| toml::from_str::<ToolcraftConfig>(&contents).ok())
            .map(|cfg| cfg.log_filter)
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ToolcraftConfig>(&contents) {
                Ok(cfg) => cfg.resolve_relative_to(path),
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ToolcraftConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                ToolcraftConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    // Relative pack paths start from the directory that holds `config/`.
    fn resolve_relative_to(mut self, path: &Path) -> Self {
        let base = path.parent().and_then(Path::parent).unwrap_or(Path::new(""));
        self.packs = self
            .packs
            .into_iter()
            .map(|pack| if pack.is_relative() { base.join(pack) } else { pack })
            .collect();
        self
    }
}
