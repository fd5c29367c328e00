use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{AssetError, ContentRegistry, PackDefinition};

const BUILTIN_NATIVE_PACK: &str = include_str!("../data/vanilla.json");

/// Parse a pack from an in-memory JSON string.
pub fn pack_from_str(input: &str) -> Result<PackDefinition, AssetError> {
    Ok(serde_json::from_str(input)?)
}

/// Load a pack from the provided JSON file path.
pub fn pack_from_file(path: &Path) -> Result<PackDefinition, AssetError> {
    let data = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = data.len(), "read content pack");
    pack_from_str(&data)
}

/// The vanilla blocks and items shipped with the crate.
pub fn builtin_native_pack() -> Result<PackDefinition, AssetError> {
    pack_from_str(BUILTIN_NATIVE_PACK)
}

/// Build a registry from the built-in pack followed by `paths`, in order.
pub fn registry_from_files<P: AsRef<Path>>(paths: &[P]) -> Result<ContentRegistry, AssetError> {
    let mut builder = ContentRegistry::builder();
    builder.add_pack(builtin_native_pack()?)?;
    for path in paths {
        builder.add_pack(pack_from_file(path.as_ref())?)?;
    }
    Ok(builder.build())
}
