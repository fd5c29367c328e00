//! Golden file snapshots.
//!
//! Snapshots are serialized as canonical pretty JSON with object keys sorted
//! and a trailing newline. Tests compare against the file on disk; rerun with
//! `TOOLCRAFT_UPDATE_SNAPSHOTS=1` to rewrite it.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "TOOLCRAFT_UPDATE_SNAPSHOTS";

/// Assert that `value` matches the JSON snapshot stored at `path`.
///
/// With `TOOLCRAFT_UPDATE_SNAPSHOTS=1` the file is written instead.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let actual = canonical_json(value)?;

    if should_update_snapshots() {
        write_snapshot(path, &actual)?;
        info!(path = %path.display(), "snapshot updated");
        return Ok(());
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "Snapshot missing at {} (run with {}=1 to create it)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        )
    })?;

    // Line endings may be rewritten on checkout.
    if expected.replace("\r\n", "\n") != actual {
        anyhow::bail!(
            "Snapshot mismatch at {} (run with {}=1 to update)\n--- expected\n{}\n--- actual\n{}",
            path.display(),
            UPDATE_SNAPSHOTS_ENV,
            expected,
            actual
        );
    }

    Ok(())
}

/// Serialize `value` the way snapshots are stored on disk.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("Failed to serialize snapshot value")?;
    let value = canonicalize_value(value);
    let mut s = serde_json::to_string_pretty(&value).context("Failed to format snapshot JSON")?;
    s.push('\n');
    Ok(s)
}

fn should_update_snapshots() -> bool {
    matches!(
        std::env::var(UPDATE_SNAPSHOTS_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

fn write_snapshot(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create snapshot directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write snapshot {}", path.display()))
}

fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize_value(v)))
                    .collect(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize_value).collect()),
        other => other,
    }
}
