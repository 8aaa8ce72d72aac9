//! Merge descriptor fragments into consolidated per-platform manifests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Merge every eligible fragment among `inputs` and write one manifest file
/// per manifest name under `output_dir`. Returns the written paths.
///
/// All fragments are parsed before anything is written, so a malformed
/// input aborts the run with no output files.
pub fn aggregate(
    output_dir: &Path,
    inputs: &[PathBuf],
    debug: bool,
) -> Result<Vec<PathBuf>, AggregateError> {
    // (basename, path) pairs, sorted by basename. The zero-padded ordering
    // key prefix makes lexicographic order equal numeric key order.
    let mut eligible: Vec<(String, &Path)> = inputs
        .iter()
        .filter_map(|p| descriptor_basename(p).map(|name| (name, p.as_path())))
        .collect();
    eligible.sort_by(|a, b| a.0.cmp(&b.0));

    let mut manifests: BTreeMap<String, BTreeMap<String, Vec<Value>>> = BTreeMap::new();
    for (basename, path) in &eligible {
        // Eligibility guarantees exactly one underscore.
        let manifest_name = match basename.split_once('_') {
            Some((_, rest)) => rest.to_string(),
            None => continue,
        };
        if debug {
            eprintln!("[debug] {} -> {}", path.display(), manifest_name);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AggregateError::ReadFailed(e, path.to_path_buf()))?;
        let fragment: BTreeMap<String, Vec<Value>> = serde_json::from_str(&content)
            .map_err(|e| AggregateError::ParseFailed(e, path.to_path_buf()))?;

        let manifest = manifests.entry(manifest_name).or_default();
        for (platform_key, mut entries) in fragment {
            manifest.entry(platform_key).or_default().append(&mut entries);
        }
    }

    std::fs::create_dir_all(output_dir).map_err(AggregateError::CreateDir)?;

    let mut written = Vec::new();
    for (manifest_name, platforms) in &manifests {
        let content =
            serde_json::to_string_pretty(platforms).map_err(AggregateError::Serialize)?;
        let path = output_dir.join(manifest_name);
        std::fs::write(&path, content)
            .map_err(|e| AggregateError::WriteFailed(e, path.clone()))?;
        written.push(path);
    }

    Ok(written)
}

/// Basename of an eligible fragment, or None for anything else. Fragments
/// are `<7-digit key>_<manifest name>.json`; the exactly-one-underscore
/// rule is what separates them from unrelated files in the input set.
fn descriptor_basename(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    if name.ends_with(".json") && name.matches('_').count() == 1 {
        Some(name.to_string())
    } else {
        None
    }
}

#[derive(Debug)]
pub enum AggregateError {
    ReadFailed(std::io::Error, PathBuf),
    ParseFailed(serde_json::Error, PathBuf),
    CreateDir(std::io::Error),
    Serialize(serde_json::Error),
    WriteFailed(std::io::Error, PathBuf),
}

impl std::fmt::Display for AggregateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateError::ReadFailed(e, path) => {
                write!(f, "Failed to read {}: {}", path.display(), e)
            }
            AggregateError::ParseFailed(e, path) => {
                write!(f, "Failed to parse {}: {}", path.display(), e)
            }
            AggregateError::CreateDir(e) => {
                write!(f, "Failed to create output directory: {}", e)
            }
            AggregateError::Serialize(e) => write!(f, "Failed to serialize manifest: {}", e),
            AggregateError::WriteFailed(e, path) => {
                write!(f, "Failed to write {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for AggregateError {}
