//! Descriptor generation: one JSON fragment per build agent.

use std::path::{Path, PathBuf};

use crate::config::{Config, Platform};
use crate::models::SdkEntry;
use crate::toolchain::{self, ToolchainError};

/// Versions below 14.0 ship the legacy template set and are labelled as such.
const LEGACY_CUTOFF: i64 = 140_000;

/// Template suffix of the ANGLE-free build variant, surfaced as "Metal".
const ANGLE_SUFFIX: &str = "-angle";

/// Query the local toolchain and write this agent's descriptor fragment.
/// Returns the path of the written file. An existing fragment of the same
/// name is overwritten.
pub fn generate(config: &Config, output_dir: &Path, debug: bool) -> Result<PathBuf, GenerateError> {
    let sdk_version = toolchain::sdk_version(config.platform, debug)?;
    let xcode_version = toolchain::xcode_version(debug)?;

    let entry = build_entry(&sdk_version, &xcode_version, config.template_suffix())?;
    let file_name = descriptor_file_name(&entry, config.platform);
    if debug {
        eprintln!("[debug] descriptor file name: {}", file_name);
    }

    let mut fragment = serde_json::Map::new();
    fragment.insert(
        config.platform.manifest_key().to_string(),
        serde_json::json!([entry]),
    );
    let content = serde_json::to_string_pretty(&fragment).map_err(GenerateError::Serialize)?;

    std::fs::create_dir_all(output_dir).map_err(GenerateError::CreateDir)?;
    let path = output_dir.join(file_name);
    std::fs::write(&path, content).map_err(|e| GenerateError::WriteFailed(e, path.clone()))?;

    Ok(path)
}

/// Build the descriptor entry from toolchain answers and run configuration.
pub fn build_entry(
    sdk_version: &str,
    xcode_version: &str,
    template_suffix: &str,
) -> Result<SdkEntry, GenerateError> {
    let numeric_version = numeric_version(sdk_version).ok_or_else(|| {
        GenerateError::Toolchain(ToolchainError::UnparsableVersion(sdk_version.to_string()))
    })?;
    let is_beta = is_beta_sdk(sdk_version);

    let custom_template = if template_suffix.is_empty() {
        None
    } else {
        Some(template_suffix.to_string())
    };

    Ok(SdkEntry {
        label: label_for(sdk_version, numeric_version, template_suffix),
        sdk_version: sdk_version.to_string(),
        fail_message: format!("install or xcode-select {} to enable", xcode_version),
        numeric_version,
        is_beta,
        custom_template,
    })
}

/// Ordinal form of a dotted SDK version: `floor(v * 10000)`, so `"15.2"`
/// becomes `152000`. None when the string is not a decimal number.
pub fn numeric_version(sdk_version: &str) -> Option<i64> {
    let v: f64 = sdk_version.trim().parse().ok()?;
    if !v.is_finite() {
        return None;
    }
    Some((v * 10000.0).floor() as i64)
}

/// Beta SDKs are not currently published through this pipeline, so every
/// descriptor reports non-beta. Kept as a hook: the ordering key already
/// accounts for beta entries should that change.
fn is_beta_sdk(_sdk_version: &str) -> bool {
    false
}

fn label_for(sdk_version: &str, numeric_version: i64, template_suffix: &str) -> String {
    if numeric_version < LEGACY_CUTOFF {
        format!("{} (Legacy)", sdk_version)
    } else if template_suffix == ANGLE_SUFFIX {
        format!("{} Metal", sdk_version)
    } else {
        sdk_version.to_string()
    }
}

/// Filename prefix controlling aggregation and display order. Higher SDK
/// versions sort first; among equal versions, beta sorts after non-beta and
/// custom-template variants sort after the default variant.
pub fn ordering_key(numeric_version: i64, is_beta: bool, has_custom_template: bool) -> String {
    let mut key = 1_000_000 - numeric_version;
    if is_beta {
        key += 5;
    }
    if has_custom_template {
        key += 1;
    }
    format!("{:07}", key)
}

/// `<orderingKey>_<manifest file name>` — the one underscore is what marks
/// the file as a descriptor fragment during aggregation.
pub fn descriptor_file_name(entry: &SdkEntry, platform: Platform) -> String {
    let key = ordering_key(
        entry.numeric_version,
        entry.is_beta,
        entry.custom_template.is_some(),
    );
    format!("{}_{}", key, platform.manifest_file_name())
}

#[derive(Debug)]
pub enum GenerateError {
    Toolchain(ToolchainError),
    CreateDir(std::io::Error),
    Serialize(serde_json::Error),
    WriteFailed(std::io::Error, PathBuf),
}

impl From<ToolchainError> for GenerateError {
    fn from(e: ToolchainError) -> Self {
        GenerateError::Toolchain(e)
    }
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::Toolchain(e) => write!(f, "{}", e),
            GenerateError::CreateDir(e) => write!(f, "Failed to create output directory: {}", e),
            GenerateError::Serialize(e) => write!(f, "Failed to serialize descriptor: {}", e),
            GenerateError::WriteFailed(e, path) => {
                write!(f, "Failed to write {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for GenerateError {}
