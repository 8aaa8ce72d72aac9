//! Data structures for descriptor and manifest files.

use serde::{Deserialize, Serialize};

/// One build agent's SDK capability snapshot, as it appears inside
/// descriptor fragments and aggregated manifests.
///
/// `custom_template` is omitted from the JSON entirely for the default
/// build variant, never emitted as null or an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkEntry {
    pub label: String,
    pub sdk_version: String,
    pub fail_message: String,
    pub numeric_version: i64,
    pub is_beta: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_template: Option<String>,
}
