//! Run configuration from environment variables.
//!
//! Read once at startup and passed into the generator as an explicit value.

/// Platform selector variable. Must name a member of [`Platform`].
pub const PLATFORM_VAR: &str = "SDKCAT_PLATFORM";

/// Build-variant variable. Must start with `template`; the remainder is the
/// custom template suffix (empty remainder = default variant).
pub const TEMPLATE_TARGET_VAR: &str = "SDKCAT_TEMPLATE_TARGET";

const TEMPLATE_PREFIX: &str = "template";

/// Supported build platforms and their fixed name mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Iphone,
    Tvos,
}

impl Platform {
    /// Parse the configuration selector string.
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector {
            "iphone" => Some(Platform::Iphone),
            "tvos" => Some(Platform::Tvos),
            _ => None,
        }
    }

    /// SDK identifier understood by the platform toolchain.
    pub fn sdk_name(self) -> &'static str {
        match self {
            Platform::Iphone => "iphoneos",
            Platform::Tvos => "appletvos",
        }
    }

    /// File name of the aggregated manifest this platform contributes to.
    pub fn manifest_file_name(self) -> &'static str {
        match self {
            Platform::Iphone => "iOS-SDKs.json",
            Platform::Tvos => "tvOS-SDKs.json",
        }
    }

    /// JSON object key used inside manifest files.
    pub fn manifest_key(self) -> &'static str {
        match self {
            Platform::Iphone => "ios",
            Platform::Tvos => "tvos",
        }
    }
}

/// Resolved generator configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub platform: Platform,
    template_suffix: String,
}

impl Config {
    /// Read configuration from the environment. Fails on missing or invalid
    /// values; never falls back to a default platform.
    pub fn from_env() -> Result<Self, ConfigError> {
        let platform =
            std::env::var(PLATFORM_VAR).map_err(|_| ConfigError::Missing(PLATFORM_VAR))?;
        let target = std::env::var(TEMPLATE_TARGET_VAR)
            .map_err(|_| ConfigError::Missing(TEMPLATE_TARGET_VAR))?;
        Self::from_values(&platform, &target)
    }

    /// Validate raw configuration strings.
    pub fn from_values(platform: &str, template_target: &str) -> Result<Self, ConfigError> {
        let platform = platform.trim();
        let platform = Platform::from_selector(platform)
            .ok_or_else(|| ConfigError::UnknownPlatform(platform.to_string()))?;

        let template_target = template_target.trim();
        let suffix = template_target
            .strip_prefix(TEMPLATE_PREFIX)
            .ok_or_else(|| ConfigError::BadTemplateTarget(template_target.to_string()))?;

        Ok(Self {
            platform,
            template_suffix: suffix.to_string(),
        })
    }

    /// Custom template suffix; empty for the default build variant.
    pub fn template_suffix(&self) -> &str {
        &self.template_suffix
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    UnknownPlatform(String),
    BadTemplateTarget(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "Missing environment variable {}", var),
            ConfigError::UnknownPlatform(p) => {
                write!(f, "Unknown platform '{}' (expected iphone or tvos)", p)
            }
            ConfigError::BadTemplateTarget(t) => write!(
                f,
                "Template target '{}' does not start with '{}'",
                t, TEMPLATE_PREFIX
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
