//! Multibar configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::signature::{DEFAULT_PRESET, PresetDefinition, Signature, SignatureRegistry, builtin_presets};
use crate::writer::DEFAULT_LENGTH;

/// Main multibar configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How bars are rendered
    pub render: RenderConfig,

    /// Contract enforcement
    pub contracts: ContractsConfig,

    /// Diagnostic output
    pub output: OutputConfig,

    /// User-defined signature presets, layered over the builtin ones
    pub presets: HashMap<String, PresetDefinition>,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Rejects a zero bar length and a preset name that resolves to nothing.
    pub fn validate(&self) -> Result<()> {
        if self.render.length == 0 {
            return Err(eyre::eyre!("render.length must be more than 0"));
        }
        if self.render.signature.is_none() && !self.registry().contains(&self.render.preset) {
            return Err(eyre::eyre!(
                "Unknown preset '{}'. Known presets: {}",
                self.render.preset,
                self.registry().names().join(", ")
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .multibar.yml
        let local_config = PathBuf::from(".multibar.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/multibar/multibar.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("multibar").join("multibar.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::debug!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Builtin presets extended with the ones defined in this config
    pub fn registry(&self) -> SignatureRegistry {
        let mut registry = builtin_presets().clone();
        registry.extend_from(&self.presets);
        registry
    }

    /// Signature to render with: the literal override, else the named preset
    pub fn signature(&self) -> Result<Signature> {
        if let Some(signature) = &self.render.signature {
            return Ok(signature.clone());
        }
        let registry = self.registry();
        let signature = registry.get(&self.render.preset)?;
        Ok(signature.clone())
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Number of sectors
    pub length: usize,

    /// Name of the signature preset
    pub preset: String,

    /// Literal signature, takes precedence over `preset`
    pub signature: Option<Signature>,

    /// Attach the hook that swaps in the start and end glyphs
    #[serde(rename = "boundary-glyphs")]
    pub boundary_glyphs: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            preset: DEFAULT_PRESET.to_string(),
            signature: None,
            boundary_glyphs: true,
        }
    }
}

/// Contract configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// Fail the call on a broken contract instead of reporting it
    #[serde(rename = "raise-errors")]
    pub raise_errors: bool,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self { raise_errors: true }
    }
}

/// Diagnostic output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Colorize console diagnostics
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}
