//! Named signature presets
//!
//! Presets are looked up by name from a [`SignatureRegistry`]. The builtin
//! registry is built once per process; configuration files may layer their
//! own presets on top of a copy of it (later definitions override earlier
//! ones with the same name).

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Chars, Signature};
use crate::error::MultibarError;

/// Name of the preset used when nothing else is configured
pub const DEFAULT_PRESET: &str = "simple";

static BUILTIN_PRESETS: LazyLock<SignatureRegistry> = LazyLock::new(SignatureRegistry::builtin);

/// Process-wide registry holding the builtin presets
pub fn builtin_presets() -> &'static SignatureRegistry {
    &BUILTIN_PRESETS
}

/// A preset as written in a configuration file
///
/// Either a full three-segment signature or a flat [`Chars`] set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresetDefinition {
    Signature(Signature),
    Chars(Chars),
}

impl PresetDefinition {
    pub fn to_signature(&self) -> Signature {
        match self {
            PresetDefinition::Signature(sig) => sig.clone(),
            PresetDefinition::Chars(chars) => chars.to_signature(),
        }
    }
}

/// Registry mapping preset names to signatures
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    presets: BTreeMap<String, Signature>,
}

impl SignatureRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the builtin presets
    pub fn builtin() -> Self {
        debug!("SignatureRegistry::builtin: called");
        let mut registry = Self::new();

        registry.insert("simple", Signature::simple());
        registry.insert("square-emoji", Signature::square_emoji());
        registry.insert("default", Chars::new("█", "●").to_signature());
        registry.insert(
            "advanced",
            Chars::new("█", "●").with_start("◄", "◁").with_end("►", "▷").to_signature(),
        );
        registry.insert(
            "discord-default",
            Chars::new(":red_square:", ":black_large_square:").to_signature(),
        );
        registry.insert(
            "discord-advanced",
            Chars::new(":orange_circle:", ":white_large_square:")
                .with_start(":small_orange_diamond:", ":white_medium_small_square:")
                .with_end(":small_orange_diamond:", ":white_medium_small_square:")
                .to_signature(),
        );

        debug!(count = %registry.len(), "SignatureRegistry::builtin: complete");
        registry
    }

    /// Register or replace a preset
    pub fn insert(&mut self, name: impl Into<String>, signature: Signature) -> Option<Signature> {
        let name = name.into();
        debug!(%name, "SignatureRegistry::insert: called");
        self.presets.insert(name, signature)
    }

    /// Register every definition from a configuration map
    pub fn extend_from(&mut self, definitions: &HashMap<String, PresetDefinition>) {
        debug!(count = %definitions.len(), "SignatureRegistry::extend_from: called");
        for (name, definition) in definitions {
            if self.presets.contains_key(name) {
                debug!(%name, "SignatureRegistry::extend_from: overriding existing preset");
            }
            self.presets.insert(name.clone(), definition.to_signature());
        }
    }

    /// Look up a preset by name
    pub fn get(&self, name: &str) -> Result<&Signature, MultibarError> {
        debug!(%name, "SignatureRegistry::get: called");
        self.presets
            .get(name)
            .ok_or_else(|| MultibarError::UnknownPreset { name: name.to_string() })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// Preset names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
