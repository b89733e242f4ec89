//! Signatures - the glyph mappings used to render a progressbar
//!
//! A [`Signature`] has three segments. `middle` supplies the glyph for every
//! sector the writer creates; `start` and `end` are only used by the
//! boundary-glyph hook to decorate the first and last sector.

mod chars;
mod presets;

pub use chars::Chars;
pub use presets::{DEFAULT_PRESET, PresetDefinition, SignatureRegistry, builtin_presets};

use serde::{Deserialize, Serialize};

/// Filled/unfilled glyph pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureSegment {
    /// Glyph for a filled sector
    #[serde(rename = "on-filled")]
    pub on_filled: String,

    /// Glyph for an unfilled sector
    #[serde(rename = "on-unfilled")]
    pub on_unfilled: String,
}

impl SignatureSegment {
    pub fn new(on_filled: impl Into<String>, on_unfilled: impl Into<String>) -> Self {
        Self {
            on_filled: on_filled.into(),
            on_unfilled: on_unfilled.into(),
        }
    }

    /// Pick the glyph for the given fill state
    pub fn glyph(&self, is_filled: bool) -> &str {
        if is_filled { &self.on_filled } else { &self.on_unfilled }
    }
}

/// Three-segment glyph mapping
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub start: SignatureSegment,
    pub middle: SignatureSegment,
    pub end: SignatureSegment,
}

impl Signature {
    pub fn new(start: SignatureSegment, middle: SignatureSegment, end: SignatureSegment) -> Self {
        Self { start, middle, end }
    }

    /// ASCII signature: `<+++--->` style bars
    pub fn simple() -> Self {
        Self {
            start: SignatureSegment::new("<", "-"),
            middle: SignatureSegment::new("+", "-"),
            end: SignatureSegment::new(">", "-"),
        }
    }

    /// Chat emoji signature built from square and diamond shortcodes
    pub fn square_emoji() -> Self {
        Self {
            start: SignatureSegment::new(":small_orange_diamond:", ":black_large_square:"),
            middle: SignatureSegment::new(":orange_square:", ":black_large_square:"),
            end: SignatureSegment::new(":small_orange_diamond:", ":black_large_square:"),
        }
    }

    /// Signature that uses the same glyph pair for every segment
    pub fn uniform(on_filled: impl Into<String>, on_unfilled: impl Into<String>) -> Self {
        let segment = SignatureSegment::new(on_filled, on_unfilled);
        Self {
            start: segment.clone(),
            middle: segment.clone(),
            end: segment,
        }
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self::simple()
    }
}

impl From<&Chars> for Signature {
    fn from(chars: &Chars) -> Self {
        chars.to_signature()
    }
}

impl From<Chars> for Signature {
    fn from(chars: Chars) -> Self {
        chars.to_signature()
    }
}
