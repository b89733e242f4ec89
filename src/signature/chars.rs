//! Six-glyph character sets

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Signature, SignatureSegment};
use crate::error::MultibarError;

/// Flat character set: fill and line plus optional boundary glyphs
///
/// Missing boundary glyphs fall back to `fill` (filled side) and `line`
/// (unfilled side), so a two-glyph set renders a plain bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chars {
    /// Glyph for filled sectors
    pub fill: String,

    /// Glyph for unfilled sectors
    pub line: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    #[serde(default, rename = "unfilled-start", skip_serializing_if = "Option::is_none")]
    pub unfilled_start: Option<String>,

    #[serde(default, rename = "unfilled-end", skip_serializing_if = "Option::is_none")]
    pub unfilled_end: Option<String>,
}

impl Chars {
    /// Maximum number of positional glyphs accepted by [`Chars::from_glyphs`]
    pub const MAX_GLYPHS: usize = 6;

    pub fn new(fill: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            line: line.into(),
            start: None,
            end: None,
            unfilled_start: None,
            unfilled_end: None,
        }
    }

    /// Set the filled and unfilled start glyphs
    pub fn with_start(mut self, start: impl Into<String>, unfilled_start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.unfilled_start = Some(unfilled_start.into());
        self
    }

    /// Set the filled and unfilled end glyphs
    pub fn with_end(mut self, end: impl Into<String>, unfilled_end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self.unfilled_end = Some(unfilled_end.into());
        self
    }

    /// Parse an ordered glyph list: `fill line [start end unfilled_start unfilled_end]`
    pub fn from_glyphs<S: AsRef<str>>(glyphs: &[S]) -> Result<Self, MultibarError> {
        debug!(count = %glyphs.len(), "Chars::from_glyphs: called");
        if glyphs.len() < 2 {
            return Err(MultibarError::InvalidGlyphs(format!(
                "expected at least fill and line glyphs, got {}",
                glyphs.len()
            )));
        }
        if glyphs.len() > Self::MAX_GLYPHS {
            return Err(MultibarError::InvalidGlyphs(format!(
                "expected at most {} glyphs, got {}",
                Self::MAX_GLYPHS,
                glyphs.len()
            )));
        }
        if let Some(pos) = glyphs.iter().position(|g| g.as_ref().is_empty()) {
            return Err(MultibarError::InvalidGlyphs(format!("glyph #{} is empty", pos + 1)));
        }

        let nth = |i: usize| glyphs.get(i).map(|g| g.as_ref().to_string());
        Ok(Self {
            fill: glyphs[0].as_ref().to_string(),
            line: glyphs[1].as_ref().to_string(),
            start: nth(2),
            end: nth(3),
            unfilled_start: nth(4),
            unfilled_end: nth(5),
        })
    }

    /// Expand into a three-segment signature
    pub fn to_signature(&self) -> Signature {
        let or_fill = |g: &Option<String>| g.clone().unwrap_or_else(|| self.fill.clone());
        let or_line = |g: &Option<String>| g.clone().unwrap_or_else(|| self.line.clone());

        Signature {
            start: SignatureSegment::new(or_fill(&self.start), or_line(&self.unfilled_start)),
            middle: SignatureSegment::new(self.fill.clone(), self.line.clone()),
            end: SignatureSegment::new(or_fill(&self.end), or_line(&self.unfilled_end)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_glyphs_render_plain_signature() {
        let chars = Chars::from_glyphs(&["#", "."]).unwrap();
        let sig = chars.to_signature();

        assert_eq!(sig, Signature::uniform("#", "."));
    }

    #[test]
    fn test_six_glyphs_fill_every_slot() {
        let chars = Chars::from_glyphs(&["█", "●", "◄", "►", "◁", "▷"]).unwrap();
        let sig = Signature::from(&chars);

        assert_eq!(sig.middle, SignatureSegment::new("█", "●"));
        assert_eq!(sig.start, SignatureSegment::new("◄", "◁"));
        assert_eq!(sig.end, SignatureSegment::new("►", "▷"));
    }

    #[test]
    fn test_partial_glyphs_fall_back() {
        let chars = Chars::from_glyphs(&["=", " ", "["]).unwrap();
        let sig = chars.to_signature();

        assert_eq!(sig.start, SignatureSegment::new("[", " "));
        assert_eq!(sig.end, SignatureSegment::new("=", " "));
    }

    #[test]
    fn test_invalid_glyph_counts() {
        assert!(Chars::from_glyphs(&["#"]).is_err());
        assert!(Chars::from_glyphs::<&str>(&[]).is_err());
        let err = Chars::from_glyphs(&["a", "b", "c", "d", "e", "f", "g"]).unwrap_err();
        assert!(err.to_string().contains("at most 6"));
    }

    #[test]
    fn test_empty_glyph_rejected() {
        let err = Chars::from_glyphs(&["#", ""]).unwrap_err();
        assert!(matches!(err, MultibarError::InvalidGlyphs(_)));
    }

    #[test]
    fn test_builder_methods() {
        let chars = Chars::new("+", "-").with_start("<", "(").with_end(">", ")");
        let sig = chars.to_signature();
        assert_eq!(sig.start.on_unfilled, "(");
        assert_eq!(sig.end.on_unfilled, ")");
    }
}
