//! One-shot builder from a plain parameter value

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bar::SectorContainer;
use crate::error::MultibarError;
use crate::hooks::apply_boundary_glyphs;
use crate::metadata::ProgressReport;
use crate::signature::{Chars, Signature};
use crate::writer::{DEFAULT_LENGTH, ProgressWriter, ProgressbarWriter};

/// Named parameters for [`build_progress`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressParams {
    /// Current progress
    pub now: Option<u64>,

    /// Progress needed for a full bar
    pub needed: Option<u64>,

    /// Number of sectors
    pub length: usize,

    /// Glyph set; the simple signature when absent
    pub chars: Option<Chars>,
}

impl Default for ProgressParams {
    fn default() -> Self {
        Self {
            now: None,
            needed: None,
            length: DEFAULT_LENGTH,
            chars: None,
        }
    }
}

impl ProgressParams {
    pub fn new(now: u64, needed: u64) -> Self {
        Self {
            now: Some(now),
            needed: Some(needed),
            ..Self::default()
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn with_chars(mut self, chars: Chars) -> Self {
        self.chars = Some(chars);
        self
    }
}

/// Validate `params` and render a complete bar, boundary glyphs included
///
/// # Errors
/// - [`MultibarError::MissingRequiredArguments`] when `now` or `needed` is absent
/// - [`MultibarError::BadValueSpecified`] when `length` or `needed` is zero, or `now > needed`
pub fn build_progress(params: &ProgressParams) -> Result<ProgressReport, MultibarError> {
    debug!(?params, "build_progress: called");

    let missing: Vec<&'static str> = [("now", params.now.is_none()), ("needed", params.needed.is_none())]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();
    let (Some(now), Some(needed)) = (params.now, params.needed) else {
        return Err(MultibarError::MissingRequiredArguments { missing });
    };

    if params.length == 0 {
        return Err(MultibarError::BadValueSpecified("length must be more than 0".to_string()));
    }
    if needed == 0 {
        return Err(MultibarError::BadValueSpecified("needed must be more than 0".to_string()));
    }
    if now > needed {
        return Err(MultibarError::BadValueSpecified(format!(
            "now ({now}) cannot be more than needed ({needed})"
        )));
    }

    let signature = params.chars.as_ref().map(Signature::from).unwrap_or_default();
    let writer = ProgressWriter::from_signature(signature);
    let percentage = writer.progress_percentage(now, needed, params.length);

    let mut bar = writer.write(now, needed, params.length)?;
    apply_boundary_glyphs(&mut bar, writer.signature(), percentage)?;

    Ok(ProgressReport {
        bar: bar.render(),
        percentage,
        length: bar.len(),
        current: now,
        target: needed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_chars() {
        let params = ProgressParams::new(10, 100).with_chars(Chars::new("+", "-"));
        let report = build_progress(&params).unwrap();

        assert_eq!(report.bar, "++------------------");
        assert_eq!(report.length, 20);
        assert_eq!(report.percentage, 10.0);
    }

    #[test]
    fn test_build_applies_boundary_glyphs() {
        let report = build_progress(&ProgressParams::new(50, 100).with_length(6)).unwrap();
        assert_eq!(report.bar, "<++---");

        let report = build_progress(&ProgressParams::new(100, 100).with_length(6)).unwrap();
        assert_eq!(report.bar, "<++++>");
    }

    #[test]
    fn test_missing_arguments() {
        let err = build_progress(&ProgressParams::default()).unwrap_err();
        assert!(matches!(err, MultibarError::MissingRequiredArguments { ref missing } if missing == &["now", "needed"]));

        let params = ProgressParams {
            now: Some(1),
            ..ProgressParams::default()
        };
        let err = build_progress(&params).unwrap_err();
        assert!(matches!(err, MultibarError::MissingRequiredArguments { ref missing } if missing == &["needed"]));
    }

    #[test]
    fn test_bad_values() {
        for params in [
            ProgressParams::new(1, 2).with_length(0),
            ProgressParams::new(0, 0),
            ProgressParams::new(3, 2),
        ] {
            let err = build_progress(&params).unwrap_err();
            assert!(matches!(err, MultibarError::BadValueSpecified(_)), "{params:?}");
        }
    }
}
