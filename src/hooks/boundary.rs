//! Boundary-glyph post hook
//!
//! Writers only use the signature's `middle` segment. This hook decorates the
//! first and last sector with the `start` and `end` glyphs once the bar is
//! written:
//!
//! - sector `0` gets `start.on_filled` from 3% on, `start.on_unfilled` below;
//! - sector `-1` gets `end.on_filled` from 97% on, `end.on_unfilled` below.
//!
//! The two checks are independent.

use tracing::debug;

use super::{HookContext, Hooks};
use crate::bar::SectorContainer;
use crate::error::MultibarError;
use crate::signature::Signature;

/// Percentage from which the first sector shows the filled start glyph
pub const FIRST_FILL_THRESHOLD: f64 = 3.0;

/// Percentage from which the last sector shows the filled end glyph
pub const LAST_FILL_THRESHOLD: f64 = 97.0;

/// Replace the first and last glyphs of `bar` according to `percentage`
pub fn apply_boundary_glyphs<B>(bar: &mut B, signature: &Signature, percentage: f64) -> Result<(), MultibarError>
where
    B: SectorContainer + ?Sized,
{
    debug!(%percentage, len = %bar.len(), "apply_boundary_glyphs: called");

    let start = if percentage < FIRST_FILL_THRESHOLD {
        debug!("apply_boundary_glyphs: start below first fill threshold");
        &signature.start.on_unfilled
    } else {
        &signature.start.on_filled
    };
    bar.replace_display_name_for(0, start)?;

    let end = if percentage < LAST_FILL_THRESHOLD {
        &signature.end.on_unfilled
    } else {
        debug!("apply_boundary_glyphs: end at or above last fill threshold");
        &signature.end.on_filled
    };
    bar.replace_display_name_for(-1, end)?;

    Ok(())
}

/// Post-execution hook applying [`apply_boundary_glyphs`] with the call's signature and percentage
pub fn boundary_glyph_hook<B: SectorContainer>(ctx: &mut HookContext<'_, B>) -> Result<(), MultibarError> {
    let metadata = ctx.metadata;
    let Some(bar) = ctx.progressbar.as_deref_mut() else {
        return Err(MultibarError::hook(
            "boundary_glyph_hook",
            "post-execution context carries no progressbar",
        ));
    };
    apply_boundary_glyphs(bar, &metadata.signature, metadata.percentage)
}

/// Hook set with the boundary-glyph hook registered as post-execution callback
pub fn writer_hooks<B: SectorContainer + 'static>() -> Hooks<B> {
    debug!("writer_hooks: called");
    let mut hooks = Hooks::new();
    hooks.add_post_execution(boundary_glyph_hook::<B>);
    hooks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::{BarSector, Progressbar, Sector};
    use crate::metadata::CallMetadata;

    fn bar(filled: usize, length: usize) -> Progressbar {
        Progressbar::from_sectors((0..length).map(|i| {
            if i < filled {
                BarSector::new("+", true, i)
            } else {
                BarSector::new("-", false, i)
            }
        }))
    }

    fn sig() -> Signature {
        Signature::new(
            crate::signature::SignatureSegment::new("S", "s"),
            crate::signature::SignatureSegment::new("+", "-"),
            crate::signature::SignatureSegment::new("E", "e"),
        )
    }

    #[test]
    fn test_thresholds() {
        let cases = [
            (0.0, "s", "e"),
            (2.9, "s", "e"),
            (3.0, "S", "e"),
            (50.0, "S", "e"),
            (96.9, "S", "e"),
            (97.0, "S", "E"),
            (100.0, "S", "E"),
        ];
        for (percentage, first, last) in cases {
            let mut b = bar(0, 5);
            apply_boundary_glyphs(&mut b, &sig(), percentage).unwrap();
            assert_eq!(b[0].glyph(), first, "first glyph at {percentage}%");
            assert_eq!(b[4].glyph(), last, "last glyph at {percentage}%");
        }
    }

    #[test]
    fn test_only_boundaries_change() {
        let mut b = bar(3, 6);
        apply_boundary_glyphs(&mut b, &Signature::simple(), 50.0).unwrap();
        assert_eq!(b.to_string(), "<++---");
    }

    #[test]
    fn test_single_sector_bar_gets_end_glyph_last() {
        let mut b = bar(1, 1);
        apply_boundary_glyphs(&mut b, &sig(), 100.0).unwrap();
        assert_eq!(b.to_string(), "E");
    }

    #[test]
    fn test_empty_bar_errors() {
        let mut b = bar(0, 0);
        let err = apply_boundary_glyphs(&mut b, &sig(), 50.0).unwrap_err();
        assert!(matches!(err, MultibarError::IndexOutOfRange { .. }));
    }

    #[test]
    fn test_writer_hooks_registers_post_hook() {
        let hooks: Hooks<Progressbar> = writer_hooks();
        assert_eq!(hooks.post_execution_hooks().len(), 1);
        assert!(hooks.pre_execution_hooks().is_empty());

        let metadata = CallMetadata {
            start_value: 50,
            end_value: 100,
            length: 6,
            signature: Signature::simple(),
            calculation_service: "ProgressbarCalculationService".to_string(),
            percentage: 50.0,
        };
        let mut b = bar(3, 6);
        hooks.trigger_post_execution(&metadata, &mut b).unwrap();
        assert_eq!(b.to_string(), "<++---");
    }

    #[test]
    fn test_hook_without_progressbar_fails() {
        let metadata = CallMetadata {
            start_value: 1,
            end_value: 2,
            length: 2,
            signature: Signature::simple(),
            calculation_service: "ProgressbarCalculationService".to_string(),
            percentage: 50.0,
        };
        let mut ctx: HookContext<'_, Progressbar> = HookContext {
            metadata: &metadata,
            progressbar: None,
            error: None,
        };
        assert!(boundary_glyph_hook(&mut ctx).is_err());
    }
}
