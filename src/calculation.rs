//! Progress calculation
//!
//! A calculation service turns `(current, target, length)` into a percentage
//! and into the two index ranges a writer fills with filled and unfilled
//! sectors. The ranges always partition `0..length`: filled sectors take
//! `0..filled_count` and unfilled ones continue from there to `length`.
//!
//! Rounding is `f64::round` (ties away from zero), so a bar that sits exactly
//! half way between two sectors gets the extra filled sector.

use std::ops::Range;

use tracing::debug;

use crate::error::MultibarError;

/// `(current / target) * 100`, unclamped
pub fn progress_percentage(current: f64, target: f64) -> f64 {
    (current / target) * 100.0
}

/// Number of filled sectors for `percentage` on a bar of `length` sectors
///
/// Clamped into `0..=length`; non-finite input yields zero filled sectors.
pub fn filled_sector_count(percentage: f64, length: usize) -> usize {
    let raw = (percentage / (100.0 / length as f64)).round();
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    // `as` saturates on overflow; the min keeps the partition intact
    (raw as usize).min(length)
}

/// Calculation strategy for a single write
pub trait CalculationService {
    /// Current progress value
    fn current(&self) -> f64;

    /// Target progress value
    fn target(&self) -> f64;

    /// Number of sectors in the bar
    fn length(&self) -> usize;

    /// Progress percentage
    fn percentage(&self) -> f64 {
        progress_percentage(self.current(), self.target())
    }

    /// Number of filled sectors, never more than `length`
    fn filled_count(&self) -> usize {
        filled_sector_count(self.percentage(), self.length())
    }

    /// Number of unfilled sectors
    fn unfilled_count(&self) -> usize {
        self.length() - self.filled_count()
    }

    /// Indexes of filled sectors, recomputed on each call
    fn filled_indexes(&self) -> Range<usize> {
        0..self.filled_count()
    }

    /// Indexes of unfilled sectors, continuing after the filled ones
    fn unfilled_indexes(&self) -> Range<usize> {
        self.filled_count()..self.length()
    }
}

/// Creates calculation services for a writer
pub trait CalculationServiceFactory {
    /// Service type this factory creates
    type Service: CalculationService;

    /// Name reported in call metadata
    fn name(&self) -> &'static str;

    /// Create a service, rejecting inputs that would divide by zero
    fn create(&self, current: f64, target: f64, length: usize) -> Result<Self::Service, MultibarError>;
}

/// Default calculation service
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressbarCalculationService {
    current: f64,
    target: f64,
    length: usize,
}

impl ProgressbarCalculationService {
    /// Create a service, validating `target` and `length`
    pub fn new(current: f64, target: f64, length: usize) -> Result<Self, MultibarError> {
        debug!(%current, %target, %length, "ProgressbarCalculationService::new: called");
        if length == 0 {
            return Err(MultibarError::BadValueSpecified(
                "Length of progress bar must be more than 0.".to_string(),
            ));
        }
        if target == 0.0 || !target.is_finite() {
            return Err(MultibarError::BadValueSpecified(format!(
                "`End` value must be a non-zero finite number, got {target}."
            )));
        }
        if !current.is_finite() {
            return Err(MultibarError::BadValueSpecified(format!(
                "`Start` value must be a finite number, got {current}."
            )));
        }
        Ok(Self { current, target, length })
    }
}

impl CalculationService for ProgressbarCalculationService {
    fn current(&self) -> f64 {
        self.current
    }

    fn target(&self) -> f64 {
        self.target
    }

    fn length(&self) -> usize {
        self.length
    }
}

/// Factory for [`ProgressbarCalculationService`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressbarCalculation;

impl CalculationServiceFactory for ProgressbarCalculation {
    type Service = ProgressbarCalculationService;

    fn name(&self) -> &'static str {
        "ProgressbarCalculationService"
    }

    fn create(&self, current: f64, target: f64, length: usize) -> Result<Self::Service, MultibarError> {
        ProgressbarCalculationService::new(current, target, length)
    }
}
