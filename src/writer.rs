//! Progressbar writer
//!
//! The writer turns `(current, target, length)` and a [`Signature`] into a
//! populated progressbar. It is assembled from four replaceable parts: the
//! signature, a [`SectorFactory`], a [`ProgressbarFactory`] and a
//! [`CalculationServiceFactory`]. Swapping any of them leaves [`write`]
//! untouched.
//!
//! Only the signature's `middle` segment is used here. The `start` and `end`
//! glyphs are applied by the boundary-glyph post hook.
//!
//! [`write`]: ProgressbarWriter::write

use std::sync::Arc;

use tracing::debug;

use crate::bar::{BarSectorFactory, ProgressbarFactory, SectorContainer, SectorFactory, VecProgressbarFactory};
use crate::calculation::{CalculationService, CalculationServiceFactory, ProgressbarCalculation, progress_percentage};
use crate::error::MultibarError;
use crate::signature::Signature;

/// Default number of sectors in a progressbar
pub const DEFAULT_LENGTH: usize = 20;

/// Anything that can write a progressbar
pub trait ProgressbarWriter {
    /// Container type produced by [`write`](Self::write)
    type Bar: SectorContainer;

    /// Write a bar of `length` sectors for `current` out of `target`
    fn write(&self, current: u64, target: u64, length: usize) -> Result<Self::Bar, MultibarError>;

    /// Signature the bar is rendered with
    fn signature(&self) -> &Signature;

    /// Name of the calculation strategy, as recorded in call metadata
    fn calculation_name(&self) -> &'static str;

    /// Percentage the calculation strategy reports for these values
    ///
    /// Must agree with the percentage [`write`](Self::write) fills sectors from.
    fn progress_percentage(&self, current: u64, target: u64, length: usize) -> f64;
}

/// Default writer
#[derive(Debug, Clone)]
pub struct ProgressWriter<SF = BarSectorFactory, PF = VecProgressbarFactory, CF = ProgressbarCalculation> {
    signature: Signature,
    sector_factory: SF,
    progressbar_factory: PF,
    calculation_factory: CF,
}

impl ProgressWriter {
    /// Writer with the simple signature and the default factories
    pub fn new() -> Self {
        Self::from_signature(Signature::default())
    }

    /// Writer with `signature` and the default factories
    pub fn from_signature(signature: Signature) -> Self {
        debug!(?signature, "ProgressWriter::from_signature: called");
        Self::with_parts(signature, BarSectorFactory, VecProgressbarFactory, ProgressbarCalculation)
    }
}

impl Default for ProgressWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<SF, PF, CF> ProgressWriter<SF, PF, CF> {
    /// Writer assembled from explicit parts
    pub fn with_parts(signature: Signature, sector_factory: SF, progressbar_factory: PF, calculation_factory: CF) -> Self {
        Self {
            signature,
            sector_factory,
            progressbar_factory,
            calculation_factory,
        }
    }

    /// Replace the signature used for subsequent writes
    pub fn bind_signature(&mut self, signature: Signature) -> &mut Self {
        debug!(?signature, "ProgressWriter::bind_signature: called");
        self.signature = signature;
        self
    }

    pub fn with_sector_factory<T>(self, sector_factory: T) -> ProgressWriter<T, PF, CF> {
        ProgressWriter::with_parts(self.signature, sector_factory, self.progressbar_factory, self.calculation_factory)
    }

    pub fn with_progressbar_factory<T>(self, progressbar_factory: T) -> ProgressWriter<SF, T, CF> {
        ProgressWriter::with_parts(self.signature, self.sector_factory, progressbar_factory, self.calculation_factory)
    }

    pub fn with_calculation_factory<T>(self, calculation_factory: T) -> ProgressWriter<SF, PF, T> {
        ProgressWriter::with_parts(self.signature, self.sector_factory, self.progressbar_factory, calculation_factory)
    }

    pub fn sector_factory(&self) -> &SF {
        &self.sector_factory
    }

    pub fn progressbar_factory(&self) -> &PF {
        &self.progressbar_factory
    }

    pub fn calculation_factory(&self) -> &CF {
        &self.calculation_factory
    }
}

impl<SF, PF, CF> ProgressbarWriter for ProgressWriter<SF, PF, CF>
where
    SF: SectorFactory,
    PF: ProgressbarFactory<SF::Sector>,
    CF: CalculationServiceFactory,
{
    type Bar = PF::Progressbar;

    fn write(&self, current: u64, target: u64, length: usize) -> Result<Self::Bar, MultibarError> {
        debug!(%current, %target, %length, "ProgressWriter::write: called");
        let service = self.calculation_factory.create(current as f64, target as f64, length)?;

        let middle = &self.signature.middle;
        let mut bar = self.progressbar_factory.create_progressbar(length);
        for position in service.filled_indexes() {
            bar.add_sector(self.sector_factory.create_sector(&middle.on_filled, true, position));
        }
        for position in service.unfilled_indexes() {
            bar.add_sector(self.sector_factory.create_sector(&middle.on_unfilled, false, position));
        }

        debug!(
            filled = %service.filled_count(),
            unfilled = %service.unfilled_count(),
            "ProgressWriter::write: assembled"
        );
        Ok(bar)
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn calculation_name(&self) -> &'static str {
        self.calculation_factory.name()
    }

    fn progress_percentage(&self, current: u64, target: u64, length: usize) -> f64 {
        match self.calculation_factory.create(current as f64, target as f64, length) {
            Ok(service) => service.percentage(),
            // Rejected input makes `write` fail; record the raw ratio
            Err(_) => progress_percentage(current as f64, target as f64),
        }
    }
}

/// Run one complete [`ProgressbarWriter::write`] on tokio's blocking pool
///
/// For callers living on an async runtime. The whole write happens on a
/// single worker; a panicking or cancelled worker surfaces as
/// [`MultibarError::Offload`].
pub async fn write_offloaded<W>(writer: Arc<W>, current: u64, target: u64, length: usize) -> Result<W::Bar, MultibarError>
where
    W: ProgressbarWriter + Send + Sync + 'static,
    W::Bar: Send + 'static,
{
    debug!(%current, %target, %length, "write_offloaded: called");
    tokio::task::spawn_blocking(move || writer.write(current, target, length))
        .await
        .map_err(|e| MultibarError::Offload(e.to_string()))?
}
