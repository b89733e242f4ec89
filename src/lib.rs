//! Multibar - Extensible Text Progress Bars
//!
//! Multibar renders progress as a row of glyphs. A writer splits a bar of
//! `length` sectors into filled and unfilled ones, contracts validate the
//! input beforehand and hooks decorate the result afterwards.
//!
//! # Core Concepts
//!
//! - **Sector**: one rendered glyph with a fill state and a fixed position
//! - **Signature**: start, middle and end glyph pairs (filled / unfilled)
//! - **Writer**: turns `(current, target, length)` into sectors
//! - **Contract**: named pre-write validator that raises or reports
//! - **Hook**: callback run before a write, after it, or on error
//!
//! # Modules
//!
//! - [`client`] - Composition root exposing `get_progress`
//! - [`writer`] - Sector assembly and async offload
//! - [`calculation`] - Percentage and index partitioning
//! - [`bar`] - Sector and progressbar container types
//! - [`signature`] - Signatures, glyph sets and named presets
//! - [`contracts`] - Pre-write validation
//! - [`hooks`] - Callbacks and the boundary-glyph hook
//! - [`builder`] - One-shot rendering from plain parameters
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod bar;
pub mod builder;
pub mod calculation;
pub mod cli;
pub mod client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod hooks;
pub mod metadata;
pub mod output;
pub mod signature;
pub mod writer;

// Re-export commonly used types
pub use bar::{BarSector, Progressbar, ProgressbarFactory, Sector, SectorContainer, SectorFactory};
pub use builder::{ProgressParams, build_progress};
pub use calculation::{CalculationService, CalculationServiceFactory, ProgressbarCalculationService};
pub use client::ProgressbarClient;
pub use config::Config;
pub use contracts::{Contract, ContractCheck, ContractManager, WriteProgressContract, write_progress_contract};
pub use error::MultibarError;
pub use hooks::{HookContext, Hooks, writer_hooks};
pub use metadata::{CallMetadata, ProgressReport};
pub use output::{CapturingReporter, ConsoleReporter, DiagnosticReporter};
pub use signature::{Chars, Signature, SignatureRegistry, SignatureSegment};
pub use writer::{DEFAULT_LENGTH, ProgressWriter, ProgressbarWriter, write_offloaded};
