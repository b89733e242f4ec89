//! Progressbar client - the composition root
//!
//! A [`ProgressbarClient`] ties a writer, its hooks and a contract manager
//! together behind [`ProgressbarClient::get_progress`]:
//!
//! 1. build the [`CallMetadata`];
//! 2. check contracts, handing a failure to the on-error hooks;
//! 3. run pre-execution hooks;
//! 4. write the bar;
//! 5. run post-execution hooks against it;
//! 6. return it.

use std::sync::Arc;

use eyre::Result;
use tracing::{debug, warn};

use crate::bar::SectorContainer;
use crate::config::Config;
use crate::contracts::ContractManager;
use crate::error::MultibarError;
use crate::hooks::{Hooks, writer_hooks};
use crate::metadata::{CallMetadata, ProgressReport};
use crate::output::ConsoleReporter;
use crate::writer::{ProgressWriter, ProgressbarWriter};

/// Composition root exposing [`get_progress`](Self::get_progress)
#[derive(Debug, Clone)]
pub struct ProgressbarClient<W: ProgressbarWriter = ProgressWriter> {
    writer: W,
    hooks: Hooks<W::Bar>,
    contract_manager: ContractManager,
}

impl ProgressbarClient {
    /// Client with the default writer, no hooks and the builtin contract subscribed
    pub fn new() -> Self {
        Self::with_writer(ProgressWriter::new())
    }

    /// Client configured from a [`Config`]
    ///
    /// Picks the configured signature, the contract raise policy and the
    /// console color setting, and attaches the boundary-glyph hook unless
    /// disabled.
    pub fn from_config(config: &Config) -> Result<Self> {
        debug!(
            preset = %config.render.preset,
            raise_errors = %config.contracts.raise_errors,
            "ProgressbarClient::from_config: called"
        );
        let signature = config.signature()?;

        let mut contract_manager = ContractManager::with_default_contracts();
        contract_manager.set_raise_errors(config.contracts.raise_errors);
        contract_manager.set_reporter(Arc::new(ConsoleReporter::new(config.output.color)));

        let hooks = if config.render.boundary_glyphs {
            writer_hooks()
        } else {
            Hooks::new()
        };

        Ok(Self::with_parts(ProgressWriter::from_signature(signature), hooks, contract_manager))
    }
}

impl Default for ProgressbarClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: ProgressbarWriter> ProgressbarClient<W> {
    /// Client around `writer` with no hooks and the builtin contract subscribed
    pub fn with_writer(writer: W) -> Self {
        Self::with_parts(writer, Hooks::new(), ContractManager::with_default_contracts())
    }

    /// Client assembled from explicit parts
    pub fn with_parts(writer: W, hooks: Hooks<W::Bar>, contract_manager: ContractManager) -> Self {
        Self {
            writer,
            hooks,
            contract_manager,
        }
    }

    /// Metadata describing a `get_progress` call with these arguments
    pub fn call_metadata(&self, start_value: u64, end_value: u64, length: usize) -> CallMetadata {
        CallMetadata {
            start_value,
            end_value,
            length,
            signature: self.writer.signature().clone(),
            calculation_service: self.writer.calculation_name().to_string(),
            percentage: self.writer.progress_percentage(start_value, end_value, length),
        }
    }

    /// Write a progressbar with contracts and hooks applied
    ///
    /// # Errors
    /// - [`MultibarError::TerminatedContract`] when a contract breaks, raising
    ///   is enabled and no on-error hook is registered
    /// - whatever a hook or the writer returns
    pub fn get_progress(&self, start_value: u64, end_value: u64, length: usize) -> Result<W::Bar, MultibarError> {
        debug!(%start_value, %end_value, %length, "ProgressbarClient::get_progress: called");
        let metadata = self.call_metadata(start_value, end_value, length);

        if let Err(error) = self.contract_manager.check_contracts(Some(&metadata)) {
            warn!(%error, "ProgressbarClient::get_progress: contract check failed");
            self.hooks.trigger_on_error(error, &metadata)?;
        }

        self.hooks.trigger_pre_execution(&metadata)?;
        let mut progressbar = self.writer.write(start_value, end_value, length)?;
        self.hooks.trigger_post_execution(&metadata, &mut progressbar)?;

        Ok(progressbar)
    }

    /// Same as [`get_progress`](Self::get_progress), wrapped for external consumers
    pub fn get_report(&self, start_value: u64, end_value: u64, length: usize) -> Result<ProgressReport, MultibarError> {
        let bar = self.get_progress(start_value, end_value, length)?;
        Ok(ProgressReport {
            bar: bar.render(),
            percentage: self.writer.progress_percentage(start_value, end_value, length),
            length: bar.len(),
            current: start_value,
            target: end_value,
        })
    }

    /// Replace all hooks
    pub fn set_hooks(&mut self, hooks: Hooks<W::Bar>) -> &mut Self {
        debug!(count = %hooks.len(), "ProgressbarClient::set_hooks: called");
        self.hooks = hooks;
        self
    }

    /// Append `hooks` after the existing ones
    pub fn update_hooks(&mut self, hooks: &Hooks<W::Bar>) -> &mut Self {
        self.hooks.update(hooks);
        self
    }

    pub fn hooks(&self) -> &Hooks<W::Bar> {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut Hooks<W::Bar> {
        &mut self.hooks
    }

    pub fn contract_manager(&self) -> &ContractManager {
        &self.contract_manager
    }

    pub fn contract_manager_mut(&mut self) -> &mut ContractManager {
        &mut self.contract_manager
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}
