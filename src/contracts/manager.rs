//! Contract manager

use std::sync::Arc;

use tracing::debug;

use super::{Contract, write_progress_contract};
use crate::error::MultibarError;
use crate::metadata::CallMetadata;
use crate::output::{ConsoleReporter, DiagnosticReporter};

/// Owns subscribed contracts and enforces or reports them
///
/// Contracts are held in subscription order and matched by `Arc` identity:
/// an equal but distinct instance is not considered subscribed.
///
/// Not internally synchronized. Mutating a manager from several threads
/// needs external locking.
#[derive(Debug, Clone)]
pub struct ContractManager {
    contracts: Vec<Arc<dyn Contract>>,
    raise_errors: bool,
    reporter: Arc<dyn DiagnosticReporter>,
}

impl ContractManager {
    /// Empty manager that raises on broken contracts and reports to the console
    pub fn new() -> Self {
        debug!("ContractManager::new: called");
        Self::with_reporter(Arc::new(ConsoleReporter::default()))
    }

    /// Empty manager that reports to `reporter` when not raising
    pub fn with_reporter(reporter: Arc<dyn DiagnosticReporter>) -> Self {
        Self {
            contracts: Vec::new(),
            raise_errors: true,
            reporter,
        }
    }

    /// Manager subscribed to the builtin write-progress contract
    pub fn with_default_contracts() -> Self {
        let mut manager = Self::new();
        manager.subscribe(write_progress_contract());
        manager
    }

    fn position_of(&self, contract: &Arc<dyn Contract>) -> Option<usize> {
        self.contracts.iter().position(|c| Arc::ptr_eq(c, contract))
    }

    /// Whether this exact contract instance is subscribed
    pub fn is_subscribed(&self, contract: &Arc<dyn Contract>) -> bool {
        self.position_of(contract).is_some()
    }

    /// Subscribe to a contract; returns false if it was already subscribed
    pub fn subscribe(&mut self, contract: Arc<dyn Contract>) -> bool {
        debug!(contract = %contract.name(), "ContractManager::subscribe: called");
        if self.is_subscribed(&contract) {
            debug!("ContractManager::subscribe: already subscribed");
            return false;
        }
        self.contracts.push(contract);
        true
    }

    /// Unsubscribe from a contract; returns false if it was not subscribed
    pub fn terminate(&mut self, contract: &Arc<dyn Contract>) -> bool {
        debug!(contract = %contract.name(), "ContractManager::terminate: called");
        match self.position_of(contract) {
            Some(index) => {
                self.contracts.remove(index);
                true
            }
            None => false,
        }
    }

    /// Unsubscribe from every contract
    pub fn terminate_all(&mut self) {
        debug!(count = %self.contracts.len(), "ContractManager::terminate_all: called");
        self.contracts.clear();
    }

    /// Check a single subscribed contract
    ///
    /// # Errors
    /// - [`MultibarError::UnsignedContract`] if `contract` was never subscribed
    /// - [`MultibarError::TerminatedContract`] if it is broken and `raise_errors` is set
    pub fn check_contract(
        &self,
        contract: &Arc<dyn Contract>,
        metadata: Option<&CallMetadata>,
    ) -> Result<(), MultibarError> {
        debug!(contract = %contract.name(), "ContractManager::check_contract: called");
        if !self.is_subscribed(contract) {
            return Err(MultibarError::UnsignedContract {
                contract: contract.name().to_string(),
            });
        }

        let check = contract.check(metadata);
        if check.kept {
            return Ok(());
        }

        debug!(
            contract = %contract.name(),
            raise_errors = %self.raise_errors,
            "ContractManager::check_contract: contract broken"
        );
        contract.render_terminated_contract(check, self.raise_errors, self.reporter.as_ref())
    }

    /// Check every subscribed contract in subscription order, stopping at the first error
    pub fn check_contracts(&self, metadata: Option<&CallMetadata>) -> Result<(), MultibarError> {
        debug!(count = %self.contracts.len(), "ContractManager::check_contracts: called");
        for contract in &self.contracts {
            self.check_contract(contract, metadata)?;
        }
        Ok(())
    }

    pub fn set_raise_errors(&mut self, raise_errors: bool) {
        debug!(%raise_errors, "ContractManager::set_raise_errors: called");
        self.raise_errors = raise_errors;
    }

    pub fn raise_errors(&self) -> bool {
        self.raise_errors
    }

    /// Replace the diagnostic sink
    pub fn set_reporter(&mut self, reporter: Arc<dyn DiagnosticReporter>) {
        self.reporter = reporter;
    }

    pub fn reporter(&self) -> &Arc<dyn DiagnosticReporter> {
        &self.reporter
    }

    /// Subscribed contracts in subscription order
    pub fn contracts(&self) -> &[Arc<dyn Contract>] {
        &self.contracts
    }
}

impl Default for ContractManager {
    fn default() -> Self {
        Self::new()
    }
}
