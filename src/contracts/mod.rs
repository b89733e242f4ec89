//! Contracts - named validators run before a progressbar is written
//!
//! A [`Contract`] inspects the call metadata and returns a [`ContractCheck`].
//! The [`ContractManager`] owns the subscribed contracts and decides what a
//! broken one means: either a [`MultibarError::TerminatedContract`] or a
//! diagnostic sent to its reporter, depending on `raise_errors`.

mod manager;
mod write_progress;

pub use manager::ContractManager;
pub use write_progress::{WriteProgressContract, write_progress_contract};

use std::fmt;

use tracing::warn;

use crate::error::MultibarError;
use crate::metadata::CallMetadata;
use crate::output::{self, DiagnosticReporter, HeadingLevel, Style};

/// Result of a contract check
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCheck {
    /// True if the contract holds
    pub kept: bool,

    /// Metadata the check ran against
    pub metadata: Option<CallMetadata>,

    pub warnings: Vec<String>,

    pub errors: Vec<String>,
}

impl ContractCheck {
    /// A kept contract
    pub fn done(metadata: Option<CallMetadata>) -> Self {
        Self {
            kept: true,
            metadata,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// A broken contract
    pub fn terminated(metadata: Option<CallMetadata>, warnings: Vec<String>, errors: Vec<String>) -> Self {
        Self {
            kept: false,
            metadata,
            warnings,
            errors,
        }
    }

    /// Errors followed by warnings, joined with `" & "`
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" & ")
    }
}

/// A named pre-write validator
///
/// `check` must be pure. Membership in a [`ContractManager`] is by identity
/// of the `Arc` the contract was subscribed with.
pub trait Contract: Send + Sync + fmt::Debug {
    /// Name used in diagnostics and errors
    fn name(&self) -> &str;

    /// Validate the call metadata
    fn check(&self, metadata: Option<&CallMetadata>) -> ContractCheck;

    /// Raise or report a broken check
    fn render_terminated_contract(
        &self,
        check: ContractCheck,
        raise_errors: bool,
        reporter: &dyn DiagnosticReporter,
    ) -> Result<(), MultibarError> {
        render_terminated(self.name(), check, raise_errors, reporter)
    }
}

/// Default rendering of a broken check
///
/// With `raise_errors` the check is returned inside a
/// [`MultibarError::TerminatedContract`]; otherwise its warnings and errors
/// are written to `reporter` and the call succeeds.
pub fn render_terminated(
    contract: &str,
    check: ContractCheck,
    raise_errors: bool,
    reporter: &dyn DiagnosticReporter,
) -> Result<(), MultibarError> {
    if raise_errors {
        return Err(MultibarError::TerminatedContract {
            contract: contract.to_string(),
            check: Box::new(check),
        });
    }

    warn!(%contract, message = %check.message(), "contract broken, reporting instead of raising");

    output::print_heading(reporter, &format!("{contract} was broken"), HeadingLevel::One);
    reporter.report(&format!("Warnings: {}", check.warnings.len()), Style::Bold);
    for warning in &check.warnings {
        output::print_warning(reporter, warning);
    }
    reporter.report(&format!("Errors: {}", check.errors.len()), Style::Bold);
    for error in &check.errors {
        output::print_error(reporter, error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::CapturingReporter;

    fn broken() -> ContractCheck {
        ContractCheck::terminated(None, vec!["w1".to_string()], vec!["e1".to_string(), "e2".to_string()])
    }

    #[test]
    fn test_done_is_kept() {
        let check = ContractCheck::done(None);
        assert!(check.kept);
        assert!(check.errors.is_empty());
        assert_eq!(check.message(), "");
    }

    #[test]
    fn test_message_orders_errors_first() {
        assert_eq!(broken().message(), "e1 & e2 & w1");
    }

    #[test]
    fn test_render_raises() {
        let reporter = CapturingReporter::new();
        let err = render_terminated("Demo", broken(), true, &reporter).unwrap_err();

        assert!(matches!(err, MultibarError::TerminatedContract { ref contract, .. } if contract == "Demo"));
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_render_reports() {
        let reporter = CapturingReporter::new();
        render_terminated("Demo", broken(), false, &reporter).unwrap();

        let lines = reporter.lines();
        assert!(lines.contains(&"Demo was broken".to_string()));
        assert!(lines.contains(&"Warnings: 1".to_string()));
        assert!(lines.contains(&"Errors: 2".to_string()));
        assert_eq!(reporter.lines_with_style(Style::Error), vec!["e1", "e2"]);
        assert_eq!(reporter.lines_with_style(Style::Warning), vec!["w1"]);
    }
}
