//! Builtin contract guarding writer input

use std::sync::{Arc, LazyLock};

use tracing::debug;

use super::{Contract, ContractCheck};
use crate::metadata::CallMetadata;

static WRITE_PROGRESS_CONTRACT: LazyLock<Arc<dyn Contract>> =
    LazyLock::new(|| -> Arc<dyn Contract> { Arc::new(WriteProgressContract) });

/// Shared instance of [`WriteProgressContract`]
///
/// Managers compare contracts by identity, so subscribe and terminate the
/// builtin contract through this handle.
pub fn write_progress_contract() -> Arc<dyn Contract> {
    Arc::clone(&WRITE_PROGRESS_CONTRACT)
}

/// Checks that metadata is present, `start <= end` and `length > 0`
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteProgressContract;

impl Contract for WriteProgressContract {
    fn name(&self) -> &str {
        "WriteProgressContract"
    }

    fn check(&self, metadata: Option<&CallMetadata>) -> ContractCheck {
        let Some(meta) = metadata else {
            debug!("WriteProgressContract::check: no metadata");
            return ContractCheck::terminated(None, Vec::new(), vec!["Needs metadata argument.".to_string()]);
        };
        debug!(
            start = %meta.start_value,
            end = %meta.end_value,
            length = %meta.length,
            "WriteProgressContract::check: called"
        );

        let error = if meta.start_value > meta.end_value {
            Some("`Start` value cannot be more than `End` value.")
        } else if meta.length == 0 {
            Some("Length of progress bar must be more than 0.")
        } else if meta.end_value == 0 {
            Some("`End` value must be more than 0.")
        } else {
            None
        };

        match error {
            Some(error) => ContractCheck::terminated(Some(meta.clone()), Vec::new(), vec![error.to_string()]),
            None => ContractCheck::done(Some(meta.clone())),
        }
    }
}
