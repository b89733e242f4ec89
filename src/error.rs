//! Multibar error types

use thiserror::Error;

use crate::contracts::ContractCheck;

/// Errors that can occur while rendering a progress bar
#[derive(Debug, Error)]
pub enum MultibarError {
    #[error("Missing required arguments: {}", .missing.join(", "))]
    MissingRequiredArguments { missing: Vec<&'static str> },

    #[error("Bad value specified: {0}")]
    BadValueSpecified(String),

    #[error("Contract {contract} was terminated: {}", .check.message())]
    TerminatedContract { contract: String, check: Box<ContractCheck> },

    #[error("Contract {contract} is unsigned")]
    UnsignedContract { contract: String },

    #[error("Sector index {index} out of range for progressbar of length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("Unknown signature preset: {name}")]
    UnknownPreset { name: String },

    #[error("Hook {hook} failed: {message}")]
    Hook { hook: String, message: String },

    #[error("Invalid glyphs: {0}")]
    InvalidGlyphs(String),

    #[error("Offloaded write failed: {0}")]
    Offload(String),
}

impl MultibarError {
    /// Check if this error came from the contract layer
    pub fn is_contract_error(&self) -> bool {
        matches!(
            self,
            MultibarError::TerminatedContract { .. } | MultibarError::UnsignedContract { .. }
        )
    }

    /// Check if this error was caused by bad caller input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MultibarError::MissingRequiredArguments { .. }
                | MultibarError::BadValueSpecified(_)
                | MultibarError::InvalidGlyphs(_)
        )
    }

    /// Get the contract check carried by a terminated contract
    pub fn contract_check(&self) -> Option<&ContractCheck> {
        match self {
            MultibarError::TerminatedContract { check, .. } => Some(check),
            _ => None,
        }
    }

    /// Build a hook failure from any displayable error
    pub fn hook(hook: impl Into<String>, message: impl std::fmt::Display) -> Self {
        MultibarError::Hook {
            hook: hook.into(),
            message: message.to_string(),
        }
    }
}
