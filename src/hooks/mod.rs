//! Hooks - callbacks around a progressbar write
//!
//! Three ordered callback lists: pre-execution, post-execution and on-error.
//! Callbacks run in insertion order and their errors propagate unchanged.
//! On-error dispatch with no registered callbacks hands the error back to
//! the caller, so a failure is never silently dropped.
//!
//! Hooks are shared mutable state of a client. They are not internally
//! synchronized; concurrent mutation needs external locking.

mod boundary;

pub use boundary::{
    FIRST_FILL_THRESHOLD, LAST_FILL_THRESHOLD, apply_boundary_glyphs, boundary_glyph_hook, writer_hooks,
};

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::MultibarError;
use crate::metadata::CallMetadata;

/// What a hook callback gets to see
pub struct HookContext<'a, B> {
    /// Metadata of the current call
    pub metadata: &'a CallMetadata,

    /// The written progressbar (post-execution only)
    pub progressbar: Option<&'a mut B>,

    /// The failure being handled (on-error only)
    pub error: Option<&'a MultibarError>,
}

/// A hook callback
pub type HookFn<B> = Arc<dyn Fn(&mut HookContext<'_, B>) -> Result<(), MultibarError> + Send + Sync>;

/// Ordered pre-execution, post-execution and on-error callbacks
pub struct Hooks<B> {
    pre_execution: Vec<HookFn<B>>,
    post_execution: Vec<HookFn<B>>,
    on_error: Vec<HookFn<B>>,
}

impl<B> Hooks<B> {
    /// Create an empty hook set
    pub fn new() -> Self {
        Self {
            pre_execution: Vec::new(),
            post_execution: Vec::new(),
            on_error: Vec::new(),
        }
    }

    pub fn add_pre_execution<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut HookContext<'_, B>) -> Result<(), MultibarError> + Send + Sync + 'static,
    {
        debug!("Hooks::add_pre_execution: called");
        self.pre_execution.push(Arc::new(callback));
        self
    }

    pub fn add_post_execution<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut HookContext<'_, B>) -> Result<(), MultibarError> + Send + Sync + 'static,
    {
        debug!("Hooks::add_post_execution: called");
        self.post_execution.push(Arc::new(callback));
        self
    }

    pub fn add_on_error<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut HookContext<'_, B>) -> Result<(), MultibarError> + Send + Sync + 'static,
    {
        debug!("Hooks::add_on_error: called");
        self.on_error.push(Arc::new(callback));
        self
    }

    /// Append another hook set's callbacks after this one's
    pub fn update(&mut self, other: &Hooks<B>) -> &mut Self {
        debug!(
            pre = %other.pre_execution.len(),
            post = %other.post_execution.len(),
            on_error = %other.on_error.len(),
            "Hooks::update: called"
        );
        self.pre_execution.extend(other.pre_execution.iter().cloned());
        self.post_execution.extend(other.post_execution.iter().cloned());
        self.on_error.extend(other.on_error.iter().cloned());
        self
    }

    /// Run every pre-execution callback
    pub fn trigger_pre_execution(&self, metadata: &CallMetadata) -> Result<(), MultibarError> {
        debug!(count = %self.pre_execution.len(), "Hooks::trigger_pre_execution: called");
        for hook in &self.pre_execution {
            let mut ctx = HookContext {
                metadata,
                progressbar: None,
                error: None,
            };
            hook(&mut ctx)?;
        }
        Ok(())
    }

    /// Run every post-execution callback against the written progressbar
    pub fn trigger_post_execution(&self, metadata: &CallMetadata, progressbar: &mut B) -> Result<(), MultibarError> {
        debug!(count = %self.post_execution.len(), "Hooks::trigger_post_execution: called");
        for hook in &self.post_execution {
            let mut ctx = HookContext {
                metadata,
                progressbar: Some(&mut *progressbar),
                error: None,
            };
            hook(&mut ctx)?;
        }
        Ok(())
    }

    /// Run every on-error callback, or return `error` if there are none
    pub fn trigger_on_error(&self, error: MultibarError, metadata: &CallMetadata) -> Result<(), MultibarError> {
        debug!(count = %self.on_error.len(), %error, "Hooks::trigger_on_error: called");
        if self.on_error.is_empty() {
            debug!("Hooks::trigger_on_error: no on-error hooks, returning error");
            return Err(error);
        }
        for hook in &self.on_error {
            let mut ctx = HookContext {
                metadata,
                progressbar: None,
                error: Some(&error),
            };
            hook(&mut ctx)?;
        }
        Ok(())
    }

    pub fn pre_execution_hooks(&self) -> &[HookFn<B>] {
        &self.pre_execution
    }

    pub fn post_execution_hooks(&self) -> &[HookFn<B>] {
        &self.post_execution
    }

    pub fn on_error_hooks(&self) -> &[HookFn<B>] {
        &self.on_error
    }

    /// Total number of callbacks across all three lists
    pub fn len(&self) -> usize {
        self.pre_execution.len() + self.post_execution.len() + self.on_error.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<B> Default for Hooks<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Clone for Hooks<B> {
    fn clone(&self) -> Self {
        Self {
            pre_execution: self.pre_execution.clone(),
            post_execution: self.post_execution.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<B> fmt::Debug for Hooks<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("pre_execution", &self.pre_execution.len())
            .field("post_execution", &self.post_execution.len())
            .field("on_error", &self.on_error.len())
            .finish()
    }
}
