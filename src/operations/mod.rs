//! Operations exposed to the command layer
//!
//! Each operation does its work and returns plain data; rendering is left to
//! `commands`. Bulk operations process every item, collect per-item failures
//! and turn them into a single [`CmdpackError::BatchFailed`] at the end.
//!
//! - InstallOperation: one command, or every desired entry not yet installed
//! - UpdateOperation: update decisions and reinstalls
//! - RemoveOperation: delete a command and its lock entry
//! - SyncOperation: reconcile the lock with the desired state
//! - ListOperation / InfoOperation: installed commands and their health

pub mod info;
pub mod install;
pub mod list;
pub mod remove;
pub mod sync;
pub mod update;

use crate::error::{CmdpackError, Result};

/// One failed item of a bulk operation
#[derive(Debug)]
pub struct ItemFailure {
    /// Repository or command name the failure belongs to
    pub item: String,
    pub error: CmdpackError,
}

impl ItemFailure {
    pub fn new(item: impl Into<String>, error: CmdpackError) -> Self {
        Self {
            item: item.into(),
            error,
        }
    }
}

/// `Ok` when nothing failed, otherwise the aggregate "N of M failed" error
pub fn batch_result(operation: &str, failures: &[ItemFailure], total: usize) -> Result<()> {
    if failures.is_empty() {
        return Ok(());
    }
    Err(CmdpackError::BatchFailed {
        operation: operation.to_string(),
        failed: failures.len(),
        total,
    })
}
