// web_app/export/status.rs - Export progress toast state machine
//
//   Hidden|Success|Error --begin--> Processing --succeed--> Success
//                                             --fail-----> Error
//   Success|Error --dismiss/timeout--> Hidden
//
// Every `begin` starts a new generation. Completions and hide timers carry
// the generation they belong to and are ignored once a newer export has
// started, so an earlier export can neither resolve nor hide a later one.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SUCCESS_HIDE_AFTER: Duration = Duration::from_secs(3);
pub const ERROR_HIDE_AFTER: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportStatus {
    #[default]
    Hidden,
    Processing,
    Success,
    Error(String),
}

impl ExportStatus {
    pub fn is_visible(&self) -> bool {
        !matches!(self, ExportStatus::Hidden)
    }

    /// Delay before the toast hides itself; processing stays up until it resolves
    pub fn auto_hide_after(&self) -> Option<Duration> {
        match self {
            ExportStatus::Success => Some(SUCCESS_HIDE_AFTER),
            ExportStatus::Error(_) => Some(ERROR_HIDE_AFTER),
            ExportStatus::Hidden | ExportStatus::Processing => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ExportStatus::Hidden => "hidden",
            ExportStatus::Processing => "processing",
            ExportStatus::Success => "success",
            ExportStatus::Error(_) => "error",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot {action} an export that is {from}")]
pub struct StatusTransitionError {
    pub from: &'static str,
    pub action: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportStatusTracker {
    status: ExportStatus,
    generation: u64,
}

impl ExportStatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &ExportStatus {
        &self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Show "processing"; returns the new generation
    ///
    /// Starting while another export is processing is allowed and simply
    /// takes over the toast.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.status = ExportStatus::Processing;
        self.generation
    }

    /// Resolve `generation` as a success
    ///
    /// `Ok(false)` when a newer export has taken over the toast.
    pub fn succeed(&mut self, generation: u64) -> Result<bool, StatusTransitionError> {
        self.resolve(generation, "succeed", ExportStatus::Success)
    }

    pub fn fail(&mut self, generation: u64, message: impl Into<String>) -> Result<bool, StatusTransitionError> {
        self.resolve(generation, "fail", ExportStatus::Error(message.into()))
    }

    fn resolve(&mut self, generation: u64, action: &'static str, next: ExportStatus) -> Result<bool, StatusTransitionError> {
        if generation != self.generation {
            return Ok(false);
        }
        if self.status != ExportStatus::Processing {
            return Err(StatusTransitionError {
                from: self.status.name(),
                action,
            });
        }
        self.status = next;
        Ok(true)
    }

    /// Close button
    pub fn dismiss(&mut self) {
        if self.status != ExportStatus::Processing {
            self.status = ExportStatus::Hidden;
        }
    }

    /// Timer callback; only hides if nothing newer has started since it was armed
    pub fn hide_if_current(&mut self, generation: u64) -> bool {
        let stale = generation != self.generation || self.status == ExportStatus::Processing;
        if stale || self.status == ExportStatus::Hidden {
            return false;
        }
        self.status = ExportStatus::Hidden;
        true
    }
}
