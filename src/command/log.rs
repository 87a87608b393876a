//! Action log - every command the session ran and how it ended

use std::fmt;

use crate::command::parser::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Completed,
    Error,
}

impl ActionStatus {
    pub fn name(&self) -> &'static str {
        match self {
            ActionStatus::Completed => "COMPLETED",
            ActionStatus::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub command: Command,
    pub status: ActionStatus,
    /// Failure message when `status` is `Error`
    pub error: Option<String>,
}

impl ActionRecord {
    pub fn completed(command: Command) -> Self {
        Self {
            command,
            status: ActionStatus::Completed,
            error: None,
        }
    }

    pub fn failed(command: Command, error: impl Into<String>) -> Self {
        Self {
            command,
            status: ActionStatus::Error,
            error: Some(error.into()),
        }
    }
}

impl fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.command, self.status.name())
    }
}
