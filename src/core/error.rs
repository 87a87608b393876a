use thiserror::Error;

use crate::core::types::PlanId;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Settlement not found: {0}")]
    SettlementNotFound(String),

    #[error("Plan not found: {0}")]
    PlanNotFound(PlanId),

    #[error("Invalid selection policy: {0}")]
    InvalidPolicy(String),

    #[error("No facility available for {policy} selection")]
    ExhaustedCatalog { policy: &'static str },

    #[error("Score total out of range: {0}")]
    ScoreOverflow(String),

    #[error("{kind} already exists: {name}")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("No backup available")]
    NoBackup,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
