//! Command pipeline
//!
//! Text line -> Command (parser) -> Session -> Simulation, with every run
//! command recorded in the action log.

pub mod log;
pub mod parser;
pub mod session;

pub use log::{ActionRecord, ActionStatus};
pub use parser::Command;
pub use session::Session;
