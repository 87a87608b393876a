pub mod config;
pub mod error;
pub mod types;

pub use config::SimulationConfig;
pub use error::{PlannerError, Result};
pub use types::{PlanId, Scores, Tick};
