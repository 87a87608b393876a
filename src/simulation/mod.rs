//! Simulation layer - the orchestrator that owns every plan, and its snapshots

pub mod engine;
pub mod snapshot;

pub use engine::Simulation;
pub use snapshot::Snapshot;
