//! Settlement Planner - capacity-limited construction plans for settlements

pub mod city;
pub mod command;
pub mod core;
pub mod simulation;
