//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for plans, assigned in creation order starting at 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanId(pub u32);

impl PlanId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simulation step counter
pub type Tick = u64;

/// The three score axes every facility contributes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scores {
    pub life_quality: i32,
    pub economy: i32,
    pub environment: i32,
}

impl Scores {
    pub fn new(life_quality: i32, economy: i32, environment: i32) -> Self {
        Self {
            life_quality,
            economy,
            environment,
        }
    }

    /// Axis-wise sum, or `None` if any axis leaves the `i32` range
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self {
            life_quality: self.life_quality.checked_add(rhs.life_quality)?,
            economy: self.economy.checked_add(rhs.economy)?,
            environment: self.environment.checked_add(rhs.environment)?,
        })
    }

    /// Largest pairwise absolute difference between the axes of
    /// `self + extra`, computed in `i64` so it never overflows
    pub fn imbalance_with(&self, extra: Scores) -> i64 {
        let lq = i64::from(self.life_quality) + i64::from(extra.life_quality);
        let eco = i64::from(self.economy) + i64::from(extra.economy);
        let env = i64::from(self.environment) + i64::from(extra.environment);
        (lq - env).abs().max((lq - eco).abs()).max((env - eco).abs())
    }
}
