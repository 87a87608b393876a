//! Facility types and build instances

use serde::{Deserialize, Serialize};

use crate::core::types::Scores;

/// What a facility contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityCategory {
    LifeQuality,
    Economy,
    Environment,
}

impl FacilityCategory {
    /// Numeric code used by the command and line-config formats
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(FacilityCategory::LifeQuality),
            1 => Some(FacilityCategory::Economy),
            2 => Some(FacilityCategory::Environment),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            FacilityCategory::LifeQuality => 0,
            FacilityCategory::Economy => 1,
            FacilityCategory::Environment => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FacilityCategory::LifeQuality => "LIFE_QUALITY",
            FacilityCategory::Economy => "ECONOMY",
            FacilityCategory::Environment => "ENVIRONMENT",
        }
    }
}

/// Catalog entry describing a kind of facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityType {
    name: String,
    category: FacilityCategory,
    /// Steps needed to build one instance
    cost: u32,
    scores: Scores,
}

impl FacilityType {
    pub fn new(name: impl Into<String>, category: FacilityCategory, cost: u32, scores: Scores) -> Self {
        Self {
            name: name.into(),
            category,
            cost,
            scores,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> FacilityCategory {
        self.category
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn life_quality_score(&self) -> i32 {
        self.scores.life_quality
    }

    pub fn economy_score(&self) -> i32 {
        self.scores.economy
    }

    pub fn environment_score(&self) -> i32 {
        self.scores.environment
    }
}

/// Current state of a facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacilityStatus {
    /// Construction site - still consuming build steps
    UnderConstruction,
    /// Built; contributes its scores
    Operational,
}

impl FacilityStatus {
    pub fn name(&self) -> &'static str {
        match self {
            FacilityStatus::UnderConstruction => "UNDER_CONSTRUCTION",
            FacilityStatus::Operational => "OPERATIONAL",
        }
    }
}

/// A facility type being built (or already built) in a settlement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    facility_type: FacilityType,
    settlement_name: String,
    status: FacilityStatus,
    time_left: u32,
}

impl Facility {
    /// Start a construction site; the build takes `cost` steps
    pub fn new(facility_type: FacilityType, settlement_name: impl Into<String>) -> Self {
        let time_left = facility_type.cost();
        Self {
            facility_type,
            settlement_name: settlement_name.into(),
            status: FacilityStatus::UnderConstruction,
            time_left,
        }
    }

    /// Spend one step of construction.
    ///
    /// A zero-cost facility completes on its first call. Once operational the
    /// facility stays operational and further calls change nothing.
    pub fn advance(&mut self) -> FacilityStatus {
        if self.status == FacilityStatus::Operational {
            return self.status;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.status = FacilityStatus::Operational;
        }
        self.status
    }

    /// Whether the next [`advance`](Self::advance) makes this facility
    /// operational
    pub fn completes_on_advance(&self) -> bool {
        self.status == FacilityStatus::UnderConstruction && self.time_left <= 1
    }

    pub fn facility_type(&self) -> &FacilityType {
        &self.facility_type
    }

    pub fn name(&self) -> &str {
        self.facility_type.name()
    }

    pub fn category(&self) -> FacilityCategory {
        self.facility_type.category()
    }

    pub fn scores(&self) -> Scores {
        self.facility_type.scores()
    }

    pub fn settlement_name(&self) -> &str {
        &self.settlement_name
    }

    pub fn status(&self) -> FacilityStatus {
        self.status
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_operational(&self) -> bool {
        self.status == FacilityStatus::Operational
    }
}

impl std::fmt::Display for Facility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "FacilityName: {}", self.name())?;
        write!(f, "FacilityStatus: {}", self.status.name())
    }
}
