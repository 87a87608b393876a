//! Settlements - the places plans build in

use serde::{Deserialize, Serialize};

/// Size class of a settlement; decides how many builds may run at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementType {
    Village,
    City,
    Metropolis,
}

impl SettlementType {
    /// Numeric code used by the command and line-config formats.
    /// Anything above 1 is a metropolis.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => SettlementType::Village,
            1 => SettlementType::City,
            _ => SettlementType::Metropolis,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            SettlementType::Village => 0,
            SettlementType::City => 1,
            SettlementType::Metropolis => 2,
        }
    }

    /// Facilities that may be under construction at the same time
    pub fn construction_limit(&self) -> usize {
        match self {
            SettlementType::Village => 1,
            SettlementType::City => 2,
            SettlementType::Metropolis => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    name: String,
    settlement_type: SettlementType,
    construction_limit: usize,
}

impl Settlement {
    pub fn new(name: impl Into<String>, settlement_type: SettlementType) -> Self {
        Self {
            name: name.into(),
            settlement_type,
            construction_limit: settlement_type.construction_limit(),
        }
    }

    /// Override the limit implied by the settlement type (0 is allowed and
    /// keeps every plan on this settlement permanently busy)
    pub fn with_construction_limit(mut self, limit: usize) -> Self {
        self.construction_limit = limit;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settlement_type(&self) -> SettlementType {
        self.settlement_type
    }

    pub fn construction_limit(&self) -> usize {
        self.construction_limit
    }
}
