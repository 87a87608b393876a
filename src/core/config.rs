//! Simulation configuration - initial settlements, facility catalog and plans
//!
//! Two on-disk formats are accepted:
//! - TOML (`.toml` files), with `[[settlements]]`, `[[facilities]]` and
//!   `[[plans]]` tables
//! - the line format: one `settlement`, `facility` or `plan` record per line,
//!   `#` starts a comment line
//!
//! ```text
//! settlement Haifa 1
//! facility school 0 3 4 1 1
//! plan Haifa bal
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::city::facility::{FacilityCategory, FacilityType};
use crate::city::settlement::SettlementType;
use crate::core::error::{PlannerError, Result};
use crate::core::types::Scores;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub settlements: Vec<SettlementEntry>,
    #[serde(default)]
    pub facilities: Vec<FacilityEntry>,
    #[serde(default)]
    pub plans: Vec<PlanEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SettlementEntry {
    pub name: String,
    pub kind: SettlementType,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FacilityEntry {
    pub name: String,
    pub category: FacilityCategory,
    pub cost: u32,
    #[serde(default)]
    pub life_quality: i32,
    #[serde(default)]
    pub economy: i32,
    #[serde(default)]
    pub environment: i32,
}

impl FacilityEntry {
    pub fn to_facility_type(&self) -> FacilityType {
        FacilityType::new(
            self.name.clone(),
            self.category,
            self.cost,
            Scores::new(self.life_quality, self.economy, self.environment),
        )
    }
}

/// A plan to create at startup; the policy token is mapped leniently
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlanEntry {
    pub settlement: String,
    pub policy: String,
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let config = if is_toml {
            Self::parse_toml(&content)?
        } else {
            Self::parse_lines(&content)?
        };
        tracing::info!(
            path = %path.display(),
            settlements = config.settlements.len(),
            facilities = config.facilities.len(),
            plans = config.plans.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PlannerError::Config(e.to_string()))
    }

    pub fn parse_lines(content: &str) -> Result<Self> {
        let mut config = Self::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            config.parse_record(index + 1, &fields)?;
        }
        Ok(config)
    }

    fn parse_record(&mut self, line: usize, fields: &[&str]) -> Result<()> {
        match fields {
            ["settlement", name, kind] => {
                let code = parse_number::<u8>(line, kind, "settlement type")?;
                self.settlements.push(SettlementEntry {
                    name: name.to_string(),
                    kind: SettlementType::from_code(code),
                });
            }
            ["facility", name, category, cost, lq, eco, env] => {
                let code = parse_number::<u8>(line, category, "category")?;
                // Category codes above 2 mean ENVIRONMENT in this format
                let category =
                    FacilityCategory::from_code(code).unwrap_or(FacilityCategory::Environment);
                self.facilities.push(FacilityEntry {
                    name: name.to_string(),
                    category,
                    cost: parse_number(line, cost, "cost")?,
                    life_quality: parse_number(line, lq, "life quality score")?,
                    economy: parse_number(line, eco, "economy score")?,
                    environment: parse_number(line, env, "environment score")?,
                });
            }
            ["plan", settlement, policy] => {
                self.plans.push(PlanEntry {
                    settlement: settlement.to_string(),
                    policy: policy.to_string(),
                });
            }
            [keyword, ..] => {
                return Err(line_error(
                    line,
                    format!("malformed or unrecognised record '{}'", keyword),
                ))
            }
            [] => {}
        }
        Ok(())
    }
}

fn line_error(line: usize, reason: impl std::fmt::Display) -> PlannerError {
    PlannerError::Config(format!("line {}: {}", line, reason))
}

fn parse_number<T: std::str::FromStr>(line: usize, field: &str, what: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| line_error(line, format!("invalid {}: '{}'", what, field)))
}
