//! Text commands accepted by the session
//!
//! One command per line, whitespace-separated arguments:
//!
//! ```text
//! step <n>
//! plan <settlement> <policy>
//! settlement <name> <0|1|2>
//! facility <name> <0|1|2> <price> <life_quality> <economy> <environment>
//! planStatus <plan_id>
//! changePolicy <plan_id> <nve|bal|eco|env>
//! log | close | backup | restore
//! ```

use std::fmt;
use std::str::FromStr;

use crate::city::facility::{FacilityCategory, FacilityType};
use crate::city::policy::PolicyKind;
use crate::city::settlement::SettlementType;
use crate::core::error::{PlannerError, Result};
use crate::core::types::{PlanId, Scores};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the simulation forward `steps` times (at least 1)
    Step { steps: u32 },
    /// Create a plan; the policy token is mapped leniently
    AddPlan { settlement: String, policy: String },
    AddSettlement { name: String, kind: SettlementType },
    AddFacility { facility: FacilityType },
    PlanStatus { plan_id: PlanId },
    ChangePolicy { plan_id: PlanId, policy: PolicyKind },
    Log,
    Close,
    Backup,
    Restore,
}

impl FromStr for Command {
    type Err = PlannerError;

    fn from_str(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, args)) = fields.split_first() else {
            return Err(invalid("empty command"));
        };

        let command = match (keyword, args) {
            ("step", [steps]) => {
                let steps: u32 = number(steps, "step count")?;
                if steps == 0 {
                    return Err(invalid("steps must be a positive integer"));
                }
                Command::Step { steps }
            }
            ("plan", [settlement, policy]) => Command::AddPlan {
                settlement: settlement.to_string(),
                policy: policy.to_string(),
            },
            ("settlement", [name, kind]) => {
                let code: u8 = number(kind, "settlement type")?;
                if code > 2 {
                    return Err(invalid(&format!("settlement type must be 0, 1 or 2, got {}", code)));
                }
                Command::AddSettlement {
                    name: name.to_string(),
                    kind: SettlementType::from_code(code),
                }
            }
            ("facility", [name, category, price, lq, eco, env]) => {
                let code: u8 = number(category, "facility category")?;
                let category = FacilityCategory::from_code(code).ok_or_else(|| {
                    invalid(&format!("facility category must be 0, 1 or 2, got {}", code))
                })?;
                let scores = Scores::new(
                    score(lq, "life quality score")?,
                    score(eco, "economy score")?,
                    score(env, "environment score")?,
                );
                Command::AddFacility {
                    facility: FacilityType::new(*name, category, number(price, "price")?, scores),
                }
            }
            ("planStatus", [id]) => Command::PlanStatus {
                plan_id: PlanId(number(id, "plan id")?),
            },
            ("changePolicy", [id, policy]) => Command::ChangePolicy {
                plan_id: PlanId(number(id, "plan id")?),
                policy: policy.parse()?,
            },
            ("log", []) => Command::Log,
            ("close", []) => Command::Close,
            ("backup", []) => Command::Backup,
            ("restore", []) => Command::Restore,
            (
                "step" | "plan" | "settlement" | "facility" | "planStatus" | "changePolicy" | "log"
                | "close" | "backup" | "restore",
                _,
            ) => {
                return Err(invalid(&format!("wrong number of arguments for '{}'", keyword)));
            }
            _ => return Err(invalid(&format!("unknown command '{}'", keyword))),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    /// Echoes the command in its input form
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Step { steps } => write!(f, "step {}", steps),
            Command::AddPlan { settlement, policy } => write!(f, "plan {} {}", settlement, policy),
            Command::AddSettlement { name, kind } => write!(f, "settlement {} {}", name, kind.code()),
            Command::AddFacility { facility } => {
                let scores = facility.scores();
                write!(
                    f,
                    "facility {} {} {} {} {} {}",
                    facility.name(),
                    facility.category().code(),
                    facility.cost(),
                    scores.life_quality,
                    scores.economy,
                    scores.environment
                )
            }
            Command::PlanStatus { plan_id } => write!(f, "planStatus {}", plan_id),
            Command::ChangePolicy { plan_id, policy } => write!(f, "changePolicy {} {}", plan_id, policy),
            Command::Log => f.write_str("log"),
            Command::Close => f.write_str("close"),
            Command::Backup => f.write_str("backup"),
            Command::Restore => f.write_str("restore"),
        }
    }
}

fn invalid(reason: &str) -> PlannerError {
    PlannerError::InvalidCommand(reason.to_string())
}

fn number<T: FromStr>(field: &str, what: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| invalid(&format!("invalid {}: '{}'", what, field)))
}

fn score(field: &str, what: &str) -> Result<i32> {
    let value: i32 = number(field, what)?;
    if value < 0 {
        return Err(invalid(&format!("{} must not be negative", what)));
    }
    Ok(value)
}
