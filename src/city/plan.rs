//! Construction plans - one settlement's build queue and its accumulated scores
//!
//! A plan keeps at most `construction_limit` facilities under construction.
//! Each step it tops up free slots from its selection policy, spends one
//! build step on every site, and banks the scores of whatever finished.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::city::facility::{Facility, FacilityStatus, FacilityType};
use crate::city::policy::{PolicyKind, SelectionPolicy};
use crate::city::settlement::Settlement;
use crate::core::error::{PlannerError, Result};
use crate::core::types::{PlanId, Scores};

/// Whether a plan has free construction capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanStatus {
    Available,
    Busy,
}

impl PlanStatus {
    pub fn name(&self) -> &'static str {
        match self {
            PlanStatus::Available => "AVAILABLE",
            PlanStatus::Busy => "BUSY",
        }
    }
}

/// What happened during one call to [`Plan::step`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Facilities started this step
    pub started: usize,
    /// Facilities that became operational this step
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    id: PlanId,
    /// Shared with the simulation's settlement table; never mutated
    settlement: Arc<Settlement>,
    policy: SelectionPolicy,
    status: PlanStatus,
    under_construction: Vec<Facility>,
    completed: Vec<Facility>,
    scores: Scores,
}

impl Plan {
    pub fn new(id: PlanId, settlement: Arc<Settlement>, policy: SelectionPolicy) -> Self {
        Self {
            id,
            settlement,
            policy,
            status: PlanStatus::Available,
            under_construction: Vec::new(),
            completed: Vec::new(),
            scores: Scores::default(),
        }
    }

    /// Advance the plan by one time unit.
    ///
    /// Order: refresh status, fill free slots from the policy, advance every
    /// site, promote finished sites (adding their scores once), refresh status
    /// again. A policy failure aborts the step; facilities already started in
    /// it stay started. If the finishing sites would push a total out of the
    /// `i32` range the step fails with `ScoreOverflow` before any site is
    /// advanced.
    pub fn step(&mut self, catalog: &[FacilityType]) -> Result<StepReport> {
        let mut report = StepReport::default();
        self.refresh_status();

        if self.status == PlanStatus::Available {
            let limit = self.settlement.construction_limit();
            while self.under_construction.len() < limit {
                let facility_type = self.policy.select(catalog)?;
                tracing::debug!(
                    plan = %self.id,
                    facility = facility_type.name(),
                    policy = self.policy.token(),
                    "Construction started"
                );
                self.under_construction
                    .push(Facility::new(facility_type.clone(), self.settlement.name()));
                report.started += 1;
            }
        }

        // Totals after this step's completions; checked before any site moves
        let banked = self
            .under_construction
            .iter()
            .filter(|facility| facility.completes_on_advance())
            .try_fold(self.scores, |total, facility| total.checked_add(facility.scores()))
            .ok_or_else(|| PlannerError::ScoreOverflow(format!("plan {}", self.id)))?;

        let sites = std::mem::take(&mut self.under_construction);
        for mut facility in sites {
            match facility.advance() {
                FacilityStatus::Operational => {
                    tracing::debug!(
                        plan = %self.id,
                        facility = facility.name(),
                        "Facility operational"
                    );
                    self.completed.push(facility);
                    report.completed += 1;
                }
                FacilityStatus::UnderConstruction => self.under_construction.push(facility),
            }
        }
        self.scores = banked;

        self.refresh_status();
        Ok(report)
    }

    fn refresh_status(&mut self) {
        self.status = if self.under_construction.len() >= self.settlement.construction_limit() {
            PlanStatus::Busy
        } else {
            PlanStatus::Available
        };
    }

    /// Switch to a fresh policy of another kind, returning the previous kind.
    ///
    /// Asking for the kind already in use is rejected. A Balanced policy
    /// starts from this plan's current score totals.
    pub fn change_policy(&mut self, kind: PolicyKind) -> Result<PolicyKind> {
        let previous = self.policy.kind();
        if previous == kind {
            return Err(PlannerError::InvalidPolicy(format!(
                "plan {} already uses {}",
                self.id,
                kind.token()
            )));
        }
        self.policy = SelectionPolicy::for_kind(kind, self.scores);
        tracing::info!(plan = %self.id, from = previous.token(), to = kind.token(), "Policy changed");
        Ok(previous)
    }

    /// Replace the policy without any checks, discarding the old one
    pub fn set_policy(&mut self, policy: SelectionPolicy) {
        self.policy = policy;
    }

    /// Point this plan at another settlement value (used after a restore,
    /// when the settlement table has been replaced)
    pub fn rebind(&mut self, settlement: Arc<Settlement>) {
        self.settlement = settlement;
    }

    pub fn id(&self) -> PlanId {
        self.id
    }

    pub fn settlement(&self) -> &Settlement {
        &self.settlement
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    pub fn status(&self) -> PlanStatus {
        self.status
    }

    pub fn under_construction(&self) -> &[Facility] {
        &self.under_construction
    }

    /// Operational facilities, in completion order
    pub fn completed(&self) -> &[Facility] {
        &self.completed
    }

    /// Every facility, under construction first
    pub fn facilities(&self) -> impl Iterator<Item = &Facility> {
        self.under_construction.iter().chain(self.completed.iter())
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

    /// Abbreviated view: settlement and score totals only
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            plan_id: self.id,
            settlement: self.settlement.name().to_string(),
            scores: self.scores,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PlanID: {}", self.id)?;
        writeln!(f, "SettlementName: {}", self.settlement.name())?;
        writeln!(f, "PlanStatus: {}", self.status.name())?;
        writeln!(f, "SelectionPolicy: {}", self.policy.token())?;
        writeln!(f, "LifeQualityScore: {}", self.scores.life_quality)?;
        writeln!(f, "EconomyScore: {}", self.scores.economy)?;
        write!(f, "EnvironmentScore: {}", self.scores.environment)?;
        for facility in self.facilities() {
            write!(f, "\n{}", facility)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub plan_id: PlanId,
    pub settlement: String,
    pub scores: Scores,
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PlanID: {}", self.plan_id)?;
        writeln!(f, "SettlementName: {}", self.settlement)?;
        writeln!(f, "LifeQualityScore: {}", self.scores.life_quality)?;
        writeln!(f, "EconomyScore: {}", self.scores.economy)?;
        write!(f, "EnvironmentScore: {}", self.scores.environment)
    }
}
