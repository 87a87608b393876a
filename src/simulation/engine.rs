//! Simulation - the orchestrator owning settlements, the facility catalog and
//! every construction plan
//!
//! Settlements are shared with the plans built on them through `Arc`; the
//! simulation never removes a settlement or catalog entry, so those shared
//! references stay valid for the whole run.

use std::sync::Arc;

use ahash::AHashMap;

use crate::city::catalog::FacilityCatalog;
use crate::city::facility::FacilityType;
use crate::city::plan::{Plan, PlanSummary};
use crate::city::policy::{PolicyKind, SelectionPolicy};
use crate::city::settlement::Settlement;
use crate::command::log::ActionRecord;
use crate::core::config::SimulationConfig;
use crate::core::error::{PlannerError, Result};
use crate::core::types::{PlanId, Scores, Tick};
use crate::simulation::snapshot::Snapshot;

#[derive(Debug, Clone)]
pub struct Simulation {
    settlements: Vec<Arc<Settlement>>,
    /// Settlement name -> index into `settlements`
    settlement_index: AHashMap<String, usize>,
    catalog: FacilityCatalog,
    plans: Vec<Plan>,
    next_plan_id: u32,
    tick: Tick,
    actions_log: Vec<ActionRecord>,
    running: bool,
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            settlements: Vec::new(),
            settlement_index: AHashMap::new(),
            catalog: FacilityCatalog::new(),
            plans: Vec::new(),
            next_plan_id: 0,
            tick: 0,
            actions_log: Vec::new(),
            running: true,
        }
    }

    /// Build the initial state: settlements first, then the catalog, then plans
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let mut simulation = Self::new();
        for entry in &config.settlements {
            simulation.add_settlement(Settlement::new(entry.name.clone(), entry.kind))?;
        }
        for entry in &config.facilities {
            simulation.add_facility(entry.to_facility_type())?;
        }
        for entry in &config.plans {
            simulation.add_plan(&entry.settlement, &entry.policy)?;
        }
        Ok(simulation)
    }

    pub fn add_settlement(&mut self, settlement: Settlement) -> Result<()> {
        if self.settlement_index.contains_key(settlement.name()) {
            return Err(PlannerError::AlreadyExists {
                kind: "Settlement",
                name: settlement.name().to_string(),
            });
        }
        tracing::debug!(
            settlement = settlement.name(),
            limit = settlement.construction_limit(),
            "Settlement added"
        );
        self.settlement_index
            .insert(settlement.name().to_string(), self.settlements.len());
        self.settlements.push(Arc::new(settlement));
        Ok(())
    }

    pub fn add_facility(&mut self, facility: FacilityType) -> Result<()> {
        tracing::debug!(facility = facility.name(), cost = facility.cost(), "Facility type added");
        self.catalog.add(facility)
    }

    /// Create a plan from a policy token. Unknown tokens fall back to
    /// Sustainability; Balanced starts from zero totals.
    pub fn add_plan(&mut self, settlement_name: &str, policy_token: &str) -> Result<PlanId> {
        let kind = PolicyKind::from_token_or_default(policy_token);
        self.add_plan_with_policy(settlement_name, SelectionPolicy::for_kind(kind, Scores::default()))
    }

    pub fn add_plan_with_policy(
        &mut self,
        settlement_name: &str,
        policy: SelectionPolicy,
    ) -> Result<PlanId> {
        let settlement = Arc::clone(self.settlement(settlement_name)?);
        let id = PlanId(self.next_plan_id);
        self.next_plan_id += 1;

        tracing::info!(plan = %id, settlement = settlement_name, policy = policy.token(), "Plan created");
        self.plans.push(Plan::new(id, settlement, policy));
        Ok(id)
    }

    /// Swap a plan's policy by token, returning the previous kind
    pub fn change_plan_policy(&mut self, plan_id: PlanId, policy_token: &str) -> Result<PolicyKind> {
        let kind: PolicyKind = policy_token.parse()?;
        self.plan_mut(plan_id)?.change_policy(kind)
    }

    /// Step every plan once, in creation order. The first failing plan aborts
    /// the call: plans before it have already stepped, later plans are left
    /// alone, and the tick counter only moves when every plan stepped.
    pub fn step(&mut self) -> Result<()> {
        let tick = self.tick + 1;
        let catalog = self.catalog.all();
        for plan in &mut self.plans {
            let report = plan.step(catalog)?;
            if report.started > 0 || report.completed > 0 {
                tracing::debug!(
                    tick,
                    plan = %plan.id(),
                    started = report.started,
                    completed = report.completed,
                    "Plan stepped"
                );
            }
        }
        self.tick = tick;
        Ok(())
    }

    pub fn run(&mut self, steps: u32) -> Result<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// End the run, returning the abbreviated view of every plan
    pub fn close(&mut self) -> Vec<PlanSummary> {
        self.running = false;
        tracing::info!(tick = self.tick, plans = self.plans.len(), "Simulation closed");
        self.plans.iter().map(Plan::summary).collect()
    }

    pub fn open(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn settlement(&self, name: &str) -> Result<&Arc<Settlement>> {
        self.settlement_index
            .get(name)
            .map(|&i| &self.settlements[i])
            .ok_or_else(|| PlannerError::SettlementNotFound(name.to_string()))
    }

    pub fn has_settlement(&self, name: &str) -> bool {
        self.settlement_index.contains_key(name)
    }

    pub fn settlements(&self) -> &[Arc<Settlement>] {
        &self.settlements
    }

    pub fn plan(&self, id: PlanId) -> Result<&Plan> {
        self.plans
            .iter()
            .find(|p| p.id() == id)
            .ok_or(PlannerError::PlanNotFound(id))
    }

    pub fn plan_mut(&mut self, id: PlanId) -> Result<&mut Plan> {
        self.plans
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(PlannerError::PlanNotFound(id))
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn catalog(&self) -> &FacilityCatalog {
        &self.catalog
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn record(&mut self, record: ActionRecord) {
        self.actions_log.push(record);
    }

    pub fn actions_log(&self) -> &[ActionRecord] {
        &self.actions_log
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Replace the whole state with the snapshot's
    pub fn restore(&mut self, snapshot: &Snapshot) {
        *self = snapshot.to_simulation();
        tracing::info!(tick = self.tick, plans = self.plans.len(), "Simulation restored");
    }

    /// Copy with its own settlement values; every plan is rebound to the
    /// copy's settlement of the same name
    pub(crate) fn deep_clone(&self) -> Self {
        let mut copy = self.clone();
        copy.settlements = self
            .settlements
            .iter()
            .map(|s| Arc::new(Settlement::clone(s)))
            .collect();
        for plan in &mut copy.plans {
            let index = copy.settlement_index[plan.settlement().name()];
            plan.rebind(Arc::clone(&copy.settlements[index]));
        }
        copy
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Simulation {
    /// Structural equality; the name index is derived from `settlements`
    fn eq(&self, other: &Self) -> bool {
        self.settlements == other.settlements
            && self.catalog == other.catalog
            && self.plans == other.plans
            && self.next_plan_id == other.next_plan_id
            && self.tick == other.tick
            && self.actions_log == other.actions_log
            && self.running == other.running
    }
}

impl Eq for Simulation {}
