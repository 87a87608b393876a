//! Snapshot - an in-memory copy of the whole simulation for backup/restore
//!
//! A snapshot owns its own settlements, catalog, plans and action log, so
//! nothing done to the live simulation afterwards can reach it.

use crate::simulation::engine::Simulation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    state: Simulation,
}

impl Snapshot {
    pub fn capture(simulation: &Simulation) -> Self {
        tracing::info!(
            tick = simulation.current_tick(),
            plans = simulation.plans().len(),
            "Snapshot captured"
        );
        Self {
            state: simulation.deep_clone(),
        }
    }

    /// A fresh simulation equal to the captured one
    pub fn to_simulation(&self) -> Simulation {
        self.state.deep_clone()
    }

    /// Whether `simulation` is still in exactly the captured state
    pub fn matches(&self, simulation: &Simulation) -> bool {
        &self.state == simulation
    }

    pub fn state(&self) -> &Simulation {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::facility::{FacilityCategory, FacilityType};
    use crate::city::settlement::{Settlement, SettlementType};
    use crate::core::types::{PlanId, Scores};

    fn world() -> Simulation {
        let mut sim = Simulation::new();
        sim.add_settlement(Settlement::new("Haifa", SettlementType::City)).unwrap();
        sim.add_facility(FacilityType::new(
            "school",
            FacilityCategory::LifeQuality,
            2,
            Scores::new(2, 1, 1),
        ))
        .unwrap();
        sim.add_plan("Haifa", "nve").unwrap();
        sim
    }

    #[test]
    fn test_snapshot_equals_live_state() {
        let mut sim = world();
        sim.step().unwrap();
        let snapshot = sim.snapshot();
        assert!(snapshot.matches(&sim));
    }

    #[test]
    fn test_snapshot_unaffected_by_later_steps() {
        let mut sim = world();
        let snapshot = sim.snapshot();

        sim.run(3).unwrap();
        sim.add_plan("Haifa", "bal").unwrap();
        assert!(!snapshot.matches(&sim));
        assert_eq!(snapshot.state().plans().len(), 1);
        assert!(snapshot.state().plan(PlanId(0)).unwrap().completed().is_empty());
    }

    #[test]
    fn test_restore_round_trip() {
        let mut sim = world();
        sim.step().unwrap();
        let snapshot = sim.snapshot();

        sim.run(4).unwrap();
        sim.restore(&snapshot);
        assert!(snapshot.matches(&sim));

        // The restored run continues exactly like an uninterrupted one
        let mut expected = snapshot.to_simulation();
        expected.step().unwrap();
        sim.step().unwrap();
        assert_eq!(sim, expected);
    }

    #[test]
    fn test_restore_keeps_plan_counter() {
        let mut sim = world();
        let snapshot = sim.snapshot();
        sim.add_plan("Haifa", "eco").unwrap();

        sim.restore(&snapshot);
        assert_eq!(sim.add_plan("Haifa", "eco").unwrap(), PlanId(1));
    }
}
