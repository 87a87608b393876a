//! City layer - settlements, facilities, selection policies and construction plans

pub mod catalog;
pub mod facility;
pub mod plan;
pub mod policy;
pub mod settlement;

pub use catalog::FacilityCatalog;
pub use facility::{Facility, FacilityCategory, FacilityStatus, FacilityType};
pub use plan::{Plan, PlanStatus, PlanSummary, StepReport};
pub use policy::{PolicyKind, SelectionPolicy};
pub use settlement::{Settlement, SettlementType};
