//! Facility catalog - the run-wide list of facility types plans choose from
//!
//! The catalog is append-only: entries are never removed or reordered, so
//! selection cursors held by plans stay meaningful as it grows.

use crate::city::facility::FacilityType;
use crate::core::error::{PlannerError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityCatalog {
    facilities: Vec<FacilityType>,
}

impl FacilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a facility type; names must be unique
    pub fn add(&mut self, facility: FacilityType) -> Result<()> {
        if self.contains(facility.name()) {
            return Err(PlannerError::AlreadyExists {
                kind: "Facility",
                name: facility.name().to_string(),
            });
        }
        self.facilities.push(facility);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FacilityType> {
        self.facilities.iter().find(|f| f.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn all(&self) -> &[FacilityType] {
        &self.facilities
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::facility::FacilityCategory;
    use crate::core::types::Scores;

    fn facility(name: &str, category: FacilityCategory) -> FacilityType {
        FacilityType::new(name, category, 2, Scores::new(1, 1, 1))
    }

    #[test]
    fn test_add_and_get() {
        let mut catalog = FacilityCatalog::new();
        catalog.add(facility("school", FacilityCategory::LifeQuality)).unwrap();
        catalog.add(facility("mall", FacilityCategory::Economy)).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("mall").unwrap().category(), FacilityCategory::Economy);
        assert!(catalog.get("farm").is_none());
        assert_eq!(catalog.all()[0].name(), "school");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut catalog = FacilityCatalog::new();
        catalog.add(facility("school", FacilityCategory::LifeQuality)).unwrap();

        let err = catalog
            .add(facility("school", FacilityCategory::Economy))
            .unwrap_err();
        assert!(matches!(err, PlannerError::AlreadyExists { .. }));
        assert_eq!(catalog.len(), 1);
    }
}
