//! Selection policies - decide which facility type a plan starts next
//!
//! Four fixed strategies:
//! - **Naive**: walk the catalog in order, wrapping around
//! - **Balanced**: greedy minimax over the three score axes
//! - **Economy**: walk only the ECONOMY entries
//! - **Sustainability**: walk only the ENVIRONMENT entries
//!
//! Every variant carries its own state and mutates it on each selection, so
//! two plans never share a cursor or running totals.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::city::facility::{FacilityCategory, FacilityType};
use crate::core::error::{PlannerError, Result};
use crate::core::types::Scores;

/// Which strategy a policy follows, without its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyKind {
    Naive,
    Balanced,
    Economy,
    Sustainability,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Naive,
        PolicyKind::Balanced,
        PolicyKind::Economy,
        PolicyKind::Sustainability,
    ];

    /// Three-letter token used in commands and config files
    pub fn token(&self) -> &'static str {
        match self {
            PolicyKind::Naive => "nve",
            PolicyKind::Balanced => "bal",
            PolicyKind::Economy => "eco",
            PolicyKind::Sustainability => "env",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::Naive => "Naive",
            PolicyKind::Balanced => "Balanced",
            PolicyKind::Economy => "Economy",
            PolicyKind::Sustainability => "Sustainability",
        }
    }

    /// Lenient mapping used when creating plans: any unknown token
    /// falls back to Sustainability
    pub fn from_token_or_default(token: &str) -> Self {
        token.parse().unwrap_or(PolicyKind::Sustainability)
    }

    /// Category a filtering policy walks, if any
    fn category_filter(&self) -> Option<FacilityCategory> {
        match self {
            PolicyKind::Economy => Some(FacilityCategory::Economy),
            PolicyKind::Sustainability => Some(FacilityCategory::Environment),
            PolicyKind::Naive | PolicyKind::Balanced => None,
        }
    }
}

impl FromStr for PolicyKind {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.token() == s)
            .ok_or_else(|| PlannerError::InvalidPolicy(s.to_string()))
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// A selection strategy together with its private state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// `last` is the index of the previous pick; `None` means "before index 0"
    Naive { last: Option<usize> },
    /// Path-dependent totals of everything this policy has picked so far
    Balanced { totals: Scores },
    Economy { last: Option<usize> },
    Sustainability { last: Option<usize> },
}

impl SelectionPolicy {
    pub fn naive() -> Self {
        SelectionPolicy::Naive { last: None }
    }

    pub fn balanced(totals: Scores) -> Self {
        SelectionPolicy::Balanced { totals }
    }

    pub fn economy() -> Self {
        SelectionPolicy::Economy { last: None }
    }

    pub fn sustainability() -> Self {
        SelectionPolicy::Sustainability { last: None }
    }

    /// Fresh policy of the given kind. Balanced starts from `seed`; the
    /// others ignore it.
    pub fn for_kind(kind: PolicyKind, seed: Scores) -> Self {
        match kind {
            PolicyKind::Naive => Self::naive(),
            PolicyKind::Balanced => Self::balanced(seed),
            PolicyKind::Economy => Self::economy(),
            PolicyKind::Sustainability => Self::sustainability(),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            SelectionPolicy::Naive { .. } => PolicyKind::Naive,
            SelectionPolicy::Balanced { .. } => PolicyKind::Balanced,
            SelectionPolicy::Economy { .. } => PolicyKind::Economy,
            SelectionPolicy::Sustainability { .. } => PolicyKind::Sustainability,
        }
    }

    pub fn token(&self) -> &'static str {
        self.kind().token()
    }

    /// Pick the next facility type to build from `catalog`.
    ///
    /// Fails with `ExhaustedCatalog` when the catalog is empty or holds no
    /// entry of the category a filtering policy walks. State is only updated
    /// on success.
    pub fn select<'c>(&mut self, catalog: &'c [FacilityType]) -> Result<&'c FacilityType> {
        let kind = self.kind();
        match self {
            SelectionPolicy::Naive { last }
            | SelectionPolicy::Economy { last }
            | SelectionPolicy::Sustainability { last } => {
                rotate(last, catalog, kind.category_filter()).ok_or(
                    PlannerError::ExhaustedCatalog {
                        policy: kind.name(),
                    },
                )
            }
            SelectionPolicy::Balanced { totals } => {
                let chosen = most_balanced(*totals, catalog).ok_or(
                    PlannerError::ExhaustedCatalog {
                        policy: kind.name(),
                    },
                )?;
                *totals = totals.checked_add(chosen.scores()).ok_or_else(|| {
                    PlannerError::ScoreOverflow(format!(
                        "Balanced totals after picking {}",
                        chosen.name()
                    ))
                })?;
                Ok(chosen)
            }
        }
    }
}

/// Scan forward from the entry after `last`, wrapping once around the
/// catalog, and return the first entry matching `filter`
fn rotate<'c>(
    last: &mut Option<usize>,
    catalog: &'c [FacilityType],
    filter: Option<FacilityCategory>,
) -> Option<&'c FacilityType> {
    let len = catalog.len();
    let start = last.map_or(0, |i| i + 1);

    let index = (0..len)
        .map(|offset| (start + offset) % len)
        .find(|&i| filter.map_or(true, |category| catalog[i].category() == category))?;

    *last = Some(index);
    Some(&catalog[index])
}

/// Entry whose scores, added to `totals`, leave the smallest worst-case gap
/// between any two axes. Ties go to the earliest entry.
fn most_balanced(totals: Scores, catalog: &[FacilityType]) -> Option<&FacilityType> {
    let mut best: Option<(i64, &FacilityType)> = None;
    for candidate in catalog {
        let imbalance = totals.imbalance_with(candidate.scores());
        if best.map_or(true, |(lowest, _)| imbalance < lowest) {
            best = Some((imbalance, candidate));
        }
    }
    best.map(|(_, facility)| facility)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ft(name: &str, category: FacilityCategory, lq: i32, eco: i32, env: i32) -> FacilityType {
        FacilityType::new(name, category, 1, Scores::new(lq, eco, env))
    }

    fn names(policy: &mut SelectionPolicy, catalog: &[FacilityType], n: usize) -> Vec<String> {
        (0..n)
            .map(|_| policy.select(catalog).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_naive_round_robin_wraps() {
        let catalog = vec![
            ft("A", FacilityCategory::LifeQuality, 1, 1, 1),
            ft("B", FacilityCategory::Economy, 1, 1, 1),
            ft("C", FacilityCategory::Environment, 1, 1, 1),
        ];
        let mut policy = SelectionPolicy::naive();
        assert_eq!(names(&mut policy, &catalog, 4), vec!["A", "B", "C", "A"]);
    }

    #[test]
    fn test_naive_picks_up_appended_entries() {
        let mut catalog = vec![ft("A", FacilityCategory::LifeQuality, 1, 1, 1)];
        let mut policy = SelectionPolicy::naive();
        assert_eq!(policy.select(&catalog).unwrap().name(), "A");

        catalog.push(ft("B", FacilityCategory::Economy, 1, 1, 1));
        assert_eq!(policy.select(&catalog).unwrap().name(), "B");
        assert_eq!(policy.select(&catalog).unwrap().name(), "A");
    }

    #[test]
    fn test_economy_skips_other_categories() {
        let catalog = vec![
            ft("A", FacilityCategory::Economy, 1, 1, 1),
            ft("B", FacilityCategory::Environment, 1, 1, 1),
            ft("C", FacilityCategory::Economy, 1, 1, 1),
        ];
        let mut policy = SelectionPolicy::economy();
        assert_eq!(names(&mut policy, &catalog, 3), vec!["A", "C", "A"]);
    }

    #[test]
    fn test_sustainability_filters_environment() {
        let catalog = vec![
            ft("A", FacilityCategory::Economy, 1, 1, 1),
            ft("B", FacilityCategory::Environment, 1, 1, 1),
            ft("C", FacilityCategory::LifeQuality, 1, 1, 1),
            ft("D", FacilityCategory::Environment, 1, 1, 1),
        ];
        let mut policy = SelectionPolicy::sustainability();
        assert_eq!(names(&mut policy, &catalog, 3), vec!["B", "D", "B"]);
    }

    #[test]
    fn test_filtered_policy_without_match_fails() {
        let catalog = vec![ft("A", FacilityCategory::LifeQuality, 1, 1, 1)];
        let mut policy = SelectionPolicy::economy();
        let err = policy.select(&catalog).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::ExhaustedCatalog { policy: "Economy" }
        ));
        assert_eq!(policy, SelectionPolicy::economy());
    }

    #[test]
    fn test_empty_catalog_fails_for_every_kind() {
        for kind in PolicyKind::ALL {
            let mut policy = SelectionPolicy::for_kind(kind, Scores::default());
            assert!(matches!(
                policy.select(&[]),
                Err(PlannerError::ExhaustedCatalog { .. })
            ));
        }
    }

    #[test]
    fn test_balanced_tie_goes_to_first() {
        let catalog = vec![
            ft("X", FacilityCategory::LifeQuality, 5, 1, 1),
            ft("Y", FacilityCategory::Economy, 1, 5, 1),
        ];
        let mut policy = SelectionPolicy::balanced(Scores::default());
        assert_eq!(policy.select(&catalog).unwrap().name(), "X");
        assert_eq!(
            policy,
            SelectionPolicy::Balanced {
                totals: Scores::new(5, 1, 1)
            }
        );
    }

    #[test]
    fn test_balanced_is_path_dependent() {
        let catalog = vec![
            ft("X", FacilityCategory::LifeQuality, 5, 1, 1),
            ft("Y", FacilityCategory::Economy, 1, 5, 1),
            ft("Z", FacilityCategory::Environment, 1, 1, 5),
        ];
        let mut policy = SelectionPolicy::balanced(Scores::default());
        // X first on the tie, then Y evens out economy, then Z closes the gap
        assert_eq!(names(&mut policy, &catalog, 3), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_balanced_uses_seed_totals() {
        let catalog = vec![
            ft("X", FacilityCategory::LifeQuality, 5, 1, 1),
            ft("Y", FacilityCategory::Economy, 1, 5, 1),
        ];
        let mut policy = SelectionPolicy::balanced(Scores::new(10, 0, 0));
        assert_eq!(policy.select(&catalog).unwrap().name(), "Y");
    }

    #[test]
    fn test_balanced_totals_overflow_is_an_error() {
        let catalog = vec![ft("X", FacilityCategory::LifeQuality, i32::MAX, 0, 0)];
        let seed = Scores::new(1, 0, 0);
        let mut policy = SelectionPolicy::balanced(seed);

        assert!(matches!(
            policy.select(&catalog),
            Err(PlannerError::ScoreOverflow(_))
        ));
        assert_eq!(policy, SelectionPolicy::balanced(seed));
    }

    #[test]
    fn test_token_mapping() {
        assert_eq!("nve".parse::<PolicyKind>().unwrap(), PolicyKind::Naive);
        assert_eq!("bal".parse::<PolicyKind>().unwrap(), PolicyKind::Balanced);
        assert_eq!("eco".parse::<PolicyKind>().unwrap(), PolicyKind::Economy);
        assert_eq!("env".parse::<PolicyKind>().unwrap(), PolicyKind::Sustainability);
        assert!(matches!(
            "xyz".parse::<PolicyKind>(),
            Err(PlannerError::InvalidPolicy(_))
        ));
        assert_eq!(PolicyKind::from_token_or_default("xyz"), PolicyKind::Sustainability);
        assert_eq!(PolicyKind::from_token_or_default("eco"), PolicyKind::Economy);
    }

    #[test]
    fn test_clone_has_independent_state() {
        let catalog = vec![
            ft("A", FacilityCategory::LifeQuality, 1, 1, 1),
            ft("B", FacilityCategory::Economy, 1, 1, 1),
        ];
        let mut original = SelectionPolicy::naive();
        original.select(&catalog).unwrap();
        let mut copy = original.clone();

        assert_eq!(copy.select(&catalog).unwrap().name(), "B");
        assert_eq!(original.select(&catalog).unwrap().name(), "B");
    }
}
