//! Conversion from a four-stockpile cost into the fixed-arity cost tuples the
//! dat file stores.
//!
//! Input order is always `[food, wood, stone, gold]`. Positive amounts are
//! emitted in that order, the rest of the tuple is padded with the empty
//! sentinel. Unit costs reserve their last slot for one population headroom.

use aoe2data::constants::resources;
use aoe2data::{ResearchResourceCost, ResourceCost, ResourceId};
use std::fmt;
use thiserror::Error;

/// Which tuple layout a cost is being converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostKind {
    Tech,
    Building,
    Unit,
}

impl CostKind {
    /// Most positive stockpile amounts this layout can hold.
    pub const fn max_components(self) -> usize {
        match self {
            CostKind::Tech | CostKind::Building => 3,
            CostKind::Unit => 2,
        }
    }
}

impl fmt::Display for CostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostKind::Tech => write!(f, "tech"),
            CostKind::Building => write!(f, "building"),
            CostKind::Unit => write!(f, "unit"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CostError {
    #[error("{kind} cost has {positive} positive components, expected 1 to {}", .kind.max_components())]
    ComponentCount { kind: CostKind, positive: usize },
}

/// Positive `(resource, amount)` pairs of `costs`, validated against `kind`.
fn components(
    costs: [i16; 4],
    kind: CostKind,
) -> Result<impl Iterator<Item = (ResourceId, i16)>, CostError> {
    let positive = costs.iter().filter(|&&amount| amount > 0).count();
    if positive == 0 || positive > kind.max_components() {
        return Err(CostError::ComponentCount { kind, positive });
    }
    Ok(resources::STOCKPILES
        .into_iter()
        .zip(costs)
        .filter(|&(_, amount)| amount > 0))
}

pub fn try_tech_research_cost(costs: [i16; 4]) -> Result<[ResearchResourceCost; 3], CostError> {
    let mut out = [ResearchResourceCost::EMPTY; 3];
    for (slot, (resource, amount)) in out.iter_mut().zip(components(costs, CostKind::Tech)?) {
        *slot = ResearchResourceCost::paid(resource, amount);
    }
    Ok(out)
}

pub fn try_building_cost(costs: [i16; 4]) -> Result<[ResourceCost; 3], CostError> {
    let mut out = [ResourceCost::EMPTY; 3];
    for (slot, (resource, amount)) in out.iter_mut().zip(components(costs, CostKind::Building)?) {
        *slot = ResourceCost::paid(resource, amount);
    }
    Ok(out)
}

pub fn try_unit_train_cost(costs: [i16; 4]) -> Result<[ResourceCost; 3], CostError> {
    let mut out = [ResourceCost::EMPTY; 3];
    for (slot, (resource, amount)) in out.iter_mut().zip(components(costs, CostKind::Unit)?) {
        *slot = ResourceCost::paid(resource, amount);
    }
    out[2] = ResourceCost::required(resources::POPULATION_HEADROOM, 1);
    Ok(out)
}

/// Research cost tuple, or all-empty with a warning if `costs` does not fit.
pub fn tech_research_cost(costs: [i16; 4]) -> [ResearchResourceCost; 3] {
    try_tech_research_cost(costs).unwrap_or_else(|e| {
        log::warn!("{} ({:?}), using an empty cost", e, costs);
        [ResearchResourceCost::EMPTY; 3]
    })
}

/// Building cost tuple, or all-empty with a warning if `costs` does not fit.
pub fn building_cost(costs: [i16; 4]) -> [ResourceCost; 3] {
    try_building_cost(costs).unwrap_or_else(|e| {
        log::warn!("{} ({:?}), using an empty cost", e, costs);
        [ResourceCost::EMPTY; 3]
    })
}

/// Unit cost tuple with population headroom, or all-empty with a warning if
/// `costs` does not fit.
pub fn unit_train_cost(costs: [i16; 4]) -> [ResourceCost; 3] {
    try_unit_train_cost(costs).unwrap_or_else(|e| {
        log::warn!("{} ({:?}), using an empty cost", e, costs);
        [ResourceCost::EMPTY; 3]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tech_cost_orders_and_pads() {
        let cost = tech_research_cost([300, 0, 300, 0]);
        assert_eq!(
            cost,
            [
                ResearchResourceCost::paid(resources::FOOD, 300),
                ResearchResourceCost::paid(resources::STONE, 300),
                ResearchResourceCost::EMPTY,
            ]
        );
    }

    #[test]
    fn test_unit_cost_appends_headroom() {
        let cost = unit_train_cost([0, 0, 0, 85]);
        assert_eq!(cost[0], ResourceCost::paid(resources::GOLD, 85));
        assert_eq!(cost[1], ResourceCost::EMPTY);
        assert_eq!(
            cost[2],
            ResourceCost::required(resources::POPULATION_HEADROOM, 1)
        );
    }

    #[test]
    fn test_unit_cost_rejects_three_components() {
        assert_eq!(
            try_unit_train_cost([50, 50, 0, 50]),
            Err(CostError::ComponentCount {
                kind: CostKind::Unit,
                positive: 3
            })
        );
        assert_eq!(unit_train_cost([50, 50, 0, 50]), [ResourceCost::EMPTY; 3]);
    }

    #[test]
    fn test_building_cost_accepts_three_components() {
        let cost = building_cost([0, 200, 100, 50]);
        assert!(cost.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_building_cost_rejects_zero_and_four_components() {
        assert_eq!(
            try_building_cost([0, 0, 0, 0]),
            Err(CostError::ComponentCount {
                kind: CostKind::Building,
                positive: 0
            })
        );
        assert_eq!(building_cost([10, 20, 30, 40]), [ResourceCost::EMPTY; 3]);
        assert_eq!(
            building_cost([0, 175, 0, 0]),
            [
                ResourceCost::paid(resources::WOOD, 175),
                ResourceCost::EMPTY,
                ResourceCost::EMPTY,
            ]
        );
    }

    #[test]
    fn test_zero_or_four_components_rejected() {
        assert!(try_tech_research_cost([0, 0, 0, 0]).is_err());
        assert!(try_tech_research_cost([1, 1, 1, 1]).is_err());
        assert_eq!(tech_research_cost([1, 1, 1, 1]), [ResearchResourceCost::EMPTY; 3]);
    }

    #[test]
    fn test_error_message_names_bound() {
        let err = try_unit_train_cost([1, 1, 1, 0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unit cost has 3 positive components, expected 1 to 2"
        );
    }

    fn check_research(costs: [i16; 4]) -> Result<(), TestCaseError> {
        let positive: Vec<(i16, i16)> = (0i16..)
            .zip(costs)
            .filter(|&(_, amount)| amount > 0)
            .collect();
        let out = tech_research_cost(costs);
        prop_assert_eq!(out.len(), 3);

        if positive.is_empty() || positive.len() > 3 {
            prop_assert_eq!(out, [ResearchResourceCost::EMPTY; 3]);
        } else {
            let emitted: Vec<(i16, i16)> = out
                .iter()
                .filter(|c| !c.is_empty())
                .map(|c| (c.resource, c.amount))
                .collect();
            prop_assert_eq!(emitted, positive.clone());
            prop_assert!(out[positive.len()..].iter().all(|c| *c == ResearchResourceCost::EMPTY));
        }
        Ok(())
    }

    fn check_building(costs: [i16; 4]) -> Result<(), TestCaseError> {
        let positive: Vec<(i16, i16)> = (0i16..)
            .zip(costs)
            .filter(|&(_, amount)| amount > 0)
            .collect();
        let out = building_cost(costs);

        if positive.is_empty() || positive.len() > 3 {
            prop_assert_eq!(out, [ResourceCost::EMPTY; 3]);
        } else {
            let emitted: Vec<(i16, i16)> = out
                .iter()
                .filter(|c| !c.is_empty())
                .map(|c| (c.resource, c.amount))
                .collect();
            prop_assert_eq!(emitted, positive.clone());
            prop_assert!(out[..positive.len()].iter().all(|c| c.flag == 1));
            prop_assert!(out[positive.len()..].iter().all(|c| *c == ResourceCost::EMPTY));
        }
        Ok(())
    }

    fn check_unit(costs: [i16; 4]) -> Result<(), TestCaseError> {
        let positive: Vec<(i16, i16)> = (0i16..)
            .zip(costs)
            .filter(|&(_, amount)| amount > 0)
            .collect();
        let out = unit_train_cost(costs);

        if positive.is_empty() || positive.len() > 2 {
            prop_assert_eq!(out, [ResourceCost::EMPTY; 3]);
        } else {
            let emitted: Vec<(i16, i16)> = out[..2]
                .iter()
                .filter(|c| !c.is_empty())
                .map(|c| (c.resource, c.amount))
                .collect();
            prop_assert_eq!(emitted, positive);
            prop_assert_eq!(
                out[2],
                ResourceCost::required(resources::POPULATION_HEADROOM, 1)
            );
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_research_cost_preserves_positive_amounts(
            costs in prop::array::uniform4(prop_oneof![Just(0i16), 1i16..=i16::MAX])
        ) {
            check_research(costs)?;
        }

        #[test]
        fn prop_building_cost_preserves_positive_amounts(
            costs in prop::array::uniform4(prop_oneof![Just(0i16), 1i16..=i16::MAX])
        ) {
            check_building(costs)?;
        }

        #[test]
        fn prop_unit_cost_preserves_positive_amounts(
            costs in prop::array::uniform4(prop_oneof![Just(0i16), 1i16..=i16::MAX])
        ) {
            check_unit(costs)?;
        }
    }
}
