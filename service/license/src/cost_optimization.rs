//! Contract cost optimization: enumerate the combinations of the two
//! highest-priced contract tiers that cover a capacity shortfall, cheapest
//! first. Pure functions over the caller's contract catalog, no shared state.

use std::collections::BTreeMap;

use domain_license::model::vo::{ContractOption, ContractSet, Requirement};

/// Contract ids ordered by descending unit price.
pub fn rank_by_price(contracts: &BTreeMap<i32, ContractOption>) -> Vec<i32> {
    let mut ids: Vec<i32> = contracts.keys().copied().collect();
    ids.sort_by(|a, b| contracts[b].price.total_cmp(&contracts[a].price));
    ids
}

/// Candidate combinations covering the requirement, sorted by ascending total
/// price. With two or more tiers only the two highest-priced participate: the
/// higher tier's unit count grows from zero until the lower tier is no longer
/// needed, and every intermediate mix is kept as a candidate.
pub fn optimize(
    contracts: &BTreeMap<i32, ContractOption>,
    requirement: &Requirement,
) -> Vec<ContractSet> {
    let ranked = rank_by_price(contracts);
    match ranked.as_slice() {
        [] => vec![],
        [only] => {
            let option = &contracts[only];
            let count = units_needed(option, requirement.memory, requirement.nodes);
            let mut units = BTreeMap::new();
            if count > 0 {
                units.insert(*only, count);
            }
            vec![ContractSet { units, total_price: option.price * count as f64 }]
        }
        [higher_id, lower_id, ..] => {
            let (higher, lower) = (&contracts[higher_id], &contracts[lower_id]);
            let mut candidates = Vec::new();
            let mut higher_count = 0u64;
            loop {
                let memory_left = requirement.memory - higher.memory * higher_count as f64;
                let nodes_left = requirement.nodes - higher.nodes * higher_count as f64;
                let lower_count = units_needed(lower, memory_left, nodes_left);

                let mut units = BTreeMap::new();
                if higher_count > 0 {
                    units.insert(*higher_id, higher_count);
                }
                if lower_count > 0 {
                    units.insert(*lower_id, lower_count);
                }
                candidates.push(ContractSet {
                    units,
                    total_price: higher.price * higher_count as f64
                        + lower.price * lower_count as f64,
                });
                if lower_count == 0 {
                    break;
                }
                higher_count += 1;
            }
            candidates.sort_by(|a, b| a.total_price.total_cmp(&b.total_price));
            candidates
        }
    }
}

/// Units of one tier needed to cover the remaining shortfall in both
/// dimensions. A non-positive shortfall needs none.
fn units_needed(option: &ContractOption, memory: f64, nodes: f64) -> u64 {
    let by_memory = memory / option.memory;
    let by_nodes = nodes / option.nodes;
    by_memory.max(by_nodes).ceil().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(memory: f64, nodes: f64, price: f64) -> ContractOption {
        ContractOption { memory, nodes, price }
    }

    fn catalog() -> BTreeMap<i32, ContractOption> {
        BTreeMap::from([(1, option(4.0, 2.0, 100.0)), (2, option(1.0, 1.0, 30.0))])
    }

    #[test]
    fn ranking_is_by_descending_price() {
        let contracts = BTreeMap::from([
            (1, option(1.0, 1.0, 100.0)),
            (2, option(1.0, 1.0, 200.0)),
            (3, option(1.0, 1.0, 50.0)),
        ]);
        assert_eq!(rank_by_price(&contracts), [2, 1, 3]);
    }

    #[test]
    fn candidates_are_sorted_cheapest_first() {
        let contracts = catalog();
        let sets = optimize(&contracts, &Requirement { memory: 8.0, nodes: 4.0 });
        let prices: Vec<f64> = sets.iter().map(|s| s.total_price).collect();
        assert_eq!(prices, [200.0, 220.0, 240.0]);
        assert_eq!(sets[0].units, BTreeMap::from([(1, 2)]));
        assert_eq!(sets[2].units, BTreeMap::from([(2, 8)]));
    }

    #[test]
    fn every_candidate_covers_the_requirement() {
        let contracts = catalog();
        let requirement = Requirement { memory: 13.0, nodes: 5.0 };
        let sets = optimize(&contracts, &requirement);
        assert!(!sets.is_empty());
        for set in &sets {
            assert!(set.covers(&contracts, &requirement), "uncovered: {set:?}");
        }
    }

    #[test]
    fn single_tier_yields_one_candidate() {
        let contracts = BTreeMap::from([(7, option(2.0, 1.0, 10.0))]);
        let sets = optimize(&contracts, &Requirement { memory: 5.0, nodes: 1.0 });
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].units, BTreeMap::from([(7, 3)]));
        assert_eq!(sets[0].total_price, 30.0);
    }

    #[test]
    fn zero_requirement_needs_nothing() {
        let sets = optimize(&catalog(), &Requirement { memory: 0.0, nodes: 0.0 });
        assert_eq!(sets.len(), 1);
        assert!(sets[0].units.is_empty());
        assert_eq!(sets[0].total_price, 0.0);
    }

    #[test]
    fn empty_catalog_has_no_candidates() {
        assert!(optimize(&BTreeMap::new(), &Requirement { memory: 1.0, nodes: 1.0 }).is_empty());
    }

    #[test]
    fn repeated_calls_are_independent() {
        let contracts = catalog();
        let requirement = Requirement { memory: 8.0, nodes: 4.0 };
        let first = optimize(&contracts, &requirement);
        let second = optimize(&contracts, &requirement);
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].total_price, second[0].total_price);
    }
}
