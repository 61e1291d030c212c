//! Quine–McCluskey two-level minimization.
//!
//! 1. Seed one implicant per true minterm.
//! 2. Repeatedly merge implicants from adjacent "ones-count" groups that differ
//!    in exactly one fixed bit. Implicants that never merge are prime.
//! 3. Build the prime implicant chart (minterm to covering primes), take every
//!    essential prime, then greedily add primes until every minterm is covered.
//!
//! The greedy step picks the prime covering the most uncovered minterms (ties:
//! fewer literals, then lower index). It is not guaranteed to find a globally
//! minimal cover when the chart has cycles.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use super::implicant::{sum_of_implicants, Implicant};
use crate::ast::Expr;

/// All prime implicants of the function with the given true `minterms`.
pub fn prime_implicants(minterms: &[u32], width: usize) -> Vec<Implicant> {
    let mut current: Vec<Implicant> = minterms
        .iter()
        .copied()
        .collect::<BTreeSet<u32>>()
        .into_iter()
        .map(|m| Implicant::from_minterm(m, width))
        .collect();
    let mut primes: Vec<Implicant> = Vec::new();

    while !current.is_empty() {
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (index, imp) in current.iter().enumerate() {
            groups.entry(imp.ones()).or_default().push(index);
        }

        let mut merged = vec![false; current.len()];
        let mut next: Vec<Implicant> = Vec::new();
        for (&ones, lower) in &groups {
            let Some(upper) = groups.get(&(ones + 1)) else {
                continue;
            };
            for &i in lower {
                for &j in upper {
                    if let Some(combined) = current[i].combine(&current[j]) {
                        merged[i] = true;
                        merged[j] = true;
                        if !next.iter().any(|imp| imp.bits == combined.bits) {
                            next.push(combined);
                        }
                    }
                }
            }
        }

        for (imp, was_merged) in current.into_iter().zip(merged) {
            if !was_merged && !primes.contains(&imp) {
                debug!("prime implicant {} covering {:?}", imp, imp.minterms);
                primes.push(imp);
            }
        }
        current = next;
    }

    primes
}

/// A cover of `minterms` by prime implicants: essentials first, then greedy picks.
pub fn select_cover(primes: &[Implicant], minterms: &[u32]) -> Vec<Implicant> {
    let chart: BTreeMap<u32, Vec<usize>> = minterms
        .iter()
        .map(|&m| (m, (0..primes.len()).filter(|&p| primes[p].covers(m)).collect()))
        .collect();

    let mut selected: BTreeSet<usize> = BTreeSet::new();
    for covering in chart.values() {
        if let [only] = covering.as_slice() {
            selected.insert(*only);
        }
    }
    debug!("essential primes: {:?}", selected.iter().map(|&p| primes[p].to_string()).collect::<Vec<_>>());

    let is_covered = |m: u32, selected: &BTreeSet<usize>| selected.iter().any(|&p| primes[p].covers(m));
    let mut uncovered: BTreeSet<u32> = chart.keys().copied().filter(|&m| !is_covered(m, &selected)).collect();

    while !uncovered.is_empty() {
        let best = (0..primes.len())
            .filter(|p| !selected.contains(p))
            .map(|p| {
                let gain = uncovered.iter().filter(|&&m| primes[p].covers(m)).count();
                (p, gain)
            })
            .filter(|&(_, gain)| gain > 0)
            .min_by_key(|&(p, gain)| (std::cmp::Reverse(gain), primes[p].literal_count(), p));
        let Some((pick, _)) = best else {
            break;
        };
        debug!("greedy pick {}", primes[pick]);
        selected.insert(pick);
        uncovered.retain(|&m| !primes[pick].covers(m));
    }

    let mut cover: Vec<Implicant> = selected.into_iter().map(|p| primes[p].clone()).collect();
    cover.sort_by_key(|imp| imp.minterms.first().copied());
    cover
}

/// Minimal-ish sum of products for the function with the given true `minterms`.
pub fn minimize(minterms: &[u32], variables: &[String]) -> Expr {
    let primes = prime_implicants(minterms, variables.len());
    let cover = select_cover(&primes, minterms);
    sum_of_implicants(&cover, variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::eval;
    use crate::parse::parse;
    use crate::render::to_boolean_string;

    fn vars(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prime_implicants_textbook() {
        // f(A,B,C,D) = Σm(4, 8, 10, 11, 12, 15)
        let primes = prime_implicants(&[4, 8, 10, 11, 12, 15], 4);
        let mut printed: Vec<String> = primes.iter().map(|p| p.to_string()).collect();
        printed.sort();
        assert_eq!(printed, vec!["-100", "1-00", "1-11", "10-0", "101-"]);
    }

    #[test]
    fn test_essential_cover() {
        let v = vars(&["A", "B", "C"]);
        // A*!C + C*B: minterms 3, 4, 6, 7
        let expr = minimize(&[3, 4, 6, 7], &v);
        assert_eq!(to_boolean_string(&expr), "B*C+A*!C");
    }

    #[test]
    fn test_degenerate_functions() {
        let v = vars(&["A", "B"]);
        assert_eq!(minimize(&[], &v), Expr::zero());
        assert_eq!(minimize(&[0, 1, 2, 3], &v), Expr::one());
        assert_eq!(minimize(&[0], &[]), Expr::one());
    }

    #[test]
    fn test_cyclic_chart_is_covered() {
        // Σm(0, 1, 2, 5, 6, 7): no essential primes.
        let v = vars(&["A", "B", "C"]);
        let minterms = [0, 1, 2, 5, 6, 7];
        let expr = minimize(&minterms, &v);
        assert_eq!(eval::minterms(&expr, &v).unwrap(), minterms.to_vec());
    }

    #[test]
    fn test_five_variables() {
        let input = parse("A*B*!C + !A*D*E + B*C*D*!E + !B*!D + A*!E").unwrap();
        let v = input.variables();
        let minterms = eval::minterms(&input, &v).unwrap();
        let expr = minimize(&minterms, &v);
        for m in 0..32 {
            assert_eq!(
                eval::evaluate_minterm(&expr, &v, m),
                eval::evaluate_minterm(&input, &v, m),
                "minterm {}",
                m
            );
        }
    }
}
