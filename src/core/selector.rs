//! Budget-constrained vendor combination search.
//!
//! The search is exhaustive: the full-coverage pass walks the Cartesian product
//! of all categories and the fallback walks `C(n, r)` subsets of the vendor pool
//! per coverage level, so cost grows exponentially with the number of
//! categories. A branch is cut early when it repeats a category, when even its
//! cheapest completion exceeds the budget, or when its best possible score
//! cannot strictly beat the best combo found so far. Neither cut changes which combo wins,
//! because a later combo only replaces the best on a strictly higher score.
//! [`SelectionLimits`] caps the work so callers fail fast instead of hanging on
//! large inputs.

use crate::core::grouping::group_by_service;
use crate::domain::model::{Combo, Coverage, Selection, ServiceGroup, Vendor};
use crate::utils::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionLimits {
    /// Largest number of distinct service categories accepted.
    pub max_categories: usize,
    /// Largest number of partial combos the search may examine.
    pub max_candidates: u64,
}

impl SelectionLimits {
    pub const DEFAULT_MAX_CATEGORIES: usize = 16;
    pub const DEFAULT_MAX_CANDIDATES: u64 = 2_000_000;
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            max_categories: Self::DEFAULT_MAX_CATEGORIES,
            max_candidates: Self::DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// Slack applied to the sorted-ceiling bound, which folds ratings in a
/// different order than the walk does and may round differently.
const ROUNDING_SLACK: f64 = 64.0 * f64::EPSILON;

struct Search<'a> {
    budget: u64,
    max_candidates: u64,
    visited: u64,
    /// Top rating of each category, in category order.
    tops: Vec<f64>,
    /// Top ratings of the categories after each category, highest first.
    later_tops: Vec<Vec<f64>>,
    /// Cheapest completion price of the categories after each category.
    floor_after: Vec<u64>,
    /// Lowest prices of the categories after each category, cheapest first.
    later_floors: Vec<Vec<u64>>,
    picked: Vec<&'a Vendor>,
    best: Option<(f64, Vec<&'a Vendor>)>,
}

impl<'a> Search<'a> {
    fn new(budget: u64, limits: &SelectionLimits, groups: &[&'a [Vendor]]) -> Self {
        let tops: Vec<f64> = groups
            .iter()
            .map(|vendors| vendors.first().map_or(0.0, |v| v.rating))
            .collect();
        let later_tops = (0..tops.len())
            .map(|category| {
                let mut later = tops[category + 1..].to_vec();
                later.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
                later
            })
            .collect();

        let floors: Vec<u64> = groups
            .iter()
            .map(|vendors| vendors.iter().map(|v| v.price).min().unwrap_or(0))
            .collect();
        let floor_after = (0..floors.len())
            .map(|category| {
                floors[category + 1..]
                    .iter()
                    .fold(0u64, |acc, floor| acc.saturating_add(*floor))
            })
            .collect();
        let later_floors = (0..floors.len())
            .map(|category| {
                let mut later = floors[category + 1..].to_vec();
                later.sort_unstable();
                later
            })
            .collect();

        Self {
            budget,
            max_candidates: limits.max_candidates,
            visited: 0,
            tops,
            later_tops,
            floor_after,
            later_floors,
            picked: Vec::new(),
            best: None,
        }
    }

    fn visit(&mut self) -> Result<()> {
        self.visited += 1;
        if self.visited > self.max_candidates {
            return Err(PlannerError::SearchLimitExceeded {
                limit: self.max_candidates,
            });
        }
        Ok(())
    }

    /// True when no completion scoring at most `bound` can replace the best.
    fn cannot_beat(&self, bound: f64) -> bool {
        matches!(&self.best, Some((best, _)) if bound <= *best)
    }

    /// Records the current pick if it strictly beats the best so far.
    fn offer(&mut self, score: f64) {
        let better = match &self.best {
            Some((best, _)) => score > *best,
            None => true,
        };
        if better {
            self.best = Some((score, self.picked.clone()));
        }
    }

    fn take_best(&mut self) -> Option<Combo> {
        self.best.take().map(|(_, picked)| {
            Combo::from_unique(picked.into_iter().cloned().collect())
        })
    }

    /// One vendor per category, last category varying fastest.
    ///
    /// Adding each category's top rating in walk order bounds every
    /// completion exactly, since rounded addition is monotone.
    fn product(
        &mut self,
        groups: &[&'a [Vendor]],
        depth: usize,
        price: u64,
        score: f64,
    ) -> Result<()> {
        if depth == groups.len() {
            self.offer(score);
            return Ok(());
        }

        for vendor in groups[depth] {
            self.visit()?;
            let next = price.saturating_add(vendor.price);
            if next.saturating_add(self.floor_after[depth]) > self.budget {
                continue;
            }
            let next_score = score + vendor.rating;
            let bound = self.tops[depth + 1..]
                .iter()
                .fold(next_score, |acc, top| acc + top);
            if self.cannot_beat(bound) {
                continue;
            }
            self.picked.push(vendor);
            self.product(groups, depth + 1, next, next_score)?;
            self.picked.pop();
        }
        Ok(())
    }

    /// Whether a subset that picks from `category` and still needs
    /// `remaining` vendors from later categories can neither fit the budget
    /// nor strictly beat the best score.
    fn subset_ruled_out(
        &self,
        category: usize,
        price: u64,
        score: f64,
        remaining: usize,
    ) -> bool {
        let floors = &self.later_floors[category];
        if floors.len() < remaining {
            return true;
        }
        let cheapest = floors[..remaining]
            .iter()
            .fold(price, |acc, floor| acc.saturating_add(*floor));
        if cheapest > self.budget {
            return true;
        }

        let later = &self.later_tops[category];
        let ceiling = later.first().copied().unwrap_or(0.0);
        let flat = (0..remaining).fold(score, |acc, _| acc + ceiling);
        let sorted = later
            .iter()
            .take(remaining)
            .fold(score, |acc, top| acc + top);
        self.cannot_beat(flat) || self.cannot_beat(sorted + sorted.abs() * ROUNDING_SLACK)
    }

    /// `remaining`-subsets of `pool[start..]` in lexicographic index order,
    /// skipping any that would repeat a category.
    fn subsets(
        &mut self,
        pool: &[(usize, &'a Vendor)],
        used: &mut [bool],
        start: usize,
        remaining: usize,
        price: u64,
        score: f64,
    ) -> Result<()> {
        if remaining == 0 {
            self.offer(score);
            return Ok(());
        }
        if pool.len() < start + remaining {
            return Ok(());
        }

        for i in start..=pool.len() - remaining {
            let (category, vendor) = pool[i];
            if used[category] {
                continue;
            }
            self.visit()?;
            let next = price.saturating_add(vendor.price);
            let next_score = score + vendor.rating;
            // Picks run in category order, so the rest come from later categories.
            if self.subset_ruled_out(category, next, next_score, remaining - 1) {
                continue;
            }
            used[category] = true;
            self.picked.push(vendor);
            self.subsets(pool, used, i + 1, remaining - 1, next, next_score)?;
            self.picked.pop();
            used[category] = false;
        }
        Ok(())
    }
}

fn check_category_limit(groups: &ServiceGroup, limits: &SelectionLimits) -> Result<()> {
    if groups.len() > limits.max_categories {
        return Err(PlannerError::TooManyCategories {
            count: groups.len(),
            max: limits.max_categories,
        });
    }
    Ok(())
}

/// Picks the highest-rated combo whose total price fits `budget`.
///
/// A combo covering every category is preferred; otherwise the largest
/// coverage level with any affordable combo wins. Equal scores keep the
/// first combo found.
pub fn select(vendors: &[Vendor], budget: u64, limits: &SelectionLimits) -> Result<Selection> {
    let groups = group_by_service(vendors);
    select_from_groups(&groups, budget, limits)
}

pub fn select_from_groups(
    groups: &ServiceGroup,
    budget: u64,
    limits: &SelectionLimits,
) -> Result<Selection> {
    if groups.is_empty() {
        return Ok(Selection::empty());
    }
    check_category_limit(groups, limits)?;

    let lists: Vec<&[Vendor]> = groups.iter().map(|(_, vendors)| vendors).collect();
    let mut search = Search::new(budget, limits, &lists);

    search.product(&lists, 0, 0, 0.0)?;
    if let Some(combo) = search.take_best() {
        tracing::debug!(
            "Full-coverage combo found: {} vendors, total {}, score {:.2} ({} candidates)",
            combo.len(),
            combo.total_price(),
            combo.total_score(),
            search.visited
        );
        return Ok(Selection {
            combo,
            coverage: Coverage::Full,
        });
    }

    tracing::debug!(
        "No full-coverage combo fits budget {}, trying fewer categories",
        budget
    );

    let pool: Vec<(usize, &Vendor)> = lists
        .iter()
        .enumerate()
        .flat_map(|(category, vendors)| vendors.iter().map(move |v| (category, v)))
        .collect();
    let mut used = vec![false; lists.len()];

    for r in (1..=lists.len()).rev() {
        search.subsets(&pool, &mut used, 0, r, 0, 0.0)?;
        if let Some(combo) = search.take_best() {
            tracing::debug!(
                "Partial combo found covering {} of {} categories ({} candidates)",
                r,
                lists.len(),
                search.visited
            );
            let coverage = if r == lists.len() {
                Coverage::Full
            } else {
                Coverage::Partial { categories: r }
            };
            return Ok(Selection { combo, coverage });
        }
    }

    tracing::debug!("No vendor fits budget {}", budget);
    Ok(Selection::empty())
}

pub fn select_best(vendors: &[Vendor], budget: u64, limits: &SelectionLimits) -> Result<Combo> {
    select(vendors, budget, limits).map(|selection| selection.combo)
}

/// The best combo when budget is no obstacle ("closest possible set").
///
/// Every non-empty input has a full-coverage combo, so the widest coverage
/// level always succeeds, and its best member takes the top-ranked vendor of
/// each category. Ties resolve to the earliest-ranked vendor, the same one
/// an in-order enumeration would keep.
pub fn best_unconstrained(vendors: &[Vendor]) -> Combo {
    best_unconstrained_from_groups(&group_by_service(vendors))
}

pub fn best_unconstrained_from_groups(groups: &ServiceGroup) -> Combo {
    let picks: Vec<Vendor> = groups
        .iter()
        .filter_map(|(_, vendors)| vendors.first().cloned())
        .collect();
    Combo::from_unique(picks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor(name: &str, service: &str, price: u64, rating: f64) -> Vendor {
        Vendor::new(name, service, "Bangalore", price, rating)
    }

    fn names(combo: &Combo) -> Vec<&str> {
        let mut names: Vec<&str> = combo.vendors().iter().map(|v| v.name.as_str()).collect();
        names.sort();
        names
    }

    fn sample() -> Vec<Vendor> {
        vec![
            vendor("A", "Venue", 50_000, 4.5),
            vendor("B", "Venue", 30_000, 4.0),
            vendor("C", "Catering", 40_000, 4.8),
            vendor("D", "Catering", 20_000, 4.2),
        ]
    }

    #[test]
    fn test_full_coverage_best_score() {
        let selection = select(&sample(), 90_000, &SelectionLimits::default()).unwrap();
        assert_eq!(selection.coverage, Coverage::Full);
        assert_eq!(names(&selection.combo), vec!["A", "C"]);
        assert_eq!(selection.combo.total_price(), 90_000);
        assert!((selection.combo.total_score() - 9.3).abs() < 1e-9);
    }

    #[test]
    fn test_cheapest_full_combo_at_exact_budget() {
        // B + D costs exactly 50 000, so full coverage still succeeds.
        let selection = select(&sample(), 50_000, &SelectionLimits::default()).unwrap();
        assert_eq!(selection.coverage, Coverage::Full);
        assert_eq!(names(&selection.combo), vec!["B", "D"]);
    }

    #[test]
    fn test_fallback_to_single_vendor() {
        let selection = select(&sample(), 45_000, &SelectionLimits::default()).unwrap();
        assert_eq!(selection.coverage, Coverage::Partial { categories: 1 });
        assert_eq!(names(&selection.combo), vec!["C"]);
    }

    #[test]
    fn test_budget_below_every_price_is_empty() {
        let limits = SelectionLimits::default();
        assert!(select_best(&sample(), 0, &limits).unwrap().is_empty());
        let selection = select(&sample(), 19_999, &limits).unwrap();
        assert_eq!(selection.coverage, Coverage::Empty);
        assert!(selection.combo.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let limits = SelectionLimits::default();
        assert!(select_best(&[], 100_000, &limits).unwrap().is_empty());
        assert!(best_unconstrained(&[]).is_empty());
    }

    #[test]
    fn test_full_coverage_tie_keeps_first_in_product_order() {
        let vendors = vec![
            vendor("V1", "Venue", 100, 4.5),
            vendor("V2", "Venue", 50, 4.0),
            vendor("C1", "Catering", 100, 4.5),
            vendor("C2", "Catering", 50, 4.0),
        ];
        // (V1, C2) and (V2, C1) both score 8.5 at 150; V1 is ranked first.
        let combo = select_best(&vendors, 150, &SelectionLimits::default()).unwrap();
        assert_eq!(names(&combo), vec!["C2", "V1"]);
    }

    #[test]
    fn test_partial_tie_keeps_first_in_pool_order() {
        let vendors = vec![
            vendor("Hall", "Venue", 100, 4.0),
            vendor("Feast", "Catering", 100, 4.0),
            vendor("Sweet", "Cake", 100, 4.0),
        ];
        let selection = select(&vendors, 250, &SelectionLimits::default()).unwrap();
        assert_eq!(selection.coverage, Coverage::Partial { categories: 2 });
        assert_eq!(names(&selection.combo), vec!["Feast", "Hall"]);
    }

    #[test]
    fn test_fallback_prefers_coverage_over_score() {
        let vendors = vec![
            vendor("Palace", "Venue", 900, 5.0),
            vendor("Hall", "Venue", 300, 2.0),
            vendor("Feast", "Catering", 300, 2.0),
            vendor("Sweet", "Cake", 500, 1.0),
        ];
        // Hall + Feast (2 categories, score 4.0) beats Palace alone (score 5.0).
        let selection = select(&vendors, 900, &SelectionLimits::default()).unwrap();
        assert_eq!(selection.coverage, Coverage::Partial { categories: 2 });
        assert_eq!(names(&selection.combo), vec!["Feast", "Hall"]);
    }

    #[test]
    fn test_zero_price_vendor_fits_zero_budget() {
        let vendors = vec![
            vendor("Free", "Decoration", 0, 3.0),
            vendor("Paid", "Venue", 10, 4.0),
        ];
        let selection = select(&vendors, 0, &SelectionLimits::default()).unwrap();
        assert_eq!(names(&selection.combo), vec!["Free"]);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let limits = SelectionLimits::default();
        let first = select(&sample(), 70_000, &limits).unwrap();
        let second = select(&sample(), 70_000, &limits).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_too_many_categories() {
        let vendors: Vec<Vendor> = (0..5)
            .map(|i| vendor(&format!("V{}", i), &format!("S{}", i), 10, 1.0))
            .collect();
        let limits = SelectionLimits {
            max_categories: 4,
            ..SelectionLimits::default()
        };
        let err = select(&vendors, 100, &limits).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::TooManyCategories { count: 5, max: 4 }
        ));
    }

    #[test]
    fn test_candidate_limit_fails_fast() {
        let vendors: Vec<Vendor> = (0..24)
            .map(|i| vendor(&format!("V{}", i), &format!("S{}", i % 6), 100, 1.0))
            .collect();
        let limits = SelectionLimits {
            max_categories: 16,
            max_candidates: 50,
        };
        // Budget rules out full coverage, so the walk keeps widening.
        let err = select(&vendors, 250, &limits).unwrap_err();
        assert!(matches!(err, PlannerError::SearchLimitExceeded { limit: 50 }));
    }

    /// Distinct ratings within each category, between 3.0 and 4.8.
    fn spread_rating(category: usize, offer: usize) -> f64 {
        3.0 + ((category * 7 + offer * 3) % 10) as f64 / 5.0
    }

    fn wide_catalog(rating: impl Fn(usize, usize) -> f64) -> Vec<Vendor> {
        let mut vendors = Vec::new();
        for category in 0..9 {
            for offer in 0..5 {
                vendors.push(vendor(
                    &format!("S{}-{}", category, offer),
                    &format!("S{}", category),
                    1_000 + (offer as u64) * 250,
                    rating(category, offer),
                ));
            }
        }
        vendors
    }

    #[test]
    fn test_generous_budget_over_nine_categories_stays_within_default_limits() {
        let vendors = wide_catalog(spread_rating);
        let selection = select(&vendors, 10_000_000, &SelectionLimits::default()).unwrap();

        assert_eq!(selection.coverage, Coverage::Full);
        assert_eq!(selection.combo, best_unconstrained(&vendors));
    }

    #[test]
    fn test_equal_ratings_over_nine_categories_keep_first_product() {
        let vendors = wide_catalog(|_, _| 4.0);
        let selection = select(&vendors, 10_000_000, &SelectionLimits::default()).unwrap();

        assert_eq!(selection.coverage, Coverage::Full);
        // Equal ratings rank by price, so each category's cheapest offer comes first.
        assert!(selection.combo.vendors().iter().all(|v| v.name.ends_with("-0")));
        assert_eq!(selection.combo.total_price(), 9_000);
    }

    #[test]
    fn test_fallback_over_nine_categories_stays_within_default_limits() {
        let vendors = wide_catalog(spread_rating);
        // 8 000 covers eight of the cheapest offers but not nine.
        let selection = select(&vendors, 8_000, &SelectionLimits::default()).unwrap();

        assert_eq!(selection.coverage, Coverage::Partial { categories: 8 });
        assert!(selection.combo.total_price() <= 8_000);
        assert_eq!(selection.combo.len(), 8);
    }

    #[test]
    fn test_best_unconstrained_takes_top_of_each_category() {
        let combo = best_unconstrained(&sample());
        assert_eq!(names(&combo), vec!["A", "C"]);
        assert_eq!(combo.total_price(), 90_000);
    }

    #[test]
    fn test_best_unconstrained_matches_exhaustive_search() {
        let vendors = vec![
            vendor("A", "Venue", 500, 4.5),
            vendor("B", "Venue", 300, 4.5),
            vendor("C", "Catering", 400, 3.9),
            vendor("D", "Cake", 100, 4.9),
            vendor("E", "Cake", 50, 4.9),
        ];
        let unbounded = SelectionLimits {
            max_categories: 16,
            max_candidates: u64::MAX,
        };
        let searched = select_best(&vendors, u64::MAX, &unbounded).unwrap();
        assert_eq!(best_unconstrained(&vendors), searched);
        // Equal ratings: cheaper vendor ranks first.
        assert_eq!(names(&searched), vec!["B", "C", "E"]);
    }
}
