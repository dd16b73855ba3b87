//! Budget-window meal filter.
//!
//! A recommendation is every catalog entry for the requested condition whose
//! cost falls inside a closed ±20% window around the budget. Results keep
//! catalog order.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{HealthCondition, MealEntry, CATALOG};
use crate::error::RecommendError;

/// Smallest accepted budget, in naira.
pub const MIN_BUDGET: u32 = 1000;

/// Largest accepted budget, in naira.
pub const MAX_BUDGET: u32 = 10000;

/// Budget used when nothing else is configured.
pub const DEFAULT_BUDGET: u32 = 3000;

/// Fine step for interactive budget adjustment.
pub const BUDGET_STEP: u32 = 100;

/// Coarse step for interactive budget adjustment.
pub const BUDGET_PAGE_STEP: u32 = 1000;

const WINDOW_LOW: f64 = 0.8;
const WINDOW_HIGH: f64 = 1.2;

/// A budget known to be within `[MIN_BUDGET, MAX_BUDGET]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Budget(u32);

impl Budget {
    /// Validate a raw amount.
    pub fn new(amount: i64) -> Result<Self, RecommendError> {
        if (i64::from(MIN_BUDGET)..=i64::from(MAX_BUDGET)).contains(&amount) {
            Ok(Self(amount as u32))
        } else {
            Err(RecommendError::InvalidBudget(amount))
        }
    }

    /// Pull any amount into range. Used by widgets that step the budget.
    pub fn clamped(amount: i64) -> Self {
        Self(amount.clamp(i64::from(MIN_BUDGET), i64::from(MAX_BUDGET)) as u32)
    }

    pub fn amount(&self) -> u32 {
        self.0
    }

    /// Step by `delta` naira, staying in range.
    pub fn step(&self, delta: i64) -> Self {
        Self::clamped(i64::from(self.0) + delta)
    }

    pub fn window(&self) -> BudgetWindow {
        let budget = f64::from(self.0);
        BudgetWindow {
            low: budget * WINDOW_LOW,
            high: budget * WINDOW_HIGH,
        }
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self(DEFAULT_BUDGET)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed cost range `[low, high]` accepted for a budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetWindow {
    pub low: f64,
    pub high: f64,
}

impl BudgetWindow {
    pub fn contains(&self, cost: u32) -> bool {
        let cost = f64::from(cost);
        cost >= self.low && cost <= self.high
    }
}

/// What the presentation layer shows for one matching meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub meal: String,
    pub cost: u32,
    pub avoid: String,
}

impl From<&MealEntry> for Recommendation {
    fn from(entry: &MealEntry) -> Self {
        Self {
            meal: entry.meal.to_string(),
            cost: entry.cost,
            avoid: entry.avoid.to_string(),
        }
    }
}

/// Select catalog entries for `condition` whose cost is inside the budget window.
pub fn recommend(condition: HealthCondition, budget: Budget) -> Vec<&'static MealEntry> {
    let window = budget.window();
    let matches: Vec<&'static MealEntry> = CATALOG
        .iter()
        .filter(|e| e.condition == condition && window.contains(e.cost))
        .collect();

    debug!(
        condition = %condition,
        budget = budget.amount(),
        matches = matches.len(),
        "Filtered catalog"
    );
    matches
}

/// Validate raw UI/CLI inputs, then filter.
pub fn recommend_labels(
    condition: &str,
    budget: i64,
) -> Result<Vec<Recommendation>, RecommendError> {
    let condition: HealthCondition = condition.parse()?;
    let budget = Budget::new(budget)?;
    Ok(recommend(condition, budget)
        .into_iter()
        .map(Recommendation::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costs(condition: HealthCondition, budget: i64) -> Vec<u32> {
        let budget = Budget::new(budget).unwrap();
        recommend(condition, budget).iter().map(|e| e.cost).collect()
    }

    #[test]
    fn test_hypertension_4000() {
        let budget = Budget::new(4000).unwrap();
        let window = budget.window();
        assert_eq!(window.low, 3200.0);
        assert_eq!(window.high, 4800.0);

        let meals: Vec<&str> = recommend(HealthCondition::Hypertension, budget)
            .iter()
            .map(|e| e.meal)
            .collect();
        assert_eq!(
            meals,
            vec!["Eba & Egusi Soup", "Vegetable Soup & Fish", "Boiled Yam & Sauce"]
        );
        assert_eq!(costs(HealthCondition::Hypertension, 4000), vec![4000, 3500, 3800]);
    }

    #[test]
    fn test_celiac_1000_is_empty() {
        assert!(costs(HealthCondition::Celiac, 1000).is_empty());
    }

    #[test]
    fn test_window_endpoints_are_included() {
        // 2500 -> [2000, 3000]: 3000 sits on the upper edge
        assert_eq!(costs(HealthCondition::Ulcer, 2500), vec![3000, 2800]);
        // 3500 -> [2800, 4200]: 2800 sits on the lower edge
        assert_eq!(costs(HealthCondition::Ulcer, 3500), vec![3000, 2800, 3200]);
    }

    #[test]
    fn test_just_outside_window_is_excluded() {
        // 2400 -> [1920, 2880]: 3000 and 3200 fall above
        assert_eq!(costs(HealthCondition::Ulcer, 2400), vec![2800]);
    }

    #[test]
    fn test_membership_matches_window_for_all_budgets() {
        for entry in CATALOG.iter() {
            for amount in (MIN_BUDGET..=MAX_BUDGET).step_by(BUDGET_STEP as usize) {
                let budget = Budget::new(i64::from(amount)).unwrap();
                let b = f64::from(amount);
                let cost = f64::from(entry.cost);
                let expected = 0.8 * b <= cost && cost <= 1.2 * b;
                let found = recommend(entry.condition, budget)
                    .iter()
                    .any(|e| std::ptr::eq(*e, entry));
                assert_eq!(found, expected, "{} at budget {}", entry.meal, amount);
            }
        }
    }

    #[test]
    fn test_never_returns_other_conditions() {
        for condition in HealthCondition::ALL {
            for amount in (MIN_BUDGET..=MAX_BUDGET).step_by(BUDGET_PAGE_STEP as usize) {
                let budget = Budget::new(i64::from(amount)).unwrap();
                assert!(recommend(condition, budget)
                    .iter()
                    .all(|e| e.condition == condition));
            }
        }
    }

    #[test]
    fn test_results_keep_catalog_order_and_repeat() {
        let budget = Budget::new(4500).unwrap();
        let first = recommend(HealthCondition::HighCholesterol, budget);
        let second = recommend(HealthCondition::HighCholesterol, budget);
        assert_eq!(first, second);

        let costs: Vec<u32> = first.iter().map(|e| e.cost).collect();
        assert_eq!(costs, vec![4400, 4500, 4600]);
    }

    #[test]
    fn test_budget_new_bounds() {
        assert!(Budget::new(1000).is_ok());
        assert!(Budget::new(10000).is_ok());
        assert_eq!(Budget::new(999), Err(RecommendError::InvalidBudget(999)));
        assert_eq!(Budget::new(10001), Err(RecommendError::InvalidBudget(10001)));
        assert_eq!(Budget::new(-5), Err(RecommendError::InvalidBudget(-5)));
    }

    #[test]
    fn test_budget_clamped_and_step() {
        assert_eq!(Budget::clamped(0).amount(), MIN_BUDGET);
        assert_eq!(Budget::clamped(50_000).amount(), MAX_BUDGET);
        assert_eq!(Budget::default().amount(), 3000);

        let b = Budget::default();
        assert_eq!(b.step(100).amount(), 3100);
        assert_eq!(b.step(-1000).amount(), 2000);
        assert_eq!(Budget::new(1000).unwrap().step(-100).amount(), 1000);
        assert_eq!(Budget::new(9950).unwrap().step(100).amount(), 10000);
    }

    #[test]
    fn test_recommend_labels() {
        let recs = recommend_labels("Hypertension", 4000).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(
            recs[0],
            Recommendation {
                meal: "Eba & Egusi Soup".to_string(),
                cost: 4000,
                avoid: "High salt".to_string(),
            }
        );
    }

    #[test]
    fn test_recommend_labels_rejects_before_filtering() {
        assert_eq!(
            recommend_labels("Gout", 4000),
            Err(RecommendError::InvalidCondition("Gout".to_string()))
        );
        assert_eq!(
            recommend_labels("Celiac", 20000),
            Err(RecommendError::InvalidBudget(20000))
        );
    }

    #[test]
    fn test_recommendation_serializes() {
        let rec = Recommendation::from(&CATALOG[18]);
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"meal":"Plantain Porridge","cost":3600,"avoid":"Milk"}"#);
    }
}
