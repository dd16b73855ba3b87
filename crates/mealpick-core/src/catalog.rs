//! Static meal catalog.
//!
//! The catalog is a fixed table of 30 meals, three for each of the ten
//! recognised health conditions. It is never mutated at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecommendError;

/// Health condition a meal is suited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthCondition {
    Diabetes,
    Hypertension,
    HeartDisease,
    KidneyDisease,
    Ulcer,
    Ibs,
    LactoseIntolerance,
    Celiac,
    Obesity,
    HighCholesterol,
}

impl HealthCondition {
    /// All conditions in menu order.
    pub const ALL: [HealthCondition; 10] = [
        HealthCondition::Diabetes,
        HealthCondition::Hypertension,
        HealthCondition::HeartDisease,
        HealthCondition::KidneyDisease,
        HealthCondition::Ulcer,
        HealthCondition::Ibs,
        HealthCondition::LactoseIntolerance,
        HealthCondition::Celiac,
        HealthCondition::Obesity,
        HealthCondition::HighCholesterol,
    ];

    /// Get the display label for this condition.
    pub fn label(&self) -> &'static str {
        match self {
            HealthCondition::Diabetes => "Diabetes",
            HealthCondition::Hypertension => "Hypertension",
            HealthCondition::HeartDisease => "Heart Disease",
            HealthCondition::KidneyDisease => "Kidney Disease",
            HealthCondition::Ulcer => "Ulcer",
            HealthCondition::Ibs => "IBS",
            HealthCondition::LactoseIntolerance => "Lactose Intolerance",
            HealthCondition::Celiac => "Celiac",
            HealthCondition::Obesity => "Obesity",
            HealthCondition::HighCholesterol => "High Cholesterol",
        }
    }

    /// Position of this condition in `ALL`.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Get the next condition (wrapping around)
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Get the previous condition (wrapping around)
    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for HealthCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HealthCondition {
    type Err = RecommendError;

    /// Labels are matched ignoring ASCII case and surrounding whitespace,
    /// so "heart disease" and "Heart Disease" both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RecommendError::InvalidCondition(s.to_string()))
    }
}

/// One row of the meal catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MealEntry {
    pub meal: &'static str,
    pub condition: HealthCondition,
    /// Cost in naira.
    pub cost: u32,
    pub avoid: &'static str,
}

const fn entry(
    meal: &'static str,
    condition: HealthCondition,
    cost: u32,
    avoid: &'static str,
) -> MealEntry {
    MealEntry {
        meal,
        condition,
        cost,
        avoid,
    }
}

/// The full catalog, in display order.
pub static CATALOG: [MealEntry; 30] = {
    use HealthCondition::*;
    [
        entry("Oatmeal with Fruits", Diabetes, 5000, "Sugary foods"),
        entry("Beans and Plantain", Diabetes, 4000, "Fried foods"),
        entry("Brown Rice & Vegetable", Diabetes, 4500, "Excess oil"),
        entry("Eba & Egusi Soup", Hypertension, 4000, "High salt"),
        entry("Vegetable Soup & Fish", Hypertension, 3500, "Processed foods"),
        entry("Boiled Yam & Sauce", Hypertension, 3800, "Sugary drinks"),
        entry("Grilled Fish & Veggies", HeartDisease, 4200, "Fried foods"),
        entry("Boiled Plantain & Beans", HeartDisease, 3900, "High fat"),
        entry("Oats & Milk", HeartDisease, 3600, "Processed snacks"),
        entry("Moi Moi & Vegetable", KidneyDisease, 5000, "Too much protein"),
        entry("Yam Porridge", KidneyDisease, 4800, "High salt"),
        entry("Okra Soup & Eba", KidneyDisease, 4700, "Sugary foods"),
        entry("Boiled Rice & Stew", Ulcer, 3000, "Spicy foods"),
        entry("Pap & Moi Moi", Ulcer, 2800, "Fried foods"),
        entry("Vegetable Porridge", Ulcer, 3200, "Acidic foods"),
        entry("Rice & Grilled Chicken", Ibs, 3400, "High fat"),
        entry("Oatmeal & Banana", Ibs, 3100, "Dairy"),
        entry("Eba & Vegetable Soup", Ibs, 3300, "Spicy foods"),
        entry("Plantain Porridge", LactoseIntolerance, 3600, "Milk"),
        entry("Vegetable Soup & Fish", LactoseIntolerance, 3500, "Cheese"),
        entry("Jollof Rice & Chicken", LactoseIntolerance, 3700, "Butter"),
        entry("Brown Rice & Beans", Celiac, 3800, "Wheat"),
        entry("Vegetable Salad & Fish", Celiac, 3900, "Bread"),
        entry("Yam & Egg Sauce", Celiac, 4000, "Pasta"),
        entry("Vegetable Soup & Fish", Obesity, 4100, "Fried foods"),
        entry("Boiled Yam & Beans", Obesity, 4200, "Sugary snacks"),
        entry("Oatmeal & Fruit Salad", Obesity, 4300, "High calorie foods"),
        entry("Grilled Chicken & Salad", HighCholesterol, 4400, "Fried foods"),
        entry("Vegetable Soup & Fish", HighCholesterol, 4500, "Red meat"),
        entry("Beans & Plantain", HighCholesterol, 4600, "High fat foods"),
    ]
};
