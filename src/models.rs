use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

/// Biological sex, as used by the Mifflin-St Jeor equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(anyhow!("Unknown sex: {other} (expected male or female)")),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("male"),
            Sex::Female => f.write_str("female"),
        }
    }
}

/// What the user wants their weight to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Calorie deficit
    Cut,
    /// Calorie surplus
    Bulk,
    Maintain,
}

impl FromStr for Goal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cut" | "diet" => Ok(Goal::Cut),
            "bulk" | "gain" => Ok(Goal::Bulk),
            "maintain" | "maintenance" => Ok(Goal::Maintain),
            other => Err(anyhow!(
                "Unknown goal: {other} (expected cut, bulk or maintain)"
            )),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Cut => f.write_str("cut"),
            Goal::Bulk => f.write_str("bulk"),
            Goal::Maintain => f.write_str("maintain"),
        }
    }
}

/// Biometric inputs for a session. Rebuilt whenever the inputs change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years, 10..=100
    pub age: u32,
    pub sex: Sex,
    /// Height in cm, 100..=250
    pub height_cm: u32,
    /// Weight in kg, 30..=200
    pub weight_kg: u32,
    /// Allergens to exclude from suggestions
    pub allergies: BTreeSet<String>,
    pub goal: Goal,
}

impl UserProfile {
    pub const AGE_RANGE: (u32, u32) = (10, 100);
    pub const HEIGHT_RANGE: (u32, u32) = (100, 250);
    pub const WEIGHT_RANGE: (u32, u32) = (30, 200);

    /// Build a profile, rejecting values outside the accepted input domain.
    pub fn new(
        age: u32,
        sex: Sex,
        height_cm: u32,
        weight_kg: u32,
        allergies: BTreeSet<String>,
        goal: Goal,
    ) -> Result<Self> {
        check_range("age", age, Self::AGE_RANGE)?;
        check_range("height_cm", height_cm, Self::HEIGHT_RANGE)?;
        check_range("weight_kg", weight_kg, Self::WEIGHT_RANGE)?;

        Ok(Self {
            age,
            sex,
            height_cm,
            weight_kg,
            allergies,
            goal,
        })
    }
}

fn check_range(field: &str, value: u32, (min, max): (u32, u32)) -> Result<()> {
    if value < min || value > max {
        bail!("{field} must be between {min} and {max}, got {value}");
    }
    Ok(())
}

/// A food in the catalog. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub name: String,
    /// Calories (kcal) per serving
    pub calories: f64,
    /// Protein (g) per serving
    #[serde(rename = "protein")]
    pub protein_grams: f64,
    #[serde(default)]
    pub allergens: BTreeSet<String>,
}

impl FoodRecord {
    pub fn new(name: &str, calories: f64, protein_grams: f64, allergens: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            calories,
            protein_grams,
            allergens: allergens.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// True when none of this food's allergens appear in `excluded`.
    pub fn is_safe_for(&self, excluded: &BTreeSet<String>) -> bool {
        self.allergens.is_disjoint(excluded)
    }
}

/// How the calories of a user-submitted food are given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalorieSource {
    /// Calories entered directly (kcal)
    Direct(f64),
    /// Derived as carbs*4 + protein*4 + fat*9, grams each
    Macros { carbs: f64, protein: f64, fat: f64 },
}

impl CalorieSource {
    pub fn calories(&self) -> f64 {
        match *self {
            CalorieSource::Direct(kcal) => kcal,
            CalorieSource::Macros {
                carbs,
                protein,
                fat,
            } => (carbs * 4.0 + protein * 4.0 + fat * 9.0).round(),
        }
    }
}

/// A custom food as submitted by the user, before it becomes a `FoodRecord`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFood {
    pub name: String,
    pub source: CalorieSource,
    /// Protein (g). Ignored in favour of the macro value when `source` is `Macros`.
    pub protein: f64,
    pub allergens: BTreeSet<String>,
}

impl NewFood {
    /// Validate and turn the submission into a catalog record.
    pub fn into_record(self) -> Result<FoodRecord> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            bail!("Food name must not be empty");
        }

        let protein = match self.source {
            CalorieSource::Direct(kcal) => {
                if kcal < 0.0 || !kcal.is_finite() {
                    bail!("Calories must be a non-negative number, got {kcal}");
                }
                self.protein
            }
            CalorieSource::Macros {
                carbs,
                protein,
                fat,
            } => {
                for (label, grams) in [("carbs", carbs), ("protein", protein), ("fat", fat)] {
                    if grams < 0.0 || !grams.is_finite() {
                        bail!("{label} must be a non-negative number, got {grams}");
                    }
                }
                protein
            }
        };
        if protein < 0.0 || !protein.is_finite() {
            bail!("Protein must be a non-negative number, got {protein}");
        }

        Ok(FoodRecord {
            name,
            calories: self.source.calories(),
            protein_grams: (protein * 10.0).round() / 10.0,
            allergens: self
                .allergens
                .into_iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        })
    }
}

/// One day's intake in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Food names eaten, in the order they were entered
    pub meals: Vec<String>,
    /// Total calories (kcal)
    #[serde(rename = "intake")]
    pub intake_kcal: f64,
}

/// A meal of the day with its share of the daily calorie goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    /// Fraction of the daily goal assigned to this slot.
    pub fn share(&self) -> f64 {
        match self {
            MealSlot::Breakfast => 0.3,
            MealSlot::Lunch => 0.4,
            MealSlot::Dinner => 0.3,
        }
    }

    /// Slot calorie target, floored to whole kcal.
    pub fn target(&self, calorie_goal: f64) -> f64 {
        (self.share() * calorie_goal).floor()
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealSlot::Breakfast => f.write_str("breakfast"),
            MealSlot::Lunch => f.write_str("lunch"),
            MealSlot::Dinner => f.write_str("dinner"),
        }
    }
}

/// Truncate a kcal value for display, the way goals and averages are shown.
pub fn display_kcal(kcal: f64) -> i64 {
    kcal.trunc() as i64
}
