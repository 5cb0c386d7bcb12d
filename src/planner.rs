use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::FoodCatalog;
use crate::config::Config;
use crate::ledger::{IntakeLedger, LedgerStore};
use crate::models::{FoodRecord, NewFood, UserProfile};
use crate::recommender::{recommend_day, DayPlan};
use crate::report::{WeeklySummary, SUMMARY_DAYS};
use crate::store::JsonStore;

/// Result of logging a day's meals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeOutcome {
    pub date: NaiveDate,
    /// Names that matched the catalog, in entry order
    pub meals: Vec<String>,
    pub intake_kcal: f64,
    /// Names with no catalog entry; left out of the total
    pub unknown: Vec<String>,
}

/// Owns the food catalog and the two stores for one session.
pub struct DietPlanner {
    catalog: FoodCatalog,
    foods: JsonStore,
    ledger: LedgerStore,
}

impl DietPlanner {
    /// Open the stores named by `config` and load saved custom foods.
    pub async fn open(config: &Config) -> Self {
        let foods = JsonStore::new(config.foods_path());
        let custom: Vec<FoodRecord> = foods.load().await;
        let catalog = FoodCatalog::with_custom(custom);
        Self {
            catalog,
            foods,
            ledger: LedgerStore::new(config.ledger_path()),
        }
    }

    pub fn catalog(&self) -> &FoodCatalog {
        &self.catalog
    }

    /// Catalog foods that contain none of `allergies`.
    pub fn safe_foods(&self, allergies: &BTreeSet<String>) -> Vec<FoodRecord> {
        self.catalog.filter_by_allergens(allergies)
    }

    /// Add a custom food and persist the custom part of the catalog.
    pub async fn add_food(&mut self, food: NewFood) -> Result<FoodRecord> {
        let record = food.into_record()?;
        if self.catalog.find(&record.name).is_some() {
            warn!(name = %record.name, "duplicate food name; lookups keep the first entry");
        }

        // The catalog only changes once the save succeeds.
        let mut custom = self.catalog.custom().to_vec();
        custom.push(record.clone());
        self.foods
            .save(&custom)
            .await
            .context("Failed to save custom foods")?;
        let added = self.catalog.add_food(record).clone();

        info!(name = %added.name, calories = added.calories, "added food");
        Ok(added)
    }

    /// Breakfast, lunch and dinner suggestions for `profile`.
    pub fn recommend<R: Rng + ?Sized>(&self, profile: &UserProfile, rng: &mut R) -> DayPlan {
        let foods = self.safe_foods(&profile.allergies);
        recommend_day(&foods, profile.calorie_goal(), rng)
    }

    /// Sum the named foods and store them as the entry for `date`,
    /// replacing any entry already there.
    pub async fn log_intake<S: AsRef<str>>(
        &self,
        date: NaiveDate,
        names: &[S],
    ) -> Result<IntakeOutcome> {
        let (found, unknown) = self.catalog.resolve(names);
        for name in &unknown {
            warn!(%name, "not in the catalog; register it first. Skipped");
        }

        let meals: Vec<String> = found.iter().map(|f| f.name.clone()).collect();
        let intake_kcal = found.iter().map(|f| f.calories).sum();

        self.ledger
            .record_day(date, meals.clone(), intake_kcal)
            .await
            .context("Failed to save intake ledger")?;

        Ok(IntakeOutcome {
            date,
            meals,
            intake_kcal,
            unknown,
        })
    }

    pub async fn ledger(&self) -> IntakeLedger {
        self.ledger.load().await
    }

    /// Last seven logged days against the profile's calorie goal.
    pub async fn weekly_summary(&self, profile: &UserProfile) -> Option<WeeklySummary> {
        self.summary(profile.calorie_goal(), SUMMARY_DAYS).await
    }

    pub async fn summary(&self, calorie_goal: f64, days: usize) -> Option<WeeklySummary> {
        let ledger = self.ledger.load().await;
        WeeklySummary::from_ledger(&ledger, calorie_goal, days)
    }
}
