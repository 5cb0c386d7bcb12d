use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::LedgerEntry;
use crate::store::JsonStore;

/// Daily intake keyed by date. At most one entry per date.
///
/// Serialized as `{"YYYY-MM-DD": {"meals": [...], "intake": kcal}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntakeLedger {
    entries: BTreeMap<NaiveDate, LedgerEntry>,
}

impl IntakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite the entry for `date`.
    pub fn record_day(&mut self, date: NaiveDate, meals: Vec<String>, intake_kcal: f64) {
        self.entries.insert(date, LedgerEntry { meals, intake_kcal });
    }

    pub fn get(&self, date: NaiveDate) -> Option<&LedgerEntry> {
        self.entries.get(&date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most recent days, oldest first.
    pub fn recent_days(&self, n: usize) -> Vec<(NaiveDate, f64)> {
        let mut days: Vec<(NaiveDate, f64)> = self
            .entries
            .iter()
            .rev()
            .take(n)
            .map(|(date, entry)| (*date, entry.intake_kcal))
            .collect();
        days.reverse();
        days
    }

    /// Mean intake over the `n` most recent days, if there are any.
    pub fn average_intake(&self, n: usize) -> Option<f64> {
        let days = self.recent_days(n);
        if days.is_empty() {
            return None;
        }
        Some(days.iter().map(|(_, kcal)| kcal).sum::<f64>() / days.len() as f64)
    }
}

/// The ledger file.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    store: JsonStore,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
        }
    }

    /// Never fails; an absent or unreadable file is an empty ledger.
    pub async fn load(&self) -> IntakeLedger {
        self.store.load().await
    }

    pub async fn save(&self, ledger: &IntakeLedger) -> Result<()> {
        self.store.save(ledger).await
    }

    /// Load, set the entry for `date`, save. Returns the updated ledger.
    ///
    /// A ledger file that cannot be parsed is moved to `<name>.bak` before
    /// the fresh one is written, so its history is not overwritten.
    pub async fn record_day(
        &self,
        date: NaiveDate,
        meals: Vec<String>,
        intake_kcal: f64,
    ) -> Result<IntakeLedger> {
        let mut ledger = match self.store.try_load().await {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!(error = %e, "ledger unusable, starting a new one");
                self.store.back_up().await?;
                IntakeLedger::default()
            }
        };
        ledger.record_day(date, meals, intake_kcal);
        self.save(&ledger).await?;
        Ok(ledger)
    }
}
