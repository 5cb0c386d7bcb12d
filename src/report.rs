use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;

use crate::ledger::IntakeLedger;
use crate::models::display_kcal;

/// Days shown in the weekly summary.
pub const SUMMARY_DAYS: usize = 7;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayIntake {
    pub date: NaiveDate,
    pub intake_kcal: f64,
}

/// Recent intake compared against the calorie goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub days: Vec<DayIntake>,
    pub calorie_goal: f64,
    pub average_kcal: f64,
}

impl WeeklySummary {
    /// `None` when the ledger has no entries.
    pub fn from_ledger(ledger: &IntakeLedger, calorie_goal: f64, days: usize) -> Option<Self> {
        let average_kcal = ledger.average_intake(days)?;
        let recent = ledger.recent_days(days);

        Some(Self {
            days: recent
                .into_iter()
                .map(|(date, intake_kcal)| DayIntake { date, intake_kcal })
                .collect(),
            calorie_goal,
            average_kcal,
        })
    }

    /// Horizontal bar chart, one row per day. `|` marks the goal.
    pub fn render_chart(&self) -> String {
        let max = self
            .days
            .iter()
            .map(|d| d.intake_kcal)
            .fold(self.calorie_goal, f64::max)
            .max(1.0);
        let scale = |kcal: f64| ((kcal.max(0.0) / max) * BAR_WIDTH as f64).round() as usize;
        let goal_col = scale(self.calorie_goal).min(BAR_WIDTH);

        let mut out = String::new();
        for day in &self.days {
            let len = scale(day.intake_kcal);
            let mut row: Vec<char> = (0..=BAR_WIDTH)
                .map(|i| if i < len { '#' } else { ' ' })
                .collect();
            row[goal_col] = '|';
            let bar: String = row.into_iter().collect();
            let _ = writeln!(
                out,
                "{} {} {:>6}",
                day.date.format("%Y-%m-%d"),
                bar,
                display_kcal(day.intake_kcal)
            );
        }
        let _ = writeln!(out, "goal: {} kcal (|)", display_kcal(self.calorie_goal));
        let _ = writeln!(
            out,
            "{}-day average: {} kcal",
            self.days.len(),
            display_kcal(self.average_kcal)
        );
        out
    }
}
