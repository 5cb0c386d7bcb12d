//! Calorie goals from biometrics, allergen-aware meal suggestions and a
//! date-keyed intake log.

pub mod calculator;
pub mod catalog;
pub mod config;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod planner;
pub mod recommender;
pub mod report;
pub mod store;

pub use catalog::FoodCatalog;
pub use config::Config;
pub use ledger::{IntakeLedger, LedgerStore};
pub use models::*;
pub use planner::DietPlanner;
