use std::collections::BTreeSet;

use chrono::NaiveDate;
use diet_planner::{
    display_kcal, CalorieSource, Config, DietPlanner, FoodRecord, Goal, MealSlot, NewFood, Sex,
    UserProfile,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn profile(allergies: &[&str], goal: Goal) -> UserProfile {
    UserProfile::new(
        25,
        Sex::Male,
        170,
        70,
        allergies.iter().map(|a| a.to_string()).collect(),
        goal,
    )
    .unwrap()
}

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn fresh_planner_has_defaults_only() {
    let dir = tempfile::tempdir().unwrap();
    let planner = DietPlanner::open(&Config::in_dir(dir.path())).await;

    assert_eq!(planner.catalog().len(), 8);
    assert!(planner.catalog().custom().is_empty());
    assert!(planner.ledger().await.is_empty());
}

#[tokio::test]
async fn maintain_profile_with_milk_allergy() {
    let dir = tempfile::tempdir().unwrap();
    let planner = DietPlanner::open(&Config::in_dir(dir.path())).await;
    let user = profile(&["milk"], Goal::Maintain);

    assert_eq!(user.calorie_goal(), 1642.5);
    assert_eq!(display_kcal(user.calorie_goal()), 1642);

    let safe: Vec<String> = planner
        .safe_foods(&user.allergies)
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert!(!safe.contains(&"milk".to_string()));
    assert!(!safe.contains(&"greek yogurt".to_string()));
    assert!(safe.contains(&"egg".to_string()));
    assert!(safe.contains(&"tofu".to_string()));

    let plan = planner.recommend(&user, &mut StdRng::seed_from_u64(3));
    assert_eq!(plan.slots.len(), 3);
    for slot in &plan.slots {
        assert!(slot.pick.selected.iter().all(|f| !f.allergens.contains("milk")));
    }
    assert_eq!(plan.slot(MealSlot::Lunch).unwrap().target_kcal, 657.0);
}

#[tokio::test]
async fn custom_foods_persist_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::in_dir(dir.path());

    let mut planner = DietPlanner::open(&config).await;
    let added = planner
        .add_food(NewFood {
            name: "bagel".to_string(),
            source: CalorieSource::Macros {
                carbs: 48.0,
                protein: 10.0,
                fat: 1.5,
            },
            protein: 0.0,
            allergens: ["wheat".to_string()].into_iter().collect(),
        })
        .await
        .unwrap();
    assert_eq!(added.calories, 246.0);

    let text = tokio::fs::read_to_string(config.foods_path()).await.unwrap();
    let saved: Vec<FoodRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(saved, vec![added.clone()]);
    assert!(text.contains("\"protein\": 10.0"));

    let reopened = DietPlanner::open(&config).await;
    assert_eq!(reopened.catalog().custom(), &[added]);
    assert_eq!(reopened.catalog().len(), 9);

    let wheat_free = reopened.safe_foods(&["wheat".to_string()].into_iter().collect());
    assert!(wheat_free.iter().all(|f| f.name != "bagel"));
}

#[tokio::test]
async fn rejected_food_is_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::in_dir(dir.path());
    let mut planner = DietPlanner::open(&config).await;

    let result = planner
        .add_food(NewFood {
            name: String::new(),
            source: CalorieSource::Direct(100.0),
            protein: 0.0,
            allergens: BTreeSet::new(),
        })
        .await;
    assert!(result.is_err());
    assert_eq!(planner.catalog().len(), 8);
    assert!(!config.foods_path().exists());
}

#[tokio::test]
async fn failed_save_leaves_catalog_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::in_dir(dir.path());
    // A non-empty directory where the file should be makes the final rename fail.
    tokio::fs::create_dir_all(config.foods_path().join("blocker"))
        .await
        .unwrap();

    let mut planner = DietPlanner::open(&config).await;
    let kiwi = NewFood {
        name: "kiwi".to_string(),
        source: CalorieSource::Direct(42.0),
        protein: 0.8,
        allergens: BTreeSet::new(),
    };
    assert!(planner.add_food(kiwi).await.is_err());
    assert_eq!(planner.catalog().len(), 8);
    assert!(planner.catalog().find("kiwi").is_none());

    tokio::fs::remove_dir_all(config.foods_path()).await.unwrap();
    planner
        .add_food(NewFood {
            name: "pear".to_string(),
            source: CalorieSource::Direct(57.0),
            protein: 0.4,
            allergens: BTreeSet::new(),
        })
        .await
        .unwrap();

    let text = tokio::fs::read_to_string(config.foods_path()).await.unwrap();
    let saved: Vec<FoodRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(
        saved.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        vec!["pear"]
    );
}

#[tokio::test]
async fn log_intake_skips_unknown_and_overwrites_day() {
    let dir = tempfile::tempdir().unwrap();
    let planner = DietPlanner::open(&Config::in_dir(dir.path())).await;

    let first = planner
        .log_intake(day("2024-01-01"), &["chicken breast", "dragonfruit", "brown rice"])
        .await
        .unwrap();
    assert_eq!(first.intake_kcal, 385.0);
    assert_eq!(first.meals, vec!["chicken breast", "brown rice"]);
    assert_eq!(first.unknown, vec!["dragonfruit"]);

    planner
        .log_intake(day("2024-01-01"), &["egg", "egg"])
        .await
        .unwrap();

    let ledger = planner.ledger().await;
    assert_eq!(ledger.len(), 1);
    let entry = ledger.get(day("2024-01-01")).unwrap();
    assert_eq!(entry.meals, vec!["egg", "egg"]);
    assert_eq!(entry.intake_kcal, 140.0);
}

#[tokio::test]
async fn duplicate_name_counts_first_entry() {
    let dir = tempfile::tempdir().unwrap();
    let mut planner = DietPlanner::open(&Config::in_dir(dir.path())).await;
    planner
        .add_food(NewFood {
            name: "apple".to_string(),
            source: CalorieSource::Direct(95.0),
            protein: 0.5,
            allergens: BTreeSet::new(),
        })
        .await
        .unwrap();

    let outcome = planner
        .log_intake(day("2024-04-01"), &["apple"])
        .await
        .unwrap();
    assert_eq!(outcome.intake_kcal, 52.0);
}

#[tokio::test]
async fn weekly_summary_uses_last_seven_days() {
    let dir = tempfile::tempdir().unwrap();
    let planner = DietPlanner::open(&Config::in_dir(dir.path())).await;
    let user = profile(&[], Goal::Cut);

    assert!(planner.weekly_summary(&user).await.is_none());

    for d in 1..=10 {
        let date = NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        planner.log_intake(date, &["oatmeal"]).await.unwrap();
    }

    let summary = planner.weekly_summary(&user).await.unwrap();
    assert_eq!(summary.days.len(), 7);
    assert_eq!(summary.days[0].date, day("2024-03-04"));
    assert_eq!(summary.average_kcal, 150.0);
    assert_eq!(summary.calorie_goal, 1342.5);
    assert!(summary.render_chart().contains("goal: 1342 kcal"));
}

#[test]
fn config_resolves_files_under_data_dir() {
    let config = Config::in_dir("/tmp/diet");
    assert_eq!(config.foods_path(), std::path::PathBuf::from("/tmp/diet/foods.json"));
    assert_eq!(
        config.ledger_path(),
        std::path::PathBuf::from("/tmp/diet/meals_log.json")
    );

    let mut config = config.with_data_dir("/srv/data");
    config.ledger_file = "/var/log/meals.json".into();
    assert_eq!(config.foods_path(), std::path::PathBuf::from("/srv/data/foods.json"));
    assert_eq!(config.ledger_path(), std::path::PathBuf::from("/var/log/meals.json"));
}
