use std::collections::BTreeSet;

use diet_planner::calculator::{compute_bmr, compute_calorie_goal};
use diet_planner::{display_kcal, Goal, Sex, UserProfile};

#[test]
fn bmr_follows_mifflin_st_jeor() {
    assert_eq!(compute_bmr(Sex::Male, 70.0, 170.0, 25.0), 1642.5);
    assert_eq!(compute_bmr(Sex::Female, 70.0, 170.0, 25.0), 1476.5);
    assert_eq!(compute_bmr(Sex::Male, 70.0, 175.0, 25.0), 1673.75);
}

#[test]
fn sexes_differ_by_166_kcal() {
    for (w, h, a) in [(30.0, 100.0, 10.0), (82.0, 181.0, 40.0), (200.0, 250.0, 100.0)] {
        let diff = compute_bmr(Sex::Male, w, h, a) - compute_bmr(Sex::Female, w, h, a);
        assert_eq!(diff, 166.0);
    }
}

#[test]
fn goal_offsets() {
    for bmr in [1200.0, 1642.5, 2500.25] {
        assert_eq!(compute_calorie_goal(bmr, Goal::Cut), bmr - 300.0);
        assert_eq!(compute_calorie_goal(bmr, Goal::Bulk), bmr + 300.0);
        assert_eq!(compute_calorie_goal(bmr, Goal::Maintain), bmr);
    }
}

#[test]
fn profile_goal_is_truncated_for_display() {
    let profile = UserProfile::new(25, Sex::Male, 175, 70, none(), Goal::Maintain).unwrap();
    assert_eq!(profile.calorie_goal(), 1673.75);
    assert_eq!(display_kcal(profile.calorie_goal()), 1673);

    let cutting = UserProfile { goal: Goal::Cut, ..profile };
    assert_eq!(display_kcal(cutting.calorie_goal()), 1373);
}

fn none() -> BTreeSet<String> {
    BTreeSet::new()
}

#[test]
fn profile_rejects_out_of_range_inputs() {
    assert!(UserProfile::new(9, Sex::Male, 170, 70, none(), Goal::Cut).is_err());
    assert!(UserProfile::new(101, Sex::Male, 170, 70, none(), Goal::Cut).is_err());
    assert!(UserProfile::new(25, Sex::Male, 99, 70, none(), Goal::Cut).is_err());
    assert!(UserProfile::new(25, Sex::Male, 251, 70, none(), Goal::Cut).is_err());
    assert!(UserProfile::new(25, Sex::Female, 170, 29, none(), Goal::Cut).is_err());
    assert!(UserProfile::new(25, Sex::Female, 170, 201, none(), Goal::Cut).is_err());

    let err = UserProfile::new(5, Sex::Male, 170, 70, none(), Goal::Bulk).unwrap_err();
    assert!(err.to_string().contains("age"));

    assert!(UserProfile::new(10, Sex::Female, 100, 30, none(), Goal::Bulk).is_ok());
    assert!(UserProfile::new(100, Sex::Male, 250, 200, none(), Goal::Bulk).is_ok());
}

#[test]
fn parses_sex_and_goal() {
    assert_eq!("Male".parse::<Sex>().unwrap(), Sex::Male);
    assert_eq!("f".parse::<Sex>().unwrap(), Sex::Female);
    assert!("other".parse::<Sex>().is_err());

    assert_eq!("cut".parse::<Goal>().unwrap(), Goal::Cut);
    assert_eq!("BULK".parse::<Goal>().unwrap(), Goal::Bulk);
    assert_eq!("maintenance".parse::<Goal>().unwrap(), Goal::Maintain);
    assert!("shred".parse::<Goal>().is_err());
}
