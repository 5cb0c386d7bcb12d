use crate::models::{Goal, Sex, UserProfile};

/// Offset applied to BMR when cutting or bulking (kcal).
pub const GOAL_OFFSET_KCAL: f64 = 300.0;

/// Basal metabolic rate (kcal/day) using the Mifflin-St Jeor equation.
pub fn compute_bmr(sex: Sex, weight_kg: f64, height_cm: f64, age: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age;
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Daily calorie target for a goal.
pub fn compute_calorie_goal(bmr: f64, goal: Goal) -> f64 {
    match goal {
        Goal::Cut => bmr - GOAL_OFFSET_KCAL,
        Goal::Bulk => bmr + GOAL_OFFSET_KCAL,
        Goal::Maintain => bmr,
    }
}

impl UserProfile {
    pub fn bmr(&self) -> f64 {
        compute_bmr(
            self.sex,
            f64::from(self.weight_kg),
            f64::from(self.height_cm),
            f64::from(self.age),
        )
    }

    pub fn calorie_goal(&self) -> f64 {
        compute_calorie_goal(self.bmr(), self.goal)
    }
}
