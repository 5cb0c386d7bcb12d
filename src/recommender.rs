//! Randomized meal suggestions.
//!
//! Each slot is filled greedily: draw a food uniformly (with replacement),
//! keep it if that record is not already in the slot, stop once the running
//! total reaches `target - SLACK_KCAL` or after `MAX_ATTEMPTS` draws. The
//! last food added can push the total past the target.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::models::{FoodRecord, MealSlot};

/// Draws allowed per slot, whether or not they add a food.
pub const MAX_ATTEMPTS: u32 = 100;

/// A slot stops filling once it is within this many kcal of its target.
pub const SLACK_KCAL: f64 = 100.0;

/// Foods picked for one slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlotPick {
    pub selected: Vec<FoodRecord>,
    pub total_kcal: f64,
    /// Draws used; at most `MAX_ATTEMPTS`
    #[serde(skip)]
    pub attempts: u32,
}

/// Fill one slot using `rng` for the draws.
pub fn recommend_slot<R: Rng + ?Sized>(
    foods: &[FoodRecord],
    target_kcal: f64,
    rng: &mut R,
) -> SlotPick {
    recommend_slot_with(foods, target_kcal, |len| rng.gen_range(0..len))
}

/// Fill one slot with a caller-supplied draw. `draw(len)` must return an
/// index below `len`; it is never called with an empty catalog.
pub fn recommend_slot_with<F>(foods: &[FoodRecord], target_kcal: f64, mut draw: F) -> SlotPick
where
    F: FnMut(usize) -> usize,
{
    let mut pick = SlotPick::default();

    while pick.total_kcal < target_kcal - SLACK_KCAL && pick.attempts < MAX_ATTEMPTS {
        pick.attempts += 1;
        if foods.is_empty() {
            continue;
        }

        // Equal records count as the same food; equal names alone do not.
        let food = &foods[draw(foods.len()) % foods.len()];
        if !pick.selected.contains(food) {
            pick.selected.push(food.clone());
            pick.total_kcal += food.calories;
        }
    }

    debug!(
        target_kcal,
        total_kcal = pick.total_kcal,
        picked = pick.selected.len(),
        attempts = pick.attempts,
        "filled meal slot"
    );
    pick
}

/// Suggestions for a whole day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub calorie_goal: f64,
    pub slots: Vec<SlotPlan>,
    /// Sum of the slot totals; need not equal `calorie_goal`
    pub total_kcal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotPlan {
    pub slot: MealSlot,
    pub target_kcal: f64,
    #[serde(flatten)]
    pub pick: SlotPick,
}

impl DayPlan {
    pub fn slot(&self, slot: MealSlot) -> Option<&SlotPlan> {
        self.slots.iter().find(|s| s.slot == slot)
    }
}

/// Breakfast, lunch and dinner, each filled independently.
pub fn recommend_day<R: Rng + ?Sized>(
    foods: &[FoodRecord],
    calorie_goal: f64,
    rng: &mut R,
) -> DayPlan {
    let slots: Vec<SlotPlan> = MealSlot::ALL
        .iter()
        .map(|&slot| {
            let target_kcal = slot.target(calorie_goal);
            SlotPlan {
                slot,
                target_kcal,
                pick: recommend_slot(foods, target_kcal, &mut *rng),
            }
        })
        .collect();

    let total_kcal = slots.iter().map(|s| s.pick.total_kcal).sum();
    DayPlan {
        calorie_goal,
        slots,
        total_kcal,
    }
}

/// Deal foods across breakfast, lunch and dinner in turn: food `i` goes to
/// slot `i % 3`. Deterministic and ignores calorie targets.
pub fn split_round_robin(foods: &[FoodRecord]) -> Vec<(MealSlot, Vec<FoodRecord>)> {
    let mut split: Vec<(MealSlot, Vec<FoodRecord>)> =
        MealSlot::ALL.iter().map(|&s| (s, Vec::new())).collect();
    for (i, food) in foods.iter().enumerate() {
        split[i % MealSlot::ALL.len()].1.push(food.clone());
    }
    split
}
