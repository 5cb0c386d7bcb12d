//! Command-line front end for the diet planner.
//!
//! ```bash
//! diet-planner goal --age 25 --sex male --height 170 --weight 70 --goal maintain
//! diet-planner foods --allergy milk
//! diet-planner add-food "banana" --carbs 23 --protein 1.1 --fat 0.3
//! diet-planner recommend --age 25 --sex male --height 170 --weight 70 --goal cut --seed 7
//! diet-planner log "chicken breast" "brown rice" apple
//! diet-planner summary --age 25 --sex male --height 170 --weight 70 --goal maintain
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use diet_planner::recommender::split_round_robin;
use diet_planner::{
    display_kcal, logging, CalorieSource, Config, DietPlanner, FoodRecord, Goal, NewFood, Sex,
    UserProfile,
};

#[derive(Parser)]
#[command(
    name = "diet-planner",
    about = "Personal calorie goals, meal suggestions and intake log"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding foods.json and meals_log.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show BMR and daily calorie goal
    Goal {
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long)]
        json: bool,
    },

    /// List catalog foods, optionally excluding allergens
    Foods {
        #[arg(long = "allergy")]
        allergies: Vec<String>,
    },

    /// Register a custom food
    AddFood {
        name: String,
        /// Calories entered directly
        #[arg(long, conflicts_with_all = ["carbs", "fat"])]
        calories: Option<f64>,
        /// Carbohydrate grams
        #[arg(long)]
        carbs: Option<f64>,
        /// Protein grams
        #[arg(long, default_value_t = 0.0)]
        protein: f64,
        /// Fat grams
        #[arg(long)]
        fat: Option<f64>,
        #[arg(long = "allergen")]
        allergens: Vec<String>,
    },

    /// Suggest breakfast, lunch and dinner
    Recommend {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Seed for repeatable suggestions
        #[arg(long)]
        seed: Option<u64>,
        /// Deal safe foods across the three meals instead
        #[arg(long)]
        split: bool,
        #[arg(long)]
        json: bool,
    },

    /// Record what was eaten (replaces that day's entry)
    Log {
        #[arg(required = true)]
        meals: Vec<String>,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Chart recent intake against the calorie goal
    Summary {
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long, default_value_t = 7)]
        days: usize,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ProfileArgs {
    #[arg(long, default_value_t = 25)]
    age: u32,
    #[arg(long, default_value = "male")]
    sex: Sex,
    /// Height in cm
    #[arg(long, default_value_t = 170)]
    height: u32,
    /// Weight in kg
    #[arg(long, default_value_t = 70)]
    weight: u32,
    #[arg(long, default_value = "maintain")]
    goal: Goal,
    /// Allergen to avoid; repeatable, free text allowed
    #[arg(long = "allergy")]
    allergies: Vec<String>,
}

impl ProfileArgs {
    fn into_profile(self) -> Result<UserProfile> {
        UserProfile::new(
            self.age,
            self.sex,
            self.height,
            self.weight,
            allergy_set(self.allergies),
            self.goal,
        )
    }
}

fn allergy_set(allergies: Vec<String>) -> BTreeSet<String> {
    allergies
        .into_iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}

fn print_food(food: &FoodRecord) {
    println!(
        "- {} ({} kcal, protein {}g)",
        food.name, food.calories, food.protein_grams
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let mut config = Config::from_env();
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    match cli.command {
        Command::Goal { profile, json } => {
            let profile = profile.into_profile()?;
            let bmr = profile.bmr();
            let goal = profile.calorie_goal();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "bmr": bmr,
                        "goal": profile.goal,
                        "calorie_goal": goal,
                    }))?
                );
            } else {
                println!("BMR: {} kcal", display_kcal(bmr));
                println!("Daily calorie goal ({}): {} kcal", profile.goal, display_kcal(goal));
            }
        }

        Command::Foods { allergies } => {
            let planner = DietPlanner::open(&config).await;
            for food in planner.safe_foods(&allergy_set(allergies)) {
                print_food(&food);
            }
            let known: Vec<String> = planner.catalog().known_allergens().into_iter().collect();
            println!("Allergen tags: {}", known.join(", "));
        }

        Command::AddFood {
            name,
            calories,
            carbs,
            protein,
            fat,
            allergens,
        } => {
            let source = match (calories, carbs, fat) {
                (Some(kcal), _, _) => CalorieSource::Direct(kcal),
                (None, None, None) => bail!("Give either --calories or --carbs/--protein/--fat"),
                (None, carbs, fat) => CalorieSource::Macros {
                    carbs: carbs.unwrap_or(0.0),
                    protein,
                    fat: fat.unwrap_or(0.0),
                },
            };

            let mut planner = DietPlanner::open(&config).await;
            let food = planner
                .add_food(NewFood {
                    name,
                    source,
                    protein,
                    allergens: allergy_set(allergens),
                })
                .await?;
            println!("Added '{}': {} kcal", food.name, food.calories);
        }

        Command::Recommend {
            profile,
            seed,
            split,
            json,
        } => {
            let profile = profile.into_profile()?;
            let planner = DietPlanner::open(&config).await;

            if split {
                for (slot, foods) in split_round_robin(&planner.safe_foods(&profile.allergies)) {
                    println!("{slot}:");
                    for food in &foods {
                        print_food(food);
                    }
                }
                return Ok(());
            }

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let plan = planner.recommend(&profile, &mut rng);

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("Daily calorie goal: {} kcal", display_kcal(plan.calorie_goal));
                for slot in &plan.slots {
                    println!(
                        "{} (target {} kcal, got {} kcal):",
                        slot.slot,
                        display_kcal(slot.target_kcal),
                        slot.pick.total_kcal
                    );
                    for food in &slot.pick.selected {
                        print_food(food);
                    }
                }
                println!("Day total: {} kcal", plan.total_kcal);
            }
        }

        Command::Log { meals, date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let planner = DietPlanner::open(&config).await;
            let outcome = planner.log_intake(date, meals.as_slice()).await?;
            for name in &outcome.unknown {
                eprintln!("'{name}' is not in the catalog, please register it first");
            }
            println!("{}: {} kcal", outcome.date, outcome.intake_kcal);
        }

        Command::Summary {
            profile,
            days,
            json,
        } => {
            let profile = profile.into_profile()?;
            let planner = DietPlanner::open(&config).await;
            match planner.summary(profile.calorie_goal(), days).await {
                Some(summary) if json => {
                    println!("{}", serde_json::to_string_pretty(&summary)?)
                }
                Some(summary) => print!("{}", summary.render_chart()),
                None => println!("No intake logged yet"),
            }
        }
    }

    Ok(())
}
