use std::collections::BTreeSet;

use crate::models::FoodRecord;

/// Allergens offered as presets; anything else is entered as free text.
pub const BASE_ALLERGENS: [&str; 3] = ["milk", "soy", "egg"];

/// The foods every catalog starts with.
pub fn default_foods() -> Vec<FoodRecord> {
    vec![
        FoodRecord::new("chicken breast", 165.0, 31.0, &[]),
        FoodRecord::new("brown rice", 220.0, 4.0, &[]),
        FoodRecord::new("tofu", 76.0, 8.0, &["soy"]),
        FoodRecord::new("milk", 150.0, 8.0, &["milk"]),
        FoodRecord::new("egg", 70.0, 6.0, &["egg"]),
        FoodRecord::new("apple", 52.0, 0.3, &[]),
        FoodRecord::new("oatmeal", 150.0, 5.0, &[]),
        FoodRecord::new("greek yogurt", 100.0, 10.0, &["milk"]),
    ]
}

/// Keep the foods whose allergens are disjoint from `excluded`, in order.
pub fn filter_by_allergens(foods: &[FoodRecord], excluded: &BTreeSet<String>) -> Vec<FoodRecord> {
    foods
        .iter()
        .filter(|food| food.is_safe_for(excluded))
        .cloned()
        .collect()
}

/// Ordered list of foods: the built-in defaults followed by user-added entries.
///
/// Names are not deduplicated. Lookups by name return the first match in
/// catalog order, so a custom food sharing a built-in's name is shadowed by it.
#[derive(Debug, Clone)]
pub struct FoodCatalog {
    foods: Vec<FoodRecord>,
    builtin_len: usize,
}

impl Default for FoodCatalog {
    fn default() -> Self {
        Self::with_custom(Vec::new())
    }
}

impl FoodCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus previously saved custom foods.
    pub fn with_custom(custom: Vec<FoodRecord>) -> Self {
        let mut foods = default_foods();
        let builtin_len = foods.len();
        foods.extend(custom);
        Self { foods, builtin_len }
    }

    pub fn foods(&self) -> &[FoodRecord] {
        &self.foods
    }

    /// Entries that are not part of the built-in defaults.
    pub fn custom(&self) -> &[FoodRecord] {
        &self.foods[self.builtin_len..]
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn add_food(&mut self, record: FoodRecord) -> &FoodRecord {
        self.foods.push(record);
        &self.foods[self.foods.len() - 1]
    }

    pub fn filter_by_allergens(&self, excluded: &BTreeSet<String>) -> Vec<FoodRecord> {
        filter_by_allergens(&self.foods, excluded)
    }

    /// First food with exactly this name.
    pub fn find(&self, name: &str) -> Option<&FoodRecord> {
        self.foods.iter().find(|f| f.name == name)
    }

    /// Match each name against the catalog. Returns the matched records in
    /// input order and the names that were not found.
    pub fn resolve<'a, S: AsRef<str>>(
        &'a self,
        names: &[S],
    ) -> (Vec<&'a FoodRecord>, Vec<String>) {
        let mut found = Vec::new();
        let mut missing = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            match self.find(name) {
                Some(food) => found.push(food),
                None => missing.push(name.to_string()),
            }
        }
        (found, missing)
    }

    /// Every allergen tag in use, plus the presets.
    pub fn known_allergens(&self) -> BTreeSet<String> {
        BASE_ALLERGENS
            .iter()
            .map(|a| a.to_string())
            .chain(self.foods.iter().flat_map(|f| f.allergens.iter().cloned()))
            .collect()
    }
}
