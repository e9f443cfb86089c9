//! Meal presets and the weekly grocery list built from them.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroceryItem {
    pub item: String,
    #[serde(default)]
    pub qty: String,
    #[serde(default)]
    pub checked: bool,
}

/// A seeded meal the planner can point a meal task at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPreset {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub preset_key: String,
    #[serde(default)]
    pub kcal: u32,
    #[serde(default)]
    pub macros: Macros,
    #[serde(default)]
    pub recipe_url: Option<String>,
    #[serde(default)]
    pub grocery: Vec<GroceryItem>,
}

/// Merge the ingredients of the selected meals into one list.
///
/// An empty selection means every meal. Items are keyed by name; the first
/// non-empty quantity seen for an item is kept. Nameless entries are
/// dropped. The result is sorted by item name, case-insensitively.
pub fn build_grocery_list(meals: &[MealPreset], selected: &HashSet<String>) -> Vec<GroceryItem> {
    let mut merged: HashMap<&str, GroceryItem> = HashMap::new();

    let relevant = meals
        .iter()
        .filter(|meal| selected.is_empty() || selected.contains(&meal.id));

    for meal in relevant {
        for ingredient in meal.grocery.iter().filter(|g| !g.item.is_empty()) {
            merged
                .entry(ingredient.item.as_str())
                .and_modify(|existing| {
                    if existing.qty.is_empty() {
                        existing.qty = ingredient.qty.clone();
                    }
                })
                .or_insert_with(|| GroceryItem {
                    item: ingredient.item.clone(),
                    qty: ingredient.qty.clone(),
                    checked: false,
                });
        }
    }

    let mut items: Vec<GroceryItem> = merged.into_values().collect();
    items.sort_by(|a, b| {
        a.item
            .to_lowercase()
            .cmp(&b.item.to_lowercase())
            .then_with(|| a.item.cmp(&b.item))
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, qty: &str) -> GroceryItem {
        GroceryItem {
            item: name.to_string(),
            qty: qty.to_string(),
            checked: false,
        }
    }

    fn meal(id: &str, grocery: Vec<GroceryItem>) -> MealPreset {
        MealPreset {
            id: id.to_string(),
            title: format!("Meal {id}"),
            preset_key: id.to_string(),
            kcal: 450,
            macros: Macros::default(),
            recipe_url: None,
            grocery,
        }
    }

    fn meals() -> Vec<MealPreset> {
        vec![
            meal("bowl", vec![item("rice", "200g"), item("Eggs", ""), item("", "1")]),
            meal("oats", vec![item("oats", "80g"), item("Eggs", "2")]),
            meal("salad", vec![item("spinach", "1 bag")]),
        ]
    }

    #[test]
    fn empty_selection_uses_every_meal() {
        let list = build_grocery_list(&meals(), &HashSet::new());
        let names: Vec<_> = list.iter().map(|g| g.item.as_str()).collect();
        assert_eq!(names, vec!["Eggs", "oats", "rice", "spinach"]);
    }

    #[test]
    fn first_non_empty_quantity_wins() {
        let list = build_grocery_list(&meals(), &HashSet::new());
        let eggs = list.iter().find(|g| g.item == "Eggs").unwrap();
        assert_eq!(eggs.qty, "2");
    }

    #[test]
    fn selection_filters_meals() {
        let selected: HashSet<String> = ["salad".to_string()].into_iter().collect();
        let list = build_grocery_list(&meals(), &selected);
        assert_eq!(list, vec![item("spinach", "1 bag")]);
    }

    #[test]
    fn meal_preset_parses_sparse_json() {
        let preset: MealPreset =
            serde_json::from_str(r#"{"id":"m1","title":"Wrap","grocery":[{"item":"tortilla"}]}"#)
                .unwrap();
        assert_eq!(preset.grocery[0].qty, "");
        assert_eq!(preset.kcal, 0);
    }
}
