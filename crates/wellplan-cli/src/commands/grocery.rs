use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;
use wellplan_core::{build_grocery_list, MealPreset};

#[derive(Args)]
pub struct GroceryArgs {
    /// JSON file holding an array of meal presets
    #[arg(long)]
    meals: PathBuf,
    /// Meal IDs to shop for; repeat or comma-separate (default: all meals)
    #[arg(long = "select", value_delimiter = ',')]
    selected: Vec<String>,
}

pub fn run(args: GroceryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(&args.meals)?;
    let meals: Vec<MealPreset> = serde_json::from_str(&content)?;
    let selected: HashSet<String> = args.selected.into_iter().collect();

    let list = build_grocery_list(&meals, &selected);
    println!("{}", serde_json::to_string_pretty(&list)?);
    Ok(())
}
