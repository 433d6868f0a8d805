//! Recipe, ingredient list and nutrition facts blocks

use serde::{Deserialize, Serialize};

use super::{encode, BlockSchema, ListSpec};
use crate::core::settings::{FieldConstraints, ListEditor, SettingsForm};
use crate::core::style::{style, StyleMap};
use crate::core::{new_item_id, BlockType, PropValue};

/// Ordinal field of recipe steps
pub const STEP_NUMBER: &str = "stepNumber";

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipesProps {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub servings: Option<u32>,
    /// Minutes
    pub prep_time: Option<u32>,
    /// Minutes
    pub cook_time: Option<u32>,
    pub steps: Option<Vec<RecipeStep>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    pub id: String,
    /// 1-based position, kept in sync with the list order
    pub step_number: Option<u32>,
    pub instruction: Option<String>,
    pub image: Option<String>,
}

impl RecipeStep {
    pub fn new(step_number: u32, instruction: &str) -> Self {
        Self {
            id: new_item_id(),
            step_number: Some(step_number),
            instruction: Some(instruction.into()),
            image: Some(String::new()),
        }
    }
}

impl RecipesProps {
    pub fn defaults() -> Self {
        Self {
            title: Some("Signature recipe".into()),
            description: Some("A quick favourite made with our products.".into()),
            image: Some(String::new()),
            servings: Some(4),
            prep_time: Some(10),
            cook_time: Some(20),
            steps: Some(vec![
                RecipeStep::new(1, "Prepare the ingredients."),
                RecipeStep::new(2, "Cook and serve."),
            ]),
        }
    }
}

fn recipes_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&RecipesProps::defaults())
}

/// Renumbering assigns the real position once the step is in the list
fn new_recipe_step() -> Result<PropValue, serde_json::Error> {
    encode(&RecipeStep::new(0, "Describe this step."))
}

fn recipes_settings() -> SettingsForm {
    SettingsForm::new()
        .input("title", "Title")
        .textarea("description", "Description")
        .image("image", "Image")
        .number("servings", "Servings", FieldConstraints::range(1.0, 100.0).with_step(1.0))
        .number("prepTime", "Prep time", FieldConstraints::range(0.0, 1440.0).with_unit("min"))
        .number("cookTime", "Cook time", FieldConstraints::range(0.0, 1440.0).with_unit("min"))
        .list(
            ListEditor::new(
                "steps",
                "Steps",
                SettingsForm::new()
                    .textarea("instruction", "Instruction")
                    .image("image", "Image"),
            )
            .titled("instruction")
            .reorderable(),
        )
}

fn column_layout(_props: &PropValue) -> StyleMap {
    style([("display", "flex"), ("flexDirection", "column"), ("gap", "12px")])
}

pub static RECIPES: BlockSchema = BlockSchema {
    block_type: BlockType::Recipes,
    defaults: recipes_defaults,
    lists: &[ListSpec {
        path: &["steps"],
        ordinal: Some(STEP_NUMBER),
        new_item: new_recipe_step,
    }],
    settings: recipes_settings,
    layout: column_layout,
};

// ---------------------------------------------------------------------------
// Ingredients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientsProps {
    pub title: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub show_quantities: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: Option<String>,
    /// Free text so that "1/2" or "a pinch" survive
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn new(name: &str, quantity: &str, unit: &str) -> Self {
        Self {
            id: new_item_id(),
            name: Some(name.into()),
            quantity: Some(quantity.into()),
            unit: Some(unit.into()),
        }
    }
}

impl IngredientsProps {
    pub fn defaults() -> Self {
        Self {
            title: Some("Ingredients".into()),
            ingredients: Some(vec![
                Ingredient::new("Flour", "200", "g"),
                Ingredient::new("Milk", "250", "ml"),
            ]),
            show_quantities: Some(true),
        }
    }
}

fn ingredients_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&IngredientsProps::defaults())
}

fn new_ingredient() -> Result<PropValue, serde_json::Error> {
    encode(&Ingredient::new("New ingredient", "", ""))
}

fn ingredients_settings() -> SettingsForm {
    SettingsForm::new()
        .input("title", "Title")
        .checkbox("showQuantities", "Show quantities")
        .list(
            ListEditor::new(
                "ingredients",
                "Ingredients",
                SettingsForm::new()
                    .input("name", "Name")
                    .input("quantity", "Quantity")
                    .input("unit", "Unit"),
            )
            .titled("name")
            .reorderable(),
        )
}

pub static INGREDIENTS: BlockSchema = BlockSchema {
    block_type: BlockType::Ingredients,
    defaults: ingredients_defaults,
    lists: &[ListSpec {
        path: &["ingredients"],
        ordinal: None,
        new_item: new_ingredient,
    }],
    settings: ingredients_settings,
    layout: column_layout,
};

// ---------------------------------------------------------------------------
// Nutrition table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTableProps {
    pub title: Option<String>,
    pub serving_size: Option<String>,
    pub calories: Option<f64>,
    pub nutrients: Option<Vec<NutritionNutrient>>,
    pub footnote: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionNutrient {
    pub id: String,
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    /// Percent of daily value
    pub daily_value: Option<f64>,
}

impl NutritionNutrient {
    pub fn new(name: &str, amount: f64, unit: &str, daily_value: f64) -> Self {
        Self {
            id: new_item_id(),
            name: Some(name.into()),
            amount: Some(amount),
            unit: Some(unit.into()),
            daily_value: Some(daily_value),
        }
    }
}

impl NutritionTableProps {
    pub fn defaults() -> Self {
        Self {
            title: Some("Nutrition facts".into()),
            serving_size: Some("100 g".into()),
            calories: Some(250.0),
            nutrients: Some(vec![
                NutritionNutrient::new("Fat", 8.0, "g", 10.0),
                NutritionNutrient::new("Carbohydrate", 37.0, "g", 13.0),
                NutritionNutrient::new("Protein", 6.0, "g", 12.0),
            ]),
            footnote: Some("Percent daily values are based on a 2,000 calorie diet.".into()),
        }
    }
}

fn nutrition_table_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&NutritionTableProps::defaults())
}

fn new_nutrient() -> Result<PropValue, serde_json::Error> {
    encode(&NutritionNutrient::new("Nutrient", 0.0, "g", 0.0))
}

fn nutrition_table_settings() -> SettingsForm {
    SettingsForm::new()
        .input("title", "Title")
        .input("servingSize", "Serving size")
        .number("calories", "Calories", FieldConstraints::range(0.0, 5000.0).with_unit("kcal"))
        .textarea("footnote", "Footnote")
        .list(
            ListEditor::new(
                "nutrients",
                "Nutrients",
                SettingsForm::new()
                    .input("name", "Name")
                    .number("amount", "Amount", FieldConstraints::range(0.0, 10000.0))
                    .input("unit", "Unit")
                    .number("dailyValue", "Daily value", FieldConstraints::range(0.0, 1000.0).with_unit("%")),
            )
            .titled("name")
            .reorderable(),
        )
}

fn nutrition_table_layout(_props: &PropValue) -> StyleMap {
    style([("borderCollapse", "collapse"), ("width", "100%")])
}

pub static NUTRITION_TABLE: BlockSchema = BlockSchema {
    block_type: BlockType::NutritionTable,
    defaults: nutrition_table_defaults,
    lists: &[ListSpec {
        path: &["nutrients"],
        ordinal: None,
        new_item: new_nutrient,
    }],
    settings: nutrition_table_settings,
    layout: nutrition_table_layout,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_steps_are_numbered() {
        let steps = RecipesProps::defaults().steps.unwrap();
        let numbers: Vec<_> = steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_recipe_list_declares_ordinal() {
        let spec = RECIPES.lists.first().unwrap();
        assert_eq!(spec.ordinal, Some(STEP_NUMBER));
        assert!(INGREDIENTS.lists[0].ordinal.is_none());
    }

    #[test]
    fn test_quantity_accepts_fractions() {
        let props = PropValue::from(serde_json::json!({
            "ingredients": [{ "id": "i1", "name": "Salt", "quantity": "a pinch" }]
        }));
        let typed: IngredientsProps = props.to_typed().unwrap();
        assert_eq!(typed.ingredients.unwrap()[0].quantity.as_deref(), Some("a pinch"));
    }
}
