//! Meal records as returned by TheMealDB.
//!
//! The API returns every field as an optional string. Empty strings and `null` are both used
//! for absent values, and ingredients are spread over up to twenty numbered
//! `strIngredientN` / `strMeasureN` field pairs. [`RawMeal`] mirrors that payload while
//! [`MealRecord`] is the validated form the graph builder works with.

use crate::error::RecordError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Highest ingredient slot used by the API.
pub const MAX_INGREDIENT_SLOTS: usize = 20;

/// The envelope of every meal endpoint.
#[derive(Debug, Deserialize)]
pub struct MealsEnvelope {
    /// `null` when a search has no match.
    pub meals: Option<Vec<RawMeal>>,
}

/// A meal exactly as sent by the API.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawMeal {
    #[serde(rename = "idMeal")]
    pub id: Option<String>,
    #[serde(rename = "strMeal")]
    pub name: Option<String>,
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(rename = "strArea")]
    pub area: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,
    #[serde(rename = "strYoutube")]
    pub youtube: Option<String>,
    #[serde(rename = "strSource")]
    pub source: Option<String>,
    #[serde(rename = "strTags")]
    pub tags: Option<String>,
    /// All remaining fields, among them the numbered ingredient and measure slots.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// One ingredient of a meal, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientEntry {
    /// The trimmed ingredient name.
    pub name: String,
    /// The trimmed measure, if any.
    pub measure: Option<String>,
}

/// A validated meal record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub cuisine: String,
    pub instructions: Option<String>,
    pub thumbnail: Option<String>,
    pub youtube: Option<String>,
    pub source: Option<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<IngredientEntry>,
}

impl MealRecord {
    /// Creates a record with the mandatory fields and no optional attribute or ingredient.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        cuisine: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            cuisine: cuisine.into(),
            instructions: None,
            thumbnail: None,
            youtube: None,
            source: None,
            tags: Vec::new(),
            ingredients: Vec::new(),
        }
    }

    /// Appends an ingredient to the record.
    #[must_use]
    pub fn with_ingredient(mut self, name: impl Into<String>, measure: Option<&str>) -> Self {
        self.ingredients.push(IngredientEntry {
            name: name.into(),
            measure: measure.map(str::to_owned),
        });
        self
    }
}

impl TryFrom<RawMeal> for MealRecord {
    type Error = RecordError;

    fn try_from(raw: RawMeal) -> Result<Self, Self::Error> {
        let id = non_blank(raw.id.as_deref()).ok_or(RecordError::MissingField {
            id: "<unknown>".to_owned(),
            field: "idMeal",
        })?;
        let required = |value: Option<&str>, field: &'static str| {
            non_blank(value).ok_or_else(|| RecordError::MissingField {
                id: id.clone(),
                field,
            })
        };
        let name = required(raw.name.as_deref(), "strMeal")?;
        let category = required(raw.category.as_deref(), "strCategory")?;
        let cuisine = required(raw.area.as_deref(), "strArea")?;

        let tags = raw
            .tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .filter_map(|tag| non_blank(Some(tag)))
                    .collect()
            })
            .unwrap_or_default();

        let ingredients = (1..=MAX_INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let name = non_blank(slot_value(&raw.extra, "strIngredient", slot))?;
                let measure = non_blank(slot_value(&raw.extra, "strMeasure", slot));
                Some(IngredientEntry { name, measure })
            })
            .collect();

        Ok(Self {
            id,
            name,
            category,
            cuisine,
            instructions: non_blank(raw.instructions.as_deref()),
            thumbnail: non_blank(raw.thumbnail.as_deref()),
            youtube: non_blank(raw.youtube.as_deref()),
            source: non_blank(raw.source.as_deref()),
            tags,
            ingredients,
        })
    }
}

fn slot_value<'a>(
    extra: &'a HashMap<String, Value>,
    prefix: &str,
    slot: usize,
) -> Option<&'a str> {
    extra.get(&format!("{prefix}{slot}")).and_then(Value::as_str)
}

/// Trims `value` and discards it if nothing is left.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}
