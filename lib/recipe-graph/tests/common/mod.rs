#![allow(dead_code)]

use async_trait::async_trait;
use recipe_graph::error::FetchError;
use recipe_graph::{MealSource, RawMeal};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Serves scripted responses instead of calling the API.
#[derive(Default)]
pub struct ScriptedSource {
    random: Mutex<VecDeque<Result<RawMeal, FetchError>>>,
    by_letter: HashMap<char, Vec<RawMeal>>,
    requests: Mutex<usize>,
}

impl ScriptedSource {
    pub fn random(responses: Vec<Result<RawMeal, FetchError>>) -> Self {
        Self {
            random: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn by_letter(meals: Vec<RawMeal>) -> Self {
        let mut by_letter: HashMap<char, Vec<RawMeal>> = HashMap::new();
        for meal in meals {
            let letter = meal
                .name
                .as_deref()
                .and_then(|name| name.chars().next())
                .map_or('?', |c| c.to_ascii_lowercase());
            by_letter.entry(letter).or_default().push(meal);
        }
        Self {
            by_letter,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> usize {
        *self.requests.lock().unwrap()
    }
}

#[async_trait]
impl MealSource for ScriptedSource {
    async fn random_meal(&self) -> Result<RawMeal, FetchError> {
        *self.requests.lock().unwrap() += 1;
        self.random
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unavailable()))
    }

    async fn meals_by_first_letter(&self, letter: char) -> Result<Vec<RawMeal>, FetchError> {
        *self.requests.lock().unwrap() += 1;
        Ok(self.by_letter.get(&letter).cloned().unwrap_or_default())
    }
}

pub fn unavailable() -> FetchError {
    FetchError::Empty {
        url: "http://localhost/random.php".to_owned(),
    }
}

/// A raw meal with the mandatory fields and the given ingredients (empty measures).
pub fn raw_meal(id: &str, name: &str, category: &str, area: &str, ingredients: &[&str]) -> RawMeal {
    let mut extra = HashMap::new();
    for (index, ingredient) in ingredients.iter().enumerate() {
        extra.insert(
            format!("strIngredient{}", index + 1),
            serde_json::Value::from(*ingredient),
        );
        extra.insert(
            format!("strMeasure{}", index + 1),
            serde_json::Value::from("1 cup"),
        );
    }
    RawMeal {
        id: Some(id.to_owned()),
        name: Some(name.to_owned()),
        category: Some(category.to_owned()),
        area: Some(area.to_owned()),
        instructions: Some(format!("Cook {name}.")),
        extra,
        ..RawMeal::default()
    }
}
