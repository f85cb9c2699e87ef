use std::fmt::Display;
use std::str::FromStr;

/// The queries shipped with the recipe graph.
///
/// Adding a query only requires a new variant and its `.sparql` file; the runner evaluates every
/// variant the same way.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum RecipeQueryName {
    AllMeals,
    ItalianMeals,
    MealIngredients,
    MealsByCategory,
    MealsByCuisine,
    ChickenMeals,
    PopularIngredients,
}

impl RecipeQueryName {
    pub fn list_queries() -> Vec<Self> {
        vec![
            RecipeQueryName::AllMeals,
            RecipeQueryName::ItalianMeals,
            RecipeQueryName::MealIngredients,
            RecipeQueryName::MealsByCategory,
            RecipeQueryName::MealsByCuisine,
            RecipeQueryName::ChickenMeals,
            RecipeQueryName::PopularIngredients,
        ]
    }

    /// The identifier used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            RecipeQueryName::AllMeals => "all-meals",
            RecipeQueryName::ItalianMeals => "italian-meals",
            RecipeQueryName::MealIngredients => "meal-ingredients",
            RecipeQueryName::MealsByCategory => "meals-by-category",
            RecipeQueryName::MealsByCuisine => "meals-by-cuisine",
            RecipeQueryName::ChickenMeals => "chicken-meals",
            RecipeQueryName::PopularIngredients => "popular-ingredients",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RecipeQueryName::AllMeals => "List of Meals",
            RecipeQueryName::ItalianMeals => "Italian Meals",
            RecipeQueryName::MealIngredients => "Sample Ingredients",
            RecipeQueryName::MealsByCategory => "Meals by Category",
            RecipeQueryName::MealsByCuisine => "Meals by Cuisine",
            RecipeQueryName::ChickenMeals => "Meals with Chicken",
            RecipeQueryName::PopularIngredients => "Most Used Ingredients",
        }
    }

    /// The SPARQL text of the query.
    pub fn text(&self) -> &'static str {
        match self {
            RecipeQueryName::AllMeals => include_str!("../../queries/all_meals.sparql"),
            RecipeQueryName::ItalianMeals => {
                include_str!("../../queries/italian_meals.sparql")
            }
            RecipeQueryName::MealIngredients => {
                include_str!("../../queries/meal_ingredients.sparql")
            }
            RecipeQueryName::MealsByCategory => {
                include_str!("../../queries/meals_by_category.sparql")
            }
            RecipeQueryName::MealsByCuisine => {
                include_str!("../../queries/meals_by_cuisine.sparql")
            }
            RecipeQueryName::ChickenMeals => {
                include_str!("../../queries/chicken_meals.sparql")
            }
            RecipeQueryName::PopularIngredients => {
                include_str!("../../queries/popular_ingredients.sparql")
            }
        }
    }
}

impl Display for RecipeQueryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a query name that is not part of [`RecipeQueryName::list_queries`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown query '{name}', expected one of: {expected}")]
pub struct UnknownQueryName {
    name: String,
    expected: String,
}

impl FromStr for RecipeQueryName {
    type Err = UnknownQueryName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::list_queries()
            .into_iter()
            .find(|query| query.name() == s)
            .ok_or_else(|| UnknownQueryName {
                name: s.to_owned(),
                expected: Self::list_queries()
                    .iter()
                    .map(RecipeQueryName::name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
