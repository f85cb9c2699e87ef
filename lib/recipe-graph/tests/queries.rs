#![cfg(test)]

use oxigraph::model::{Literal, Term};
use recipe_graph::io::write_graph_file;
use recipe_graph::{MealRecord, QueryRunner, RecipeGraphBuilder, RecipeQueryName};
use std::error::Error;
use tempfile::TempDir;

fn literal(value: &str) -> Term {
    Literal::new_simple_literal(value).into()
}

fn integer(value: i64) -> Term {
    Literal::from(value).into()
}

/// Writes the meals, schema included, to a temporary Turtle file and loads it back.
fn runner_for(meals: &[MealRecord]) -> Result<(TempDir, QueryRunner), Box<dyn Error>> {
    let mut builder = RecipeGraphBuilder::with_schema()?;
    for meal in meals {
        builder.add_meal(meal);
    }
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("graph.ttl");
    write_graph_file(builder.graph(), &path)?;
    let runner = QueryRunner::from_file(&path)?;
    Ok((dir, runner))
}

fn carbonara() -> MealRecord {
    MealRecord::new("52982", "Spaghetti Carbonara", "Pasta", "Italian")
        .with_ingredient("Spaghetti", Some("320g"))
        .with_ingredient("Egg Yolks", Some("6"))
        .with_ingredient("Pancetta", Some("150g"))
}

fn chicken_curry() -> MealRecord {
    MealRecord::new("52795", "Chicken Handi", "Chicken", "Indian")
        .with_ingredient("Chicken", Some("1.2 kg"))
        .with_ingredient("Onion", Some("5 thinly sliced"))
        .with_ingredient("Egg Yolks", None)
}

#[test]
fn italian_query_returns_the_carbonara() -> Result<(), Box<dyn Error>> {
    let (_dir, runner) = runner_for(&[carbonara(), chicken_curry()])?;

    let outcome = runner.run(RecipeQueryName::ItalianMeals)?;
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(
        outcome.column("mealName"),
        vec![&literal("Spaghetti Carbonara")]
    );
    Ok(())
}

#[test]
fn schema_only_graph_yields_no_rows() -> Result<(), Box<dyn Error>> {
    let (_dir, runner) = runner_for(&[])?;

    let outcomes = runner.run_all(&RecipeQueryName::list_queries())?;
    assert_eq!(outcomes.len(), RecipeQueryName::list_queries().len());
    for outcome in outcomes {
        assert!(outcome.is_empty(), "{} returned rows", outcome.query);
    }
    Ok(())
}

#[test]
fn meal_without_ingredients_is_listed_but_has_no_ingredient_rows() -> Result<(), Box<dyn Error>> {
    let plain_rice = MealRecord::new("1", "Plain Rice", "Side", "Chinese");
    let (_dir, runner) = runner_for(&[plain_rice])?;

    let all_meals = runner.run(RecipeQueryName::AllMeals)?;
    assert_eq!(all_meals.column("mealName"), vec![&literal("Plain Rice")]);
    assert_eq!(all_meals.column("category"), vec![&literal("Side")]);
    assert_eq!(all_meals.column("cuisine"), vec![&literal("Chinese")]);

    assert!(runner.run(RecipeQueryName::MealIngredients)?.is_empty());
    Ok(())
}

#[test]
fn ingredient_rows_follow_the_recipe_order() -> Result<(), Box<dyn Error>> {
    let (_dir, runner) = runner_for(&[carbonara(), chicken_curry()])?;

    let outcome = runner.run(RecipeQueryName::MealIngredients)?;
    assert_eq!(
        outcome.column("ingredientName"),
        vec![
            &literal("Chicken"),
            &literal("Onion"),
            &literal("Egg Yolks"),
            &literal("Spaghetti"),
            &literal("Egg Yolks"),
            &literal("Pancetta"),
        ]
    );
    // The curry's egg yolks have no measure.
    assert_eq!(outcome.column("measure").len(), 5);
    Ok(())
}

#[test]
fn chicken_query_matches_ingredient_names_case_insensitively() -> Result<(), Box<dyn Error>> {
    let salad = MealRecord::new("2", "Caesar Salad", "Starter", "American")
        .with_ingredient("chicken breast", Some("2"))
        .with_ingredient("Romaine", None);
    let (_dir, runner) = runner_for(&[carbonara(), chicken_curry(), salad])?;

    let outcome = runner.run(RecipeQueryName::ChickenMeals)?;
    assert_eq!(
        outcome.column("mealName"),
        vec![&literal("Caesar Salad"), &literal("Chicken Handi")]
    );
    Ok(())
}

#[test]
fn shared_ingredients_rank_first() -> Result<(), Box<dyn Error>> {
    let (_dir, runner) = runner_for(&[carbonara(), chicken_curry()])?;

    let outcome = runner.run(RecipeQueryName::PopularIngredients)?;
    assert_eq!(outcome.rows.len(), 5);
    assert_eq!(outcome.column("ingredientName")[0], &literal("Egg Yolks"));
    assert_eq!(outcome.column("count")[0], &integer(2));
    Ok(())
}

#[test]
fn meals_are_counted_per_cuisine() -> Result<(), Box<dyn Error>> {
    let lasagne = MealRecord::new("3", "Lasagne", "Pasta", "Italian");
    let (_dir, runner) = runner_for(&[carbonara(), chicken_curry(), lasagne])?;

    let outcome = runner.run(RecipeQueryName::MealsByCuisine)?;
    assert_eq!(
        outcome.column("cuisine"),
        vec![&literal("Italian"), &literal("Indian")]
    );
    assert_eq!(outcome.column("count"), vec![&integer(2), &integer(1)]);

    let by_category = runner.run(RecipeQueryName::MealsByCategory)?;
    assert_eq!(by_category.column("category")[0], &literal("Pasta"));
    Ok(())
}
