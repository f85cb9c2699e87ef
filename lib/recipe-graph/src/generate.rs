//! The generation run: fetch meals, build the graph and write it to disk.

use crate::builder::{MealInsertion, RecipeGraphBuilder};
use crate::config::{FetchStrategy, GenerateOptions};
use crate::error::{GenerateError, RecordFailure};
use crate::io::write_graph_file;
use crate::record::{MealRecord, RawMeal};
use crate::source::MealSource;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Number of requested meal records.
    pub requested: usize,
    /// Number of records that were retrieved and valid, duplicates included.
    pub fetched: usize,
    /// Number of distinct meals in the graph.
    pub meals: usize,
    /// Number of fetched records whose meal was already part of the graph.
    pub duplicates: usize,
    /// Number of records that were skipped because of an error.
    pub failures: usize,
    pub ingredients: usize,
    pub categories: usize,
    pub cuisines: usize,
    /// Number of triples written, schema included.
    pub triples: usize,
    /// The file the graph was written to.
    pub output: PathBuf,
}

impl GenerationSummary {
    /// Whether fewer records than requested made it into the graph.
    pub fn is_partial(&self) -> bool {
        self.fetched < self.requested
    }
}

impl Display for GenerationSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Fetched {} of {} requested meals ({} duplicates, {} failures)",
            self.fetched, self.requested, self.duplicates, self.failures
        )?;
        writeln!(
            f,
            "Graph: {} meals, {} ingredients, {} categories, {} cuisines",
            self.meals, self.ingredients, self.categories, self.cuisines
        )?;
        writeln!(f, "Output: {}", self.output.display())?;
        write!(f, "Total triples: {}", self.triples)
    }
}

/// Counts failed records and aborts the run once more than `max` records failed.
struct FailureBudget {
    failures: usize,
    max: usize,
}

impl FailureBudget {
    fn record(&mut self, failure: RecordFailure) -> Result<(), GenerateError> {
        self.failures += 1;
        warn!(failures = self.failures, "Skipping meal record: {failure}");
        if self.failures > self.max {
            return Err(GenerateError::TooManyFailures {
                failures: self.failures,
                max_failures: self.max,
                last: failure,
            });
        }
        Ok(())
    }
}

/// The mutable state of one run.
struct Run {
    builder: RecipeGraphBuilder,
    budget: FailureBudget,
    requested: usize,
    fetched: usize,
    duplicates: usize,
}

impl Run {
    /// Validates `raw` and adds it to the graph. Invalid records are charged to the budget.
    fn ingest(&mut self, raw: RawMeal) -> Result<(), GenerateError> {
        match MealRecord::try_from(raw) {
            Ok(record) => {
                let insertion = self.builder.add_meal(&record);
                self.fetched += 1;
                match insertion {
                    MealInsertion::Added => info!(
                        "Fetched: {} ({}/{})",
                        record.name, self.fetched, self.requested
                    ),
                    MealInsertion::Duplicate => {
                        self.duplicates += 1;
                        debug!(id = %record.id, "Meal already in graph, reusing it");
                    }
                }
                Ok(())
            }
            Err(error) => self.budget.record(error.into()),
        }
    }

    fn remaining(&self) -> usize {
        self.requested.saturating_sub(self.fetched)
    }
}

/// Fetches `options.count` meals from `source`, builds the recipe graph and writes it, schema
/// included, to `options.output`.
///
/// Records that cannot be fetched or lack a mandatory field are logged and skipped. The run is
/// aborted without touching `options.output` when more than `options.max_failures` records
/// fail or when no meal at all could be retrieved.
pub async fn generate<S: MealSource + ?Sized>(
    source: &S,
    options: &GenerateOptions,
) -> Result<GenerationSummary, GenerateError> {
    info!(
        count = options.count,
        strategy = ?options.strategy,
        "Fetching meals"
    );
    let mut run = Run {
        builder: RecipeGraphBuilder::with_schema()?,
        budget: FailureBudget {
            failures: 0,
            max: options.max_failures,
        },
        requested: options.count,
        fetched: 0,
        duplicates: 0,
    };

    match options.strategy {
        FetchStrategy::Random => fetch_random(source, &mut run, options.delay).await?,
        FetchStrategy::ByFirstLetter => {
            fetch_by_first_letter(source, &mut run, options.delay).await?
        }
    }

    if run.builder.meal_count() == 0 {
        return Err(GenerateError::NoMeals {
            requested: options.count,
        });
    }
    if run.remaining() > 0 {
        warn!(
            fetched = run.fetched,
            requested = run.requested,
            "Fewer meals than requested were fetched"
        );
    }

    info!(
        meals = run.builder.meal_count(),
        "Building knowledge graph"
    );
    let meals = run.builder.meal_count();
    let ingredients = run.builder.ingredient_count();
    let categories = run.builder.category_count();
    let cuisines = run.builder.cuisine_count();
    let graph = run.builder.into_graph();
    write_graph_file(&graph, &options.output)?;

    Ok(GenerationSummary {
        requested: run.requested,
        fetched: run.fetched,
        meals,
        duplicates: run.duplicates,
        failures: run.budget.failures,
        ingredients,
        categories,
        cuisines,
        triples: graph.len(),
        output: options.output.clone(),
    })
}

async fn fetch_random<S: MealSource + ?Sized>(
    source: &S,
    run: &mut Run,
    delay: Duration,
) -> Result<(), GenerateError> {
    for attempt in 0..run.requested {
        if attempt > 0 {
            pause(delay).await;
        }
        match source.random_meal().await {
            Ok(raw) => run.ingest(raw)?,
            Err(error) => run.budget.record(error.into())?,
        }
    }
    Ok(())
}

async fn fetch_by_first_letter<S: MealSource + ?Sized>(
    source: &S,
    run: &mut Run,
    delay: Duration,
) -> Result<(), GenerateError> {
    for (index, letter) in ('a'..='z').enumerate() {
        if run.remaining() == 0 {
            break;
        }
        if index > 0 {
            pause(delay).await;
        }
        match source.meals_by_first_letter(letter).await {
            Ok(meals) => {
                debug!(%letter, meals = meals.len(), "Search returned");
                for raw in meals {
                    if run.remaining() == 0 {
                        break;
                    }
                    run.ingest(raw)?;
                }
            }
            Err(error) => run.budget.record(error.into())?,
        }
    }
    Ok(())
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
