#![allow(clippy::print_stdout)]
use crate::cli::{Args, Command, OutputFormat};
use anyhow::Context;
use clap::Parser;
use recipe_graph::config::GenerateOptions;
use recipe_graph::io::read_graph_file;
use recipe_graph::query::{write_json_report, write_text_report};
use recipe_graph::schema::write_schema_file;
use recipe_graph::{generate, MealDbClient, QueryRunner, RecipeDiagram, RecipeQueryName};
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

#[tokio::main(flavor = "current_thread")]
pub async fn main() -> anyhow::Result<()> {
    let matches = Args::parse();
    setup_logging(matches.verbose, matches.quiet);
    match matches.command {
        Command::Generate {
            count,
            output,
            strategy,
            api_url,
            delay_ms,
            max_failures,
            schema_output,
        } => {
            let client = MealDbClient::with_base_url(&api_url)
                .with_context(|| format!("Invalid API URL {api_url}"))?;
            let options = GenerateOptions {
                count,
                output,
                strategy: strategy.into(),
                delay: Duration::from_millis(delay_ms),
                max_failures,
            };
            let summary = generate(&client, &options).await.with_context(|| {
                format!(
                    "Failed to generate the knowledge graph {}",
                    options.output.display()
                )
            })?;
            if summary.is_partial() {
                warn!(
                    "Only {} of the {} requested meals are in the graph",
                    summary.fetched, summary.requested
                );
            }
            if let Some(schema_output) = schema_output {
                write_schema(&schema_output)?;
            }
            println!("{summary}");
            Ok(())
        }
        Command::Query {
            input,
            queries,
            format,
        } => {
            let runner = QueryRunner::from_file(&input)
                .with_context(|| format!("Failed to load the knowledge graph {}", input.display()))?;
            let triples = runner.triple_count()?;
            info!(triples, "Loaded {}", input.display());

            let queries = if queries.is_empty() {
                RecipeQueryName::list_queries()
            } else {
                queries
            };
            let outcomes = runner.run_all(&queries)?;

            let mut stdout = stdout().lock();
            match format {
                OutputFormat::Text => {
                    writeln!(stdout, "Total triples: {triples}")?;
                    writeln!(stdout)?;
                    write_text_report(&outcomes, &mut stdout)?;
                }
                OutputFormat::Json => write_json_report(&outcomes, triples, &mut stdout)?,
            }
            stdout.flush()?;
            Ok(())
        }
        Command::Schema { output } => {
            let triples = write_schema(&output)?;
            println!("Schema: {triples} triples written to {}", output.display());
            Ok(())
        }
        Command::Export {
            input,
            format,
            output,
        } => {
            let graph = read_graph_file(&input)
                .with_context(|| format!("Failed to load the knowledge graph {}", input.display()))?;
            let diagram = RecipeDiagram::from_graph(&graph);
            info!(
                nodes = diagram.node_count(),
                edges = diagram.edge_count(),
                "Exporting {}",
                input.display()
            );
            if let Some(output) = output {
                let file = File::create(&output)
                    .with_context(|| format!("Failed to create {}", output.display()))?;
                let mut writer = BufWriter::new(file);
                diagram.write(format.into(), &mut writer)?;
                writer
                    .into_inner()
                    .map_err(|e| e.into_error())?
                    .sync_all()
                    .with_context(|| format!("Failed to write {}", output.display()))?;
            } else {
                let mut stdout = stdout().lock();
                diagram.write(format.into(), &mut stdout)?;
                stdout.flush()?;
            }
            Ok(())
        }
    }
}

fn write_schema(path: &Path) -> anyhow::Result<usize> {
    write_schema_file(path)
        .with_context(|| format!("Failed to write the schema to {}", path.display()))
}

/// Logs to stderr. `RUST_LOG` takes precedence over `--verbose` and `--quiet`.
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug,hyper_util=info,reqwest=info"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
