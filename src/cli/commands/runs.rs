use std::path::{ Path, PathBuf };

use anyhow::Result;

use crate::cli::commands::{ build_oracle, run_config };
use crate::cli::ui;
use crate::cli::RunArgs;
use ptltl_bench::config::RunConfig;
use ptltl_bench::errors::BenchResult;
use ptltl_bench::implementations::config::ToolConfig;
use ptltl_bench::implementations::dataset::{
    load_ltl_examples,
    load_reference_formulas,
    load_requirements,
};
use ptltl_bench::implementations::generator::OpenAiGenerator;
use ptltl_bench::implementations::pipeline::BatchDriver;
use ptltl_bench::implementations::results::{ ResultSink, ResultTable };
use ptltl_bench::implementations::schema_registry::SchemaRegistry;
use ptltl_bench::models::common::{ Domain, OracleKind };
use ptltl_bench::models::record::SuccessTally;

fn driver(config: &ToolConfig, registry: &SchemaRegistry, run: RunConfig) -> Result<BatchDriver> {
    let generator = OpenAiGenerator::new(config.clone(), run.model.clone(), run.temperature)?
        .for_oracle(run.oracle);
    ui::print_result("Model", generator.model());
    ui::print_result("Domain", &run.domain.to_string());
    ui::print_result("Oracle", &run.oracle.to_string());

    let oracle = build_oracle(run.oracle, config, registry);
    Ok(BatchDriver::new(run, registry, Box::new(generator), oracle)?)
}

fn sink(run: &RunConfig, table: ResultTable) -> Result<ResultSink> {
    let sink = ResultSink::for_run(run.output.as_deref(), run.temperature, table)?;
    ui::print_info(&format!("Writing results to {}", sink.path().display()));
    Ok(sink)
}

/// Rows are already on disk; on failure only say where they are
fn finish(sink: ResultSink, outcome: BenchResult<SuccessTally>) -> Result<()> {
    match outcome {
        Ok(tally) => {
            let path = sink.finish()?;
            ui::print_tally(&tally);
            ui::print_success(&format!("Results saved to {}", path.display()));
            Ok(())
        }
        Err(e) => {
            ui::print_warning(
                &format!(
                    "Run stopped after {} records; partial results kept in {}",
                    sink.written(),
                    sink.path().display()
                )
            );
            Err(e.into())
        }
    }
}

/// Batch translation of dataset requirements
pub async fn translate(
    config: &ToolConfig,
    registry: &SchemaRegistry,
    input: &Path,
    chunk_size: usize,
    args: &RunArgs
) -> Result<()> {
    ui::print_header("Requirement Translation");

    let run = run_config(args, registry, chunk_size)?;
    let rows = load_requirements(input)?;
    ui::print_info(&format!("Loaded {} requirements", rows.len()));

    let driver = driver(config, registry, run.clone())?;
    let mut sink = sink(&run, ResultTable::PtLtl)?;
    let spinner = ui::spinner_with_message("Translating and checking requirements...");
    let outcome = driver.run_translation(&rows, &mut sink).await;
    spinner.finish_and_clear();

    finish(sink, outcome)
}

/// Round trips starting from dataset formulas
pub async fn round_trip(
    config: &ToolConfig,
    registry: &SchemaRegistry,
    input: &Path,
    args: &RunArgs
) -> Result<()> {
    ui::print_header("Round Trip");

    let run = run_config(args, registry, RunConfig::default().chunk_size)?;
    let formulas = load_reference_formulas(input)?;
    ui::print_info(&format!("Sampling from {} reference formulas", formulas.len()));

    let driver = driver(config, registry, run.clone())?;
    let mut sink = sink(&run, ResultTable::PtLtl)?;
    let spinner = ui::spinner_with_message("Running round trips...");
    let outcome = driver.run_round_trip(&formulas, &mut sink).await;
    spinner.finish_and_clear();

    finish(sink, outcome)
}

/// Round trips starting from synthesized formulas
pub async fn synthetic(config: &ToolConfig, registry: &SchemaRegistry, args: &RunArgs) -> Result<()> {
    ui::print_header("Synthetic Round Trip");

    let run = run_config(args, registry, RunConfig::default().chunk_size)?;
    let driver = driver(config, registry, run.clone())?;
    let mut sink = sink(&run, ResultTable::PtLtl)?;
    let spinner = ui::spinner_with_message("Synthesizing and checking formulas...");
    let outcome = driver.run_synthetic(&mut sink).await;
    spinner.finish_and_clear();

    finish(sink, outcome)
}

/// Future-time LTL over the lifted corpus, decided in-process
pub async fn ltl(
    config: &ToolConfig,
    registry: &SchemaRegistry,
    input: &Path,
    model: Option<String>,
    temperature: f32,
    iterations: u32,
    output: Option<PathBuf>
) -> Result<()> {
    ui::print_header("LTL Translation");

    let run = RunConfig {
        model,
        temperature,
        iterations,
        domain: Domain::Lifted,
        oracle: OracleKind::Automata,
        output,
        ..RunConfig::default()
    };
    run.validate()?;

    let examples = load_ltl_examples(input)?;
    ui::print_info(&format!("Loaded {} examples", examples.len()));

    let driver = driver(config, registry, run.clone())?;
    let mut sink = sink(&run, ResultTable::Ltl)?;
    let spinner = ui::spinner_with_message("Translating and checking LTL...");
    let outcome = driver.run_ltl(&examples, &mut sink).await;
    spinner.finish_and_clear();

    finish(sink, outcome)
}
