use clap::{ Args, Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "ptltl-bench",
    about = "Evaluate LLM-generated past-time LTL against reference formulas",
    version,
    author,
    long_about = None
)]
pub struct BenchCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the LLM-driven runs
#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Use case whose variable schema applies; prompts when omitted
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Chat model; defaults to the configured model
    #[arg(short, long)]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(short, long, default_value_t = 0.0)]
    pub temperature: f32,

    /// Number of iterations
    #[arg(short, long, default_value_t = 1)]
    pub iterations: u32,

    /// Equivalence oracle (model-checking, automata)
    #[arg(long, default_value = "model-checking")]
    pub oracle: String,

    /// Attempts per round trip before recording it as inconclusive
    #[arg(long, default_value_t = 3)]
    pub max_attempts: u32,

    /// Results file; defaults to results/<timestamp>_ptLTL_results.csv
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check two formulas for equivalence with the model checker
    Check {
        /// Reference formula
        reference: String,

        /// Candidate formula
        generated: String,

        /// Use case whose variable schema applies; prompts when omitted
        #[arg(short, long)]
        domain: Option<String>,

        /// Print the synthesized SMV model
        #[arg(long)]
        show_model: bool,
    },

    /// Check two future-time LTL formulas for equivalence in-process
    CheckLtl {
        first: String,
        second: String,
    },

    /// Rewrite Unicode operators into the verifier's ASCII syntax
    Normalize {
        formula: String,
    },

    /// List registered domains, or print one domain's declarations
    Schema {
        /// Domain to print; lists all domains when omitted
        domain: Option<String>,

        /// Print the prompt variable table instead of the VAR block
        #[arg(long)]
        table: bool,
    },

    /// Report identifiers used by a dataset's reference formulas
    Vars {
        /// Semicolon-delimited dataset
        #[arg(short, long)]
        input: PathBuf,

        /// Also report identifiers the domain does not declare
        #[arg(short, long)]
        domain: Option<String>,
    },

    /// Translate dataset requirements and compare against references
    Translate {
        /// Semicolon-delimited dataset
        #[arg(short = 'f', long)]
        input: PathBuf,

        /// Requirements sent per request
        #[arg(long, default_value_t = 5)]
        chunk_size: usize,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Paraphrase dataset formulas and translate them back
    RoundTrip {
        /// Semicolon-delimited dataset
        #[arg(short = 'f', long)]
        input: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Round trips over formulas the model synthesizes itself
    Synthetic {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Translate the lifted future-time LTL corpus and check it in-process
    Ltl {
        /// JSON-lines corpus with `logic_sentence` and `logic_ltl`
        #[arg(short = 'f', long, default_value = "lifted_data.jsonl")]
        input: PathBuf,

        /// Chat model; defaults to the configured model
        #[arg(short, long)]
        model: Option<String>,

        /// Sampling temperature
        #[arg(short, long, default_value_t = 1.0)]
        temperature: f32,

        /// Requirements translated, cycling through the shuffled corpus
        #[arg(short, long, default_value_t = 100)]
        iterations: u32,

        /// Results file; defaults to results/<timestamp>_LTL_results.csv
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that the verifier and API credentials are usable
    Doctor,
}
