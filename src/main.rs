//! testimony CLI: generate witness puzzles and probe models with them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use testimony::export::{self, Progress, ResultRecord};
use testimony::generator::{Case, CaseGenerator, GeneratorConfig};
use testimony::model::{self, Answerer};
use testimony::pool::{NamePool, StatementPool};
use testimony::shape::Shape;

#[derive(Parser)]
#[command(name = "testimony", version, about = "Witness-testimony reasoning puzzles")]
struct Cli {
    /// Shuffle sentence order within each rendered prompt.
    #[arg(long, global = true)]
    shuffle: bool,

    /// RNG seed for reproducible generation.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// External witness-name pool (TOML). Defaults to the bundled pool.
    #[arg(long, global = true)]
    names: Option<PathBuf>,

    /// External statement pool (TOML). Defaults to the bundled pool.
    #[arg(long, global = true)]
    statements: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single case and print it.
    Gen {
        /// Linear mode: total argument count.
        #[arg(long, conflicts_with = "branches")]
        args: Option<usize>,

        /// Branching mode: comma-separated branch lengths (e.g. "2,2,3").
        #[arg(long, value_delimiter = ',')]
        branches: Option<Vec<usize>>,
    },

    /// Generate one case per partition of `max-args - 1`.
    Sweep {
        /// Argument budget: every case has exactly this many arguments.
        #[arg(long)]
        max_args: usize,

        /// Append cases to this CSV file instead of printing them.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Sweep, send each prompt to a model, and record the replies.
    Ask {
        /// Model id (e.g. "gpt-4o", "claude-3-5-sonnet-latest", "dummy").
        #[arg(long)]
        model: String,

        /// Argument budget for the sweep.
        #[arg(long)]
        max_args: usize,

        /// Append one result row per case to this CSV file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let name_pool = match &cli.names {
        Some(path) => NamePool::from_file(path).into_diagnostic()?,
        None => NamePool::bundled().into_diagnostic()?,
    };
    let statement_pool = match &cli.statements {
        Some(path) => StatementPool::from_file(path).into_diagnostic()?,
        None => StatementPool::bundled().into_diagnostic()?,
    };
    let mut generator = CaseGenerator::with_pools(
        name_pool,
        statement_pool,
        GeneratorConfig {
            shuffle_sentences: cli.shuffle,
            seed: cli.seed,
        },
    );

    match cli.command {
        Commands::Gen { args, branches } => {
            let shape = match (args, branches) {
                (Some(total), None) => Shape::Linear(total),
                (None, Some(lengths)) => Shape::Branching(lengths),
                _ => {
                    return Err(miette::miette!(
                        "pass exactly one of --args (linear) or --branches (branching)"
                    ));
                }
            };
            let case = generator.generate_case(shape).into_diagnostic()?;
            println!("{case}");
        }

        Commands::Sweep { max_args, out } => {
            let cases = generator.generate_all_cases(max_args).into_diagnostic()?;
            tracing::info!(count = cases.len(), max_args, "sweep complete");
            match out {
                Some(path) => export::append_cases(&path, &cases).into_diagnostic()?,
                None => {
                    for case in &cases {
                        println!("{case}\n");
                    }
                }
            }
        }

        Commands::Ask {
            model,
            max_args,
            out,
        } => {
            let backend = model::answerer_for(&model).into_diagnostic()?;
            let cases = generator.generate_all_cases(max_args).into_diagnostic()?;
            let mut progress = Progress::new(cases.len());

            for case in &cases {
                let record = ask_one(backend.as_ref(), case).into_diagnostic()?;
                match &out {
                    Some(path) => export::append_record(path, &record).into_diagnostic()?,
                    None => println!(
                        "{} | expected={} parsed={:?}",
                        record.shape, record.expected, record.parsed
                    ),
                }
                progress.tick();
            }
        }
    }

    Ok(())
}

fn ask_one(backend: &dyn Answerer, case: &Case) -> testimony::error::ModelResult<ResultRecord> {
    let response = backend.answer(&case.prompt)?;
    let parsed = model::parse_answer(&response);
    Ok(ResultRecord {
        model: backend.model_id().to_string(),
        num_arguments: case.num_arguments,
        shape: case.shape.to_string(),
        prompt: case.prompt.clone(),
        expected: case.answer,
        response,
        parsed,
    })
}
