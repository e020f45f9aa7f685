//! geo-qa CLI: Ukrainian geography question answering.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use geo_qa::config::QaConfig;
use geo_qa::qa::{Question, QuestionPipeline};

#[derive(Parser)]
#[command(name = "geo-qa", version, about = "Answer geography questions in Ukrainian")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Knowledge base file (Turtle, N-Triples or RDF/XML; `.gz` is decompressed).
    #[arg(long, global = true)]
    kb: Option<PathBuf>,

    /// JSON morphological lexicon (defaults to the bundled one).
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer questions read from stdin, one per line, until `exit`.
    Repl,

    /// Answer a single question.
    Ask {
        /// The question; several arguments are joined with spaces.
        #[arg(required = true)]
        question: Vec<String>,
    },

    /// Answer every line of a file and report how many were answered.
    Evaluate {
        /// File with one question per line.
        #[arg(long)]
        file: PathBuf,

        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
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
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => QaConfig::load(path)?,
        None => QaConfig::default(),
    };
    if let Some(kb) = cli.kb {
        config.knowledge_base.path = kb;
    }
    if let Some(lexicon) = cli.lexicon {
        config.morphology.lexicon = Some(lexicon);
    }

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            println!("Зачекайте, будь ласка, триває завантаження бази знань!");
            let pipeline = QuestionPipeline::from_config(&config)?;
            println!("\n...Базу завантажено!");
            repl(&pipeline)?;
        }

        Commands::Ask { question } => {
            let pipeline = QuestionPipeline::from_config(&config)?;
            print!("{}", pipeline.process(&Question::new(question.join(" "))));
        }

        Commands::Evaluate { file, json } => {
            let content = std::fs::read_to_string(&file).into_diagnostic()?;
            let questions: Vec<String> = content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect();

            let pipeline = QuestionPipeline::from_config(&config)?;
            let evaluation = pipeline.evaluate(&questions);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&evaluation).into_diagnostic()?
                );
            } else {
                for result in &evaluation.results {
                    println!("{}", result.question);
                    println!("{}", result.reply);
                }
                println!("Правильних відповідей {}", evaluation.answered);
                println!("Точність системи - {:.3}", evaluation.accuracy);
            }
        }
    }

    Ok(())
}

fn repl(pipeline: &QuestionPipeline) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Будь ласка, ставте географічні запитання.").into_diagnostic()?;
    writeln!(stdout, "(щоб завершити роботу, введіть exit)\n").into_diagnostic()?;
    stdout.flush().into_diagnostic()?;

    for line in std::io::stdin().lock().lines() {
        let line = line.into_diagnostic()?;
        if line.trim() == "exit" {
            break;
        }
        write!(stdout, "{}", pipeline.process(&Question::new(line))).into_diagnostic()?;
        stdout.flush().into_diagnostic()?;
    }

    writeln!(stdout, "Завершення роботи.").into_diagnostic()?;
    Ok(())
}
