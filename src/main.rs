mod batch;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "breakdown", about = "Parse tutor explanations into structured breakdowns")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one response and print its breakdown as JSON
    Parse {
        /// Response file (default: stdin)
        file: Option<PathBuf>,
        /// Translation of the analyzed sentence
        #[arg(short, long)]
        translation: Option<String>,
        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },
    /// Parse every .md/.txt response in a directory into JSON lines
    Batch {
        dir: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Worker threads (default: one per core)
        #[arg(short, long)]
        jobs: Option<usize>,
    },
    /// List rows of batch output that are errors or incomplete
    Check {
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            file,
            translation,
            pretty,
        } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let breakdown = breakdown_parser::analyze(Some(&text), translation.as_deref());
            let json = if pretty {
                serde_json::to_string_pretty(&breakdown)?
            } else {
                serde_json::to_string(&breakdown)?
            };
            println!("{}", json);
            Ok(())
        }
        Commands::Batch { dir, out, jobs } => {
            if let Some(n) = jobs {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build_global()
                    .context("configuring worker threads")?;
            }
            let paths = batch::collect_responses(&dir)?;
            if paths.is_empty() {
                eprintln!("No .md or .txt responses in {}.", dir.display());
                return Ok(());
            }
            eprintln!("Parsing {} responses...", paths.len());
            let counts = match out {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    let mut writer = BufWriter::new(file);
                    let counts = batch::run_batch(&paths, &mut writer)?;
                    writer.flush()?;
                    counts
                }
                None => batch::run_batch(&paths, &mut io::stdout().lock())?,
            };
            counts.print();
            Ok(())
        }
        Commands::Check { file } => {
            let reader = BufReader::new(
                File::open(&file).with_context(|| format!("opening {}", file.display()))?,
            );
            let issues = batch::check_rows(reader)?;
            if issues.is_empty() {
                println!("All breakdowns are complete.");
                return Ok(());
            }

            println!("{:<6} | {:<32} | Problem", "Line", "Source");
            println!("{}", "-".repeat(72));
            for issue in &issues {
                let problem = match &issue.problem {
                    batch::Problem::Unreadable(e) => format!("unreadable ({})", truncate(e, 40)),
                    batch::Problem::Error(e) => format!("error: {}", e),
                    batch::Problem::Incomplete => "incomplete".to_string(),
                };
                println!(
                    "{:<6} | {:<32} | {}",
                    issue.line,
                    truncate(&issue.source, 32),
                    problem
                );
            }
            println!("\n{} of the rows need regenerating.", issues.len());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Cut `s` to `max` characters for table columns.
fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}
