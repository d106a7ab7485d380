use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use breakdown_parser::{analyze, Breakdown};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const CHUNK_SIZE: usize = 500;
const RESPONSE_EXTENSIONS: &[&str] = &["md", "txt"];

/// One JSON line of batch output.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub source: String,
    pub breakdown: Breakdown,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchCounts {
    pub parsed: usize,
    pub incomplete: usize,
    pub errors: usize,
    pub unreadable: usize,
}

impl BatchCounts {
    pub fn print(&self) {
        println!(
            "Parsed {} responses ({} incomplete), {} errors, {} unreadable.",
            self.parsed, self.incomplete, self.errors, self.unreadable,
        );
    }

    fn add(&mut self, row: &BatchRow) {
        match row.breakdown.record() {
            Some(record) => {
                self.parsed += 1;
                if !record.is_complete() {
                    self.incomplete += 1;
                }
            }
            None => self.errors += 1,
        }
    }
}

/// Response files directly inside `dir`, sorted by name.
pub fn collect_responses(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let accepted = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| RESPONSE_EXTENSIONS.contains(&e));
        if path.is_file() && accepted {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

pub fn breakdown_row(source: &str, text: &str) -> BatchRow {
    BatchRow {
        source: source.to_string(),
        breakdown: analyze(Some(text), None),
    }
}

/// Parse every file in parallel, chunk by chunk, writing one JSON line per
/// file in input order.
pub fn run_batch(paths: &[PathBuf], out: &mut impl Write) -> Result<BatchCounts> {
    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut counts = BatchCounts::default();

    for chunk in paths.chunks(CHUNK_SIZE) {
        let rows: Vec<Option<BatchRow>> = chunk
            .par_iter()
            .map(|path| match fs::read_to_string(path) {
                Ok(text) => Some(breakdown_row(&path.display().to_string(), &text)),
                Err(e) => {
                    warn!("Could not read {}: {}", path.display(), e);
                    None
                }
            })
            .collect();

        for row in rows {
            let Some(row) = row else {
                counts.unreadable += 1;
                continue;
            };
            counts.add(&row);
            serde_json::to_writer(&mut *out, &row)?;
            writeln!(out)?;
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    info!(
        "Batch done: {} parsed, {} errors, {} unreadable",
        counts.parsed, counts.errors, counts.unreadable
    );
    Ok(counts)
}

#[derive(Debug, PartialEq, Eq)]
pub enum Problem {
    /// The line is not a batch row.
    Unreadable(String),
    /// The stored breakdown is an error object.
    Error(String),
    /// Parsed, but vocabulary is missing or unexplained.
    Incomplete,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CheckIssue {
    pub line: usize,
    pub source: String,
    pub problem: Problem,
}

/// Scan batch output for rows that need regenerating.
pub fn check_rows(reader: impl BufRead) -> Result<Vec<CheckIssue>> {
    let mut issues = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let lineno = idx + 1;
        let row: BatchRow = match serde_json::from_str(&line) {
            Ok(row) => row,
            Err(e) => {
                issues.push(CheckIssue {
                    line: lineno,
                    source: String::new(),
                    problem: Problem::Unreadable(e.to_string()),
                });
                continue;
            }
        };
        let problem = match &row.breakdown {
            Breakdown::Failed { error } => Some(Problem::Error(error.clone())),
            Breakdown::Parsed(record) if !record.is_complete() => Some(Problem::Incomplete),
            Breakdown::Parsed(_) => None,
        };
        if let Some(problem) = problem {
            issues.push(CheckIssue {
                line: lineno,
                source: row.source,
                problem,
            });
        }
    }
    Ok(issues)
}
