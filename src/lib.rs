//! Recover a structured vocabulary / grammar / tips breakdown from the
//! markdown-like explanation a tutoring text generator writes for one
//! example sentence.
//!
//! ```no_run
//! let record = breakdown_parser::parse("### 1. Vocabulary Breakdown\n- **本 (ほん)**: \"book\" - [Noun]")?;
//! assert_eq!(record.vocabulary[0].word, "本");
//! # Ok::<(), breakdown_parser::ParseError>(())
//! ```

pub mod error;
mod parser;
pub mod record;

use serde::{Deserialize, Serialize};
use tracing::debug_span;

pub use error::ParseError;
pub use record::{BreakdownRecord, Component, Expression, GrammarInfo, NewWord, TipsInfo, VocabEntry};

/// Parse one generator response.
///
/// Fails only on empty input or an internal fault; any other malformed
/// text yields a partially populated record.
pub fn parse(text: &str) -> Result<BreakdownRecord, ParseError> {
    parser::parse_response(text)
}

/// Outcome of [`analyze`] as stored alongside the sentence: the record
/// itself, or `{"error": "..."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Breakdown {
    Failed { error: String },
    Parsed(BreakdownRecord),
}

impl Breakdown {
    pub fn record(&self) -> Option<&BreakdownRecord> {
        match self {
            Breakdown::Parsed(r) => Some(r),
            Breakdown::Failed { .. } => None,
        }
    }
}

impl From<Result<BreakdownRecord, ParseError>> for Breakdown {
    fn from(result: Result<BreakdownRecord, ParseError>) -> Self {
        match result {
            Ok(record) => Breakdown::Parsed(record),
            Err(e) => Breakdown::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Parse a response that may be absent. The translation belongs to the
/// caller's row and is only recorded on the tracing span.
pub fn analyze(text: Option<&str>, translation: Option<&str>) -> Breakdown {
    let _span = debug_span!("analyze", translation = translation.unwrap_or_default()).entered();
    match text {
        Some(text) => parse(text).into(),
        None => Err(ParseError::NoResponseText).into(),
    }
}
