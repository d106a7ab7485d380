pub mod grammar;
pub mod lines;
pub mod sections;
pub mod tips;
pub mod vocab;

use std::panic;

use tracing::{debug, warn};

use crate::error::ParseError;
use crate::record::BreakdownRecord;
use lines::LineCursor;

/// Two-pass pipeline: response → sections → vocabulary, grammar and tips.
pub fn parse_response(text: &str) -> Result<BreakdownRecord, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::NoResponseText);
    }

    panic::catch_unwind(|| build_record(text)).map_err(|_| {
        warn!("breakdown scan faulted on {} bytes of input", text.len());
        ParseError::Internal
    })
}

fn build_record(text: &str) -> BreakdownRecord {
    let sections = sections::split_sections(text);
    debug!(
        "sections: vocabulary={} grammar={} tips={} bytes",
        sections.vocabulary.len(),
        sections.grammar.len(),
        sections.tips.len()
    );

    BreakdownRecord {
        vocabulary: vocab::parse_vocabulary(LineCursor::new(sections.vocabulary)),
        grammar: grammar::parse_grammar(LineCursor::new(sections.grammar)),
        tips: tips::parse_tips(LineCursor::new(sections.tips)),
    }
}
