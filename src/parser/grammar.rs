use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::lines::{self, LineCursor, ENGLISH_TRANSLATION, HIRAGANA, KANJI};
use crate::record::GrammarInfo;

// 1. **Context (1-2 sentences)** / **Steps** / 3. **Sentence Pattern**:
static BLOCK_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:\d+[.)]\s*)?(?:\*\*)?\s*(?:(?P<context>context)|(?P<steps>steps)|(?P<pattern>sentence pattern))\b(?P<rest>.*)$",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrammarBlock {
    Context,
    Steps,
    SentencePattern,
}

/// Which block a header line opens, plus any text after its colon.
fn block_header(line: &str) -> Option<(GrammarBlock, &str)> {
    let caps = BLOCK_HEADER_RE.captures(line)?;
    let block = if caps.name("context").is_some() {
        GrammarBlock::Context
    } else if caps.name("steps").is_some() {
        GrammarBlock::Steps
    } else {
        GrammarBlock::SentencePattern
    };
    let rest = caps.name("rest").map_or("", |m| m.as_str());
    let inline = rest.split_once(':').map_or("", |(_, after)| after.trim());
    Some((block, inline))
}

fn ends_block(line: &str) -> bool {
    line.is_empty() || block_header(line).is_some()
}

pub fn parse_grammar(mut cursor: LineCursor<'_>) -> GrammarInfo {
    let mut info = GrammarInfo::default();

    while let Some(line) = cursor.next() {
        let Some((block, inline)) = block_header(line) else {
            if !line.is_empty() {
                debug!("grammar line outside any block: {}", line);
            }
            continue;
        };
        match block {
            GrammarBlock::Context => info.context = read_context(&mut cursor, inline),
            GrammarBlock::Steps => info.steps = read_steps(&mut cursor),
            GrammarBlock::SentencePattern => read_sentence_pattern(&mut cursor, &mut info),
        }
    }

    info
}

fn read_context(cursor: &mut LineCursor<'_>, inline: &str) -> String {
    let mut parts = Vec::new();
    if !inline.is_empty() {
        parts.push(inline);
    }
    while let Some(line) = cursor.next_if(|l| !ends_block(l)) {
        parts.push(line);
    }
    parts.join(" ")
}

fn read_steps(cursor: &mut LineCursor<'_>) -> Vec<String> {
    let mut steps = Vec::new();
    while let Some(line) = cursor.next_if(|l| !ends_block(l)) {
        let step = lines::strip_bullet(line).unwrap_or(line);
        steps.push(step.to_string());
    }
    steps
}

fn read_sentence_pattern(cursor: &mut LineCursor<'_>, info: &mut GrammarInfo) {
    let mut pattern = Vec::new();
    while let Some(line) =
        cursor.next_if(|l| !ends_block(l) && !l.starts_with("---") && !lines::starts_with_ordinal(l))
    {
        pattern.push(line);

        if let Some(v) = KANJI.value(line) {
            info.sentence_pattern_script = v.to_string();
        } else if let Some(v) = HIRAGANA.value(line) {
            info.sentence_pattern_transliteration = v.to_string();
        } else if let Some(v) = ENGLISH_TRANSLATION.value(line) {
            info.sentence_pattern_translation = v.to_string();
        }
    }
    info.sentence_pattern = pattern.join("\n");
}
