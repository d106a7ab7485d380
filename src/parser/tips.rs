use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::lines::{self, LineCursor, ENGLISH, HIRAGANA, KANJI};
use crate::record::{NewWord, TipsInfo};

static TIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[-*•]\s*)?\*\*Tip\*\*(?:\s*\([^)]*\))?\s*:\s*(.*)$").unwrap()
});
static COMMON_MISTAKE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[-*•]\s*)?\*\*Common Mistake\*\*(?:\s*\([^)]*\))?\s*:\s*(.*)$").unwrap()
});
static ALTERNATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[-*•]\s*)?\*\*Alternative Expression(?:\s*\([^)]*\))?\*\*(?:\s*\([^)]*\))?\s*:?").unwrap()
});
static NEW_WORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[-*•]\s*)?\*\*New Words in Alternative Expression\*\*\s*:?").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TipsMode {
    None,
    Alternative,
    NewWords,
}

/// Marker lines, tried before the current mode sees the line.
#[derive(Debug, PartialEq, Eq)]
enum TipsMarker<'a> {
    Tip(&'a str),
    CommonMistake(&'a str),
    Alternative,
    NewWords,
}

fn captured<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

fn marker(line: &str) -> Option<TipsMarker<'_>> {
    if let Some(text) = captured(&TIP_RE, line) {
        Some(TipsMarker::Tip(text))
    } else if let Some(text) = captured(&COMMON_MISTAKE_RE, line) {
        Some(TipsMarker::CommonMistake(text))
    } else if NEW_WORDS_RE.is_match(line) {
        Some(TipsMarker::NewWords)
    } else if ALTERNATIVE_RE.is_match(line) {
        Some(TipsMarker::Alternative)
    } else {
        None
    }
}

pub fn parse_tips(cursor: LineCursor<'_>) -> TipsInfo {
    let mut tips = TipsInfo::default();
    let mut mode = TipsMode::None;

    for line in cursor {
        if let Some(m) = marker(line) {
            mode = match m {
                TipsMarker::Tip(text) => {
                    tips.tip = text.to_string();
                    TipsMode::None
                }
                TipsMarker::CommonMistake(text) => {
                    tips.common_mistake = text.to_string();
                    TipsMode::None
                }
                TipsMarker::Alternative => TipsMode::Alternative,
                TipsMarker::NewWords => TipsMode::NewWords,
            };
            continue;
        }

        match mode {
            TipsMode::None => {}
            TipsMode::Alternative if line.is_empty() => mode = TipsMode::None,
            TipsMode::Alternative => {
                let alt = &mut tips.alternative_expression;
                if let Some(v) = KANJI.value(line) {
                    alt.script = v.to_string();
                } else if let Some(v) = HIRAGANA.value(line) {
                    alt.transliteration = v.to_string();
                } else if let Some(v) = ENGLISH.value(line) {
                    alt.translation = v.to_string();
                }
            }
            TipsMode::NewWords => match lines::any_bullet(line) {
                Some(gloss) => tips.new_words_in_alternative.push(NewWord {
                    word: gloss.word,
                    reading: gloss.reading,
                    meaning: gloss.meaning,
                    description: gloss.role,
                }),
                None if !line.is_empty() => debug!("skipped new-word line: {}", line),
                None => {}
            },
        }
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> TipsInfo {
        parse_tips(LineCursor::new(text))
    }

    const SAMPLE: &str = "- **Tip**: Think of それから as “from then on.”
- **Common Mistake**: Beginners sometimes omit が or use に instead.

- **Alternative Expression**:
- **Kanji**: 10年が過ぎた。
- **Hiragana**: じゅうねんがすぎた。
- **English**: 10 years have gone by.

- **New Words in Alternative Expression**:
- **過ぎた (すぎた)**: “has passed” - [Verb, past tense]. It is the past tense of 過ぎる.
- 過ぎる (すぎる): \"to pass\" - verb
- This line is just a note.";

    #[test]
    fn full_block() {
        let t = parse(SAMPLE);
        assert_eq!(t.tip, "Think of それから as “from then on.”");
        assert_eq!(t.common_mistake, "Beginners sometimes omit が or use に instead.");
        assert_eq!(t.alternative_expression.script, "10年が過ぎた。");
        assert_eq!(t.alternative_expression.transliteration, "じゅうねんがすぎた。");
        assert_eq!(t.alternative_expression.translation, "10 years have gone by.");
        assert_eq!(t.new_words_in_alternative.len(), 2);
        assert_eq!(t.new_words_in_alternative[0].word, "過ぎた");
        assert_eq!(t.new_words_in_alternative[0].description, "Verb, past tense");
        assert_eq!(t.new_words_in_alternative[1].reading, "すぎる");
        assert_eq!(t.new_words_in_alternative[1].description, "verb");
    }

    #[test]
    fn new_words_marker_ends_alternative_without_blank_line() {
        let t = parse(
            "- **Alternative Expression**:\n\
             - **Kanji**: おばあさんはバスを降りた。\n\
             - **New Words in Alternative Expression**:\n\
             - **を (を)**: “[Object Marker]” - [Particle].",
        );
        assert_eq!(t.alternative_expression.script, "おばあさんはバスを降りた。");
        assert_eq!(t.new_words_in_alternative.len(), 1);
        assert_eq!(t.new_words_in_alternative[0].meaning, "[Object Marker]");
    }

    #[test]
    fn blank_line_ends_alternative() {
        let t = parse("- **Alternative Expression**:\n\n- **Kanji**: late");
        assert_eq!(t.alternative_expression.script, "");
    }

    #[test]
    fn tip_after_alternative_is_kept() {
        let t = parse("- **Alternative Expression**:\n- **English**: x\n- **Tip**: remember");
        assert_eq!(t.alternative_expression.translation, "x");
        assert_eq!(t.tip, "remember");
    }

    #[test]
    fn tip_resets_new_words_mode() {
        let t = parse(
            "- **New Words in Alternative Expression**:\n\
             - **Tip**: a tip\n\
             - **本 (ほん)**: \"book\" - [Noun]",
        );
        assert_eq!(t.tip, "a tip");
        assert!(t.new_words_in_alternative.is_empty());
    }

    #[test]
    fn labels_outside_alternative_ignored() {
        let t = parse("- **Kanji**: 本");
        assert_eq!(t, TipsInfo::default());
    }

    #[test]
    fn marker_detection() {
        assert_eq!(marker("- **Tip**: x"), Some(TipsMarker::Tip("x")));
        assert_eq!(marker("- **Tip** (1-2 sentences): y"), Some(TipsMarker::Tip("y")));
        assert_eq!(marker("-**common mistake**: z"), Some(TipsMarker::CommonMistake("z")));
        assert_eq!(
            marker("- **Alternative Expression (if applicable)**:"),
            Some(TipsMarker::Alternative)
        );
        assert_eq!(
            marker("- **New Words in Alternative Expression**:"),
            Some(TipsMarker::NewWords)
        );
        assert_eq!(marker("- **Tips**: plural"), None);
    }

    #[test]
    fn no_markers_yield_defaults() {
        assert_eq!(parse("Nothing to see.\n- just prose"), TipsInfo::default());
        assert_eq!(parse(""), TipsInfo::default());
    }
}
