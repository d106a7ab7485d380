use std::iter::Peekable;
use std::str::Lines;
use std::sync::LazyLock;

use regex::Regex;

// - **明日 (あした)**: "tomorrow" - [Noun]
static PRIMARY_BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[-*•] ?\*\*(.*?)\s*\((.*?)\)\*\*:\s*["“]([^"”]+)["”]\s*-\s*\[(.*?)\]"#).unwrap()
});
// - 明日 (あした): "tomorrow" - noun, role optional and unbracketed
static FALLBACK_BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^[-*•] ?(?:\*\*)?(.*?)\s*\((.*?)\)(?:\*\*)?:\s*["“]([^"”]+)["”](?:\s*-\s*(.*))?"#,
    )
    .unwrap()
});
static CONTRIBUTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:[-*•] ?)?(?:\*\*)?Contribution to Overall Meaning(?:\s*\([^)]*\))?(?:\*\*)?\s*:\s*(.*)$",
    )
    .unwrap()
});
static COMPONENT_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)component breakdown").unwrap());
static ORDINAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").unwrap());

/// Peekable cursor over trimmed lines.
///
/// Block parsers pull lines with [`LineCursor::next`] and leave a boundary
/// line in place with [`LineCursor::next_if`], so whoever owns the outer
/// loop sees it next.
pub struct LineCursor<'a> {
    lines: Peekable<Lines<'a>>,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().peekable(),
        }
    }

    /// Consume the next line only if `pred` accepts it.
    pub fn next_if(&mut self, pred: impl FnOnce(&str) -> bool) -> Option<&'a str> {
        self.lines.next_if(|l| pred(l.trim())).map(|l| l.trim())
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.lines.next().map(|l| l.trim())
    }
}

/// Word, reading, meaning and role captured from one gloss bullet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gloss {
    pub word: String,
    pub reading: String,
    pub meaning: String,
    pub role: String,
}

impl Gloss {
    fn from_captures(caps: &regex::Captures) -> Self {
        let field = |i: usize| caps.get(i).map_or("", |m| m.as_str()).trim().to_string();
        Self {
            word: field(1),
            reading: field(2),
            meaning: field(3),
            role: field(4),
        }
    }
}

pub fn primary_bullet(line: &str) -> Option<Gloss> {
    PRIMARY_BULLET_RE
        .captures(line)
        .map(|caps| Gloss::from_captures(&caps))
}

/// Looser gloss: bold optional, role optional and not bracketed.
pub fn fallback_bullet(line: &str) -> Option<Gloss> {
    FALLBACK_BULLET_RE
        .captures(line)
        .map(|caps| Gloss::from_captures(&caps))
}

/// Primary first, fallback second.
pub fn any_bullet(line: &str) -> Option<Gloss> {
    primary_bullet(line).or_else(|| fallback_bullet(line))
}

/// Text after a "Contribution to Overall Meaning:" label, possibly empty.
pub fn contribution(line: &str) -> Option<&str> {
    CONTRIBUTION_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

pub fn is_component_marker(line: &str) -> bool {
    COMPONENT_MARKER_RE.is_match(line)
}

/// Line content after its bullet marker, or `None` if the line is not a
/// bullet. Horizontal rules are not bullets.
pub fn strip_bullet(line: &str) -> Option<&str> {
    if is_rule(line) {
        return None;
    }
    let rest = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('•'))
        .or_else(|| line.strip_prefix("* "))?;
    Some(rest.trim_start_matches(['-', ' ']).trim())
}

pub fn is_bullet(line: &str) -> bool {
    strip_bullet(line).is_some()
}

/// `---`, `***` or `___`.
pub fn is_rule(line: &str) -> bool {
    line.len() >= 3 && ['-', '*', '_'].iter().any(|&c| line.chars().all(|ch| ch == c))
}

pub fn starts_with_ordinal(line: &str) -> bool {
    ORDINAL_RE.is_match(line)
}

/// A `**Label**: value` line, optionally bulleted.
pub struct LabelRule {
    re: Regex,
}

impl LabelRule {
    pub fn new(label: &str) -> Self {
        let pattern = format!(
            r"(?i)^(?:[-*•]\s*)?\*\*{}\*\*\s*:\s*(.*)$",
            regex::escape(label)
        );
        Self {
            re: Regex::new(&pattern).unwrap(),
        }
    }

    pub fn value<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.re
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    }
}

pub static KANJI: LazyLock<LabelRule> = LazyLock::new(|| LabelRule::new("Kanji"));
pub static HIRAGANA: LazyLock<LabelRule> = LazyLock::new(|| LabelRule::new("Hiragana"));
pub static ENGLISH: LazyLock<LabelRule> = LazyLock::new(|| LabelRule::new("English"));
pub static ENGLISH_TRANSLATION: LazyLock<LabelRule> =
    LazyLock::new(|| LabelRule::new("English Translation"));
