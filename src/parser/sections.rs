use std::sync::LazyLock;

use regex::{Captures, Regex};

// ### 1. Vocabulary Breakdown / **2. Grammar Explanation**: / 3. Beginner Tips & Common Pitfalls
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?P<hash>#{1,6})?[ \t]*(?P<bold>\*\*)?[ \t]*(?P<ordinal>\d+\.)?[ \t]*(?P<bold_inner>\*\*)?[ \t]*(?:(?P<vocab>vocabulary)|(?P<grammar>grammar)|(?P<tips>(?:beginner(?:['’]?s)?[ \t]+)?tips))\b(?P<rest>[^\n]*)$",
    )
    .unwrap()
});

// What may follow the title on a heading line with no markup at all.
static BARE_TITLE_REST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[ \t]*(?:breakdown|explanation|(?:&|and)[ \t]*common[ \t]+pitfalls)?[ \t]*:[ \t]*$")
        .unwrap()
});

// Any numbered hash heading ("### 4. Example Dialogue") closes the open region.
static NUMBERED_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]*\d+\.[^\n]*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Vocabulary,
    Grammar,
    Tips,
}

/// The three regions of a response, each empty when its heading is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections<'a> {
    pub vocabulary: &'a str,
    pub grammar: &'a str,
    pub tips: &'a str,
}

struct Heading {
    kind: SectionKind,
    start: usize,
    end: usize,
}

/// Split a response at its recognized headings.
///
/// Each region runs from the end of the first heading of its kind to the
/// start of the next heading of any kind, or of the next numbered `#`
/// heading even when its title is not one of the three.
pub fn split_sections(text: &str) -> Sections<'_> {
    let headings: Vec<Heading> = HEADING_RE
        .captures_iter(text)
        .filter_map(|caps| heading_from(&caps))
        .collect();
    let mut bounds: Vec<usize> = headings
        .iter()
        .map(|h| h.start)
        .chain(NUMBERED_HEADING_RE.find_iter(text).map(|m| m.start()))
        .collect();
    bounds.sort_unstable();

    let mut sections = Sections::default();
    let mut seen: Vec<SectionKind> = Vec::with_capacity(3);
    for heading in &headings {
        if seen.contains(&heading.kind) {
            continue;
        }
        seen.push(heading.kind);
        let slot = match heading.kind {
            SectionKind::Vocabulary => &mut sections.vocabulary,
            SectionKind::Grammar => &mut sections.grammar,
            SectionKind::Tips => &mut sections.tips,
        };
        let end = bounds
            .iter()
            .copied()
            .find(|&b| b >= heading.end)
            .unwrap_or(text.len());
        *slot = text[heading.end..end].trim();
    }
    sections
}

fn heading_from(caps: &Captures) -> Option<Heading> {
    // Without markup only "Title:" counts, so prose starting with a title word is skipped.
    let marked = ["hash", "bold", "ordinal", "bold_inner"]
        .iter()
        .any(|g| caps.name(g).is_some());
    let rest = caps.name("rest").map_or("", |m| m.as_str());
    if !marked && !BARE_TITLE_REST_RE.is_match(rest) {
        return None;
    }

    let kind = if caps.name("vocab").is_some() {
        SectionKind::Vocabulary
    } else if caps.name("grammar").is_some() {
        SectionKind::Grammar
    } else {
        SectionKind::Tips
    };
    let whole = caps.get(0)?;
    Some(Heading {
        kind,
        start: whole.start(),
        end: whole.end(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_headings() {
        let text = "### 1. Vocabulary Breakdown\nvocab\n### 2. Grammar Explanation\ngrammar\n### 3. Beginner Tips & Common Pitfalls\ntips";
        let s = split_sections(text);
        assert_eq!(s.vocabulary, "vocab");
        assert_eq!(s.grammar, "grammar");
        assert_eq!(s.tips, "tips");
    }

    #[test]
    fn heading_variants() {
        let text = "## Vocabulary:\nv\n**2. Grammar Explanation**:\ng\n3. **Tips**\nt";
        let s = split_sections(text);
        assert_eq!(s.vocabulary, "v");
        assert_eq!(s.grammar, "g");
        assert_eq!(s.tips, "t");

        let s = split_sections("Vocabulary Breakdown:\nv\nGrammar:\ng\nTips & Common Pitfalls:\nt");
        assert_eq!(s.vocabulary, "v");
        assert_eq!(s.grammar, "g");
        assert_eq!(s.tips, "t");
    }

    #[test]
    fn possessive_beginner_tips() {
        assert_eq!(split_sections("### 3. Beginner's Tips\nt").tips, "t");
        assert_eq!(split_sections("**Beginners Tips**\nt").tips, "t");
        assert_eq!(split_sections("### Beginner’s Tips:\nt").tips, "t");
    }

    #[test]
    fn numbered_heading_closes_region() {
        let s = split_sections(
            "### 3. Beginner Tips & Common Pitfalls\n- **Tip**: real tip\n\n### 4. Example Dialogue\n- **Tip**: dialogue line",
        );
        assert_eq!(s.tips, "- **Tip**: real tip");
    }

    #[test]
    fn numbered_heading_opens_nothing() {
        let s = split_sections("### 1. Vocabulary\nv\n### 2. Culture Notes\nnotes\n### 3. Grammar\ng");
        assert_eq!(s.vocabulary, "v");
        assert_eq!(s.grammar, "g");
        assert_eq!(s.tips, "");
    }

    #[test]
    fn unnumbered_hash_heading_does_not_close() {
        let s = split_sections("### Vocabulary\nv\n### Notes\nmore");
        assert_eq!(s.vocabulary, "v\n### Notes\nmore");
    }

    #[test]
    fn missing_heading_is_empty() {
        let s = split_sections("### 3. Beginner Tips\n- **Tip**: x");
        assert_eq!(s.vocabulary, "");
        assert_eq!(s.grammar, "");
        assert_eq!(s.tips, "- **Tip**: x");
    }

    #[test]
    fn out_of_order_headings() {
        let s = split_sections("### Tips\nt\n### Vocabulary\nv");
        assert_eq!(s.tips, "t");
        assert_eq!(s.vocabulary, "v");
        assert_eq!(s.grammar, "");
    }

    #[test]
    fn unmarked_words_are_not_headings() {
        let s = split_sections("Vocabulary is hard.\nTips help.\nGrammar: mind the particles.");
        assert_eq!(s, Sections::default());
    }

    #[test]
    fn bullets_are_not_headings() {
        let s = split_sections("### Vocabulary\n- **Grammar (ぐらま)**: \"grammar\" - [Noun]\nmore");
        assert!(s.vocabulary.contains("Grammar (ぐらま)"));
        assert!(s.vocabulary.ends_with("more"));
        assert_eq!(s.grammar, "");
    }

    #[test]
    fn first_heading_of_a_kind_wins() {
        let s = split_sections("### Vocabulary\nfirst\n### Vocabulary\nsecond");
        assert_eq!(s.vocabulary, "first");
    }

    #[test]
    fn empty_first_region_is_kept() {
        let s = split_sections("### Vocabulary\n### Grammar\ng\n### Vocabulary\nlate");
        assert_eq!(s.vocabulary, "");
        assert_eq!(s.grammar, "g");
    }

    #[test]
    fn empty_text() {
        assert_eq!(split_sections(""), Sections::default());
    }
}
