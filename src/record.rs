use serde::{Deserialize, Serialize};

/// Structured breakdown of one tutor response.
///
/// Serializes to the JSON layout the flashcard front end reads, so the
/// script/transliteration/translation triples keep their `kanji` /
/// `hiragana` / `english` keys on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakdownRecord {
    pub vocabulary: Vec<VocabEntry>,
    pub grammar: GrammarInfo,
    pub tips: TipsInfo,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabEntry {
    pub word: String,
    pub reading: String,
    pub meaning: String,
    pub role: String,
    pub components: Vec<Component>,
    pub combined_explanation: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    pub part: String,
    pub reading: String,
    pub meaning: String,
    pub contribution: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarInfo {
    pub context: String,
    pub steps: Vec<String>,
    pub sentence_pattern: String,
    #[serde(rename = "sentence_pattern_kanji", alias = "sentence_pattern_script")]
    pub sentence_pattern_script: String,
    #[serde(
        rename = "sentence_pattern_hiragana",
        alias = "sentence_pattern_transliteration"
    )]
    pub sentence_pattern_transliteration: String,
    #[serde(
        rename = "sentence_pattern_english",
        alias = "sentence_pattern_translation"
    )]
    pub sentence_pattern_translation: String,
    /// Always empty; kept so grammar and vocabulary rows share a shape.
    pub contribution: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TipsInfo {
    pub tip: String,
    pub common_mistake: String,
    pub alternative_expression: Expression,
    pub new_words_in_alternative: Vec<NewWord>,
}

/// One sentence in three parallel representations.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    #[serde(rename = "kanji", alias = "script")]
    pub script: String,
    #[serde(rename = "hiragana", alias = "transliteration")]
    pub transliteration: String,
    #[serde(rename = "english", alias = "translation")]
    pub translation: String,
}

impl Expression {
    pub fn is_empty(&self) -> bool {
        self.script.is_empty() && self.transliteration.is_empty() && self.translation.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NewWord {
    pub word: String,
    pub reading: String,
    pub meaning: String,
    pub description: String,
}

impl BreakdownRecord {
    /// A breakdown is complete when it has vocabulary and every entry is
    /// explained, either by components or by a combined explanation.
    /// Incomplete rows are the ones batch tooling regenerates.
    pub fn is_complete(&self) -> bool {
        !self.vocabulary.is_empty()
            && self
                .vocabulary
                .iter()
                .all(|v| !v.components.is_empty() || !v.combined_explanation.is_empty())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(components: usize, explanation: &str) -> VocabEntry {
        VocabEntry {
            word: "本".into(),
            reading: "ほん".into(),
            meaning: "book".into(),
            role: "Noun".into(),
            components: vec![Component::default(); components],
            combined_explanation: explanation.into(),
        }
    }

    #[test]
    fn default_record_is_all_empty() {
        let r = BreakdownRecord::default();
        assert!(r.vocabulary.is_empty());
        assert!(r.grammar.steps.is_empty());
        assert!(r.tips.alternative_expression.is_empty());
        assert!(r.tips.new_words_in_alternative.is_empty());
    }

    #[test]
    fn serializes_with_front_end_keys() {
        let mut r = BreakdownRecord::default();
        r.grammar.sentence_pattern_script = "彼は学校から帰った。".into();
        r.tips.alternative_expression.translation = "10 years have gone by.".into();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["grammar"]["sentence_pattern_kanji"], "彼は学校から帰った。");
        assert_eq!(v["grammar"]["contribution"], "");
        assert_eq!(
            v["tips"]["alternative_expression"]["english"],
            "10 years have gone by."
        );
        assert!(v["tips"]["new_words_in_alternative"].as_array().unwrap().is_empty());
    }

    #[test]
    fn deserializes_neutral_aliases() {
        let json = r#"{"script":"a","transliteration":"b","translation":"c"}"#;
        let e: Expression = serde_json::from_str(json).unwrap();
        assert_eq!(e.script, "a");
        assert_eq!(e.transliteration, "b");
        assert_eq!(e.translation, "c");
    }

    #[test]
    fn completeness_requires_explained_vocabulary() {
        let mut r = BreakdownRecord::default();
        assert!(!r.is_complete());

        r.vocabulary.push(entry(2, ""));
        r.vocabulary.push(entry(0, "Specifies the duration."));
        assert!(r.is_complete());

        r.vocabulary.push(entry(0, ""));
        assert!(!r.is_complete());
    }
}
