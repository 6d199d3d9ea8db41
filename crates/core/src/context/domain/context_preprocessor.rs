use crate::shared::text::tokenize;

/// Recognizer slips seen when the expected phrase is about food.
const FOOD_CORRECTIONS: &[(&str, &str)] = &[
    ("V8", "we ate"),
    ("V 8", "we ate"),
    ("we 8", "we ate"),
    ("we eight", "we ate"),
    ("VI", "we"),
    ("V", "we"),
];

/// Letter-name transcriptions of "she sees" style phrases.
const DIRECT_SPEECH_CORRECTIONS: &[(&str, &str)] = &[
    ("ccs", "she sees"),
    ("cc", "she sees"),
    ("cs", "she sees"),
    ("c", "see"),
];

/// Context labels that switch on the food corrections.
const FOOD_CONTEXT_MARKERS: &[&str] = &["food", "eating"];

/// Ordered whole-token rewrite rules, matched case-insensitively.
///
/// Punctuation at token edges is ignored when matching and carried over to
/// the replacement, so `"V8,"` rewrites to `"we ate,"`.
///
/// Each rule rewrites every occurrence of its token sequence before the next
/// rule runs, so later rules see the output of earlier ones.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    rules: Vec<(Vec<String>, Vec<String>)>,
}

impl SubstitutionTable {
    pub fn new<'a, I>(rules: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(|(from, to)| (tokenize(from), tokenize(to)))
                .filter(|(from, _)| !from.is_empty())
                .collect(),
        }
    }

    pub fn food() -> Self {
        Self::new(FOOD_CORRECTIONS.iter().copied())
    }

    pub fn direct_speech() -> Self {
        Self::new(DIRECT_SPEECH_CORRECTIONS.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rewrites `phrase`, returning its tokens joined by single spaces.
    pub fn apply(&self, phrase: &str) -> String {
        let mut tokens = tokenize(phrase);
        for (from, to) in &self.rules {
            tokens = replace_sequence(&tokens, from, to);
        }
        tokens.join(" ")
    }
}

/// Splits a token into leading punctuation, its alphanumeric core and
/// trailing punctuation.
fn split_edges(token: &str) -> (&str, &str, &str) {
    let is_edge = |c: char| !c.is_alphanumeric();
    let start = token.len() - token.trim_start_matches(is_edge).len();
    let core = token[start..].trim_end_matches(is_edge);
    let end = start + core.len();
    (&token[..start], core, &token[end..])
}

fn same_word(token: &str, pattern: &str) -> bool {
    let (_, core, _) = split_edges(token);
    let (_, pattern, _) = split_edges(pattern);
    !core.is_empty() && core.to_lowercase() == pattern.to_lowercase()
}

fn replace_sequence(tokens: &[String], from: &[String], to: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let end = i + from.len();
        let hit = end <= tokens.len()
            && tokens[i..end]
                .iter()
                .zip(from)
                .all(|(t, f)| same_word(t, f));
        if hit {
            let mut replacement = to.to_vec();
            let (leading, _, _) = split_edges(&tokens[i]);
            let (_, _, trailing) = split_edges(&tokens[end - 1]);
            if let Some(first) = replacement.first_mut() {
                first.insert_str(0, leading);
            }
            if let Some(last) = replacement.last_mut() {
                last.push_str(trailing);
            }
            out.extend(replacement);
            i = end;
        } else {
            out.push(tokens[i].clone());
            i += 1;
        }
    }
    out
}

/// Rewrites a recognized string before tokenization: context-specific
/// corrections first, then the always-on direct speech corrections.
#[derive(Debug, Clone)]
pub struct ContextPreprocessor {
    food: SubstitutionTable,
    direct: Option<SubstitutionTable>,
}

impl ContextPreprocessor {
    pub fn new(direct_corrections: bool) -> Self {
        Self {
            food: SubstitutionTable::food(),
            direct: direct_corrections.then(SubstitutionTable::direct_speech),
        }
    }

    pub fn with_tables(food: SubstitutionTable, direct: Option<SubstitutionTable>) -> Self {
        Self { food, direct }
    }

    /// Food corrections apply only when the label mentions food or eating.
    pub fn apply_context(&self, phrase: &str, context: Option<&str>) -> String {
        let food_context = context.is_some_and(|label| {
            let label = label.to_lowercase();
            FOOD_CONTEXT_MARKERS.iter().any(|m| label.contains(m))
        });
        if food_context {
            self.food.apply(phrase)
        } else {
            phrase.to_string()
        }
    }

    pub fn apply_direct(&self, phrase: &str) -> String {
        match &self.direct {
            Some(table) => table.apply(phrase),
            None => phrase.to_string(),
        }
    }

    pub fn preprocess(&self, phrase: &str, context: Option<&str>) -> String {
        let rewritten = self.apply_direct(&self.apply_context(phrase, context));
        if rewritten != phrase {
            log::debug!("preprocessed '{phrase}' -> '{rewritten}'");
        }
        rewritten
    }
}

impl Default for ContextPreprocessor {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::v8("V8 lunch", "we ate lunch")]
    #[case::spaced("v 8 lunch", "we ate lunch")]
    #[case::we_eight("We eight dinner", "we ate dinner")]
    #[case::lone_v("V had lunch", "we had lunch")]
    #[case::vi("VI like apples", "we like apples")]
    #[case::substring_untouched("Vivian ate", "Vivian ate")]
    #[case::trailing_comma("V8, lunch", "we ate, lunch")]
    #[case::wrapped("(V8) lunch", "(we ate) lunch")]
    #[case::punctuated_sequence("We eight! dinner", "we ate! dinner")]
    #[case::punctuated_substring_untouched("Vivian, ate", "Vivian, ate")]
    fn test_food_corrections(#[case] phrase: &str, #[case] expected: &str) {
        let preprocessor = ContextPreprocessor::new(false);
        assert_eq!(preprocessor.apply_context(phrase, Some("eating")), expected);
    }

    #[rstest]
    #[case::none(None)]
    #[case::other_label(Some("movement"))]
    fn test_food_corrections_need_food_context(#[case] context: Option<&str>) {
        let preprocessor = ContextPreprocessor::new(false);
        assert_eq!(preprocessor.apply_context("V8 lunch", context), "V8 lunch");
    }

    #[test]
    fn test_food_label_substring_counts() {
        let preprocessor = ContextPreprocessor::new(false);
        assert_eq!(preprocessor.apply_context("V8", Some("Healthy-Food")), "we ate");
    }

    #[rstest]
    #[case::ccs("ccs", "she sees")]
    #[case::upper("CC", "she sees")]
    #[case::c("she c it", "she see it")]
    #[case::inside_word("cactus", "cactus")]
    #[case::sentence_end("she c.", "she see.")]
    #[case::bare_punctuation("she , it", "she , it")]
    fn test_direct_corrections(#[case] phrase: &str, #[case] expected: &str) {
        assert_eq!(ContextPreprocessor::default().apply_direct(phrase), expected);
    }

    #[test]
    fn test_direct_corrections_can_be_disabled() {
        assert_eq!(ContextPreprocessor::new(false).apply_direct("ccs"), "ccs");
    }

    #[test]
    fn test_preprocess_runs_context_then_direct() {
        let preprocessor = ContextPreprocessor::default();
        assert_eq!(preprocessor.preprocess("V8  a cs", Some("eating")), "we ate a she sees");
    }

    #[test]
    fn test_custom_table() {
        let table = SubstitutionTable::new([("brushes her", "processor")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.apply("the Brushes her is fast"), "the processor is fast");
    }

    #[rstest]
    #[case::plain("V8", ("", "V8", ""))]
    #[case::both_edges("\"V8!\"", ("\"", "V8", "!\""))]
    #[case::inner_apostrophe("o'clock,", ("", "o'clock", ","))]
    #[case::only_punctuation("...", ("...", "", ""))]
    fn test_split_edges(#[case] token: &str, #[case] parts: (&str, &str, &str)) {
        assert_eq!(split_edges(token), parts);
    }

    #[test]
    fn test_empty_patterns_are_dropped() {
        let table = SubstitutionTable::new([("  ", "x")]);
        assert!(table.is_empty());
        assert_eq!(table.apply(" a  b "), "a b");
    }
}
