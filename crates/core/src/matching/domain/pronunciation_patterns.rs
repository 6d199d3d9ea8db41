/// Known confusable word/phrase pairs, checked in order.
const DEFAULT_PAIRS: &[(&str, &str)] = &[
    ("she", "c"),
    ("c", "she"),
    ("she sees", "ccs"),
    ("ccs", "she sees"),
    ("she sees", "cc s"),
    ("cc s", "she sees"),
    ("she sees", "c cs"),
    ("c cs", "she sees"),
    ("c c", "she see"),
    ("she see", "c c"),
    ("she", "sea"),
    ("sea", "she"),
    ("sheep", "she"),
    ("she", "sheep"),
    ("seas", "she"),
    ("she", "seas"),
    ("see", "c"),
    ("c", "see"),
    ("she", "see"),
    ("see", "she"),
    ("to", "two"),
    ("two", "to"),
    ("too", "to"),
    ("to", "too"),
    ("there", "their"),
    ("their", "there"),
    ("where", "wear"),
    ("wear", "where"),
    ("for", "four"),
    ("four", "for"),
    ("one", "won"),
    ("won", "one"),
    ("know", "no"),
    ("no", "know"),
    ("right", "write"),
    ("write", "right"),
    ("night", "knight"),
    ("knight", "night"),
    ("processor", "brushes her"),
    ("process or", "brushes her"),
    ("brushes her", "processor"),
    ("brushes her", "process or"),
];

const EXACT_PAIR_BOOST: f64 = 0.3;
const CONTAINED_PAIR_BOOST: f64 = 0.1;

/// Replaceable table of pronunciation confusions between whole words or
/// short phrases (`she`/`c`, `right`/`write`).
#[derive(Debug, Clone)]
pub struct PronunciationPatterns {
    pairs: Vec<(String, String)>,
}

impl PronunciationPatterns {
    pub fn new<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(a, b)| (a.into().to_lowercase(), b.into().to_lowercase()))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Boost for `expected` heard as `recognized`.
    ///
    /// Scans pairs in order: a pair that matches both sides exactly (either
    /// direction) adds 0.3 and stops the scan; every earlier pair whose sides
    /// are merely contained in the two inputs adds 0.1.
    pub fn boost(&self, expected: &str, recognized: &str) -> f64 {
        let exp = expected.to_lowercase();
        let rec = recognized.to_lowercase();
        let mut boost = 0.0;

        for (a, b) in &self.pairs {
            if (exp == *a && rec == *b) || (exp == *b && rec == *a) {
                boost += EXACT_PAIR_BOOST;
                break;
            }
            if (exp.contains(a.as_str()) && rec.contains(b.as_str()))
                || (exp.contains(b.as_str()) && rec.contains(a.as_str()))
            {
                boost += CONTAINED_PAIR_BOOST;
            }
        }

        boost
    }
}

impl Default for PronunciationPatterns {
    fn default() -> Self {
        Self::new(DEFAULT_PAIRS.iter().copied())
    }
}
