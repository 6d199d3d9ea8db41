use std::collections::{BTreeSet, HashMap};

/// Symbols that recognizers commonly confuse with one another.
const CONFUSIONS: &[(&str, &[&str])] = &[
    // Labials
    ("P", &["B", "F", "V", "PH"]),
    ("B", &["P", "F", "V"]),
    ("F", &["V", "P", "PH", "TH"]),
    ("V", &["F", "B", "P"]),
    ("PH", &["F", "P", "V"]),
    // Alveolars, fricatives, stops
    ("T", &["D", "TH", "S"]),
    ("D", &["T", "TH", "Z"]),
    ("TH", &["T", "D", "F", "V", "S", "Z"]),
    ("S", &["Z", "SH", "CH", "X", "T"]),
    ("Z", &["S", "ZH", "J", "D"]),
    // Velars
    ("K", &["G", "C", "Q"]),
    ("G", &["K", "C", "J"]),
    ("C", &["K", "S", "G", "CH", "Z"]),
    ("Q", &["K", "C", "G"]),
    // Post-alveolars, affricates
    ("CH", &["SH", "J", "S", "Z", "X", "T", "K"]),
    ("J", &["CH", "ZH", "G"]),
    ("SH", &["CH", "S", "ZH"]),
    ("ZH", &["J", "SH", "Z"]),
    ("X", &["S", "SH", "CH", "KS"]),
    // Nasals
    ("M", &["N"]),
    ("N", &["M", "NG"]),
    ("NG", &["N"]),
    // Liquids, glides
    ("L", &["R", "W"]),
    ("R", &["L", "W"]),
    ("W", &["R", "L", "V", "U", "O"]),
    ("Y", &["I", "E", "J"]),
    // Vowels
    ("A", &["E", "I", "O", "U", "AH"]),
    ("E", &["A", "I", "U"]),
    ("I", &["E", "A", "Y"]),
    ("O", &["U", "A", "AU"]),
    ("U", &["O", "A", "OO"]),
    ("AH", &["A", "O", "U"]),
    ("OO", &["U", "O"]),
    ("AI", &["EI", "AY"]),
    ("AU", &["OU", "AW"]),
    ("OU", &["AU", "OW"]),
    ("OW", &["OU", "O"]),
    // R-coloured vowels
    ("AR", &["ER", "UR"]),
    ("ER", &["AR", "UR"]),
    ("UR", &["ER", "AR"]),
    // Consonant clusters
    ("MP", &["M", "NP"]),
    ("PS", &["S", "FS"]),
    ("FS", &["F", "S"]),
];

/// Static acoustic confusion model over phonetic symbols.
#[derive(Debug, Clone)]
pub struct AcousticModel {
    confusions: HashMap<&'static str, &'static [&'static str]>,
}

impl AcousticModel {
    pub fn new() -> Self {
        Self {
            confusions: CONFUSIONS.iter().copied().collect(),
        }
    }

    /// Symbols listed as confusable with `symbol`, in table order.
    pub fn confusable(&self, symbol: &str) -> &'static [&'static str] {
        self.confusions.get(symbol).copied().unwrap_or(&[])
    }

    /// Equal, or listed as confusable in either direction.
    pub fn are_similar(&self, a: &str, b: &str) -> bool {
        a == b || self.confusable(a).contains(&b) || self.confusable(b).contains(&a)
    }

    /// The code itself plus every single-position substitution of one of
    /// its characters by a confusable symbol. Multi-letter substitutes
    /// lengthen the variant (e.g. `P` → `PH`).
    pub fn expand_variants(&self, code: &str) -> BTreeSet<String> {
        let chars: Vec<char> = code.chars().collect();
        let mut variants = BTreeSet::new();
        variants.insert(code.to_string());

        let mut buf = [0u8; 4];
        for (i, ch) in chars.iter().enumerate() {
            let symbol: &str = ch.encode_utf8(&mut buf);
            for alt in self.confusable(symbol) {
                let mut variant = String::with_capacity(code.len() + alt.len());
                variant.extend(&chars[..i]);
                variant.push_str(alt);
                variant.extend(&chars[i + 1..]);
                variants.insert(variant);
            }
        }

        variants
    }
}

impl Default for AcousticModel {
    fn default() -> Self {
        Self::new()
    }
}
