use std::fmt;

use serde::Serialize;

use crate::shared::constants::{PHONETIC_CODE_LENGTH, PHONETIC_PAD};

/// Phonetic encoding of a single word.
///
/// Non-empty codes are exactly [`PHONETIC_CODE_LENGTH`] uppercase symbols,
/// right-padded with `'0'`. The primary form is used for every comparison;
/// the alternate form records the second reading of ambiguous letters
/// (e.g. `TH` as theta or `T`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PhoneticCode {
    primary: String,
    alternate: String,
}

impl PhoneticCode {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pads (or truncates) raw encoder output to the fixed code length.
    pub fn from_raw(primary: &str, alternate: &str) -> Self {
        Self {
            primary: pad(primary),
            alternate: pad(alternate),
        }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn alternate(&self) -> &str {
        &self.alternate
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// True when the code carries no pronounceable symbol: empty, or made
    /// only of padding/theta zeros (e.g. "the" encodes to `0000`).
    pub fn is_silent(&self) -> bool {
        self.primary.chars().all(|c| c == PHONETIC_PAD)
    }
}

impl fmt::Display for PhoneticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.primary)
    }
}

fn pad(raw: &str) -> String {
    raw.chars()
        .chain(std::iter::repeat(PHONETIC_PAD))
        .take(PHONETIC_CODE_LENGTH)
        .collect()
}
