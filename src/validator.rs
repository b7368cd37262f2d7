//! Word eligibility gate.
//!
//! WordNet carries multi-word phrases joined by `_` (`battle_of_Wagram`) and
//! tokens containing digits (`.22-caliber`, `155th`) that an embedding model
//! trained on running text cannot meaningfully answer for. Such lemmas never
//! participate in scoring.

/// Separator WordNet uses inside multi-word lemmas.
pub const PHRASE_SEPARATOR: char = '_';

/// Eligibility check with the phrase-exclusion toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordValidator {
    pub exclude_phrases: bool,
}

impl Default for WordValidator {
    fn default() -> Self {
        Self { exclude_phrases: true }
    }
}

impl WordValidator {
    pub fn new(exclude_phrases: bool) -> Self {
        Self { exclude_phrases }
    }

    /// Digits are always rejected; phrases only while `exclude_phrases` is set.
    pub fn is_eligible(&self, lemma: &str) -> bool {
        if lemma.is_empty() || lemma.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }
        !(self.exclude_phrases && lemma.contains(PHRASE_SEPARATOR))
    }
}

/// Default eligibility: no phrases, no digits.
pub fn is_eligible(lemma: &str) -> bool {
    WordValidator::default().is_eligible(lemma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wordnet_examples() {
        assert!(!is_eligible("15"));
        assert!(!is_eligible(".22-caliber"));
        assert!(!is_eligible("155th"));
        assert!(!is_eligible("Y2K_compliant"));
        assert!(!is_eligible("battle_of_Wagram"));
        assert!(is_eligible("yarn-spinning"));
        assert!(is_eligible("Ukraine"));
    }

    #[test]
    fn test_phrase_toggle() {
        let permissive = WordValidator::new(false);
        assert!(permissive.is_eligible("battle_of_Wagram"));
        assert!(!permissive.is_eligible("Y2K_compliant"));
    }

    #[test]
    fn test_empty_lemma_rejected() {
        assert!(!is_eligible(""));
    }

    proptest! {
        #[test]
        fn prop_digits_rejected(prefix in "[a-zA-Z-]{0,8}", digit in 0u8..10, suffix in "[a-zA-Z-]{0,8}") {
            let lemma = format!("{prefix}{digit}{suffix}");
            prop_assert!(!is_eligible(&lemma));
        }

        #[test]
        fn prop_phrases_rejected(left in "[a-zA-Z]{1,8}", right in "[a-zA-Z]{1,8}") {
            let lemma = format!("{left}_{right}");
            prop_assert!(!is_eligible(&lemma));
        }

        #[test]
        fn prop_plain_words_accepted(lemma in "[a-zA-Z][a-zA-Z'.-]{0,15}") {
            prop_assert!(is_eligible(&lemma));
        }
    }
}
