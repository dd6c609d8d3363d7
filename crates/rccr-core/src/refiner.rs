use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use rccr_corrector::{CorrectorError, TextCorrector};

lazy_static! {
    /// Casual words and their replacements, applied in this order.
    /// Matching is case-insensitive and word-bounded; replacements are verbatim.
    static ref SUBSTITUTIONS: Vec<(Regex, &'static str)> = [
        (r"(?i)\bhi\b", "Hello"),
        (r"(?i)\bpls\b", "please"),
        (r"(?i)\btho\b", "though"),
        (r"(?i)\bthx\b", "Thanks"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("valid substitution pattern"),
            replacement,
        )
    })
    .collect();
}

const TERMINAL_PUNCTUATION: [char; 3] = ['.', '!', '?'];

/// Turns raw text into polished text: casual-word substitution, spelling
/// correction, first-letter capitalization, terminal punctuation.
pub struct TextRefiner {
    corrector: Box<dyn TextCorrector>,
}

impl TextRefiner {
    pub fn new(corrector: Box<dyn TextCorrector>) -> Self {
        Self { corrector }
    }

    pub fn corrector(&self) -> &dyn TextCorrector {
        self.corrector.as_ref()
    }

    /// Refine raw text.
    ///
    /// Whitespace-only input yields an empty string without consulting the
    /// corrector. Corrector failures are returned as-is.
    pub fn refine(&self, raw_text: &str) -> Result<String, CorrectorError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Ok(String::new());
        }

        let substituted = substitute_casual_words(text);

        debug!(
            corrector = self.corrector.name(),
            text_len = substituted.len(),
            "Correcting text"
        );
        let corrected = self.corrector.correct(&substituted)?;

        Ok(punctuate(capitalize_first(&corrected)))
    }
}

/// Replace standalone casual words with their professional forms
pub fn substitute_casual_words(text: &str) -> String {
    SUBSTITUTIONS
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn punctuate(mut text: String) -> String {
    match text.chars().last() {
        Some(last) if !TERMINAL_PUNCTUATION.contains(&last) => text.push('.'),
        _ => {}
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use rccr_corrector::{CorrectorType, PassthroughCorrector};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Replaces whole words from a fixed table and counts calls
    struct MockCorrector {
        fixes: Vec<(&'static str, &'static str)>,
        calls: Arc<AtomicUsize>,
    }

    impl TextCorrector for MockCorrector {
        fn name(&self) -> &str {
            "mock"
        }

        fn corrector_type(&self) -> CorrectorType {
            CorrectorType::Passthrough
        }

        fn correct(&self, text: &str) -> Result<String, CorrectorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(text
                .split(' ')
                .map(|w| {
                    self.fixes
                        .iter()
                        .find(|(from, _)| *from == w)
                        .map(|(_, to)| *to)
                        .unwrap_or(w)
                })
                .collect::<Vec<_>>()
                .join(" "))
        }
    }

    struct FailingCorrector;

    impl TextCorrector for FailingCorrector {
        fn name(&self) -> &str {
            "failing"
        }

        fn corrector_type(&self) -> CorrectorType {
            CorrectorType::Command
        }

        fn correct(&self, _text: &str) -> Result<String, CorrectorError> {
            Err(CorrectorError::ExecutionFailed("service down".into()))
        }
    }

    /// Returns a fixed string regardless of input
    struct FixedCorrector(&'static str);

    impl TextCorrector for FixedCorrector {
        fn name(&self) -> &str {
            "fixed"
        }

        fn corrector_type(&self) -> CorrectorType {
            CorrectorType::Passthrough
        }

        fn correct(&self, _text: &str) -> Result<String, CorrectorError> {
            Ok(self.0.to_string())
        }
    }

    fn passthrough() -> TextRefiner {
        TextRefiner::new(Box::new(PassthroughCorrector::new()))
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        let refiner = passthrough();
        assert_eq!(refiner.refine("").unwrap(), "");
        assert_eq!(refiner.refine("   ").unwrap(), "");
        assert_eq!(refiner.refine("\n\t").unwrap(), "");
    }

    #[test]
    fn test_whitespace_input_skips_corrector() {
        let calls = Arc::new(AtomicUsize::new(0));
        let refiner = TextRefiner::new(Box::new(MockCorrector {
            fixes: vec![],
            calls: calls.clone(),
        }));
        refiner.refine("  ").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        refiner.refine("ok").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hi_replaced_with_hello() {
        assert_eq!(passthrough().refine("hi there").unwrap(), "Hello there.");
    }

    #[test]
    fn test_substitution_respects_word_boundaries() {
        assert_eq!(passthrough().refine("this is fine").unwrap(), "This is fine.");
        assert_eq!(substitute_casual_words("those thoughts, thxx"), "those thoughts, thxx");
    }

    #[test]
    fn test_substitution_is_case_insensitive_with_fixed_casing() {
        assert_eq!(
            substitute_casual_words("HI team, PLS review tho. Thx"),
            "Hello team, please review though. Thanks"
        );
    }

    #[test]
    fn test_substitution_around_punctuation() {
        assert_eq!(substitute_casual_words("hi, pls!"), "Hello, please!");
    }

    #[test]
    fn test_corrector_output_is_capitalized_and_punctuated() {
        let refiner = TextRefiner::new(Box::new(MockCorrector {
            fixes: vec![("featur", "feature")],
            calls: Arc::new(AtomicUsize::new(0)),
        }));
        assert_eq!(
            refiner.refine("hi pls check the featur tho").unwrap(),
            "Hello please check the feature though."
        );
    }

    #[test]
    fn test_existing_terminal_punctuation_kept() {
        let refiner = passthrough();
        assert_eq!(refiner.refine("done.").unwrap(), "Done.");
        assert_eq!(refiner.refine("really?").unwrap(), "Really?");
        assert_eq!(refiner.refine("great!").unwrap(), "Great!");
    }

    #[test]
    fn test_single_character_input() {
        assert_eq!(passthrough().refine("a").unwrap(), "A.");
    }

    #[test]
    fn test_input_is_trimmed() {
        assert_eq!(passthrough().refine("  thx  ").unwrap(), "Thanks.");
    }

    #[test]
    fn test_uncased_first_character() {
        assert_eq!(passthrough().refine("42 apples").unwrap(), "42 apples.");
    }

    #[test]
    fn test_capitalization_uses_full_uppercase_mapping() {
        assert_eq!(passthrough().refine("ßig").unwrap(), "SSig.");
    }

    #[test]
    fn test_empty_corrector_output_stays_empty() {
        let refiner = TextRefiner::new(Box::new(FixedCorrector("")));
        assert_eq!(refiner.refine("anything").unwrap(), "");
    }

    #[test]
    fn test_corrector_failure_propagates() {
        let refiner = TextRefiner::new(Box::new(FailingCorrector));
        assert!(matches!(
            refiner.refine("hi"),
            Err(CorrectorError::ExecutionFailed(_))
        ));
    }

    #[test]
    fn test_output_always_ends_with_punctuation() {
        let refiner = passthrough();
        for input in ["x", "hello world", "what", "ok!", "trailing comma,", "pls"] {
            let refined = refiner.refine(input).unwrap();
            assert!(
                refined.ends_with(TERMINAL_PUNCTUATION),
                "{:?} -> {:?}",
                input,
                refined
            );
        }
    }
}
