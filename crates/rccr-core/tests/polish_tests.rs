use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rccr_core::{
    PolishError, PolishRequest, Polisher, PresetCatalog, PresetError, TextRefiner,
};
use rccr_corrector::{
    CorrectorError, CorrectorType, Dictionary, DictionaryCorrector, PassthroughCorrector,
    TextCorrector,
};
use rccr_critic::{CritiqueEngine, CritiqueRule};
use rccr_logging::Logger;

struct CountingCorrector {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl TextCorrector for CountingCorrector {
    fn name(&self) -> &str {
        "counting"
    }

    fn corrector_type(&self) -> CorrectorType {
        CorrectorType::Command
    }

    fn correct(&self, text: &str) -> Result<String, CorrectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(CorrectorError::ExecutionFailed("corrector unavailable".into()))
        } else {
            Ok(text.to_string())
        }
    }
}

fn polish_with(corrector: Box<dyn TextCorrector>, text: &str) -> Result<rccr_core::PolishOutcome, PolishError> {
    let refiner = TextRefiner::new(corrector);
    let critic = CritiqueEngine::new();
    let polisher = Polisher::new(&refiner, &critic, Arc::new(Logger::quiet()));
    let preset = PresetCatalog::builtin()
        .get("Customer Support Email")
        .unwrap();
    polisher.polish(&PolishRequest::from_preset(preset, text))
}

// ============================================================
// Pipeline tests
// ============================================================

#[test]
fn test_polish_casual_request_end_to_end() {
    let dictionary = Dictionary::parse(
        "the 100\nplease 90\ncheck 80\nfeature 70\nit 60\nis 50\nnot 40\nworking 30\nhello 20\nthough 10\n",
    )
    .unwrap();
    let corrector = DictionaryCorrector::with_dictionary(dictionary);

    let outcome = polish_with(
        Box::new(corrector),
        "hi pls check the featur tho it is not workng",
    )
    .unwrap();

    assert_eq!(
        outcome.refined,
        "Hello please check the feature though it is not working."
    );
    assert_eq!(
        outcome.critique.rules(),
        &[CritiqueRule::AllLowercase, CritiqueRule::CasualWords]
    );
}

#[test]
fn test_polish_rejects_whitespace_without_running_corrector() {
    let calls = Arc::new(AtomicUsize::new(0));
    let result = polish_with(
        Box::new(CountingCorrector {
            calls: calls.clone(),
            fail: false,
        }),
        "   \n ",
    );

    assert!(matches!(result, Err(PolishError::EmptyInput)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_polish_propagates_corrector_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let result = polish_with(
        Box::new(CountingCorrector {
            calls: calls.clone(),
            fail: true,
        }),
        "Please check this.",
    );

    match result {
        Err(PolishError::Correction(CorrectorError::ExecutionFailed(msg))) => {
            assert_eq!(msg, "corrector unavailable");
        }
        other => panic!("expected correction failure, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_critique_uses_untrimmed_raw_text() {
    let outcome = polish_with(Box::new(PassthroughCorrector::new()), "  Great job.  ").unwrap();
    assert_eq!(outcome.critique.messages(), &["Text looks good!".to_string()]);
    assert_eq!(outcome.refined, "Great job.");
}

#[test]
fn test_refine_word_boundary_differs_from_critique_substring() {
    let outcome = polish_with(Box::new(PassthroughCorrector::new()), "this is a test").unwrap();
    // Refinement leaves "this" alone
    assert_eq!(outcome.refined, "This is a test.");
    // Critique flags it because "this" contains "hi"
    assert!(outcome.critique.has(CritiqueRule::CasualWords));
}

#[test]
fn test_outcome_serializes_for_json_output() {
    let outcome = polish_with(Box::new(PassthroughCorrector::new()), "thx").unwrap();
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["refined"], "Thanks.");
    assert_eq!(json["preset"], "Customer Support Email");
    assert!(json["critique"]["messages"].is_array());
    assert!(json["total_duration_secs"].is_number());
}

#[test]
fn test_unknown_preset_converts_to_polish_error() {
    let error: PolishError = PresetCatalog::builtin()
        .get("Release Notes")
        .map(|_| ())
        .unwrap_err()
        .into();
    assert!(matches!(
        error,
        PolishError::UnknownPreset(PresetError::NotFound(_))
    ));
}
