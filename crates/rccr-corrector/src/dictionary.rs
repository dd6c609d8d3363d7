use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::{CorrectorError, CorrectorType, TextCorrector};

const BUILTIN_WORDS: &str = include_str!("../data/words.txt");
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Tokens longer than this are returned unchanged
const MAX_WORD_LEN: usize = 20;

/// Regular suffixes accepted on top of a known stem, as (suffix, stem ending)
const INFLECTIONS: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ied", "y"),
    ("es", ""),
    ("s", ""),
    ("ed", ""),
    ("ed", "e"),
    ("ing", ""),
    ("ing", "e"),
    ("ly", ""),
    ("er", ""),
    ("er", "e"),
];

lazy_static! {
    // Words with optional apostrophe parts, so "don't" and "user's" stay whole
    static ref WORD_RE: Regex = Regex::new(r"\w+(?:['’]\w+)*").expect("valid word pattern");
    static ref BUILTIN: Arc<Dictionary> = Arc::new(
        Dictionary::parse(BUILTIN_WORDS).expect("built-in word list is well formed"),
    );
}

/// Word frequency table backing the dictionary corrector.
///
/// Words are stored lowercase. Frequencies only matter relative to each
/// other: they break ties between candidate corrections.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    counts: HashMap<String, u64>,
}

impl Dictionary {
    /// The English word list compiled into the binary
    pub fn builtin() -> Arc<Dictionary> {
        Arc::clone(&BUILTIN)
    }

    /// Load a frequency list from disk. See [`Dictionary::parse`] for the format.
    pub fn load(path: &Path) -> Result<Self, CorrectorError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CorrectorError::DictionaryLoad(format!("{}: {}", path.display(), e))
        })?;
        let dictionary = Self::parse(&content)?;
        debug!(path = %path.display(), words = dictionary.len(), "Loaded dictionary");
        Ok(dictionary)
    }

    /// Parse a frequency list.
    ///
    /// One entry per line, either `word` or `word count`. Blank lines and
    /// lines starting with `#` are skipped. Entries without a count are
    /// ranked by position, earlier lines being more frequent.
    pub fn parse(content: &str) -> Result<Self, CorrectorError> {
        let mut entries = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            let count = match parts.next() {
                Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
                    CorrectorError::DictionaryLoad(format!(
                        "line {}: invalid count '{}'",
                        index + 1,
                        raw
                    ))
                })?),
                None => None,
            };
            entries.push((word.to_lowercase(), count));
        }

        let total = entries.len() as u64;
        let mut dictionary = Self::default();
        for (rank, (word, count)) in entries.into_iter().enumerate() {
            dictionary.insert(word, count.unwrap_or(total - rank as u64));
        }
        Ok(dictionary)
    }

    /// Insert a word, keeping the higher count if it is already present
    pub fn insert(&mut self, word: impl Into<String>, count: u64) {
        let entry = self.counts.entry(word.into()).or_insert(0);
        *entry = (*entry).max(count);
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    pub fn frequency(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Edit-distance spelling corrector over a word frequency table.
///
/// Each unknown word is replaced with the most frequent known word one edit
/// away, or two edits away if nothing is one edit away. Words with no known
/// candidates are left alone. Everything between words (whitespace,
/// punctuation) is preserved as-is.
///
/// A word counts as known when it is in the table or is a regular
/// inflection of a word in the table ("delayed", "crashing", "tickets").
/// Single letters, all-caps acronyms, tokens with digits and tokens longer
/// than 20 characters are never changed. Contractions are kept whole when
/// the table lists them; for a possessive `'s` only the stem is corrected.
pub struct DictionaryCorrector {
    dictionary: Arc<Dictionary>,
}

impl DictionaryCorrector {
    pub fn new() -> Self {
        Self {
            dictionary: Dictionary::builtin(),
        }
    }

    pub fn with_dictionary(dictionary: Dictionary) -> Self {
        Self {
            dictionary: Arc::new(dictionary),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CorrectorError> {
        Ok(Self::with_dictionary(Dictionary::load(path)?))
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Correct a single word token
    pub fn correct_word(&self, word: &str) -> String {
        if word.len() < 2
            || word.len() > MAX_WORD_LEN
            || !word.chars().all(|c| c.is_ascii_alphabetic())
            || word.chars().all(|c| c.is_ascii_uppercase())
        {
            return word.to_string();
        }

        let lower = word.to_ascii_lowercase();
        if self.is_known(&lower) {
            return word.to_string();
        }

        let Some(candidate) = self.best_candidate(&lower) else {
            return word.to_string();
        };

        trace!(word, candidate = %candidate, "Corrected word");
        if word.starts_with(|c: char| c.is_ascii_uppercase()) {
            capitalize(&candidate)
        } else {
            candidate
        }
    }

    /// Correct a token that may carry an apostrophe part
    fn correct_token(&self, token: &str) -> String {
        let Some(split) = token.find(|c: char| c == '\'' || c == '’') else {
            return self.correct_word(token);
        };

        let normalized = token.to_lowercase().replace('’', "'");
        if self.dictionary.contains(&normalized) {
            return token.to_string();
        }

        let (stem, tail) = token.split_at(split);
        let mut tail_chars = tail.chars();
        tail_chars.next();
        if tail_chars.as_str().eq_ignore_ascii_case("s") {
            format!("{}{}", self.correct_word(stem), tail)
        } else {
            token.to_string()
        }
    }

    fn is_known(&self, word: &str) -> bool {
        self.dictionary.contains(word)
            || inflection_stems(word)
                .iter()
                .any(|stem| stem.len() > 1 && self.dictionary.contains(stem))
    }

    fn best_candidate(&self, word: &str) -> Option<String> {
        let first = edits1(word);
        let known: Vec<&String> = first
            .iter()
            .filter(|w| self.dictionary.contains(w))
            .collect();
        if !known.is_empty() {
            return self.most_frequent(known);
        }

        let second: Vec<String> = first
            .iter()
            .flat_map(|w| edits1(w))
            .filter(|w| self.dictionary.contains(w))
            .collect();
        self.most_frequent(second.iter().collect())
    }

    fn most_frequent(&self, candidates: Vec<&String>) -> Option<String> {
        // Ties go to the alphabetically first word so results are stable
        candidates
            .into_iter()
            .max_by(|a, b| {
                self.dictionary
                    .frequency(a)
                    .cmp(&self.dictionary.frequency(b))
                    .then_with(|| b.cmp(a))
            })
            .cloned()
    }
}

impl Default for DictionaryCorrector {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCorrector for DictionaryCorrector {
    fn name(&self) -> &str {
        "dictionary"
    }

    fn corrector_type(&self) -> CorrectorType {
        CorrectorType::Dictionary
    }

    fn correct(&self, text: &str) -> Result<String, CorrectorError> {
        debug!(
            text_len = text.len(),
            words = self.dictionary.len(),
            "Running dictionary correction"
        );
        let corrected = WORD_RE.replace_all(text, |caps: &Captures| self.correct_token(&caps[0]));
        Ok(corrected.into_owned())
    }
}

/// All strings one delete, transpose, replace or insert away from `word`.
/// `word` must be ASCII.
fn edits1(word: &str) -> Vec<String> {
    let bytes = word.as_bytes();
    let n = bytes.len();
    let mut edits = Vec::with_capacity(54 * n + 25);

    for i in 0..=n {
        let (left, right) = bytes.split_at(i);

        if !right.is_empty() {
            edits.push(join(left, &[], &right[1..]));
        }
        if right.len() > 1 {
            edits.push(join(left, &[right[1], right[0]], &right[2..]));
        }
        for &c in ALPHABET {
            if !right.is_empty() && right[0] != c {
                edits.push(join(left, &[c], &right[1..]));
            }
            edits.push(join(left, &[c], right));
        }
    }

    edits.sort_unstable();
    edits.dedup();
    edits
}

/// Candidate stems for `word` under the regular inflections, including the
/// undoubled form ("stopped" -> "stop")
fn inflection_stems(word: &str) -> Vec<String> {
    let mut stems = Vec::new();
    for &(suffix, ending) in INFLECTIONS {
        let Some(stem) = word.strip_suffix(suffix) else {
            continue;
        };
        stems.push(format!("{}{}", stem, ending));

        let bytes = stem.as_bytes();
        let doubled = bytes.len() >= 2 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2];
        if ending.is_empty() && doubled {
            stems.push(stem[..stem.len() - 1].to_string());
        }
    }
    stems
}

fn join(left: &[u8], middle: &[u8], right: &[u8]) -> String {
    let mut out = String::with_capacity(left.len() + middle.len() + right.len());
    out.extend(left.iter().chain(middle).chain(right).map(|&b| b as char));
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
