use tracing::debug;

use crate::{Critique, CritiqueRule};

/// Word count above which text is considered long
pub const WORD_LIMIT: usize = 20;

/// Casual words flagged by the tone rule. Matched as substrings.
pub const CASUAL_WORDS: [&str; 4] = ["hi", "pls", "tho", "thx"];

/// Inputs required to critique a piece of text.
#[derive(Clone, Copy)]
pub struct CritiqueInput<'a> {
    pub raw_text: &'a str,
    /// Accepted for the task context but not consulted by any rule yet
    pub role: &'a str,
    /// Accepted for the task context but not consulted by any rule yet
    pub constraints: &'a str,
}

/// Stateless evaluator of the surface heuristics in [`CritiqueRule`]
#[derive(Debug, Default, Clone, Copy)]
pub struct CritiqueEngine;

impl CritiqueEngine {
    pub fn new() -> Self {
        Self
    }

    /// Critique raw text. `role` and `constraints` do not affect the result.
    pub fn critique(&self, raw_text: &str, role: &str, constraints: &str) -> Critique {
        self.evaluate(CritiqueInput {
            raw_text,
            role,
            constraints,
        })
    }

    pub fn evaluate(&self, input: CritiqueInput<'_>) -> Critique {
        let fired: Vec<CritiqueRule> = CritiqueRule::ALL
            .into_iter()
            .filter(|rule| Self::applies(*rule, input.raw_text))
            .collect();

        debug!(
            text_len = input.raw_text.len(),
            role_len = input.role.len(),
            constraints_len = input.constraints.len(),
            fired = fired.len(),
            "Critique evaluated"
        );

        Critique::from_rules(fired)
    }

    fn applies(rule: CritiqueRule, text: &str) -> bool {
        match rule {
            CritiqueRule::AllLowercase => is_all_lowercase(text),
            CritiqueRule::TooLong => word_count(text) > WORD_LIMIT,
            CritiqueRule::CasualWords => {
                let lower = text.to_lowercase();
                CASUAL_WORDS.iter().any(|w| lower.contains(w))
            }
        }
    }
}

/// Number of whitespace-separated words. The ASCII information separators
/// (`\x1c` to `\x1f`) also split words, alongside Unicode whitespace.
fn word_count(text: &str) -> usize {
    text.split(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
        .filter(|word| !word.is_empty())
        .count()
}

/// True when the text has at least one lowercase letter and no uppercase
/// letter anywhere. Text without cased letters is not lowercase.
fn is_all_lowercase(text: &str) -> bool {
    let mut has_lower = false;
    for c in text.chars() {
        if c.is_uppercase() {
            return false;
        }
        has_lower |= c.is_lowercase();
    }
    has_lower
}
