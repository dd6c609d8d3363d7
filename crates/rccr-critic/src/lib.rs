mod critique;
pub mod engine;

pub use critique::{Critique, CritiqueRule, BULLET, LOOKS_GOOD};
pub use engine::{CritiqueEngine, CritiqueInput, CASUAL_WORDS, WORD_LIMIT};
