use serde::{Deserialize, Serialize};

/// Bullet marker used when rendering critique points
pub const BULLET: &str = "•";

/// Message used when no rule fires
pub const LOOKS_GOOD: &str = "Text looks good!";

/// Surface heuristics applied to raw text, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CritiqueRule {
    /// No uppercase letter anywhere in the text
    AllLowercase,
    /// More words than [`crate::WORD_LIMIT`]
    TooLong,
    /// Contains one of [`crate::CASUAL_WORDS`] as a substring
    CasualWords,
}

impl CritiqueRule {
    /// Every rule, in the order the engine evaluates them
    pub const ALL: [CritiqueRule; 3] = [
        CritiqueRule::AllLowercase,
        CritiqueRule::TooLong,
        CritiqueRule::CasualWords,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            CritiqueRule::AllLowercase => "Text should start with a capital letter.",
            CritiqueRule::TooLong => "Text is a bit long; consider shortening.",
            CritiqueRule::CasualWords => "Avoid casual words; use professional tone.",
        }
    }
}

impl std::fmt::Display for CritiqueRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CritiqueRule::AllLowercase => write!(f, "all-lowercase"),
            CritiqueRule::TooLong => write!(f, "too-long"),
            CritiqueRule::CasualWords => write!(f, "casual-words"),
        }
    }
}

/// Outcome of critiquing a piece of text.
///
/// Never empty: when no rule fires it holds the single [`LOOKS_GOOD`] message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critique {
    messages: Vec<String>,
    #[serde(default)]
    rules: Vec<CritiqueRule>,
}

impl Critique {
    /// Build a critique from the rules that fired, in evaluation order
    pub fn from_rules(rules: Vec<CritiqueRule>) -> Self {
        let messages = if rules.is_empty() {
            vec![LOOKS_GOOD.to_string()]
        } else {
            rules.iter().map(|r| r.message().to_string()).collect()
        };
        Self { messages, rules }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Rules that fired; empty when the text looks good
    pub fn rules(&self) -> &[CritiqueRule] {
        &self.rules
    }

    pub fn looks_good(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn has(&self, rule: CritiqueRule) -> bool {
        self.rules.contains(&rule)
    }

    /// Render as bullet lines, one per message
    pub fn render(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{} {}", BULLET, m))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Get a short description of the critique for logging
    pub fn short_description(&self) -> String {
        if self.looks_good() {
            "LOOKS GOOD".to_string()
        } else {
            let names: Vec<String> = self.rules.iter().map(|r| r.to_string()).collect();
            format!("{} issue(s): {}", self.rules.len(), names.join(", "))
        }
    }
}

impl std::fmt::Display for Critique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
