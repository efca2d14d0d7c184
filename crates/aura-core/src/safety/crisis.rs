//! Crisis-language screening for inbound user messages.
//!
//! `CrisisPolicy` checks every message against a fixed keyword list before
//! any model call. A hit bypasses generation entirely and the user receives
//! a static escalation message with hotline numbers.

/// Keywords that indicate a user may be in crisis.
///
/// Matched case-insensitively as substrings, so "I feel hopeless today"
/// triggers on "hopeless".
pub const CRISIS_KEYWORDS: [&str; 9] = [
    "kill myself",
    "suicide",
    "want to die",
    "end my life",
    "hopeless",
    "self harm",
    "cut myself",
    "can't go on",
    "better off dead",
];

/// Escalation reply sent whenever crisis language is detected.
pub const ESCALATION_MESSAGE: &str = "I'm very concerned about what you've shared. You don't have to go through this alone.\n\nPlease reach out for immediate help:\nUS: Call or text 988 (Suicide & Crisis Lifeline)\nUK: Call 116 123 (Samaritans)\nEmergency: Call your local emergency number\n\nYou matter, and there are people who want to help. Please consider reaching out to a trusted friend, family member, or mental health professional.";

/// The keyword that triggered a crisis screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrisisMatch<'a> {
    keyword: &'a str,
}

impl CrisisMatch<'_> {
    pub fn keyword(&self) -> &str {
        self.keyword
    }
}

/// Screens user messages for crisis language.
///
/// The check is a plain substring scan over a lowercased copy of the
/// message. Deliberately blunt: a false positive costs one canned reply,
/// a false negative costs much more.
#[derive(Debug, Clone)]
pub struct CrisisPolicy {
    keywords: Vec<String>,
}

impl CrisisPolicy {
    /// Policy over the built-in keyword list.
    pub fn new() -> Self {
        Self::with_keywords(CRISIS_KEYWORDS.iter().map(|k| k.to_string()))
    }

    /// Policy over a custom keyword list. Keywords are lowercased once here
    /// so screening never re-normalizes them.
    pub fn with_keywords(keywords: impl IntoIterator<Item = String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Check a message for crisis language.
    ///
    /// Returns the first matching keyword in list order, or `None` for a
    /// benign message.
    pub fn screen(&self, message: &str) -> Option<CrisisMatch<'_>> {
        let lowered = message.to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| lowered.contains(keyword.as_str()))
            .map(|keyword| CrisisMatch { keyword })
    }

    /// The canned escalation reply for a crisis hit.
    pub fn escalation_message(&self) -> &'static str {
        ESCALATION_MESSAGE
    }
}

impl Default for CrisisPolicy {
    fn default() -> Self {
        Self::new()
    }
}
