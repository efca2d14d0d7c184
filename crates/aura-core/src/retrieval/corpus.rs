//! The built-in mental wellness corpus.

use aura_types::knowledge::KnowledgeDocument;

/// Seed documents for the knowledge base.
///
/// Deliberately tiny: retrieval exists to ground replies in vetted wellness
/// guidance, not to serve as a general document store.
const WELLNESS_DOCS: [&str; 8] = [
    "Mindfulness is the practice of paying attention to the present moment without judgment.",
    "Cognitive Behavioral Therapy (CBT) is a type of talk therapy that helps you manage your problems by changing the way you think and behave.",
    "Regular physical exercise is proven to reduce stress, anxiety, and symptoms of depression.",
    "A balanced diet rich in fruits, vegetables, and omega-3 fatty acids can support mental health.",
    "Deep breathing exercises can help calm your nervous system and reduce feelings of anxiety.",
    "Journaling can be a powerful tool for processing emotions and gaining clarity on your thoughts.",
    "Connecting with friends, family, or a support group can combat feelings of loneliness and isolation.",
    "Getting 7-9 hours of quality sleep per night is crucial for emotional regulation and cognitive function.",
];

/// The seed corpus as identified documents, ids assigned by position.
pub fn wellness_corpus() -> Vec<KnowledgeDocument> {
    WELLNESS_DOCS
        .iter()
        .enumerate()
        .map(|(i, text)| KnowledgeDocument::new(i as i32, *text))
        .collect()
}
