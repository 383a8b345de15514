// Content and topic screening for chat messages
// Author: kelexine (https://github.com/kelexine)

use std::sync::OnceLock;

/// Lazily initialized screening word lists using OnceLock (zero-cost, panic-free)
static BLOCKED_TERMS: OnceLock<Vec<&'static str>> = OnceLock::new();
static ALLOWED_TOPICS: OnceLock<Vec<&'static str>> = OnceLock::new();

fn blocked_terms() -> &'static Vec<&'static str> {
    BLOCKED_TERMS.get_or_init(|| {
        vec!["fuck", "fuck you", "violence", "suicide", "rape", "kill you"]
    })
}

fn allowed_topics() -> &'static Vec<&'static str> {
    ALLOWED_TOPICS.get_or_init(|| {
        vec![
            // Plant-care vocabulary
            "plant", "plants", "gardening", "soil", "earth", "botany",
            "leaves", "yellow plant", "garden", "shovel", "photosynthesis",
            "aloe vera", "cactus",
            // Small talk stays allowed
            "hello", "hi", "hey", "how are you", "greetings", "what's up",
            "good morning", "good evening",
        ]
    })
}

/// Verdict on a user message before it may be forwarded upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screening {
    /// On topic and clean, forward it.
    Allowed,
    /// Clean but outside the assistant's subject area.
    OffTopic,
    /// Contains a blocked term; never forwarded.
    Inappropriate,
}

/// Screen a chat message. Blocked terms are checked before the topic list,
/// so an inappropriate on-topic message still reads as inappropriate.
/// Matching is case-insensitive substring containment.
pub fn screen(text: &str) -> Screening {
    let lower = text.to_lowercase();

    if blocked_terms().iter().any(|term| lower.contains(term)) {
        return Screening::Inappropriate;
    }

    if allowed_topics().iter().any(|topic| lower.contains(topic)) {
        Screening::Allowed
    } else {
        Screening::OffTopic
    }
}
