//! Reply text generation.
//!
//! Builds the responder's line of dialogue from the interaction kind and
//! the responder's dominant emotion. Templates carry a `{name}` placeholder
//! for the initiator's name and are picked at random from a small pool so
//! repeated interactions do not read identically.

use rand::Rng;

use rapport_types::{Emotion, InteractionKind};

/// Used when a pool is unexpectedly empty. Never referenced by the shipped
/// pools, which all carry at least one template.
const FALLBACK_REPLY: &str = "I hear you, {name}.";

/// Broad delivery register derived from the responder's dominant emotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplyTone {
    /// Joyful or surprised: open and enthusiastic.
    Warm,
    /// Sad or fearful: quiet and hesitant.
    Subdued,
    /// Angry: curt and pointed.
    Sharp,
    /// No strong emotion either way.
    Even,
}

const fn tone_for(dominant: Emotion) -> ReplyTone {
    match dominant {
        Emotion::Joy | Emotion::Surprise => ReplyTone::Warm,
        Emotion::Sadness | Emotion::Fear => ReplyTone::Subdued,
        Emotion::Anger => ReplyTone::Sharp,
        Emotion::Neutral => ReplyTone::Even,
    }
}

/// Generate the responder's reply to an interaction.
///
/// The reply is always non-empty and never contains the raw `{name}`
/// placeholder.
pub fn generate_reply(kind: InteractionKind, dominant: Emotion, initiator_name: &str) -> String {
    let pool = reply_pool(kind, tone_for(dominant));
    let template = if pool.is_empty() {
        FALLBACK_REPLY
    } else {
        let index = rand::rng().random_range(0..pool.len());
        pool.get(index).copied().unwrap_or(FALLBACK_REPLY)
    };
    template.replace("{name}", initiator_name)
}

/// Template pool for a kind and tone. Specific pairings come first, the
/// remaining tones share cross-kind pools.
const fn reply_pool(kind: InteractionKind, tone: ReplyTone) -> &'static [&'static str] {
    match (kind, tone) {
        (InteractionKind::Greeting, ReplyTone::Warm) => &[
            "Hello {name}! It's so good to see you.",
            "Hey {name}, I was hoping I'd run into you!",
            "{name}! What a nice surprise.",
        ],
        (InteractionKind::Chat, ReplyTone::Warm) => &[
            "Ha, I was just thinking about that too, {name}.",
            "That's wonderful to hear, {name}. Tell me more.",
            "You always know how to make me smile, {name}.",
        ],
        (InteractionKind::Discussion, ReplyTone::Warm) => &[
            "That's a sharp point, {name}. I hadn't considered it that way.",
            "I love where you're taking this, {name}. Keep going.",
            "Now that is an idea worth chewing on, {name}.",
        ],
        (InteractionKind::Collaboration, ReplyTone::Warm) => &[
            "We make a good team, {name}. Let's keep at it.",
            "With the two of us on this, it's as good as done.",
            "Great thinking, {name}. I'll take the next part.",
        ],
        (InteractionKind::Conflict, ReplyTone::Warm) => &[
            "I don't want to fight about this, {name}. Can we start over?",
            "Look, {name}, maybe we both have a point here.",
        ],
        (InteractionKind::EmotionalSupport, ReplyTone::Warm) => &[
            "Thank you, {name}. That means more than you know.",
            "You always know what to say, {name}. I feel lighter already.",
            "I'm lucky to have you looking out for me, {name}.",
        ],
        (InteractionKind::Conflict, ReplyTone::Sharp) => &[
            "No. You don't get to put this on me, {name}.",
            "We are done talking about this.",
            "You've made your position very clear, {name}.",
        ],
        (_, ReplyTone::Sharp) => &[
            "Fine, {name}. If you say so.",
            "Can we not do this right now?",
            "I'd rather we talked about something else.",
        ],
        (InteractionKind::EmotionalSupport, ReplyTone::Subdued) => &[
            "I... thank you, {name}. It's been a hard stretch.",
            "I don't really know what to say. But I'm glad you're here.",
            "It helps to hear that, even on a day like this.",
        ],
        (_, ReplyTone::Subdued) => &[
            "Sorry, {name}. I'm not quite myself today.",
            "Mm. I suppose so.",
            "Maybe. I need a little time to sit with that.",
        ],
        (_, ReplyTone::Even) => &[
            "Noted, {name}.",
            "Alright, that seems fair.",
            "Let's see where this goes.",
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
