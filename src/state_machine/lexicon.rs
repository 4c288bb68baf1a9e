//! Static phrase tables and reply pools
//!
//! Keyword tables are compiled once into case-insensitive, word-boundary
//! aware regexes. A trailing `*` on a phrase matches any word ending
//! (`thank*` matches "thanks" and "thankful").
//!
//! Reply templates carry a `{k}` slot that is filled with a random kaomoji
//! when rendered through [`Voice`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::collections::VecDeque;
use std::sync::LazyLock;

use super::state::GameKind;

/// A compiled list of trigger phrases
#[derive(Debug)]
pub struct KeywordSet {
    pattern: Regex,
}

impl KeywordSet {
    /// Match any phrase anywhere in the text
    pub fn new(phrases: &[&str]) -> Self {
        Self::compile(phrases, "")
    }

    /// Match only when the text opens with one of the phrases
    pub fn leading(phrases: &[&str]) -> Self {
        Self::compile(phrases, r"^\W*")
    }

    fn compile(phrases: &[&str], anchor: &str) -> Self {
        let alternatives: Vec<String> = phrases.iter().map(|p| phrase_pattern(p)).collect();
        let source = format!("(?i){anchor}(?:{})", alternatives.join("|"));
        // Phrases are escaped, so the pattern is always valid
        let pattern = Regex::new(&source).expect("keyword pattern compiles");
        Self { pattern }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

fn phrase_pattern(phrase: &str) -> String {
    let (body, stem) = match phrase.strip_suffix('*') {
        Some(body) => (body, true),
        None => (phrase, false),
    };
    let words: Vec<String> = body.split_whitespace().map(regex::escape).collect();

    let mut out = String::new();
    if body.starts_with(char::is_alphanumeric) {
        out.push_str(r"\b");
    }
    out.push_str(&words.join(r"\s+"));
    if stem {
        out.push_str(r"\w*");
    } else if body.ends_with(char::is_alphanumeric) {
        out.push_str(r"\b");
    }
    out
}

/// Trim and fold typographic apostrophes so "can’t" matches "can't"
pub fn normalize(text: &str) -> String {
    text.trim().replace(['\u{2019}', '\u{2018}'], "'")
}

// ============================================================================
// Trigger tables
// ============================================================================

static SYMPTOM_TRIGGERS: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "hearing voices",
        "hear voices",
        "hearing things",
        "voices in my head",
        "voices won't stop",
        "voices wont stop",
        "the voices",
        "hallucinat*",
        "seeing things",
        "see things that",
        "paranoid",
        "paranoia",
        "delusion*",
        "can't tell what's real",
        "cant tell what's real",
        "cant tell whats real",
        "not sure what's real",
        "what is real",
        "nothing feels real",
        "they're watching me",
        "theyre watching me",
        "being watched",
        "watching me",
        "following me",
        "someone is following",
        "mind control",
        "controlling my mind",
        "controlling my thoughts",
        "whisper*",
        "racing thoughts",
        "thoughts are racing",
        "thoughts won't stop",
        "scared",
        "terrified",
        "panic*",
        "anxious",
        "anxiety",
        "freaking out",
        "losing it",
        "losing my mind",
        "going crazy",
        "overwhelmed",
        "breaking down",
        "losing control",
        "out of control",
        "having an episode",
        "my episode",
        "my symptoms",
        "having symptoms",
        "crisis",
        "help me",
        "not feeling right",
        "feeling disconnected",
        "disconnected",
        "losing touch",
        "not real",
        "unreal",
        "dissociat*",
        "shadows moving",
        "something is wrong with me",
    ])
});

static FAREWELL_PHRASES: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "bye",
        "goodbye",
        "good bye",
        "bye bye",
        "see ya",
        "see you",
        "talk later",
        "talk to you later",
        "cya",
        "farewell",
        "i'm leaving",
        "im leaving",
        "gotta go",
        "got to go",
        "later",
        "good night",
        "goodnight",
        "take care",
    ])
});

static BREATHING_KEYWORDS: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::new(&["breath*", "triangle", "ocean", "box"]));

static SENSORY_KEYWORDS: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "ground*",
        "color*",
        "colour*",
        "body map",
        "temperature",
        "sensory",
        "senses",
    ])
});

static GAME_KEYWORDS: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "game*",
        "play*",
        "would you rather",
        "three things",
        "opposite*",
        "distract*",
        "story",
        "stories",
        "challenge*",
    ])
});

static WOULD_YOU_RATHER: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::new(&["would you rather"]));

static OPPOSITE_DAY: LazyLock<KeywordSet> = LazyLock::new(|| KeywordSet::new(&["opposite*"]));

static THREE_THINGS: LazyLock<KeywordSet> = LazyLock::new(|| KeywordSet::new(&["three things"]));

static IMAGINATION_KEYWORDS: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::new(&["imagination*", "imagine", "journey"]));

static BUTTERFLY_KEYWORDS: LazyLock<KeywordSet> = LazyLock::new(|| KeywordSet::new(&["butterfly*"]));

static ANY_TECHNIQUE_KEYWORDS: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::new(&["technique*", "exercise*", "activit*"]));

pub(crate) static GREETING: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "hello",
        "hi",
        "hey",
        "hiya",
        "howdy",
        "what's up",
        "whats up",
        "good morning",
        "good afternoon",
        "good evening",
    ])
});

pub(crate) static THANKS: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::new(&["thank*", "thx", "appreciate*", "grateful"]));

pub(crate) static DISTRESS: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "scared",
        "anxious",
        "panic*",
        "overwhelmed",
        "help",
        "fear*",
        "afraid",
        "terrified",
        "nervous",
        "worried",
        "freaking out",
        "losing it",
        "can't handle",
        "cant handle",
        "too much",
        "breaking down",
        "falling apart",
    ])
});

pub(crate) static EMOTION: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "sad",
        "lonely",
        "alone",
        "tired",
        "stressed",
        "crying",
        "cried",
        "depressed",
        "down",
        "exhausted",
        "hopeless",
        "worthless",
        "empty",
        "numb",
        "angry",
        "frustrated",
        "upset",
        "hurt",
    ])
});

pub(crate) static TECHNIQUE_REQUEST: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "grounding",
        "breathe",
        "breathing",
        "exercise*",
        "technique*",
        "calm*",
        "meditat*",
        "relax*",
        "centering",
        "mindful*",
    ])
});

pub(crate) static GAME_REQUEST: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "play*",
        "game*",
        "distract*",
        "bored",
        "entertain*",
        "fun",
        "activit*",
        "something to do",
    ])
});

pub(crate) static GENERAL_TALK: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "how are you",
        "how's it going",
        "talk",
        "chat",
        "can you help me",
        "what do you think",
        "tell me",
        "share",
        "story",
    ])
});

pub(crate) static QUESTION: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "what",
        "why",
        "how",
        "when",
        "where",
        "who",
        "?",
        "can you",
        "could you",
    ])
});

pub(crate) static COMPLETION: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "done",
        "finished",
        "completed",
        "complete",
        "all done",
        "feel better",
        "feeling better",
        "worked",
        "helped",
        "that helped",
        "calmer",
        "ready",
        "feel good",
        "i did it",
        "success",
        "accomplished",
        "over",
        "yay",
        "phew",
        "relaxed",
        "relaxing",
        "rested",
        "resting",
        "thank you",
        "thanks",
    ])
});

pub(crate) static AFFIRMATIVE: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::leading(&[
        "yes",
        "yeah",
        "yep",
        "yup",
        "sure",
        "okay",
        "ok",
        "alright",
        "another",
        "let's do another",
        "lets do another",
        "let's go",
        "lets go",
        "go again",
        "do another",
        "of course",
        "absolutely",
    ])
});

pub(crate) static NEGATIVE: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::leading(&[
        "no", "nope", "nah", "not", "stop", "rest", "quit", "enough", "done", "exit", "leave",
    ])
});

pub(crate) static EPISODE_YES: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "yes",
        "yeah",
        "yep",
        "episode*",
        "symptom*",
        "experiencing",
        "having",
    ])
});

pub(crate) static EPISODE_NO: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "no", "nope", "nah", "not", "fine", "okay", "ok", "good", "great", "just chat",
    ])
});

// ============================================================================
// Lexicon queries
// ============================================================================

pub fn is_symptom_phrase(text: &str) -> bool {
    SYMPTOM_TRIGGERS.matches(text)
}

pub fn is_farewell_phrase(text: &str) -> bool {
    FAREWELL_PHRASES.matches(text)
}

/// Family of activity the user asked for by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechniqueCategory {
    Breathing,
    Sensory,
    Game(Option<GameKind>),
    Imagination,
    ButterflyHug,
    /// "a technique", "an exercise": anything will do
    Any,
}

/// Explicit technique or game request, checked in a fixed order
pub fn match_technique_category(text: &str) -> Option<TechniqueCategory> {
    if BREATHING_KEYWORDS.matches(text) {
        return Some(TechniqueCategory::Breathing);
    }
    if SENSORY_KEYWORDS.matches(text) {
        return Some(TechniqueCategory::Sensory);
    }
    if GAME_KEYWORDS.matches(text) {
        let game = if WOULD_YOU_RATHER.matches(text) {
            Some(GameKind::WouldYouRather)
        } else if OPPOSITE_DAY.matches(text) {
            Some(GameKind::OppositeDay)
        } else if THREE_THINGS.matches(text) {
            Some(GameKind::ThreeThings)
        } else {
            None
        };
        return Some(TechniqueCategory::Game(game));
    }
    if BUTTERFLY_KEYWORDS.matches(text) {
        return Some(TechniqueCategory::ButterflyHug);
    }
    if IMAGINATION_KEYWORDS.matches(text) {
        return Some(TechniqueCategory::Imagination);
    }
    if ANY_TECHNIQUE_KEYWORDS.matches(text) {
        return Some(TechniqueCategory::Any);
    }
    None
}

/// Uniform pick from a pool; empty pools render as an empty string
pub fn random_variant<R: Rng + ?Sized>(pool: &'static [&'static str], rng: &mut R) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

// ============================================================================
// Voice: template rendering with per-conversation randomness
// ============================================================================

const RECENT_TEMPLATES: usize = 6;

/// Renders reply templates for one conversation.
///
/// Owns the conversation's random source and remembers the last few
/// templates it used so consecutive replies avoid repeating themselves.
#[derive(Debug)]
pub struct Voice {
    rng: StdRng,
    recent: VecDeque<&'static str>,
}

impl Voice {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            recent: VecDeque::with_capacity(RECENT_TEMPLATES),
        }
    }

    /// Render a variant from `pool`
    pub fn say(&mut self, pool: &'static [&'static str]) -> String {
        let template = self.variant(pool);
        let kaomoji = self.kaomoji();
        template.replace("{k}", kaomoji)
    }

    /// Render a variant and fill one extra named slot
    pub fn say_with(&mut self, pool: &'static [&'static str], slot: &str, value: &str) -> String {
        self.say(pool).replace(slot, value)
    }

    pub fn kaomoji(&mut self) -> &'static str {
        random_variant(KAOMOJIS, &mut self.rng)
    }

    pub fn pip(&mut self) -> &'static str {
        random_variant(PIP_SUFFIXES, &mut self.rng)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Drop the memory of recently used templates
    pub fn forget(&mut self) {
        self.recent.clear();
    }

    fn variant(&mut self, pool: &'static [&'static str]) -> &'static str {
        let fresh: Vec<&'static str> = pool
            .iter()
            .copied()
            .filter(|t| !self.recent.contains(t))
            .collect();
        let template = if fresh.is_empty() {
            random_variant(pool, &mut self.rng)
        } else {
            fresh.choose(&mut self.rng).copied().unwrap_or_default()
        };

        if self.recent.len() == RECENT_TEMPLATES {
            self.recent.pop_front();
        }
        self.recent.push_back(template);
        template
    }
}

/// True when `text` is `template` rendered with some kaomoji
#[cfg(test)]
pub(crate) fn is_rendering_of(template: &str, text: &str) -> bool {
    if !template.contains("{k}") {
        return template == text;
    }
    KAOMOJIS.iter().any(|k| template.replace("{k}", k) == text)
}

#[cfg(test)]
pub(crate) fn rendered_from(pool: &[&str], text: &str) -> bool {
    pool.iter().any(|t| is_rendering_of(t, text))
}

// ============================================================================
// Decoration pools
// ============================================================================

pub const KAOMOJIS: &[&str] = &[
    "(◕‿◕)",
    "(｡◕‿◕｡)",
    "(˶ᵔ ᵕ ᵔ˶)",
    "ʕ•ᴥ•ʔ",
    "(っ◔◡◔)っ",
    "(*^▽^*)",
    "(◠‿◠)",
    "(ᵔᴥᵔ)",
    "(๑˃ᴗ˂)ﻭ",
    "(´｡• ᵕ •｡`)",
];

pub const PIP_SUFFIXES: &[&str] = &["pip!", "pip pip!", "pip~", "*happy pip*", "pip pip~ 🐧"];

// ============================================================================
// Reply pools
// ============================================================================

pub const OPENING_GREETINGS: &[&str] = &[
    "Hi there! {k} I'm Pippy, your friendly penguin pal. Are you currently experiencing symptoms or just want to chat today? pip~ 🐧",
    "Hello friend! {k} I'm Pippy, your friendly penguin pal. <i>waddles closer</i> Are you currently experiencing symptoms or would you like to just chat? pip!",
    "Hey there! {k} Pippy here, flapping my little wings hello! Are you going through symptoms right now or do you just want some company? pip pip~",
];

pub const SYMPTOM_RESPONSES: &[&str] = &[
    "I hear you, and I'm right here with you. {k} <i>nuzzles gently</i> What you're feeling matters and you're not alone. Would you like to try something together?\n1. Breathing technique\n2. Sensory grounding\n3. A distraction game\n4. Just chat together\npip~",
    "Thank you for telling me. {k} <i>wraps a soft wing around you</i> That sounds really hard. We can take it one small step at a time. Pick whatever feels right:\n1. Breathing technique\n2. Sensory grounding\n3. A distraction game\n4. Just chat together\npip!",
    "Oh friend, I'm so glad you reached out. {k} <i>waddles close and sits beside you</i> You're safe here with me. Which would help most right now?\n1. Breathing technique\n2. Sensory grounding\n3. A distraction game\n4. Just chat together\npip pip~",
];

pub const FAREWELLS: &[&str] = &[
    "Bye for now, friend! {k} <i>waves a little flipper</i> You did great today. Come back anytime! pip~ 🐧",
    "Take care of yourself! {k} <i>gives you a gentle penguin hug</i> I'll be right here whenever you need me. pip pip!",
    "See you soon! {k} <i>waddles in a happy little circle</i> Be gentle with yourself today. pip!",
    "Goodbye, friend! {k} <i>nuzzles your hand</i> Thank you for spending time with me. pip~",
];

pub const DISTRESS_MENU: &[&str] = &[
    "That sounds really scary, and I'm right here. {k} <i>holds out a soft wing</i> Let's find something to help:\n1. Breathing technique\n2. Sensory grounding\n3. A distraction game\n4. Just chat together\npip~",
    "You're not alone in this. {k} <i>snuggles close</i> We can get through this moment together. What sounds okay?\n1. Breathing technique\n2. Sensory grounding\n3. A distraction game\n4. Just chat together\npip!",
];

pub const EMOTION_MENU: &[&str] = &[
    "I'm sorry you're feeling this way. {k} <i>gives you a gentle hug</i> Your feelings are valid. Would any of these help?\n1. Breathing technique\n2. Sensory grounding\n3. A distraction game\n4. Just chat together\npip~",
    "Oh, that sounds heavy. {k} <i>leans against you softly</i> I'm here for it. We could try:\n1. Breathing technique\n2. Sensory grounding\n3. A distraction game\n4. Just chat together\npip pip~",
];

pub const MENU_OFFERS: &[&str] = &[
    "I'm here with you. {k} <i>flaps wings gently</i> Would you like to try something together?\n1. Breathing technique\n2. Sensory grounding\n3. A distraction game\n4. Just chat together\npip!",
    "Let's take care of you together. {k} <i>waddles beside you</i> Here's what we can do:\n1. Breathing technique\n2. Sensory grounding\n3. A distraction game\n4. Just chat together\npip~",
];

pub const SUPPORT_ACKS: &[&str] = &[
    "I'm right here with you. {k} <i>sits quietly beside you</i> Take all the time you need. pip~",
    "Thank you for sharing that with me. {k} <i>nuzzles gently</i> You're doing so well just by talking about it. pip!",
    "I'm listening, friend. {k} <i>wraps a wing around you</i> Whenever you're ready, we can try a technique or just keep talking. pip pip~",
];

pub const ONBOARDING_MENU: &[&str] = &[
    "I'm sorry things feel hard right now. {k} <i>waddles closer</i> Whether or not it's an episode, I can help. Pick one:\n1. Breathing technique\n2. Sensory grounding\n3. A distraction game\n4. Just chat together\npip~",
];

pub const ONBOARDING_TALK: &[&str] = &[
    "I'd love to chat! {k} Before we do, are you going through any symptoms right now, or is today a just-chatting kind of day? pip~",
    "Ooh, chatting is my favorite! {k} <i>wiggles happily</i> Just so I know how to help, are you experiencing any symptoms right now? pip!",
];

pub const ONBOARDING_QUESTION: &[&str] = &[
    "That's a great question! {k} <i>tilts head thoughtfully</i> I'm happy to help. Are you experiencing any symptoms right now, or just curious? pip!",
];

pub const CASUAL_GREETINGS: &[&str] = &[
    "Hi again, friend! {k} <i>does a happy little waddle</i> What's on your mind today? pip~",
    "Hello hello! {k} <i>flaps wings excitedly</i> It's so nice to see you. How's your day going? pip pip!",
    "Hey there! {k} <i>slides over on my belly</i> What would you like to chat about? pip!",
];

pub const THANKS_REPLIES: &[&str] = &[
    "You're so welcome! {k} <i>does a happy penguin dance</i> I'm always here for you. pip pip!",
    "Aww, anytime, friend! {k} <i>nuzzles you gently</i> Helping you makes my flippers flap with joy. pip~",
    "It's my pleasure! {k} <i>waddles in a proud little circle</i> You're doing amazing. pip!",
];

pub const CASUAL_EMOTION: &[&str] = &[
    "Aww, I'm sorry you feel that way. {k} <i>gives you a warm penguin hug</i> Want to try something to feel a bit better?\n1. Breathing technique\n2. Sensory grounding\n3. A distraction game\n4. Just chat together\npip~",
    "That sounds tough, friend. {k} <i>snuggles up beside you</i> I'm here. Maybe one of these could help?\n1. Breathing technique\n2. Sensory grounding\n3. A distraction game\n4. Just chat together\npip!",
];

pub const CASUAL_TALK: &[&str] = &[
    "I love chatting with you! {k} <i>settles in comfortably</i> Tell me more about what's on your mind. pip~",
    "Ooh, let's talk! {k} <i>wiggles happily</i> What's been making you smile lately? pip pip!",
];

pub const CASUAL_QUESTION: &[&str] = &[
    "Hmm, that's a good one! {k} <i>taps flipper on beak thoughtfully</i> What do you think about it? pip~",
    "Ooh, great question! {k} <i>tilts head curiously</i> I'd love to hear your thoughts first. pip!",
];

pub const CASUAL_OPEN: &[&str] = &[
    "I'm all ears, friend! {k} <i>leans in closer</i> Tell me more. pip~",
    "That's interesting! {k} <i>waddles closer</i> What else is on your mind? pip pip!",
    "I'm here and listening. {k} <i>gives a gentle nuzzle</i> Want to share a bit more? pip!",
];

pub const JUST_CHAT: &[&str] = &[
    "Let's just chat together! {k} <i>snuggles up next to you</i> What's on your mind? I'm all ears. pip~",
    "Sounds perfect. {k} <i>sits down beside you</i> We can talk about anything at all, big or small. pip pip!",
];

// ----------------------------------------------------------------------------
// Technique openers
// ----------------------------------------------------------------------------

pub const BREATHING_STARTS: &[&str] = &[
    "Let's breathe together! {k} <i>puffs up feathers</i> Breathe in slowly for 4... hold for 4... and out for 4. Let's do that a few times. Tell me when you're done! pip~",
    "Okay, let's do some penguin breathing! {k} <i>closes eyes gently</i> In through your nose for 4, hold for 7, out through your mouth for 8. Let me know when you're done! pip!",
];

pub const SENSORY_STARTS: &[&str] = &[
    "Let's ground ourselves together! {k} <i>looks around curiously</i> Can you name 5 things you can see right now? Take your time! pip~",
    "Let's use our senses! {k} <i>pats the ground with a flipper</i> Tell me 3 things you can hear and 2 things you can touch. Say done when you're finished! pip!",
];

pub const IMAGINATION_STARTS: &[&str] = &[
    "Let's go on an imagination journey! {k} <i>closes eyes dreamily</i> Picture a calm icy beach. The snow is soft and the waves are gentle. What do you see there? Tell me when you're ready to come back! pip~",
];

pub const BUTTERFLY_STARTS: &[&str] = &[
    "Let's do a butterfly hug! {k} <i>crosses flippers over chest</i> Cross your arms and tap your shoulders slowly, left then right, like butterfly wings. Keep going for a minute and tell me when you're done! pip~",
];

pub const OCEAN_STARTS: &[&str] = &[
    "Let's do ocean breathing! {k} <i>sways like a wave</i> Breathe in as the wave rolls in... and out as it rolls away. Let's do five waves together. Tell me when you're done! pip~",
];

pub const TRIANGLE_STARTS: &[&str] = &[
    "Let's do triangle breathing! {k} <i>draws a triangle in the snow</i> In for 3, hold for 3, out for 3. Trace each side in your mind. Let me know when you're done! pip!",
];

pub const COLOR_STARTS: &[&str] = &[
    "Let's play color spotting! {k} <i>looks around with wide eyes</i> Can you find something blue, something green and something yellow near you? Tell me what you find! pip~",
];

pub const BODY_MAP_STARTS: &[&str] = &[
    "Let's make a body map! {k} <i>wiggles flippers</i> Notice how your feet feel, then your hands, then your shoulders. Where do you feel calm? Tell me when you're done! pip~",
];

pub const SENSES_STARTS: &[&str] = &[
    "Let's try 5-4-3-2-1! {k} <i>counts on flippers</i> Name 5 things you see, 4 you can touch, 3 you hear, 2 you smell and 1 you taste. Tell me when you're done! pip~",
];

pub const BODY_SCAN_STARTS: &[&str] = &[
    "Let's do a gentle body scan! {k} <i>settles down softly</i> Start at the top of your head and slowly notice each part of your body down to your toes. Let me know when you're done! pip~",
];

pub const ALPHABET_STARTS: &[&str] = &[
    "Let's play the alphabet game! {k} <i>bounces excitedly</i> Name an animal for each letter: A, B, C... How far can you get? Tell me when you're done! pip!",
];

pub const STORY_STARTS: &[&str] = &[
    "Let's build a story together! {k} <i>waddles to a cozy spot</i> Once upon a time, a little penguin found a glowing snowflake... What happens next? pip~",
];

pub const SAFE_PLACE_STARTS: &[&str] = &[
    "Let's visit your safe place! {k} <i>snuggles in</i> Imagine somewhere you feel completely safe. What does it look like? What can you hear there? Tell me when you're ready! pip~",
];

// ----------------------------------------------------------------------------
// Encouragement while a technique is in progress
// ----------------------------------------------------------------------------

pub const BREATHING_ENCOURAGE: &[&str] = &[
    "You're doing great! {k} <i>breathes along with you</i> Keep breathing slowly. Tell me when you're done! pip~",
    "That's it, nice and slow. {k} <i>puffs feathers in rhythm</i> Let me know when you've finished. pip!",
];

pub const SENSORY_ENCOURAGE: &[&str] = &[
    "Wonderful noticing! {k} <i>nods proudly</i> Keep going and tell me when you're done! pip~",
    "You're doing so well grounding yourself. {k} <i>pats you gently</i> Say done whenever you're ready. pip!",
];

pub const GENERAL_ENCOURAGE: &[&str] = &[
    "You're doing amazing! {k} <i>cheers with both flippers</i> Take your time and tell me when you're done. pip~",
    "Keep going, friend! {k} <i>waddles beside you</i> I'm right here. Let me know when you've finished. pip pip!",
];

// ----------------------------------------------------------------------------
// Completion and follow-ups
// ----------------------------------------------------------------------------

pub const PRAISE: &[&str] = &[
    "You did it! I'm so proud of you! {k} <i>does a happy flipper flap</i>",
    "Amazing job, friend! {k} <i>gives you a big penguin hug</i>",
    "Wonderful work! {k} <i>waddles in a proud little circle</i>",
];

pub const FOLLOWUP_PROMPTS: &[&str] = &[
    "Would you like to try another technique? (yes/no) pip~",
    "Want to do another one together? Just say yes or no! pip!",
];

pub const FOLLOWUP_DECLINED: &[&str] = &[
    "That's totally okay! {k} <i>settles down beside you</i> We can just rest or chat. I'm here whenever you need me. pip~",
    "No problem at all, friend. {k} <i>nuzzles gently</i> You did great today. pip!",
];

pub const FOLLOWUP_CLARIFY: &[&str] = &[
    "Would you like to try another technique? {k} Just say yes or no! pip~",
    "Hmm, I didn't quite catch that. {k} <i>tilts head</i> Another technique, yes or no? pip!",
];

// ----------------------------------------------------------------------------
// Games
// ----------------------------------------------------------------------------

pub const WOULD_YOU_RATHER_INTROS: &[&str] = &[
    "Let's play Would You Rather! {k} {q} <i>bounces excitedly</i> Tell me your choice! pip~ 🎮",
    "Yay, Would You Rather time! {k} Here's one: {q} What do you pick? pip!",
];

pub const WOULD_YOU_RATHER_NEXT: &[&str] = &[
    "Ooh, here's another one! {k} {q} What do you pick? pip!",
    "Next question! {k} {q} Tell me your choice! pip~",
];

pub const WOULD_YOU_RATHER_QUESTIONS: &[&str] = &[
    "Would you rather be able to fly or be able to breathe underwater?",
    "Would you rather live in a snow castle or a treehouse?",
    "Would you rather have a pet penguin or a pet dragon?",
    "Would you rather eat only pizza or only ice cream for a week?",
    "Would you rather be able to talk to animals or speak every language?",
    "Would you rather explore space or the deep ocean?",
    "Would you rather have summer all year or winter all year?",
    "Would you rather be super fast or super strong?",
    "Would you rather read minds or be invisible?",
    "Would you rather live by the beach or in the mountains?",
    "Would you rather have a magic carpet or a time machine?",
    "Would you rather slide on ice like a penguin or swim like a fish?",
    "Would you rather always be a little too warm or a little too cold?",
    "Would you rather sing every word or dance everywhere you go?",
    "Would you rather have a rainbow-colored house or a glow-in-the-dark house?",
];

pub const WOULD_YOU_RATHER_PRAISE: &[&str] = &[
    "Ooh, great choice! {k} <i>claps flippers</i> I think I'd pick the same! Want to play another round? (yes/no) pip!",
    "I love that answer! {k} <i>wiggles happily</i> Want another question? (yes/no) pip~",
];

pub const OPPOSITE_DAY_INTROS: &[&str] = &[
    "It's Opposite Day! {k} I'll say a word and you tell me its opposite. My word is: \"{w}\"! pip~",
    "Let's play Opposite Day! {k} <i>flips upside down</i> What's the opposite of \"{w}\"? pip!",
];

pub const OPPOSITE_DAY_NEXT: &[&str] = &[
    "Here's another! {k} What's the opposite of \"{w}\"? pip~",
    "Next word! {k} <i>hops excitedly</i> The opposite of \"{w}\" is...? pip!",
];

pub const OPPOSITE_PROMPTS: &[&str] = &[
    "hot", "up", "happy", "big", "fast", "day", "loud", "wet", "light", "open", "full", "soft",
    "early", "near", "sweet",
];

pub const OPPOSITE_DAY_PRAISE: &[&str] = &[
    "Yes! You're so good at this! {k} <i>does a happy spin</i> Want to try another word? (yes/no) pip!",
    "Great thinking! {k} <i>flaps wings proudly</i> Should we do another one? (yes/no) pip~",
];

pub const THREE_THINGS_INTROS: &[&str] = &[
    "Let's play Three Things! {k} Can you name three {t}? Take your time! pip~",
    "Three Things time! {k} <i>holds up three flippers... well, two</i> Name three {t}! pip!",
];

pub const THREE_THINGS_NEXT: &[&str] = &[
    "Here's a new one! {k} Name three {t}! pip~",
    "Okay, next round! {k} Can you think of three {t}? pip!",
];

pub const THREE_THINGS_TOPICS: &[&str] = &[
    "foods you'd eat forever",
    "animals that live in the ocean",
    "things that are blue",
    "places you'd love to visit",
    "sounds that make you smile",
    "things you can find in a kitchen",
];

pub const THREE_THINGS_PRAISE: &[&str] = &[
    "Those are wonderful! {k} <i>claps happily</i> Want to play another round? (yes/no) pip!",
    "Ooh, great picks! {k} <i>wiggles with joy</i> Another round? (yes/no) pip~",
];

pub const GAME_DECLINED: &[&str] = &[
    "That was so much fun! {k} <i>does a little victory waddle</i> Thanks for playing with me. pip~",
    "Okay, game over! {k} <i>bows with a flourish</i> You were a great player. pip pip!",
];

pub const GAME_CLARIFY: &[&str] = &[
    "Would you like to play again? {k} Just say yes or no! pip~",
];

// ----------------------------------------------------------------------------
// Fixed replies
// ----------------------------------------------------------------------------

pub const TROUBLE_REPLY: &str = "I'm having a little trouble thinking right now, but let's try something else together! (◕‿◕) <i>tilts head curiously</i> pip!";
