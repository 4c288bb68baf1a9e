//! Intent classification
//!
//! Rules are evaluated top to bottom; the first match wins. The order is
//! part of the behavior and is pinned by the tests below.

use regex::Regex;
use std::sync::LazyLock;

use super::lexicon::{
    self, DISTRESS, EMOTION, EPISODE_NO, EPISODE_YES, GAME_REQUEST, GENERAL_TALK,
    GREETING, QUESTION, TECHNIQUE_REQUEST, THANKS,
};
use super::state::{ConversationState, GameKind, OptionToken};

/// What the user is trying to do with this utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Farewell,
    Thanks,
    EpisodeDistress,
    EmotionSupport,
    TechniqueRequest,
    SpecificGame(GameKind),
    GameRequest,
    GeneralTalk,
    Question,
    Option(OptionToken),
    Unclear,
}

impl Intent {
    pub fn label(self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Farewell => "farewell",
            Intent::Thanks => "thanks",
            Intent::EpisodeDistress => "episode_distress",
            Intent::EmotionSupport => "emotion_support",
            Intent::TechniqueRequest => "technique_request",
            Intent::SpecificGame(_) => "specific_game",
            Intent::GameRequest => "game_request",
            Intent::GeneralTalk => "general_talk",
            Intent::Question => "question",
            Intent::Option(_) => "option_selection",
            Intent::Unclear => "unclear",
        }
    }
}

// ============================================================================
// Option selection
// ============================================================================

/// One numbered menu slot: its token and the words that select it
struct MenuSlot {
    token: OptionToken,
    pattern: Regex,
}

fn word_pattern(alternatives: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{alternatives})\b")).expect("option pattern compiles")
}

/// Words that count as picking from the numbered menu
static MENU_SELECTION: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        word_pattern("1|one|first|breathing|breathe"),
        word_pattern("2|two|second|sensory|grounding|color|spotting"),
        word_pattern("3|three|third|game|distraction|fun|would you rather"),
        word_pattern("4|four|fourth|chat|talk|just chat|together"),
    ]
});

/// Named techniques, checked before menu numbers
static NAMED_OPTIONS: LazyLock<Vec<MenuSlot>> = LazyLock::new(|| {
    [
        (OptionToken::ImaginationJourney, "imagination|journey"),
        (OptionToken::ButterflyHug, "butterfly|hug"),
        (OptionToken::OceanBreathing, "ocean"),
        (OptionToken::TriangleBreathing, "triangle"),
        (OptionToken::ColorSpotting, "colou?r|spotting"),
        (OptionToken::BodyScan, r"body\s+scan|scan"),
        (OptionToken::BodyMap, r"body\s+map|map|body"),
        (OptionToken::Senses54321, r"5-4-3-2-1|54321"),
        (OptionToken::AlphabetGame, "alphabet"),
        (OptionToken::WouldYouRatherGame, r"would\s+you\s+rather"),
        (OptionToken::OppositeDayGame, "opposite|opposite day"),
        (OptionToken::ThreeThingsGame, r"three\s+things"),
        (OptionToken::StoryBuilder, "story|stories"),
        (OptionToken::SafePlace, r"safe\s+place"),
    ]
    .into_iter()
    .map(|(token, words)| MenuSlot {
        token,
        pattern: word_pattern(words),
    })
    .collect()
});

/// Menu numbers, then broad category words
static GENERIC_OPTIONS: LazyLock<Vec<MenuSlot>> = LazyLock::new(|| {
    [
        (OptionToken::BreathingTechnique, "1|one|first"),
        (OptionToken::SensoryGrounding, "2|two|second"),
        (OptionToken::DistractionGame, "3|three|third"),
        (OptionToken::JustChat, "4|four|fourth"),
        (OptionToken::BreathingTechnique, "breathing|breathe"),
        (OptionToken::SensoryGrounding, "sensory|grounding"),
        (OptionToken::DistractionGame, "game|distraction|fun|play"),
        (OptionToken::JustChat, r"chat|talk|just\s+chat|together|just\s+be"),
    ]
    .into_iter()
    .map(|(token, words)| MenuSlot {
        token,
        pattern: word_pattern(words),
    })
    .collect()
});

/// Does this text read as a pick from the numbered menu?
pub fn is_option_selection(text: &str) -> bool {
    MENU_SELECTION.iter().any(|p| p.is_match(text))
}

/// Every option the text names, best match first
pub fn matching_options(text: &str) -> impl Iterator<Item = OptionToken> + '_ {
    NAMED_OPTIONS
        .iter()
        .chain(GENERIC_OPTIONS.iter())
        .filter(move |slot| slot.pattern.is_match(text))
        .map(|slot| slot.token)
}

/// Resolve free text to an option token.
///
/// Specific technique names win over menu numbers, which win over broad
/// category words. Pure: the same text always yields the same token.
pub fn detect_selected_option(text: &str) -> Option<OptionToken> {
    matching_options(text).next()
}

// ============================================================================
// Classification
// ============================================================================

fn specific_game(text: &str) -> Option<GameKind> {
    match lexicon::match_technique_category(text) {
        Some(lexicon::TechniqueCategory::Game(game)) => game,
        _ => None,
    }
}

fn is_greeting(text: &str) -> bool {
    GREETING.matches(text)
}

fn is_thanks(text: &str) -> bool {
    THANKS.matches(text)
}

fn is_distress(text: &str) -> bool {
    DISTRESS.matches(text)
}

fn is_emotion(text: &str) -> bool {
    EMOTION.matches(text)
}

fn is_technique_request(text: &str) -> bool {
    TECHNIQUE_REQUEST.matches(text)
}

fn is_game_request(text: &str) -> bool {
    GAME_REQUEST.matches(text)
}

fn is_general_talk(text: &str) -> bool {
    GENERAL_TALK.matches(text)
}

fn is_question(text: &str) -> bool {
    QUESTION.matches(text)
}

type Rule = (fn(&str) -> bool, Intent);

/// Keyword rules ahead of the named games, in priority order
const LEADING_RULES: &[Rule] = &[
    (is_greeting, Intent::Greeting),
    (lexicon::is_farewell_phrase, Intent::Farewell),
    (is_thanks, Intent::Thanks),
    (is_distress, Intent::EpisodeDistress),
    (is_emotion, Intent::EmotionSupport),
    (is_technique_request, Intent::TechniqueRequest),
];

/// Keyword rules after the named games
const TRAILING_RULES: &[Rule] = &[
    (is_game_request, Intent::GameRequest),
    (is_general_talk, Intent::GeneralTalk),
    (is_question, Intent::Question),
];

fn first_rule(rules: &[Rule], text: &str) -> Option<Intent> {
    rules
        .iter()
        .find(|(predicate, _)| predicate(text))
        .map(|(_, intent)| *intent)
}

/// Map an utterance to a single intent.
///
/// Numbered-menu words only count as selections while a menu is open, so a
/// stray "3" in ordinary chat is not taken as picking a game. Named games
/// sit just ahead of the generic game rule so "would you rather" is not
/// swallowed by "play".
pub fn classify(text: &str, state: &ConversationState) -> Intent {
    if state.offered_options() && is_option_selection(text) {
        if let Some(token) = detect_selected_option(text) {
            return Intent::Option(token);
        }
    }

    first_rule(LEADING_RULES, text)
        .or_else(|| specific_game(text).map(Intent::SpecificGame))
        .or_else(|| first_rule(TRAILING_RULES, text))
        .unwrap_or(Intent::Unclear)
}

/// Reading of an answer to "are you experiencing symptoms?"
///
/// A "no"-style answer wins when both readings are present
/// ("I'm not having an episode").
pub fn detect_episode_answer(text: &str) -> Option<bool> {
    if EPISODE_NO.matches(text) {
        Some(false)
    } else if EPISODE_YES.matches(text) {
        Some(true)
    } else {
        None
    }
}
