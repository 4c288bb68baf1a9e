//! Response selection
//!
//! Three decision trees map an intent to a reply. The tree is chosen by the
//! conversation mode, or by the caller's episode hint while the user has
//! not yet said whether they are in an episode.

use super::activities;
use super::intent::Intent;
use super::lexicon::{self, Voice};
use super::response::{Response, Selection};
use super::state::{ConversationState, Mode, OptionToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tree {
    Support,
    Onboarding,
    Casual,
}

impl Tree {
    pub fn label(self) -> &'static str {
        match self {
            Tree::Support => "support",
            Tree::Onboarding => "onboarding",
            Tree::Casual => "casual",
        }
    }
}

/// Establish the mode from the hint if nothing has settled it yet
pub fn apply_episode_hint(state: &mut ConversationState, episode_hint: Option<bool>) {
    if state.episode_status_known() {
        return;
    }
    match episode_hint {
        Some(true) => state.enter_support(),
        Some(false) => state.enter_neutral(),
        None => {}
    }
}

pub fn tree_for(state: &ConversationState) -> Tree {
    if state.mode() == Mode::Support {
        Tree::Support
    } else if state.episode_status_known() {
        Tree::Casual
    } else {
        Tree::Onboarding
    }
}

/// Pick a reply for `intent`, updating `state` along the way
pub fn select(
    intent: Intent,
    state: &mut ConversationState,
    episode_hint: Option<bool>,
    voice: &mut Voice,
) -> Selection {
    apply_episode_hint(state, episode_hint);
    let tree = tree_for(state);
    tracing::debug!(
        tree = tree.label(),
        intent = intent.label(),
        mode = ?state.mode(),
        "Selecting response"
    );

    match tree {
        Tree::Support => support(intent, state, voice),
        Tree::Onboarding => onboarding(intent, state, voice),
        Tree::Casual => casual(intent, state, voice),
    }
}

/// Reply to an empty opening message
pub fn opening(voice: &mut Voice) -> Response {
    Response::new(voice.say(lexicon::OPENING_GREETINGS))
}

/// Reply to a reported symptom; drops whatever was in progress and opens
/// the numbered menu
pub fn symptom_support(state: &mut ConversationState, voice: &mut Voice) -> Response {
    state.settle();
    state.enter_support();
    state.offer_options();
    Response::new(voice.say(lexicon::SYMPTOM_RESPONSES)).with_grounding("breathing")
}

/// Closing reply; the caller resets the conversation afterwards
pub fn farewell(voice: &mut Voice) -> Response {
    Response::new(voice.say(lexicon::FAREWELLS))
}

fn menu(
    pool: &'static [&'static str],
    state: &mut ConversationState,
    voice: &mut Voice,
) -> Selection {
    state.offer_options();
    Selection::Reply(Response::new(voice.say(pool)))
}

fn reply(pool: &'static [&'static str], voice: &mut Voice) -> Selection {
    Selection::Reply(Response::new(voice.say(pool)))
}

/// Requests that start an activity in every tree
fn activity_request(
    intent: Intent,
    state: &mut ConversationState,
    voice: &mut Voice,
) -> Option<Selection> {
    let token = match intent {
        Intent::Option(token) => token,
        Intent::SpecificGame(game) => game.token(),
        Intent::GameRequest => OptionToken::DistractionGame,
        Intent::TechniqueRequest => *voice
            .pick(&OptionToken::SURPRISE)
            .unwrap_or(&OptionToken::BreathingTechnique),
        _ => return None,
    };
    Some(Selection::Reply(activities::start(token, state, voice)))
}

fn support(intent: Intent, state: &mut ConversationState, voice: &mut Voice) -> Selection {
    if let Some(selection) = activity_request(intent, state, voice) {
        return selection;
    }
    match intent {
        Intent::EpisodeDistress => {
            state.offer_options();
            Selection::Reply(
                Response::new(voice.say(lexicon::DISTRESS_MENU)).with_grounding("breathing"),
            )
        }
        Intent::EmotionSupport => menu(lexicon::EMOTION_MENU, state, voice),
        Intent::Thanks => reply(lexicon::THANKS_REPLIES, voice),
        Intent::Farewell => Selection::Reply(farewell(voice)),
        _ => support_default(intent, state, voice),
    }
}

fn support_default(intent: Intent, state: &mut ConversationState, voice: &mut Voice) -> Selection {
    if let Some(technique) = state.current_technique() {
        return Selection::Reply(activities::encourage(technique, voice));
    }
    if !state.offered_techniques() {
        return menu(lexicon::MENU_OFFERS, state, voice);
    }
    let acknowledgement = Response::new(voice.say(lexicon::SUPPORT_ACKS));
    match intent {
        Intent::Unclear | Intent::Question | Intent::GeneralTalk => Selection::Generate {
            intent,
            fallback: acknowledgement,
        },
        _ => Selection::Reply(acknowledgement),
    }
}

fn onboarding(intent: Intent, state: &mut ConversationState, voice: &mut Voice) -> Selection {
    if let Some(selection) = activity_request(intent, state, voice) {
        return selection;
    }
    match intent {
        Intent::Greeting => reply(lexicon::OPENING_GREETINGS, voice),
        Intent::EpisodeDistress | Intent::EmotionSupport => {
            menu(lexicon::ONBOARDING_MENU, state, voice)
        }
        Intent::GeneralTalk => reply(lexicon::ONBOARDING_TALK, voice),
        Intent::Question => reply(lexicon::ONBOARDING_QUESTION, voice),
        Intent::Thanks => reply(lexicon::THANKS_REPLIES, voice),
        Intent::Farewell => Selection::Reply(farewell(voice)),
        _ => support_default(intent, state, voice),
    }
}

fn casual(intent: Intent, state: &mut ConversationState, voice: &mut Voice) -> Selection {
    if let Some(selection) = activity_request(intent, state, voice) {
        return selection;
    }
    match intent {
        Intent::Greeting => reply(lexicon::CASUAL_GREETINGS, voice),
        Intent::Thanks => reply(lexicon::THANKS_REPLIES, voice),
        Intent::EpisodeDistress | Intent::EmotionSupport => {
            menu(lexicon::CASUAL_EMOTION, state, voice)
        }
        Intent::Farewell => Selection::Reply(farewell(voice)),
        _ => {
            if let Some(technique) = state.current_technique() {
                return Selection::Reply(activities::encourage(technique, voice));
            }
            let pool = match intent {
                Intent::GeneralTalk => lexicon::CASUAL_TALK,
                Intent::Question => lexicon::CASUAL_QUESTION,
                _ => lexicon::CASUAL_OPEN,
            };
            Selection::Generate {
                intent,
                fallback: Response::new(voice.say(pool)),
            }
        }
    }
}
