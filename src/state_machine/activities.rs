//! Techniques and games in progress
//!
//! Starting an activity, answering game rounds, noticing completion and
//! resolving the yes/no follow-up questions that come after.

use super::intent::{is_option_selection, matching_options};
use super::lexicon::{
    self, TechniqueCategory, Voice, AFFIRMATIVE, COMPLETION, NEGATIVE,
};
use super::response::Response;
use super::state::{ConversationState, GameKind, OptionToken, Technique};

impl TechniqueCategory {
    /// Whether a specifically named option belongs to this family
    fn includes(self, token: OptionToken) -> bool {
        use OptionToken as T;
        match self {
            TechniqueCategory::Breathing => matches!(
                token,
                T::BreathingTechnique | T::OceanBreathing | T::TriangleBreathing
            ),
            TechniqueCategory::Sensory => matches!(
                token,
                T::SensoryGrounding | T::ColorSpotting | T::BodyMap | T::Senses54321 | T::BodyScan
            ),
            TechniqueCategory::Game(_) => matches!(
                token,
                T::DistractionGame
                    | T::WouldYouRatherGame
                    | T::OppositeDayGame
                    | T::ThreeThingsGame
                    | T::AlphabetGame
                    | T::StoryBuilder
            ),
            TechniqueCategory::Imagination => {
                matches!(token, T::ImaginationJourney | T::SafePlace)
            }
            TechniqueCategory::ButterflyHug => token == T::ButterflyHug,
            TechniqueCategory::Any => true,
        }
    }

    fn default_token(self) -> OptionToken {
        match self {
            TechniqueCategory::Breathing => OptionToken::BreathingTechnique,
            TechniqueCategory::Sensory => OptionToken::SensoryGrounding,
            TechniqueCategory::Game(Some(game)) => game.token(),
            TechniqueCategory::Game(None) => OptionToken::DistractionGame,
            TechniqueCategory::Imagination => OptionToken::ImaginationJourney,
            TechniqueCategory::ButterflyHug => OptionToken::ButterflyHug,
            TechniqueCategory::Any => OptionToken::BreathingTechnique,
        }
    }
}

/// The option an explicit "let's do X" request asks for, if any
pub fn requested_option(text: &str, voice: &mut Voice) -> Option<OptionToken> {
    let category = lexicon::match_technique_category(text)?;
    if category == TechniqueCategory::Any {
        return Some(surprise(voice));
    }
    let named = matching_options(text).find(|token| category.includes(*token));
    Some(named.unwrap_or_else(|| category.default_token()))
}

fn surprise(voice: &mut Voice) -> OptionToken {
    voice
        .pick(&OptionToken::SURPRISE)
        .copied()
        .unwrap_or(OptionToken::BreathingTechnique)
}

/// Start the activity behind `token` and return its opening prompt
pub fn start(token: OptionToken, state: &mut ConversationState, voice: &mut Voice) -> Response {
    state.record_selection(token);

    let game = match token {
        OptionToken::DistractionGame => Some(
            voice
                .pick(&GameKind::ALL)
                .copied()
                .unwrap_or(GameKind::WouldYouRather),
        ),
        OptionToken::WouldYouRatherGame => Some(GameKind::WouldYouRather),
        OptionToken::OppositeDayGame => Some(GameKind::OppositeDay),
        OptionToken::ThreeThingsGame => Some(GameKind::ThreeThings),
        _ => None,
    };
    state.begin(token, game);
    tracing::debug!(option = token.as_str(), "Activity started");

    if let Some(game) = game {
        return game_round(game, voice, true);
    }

    let Some(technique) = token.technique() else {
        return Response::new(voice.say(lexicon::JUST_CHAT));
    };
    let pool = match technique {
        Technique::Breathing => lexicon::BREATHING_STARTS,
        Technique::Sensory => lexicon::SENSORY_STARTS,
        Technique::Imagination => lexicon::IMAGINATION_STARTS,
        Technique::Butterfly => lexicon::BUTTERFLY_STARTS,
        Technique::Ocean => lexicon::OCEAN_STARTS,
        Technique::Triangle => lexicon::TRIANGLE_STARTS,
        Technique::Color => lexicon::COLOR_STARTS,
        Technique::BodyMap => lexicon::BODY_MAP_STARTS,
        Technique::Senses54321 => lexicon::SENSES_STARTS,
        Technique::BodyScan => lexicon::BODY_SCAN_STARTS,
        Technique::AlphabetGame => lexicon::ALPHABET_STARTS,
        Technique::StoryBuilder => lexicon::STORY_STARTS,
        Technique::SafePlace => lexicon::SAFE_PLACE_STARTS,
        // games returned above
        Technique::Game => lexicon::ALPHABET_STARTS,
    };
    tagged(Response::new(voice.say(pool)), technique)
}

fn tagged(response: Response, technique: Technique) -> Response {
    match technique {
        Technique::Game | Technique::AlphabetGame | Technique::StoryBuilder => {
            response.with_game(technique.tag())
        }
        _ => response.with_grounding(technique.tag()),
    }
}

/// Prompt for one round of `game`
fn game_round(game: GameKind, voice: &mut Voice, first: bool) -> Response {
    let text = match game {
        GameKind::WouldYouRather => {
            let question = voice
                .pick(lexicon::WOULD_YOU_RATHER_QUESTIONS)
                .copied()
                .unwrap_or_default();
            let pool = if first {
                lexicon::WOULD_YOU_RATHER_INTROS
            } else {
                lexicon::WOULD_YOU_RATHER_NEXT
            };
            voice.say_with(pool, "{q}", question)
        }
        GameKind::OppositeDay => {
            let word = voice
                .pick(lexicon::OPPOSITE_PROMPTS)
                .copied()
                .unwrap_or("hot");
            let pool = if first {
                lexicon::OPPOSITE_DAY_INTROS
            } else {
                lexicon::OPPOSITE_DAY_NEXT
            };
            voice.say_with(pool, "{w}", word)
        }
        GameKind::ThreeThings => {
            let topic = voice
                .pick(lexicon::THREE_THINGS_TOPICS)
                .copied()
                .unwrap_or("foods you'd eat forever");
            let pool = if first {
                lexicon::THREE_THINGS_INTROS
            } else {
                lexicon::THREE_THINGS_NEXT
            };
            voice.say_with(pool, "{t}", topic)
        }
    };
    Response::new(text).with_game(game.tag())
}

/// Praise and ask about another technique if the user just finished one.
///
/// Only a non-game technique with no question pending can complete; game
/// rounds treat every reply as the answer.
pub fn check_completion(
    state: &mut ConversationState,
    text: &str,
    voice: &mut Voice,
) -> Option<Response> {
    let technique = state.current_technique()?;
    if technique == Technique::Game
        || state.expecting_technique_followup()
        || state.expecting_game_followup()
        || !COMPLETION.matches(text)
    {
        return None;
    }

    state.complete_technique();
    state.expect_technique_followup();
    tracing::debug!(technique = technique.tag(), "Technique completed");

    let praise = voice.say(lexicon::PRAISE);
    let prompt = voice.say(lexicon::FOLLOWUP_PROMPTS);
    Some(Response::new(format!("{praise} {prompt}")))
}

/// Resolve whatever the previous turn left waiting for an answer.
///
/// Technique follow-ups are checked before game follow-ups, which are
/// checked before open game rounds. A plain "yes" to an open menu picks
/// something for the user; naming an option is left to the classifier.
pub fn respond_to_pending(
    state: &mut ConversationState,
    text: &str,
    voice: &mut Voice,
) -> Option<Response> {
    if state.expecting_technique_followup() {
        return Some(technique_followup(state, text, voice));
    }
    if state.expecting_game_followup() {
        return Some(game_followup(state, text, voice));
    }
    if state.game_round_open() {
        let game = state.current_game()?;
        return Some(game_answer(game, state, voice));
    }
    if state.offered_options() && AFFIRMATIVE.matches(text) && !is_option_selection(text) {
        let token = surprise(voice);
        return Some(start(token, state, voice));
    }
    None
}

fn technique_followup(state: &mut ConversationState, text: &str, voice: &mut Voice) -> Response {
    if AFFIRMATIVE.matches(text) {
        let token = surprise(voice);
        start(token, state, voice)
    } else if NEGATIVE.matches(text) {
        state.settle();
        Response::new(voice.say(lexicon::FOLLOWUP_DECLINED))
    } else {
        Response::new(voice.say(lexicon::FOLLOWUP_CLARIFY))
    }
}

fn game_followup(state: &mut ConversationState, text: &str, voice: &mut Voice) -> Response {
    let Some(game) = state.current_game() else {
        state.settle();
        return Response::new(voice.say(lexicon::GAME_DECLINED));
    };

    if AFFIRMATIVE.matches(text) {
        // Would You Rather keeps going; the others hand over to a random game
        let next = match game {
            GameKind::WouldYouRather => game,
            GameKind::OppositeDay | GameKind::ThreeThings => {
                voice.pick(&GameKind::ALL).copied().unwrap_or(game)
            }
        };
        state.next_round(next);
        game_round(next, voice, next != game)
    } else if NEGATIVE.matches(text) {
        state.settle();
        Response::new(voice.say(lexicon::GAME_DECLINED))
    } else {
        Response::new(voice.say(lexicon::GAME_CLARIFY)).with_game(game.tag())
    }
}

fn game_answer(game: GameKind, state: &mut ConversationState, voice: &mut Voice) -> Response {
    let pool = match game {
        GameKind::WouldYouRather => lexicon::WOULD_YOU_RATHER_PRAISE,
        GameKind::OppositeDay => lexicon::OPPOSITE_DAY_PRAISE,
        GameKind::ThreeThings => lexicon::THREE_THINGS_PRAISE,
    };
    state.expect_game_followup();
    Response::new(voice.say(pool)).with_game(game.tag())
}

/// Keep the user going with the technique already in progress
pub fn encourage(technique: Technique, voice: &mut Voice) -> Response {
    let pool = match technique {
        Technique::Breathing | Technique::Ocean | Technique::Triangle => {
            lexicon::BREATHING_ENCOURAGE
        }
        Technique::Sensory
        | Technique::Color
        | Technique::BodyMap
        | Technique::Senses54321
        | Technique::BodyScan => lexicon::SENSORY_ENCOURAGE,
        _ => lexicon::GENERAL_ENCOURAGE,
    };
    tagged(Response::new(voice.say(pool)), technique)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::lexicon::rendered_from;

    fn voice() -> Voice {
        Voice::seeded(42)
    }

    #[test]
    fn test_start_breathing() {
        let mut state = ConversationState::new();
        state.offer_options();
        let mut voice = voice();
        let response = start(OptionToken::BreathingTechnique, &mut state, &mut voice);

        assert_eq!(state.current_technique(), Some(Technique::Breathing));
        assert!(!state.offered_options());
        assert_eq!(state.last_selection(), Some("breathing_technique"));
        assert_eq!(response.grounding_technique(), Some("breathing"));
        assert!(rendered_from(lexicon::BREATHING_STARTS, response.text()));
    }

    #[test]
    fn test_start_just_chat_clears_activity() {
        let mut state = ConversationState::new();
        let mut voice = voice();
        start(OptionToken::BodyScan, &mut state, &mut voice);
        let response = start(OptionToken::JustChat, &mut state, &mut voice);

        assert!(state.current_technique().is_none());
        assert!(rendered_from(lexicon::JUST_CHAT, response.text()));
    }

    #[test]
    fn test_distraction_game_picks_a_game() {
        let mut state = ConversationState::new();
        let mut voice = voice();
        let response = start(OptionToken::DistractionGame, &mut state, &mut voice);

        assert_eq!(state.current_technique(), Some(Technique::Game));
        let game = state.current_game().expect("game chosen");
        assert_eq!(response.distraction_game(), Some(game.tag()));
        assert!(state.game_round_open());
    }

    #[test]
    fn test_game_loop() {
        let mut state = ConversationState::new();
        let mut voice = voice();
        let opening = start(OptionToken::WouldYouRatherGame, &mut state, &mut voice);
        assert!(opening.text().contains("Would you rather"));

        // any answer counts
        let praise = respond_to_pending(&mut state, "flying!", &mut voice).expect("answer");
        assert!(rendered_from(lexicon::WOULD_YOU_RATHER_PRAISE, praise.text()));
        assert!(state.expecting_game_followup());

        let again = respond_to_pending(&mut state, "yes please", &mut voice).expect("again");
        assert!(!state.expecting_game_followup());
        assert_eq!(state.current_game(), Some(GameKind::WouldYouRather));
        assert_eq!(again.distraction_game(), Some("would-you-rather"));

        respond_to_pending(&mut state, "the ocean one", &mut voice);
        let done = respond_to_pending(&mut state, "no more", &mut voice).expect("end");
        assert!(rendered_from(lexicon::GAME_DECLINED, done.text()));
        assert!(state.current_technique().is_none());
        assert!(state.current_game().is_none());
    }

    #[test]
    fn test_other_games_replay_as_any_game() {
        let mut state = ConversationState::new();
        let mut voice = voice();
        start(OptionToken::OppositeDayGame, &mut state, &mut voice);
        respond_to_pending(&mut state, "cold", &mut voice);
        let again = respond_to_pending(&mut state, "sure", &mut voice).expect("again");

        let game = state.current_game().expect("game continues");
        assert_eq!(again.distraction_game(), Some(game.tag()));
        assert_eq!(state.current_technique(), Some(Technique::Game));
        assert!(state.game_round_open());
    }

    #[test]
    fn test_game_followup_ambiguous_keeps_waiting() {
        let mut state = ConversationState::new();
        let mut voice = voice();
        start(OptionToken::ThreeThingsGame, &mut state, &mut voice);
        respond_to_pending(&mut state, "pizza, tacos, soup", &mut voice);
        let reply = respond_to_pending(&mut state, "hmm", &mut voice).expect("clarify");

        assert!(rendered_from(lexicon::GAME_CLARIFY, reply.text()));
        assert!(state.expecting_game_followup());
    }

    #[test]
    fn test_completion_then_followup() {
        let mut state = ConversationState::new();
        let mut voice = voice();
        start(OptionToken::BreathingTechnique, &mut state, &mut voice);

        assert!(check_completion(&mut state, "still going", &mut voice).is_none());
        let praise = check_completion(&mut state, "done, I feel better", &mut voice)
            .expect("completion");
        assert!(state.last_technique_completed());
        assert!(state.expecting_technique_followup());
        assert!(state.current_technique().is_none());
        assert!(praise.text().contains("yes"));

        let unsure = respond_to_pending(&mut state, "maybe", &mut voice).expect("clarify");
        assert!(rendered_from(lexicon::FOLLOWUP_CLARIFY, unsure.text()));
        assert!(state.expecting_technique_followup());

        respond_to_pending(&mut state, "no thanks", &mut voice);
        assert!(!state.expecting_technique_followup());
        assert!(!state.last_technique_completed());
        assert!(state.current_technique().is_none());
    }

    #[test]
    fn test_affirmative_followup_starts_another() {
        let mut state = ConversationState::new();
        let mut voice = voice();
        start(OptionToken::SafePlace, &mut state, &mut voice);
        check_completion(&mut state, "all done", &mut voice);
        respond_to_pending(&mut state, "yes!", &mut voice);

        assert!(state.current_technique().is_some());
        assert!(!state.expecting_technique_followup());
        assert!(!state.last_technique_completed());
    }

    #[test]
    fn test_game_rounds_do_not_complete() {
        let mut state = ConversationState::new();
        let mut voice = voice();
        start(OptionToken::OppositeDayGame, &mut state, &mut voice);
        assert!(check_completion(&mut state, "done", &mut voice).is_none());
    }

    #[test]
    fn test_requested_option_prefers_named_technique() {
        let mut voice = voice();
        assert_eq!(
            requested_option("can we do ocean breathing", &mut voice),
            Some(OptionToken::OceanBreathing)
        );
        assert_eq!(
            requested_option("some breathing please", &mut voice),
            Some(OptionToken::BreathingTechnique)
        );
        assert_eq!(
            requested_option("let's play three things", &mut voice),
            Some(OptionToken::ThreeThingsGame)
        );
        assert_eq!(requested_option("no thanks", &mut voice), None);
        assert!(requested_option("any exercise", &mut voice).is_some());
    }

    #[test]
    fn test_requested_option_scans_past_other_families() {
        let mut voice = voice();
        assert_eq!(
            requested_option("hug and ocean breathing", &mut voice),
            Some(OptionToken::OceanBreathing)
        );
        assert_eq!(
            requested_option("a butterfly hug, then triangle breathing", &mut voice),
            Some(OptionToken::TriangleBreathing)
        );
    }

    #[test]
    fn test_yes_to_open_menu_starts_something() {
        let mut state = ConversationState::new();
        state.offer_options();
        let mut voice = voice();
        let response = respond_to_pending(&mut state, "yes please", &mut voice).expect("started");

        assert!(state.current_technique().is_some());
        assert!(!state.offered_options());
        assert!(response.grounding_technique().is_some() || response.distraction_game().is_some());
    }

    #[test]
    fn test_yes_with_a_menu_pick_is_left_to_classifier() {
        let mut state = ConversationState::new();
        state.offer_options();
        let mut voice = voice();
        assert!(respond_to_pending(&mut state, "yes, number 2", &mut voice).is_none());
        assert!(respond_to_pending(&mut state, "no thanks", &mut voice).is_none());
        assert!(state.offered_options());
    }

    #[test]
    fn test_encouragement_keeps_tag() {
        let mut voice = voice();
        let response = encourage(Technique::Triangle, &mut voice);
        assert_eq!(response.grounding_technique(), Some("triangle-breathing"));
        assert!(rendered_from(lexicon::BREATHING_ENCOURAGE, response.text()));
    }
}
