//! Property-based tests for the dialogue state machine
//!
//! These drive whole conversations (generation disabled) and check that the
//! priority rules and state invariants hold for arbitrary turn sequences.

use super::intent::detect_selected_option;
use super::state::*;
use crate::runtime::{Conversation, ConversationSettings, DisabledGenerator};
use proptest::prelude::*;
use std::future::Future;
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn conversation(seed: u64) -> Conversation {
    Conversation::new(
        Arc::new(DisabledGenerator),
        &ConversationSettings {
            seed: Some(seed),
            ..Default::default()
        },
    )
}

/// Run `setup` then `last`, returning the state after the final turn
fn state_after(seed: u64, setup: &[String], last: &str, hint: Option<bool>) -> ConversationState {
    block_on(async {
        let mut conv = conversation(seed);
        for text in setup {
            conv.process_turn(text, hint).await;
        }
        conv.process_turn(last, hint).await;
        conv.state().clone()
    })
}

/// Conversation that has just finished a breathing technique
fn after_completion() -> Vec<String> {
    ["", "I keep hearing voices", "1", "done"]
        .into_iter()
        .map(String::from)
        .collect()
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_hint() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(None), Just(Some(true)), Just(Some(false))]
}

fn arb_utterance() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("hello".to_string()),
        Just("I keep hearing voices".to_string()),
        Just("I'm so anxious".to_string()),
        Just("1".to_string()),
        Just("2".to_string()),
        Just("3".to_string()),
        Just("4".to_string()),
        Just("yes".to_string()),
        Just("no thanks".to_string()),
        Just("done".to_string()),
        Just("let's play would you rather".to_string()),
        Just("opposite day".to_string()),
        Just("three things".to_string()),
        Just("can we do some breathing".to_string()),
        Just("any exercise".to_string()),
        Just("I feel lonely".to_string()),
        Just("thank you".to_string()),
        Just("how are you?".to_string()),
        Just("bye".to_string()),
        "[a-z ]{0,20}",
    ]
}

fn arb_history() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_utterance(), 0..8)
}

fn arb_symptom_phrase() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("hearing voices"),
        Just("paranoid"),
        Just("they're watching me"),
        Just("racing thoughts"),
        Just("panicking"),
        Just("can't tell what's real"),
        Just("losing control"),
        Just("help me"),
    ]
}

fn arb_farewell_phrase() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("bye"),
        Just("goodbye"),
        Just("see ya"),
        Just("talk later"),
        Just("gotta go"),
        Just("good night"),
    ]
}

/// Words that trigger nothing on their own
fn arb_filler() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(""),
        Just("ok"),
        Just("well"),
        Just("friend"),
        Just("maybe"),
        Just("tomorrow"),
        Just("really"),
    ]
}

fn arb_negative() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("no"),
        Just("nope"),
        Just("nah"),
        Just("not now"),
        Just("stop"),
        Just("enough"),
    ]
}

fn arb_affirmative() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("yes"),
        Just("yeah"),
        Just("sure"),
        Just("okay"),
        Just("yep"),
        Just("alright"),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// A symptom phrase always lands in support mode, whatever came before
    #[test]
    fn symptom_phrase_forces_support(
        seed in any::<u64>(),
        history in arb_history(),
        hint in arb_hint(),
        prefix in arb_filler(),
        phrase in arb_symptom_phrase(),
        suffix in arb_filler(),
    ) {
        let text = format!("{prefix} {phrase} {suffix}");
        let state = state_after(seed, &history, &text, hint);
        prop_assert_eq!(state.mode(), Mode::Support);
        prop_assert!(state.symptoms_confirmed());
        prop_assert!(state.offered_options());
    }

    /// Right after a symptom turn, "1" starts breathing even if a game round
    /// or a follow-up question was pending before it
    #[test]
    fn symptom_turn_leaves_menu_ready(
        seed in any::<u64>(),
        history in arb_history(),
        hint in arb_hint(),
        prefix in arb_filler(),
        phrase in arb_symptom_phrase(),
    ) {
        let mut setup = history;
        setup.push(format!("{prefix} {phrase}"));
        let state = state_after(seed, &setup, "1", hint);
        prop_assert_eq!(state.current_technique(), Some(Technique::Breathing));
        prop_assert!(state.current_game().is_none());
        prop_assert!(!state.expecting_technique_followup());
        prop_assert!(!state.expecting_game_followup());
        prop_assert_eq!(state.mode(), Mode::Support);
    }

    /// Same, starting from the two pending questions explicitly
    #[test]
    fn symptom_turn_clears_pending_question(
        seed in any::<u64>(),
        pending in prop_oneof![
            Just(vec!["let's play would you rather"]),
            Just(vec!["let's play opposite day", "cold"]),
            Just(vec!["", "I keep hearing voices", "1", "done"]),
        ],
        phrase in arb_symptom_phrase(),
    ) {
        let mut setup: Vec<String> = pending.into_iter().map(String::from).collect();
        setup.push(phrase.to_string());
        let state = state_after(seed, &setup, "1", None);
        prop_assert_eq!(state.current_technique(), Some(Technique::Breathing));
        prop_assert!(!state.expecting_technique_followup());
        prop_assert!(!state.expecting_game_followup());
    }

    /// A farewell ends the conversation: the state is fresh again
    #[test]
    fn farewell_resets_state(
        seed in any::<u64>(),
        history in arb_history(),
        hint in arb_hint(),
        phrase in arb_farewell_phrase(),
        suffix in arb_filler(),
    ) {
        let text = format!("{phrase} {suffix}");
        let state = state_after(seed, &history, &text, hint);
        prop_assert_eq!(state, ConversationState::new());
    }

    /// Option detection depends on the text alone
    #[test]
    fn detect_selected_option_is_pure(text in "[a-z0-9 ]{0,30}") {
        prop_assert_eq!(detect_selected_option(&text), detect_selected_option(&text));
    }

    /// Saying no to "another technique?" leaves nothing running or pending
    #[test]
    fn negative_followup_goes_idle(
        seed in any::<u64>(),
        negative in arb_negative(),
        suffix in arb_filler(),
    ) {
        let text = format!("{negative} {suffix}");
        let state = state_after(seed, &after_completion(), &text, None);
        prop_assert!(state.current_technique().is_none());
        prop_assert!(state.current_game().is_none());
        prop_assert!(!state.expecting_technique_followup());
        prop_assert!(!state.last_technique_completed());
        prop_assert_eq!(state.mode(), Mode::Support);
    }

    /// Saying yes starts another technique
    #[test]
    fn affirmative_followup_starts_technique(
        seed in any::<u64>(),
        affirmative in arb_affirmative(),
        suffix in arb_filler(),
    ) {
        let text = format!("{affirmative} {suffix}");
        let state = state_after(seed, &after_completion(), &text, None);
        prop_assert!(state.current_technique().is_some());
        prop_assert!(!state.expecting_technique_followup());
    }

    /// Structural invariants survive any sequence of turns
    #[test]
    fn invariants_hold_for_any_sequence(
        seed in any::<u64>(),
        history in arb_history(),
        last in arb_utterance(),
        hint in arb_hint(),
    ) {
        let state = state_after(seed, &history, &last, hint);
        prop_assert!(state.invariants_hold());
        if state.current_game().is_some() {
            prop_assert_eq!(state.current_technique(), Some(Technique::Game));
        }
        if state.symptoms_confirmed() {
            prop_assert_eq!(state.mode(), Mode::Support);
        }
    }
}
