//! Turn processing for a single conversation
//!
//! Each turn runs a fixed sequence: symptom check, farewell check, explicit
//! technique or game request, pending follow-ups, intent classification,
//! response selection and finally optional remote generation.

use super::traits::Generator;
use crate::persona::{self, PromptContext, CONTEXT_TURNS};
use crate::quality::QualityGate;
use crate::state_machine::{
    activities, intent, lexicon, selector, ConversationState, Intent, Response, Selection, Voice,
};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{timeout, Instant};

/// Longest message accepted for a turn, in characters
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// One exchange kept as trailing context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub user: String,
    pub reply: String,
}

/// Per-conversation knobs
#[derive(Debug, Clone)]
pub struct ConversationSettings {
    pub generation_timeout: Duration,
    /// Fixed RNG seed for reproducible replies
    pub seed: Option<u64>,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            generation_timeout: crate::llm::LlmConfig::default().generation_timeout,
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum TurnError {
    #[error("message too long ({0} chars)")]
    MessageTooLong(usize),
}

/// Which step of the turn produced the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Opening,
    Symptom,
    Farewell,
    Request,
    Completion,
    Pending,
    Selected,
    Generated,
}

impl Route {
    fn label(self) -> &'static str {
        match self {
            Route::Opening => "opening",
            Route::Symptom => "symptom",
            Route::Farewell => "farewell",
            Route::Request => "request",
            Route::Completion => "completion",
            Route::Pending => "pending",
            Route::Selected => "selected",
            Route::Generated => "generated",
        }
    }
}

pub struct Conversation {
    state: ConversationState,
    history: VecDeque<Turn>,
    voice: Voice,
    generator: Arc<dyn Generator>,
    gate: QualityGate,
    generation_timeout: Duration,
    last_active: Instant,
}

impl Conversation {
    pub fn new(generator: Arc<dyn Generator>, settings: &ConversationSettings) -> Self {
        let voice = match settings.seed {
            Some(seed) => Voice::seeded(seed),
            None => Voice::from_entropy(),
        };
        Self {
            state: ConversationState::new(),
            history: VecDeque::with_capacity(CONTEXT_TURNS),
            voice,
            generator,
            gate: QualityGate::default(),
            generation_timeout: settings.generation_timeout,
            last_active: Instant::now(),
        }
    }

    /// Time since the last turn started
    pub fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Trailing context, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Turn> {
        self.history.iter()
    }

    /// Back to a fresh conversation
    pub fn reset_conversation(&mut self) {
        self.state.reset();
        self.history.clear();
        self.voice.forget();
    }

    /// Handle one user message. Always produces a reply: anything that goes
    /// wrong is answered with the fixed "trouble thinking" reply.
    pub async fn process_turn(&mut self, text: &str, episode_hint: Option<bool>) -> Response {
        self.last_active = Instant::now();
        match self.run_turn(text, episode_hint).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Turn failed, using fallback reply");
                Response::trouble()
            }
        }
    }

    async fn run_turn(
        &mut self,
        text: &str,
        episode_hint: Option<bool>,
    ) -> Result<Response, TurnError> {
        let text = lexicon::normalize(text);
        let chars = text.chars().count();
        if chars > MAX_MESSAGE_CHARS {
            return Err(TurnError::MessageTooLong(chars));
        }

        let (response, route) = self.respond(&text, episode_hint).await;
        tracing::debug!(
            route = route.label(),
            chars,
            mode = ?self.state.mode(),
            technique = ?self.state.current_technique(),
            "Turn processed"
        );

        if route == Route::Farewell {
            self.reset_conversation();
        } else {
            self.remember(text, &response);
        }
        Ok(response)
    }

    async fn respond(&mut self, text: &str, episode_hint: Option<bool>) -> (Response, Route) {
        if text.is_empty() {
            return (selector::opening(&mut self.voice), Route::Opening);
        }

        if lexicon::is_symptom_phrase(text) {
            let response = selector::symptom_support(&mut self.state, &mut self.voice);
            return (response, Route::Symptom);
        }

        if lexicon::is_farewell_phrase(text) {
            return (selector::farewell(&mut self.voice), Route::Farewell);
        }

        // A running game takes any reply as its answer or play-again choice
        if !self.state.game_round_open() && !self.state.expecting_game_followup() {
            if let Some(token) = activities::requested_option(text, &mut self.voice) {
                let response = activities::start(token, &mut self.state, &mut self.voice);
                return (response, Route::Request);
            }
        }

        if let Some(response) = activities::check_completion(&mut self.state, text, &mut self.voice)
        {
            return (response, Route::Completion);
        }

        if let Some(response) =
            activities::respond_to_pending(&mut self.state, text, &mut self.voice)
        {
            return (response, Route::Pending);
        }

        if !self.state.episode_status_known() && episode_hint.is_none() {
            match intent::detect_episode_answer(text) {
                Some(true) => self.state.enter_support(),
                Some(false) => self.state.enter_neutral(),
                None => {}
            }
        }

        let intent = intent::classify(text, &self.state);
        match selector::select(intent, &mut self.state, episode_hint, &mut self.voice) {
            Selection::Reply(response) => (response, Route::Selected),
            generate @ Selection::Generate { .. } if !self.generator.is_available() => {
                (generate.into_fallback(), Route::Selected)
            }
            Selection::Generate { intent, fallback } => {
                let response = self.generate(text, intent, episode_hint, fallback).await;
                (response, Route::Generated)
            }
        }
    }

    /// Ask the generator for a reply; `fallback` covers failures, timeouts
    /// and rejected candidates.
    async fn generate(
        &mut self,
        text: &str,
        intent: Intent,
        episode_hint: Option<bool>,
        fallback: Response,
    ) -> Response {
        let prompt = persona::build_prompt(&PromptContext {
            message: text,
            intent,
            mode: self.state.mode(),
            episode_hint,
            recent: self
                .history
                .iter()
                .map(|turn| turn.user.as_str())
                .filter(|user| !user.is_empty())
                .collect(),
        });

        let candidate = match timeout(self.generation_timeout, self.generator.generate(&prompt)).await
        {
            Ok(Ok(candidate)) => candidate,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Generation failed, using fallback");
                return fallback;
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = %self.generation_timeout.as_millis(),
                    "Generation timed out, using fallback"
                );
                return fallback;
            }
        };

        let recent: Vec<&str> = self.history.iter().map(|turn| turn.reply.as_str()).collect();
        match self.gate.evaluate(&candidate, &recent) {
            Ok(()) => Response::new(format!("{} {}", candidate.trim(), self.voice.pip())),
            Err(rejection) => {
                tracing::debug!(%rejection, "Generated reply rejected");
                fallback
            }
        }
    }

    fn remember(&mut self, user: String, response: &Response) {
        if self.history.len() == CONTEXT_TURNS {
            self.history.pop_front();
        }
        self.history.push_back(Turn {
            user,
            reply: response.text().to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use crate::runtime::testing::MockGenerator;
    use crate::runtime::traits::DisabledGenerator;
    use crate::state_machine::lexicon::{self, rendered_from};
    use crate::state_machine::{GameKind, Mode, Technique};

    fn settings() -> ConversationSettings {
        ConversationSettings {
            generation_timeout: Duration::from_millis(500),
            seed: Some(17),
        }
    }

    fn offline() -> Conversation {
        Conversation::new(Arc::new(DisabledGenerator), &settings())
    }

    fn with_generator(generator: Arc<MockGenerator>, settings: &ConversationSettings) -> Conversation {
        Conversation::new(generator, settings)
    }

    const GOOD_CANDIDATE: &str =
        "Snow is like a soft blanket for the ground! <i>waddles happily</i>";

    #[tokio::test]
    async fn test_six_turn_support_session() {
        let mut conv = offline();

        let greeting = conv.process_turn("", None).await;
        assert!(rendered_from(lexicon::OPENING_GREETINGS, greeting.text()));

        let support = conv
            .process_turn("I keep hearing voices and I'm scared", None)
            .await;
        assert!(rendered_from(lexicon::SYMPTOM_RESPONSES, support.text()));
        assert_eq!(conv.state().mode(), Mode::Support);
        assert!(conv.state().symptoms_confirmed());
        assert!(conv.state().offered_options());

        let breathing = conv.process_turn("1", None).await;
        assert!(rendered_from(lexicon::BREATHING_STARTS, breathing.text()));
        assert_eq!(conv.state().current_technique(), Some(Technique::Breathing));
        assert_eq!(conv.state().last_selection(), Some("breathing_technique"));

        let praise = conv.process_turn("done, I feel better", None).await;
        assert!(conv.state().last_technique_completed());
        assert!(conv.state().expecting_technique_followup());
        assert!(lexicon::PRAISE
            .iter()
            .any(|t| lexicon::KAOMOJIS
                .iter()
                .any(|k| praise.text().starts_with(&t.replace("{k}", k)))));
        assert!(praise.text().contains("yes"));

        let declined = conv.process_turn("no thanks", None).await;
        assert!(rendered_from(lexicon::FOLLOWUP_DECLINED, declined.text()));
        assert!(conv.state().current_technique().is_none());
        assert!(!conv.state().expecting_technique_followup());
        assert_eq!(conv.state().mode(), Mode::Support);

        let goodbye = conv.process_turn("bye", None).await;
        assert!(rendered_from(lexicon::FAREWELLS, goodbye.text()));
        assert_eq!(conv.state(), &ConversationState::new());
        assert_eq!(conv.history().count(), 0);
    }

    #[tokio::test]
    async fn test_symptom_beats_farewell() {
        let mut conv = offline();
        let response = conv.process_turn("bye, I'm hearing voices", None).await;
        assert!(rendered_from(lexicon::SYMPTOM_RESPONSES, response.text()));
        assert_eq!(conv.state().mode(), Mode::Support);
        assert_eq!(conv.history().count(), 1);
    }

    #[tokio::test]
    async fn test_symptom_overrides_casual_hint() {
        let mut conv = offline();
        conv.process_turn("hello", Some(false)).await;
        assert_eq!(conv.state().mode(), Mode::Neutral);

        conv.process_turn("they're watching me", Some(false)).await;
        assert_eq!(conv.state().mode(), Mode::Support);
        assert!(conv.state().symptoms_confirmed());
    }

    #[tokio::test]
    async fn test_farewell_mid_game_resets() {
        let mut conv = offline();
        conv.process_turn("let's play would you rather", Some(true)).await;
        assert_eq!(conv.state().current_game(), Some(GameKind::WouldYouRather));

        conv.process_turn("gotta go", None).await;
        assert_eq!(conv.state(), &ConversationState::new());
    }

    #[tokio::test]
    async fn test_numbers_ignored_without_menu() {
        let mut conv = offline();
        conv.process_turn("hi", Some(false)).await;
        conv.process_turn("3", None).await;
        assert!(conv.state().current_technique().is_none());
        assert!(conv.state().last_selection().is_none());
    }

    #[tokio::test]
    async fn test_game_round_takes_any_answer() {
        let mut conv = offline();
        let opening = conv.process_turn("can we play a game", Some(false)).await;
        assert!(opening.distraction_game().is_some());
        assert_eq!(conv.state().current_technique(), Some(Technique::Game));

        // "play" would otherwise be a new game request
        let praise = conv.process_turn("I'd rather play in the snow", None).await;
        assert!(conv.state().expecting_game_followup());
        assert!(praise.text().contains("(yes/no)"));

        // "play" again, but as the answer to "another round?"
        conv.process_turn("yes, let's play more", None).await;
        assert!(conv.state().game_round_open());
        conv.process_turn("swimming", None).await;

        conv.process_turn("nope", None).await;
        assert!(conv.state().current_technique().is_none());
        assert!(conv.state().current_game().is_none());
        assert!(conv.state().invariants_hold());
    }

    #[tokio::test]
    async fn test_symptom_mid_game_opens_fresh_menu() {
        let mut conv = offline();
        conv.process_turn("let's play would you rather", Some(false)).await;
        assert!(conv.state().game_round_open());

        conv.process_turn("I'm hearing voices", None).await;
        assert!(!conv.state().game_round_open());
        assert!(conv.state().offered_options());

        let breathing = conv.process_turn("1", None).await;
        assert!(rendered_from(lexicon::BREATHING_STARTS, breathing.text()));
        assert_eq!(conv.state().current_technique(), Some(Technique::Breathing));
        assert!(conv.state().current_game().is_none());
    }

    #[tokio::test]
    async fn test_symptom_clears_pending_followup() {
        let mut conv = offline();
        for text in ["", "I keep hearing voices", "1", "done"] {
            conv.process_turn(text, None).await;
        }
        assert!(conv.state().expecting_technique_followup());

        conv.process_turn("they're watching me", None).await;
        assert!(!conv.state().expecting_technique_followup());

        let sensory = conv.process_turn("2", None).await;
        assert!(rendered_from(lexicon::SENSORY_STARTS, sensory.text()));
        assert_eq!(conv.state().current_technique(), Some(Technique::Sensory));
    }

    #[tokio::test]
    async fn test_yes_to_symptom_menu_starts_a_technique() {
        let mut conv = offline();
        conv.process_turn("I'm hearing voices", None).await;
        let response = conv.process_turn("yes please", None).await;

        assert!(conv.state().current_technique().is_some());
        assert!(!conv.state().offered_options());
        assert!(!rendered_from(lexicon::SUPPORT_ACKS, response.text()));
    }

    #[tokio::test]
    async fn test_turn_marks_conversation_active() {
        let mut conv = offline();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(conv.idle_for() >= Duration::from_millis(30));

        conv.process_turn("hi", None).await;
        assert!(conv.idle_for() < Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_episode_answer_sets_mode() {
        let mut conv = offline();
        conv.process_turn("", None).await;
        conv.process_turn("yes", None).await;
        assert_eq!(conv.state().mode(), Mode::Support);

        let mut casual = offline();
        casual.process_turn("", None).await;
        casual.process_turn("no, I'm fine", None).await;
        assert_eq!(casual.state().mode(), Mode::Neutral);
        assert!(casual.state().episode_status_known());
    }

    #[tokio::test]
    async fn test_accepted_generation_gets_pip_suffix() {
        let generator = Arc::new(MockGenerator::new());
        generator.queue_text(GOOD_CANDIDATE);
        let mut conv = with_generator(generator.clone(), &settings());

        let response = conv.process_turn("tell me about snow", Some(false)).await;
        let suffix = response
            .text()
            .strip_prefix(GOOD_CANDIDATE)
            .expect("candidate used")
            .trim();
        assert!(lexicon::PIP_SUFFIXES.contains(&suffix));

        let prompts = generator.recorded_prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].ends_with("User: tell me about snow\nPippy:"));
        assert!(prompts[0].contains("- Detected intent: general_talk"));
    }

    #[tokio::test]
    async fn test_rejected_generation_uses_fallback() {
        let generator = Arc::new(MockGenerator::new());
        generator.queue_text("I see. Tell me more.");
        let mut conv = with_generator(generator, &settings());

        let response = conv.process_turn("tell me about snow", Some(false)).await;
        assert!(rendered_from(lexicon::CASUAL_TALK, response.text()));
    }

    #[tokio::test]
    async fn test_generation_error_uses_fallback() {
        let generator = Arc::new(MockGenerator::new());
        generator.queue_error(LlmError::server_error("model loading"));
        let mut conv = with_generator(generator, &settings());

        let response = conv.process_turn("purple", Some(false)).await;
        assert!(rendered_from(lexicon::CASUAL_OPEN, response.text()));
    }

    #[tokio::test]
    async fn test_generation_timeout_uses_fallback() {
        let generator = Arc::new(MockGenerator::new().with_delay(Duration::from_millis(300)));
        generator.queue_text(GOOD_CANDIDATE);
        let settings = ConversationSettings {
            generation_timeout: Duration::from_millis(20),
            seed: Some(3),
        };
        let mut conv = with_generator(generator, &settings);

        let response = conv.process_turn("why is snow cold?", Some(false)).await;
        assert!(rendered_from(lexicon::CASUAL_QUESTION, response.text()));
    }

    #[tokio::test]
    async fn test_disabled_generator_is_never_called() {
        let mut conv = offline();
        let response = conv.process_turn("tell me about snow", Some(false)).await;
        assert!(rendered_from(lexicon::CASUAL_TALK, response.text()));
    }

    #[tokio::test]
    async fn test_oversized_message_gets_trouble_reply() {
        let mut conv = offline();
        let response = conv.process_turn(&"a".repeat(MAX_MESSAGE_CHARS + 1), None).await;
        assert_eq!(response, Response::trouble());
        assert_eq!(conv.history().count(), 0);
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        let mut conv = offline();
        for _ in 0..(CONTEXT_TURNS + 3) {
            conv.process_turn("purple", Some(false)).await;
        }
        assert_eq!(conv.history().count(), CONTEXT_TURNS);
    }

    #[tokio::test]
    async fn test_same_seed_same_replies() {
        let mut a = offline();
        let mut b = offline();
        for text in ["", "I feel so anxious", "2", "done"] {
            assert_eq!(a.process_turn(text, None).await, b.process_turn(text, None).await);
        }
    }
}
