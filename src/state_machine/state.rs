//! Conversation state types

use serde::Serialize;

/// Whether the user is treated as being in a support (crisis) context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Support,
    #[default]
    Neutral,
}

/// Grounding technique or activity currently in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    Breathing,
    Sensory,
    Game,
    Imagination,
    Butterfly,
    Ocean,
    Triangle,
    Color,
    BodyMap,
    Senses54321,
    BodyScan,
    AlphabetGame,
    StoryBuilder,
    SafePlace,
}

impl Technique {
    /// Tag reported to the UI in `groundingTechnique` / `distractionGame`
    pub fn tag(self) -> &'static str {
        match self {
            Technique::Breathing => "breathing",
            Technique::Sensory => "sensory",
            Technique::Game => "game",
            Technique::Imagination => "imagination-journey",
            Technique::Butterfly => "butterfly-hug",
            Technique::Ocean => "ocean-breathing",
            Technique::Triangle => "triangle-breathing",
            Technique::Color => "color-spotting",
            Technique::BodyMap => "body-map",
            Technique::Senses54321 => "54321",
            Technique::BodyScan => "body-scan",
            Technique::AlphabetGame => "alphabet-game",
            Technique::StoryBuilder => "story-builder",
            Technique::SafePlace => "safe-place",
        }
    }
}

/// Structured distraction games with a play-again loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    WouldYouRather,
    OppositeDay,
    ThreeThings,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [
        GameKind::WouldYouRather,
        GameKind::OppositeDay,
        GameKind::ThreeThings,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            GameKind::WouldYouRather => "would-you-rather",
            GameKind::OppositeDay => "opposite-day",
            GameKind::ThreeThings => "three-things",
        }
    }

    /// Option token that starts exactly this game
    pub fn token(self) -> OptionToken {
        match self {
            GameKind::WouldYouRather => OptionToken::WouldYouRatherGame,
            GameKind::OppositeDay => OptionToken::OppositeDayGame,
            GameKind::ThreeThings => OptionToken::ThreeThingsGame,
        }
    }
}

/// A technique or game the user can pick, by number or by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionToken {
    BreathingTechnique,
    SensoryGrounding,
    DistractionGame,
    JustChat,
    ImaginationJourney,
    ButterflyHug,
    OceanBreathing,
    TriangleBreathing,
    ColorSpotting,
    BodyMap,
    Senses54321,
    BodyScan,
    AlphabetGame,
    WouldYouRatherGame,
    OppositeDayGame,
    ThreeThingsGame,
    StoryBuilder,
    SafePlace,
}

impl OptionToken {
    pub const ALL: [OptionToken; 18] = [
        OptionToken::BreathingTechnique,
        OptionToken::SensoryGrounding,
        OptionToken::DistractionGame,
        OptionToken::JustChat,
        OptionToken::ImaginationJourney,
        OptionToken::ButterflyHug,
        OptionToken::OceanBreathing,
        OptionToken::TriangleBreathing,
        OptionToken::ColorSpotting,
        OptionToken::BodyMap,
        OptionToken::Senses54321,
        OptionToken::BodyScan,
        OptionToken::AlphabetGame,
        OptionToken::WouldYouRatherGame,
        OptionToken::OppositeDayGame,
        OptionToken::ThreeThingsGame,
        OptionToken::StoryBuilder,
        OptionToken::SafePlace,
    ];

    /// Pool used when the user asks for "any" technique or says yes to another one
    pub const SURPRISE: [OptionToken; 14] = [
        OptionToken::BreathingTechnique,
        OptionToken::SensoryGrounding,
        OptionToken::DistractionGame,
        OptionToken::ImaginationJourney,
        OptionToken::ButterflyHug,
        OptionToken::OceanBreathing,
        OptionToken::TriangleBreathing,
        OptionToken::ColorSpotting,
        OptionToken::BodyMap,
        OptionToken::Senses54321,
        OptionToken::BodyScan,
        OptionToken::AlphabetGame,
        OptionToken::StoryBuilder,
        OptionToken::SafePlace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionToken::BreathingTechnique => "breathing_technique",
            OptionToken::SensoryGrounding => "sensory_grounding",
            OptionToken::DistractionGame => "distraction_game",
            OptionToken::JustChat => "just_chat",
            OptionToken::ImaginationJourney => "imagination_journey",
            OptionToken::ButterflyHug => "butterfly_hug",
            OptionToken::OceanBreathing => "ocean_breathing",
            OptionToken::TriangleBreathing => "triangle_breathing",
            OptionToken::ColorSpotting => "color_spotting",
            OptionToken::BodyMap => "body_map",
            OptionToken::Senses54321 => "senses_54321",
            OptionToken::BodyScan => "body_scan",
            OptionToken::AlphabetGame => "alphabet_game",
            OptionToken::WouldYouRatherGame => "would_you_rather_game",
            OptionToken::OppositeDayGame => "opposite_day_game",
            OptionToken::ThreeThingsGame => "three_things_game",
            OptionToken::StoryBuilder => "story_builder",
            OptionToken::SafePlace => "safe_place",
        }
    }

    /// Technique that becomes active when this option is started.
    ///
    /// All game tokens share `Technique::Game`; the concrete game lives in
    /// `ConversationState::current_game`. `JustChat` starts nothing.
    pub fn technique(self) -> Option<Technique> {
        match self {
            OptionToken::BreathingTechnique => Some(Technique::Breathing),
            OptionToken::SensoryGrounding => Some(Technique::Sensory),
            OptionToken::DistractionGame
            | OptionToken::WouldYouRatherGame
            | OptionToken::OppositeDayGame
            | OptionToken::ThreeThingsGame => Some(Technique::Game),
            OptionToken::JustChat => None,
            OptionToken::ImaginationJourney => Some(Technique::Imagination),
            OptionToken::ButterflyHug => Some(Technique::Butterfly),
            OptionToken::OceanBreathing => Some(Technique::Ocean),
            OptionToken::TriangleBreathing => Some(Technique::Triangle),
            OptionToken::ColorSpotting => Some(Technique::Color),
            OptionToken::BodyMap => Some(Technique::BodyMap),
            OptionToken::Senses54321 => Some(Technique::Senses54321),
            OptionToken::BodyScan => Some(Technique::BodyScan),
            OptionToken::AlphabetGame => Some(Technique::AlphabetGame),
            OptionToken::StoryBuilder => Some(Technique::StoryBuilder),
            OptionToken::SafePlace => Some(Technique::SafePlace),
        }
    }
}

/// Mutable per-conversation record.
///
/// Fields are private: every change goes through a named method so the
/// invariants below hold after each call.
///
/// - `current_game` is only set while `current_technique == Some(Game)`.
/// - At most one of the two follow-up expectations is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    mode: Mode,
    episode_status_known: bool,
    offered_techniques: bool,
    offered_options: bool,
    expecting_technique_followup: bool,
    expecting_game_followup: bool,
    current_technique: Option<Technique>,
    current_game: Option<GameKind>,
    last_technique_completed: bool,
    symptoms_confirmed: bool,
    last_selection: Option<String>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the fresh-session state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn episode_status_known(&self) -> bool {
        self.episode_status_known
    }

    pub fn offered_techniques(&self) -> bool {
        self.offered_techniques
    }

    pub fn offered_options(&self) -> bool {
        self.offered_options
    }

    pub fn expecting_technique_followup(&self) -> bool {
        self.expecting_technique_followup
    }

    pub fn expecting_game_followup(&self) -> bool {
        self.expecting_game_followup
    }

    pub fn current_technique(&self) -> Option<Technique> {
        self.current_technique
    }

    pub fn current_game(&self) -> Option<GameKind> {
        self.current_game
    }

    pub fn last_technique_completed(&self) -> bool {
        self.last_technique_completed
    }

    pub fn symptoms_confirmed(&self) -> bool {
        self.symptoms_confirmed
    }

    pub fn last_selection(&self) -> Option<&str> {
        self.last_selection.as_deref()
    }

    /// A game round is waiting for the user's answer
    pub fn game_round_open(&self) -> bool {
        self.current_technique == Some(Technique::Game)
            && self.current_game.is_some()
            && !self.expecting_game_followup
    }

    pub fn invariants_hold(&self) -> bool {
        let game_consistent =
            self.current_game.is_none() || self.current_technique == Some(Technique::Game);
        let single_followup =
            !(self.expecting_technique_followup && self.expecting_game_followup);
        game_consistent && single_followup
    }

    // ------------------------------------------------------------------
    // Mode
    // ------------------------------------------------------------------

    /// Symptoms were reported or an episode was confirmed
    pub fn enter_support(&mut self) {
        self.mode = Mode::Support;
        self.symptoms_confirmed = true;
        self.episode_status_known = true;
    }

    /// The user is not in an episode and wants ordinary chat
    pub fn enter_neutral(&mut self) {
        self.mode = Mode::Neutral;
        self.symptoms_confirmed = false;
        self.episode_status_known = true;
    }

    // ------------------------------------------------------------------
    // Menus
    // ------------------------------------------------------------------

    /// A numbered menu (1-4) was shown; numeric replies are now selections
    pub fn offer_options(&mut self) {
        self.offered_options = true;
        self.offered_techniques = true;
    }

    pub fn record_selection(&mut self, token: OptionToken) {
        self.last_selection = Some(token.as_str().to_string());
    }

    // ------------------------------------------------------------------
    // Techniques and games
    // ------------------------------------------------------------------

    /// Apply the state change for starting `token`. Resolves any open menu
    /// and any pending follow-up question.
    pub fn begin(&mut self, token: OptionToken, game: Option<GameKind>) {
        self.offered_options = false;
        self.offered_techniques = false;
        self.expecting_technique_followup = false;
        self.expecting_game_followup = false;
        self.last_technique_completed = false;
        self.current_technique = token.technique();
        self.current_game = match self.current_technique {
            Some(Technique::Game) => game,
            _ => None,
        };
    }

    /// Switch to another round of `game` after a "play again"
    pub fn next_round(&mut self, game: GameKind) {
        self.expecting_game_followup = false;
        self.current_technique = Some(Technique::Game);
        self.current_game = Some(game);
    }

    /// The user reported finishing the active technique
    pub fn complete_technique(&mut self) {
        self.last_technique_completed = true;
        self.current_technique = None;
        self.current_game = None;
    }

    /// Nothing in progress, nothing pending
    pub fn settle(&mut self) {
        self.current_technique = None;
        self.current_game = None;
        self.expecting_technique_followup = false;
        self.expecting_game_followup = false;
        self.last_technique_completed = false;
    }

    pub fn expect_technique_followup(&mut self) {
        self.expecting_technique_followup = true;
        self.expecting_game_followup = false;
    }

    pub fn expect_game_followup(&mut self) {
        self.expecting_game_followup = true;
        self.expecting_technique_followup = false;
    }
}
