//! Offline catalog of grounding techniques and distraction games
//!
//! Served to the UI so the exercises work without any generated text.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroundingTechnique {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub steps: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistractionGame {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub instructions: &'static [&'static str],
}

pub const GROUNDING_TECHNIQUES: &[GroundingTechnique] = &[
    GroundingTechnique {
        id: "54321",
        name: "5-4-3-2-1 Technique",
        description: "A sensory grounding technique to help you feel more present",
        steps: &[
            "Look around and name 5 things you can see",
            "Touch 4 things you can feel",
            "Listen for 3 things you can hear",
            "Smell 2 things you can smell",
            "Taste 1 thing you can taste",
        ],
    },
    GroundingTechnique {
        id: "breathing",
        name: "Deep Breathing",
        description: "Simple breathing exercise to calm your nervous system",
        steps: &[
            "Sit comfortably and close your eyes",
            "Breathe in slowly through your nose for 4 counts",
            "Hold your breath for 4 counts",
            "Breathe out slowly through your mouth for 6 counts",
            "Repeat this cycle 5-10 times",
        ],
    },
    GroundingTechnique {
        id: "body-scan",
        name: "Body Scan",
        description: "Progressive muscle relaxation to release tension",
        steps: &[
            "Start with your toes - tense them for 5 seconds, then relax",
            "Move to your calves - tense and relax",
            "Continue up your body: thighs, stomach, chest, arms, hands, neck, face",
            "Feel the tension leaving each part as you relax",
        ],
    },
];

pub const DISTRACTION_GAMES: &[DistractionGame] = &[
    DistractionGame {
        id: "color-naming",
        name: "Color Hunt",
        description: "Find objects of different colors around you",
        instructions: &[
            "Look around your room",
            "Find 3 things that are blue",
            "Find 3 things that are red",
            "Find 3 things that are green",
            "Find 3 things that are yellow",
        ],
    },
    DistractionGame {
        id: "animal-naming",
        name: "Animal Alphabet",
        description: "Name animals for each letter of the alphabet",
        instructions: &[
            "Start with A - name an animal that starts with A",
            "Continue through the alphabet: B, C, D...",
            "Take your time and be creative!",
            "If you get stuck, skip that letter and continue",
        ],
    },
    DistractionGame {
        id: "counting-game",
        name: "Counting Challenge",
        description: "Count objects in your environment",
        instructions: &[
            "Count all the windows in your room",
            "Count all the books you can see",
            "Count all the electrical outlets",
            "Count all the pieces of furniture",
            "Count all the items on your desk",
        ],
    },
];

pub fn grounding_technique(id: &str) -> Option<&'static GroundingTechnique> {
    GROUNDING_TECHNIQUES.iter().find(|t| t.id == id)
}

pub fn distraction_game(id: &str) -> Option<&'static DistractionGame> {
    DISTRACTION_GAMES.iter().find(|g| g.id == id)
}

pub fn random_grounding_technique<R: Rng + ?Sized>(rng: &mut R) -> &'static GroundingTechnique {
    // non-empty const table
    GROUNDING_TECHNIQUES
        .choose(rng)
        .unwrap_or(&GROUNDING_TECHNIQUES[0])
}

pub fn random_distraction_game<R: Rng + ?Sized>(rng: &mut R) -> &'static DistractionGame {
    DISTRACTION_GAMES.choose(rng).unwrap_or(&DISTRACTION_GAMES[0])
}
