//! Display mapping from classifier labels to rendered states

use serde::Serialize;

/// Coping tips shown with the Stressed state
pub const COPING_TIPS: [&str; 5] = [
    "🧘 Practice mindfulness or meditation.",
    "🎶 Listen to calming music.",
    "🌳 Take a short walk and get fresh air.",
    "😴 Ensure you're getting enough sleep.",
    "💧 Stay hydrated and take regular breaks.",
];

/// Rendered affective state.
///
/// Classifier labels map onto a closed display set; any label outside the
/// known set renders as `Unknown` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    Unstressed,
    Stressed,
    Neutral,
    Unknown,
}

impl DisplayState {
    pub fn from_label(label: &str) -> Self {
        match label {
            "positive" => DisplayState::Unstressed,
            "negative" => DisplayState::Stressed,
            "neutral" => DisplayState::Neutral,
            _ => DisplayState::Unknown,
        }
    }

    /// Headline rendered for the state (also what history records store)
    pub fn headline(&self) -> &'static str {
        match self {
            DisplayState::Unstressed => "Unstressed 😊",
            DisplayState::Stressed => "Stressed ⚠️",
            DisplayState::Neutral => "Neutral 😐",
            DisplayState::Unknown => "Unknown",
        }
    }

    /// Guidance text shown beneath the headline
    pub fn guidance(&self) -> &'static str {
        match self {
            DisplayState::Unstressed => "😊 You seem relaxed. Keep up the good work!",
            DisplayState::Stressed => "⚠️ Take care! Here are some tips to reduce stress:",
            DisplayState::Neutral => {
                "You're doing fine. Stay balanced and keep an eye on your well-being!"
            }
            DisplayState::Unknown => "The analysis returned an unrecognized state.",
        }
    }

    /// Tip list for states that carry one
    pub fn coping_tips(&self) -> Option<&'static [&'static str]> {
        match self {
            DisplayState::Stressed => Some(&COPING_TIPS),
            _ => None,
        }
    }
}
