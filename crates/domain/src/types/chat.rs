//! Assistant chat and meal-photo payloads

use serde::{Deserialize, Serialize};

use crate::impl_label_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
}

/// Tone the assistant adopts in chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiPersonality {
    #[default]
    FriendlyCoach,
    StrictMentor,
    FunnyMotivator,
    ZenMaster,
    FitnessGuru,
}

impl_label_conversions!(AiPersonality {
    FriendlyCoach => "Friendly Coach",
    StrictMentor => "Strict Mentor",
    FunnyMotivator => "Funny Motivator",
    ZenMaster => "Zen Master",
    FitnessGuru => "Fitness Guru",
});

impl AiPersonality {
    pub const ALL: [Self; 5] = [
        Self::FriendlyCoach,
        Self::StrictMentor,
        Self::FunnyMotivator,
        Self::ZenMaster,
        Self::FitnessGuru,
    ];

    /// System instruction sent with every chat request.
    pub fn system_instruction(&self) -> &'static str {
        match self {
            Self::FriendlyCoach => {
                "You are HealthProd, a friendly, encouraging, and motivational AI life coach. Your \
                 goal is to be supportive and provide positive reinforcement. Keep your answers \
                 concise, helpful, and full of warmth."
            }
            Self::StrictMentor => {
                "You are HealthProd, a disciplined and direct AI mentor. Your goal is to provide \
                 clear, no-nonsense advice to maximize productivity and efficiency. Be direct, \
                 logical, and focused on results. Avoid fluff."
            }
            Self::FunnyMotivator => {
                "You are HealthProd, a witty and humorous AI motivator. Your goal is to make \
                 self-improvement fun. Use humor, clever analogies, and lighthearted jokes to \
                 deliver advice. Keep it playful but still helpful."
            }
            Self::ZenMaster => {
                "You are HealthProd, a calm and mindful Zen Master. Your goal is to guide the user \
                 towards inner peace, focus, and mindfulness. Use simple, profound language, \
                 metaphors from nature, and encourage deep breathing and presence. Your tone is \
                 serene and wise."
            }
            Self::FitnessGuru => {
                "You are HealthProd, an energetic and knowledgeable Fitness Guru. Your goal is to \
                 motivate the user to be active and healthy. Provide workout tips, nutritional \
                 advice, and encouragement. Be enthusiastic, clear, and action-oriented. Use \
                 fitness terminology and keep the energy high."
            }
        }
    }

    /// Opening message of a fresh conversation.
    pub fn greeting(&self) -> &'static str {
        match self {
            Self::FriendlyCoach => {
                "Hello! I'm HealthProd, your friendly AI companion. I'm here to cheer you on! What \
                 can I help you with today?"
            }
            Self::StrictMentor => {
                "Greetings. I am HealthProd, your mentor for peak performance. State your \
                 objective."
            }
            Self::FunnyMotivator => {
                "Hey there, superstar! HealthProd here, ready to turn your 'ugh' into 'aha!'. What \
                 epic quest are we conquering first?"
            }
            Self::ZenMaster => {
                "Breathe in, breathe out. I am HealthProd, a guide on your path to stillness. The \
                 present moment holds all you seek. How can I help you find your center today?"
            }
            Self::FitnessGuru => {
                "Let's get moving! I'm HealthProd, your personal Fitness Guru, here to help you \
                 crush your goals. Ready to sweat and feel amazing? What's the plan, champ?"
            }
        }
    }
}

/// Raw meal photo submitted for nutritional analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}
